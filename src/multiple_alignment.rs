/*!
The output of a progressive alignment run.
Every input id is present exactly once, in input order, and every aligned sequence has the same width.
*/

use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;

use crate::ambiguity::{AmbiguitySet, GAP_SYMBOL};
use crate::errors::MsaError;
use crate::guide_tree::{GuideTree, Operand};
use crate::scoring::ScoringTable;

/// Summary of one internal-node merge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MergeRecord {
    /// The internal node created by this merge
    pub node_id: usize,
    /// The left operand as written in the guide tree
    pub left: Operand,
    /// The right operand as written in the guide tree
    pub right: Operand,
    /// Pairwise alignment score of the two flattened operands
    pub score: i32,
    /// Width of the whole alignment after this merge
    pub width: usize
}

/// Contains a final multiple alignment result
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleAlignment {
    /// Sequence ids, in input order
    ids: Vec<String>,
    /// Aligned sequences, parallel to `ids`
    sequences: Vec<Vec<u8>>,
    /// Per-column residue sets at the root of the guide tree
    consensus: Vec<AmbiguitySet>,
    /// One record per internal node, in merge order
    merges: Vec<MergeRecord>,
    /// The tree that drove the merges
    guide_tree: GuideTree
}

impl MultipleAlignment {
    /// General Constructor for MultipleAlignment.
    /// # Arguments
    /// * `ids` - the sequence ids
    /// * `sequences` - the aligned sequences, parallel to `ids`
    /// * `consensus` - the root consensus columns
    /// * `merges` - the per-node merge records
    /// * `guide_tree` - the guide tree used for the run
    /// # Errors
    /// * `MsaError::StructuralError` if the id and sequence counts differ, or the sequences and consensus are not all the same width
    pub fn new(ids: Vec<String>, sequences: Vec<Vec<u8>>, consensus: Vec<AmbiguitySet>, merges: Vec<MergeRecord>, guide_tree: GuideTree) -> Result<MultipleAlignment, Box<dyn std::error::Error>> {
        if ids.len() != sequences.len() {
            return Err(MsaError::structural(format!("{} ids provided for {} aligned sequences", ids.len(), sequences.len())));
        }
        let width = consensus.len();
        if let Some((id, s)) = ids.iter().zip(sequences.iter()).find(|(_, s)| s.len() != width) {
            return Err(MsaError::structural(format!("Aligned sequence {id} has width {}, expected {width}", s.len())));
        }
        Ok(MultipleAlignment {
            ids,
            sequences,
            consensus,
            merges,
            guide_tree
        })
    }

    /// Returns the aligned sequence for an id
    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.ids.iter()
            .position(|i| i == id)
            .map(|index| self.sequences[index].as_slice())
    }

    /// Iterates over `(id, aligned sequence)` in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.ids.iter()
            .map(|i| i.as_str())
            .zip(self.sequences.iter().map(|s| s.as_slice()))
    }

    /// Hands the alignment over as an id-keyed map, e.g. for a writer
    pub fn into_map(self) -> HashMap<String, Vec<u8>> {
        self.ids.into_iter()
            .zip(self.sequences)
            .collect()
    }

    /// Number of alignment columns
    pub fn width(&self) -> usize {
        self.consensus.len()
    }

    /// Number of aligned sequences
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sum-of-pairs score over every column.
    /// Two gaps score 0, a residue against a gap scores `gap_penalty`, and two residues score via the table.
    /// # Arguments
    /// * `scoring` - substitution scores
    /// * `gap_penalty` - score of a residue paired with a gap
    pub fn sum_of_pairs(&self, scoring: &ScoringTable, gap_penalty: i32) -> i64 {
        let mut total: i64 = 0;
        for column in 0..self.width() {
            for (s1, s2) in self.sequences.iter().tuple_combinations() {
                let pair_score = match (s1[column], s2[column]) {
                    (GAP_SYMBOL, GAP_SYMBOL) => 0,
                    (GAP_SYMBOL, _) | (_, GAP_SYMBOL) => gap_penalty,
                    (a, b) => scoring.score(a, b)
                };
                total += pair_score as i64;
            }
        }
        total
    }

    // Getters
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn sequences(&self) -> &[Vec<u8>] {
        &self.sequences
    }

    pub fn consensus(&self) -> &[AmbiguitySet] {
        &self.consensus
    }

    pub fn merges(&self) -> &[MergeRecord] {
        &self.merges
    }

    pub fn guide_tree(&self) -> &GuideTree {
        &self.guide_tree
    }
}
