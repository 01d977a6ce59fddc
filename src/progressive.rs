/*!
This module provides access to the ProgressiveMsa, which builds a multiple alignment by walking a guide tree and merging two operands at a time.
Each merge aligns the flattened operands with Needleman-Wunsch, replays any new gap columns onto every sequence already merged into either operand, and stores the per-column union of both operands at the new node.

# Example usage
```rust
use progressive_msa::msa_config::{MsaConfigBuilder, ScoringScheme};
use progressive_msa::progressive::ProgressiveMsa;

let config = MsaConfigBuilder::default()
    .scoring(ScoringScheme::Simple { match_score: 1, mismatch_score: -1 })
    .gap_penalty(-1)
    .build()
    .unwrap();

let mut msa = ProgressiveMsa::with_config(config).unwrap();
msa.add_sequence("s1", b"AGT").unwrap();
msa.add_sequence("s2", b"AGT").unwrap();
msa.add_sequence("s3", b"ACGT").unwrap();

// s1 and s2 get merged first, then the gap opened for s3 is replayed onto both of them
let alignment = msa.align().unwrap();
assert_eq!(alignment.get("s1"), Some(&b"A-GT"[..]));
assert_eq!(alignment.get("s2"), Some(&b"A-GT"[..]));
assert_eq!(alignment.get("s3"), Some(&b"ACGT"[..]));
```
*/

use log::{debug, trace};
use rustc_hash::FxHashMap as HashMap;

use crate::ambiguity::{flatten, AmbiguitySet, GAP_SYMBOL};
use crate::errors::MsaError;
use crate::guide_tree::{build_tree, GuideTree, Operand};
use crate::kmer_similarity::{extract_kmers, order_by_kmer_similarity};
use crate::msa_config::MsaConfig;
use crate::multiple_alignment::{MergeRecord, MultipleAlignment};
use crate::pairwise_alignment::{apply_ops, needleman_wunsch};
use crate::scoring::ScoringTable;

/// Core utility that will generate a progressive multiple sequence alignment.
/// Sequences are borrowed until the alignment is generated.
#[derive(Debug, Default)]
pub struct ProgressiveMsa<'a> {
    /// Sequence ids, in the order they were added
    ids: Vec<&'a str>,
    /// The raw, gap-free sequences, parallel to `ids`
    sequences: Vec<&'a [u8]>,
    /// The config for this alignment run
    config: MsaConfig
}

impl<'a> ProgressiveMsa<'a> {
    /// Creates a new instance of ProgressiveMsa and performs sanity checks.
    /// # Arguments
    /// * `config` - the run configuration
    /// # Errors
    /// * `MsaError::InvalidParameter` if the k-mer length is 0 or the gap penalty is positive
    pub fn with_config(config: MsaConfig) -> Result<ProgressiveMsa<'a>, Box<dyn std::error::Error>> {
        if config.kmer_length == 0 {
            return Err(MsaError::invalid_parameter("k-mer length must be positive"));
        }
        if config.gap_penalty > 0 {
            return Err(MsaError::invalid_parameter(format!("gap penalty must be <= 0, got {}", config.gap_penalty)));
        }
        Ok(ProgressiveMsa {
            ids: vec![],
            sequences: vec![],
            config
        })
    }

    /// Adds a new sequence to the run.
    /// # Arguments
    /// * `id` - the sequence id, must be unique within the run
    /// * `sequence` - the raw residues, must not contain the gap symbol
    /// # Errors
    /// * `MsaError::StructuralError` if the id was already added
    /// * `MsaError::InvalidParameter` if the sequence contains a gap
    pub fn add_sequence(&mut self, id: &'a str, sequence: &'a [u8]) -> Result<(), Box<dyn std::error::Error>> {
        if self.ids.contains(&id) {
            return Err(MsaError::structural(format!("Duplicate sequence id: {id}")));
        }
        if sequence.contains(&GAP_SYMBOL) {
            return Err(MsaError::invalid_parameter(format!("Input sequence {id} contains the gap symbol")));
        }
        self.ids.push(id);
        self.sequences.push(sequence);
        Ok(())
    }

    /// Builds the k-mer similarity guide tree for the sequences added so far
    /// # Errors
    /// * if k-mer extraction fails
    pub fn guide_tree(&self) -> Result<GuideTree, Box<dyn std::error::Error>> {
        let k = self.config.kmer_length;
        let mut kmer_map: Vec<(&str, Vec<&[u8]>)> = Vec::with_capacity(self.ids.len());
        for (&id, &seq) in self.ids.iter().zip(self.sequences.iter()) {
            kmer_map.push((id, extract_kmers(seq, k)?));
        }
        let order = order_by_kmer_similarity(&kmer_map);
        debug!("Merge order: {:?}", order);
        Ok(build_tree(&order))
    }

    /// The core function that gets called after adding all the sequences we care about
    /// # Errors
    /// * if the guide tree cannot be built or the executor hits a structural problem
    pub fn align(&self) -> Result<MultipleAlignment, Box<dyn std::error::Error>> {
        let tree = self.guide_tree()?;
        self.align_with_tree(&tree)
    }

    /// Runs the progressive merges over a caller-provided guide tree.
    /// Any binary topology works as long as every internal node only references terminals or earlier, not yet consumed, internal nodes.
    /// # Arguments
    /// * `tree` - the guide tree; its terminal labels must be exactly the added ids
    /// # Errors
    /// * `MsaError::StructuralError` if the terminals do not match the ids, an operand is dangling or reused, or the tree does not join every terminal
    pub fn align_with_tree(&self, tree: &GuideTree) -> Result<MultipleAlignment, Box<dyn std::error::Error>> {
        let num_terminals = tree.num_terminals();
        if num_terminals != self.ids.len() {
            return Err(MsaError::structural(format!("Guide tree has {} terminals for {} sequences", num_terminals, self.ids.len())));
        }

        // map each terminal id onto the input index of its sequence
        let input_lookup: HashMap<&str, usize> = self.ids.iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let mut terminal_of_input: Vec<Option<usize>> = vec![None; self.ids.len()];
        for (t, label) in tree.terminal_labels().iter().enumerate() {
            let input_index = match input_lookup.get(label.as_str()) {
                Some(&i) => i,
                None => return Err(MsaError::structural(format!("Guide tree terminal {label} is not an input sequence")))
            };
            if terminal_of_input[input_index].is_some() {
                return Err(MsaError::structural(format!("Guide tree lists terminal {label} more than once")));
            }
            terminal_of_input[input_index] = Some(t + 1);
        }

        if num_terminals == 0 {
            if tree.num_internal_nodes() > 0 {
                return Err(MsaError::structural(format!("Guide tree has {} internal nodes but no terminals", tree.num_internal_nodes())));
            }
            return MultipleAlignment::new(vec![], vec![], vec![], vec![], tree.clone());
        }

        let scoring = ScoringTable::from_config(&self.config);
        let mut arena = HandleArena::new(tree.num_nodes(), num_terminals);
        for (input_index, terminal) in terminal_of_input.iter().enumerate() {
            // every input was matched above since the counts are equal and there are no repeats
            if let Some(t) = terminal {
                arena.set_terminal(*t, self.sequences[input_index]);
            }
        }

        let mut merges: Vec<MergeRecord> = Vec::with_capacity(tree.num_internal_nodes());
        for (node_id, left, right) in tree.internal_nodes() {
            let record = arena.merge(node_id, left, right, &scoring, self.config.gap_penalty)?;
            debug!("Merged node {} ({:?} + {:?}): score={}, width={}", node_id, left, right, record.score, record.width);
            merges.push(record);
        }

        let root = tree.root_id().unwrap_or(1);
        arena.check_fully_merged(root)?;

        let mut aligned: Vec<Vec<u8>> = Vec::with_capacity(self.ids.len());
        for terminal in terminal_of_input.iter() {
            let t = terminal.ok_or_else(|| MsaError::structural("Input sequence missing from guide tree"))?;
            aligned.push(flatten(arena.columns(t)?));
        }
        let consensus = arena.columns(root)?.to_vec();

        MultipleAlignment::new(
            self.ids.iter().map(|s| s.to_string()).collect(),
            aligned,
            consensus,
            merges,
            tree.clone()
        )
    }

    // Getters
    pub fn ids(&self) -> &[&'a str] {
        &self.ids
    }

    pub fn sequences(&self) -> &[&'a [u8]] {
        &self.sequences
    }

    pub fn config(&self) -> &MsaConfig {
        &self.config
    }
}

/// Every sequence handle of one run, indexed by node id - 1.
/// This is the only mutable state of a run and it is only changed by `merge`.
struct HandleArena {
    /// Column sets for each handle, `None` until the node is processed
    columns: Vec<Option<Vec<AmbiguitySet>>>,
    /// For each handle, the id of the top-most node it has been merged into (itself if never merged)
    cluster_of: Vec<usize>,
    /// Handles that have been consumed by a merge, in the order they were finalized
    history: Vec<usize>,
    /// Terminal ids are `1..=num_terminals`
    num_terminals: usize
}

impl HandleArena {
    fn new(num_nodes: usize, num_terminals: usize) -> HandleArena {
        HandleArena {
            columns: vec![None; num_nodes],
            cluster_of: (1..=num_nodes).collect(),
            history: vec![],
            num_terminals
        }
    }

    fn set_terminal(&mut self, terminal_id: usize, sequence: &[u8]) {
        self.columns[terminal_id - 1] = Some(AmbiguitySet::from_sequence(sequence));
    }

    fn columns(&self, id: usize) -> Result<&[AmbiguitySet], Box<dyn std::error::Error>> {
        match self.columns.get(id.wrapping_sub(1)) {
            Some(Some(c)) => Ok(c),
            _ => Err(MsaError::structural(format!("No sequence handle for node {id}")))
        }
    }

    /// Checks that an operand exists, is of the right kind, is defined before `node_id`, and has not been merged yet
    fn resolve(&self, node_id: usize, operand: Operand) -> Result<usize, Box<dyn std::error::Error>> {
        let id = operand.id();
        let valid_kind = match operand {
            Operand::Terminal(t) => (1..=self.num_terminals).contains(&t),
            Operand::Internal(n) => n > self.num_terminals && n < node_id
        };
        if !valid_kind || self.columns(id).is_err() {
            return Err(MsaError::structural(format!("Node {node_id} references unknown operand {operand:?}")));
        }
        if self.cluster_of[id - 1] != id {
            return Err(MsaError::structural(format!("Node {node_id} reuses operand {operand:?}, already merged into node {}", self.cluster_of[id - 1])));
        }
        Ok(id)
    }

    /// Merges two operands into `node_id`, replaying the new gap columns onto everything already merged into either side
    fn merge(&mut self, node_id: usize, left: Operand, right: Operand, scoring: &ScoringTable, gap_penalty: i32) -> Result<MergeRecord, Box<dyn std::error::Error>> {
        if node_id > self.columns.len() {
            return Err(MsaError::structural(format!("Node {node_id} is outside the guide tree")));
        }
        let l = self.resolve(node_id, left)?;
        let r = self.resolve(node_id, right)?;
        if l == r {
            return Err(MsaError::structural(format!("Node {node_id} joins operand {l} with itself")));
        }

        let left_columns = self.columns(l)?;
        let right_columns = self.columns(r)?;
        let pairwise = needleman_wunsch(&flatten(left_columns), &flatten(right_columns), scoring, gap_penalty);
        trace!("Node {node_id} left:  {}", String::from_utf8_lossy(pairwise.aligned_a()));
        trace!("Node {node_id} right: {}", String::from_utf8_lossy(pairwise.aligned_b()));

        let ops = pairwise.ops();
        let aligned_left = apply_ops(ops, left_columns, true, AmbiguitySet::gap());
        let aligned_right = apply_ops(ops, right_columns, false, AmbiguitySet::gap());
        let consensus: Vec<AmbiguitySet> = aligned_left.iter()
            .zip(aligned_right.iter())
            .map(|(a, b)| a.union(b))
            .collect();

        // build every update before touching the arena, so a failure leaves it unchanged
        let mut updates: Vec<(usize, Vec<AmbiguitySet>)> = Vec::with_capacity(self.history.len() + 3);
        for &h in self.history.iter() {
            let cluster = self.cluster_of[h - 1];
            if cluster == l {
                updates.push((h, apply_ops(ops, self.columns(h)?, true, AmbiguitySet::gap())));
            } else if cluster == r {
                updates.push((h, apply_ops(ops, self.columns(h)?, false, AmbiguitySet::gap())));
            }
        }
        let width = consensus.len();
        updates.push((l, aligned_left));
        updates.push((r, aligned_right));
        updates.push((node_id, consensus));

        for (h, columns) in updates.into_iter() {
            self.columns[h - 1] = Some(columns);
        }
        for operand in [l, r] {
            if !self.history.contains(&operand) {
                self.history.push(operand);
            }
        }
        for cluster in self.cluster_of.iter_mut() {
            if *cluster == l || *cluster == r {
                *cluster = node_id;
            }
        }

        debug_assert!(
            self.history.iter()
                .filter(|&&h| self.cluster_of[h - 1] == node_id)
                .all(|&h| self.columns(h).map(|c| c.len() == width).unwrap_or(false)),
            "column widths diverged after merging node {node_id}"
        );

        Ok(MergeRecord {
            node_id,
            left,
            right,
            score: pairwise.score(),
            width
        })
    }

    /// Every terminal has to end up under `root`
    fn check_fully_merged(&self, root: usize) -> Result<(), Box<dyn std::error::Error>> {
        let unmerged = (1..=self.num_terminals)
            .filter(|&t| self.cluster_of[t - 1] != root)
            .count();
        if unmerged > 0 {
            return Err(MsaError::structural(format!("Guide tree leaves {unmerged} terminals outside of root node {root}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::example_gen::{generate_family, AMINO_ACIDS};
    use crate::msa_config::{MsaConfigBuilder, ScoringScheme};

    fn simple_config() -> MsaConfig {
        MsaConfigBuilder::default()
            .scoring(ScoringScheme::Simple { match_score: 1, mismatch_score: -1 })
            .gap_penalty(-1)
            .build()
            .unwrap()
    }

    fn structural(err: Box<dyn std::error::Error>) -> bool {
        matches!(err.downcast_ref::<MsaError>(), Some(MsaError::StructuralError(_)))
    }

    /// Checks the id set, equal widths, and that dropping gaps gives back each input
    fn check_alignment(msa: &ProgressiveMsa, alignment: &MultipleAlignment) {
        assert_eq!(alignment.ids().len(), msa.ids().len());
        for (&id, &seq) in msa.ids().iter().zip(msa.sequences().iter()) {
            let aligned = alignment.get(id).unwrap();
            assert_eq!(aligned.len(), alignment.width());
            let ungapped: Vec<u8> = aligned.iter().copied().filter(|&c| c != GAP_SYMBOL).collect();
            assert_eq!(ungapped, seq);
        }
        for w in alignment.merges().windows(2) {
            assert!(w[0].width <= w[1].width);
        }
    }

    #[test_log::test]
    fn test_identical_pair() {
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("s1", b"MNSK").unwrap();
        msa.add_sequence("s2", b"MNSK").unwrap();
        let alignment = msa.align().unwrap();
        assert_eq!(alignment.get("s1"), Some(&b"MNSK"[..]));
        assert_eq!(alignment.get("s2"), Some(&b"MNSK"[..]));
        assert_eq!(alignment.merges().len(), 1);
        assert_eq!(alignment.merges()[0].score, 4);
        assert!(alignment.consensus().iter().all(|c| c.is_singleton()));

        // same thing with BLOSUM62: M + N + S + K
        let mut msa = ProgressiveMsa::default();
        msa.add_sequence("s1", b"MNSK").unwrap();
        msa.add_sequence("s2", b"MNSK").unwrap();
        let alignment = msa.align().unwrap();
        assert_eq!(alignment.merges()[0].score, 20);
        assert_eq!(alignment.width(), 4);
    }

    #[test_log::test]
    fn test_single_sequence() {
        let mut msa = ProgressiveMsa::default();
        msa.add_sequence("only", b"MNSKAVLIGE").unwrap();
        let alignment = msa.align().unwrap();
        assert_eq!(alignment.get("only"), Some(&b"MNSKAVLIGE"[..]));
        assert!(alignment.merges().is_empty());
        assert_eq!(alignment.guide_tree().num_internal_nodes(), 0);
        assert_eq!(alignment.consensus(), AmbiguitySet::from_sequence(b"MNSKAVLIGE").as_slice());
    }

    #[test]
    fn test_no_sequences() {
        let msa = ProgressiveMsa::default();
        let alignment = msa.align().unwrap();
        assert!(alignment.is_empty());
        assert_eq!(alignment.width(), 0);
    }

    #[test]
    fn test_empty_sequences() {
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("e1", b"").unwrap();
        msa.add_sequence("e2", b"").unwrap();
        msa.add_sequence("s3", b"ACG").unwrap();
        let alignment = msa.align().unwrap();
        check_alignment(&msa, &alignment);
        assert_eq!(alignment.get("e1"), Some(&b"---"[..]));
        assert_eq!(alignment.get("s3"), Some(&b"ACG"[..]));
    }

    #[test_log::test]
    fn test_gap_propagation() {
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("s1", b"AGT").unwrap();
        msa.add_sequence("s2", b"AGT").unwrap();
        msa.add_sequence("s3", b"ACGT").unwrap();
        let alignment = msa.align().unwrap();
        check_alignment(&msa, &alignment);

        assert_eq!(alignment.get("s1"), Some(&b"A-GT"[..]));
        assert_eq!(alignment.get("s2"), Some(&b"A-GT"[..]));
        assert_eq!(alignment.get("s3"), Some(&b"ACGT"[..]));

        let consensus: Vec<Vec<u8>> = alignment.consensus().iter().map(|c| c.residues()).collect();
        assert_eq!(consensus, vec![b"A".to_vec(), b"-C".to_vec(), b"G".to_vec(), b"T".to_vec()]);
        assert_eq!(alignment.merges().iter().map(|m| m.score).collect::<Vec<i32>>(), vec![3, 2]);
    }

    #[test_log::test]
    fn test_multi_residue_flattening() {
        // the {-, C} column flattens to C when s4 gets aligned against the consensus
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("s1", b"AGT").unwrap();
        msa.add_sequence("s2", b"AGT").unwrap();
        msa.add_sequence("s3", b"ACGT").unwrap();
        msa.add_sequence("s4", b"TTACGT").unwrap();
        let alignment = msa.align().unwrap();
        check_alignment(&msa, &alignment);

        assert_eq!(alignment.get("s1"), Some(&b"--A-GT"[..]));
        assert_eq!(alignment.get("s2"), Some(&b"--A-GT"[..]));
        assert_eq!(alignment.get("s3"), Some(&b"--ACGT"[..]));
        assert_eq!(alignment.get("s4"), Some(&b"TTACGT"[..]));
        assert_eq!(alignment.merges().iter().map(|m| m.score).collect::<Vec<i32>>(), vec![3, 2, 2]);
        assert_eq!(alignment.merges().iter().map(|m| m.width).collect::<Vec<usize>>(), vec![3, 4, 6]);

        let consensus: Vec<Vec<u8>> = alignment.consensus().iter().map(|c| c.residues()).collect();
        assert_eq!(consensus, vec![b"-T".to_vec(), b"-T".to_vec(), b"A".to_vec(), b"-C".to_vec(), b"G".to_vec(), b"T".to_vec()]);
    }

    #[test]
    fn test_similar_pair_first() {
        let mut msa = ProgressiveMsa::default();
        msa.add_sequence("s3", b"WWHHCCPPYYWWHH").unwrap();
        msa.add_sequence("s1", b"MNSKAVLIGEKRDT").unwrap();
        msa.add_sequence("s2", b"MNSKAVLIGEKRDS").unwrap();
        let tree = msa.guide_tree().unwrap();
        assert_eq!(tree.terminal_labels(), &["s1", "s2", "s3"]);

        let alignment = msa.align().unwrap();
        check_alignment(&msa, &alignment);
        // output keeps input order no matter the merge order
        assert_eq!(alignment.ids(), &["s3", "s1", "s2"]);
    }

    #[test]
    fn test_balanced_tree() {
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("s1", b"AGT").unwrap();
        msa.add_sequence("s2", b"AGT").unwrap();
        msa.add_sequence("s3", b"ACGTT").unwrap();
        msa.add_sequence("s4", b"ACGTT").unwrap();

        // (s1, s2) and (s3, s4) are independent clusters joined at the root
        let tree = GuideTree::from_parts(
            vec!["s1".to_string(), "s2".to_string(), "s3".to_string(), "s4".to_string()],
            vec![
                (Operand::Terminal(1), Operand::Terminal(2)),
                (Operand::Terminal(3), Operand::Terminal(4)),
                (Operand::Internal(5), Operand::Internal(6)),
            ]
        );
        let alignment = msa.align_with_tree(&tree).unwrap();
        check_alignment(&msa, &alignment);
        assert_eq!(alignment.width(), 5);
        assert_eq!(alignment.get("s1"), Some(&b"A-G-T"[..]));
        assert_eq!(alignment.get("s2"), Some(&b"A-G-T"[..]));
        assert_eq!(alignment.get("s3"), Some(&b"ACGTT"[..]));
        assert_eq!(alignment.get("s4"), Some(&b"ACGTT"[..]));
    }

    #[test]
    fn test_invalid_config() {
        let config = MsaConfigBuilder::default().kmer_length(0).build().unwrap();
        let err = ProgressiveMsa::with_config(config).unwrap_err();
        assert!(matches!(err.downcast_ref::<MsaError>(), Some(MsaError::InvalidParameter(_))));

        let config = MsaConfigBuilder::default().gap_penalty(3).build().unwrap();
        let err = ProgressiveMsa::with_config(config).unwrap_err();
        assert!(matches!(err.downcast_ref::<MsaError>(), Some(MsaError::InvalidParameter(_))));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut msa = ProgressiveMsa::default();
        msa.add_sequence("s1", b"MNSK").unwrap();
        assert!(structural(msa.add_sequence("s1", b"MNSK").unwrap_err()));

        let err = msa.add_sequence("s2", b"MN-K").unwrap_err();
        assert!(matches!(err.downcast_ref::<MsaError>(), Some(MsaError::InvalidParameter(_))));
        assert_eq!(msa.ids(), &["s1"]);
    }

    #[test]
    fn test_malformed_trees() {
        let mut msa = ProgressiveMsa::with_config(simple_config()).unwrap();
        msa.add_sequence("s1", b"AGT").unwrap();
        msa.add_sequence("s2", b"AGT").unwrap();
        msa.add_sequence("s3", b"ACGT").unwrap();
        let labels = || vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];

        // wrong terminal count
        let tree = GuideTree::from_parts(vec!["s1".to_string()], vec![]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // unknown label
        let tree = GuideTree::from_parts(vec!["s1".to_string(), "s2".to_string(), "s9".to_string()], vec![]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // repeated label
        let tree = GuideTree::from_parts(vec!["s1".to_string(), "s1".to_string(), "s2".to_string()], vec![]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // dangling terminal
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Terminal(1), Operand::Terminal(7)),
            (Operand::Internal(4), Operand::Terminal(3)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // forward reference to a node that is not processed yet
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Internal(5), Operand::Terminal(1)),
            (Operand::Terminal(2), Operand::Terminal(3)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // terminal id disguised as an internal node
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Internal(1), Operand::Terminal(2)),
            (Operand::Internal(4), Operand::Terminal(3)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // operand used twice
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Terminal(1), Operand::Terminal(2)),
            (Operand::Terminal(1), Operand::Terminal(3)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // self merge
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Terminal(1), Operand::Terminal(1)),
            (Operand::Internal(4), Operand::Terminal(3)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // s3 never gets merged
        let tree = GuideTree::from_parts(labels(), vec![
            (Operand::Terminal(1), Operand::Terminal(2)),
        ]);
        assert!(structural(msa.align_with_tree(&tree).unwrap_err()));

        // internal node over terminals that do not exist
        let empty_msa = ProgressiveMsa::default();
        let tree = GuideTree::from_parts(vec![], vec![
            (Operand::Terminal(1), Operand::Terminal(2)),
        ]);
        assert!(structural(empty_msa.align_with_tree(&tree).unwrap_err()));
    }

    #[test_log::test]
    fn test_generated_family() {
        let (_ancestor, family) = generate_family(AMINO_ACIDS, 120, 12, 0.05);
        let mut msa = ProgressiveMsa::default();
        for (id, seq) in family.iter() {
            msa.add_sequence(id, seq).unwrap();
        }
        let alignment = msa.align().unwrap();
        check_alignment(&msa, &alignment);
        assert_eq!(alignment.merges().len(), family.len() - 1);
        assert_eq!(alignment.merges().last().unwrap().width, alignment.width());

        // no column can end up as gaps only
        for column in alignment.consensus().iter() {
            assert!(!column.is_gap());
        }
    }
}
