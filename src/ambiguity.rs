/*!
Set-valued alignment columns.
A leaf sequence is a run of singleton sets, while an internal guide-tree node holds the union of whatever its two aligned operands had at each column.
*/

use itertools::Itertools;
use rustc_hash::FxHashSet as HashSet;
use simple_error::bail;

/// The symbol used for alignment gaps
pub const GAP_SYMBOL: u8 = b'-';

/// A non-empty set of residues observed at one alignment column
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmbiguitySet {
    residues: HashSet<u8>
}

impl AmbiguitySet {
    /// Creates a set from a collection of residues.
    /// # Arguments
    /// * `residues` - the residues in the column, duplicates are ignored
    /// # Errors
    /// * if no residues are provided
    pub fn new(residues: impl IntoIterator<Item = u8>) -> Result<AmbiguitySet, Box<dyn std::error::Error>> {
        let residues: HashSet<u8> = residues.into_iter().collect();
        if residues.is_empty() {
            bail!("An ambiguity set requires at least one residue");
        }
        Ok(AmbiguitySet { residues })
    }

    /// Creates a set with exactly one residue
    pub fn singleton(residue: u8) -> AmbiguitySet {
        let mut residues: HashSet<u8> = Default::default();
        residues.insert(residue);
        AmbiguitySet { residues }
    }

    /// Creates a gap-only column
    pub fn gap() -> AmbiguitySet {
        Self::singleton(GAP_SYMBOL)
    }

    /// Wraps a plain residue sequence as singleton columns
    pub fn from_sequence(sequence: &[u8]) -> Vec<AmbiguitySet> {
        sequence.iter().map(|&r| Self::singleton(r)).collect()
    }

    /// Returns a new set containing every residue from both sets
    pub fn union(&self, other: &AmbiguitySet) -> AmbiguitySet {
        AmbiguitySet {
            residues: self.residues.union(&other.residues).cloned().collect()
        }
    }

    /// Picks the residue that stands for this column when it has to be aligned as a scalar.
    /// This is the smallest non-gap residue by byte value, or the gap if nothing else is present.
    pub fn representative(&self) -> u8 {
        self.residues.iter()
            .filter(|&&r| r != GAP_SYMBOL)
            .min()
            .copied()
            .unwrap_or(GAP_SYMBOL)
    }

    pub fn contains(&self, residue: u8) -> bool {
        self.residues.contains(&residue)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Always false, sets are never empty; present to pair with `len`
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.residues.len() == 1
    }

    pub fn is_gap(&self) -> bool {
        self.is_singleton() && self.contains(GAP_SYMBOL)
    }

    /// The residues in ascending byte order
    pub fn residues(&self) -> Vec<u8> {
        self.residues.iter().copied().sorted().collect()
    }
}

/// Reduces a column sequence to one representative residue per column
pub fn flatten(columns: &[AmbiguitySet]) -> Vec<u8> {
    columns.iter().map(|c| c.representative()).collect()
}
