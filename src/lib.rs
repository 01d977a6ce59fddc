/*!
# progressive_msa
This library provides a progressive multiple sequence aligner driven by k-mer similarity.

Key steps:
* Every sequence is split into overlapping k-mers and pairwise similarity is estimated with the Jaccard index
* Sequences are ordered "most similar first" and encoded as a right-branching guide tree
* The tree is walked bottom-up, aligning two operands at a time with Needleman-Wunsch and a substitution table (BLOSUM62 by default)
* Gaps opened by each merge are replayed onto every sequence already in the alignment, and each internal node keeps the per-column set of residues it has seen

Performance notes:
* Each merge is a full O(n*m) dynamic programming alignment, so run time grows with sequence length squared
* The guide tree is a chain, so merges are strictly sequential

# Example usage
```rust
use progressive_msa::progressive::ProgressiveMsa;

let sequences = [
    ("s1", b"MNSKAVLIGE".to_vec()),
    ("s2", b"MNSKAVLIGE".to_vec()),
    ("s3", b"MNSKLIGE".to_vec())
];

// add all the sequences
let mut msa: ProgressiveMsa = Default::default();
for (id, s) in sequences.iter() {
    msa.add_sequence(id, s).unwrap();
}

// run the alignment and check the results
let alignment = msa.align().unwrap();
assert_eq!(alignment.width(), 10);
assert_eq!(alignment.get("s1"), Some(&b"MNSKAVLIGE"[..]));
assert_eq!(alignment.get("s3"), Some(&b"MNSK--LIGE"[..]));
```
*/

/// Set-valued alignment columns
pub mod ambiguity;
/// Error taxonomy for alignment runs
pub mod errors;
/// Utility for generating examples
pub mod example_gen;
/// Guide tree structure and the right-branching builder
pub mod guide_tree;
/// K-mer extraction, Jaccard similarity, and greedy similarity ordering
pub mod kmer_similarity;
/// Configuration for ProgressiveMsa
pub mod msa_config;
/// Final multiple alignment result
pub mod multiple_alignment;
/// Global pairwise alignment (Needleman-Wunsch)
pub mod pairwise_alignment;
/// Main functionality for the progressive alignment executor
pub mod progressive;
/// Substitution scoring tables
pub mod scoring;
