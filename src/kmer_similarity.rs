/*!
Cheap pairwise similarity estimates from k-mer overlap, and the greedy "most similar first" ordering that feeds the guide tree.

# Example usage
```rust
use progressive_msa::kmer_similarity::{extract_kmers, jaccard_similarity, order_by_kmer_similarity};

let kmer_map = vec![
    ("far", extract_kmers(b"WWWWCCCC", 3).unwrap()),
    ("s1", extract_kmers(b"MNSKLLVA", 3).unwrap()),
    ("s2", extract_kmers(b"MNSKLLVG", 3).unwrap()),
];
assert_eq!(jaccard_similarity(&kmer_map[1].1, &kmer_map[1].1), 1.0);

let order = order_by_kmer_similarity(&kmer_map);
assert_eq!(order, vec!["s1", "s2", "far"]);
```
*/

use itertools::Itertools;
use log::{debug, trace};
use priority_queue::PriorityQueue;
use rustc_hash::FxHashSet as HashSet;
use std::cmp::{Ordering, Reverse};
use std::hash::Hash;

use crate::errors::MsaError;

/// Wrapper that gives Jaccard values a total order so they can be used as priorities
#[derive(Clone, Copy, Debug, PartialEq)]
struct Similarity(f64);

impl Eq for Similarity {}

impl PartialOrd for Similarity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Similarity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Candidates with equal similarity prefer the lowest input index
type CandidatePriority = (Similarity, Reverse<usize>);

/// Returns every overlapping window of length `k`, stepping by one.
/// Sequences shorter than `k` produce an empty list.
/// # Arguments
/// * `sequence` - the residues to split
/// * `k` - the window length
/// # Errors
/// * `MsaError::InvalidParameter` if `k` is 0
pub fn extract_kmers(sequence: &[u8], k: usize) -> Result<Vec<&[u8]>, Box<dyn std::error::Error>> {
    if k == 0 {
        return Err(MsaError::invalid_parameter("k-mer length must be positive"));
    }
    // windows() already drops the trailing partial window
    Ok(sequence.windows(k).collect())
}

/// Jaccard similarity of two k-mer collections, compared as sets.
/// Two empty collections have a similarity of 0.0.
/// # Arguments
/// * `a` - the first collection
/// * `b` - the second collection
pub fn jaccard_similarity<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let set_a: HashSet<&T> = a.iter().collect();
    let set_b: HashSet<&T> = b.iter().collect();
    jaccard_sets(&set_a, &set_b)
}

/// Same as `jaccard_similarity`, but on already de-duplicated sets
fn jaccard_sets<T: Eq + Hash>(set_a: &HashSet<T>, set_b: &HashSet<T>) -> f64 {
    if set_a.is_empty() && set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    intersection as f64 / union as f64
}

/// Orders sequence ids so that the most similar sequences are joined first.
/// The most similar pair (first enumerated pair on ties) starts the order, then the remaining id with the highest similarity to anything already placed is appended until none remain.
/// Remaining-id ties go to the id that appears first in `kmer_map`.
/// # Arguments
/// * `kmer_map` - pairs of (sequence id, k-mers of that sequence) in input order
pub fn order_by_kmer_similarity<'a, K: AsRef<[u8]>>(kmer_map: &[(&'a str, Vec<K>)]) -> Vec<&'a str> {
    let n = kmer_map.len();
    if n <= 1 {
        return kmer_map.iter().map(|(id, _)| *id).collect();
    }

    let kmer_sets: Vec<HashSet<&[u8]>> = kmer_map.iter()
        .map(|(_, kmers)| kmers.iter().map(|k| k.as_ref()).collect())
        .collect();

    // full similarity matrix, it is symmetric so only fill the upper half and mirror
    let mut similarity = vec![vec![0.0; n]; n];
    for (i, j) in (0..n).tuple_combinations() {
        let s = jaccard_sets(&kmer_sets[i], &kmer_sets[j]);
        similarity[i][j] = s;
        similarity[j][i] = s;
    }

    // seed with the best pair, strictly greater so the first enumerated pair wins ties
    let mut best_pair = (0, 1);
    for (i, j) in (0..n).tuple_combinations() {
        if similarity[i][j] > similarity[best_pair.0][best_pair.1] {
            best_pair = (i, j);
        }
    }
    debug!("Seed pair: {} + {} (similarity {:.4})", kmer_map[best_pair.0].0, kmer_map[best_pair.1].0, similarity[best_pair.0][best_pair.1]);

    let mut ordered: Vec<usize> = vec![best_pair.0, best_pair.1];
    let mut pqueue: PriorityQueue<usize, CandidatePriority> = PriorityQueue::with_capacity(n - 2);
    for c in (0..n).filter(|&c| c != best_pair.0 && c != best_pair.1) {
        let s = similarity[c][best_pair.0].max(similarity[c][best_pair.1]);
        pqueue.push(c, (Similarity(s), Reverse(c)));
    }

    // each placement can only raise a candidate's best similarity to the placed set
    while let Some((next, (Similarity(s), _))) = pqueue.pop() {
        trace!("Placing {} (similarity {:.4})", kmer_map[next].0, s);
        ordered.push(next);
        for candidate in 0..n {
            if pqueue.get(&candidate).is_some() {
                let s = similarity[next][candidate];
                pqueue.push_increase(candidate, (Similarity(s), Reverse(candidate)));
            }
        }
    }

    ordered.into_iter()
        .map(|i| kmer_map[i].0)
        .collect()
}
