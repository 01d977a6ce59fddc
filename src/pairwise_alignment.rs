use log::trace;

use crate::ambiguity::GAP_SYMBOL;
use crate::scoring::ScoringTable;

/// One column of a pairwise alignment path
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AlignmentOp {
    /// Both sequences consume a residue (match or substitution)
    Diagonal,
    /// Only `seq_b` consumes a residue, so `seq_a` gets a gap; this is a left move in the matrix
    GapInA,
    /// Only `seq_a` consumes a residue, so `seq_b` gets a gap; this is an up move in the matrix
    GapInB
}

impl AlignmentOp {
    /// Returns true if the first sequence consumes a residue in this column
    pub fn consumes_a(&self) -> bool {
        matches!(self, AlignmentOp::Diagonal | AlignmentOp::GapInB)
    }

    /// Returns true if the second sequence consumes a residue in this column
    pub fn consumes_b(&self) -> bool {
        matches!(self, AlignmentOp::Diagonal | AlignmentOp::GapInA)
    }
}

/// Result of a global pairwise alignment
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairwiseAlignment {
    /// First sequence with gaps inserted
    aligned_a: Vec<u8>,
    /// Second sequence with gaps inserted
    aligned_b: Vec<u8>,
    /// The traceback path from the start of both sequences to the end
    ops: Vec<AlignmentOp>,
    /// The optimal global alignment score
    score: i32
}

impl PairwiseAlignment {
    // Getters
    pub fn aligned_a(&self) -> &[u8] {
        &self.aligned_a
    }

    pub fn aligned_b(&self) -> &[u8] {
        &self.aligned_b
    }

    pub fn ops(&self) -> &[AlignmentOp] {
        &self.ops
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Global alignment of two residue sequences with a linear gap penalty (Needleman-Wunsch).
/// When several paths reach the optimum, the traceback prefers the diagonal, then the left move (gap in `seq_a`), then the up move (gap in `seq_b`).
/// Empty inputs are legal and align entirely against gaps.
/// # Arguments
/// * `seq_a` - the first sequence, rows of the DP matrix
/// * `seq_b` - the second sequence, columns of the DP matrix
/// * `scoring` - substitution scores
/// * `gap_penalty` - the score added for each gap column, typically negative
/// # Examples
/// ```rust
/// use progressive_msa::pairwise_alignment::needleman_wunsch;
/// use progressive_msa::scoring::ScoringTable;
/// let scoring = ScoringTable::simple(1, -1);
/// let alignment = needleman_wunsch(b"GATTACA", b"GCATGCU", &scoring, -1);
/// assert_eq!(alignment.score(), 0);
/// assert_eq!(alignment.aligned_a(), b"G-ATTACA");
/// assert_eq!(alignment.aligned_b(), b"GCA-TGCU");
/// ```
pub fn needleman_wunsch(seq_a: &[u8], seq_b: &[u8], scoring: &ScoringTable, gap_penalty: i32) -> PairwiseAlignment {
    let m = seq_a.len();
    let n = seq_b.len();
    let width = n + 1;
    trace!("Needleman-Wunsch on {}x{} matrix", m + 1, n + 1);

    // flat row-major score and direction grids, row i is seq_a[..i]
    let mut scores: Vec<i32> = vec![0; (m + 1) * width];
    let mut directions: Vec<AlignmentOp> = vec![AlignmentOp::Diagonal; (m + 1) * width];
    for i in 1..=m {
        scores[i * width] = i as i32 * gap_penalty;
        directions[i * width] = AlignmentOp::GapInB;
    }
    for j in 1..=n {
        scores[j] = j as i32 * gap_penalty;
        directions[j] = AlignmentOp::GapInA;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag = scores[(i - 1) * width + j - 1] + scoring.score(seq_a[i - 1], seq_b[j - 1]);
            let up = scores[(i - 1) * width + j] + gap_penalty;
            let left = scores[i * width + j - 1] + gap_penalty;

            // order of these checks is the tie-break policy
            let (best, op) = if diag >= up && diag >= left {
                (diag, AlignmentOp::Diagonal)
            } else if left >= up {
                (left, AlignmentOp::GapInA)
            } else {
                (up, AlignmentOp::GapInB)
            };
            scores[i * width + j] = best;
            directions[i * width + j] = op;
        }
    }

    // walk back from the bottom-right corner; row 0 and column 0 were seeded with forced moves
    let mut ops: Vec<AlignmentOp> = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let op = directions[i * width + j];
        match op {
            AlignmentOp::Diagonal => {
                i -= 1;
                j -= 1;
            },
            AlignmentOp::GapInA => j -= 1,
            AlignmentOp::GapInB => i -= 1
        };
        ops.push(op);
    }
    ops.reverse();

    let aligned_a = apply_ops(&ops, seq_a, true, GAP_SYMBOL);
    let aligned_b = apply_ops(&ops, seq_b, false, GAP_SYMBOL);
    PairwiseAlignment {
        aligned_a,
        aligned_b,
        ops,
        score: scores[m * width + n]
    }
}

/// Expands one side of an alignment path over any per-column values, filling the other side's consumed columns with `gap`.
/// This is what lets gaps from a pairwise alignment be replayed onto every sequence that shares a column layout with one of the operands.
/// # Arguments
/// * `ops` - the alignment path
/// * `values` - the column values of the side being expanded, must have one value per consuming column
/// * `is_a` - if true, expand the `seq_a` side, otherwise the `seq_b` side
/// * `gap` - the value placed in non-consuming columns
pub fn apply_ops<T: Clone>(ops: &[AlignmentOp], values: &[T], is_a: bool, gap: T) -> Vec<T> {
    let mut iter = values.iter();
    let expanded: Vec<T> = ops.iter()
        .map(|op| {
            let consumes = if is_a { op.consumes_a() } else { op.consumes_b() };
            if consumes {
                // the path consumes exactly values.len() entries, so this never runs dry for a matching path
                iter.next().cloned().unwrap_or_else(|| gap.clone())
            } else {
                gap.clone()
            }
        })
        .collect();
    debug_assert!(iter.next().is_none(), "alignment path did not consume every value");
    expanded
}
