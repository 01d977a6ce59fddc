/*!
Substitution scoring for residue pairs.
A `ScoringTable` is built once per alignment run and is read-only afterwards.
Scores are symmetric, a configured wildcard (usually `X`) always scores a fixed penalty, and any pair that a curated table does not list scores the "uncommon pair" penalty.

# Example usage
```rust
use progressive_msa::scoring::ScoringTable;

let blosum = ScoringTable::blosum62();
assert_eq!(blosum.score(b'W', b'W'), 11);
assert_eq!(blosum.score(b'A', b'R'), blosum.score(b'R', b'A'));
assert_eq!(blosum.score(b'X', b'W'), -1);
assert_eq!(blosum.score(b'A', b'*'), -4);
```
*/

use simple_error::bail;

use crate::msa_config::{MsaConfig, ScoringScheme};

/// Number of symbols in the lookup, we only handle ASCII residues
const LOOKUP_WIDTH: usize = 128;

/// Row/column order of the BLOSUM62 values below
const BLOSUM62_ALPHABET: &[u8; 20] = b"ARNDCQEGHILKMFPSTWYV";

#[rustfmt::skip]
const BLOSUM62: [[i32; 20]; 20] = [
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3], // R
    [-2,  0,  6,  1, -3,  0, -1,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2], // Q
    [-1,  0, -1,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4], // V
];

/// How the base score of a pair is determined
#[derive(Clone, Debug, PartialEq)]
enum PairScores {
    /// Dense ASCII lookup, `None` means the pair is not listed
    Matrix(Vec<Option<i32>>),
    /// Identity check only
    Simple {
        match_score: i32,
        mismatch_score: i32
    }
}

/// Symmetric substitution scores for residue pairs
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringTable {
    /// The underlying pair scores
    pairs: PairScores,
    /// Optional residue that always scores `wildcard_penalty`
    wildcard: Option<u8>,
    /// Score of anything paired with the wildcard
    wildcard_penalty: i32,
    /// Score of pairs that a matrix does not list
    uncommon_pair_penalty: i32
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::blosum62()
    }
}

impl ScoringTable {
    /// Creates the BLOSUM62 table with `X` as a -1 wildcard and -4 for unlisted pairs.
    pub fn blosum62() -> ScoringTable {
        let mut lookup = vec![None; LOOKUP_WIDTH * LOOKUP_WIDTH];
        for (i, &a) in BLOSUM62_ALPHABET.iter().enumerate() {
            for (j, &b) in BLOSUM62_ALPHABET.iter().enumerate() {
                lookup[lookup_index(a, b)] = Some(BLOSUM62[i][j]);
            }
        }
        ScoringTable {
            pairs: PairScores::Matrix(lookup),
            wildcard: Some(b'X'),
            wildcard_penalty: -1,
            uncommon_pair_penalty: -4
        }
    }

    /// Creates a flat match/mismatch table without a wildcard.
    /// # Arguments
    /// * `match_score` - score of two identical residues
    /// * `mismatch_score` - score of two different residues
    pub fn simple(match_score: i32, mismatch_score: i32) -> ScoringTable {
        ScoringTable {
            pairs: PairScores::Simple { match_score, mismatch_score },
            wildcard: None,
            wildcard_penalty: 0,
            uncommon_pair_penalty: mismatch_score
        }
    }

    /// Parses a substitution matrix in the NCBI text layout, e.g. the BLOSUM/PAM files.
    /// Lines starting with `#` are comments, the first remaining line lists the column residues, and each following line is a residue followed by one score per column.
    /// # Arguments
    /// * `text` - the matrix text
    /// # Errors
    /// * if the header is missing, a row is malformed or repeated, a row label is not a column, a score is not an integer, or the matrix is not symmetric
    pub fn from_matrix_text(text: &str) -> Result<ScoringTable, Box<dyn std::error::Error>> {
        let mut lines = text.lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let header: Vec<u8> = match lines.next() {
            Some(h) => parse_residues(h.split_whitespace())?,
            None => bail!("Substitution matrix text has no header line")
        };

        let mut lookup = vec![None; LOOKUP_WIDTH * LOOKUP_WIDTH];
        let mut seen_rows: Vec<u8> = Vec::with_capacity(header.len());
        for line in lines {
            let mut tokens = line.split_whitespace();
            let row_residue = parse_residues(tokens.next())?[0];
            if !header.contains(&row_residue) {
                bail!("Matrix row {} has no matching column", row_residue as char);
            }
            if seen_rows.contains(&row_residue) {
                bail!("Matrix row {} is listed more than once", row_residue as char);
            }
            seen_rows.push(row_residue);
            let scores = tokens
                .map(|t| t.parse::<i32>())
                .collect::<Result<Vec<i32>, _>>()?;
            if scores.len() != header.len() {
                bail!("Matrix row {} has {} scores, expected {}", row_residue as char, scores.len(), header.len());
            }
            for (&col_residue, &s) in header.iter().zip(scores.iter()) {
                lookup[lookup_index(row_residue, col_residue)] = Some(s);
            }
        }

        for &a in header.iter() {
            for &b in header.iter() {
                if lookup[lookup_index(a, b)] != lookup[lookup_index(b, a)] {
                    bail!("Substitution matrix is not symmetric for pair ({}, {})", a as char, b as char);
                }
            }
        }

        Ok(ScoringTable {
            pairs: PairScores::Matrix(lookup),
            wildcard: None,
            wildcard_penalty: 0,
            uncommon_pair_penalty: -4
        })
    }

    /// Builds the table described by a config, applying the configured wildcard and uncommon pair penalty.
    /// # Arguments
    /// * `config` - the run configuration
    pub fn from_config(config: &MsaConfig) -> ScoringTable {
        let base = match &config.scoring {
            ScoringScheme::Blosum62 => ScoringTable::blosum62(),
            ScoringScheme::Simple { match_score, mismatch_score } => ScoringTable::simple(*match_score, *mismatch_score),
            ScoringScheme::Custom(table) => table.clone()
        };
        let base = base.with_wildcard(config.wildcard, config.wildcard_penalty);
        match base.pairs {
            // a flat table has no notion of unlisted pairs
            PairScores::Simple { .. } => base,
            PairScores::Matrix(_) => base.with_uncommon_pair_penalty(config.uncommon_pair_penalty)
        }
    }

    /// Replaces the wildcard residue and its penalty
    pub fn with_wildcard(mut self, wildcard: Option<u8>, penalty: i32) -> ScoringTable {
        self.wildcard = wildcard;
        self.wildcard_penalty = penalty;
        self
    }

    /// Replaces the score for pairs the matrix does not list
    pub fn with_uncommon_pair_penalty(mut self, penalty: i32) -> ScoringTable {
        self.uncommon_pair_penalty = penalty;
        self
    }

    /// Returns the substitution score of a residue pair, symmetric in `a` and `b`.
    /// # Arguments
    /// * `a` - the first residue
    /// * `b` - the second residue
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        if self.wildcard.map_or(false, |w| a == w || b == w) {
            return self.wildcard_penalty;
        }
        match &self.pairs {
            PairScores::Simple { match_score, mismatch_score } => {
                if a == b { *match_score } else { *mismatch_score }
            },
            PairScores::Matrix(lookup) => {
                if (a as usize) < LOOKUP_WIDTH && (b as usize) < LOOKUP_WIDTH {
                    lookup[lookup_index(a, b)].unwrap_or(self.uncommon_pair_penalty)
                } else {
                    self.uncommon_pair_penalty
                }
            }
        }
    }

    // Getters
    pub fn wildcard(&self) -> Option<u8> {
        self.wildcard
    }

    pub fn wildcard_penalty(&self) -> i32 {
        self.wildcard_penalty
    }

    pub fn uncommon_pair_penalty(&self) -> i32 {
        self.uncommon_pair_penalty
    }
}

#[inline]
fn lookup_index(a: u8, b: u8) -> usize {
    (a as usize) * LOOKUP_WIDTH + (b as usize)
}

/// Matrix labels must be single ASCII characters
fn parse_residues<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut residues = vec![];
    for t in tokens {
        let bytes = t.as_bytes();
        if bytes.len() != 1 || !bytes[0].is_ascii() {
            bail!("Invalid residue label in substitution matrix: {:?}", t);
        }
        residues.push(bytes[0]);
    }
    if residues.is_empty() {
        bail!("Substitution matrix line has no residue labels");
    }
    Ok(residues)
}
