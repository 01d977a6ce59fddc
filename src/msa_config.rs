/*!
Contains configuration information for the progressive multiple sequence aligner.
Typical usage is to the use the builder to construct the config, e.g.
```
use progressive_msa::msa_config::{MsaConfig, MsaConfigBuilder, ScoringScheme};
let config: MsaConfig = MsaConfigBuilder::default()
    .kmer_length(4)
    .scoring(ScoringScheme::Simple { match_score: 1, mismatch_score: -1 })
    .gap_penalty(-1)
    .build()
    .unwrap();
```
*/

use crate::scoring::ScoringTable;

/// Enumeration of the substitution scoring options.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ScoringScheme {
    /// The curated BLOSUM62 amino acid table
    #[default]
    Blosum62,
    /// Flat match/mismatch scores, mostly useful for nucleotides
    Simple {
        match_score: i32,
        mismatch_score: i32
    },
    /// A caller-provided substitution table
    Custom(ScoringTable)
}

/**
Contains configuration information for the progressive multiple sequence aligner.
Typical usage is to the use the builder to construct the config, e.g.
```
use progressive_msa::msa_config::{MsaConfig, MsaConfigBuilder};
let config: MsaConfig = MsaConfigBuilder::default()
    .gap_penalty(-4)
    .wildcard(None)
    .build()
    .unwrap();
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct MsaConfig {
    /// The k-mer length used to estimate pairwise similarity, must be > 0
    pub kmer_length: usize,
    /// The substitution scores used for pairwise alignment
    pub scoring: ScoringScheme,
    /// Linear gap penalty applied to every gap column, must be <= 0
    pub gap_penalty: i32,
    /// Enables an optional wildcard residue that scores a fixed penalty against anything
    pub wildcard: Option<u8>,
    /// The score of any pair involving the wildcard
    pub wildcard_penalty: i32,
    /// The score of any pair missing from a substitution table.
    /// Defaults to -4, which equals the lowest curated BLOSUM62 score rather than undercutting it, so unlisted residues such as `B` or `Z` are treated like the least likely listed substitution.
    pub uncommon_pair_penalty: i32
}

impl Default for MsaConfig {
    fn default() -> Self {
        Self {
            // 3-mers are a decent trade-off for protein sequences of a few hundred residues
            kmer_length: 3,
            scoring: ScoringScheme::Blosum62,
            gap_penalty: -8,
            // X is the usual unknown amino acid
            wildcard: Some(b'X'),
            wildcard_penalty: -1,
            uncommon_pair_penalty: -4
        }
    }
}
