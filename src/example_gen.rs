use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

/// The 20 standard amino acids
pub const AMINO_ACIDS: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

/// Creates a family of related sequences we can align, using a fixed seed so results are reproducible
/// # Arguments
/// * `alphabet` - the residues to draw from, e.g. `AMINO_ACIDS` or `b"ACGT"`
/// * `seq_len` - the length of the ancestral sequence
/// * `num_samples` - the number of descendants to generate from the ancestor
/// * `error_rate` - overall mutation rate, assumes substitution, insertion, and deletion are equally likely sub-components of this rate
/// # Returns
/// The ancestor, and `(id, sequence)` pairs named `seq_0`, `seq_1`, ...
pub fn generate_family(alphabet: &[u8], seq_len: usize, num_samples: usize, error_rate: f64) -> (Vec<u8>, Vec<(String, Vec<u8>)>) {
    assert!(alphabet.len() > 1);
    assert!((0.0..=1.0).contains(&error_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let base_distribution = Uniform::new(0, alphabet.len());
    let basem1_distribution = Uniform::new(1, alphabet.len());
    let error_distribution = Uniform::new(0.0, 1.0);
    let error_type_distribution = Uniform::new(0, 3);

    let ancestor: Vec<u8> = (0..seq_len)
        .map(|_i| alphabet[rng.sample(base_distribution)])
        .collect();
    let ancestor_indices: Vec<usize> = ancestor.iter()
        .map(|c| alphabet.iter().position(|a| a == c).unwrap_or(0))
        .collect();

    let samples: Vec<(String, Vec<u8>)> = (0..num_samples)
        .map(|i| {
            let mut seq = vec![];
            let mut anc_index = 0;
            while anc_index < ancestor.len() {
                let c = ancestor_indices[anc_index];
                let is_error = rng.sample(error_distribution) < error_rate;
                if is_error {
                    match rng.sample(error_type_distribution) {
                        0 => {
                            // substitution, the offset is never 0 so the residue always changes
                            let alt_c = (c + rng.sample(basem1_distribution)) % alphabet.len();
                            seq.push(alphabet[alt_c]);
                            anc_index += 1;
                        },
                        1 => {
                            // deletion
                            anc_index += 1;
                        },
                        _ => {
                            // insertion
                            seq.push(alphabet[rng.sample(base_distribution)]);
                        }
                    }
                } else {
                    seq.push(alphabet[c]);
                    anc_index += 1;
                }
            }
            (format!("seq_{i}"), seq)
        })
        .collect();

    (ancestor, samples)
}
