use clap::Parser;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tokenize::Mode;

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[clap(next_help_heading = "Generated input")]
pub struct GenerateArgs {
    /// The number of pairs to generate
    #[clap(short = 'x', long, default_value_t = 1, hide_short_help = true)]
    pub cnt: usize,

    /// Number of tokens in generated sequences
    #[clap(short = 'n', long)]
    pub length: Option<usize>,

    /// Fraction of tokens to mutate. Defaults to 0.
    #[clap(short, long)]
    pub error_rate: Option<f32>,

    /// Seed to initialize RNG for reproducability
    #[clap(long)]
    pub seed: Option<u64>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        GenerateArgs {
            cnt: 1,
            length: None,
            error_rate: None,
            seed: None,
        }
    }
}

impl GenerateArgs {
    pub fn to_generate_options(&self, mode: Mode) -> Option<GenerateOptions> {
        Some(GenerateOptions {
            length: self.length?,
            error_rate: self.error_rate.unwrap_or(0.),
            mode,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GenerateOptions {
    pub length: usize,
    pub error_rate: f32,
    pub mode: Mode,
}

const ALPH: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
const WORDS: [&str; 8] = ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];

enum Mutation {
    // Replace token at pos.
    Substitution(usize, &'static str),
    // Insert token before pos.
    Insertion(usize, &'static str),
    // Delete token at pos.
    Deletion(usize),
}

fn rand_token(mode: Mode, rng: &mut impl Rng) -> &'static str {
    let alph = match mode {
        Mode::Word => &WORDS,
        Mode::Char => &ALPH,
    };
    alph[rng.gen_range(0..alph.len())]
}

fn random_mutation(len_b: usize, mode: Mode, rng: &mut impl Rng) -> Mutation {
    // Substitution / insertion / deletion all with equal probability.
    // For length 0 sequences, only generate insertions.
    match if len_b == 0 { 1 } else { rng.gen_range(0..3usize) } {
        0 => Mutation::Substitution(rng.gen_range(0..len_b), rand_token(mode, rng)),
        1 => Mutation::Insertion(rng.gen_range(0..len_b + 1), rand_token(mode, rng)),
        2 => Mutation::Deletion(rng.gen_range(0..len_b)),
        _ => unreachable!(),
    }
}

/// Generate a random string of `length` tokens, and a copy with
/// `ceil(error_rate * length)` random edits applied.
pub fn generate_pair(opt: &GenerateOptions, rng: &mut impl Rng) -> (String, String) {
    let a = (0..opt.length).map(|_| rand_token(opt.mode, rng)).collect_vec();
    let num_mutations = (opt.error_rate * opt.length as f32).ceil() as usize;
    let mut b = a.clone();
    for _ in 0..num_mutations {
        match random_mutation(b.len(), opt.mode, rng) {
            Mutation::Substitution(i, t) => b[i] = t,
            Mutation::Insertion(i, t) => b.insert(i, t),
            Mutation::Deletion(i) => {
                b.remove(i);
            }
        }
    }
    let sep = opt.mode.separator();
    (a.join(sep), b.join(sep))
}
