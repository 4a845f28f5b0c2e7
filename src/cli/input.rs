use crate::{
    error::{Error, Result},
    generate::{generate_pair, GenerateArgs},
    tokenize::Mode,
};
use clap::{value_parser, Parser};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    ops::ControlFlow,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[derive(Parser, Serialize, Deserialize, Debug, Default)]
#[clap(next_help_heading = "Input")]
pub struct Input {
    /// The first string to compare
    #[clap(requires = "string2", conflicts_with_all = ["input", "length"])]
    pub string1: Option<String>,

    /// The second string to compare
    pub string2: Option<String>,

    /// A .txt file of line pairs, or a .seq file of `>a` and `<b` lines.
    /// Directories are read file by file.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Options to generate input pairs.
    #[clap(flatten)]
    pub generate: GenerateArgs,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Split the contents of a `.txt` or `.seq` file into pairs.
fn read_pairs(path: &Path) -> Result<Vec<(String, String)>> {
    let is_seq = match path.extension().and_then(|e| e.to_str()) {
        Some("seq") => true,
        Some("txt") => false,
        _ => {
            return Err(Error::UnknownExtension {
                path: path.to_path_buf(),
            })
        }
    };
    let data = std::fs::read_to_string(path).map_err(io_error(path))?;
    let lines = data.lines().collect_vec();
    let unpaired = || Error::UnpairedInput {
        path: path.to_path_buf(),
    };
    if lines.len() % 2 != 0 {
        return Err(unpaired());
    }
    lines
        .into_iter()
        .tuples()
        .map(|(a, b)| {
            if is_seq {
                match (a.strip_prefix('>'), b.strip_prefix('<')) {
                    (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
                    _ => Err(unpaired()),
                }
            } else {
                Ok((a.to_string(), b.to_string()))
            }
        })
        .collect()
}

impl Input {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mode: Mode,
        mut run_pair: impl FnMut(&str, &str) -> ControlFlow<()>,
    ) -> Result<()> {
        let flow = if let (Some(a), Some(b)) = (&self.string1, &self.string2) {
            run_pair(a.as_str(), b.as_str())
        } else if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files = input
                    .read_dir()
                    .map_err(io_error(input))?
                    .map_ok(|e| e.path())
                    .collect::<std::io::Result<Vec<_>>>()
                    .map_err(io_error(input))?;
                files.sort();
                files
            };

            let mut flow = ControlFlow::Continue(());
            for f in files {
                let pairs = read_pairs(&f)?;
                info!(file = %f.display(), pairs = pairs.len(), "read input");
                flow = pairs
                    .iter()
                    .try_for_each(|(a, b)| run_pair(a.as_str(), b.as_str()));
                if flow.is_break() {
                    break;
                }
            }
            flow
        } else if let Some(opt) = self.generate.to_generate_options(mode) {
            // Generate random input.
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..u64::MAX);
                eprintln!("Seed: {seed}");
                seed
            });
            let ref mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..self.generate.cnt).try_for_each(|_| {
                let (a, b) = generate_pair(&opt, rng);
                run_pair(a.as_str(), b.as_str())
            })
        } else {
            ControlFlow::Continue(())
        };
        if flow.is_break() {
            debug!("stopped before the end of the input");
        }
        Ok(())
    }
}
