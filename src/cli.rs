mod input;

pub use input::Input;

use crate::{
    cost_model::{Cost, CostModel},
    edit_script::EditScript,
    error::Result,
    nw::NW,
    render::{render, Rendered, Style},
    tokenize::{Mode, Tokenizer, DEFAULT_SEPARATOR},
};
use clap::{value_parser, ArgGroup, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::{io::Write, ops::ControlFlow, path::PathBuf};

/// Compare two strings: print their minimum edit distance and an alignment.
#[derive(Parser, Serialize, Deserialize, Debug)]
#[clap(author, about)]
#[clap(group(
    ArgGroup::new("input_type")
        .required(true)
        .args(["string1", "input", "length"]),
))]
pub struct Cli {
    #[clap(flatten)]
    pub input: Input,

    #[clap(flatten)]
    pub align: AlignArgs,

    /// Write the alignment of the last pair as markdown to this file.
    #[arg(short, long, value_parser = value_parser!(PathBuf))]
    pub output: Option<PathBuf>,

    /// How to highlight changed tokens.
    #[arg(long, value_enum, default_value_t)]
    pub style: Style,

    #[arg(long, value_enum, default_value_t)]
    pub format: Format,

    /// Print less. Pass twice for summary line only.
    ///
    /// Once: only print the distance for each pair, without the alignment.
    /// Twice: only print a summary line after all pairs are aligned.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Log more. Pass twice for debug output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// The distance followed by the rendered alignment.
    #[default]
    Text,
    /// One JSON object per pair.
    Json,
}

#[derive(Parser, Serialize, Deserialize, Debug, Clone)]
#[clap(next_help_heading = "Alignment")]
pub struct AlignArgs {
    /// Perform comparison on whole words, as opposed to on individual characters.
    #[arg(short, long)]
    pub word: bool,

    /// Compare tokens ignoring case.
    #[arg(long)]
    pub ignore_case: bool,

    /// Cost of inserting a token.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ins: i64,

    /// Cost of deleting a token.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub del: i64,

    /// Cost of substituting a token.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub sub: i64,

    /// Regex matching the separators between words.
    #[arg(long, default_value = DEFAULT_SEPARATOR, hide_short_help = true)]
    pub separator: String,
}

impl Default for AlignArgs {
    fn default() -> Self {
        AlignArgs {
            word: false,
            ignore_case: false,
            ins: 1,
            del: 1,
            sub: 1,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl AlignArgs {
    pub fn mode(&self) -> Mode {
        if self.word {
            Mode::Word
        } else {
            Mode::Char
        }
    }

    pub fn cost_model(&self) -> Result<CostModel> {
        CostModel::new(self.ins, self.del, self.sub)
    }

    pub fn tokenizer(&self) -> Result<Tokenizer> {
        Tokenizer::new(self.mode(), &self.separator)
    }

    pub fn aligner(&self) -> Result<NW> {
        Ok(NW::new(self.cost_model()?, !self.ignore_case))
    }
}

#[derive(Serialize)]
struct Report<'s, 'a> {
    distance: Cost,
    cigar: String,
    script: &'s EditScript<'a>,
}

/// Totals over all aligned pairs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub pairs: usize,
    pub distance: u64,
    pub tokens: usize,
}

impl Summary {
    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        let avg = if self.pairs == 0 {
            0.
        } else {
            self.distance as f64 / self.pairs as f64
        };
        writeln!(
            out,
            "Pairs: {:>6}  Tokens: {:>9}  Total distance: {:>9}  Average distance: {avg:>9.2}",
            self.pairs, self.tokens, self.distance
        )
    }
}

impl Cli {
    /// Align every input pair, writing results to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<Summary> {
        let tokenizer = self.align.tokenizer()?;
        let aligner = self.align.aligner()?;
        let mode = tokenizer.mode();

        let mut summary = Summary::default();
        let mut last: Option<Rendered> = None;
        let mut error = None;

        let mut run_pair = |a: &str, b: &str| -> Result<()> {
            let (a, b) = (tokenizer.tokenize(a), tokenizer.tokenize(b));
            let alignment = aligner.align(&a, &b);
            summary.pairs += 1;
            summary.distance += u64::from(alignment.distance);
            summary.tokens += a.len() + b.len();

            let rendered = &*last.insert(render(&alignment.script, mode, self.style));
            if self.silent >= 2 {
                return Ok(());
            }
            match self.format {
                Format::Text => {
                    writeln!(out, "Minimum edit distance: {}", alignment.distance)?;
                    if self.silent == 0 {
                        writeln!(out, "{}\n{}", rendered.source, rendered.target)?;
                    }
                }
                Format::Json => {
                    let report = Report {
                        distance: alignment.distance,
                        cigar: alignment.script.cigar(),
                        script: &alignment.script,
                    };
                    serde_json::to_writer(&mut *out, &report)?;
                    writeln!(out)?;
                }
            }
            Ok(())
        };

        self.input.process_input_pairs(mode, |a, b| match run_pair(a, b) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                error = Some(e);
                ControlFlow::Break(())
            }
        })?;
        if let Some(e) = error {
            return Err(e);
        }

        if let (Some(path), Some(rendered)) = (&self.output, &last) {
            rendered.write_markdown(path)?;
        }
        if self.silent >= 2 || summary.pairs > 1 {
            summary.print(out)?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn run(args: &[&str]) -> (Result<Summary>, String) {
        let cli = Cli::try_parse_from(std::iter::once("token-aligner").chain(args.iter().copied()))
            .unwrap();
        let mut out = vec![];
        let summary = cli.run(&mut out);
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_test() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn kitten() {
        let (summary, out) = run(&["kitten", "sitting"]);
        assert_eq!(summary.unwrap().distance, 3);
        assert_eq!(out, "Minimum edit distance: 3\nKittEn\nSittInG\n");
    }

    #[test]
    fn words_with_brackets() {
        let (_, out) = run(&["the quick fox", "the quick brown fox", "-w", "--style", "brackets"]);
        assert_eq!(
            out,
            "Minimum edit distance: 1\nthe quick fox\nthe quick <brown> fox\n"
        );
    }

    #[test]
    fn ignore_case() {
        let (summary, _) = run(&["Hello World", "hello world", "--ignore-case", "-s"]);
        assert_eq!(summary.unwrap().distance, 0);
        let (summary, _) = run(&["Hello World", "hello world", "-w", "-s"]);
        assert_eq!(summary.unwrap().distance, 2);
    }

    #[test]
    fn negative_cost_is_rejected() {
        let (summary, out) = run(&["a", "b", "--ins", "-1"]);
        assert!(matches!(
            summary,
            Err(Error::InvalidConfiguration {
                name: "insertion",
                value: -1
            })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn json() {
        let (_, out) = run(&["ab", "b", "--format", "json"]);
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["distance"], 1);
        assert_eq!(v["cigar"], "1D1=");
        assert_eq!(v["script"][0]["op"], "deletion");
        assert_eq!(v["script"][0]["token"], "a");
    }

    #[test]
    fn markdown_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let (_, out) = run(&["abc", "abd", "-s", "-o", path.to_str().unwrap()]);
        assert_eq!(out, "Minimum edit distance: 1\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abC\n\nabD\n");
    }

    #[test]
    fn markdown_output_keeps_last_pair() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pairs.txt");
        std::fs::write(&input, "abc\nabd\nxy\nxz\n").unwrap();
        let path = dir.path().join("out.md");
        let (summary, _) = run(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            path.to_str().unwrap(),
            "-s",
        ]);
        assert_eq!(summary.unwrap().pairs, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xY\n\nxZ\n");
    }

    #[test]
    fn generated_summary() {
        let (summary, out) = run(&["-n", "20", "-e", "0.1", "-x", "4", "--seed", "3", "-ss"]);
        let summary = summary.unwrap();
        assert_eq!(summary.pairs, 4);
        assert!(out.starts_with("Pairs:"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn requires_input() {
        assert!(Cli::try_parse_from(["token-aligner"]).is_err());
        assert!(Cli::try_parse_from(["token-aligner", "only-one"]).is_err());
    }

    #[test]
    fn positional_pair_conflicts_with_other_input() {
        assert!(Cli::try_parse_from(["token-aligner", "a", "b", "-n", "10"]).is_err());
        assert!(Cli::try_parse_from(["token-aligner", "a", "b", "-i", "pairs.txt"]).is_err());
    }
}
