//! Turning an edit script into two display lines.
//!
//! Unchanged tokens are written in lowercase on both lines. Deleted tokens
//! only show on the source line and inserted tokens only on the target line,
//! highlighted by the chosen `Style`.
use std::path::Path;

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::edit_script::{EditOp, EditScript};
use crate::error::{Error, Result};
use crate::tokenize::Mode;

#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    /// Changed tokens in uppercase.
    #[default]
    Upper,
    /// Changed tokens wrapped in `<` and `>`.
    Brackets,
}

impl Style {
    fn highlight(&self, token: &str) -> String {
        match self {
            Style::Upper => token.to_uppercase(),
            Style::Brackets => format!("<{token}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub source: String,
    pub target: String,
}

impl Rendered {
    /// Both lines separated by a blank line.
    pub fn to_markdown(&self) -> String {
        format!("{}\n\n{}\n", self.source, self.target)
    }

    pub fn write_markdown(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_markdown()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn render(script: &EditScript, mode: Mode, style: Style) -> Rendered {
    let mut source = vec![];
    let mut target = vec![];
    for op in script {
        match op {
            EditOp::Equal(t) => {
                let t = t.to_lowercase();
                source.push(t.clone());
                target.push(t);
            }
            EditOp::Deletion(t) => source.push(style.highlight(t)),
            EditOp::Insertion(t) => target.push(style.highlight(t)),
        }
    }
    Rendered {
        source: source.iter().join(mode.separator()),
        target: target.iter().join(mode.separator()),
    }
}
