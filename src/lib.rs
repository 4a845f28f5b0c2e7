//! Minimum edit distance between two token sequences, with a traceback to an
//! edit script of equal, inserted and deleted tokens.
//!
//! ```
//! use token_aligner::prelude::*;
//!
//! let a = tokenize("the quick fox", Mode::Word);
//! let b = tokenize("the quick brown fox", Mode::Word);
//! let alignment = align(&a, &b, &CostModel::unit(), true);
//! assert_eq!(alignment.distance, 1);
//! assert_eq!(alignment.script.insertions(), 1);
//! ```
pub mod cli;
pub mod cost_model;
pub mod edit_script;
pub mod error;
pub mod generate;
pub mod nw;
pub mod render;
pub mod tokenize;


pub use error::{Error, Result};

pub mod prelude {
    pub use crate::cost_model::{Cost, CostModel};
    pub use crate::edit_script::{EditOp, EditScript};
    pub use crate::nw::{align, Alignment, NW};
    pub use crate::render::{render, Rendered, Style};
    pub use crate::tokenize::{equal, tokenize, Mode, Sequence, Token, Tokenizer};
}
