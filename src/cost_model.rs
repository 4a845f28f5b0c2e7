//! This module contains the linear `CostModel` used by the aligner.
//!
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Type for storing costs. Not u64 to save on memory.
pub type Cost = u32;

/// Linear costs for the three edit operations.
///
/// Matching two equal tokens is always free. Note that insertions add tokens
/// of `b`, and deletions remove tokens of `a`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CostModel {
    /// The insertion cost.
    pub ins: Cost,
    /// The deletion cost.
    pub del: Cost,
    /// The substitution cost.
    pub sub: Cost,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::unit()
    }
}

impl CostModel {
    /// Levenshtein distance: every edit costs 1.
    pub const fn unit() -> Self {
        CostModel {
            ins: 1,
            del: 1,
            sub: 1,
        }
    }

    /// Build a cost model from user supplied values, rejecting negative ones.
    pub fn new(ins: i64, del: i64, sub: i64) -> Result<Self> {
        Ok(CostModel {
            ins: Self::check("insertion", ins)?,
            del: Self::check("deletion", del)?,
            sub: Self::check("substitution", sub)?,
        })
    }

    fn check(name: &'static str, value: i64) -> Result<Cost> {
        Cost::try_from(value).map_err(|_| Error::InvalidConfiguration { name, value })
    }

    /// The same model with the roles of `a` and `b` exchanged.
    pub fn swapped(&self) -> Self {
        CostModel {
            ins: self.del,
            del: self.ins,
            sub: self.sub,
        }
    }
}
