use std::fmt::Write;

use itertools::Itertools;
use serde::Serialize;

use crate::cost_model::{Cost, CostModel};
use crate::tokenize::Token;

/// One step of an alignment, carrying the token it applies to.
///
/// `Equal` and `Deletion` carry a token of `a`, `Insertion` a token of `b`.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(tag = "op", content = "token", rename_all = "lowercase")]
pub enum EditOp<'a> {
    Equal(Token<'a>),
    Insertion(Token<'a>),
    Deletion(Token<'a>),
}

impl<'a> EditOp<'a> {
    pub fn token(&self) -> Token<'a> {
        match *self {
            EditOp::Equal(t) | EditOp::Insertion(t) | EditOp::Deletion(t) => t,
        }
    }

    fn get_char(&self) -> char {
        match self {
            EditOp::Equal(_) => '=',
            EditOp::Insertion(_) => 'I',
            EditOp::Deletion(_) => 'D',
        }
    }

    fn kind(&self) -> std::mem::Discriminant<Self> {
        std::mem::discriminant(self)
    }
}

/// An ordered list of edits turning `a` into `b`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditScript<'a> {
    ops: Vec<EditOp<'a>>,
}

impl<'a> From<Vec<EditOp<'a>>> for EditScript<'a> {
    fn from(ops: Vec<EditOp<'a>>) -> Self {
        EditScript { ops }
    }
}

impl<'a> EditScript<'a> {
    pub fn ops(&self) -> &[EditOp<'a>] {
        &self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp<'a>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The tokens of `a`: all `Equal` and `Deletion` tokens in order.
    pub fn source(&self) -> Vec<Token<'a>> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Insertion(_)))
            .map(EditOp::token)
            .collect()
    }

    /// The tokens of `b`: all `Equal` and `Insertion` tokens in order.
    pub fn target(&self) -> Vec<Token<'a>> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Deletion(_)))
            .map(EditOp::token)
            .collect()
    }

    pub fn equalities(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, EditOp::Equal(_))).count()
    }

    pub fn insertions(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, EditOp::Insertion(_))).count()
    }

    pub fn deletions(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, EditOp::Deletion(_))).count()
    }

    /// Run-length encoded summary, e.g. `3=1D1I2=`.
    pub fn cigar(&self) -> String {
        let mut s = String::new();
        for (_, group) in &self.ops.iter().group_by(|op| op.kind()) {
            let group = group.collect_vec();
            write!(&mut s, "{}{}", group.len(), group[0].get_char()).unwrap();
        }
        s
    }

    /// The cost of applying this script under `cm`.
    ///
    /// The traceback writes a substitution as a deletion directly followed by
    /// an insertion, so such a pair is priced as the cheaper of one
    /// substitution and two indels.
    pub fn cost(&self, cm: &CostModel) -> Cost {
        let mut cost: Cost = 0;
        let mut it = self.ops.iter().peekable();
        while let Some(op) = it.next() {
            cost = cost.saturating_add(match op {
                EditOp::Equal(_) => 0,
                EditOp::Insertion(_) => cm.ins,
                EditOp::Deletion(_) => {
                    if let Some(EditOp::Insertion(_)) = it.peek() {
                        it.next();
                        cm.sub.min(cm.ins.saturating_add(cm.del))
                    } else {
                        cm.del
                    }
                }
            });
        }
        cost
    }

    /// Panics when the script does not turn `a` into `b`.
    pub fn verify(&self, a: &[Token], b: &[Token]) {
        assert_eq!(self.source(), a, "Script {} does not consume a.", self.cigar());
        assert_eq!(self.target(), b, "Script {} does not produce b.", self.cigar());
    }
}

impl<'s, 'a> IntoIterator for &'s EditScript<'a> {
    type Item = &'s EditOp<'a>;
    type IntoIter = std::slice::Iter<'s, EditOp<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EditOp::*;

    fn script() -> EditScript<'static> {
        vec![
            Equal("a"),
            Equal("b"),
            Deletion("c"),
            Insertion("x"),
            Equal("d"),
            Insertion("e"),
        ]
        .into()
    }

    #[test]
    fn reconstruct() {
        let s = script();
        assert_eq!(s.source(), ["a", "b", "c", "d"]);
        assert_eq!(s.target(), ["a", "b", "x", "d", "e"]);
        s.verify(&["a", "b", "c", "d"], &["a", "b", "x", "d", "e"]);
    }

    #[test]
    #[should_panic]
    fn verify_rejects_wrong_target() {
        script().verify(&["a", "b", "c", "d"], &["a", "b", "c", "d"]);
    }

    #[test]
    fn counts_and_cigar() {
        let s = script();
        assert_eq!((s.equalities(), s.insertions(), s.deletions()), (3, 2, 1));
        assert_eq!(s.cigar(), "2=1D1I1=1I");
        assert_eq!(EditScript::default().cigar(), "");
    }

    #[test]
    fn cost() {
        let s = script();
        assert_eq!(s.cost(&CostModel::unit()), 2);
        let cm = CostModel { ins: 2, del: 3, sub: 4 };
        // One substitution and one insertion.
        assert_eq!(s.cost(&cm), 4 + 2);
        let cm = CostModel { ins: 1, del: 1, sub: 7 };
        assert_eq!(s.cost(&cm), 2 + 1);
    }

    #[test]
    fn serialize() {
        let s: EditScript = vec![Equal("a"), Insertion("b")].into();
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"[{"op":"equal","token":"a"},{"op":"insertion","token":"b"}]"#
        );
    }
}
