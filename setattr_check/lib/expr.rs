/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Argument expressions, as much of them as the reference host needs.

use std::fmt;
use std::fmt::Display;

use text_size::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    StringLiteral { value: Box<str>, range: TextRange },
    IntLiteral { value: i64, range: TextRange },
    NoneLiteral { range: TextRange },
    /// A variable reference, e.g. `user` or `attr_name`.
    Name { id: Box<str>, range: TextRange },
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::StringLiteral { value, .. } => write!(f, "{value:?}"),
            Expr::IntLiteral { value, .. } => write!(f, "{value}"),
            Expr::NoneLiteral { .. } => write!(f, "None"),
            Expr::Name { id, .. } => write!(f, "{id}"),
        }
    }
}

impl Expr {
    pub fn range(&self) -> TextRange {
        match self {
            Expr::StringLiteral { range, .. }
            | Expr::IntLiteral { range, .. }
            | Expr::NoneLiteral { range }
            | Expr::Name { range, .. } => *range,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Expr::StringLiteral { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use text_size::TextSize;

    use super::*;

    #[test]
    fn test_display_and_range() {
        let range = TextRange::new(TextSize::from(4), TextSize::from(10));
        let literal = Expr::StringLiteral {
            value: "name".into(),
            range,
        };
        assert_eq!(literal.to_string(), "\"name\"");
        assert_eq!(literal.range(), range);
        assert_eq!(literal.as_string_literal(), Some("name"));
        let name = Expr::Name {
            id: "attr".into(),
            range,
        };
        assert_eq!(name.to_string(), "attr");
        assert_eq!(name.as_string_literal(), None);
        assert_eq!(Expr::NoneLiteral { range }.to_string(), "None");
    }
}
