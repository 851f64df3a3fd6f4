/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::fmt::Display;

use crate::class::ClassType;
use crate::stdlib::Stdlib;
use crate::types::Type;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lit {
    Str(Box<str>),
    Int(i64),
    Bool(bool),
    Bytes(Box<[u8]>),
}

impl Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Str(x) => {
                f.write_str("'")?;
                for c in x.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            Lit::Int(x) => write!(f, "{x}"),
            Lit::Bool(x) => {
                let s = if *x { "True" } else { "False" };
                write!(f, "{s}")
            }
            Lit::Bytes(xs) => {
                write!(f, "b'")?;
                for x in xs {
                    match x {
                        b'\'' => write!(f, "\\'")?,
                        0x20..=0x7e => write!(f, "{}", *x as char)?,
                        _ => write!(f, "\\x{x:02x}")?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}

impl Lit {
    pub fn str(x: &str) -> Self {
        Lit::Str(x.into())
    }

    /// The class every value of this literal is an instance of, e.g. `str` for `'x'`.
    pub fn general_class_type<'a>(&self, stdlib: &'a Stdlib) -> &'a ClassType {
        match self {
            Lit::Str(_) => stdlib.str(),
            Lit::Int(_) => stdlib.int(),
            Lit::Bool(_) => stdlib.bool(),
            Lit::Bytes(_) => stdlib.bytes(),
        }
    }

    pub fn to_type(self) -> Type {
        Type::Literal(self)
    }
}
