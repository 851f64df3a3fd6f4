/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The surface of the host type checker, as seen by the setattr hooks.
//!
//! The host owns parsing, inference, class metadata and the subtype relation.
//! Hooks only ever borrow what is described here, for the duration of one call.

use std::fmt::Debug;
use std::fmt::Display;

pub use setattr_types::class::AttributeSymbol;
use text_size::TextRange;

use crate::error::kind::ErrorKind;

/// A class as the host knows it: its own members plus its ancestors.
pub trait NominalType: Sized {
    type Type;

    /// The short name, e.g. `User`.
    fn name(&self) -> &str;

    /// The fully-qualified name, e.g. `__main__.User`.
    fn qualified_name(&self) -> String;

    /// A member declared directly in this class body. Ancestors are not consulted.
    fn get_member(&self, name: &str) -> Option<&AttributeSymbol<Self::Type>>;

    /// Ancestors in method resolution order, excluding the class itself.
    fn ancestors(&self) -> impl Iterator<Item = &Self>;
}

pub trait TypeHost {
    type Type: Clone + Debug + Display;
    type Class: NominalType<Type = Self::Type> + Clone + Debug;
    type Expr: Debug;

    /// The class of `ty`, if `ty` is an instance of a concrete nominal class.
    fn as_instance(&self, ty: &Self::Type) -> Option<Self::Class>;

    /// The value of `expr`, if it is a string literal.
    fn as_str_literal<'e>(&self, expr: &'e Self::Expr) -> Option<&'e str>;

    /// `ty` with aliases expanded.
    fn proper_type(&self, ty: &Self::Type) -> Self::Type;

    /// Can a value of type `got` be used where `want` is expected?
    fn is_subset_eq(&self, got: &Self::Type, want: &Self::Type) -> bool;
}

/// Where hooks send their diagnostics.
pub trait ErrorSink {
    fn add(&self, range: TextRange, msg: String, kind: ErrorKind);
}

/// Everything the host tells a hook about one intercepted call.
pub struct CallContext<'a, H: TypeHost> {
    /// The return type the host inferred for the call. Hooks hand it back unchanged.
    pub default_return_type: &'a H::Type,
    /// One group per formal parameter, each holding the actual argument expressions.
    pub args: &'a [Vec<H::Expr>],
    /// The inferred types of `args`, grouped the same way.
    pub arg_types: &'a [Vec<H::Type>],
    /// The range of the whole call expression.
    pub range: TextRange,
    pub errors: &'a dyn ErrorSink,
}

impl<'a, H: TypeHost> Debug for CallContext<'a, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("default_return_type", self.default_return_type)
            .field("args", &self.args)
            .field("arg_types", &self.arg_types)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
