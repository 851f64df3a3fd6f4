/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Deciding whether a literal attribute assignment is well-typed.

use tracing::trace;

use crate::call_shape::LiteralAssignment;
use crate::call_shape::Receiver;
use crate::error::kind::ErrorKind;
use crate::host::AttributeSymbol;
use crate::host::NominalType;
use crate::host::TypeHost;
use crate::resolve::lookup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome<'a, T, C> {
    Passed,
    Failed(AttributeFailure<'a, T, C>),
}

/// Why an assignment was rejected. Each variant becomes exactly one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFailure<'a, T, C> {
    /// Neither the class nor any ancestor declares the name.
    AttributeMissing {
        name: &'a str,
        receiver: Receiver<T, C>,
    },
    /// The name is bound to a method or a nested class.
    NotADataField {
        name: &'a str,
        receiver: Receiver<T, C>,
    },
    FieldTypeUnknown {
        name: &'a str,
        receiver: Receiver<T, C>,
    },
    /// `expected` and `actual` have had aliases expanded.
    TypeMismatch {
        name: &'a str,
        receiver: Receiver<T, C>,
        expected: T,
        actual: T,
    },
}

impl<'a, T, C> AttributeFailure<'a, T, C> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AttributeMissing { .. } => ErrorKind::MissingAttribute,
            Self::NotADataField { .. } => ErrorKind::NonDataAttribute,
            Self::FieldTypeUnknown { .. } => ErrorKind::UnknownAttributeType,
            Self::TypeMismatch { .. } => ErrorKind::BadAssignment,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::AttributeMissing { name, .. }
            | Self::NotADataField { name, .. }
            | Self::FieldTypeUnknown { name, .. }
            | Self::TypeMismatch { name, .. } => name,
        }
    }

    pub fn receiver(&self) -> &Receiver<T, C> {
        match self {
            Self::AttributeMissing { receiver, .. }
            | Self::NotADataField { receiver, .. }
            | Self::FieldTypeUnknown { receiver, .. }
            | Self::TypeMismatch { receiver, .. } => receiver,
        }
    }
}

/// The declared type of a field, as far as an assignment cares.
enum Field<T> {
    Missing,
    NotData,
    Untyped,
    Typed(T),
}

impl<'a, T, C: NominalType<Type = T>> LiteralAssignment<'a, T, C> {
    pub fn check<H: TypeHost<Type = T>>(self, host: &H) -> ValidationOutcome<'a, T, C> {
        let field = match lookup(&self.receiver.class, self.name) {
            None => Field::Missing,
            Some(found) => {
                trace!(
                    "`{}` resolved on `{}`",
                    self.name,
                    found.owner.qualified_name()
                );
                match found.symbol {
                    AttributeSymbol::Variable(Some(ty)) => Field::Typed(host.proper_type(ty)),
                    AttributeSymbol::Variable(None) => Field::Untyped,
                    AttributeSymbol::Function | AttributeSymbol::NestedClass => Field::NotData,
                }
            }
        };
        let Self {
            name,
            receiver,
            value_type,
        } = self;
        let failure = match field {
            Field::Missing => AttributeFailure::AttributeMissing { name, receiver },
            Field::NotData => AttributeFailure::NotADataField { name, receiver },
            Field::Untyped => AttributeFailure::FieldTypeUnknown { name, receiver },
            Field::Typed(expected) => {
                let actual = host.proper_type(value_type);
                if host.is_subset_eq(&actual, &expected) {
                    return ValidationOutcome::Passed;
                }
                AttributeFailure::TypeMismatch {
                    name,
                    receiver,
                    expected,
                    actual,
                }
            }
        };
        ValidationOutcome::Failed(failure)
    }
}
