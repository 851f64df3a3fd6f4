/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Turning the host's argument groups for `setattr(obj, name, value)` and
//! `object.__setattr__(obj, name, value)` into something we can check.

use crate::host::TypeHost;

/// Both intercepted calls take exactly three positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("object.__setattr__/setattr takes the wrong number of arguments.")]
pub struct WrongNumberOfArguments;

/// The three arguments of a well-formed call, each with its inferred type.
#[derive(Debug)]
pub struct CallShape<'a, E, T> {
    pub receiver: &'a E,
    pub receiver_type: &'a T,
    pub name: &'a E,
    pub name_type: &'a T,
    pub value: &'a E,
    pub value_type: &'a T,
}

/// The receiver of an assignment: its type with aliases expanded, and the class it is an instance of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver<T, C> {
    pub ty: T,
    pub class: C,
}

/// A call whose attribute name is known statically and whose receiver is an
/// instance of a nominal class. Only these are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralAssignment<'a, T, C> {
    pub name: &'a str,
    pub receiver: Receiver<T, C>,
    pub value_type: &'a T,
}

fn single<X>(group: &[X]) -> Option<&X> {
    match group {
        [x] => Some(x),
        _ => None,
    }
}

fn three_singletons<X>(groups: &[Vec<X>]) -> Option<[&X; 3]> {
    match groups {
        [a, b, c] => Some([single(a)?, single(b)?, single(c)?]),
        _ => None,
    }
}

impl<'a, E, T> CallShape<'a, E, T> {
    /// Expression groups and type groups are checked separately, both must be `[[_], [_], [_]]`.
    pub fn new(args: &'a [Vec<E>], arg_types: &'a [Vec<T>]) -> Result<Self, WrongNumberOfArguments> {
        let [receiver, name, value] = three_singletons(args).ok_or(WrongNumberOfArguments)?;
        let [receiver_type, name_type, value_type] =
            three_singletons(arg_types).ok_or(WrongNumberOfArguments)?;
        Ok(Self {
            receiver,
            receiver_type,
            name,
            name_type,
            value,
            value_type,
        })
    }

    /// `None` when the name isn't a string literal or the receiver isn't a class instance.
    pub fn literal_assignment<H: TypeHost<Expr = E, Type = T>>(
        &self,
        host: &H,
    ) -> Option<LiteralAssignment<'a, T, H::Class>> {
        let name = host.as_str_literal(self.name)?;
        let class = host.as_instance(self.receiver_type)?;
        Some(LiteralAssignment {
            name,
            receiver: Receiver {
                ty: host.proper_type(self.receiver_type),
                class,
            },
            value_type: self.value_type,
        })
    }
}
