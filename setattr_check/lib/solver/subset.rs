/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use itertools::izip;
use setattr_types::class::Class;
use setattr_types::class::ClassType;
use setattr_types::stdlib::Stdlib;
use setattr_types::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsetError {
    /// The first class does not inherit from the second.
    NotASubclass(Class, Class),
    /// Generic instances of the same class disagree at this type argument.
    Invariant(usize),
    Other,
}

fn ok_or(b: bool, e: SubsetError) -> Result<(), SubsetError> {
    b.then_some(()).ok_or(e)
}

fn all<T>(
    it: impl Iterator<Item = T>,
    mut check: impl FnMut(T) -> Result<(), SubsetError>,
) -> Result<(), SubsetError> {
    for x in it {
        check(x)?;
    }
    Ok(())
}

fn any<T>(
    it: impl Iterator<Item = T>,
    mut check: impl FnMut(T) -> Result<(), SubsetError>,
) -> Result<(), SubsetError> {
    let mut err = None;
    for x in it {
        match check(x) {
            Ok(()) => return Ok(()),
            Err(e) if err.is_none() => err = Some(e),
            Err(_) => {}
        }
    }
    Err(err.unwrap_or(SubsetError::Other))
}

/// The subtype relation of the reference host.
pub struct Subset<'a> {
    stdlib: &'a Stdlib,
}

impl<'a> Subset<'a> {
    pub fn new(stdlib: &'a Stdlib) -> Self {
        Self { stdlib }
    }

    fn is_object(&self, cls: &ClassType) -> bool {
        cls.class_object() == self.stdlib.object().class_object()
    }

    /// Type arguments are invariant, so compare them in both directions.
    fn is_equal(&self, got: &Type, want: &Type) -> bool {
        self.is_subset_eq(got, want).is_ok() && self.is_subset_eq(want, got).is_ok()
    }

    fn is_subset_targs(&self, got: &[Type], want: &[Type]) -> Result<(), SubsetError> {
        ok_or(got.len() == want.len(), SubsetError::Other)?;
        all(izip!(got, want).enumerate(), |(i, (got, want))| {
            ok_or(self.is_equal(got, want), SubsetError::Invariant(i))
        })
    }

    fn is_subset_class_type(&self, got: &ClassType, want: &ClassType) -> Result<(), SubsetError> {
        if got.class_object() == want.class_object() {
            return self.is_subset_targs(got.targs(), want.targs());
        }
        // `int` is accepted wherever `float` is, and so are its subclasses.
        let int = self.stdlib.int().class_object();
        if want.class_object() == self.stdlib.float().class_object()
            && (got.class_object() == int || got.class_object().has_ancestor(int))
        {
            return Ok(());
        }
        match got.class_object().mro().find(want.class_object()) {
            Some(ancestor) => self.is_subset_targs(ancestor.targs(), want.targs()),
            None => Err(SubsetError::NotASubclass(
                got.class_object().clone(),
                want.class_object().clone(),
            )),
        }
    }

    pub fn is_subset_eq(&self, got: &Type, want: &Type) -> Result<(), SubsetError> {
        match (got, want) {
            (Type::Any(_), _) | (_, Type::Any(_)) | (Type::Never, _) => Ok(()),
            (Type::TypeAlias(ta), _) => self.is_subset_eq(ta.as_type(), want),
            (_, Type::TypeAlias(ta)) => self.is_subset_eq(got, ta.as_type()),
            (_, Type::ClassType(want)) if self.is_object(want) => Ok(()),
            (Type::Union(ls), u) => all(ls.iter(), |l| self.is_subset_eq(l, u)),
            (l, Type::Union(us)) => any(us.iter(), |u| self.is_subset_eq(l, u)),
            (Type::Literal(l), Type::Literal(u)) => ok_or(l == u, SubsetError::Other),
            (Type::Literal(l), u @ Type::ClassType(_)) => {
                self.is_subset_eq(&l.general_class_type(self.stdlib).to_type(), u)
            }
            (Type::None, Type::None) => Ok(()),
            (Type::ClassType(got), Type::ClassType(want)) => self.is_subset_class_type(got, want),
            (Type::ClassDef(got), Type::ClassDef(want)) => ok_or(
                got == want || got.has_ancestor(want),
                SubsetError::NotASubclass(got.clone(), want.clone()),
            ),
            _ => Err(SubsetError::Other),
        }
    }
}
