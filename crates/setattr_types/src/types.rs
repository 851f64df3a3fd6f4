/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::fmt::Display;

use setattr_util::display::commas_iter;
use setattr_util::display::pipes_iter;

use crate::class::Class;
use crate::class::ClassType;
use crate::literal::Lit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnyStyle {
    /// The user wrote `Any` literally.
    Explicit,
    /// The user didn't write a type, so we inferred `Any`.
    Implicit,
}

/// A named alias such as `UserId = int`. Checks see through it with [`Type::proper`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeAlias {
    name: Box<str>,
    ty: Type,
}

impl TypeAlias {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_type(&self) -> &Type {
        &self.ty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Literal(Lit),
    Union(Vec<Type>),
    /// A class definition has type `Type::ClassDef(cls)`.
    ClassDef(Class),
    /// A value that indicates a concrete, instantiated type with known type
    /// arguments. Instances of classes have this type.
    ClassType(ClassType),
    TypeAlias(Box<TypeAlias>),
    None,
    Any(AnyStyle),
    Never,
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Literal(lit) => write!(f, "Literal[{lit}]"),
            Type::Union(xs) => {
                let (lits, rest): (Vec<_>, Vec<_>) =
                    xs.iter().partition(|x| matches!(x, Type::Literal(_)));
                // Literals are merged, `Literal['a'] | Literal['b']` prints as `Literal['a', 'b']`.
                let merged = if lits.len() > 1 {
                    Some(format!(
                        "Literal[{}]",
                        commas_iter(|| lits.iter().filter_map(|x| match x {
                            Type::Literal(lit) => Some(lit),
                            _ => None,
                        }))
                    ))
                } else {
                    None
                };
                match merged {
                    Some(merged) if rest.is_empty() => write!(f, "{merged}"),
                    Some(merged) => write!(f, "{merged} | {}", pipes_iter(|| &rest)),
                    None => write!(f, "{}", pipes_iter(|| xs)),
                }
            }
            Type::ClassDef(cls) => write!(f, "type[{cls}]"),
            Type::ClassType(cls) => write!(f, "{cls}"),
            Type::TypeAlias(ta) => write!(f, "{}", ta.name()),
            Type::None => write!(f, "None"),
            Type::Any(_) => write!(f, "Any"),
            Type::Never => write!(f, "Never"),
        }
    }
}

impl Type {
    pub fn any_explicit() -> Self {
        Type::Any(AnyStyle::Explicit)
    }

    pub fn any_implicit() -> Self {
        Type::Any(AnyStyle::Implicit)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any(_))
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    /// `X | None`
    pub fn optional(x: Type) -> Self {
        Type::Union(vec![x, Type::None])
    }

    /// Build a union, flattening nested unions and removing duplicates.
    /// A union of nothing is `Never`, a union of one type is that type.
    pub fn union(xs: impl IntoIterator<Item = Type>) -> Self {
        fn flatten(x: Type, res: &mut Vec<Type>) {
            match x {
                Type::Union(xs) => xs.into_iter().for_each(|x| flatten(x, res)),
                Type::Never => {}
                x if res.contains(&x) => {}
                x => res.push(x),
            }
        }
        let mut res = Vec::new();
        xs.into_iter().for_each(|x| flatten(x, &mut res));
        match res.len() {
            0 => Type::Never,
            1 => res.pop().unwrap_or(Type::Never),
            _ => Type::Union(res),
        }
    }

    pub fn type_alias(name: &str, ty: Type) -> Self {
        Type::TypeAlias(Box::new(TypeAlias::new(name, ty)))
    }

    /// Expand aliases until the outermost constructor is not an alias, including inside unions.
    pub fn proper(&self) -> Type {
        match self {
            Type::TypeAlias(ta) => ta.as_type().proper(),
            Type::Union(xs) => Type::union(xs.iter().map(|x| x.proper())),
            _ => self.clone(),
        }
    }

    pub fn as_class_type(&self) -> Option<&ClassType> {
        match self {
            Type::ClassType(cls) => Some(cls),
            _ => None,
        }
    }
}
