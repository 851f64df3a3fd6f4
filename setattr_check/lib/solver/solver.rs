/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use setattr_types::class::Class;
use setattr_types::stdlib::Stdlib;
use setattr_types::types::Type;
use tracing::trace;

use crate::expr::Expr;
use crate::host::AttributeSymbol;
use crate::host::NominalType;
use crate::host::TypeHost;
use crate::solver::subset::Subset;

impl NominalType for Class {
    type Type = Type;

    fn name(&self) -> &str {
        Class::name(self)
    }

    fn qualified_name(&self) -> String {
        self.qname().to_string()
    }

    fn get_member(&self, name: &str) -> Option<&AttributeSymbol<Type>> {
        self.get_field(name)
    }

    fn ancestors(&self) -> impl Iterator<Item = &Class> {
        self.mro()
            .ancestors()
            .iter()
            .map(|ancestor| ancestor.class_object())
    }
}

#[derive(Debug, Clone)]
pub struct Solver {
    stdlib: Stdlib,
}

impl Solver {
    pub fn new(stdlib: Stdlib) -> Self {
        Self { stdlib }
    }

    pub fn stdlib(&self) -> &Stdlib {
        &self.stdlib
    }

    pub fn subset(&self) -> Subset<'_> {
        Subset::new(&self.stdlib)
    }
}

impl TypeHost for Solver {
    type Type = Type;
    type Class = Class;
    type Expr = Expr;

    fn as_instance(&self, ty: &Type) -> Option<Class> {
        match ty.proper() {
            Type::ClassType(cls) => Some(cls.class_object().clone()),
            _ => None,
        }
    }

    fn as_str_literal<'e>(&self, expr: &'e Expr) -> Option<&'e str> {
        expr.as_string_literal()
    }

    fn proper_type(&self, ty: &Type) -> Type {
        ty.proper()
    }

    fn is_subset_eq(&self, got: &Type, want: &Type) -> bool {
        match self.subset().is_subset_eq(got, want) {
            Ok(()) => true,
            Err(e) => {
                trace!("`{got}` is not assignable to `{want}`: {e:?}");
                false
            }
        }
    }
}
