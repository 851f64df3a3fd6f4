/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Attribute lookup across a class hierarchy.

use std::iter;

use crate::host::AttributeSymbol;
use crate::host::NominalType;

/// A successful lookup: the symbol and the class whose body declares it.
#[derive(Debug)]
pub struct FoundAttribute<'c, C: NominalType> {
    pub owner: &'c C,
    pub symbol: &'c AttributeSymbol<C::Type>,
}

/// Find `name` on `cls`, checking the class itself and then each ancestor in
/// method resolution order. The first declaration wins, so a subclass shadows
/// its bases and an earlier base shadows a later one.
pub fn lookup<'c, C: NominalType>(cls: &'c C, name: &str) -> Option<FoundAttribute<'c, C>> {
    iter::once(cls)
        .chain(cls.ancestors())
        .find_map(|owner| {
            owner
                .get_member(name)
                .map(|symbol| FoundAttribute { owner, symbol })
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use setattr_types::class::Class;
    use setattr_types::class::ClassBuilder;
    use setattr_types::class::ClassType;
    use setattr_types::stdlib::Stdlib;

    use super::*;

    fn subclass(name: &str, bases: &[&Class]) -> Class {
        ClassBuilder::new("__main__", name)
            .bases(bases.iter().map(|b| ClassType::new((*b).clone(), Vec::new())))
            .build()
            .unwrap()
    }

    #[test]
    fn test_own_member() {
        let stdlib = Stdlib::new();
        let user = ClassBuilder::new("__main__", "User")
            .base(stdlib.object().clone())
            .field("name", stdlib.str().to_type())
            .build()
            .unwrap();
        let found = lookup(&user, "name").unwrap();
        assert_eq!(found.owner, &user);
        assert_eq!(
            found.symbol,
            &AttributeSymbol::Variable(Some(stdlib.str().to_type()))
        );
    }

    #[test]
    fn test_walks_mro() {
        let stdlib = Stdlib::new();
        let base = ClassBuilder::new("__main__", "Base")
            .base(stdlib.object().clone())
            .field("created_at", stdlib.int().to_type())
            .build()
            .unwrap();
        let user = subclass("User", &[&base]);
        assert_eq!(lookup(&user, "created_at").unwrap().owner, &base);
    }

    #[test]
    fn test_second_base() {
        let stdlib = Stdlib::new();
        let named = ClassBuilder::new("__main__", "Named")
            .base(stdlib.object().clone())
            .field("name", stdlib.str().to_type())
            .build()
            .unwrap();
        let timestamped = ClassBuilder::new("__main__", "Timestamped")
            .base(stdlib.object().clone())
            .field("created_at", stdlib.int().to_type())
            .build()
            .unwrap();
        let user = subclass("User", &[&named, &timestamped]);
        assert_eq!(lookup(&user, "created_at").unwrap().owner, &timestamped);
        assert_eq!(lookup(&user, "name").unwrap().owner, &named);
    }

    #[test]
    fn test_first_match_wins() {
        let stdlib = Stdlib::new();
        let first = ClassBuilder::new("__main__", "First")
            .base(stdlib.object().clone())
            .field("x", stdlib.int().to_type())
            .build()
            .unwrap();
        let second = ClassBuilder::new("__main__", "Second")
            .base(stdlib.object().clone())
            .method("x")
            .build()
            .unwrap();
        let both = subclass("Both", &[&first, &second]);
        let found = lookup(&both, "x").unwrap();
        assert_eq!(found.owner, &first);
        assert!(found.symbol.is_variable());

        let shadowing = ClassBuilder::new("__main__", "Shadowing")
            .base(ClassType::new(both, Vec::new()))
            .method("x")
            .build()
            .unwrap();
        assert_eq!(lookup(&shadowing, "x").unwrap().symbol, &AttributeSymbol::Function);
    }

    #[test]
    fn test_finds_object_members() {
        let stdlib = Stdlib::new();
        let user = subclass("User", &[stdlib.object().class_object()]);
        let found = lookup(&user, "__init__").unwrap();
        assert_eq!(found.owner, stdlib.object().class_object());
    }

    #[test]
    fn test_missing() {
        let stdlib = Stdlib::new();
        let user = subclass("User", &[stdlib.object().class_object()]);
        assert!(lookup(&user, "missing").is_none());
    }
}
