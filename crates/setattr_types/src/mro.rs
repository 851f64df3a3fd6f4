/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::fmt::Display;

use setattr_util::display::commas_iter;
use vec1::Vec1;

use crate::class::Class;
use crate::class::ClassType;
use crate::class::QName;

/// The ancestors of a class in method resolution order (MRO), not including
/// the class itself, which should be considered implicitly at the front.
///
/// Python uses the C3 linearization algorithm to compute MRO. You can read
/// about the algorithm and a worked-through example here:
/// https://en.wikipedia.org/wiki/C3_linearization
///
/// `object` is the last entry whenever some base inherits from it. Bases are
/// never added implicitly, so a class built with no bases has an empty MRO.
#[derive(Debug, Clone, Default)]
pub struct ClassMro(Vec<ClassType>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MroError {
    #[error("Class `{class}` inheriting from `{base}` creates a cycle")]
    Cyclic { class: QName, base: QName },
    #[error("Class `{class}` lists base `{base}` more than once")]
    DuplicateBase { class: QName, base: QName },
    #[error("Class `{class}` has a nonlinearizable inheritance chain detected at `{at}`")]
    Nonlinearizable { class: QName, at: QName },
}

impl Display for ClassMro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", commas_iter(|| &self.0))
    }
}

impl ClassMro {
    pub fn new(qname: &QName, bases: &[ClassType]) -> Result<Self, MroError> {
        let chains = Linearization::new(qname, bases)?;
        Ok(Self(Linearization::merge(qname, chains)?))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_single_base(base: &ClassType) -> Self {
        let mut ancestors = Vec::with_capacity(base.class_object().mro().len() + 1);
        ancestors.push(base.clone());
        ancestors.extend(base.class_object().mro().ancestors().iter().cloned());
        Self(ancestors)
    }

    pub fn ancestors(&self) -> &[ClassType] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The ancestor instantiation of `cls`, if `cls` is an ancestor.
    pub fn find(&self, cls: &Class) -> Option<&ClassType> {
        self.0.iter().find(|ancestor| ancestor.class_object() == cls)
    }
}

/// Represents one linearized "chain" of ancestors in the C3 linearization algorithm, which involves
/// building a series of linearized chains and then merging them. Each chain is one of:
/// - The MRO for a base class of the current class, or
/// - The list of direct base classes, in the order defined
///
/// All chains are represented in reverse order because that allows the merge step to be pop()-based,
/// and we use Vec1 so that we can automatically drop a chain once it's empty as the merge progresses.
struct AncestorChain(Vec1<ClassType>);

impl AncestorChain {
    fn from_base_and_ancestors(base: ClassType, base_ancestors: Vec<ClassType>) -> Self {
        AncestorChain(Vec1::from_vec_push(base_ancestors, base))
    }
}

struct Linearization;

impl Linearization {
    /// The linearize stage of C3, the `L(...)` function.
    ///
    /// The output is a series of AncestorChains:
    /// - One for each base class's MRO, in the order that base classes are defined
    /// - One consisting of the base classes themselves in the order defined.
    fn new(qname: &QName, bases: &[ClassType]) -> Result<Vec<AncestorChain>, MroError> {
        for (i, base) in bases.iter().enumerate() {
            if base.qname() == qname
                || base
                    .class_object()
                    .mro()
                    .ancestors()
                    .iter()
                    .any(|ancestor| ancestor.qname() == qname)
            {
                return Err(MroError::Cyclic {
                    class: qname.clone(),
                    base: base.qname().clone(),
                });
            }
            if bases[..i].iter().any(|prev| prev.qname() == base.qname()) {
                return Err(MroError::DuplicateBase {
                    class: qname.clone(),
                    base: base.qname().clone(),
                });
            }
        }
        let Ok(reversed_bases) = Vec1::try_from_vec(bases.iter().rev().cloned().collect()) else {
            return Ok(Vec::new());
        };
        let mut ancestor_chains = bases
            .iter()
            .map(|base| {
                let ancestors_through_base = base
                    .class_object()
                    .mro()
                    .ancestors()
                    .iter()
                    .rev()
                    .cloned()
                    .collect();
                AncestorChain::from_base_and_ancestors(base.clone(), ancestors_through_base)
            })
            .collect::<Vec<_>>();
        ancestor_chains.push(AncestorChain(reversed_bases));
        Ok(ancestor_chains)
    }

    /// The `merge` stage of C3.
    ///
    /// The merge rule says we take the first available "head" of a chain (which are represented
    /// as reversed vecs) that is not in the "tail" of any chain, then strip it from all chains.
    fn merge(
        qname: &QName,
        mut ancestor_chains: Vec<AncestorChain>,
    ) -> Result<Vec<ClassType>, MroError> {
        let mut ancestors = Vec::new();
        while !ancestor_chains.is_empty() {
            let selected = ancestor_chains
                .iter()
                .map(|chain| chain.0.last())
                .find(|candidate| {
                    !ancestor_chains.iter().any(|chain| {
                        chain
                            .0
                            .iter()
                            .rev()
                            .skip(1)
                            .any(|class| class.qname() == candidate.qname())
                    })
                })
                .cloned();
            let Some(selected) = selected else {
                return Err(MroError::Nonlinearizable {
                    class: qname.clone(),
                    at: ancestor_chains[0].0.last().qname().clone(),
                });
            };
            // Strip the selected class from all chains. Any empty chain is removed.
            ancestor_chains.retain_mut(|chain| {
                if chain.0.last().qname() == selected.qname() {
                    chain.0.pop().is_ok()
                } else {
                    true
                }
            });
            ancestors.push(selected);
        }
        Ok(ancestors)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::class::ClassBuilder;
    use crate::stdlib::Stdlib;

    fn class(stdlib: &Stdlib, name: &str, bases: &[&Class]) -> Class {
        let builder = ClassBuilder::new("__main__", name);
        let builder = if bases.is_empty() {
            builder.base(stdlib.object().clone())
        } else {
            builder.bases(bases.iter().map(|b| ClassType::new((*b).clone(), Vec::new())))
        };
        builder.build().unwrap()
    }

    fn names(cls: &Class) -> Vec<String> {
        cls.mro()
            .ancestors()
            .iter()
            .map(|x| x.name().to_owned())
            .collect()
    }

    #[test]
    fn test_single_inheritance() {
        let stdlib = Stdlib::new();
        let base = class(&stdlib, "Base", &[]);
        let user = class(&stdlib, "User", &[&base]);
        assert_eq!(names(&user), vec!["Base", "object"]);
    }

    #[test]
    fn test_multiple_inheritance_keeps_base_order() {
        let stdlib = Stdlib::new();
        let named = class(&stdlib, "Named", &[]);
        let timestamped = class(&stdlib, "Timestamped", &[]);
        let user = class(&stdlib, "User", &[&named, &timestamped]);
        assert_eq!(names(&user), vec!["Named", "Timestamped", "object"]);
    }

    #[test]
    fn test_diamond() {
        let stdlib = Stdlib::new();
        let a = class(&stdlib, "A", &[]);
        let b = class(&stdlib, "B", &[&a]);
        let c = class(&stdlib, "C", &[&a]);
        let d = class(&stdlib, "D", &[&b, &c]);
        assert_eq!(names(&d), vec!["B", "C", "A", "object"]);
        assert_eq!(d.mro().to_string(), "[__main__.B, __main__.C, __main__.A, builtins.object]");
    }

    #[test]
    fn test_nonlinearizable() {
        let stdlib = Stdlib::new();
        let x = class(&stdlib, "X", &[]);
        let y = class(&stdlib, "Y", &[]);
        let a = class(&stdlib, "A", &[&x, &y]);
        let b = class(&stdlib, "B", &[&y, &x]);
        let err = ClassBuilder::new("__main__", "C")
            .base(ClassType::new(a, Vec::new()))
            .base(ClassType::new(b, Vec::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, MroError::Nonlinearizable { .. }));
        assert!(err.to_string().contains("nonlinearizable"));
    }

    #[test]
    fn test_duplicate_base() {
        let stdlib = Stdlib::new();
        let a = class(&stdlib, "A", &[]);
        let err = ClassBuilder::new("__main__", "B")
            .base(ClassType::new(a.clone(), Vec::new()))
            .base(ClassType::new(a, Vec::new()))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Class `__main__.B` lists base `__main__.A` more than once"
        );
    }

    #[test]
    fn test_cycle_through_redefinition() {
        let stdlib = Stdlib::new();
        let a = class(&stdlib, "A", &[]);
        let err = ClassBuilder::new("__main__", "A")
            .base(ClassType::new(a, Vec::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, MroError::Cyclic { .. }));
    }

    #[test]
    fn test_no_bases_is_empty() {
        let root = ClassBuilder::new("__main__", "Root").build().unwrap();
        assert!(root.mro().ancestors().is_empty());
        let child = class(&Stdlib::new(), "Child", &[&root]);
        assert_eq!(names(&child), vec!["Root"]);
    }
}
