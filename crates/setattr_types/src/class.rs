/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use dupe::Dupe;
use setattr_util::display::commas_iter;
use starlark_map::small_map::SmallMap;

use crate::mro::ClassMro;
use crate::mro::MroError;
use crate::types::Type;

/// The fully-qualified name of a class, e.g. `builtins.int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    module: Box<str>,
    name: Box<str>,
}

impl QName {
    pub fn new(module: &str, name: &str) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.module, self.name)
        }
    }
}

/// What a name in a class body is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSymbol<T> {
    /// A variable, annotated or inferred. `None` when no type could be determined.
    Variable(Option<T>),
    /// A `def`, including properties, overloads and static/class methods.
    Function,
    /// A class defined inside the class body.
    NestedClass,
}

impl<T> AttributeSymbol<T> {
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
}

/// The name of a nominal type, e.g. `str`, together with everything declared in its body.
#[derive(Clone, Dupe)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    qname: QName,
    tparams: Vec<Box<str>>,
    bases: Vec<ClassType>,
    mro: ClassMro,
    fields: SmallMap<Box<str>, AttributeSymbol<Type>>,
}

impl Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("qname", &self.0.qname)
            .field("tparams", &self.0.tparams)
            .field("fields", &self.0.fields.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.qname)
    }
}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.qname.hash(state)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.0.qname == other.0.qname
    }
}

impl Eq for Class {}

impl Ord for Class {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.qname.cmp(&other.0.qname)
    }
}

impl PartialOrd for Class {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Class {
    pub fn qname(&self) -> &QName {
        &self.0.qname
    }

    pub fn name(&self) -> &str {
        self.0.qname.name()
    }

    pub fn tparams(&self) -> &[Box<str>] {
        &self.0.tparams
    }

    pub fn bases(&self) -> &[ClassType] {
        &self.0.bases
    }

    /// Ancestors in method resolution order, not including the class itself.
    pub fn mro(&self) -> &ClassMro {
        &self.0.mro
    }

    /// Members declared directly in this class body.
    pub fn get_field(&self, name: &str) -> Option<&AttributeSymbol<Type>> {
        self.0.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &AttributeSymbol<Type>)> {
        self.0.fields.iter().map(|(k, v)| (&**k, v))
    }

    /// Whether `self` is `other` or inherits from it.
    pub fn has_ancestor(&self, other: &Class) -> bool {
        self == other || self.mro().find(other).is_some()
    }
}

/// Incrementally describes a class body, then linearizes its bases.
#[derive(Debug)]
pub struct ClassBuilder {
    qname: QName,
    tparams: Vec<Box<str>>,
    bases: Vec<ClassType>,
    fields: SmallMap<Box<str>, AttributeSymbol<Type>>,
}

impl ClassBuilder {
    pub fn new(module: &str, name: &str) -> Self {
        Self {
            qname: QName::new(module, name),
            tparams: Vec::new(),
            bases: Vec::new(),
            fields: SmallMap::new(),
        }
    }

    pub fn tparam(mut self, name: &str) -> Self {
        self.tparams.push(name.into());
        self
    }

    pub fn base(mut self, base: ClassType) -> Self {
        self.bases.push(base);
        self
    }

    pub fn bases(mut self, bases: impl IntoIterator<Item = ClassType>) -> Self {
        self.bases.extend(bases);
        self
    }

    /// A later declaration of the same name replaces an earlier one, as it does in a class body.
    pub fn member(mut self, name: &str, symbol: AttributeSymbol<Type>) -> Self {
        self.fields.insert(name.into(), symbol);
        self
    }

    pub fn field(self, name: &str, ty: Type) -> Self {
        self.member(name, AttributeSymbol::Variable(Some(ty)))
    }

    pub fn untyped_field(self, name: &str) -> Self {
        self.member(name, AttributeSymbol::Variable(None))
    }

    pub fn method(self, name: &str) -> Self {
        self.member(name, AttributeSymbol::Function)
    }

    pub fn nested_class(self, name: &str) -> Self {
        self.member(name, AttributeSymbol::NestedClass)
    }

    pub fn build(self) -> Result<Class, MroError> {
        let mro = ClassMro::new(&self.qname, &self.bases)?;
        Ok(self.finish(mro))
    }

    /// Build a class whose bases are known to form a single chain, e.g. the builtins.
    pub(crate) fn build_linear(self) -> Class {
        let mro = match self.bases.first() {
            Some(base) => ClassMro::from_single_base(base),
            None => ClassMro::empty(),
        };
        self.finish(mro)
    }

    fn finish(self, mro: ClassMro) -> Class {
        Class(Arc::new(ClassInner {
            qname: self.qname,
            tparams: self.tparams,
            bases: self.bases,
            mro,
            fields: self.fields,
        }))
    }
}

/// A class applied to type arguments, i.e. the type of an instance.
/// If the class is not generic, the arguments are empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassType {
    class: Class,
    targs: Vec<Type>,
}

impl Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)?;
        if !self.targs.is_empty() {
            write!(f, "[{}]", commas_iter(|| &self.targs))?;
        }
        Ok(())
    }
}

impl ClassType {
    pub fn new(class: Class, targs: Vec<Type>) -> Self {
        Self { class, targs }
    }

    pub fn class_object(&self) -> &Class {
        &self.class
    }

    pub fn targs(&self) -> &[Type] {
        &self.targs
    }

    pub fn qname(&self) -> &QName {
        self.class.qname()
    }

    pub fn name(&self) -> &str {
        self.class.name()
    }

    pub fn to_type(&self) -> Type {
        Type::ClassType(self.clone())
    }
}
