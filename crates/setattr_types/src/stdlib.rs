/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The handful of `builtins` classes the checker needs to know about.

use crate::class::Class;
use crate::class::ClassBuilder;
use crate::class::ClassType;
use crate::types::Type;

const BUILTINS: &str = "builtins";

#[derive(Debug, Clone)]
pub struct Stdlib {
    object: ClassType,
    int: ClassType,
    float: ClassType,
    bool: ClassType,
    str: ClassType,
    bytes: ClassType,
    list: Class,
}

impl Stdlib {
    pub fn new() -> Self {
        let object = ClassType::new(
            ClassBuilder::new(BUILTINS, "object")
                .method("__init__")
                .method("__setattr__")
                .method("__delattr__")
                .method("__eq__")
                .method("__hash__")
                .method("__repr__")
                .method("__class__")
                .build_linear(),
            Vec::new(),
        );
        let builtin = |name: &str, base: &ClassType| {
            ClassType::new(
                ClassBuilder::new(BUILTINS, name)
                    .base(base.clone())
                    .build_linear(),
                Vec::new(),
            )
        };
        let int = builtin("int", &object);
        let float = builtin("float", &object);
        let bool = builtin("bool", &int);
        let str = builtin("str", &object);
        let bytes = builtin("bytes", &object);
        let list = ClassBuilder::new(BUILTINS, "list")
            .tparam("T")
            .base(object.clone())
            .method("append")
            .build_linear();
        Self {
            object,
            int,
            float,
            bool,
            str,
            bytes,
            list,
        }
    }

    pub fn object(&self) -> &ClassType {
        &self.object
    }

    pub fn int(&self) -> &ClassType {
        &self.int
    }

    pub fn float(&self) -> &ClassType {
        &self.float
    }

    pub fn bool(&self) -> &ClassType {
        &self.bool
    }

    pub fn str(&self) -> &ClassType {
        &self.str
    }

    pub fn bytes(&self) -> &ClassType {
        &self.bytes
    }

    pub fn list(&self, x: Type) -> ClassType {
        ClassType::new(self.list.clone(), vec![x])
    }
}
