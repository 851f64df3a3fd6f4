/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Drive the hooks the way a host would: build some classes, describe a
//! call's arguments, and collect whatever the hook reports.

use setattr_types::class::ClassBuilder;
use setattr_types::class::ClassType;
use setattr_types::literal::Lit;
use setattr_types::stdlib::Stdlib;
use setattr_types::types::Type;
use setattr_util::trace::init_tracing;
use text_size::TextRange;
use text_size::TextSize;

use crate::config::config::SetattrConfig;
use crate::error::collector::ErrorCollector;
use crate::error::error::Error;
use crate::error::kind::ErrorKind;
use crate::expr::Expr;
use crate::host::CallContext;
use crate::plugin::CallHook;
use crate::plugin::HookStyle;
use crate::plugin::InterceptedCall;
use crate::plugin::Plugin;
use crate::plugin::SetattrPlugin;
use crate::solver::solver::Solver;

/// Define a test that runs once through `setattr` and once through `object.__setattr__`.
#[macro_export]
macro_rules! setattr_test {
    ($name:ident, |$env:ident, $call:ident| $body:block) => {
        mod $name {
            #[allow(unused_imports)]
            use pretty_assertions::assert_eq;

            use super::*;

            fn run(
                $env: $crate::test::util::TestEnv,
                $call: $crate::plugin::InterceptedCall,
            ) -> anyhow::Result<()> {
                $body
                Ok(())
            }

            #[test]
            fn setattr() -> anyhow::Result<()> {
                $crate::test::util::init_test();
                run(
                    $crate::test::util::TestEnv::new(),
                    $crate::plugin::InterceptedCall::Setattr,
                )
            }

            #[test]
            fn object_setattr() -> anyhow::Result<()> {
                $crate::test::util::init_test();
                run(
                    $crate::test::util::TestEnv::new(),
                    $crate::plugin::InterceptedCall::ObjectSetattr,
                )
            }
        }
    };
}

pub fn init_test() {
    init_tracing(true, true);
}

/// Where every call under test sits in its imaginary source file.
pub fn call_range() -> TextRange {
    TextRange::new(TextSize::from(10), TextSize::from(42))
}

/// One argument: the expression the user wrote and the type the host inferred for it.
#[derive(Debug, Clone)]
pub struct Arg {
    pub expr: Expr,
    pub ty: Type,
}

impl Arg {
    pub fn var(id: &str, ty: Type) -> Self {
        Self {
            expr: Expr::Name {
                id: id.into(),
                range: TextRange::default(),
            },
            ty,
        }
    }

    pub fn str(value: &str) -> Self {
        Self {
            expr: Expr::StringLiteral {
                value: value.into(),
                range: TextRange::default(),
            },
            ty: Lit::str(value).to_type(),
        }
    }

    pub fn int(value: i64) -> Self {
        Self {
            expr: Expr::IntLiteral {
                value,
                range: TextRange::default(),
            },
            ty: Lit::Int(value).to_type(),
        }
    }

    pub fn none() -> Self {
        Self {
            expr: Expr::NoneLiteral {
                range: TextRange::default(),
            },
            ty: Type::None,
        }
    }
}

/// What a hook did with one call.
#[derive(Debug)]
pub struct CallResult {
    pub return_type: Type,
    /// Errors that survive the configured severities.
    pub shown: Vec<Error>,
    pub disabled: Vec<Error>,
}

impl CallResult {
    pub fn messages(&self) -> Vec<&str> {
        self.shown.iter().map(|e| e.msg_header()).collect()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.shown.iter().map(|e| e.error_kind()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.shown.is_empty() && self.disabled.is_empty()
    }

    /// The single shown error, failing if there are none or several.
    pub fn only_error(&self) -> anyhow::Result<&Error> {
        match self.shown.as_slice() {
            [err] => Ok(err),
            errs => Err(anyhow::anyhow!(
                "Expected exactly one error, got {}: {errs:?}",
                errs.len()
            )),
        }
    }
}

pub struct TestEnv {
    solver: Solver,
    config: SetattrConfig,
    plugin: Box<dyn Plugin<Solver>>,
    /// What the host would have inferred for every call, handed to the hooks as is.
    default_return_type: Type,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(SetattrConfig::default())
    }

    pub fn with_config(config: SetattrConfig) -> Self {
        Self {
            solver: Solver::new(Stdlib::new()),
            plugin: Box::new(SetattrPlugin::<Solver>::new(&config)),
            config,
            default_return_type: Type::None,
        }
    }

    pub fn with_return_type(mut self, ty: Type) -> Self {
        self.default_return_type = ty;
        self
    }

    /// Whether the host would find a hook for `call`.
    pub fn has_hook(&self, call: InterceptedCall) -> bool {
        self.hook(call).is_some()
    }

    fn hook(&self, call: InterceptedCall) -> Option<CallHook<Solver>> {
        let fullname = call.fullname();
        match call.style() {
            HookStyle::Function => self.plugin.get_function_hook(&fullname),
            HookStyle::Method => self.plugin.get_method_hook(&fullname),
        }
    }

    pub fn stdlib(&self) -> &Stdlib {
        self.solver.stdlib()
    }

    pub fn str(&self) -> Type {
        self.stdlib().str().to_type()
    }

    pub fn int(&self) -> Type {
        self.stdlib().int().to_type()
    }

    /// Define a class in `__main__`. With no bases, the class inherits from `object`.
    pub fn class(
        &self,
        name: &str,
        bases: &[&ClassType],
        body: impl FnOnce(ClassBuilder) -> ClassBuilder,
    ) -> anyhow::Result<ClassType> {
        let builder = ClassBuilder::new("__main__", name);
        let builder = if bases.is_empty() {
            builder.base(self.stdlib().object().clone())
        } else {
            builder.bases(bases.iter().map(|base| (*base).clone()))
        };
        Ok(ClassType::new(body(builder).build()?, Vec::new()))
    }

    /// An argument referring to an instance of `cls`.
    pub fn instance(&self, cls: &ClassType) -> Arg {
        Arg::var(&cls.name().to_lowercase(), cls.to_type())
    }

    /// Call `call` with one expression per argument.
    pub fn call(&self, call: InterceptedCall, args: &[Arg]) -> CallResult {
        let groups = args.iter().map(|arg| vec![arg.clone()]).collect::<Vec<_>>();
        self.call_grouped(call, &groups)
    }

    /// Call `call` with the arguments already matched to parameters, e.g. several
    /// expressions for a `*args` parameter.
    pub fn call_grouped(&self, call: InterceptedCall, groups: &[Vec<Arg>]) -> CallResult {
        let args = groups
            .iter()
            .map(|group| group.iter().map(|arg| arg.expr.clone()).collect())
            .collect::<Vec<Vec<_>>>();
        let arg_types = groups
            .iter()
            .map(|group| group.iter().map(|arg| arg.ty.clone()).collect())
            .collect::<Vec<Vec<_>>>();
        let errors = ErrorCollector::new();
        let return_type = match self.hook(call) {
            Some(hook) => hook(
                &self.solver,
                &CallContext {
                    default_return_type: &self.default_return_type,
                    args: &args,
                    arg_types: &arg_types,
                    range: call_range(),
                    errors: &errors,
                },
            ),
            None => self.default_return_type.clone(),
        };
        let collected = errors.collect(&self.config.errors);
        CallResult {
            return_type,
            shown: collected.shown,
            disabled: collected.disabled,
        }
    }
}
