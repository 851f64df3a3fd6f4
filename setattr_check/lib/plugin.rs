/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Registration of the `setattr` hooks with a host type checker.

use std::fmt;
use std::fmt::Debug;

use dupe::Dupe;
use enum_iterator::Sequence;
use parse_display::Display;
use parse_display::FromStr;
use serde::Deserialize;
use serde::Serialize;
use starlark_map::small_map::SmallMap;
use tracing::debug;
use tracing::trace;

use crate::call_shape::CallShape;
use crate::config::config::SetattrConfig;
use crate::error::kind::ErrorKind;
use crate::host::CallContext;
use crate::host::NominalType;
use crate::host::TypeHost;
use crate::validate::ValidationOutcome;

/// Whether the host should ask for a hook by function or by method name.
#[derive(Debug, Clone, Copy, Dupe, PartialEq, Eq)]
pub enum HookStyle {
    Function,
    Method,
}

/// The calls we check, displayed and configured by their fully-qualified names.
#[derive(Debug, Clone, Copy, Dupe, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Display, FromStr, Sequence, Serialize, Deserialize)]
pub enum InterceptedCall {
    /// `setattr(obj, name, value)`
    #[display("builtins.setattr")]
    #[serde(rename = "builtins.setattr")]
    Setattr,
    /// `object.__setattr__(obj, name, value)`
    #[display("builtins.object.__setattr__")]
    #[serde(rename = "builtins.object.__setattr__")]
    ObjectSetattr,
}

impl InterceptedCall {
    pub fn all() -> Vec<Self> {
        enum_iterator::all::<Self>().collect()
    }

    pub fn fullname(self) -> String {
        self.to_string()
    }

    pub fn from_fullname(fullname: &str) -> Option<Self> {
        fullname.parse().ok()
    }

    pub fn style(self) -> HookStyle {
        match self {
            Self::Setattr => HookStyle::Function,
            Self::ObjectSetattr => HookStyle::Method,
        }
    }
}

/// A hook receives the host and the call, and returns the type of the call expression.
pub type CallHook<H> = fn(&H, &CallContext<'_, H>) -> <H as TypeHost>::Type;

/// The hooks a plugin offers the host, looked up by the callee's fully-qualified name.
pub trait Plugin<H: TypeHost> {
    fn get_function_hook(&self, _fullname: &str) -> Option<CallHook<H>> {
        None
    }

    fn get_method_hook(&self, _fullname: &str) -> Option<CallHook<H>> {
        None
    }
}

pub struct SetattrPlugin<H: TypeHost> {
    hooks: SmallMap<InterceptedCall, CallHook<H>>,
}

impl<H: TypeHost> Debug for SetattrPlugin<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetattrPlugin")
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<H: TypeHost> SetattrPlugin<H> {
    pub fn new(config: &SetattrConfig) -> Self {
        let mut hooks = SmallMap::new();
        for call in enum_iterator::all::<InterceptedCall>() {
            if config.is_enabled(call) {
                hooks.insert(call, setattr_hook::<H> as CallHook<H>);
            }
        }
        Self { hooks }
    }

    fn hook(&self, fullname: &str, style: HookStyle) -> Option<CallHook<H>> {
        let call = InterceptedCall::from_fullname(fullname)?;
        if call.style() != style {
            return None;
        }
        self.hooks.get(&call).copied()
    }
}

impl<H: TypeHost> Plugin<H> for SetattrPlugin<H> {
    fn get_function_hook(&self, fullname: &str) -> Option<CallHook<H>> {
        self.hook(fullname, HookStyle::Function)
    }

    fn get_method_hook(&self, fullname: &str) -> Option<CallHook<H>> {
        self.hook(fullname, HookStyle::Method)
    }
}

/// Entry point for hosts. The version of the host is accepted and ignored.
pub fn plugin<H: TypeHost + 'static>(_version: &str) -> Box<dyn Plugin<H>> {
    Box::new(SetattrPlugin::<H>::new(&SetattrConfig::default()))
}

/// Shared by both intercepted calls. Reports at most one error and always
/// returns the type the host already inferred.
fn setattr_hook<H: TypeHost>(host: &H, ctx: &CallContext<'_, H>) -> H::Type {
    match CallShape::new(ctx.args, ctx.arg_types) {
        Err(e) => {
            debug!("Rejecting call at {:?}: {e}", ctx.range);
            ctx.errors
                .add(ctx.range, e.to_string(), ErrorKind::BadArgumentCount);
        }
        Ok(shape) => match shape.literal_assignment(host) {
            None => trace!(
                "Skipping call at {:?}: name {:?} is not a literal or receiver `{}` is not an instance",
                ctx.range,
                shape.name,
                shape.receiver_type
            ),
            Some(assignment) => {
                let receiver = assignment.receiver.class.qualified_name();
                match assignment.check(host) {
                    ValidationOutcome::Passed => {
                        trace!("Assignment to `{receiver}` at {:?} is well-typed", ctx.range)
                    }
                    ValidationOutcome::Failed(failure) => {
                        debug!(
                            "Assignment to `{}` on `{receiver}` failed: {}",
                            failure.name(),
                            failure.kind()
                        );
                        ctx.errors
                            .add(ctx.range, failure.to_error_msg(), failure.kind());
                    }
                }
            }
        },
    }
    ctx.default_return_type.clone()
}
