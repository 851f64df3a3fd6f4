/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

#![warn(clippy::all)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::module_inception)]
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::new_without_default)]
#![allow(clippy::type_complexity)]
#![deny(clippy::cloned_instead_of_copied)]
#![deny(clippy::derive_partial_eq_without_eq)]
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::str_to_string)]
#![deny(clippy::string_to_string)]
#![deny(clippy::trivially_copy_pass_by_ref)]

//! Checks `setattr(obj, "name", value)` and `object.__setattr__(obj, "name", value)`
//! calls whose attribute name is a string literal, as if they were
//! `obj.name = value`.
//!
//! A host type checker registers the hooks returned by [`plugin::plugin`] and
//! describes its types through [`host::TypeHost`]. The [`solver`] module is a
//! small host of our own, used by the tests.

pub mod call_shape;
pub mod config;
pub mod error;
pub mod expr;
pub mod host;
pub mod plugin;
pub mod render;
pub mod resolve;
pub mod solver;
mod test;
pub mod validate;
