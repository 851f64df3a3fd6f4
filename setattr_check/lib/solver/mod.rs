/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A reference host, implementing the checker's view of types over `setattr_types`.

pub mod solver;
pub mod subset;
