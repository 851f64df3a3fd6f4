/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Helpers for `Display` implementations.

use std::fmt;
use std::fmt::Display;

/// Displays the items of an iterator separated by `sep`, without allocating.
/// The closure is called again every time the value is formatted.
pub struct SeparatedIter<'s, F> {
    sep: &'s str,
    items: F,
}

impl<'s, F, I, T> Display for SeparatedIter<'s, F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = T>,
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in (self.items)().into_iter().enumerate() {
            if i != 0 {
                f.write_str(self.sep)?;
            }
            write!(f, "{x}")?;
        }
        Ok(())
    }
}

/// `a, b, c`
pub fn commas_iter<F, I, T>(items: F) -> SeparatedIter<'static, F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = T>,
    T: Display,
{
    SeparatedIter { sep: ", ", items }
}

/// `a | b | c`
pub fn pipes_iter<F, I, T>(items: F) -> SeparatedIter<'static, F>
where
    F: Fn() -> I,
    I: IntoIterator<Item = T>,
    T: Display,
{
    SeparatedIter { sep: " | ", items }
}
