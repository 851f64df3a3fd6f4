/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::io;
use std::io::Write;

use itertools::Itertools;
use starlark_map::small_map::SmallMap;
use text_size::TextRange;
use vec1::Vec1;
use yansi::Paint;

use crate::error::kind::ErrorKind;
use crate::error::kind::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    range: TextRange,
    error_kind: ErrorKind,
    severity: Severity,
    /// First line of the error message
    msg_header: Box<str>,
    /// The rest of the error message after the first line.
    /// Note that this is formatted for pretty-printing, with a newline at the
    /// beginning and two spaces after every newline.
    msg_details: Option<Box<str>>,
}

impl Ord for Error {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.range.start(), self.range.end())
            .cmp(&(other.range.start(), other.range.end()))
            .then_with(|| self.error_kind.cmp(&other.error_kind))
            .then_with(|| self.msg_header.cmp(&other.msg_header))
            .then_with(|| self.msg_details.cmp(&other.msg_details))
            .then_with(|| self.severity.cmp(&other.severity))
    }
}

impl PartialOrd for Error {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?}: {} [{}]{}",
            self.severity.label(),
            self.range,
            self.msg_header,
            self.error_kind.to_name(),
            self.msg_details(),
        )
    }
}

impl Error {
    pub fn new(range: TextRange, msg: Vec1<String>, error_kind: ErrorKind) -> Self {
        let (msg_header, rest) = msg.split_off_first();
        let msg_details = if rest.is_empty() {
            None
        } else {
            Some(rest.iter().map(|s| format!("\n  {s}")).join("").into_boxed_str())
        };
        Self {
            range,
            error_kind,
            severity: error_kind.default_severity(),
            msg_header: msg_header.into_boxed_str(),
            msg_details,
        }
    }

    pub fn write_line(&self, mut f: impl Write) -> io::Result<()> {
        writeln!(f, "{self}")
    }

    /// Like `write_line`, with ANSI colours.
    pub fn write_colors(&self, mut f: impl Write) -> io::Result<()> {
        writeln!(
            f,
            "{} {}: {} {}{}",
            self.severity.painted(),
            Paint::dim(&format!("{:?}", self.range)),
            Paint::new(&*self.msg_header),
            Paint::dim(format!("[{}]", self.error_kind.to_name()).as_str()),
            Paint::new(self.msg_details()),
        )
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    fn msg_details(&self) -> &str {
        self.msg_details.as_ref().map_or("", |s| s)
    }

    pub fn msg_header(&self) -> &str {
        &self.msg_header
    }

    pub fn msg(&self) -> String {
        format!("{}{}", self.msg_header, self.msg_details())
    }

    pub fn error_kind(&self) -> ErrorKind {
        self.error_kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

fn count_error_kinds(errors: &[Error]) -> Vec<(ErrorKind, usize)> {
    let mut map = SmallMap::new();
    for err in errors {
        *map.entry(err.error_kind()).or_default() += 1;
    }
    let mut res = map.into_iter().collect::<Vec<_>>();
    res.sort_by_key(|x| x.1);
    res
}

/// Write the most common error kinds, most frequent last.
pub fn write_error_counts(errors: &[Error], limit: usize, mut f: impl Write) -> io::Result<()> {
    let items = count_error_kinds(errors);
    for (error, count) in items.iter().rev().take(limit).rev() {
        writeln!(f, "{count} instances of {}", error.to_name())?;
    }
    Ok(())
}
