/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;

use setattr_util::lock::Mutex;
use text_size::TextRange;
use vec1::vec1;

use crate::config::error::ErrorDisplayConfig;
use crate::error::error::Error;
use crate::error::kind::ErrorKind;
use crate::host::ErrorSink;

#[derive(Debug, Default, Clone)]
struct CallErrors {
    /// Set to `true` when we have no duplicates and are sorted.
    clean: bool,
    items: Vec<Error>,
}

impl CallErrors {
    fn push(&mut self, err: Error) {
        self.clean = false;
        self.items.push(err);
    }

    fn extend(&mut self, errs: CallErrors) {
        self.clean = false;
        self.items.extend(errs.items);
    }

    fn cleanup(&mut self) {
        if self.clean {
            return;
        }
        self.clean = true;
        self.items.sort();
        self.items.dedup();
    }

    fn is_empty(&self) -> bool {
        // No need to do cleanup if it's empty.
        self.items.is_empty()
    }

    fn len(&mut self) -> usize {
        self.cleanup();
        self.items.len()
    }

    fn iter(&mut self) -> impl ExactSizeIterator<Item = &Error> {
        self.cleanup();
        self.items.iter()
    }
}

#[derive(Debug, Default)]
pub struct CollectedErrors {
    /// Errors that will be reported to the user.
    pub shown: Vec<Error>,
    /// Errors that are disabled with configuration options.
    pub disabled: Vec<Error>,
}

/// Collects the diagnostics produced by the hooks during one pass.
// Deliberately don't implement Clone,
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Mutex<CallErrors>,
}

impl Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in self.errors.lock().iter() {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl ErrorSink for ErrorCollector {
    fn add(&self, range: TextRange, msg: String, kind: ErrorKind) {
        self.errors.lock().push(Error::new(range, vec1![msg], kind));
    }
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&self, other: ErrorCollector) {
        self.errors.lock().extend(other.errors.into_inner());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    /// All errors, sorted and deduplicated, ignoring configuration.
    pub fn errors(&self) -> Vec<Error> {
        self.errors.lock().iter().cloned().collect()
    }

    pub fn collect_into(&self, display_config: &ErrorDisplayConfig, result: &mut CollectedErrors) {
        let mut errors = self.errors.lock();
        for err in errors.iter() {
            let severity = display_config.severity(err.error_kind());
            if severity.is_enabled() {
                result.shown.push(err.clone().with_severity(severity));
            } else {
                result.disabled.push(err.clone());
            }
        }
    }

    pub fn collect(&self, display_config: &ErrorDisplayConfig) -> CollectedErrors {
        let mut result = CollectedErrors::default();
        self.collect_into(display_config, &mut result);
        result
    }
}
