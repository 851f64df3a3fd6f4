/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt::Display;

use crate::call_shape::Receiver;
use crate::host::NominalType;
use crate::validate::AttributeFailure;

/// How a receiver is named in messages. Some hosts render certain instance
/// types as the empty string, so fall back to the class's fully-qualified
/// name and then its short name.
pub fn display_receiver<T: Display, C: NominalType>(receiver: &Receiver<T, C>) -> String {
    let shown = receiver.ty.to_string();
    if !shown.is_empty() {
        return shown;
    }
    let qualified = receiver.class.qualified_name();
    if !qualified.is_empty() {
        return qualified;
    }
    receiver.class.name().to_owned()
}

impl<'a, T: Display, C: NominalType> AttributeFailure<'a, T, C> {
    pub fn to_error_msg(&self) -> String {
        match self {
            Self::AttributeMissing { name, receiver } => format!(
                "attribute \"{name}\" does not exist on {}",
                display_receiver(receiver)
            ),
            Self::NotADataField { name, receiver } => format!(
                "attribute \"{name}\" on {} is not a data attribute",
                display_receiver(receiver)
            ),
            Self::FieldTypeUnknown { name, receiver } => format!(
                "attribute \"{name}\" on {} has no inferred type",
                display_receiver(receiver)
            ),
            Self::TypeMismatch {
                name,
                receiver,
                expected,
                actual,
            } => format!(
                "value of type \"{actual}\" is not assignable to attribute \"{name}\" on {}; expected \"{expected}\"",
                display_receiver(receiver)
            ),
        }
    }
}
