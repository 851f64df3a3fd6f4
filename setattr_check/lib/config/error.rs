/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::error::kind::ErrorKind;
use crate::error::kind::Severity;

/// Represents overrides for errors to emit when collecting/printing errors.
/// Not all error kinds are required to be defined in this map. Any that are missing
/// will use the default severity associated with that error kind.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct ErrorDisplayConfig(HashMap<ErrorKind, Severity>);

impl ErrorDisplayConfig {
    pub fn new(config: HashMap<ErrorKind, Severity>) -> Self {
        Self(config)
    }

    /// Gets the severity for the given `ErrorKind`. If the value isn't
    /// found, then assume it should be the default for that error kind.
    pub fn severity(&self, kind: ErrorKind) -> Severity {
        self.0
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_severity())
    }

    pub fn is_enabled(&self, kind: ErrorKind) -> bool {
        self.severity(kind).is_enabled()
    }

    pub fn with_error_setting(&mut self, kind: ErrorKind, severity: Severity) {
        self.0.insert(kind, severity);
    }
}

impl<'de> Deserialize<'de> for ErrorDisplayConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ErrorDisplayConfigVisitor;

        impl<'de> Visitor<'de> for ErrorDisplayConfigVisitor {
            type Value = ErrorDisplayConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of error kinds to severity level")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut config = HashMap::new();

                while let Some(key) = map.next_key::<ErrorKind>()? {
                    let severity = match map.next_value::<serde_json::Value>()? {
                        serde_json::Value::Bool(false) => Severity::Ignore,
                        serde_json::Value::Bool(true) => key.default_severity(),
                        serde_json::Value::String(s) => {
                            serde_json::from_value::<Severity>(serde_json::Value::String(s))
                                .map_err(serde::de::Error::custom)?
                        }
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "expected string or boolean, found {other}"
                            )));
                        }
                    };
                    config.insert(key, severity);
                }

                Ok(ErrorDisplayConfig::new(config))
            }
        }

        deserializer.deserialize_map(ErrorDisplayConfigVisitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_bools_and_strings() {
        let config: ErrorDisplayConfig = serde_json::from_str(
            r#"{"missing-attribute": false, "bad-assignment": "warn", "non-data-attribute": true}"#,
        )
        .unwrap();
        assert_eq!(config.severity(ErrorKind::MissingAttribute), Severity::Ignore);
        assert_eq!(config.severity(ErrorKind::BadAssignment), Severity::Warn);
        assert_eq!(config.severity(ErrorKind::NonDataAttribute), Severity::Error);
        assert_eq!(config.severity(ErrorKind::BadArgumentCount), Severity::Error);
        assert!(!config.is_enabled(ErrorKind::MissingAttribute));
        assert!(config.is_enabled(ErrorKind::BadAssignment));
    }

    #[test]
    fn test_deserialize_rejects_numbers() {
        let err = serde_json::from_str::<ErrorDisplayConfig>(r#"{"bad-assignment": 1}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("expected string or boolean"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        assert!(serde_json::from_str::<ErrorDisplayConfig>(r#"{"not-a-kind": true}"#).is_err());
    }

    #[test]
    fn test_with_error_setting() {
        let mut config = ErrorDisplayConfig::default();
        config.with_error_setting(ErrorKind::UnknownAttributeType, Severity::Info);
        assert_eq!(
            config.severity(ErrorKind::UnknownAttributeType),
            Severity::Info
        );
    }
}
