//! @acp:module "Lenient Scalars"
//! @acp:summary "Scalar decoding that keeps version text and YAML 1.1 flags"
//! @acp:domain cli
//! @acp:layer io

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Deserialize a string field from the scalar's source text.
///
/// serde_yaml hands `deserialize_str` the text as written, so an unquoted
/// `1.10` stays `1.10` instead of passing through a float. A plain null
/// (`~`, `null`) decodes to the empty string. JSON documents must quote
/// these values.
pub(crate) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a scalar")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            match v {
                "~" | "null" | "Null" | "NULL" => Ok(String::new()),
                _ => Ok(v.to_string()),
            }
        }
    }

    deserializer.deserialize_str(TextVisitor)
}

/// Deserialize an inclusion flag.
///
/// Release files written for YAML 1.1 tooling use `yes`/`no`/`on`/`off`;
/// serde_yaml only resolves `true`/`false`, so the other spellings arrive as
/// strings and are mapped here. A null flag is `false`.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false, yes/no, on/off)")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v {
                "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True"
                | "TRUE" => Ok(true),
                "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False"
                | "FALSE" => Ok(false),
                _ => Err(de::Error::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
