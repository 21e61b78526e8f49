use serde::Serialize;
use std::fmt;

use super::ObfuscateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierNamesGenerator {
    /// `_0x` followed by 4 to 6 hex digits.
    Hexadecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringArrayEncoding {
    None,
}

/// Engine configuration, named after the engine's camelCase option keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObfuscatorOptions {
    pub compact: bool,
    pub control_flow_flattening: bool,
    pub dead_code_injection: bool,
    pub debug_protection: bool,
    pub disable_console_output: bool,
    pub identifier_names_generator: IdentifierNamesGenerator,
    pub rename_globals: bool,
    pub self_defending: bool,
    pub simplify: bool,
    pub split_strings: bool,
    pub split_strings_chunk_length: usize,
    pub string_array: bool,
    pub string_array_encoding: StringArrayEncoding,
    pub string_array_threshold: f64,
    pub unicode_escape_sequence: bool,
}

impl ObfuscatorOptions {
    /// Profile used for plain scripts.
    ///
    /// Control-flow flattening and dead code injection stay off to keep
    /// runtime performance unchanged.
    pub fn standard() -> Self {
        Self {
            compact: true,
            control_flow_flattening: false,
            dead_code_injection: false,
            debug_protection: false,
            disable_console_output: false,
            identifier_names_generator: IdentifierNamesGenerator::Hexadecimal,
            rename_globals: false,
            self_defending: false,
            simplify: true,
            split_strings: false,
            split_strings_chunk_length: 10,
            string_array: true,
            string_array_encoding: StringArrayEncoding::None,
            string_array_threshold: 0.75,
            unicode_escape_sequence: false,
        }
    }

    /// Profile for scripts with render functions or JSX: string literals are
    /// left exactly where they are.
    pub fn safe() -> Self {
        Self {
            string_array: false,
            split_strings: false,
            string_array_threshold: 0.0,
            ..Self::standard()
        }
    }

    /// Rejects transforms this engine does not implement and out-of-range values.
    pub fn validate(&self) -> Result<(), ObfuscateError> {
        let unsupported = [
            (self.control_flow_flattening, "controlFlowFlattening"),
            (self.dead_code_injection, "deadCodeInjection"),
            (self.debug_protection, "debugProtection"),
            (self.self_defending, "selfDefending"),
            (self.unicode_escape_sequence, "unicodeEscapeSequence"),
        ];
        if let Some((_, name)) = unsupported.iter().find(|(enabled, _)| *enabled) {
            return Err(ObfuscateError::Unsupported(*name));
        }

        if !(0.0..=1.0).contains(&self.string_array_threshold) {
            return Err(ObfuscateError::InvalidOption(format!(
                "stringArrayThreshold must be within 0..=1, got {}",
                self.string_array_threshold
            )));
        }
        if self.split_strings && self.split_strings_chunk_length == 0 {
            return Err(ObfuscateError::InvalidOption(
                "splitStringsChunkLength must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ObfuscatorOptions {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformProfile {
    Standard,
    Safe,
}

impl TransformProfile {
    pub fn options(self) -> ObfuscatorOptions {
        match self {
            TransformProfile::Standard => ObfuscatorOptions::standard(),
            TransformProfile::Safe => ObfuscatorOptions::safe(),
        }
    }
}

impl fmt::Display for TransformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformProfile::Standard => write!(f, "standard"),
            TransformProfile::Safe => write!(f, "safe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_profile_only_differs_in_string_handling() {
        let standard = ObfuscatorOptions::standard();
        let safe = ObfuscatorOptions::safe();

        assert!(!safe.string_array);
        assert!(!safe.split_strings);
        assert_eq!(safe.string_array_threshold, 0.0);
        assert_eq!(
            ObfuscatorOptions {
                string_array: true,
                string_array_threshold: 0.75,
                ..safe.clone()
            },
            standard
        );
    }

    #[test]
    fn profiles_keep_expensive_transforms_off() {
        for profile in [TransformProfile::Standard, TransformProfile::Safe] {
            let options = profile.options();
            assert!(!options.control_flow_flattening);
            assert!(!options.dead_code_injection);
            assert!(!options.self_defending);
            assert!(!options.debug_protection);
            assert!(options.validate().is_ok());
        }
    }

    #[test]
    fn unsupported_transform_is_rejected() {
        let options = ObfuscatorOptions {
            dead_code_injection: true,
            ..ObfuscatorOptions::standard()
        };
        assert!(matches!(
            options.validate(),
            Err(ObfuscateError::Unsupported("deadCodeInjection"))
        ));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let options = ObfuscatorOptions {
            string_array_threshold: 1.5,
            ..ObfuscatorOptions::standard()
        };
        assert!(matches!(
            options.validate(),
            Err(ObfuscateError::InvalidOption(_))
        ));
    }

    #[test]
    fn serializes_with_engine_option_names() {
        let json = serde_json::to_value(ObfuscatorOptions::standard()).unwrap();
        assert_eq!(json["identifierNamesGenerator"], "hexadecimal");
        assert_eq!(json["stringArrayEncoding"], "none");
        assert_eq!(json["stringArrayThreshold"], 0.75);
        assert_eq!(json["compact"], true);
    }
}
