//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Catalog errors
//! - 3xx: Config errors
//! - 4xx: Search errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `CategoryNotFound` -> E102).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Catalog errors (1xx)
    // ========================================
    /// E102: No category with the requested ID
    CategoryNotFound,
    /// E103: Catalog file could not be parsed
    CatalogParseError,
    /// E104: Catalog file extension is not toml, json or yaml
    CatalogUnsupportedFormat,
    /// E105: Proficiency bands are unordered, overlapping or gapped
    BandsInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file not found
    ConfigNotFound,
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Search errors (4xx)
    // ========================================
    /// E401: Category selector names no known tag
    SearchUnknownCategory,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E605: Data could not be serialized
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Catalog content failed validation
    ValidationFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: Generic I/O failure
    IoError,
}

impl ErrorCode {
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::CategoryNotFound => 102,
            Self::CatalogParseError => 103,
            Self::CatalogUnsupportedFormat => 104,
            Self::BandsInvalid => 105,

            Self::ConfigNotFound => 301,
            Self::ConfigInvalid => 302,

            Self::SearchUnknownCategory => 401,

            Self::SerializationError => 605,

            Self::ValidationFailed => 801,

            Self::IoError => 906,
        }
    }

    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::CategoryNotFound => "Run `skillmatrix categories` to see the available category IDs",
            Self::CatalogParseError => "Check the catalog file syntax. Run `skillmatrix validate <path>` for details",
            Self::CatalogUnsupportedFormat => "Use a .toml, .json, .yaml or .yml catalog file",
            Self::BandsInvalid => "Bands must be listed highest first with no overlaps or gaps between them",

            Self::ConfigNotFound => "Create skillmatrix.toml in the project root, or pass --config <path>",
            Self::ConfigInvalid => "Check TOML syntax and value types in the config file",

            Self::SearchUnknownCategory => "Run `skillmatrix categories` to list the filter tags, or use `all`",

            Self::SerializationError => "The data could not be encoded. Check the input for invalid values",

            Self::ValidationFailed => "Fix each reported problem, then run `skillmatrix validate <path>` again",

            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::CategoryNotFound
            | Self::CatalogParseError
            | Self::CatalogUnsupportedFormat
            | Self::BandsInvalid
            | Self::ConfigNotFound
            | Self::ConfigInvalid
            | Self::SearchUnknownCategory
            | Self::ValidationFailed
            | Self::IoError => true,

            Self::SerializationError => false,
        }
    }

    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "catalog",
            3 => "config",
            4 => "search",
            6 => "storage",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::CategoryNotFound,
            Self::CatalogParseError,
            Self::CatalogUnsupportedFormat,
            Self::BandsInvalid,
            Self::ConfigNotFound,
            Self::ConfigInvalid,
            Self::SearchUnknownCategory,
            Self::SerializationError,
            Self::ValidationFailed,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
