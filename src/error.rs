//! Errors raised while loading the static data resources.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to obtain or interpret one of the static JSON resources.
///
/// Both the location table and the ROI series share this type so callers
/// can degrade the affected feature to "unavailable" uniformly.
#[derive(Debug)]
pub enum LoadError {
    /// The resource could not be read.
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The resource is not valid JSON.
    Parse {
        /// Resource name (`"location table"`, `"roi series"`).
        resource: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The resource is valid JSON but has the wrong shape.
    FormatMismatch {
        /// Resource name (`"location table"`, `"roi series"`).
        resource: &'static str,
        /// Shape that was expected.
        expected: String,
        /// Shape that was found.
        found: String,
    },
}

impl LoadError {
    pub(crate) fn mismatch(
        resource: &'static str,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::FormatMismatch {
            resource,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Returns `true` for shape errors (as opposed to I/O or syntax errors).
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::FormatMismatch { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "load error: cannot read \"{}\": {source}", path.display())
            }
            Self::Parse { resource, source } => {
                write!(f, "load error: {resource} is not valid JSON: {source}")
            }
            Self::FormatMismatch {
                resource,
                expected,
                found,
            } => write!(
                f,
                "format error: {resource} must be {expected}, found {found}"
            ),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::FormatMismatch { .. } => None,
        }
    }
}

/// Short name of a JSON value's type, used in format-mismatch messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
