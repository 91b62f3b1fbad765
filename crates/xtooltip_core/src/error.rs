//! Error types for xtooltip.
//!
//! Only construction-time problems surface as errors. Placement exhaustion,
//! a lost anchor and redundant lifecycle calls are handled inside the
//! tooltip state machine and never reach the caller as an `Err`.

use thiserror::Error;

/// Main error type for xtooltip.
#[derive(Debug, Error)]
pub enum TooltipError {
    /// Invalid tooltip configuration, rejected before any window resource is acquired.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// The host window surface refused the popup.
    #[error("Window error: {message}")]
    Window {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Style definition could not be loaded or parsed.
    #[error("Style error: {message}")]
    Style {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TooltipError {
    // ========== Constructors ==========

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a new window error.
    pub fn window(message: impl Into<String>) -> Self {
        Self::Window { message: message.into(), source: None }
    }

    /// Create a new style error.
    pub fn style(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self::Style { message: message.into(), hint: hint.map(String::from), source: None }
    }

    // ========== Methods ==========

    /// Check if this error was raised while building a tooltip.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Config",
            Self::Window { .. } => "Window",
            Self::Style { .. } => "Style",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { .. } => Some("Set an anchor view or an anchor point before building"),
            Self::Window { .. } => Some("Make sure the parent window is still attached"),
            Self::Style { hint, .. } => hint.as_deref(),
        }
    }
}

// ========== Error Conversions ==========

/// Convert from serde_json::Error to TooltipError.
impl From<serde_json::Error> for TooltipError {
    fn from(err: serde_json::Error) -> Self {
        TooltipError::Style {
            message: format!("JSON error: {err}"),
            hint: Some("Check the style file syntax".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from std::io::Error to TooltipError.
impl From<std::io::Error> for TooltipError {
    fn from(err: std::io::Error) -> Self {
        TooltipError::Style {
            message: err.to_string(),
            hint: Some("Check that the style file exists and is readable".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_hints() {
        let err = TooltipError::config("missing anchor point or anchor view");
        assert!(err.is_config());
        assert_eq!(err.category(), "Config");
        assert!(err.hint().is_some());
        assert_eq!(err.to_string(), "Config error: missing anchor point or anchor view");

        let err = TooltipError::window("surface detached");
        assert_eq!(err.category(), "Window");
        assert!(!err.is_config());
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{ not json");
        let err: TooltipError = parse.unwrap_err().into();
        assert_eq!(err.category(), "Style");
        assert_eq!(err.hint(), Some("Check the style file syntax"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
