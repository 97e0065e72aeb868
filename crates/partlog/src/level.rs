//! Severity levels: ordering, display strings, and the severity→color table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;

/// Message severity.
///
/// Variant order defines filtering: a message whose severity is below a
/// logger's threshold is suppressed.
///
/// # Example
///
/// ```rust
/// use partlog::Severity;
///
/// assert!(Severity::Debug < Severity::Info);
/// assert!(Severity::Error > Severity::Warn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Most verbose; the default threshold, so nothing is filtered out.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected that the process can absorb.
    Warn,
    /// A failed operation.
    Error,
    /// A failure the process is not expected to recover from.
    Fatal,
}

impl Severity {
    /// The display string emitted by the severity part.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// The color this severity forces on a line, or [`Color::None`] for
    /// severities that leave color selection to the text matcher.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Warn => Color::Yellow,
            Self::Error | Self::Fatal => Color::Red,
            Self::Debug | Self::Info => Color::None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown severity string.
///
/// The accepted names are `debug`, `info`, `warn`, `error` and `fatal`,
/// case-insensitive. Note that the logger-facing
/// [`set_level_by_string`](crate::Logger::set_level_by_string) does not
/// surface this error; it falls back to [`Severity::Debug`] instead.
#[derive(Error, Debug, Clone)]
#[error("invalid severity: {0:?}")]
pub struct ParseLevelError(pub(crate) String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        let ordered = [
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ];
        for i in 0..ordered.len() {
            for j in (i + 1)..ordered.len() {
                assert!(
                    ordered[i] < ordered[j],
                    "{:?} should be < {:?}",
                    ordered[i],
                    ordered[j]
                );
            }
        }
    }

    #[test]
    fn test_severity_display_strings() {
        assert_eq!(Severity::Debug.as_str(), "DEBUG");
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Warn.as_str(), "WARN");
        assert_eq!(Severity::Error.as_str(), "ERROR");
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
        assert_eq!(Severity::Info.to_string(), "INFO");
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Debug.color(), Color::None);
        assert_eq!(Severity::Info.color(), Color::None);
        assert_eq!(Severity::Warn.color(), Color::Yellow);
        assert_eq!(Severity::Error.color(), Color::Red);
        assert_eq!(Severity::Fatal.color(), Color::Red);
    }

    #[test]
    fn test_severity_parse_valid() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("Warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::Fatal);
    }

    #[test]
    fn test_severity_parse_invalid() {
        for input in ["", "warning", "trace", "INFO ", "3"] {
            assert!(
                input.parse::<Severity>().is_err(),
                "expected error for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_error_display() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid severity"));
        assert!(msg.contains("verbose"));
    }
}
