//! Terminal colors: the eight base ANSI foreground colors plus a sentinel
//! meaning "emit no escape sequences at all".

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Escape sequence that returns the terminal to its default attributes.
/// Written once at the end of every colored line.
pub const COLOR_RESET: &str = "\x1b[0m";

/// A foreground color for a log line.
///
/// [`Color::None`] is the sentinel value: it has an empty escape prefix and
/// the framing parts skip both the prefix and the reset for it, so a line
/// that resolves to `None` carries no escape bytes whatsoever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// No color.
    #[default]
    None,
    /// ANSI black.
    Black,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white.
    White,
}

impl Color {
    /// The ANSI escape prefix selecting this color; empty for [`Color::None`].
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Black => "\x1b[30m",
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Blue => "\x1b[34m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
            Self::White => "\x1b[37m",
        }
    }

    /// The lowercase name, as accepted by [`Color::from_str`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "black" => Ok(Self::Black),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "magenta" => Ok(Self::Magenta),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Error, Debug, Clone)]
#[error("unknown color: {0:?}")]
pub struct ParseColorError(pub(crate) String);
