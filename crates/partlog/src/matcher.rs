//! Text→color classification.
//!
//! A [`ColorMatcher`] is consulted by the logger when a call reaches the
//! sink with no staged color and no severity-derived color. The bundled
//! [`ColorFile`] implementation matches ordered substring rules, typically
//! loaded from a small JSON file shipped next to the application.

use serde::Deserialize;
use thiserror::Error;

use crate::color::{Color, ParseColorError};

/// Maps message text to a color.
///
/// Implementations must be callable from any thread: the logger invokes
/// the matcher while holding its instance lock, from whichever thread
/// happens to be logging.
pub trait ColorMatcher: Send + Sync {
    /// Returns the color for `text`, or [`Color::None`] when no rule applies.
    fn color_from_text(&self, text: &str) -> Color;
}

#[derive(Debug, Clone)]
struct ColorRule {
    pattern: String,
    color: Color,
}

/// Wire form of one rule in the JSON rule file.
#[derive(Debug, Deserialize)]
struct RawRule {
    text: String,
    color: String,
}

/// Ordered substring rules mapping message text to a color.
///
/// The first rule whose pattern occurs anywhere in the text wins, so more
/// specific patterns belong before more general ones.
///
/// # Example
///
/// ```rust
/// use partlog::{Color, ColorFile, ColorMatcher};
///
/// let rules = ColorFile::load_json(
///     r#"[{"text": "panic", "color": "red"}, {"text": "ready", "color": "green"}]"#,
/// )
/// .unwrap();
/// assert_eq!(rules.color_from_text("worker ready"), Color::Green);
/// assert_eq!(rules.color_from_text("all quiet"), Color::None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorFile {
    rules: Vec<ColorRule>,
}

impl ColorFile {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rules from a JSON array of `{"text": ..., "color": ...}`
    /// objects, preserving their order.
    pub fn load_json(data: &str) -> Result<Self, ColorFileError> {
        let raw: Vec<RawRule> = serde_json::from_str(data)?;
        let mut file = Self::new();
        for rule in raw {
            let color = rule.color.parse::<Color>()?;
            file.push_rule(rule.text, color);
        }
        Ok(file)
    }

    /// Appends a rule. Later rules only apply where earlier ones do not.
    pub fn push_rule(&mut self, pattern: impl Into<String>, color: Color) {
        self.rules.push(ColorRule {
            pattern: pattern.into(),
            color,
        });
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ColorMatcher for ColorFile {
    fn color_from_text(&self, text: &str) -> Color {
        for rule in &self.rules {
            if text.contains(rule.pattern.as_str()) {
                return rule.color;
            }
        }
        Color::None
    }
}

/// Errors raised while loading color rules.
#[derive(Error, Debug)]
pub enum ColorFileError {
    /// The rule data is not valid JSON of the expected shape.
    #[error("malformed color rules: {0}")]
    Json(#[from] serde_json::Error),
    /// A rule names a color this crate does not define.
    #[error(transparent)]
    Color(#[from] ParseColorError),
}
