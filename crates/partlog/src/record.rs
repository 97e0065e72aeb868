//! The per-call formatting state handed to part functions.

use crate::color::Color;
use crate::level::Severity;

/// A formatting part.
///
/// Each part appends one fragment of the output line to the record. The
/// logger runs its configured parts in order over a single [`Record`], so
/// a part sees the bytes of everything written before it only through the
/// record's write methods, never directly.
pub type PartFn = fn(&mut Record<'_>);

/// The in-flight state of one log call.
///
/// A record borrows the logger's reusable line buffer together with the
/// call's severity, message text and resolved color, plus the slice of
/// logger configuration parts are allowed to read. It only lives for the
/// duration of one call, under the logger's instance lock.
pub struct Record<'a> {
    severity: Severity,
    text: &'a str,
    color: Color,
    name: &'a str,
    color_enabled: bool,
    caller_skip: usize,
    buf: &'a mut Vec<u8>,
}

impl<'a> Record<'a> {
    pub(crate) fn new(
        severity: Severity,
        text: &'a str,
        color: Color,
        name: &'a str,
        color_enabled: bool,
        caller_skip: usize,
        buf: &'a mut Vec<u8>,
    ) -> Self {
        Self {
            severity,
            text,
            color,
            name,
            color_enabled,
            caller_skip,
            buf,
        }
    }

    /// Severity of the call being formatted.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Message text of the call being formatted.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The color the logger resolved for this call.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The logger's name; empty for unnamed loggers.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Whether the logger emits color escape sequences.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Extra call-stack frames the caller-location parts should skip.
    #[must_use]
    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    /// Appends raw text to the line being built.
    pub fn write_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Appends a single raw byte to the line being built.
    pub fn write_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Appends `value` in decimal, zero-padded on the left to `width`
    /// digits. A `width` of 0 writes the plain digits; values that need
    /// more than `width` digits are never truncated.
    pub fn write_int(&mut self, value: u64, width: usize) {
        let mut digits = [0u8; 20];
        let mut pos = digits.len();
        let mut rest = value;
        loop {
            pos -= 1;
            digits[pos] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        let len = digits.len() - pos;
        for _ in len..width {
            self.buf.push(b'0');
        }
        self.buf.extend_from_slice(&digits[pos..]);
    }
}
