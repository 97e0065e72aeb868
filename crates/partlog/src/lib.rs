#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Partlog
//!
//! Line-oriented, color-capable logging assembled from composable parts.
//!
//! Every log call runs an ordered pipeline of part functions over a
//! reusable buffer and hands the finished line to the sink in a single
//! write. A per-logger lock serializes the whole sequence, so lines from
//! concurrent callers never interleave.
//!
//! - **Composable lines**: pick the fields and their order per logger,
//!   either as typed part functions or as a compact directive string.
//! - **Colors with a policy**: severity wins, a staged one-shot color
//!   comes next, then substring rules over the message text.
//! - **Fire and forget**: log calls return nothing and never fail; a
//!   broken sink is noted once on stderr and otherwise ignored.
//! - **No globals**: loggers and registries are plain values the
//!   application owns and wires together.
//!
//! ## Quick start
//!
//! ```rust
//! use partlog::{Logger, Severity, infof};
//!
//! let log = Logger::new("svc");
//! log.set_level(Severity::Info);
//! log.set_parts_by_string("%L %N");
//! infof!(log, "listening on {}", 8080);
//! ```
//!
//! ## Line layout
//!
//! [`Logger::set_parts_by_string`] accepts whitespace-separated tokens:
//!
//! | Token | Emits |
//! |-------|-------|
//! | `%L`  | severity, `INFO ` style |
//! | `%T`  | local timestamp with microseconds |
//! | `%t`  | local timestamp, second precision |
//! | `%F`  | full source path of the call site |
//! | `%f`  | file name of the call site |
//! | `%N`  | logger name |
//! | `%P`  | process id |
//! | `%G`  | thread id |
//!
//! Whatever the tokens, the message text and the newline are always
//! appended, and color escapes (when active) bracket the whole line.
//! The typed equivalents live in [`parts`].
//!
//! ## Colors
//!
//! Colors are off by default. Once enabled, each line's color is resolved
//! by precedence: the severity's own color ([`Severity::Warn`] is yellow,
//! [`Severity::Error`] and [`Severity::Fatal`] are red), then a color
//! staged with [`Logger::set_color`] for the next call, then the first
//! matching substring rule of an attached [`ColorFile`].
//!
//! ```rust
//! use std::sync::Arc;
//! use partlog::{ColorFile, Logger, Severity};
//!
//! let rules = ColorFile::load_json(
//!     r#"[{"text": "ready", "color": "green"}]"#,
//! ).unwrap();
//!
//! let log = Logger::new("svc");
//! log.set_color_enabled(true);
//! log.set_color_matcher(Arc::new(rules));
//! log.log(Severity::Info, "worker ready");
//! ```
//!
//! ## Registries
//!
//! A [`Registry`] holds logger handles for mass reconfiguration, matching
//! loggers by exact name or `*`. See the type-level example.

mod caller;
mod color;
mod level;
mod logger;
mod matcher;
pub mod parts;
mod record;
mod registry;

pub use caller::CallerInfo;
pub use color::{COLOR_RESET, Color, ParseColorError};
pub use level::{ParseLevelError, Severity};
pub use logger::Logger;
pub use matcher::{ColorFile, ColorFileError, ColorMatcher};
pub use record::{PartFn, Record};
pub use registry::{Registry, RegistryError};

/// Common imports for applications using this crate.
pub mod prelude {
    pub use crate::{
        Color, ColorFile, ColorMatcher, Logger, PartFn, Record, Registry, RegistryError,
        Severity, parts,
    };
}

// ---------------------------------------------------------------------------
// Convenience macros
// ---------------------------------------------------------------------------

/// Logs at [`Severity::Debug`] with `format!` semantics.
///
/// ```rust
/// use partlog::{Logger, debugf};
///
/// let log = Logger::new("svc");
/// debugf!(log, "cache warm in {}ms", 12);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Debug, &::std::format!($($arg)*))
    };
}

/// Logs at [`Severity::Info`] with `format!` semantics.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Info, &::std::format!($($arg)*))
    };
}

/// Logs at [`Severity::Warn`] with `format!` semantics.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Warn, &::std::format!($($arg)*))
    };
}

/// Logs at [`Severity::Error`] with `format!` semantics.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Severity::Error, &::std::format!($($arg)*))
    };
}

/// Logs at [`Severity::Debug`], joining each operand's `Display` output
/// with single spaces.
///
/// ```rust
/// use partlog::{Logger, debugln};
///
/// let log = Logger::new("svc");
/// debugln!(log, "attempt", 3, "of", 5);
/// ```
#[macro_export]
macro_rules! debugln {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.logln(
            $crate::Severity::Debug,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Logs at [`Severity::Info`], joining each operand's `Display` output
/// with single spaces.
#[macro_export]
macro_rules! infoln {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.logln(
            $crate::Severity::Info,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Logs at [`Severity::Warn`], joining each operand's `Display` output
/// with single spaces.
#[macro_export]
macro_rules! warnln {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.logln(
            $crate::Severity::Warn,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Logs at [`Severity::Error`], joining each operand's `Display` output
/// with single spaces.
#[macro_export]
macro_rules! errorln {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.logln(
            $crate::Severity::Error,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}
