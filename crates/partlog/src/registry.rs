//! Logger bookkeeping for mass reconfiguration.
//!
//! A [`Registry`] is an explicit object the embedding application creates
//! once and hands to whatever constructs loggers. Nothing here is global:
//! two registries never see each other's loggers, and a logger works the
//! same whether or not it is registered anywhere.

use std::fmt;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::logger::Logger;
use crate::matcher::ColorMatcher;

/// Errors from registry-wide operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The pattern matched no registered logger.
    #[error("no logger matches pattern {0:?}")]
    NoMatch(String),
}

/// A collection of logger handles.
///
/// Operations take a pattern: a logger name matches itself exactly, and
/// `*` matches every registered logger. Matching zero loggers is an error,
/// so configuration typos surface instead of silently doing nothing.
///
/// # Example
///
/// ```rust
/// use partlog::{Registry, Severity};
///
/// let registry = Registry::new();
/// let db = registry.new_logger("db");
/// let rpc = registry.new_logger("rpc");
///
/// registry.set_level_by_string("*", "warn").unwrap();
/// assert_eq!(db.level(), Severity::Warn);
/// assert_eq!(rpc.level(), Severity::Warn);
/// ```
#[derive(Default)]
pub struct Registry {
    loggers: Mutex<Vec<Arc<Logger>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an externally constructed logger.
    pub fn add(&self, logger: Arc<Logger>) {
        self.loggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(logger);
    }

    /// Constructs a logger with [`Logger::new`] defaults and registers it.
    pub fn new_logger(&self, name: impl Into<String>) -> Arc<Logger> {
        let logger = Arc::new(Logger::new(name));
        self.add(Arc::clone(&logger));
        logger
    }

    /// Calls `f` for every logger whose name matches `pattern`.
    ///
    /// The registry lock is released before `f` runs, so `f` is free to
    /// reconfigure or log through the visited loggers.
    pub fn visit<F>(&self, pattern: &str, mut f: F) -> Result<(), RegistryError>
    where
        F: FnMut(&Logger),
    {
        let snapshot: Vec<Arc<Logger>> = {
            let loggers = self.loggers.lock().unwrap_or_else(|e| e.into_inner());
            loggers.iter().map(Arc::clone).collect()
        };

        let mut matched = 0usize;
        for logger in &snapshot {
            if name_matches(pattern, &logger.name()) {
                matched += 1;
                f(logger);
            }
        }
        if matched == 0 {
            return Err(RegistryError::NoMatch(pattern.to_string()));
        }
        Ok(())
    }

    /// Applies [`Logger::set_level_by_string`] to every match.
    pub fn set_level_by_string(&self, pattern: &str, level: &str) -> Result<(), RegistryError> {
        self.visit(pattern, |logger| logger.set_level_by_string(level))
    }

    /// Applies [`Logger::set_color_enabled`] to every match.
    pub fn enable_color(&self, pattern: &str, enabled: bool) -> Result<(), RegistryError> {
        self.visit(pattern, |logger| logger.set_color_enabled(enabled))
    }

    /// Attaches a shared text matcher to every match.
    pub fn set_color_matcher(
        &self,
        pattern: &str,
        matcher: &Arc<dyn ColorMatcher>,
    ) -> Result<(), RegistryError> {
        self.visit(pattern, |logger| {
            logger.set_color_matcher(Arc::clone(matcher));
        })
    }

    /// Number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every registered handle. Loggers shared elsewhere keep
    /// working; they are just no longer reachable through the registry.
    pub fn clear(&self) {
        self.loggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.len())
            .finish()
    }
}

fn name_matches(pattern: &str, name: &str) -> bool {
    pattern == "*" || pattern == name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;

    #[test]
    fn test_new_logger_registers() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        let log = registry.new_logger("db");
        assert_eq!(registry.len(), 1);
        assert_eq!(log.name(), "db");
    }

    #[test]
    fn test_add_external_logger() {
        let registry = Registry::new();
        let log = Arc::new(Logger::new("ext"));
        registry.add(Arc::clone(&log));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_visit_exact_name() {
        let registry = Registry::new();
        registry.new_logger("db");
        registry.new_logger("rpc");
        let mut visited = Vec::new();
        registry
            .visit("db", |logger| visited.push(logger.name()))
            .unwrap();
        assert_eq!(visited, vec!["db"]);
    }

    #[test]
    fn test_visit_star_matches_all() {
        let registry = Registry::new();
        registry.new_logger("db");
        registry.new_logger("rpc");
        let mut visited = 0;
        registry.visit("*", |_| visited += 1).unwrap();
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_visit_no_match_is_error() {
        let registry = Registry::new();
        registry.new_logger("db");
        let err = registry.visit("missing", |_| {}).unwrap_err();
        assert_eq!(err, RegistryError::NoMatch("missing".to_string()));
        // Star on an empty registry matches nothing either.
        registry.clear();
        assert!(registry.visit("*", |_| {}).is_err());
    }

    #[test]
    fn test_mass_level_change() {
        let registry = Registry::new();
        let db = registry.new_logger("db");
        let rpc = registry.new_logger("rpc");
        registry.set_level_by_string("*", "error").unwrap();
        assert_eq!(db.level(), Severity::Error);
        assert_eq!(rpc.level(), Severity::Error);
        registry.set_level_by_string("db", "debug").unwrap();
        assert_eq!(db.level(), Severity::Debug);
        assert_eq!(rpc.level(), Severity::Error);
    }

    #[test]
    fn test_mass_color_enable() {
        let registry = Registry::new();
        let db = registry.new_logger("db");
        registry.enable_color("*", true).unwrap();
        assert!(db.color_enabled());
        registry.enable_color("*", false).unwrap();
        assert!(!db.color_enabled());
    }

    #[test]
    fn test_mass_matcher_attach() {
        use std::io::{self, Write};

        use crate::color::Color;
        use crate::matcher::ColorFile;

        #[derive(Clone, Default)]
        struct MemSink(Arc<Mutex<Vec<u8>>>);

        impl Write for MemSink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let registry = Registry::new();
        let db = registry.new_logger("db");
        let mut rules = ColorFile::new();
        rules.push_rule("boom", Color::Magenta);
        let matcher: Arc<dyn ColorMatcher> = Arc::new(rules);
        registry.set_color_matcher("*", &matcher).unwrap();

        let sink = MemSink::default();
        db.set_output(sink.clone());
        db.set_parts_by_string("");
        db.set_color_enabled(true);
        db.log(Severity::Info, "boom happened");
        let written = sink.0.lock().unwrap().clone();
        assert_eq!(written, b"\x1b[35mboom happened\x1b[0m\n");
    }

    #[test]
    fn test_clear_keeps_shared_loggers_alive() {
        let registry = Registry::new();
        let log = registry.new_logger("db");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(log.name(), "db");
        assert!(registry.visit("db", |_| {}).is_err());
    }
}
