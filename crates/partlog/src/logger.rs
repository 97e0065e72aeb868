//! The logger: per-instance state, the locking discipline, and the
//! format-then-write sequence every call runs through.

use std::fmt;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::color::Color;
use crate::level::Severity;
use crate::matcher::ColorMatcher;
use crate::parts;
use crate::record::{PartFn, Record};

/// Initial capacity of the reusable line buffer.
const LINE_BUFFER: usize = 32;

/// State behind the instance lock. Everything a log call reads or writes
/// lives here, so holding the lock across the whole format-and-write
/// sequence keeps concurrent callers from interleaving bytes.
struct LoggerInner {
    level: Severity,
    color_enabled: bool,
    name: String,
    matcher: Option<Arc<dyn ColorMatcher>>,
    parts: Vec<PartFn>,
    sink: Box<dyn Write + Send>,
    buf: Vec<u8>,
    /// Color staged for the next call; cleared after every completed call.
    color: Color,
    caller_skip: usize,
    warned_sink_failure: bool,
}

/// A line-oriented logger.
///
/// Each logger owns a severity threshold, a part pipeline, a sink and a
/// reusable line buffer. All of it sits behind one internal lock, so a
/// `Logger` is shared freely across threads (typically in an [`Arc`]) and
/// every emitted line reaches the sink as a single uninterrupted write.
///
/// # Example
///
/// ```rust
/// use partlog::{Logger, Severity};
///
/// let log = Logger::new("svc");
/// log.set_level(Severity::Info);
/// log.set_parts_by_string("%L %N");
/// log.log(Severity::Info, "up and running");
/// log.log(Severity::Debug, "dropped by the threshold");
/// ```
pub struct Logger {
    inner: Mutex<LoggerInner>,
}

impl Logger {
    /// Creates a logger writing to stdout, with the lowest threshold so
    /// nothing is filtered, colors disabled, and the default
    /// severity/name/timestamp line layout.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(LoggerInner {
                level: Severity::Debug,
                color_enabled: false,
                name: name.into(),
                matcher: None,
                parts: parts::compose(&[parts::level, parts::name, parts::time]),
                sink: Box::new(io::stdout()),
                buf: Vec::with_capacity(LINE_BUFFER),
                color: Color::None,
                caller_skip: 0,
                warned_sink_failure: false,
            }),
        }
    }

    /// Formats and writes one line at `severity` with the given message
    /// text. Every convenience macro funnels into this.
    ///
    /// The whole sequence runs under the instance lock: the threshold
    /// filter, color selection, the part pipeline over the reusable
    /// buffer, and the single sink write. Calls below the threshold return
    /// before any formatting work and leave a staged color in place for
    /// the next call that passes.
    ///
    /// Sink failures never reach the caller: the first one is noted on
    /// stderr, later ones are dropped silently.
    pub fn log(&self, severity: Severity, text: &str) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let inner = &mut *guard;

        if severity < inner.level {
            return;
        }

        // Matcher-derived color applies only when nothing is staged;
        // severity-derived color overrides both.
        let mut color = inner.color;
        if inner.color_enabled && color == Color::None {
            if let Some(matcher) = &inner.matcher {
                color = matcher.color_from_text(text);
            }
        }
        let severity_color = severity.color();
        if severity_color != Color::None {
            color = severity_color;
        }

        // Length reset, capacity kept.
        inner.buf.clear();
        {
            let mut record = Record::new(
                severity,
                text,
                color,
                &inner.name,
                inner.color_enabled,
                inner.caller_skip,
                &mut inner.buf,
            );
            for part in &inner.parts {
                part(&mut record);
            }
        }

        if let Err(err) = inner.sink.write_all(&inner.buf) {
            if !inner.warned_sink_failure {
                inner.warned_sink_failure = true;
                let _ = writeln!(io::stderr(), "partlog: sink write failed: {err}");
            }
        }

        inner.color = Color::None;
    }

    /// Joins `args` with single spaces, appends a newline, and logs the
    /// result at `severity`. Empty `args` log a bare newline. The `...ln!`
    /// macros funnel into this.
    pub fn logln(&self, severity: Severity, args: &[&dyn fmt::Display]) {
        self.log(severity, &join_line(args));
    }

    /// The minimum severity that passes the filter.
    #[must_use]
    pub fn level(&self) -> Severity {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).level
    }

    /// Sets the minimum severity that passes the filter.
    pub fn set_level(&self, level: Severity) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).level = level;
    }

    /// Permissive string form of [`set_level`](Self::set_level): unknown
    /// names fall back to [`Severity::Debug`], so a bad configuration
    /// value loosens the filter instead of breaking it.
    pub fn set_level_by_string(&self, level: &str) {
        self.set_level(level.parse().unwrap_or(Severity::Debug));
    }

    /// True when the threshold is exactly [`Severity::Debug`].
    #[must_use]
    pub fn is_debug_enabled(&self) -> bool {
        self.level() == Severity::Debug
    }

    /// Whether color escape sequences are emitted.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .color_enabled
    }

    /// Enables or disables color escape sequences. Off by default.
    pub fn set_color_enabled(&self, enabled: bool) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .color_enabled = enabled;
    }

    /// The logger's name, as emitted by the name part.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .name
            .clone()
    }

    /// Renames the logger.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).name = name.into();
    }

    /// Replaces the configured parts. The pipeline is rebuilt with the
    /// fixed framing: color prefix first; message text, color reset and
    /// line terminator last.
    pub fn set_parts(&self, custom: &[PartFn]) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).parts = parts::compose(custom);
    }

    /// Directive-string form of [`set_parts`](Self::set_parts).
    ///
    /// Tokens are whitespace-separated: `%L` severity, `%T` timestamp with
    /// microseconds, `%t` timestamp, `%F` full file path, `%f` file name,
    /// `%N` logger name, `%P` process id, `%G` thread id. Unrecognized
    /// tokens are silently dropped; an empty directive leaves just the
    /// framing, which formats the bare message.
    pub fn set_parts_by_string(&self, directive: &str) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).parts =
            parts::compose(&parts::from_directive(directive));
    }

    /// Stages a color for the next call that passes the filter. Unknown
    /// names stage nothing. The severity-derived color still takes
    /// precedence, and the staging is consumed by the next completed call.
    pub fn set_color(&self, name: &str) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).color =
            name.parse().unwrap_or(Color::None);
    }

    /// Attaches the text matcher consulted when a call has no staged color
    /// and its severity provides none.
    pub fn set_color_matcher(&self, matcher: Arc<dyn ColorMatcher>) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).matcher = Some(matcher);
    }

    /// Replaces the output sink. Lines already written stay with the old
    /// sink; the warn-once marker for sink failures is rearmed.
    pub fn set_output<W: Write + Send + 'static>(&self, sink: W) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sink = Box::new(sink);
        inner.warned_sink_failure = false;
    }

    /// Extra stack frames for the caller-location parts to skip, for
    /// wrapper layers that log on behalf of their own callers.
    pub fn set_caller_skip(&self, skip: usize) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).caller_skip = skip;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("Logger")
            .field("name", &inner.name)
            .field("level", &inner.level)
            .field("color_enabled", &inner.color_enabled)
            .field("parts", &inner.parts.len())
            .finish_non_exhaustive()
    }
}

fn join_line(args: &[&dyn fmt::Display]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{arg}");
    }
    line.push('\n');
    line
}
