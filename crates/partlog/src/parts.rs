//! Built-in part functions and the pipeline builder.
//!
//! A pipeline is an ordered list of [`PartFn`]s run over one [`Record`] per
//! log call. However a pipeline is configured, the builder brackets it with
//! fixed framing so every line comes out as
//!
//! ```text
//! [color prefix?] [configured parts...] [message] [color reset?] [newline]
//! ```
//!
//! The color framing only emits bytes for calls that resolved to an actual
//! color on a color-enabled logger, so plain loggers write no escape
//! sequences at all.

use std::cell::Cell;
use std::io::Write;
use std::panic;
use std::process;
use std::thread;

use chrono::{Datelike, Local, Timelike};

use crate::caller::{self, CallerInfo};
use crate::color::{COLOR_RESET, Color};
use crate::record::{PartFn, Record};

// ---------------------------------------------------------------------------
// Pipeline builder
// ---------------------------------------------------------------------------

/// Wraps `custom` with the fixed framing parts.
pub(crate) fn compose(custom: &[PartFn]) -> Vec<PartFn> {
    let mut pipeline: Vec<PartFn> = Vec::with_capacity(custom.len() + 4);
    pipeline.push(color_begin);
    pipeline.extend_from_slice(custom);
    pipeline.push(text);
    pipeline.push(color_end);
    pipeline.push(line_end);
    pipeline
}

/// Maps a directive token to its part function.
pub(crate) fn from_token(token: &str) -> Option<PartFn> {
    let part: PartFn = match token {
        "%L" => level,
        "%T" => time_micros,
        "%t" => time,
        "%F" => long_file,
        "%f" => short_file,
        "%N" => name,
        "%P" => pid,
        "%G" => thread_id,
        _ => return None,
    };
    Some(part)
}

/// Parses a whitespace-separated directive string into an unframed part
/// list. Unrecognized tokens are silently dropped.
pub(crate) fn from_directive(directive: &str) -> Vec<PartFn> {
    directive.split_whitespace().filter_map(from_token).collect()
}

// ---------------------------------------------------------------------------
// Color framing
// ---------------------------------------------------------------------------

pub(crate) fn color_begin(rec: &mut Record<'_>) {
    let color = rec.color();
    if rec.color_enabled() && color != Color::None {
        rec.write_str(color.prefix());
    }
}

pub(crate) fn color_end(rec: &mut Record<'_>) {
    if rec.color_enabled() && rec.color() != Color::None {
        rec.write_str(COLOR_RESET);
    }
}

// ---------------------------------------------------------------------------
// Severity, name, message, terminator
// ---------------------------------------------------------------------------

/// Emits the severity display string, space-terminated. Directive token
/// `%L`.
pub fn level(rec: &mut Record<'_>) {
    let s = rec.severity().as_str();
    rec.write_str(s);
    rec.write_byte(b' ');
}

/// Emits the logger name, space-terminated; emits nothing for unnamed
/// loggers. Directive token `%N`.
pub fn name(rec: &mut Record<'_>) {
    let n = rec.name();
    if !n.is_empty() {
        rec.write_str(n);
        rec.write_byte(b' ');
    }
}

pub(crate) fn text(rec: &mut Record<'_>) {
    let t = rec.text();
    rec.write_str(t);
}

pub(crate) fn line_end(rec: &mut Record<'_>) {
    let t = rec.text();
    if t.is_empty() || !t.ends_with('\n') {
        rec.write_byte(b'\n');
    }
}

// ---------------------------------------------------------------------------
// Caller location
// ---------------------------------------------------------------------------

/// Emits `file:line: ` for the call site, keeping only the final path
/// segment. Directive token `%f`. Falls back to `???:0: ` when the stack
/// yields nothing.
pub fn short_file(rec: &mut Record<'_>) {
    write_file_part(rec, true);
}

/// Emits `file:line: ` for the call site with the full recorded path.
/// Directive token `%F`.
pub fn long_file(rec: &mut Record<'_>) {
    write_file_part(rec, false);
}

fn write_file_part(rec: &mut Record<'_>, short: bool) {
    let (file, line) = match CallerInfo::capture(rec.caller_skip()) {
        Some(info) => (info.file, info.line),
        None => ("???".to_string(), 0),
    };
    let display = if short {
        caller::final_segment(&file)
    } else {
        file.as_str()
    };
    rec.write_str(display);
    rec.write_byte(b':');
    rec.write_int(u64::from(line), 0);
    rec.write_str(": ");
}

// ---------------------------------------------------------------------------
// Process and thread identity
// ---------------------------------------------------------------------------

/// Emits the OS process id, space-terminated. Directive token `%P`.
pub fn pid(rec: &mut Record<'_>) {
    rec.write_int(u64::from(process::id()), 0);
    rec.write_byte(b' ');
}

/// Emits a numeric identifier for the calling thread, space-terminated.
/// Directive token `%G`.
///
/// Resolution is best-effort: the identifier is recovered from the thread
/// id's debug representation, cached per thread after the first success,
/// and `0` stands in when resolution fails.
pub fn thread_id(rec: &mut Record<'_>) {
    rec.write_int(thread_ident(), 0);
    rec.write_byte(b' ');
}

thread_local! {
    static THREAD_IDENT: Cell<u64> = const { Cell::new(0) };
}

fn thread_ident() -> u64 {
    THREAD_IDENT.with(|cached| {
        let known = cached.get();
        if known != 0 {
            return known;
        }
        let resolved = resolve_thread_ident();
        if resolved != 0 {
            cached.set(resolved);
        }
        resolved
    })
}

/// `std::thread::ThreadId` has no stable numeric accessor, so the number is
/// parsed out of its debug form, `ThreadId(N)`. A panic here must never
/// reach the log caller.
fn resolve_thread_ident() -> u64 {
    let parsed = panic::catch_unwind(|| {
        let repr = format!("{:?}", thread::current().id());
        let digits: String = repr.chars().filter(char::is_ascii_digit).collect();
        digits.parse::<u64>().ok()
    });
    match parsed {
        Ok(Some(id)) => id,
        Ok(None) => 0,
        Err(_) => {
            let _ = writeln!(std::io::stderr(), "partlog: thread id resolution panicked");
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Emits `YYYY/MM/DD HH:MM:SS `, space-terminated, in local time.
/// Directive token `%t`.
pub fn time(rec: &mut Record<'_>) {
    write_time_part(rec, false);
}

/// Emits `YYYY/MM/DD HH:MM:SS.uuuuuu `, space-terminated, in local time
/// with microseconds. Directive token `%T`.
pub fn time_micros(rec: &mut Record<'_>) {
    write_time_part(rec, true);
}

fn write_time_part(rec: &mut Record<'_>, micros: bool) {
    // One clock sample per invocation keeps the fields consistent.
    let now = Local::now();

    rec.write_int(u64::try_from(now.year()).unwrap_or(0), 4);
    rec.write_byte(b'/');
    rec.write_int(u64::from(now.month()), 2);
    rec.write_byte(b'/');
    rec.write_int(u64::from(now.day()), 2);
    rec.write_byte(b' ');
    rec.write_int(u64::from(now.hour()), 2);
    rec.write_byte(b':');
    rec.write_int(u64::from(now.minute()), 2);
    rec.write_byte(b':');
    rec.write_int(u64::from(now.second()), 2);

    if micros {
        rec.write_byte(b'.');
        rec.write_int(u64::from(now.timestamp_subsec_micros()), 6);
    }

    rec.write_byte(b' ');
}
