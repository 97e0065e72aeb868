//! Call-site resolution for the file-location parts.

use backtrace::Backtrace;

/// Source location of a log call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    /// Source file path as recorded in debug info.
    pub file: String,
    /// Line number; 0 when the symbol carries none.
    pub line: u32,
}

impl CallerInfo {
    /// Walks the current stack for the first resolvable frame outside this
    /// crate, then skips `skip` further frames on top of that. Wrapper
    /// layers that log on behalf of their own callers pass a nonzero skip
    /// so the location points at the real call site.
    ///
    /// Returns `None` when no frame resolves to a file, which is common in
    /// builds stripped of debug info. Capturing a backtrace is expensive;
    /// only pipelines that actually contain a file-location part pay for it.
    #[must_use]
    pub fn capture(skip: usize) -> Option<Self> {
        let bt = Backtrace::new();
        let mut remaining = skip;

        'frames: for frame in bt.frames() {
            for symbol in frame.symbols() {
                let Some(name) = symbol.name().map(|n| n.to_string()) else {
                    continue;
                };
                // Frames inside this crate or the unwinder are plumbing,
                // not call sites.
                if name.contains("partlog::") || name.contains("backtrace::") {
                    continue;
                }
                let Some(file) = symbol.filename().and_then(|p| p.to_str()) else {
                    continue;
                };
                let line = symbol.lineno().unwrap_or(0);
                if remaining > 0 {
                    remaining -= 1;
                    continue 'frames;
                }
                return Some(Self {
                    file: file.to_string(),
                    line,
                });
            }
        }

        None
    }
}

/// Returns the final `/`-separated segment of `path`.
pub(crate) fn final_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
