//! Timestamped, append-only line sink recording every significant saver action.

use std::{
    cell::RefCell,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use time::{OffsetDateTime, macros::format_description};
use tracing::{Level, error, info, warn};

/// One entry of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLine {
    /// Severity the line was recorded with.
    pub level: Level,
    /// Wall-clock time formatted as `HH:MM:SS`.
    pub time: String,
    /// Message without the timestamp prefix.
    pub message: String,
}

#[derive(Debug, Clone)]
enum Sink {
    File(PathBuf),
    Memory(Rc<RefCell<Vec<ActivityLine>>>),
}

/// Activity log shared by every saver component.
///
/// Every line is mirrored as a `tracing` event at the same level.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    sink: Sink,
}

impl ActivityLog {
    /// Log appending to `path`; parent directories are created on first write.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            sink: Sink::File(path.into()),
        }
    }

    /// Log keeping lines in memory. Clones share the same buffer.
    pub fn memory() -> Self {
        Self {
            sink: Sink::Memory(Rc::default()),
        }
    }

    /// Lines recorded so far by a memory log; always empty for a file log.
    pub fn lines(&self) -> Vec<ActivityLine> {
        match &self.sink {
            Sink::Memory(lines) => lines.borrow().clone(),
            Sink::File(_) => Vec::new(),
        }
    }

    /// Record an informational line.
    pub fn info(&self, message: impl Into<String>) {
        self.record(Level::INFO, message.into());
    }

    /// Record a warning line.
    pub fn warn(&self, message: impl Into<String>) {
        self.record(Level::WARN, message.into());
    }

    /// Record an error line.
    pub fn error(&self, message: impl Into<String>) {
        self.record(Level::ERROR, message.into());
    }

    fn record(&self, level: Level, message: String) {
        match level {
            Level::ERROR => error!(target: "team_saver::activity", "{message}"),
            Level::WARN => warn!(target: "team_saver::activity", "{message}"),
            _ => info!(target: "team_saver::activity", "{message}"),
        }

        let line = ActivityLine {
            level,
            time: timestamp(),
            message,
        };

        match &self.sink {
            Sink::Memory(lines) => lines.borrow_mut().push(line),
            Sink::File(path) => {
                if let Err(err) = append_line(path, &line) {
                    warn!(path = %path.display(), error = %err, "failed to append activity log line");
                }
            }
        }
    }
}

fn timestamp() -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    local_now()
        .format(format)
        .unwrap_or_else(|_| "--:--:--".into())
}

/// Wall-clock time in the server's local offset, or UTC when the offset is unknown.
fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn append_line(path: &Path, line: &ActivityLine) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} {}", line.time, line.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use time::UtcOffset;

    #[test]
    fn memory_log_is_shared_between_clones() {
        let log = ActivityLog::memory();
        let observer = log.clone();

        log.info("3 teams restored from data file");
        log.warn("Can't find player 7");

        let lines = observer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, Level::INFO);
        assert_eq!(lines[1].message, "Can't find player 7");
        assert_eq!(lines[1].time.len(), 8);
    }

    #[test]
    fn file_log_appends_timestamped_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("team_saver.log");
        let log = ActivityLog::file(&path);

        log.info("first");
        log.error("second");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" first"));
        assert!(lines[1].ends_with(" second"));
        assert_eq!(lines[0].as_bytes()[2], b':');
    }

    #[test]
    fn lines_are_stamped_in_local_time() {
        let offset = local_now().offset();
        assert!(
            offset == UtcOffset::UTC || UtcOffset::current_local_offset().ok() == Some(offset)
        );

        let stamp = timestamp();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
