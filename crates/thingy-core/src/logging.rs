use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "thingy.log";
const HUD_LOG_LINES: usize = 200;
const LOG_RETENTION_DAYS: u64 = 7;

/// Severity of a captured log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One log line as shown in the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Bounded, shareable buffer of the most recent log lines.
///
/// Cloning yields another handle to the same buffer.
#[derive(Debug, Clone)]
pub struct LogRing {
    lines: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
}

impl LogRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest once full.
    pub fn push(&self, line: LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Up to `n` of the newest lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => {
                let skip = lines.len().saturating_sub(n);
                lines.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Directory the rolling log files go to.
///
/// `THINGY_LOG_DIR` wins; otherwise `~/Library/Logs/thingy` on macOS and
/// `<data dir>/thingy/logs` elsewhere.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("THINGY_LOG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library").join("Logs").join("thingy");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(data) = dirs::data_dir() {
            return data.join("thingy").join("logs");
        }
    }

    PathBuf::from("logs")
}

/// Delete rotated log files older than `max_age`. Other files are left alone.
fn prune_logs(dir: &Path, max_age: Duration) {
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return;
    };
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry
            .file_name()
            .to_string_lossy()
            .starts_with(LOG_FILE_PREFIX)
        {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map(|modified| modified <= cutoff)
            .unwrap_or(false);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Tracing layer that copies every event into a [`LogRing`].
struct HudLayer {
    ring: LogRing,
}

impl<S: tracing::Subscriber> Layer<S> for HudLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        self.ring.push(LogLine {
            level: LogLevel::from_tracing(event.metadata().level()),
            target: event.metadata().target().to_string(),
            message: fields.into_message(),
        });
    }
}

/// Flattens an event into `message key=value ...`.
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<String>,
}

impl FieldCollector {
    fn into_message(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        parts.extend(self.message);
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl tracing::field::Visit for FieldCollector {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Install the global subscriber and return the ring the HUD reads from.
///
/// The filter comes from `THINGY_LOG`, then `RUST_LOG`, defaulting to `info`.
/// Events go to a daily-rolling `thingy.log` under [`log_dir`] (kept for a
/// week) and to the returned ring. Nothing is written to the terminal, which
/// belongs to the renderer.
pub fn init() -> LogRing {
    let ring = LogRing::new(HUD_LOG_LINES);

    let filter = EnvFilter::try_from_env("THINGY_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: cannot create log directory {}: {}", dir.display(), e);
    }
    prune_logs(&dir, Duration::from_secs(LOG_RETENTION_DAYS * 86_400));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(HudLayer { ring: ring.clone() })
        .init();

    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that touch THINGY_LOG_DIR must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn line(message: &str) -> LogLine {
        LogLine {
            level: LogLevel::Info,
            target: "test".into(),
            message: message.into(),
        }
    }

    #[test]
    fn log_dir_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("THINGY_LOG_DIR").ok();

        unsafe { std::env::set_var("THINGY_LOG_DIR", "/tmp/thingy-test-logs") };
        assert_eq!(log_dir(), PathBuf::from("/tmp/thingy-test-logs"));

        match original {
            Some(v) => unsafe { std::env::set_var("THINGY_LOG_DIR", v) },
            None => unsafe { std::env::remove_var("THINGY_LOG_DIR") },
        }
    }

    #[test]
    fn log_dir_default_mentions_thingy() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("THINGY_LOG_DIR").ok();

        unsafe { std::env::remove_var("THINGY_LOG_DIR") };
        let dir = log_dir();
        if dir != PathBuf::from("logs") {
            assert!(dir.to_string_lossy().contains("thingy"), "{}", dir.display());
        }

        if let Some(v) = original {
            unsafe { std::env::set_var("THINGY_LOG_DIR", v) };
        }
    }

    #[test]
    fn ring_evicts_oldest() {
        let ring = LogRing::new(3);
        for i in 0..5 {
            ring.push(line(&format!("msg {i}")));
        }
        assert_eq!(ring.len(), 3);
        let messages: Vec<_> = ring.recent(10).into_iter().map(|l| l.message).collect();
        assert_eq!(messages, ["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn recent_returns_newest_in_order() {
        let ring = LogRing::new(10);
        for i in 0..4 {
            ring.push(line(&format!("{i}")));
        }
        let messages: Vec<_> = ring.recent(2).into_iter().map(|l| l.message).collect();
        assert_eq!(messages, ["2", "3"]);
        assert!(LogRing::new(4).recent(3).is_empty());
    }

    #[test]
    fn clones_share_lines() {
        let ring = LogRing::new(4);
        let other = ring.clone();
        other.push(line("shared"));
        assert_eq!(ring.len(), 1);
        assert!(!ring.is_empty());
    }

    #[test]
    fn level_names() {
        assert_eq!(LogLevel::Trace.to_string(), "TRACE");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
        assert_eq!(format!("{:5}|", LogLevel::Info), "INFO |");
        assert!(LogLevel::Error > LogLevel::Info);
    }

    #[test]
    fn collector_joins_message_and_fields() {
        let only = FieldCollector {
            message: Some("hello".into()),
            fields: Vec::new(),
        };
        assert_eq!(only.into_message(), "hello");

        let both = FieldCollector {
            message: Some("clip".into()),
            fields: vec!["name=eat".into(), "frames=4".into()],
        };
        assert_eq!(both.into_message(), "clip name=eat frames=4");

        let fields = FieldCollector {
            message: None,
            fields: vec!["a=1".into()],
        };
        assert_eq!(fields.into_message(), "a=1");
        assert_eq!(FieldCollector::default().into_message(), "");
    }

    #[test]
    fn hud_layer_captures_events() {
        let ring = LogRing::new(8);
        let subscriber = tracing_subscriber::registry().with(HudLayer { ring: ring.clone() });
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(clip = "eat", "clip missing");
        });
        let lines = ring.recent(8);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, LogLevel::Warn);
        assert_eq!(lines[0].message, "clip missing clip=eat");
    }

    #[test]
    fn prune_only_touches_log_files() {
        let tmp = std::env::temp_dir().join("thingy-test-prune");
        let _ = std::fs::create_dir_all(&tmp);

        let old = tmp.join("thingy.log.2025-01-01");
        let other = tmp.join("notes.txt");
        std::fs::write(&old, "a").unwrap();
        std::fs::write(&other, "b").unwrap();

        prune_logs(&tmp, Duration::ZERO);
        assert!(!old.exists());
        assert!(other.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
