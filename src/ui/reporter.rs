//! Diagnostics reporting for symver
//!
//! A process-scoped reporter handle created once in `main` and passed
//! explicitly to every component. Warnings and informational messages go
//! through here; fatal conditions travel as `SymverError` instead.
//!
//! Tests can construct a capturing reporter and assert on the collected
//! messages without touching stderr.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// Verbosity threshold for reporter output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
  Quiet,
  Error,
  Warning,
  Info,
  Debug,
}

impl FromStr for Verbosity {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "quiet" => Ok(Verbosity::Quiet),
      "error" => Ok(Verbosity::Error),
      "warning" => Ok(Verbosity::Warning),
      "info" => Ok(Verbosity::Info),
      "debug" => Ok(Verbosity::Debug),
      other => Err(format!("Unknown verbosity '{}'", other)),
    }
  }
}

impl fmt::Display for Verbosity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Verbosity::Quiet => write!(f, "quiet"),
      Verbosity::Error => write!(f, "error"),
      Verbosity::Warning => write!(f, "warning"),
      Verbosity::Info => write!(f, "info"),
      Verbosity::Debug => write!(f, "debug"),
    }
  }
}

enum Sink {
  Stderr,
  Capture(Mutex<Vec<String>>),
}

/// Explicit diagnostics handle
///
/// Messages below the configured verbosity threshold are dropped. The
/// default threshold is `Warning`, matching the console behavior users
/// expect from a batch tool.
pub struct Reporter {
  verbosity: Verbosity,
  sink: Sink,
}

impl Reporter {
  /// Create a reporter writing to stderr
  pub fn new(verbosity: Verbosity) -> Self {
    Reporter {
      verbosity,
      sink: Sink::Stderr,
    }
  }

  /// Create a reporter that collects messages in memory (for tests)
  pub fn capturing(verbosity: Verbosity) -> Self {
    Reporter {
      verbosity,
      sink: Sink::Capture(Mutex::new(Vec::new())),
    }
  }

  /// Report a non-fatal problem; never blocks completion of a run
  pub fn warning(&self, msg: impl fmt::Display) {
    self.emit(Verbosity::Warning, "WARNING", msg);
  }

  /// Report progress or derived information
  pub fn info(&self, msg: impl fmt::Display) {
    self.emit(Verbosity::Info, "INFO", msg);
  }

  /// Report internal detail useful when tracing a run
  pub fn debug(&self, msg: impl fmt::Display) {
    self.emit(Verbosity::Debug, "DEBUG", msg);
  }

  fn emit(&self, level: Verbosity, label: &str, msg: impl fmt::Display) {
    if level > self.verbosity {
      return;
    }
    let line = format!("[{}] {}", label, msg);
    match &self.sink {
      Sink::Stderr => eprintln!("{}", line),
      Sink::Capture(buffer) => {
        if let Ok(mut buffer) = buffer.lock() {
          buffer.push(line);
        }
      }
    }
  }

  /// Messages collected by a capturing reporter (empty for stderr reporters)
  pub fn captured(&self) -> Vec<String> {
    match &self.sink {
      Sink::Stderr => Vec::new(),
      Sink::Capture(buffer) => buffer.lock().map(|b| b.clone()).unwrap_or_default(),
    }
  }
}

impl Default for Reporter {
  fn default() -> Self {
    Reporter::new(Verbosity::Warning)
  }
}
