//! Error types for symver with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Only fatal conditions become errors; anything
//! recoverable is routed through the reporter as a warning instead.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for symver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, config, naming)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (parse, resolve, ABI break under --care)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for symver
#[derive(Debug)]
pub enum SymverError {
  /// Syntax error at a specific position in a version script
  Parse(ParseError),

  /// A version string could not be read as numeric components
  Version { message: String },

  /// Dependency-resolution errors (missing release, duplicate name, cycle)
  Resolve(ResolveError),

  /// The name of a new release could not be determined
  Naming { message: String },

  /// Symbols would be removed while the fail-on-break flag is set
  AbiBreak { removed: Vec<String> },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors, with optional context (usually the path involved)
  Io {
    context: Option<String>,
    source: io::Error,
  },

  /// Generic error with message and optional help text
  Message { message: String, help: Option<String> },
}

impl SymverError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SymverError::Message {
      message: msg.into(),
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    SymverError::Message {
      message: msg.into(),
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx = ctx.into();
    match self {
      SymverError::Io { source, .. } => SymverError::Io {
        context: Some(ctx),
        source,
      },
      SymverError::Message { message, help } => SymverError::Message {
        message: format!("{}: {}", ctx, message),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SymverError::Parse(_) => ExitCode::Validation,
      SymverError::Version { .. } => ExitCode::Validation,
      SymverError::Resolve(_) => ExitCode::Validation,
      SymverError::AbiBreak { .. } => ExitCode::Validation,
      SymverError::Naming { .. } => ExitCode::User,
      SymverError::Config(_) => ExitCode::User,
      SymverError::Message { .. } => ExitCode::User,
      SymverError::Io { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SymverError::Parse(_) => Some("Fix the syntax error in the version script and run the command again.".to_string()),
      SymverError::Naming { .. } => Some(
        "Name releases with version information (e.g. LIBX_1_0_0), or create the script with `symver new`.".to_string(),
      ),
      SymverError::AbiBreak { .. } => {
        Some("Keep the removed symbols exported, or drop --care to collapse history into a new base release.".to_string())
      }
      SymverError::Config(e) => e.help_message(),
      SymverError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for SymverError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SymverError::Parse(e) => write!(f, "{}", e),
      SymverError::Version { message } => write!(f, "{}", message),
      SymverError::Resolve(e) => write!(f, "{}", e),
      SymverError::Naming { message } => write!(f, "{}", message),
      SymverError::AbiBreak { removed } => {
        write!(f, "ABI break detected: symbols would be removed:")?;
        for symbol in removed {
          write!(f, "\n    {}", symbol)?;
        }
        Ok(())
      }
      SymverError::Config(e) => write!(f, "{}", e),
      SymverError::Io { context, source } => match context {
        Some(ctx) => write!(f, "{}: I/O error: {}", ctx, source),
        None => write!(f, "I/O error: {}", source),
      },
      SymverError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for SymverError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SymverError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for SymverError {
  fn from(err: io::Error) -> Self {
    SymverError::Io {
      context: None,
      source: err,
    }
  }
}

impl From<String> for SymverError {
  fn from(msg: String) -> Self {
    SymverError::message(msg)
  }
}

impl From<&str> for SymverError {
  fn from(msg: &str) -> Self {
    SymverError::message(msg)
  }
}

impl From<ParseError> for SymverError {
  fn from(err: ParseError) -> Self {
    SymverError::Parse(err)
  }
}

impl From<ResolveError> for SymverError {
  fn from(err: ResolveError) -> Self {
    SymverError::Resolve(err)
  }
}

impl From<ConfigError> for SymverError {
  fn from(err: ConfigError) -> Self {
    SymverError::Config(err)
  }
}

impl From<serde_json::Error> for SymverError {
  fn from(err: serde_json::Error) -> Self {
    SymverError::message(format!("JSON error: {}", err))
  }
}

/// Syntax error raised by the script parser
///
/// Keeps track of where the error was found in the given file. Line and
/// column are 0-based; rendering converts them to 1-based and points a
/// caret at the offending column.
#[derive(Debug, Clone)]
pub struct ParseError {
  /// The name (path) of the file being parsed
  pub filename: String,
  /// The text of the line where the error was detected
  pub context: String,
  /// The 0-based index of the line where the error was detected
  pub line: usize,
  /// The 0-based index of the column where the error was detected
  pub column: usize,
  /// The error message
  pub message: String,
}

impl ParseError {
  pub fn new(
    filename: impl Into<String>,
    context: impl Into<String>,
    line: usize,
    column: usize,
    message: impl Into<String>,
  ) -> Self {
    ParseError {
      filename: filename.into(),
      context: context.into(),
      line,
      column,
      message: message.into(),
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "In file {}, line {}, column {}: {}\n{}\n{}^",
      self.filename,
      self.line + 1,
      self.column + 1,
      self.message,
      self.context,
      " ".repeat(self.column)
    )
  }
}

impl std::error::Error for ParseError {}

/// Dependency-resolution errors
#[derive(Debug, Clone)]
pub enum ResolveError {
  /// A `previous` link names a release that does not exist
  NotFound { name: String },

  /// More than one release shares the name being resolved
  DefinedTwice { name: String },

  /// The `previous` links form a cycle; `path` holds the full cycle,
  /// repeating the offending name at the end
  Cycle { path: Vec<String> },
}

impl fmt::Display for ResolveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolveError::NotFound { name } => {
        write!(f, "Release '{}' not found", name)
      }
      ResolveError::DefinedTwice { name } => {
        write!(f, "Defined more than one release '{}'", name)
      }
      ResolveError::Cycle { path } => {
        write!(f, "Circular dependency detected!\n    {}", path.join("->"))
      }
    }
  }
}

impl std::error::Error for ResolveError {}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// symver.toml could not be parsed
  Invalid { path: PathBuf, message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => {
        Some("Check the [library] and [update] sections of the configuration file.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, message } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), message)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

/// Result type alias for symver
pub type SymverResult<T> = Result<T, SymverError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SymverResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SymverResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SymverError>,
{
  fn context(self, ctx: impl Into<String>) -> SymverResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> SymverResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with colors and help text
pub fn print_error(error: &SymverError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
