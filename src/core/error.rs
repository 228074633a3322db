//! Error types for wharf with contextual messages and exit codes
//!
//! A unified error type that categorizes failures and carries the identifying
//! key (package name, file path, expression string) a user needs to locate
//! the problem. Warnings are not errors: consistency findings and write
//! conflicts travel as data, not through this type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for wharf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed expressions)
  User = 1,
  /// System error (I/O, subprocess)
  System = 2,
  /// Validation failure (strict-mode warnings)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for wharf
#[derive(Debug)]
pub enum WharfError {
  /// Malformed version or selector expression
  Parse(ParseError),

  /// Configuration errors (project files, monorepo graph)
  Config(ConfigError),

  /// Source metadata extraction errors
  Metadata(MetadataError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl WharfError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    WharfError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    WharfError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      WharfError::Message { message, context, help } => WharfError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => WharfError::Message {
        message: other.to_string(),
        context: Some(ctx_str),
        help: other.help_message(),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      WharfError::Parse(_) => ExitCode::User,
      WharfError::Config(_) => ExitCode::User,
      WharfError::Metadata(_) => ExitCode::User,
      WharfError::Io(_) => ExitCode::System,
      WharfError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      WharfError::Config(e) => e.help_message(),
      WharfError::Metadata(e) => e.help_message(),
      WharfError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for WharfError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WharfError::Parse(e) => write!(f, "{}", e),
      WharfError::Config(e) => write!(f, "{}", e),
      WharfError::Metadata(e) => write!(f, "{}", e),
      WharfError::Io(e) => write!(f, "I/O error: {}", e),
      WharfError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for WharfError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      WharfError::Io(e) => Some(e),
      _ => None,
    }
  }
}

/// Malformed version or selector expression
///
/// Always carries the offending expression verbatim so the user can find it
/// in their configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
  /// What was being parsed ("version", "version selector", "author")
  pub what: &'static str,
  /// The offending input, verbatim
  pub input: String,
  /// Underlying reason
  pub reason: String,
}

impl ParseError {
  pub fn new(what: &'static str, input: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      what,
      input: input.into(),
      reason: reason.into(),
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid {} '{}': {}", self.what, self.input, self.reason)
  }
}

impl std::error::Error for ParseError {}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// No package.toml or monorepo.toml found
  NotFound { search_root: PathBuf },

  /// Two monorepo packages declare the same name
  DuplicateName { name: String, first: PathBuf, second: PathBuf },

  /// A requirement names a monorepo package that does not exist
  UnknownSibling { package: String, reference: String },

  /// Missing required field
  MissingField { field: String },

  /// A named package was not found in the monorepo
  PackageNotFound { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Run wharf from a directory containing package.toml or monorepo.toml.".to_string())
      }
      ConfigError::DuplicateName { name, .. } => Some(format!(
        "Rename one of the packages so that '{}' is declared only once in the monorepo.",
        name
      )),
      ConfigError::UnknownSibling { reference, .. } => Some(format!(
        "Check the spelling of '{}' or add a package.toml for it under the monorepo root.",
        reference
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No wharf configuration found.\nSearched for package.toml or monorepo.toml from: {}",
          search_root.display()
        )
      }
      ConfigError::DuplicateName { name, first, second } => {
        write!(
          f,
          "Duplicate package name '{}' in monorepo:\n  {}\n  {}",
          name,
          first.display(),
          second.display()
        )
      }
      ConfigError::UnknownSibling { package, reference } => {
        write!(
          f,
          "Package '{}' references '{}', which is not a package of this monorepo",
          package, reference
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::PackageNotFound { name } => {
        write!(f, "Package '{}' not found in the monorepo", name)
      }
    }
  }
}

/// Source metadata extraction errors
#[derive(Debug)]
pub enum MetadataError {
  /// No entry file ({module}.py, {module}/__version__.py, {module}/__init__.py)
  EntryFileNotFound { modulename: String, source_directory: PathBuf },
}

impl MetadataError {
  fn help_message(&self) -> Option<String> {
    match self {
      MetadataError::EntryFileNotFound { modulename, .. } => Some(format!(
        "Create {m}.py, {m}/__version__.py or {m}/__init__.py under the source directory, \
         or set package.modulename / package.source-directory in package.toml.",
        m = modulename.replace('.', "/")
      )),
    }
  }
}

impl fmt::Display for MetadataError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MetadataError::EntryFileNotFound {
        modulename,
        source_directory,
      } => {
        write!(
          f,
          "Entry file for module '{}' could not be determined under {}",
          modulename,
          source_directory.display()
        )
      }
    }
  }
}

impl From<io::Error> for WharfError {
  fn from(err: io::Error) -> Self {
    WharfError::Io(err)
  }
}

impl From<ParseError> for WharfError {
  fn from(err: ParseError) -> Self {
    WharfError::Parse(err)
  }
}

impl From<ConfigError> for WharfError {
  fn from(err: ConfigError) -> Self {
    WharfError::Config(err)
  }
}

impl From<MetadataError> for WharfError {
  fn from(err: MetadataError) -> Self {
    WharfError::Metadata(err)
  }
}

impl From<String> for WharfError {
  fn from(msg: String) -> Self {
    WharfError::message(msg)
  }
}

impl From<&str> for WharfError {
  fn from(msg: &str) -> Self {
    WharfError::message(msg)
  }
}

impl From<toml_edit::TomlError> for WharfError {
  fn from(err: toml_edit::TomlError) -> Self {
    WharfError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for WharfError {
  fn from(err: toml_edit::de::Error) -> Self {
    WharfError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for WharfError {
  fn from(err: toml_edit::ser::Error) -> Self {
    WharfError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for WharfError {
  fn from(err: serde_json::Error) -> Self {
    WharfError::message(format!("JSON error: {}", err))
  }
}

impl From<glob::PatternError> for WharfError {
  fn from(err: glob::PatternError) -> Self {
    WharfError::message(format!("Invalid glob pattern: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for WharfError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    WharfError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for WharfError {
  fn from(err: std::path::StripPrefixError) -> Self {
    WharfError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<std::env::VarError> for WharfError {
  fn from(err: std::env::VarError) -> Self {
    WharfError::message(format!("Environment variable error: {}", err))
  }
}

impl From<anyhow::Error> for WharfError {
  fn from(err: anyhow::Error) -> Self {
    WharfError::message(err.to_string())
  }
}

/// Result type alias for wharf
pub type WharfResult<T> = Result<T, WharfError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> WharfResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> WharfResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<WharfError>,
{
  fn context(self, ctx: impl Into<String>) -> WharfResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> WharfResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &WharfError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
