use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Which destructive step of a history rewrite failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStage {
    Rebase,
    Reset,
    Push,
}

impl fmt::Display for RewriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rebase => f.write_str("interactive rebase"),
            Self::Reset => f.write_str("hard reset"),
            Self::Push => f.write_str("force push"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidConfig {
        message: String,
    },
    InvalidInput {
        message: String,
    },
    CommandIo {
        command: String,
        source: std::io::Error,
    },
    CommandFailure {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    LogParse {
        line: String,
    },
    DateParse {
        value: String,
        source: chrono::ParseError,
    },
    MarkerWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    DeletionSetIo {
        path: PathBuf,
        source: std::io::Error,
    },
    DeletionSetFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    TodoIo {
        path: PathBuf,
        source: std::io::Error,
    },
    Rewrite {
        stage: RewriteStage,
        source: Box<Error>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::ConfigParse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            Self::InvalidConfig { message } => write!(f, "invalid config: {message}"),
            Self::InvalidInput { message } => write!(f, "invalid input: {message}"),
            Self::CommandIo { command, source } => {
                write!(f, "failed to launch {command}: {source}")
            }
            Self::CommandFailure {
                command,
                status,
                stderr,
            } => {
                if stderr.is_empty() {
                    write!(f, "{command} failed with status {status}")
                } else {
                    write!(f, "{command} failed with status {status}: {stderr}")
                }
            }
            Self::LogParse { line } => write!(f, "unexpected git log line '{line}'"),
            Self::DateParse { value, source } => {
                write!(f, "failed to parse commit date '{value}': {source}")
            }
            Self::MarkerWrite { path, source } => {
                write!(f, "failed to write marker file {}: {source}", path.display())
            }
            Self::DeletionSetIo { path, source } => {
                write!(f, "failed to access deletion set {}: {source}", path.display())
            }
            Self::DeletionSetFormat { path, source } => {
                write!(f, "malformed deletion set {}: {source}", path.display())
            }
            Self::TodoIo { path, source } => {
                write!(f, "failed to rewrite instruction list {}: {source}", path.display())
            }
            Self::Rewrite { stage, source } => write!(f, "{stage} failed: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::CommandIo { source, .. }
            | Self::MarkerWrite { source, .. }
            | Self::DeletionSetIo { source, .. }
            | Self::TodoIo { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::DateParse { source, .. } => Some(source),
            Self::DeletionSetFormat { source, .. } => Some(source),
            Self::Rewrite { source, .. } => Some(source.as_ref()),
            Self::InvalidConfig { .. }
            | Self::InvalidInput { .. }
            | Self::CommandFailure { .. }
            | Self::LogParse { .. } => None,
        }
    }
}

impl Error {
    pub(crate) fn rewrite(stage: RewriteStage, source: Self) -> Self {
        Self::Rewrite {
            stage,
            source: Box::new(source),
        }
    }
}
