use std::fmt;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SeedLoadFailed,
    InvalidSeed,
    ValidationFailed,
    TerminalIoFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SeedLoadFailed => "E1002",
            Self::InvalidSeed => "E1003",
            Self::ValidationFailed => "E2001",
            Self::TerminalIoFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SeedLoadFailed => "Seed file could not be loaded",
            Self::InvalidSeed => "Seed file contains invalid incidents",
            Self::ValidationFailed => "Incident report is invalid",
            Self::TerminalIoFailed => "Terminal I/O failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Short machine key used as `error_code` in JSON output.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ConfigParseError => "config_parse_error",
            Self::SeedLoadFailed => "seed_load_failed",
            Self::InvalidSeed => "invalid_seed",
            Self::ValidationFailed => "validation_failed",
            Self::TerminalIoFailed => "terminal_io_failed",
            Self::InternalUnexpected => "internal_unexpected",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .incidents/config.toml and retry."),
            Self::SeedLoadFailed => {
                Some("Pass a readable JSON array of incident records to --seed.")
            }
            Self::InvalidSeed => Some(
                "Give every seeded incident a unique id below u64::MAX plus a non-blank title and description.",
            ),
            Self::ValidationFailed => Some("Provide a title, a description, and a severity."),
            Self::TerminalIoFailed => Some("Run the dashboard from an interactive terminal."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
