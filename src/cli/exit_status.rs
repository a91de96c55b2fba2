use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed and found what it looked for
/// - `Failure` (1): Command completed but found nothing (no file, no keys, no links)
/// - `Error` (2): Command failed due to internal error (unreadable input, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and found what it looked for.
    Success,
    /// Command completed but found nothing.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl ExitStatus {
    /// `Success` when the command found something, `Failure` otherwise.
    pub fn found(found: bool) -> Self {
        if found {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
