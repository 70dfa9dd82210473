//! Process exit codes shared by all commands

use bg_core::Error;

/// Exit codes reported by bget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
    NotFound = 3,
    NetworkError = 4,
    IoError = 5,
}

impl ExitCode {
    /// Exit code for a library error, by error class
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::InvalidAddress(_) => ExitCode::UsageError,
            Error::NotFound(_) => ExitCode::NotFound,
            Error::Transport(_) => ExitCode::NetworkError,
            Error::Io(_) => ExitCode::IoError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_class_mapping() {
        assert_eq!(
            ExitCode::from_error(&Error::InvalidAddress("x".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from_error(&Error::NotFound("x".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from_error(&Error::Transport("x".into())),
            ExitCode::NetworkError
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ExitCode::from_error(&io.into()), ExitCode::IoError);
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::UsageError as i32, 2);
    }
}
