use thiserror::Error;

/// Status code returned by the authorization service.
pub type OSStatus = i32;

/// Exit code used when the command line cannot be turned into a command.
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error("AuthorizationCreate failed with error {0}")]
    AuthCreate(OSStatus),
    #[error("AuthorizationCopyRights failed with error {0}")]
    AuthCopyRights(OSStatus),
    #[error("AuthorizationExecuteWithPrivileges failed with error {0}")]
    AuthExec(OSStatus),
    #[error("Expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl InstallError {
    /// The status reported by the authorization service, if the failure came from it.
    pub fn status(&self) -> Option<OSStatus> {
        match self {
            Self::AuthCreate(status) | Self::AuthCopyRights(status) | Self::AuthExec(status) => {
                Some(*status)
            }
            Self::ArgumentCount { .. } | Self::InvalidArgument(_) => None,
        }
    }

    /// The process exit code for this failure.
    ///
    /// Authorization failures exit with the service status unchanged; the OS
    /// keeps only its low byte.
    pub fn exit_code(&self) -> i32 {
        self.status().unwrap_or(USAGE_EXIT_CODE)
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_names_failing_call() {
        assert_eq!(
            InstallError::AuthCreate(-60008).to_string(),
            "AuthorizationCreate failed with error -60008"
        );
        assert_eq!(
            InstallError::AuthCopyRights(-60006).to_string(),
            "AuthorizationCopyRights failed with error -60006"
        );
        assert_eq!(
            InstallError::AuthExec(-60031).to_string(),
            "AuthorizationExecuteWithPrivileges failed with error -60031"
        );
    }

    #[test]
    fn test_exit_code_is_status() {
        assert_eq!(InstallError::AuthCreate(-60008).exit_code(), -60008);
        assert_eq!(InstallError::AuthCopyRights(-60005).exit_code(), -60005);
        assert_eq!(InstallError::AuthExec(-60031).exit_code(), -60031);
        assert_eq!(
            InstallError::ArgumentCount {
                expected: 2,
                found: 1
            }
            .exit_code(),
            USAGE_EXIT_CODE
        );
        assert_eq!(InstallError::InvalidArgument("a\0b".into()).status(), None);
    }
}
