use thiserror::Error;

/// Exit codes of the wrapper itself (not of the listing command)
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    NoError = 0,
    RuntimeError = 3,
}

impl ReturnCode {
    pub fn as_exit_code(self) -> i32 {
        self as i32
    }
}

/// Main error type for listrun operations
#[derive(Error, Debug)]
pub enum ListrunError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(unix)]
    #[error("System error: {0}")]
    SystemError(#[from] nix::Error),

    #[cfg(windows)]
    #[error("Windows error: {0}")]
    WindowsError(String),
}

impl ListrunError {
    /// Convert error to the appropriate return code
    pub fn to_return_code(&self) -> ReturnCode {
        match self {
            ListrunError::Spawn { .. } => ReturnCode::RuntimeError,
            ListrunError::Wait(_) => ReturnCode::RuntimeError,
            ListrunError::RuntimeError(_) => ReturnCode::RuntimeError,
            ListrunError::Io(_) => ReturnCode::RuntimeError,
            #[cfg(unix)]
            ListrunError::SystemError(_) => ReturnCode::RuntimeError,
            #[cfg(windows)]
            ListrunError::WindowsError(_) => ReturnCode::RuntimeError,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.to_return_code().as_exit_code()
    }
}

/// Result type alias for listrun operations
pub type Result<T> = std::result::Result<T, ListrunError>;

impl From<ListrunError> for i32 {
    fn from(error: ListrunError) -> Self {
        error.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn spawn_failure_maps_to_runtime_error() {
        let err = ListrunError::Spawn {
            program: "/bin/sh".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_return_code(), ReturnCode::RuntimeError);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "failed to spawn '/bin/sh': No such file or directory"
        );
    }

    #[test]
    fn runtime_error_exit_code() {
        let err = ListrunError::RuntimeError("bad".into());
        assert_eq!(i32::from(err), 3);
    }

    #[test]
    fn io_errors_convert() {
        let err: ListrunError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, ListrunError::Io(_)));
        assert_eq!(err.exit_code(), ReturnCode::RuntimeError.as_exit_code());
    }

    #[test]
    fn no_error_is_zero() {
        assert_eq!(ReturnCode::NoError.as_exit_code(), 0);
    }
}
