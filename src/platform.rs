//! Host platform detection and listing command selection
//!
//! The platform is resolved once at startup and handed to the runner as a
//! plain value. Everything here is pure apart from [`Platform::detect`] and
//! the `ComSpec` lookup in [`ShellInvocation::new`].

use std::fmt;

/// Host OS family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    /// Detect the platform this binary was built for
    pub fn detect() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::Other => f.write_str("other"),
        }
    }
}

/// Executable name plus its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command line handed to the shell: program and arguments joined by single spaces
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Pick the listing command for the given platform
pub fn select_command(platform: Platform) -> CommandSpec {
    match platform {
        Platform::Windows => CommandSpec::new("dir", [""]),
        Platform::Other => CommandSpec::new("ls", ["."]),
    }
}

/// A command line wrapped for execution through the platform's shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
    pub shell: String,
    pub args: Vec<String>,
    /// Windows only: args go to the command line verbatim, without quoting
    pub raw_args: bool,
}

impl ShellInvocation {
    /// Build the shell invocation, consulting `ComSpec` on Windows
    pub fn new(platform: Platform, spec: &CommandSpec) -> Self {
        let comspec = match platform {
            Platform::Windows => std::env::var("ComSpec").ok(),
            Platform::Other => None,
        };
        Self::with_comspec(platform, spec, comspec)
    }

    pub fn with_comspec(platform: Platform, spec: &CommandSpec, comspec: Option<String>) -> Self {
        let line = spec.command_line();
        match platform {
            Platform::Windows => Self {
                shell: comspec
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "cmd.exe".to_string()),
                args: vec![
                    "/d".to_string(),
                    "/s".to_string(),
                    "/c".to_string(),
                    format!("\"{}\"", line),
                ],
                raw_args: true,
            },
            Platform::Other => Self {
                shell: "/bin/sh".to_string(),
                args: vec!["-c".to_string(), line],
                raw_args: false,
            },
        }
    }
}
