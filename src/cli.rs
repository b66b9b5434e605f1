use clap::Parser;

/// Run the platform's directory listing command and stream its output
#[derive(Parser, Debug)]
#[command(name = "listrun")]
#[command(version)]
#[command(about = "Runs `ls .` (or `dir` on Windows) and relays its output with origin prefixes", long_about = None)]
pub struct Cli {
    /// Increase diagnostic output on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Exit with the listing command's exit code instead of 0
    #[arg(long = "propagate-exit-code", env = "LISTRUN_PROPAGATE_EXIT_CODE")]
    pub propagate_exit_code: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the verbosity level
    pub fn verbosity_level(&self) -> u8 {
        self.verbose
    }

    /// Exit code the wrapper should use once the child has been reported
    pub fn wrapper_exit_code(&self, child_code: i32) -> i32 {
        if self.propagate_exit_code {
            child_code
        } else {
            crate::error::ReturnCode::NoError.as_exit_code()
        }
    }
}
