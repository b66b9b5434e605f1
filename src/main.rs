use listrun::cli::Cli;
use listrun::runner::{Runner, RunnerConfig};
use listrun::{logging, signal};
use tracing::warn;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args = Cli::parse_args();

    if let Err(e) = logging::init(args.verbosity_level()) {
        eprintln!("listrun: failed to initialise logging: {:#}", e);
    }

    let config = RunnerConfig::detect();
    let mut runner = Runner::new(config, std::io::stdout(), std::io::stderr());

    // Without handlers the wrapper simply dies with the signal, as before
    match signal::setup_signal_handlers() {
        Ok(flags) => runner = runner.with_signals(flags),
        Err(e) => warn!(error = %e, "signal forwarding disabled"),
    }

    match runner.run() {
        Ok(report) => args.wrapper_exit_code(report.code()),
        Err(e) => {
            eprintln!("listrun: {}", e);
            e.exit_code()
        }
    }
}
