//! POSIX signal registration via `signal-hook` flags

use super::SignalFlags;
use crate::error::{ListrunError, Result};
use crate::process::ChildProcess;
use nix::sys::signal::Signal;
use std::sync::Arc;
use tracing::debug;

/// Register SIGTERM, SIGINT and SIGHUP so they set flags instead of killing us
///
/// The wrapper stays alive after such a signal so it can forward it and
/// still report how the child ended.
pub fn setup_signal_handlers() -> Result<SignalFlags> {
    use signal_hook::consts::signal::*;
    use signal_hook::flag;

    let flags = SignalFlags::new();

    for (signal, slot, name) in [
        (SIGTERM, &flags.sigterm_received, "SIGTERM"),
        (SIGINT, &flags.sigint_received, "SIGINT"),
        (SIGHUP, &flags.sighup_received, "SIGHUP"),
    ] {
        flag::register(signal, Arc::clone(slot)).map_err(|e| {
            ListrunError::RuntimeError(format!("Failed to register {} handler: {}", name, e))
        })?;
    }

    Ok(flags)
}

/// Forward a termination signal to the child process
pub fn forward_signal_to_child(signal: Signal, child: &mut ChildProcess) -> Result<()> {
    debug!(pid = child.id(), signal = signal.as_str(), "forwarding signal to child");
    child.terminate(signal)
}
