//! Console control events standing in for POSIX termination signals

use super::SignalFlags;
use crate::error::{ListrunError, Result};
use crate::process::ChildProcess;
use std::sync::atomic::Ordering;
use std::sync::OnceLock;
use tracing::debug;
use windows::Win32::Foundation::BOOL;
use windows::Win32::System::Console::{
    SetConsoleCtrlHandler, CTRL_BREAK_EVENT, CTRL_CLOSE_EVENT, CTRL_C_EVENT,
};

static SIGNAL_STATE: OnceLock<SignalFlags> = OnceLock::new();

/// Register the console handler and return its flags
pub fn setup_signal_handlers() -> Result<SignalFlags> {
    if let Some(flags) = SIGNAL_STATE.get() {
        return Ok(flags.clone());
    }

    let flags = SignalFlags::new();
    SIGNAL_STATE
        .set(flags.clone())
        .map_err(|_| ListrunError::WindowsError("Signal handler already registered".into()))?;

    unsafe {
        SetConsoleCtrlHandler(Some(console_handler), BOOL(1)).map_err(|err| {
            ListrunError::WindowsError(format!(
                "Failed to register console control handler: {}",
                err
            ))
        })?;
    }

    Ok(flags)
}

/// Forward a console termination event by ending the child shell
pub fn forward_signal_to_child(signal: (), child: &mut ChildProcess) -> Result<()> {
    debug!(pid = child.id(), "forwarding console event to child");
    child.terminate(signal)
}

unsafe extern "system" fn console_handler(ctrl_type: u32) -> BOOL {
    if let Some(flags) = SIGNAL_STATE.get() {
        match ctrl_type {
            CTRL_C_EVENT => {
                flags.sigint_received.store(true, Ordering::SeqCst);
                return BOOL(1);
            }
            CTRL_BREAK_EVENT => {
                flags.sigterm_received.store(true, Ordering::SeqCst);
                return BOOL(1);
            }
            CTRL_CLOSE_EVENT => {
                flags.sighup_received.store(true, Ordering::SeqCst);
                return BOOL(1);
            }
            _ => {}
        }
    }
    BOOL(0)
}
