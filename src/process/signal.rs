//! Re-raising a child's fatal signal against the current process
//!
//! Signal semantics are POSIX specific. On unix the relay raises the signal
//! with `nix`; elsewhere children are never reported as signaled and the relay
//! only logs.

#[cfg(not(unix))]
use tracing::warn;
#[cfg(unix)]
use tracing::{debug, warn};

/// Capability to deliver a signal observed in a child to ourselves
pub trait SignalRelay: Send + Sync {
    /// Best effort: failures are logged, never escalated
    fn relay(&self, signal: i32);
}

/// Relay that signals the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSignalRelay;

impl SignalRelay for ProcessSignalRelay {
    #[cfg(unix)]
    fn relay(&self, signal: i32) {
        use nix::sys::signal::{raise, Signal};

        match Signal::try_from(signal) {
            Ok(sig) => {
                debug!(signal = sig.as_str(), "child was signaled, raising it against self");
                // The runtime handles SIGSEGV and SIGBUS and ignores SIGPIPE
                if let Err(err) = restore_default_action(sig) {
                    debug!(signal = sig.as_str(), %err, "cannot restore default action");
                }
                if let Err(err) = raise(sig) {
                    warn!(signal = sig.as_str(), %err, "failed to raise signal");
                }
            }
            Err(err) => warn!(signal, %err, "cannot relay unknown signal"),
        }
    }

    #[cfg(not(unix))]
    fn relay(&self, signal: i32) {
        warn!(signal, "signal relay is not supported on this platform");
    }
}

/// Puts `sig` back to its default disposition so raising it has its usual effect
#[cfg(unix)]
fn restore_default_action(sig: nix::sys::signal::Signal) -> nix::Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet};

    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    // SAFETY: SIG_DFL installs no handler code, so no signal-safety rules apply
    unsafe { sigaction(sig, &default) }.map(|_| ())
}

/// Name of a signal number for status lines, e.g. `SIGINT`
pub fn signal_name(signal: i32) -> String {
    #[cfg(unix)]
    {
        if let Ok(sig) = nix::sys::signal::Signal::try_from(signal) {
            return sig.as_str().to_string();
        }
    }
    signal.to_string()
}
