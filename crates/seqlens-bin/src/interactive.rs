//! Interactive terminal mode and pending-signal handling.
//!
//! When reading from a terminal, input is switched to non-canonical mode
//! (and echo is turned off when the transcript also goes to a terminal)
//! so controls arrive as they are typed. Caught signals only set a flag;
//! the driver services it between units of work, restoring the terminal
//! and re-delivering the signal with its default disposition so job
//! control behaves normally.

use nix::libc::c_int;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, raise, sigaction};
use nix::sys::termios::{
    LocalFlags, SetArg, SpecialCharacterIndices, Termios, tcgetattr, tcsetattr,
};
use std::os::fd::{BorrowedFd, RawFd};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use tracing::debug;

static SIGNAL_PENDING: AtomicBool = AtomicBool::new(false);
static PENDING_SIGNAL: AtomicI32 = AtomicI32::new(0);

const CAUGHT: [Signal; 5] = [
    Signal::SIGINT,
    Signal::SIGTERM,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
];

extern "C" fn note_signal(sig: c_int) {
    // First signal wins until the driver services it.
    if !SIGNAL_PENDING.load(Ordering::SeqCst) {
        PENDING_SIGNAL.store(sig, Ordering::SeqCst);
        SIGNAL_PENDING.store(true, Ordering::SeqCst);
    }
}

/// Terminal-mode guard over the input descriptor. The descriptor stays
/// open for the life of the process (it backs the input stream), so the
/// raw borrow below is sound.
pub struct TermGuard {
    fd: RawFd,
    saved: Termios,
    working: Termios,
}

impl TermGuard {
    fn borrow_fd(&self) -> BorrowedFd<'_> {
        unsafe { BorrowedFd::borrow_raw(self.fd) }
    }

    pub fn set_working(&self) {
        let _ = tcsetattr(self.borrow_fd(), SetArg::TCSANOW, &self.working);
    }

    pub fn set_saved(&self) {
        let _ = tcsetattr(self.borrow_fd(), SetArg::TCSANOW, &self.saved);
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        self.set_saved();
    }
}

/// Put the input terminal into non-canonical mode and tell the user how
/// to get out. Returns `None` when the descriptor is not a terminal.
pub fn tty_setup(fd: RawFd, output_is_terminal: bool) -> Option<TermGuard> {
    let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
    let saved = tcgetattr(borrowed).ok()?;
    let mut working = saved.clone();
    working.local_flags.remove(LocalFlags::ICANON);
    if output_is_terminal {
        working.local_flags.remove(LocalFlags::ECHO);
    }
    tcsetattr(borrowed, SetArg::TCSANOW, &working).ok()?;

    let intr = saved.control_chars[SpecialCharacterIndices::VINTR as usize];
    let mut notice = String::from(
        "  Terminal detected. Interactive mode (-I option to disable).\n  Send the interrupt character to exit.",
    );
    if intr < 0x20 {
        notice.push_str(&format!(" (Control-{})", (intr + 0x40) as char));
    } else if intr == 0x7f {
        notice.push_str(" (DEL, or Control-?)");
    }
    eprintln!("{notice}\n");

    Some(TermGuard { fd, saved, working })
}

/// Install the flag-setting handler for the signals the driver services.
pub fn install_handlers() {
    let mut mask = SigSet::empty();
    for sig in CAUGHT {
        mask.add(sig);
    }
    let action = SigAction::new(SigHandler::Handler(note_signal), SaFlags::empty(), mask);
    for sig in CAUGHT {
        // Replacing the disposition of these signals is the whole point.
        if let Err(e) = unsafe { sigaction(sig, &action) } {
            debug!(target: "runtime.signal", %sig, %e, "sigaction_failed");
        }
    }
}

/// The signal waiting to be serviced, if any.
pub fn pending() -> Option<Signal> {
    if SIGNAL_PENDING.load(Ordering::SeqCst) {
        Signal::try_from(PENDING_SIGNAL.load(Ordering::SeqCst)).ok()
    } else {
        None
    }
}

pub fn clear_pending() {
    SIGNAL_PENDING.store(false, Ordering::SeqCst);
}

/// Re-deliver `sig` with its default disposition (stopping or terminating
/// the process as appropriate), then re-arm our handler. On return from a
/// stop, execution continues here.
pub fn deliver_default(sig: Signal) {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    let previous = unsafe { sigaction(sig, &default) };
    let _ = raise(sig);
    if let Ok(previous) = previous {
        let _ = unsafe { sigaction(sig, &previous) };
    }
}
