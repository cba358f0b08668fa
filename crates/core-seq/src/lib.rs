//! Terminal control and escape-sequence recognition.
//!
//! The [`Processor`](processor::Processor) pulls bytes from a
//! savepoint-capable input buffer, discriminates text from controls, and
//! speculatively parses candidate escape sequences with bounded
//! look-ahead. Recognized sequences dispatch through fixed tables to
//! description routines that write transcript lines; failed candidates
//! rewind and fall back to literal controls. Not a terminal emulator:
//! there is no cursor model and no screen state, only classification.

pub mod charset;
pub mod control;
pub mod csi;
pub mod modes;
pub mod processor;
pub mod sgr;

pub use processor::{Delay, DelaySource, ESC, Processor};

use core_emit::{EmitError, Emitter};
use std::io::Write;

/// Which transcript line kinds to produce. Everything is on by default.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Suffix C0 names with `/^X` notation.
    pub control_hats: bool,
    /// `&` acronym/label lines.
    pub labels: bool,
    /// `"` prose description lines.
    pub descriptions: bool,
    /// `:` escape echo lines.
    pub escapes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            control_hats: true,
            labels: true,
            descriptions: true,
            escapes: true,
        }
    }
}

/// Echo one escape-sequence byte with its conventional spelling.
pub(crate) fn echo_byte<W: Write>(out: &mut Emitter<W>, byte: u8) -> Result<(), EmitError> {
    match byte {
        0x1b => out.put_str(" Esc"),
        b' ' => out.put_str(" Spc"),
        _ => out.put_str(&format!(" {}", byte as char)),
    }
}
