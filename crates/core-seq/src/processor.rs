//! Byte-stream recognizer.
//!
//! A three-state machine classifies each input byte: printable bytes open
//! or extend a text run, controls open or extend a control run, and ESC
//! opens a savepoint and hands off to one of four escape-family
//! sub-parsers. A sub-parser either recognizes its sequence, commits the
//! look-ahead, and emits its own lines, or fails, rewinds, and lets ESC be
//! printed as an ordinary control.
//!
//! Output ordering is strict: no byte produces output interleaved with a
//! later byte's output, and a speculative parse emits nothing until it has
//! either succeeded or failed.

use crate::{Options, charset, control, csi, echo_byte};
use core_emit::{EmitError, Emitter};
use core_input::InputBuffer;
use std::io::{self, Read, Write};
use tracing::trace;

pub const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

fn is_printable(c: u8) -> bool {
    (0x20..0x7f).contains(&c)
}

fn is_designation_intermediate(c: u8) -> bool {
    (0x20..=0x2f).contains(&c)
}

fn is_designation_final(c: u8) -> bool {
    (0x30..=0x7e).contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Init,
    Text,
    Ctrl,
}

/// One record from a session recording's timing file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    pub seconds: f64,
    pub bytes: u64,
}

/// Supplies timing records to [`Processor::emit_delays`].
pub trait DelaySource {
    fn next_delay(&mut self) -> Option<Delay>;
}

pub struct Processor<'w, R, W> {
    input: InputBuffer<R>,
    out: &'w mut Emitter<W>,
    opts: Options,
    mode: Mode,
    print_dot: bool,
    mark: u64,
    next_mark: u64,
    first_delay: bool,
}

impl<'w, R: Read, W: Write> Processor<'w, R, W> {
    pub fn new(input: InputBuffer<R>, out: &'w mut Emitter<W>, opts: Options) -> Self {
        Self {
            input,
            out,
            opts,
            mode: Mode::Init,
            print_dot: false,
            mark: 0,
            next_mark: 0,
            first_delay: true,
        }
    }

    /// Pull the next byte from the input buffer.
    pub fn fetch(&mut self) -> Option<u8> {
        self.input.get()
    }

    /// Classify one byte and emit whatever it completes.
    pub fn process(&mut self, byte: u8) -> Result<(), EmitError> {
        loop {
            match self.mode {
                Mode::Init => {
                    self.enter_run(byte)?;
                    continue;
                }
                Mode::Text => {
                    if byte == b'\n' {
                        self.out.finish("|.")?;
                        self.mode = Mode::Init;
                    } else if !is_printable(byte) {
                        self.finish()?;
                        continue;
                    } else {
                        self.out.put_byte(byte)?;
                    }
                }
                Mode::Ctrl => {
                    if is_printable(byte) {
                        self.finish()?;
                        continue;
                    }
                    if byte != ESC || !self.handle_escape()? {
                        self.print_control(byte)?;
                    }
                }
            }
            return Ok(());
        }
    }

    /// Close the current run and return to the initial state. Safe to call
    /// at any unit boundary; an already-closed line stays closed.
    pub fn finish(&mut self) -> Result<(), EmitError> {
        match self.mode {
            Mode::Text => self.out.finish("|")?,
            Mode::Ctrl => self.out.finish("")?,
            Mode::Init => {}
        }
        self.mode = Mode::Init;
        Ok(())
    }

    /// Whether buffered look-ahead remains (a unit of work is incomplete).
    pub fn lookahead_available(&self) -> bool {
        self.input.available()
    }

    pub fn committed(&self) -> u64 {
        self.input.committed_count()
    }

    pub fn reset_count(&mut self) {
        self.input.reset_count()
    }

    pub fn io_error(&self) -> Option<&io::Error> {
        self.input.io_error()
    }

    /// Whether the committed byte count has crossed the pending timing
    /// mark.
    pub fn delay_due(&self) -> bool {
        self.mark <= self.input.committed_count()
    }

    /// Read timing records until the pending mark passes the committed
    /// count, emitting a `@` line per record. The first record of a
    /// recording is consumed without emission: the recording tool writes
    /// the delay observed *before* each read, so the delay that belongs to
    /// the first mark is carried by the second record. Returns `false`
    /// once the source is exhausted.
    pub fn emit_delays(&mut self, source: &mut dyn DelaySource) -> Result<bool, EmitError> {
        self.finish()?;
        loop {
            let Some(delay) = source.next_delay() else {
                self.mark = self.mark.saturating_sub(self.input.committed_count());
                self.input.reset_count();
                return Ok(false);
            };
            self.mark += self.next_mark;
            self.next_mark = delay.bytes;
            if self.first_delay {
                self.first_delay = false;
            } else {
                self.out.single_delay(delay.seconds)?;
            }
            if self.mark > self.input.committed_count() {
                break;
            }
        }
        // Keep the counters small; only their difference matters.
        self.mark -= self.input.committed_count();
        self.input.reset_count();
        Ok(true)
    }

    fn enter_run(&mut self, byte: u8) -> Result<(), EmitError> {
        self.print_dot = true;
        if byte != b'\n' && !is_printable(byte) {
            self.mode = Mode::Ctrl;
        } else {
            self.out.open_text_run()?;
            self.mode = Mode::Text;
        }
        Ok(())
    }

    /// Append one control to the open control run, printing the lazy `.`
    /// sigil first if this is the run's first entry.
    fn print_control(&mut self, byte: u8) -> Result<(), EmitError> {
        if self.print_dot {
            self.print_dot = false;
            self.out.open_ctrl_run()?;
        }
        if byte < 0x20 || byte == DEL {
            let name = if byte < 0x20 {
                control::C0_NAMES[byte as usize]
            } else {
                "DEL"
            };
            if self.opts.control_hats {
                let hat = (byte.wrapping_add(0x40) & 0x7f) as char;
                self.out.put_str(&format!(" {name}/^{hat}"))?;
            } else {
                self.out.put_str(&format!(" {name}"))?;
            }
        } else {
            self.out.put_str(&format!(" x{byte:02X}"))?;
        }
        self.mode = Mode::Ctrl;
        Ok(())
    }

    /// Speculatively parse an escape sequence. On success the look-ahead
    /// is committed and the sub-parser has emitted its lines; on failure
    /// the input is rewound so the candidate bytes are reprocessed as
    /// literals.
    fn handle_escape(&mut self) -> Result<bool, EmitError> {
        self.input.save();
        let handled = match self.input.get() {
            None => false,
            Some(c) => match c >> 4 {
                2 => self.escape_designation(c)?,
                3 => self.escape_private(c)?,
                4 | 5 => self.escape_c1(c)?,
                6 | 7 if c != DEL => self.escape_standard(c)?,
                _ => false,
            },
        };
        if handled {
            self.input.commit();
            self.print_dot = true;
        } else {
            trace!(target: "seq.escape", "candidate_rewound");
            self.input.rewind();
        }
        Ok(handled)
    }

    /// nF family: `ESC I... F` with intermediates in column 2 and a final
    /// in 0x30..=0x7E. Used for announcements and character-set
    /// designations.
    fn escape_designation(&mut self, intro: u8) -> Result<bool, EmitError> {
        let mut sub = 0u8;
        let mut extra = 0usize;
        let terminator;
        match self.input.get() {
            None => return Ok(false),
            Some(c) if is_designation_intermediate(c) => {
                sub = c;
                let mut c = match self.input.get() {
                    Some(c) => c,
                    None => return Ok(false),
                };
                while is_designation_intermediate(c) {
                    extra += 1;
                    c = match self.input.get() {
                        Some(c) => c,
                        None => return Ok(false),
                    };
                }
                if !is_designation_final(c) {
                    return Ok(false);
                }
                terminator = c;
            }
            Some(c) => {
                if !is_designation_final(c) {
                    return Ok(false);
                }
                terminator = c;
            }
        }

        if self.opts.escapes {
            self.input.rewind();
            self.out.open_escape_line()?;
            self.out.put_str(" Esc")?;
            loop {
                let Some(c) = self.input.get() else { break };
                echo_byte(self.out, c)?;
                if is_designation_final(c) {
                    break;
                }
            }
            self.out.finish("")?;
        }

        // With three or more intermediates the sequence is echoed but not
        // classified.
        if extra > 0 {
            return Ok(true);
        }

        match intro {
            0x20 => self.maybe_label("ACS", "ANNOUNCE CODE STRUCTURE")?,
            0x21 | 0x22 => self.control_designation(intro, terminator)?,
            0x24 if sub == 0 || sub >= 0x27 => self.multibyte_designation(sub, terminator)?,
            i if i >= 0x28 => self.graphic_designation(i, sub, terminator)?,
            _ => {}
        }
        Ok(true)
    }

    /// Fp family: `ESC F` with F in column 3; private single functions.
    fn escape_private(&mut self, c: u8) -> Result<bool, EmitError> {
        if self.opts.escapes {
            self.out.single_escape(&format!("Esc {}", c as char))?;
        }
        match c {
            b'7' => self.maybe_label("DECSC", "SAVE CURSOR")?,
            b'8' => self.maybe_label("DECRC", "RESTORE CURSOR")?,
            b'=' => self.maybe_label("DECKPAM", "KEYPAD APPLICATION MODE")?,
            b'>' => self.maybe_label("DECKPNM", "KEYPAD NORMAL MODE")?,
            _ => {}
        }
        Ok(true)
    }

    /// C1 family: `ESC Fe` with Fe in columns 4-5. `ESC [` introduces a
    /// control sequence; a failed control-sequence parse fails the whole
    /// escape, so the ESC falls back to a literal control.
    fn escape_c1(&mut self, c: u8) -> Result<bool, EmitError> {
        if c == b'[' {
            return match csi::recognize(&mut self.input) {
                Some(handler) => {
                    csi::transcribe(&mut self.input, self.out, &self.opts, handler)?;
                    Ok(true)
                }
                None => Ok(false),
            };
        }
        if self.opts.escapes {
            self.out.single_escape(&format!("Esc {}", c as char))?;
        }
        if self.opts.labels
            && let Some((acro, name)) = control::c1_label(c)
        {
            self.out.single_label(&format!("{acro}: {name}"))?;
        }
        Ok(true)
    }

    /// Fs family: `ESC F` with F in columns 6-7 (not DEL); standardized
    /// single functions.
    fn escape_standard(&mut self, c: u8) -> Result<bool, EmitError> {
        if self.opts.escapes {
            self.out.single_escape(&format!("Esc {}", c as char))?;
        }
        match c {
            0x60 => self.maybe_label("DMI", "DISABLE MANUAL INPUT")?,
            0x61 => self.maybe_label("INT", "INTERRUPT")?,
            0x62 => self.maybe_label("EMI", "END OF MEDIUM")?,
            0x63 => self.maybe_label("RIS", "RESET TO INITIAL STATE")?,
            0x64 => self.maybe_label("CMD", "CODING METHOD DELIMITER")?,
            0x6e => self.maybe_label("LS2", "LOCKING-SHIFT TWO")?,
            0x6f => self.maybe_label("LS3", "LOCKING-SHIFT THREE")?,
            0x7c => self.maybe_label("LS3R", "LOCKING-SHIFT THREE RIGHT")?,
            0x7d => self.maybe_label("LS2R", "LOCKING-SHIFT TWO RIGHT")?,
            0x7e => self.maybe_label("LS1R", "LOCKING-SHIFT ONE RIGHT")?,
            _ => {}
        }
        Ok(true)
    }

    fn maybe_label(&mut self, acro: &str, name: &str) -> Result<(), EmitError> {
        if self.opts.labels {
            self.out.single_label(&format!("{acro}: {name}"))?;
        }
        Ok(())
    }

    /// `ESC 0x21..0x22 F`: control character set designation.
    fn control_designation(&mut self, intermediate: u8, fin: u8) -> Result<(), EmitError> {
        if intermediate == 0x21 {
            self.maybe_label("CZD", "C0-DESIGNATE")?;
            if self.opts.descriptions
                && let Some(name) = charset::c0_set_name(fin)
            {
                self.out
                    .single_desc(&format!("Designate C0 Control Set of {name}."))?;
            }
        } else {
            self.maybe_label("C1D", "C1-DESIGNATE")?;
            if self.opts.descriptions
                && let Some(name) = charset::c1_set_name(fin)
            {
                self.out
                    .single_desc(&format!("Designate C1 Control Set of {name}."))?;
            }
        }
        Ok(())
    }

    /// `ESC 0x28..0x2F [I1] F`: single-byte graphic set designation.
    fn graphic_designation(&mut self, intermediate: u8, sub: u8, fin: u8) -> Result<(), EmitError> {
        let (set, designate) = match intermediate {
            0x28..=0x2b => (4u8, intermediate - 0x28),
            0x2d..=0x2f => (6u8, intermediate - 0x2c),
            _ => return Ok(()),
        };
        let slot = [b'Z', b'1', b'2', b'3'][designate as usize] as char;
        if self.opts.labels {
            self.out.single_label(&format!(
                "G{slot}D{set}: G{designate}-DESIGNATE 9{set}-SET"
            ))?;
        }
        if self.opts.descriptions {
            let mut designator = String::new();
            if sub != 0 {
                designator.push(sub as char);
            }
            designator.push(fin as char);
            let explanation = if fin >> 4 == 3 {
                " (private)".to_string()
            } else {
                let name = if set == 4 {
                    if sub == 0 {
                        charset::graphic_94_name(fin)
                    } else if sub == 0x21 {
                        charset::graphic_94_1988_name(fin)
                    } else {
                        None
                    }
                } else if sub == 0 {
                    charset::graphic_96_name(fin)
                } else {
                    None
                };
                name.map(|n| format!(" ({n})")).unwrap_or_default()
            };
            self.out.single_desc(&format!(
                "Designate 9{set}-character set {designator}{explanation} to G{designate}."
            ))?;
        }
        Ok(())
    }

    /// `ESC 0x24 [I1] F`: multibyte graphic set designation.
    fn multibyte_designation(&mut self, sub: u8, fin: u8) -> Result<(), EmitError> {
        let expected_plain = if matches!(fin, 0x40..=0x42) { 0 } else { 0x28 };
        let (set, designate) = if sub == expected_plain {
            (4u8, 0u8)
        } else if (0x29..=0x2b).contains(&sub) {
            (4, sub - 0x28)
        } else if (0x2d..=0x2f).contains(&sub) {
            (6, sub - 0x2c)
        } else {
            return Ok(());
        };
        let slot = [b'Z', b'1', b'2', b'3'][designate as usize] as char;
        if self.opts.labels {
            self.out.single_label(&format!(
                "G{slot}DM{set}: G{designate}-DESIGNATE MULTIBYTE 9{set}-SET"
            ))?;
        }
        if self.opts.descriptions {
            let explanation = if fin >> 4 == 3 {
                " (private)".to_string()
            } else {
                let name = if set == 4 {
                    charset::multibyte_name(fin)
                } else {
                    None
                };
                name.map(|n| format!(" ({n})")).unwrap_or_default()
            };
            self.out.single_desc(&format!(
                "Designate multibyte 9{set}-character set {}{explanation} to G{designate}.",
                fin as char
            ))?;
        }
        Ok(())
    }
}
