//! Transcript line writer.
//!
//! Every transcript line begins with a sigil naming its role:
//!
//! | sigil | role |
//! |---|---|
//! | `\|` ... `\|` | text run (`\|.` when closed by a newline) |
//! | `.` | control run |
//! | `:` | echoed escape bytes |
//! | `&` | acronym and long label |
//! | `"` | description |
//! | `@` | delay in seconds |
//!
//! The writer tracks the logical line length (color escapes excluded) and
//! wraps at a fixed column with per-kind continuation markers: a broken
//! text run ends in `|-` and resumes with `-|`; control and escape lines
//! resume with their own sigil. Write failures surface as [`EmitError`]
//! and propagate to the caller; the writer holds no global state.

pub mod style;

pub use style::{DEFAULT_PALETTE_SPEC, Palette};

use std::io::{self, Write};
use thiserror::Error;

/// Logical column limit, continuation markers included.
pub const LINE_MAX: usize = 78;

#[derive(Debug, Error)]
#[error("transcript write failed: {0}")]
pub struct EmitError(#[from] io::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Text,
    Ctrl,
    Escape,
    Label,
    Desc,
    Delay,
}

#[derive(Debug, Clone, Copy)]
struct OpenLine {
    kind: LineKind,
    break_end: &'static str,
    cont_start: &'static str,
}

pub struct Emitter<W> {
    out: W,
    palette: Palette,
    line_max: usize,
    nc: usize,
    open: Option<OpenLine>,
}

fn params_for(palette: &Palette, kind: LineKind) -> Option<&str> {
    match kind {
        LineKind::Text => palette.text.as_deref(),
        LineKind::Ctrl => palette.ctrl.as_deref(),
        LineKind::Escape => palette.escape.as_deref(),
        LineKind::Label => palette.label.as_deref(),
        LineKind::Desc => palette.desc.as_deref(),
        LineKind::Delay => palette.delay.as_deref(),
    }
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self::with_palette(out, Palette::default())
    }

    pub fn with_palette(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            line_max: LINE_MAX,
            nc: 0,
            open: None,
        }
    }

    /// Open a text run: `|` sigil, `|-`/`-|` continuation pair.
    pub fn open_text_run(&mut self) -> Result<(), EmitError> {
        self.open_run(LineKind::Text, "|", "|-", "-|")
    }

    /// Open a control run: `.` sigil, continuation lines restart with `.`.
    pub fn open_ctrl_run(&mut self) -> Result<(), EmitError> {
        self.open_run(LineKind::Ctrl, ".", "", ".")
    }

    /// Open an escape echo line: `:` sigil, continuation lines restart
    /// with `: `.
    pub fn open_escape_line(&mut self) -> Result<(), EmitError> {
        self.open_run(LineKind::Escape, ":", "", ": ")
    }

    pub fn put_byte(&mut self, byte: u8) -> Result<(), EmitError> {
        self.ensure_space(1)?;
        self.out.write_all(&[byte])?;
        Ok(())
    }

    pub fn put_str(&mut self, s: &str) -> Result<(), EmitError> {
        self.ensure_space(s.len())?;
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Close the open line with `suffix`. With no line open an empty
    /// suffix is a no-op, so an interrupted run can always be finished
    /// safely.
    pub fn finish(&mut self, suffix: &str) -> Result<(), EmitError> {
        let Some(line) = self.open.take() else {
            if !suffix.is_empty() {
                self.out.write_all(suffix.as_bytes())?;
                self.out.write_all(b"\n")?;
            }
            return Ok(());
        };
        if self.nc + suffix.len() > self.line_max {
            self.break_line(&line)?;
        }
        self.write_marker(line.kind, suffix)?;
        self.style_off(line.kind)?;
        self.out.write_all(b"\n")?;
        self.nc = 0;
        Ok(())
    }

    pub fn single_escape(&mut self, text: &str) -> Result<(), EmitError> {
        self.single(LineKind::Escape, ": ", text)
    }

    pub fn single_label(&mut self, text: &str) -> Result<(), EmitError> {
        self.single(LineKind::Label, "& ", text)
    }

    pub fn single_desc(&mut self, text: &str) -> Result<(), EmitError> {
        self.single(LineKind::Desc, "\" ", text)
    }

    pub fn single_delay(&mut self, seconds: f64) -> Result<(), EmitError> {
        self.single(LineKind::Delay, "@ ", &format!("{seconds:.6}"))
    }

    pub fn flush(&mut self) -> Result<(), EmitError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn open_run(
        &mut self,
        kind: LineKind,
        start: &'static str,
        break_end: &'static str,
        cont_start: &'static str,
    ) -> Result<(), EmitError> {
        self.abandon_open()?;
        self.style_on(kind)?;
        self.write_marker(kind, start)?;
        self.nc = start.len();
        self.open = Some(OpenLine {
            kind,
            break_end,
            cont_start,
        });
        Ok(())
    }

    fn single(&mut self, kind: LineKind, prefix: &str, text: &str) -> Result<(), EmitError> {
        self.abandon_open()?;
        self.style_on(kind)?;
        self.out.write_all(prefix.as_bytes())?;
        self.out.write_all(text.as_bytes())?;
        self.style_off(kind)?;
        self.out.write_all(b"\n")?;
        self.nc = 0;
        Ok(())
    }

    /// Close a dangling line without its suffix. Used when a new line
    /// starts while another is open (an escape sequence interrupting a
    /// control run).
    fn abandon_open(&mut self) -> Result<(), EmitError> {
        if let Some(line) = self.open.take() {
            self.style_off(line.kind)?;
            self.out.write_all(b"\n")?;
            self.nc = 0;
        }
        Ok(())
    }

    fn ensure_space(&mut self, addition: usize) -> Result<(), EmitError> {
        let Some(line) = self.open else {
            return Ok(());
        };
        if self.nc + addition > self.line_max || self.nc + line.break_end.len() == self.line_max {
            self.break_line(&line)?;
        }
        self.nc += addition;
        Ok(())
    }

    fn break_line(&mut self, line: &OpenLine) -> Result<(), EmitError> {
        self.write_marker(line.kind, line.break_end)?;
        self.style_off(line.kind)?;
        self.out.write_all(b"\n")?;
        self.style_on(line.kind)?;
        self.write_marker(line.kind, line.cont_start)?;
        self.nc = line.cont_start.len();
        Ok(())
    }

    fn style_on(&mut self, kind: LineKind) -> Result<(), EmitError> {
        if let Some(params) = params_for(&self.palette, kind).map(str::to_owned) {
            write!(self.out, "\x1b[{params}m")?;
        }
        Ok(())
    }

    fn style_off(&mut self, kind: LineKind) -> Result<(), EmitError> {
        if params_for(&self.palette, kind).is_some() {
            self.out.write_all(b"\x1b[0m")?;
        }
        Ok(())
    }

    /// Sigil and continuation markers. Text runs may style their bar
    /// markers separately from the run body.
    fn write_marker(&mut self, kind: LineKind, s: &str) -> Result<(), EmitError> {
        if s.is_empty() {
            return Ok(());
        }
        if kind == LineKind::Text && self.palette.text_decor.is_some() {
            let decor = self.palette.text_decor.clone().unwrap_or_default();
            let body = self.palette.text.clone();
            if body.is_some() {
                self.out.write_all(b"\x1b[0m")?;
            }
            write!(self.out, "\x1b[{decor}m")?;
            self.out.write_all(s.as_bytes())?;
            self.out.write_all(b"\x1b[0m")?;
            if let Some(body) = body {
                write!(self.out, "\x1b[{body}m")?;
            }
            return Ok(());
        }
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(f: impl FnOnce(&mut Emitter<Vec<u8>>)) -> String {
        let mut em = Emitter::new(Vec::new());
        f(&mut em);
        String::from_utf8(em.into_inner()).unwrap()
    }

    #[test]
    fn text_run_closed_by_newline() {
        let out = collect(|em| {
            em.open_text_run().unwrap();
            for b in b"ABC" {
                em.put_byte(*b).unwrap();
            }
            em.finish("|.").unwrap();
        });
        assert_eq!(out, "|ABC|.\n");
    }

    #[test]
    fn text_run_closed_by_control() {
        let out = collect(|em| {
            em.open_text_run().unwrap();
            em.put_byte(b'x').unwrap();
            em.finish("|").unwrap();
        });
        assert_eq!(out, "|x|\n");
    }

    #[test]
    fn finish_without_open_line_is_silent() {
        let out = collect(|em| em.finish("").unwrap());
        assert_eq!(out, "");
    }

    #[test]
    fn long_text_run_wraps_with_bar_markers() {
        let out = collect(|em| {
            em.open_text_run().unwrap();
            for _ in 0..100 {
                em.put_byte(b'a').unwrap();
            }
            em.finish("|").unwrap();
        });
        let expected = format!("|{}|-\n-|{}|\n", "a".repeat(75), "a".repeat(25));
        assert_eq!(out, expected);
        let first = out.lines().next().unwrap();
        assert_eq!(first.len(), LINE_MAX);
    }

    #[test]
    fn control_run_continuation_restarts_with_dot() {
        let out = collect(|em| {
            em.open_ctrl_run().unwrap();
            // 20 six-character entries exceed one line
            for _ in 0..20 {
                em.put_str(" BEL/^G").unwrap();
            }
            em.finish("").unwrap();
        });
        let mut lines = out.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();
        assert!(first.starts_with(". BEL/^G"));
        assert!(first.len() <= LINE_MAX);
        assert!(second.starts_with(". BEL/^G"));
    }

    #[test]
    fn escape_line_continuation_restarts_with_colon() {
        let out = collect(|em| {
            em.open_escape_line().unwrap();
            em.put_str(" Esc").unwrap();
            for _ in 0..30 {
                em.put_str(" ; 99").unwrap();
            }
            em.finish("").unwrap();
        });
        let mut lines = out.lines();
        lines.next().unwrap();
        assert!(lines.next().unwrap().starts_with(": "));
    }

    #[test]
    fn single_lines_carry_their_sigils() {
        let out = collect(|em| {
            em.single_escape("Esc X").unwrap();
            em.single_label("SOS: START OF STRING").unwrap();
            em.single_desc("Clear the screen.").unwrap();
            em.single_delay(0.123456).unwrap();
        });
        assert_eq!(
            out,
            ": Esc X\n& SOS: START OF STRING\n\" Clear the screen.\n@ 0.123456\n"
        );
    }

    #[test]
    fn new_line_abandons_open_run_without_suffix() {
        let out = collect(|em| {
            em.open_ctrl_run().unwrap();
            em.put_str(" BEL/^G").unwrap();
            em.single_escape("Esc X").unwrap();
        });
        assert_eq!(out, ". BEL/^G\n: Esc X\n");
    }

    #[test]
    fn styled_lines_wrap_content_in_sgr() {
        let mut palette = Palette::default();
        palette.apply_spec(".=31");
        let mut em = Emitter::with_palette(Vec::new(), palette);
        em.open_ctrl_run().unwrap();
        em.put_str(" BEL").unwrap();
        em.finish("").unwrap();
        let out = String::from_utf8(em.into_inner()).unwrap();
        assert_eq!(out, "\x1b[31m. BEL\x1b[0m\n");
    }

    #[test]
    fn text_decor_styles_bars_separately() {
        let mut palette = Palette::default();
        palette.apply_spec("|>=36;7,|=2");
        let mut em = Emitter::with_palette(Vec::new(), palette);
        em.open_text_run().unwrap();
        em.put_byte(b'A').unwrap();
        em.finish("|").unwrap();
        let out = String::from_utf8(em.into_inner()).unwrap();
        assert_eq!(
            out,
            "\x1b[36;7m\x1b[0m\x1b[2m|\x1b[0m\x1b[36;7mA\x1b[0m\x1b[2m|\x1b[0m\x1b[36;7m\x1b[0m\n"
        );
    }
}
