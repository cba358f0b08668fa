//! Control-sequence recognition and dispatch.
//!
//! After `ESC [`, a control sequence is parameter bytes (column 3), then
//! intermediate bytes (column 2), then one final byte (0x40..=0x7E). The
//! recognizer validates that shape over the savepointed input; the
//! transcriber then re-consumes the body to echo it, tokenize parameters,
//! and run the dispatch entry selected by (intermediates, final byte).
//!
//! Dispatch entries are tagged records: an optional acronym/label pair,
//! a parameter-shape tag with defaults, and a [`Describe`] tag naming the
//! description routine. One `match` in [`describe`] replaces a table of
//! function pointers.

use crate::{Options, echo_byte, modes, sgr};
use core_emit::{EmitError, Emitter};
use core_input::InputBuffer;
use std::io::{Read, Write};
use tracing::debug;

/// Parameters beyond this count are dropped, silently.
pub const PARAM_LIMIT: usize = 255;

/// 0x3A is not a standard private marker, but nothing standard uses it
/// either; it is treated as private here.
fn is_private_param(c: u8) -> bool {
    (0x3c..=0x3f).contains(&c) || c == 0x3a
}

fn is_intermediate(c: u8) -> bool {
    (0x20..=0x2f).contains(&c)
}

fn is_final(c: u8) -> bool {
    (0x40..=0x7e).contains(&c)
}

/// Parameter shape expected by a control function. `Pn` families take
/// numeric counts, `Ps` families selector values; `*Any` families accept
/// an open-ended list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    None,
    Pn,
    PnPn,
    PnAny,
    Ps,
    PsPs,
    PsAny,
}

/// Description routine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Describe {
    InsertChars,
    CursorMove,
    CursorToLineStart,
    CursorColumn,
    CursorPosition,
    TabMove,
    EraseExtent,
    InsertLines,
    DeleteLines,
    EraseField,
    DeleteChars,
    PositionReport,
    Scroll,
    TabControl,
    EraseChars,
    DeviceAttributes,
    CursorToLine,
    TabClear,
    ModeSet,
    MediaCopy,
    Rendition,
    DeviceStatus,
    ScrollRegion,
    WindowOp,
    LocatorEnable,
    LocatorEvents,
    LocatorRequest,
    MouseReport,
}

#[derive(Debug, Clone, Copy)]
pub struct CsiHandler {
    pub acro: Option<&'static str>,
    pub label: Option<&'static str>,
    pub params: ParamKind,
    pub describe: Option<Describe>,
    /// Defaults used for absent parameters; -1 means "omit".
    pub default0: i32,
    pub default1: i32,
}

impl CsiHandler {
    fn takes_pair(&self) -> bool {
        matches!(self.params, ParamKind::PnPn | ParamKind::PsPs)
    }

    /// Default for the parameter at position `n`.
    fn default_for(&self, n: usize) -> i32 {
        if n == 1 && self.takes_pair() {
            self.default1
        } else {
            self.default0
        }
    }
}

const fn described(
    acro: &'static str,
    label: &'static str,
    params: ParamKind,
    describe: Describe,
    default0: i32,
) -> CsiHandler {
    CsiHandler {
        acro: Some(acro),
        label: Some(label),
        params,
        describe: Some(describe),
        default0,
        default1: -1,
    }
}

const fn described2(
    acro: &'static str,
    label: &'static str,
    params: ParamKind,
    describe: Describe,
    default0: i32,
    default1: i32,
) -> CsiHandler {
    CsiHandler {
        acro: Some(acro),
        label: Some(label),
        params,
        describe: Some(describe),
        default0,
        default1,
    }
}

const fn labeled(acro: &'static str, label: &'static str) -> CsiHandler {
    CsiHandler {
        acro: Some(acro),
        label: Some(label),
        params: ParamKind::None,
        describe: None,
        default0: -1,
        default1: -1,
    }
}

const UNASSIGNED: CsiHandler = CsiHandler {
    acro: None,
    label: None,
    params: ParamKind::None,
    describe: None,
    default0: -1,
    default1: -1,
};

/// Control functions with no intermediate byte, indexed by final - 0x40.
static STANDARD: [CsiHandler; 48] = [
    described("ICH", "INSERT CHARACTER", ParamKind::Pn, Describe::InsertChars, 1),
    described("CUU", "CURSOR UP", ParamKind::Pn, Describe::CursorMove, 1),
    described("CUD", "CURSOR DOWN", ParamKind::Pn, Describe::CursorMove, 1),
    described("CUF", "CURSOR RIGHT", ParamKind::Pn, Describe::CursorMove, 1),
    described("CUB", "CURSOR LEFT", ParamKind::Pn, Describe::CursorMove, 1),
    described("CNL", "CURSOR NEXT LINE", ParamKind::Pn, Describe::CursorToLineStart, 1),
    described("CPL", "CURSOR PRECEDING LINE", ParamKind::Pn, Describe::CursorToLineStart, 1),
    described("CHA", "CURSOR CHARACTER ABSOLUTE", ParamKind::Pn, Describe::CursorColumn, 1),
    described2("CUP", "CURSOR POSITION", ParamKind::PnPn, Describe::CursorPosition, 1, 1),
    described("CHT", "CURSOR FORWARD TABULATION", ParamKind::Pn, Describe::TabMove, 1),
    described("ED", "ERASE IN PAGE", ParamKind::Ps, Describe::EraseExtent, 0),
    described("EL", "ERASE IN LINE", ParamKind::Ps, Describe::EraseExtent, 0),
    described("IL", "INSERT LINE", ParamKind::Pn, Describe::InsertLines, 1),
    described("DL", "DELETE LINE", ParamKind::Pn, Describe::DeleteLines, 1),
    described("EF", "ERASE IN FIELD", ParamKind::Ps, Describe::EraseField, 0),
    labeled("EA", "ERASE IN AREA"),
    described("DCH", "DELETE CHARACTER", ParamKind::Pn, Describe::DeleteChars, 1),
    labeled("SEE", "SELECT EDITING EXTENT"),
    described2("CPR", "ACTIVE POSITION REPORT", ParamKind::PnPn, Describe::PositionReport, 1, 1),
    described("SU", "SCROLL UP", ParamKind::Pn, Describe::Scroll, 1),
    described("SD", "SCROLL DOWN", ParamKind::Pn, Describe::Scroll, 1),
    labeled("NP", "NEXT PAGE"),
    labeled("PP", "PRECEDING PAGE"),
    described("CTC", "CURSOR TABULATION CONTROL", ParamKind::PsAny, Describe::TabControl, 0),
    described("ECH", "ERASE CHARACTER", ParamKind::Pn, Describe::EraseChars, 1),
    described("CVT", "CURSOR LINE TABULATION", ParamKind::Pn, Describe::TabMove, 1),
    described("CBT", "CURSOR BACKWARD TABULATION", ParamKind::Pn, Describe::TabMove, 1),
    labeled("SRS", "START REVERSED STRING"),
    labeled("PTX", "PARALLEL TEXTS"),
    labeled("SDS", "START DIRECTED STRING"),
    labeled("SIMD", "SELECT IMPLICIT MOVEMENT DIRECTION"),
    UNASSIGNED,
    described("HPA", "CHARACTER POSITION ABSOLUTE", ParamKind::Pn, Describe::CursorColumn, 1),
    labeled("HPR", "CHARACTER POSITION FORWARD"),
    labeled("REP", "REPEAT"),
    described("DA", "DEVICE ATTRIBUTES", ParamKind::Ps, Describe::DeviceAttributes, 0),
    described("VPA", "LINE POSITION ABSOLUTE", ParamKind::Pn, Describe::CursorToLine, 1),
    labeled("VPR", "LINE POSITION FORWARD"),
    described2("HVP", "CHARACTER AND LINE POSITION", ParamKind::PnPn, Describe::CursorPosition, 1, 1),
    described("TBC", "TABULATION CLEAR", ParamKind::Ps, Describe::TabClear, 0),
    described("SM", "SET MODE", ParamKind::PsAny, Describe::ModeSet, 0),
    described("MC", "MEDIA COPY", ParamKind::Ps, Describe::MediaCopy, 0),
    labeled("HPB", "CHARACTER POSITION BACKWARD"),
    labeled("VPB", "LINE POSITION BACKWARD"),
    described("RM", "RESET MODE", ParamKind::PsAny, Describe::ModeSet, 0),
    described("SGR", "SELECT GRAPHIC RENDITION", ParamKind::PsAny, Describe::Rendition, 0),
    described("DSR", "DEVICE STATUS REPORT", ParamKind::Ps, Describe::DeviceStatus, 0),
    labeled("DAQ", "DEFINE AREA QUALIFICATION"),
];

/// Control functions with a single 0x20 intermediate, indexed by
/// final - 0x40.
static WITH_SPACE: [CsiHandler; 48] = [
    described("SL", "SCROLL LEFT", ParamKind::Pn, Describe::Scroll, 1),
    described("SR", "SCROLL RIGHT", ParamKind::Pn, Describe::Scroll, 1),
    labeled("GSM", "GRAPHIC SIZE MODIFICATION"),
    labeled("GSS", "GRAPHIC SIZE SELECTION"),
    labeled("FNT", "FONT SELECTION"),
    labeled("TSS", "THIN SPACE SPECIFICATION"),
    labeled("JFY", "JUSTIFY"),
    labeled("SPI", "SPACING INCREMENT"),
    labeled("QUAD", "QUAD"),
    labeled("SSU", "SELECT SIZE UNIT"),
    labeled("PFS", "PAGE FORMAT SELECTION"),
    labeled("SHS", "SELECT CHARACTER SPACING"),
    labeled("SVS", "SELECT LINE SPACING"),
    labeled("IGS", "IDENTIFY GRAPHIC SUBREPERTOIRE"),
    UNASSIGNED,
    labeled("IDCS", "IDENTIFY DEVICE CONTROL STRING"),
    labeled("PPA", "PAGE POSITION ABSOLUTE"),
    labeled("PPR", "PAGE POSITION FORWARD"),
    labeled("PPB", "PAGE POSITION BACKWARD"),
    labeled("SPD", "SELECT PRESENTATION DIRECTIONS"),
    labeled("DTA", "DIMENSION TEXT AREA"),
    labeled("SLH", "SET LINE HOME"),
    labeled("SLL", "SET LINE LIMIT"),
    labeled("FNK", "FUNCTION KEY"),
    labeled("SPQR", "SELECT PRINT QUALITY AND RAPIDITY"),
    labeled("SEF", "SHEET EJECT AND FEED"),
    labeled("PEC", "PRESENTATION EXPAND OR CONTRACT"),
    labeled("SSW", "SET SPACE WIDTH"),
    labeled("SACS", "SET ADDITIONAL CHARACTER SEPARATION"),
    labeled("SAPV", "SELECT ALTERNATIVE PRESENTATION VARIANTS"),
    labeled("STAB", "SELECTIVE TABULATION"),
    labeled("GCC", "GRAPHIC CHARACTER COMBINATION"),
    labeled("TATE", "TABULATION ALIGNED TRAILING EDGE"),
    labeled("TALE", "TABULATION ALIGNED LEADING EDGE"),
    labeled("TAC", "TABULATION ALIGNED CENTRED"),
    labeled("TCC", "TABULATION CENTRED ON CHARACTER"),
    labeled("TSR", "TABULATION STOP REMOVE"),
    labeled("SCO", "SELECT CHARACTER ORIENTATION"),
    labeled("SRCS", "SET REDUCED CHARACTER SEPARATION"),
    labeled("SCS", "SET CHARACTER SPACING"),
    labeled("SLS", "SET LINE SPACING"),
    UNASSIGNED,
    UNASSIGNED,
    labeled("SCP", "SELECT CHARACTER PATH"),
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
];

static SCROLL_REGION_HANDLER: CsiHandler = CsiHandler {
    acro: None,
    label: None,
    params: ParamKind::PnAny,
    describe: Some(Describe::ScrollRegion),
    default0: -1,
    default1: -1,
};

static WINDOW_HANDLER: CsiHandler = CsiHandler {
    acro: None,
    label: None,
    params: ParamKind::PsAny,
    describe: Some(Describe::WindowOp),
    default0: -1,
    default1: -1,
};

static LOCATOR_ENABLE_HANDLER: CsiHandler = described2(
    "DECELR",
    "ENABLE LOCATOR REPORTING",
    ParamKind::PsPs,
    Describe::LocatorEnable,
    0,
    0,
);

static LOCATOR_EVENTS_HANDLER: CsiHandler = described(
    "DECSLE",
    "SELECT LOCATOR EVENTS",
    ParamKind::PsAny,
    Describe::LocatorEvents,
    0,
);

static LOCATOR_REQUEST_HANDLER: CsiHandler = described(
    "DECRQLP",
    "REQUEST LOCATOR POSITION",
    ParamKind::Ps,
    Describe::LocatorRequest,
    0,
);

static MOUSE_HANDLER: CsiHandler = CsiHandler {
    acro: None,
    label: None,
    params: ParamKind::PsAny,
    describe: Some(Describe::MouseReport),
    default0: -1,
    default1: -1,
};

/// Dispatch entry for a validated sequence.
pub fn lookup(intermediates: usize, intermediate: u8, final_byte: u8) -> &'static CsiHandler {
    if final_byte >= 0x70 {
        if intermediates == 0 {
            match final_byte {
                b'r' | b's' => &SCROLL_REGION_HANDLER,
                b't' => &WINDOW_HANDLER,
                _ => &UNASSIGNED,
            }
        } else if intermediates == 1 && intermediate == b'\'' {
            match final_byte {
                b'z' => &LOCATOR_ENABLE_HANDLER,
                b'{' => &LOCATOR_EVENTS_HANDLER,
                b'|' => &LOCATOR_REQUEST_HANDLER,
                _ => &UNASSIGNED,
            }
        } else if intermediates == 1 && intermediate == b'&' && final_byte == b'w' {
            &MOUSE_HANDLER
        } else {
            &UNASSIGNED
        }
    } else if intermediates == 0 {
        &STANDARD[(final_byte - 0x40) as usize]
    } else if intermediates == 1 && intermediate == 0x20 {
        &WITH_SPACE[(final_byte - 0x40) as usize]
    } else {
        &UNASSIGNED
    }
}

/// Validate the sequence body after `ESC [` and find its dispatch entry.
///
/// On success the input is rewound to the start of the body (the `[`
/// itself) so the transcriber can re-consume it; on failure the input is
/// left for the caller to rewind.
pub(crate) fn recognize<R: Read>(input: &mut InputBuffer<R>) -> Option<&'static CsiHandler> {
    #[derive(Clone, Copy, PartialEq)]
    enum Scan {
        First,
        Params,
        Intermediates,
    }

    let mut scan = Scan::First;
    let mut private: u8 = 0;
    let mut intermediate: u8 = 0;
    let mut intermediates: usize = 0;

    loop {
        let c = input.get()?;
        if scan == Scan::First {
            if is_private_param(c) {
                private = c;
            }
            scan = Scan::Params;
        }
        match scan {
            Scan::Params => {
                if is_intermediate(c) {
                    intermediate = c;
                    intermediates += 1;
                    scan = Scan::Intermediates;
                } else if c >> 4 == 3 {
                    // A private marker is only valid as the very first byte.
                    if private == 0 && is_private_param(c) {
                        return None;
                    }
                } else if is_final(c) {
                    input.rewind();
                    return Some(lookup(intermediates, intermediate, c));
                } else {
                    return None;
                }
            }
            Scan::Intermediates => {
                if is_final(c) {
                    input.rewind();
                    return Some(lookup(intermediates, intermediate, c));
                } else if is_intermediate(c) {
                    intermediate = c;
                    intermediates += 1;
                } else {
                    return None;
                }
            }
            Scan::First => unreachable!("first byte is reclassified above"),
        }
    }
}

/// Re-consume a validated sequence: echo it, tokenize parameters, emit the
/// label, and run the description routine.
pub(crate) fn transcribe<R: Read, W: Write>(
    input: &mut InputBuffer<R>,
    out: &mut Emitter<W>,
    opts: &Options,
    handler: &'static CsiHandler,
) -> Result<(), EmitError> {
    let echo = opts.escapes;
    if echo {
        out.open_escape_line()?;
        out.put_str(" Esc")?;
    }
    let _bracket = input.get();
    debug_assert_eq!(_bracket, Some(b'['));
    if echo {
        out.put_str(" [")?;
    }

    let mut params: Vec<u32> = Vec::new();
    let mut private: u8 = 0;
    let mut cur: u32 = 0;
    let mut last: u8 = 0;

    let Some(first) = input.get() else {
        if echo {
            out.finish("")?;
        }
        return Ok(());
    };
    if !is_final(first) && is_private_param(first) {
        private = first;
    }

    let mut c = first;
    loop {
        if c.is_ascii_digit() {
            let digit = u32::from(c - b'0');
            // Overflow clips silently, as real terminals do.
            cur = if last.is_ascii_digit() {
                cur.saturating_mul(10).saturating_add(digit)
            } else {
                digit
            };
        } else {
            if last.is_ascii_digit() {
                if params.len() < PARAM_LIMIT {
                    params.push(cur);
                }
                if echo {
                    out.put_str(&format!(" {cur}"))?;
                }
            } else if (last != 0 || private == 0)
                && !is_intermediate(last)
                && params.len() < PARAM_LIMIT
            {
                // Empty parameter position: take the handler's default.
                let default = handler.default_for(params.len());
                if default >= 0 {
                    params.push(default as u32);
                }
            }
            if echo {
                echo_byte(out, c)?;
            }
        }
        last = c;
        if is_final(c) {
            break;
        }
        let Some(next) = input.get() else { break };
        c = next;
    }
    if echo {
        out.finish("")?;
    }

    debug!(
        target: "seq.csi",
        final_byte = c,
        private,
        params = params.len(),
        "control_sequence"
    );

    if opts.labels {
        emit_label(out, handler, private)?;
    }
    if opts.descriptions
        && let Some(kind) = handler.describe
    {
        finalize_params(handler, &mut params);
        let arity_ok = match handler.params {
            ParamKind::Pn | ParamKind::Ps => params.len() == 1,
            ParamKind::PnPn | ParamKind::PsPs => params.len() == 2,
            _ => true,
        };
        if arity_ok {
            describe(kind, c, private, out, &params)?;
        }
    }
    Ok(())
}

fn emit_label<W: Write>(
    out: &mut Emitter<W>,
    handler: &CsiHandler,
    private: u8,
) -> Result<(), EmitError> {
    if let (Some(acro), Some(label)) = (handler.acro, handler.label) {
        let privmsg = if private != 0 { " (private params)" } else { "" };
        out.single_label(&format!("{acro}: {label}{privmsg}"))?;
    }
    Ok(())
}

/// Fill in trailing defaults once the whole parameter string is known.
fn finalize_params(handler: &CsiHandler, params: &mut Vec<u32>) {
    if params.is_empty() && handler.default0 >= 0 {
        params.push(handler.default0 as u32);
    }
    if params.len() == 1 && handler.takes_pair() && handler.default1 >= 0 {
        params.push(handler.default1 as u32);
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Run one description routine. Routines for private variants check the
/// marker themselves and silently decline markers they do not implement.
pub(crate) fn describe<W: Write>(
    kind: Describe,
    final_byte: u8,
    private: u8,
    out: &mut Emitter<W>,
    params: &[u32],
) -> Result<(), EmitError> {
    match kind {
        Describe::InsertChars => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!(
                "Shift characters after the cursor to make room for {} new character{}.",
                params[0],
                plural(params[0])
            ))
        }
        Describe::CursorMove => {
            const DIRS: [&str; 4] = ["up", "down", "right", "left"];
            const UNITS: [&str; 2] = ["line", "character"];
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            let i = (final_byte - 0x41) as usize;
            out.single_desc(&format!(
                "Move the cursor {} {} {}{}.",
                DIRS[i],
                params[0],
                UNITS[i / 2],
                plural(params[0])
            ))
        }
        Describe::CursorToLineStart => {
            const DIRS: [&str; 2] = ["down", "up"];
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!(
                "Move the cursor to the first column, {} line{} {}.",
                params[0],
                plural(params[0]),
                DIRS[(final_byte - 0x45) as usize]
            ))
        }
        Describe::CursorColumn => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!("Move the cursor to column {}.", params[0]))
        }
        Describe::CursorPosition => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 2);
            out.single_desc(&format!(
                "Move the cursor to line {}, column {}.",
                params[0], params[1]
            ))
        }
        Describe::TabMove => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            let stop_kind = if final_byte == 0x59 { "vertical " } else { "" };
            let dir = if final_byte == 0x5a { "back" } else { "forward" };
            out.single_desc(&format!(
                "Move the cursor {} {} {}tab stop{}.",
                dir,
                params[0],
                stop_kind,
                plural(params[0])
            ))
        }
        Describe::EraseExtent => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            let space = match final_byte {
                0x4a => "screen",
                0x4b => "line",
                _ => "qualified area",
            };
            match params[0] {
                0 => out.single_desc(&format!(
                    "Clear from the cursor to the end of the {space}."
                )),
                1 => out.single_desc(&format!(
                    "Clear from the beginning of the {space} to the cursor."
                )),
                2 => out.single_desc(&format!("Clear the {space}.")),
                _ => Ok(()),
            }
        }
        Describe::InsertLines => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!(
                "Shift lines after the cursor to make room for {} new line{}.",
                params[0],
                plural(params[0])
            ))
        }
        Describe::DeleteLines => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!(
                "Delete {} line{}, shifting the following lines up.",
                params[0],
                plural(params[0])
            ))
        }
        Describe::EraseField => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            match params[0] {
                0 => out.single_desc("Clear from the cursor to the next tab stop."),
                1 => out.single_desc("Clear from the previous tab stop to the cursor."),
                2 => out.single_desc("Clear from the previous tab stop to the next tab stop."),
                _ => Ok(()),
            }
        }
        Describe::DeleteChars => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            out.single_desc(&format!(
                "Delete {} character{}, shifting the following characters left.",
                params[0],
                plural(params[0])
            ))
        }
        Describe::PositionReport => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 2);
            out.single_desc(&format!(
                "Report that the cursor is located at line {}, column {}",
                params[0], params[1]
            ))
        }
        Describe::Scroll => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 1);
            let (dir, unit) = match final_byte {
                0x53 => ("up", "line"),
                0x54 => ("down", "line"),
                0x41 => ("right", "column"),
                _ => ("left", "column"),
            };
            out.single_desc(&format!(
                "Scroll {} by {} {}{}",
                dir,
                params[0],
                unit,
                plural(params[0])
            ))
        }
        Describe::TabControl => {
            const MESSAGES: [&str; 7] = [
                "Set a horizontal tab stop at the cursor position.",
                "Set a vertical tab stop at the current line.",
                "Clear the horizontal tab stop at the cursor position.",
                "Clear the vertical tab stop at the current line.",
                "Clear all horizontal tab stops in the current line.",
                "Clear all horizontal tab stops.",
                "Clear all vertical tab stops.",
            ];
            if private != 0 {
                return Ok(());
            }
            for &p in params {
                if let Some(msg) = MESSAGES.get(p as usize) {
                    out.single_desc(msg)?;
                }
            }
            Ok(())
        }
        Describe::EraseChars => {
            if private != 0 {
                return Ok(());
            }
            out.single_desc(&format!(
                "Erase {} character{}, starting at the cursor.",
                params[0],
                plural(params[0])
            ))
        }
        Describe::DeviceAttributes => {
            if private != 0 || params[0] != 0 {
                return Ok(());
            }
            out.single_desc("Request terminal identification.")
        }
        Describe::CursorToLine => {
            if private != 0 {
                return Ok(());
            }
            out.single_desc(&format!("Move the cursor to line {}.", params[0]))
        }
        Describe::TabClear => {
            const MESSAGES: [&str; 6] = [
                "Clear the horizontal tab stop at the cursor position.",
                "Clear the vertical tab stop at the current line.",
                "Clear all horizontal tab stops in the current line.",
                "Clear all horizontal tab stops.",
                "Clear all vertical tab stops.",
                "Clear all tab stops.",
            ];
            if private != 0 {
                return Ok(());
            }
            if let Some(msg) = MESSAGES.get(params[0] as usize) {
                out.single_desc(msg)?;
            }
            Ok(())
        }
        Describe::ModeSet => describe_mode_set(final_byte == 0x68, private, out, params),
        Describe::MediaCopy => {
            const MESSAGES: [&str; 8] = [
                "Initiate transfer to a primary auxiliary device.",
                "Initiate transfer from a primary auxiliary device.",
                "Initiate transfer to a secondary auxiliary device.",
                "Initiate transfer from a secondary auxiliary device.",
                "Stop relay to a primary auxiliary device.",
                "Start relay to a primary auxiliary device.",
                "Stop relay to a secondary auxiliary device.",
                "Start relay to a secondary auxiliary device.",
            ];
            if private == b'?' {
                let msg = match params[0] {
                    1 => Some("(DEC) Print current line."),
                    4 => Some("(DEC) Turn off autoprint mode."),
                    5 => Some("(DEC) Turn on autoprint mode."),
                    _ => None,
                };
                if let Some(msg) = msg {
                    out.single_desc(msg)?;
                }
                return Ok(());
            }
            if private != 0 {
                return Ok(());
            }
            if let Some(msg) = MESSAGES.get(params[0] as usize) {
                out.single_desc(msg)?;
            }
            Ok(())
        }
        Describe::Rendition => describe_rendition(private, out, params),
        Describe::DeviceStatus => {
            const MESSAGES: [&str; 7] = [
                "Device reports ready.",
                "Device reports ready, send DSR request later.",
                "Device reports ready, will send DSR later.",
                "Device reports error, send DSR request later.",
                "Device reports error, will send DSR later.",
                "DSR requested.",
                "Request cursor position report.",
            ];
            if private == b'>' {
                let resource = match params[0] {
                    1 => Some("modifyCursorKeys"),
                    2 => Some("modifyFunctionKeys"),
                    4 => Some("modifyOtherKeys"),
                    _ => None,
                };
                if let Some(resource) = resource {
                    out.single_desc(&format!("(Xterm) Disable {resource}."))?;
                }
            }
            if private != 0 {
                return Ok(());
            }
            if let Some(msg) = MESSAGES.get(params[0] as usize) {
                out.single_desc(msg)?;
            }
            Ok(())
        }
        Describe::ScrollRegion => describe_scroll_region(final_byte, private, out, params),
        Describe::WindowOp => describe_window_op(private, out, params),
        Describe::LocatorEnable => {
            if private != 0 {
                return Ok(());
            }
            debug_assert_eq!(params.len(), 2);
            if params[0] > 2 || params[1] > 2 {
                return Ok(());
            }
            match params[0] {
                0 => return out.single_desc("Disable locator reports."),
                1 => out.single_desc("Enable locator reports.")?,
                _ => out.single_desc("Enable a single locator report.")?,
            }
            match params[1] {
                0 | 2 => out.single_desc(" Report position in character cells."),
                _ => out.single_desc(" Report position in pixels."),
            }
        }
        Describe::LocatorEvents => {
            const MESSAGES: [&str; 5] = [
                "Only respond to explicit locator report requests.",
                "Report button-down transitions.",
                "Do not report button-down transitions.",
                "Report button-up transitions.",
                "Do not report button-up transitions.",
            ];
            if private != 0 {
                return Ok(());
            }
            for &p in params {
                if let Some(msg) = MESSAGES.get(p as usize) {
                    out.single_desc(msg)?;
                }
            }
            Ok(())
        }
        Describe::LocatorRequest => {
            if private != 0 || params[0] > 1 {
                return Ok(());
            }
            out.single_desc("Request a single DECLRP locator report.")
        }
        Describe::MouseReport => {
            const BUTTONS: [&str; 4] = ["right", "middle", "left", "M4"];
            if private != 0 || params.len() < 4 {
                return Ok(());
            }
            let downs = if params[1] == 0 {
                String::new()
            } else {
                let mut names = Vec::new();
                for (bit, name) in BUTTONS.iter().enumerate() {
                    if params[1] & (1 << bit) != 0 {
                        names.push(*name);
                    }
                }
                format!(" [down:{}]", names.join("/"))
            };
            out.single_desc(&format!(
                "(DEC) Mouse{} at [{},{}].",
                downs, params[2], params[3]
            ))
        }
    }
}

fn describe_mode_set<W: Write>(
    set: bool,
    private: u8,
    out: &mut Emitter<W>,
    params: &[u32],
) -> Result<(), EmitError> {
    for &p in params {
        if private == b'?' {
            if let Some(msg) = modes::private_mode_description(p, set) {
                out.single_desc(msg)?;
            }
            continue;
        }
        if private != 0 {
            return Ok(());
        }
        let Some(mode) = modes::standard_mode(p) else {
            continue;
        };
        let word = if set { mode.set } else { mode.reset };
        out.single_desc(&format!("{} ({}) -> {}", mode.name, mode.acro, word))?;
    }
    Ok(())
}

fn describe_rendition<W: Write>(
    private: u8,
    out: &mut Emitter<W>,
    params: &[u32],
) -> Result<(), EmitError> {
    debug_assert!(!params.is_empty());
    if private == b'>' {
        let resource = match params[0] {
            1 => Some("modifyCursorKeys"),
            2 => Some("modifyFunctionKeys"),
            4 => Some("modifyOtherKeys"),
            _ => None,
        };
        let arg = if params.len() > 1 && params[1] > 0 {
            params[1]
        } else {
            0
        };
        if let Some(resource) = resource {
            out.single_desc(&format!("(Xterm) Set {resource} to {arg}."))?;
        }
    }
    if private != 0 {
        return Ok(());
    }
    if params.len() >= 2 && (params[0] == 38 || params[0] == 48) {
        let layer = if params[0] == 48 {
            "background"
        } else {
            "foreground"
        };
        if params.len() == 3 && params[1] == 5 {
            out.single_desc(&format!("Set {} color to index {}.", layer, params[2]))?;
        } else {
            out.single_desc(&format!("Set {layer} color (unknown)."))?;
        }
        return Ok(());
    }
    for &p in params {
        if let Some(msg) = sgr::attribute_description(p) {
            out.single_desc(msg)?;
        }
        if let Some(note) = sgr::rxvt_default_note(p) {
            out.single_desc(note)?;
        }
    }
    Ok(())
}

fn describe_scroll_region<W: Write>(
    final_byte: u8,
    private: u8,
    out: &mut Emitter<W>,
    params: &[u32],
) -> Result<(), EmitError> {
    if private == b'?' {
        if final_byte == b'r' {
            out.single_desc("*** (Xterm) Restore saved settings for specified modes:")?;
        } else {
            out.single_desc("*** (Xterm) Save current state of specified modes:")?;
        }
        return describe_mode_set(true, private, out, params);
    }
    if private != 0 || final_byte != b'r' {
        return Ok(());
    }
    match params.len() {
        0 => out.single_desc("(DEC) Set the scrolling region to full size."),
        2 => out.single_desc(&format!(
            "(DEC) Set the scrolling region to from line {} to line {}.",
            params[0], params[1]
        )),
        _ => Ok(()),
    }
}

fn describe_window_op<W: Write>(
    private: u8,
    out: &mut Emitter<W>,
    params: &[u32],
) -> Result<(), EmitError> {
    if private != 0 || params.is_empty() {
        return Ok(());
    }
    match params[0] {
        1 => out.single_desc("(dtterm) De-iconify window."),
        2 => out.single_desc("(dtterm) Iconify window."),
        3 if params.len() >= 3 => out.single_desc(&format!(
            "(dtterm) Move window to [{}, {}].",
            params[1], params[2]
        )),
        4 if params.len() >= 3 => out.single_desc(&format!(
            "(dtterm) Resize the window to height {} and width {} in pixels.",
            params[1], params[2]
        )),
        5 => out.single_desc("(dtterm) Raise the window to the front of the stacking order."),
        6 => out.single_desc("(dtterm) Lower the xterm window to the bottom of the stacking order."),
        7 => out.single_desc("(dtterm) Refresh the window."),
        8 if params.len() >= 3 => out.single_desc(&format!(
            "(dtterm) Resize the text area to height {} and width {} in characters.",
            params[1], params[2]
        )),
        9 if params.len() >= 2 => match params[1] {
            0 => out.single_desc("(Xterm) Restore maximized window."),
            1 => out.single_desc("(Xterm) Maximize window."),
            _ => Ok(()),
        },
        11 => out.single_desc(
            "(dtterm) Request report on the window state (iconified/not iconified).",
        ),
        13 => out.single_desc("(dtterm) Request report on the window position."),
        14 => out.single_desc("(dtterm) Request report on window size in pixels."),
        18 => out.single_desc("(dtterm) Request report on text area size in characters."),
        19 => out.single_desc("(Xterm) Request report on the whole screen size in characters."),
        20 => out.single_desc("(dtterm) Request report of the window's icon label."),
        21 => out.single_desc("(dtterm) Request report of the window's title."),
        p if p >= 24 => out.single_desc(&format!("(Xterm) Resize the window to {p} lines.")),
        _ => Ok(()),
    }
}
