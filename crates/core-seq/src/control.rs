//! Names for the C0 and C1 control ranges.

/// C0 control names, indexed by byte value.
pub const C0_NAMES: [&str; 32] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "IS4", "IS3", "IS2", "IS1",
];

/// Acronym and long name for each C1 control, indexed by `byte - 0x40`
/// (the 7-bit `ESC Fe` form). Gaps are unassigned code points.
const C1_LABELS: [Option<(&str, &str)>; 32] = [
    None,
    None,
    Some(("BPH", "BREAK PERMITTED HERE")),
    Some(("NBH", "NO BREAK HERE")),
    None,
    Some(("NEL", "NEXT LINE")),
    Some(("SSA", "START OF SELECTED AREA")),
    Some(("ESA", "END OF SELECTED AREA")),
    Some(("HTS", "CHARACTER TABULATION SET")),
    Some(("HTJ", "CHARACTER TABULATION WITH JUSTIFICATION")),
    Some(("VTS", "LINE TABULATION SET")),
    Some(("PLD", "PARTIAL LINE FORWARD")),
    Some(("PLU", "PARTIAL LINE BACKWARD")),
    Some(("RI", "REVERSE LINE FEED")),
    Some(("SS2", "SINGLE-SHIFT TWO")),
    Some(("SS3", "SINGLE-SHIFT THREE")),
    Some(("DCS", "DEVICE CONTROL STRING")),
    Some(("PU1", "PRIVATE USE ONE")),
    Some(("PU2", "PRIVATE USE TWO")),
    Some(("STS", "SET TRANSMIT STATE")),
    Some(("CCH", "CANCEL CHARACTER")),
    Some(("MW", "MESSAGE WAITING")),
    Some(("SPA", "START OF GUARDED AREA")),
    Some(("EPA", "END OF GUARDED AREA")),
    Some(("SOS", "START OF STRING")),
    None,
    Some(("SCI", "SINGLE CHARACTER INTRODUCER")),
    Some(("CSI", "CONTROL SEQUENCE INTRODUCER")),
    Some(("ST", "STRING TERMINATOR")),
    Some(("OSC", "OPERATING SYSTEM COMMAND")),
    Some(("PM", "PRIVACY MESSAGE")),
    Some(("APC", "APPLICATION PROGRAM COMMAND")),
];

/// Label for the C1 control designated by `ESC fe`, `fe` in `0x40..=0x5F`.
pub fn c1_label(fe: u8) -> Option<(&'static str, &'static str)> {
    C1_LABELS.get(fe.wrapping_sub(0x40) as usize).copied()?
}
