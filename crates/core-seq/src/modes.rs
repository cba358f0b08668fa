//! Mode descriptions for the set-mode and reset-mode control functions.
//!
//! Standard modes come from the ECMA-48 mode table; private modes are the
//! DEC/XTerm extension space selected by a `?` parameter prefix. Both are
//! plain data consulted by the dispatch layer.

pub struct ModeInfo {
    pub acro: &'static str,
    pub name: &'static str,
    /// Wording for the reset state, then the set state.
    pub reset: &'static str,
    pub set: &'static str,
}

const fn m(
    acro: &'static str,
    name: &'static str,
    reset: &'static str,
    set: &'static str,
) -> Option<ModeInfo> {
    Some(ModeInfo {
        acro,
        name,
        reset,
        set,
    })
}

const STANDARD_MODES: [Option<ModeInfo>; 23] = [
    None,
    m("GATM", "GUARDED AREA TRANSFER MODE", "GUARD", "ALL"),
    m("KAM", "KEYBOARD ACTION MODE", "ENABLED", "DISABLED"),
    m("CRM", "CONTROL REPRESENTATION MODE", "CONTROL", "GRAPHIC"),
    m("IRM", "INSERTION REPLACEMENT MODE", "REPLACE", "INSERT"),
    m("SRTM", "STATUS REPORT TRANSFER MODE", "NORMAL", "DIAGNOSTIC"),
    m("ERM", "ERASURE MODE", "PROTECT", "ALL"),
    m("VEM", "LINE EDITING MODE", "FOLLOWING", "PRECEDING"),
    m("BDSM", "BI-DIRECTIONAL SUPPORT MODE", "EXPLICIT", "IMPLICIT"),
    m("DCSM", "DEVICE COMPONENT SELECT MODE", "PRESENTATION", "DATA"),
    m("HEM", "CHARACTER EDITING MODE", "FOLLOWING", "PRECEDING"),
    m("PUM", "POSITIONING UNIT MODE", "CHARACTER", "SIZE"),
    m("SRM", "SEND/RECEIVE MODE", "MONITOR", "SIMULTANEOUS"),
    m("FEAM", "FORMAT EFFECTOR ACTION MODE", "EXECUTE", "STORE"),
    m("FETM", "FORMAT EFFECTOR TRANSFER MODE", "INSERT", "EXCLUDE"),
    m("MATM", "MULTIPLE AREA TRANSFER MODE", "SINGLE", "MULTIPLE"),
    m("TTM", "TRANSFER TERMINATION MODE", "CURSOR", "ALL"),
    m("SATM", "SELECTED AREA TRANSFER MODE", "SELECT", "ALL"),
    m("TSM", "TABULATION STOP MODE", "MULTIPLE", "SINGLE"),
    None,
    None,
    m("GRCM", "GRAPHIC RENDITION COMBINATION GRCM", "REPLACING", "CUMULATIVE"),
    m("ZDM", "ZERO DEFAULT MODE", "ZERO", "DEFAULT"),
];

/// The standard mode selected by a parameter value, if assigned.
pub fn standard_mode(param: u32) -> Option<&'static ModeInfo> {
    STANDARD_MODES.get(param as usize)?.as_ref()
}

/// Wording for a DEC/XTerm private mode transition. Based on the VT220
/// programmer reference and the xterm control-sequence notes.
pub fn private_mode_description(param: u32, set: bool) -> Option<&'static str> {
    let msg = match param {
        1 => {
            if set {
                "(DEC) Cursor key mode."
            } else {
                "(DEC) Cursor key mode off."
            }
        }
        2 => {
            if set {
                "(XTerm) Designate US-ASCII for charater sets G0-G3, and set VT100 mode."
            } else {
                "(DEC) Designate VT52 mode."
            }
        }
        3 => {
            if set {
                "(DEC) 132 columns per line."
            } else {
                "(DEC) 80 columns per line."
            }
        }
        4 => {
            if set {
                "(DEC) Smooth scrolling: allow no more than 6 lines to be added\n\"  to the screen per second."
            } else {
                "(DEC) Fast scrolling: lines are added to the screen as fast as possible."
            }
        }
        5 => {
            if set {
                "(DEC) Reverse video (dark on light)."
            } else {
                "(DEC) Normal video (light on dark)."
            }
        }
        7 => {
            if set {
                "(DEC) Text auto-wrap mode."
            } else {
                "(DEC) Text auto-wrap mode off."
            }
        }
        9 => {
            if set {
                "(XTerm) Send mouse X & Y on button press."
            } else {
                "(XTerm) Don't send mouse X & Y on button press."
            }
        }
        10 => {
            if set {
                "(Rxvt) Show toolbar."
            } else {
                "(Rxvt) Hide toolbar."
            }
        }
        12 => {
            if set {
                "(Att610) Start blinking cursor."
            } else {
                "(Att610) Stop blinkin cursor."
            }
        }
        25 => {
            if set {
                "(DEC) Show cursor."
            } else {
                "(DEC) Hide cursor."
            }
        }
        30 => {
            if set {
                "(Rxvt) Show scrollbar."
            } else {
                "(Rxvt) Don't show scrollbar."
            }
        }
        40 => {
            if set {
                "(Xterm) Allow 80 -> 132 mode."
            } else {
                "(Xterm) Disallow 80 -> 132 mode."
            }
        }
        41 => {
            if set {
                "(Xterm) Activate workaround for more(1) bug."
            } else {
                "(Xterm) Disable workaround for more(1) bug."
            }
        }
        42 => {
            if set {
                "(DEC) National character set mode."
            } else {
                "(DEC) Multinational character set mode."
            }
        }
        44 => {
            if set {
                "(Xterm) Turn on margin bell."
            } else {
                "(Xterm) Turn off margin bell."
            }
        }
        45 => {
            if set {
                "(Xterm) Reverse-wraparound mode."
            } else {
                "(Xterm) Reverse-wraparound mode off."
            }
        }
        46 => {
            if set {
                "(Xterm) Start logging."
            } else {
                "(Xterm) Stop logging."
            }
        }
        47 => {
            if set {
                "(Xterm) Use alternate screen buffer."
            } else {
                "(Xterm) Use normal screen buffer."
            }
        }
        66 => {
            if set {
                "(DEC) Application keypad."
            } else {
                "(DEC) Numeric keypad."
            }
        }
        67 => {
            if set {
                "(DEC) Backarrow key sends backspace."
            } else {
                "(DEC) Backarrow key sends delete."
            }
        }
        1000 => {
            if set {
                "(Xterm) Send mouse X & Y on button press and release."
            } else {
                "(Xterm) Don't send mouse X & Y on button press and release."
            }
        }
        1001 => {
            if set {
                "(Xterm) Activate hilite mouse tracking."
            } else {
                "(Xterm) Disable hilite mouse tracking."
            }
        }
        1002 => {
            if set {
                "(Xterm) Activate cell motion mouse tracking."
            } else {
                "(Xterm) Disable cell motion mouse tracking."
            }
        }
        1003 => {
            if set {
                "(Xterm) Activate all motion mouse tracking."
            } else {
                "(Xterm) Disable all motion mouse tracking."
            }
        }
        1004 => {
            if set {
                "(Xterm) Send FocusIn/FocusOut events."
            } else {
                "(Xterm) Don't send FocusIn/FocusOut events."
            }
        }
        1010 => {
            if set {
                "(Rxvt) Scroll to bottom on tty output."
            } else {
                "(Rxvt) Don't scroll to bottom on tty output."
            }
        }
        1011 => {
            if set {
                "(Rxvt) Scroll to bottom on key press."
            } else {
                "(Rxvt) Don't scroll to bottom on key press."
            }
        }
        1034 => {
            if set {
                "(Xterm) Interpret meta key, sets eighth bit."
            } else {
                "(Xterm) Don't interpret meta key."
            }
        }
        1035 => {
            if set {
                "(Xterm) Enable special modifiers for Alt and NumLock keys."
            } else {
                "(Xterm) Disable special modifiers for Alt and NumLock keys."
            }
        }
        1036 => {
            if set {
                "(Xterm) Send ESC when Meta modifies a key."
            } else {
                "(Xterm) Don't send ESC when Meta modifies a key."
            }
        }
        1037 => {
            if set {
                "(Xterm) Send DEL from the editing-keypad Delete key."
            } else {
                "(Xterm) Send VT220 Remove from the editing-keypad Delete key."
            }
        }
        1039 => {
            if set {
                "(Xterm) Send ESC when Alt modifies a key."
            } else {
                "(Xterm) Don't send ESC when Alt modifies a key."
            }
        }
        1040 => {
            if set {
                "(Xterm) Keep selection even if not highlighted."
            } else {
                "(Xterm) Do not keep selection even if not highlighted."
            }
        }
        1041 => {
            if set {
                "(Xterm) Use the CLIPBOARD selection."
            } else {
                "(Xterm) Don't use the CLIPBOARD selection."
            }
        }
        1042 => {
            if set {
                "(Xterm) Enable Urgency window manager hint when BEL is received."
            } else {
                "(Xterm) Disable Urgency window manager hint when BEL is received."
            }
        }
        1043 => {
            if set {
                "(Xterm) Enable raising of the window when BEL is received."
            } else {
                "(Xterm) Disable raising of the window when BEL is received."
            }
        }
        1047 => {
            if set {
                "(Xterm) Use the alternate screen buffer."
            } else {
                "(Xterm) Use the normal screen buffer."
            }
        }
        1048 => {
            if set {
                "(Xterm) Save the cursor position."
            } else {
                "(Xterm) Restore the cursor position."
            }
        }
        1049 => {
            if set {
                "(Xterm) Save the cursor position and use the alternate screen buffer,\n\"  clearing it first."
            } else {
                "(Xterm) Leave the alternate screen buffer and restore the cursor."
            }
        }
        2004 => {
            if set {
                "(Xterm) Set bracketed paste mode."
            } else {
                "(Xterm) Reset bracketed paste mode."
            }
        }
        _ => return None,
    };
    Some(msg)
}
