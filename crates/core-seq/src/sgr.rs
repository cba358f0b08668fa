//! Descriptions for graphic-rendition parameters.

/// ECMA-48 rendition parameters 0..=65. Gaps are reserved values.
const BASE_DESCRIPTIONS: [Option<&str>; 66] = [
    Some("Clear graphic rendition to defaults."),
    Some("Set bold text."),
    Some("Set dim text."),
    Some("Set italicized text."),
    Some("Set underlined text."),
    Some("Set slowly blinking text."),
    Some("Set rapidly blinking text."),
    Some("Set negative text image."),
    Some("Set hidden text."),
    Some("Set strike-out text."),
    Some("Set default font."),
    Some("Set first alternative font."),
    Some("Set second alternative font."),
    Some("Set third alternative font."),
    Some("Set fourth alternative font."),
    Some("Set fifth alternative font."),
    Some("Set sixth alternative font."),
    Some("Set seventh alternative font."),
    Some("Set eighth alternative font."),
    Some("Set ninth alternative font."),
    Some("Set Fraktur (Gothic) font."),
    Some("Set double-underlined text."),
    Some("Clear bold or dim text."),
    Some("Clear italicized or fraktur text."),
    Some("Clear underlining."),
    Some("Clear blinking."),
    None,
    Some("Set positive text image."),
    Some("Set visible text."),
    Some("Clear strike-out text."),
    Some("Set foreground color black."),
    Some("Set foreground color red."),
    Some("Set foreground color green."),
    Some("Set foreground color yellow."),
    Some("Set foreground color blue."),
    Some("Set foreground color magenta."),
    Some("Set foreground color cyan."),
    Some("Set foreground color white."),
    None,
    Some("Set foreground color default."),
    Some("Set background color black."),
    Some("Set background color red."),
    Some("Set background color green."),
    Some("Set background color yellow."),
    Some("Set background color blue."),
    Some("Set background color magenta."),
    Some("Set background color cyan."),
    Some("Set background color white."),
    None,
    Some("Set background color default."),
    None,
    Some("Set framed text."),
    Some("Set encircled text."),
    Some("Set overlined text."),
    Some("Clear framed or encircled text."),
    Some("Clear overlined text."),
    None,
    None,
    None,
    None,
    Some("Set ideogram underline"),
    Some("Set ideogram double underline"),
    Some("Set ideogram overline"),
    Some("Set ideogram double overline"),
    Some("Set ideogram stress marking"),
    Some("Clear ideographic underlines, overlines, or stress marks."),
];

/// XTerm bright-color parameters 90..=107 (98, 99 unassigned).
const BRIGHT_DESCRIPTIONS: [Option<&str>; 18] = [
    Some("(Xterm) Set foreground color gray."),
    Some("(Xterm) Set foreground color bright red."),
    Some("(Xterm) Set foreground color bright green."),
    Some("(Xterm) Set foreground color bright yellow."),
    Some("(Xterm) Set foreground color bright blue."),
    Some("(Xterm) Set foreground color bright magenta."),
    Some("(Xterm) Set foreground color bright cyan."),
    Some("(Xterm) Set foreground color bright white."),
    None,
    None,
    Some("(Xterm) Set background color gray."),
    Some("(Xterm) Set background color bright red."),
    Some("(Xterm) Set background color bright green."),
    Some("(Xterm) Set background color bright yellow."),
    Some("(Xterm) Set background color bright blue."),
    Some("(Xterm) Set background color bright magenta."),
    Some("(Xterm) Set background color bright cyan."),
    Some("(Xterm) Set background color bright white."),
];

/// Description of a single rendition parameter.
pub fn attribute_description(param: u32) -> Option<&'static str> {
    if (90..=107).contains(&param) {
        BRIGHT_DESCRIPTIONS[(param - 90) as usize]
    } else {
        *BASE_DESCRIPTIONS.get(param as usize)?
    }
}

/// Parameter 100 doubles as the rxvt "both colors to default" form; the
/// note prints in addition to the bright-background reading.
pub fn rxvt_default_note(param: u32) -> Option<&'static str> {
    (param == 100).then_some("(Rxvt) Set foreground and background color to default.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_descriptions_line_up() {
        assert_eq!(
            attribute_description(0),
            Some("Clear graphic rendition to defaults.")
        );
        assert_eq!(attribute_description(1), Some("Set bold text."));
        assert_eq!(
            attribute_description(31),
            Some("Set foreground color red.")
        );
        assert_eq!(
            attribute_description(65),
            Some("Clear ideographic underlines, overlines, or stress marks.")
        );
    }

    #[test]
    fn reserved_parameters_describe_nothing() {
        assert_eq!(attribute_description(26), None);
        assert_eq!(attribute_description(38), None);
        assert_eq!(attribute_description(48), None);
        assert_eq!(attribute_description(66), None);
        assert_eq!(attribute_description(89), None);
        assert_eq!(attribute_description(108), None);
    }

    #[test]
    fn bright_range_and_rxvt_note() {
        assert_eq!(
            attribute_description(91),
            Some("(Xterm) Set foreground color bright red.")
        );
        assert_eq!(attribute_description(98), None);
        assert_eq!(
            attribute_description(100),
            Some("(Xterm) Set background color gray.")
        );
        assert!(rxvt_default_note(100).is_some());
        assert!(rxvt_default_note(101).is_none());
    }
}
