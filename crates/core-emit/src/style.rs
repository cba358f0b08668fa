//! Color palette for transcript lines.
//!
//! A palette spec is a comma-separated list of `SIGIL=PARAMS` entries where
//! `PARAMS` is a raw SGR parameter string (digits and separators only).
//! `|>` styles the body of a text run; `|` styles its bar markers. The
//! remaining sigils style their whole line.

/// Palette used when colorization is on and nothing overrides it.
pub const DEFAULT_PALETTE_SPEC: &str = "|>=36;7,.=31,:=33,&=35,\"=32,@=34";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub text: Option<String>,
    pub text_decor: Option<String>,
    pub ctrl: Option<String>,
    pub escape: Option<String>,
    pub label: Option<String>,
    pub desc: Option<String>,
    pub delay: Option<String>,
}

impl Palette {
    /// Fold a spec string into the palette. Malformed entries are skipped;
    /// an empty value clears its slot.
    pub fn apply_spec(&mut self, spec: &str) {
        for entry in spec.split(',') {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };
            // SGR parameter bytes only: digits and the 3/4-column separators.
            if !value.bytes().all(|b| (0x30..0x40).contains(&b)) {
                continue;
            }
            let slot = match key {
                "|>" => &mut self.text,
                "|" => &mut self.text_decor,
                "." => &mut self.ctrl,
                ":" => &mut self.escape,
                "&" => &mut self.label,
                "\"" => &mut self.desc,
                "@" => &mut self.delay,
                _ => continue,
            };
            *slot = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
    }

    /// The default palette plus any number of override specs, applied in
    /// order.
    pub fn resolve<'a>(overrides: impl IntoIterator<Item = &'a str>) -> Self {
        let mut palette = Palette::default();
        palette.apply_spec(DEFAULT_PALETTE_SPEC);
        for spec in overrides {
            palette.apply_spec(spec);
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_fills_expected_slots() {
        let p = Palette::resolve([]);
        assert_eq!(p.text.as_deref(), Some("36;7"));
        assert_eq!(p.text_decor, None);
        assert_eq!(p.ctrl.as_deref(), Some("31"));
        assert_eq!(p.escape.as_deref(), Some("33"));
        assert_eq!(p.label.as_deref(), Some("35"));
        assert_eq!(p.desc.as_deref(), Some("32"));
        assert_eq!(p.delay.as_deref(), Some("34"));
    }

    #[test]
    fn overrides_win_and_empty_clears() {
        let p = Palette::resolve([".=1;34,@="]);
        assert_eq!(p.ctrl.as_deref(), Some("1;34"));
        assert_eq!(p.delay, None);
        assert_eq!(p.escape.as_deref(), Some("33"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut p = Palette::default();
        p.apply_spec("?=31,.=4m,&,:=32");
        assert_eq!(p.ctrl, None, "non-parameter byte in value");
        assert_eq!(p.label, None, "entry without '='");
        assert_eq!(p.escape.as_deref(), Some("32"));
    }

    #[test]
    fn text_decor_and_text_are_distinct_slots() {
        let mut p = Palette::default();
        p.apply_spec("|=2,|>=36");
        assert_eq!(p.text_decor.as_deref(), Some("2"));
        assert_eq!(p.text.as_deref(), Some("36"));
    }
}
