//! End-to-end transcript scenarios: raw bytes in, full transcript out.

use core_emit::Emitter;
use core_input::InputBuffer;
use core_seq::{Options, Processor};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn transcribe_with(opts: Options, input: &[u8]) -> String {
    let mut em = Emitter::new(Vec::new());
    let ib = InputBuffer::new(Cursor::new(input.to_vec()));
    let mut p = Processor::new(ib, &mut em, opts);
    while let Some(c) = p.fetch() {
        p.process(c).unwrap();
    }
    p.finish().unwrap();
    assert_eq!(
        p.committed(),
        input.len() as u64,
        "every input byte must be accounted for"
    );
    String::from_utf8(em.into_inner()).unwrap()
}

fn transcribe(input: &[u8]) -> String {
    transcribe_with(Options::default(), input)
}

#[test]
fn plain_text_line() {
    assert_eq!(transcribe(b"ABC\n"), "|ABC|.\n");
}

#[test]
fn rendition_sequence_between_text() {
    assert_eq!(
        transcribe(b"A\x1b[1;31mB\n"),
        "|A|\n\
         : Esc [ 1 ; 31 m\n\
         & SGR: SELECT GRAPHIC RENDITION\n\
         \" Set bold text.\n\
         \" Set foreground color red.\n\
         |B|.\n"
    );
}

#[test]
fn erase_in_page_has_no_stray_dot_line() {
    assert_eq!(
        transcribe(b"\x1b[2J"),
        ": Esc [ 2 J\n\
         & ED: ERASE IN PAGE\n\
         \" Clear the screen.\n"
    );
}

#[test]
fn bell_then_single_byte_c1() {
    assert_eq!(
        transcribe(b"\x07\x1bX"),
        ". BEL/^G\n\
         : Esc X\n\
         & SOS: START OF STRING\n"
    );
}

#[test]
fn private_mode_set_shows_cursor() {
    assert_eq!(
        transcribe(b"\x1b[?25h"),
        ": Esc [ ? 25 h\n\
         & SM: SET MODE (private params)\n\
         \" (DEC) Show cursor.\n"
    );
}

#[test]
fn designate_ascii_to_g0() {
    assert_eq!(
        transcribe(b"\x1b(B"),
        ": Esc ( B\n\
         & GZD4: G0-DESIGNATE 94-SET\n\
         \" Designate 94-character set B (US-ASCII) to G0.\n"
    );
}

#[test]
fn escape_at_end_of_stream() {
    assert_eq!(transcribe(b"\x1b"), ". ESC/^[\n");
}

#[test]
fn invalid_sequence_falls_back_to_literal_escape() {
    // BEL is in no control-sequence column: the parse fails, ESC prints
    // as a literal, and '[' is reprocessed as ordinary text.
    assert_eq!(
        transcribe(b"\x1b[\x07"),
        ". ESC/^[\n\
         |[|\n\
         . BEL/^G\n"
    );
}

#[test]
fn empty_parameters_take_handler_defaults() {
    assert_eq!(
        transcribe(b"\x1b[H"),
        ": Esc [ H\n\
         & CUP: CURSOR POSITION\n\
         \" Move the cursor to line 1, column 1.\n"
    );
    assert_eq!(
        transcribe(b"\x1b[;5H"),
        ": Esc [ ; 5 H\n\
         & CUP: CURSOR POSITION\n\
         \" Move the cursor to line 1, column 5.\n"
    );
    assert_eq!(
        transcribe(b"\x1b[m"),
        ": Esc [ m\n\
         & SGR: SELECT GRAPHIC RENDITION\n\
         \" Clear graphic rendition to defaults.\n"
    );
}

#[test]
fn scrolling_region_without_parameters() {
    // No acronym is registered for this slot, so there is no label line.
    assert_eq!(
        transcribe(b"\x1b[r"),
        ": Esc [ r\n\
         \" (DEC) Set the scrolling region to full size.\n"
    );
    assert_eq!(
        transcribe(b"\x1b[5;20r"),
        ": Esc [ 5 ; 20 r\n\
         \" (DEC) Set the scrolling region to from line 5 to line 20.\n"
    );
}

#[test]
fn alternate_screen_description_continues_across_lines() {
    assert_eq!(
        transcribe(b"\x1b[?1049h"),
        ": Esc [ ? 1049 h\n\
         & SM: SET MODE (private params)\n\
         \" (Xterm) Save the cursor position and use the alternate screen buffer,\n\
         \"  clearing it first.\n"
    );
}

#[test]
fn logging_mode_reset_wording() {
    assert_eq!(
        transcribe(b"\x1b[?46l"),
        ": Esc [ ? 46 l\n\
         & RM: RESET MODE (private params)\n\
         \" (Xterm) Stop logging.\n"
    );
}

#[test]
fn mouse_report_prints_row_and_column() {
    assert_eq!(
        transcribe(b"\x1b[0;1;5;7&w"),
        ": Esc [ 0 ; 1 ; 5 ; 7 & w\n\
         \" (DEC) Mouse [down:right] at [5,7].\n"
    );
}

#[test]
fn locator_reporting_in_pixels() {
    assert_eq!(
        transcribe(b"\x1b[1;1'z"),
        ": Esc [ 1 ; 1 ' z\n\
         & DECELR: ENABLE LOCATOR REPORTING\n\
         \" Enable locator reports.\n\
         \"  Report position in pixels.\n"
    );
}

#[test]
fn xterm_key_modifier_variant_of_rendition() {
    assert_eq!(
        transcribe(b"\x1b[>1;2m"),
        ": Esc [ > 1 ; 2 m\n\
         & SGR: SELECT GRAPHIC RENDITION (private params)\n\
         \" (Xterm) Set modifyCursorKeys to 2.\n"
    );
}

#[test]
fn indexed_color_form() {
    assert_eq!(
        transcribe(b"\x1b[38;5;196m"),
        ": Esc [ 38 ; 5 ; 196 m\n\
         & SGR: SELECT GRAPHIC RENDITION\n\
         \" Set foreground color to index 196.\n"
    );
}

#[test]
fn window_text_area_resize() {
    assert_eq!(
        transcribe(b"\x1b[8;24;80t"),
        ": Esc [ 8 ; 24 ; 80 t\n\
         \" (dtterm) Resize the text area to height 24 and width 80 in characters.\n"
    );
}

#[test]
fn space_intermediate_scroll_left() {
    assert_eq!(
        transcribe(b"\x1b[3 @"),
        ": Esc [ 3 Spc @\n\
         & SL: SCROLL LEFT\n\
         \" Scroll left by 3 columns\n"
    );
}

#[test]
fn private_single_function_escapes() {
    assert_eq!(
        transcribe(b"\x1b7"),
        ": Esc 7\n\
         & DECSC: SAVE CURSOR\n"
    );
    assert_eq!(
        transcribe(b"\x1b="),
        ": Esc =\n\
         & DECKPAM: KEYPAD APPLICATION MODE\n"
    );
}

#[test]
fn standardized_single_function_escapes() {
    assert_eq!(
        transcribe(b"\x1bc"),
        ": Esc c\n\
         & RIS: RESET TO INITIAL STATE\n"
    );
    assert_eq!(
        transcribe(b"\x1b~"),
        ": Esc ~\n\
         & LS1R: LOCKING-SHIFT ONE RIGHT\n"
    );
}

#[test]
fn announce_code_structure() {
    assert_eq!(
        transcribe(b"\x1b F"),
        ": Esc Spc F\n\
         & ACS: ANNOUNCE CODE STRUCTURE\n"
    );
}

#[test]
fn control_set_designations() {
    assert_eq!(
        transcribe(b"\x1b!@"),
        ": Esc ! @\n\
         & CZD: C0-DESIGNATE\n\
         \" Designate C0 Control Set of ISO 646.\n"
    );
    assert_eq!(
        transcribe(b"\x1b\"@"),
        ": Esc \" @\n\
         & C1D: C1-DESIGNATE\n\
         \" Designate C1 Control Set of VIDEOTEX-GB.\n"
    );
}

#[test]
fn multibyte_designation_without_sub_intermediate() {
    assert_eq!(
        transcribe(b"\x1b$B"),
        ": Esc $ B\n\
         & GZDM4: G0-DESIGNATE MULTIBYTE 94-SET\n\
         \" Designate multibyte 94-character set B (JIS_X0208-1990) to G0.\n"
    );
}

#[test]
fn multibyte_designation_with_sub_intermediate() {
    assert_eq!(
        transcribe(b"\x1b$(C"),
        ": Esc $ ( C\n\
         & GZDM4: G0-DESIGNATE MULTIBYTE 94-SET\n\
         \" Designate multibyte 94-character set C (KSC_5601) to G0.\n"
    );
}

#[test]
fn ninety_six_set_designation() {
    assert_eq!(
        transcribe(b"\x1b-A"),
        ": Esc - A\n\
         & G1D6: G1-DESIGNATE 96-SET\n\
         \" Designate 96-character set A (ISO-8859-1) to G1.\n"
    );
}

#[test]
fn long_designation_is_echoed_but_not_classified() {
    assert_eq!(transcribe(b"\x1b$(!C"), ": Esc $ ( ! C\n");
}

#[test]
fn private_designation_final_names_no_set() {
    assert_eq!(
        transcribe(b"\x1b(0"),
        ": Esc ( 0\n\
         & GZD4: G0-DESIGNATE 94-SET\n\
         \" Designate 94-character set 0 (private) to G0.\n"
    );
}

#[test]
fn incomplete_designation_falls_back() {
    // ESC ( at end of stream: the candidate cannot complete, so both
    // bytes are reprocessed.
    assert_eq!(
        transcribe(b"\x1b("),
        ". ESC/^[\n\
         |(|\n"
    );
}

#[test]
fn parameter_vector_truncates_at_limit() {
    let mut input = b"\x1b[".to_vec();
    for _ in 0..299 {
        input.extend_from_slice(b"1;");
    }
    input.extend_from_slice(b"1m");
    let out = transcribe(&input);
    let descriptions = out.lines().filter(|l| l.starts_with('"')).count();
    assert_eq!(descriptions, 255, "extra parameters are dropped");
    assert!(out.lines().count() > 3, "echo still covers every byte");
}

#[test]
fn oversized_parameter_clips_instead_of_wrapping() {
    let out = transcribe(b"\x1b[99999999999999999999Ab");
    assert!(out.contains("& CUU: CURSOR UP"));
    assert!(
        out.contains(&format!("Move the cursor up {} lines.", u32::MAX)),
        "saturated, not wrapped: {out}"
    );
}

#[test]
fn suppressing_escape_echo_keeps_labels() {
    let opts = Options {
        escapes: false,
        ..Options::default()
    };
    assert_eq!(
        transcribe_with(opts, b"\x1b(B"),
        "& GZD4: G0-DESIGNATE 94-SET\n\
         \" Designate 94-character set B (US-ASCII) to G0.\n"
    );
    assert_eq!(
        transcribe_with(opts, b"\x1b[2J"),
        "& ED: ERASE IN PAGE\n\
         \" Clear the screen.\n"
    );
}

#[test]
fn suppressing_labels_and_descriptions() {
    let opts = Options {
        labels: false,
        descriptions: false,
        ..Options::default()
    };
    assert_eq!(transcribe_with(opts, b"\x1b[2J"), ": Esc [ 2 J\n");
}

#[test]
fn suppressing_control_hats() {
    let opts = Options {
        control_hats: false,
        ..Options::default()
    };
    assert_eq!(transcribe_with(opts, b"\x07\x08"), ". BEL BS\n");
}

#[test]
fn output_lines_follow_input_order() {
    let out = transcribe(b"hi\x07\x1b[1mok\n");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "|hi|",
            ". BEL/^G",
            ": Esc [ 1 m",
            "& SGR: SELECT GRAPHIC RENDITION",
            "\" Set bold text.",
            "|ok|.",
        ]
    );
}
