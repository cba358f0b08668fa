//! ISO-IR coded character set registry lookups.
//!
//! Character-set designation escapes carry a final byte that selects a set
//! from the ISO 2375 registry. The tables here map final bytes to registry
//! identifiers per designation family, and identifiers to canonical names.
//! Unknown identifiers synthesize `ISO-IR-N`.

use std::borrow::Cow;

/// A registry assignment. The NATS sets were registered as split numbers
/// (8-1, 8-2, 9-1, 9-2) and carry their own names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Iso(u16),
    NatsSefi,
    NatsSefiAdd,
    NatsDano,
    NatsDanoAdd,
    Unassigned,
}

use Registration::{Iso, NatsDano, NatsDanoAdd, NatsSefi, NatsSefiAdd, Unassigned};

/// 94-character sets assigned 1988-10 or before, for the three-byte
/// designations with intermediates 0x28..=0x2B; indexed by final - 0x40.
const GRAPHIC_94: [Registration; 62] = [
    Iso(2),
    Iso(4),
    Iso(6),
    NatsSefi,
    NatsSefiAdd,
    NatsDano,
    NatsDanoAdd,
    Iso(10),
    Iso(11),
    Iso(13),
    Iso(14),
    Iso(21),
    Iso(16),
    Iso(39),
    Iso(37),
    Iso(38),
    Iso(53),
    Iso(54),
    Iso(25),
    Iso(55),
    Iso(57),
    Iso(27),
    Iso(47),
    Iso(49),
    Iso(31),
    Iso(15),
    Iso(17),
    Iso(18),
    Iso(19),
    Iso(50),
    Iso(51),
    Iso(59),
    Iso(60),
    Iso(61),
    Iso(70),
    Iso(71),
    Iso(173),
    Iso(68),
    Iso(69),
    Iso(84),
    Iso(85),
    Iso(86),
    Iso(88),
    Iso(89),
    Iso(90),
    Iso(91),
    Iso(92),
    Iso(93),
    Iso(94),
    Iso(95),
    Iso(96),
    Iso(98),
    Iso(99),
    Iso(102),
    Iso(103),
    Iso(121),
    Iso(122),
    Iso(137),
    Iso(141),
    Iso(146),
    Iso(128),
    Iso(147),
];

/// 94-character sets assigned 1988-11 or later, for the four-byte
/// designations with a 0x21 second intermediate.
const GRAPHIC_94_1988: [u16; 7] = [150, 151, 170, 207, 230, 231, 232];

/// 96-character sets, for designations with intermediates 0x2D..=0x2F.
const GRAPHIC_96: [Registration; 62] = [
    Iso(111),
    Iso(100),
    Iso(101),
    Iso(109),
    Iso(110),
    Iso(123),
    Iso(126),
    Iso(127),
    Iso(138),
    Iso(139),
    Iso(142),
    Iso(143),
    Iso(144),
    Iso(148),
    Iso(152),
    Iso(153),
    Iso(154),
    Iso(155),
    Iso(156),
    Iso(164),
    Iso(166),
    Iso(167),
    Iso(157),
    Unassigned,
    Iso(158),
    Iso(179),
    Iso(180),
    Iso(181),
    Iso(182),
    Iso(197),
    Iso(198),
    Iso(199),
    Iso(200),
    Iso(201),
    Iso(203),
    Iso(204),
    Iso(205),
    Iso(206),
    Iso(226),
    Iso(208),
    Iso(209),
    Iso(227),
    Iso(234),
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Unassigned,
    Iso(129),
];

/// Multibyte sets, for `ESC 0x24 [I1] F` designations.
const MULTIBYTE: [u16; 18] = [
    42, 58, 168, 149, 159, 165, 169, 171, 172, 183, 184, 185, 186, 187, 202, 228, 229, 233,
];

/// C0 control sets, for `ESC 0x21 F`.
const C0_SETS: [u16; 13] = [1, 7, 48, 26, 36, 106, 74, 104, 130, 132, 134, 135, 140];

/// C1 control sets, for `ESC 0x22 F`.
const C1_SETS: [u16; 9] = [56, 73, 124, 77, 133, 40, 136, 105, 107];

/// Graphic-set names, sorted by registry number for binary search.
const ISO_IR_NAMES: &[(u16, &str)] = &[
    (2, "ISO_646.irv:1973"),
    (4, "ISO646-GB"),
    (6, "US-ASCII"),
    (10, "ISO646-SE"),
    (11, "ISO646-SE2"),
    (13, "JIS_C6220-1969-JP"),
    (14, "ISO646-JP"),
    (15, "ISO646-IT"),
    (16, "ISO646-PT"),
    (17, "ISO646-ES"),
    (18, "GREEK7-OLD"),
    (19, "LATIN-GREEK"),
    (21, "ISO646-DE"),
    (25, "ISO646-FR1"),
    (27, "LATIN-GREEK-1"),
    (31, "ISO_5428:1976"),
    (37, "ISO_5427"),
    (38, "DIN_31624"),
    (39, "ISO_6438"),
    (42, "JIS_C6226-1978"),
    (47, "ISO-IR-47"),
    (49, "INIS"),
    (50, "INIS-8"),
    (51, "INIS-CYRILLIC"),
    (53, "ISO_5426"),
    (54, "ISO_5427:1981"),
    (55, "ISO_5428"),
    (57, "ISO646-CN"),
    (58, "GB_2312-80"),
    (59, "CODAR-U"),
    (60, "ISO646-NO"),
    (61, "ISO646-NO2"),
    (68, "APL"),
    (69, "ISO646-FR"),
    (70, "CCITT-VIDEOTEX"),
    (71, "CCITT-MOSAIC-2"),
    (84, "ISO646-PT2"),
    (85, "ISO646-ES2"),
    (86, "ISO646-HU"),
    (88, "GREEK7"),
    (89, "ARABIC7"),
    (90, "ISO_6937-2"),
    (91, "ISO646-JP-OCR-A"),
    (92, "ISO646-JP-OCR-B"),
    (93, "ISO646-JP-OCR-B-EXT"),
    (94, "ISO646-JP-OCR-HAND"),
    (95, "ISO646-JP-OCR-HAND-EXT"),
    (96, "JIS_C6229-1984-OCR-HAND"),
    (98, "ISO_2033"),
    (99, "ANSI_X3.110"),
    (100, "ISO-8859-1"),
    (101, "ISO-8859-2"),
    (102, "ISO646-T.61"),
    (103, "T.61"),
    (109, "ISO-8859-3"),
    (110, "ISO-8859-4"),
    (111, "ECMA-CYRILLIC"),
    (121, "ISO646-CA"),
    (122, "ISO646-CA2"),
    (123, "CSA_Z243.4-1985-EXT"),
    (126, "ISO-8859-7:1987"),
    (127, "ISO-8859-6"),
    (128, "T.101-2"),
    (129, "T.101-3"),
    (137, "CCITT-MOSAIC-1"),
    (138, "ISO-8859-8:1988"),
    (139, "CSN_369103"),
    (141, "ISO646-YU"),
    (142, "BSI_IST-2"),
    (143, "IEC_P27-1"),
    (144, "ISO-8859-5"),
    (146, "JUS_003"),
    (147, "JUS_004"),
    (148, "ISO-8859-9"),
    (149, "KSC_5601"),
    (150, "GREEK-CCITT"),
    (151, "ISO646-CU"),
    (152, "ISO_6937-2-RESIDUAL"),
    (153, "GOST_19768-74"),
    (154, "ISO-IR-154"),
    (155, "ISO_10367-BOX"),
    (156, "ISO_6937:1992"),
    (157, "ISO-8859-10"),
    (158, "ISO-IR-158"),
    (159, "JIS_X0212-1990"),
    (164, "HEBREW-CCITT"),
    (165, "CHINESE-CCITT"),
    (166, "TIS-620"),
    (167, "ARABIC-BULL"),
    (168, "JIS_X0208-1990"),
    (169, "BLISSYMBOL"),
    (170, "ISO646-INV"),
    (171, "CNS11643-1:1986"),
    (172, "CNS11643-2:1986"),
    (173, "CCITT-MOSAIC-3"),
    (179, "ISO-8859-13"),
    (180, "TCVN5712:1993"),
    (181, "ISO-IR-181"),
    (182, "LATIN-WELSH"),
    (183, "CNS11643-3:1992"),
    (184, "CNS11643-4:1992"),
    (185, "CNS11643-5:1992"),
    (186, "CNS11643-6:1992"),
    (187, "CNS11643-7:1992"),
    (197, "ISO-IR-197"),
    (198, "ISO-8859-8"),
    (199, "ISO-8859-14"),
    (200, "CYRILLIC-URALIC"),
    (201, "CYRILLIC-VOLGAIC"),
    (202, "KPS_9566-97"),
    (203, "ISO-8859-15"),
    (204, "ISO-8859-1-EURO"),
    (205, "ISO-8859-4-EURO"),
    (206, "ISO-8859-13-EURO"),
    (207, "ISO646-IE"),
    (208, "IS_434:1997"),
    (209, "ISO-IR-209"),
    (226, "ISO-8859-16"),
    (227, "ISO-8859-7"),
    (228, "JIS_X0213-1:2000"),
    (229, "JIS_X0213-2:2000"),
    (230, "TDS-565"),
    (231, "ANSI_Z39.47"),
    (232, "TDS-616"),
    (233, "JIS_X0213-1:2004"),
    (234, "SI1311:2002"),
];

/// Control-set names, sorted by registry number.
const CONTROL_SET_NAMES: &[(u16, &str)] = &[
    (1, "ISO 646"),
    (7, "NATS"),
    (26, "ISO-IR-26"),
    (36, "ISO-IR-36"),
    (40, "DIN_31626"),
    (48, "INIS"),
    (56, "VIDEOTEX-GB"),
    (73, "VIDEOTEX-CCITT"),
    (74, "JIS_C6225-1979"),
    (77, "ISO_6429-1983"),
    (104, "ISO_4873"),
    (105, "ISO_4873"),
    (106, "T.61"),
    (107, "T.61"),
    (124, "ISO_6630-1985"),
    (130, "ASMO_662-1985"),
    (132, "T.101-1"),
    (133, "T.101-1"),
    (134, "T.101-2"),
    (135, "T.101-3"),
    (136, "T.101-3"),
    (140, "CSN_369102"),
];

fn sorted_lookup(table: &'static [(u16, &'static str)], id: u16) -> Option<&'static str> {
    table
        .binary_search_by_key(&id, |&(n, _)| n)
        .ok()
        .map(|i| table[i].1)
}

/// Canonical name of a registration; unknown numbers become `ISO-IR-N`.
pub fn registration_name(reg: Registration) -> Option<Cow<'static, str>> {
    match reg {
        NatsSefi => Some(Cow::Borrowed("NATS-SEFI")),
        NatsSefiAdd => Some(Cow::Borrowed("NATS-SEFI-ADD")),
        NatsDano => Some(Cow::Borrowed("NATS-DANO")),
        NatsDanoAdd => Some(Cow::Borrowed("NATS-DANO-ADD")),
        Iso(id) => Some(match sorted_lookup(ISO_IR_NAMES, id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("ISO-IR-{id}")),
        }),
        Unassigned => None,
    }
}

fn table_entry<T: Copy>(table: &[T], final_byte: u8) -> Option<T> {
    if final_byte < 0x40 {
        return None;
    }
    table.get((final_byte - 0x40) as usize).copied()
}

/// Set name for a three-byte 94-set designation.
pub fn graphic_94_name(final_byte: u8) -> Option<Cow<'static, str>> {
    registration_name(table_entry(&GRAPHIC_94, final_byte)?)
}

/// Set name for a four-byte 94-set designation (0x21 sub-intermediate).
pub fn graphic_94_1988_name(final_byte: u8) -> Option<Cow<'static, str>> {
    registration_name(Iso(table_entry(&GRAPHIC_94_1988, final_byte)?))
}

/// Set name for a 96-set designation.
pub fn graphic_96_name(final_byte: u8) -> Option<Cow<'static, str>> {
    registration_name(table_entry(&GRAPHIC_96, final_byte)?)
}

/// Set name for a multibyte designation.
pub fn multibyte_name(final_byte: u8) -> Option<Cow<'static, str>> {
    registration_name(Iso(table_entry(&MULTIBYTE, final_byte)?))
}

/// Control-set name for a C0 designation (`ESC 0x21 F`).
pub fn c0_set_name(final_byte: u8) -> Option<&'static str> {
    sorted_lookup(CONTROL_SET_NAMES, table_entry(&C0_SETS, final_byte)?)
}

/// Control-set name for a C1 designation (`ESC 0x22 F`).
pub fn c1_set_name(final_byte: u8) -> Option<&'static str> {
    sorted_lookup(CONTROL_SET_NAMES, table_entry(&C1_SETS, final_byte)?)
}
