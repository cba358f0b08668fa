//! Replay of a session recording with timings, at the library boundary:
//! the same fetch/process/delay loop the binary runs.

use core_emit::Emitter;
use core_input::InputBuffer;
use core_seq::{Delay, DelaySource, Options, Processor};
use std::collections::VecDeque;
use std::io::Cursor;

struct Recorded(VecDeque<Delay>);

impl DelaySource for Recorded {
    fn next_delay(&mut self) -> Option<Delay> {
        self.0.pop_front()
    }
}

fn replay(input: &[u8], records: &[(f64, u64)]) -> String {
    let mut em = Emitter::new(Vec::new());
    let ib = InputBuffer::new(Cursor::new(input.to_vec()));
    let mut p = Processor::new(ib, &mut em, Options::default());
    let mut delays = Some(Recorded(
        records
            .iter()
            .map(|&(seconds, bytes)| Delay { seconds, bytes })
            .collect(),
    ));

    // The recording's first line is its timestamp header; delay
    // accounting starts after it.
    while let Some(c) = p.fetch() {
        p.process(c).unwrap();
        if c == b'\n' {
            break;
        }
    }
    p.reset_count();

    loop {
        if let Some(source) = delays.as_mut() {
            if p.delay_due() && !p.emit_delays(source).unwrap() {
                delays = None;
            }
        }
        match p.fetch() {
            Some(c) => p.process(c).unwrap(),
            None => break,
        }
    }
    p.finish().unwrap();
    String::from_utf8(em.into_inner()).unwrap()
}

#[test]
fn header_line_is_processed_without_delays() {
    let out = replay(b"Script started\nhi\n", &[(9.9, 1), (0.25, 2), (0.5, 1)]);
    // The first record is consumed silently; the second record's time is
    // the first one reported. Each crossing closes the open run.
    assert_eq!(
        out,
        "|Script started|.\n\
         @ 0.250000\n\
         |h|\n\
         @ 0.500000\n\
         |i|.\n"
    );
}

#[test]
fn delays_interleave_with_runs_in_byte_order() {
    let out = replay(b"h\nab\n", &[(1.0, 1), (2.0, 2), (3.0, 1)]);
    assert_eq!(
        out,
        "|h|.\n\
         @ 2.000000\n\
         |a|\n\
         @ 3.000000\n\
         |b|.\n"
    );
}

#[test]
fn without_records_no_delay_lines_appear() {
    let out = replay(b"x\nyz\n", &[]);
    assert!(!out.contains('@'));
    assert_eq!(out, "|x|.\n|yz|.\n");
}
