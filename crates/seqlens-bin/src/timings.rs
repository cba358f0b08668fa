//! Timing records from a session recording.
//!
//! A timings file is whitespace-separated `SECONDS BYTES` pairs, one per
//! read the recording tool performed. Parsing stops at the first
//! malformed pair; whatever was read up to that point is served.

use anyhow::{Context, Result};
use core_seq::{Delay, DelaySource};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

pub struct Timings {
    queue: VecDeque<Delay>,
}

impl Timings {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("couldn't open timings file {}", path.display()))?;
        Ok(Self {
            queue: parse(&content),
        })
    }

    #[cfg(test)]
    fn from_str(content: &str) -> Self {
        Self {
            queue: parse(content),
        }
    }
}

fn parse(content: &str) -> VecDeque<Delay> {
    let mut queue = VecDeque::new();
    let mut tokens = content.split_whitespace();
    while let (Some(secs), Some(count)) = (tokens.next(), tokens.next()) {
        let (Ok(seconds), Ok(bytes)) = (secs.parse::<f64>(), count.parse::<u64>()) else {
            break;
        };
        queue.push_back(Delay { seconds, bytes });
    }
    queue
}

impl DelaySource for Timings {
    fn next_delay(&mut self) -> Option<Delay> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_across_lines() {
        let mut t = Timings::from_str("0.125 1\n0.5 12\n1.0 3\n");
        assert_eq!(
            t.next_delay(),
            Some(Delay {
                seconds: 0.125,
                bytes: 1
            })
        );
        assert_eq!(
            t.next_delay(),
            Some(Delay {
                seconds: 0.5,
                bytes: 12
            })
        );
        assert_eq!(
            t.next_delay(),
            Some(Delay {
                seconds: 1.0,
                bytes: 3
            })
        );
        assert_eq!(t.next_delay(), None);
    }

    #[test]
    fn stops_at_first_malformed_pair() {
        let mut t = Timings::from_str("0.125 1\nbogus 2\n0.5 3\n");
        assert!(t.next_delay().is_some());
        assert_eq!(t.next_delay(), None);
    }

    #[test]
    fn trailing_seconds_without_count_is_dropped() {
        let mut t = Timings::from_str("0.125 1 0.5");
        assert!(t.next_delay().is_some());
        assert_eq!(t.next_delay(), None);
    }

    #[test]
    fn opens_a_real_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "0.25 4\n").unwrap();
        let mut t = Timings::open(tmp.path()).unwrap();
        assert_eq!(
            t.next_delay(),
            Some(Delay {
                seconds: 0.25,
                bytes: 4
            })
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Timings::open(Path::new("__nonexistent_timings__")).is_err());
    }
}
