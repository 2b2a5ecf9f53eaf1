//! Hero typewriter, stat counters and scroll reveal.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::debug;

use crate::config::{CounterConfig, TypewriterConfig};
use crate::error::{Error, Result};

/// Text to display and how long to wait before the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub next_in: Duration,
}

/// Types a phrase one character at a time, holds it, deletes it, then
/// moves to the next phrase. Wraps around forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    config: TypewriterConfig,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Result<Self> {
        let phrases: Vec<Vec<char>> = config
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return Err(Error::NoPhrases);
        }
        Ok(Self {
            phrases,
            config,
            phrase: 0,
            chars: 0,
            deleting: false,
        })
    }

    /// Delay before the first [`step`](Self::step).
    pub fn start_delay(&self) -> Duration {
        self.config.start_delay()
    }

    /// Advance by one character.
    pub fn step(&mut self) -> Frame {
        let current = &self.phrases[self.phrase];
        let mut delay = if self.deleting {
            self.chars -= 1;
            self.config.delete_ms
        } else {
            self.chars += 1;
            self.config.type_ms
        };
        let text: String = current[..self.chars].iter().collect();

        if !self.deleting && self.chars == current.len() {
            delay = self.config.pause_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            delay = self.config.next_ms;
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
        }

        Frame {
            text,
            next_in: Duration::from_millis(delay),
        }
    }

    /// Index of the phrase being typed or deleted.
    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }
}

/// Counts a stat number up from zero to its target.
#[derive(Debug, Clone)]
pub struct Counter {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl Counter {
    pub fn new(target: u64, config: &CounterConfig) -> Self {
        Self {
            target,
            increment: target as f64 / config.frames() as f64,
            current: 0.0,
            done: false,
        }
    }

    /// Parse a `data-target` attribute.
    pub fn parse_target(value: &str) -> Result<u64> {
        value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCounterTarget(value.to_string()))
    }

    /// Only counters still showing their initial "0" are animated.
    pub fn should_start(displayed: &str) -> bool {
        displayed.trim() == "0"
    }

    /// Advance one frame and return the value to display.
    ///
    /// The final frame shows the exact target.
    pub fn step(&mut self) -> u64 {
        if self.done {
            return self.target;
        }
        self.current += self.increment;
        if self.current < self.target as f64 {
            self.current.floor() as u64
        } else {
            self.done = true;
            debug!(target = self.target, "Counter finished");
            self.target
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

/// Elements that have already been revealed on scroll.
///
/// Each element is revealed once; later intersections are ignored.
#[derive(Debug, Clone, Default)]
pub struct Reveal {
    revealed: BTreeSet<usize>,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intersection. Returns true the first time `index` becomes
    /// visible.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> bool {
        intersecting && self.revealed.insert(index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_writer() -> Typewriter {
        Typewriter::new(TypewriterConfig {
            phrases: vec!["ab".into(), "c".into()],
            ..TypewriterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn types_pauses_deletes_and_wraps() {
        let mut tw = short_writer();
        let frames: Vec<(String, u64)> = (0..7)
            .map(|_| {
                let f = tw.step();
                (f.text, f.next_in.as_millis() as u64)
            })
            .collect();
        assert_eq!(
            frames,
            vec![
                ("a".to_string(), 150),
                ("ab".to_string(), 2_000),
                ("a".to_string(), 50),
                ("".to_string(), 500),
                ("c".to_string(), 2_000),
                ("".to_string(), 500),
                ("a".to_string(), 150),
            ]
        );
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn multibyte_phrases_step_by_char() {
        let mut tw = Typewriter::new(TypewriterConfig {
            phrases: vec!["héllo".into()],
            ..TypewriterConfig::default()
        })
        .unwrap();
        tw.step();
        assert_eq!(tw.step().text, "hé");
    }

    #[test]
    fn empty_phrases_rejected() {
        let config = TypewriterConfig {
            phrases: vec![String::new()],
            ..TypewriterConfig::default()
        };
        assert_eq!(Typewriter::new(config).unwrap_err(), Error::NoPhrases);
    }

    #[test]
    fn counter_reaches_exact_target() {
        let config = CounterConfig::default();
        let mut counter = Counter::new(50, &config);

        let mut last = 0;
        let mut steps = 0;
        while !counter.is_done() {
            let value = counter.step();
            assert!(value >= last);
            last = value;
            steps += 1;
            assert!(steps <= config.frames() + 1);
        }
        assert_eq!(last, 50);
        assert!(steps >= config.frames());
    }

    #[test]
    fn counter_shows_floor() {
        let mut counter = Counter::new(250, &CounterConfig::default());
        // increment is 2.0 per frame
        assert_eq!(counter.step(), 2);
        assert_eq!(counter.step(), 4);
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = Counter::new(0, &CounterConfig::default());
        assert_eq!(counter.step(), 0);
        assert!(counter.is_done());
    }

    #[test]
    fn counter_start_and_parse() {
        assert!(Counter::should_start("0"));
        assert!(!Counter::should_start("42"));
        assert_eq!(Counter::parse_target(" 150 "), Ok(150));
        assert!(Counter::parse_target("lots").is_err());
    }

    #[test]
    fn reveal_once() {
        let mut reveal = Reveal::new();
        assert!(!reveal.on_intersect(3, false));
        assert!(reveal.on_intersect(3, true));
        assert!(!reveal.on_intersect(3, true));
        assert!(reveal.is_revealed(3));
        assert_eq!(reveal.len(), 1);
    }
}
