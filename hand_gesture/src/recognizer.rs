//! Debounced binary-input state machine.
//!
//! One [`Recognizer`] per session consumes the classified gesture of each
//! frame together with the session-relative time and decides whether it
//! mutates the accumulated binary sequence.  Digit gestures (fist = `0`,
//! one = `1`) are subject to a 1 s cooldown; an open palm converts the
//! sequence to decimal under a 2 s cooldown.  A gesture held across many
//! frames therefore registers once, and the frames in between surface as
//! [`Outcome::Wait`] countdowns.
//!
//! The caller owns the clock: `now` is injected, so tests drive the
//! machine with synthetic timestamps and the app with
//! `Instant::elapsed`.

use std::fmt;
use std::time::Duration;

use num_bigint::BigUint;

use crate::classifier::Gesture;

// ════════════════════════════════════════════════════════════════════════════
// RecognizerConfig
// ════════════════════════════════════════════════════════════════════════════

/// Timing parameters, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct RecognizerConfig {
    /// Minimum spacing between accepted digit gestures (fist/one share it).
    pub digit_cooldown: Duration,
    /// Minimum spacing between accepted palm (conversion) gestures.
    pub palm_cooldown: Duration,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            digit_cooldown: Duration::from_secs(1),
            palm_cooldown: Duration::from_secs(2),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome / ConvertError
// ════════════════════════════════════════════════════════════════════════════

/// What one observed gesture did to the session, for display/logging.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A digit was appended to the sequence.
    DigitAdded { digit: char, sequence: String },
    /// A fist after a completed conversion started a fresh sequence
    /// (which begins with that fist's `0`).
    SequenceReset { sequence: String },
    /// Gesture arrived inside its cooldown window; `remaining` seconds
    /// until the next one would be accepted.
    Wait { remaining: f32 },
    /// Palm conversion succeeded.
    Converted { binary: String, value: BigUint },
    /// Palm conversion failed.
    Failed(ConvertError),
}

/// Why a palm conversion was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertError {
    /// Palm shown before any digit was accumulated.
    EmptySequence,
    /// Sequence did not parse as base 2.  Unreachable through `observe`
    /// (digits are appended as `'0'`/`'1'` only) but kept so the parse
    /// result is handled without panicking.
    Malformed,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::EmptySequence => {
                write!(f, "no sequence — show fist (0) or one finger (1) first")
            }
            ConvertError::Malformed => write!(f, "invalid binary sequence"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Recognizer
// ════════════════════════════════════════════════════════════════════════════

/// Session state for binary input.  Created once at session start and
/// mutated exclusively through [`Recognizer::observe`].
#[derive(Debug)]
pub struct Recognizer {
    config: RecognizerConfig,
    sequence: String,
    /// Time of the last accepted digit gesture; `None` = never, so the
    /// first digit is accepted immediately.
    last_digit: Option<Duration>,
    /// Time of the last accepted palm gesture (the "sentinel in the
    /// past" is simply `None`).
    last_palm: Option<Duration>,
    /// True from a successful conversion until the next fist resets the
    /// sequence.
    converted: bool,
}

impl Recognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Recognizer {
            config,
            sequence: String::new(),
            last_digit: None,
            last_palm: None,
            converted: false,
        }
    }

    /// Read-only view of the in-progress sequence, for display.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// True while the sequence holds an already-converted value that a
    /// fist has not yet cleared.
    pub fn is_converted(&self) -> bool {
        self.converted
    }

    /// Feed one classified gesture.  `now` is time since session start
    /// and must be non-decreasing across calls.
    ///
    /// Returns `None` for [`Gesture::Unknown`]; every other gesture
    /// produces an [`Outcome`].
    pub fn observe(&mut self, gesture: Gesture, now: Duration) -> Option<Outcome> {
        match gesture {
            Gesture::Fist => Some(self.digit('0', now)),
            Gesture::One => Some(self.digit('1', now)),
            Gesture::Palm => Some(self.palm(now)),
            Gesture::Unknown => None,
        }
    }

    // ── digit gestures ───────────────────────────────────────────────────

    fn digit(&mut self, digit: char, now: Duration) -> Outcome {
        if let Some(last) = self.last_digit {
            let elapsed = now.saturating_sub(last);
            // Boundary is inclusive: exactly one cooldown apart still waits.
            if elapsed <= self.config.digit_cooldown {
                return Outcome::Wait {
                    remaining: (self.config.digit_cooldown - elapsed).as_secs_f32(),
                };
            }
        }
        self.last_digit = Some(now);

        // A fist after a conversion starts a new sequence; a one appends
        // to the stale one.  Asymmetric on purpose (see DESIGN.md).
        if digit == '0' && self.converted {
            self.sequence.clear();
            self.converted = false;
            self.sequence.push('0');
            return Outcome::SequenceReset {
                sequence: self.sequence.clone(),
            };
        }

        self.sequence.push(digit);
        Outcome::DigitAdded {
            digit,
            sequence: self.sequence.clone(),
        }
    }

    // ── palm (conversion) gesture ────────────────────────────────────────

    fn palm(&mut self, now: Duration) -> Outcome {
        if let Some(last) = self.last_palm {
            let elapsed = now.saturating_sub(last);
            if elapsed < self.config.palm_cooldown {
                // A rejected palm does not refresh the cooldown.
                return Outcome::Wait {
                    remaining: (self.config.palm_cooldown - elapsed).as_secs_f32(),
                };
            }
        }
        self.last_palm = Some(now);

        if self.sequence.is_empty() {
            return Outcome::Failed(ConvertError::EmptySequence);
        }

        match BigUint::parse_bytes(self.sequence.as_bytes(), 2) {
            Some(value) => {
                self.converted = true;
                Outcome::Converted {
                    binary: self.sequence.clone(),
                    value,
                }
            }
            None => Outcome::Failed(ConvertError::Malformed),
        }
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Recognizer::new(RecognizerConfig::default())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    fn at(secs: f64) -> Duration {
        Duration::from_secs_f64(secs)
    }

    fn added(outcome: Option<Outcome>) -> String {
        match outcome {
            Some(Outcome::DigitAdded { sequence, .. }) => sequence,
            other => panic!("expected DigitAdded, got {:?}", other),
        }
    }

    #[test]
    fn first_digit_accepted_immediately() {
        let mut rec = Recognizer::default();
        assert_eq!(added(rec.observe(Gesture::One, at(0.0))), "1");
    }

    #[test]
    fn digit_inside_cooldown_waits() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        match rec.observe(Gesture::One, at(0.5)) {
            Some(Outcome::Wait { remaining }) => assert!((remaining - 0.5).abs() < 1e-3),
            other => panic!("expected Wait, got {:?}", other),
        }
        // Rejected frame did not append.
        assert_eq!(rec.sequence(), "1");
    }

    #[test]
    fn digit_cooldown_boundary_is_inclusive() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        assert!(matches!(
            rec.observe(Gesture::One, at(1.0)),
            Some(Outcome::Wait { .. })
        ));
        assert_eq!(added(rec.observe(Gesture::One, at(1.01))), "11");
    }

    #[test]
    fn fist_and_one_share_the_digit_cooldown() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        assert!(matches!(
            rec.observe(Gesture::Fist, at(0.8)),
            Some(Outcome::Wait { .. })
        ));
    }

    #[test]
    fn palm_inside_cooldown_waits() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::Palm, at(0.1));
        match rec.observe(Gesture::Palm, at(1.5)) {
            Some(Outcome::Wait { remaining }) => assert!((remaining - 0.6).abs() < 1e-3),
            other => panic!("expected Wait, got {:?}", other),
        }
    }

    #[test]
    fn palm_cooldown_boundary_is_exclusive() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::Palm, at(0.5));
        // Exactly one cooldown later is accepted (strict `<` rejection).
        assert!(matches!(
            rec.observe(Gesture::Palm, at(2.5)),
            Some(Outcome::Converted { .. })
        ));
    }

    #[test]
    fn rejected_palm_does_not_refresh_cooldown() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::Palm, at(0.1));
        assert!(matches!(
            rec.observe(Gesture::Palm, at(1.9)),
            Some(Outcome::Wait { .. })
        ));
        // Measured from the accepted palm at 0.1, not the rejected one.
        assert!(matches!(
            rec.observe(Gesture::Palm, at(2.2)),
            Some(Outcome::Converted { .. })
        ));
    }

    #[test]
    fn empty_sequence_palm_fails_without_mutation() {
        let mut rec = Recognizer::default();
        assert_eq!(
            rec.observe(Gesture::Palm, at(0.0)),
            Some(Outcome::Failed(ConvertError::EmptySequence))
        );
        assert_eq!(rec.sequence(), "");
        assert!(!rec.is_converted());
    }

    #[test]
    fn conversion_value_is_big_endian_base2() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::One, at(1.2));
        rec.observe(Gesture::Fist, at(2.5));
        match rec.observe(Gesture::Palm, at(4.0)) {
            Some(Outcome::Converted { binary, value }) => {
                assert_eq!(binary, "110");
                assert_eq!(value.to_u64(), Some(6));
            }
            other => panic!("expected Converted, got {:?}", other),
        }
        // Sequence retained verbatim after conversion.
        assert_eq!(rec.sequence(), "110");
        assert!(rec.is_converted());
    }

    #[test]
    fn thirty_two_bit_round_trip() {
        let mut rec = Recognizer::default();
        let mut expected: u64 = 0;
        let mut t = 0.0;
        for i in 0..32u64 {
            let bit = (i * 7 + 3) % 2;
            expected = expected << 1 | bit;
            let g = if bit == 0 { Gesture::Fist } else { Gesture::One };
            assert!(matches!(
                rec.observe(g, at(t)),
                Some(Outcome::DigitAdded { .. })
            ));
            t += 1.1;
        }
        match rec.observe(Gesture::Palm, at(t + 2.0)) {
            Some(Outcome::Converted { value, .. }) => {
                assert_eq!(value.to_u64(), Some(expected));
            }
            other => panic!("expected Converted, got {:?}", other),
        }
    }

    #[test]
    fn one_after_conversion_appends_to_stale_sequence() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::One, at(1.2));
        rec.observe(Gesture::Fist, at(2.5));
        rec.observe(Gesture::Palm, at(4.0));
        // One does not reset a completed conversion.
        assert_eq!(added(rec.observe(Gesture::One, at(6.0))), "1101");
        // The machine still considers the conversion pending...
        assert!(rec.is_converted());
        // ...so a later fist resets to a fresh sequence.
        assert_eq!(
            rec.observe(Gesture::Fist, at(7.5)),
            Some(Outcome::SequenceReset {
                sequence: "0".to_string()
            })
        );
        assert!(!rec.is_converted());
    }

    #[test]
    fn fist_after_conversion_starts_new_sequence() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        rec.observe(Gesture::Palm, at(1.5));
        assert_eq!(
            rec.observe(Gesture::Fist, at(3.0)),
            Some(Outcome::SequenceReset {
                sequence: "0".to_string()
            })
        );
        assert_eq!(rec.sequence(), "0");
    }

    #[test]
    fn unknown_is_silently_ignored() {
        let mut rec = Recognizer::default();
        rec.observe(Gesture::One, at(0.0));
        assert_eq!(rec.observe(Gesture::Unknown, at(0.1)), None);
        assert_eq!(rec.sequence(), "1");
        // Ignored frames do not affect the digit cooldown either.
        assert!(matches!(
            rec.observe(Gesture::One, at(0.5)),
            Some(Outcome::Wait { .. })
        ));
    }

    #[test]
    fn full_session_scenario() {
        let mut rec = Recognizer::default();
        assert_eq!(added(rec.observe(Gesture::One, at(0.0))), "1");
        assert_eq!(added(rec.observe(Gesture::One, at(1.2))), "11");
        assert_eq!(added(rec.observe(Gesture::Fist, at(2.5))), "110");
        match rec.observe(Gesture::Palm, at(4.0)) {
            Some(Outcome::Converted { binary, value }) => {
                assert_eq!(binary, "110");
                assert_eq!(value.to_u64(), Some(6));
            }
            other => panic!("expected Converted, got {:?}", other),
        }
        assert_eq!(
            rec.observe(Gesture::Fist, at(6.5)),
            Some(Outcome::SequenceReset {
                sequence: "0".to_string()
            })
        );
    }

    #[test]
    fn custom_cooldowns_are_honored() {
        let mut rec = Recognizer::new(RecognizerConfig {
            digit_cooldown: Duration::from_millis(200),
            palm_cooldown: Duration::from_millis(400),
        });
        rec.observe(Gesture::One, at(0.0));
        assert_eq!(added(rec.observe(Gesture::One, at(0.25))), "11");
        rec.observe(Gesture::Palm, at(0.3));
        assert!(matches!(
            rec.observe(Gesture::Palm, at(0.5)),
            Some(Outcome::Wait { .. })
        ));
        assert!(matches!(
            rec.observe(Gesture::Palm, at(0.71)),
            Some(Outcome::Converted { .. })
        ));
    }
}
