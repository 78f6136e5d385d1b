//! # hand_gesture
//!
//! Core logic for the gesture-driven binary→decimal converter:
//!
//! * [`pose`] — the 21-point hand skeleton supplied per frame by an
//!   external landmark detector.
//! * [`classifier`] — pure mapping from a [`pose::HandPose`] to a discrete
//!   [`classifier::Gesture`].
//! * [`recognizer`] — the debounced input state machine that turns a
//!   stream of gestures into an accumulating binary sequence and, on an
//!   open palm, its decimal value.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Shape | Action |
//! |---|---|---|
//! | Fist | all fingers curled | append `0` |
//! | One | index finger up, rest curled | append `1` |
//! | Palm | four or five fingers up | convert sequence to decimal |
//! | Unknown | anything else | ignored |
//!
//! Digit gestures are debounced with a 1 s cooldown, palm with 2 s, so a
//! gesture held across many camera frames registers once.
//!
//! This crate does no I/O and owns no clock: callers classify the first
//! detected hand of each frame and feed the result to
//! [`recognizer::Recognizer::observe`] together with the current
//! session-relative time.

pub mod pose;
pub mod classifier;
pub mod recognizer;

pub use pose::{HandPose, Landmark};
pub use classifier::{classify, extended_fingers, Gesture};
pub use recognizer::{ConvertError, Outcome, Recognizer, RecognizerConfig};
