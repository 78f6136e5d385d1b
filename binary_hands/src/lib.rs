//! # binary_hands
//!
//! Interactive binary→decimal converter driven by hand gestures.  The
//! core classifier and recognizer live in the `hand_gesture` crate; this
//! crate supplies pose sources, the visualizer window, and the app loop.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Shape | Action |
//! |---|---|---|
//! | Fist | all fingers curled | append `0` to the sequence |
//! | One | index finger up | append `1` to the sequence |
//! | Palm | open hand | convert sequence to decimal |
//! | Fist after a conversion | — | start a fresh sequence at `0` |
//!
//! Digits are rate-limited to one per second, conversions to one every
//! two seconds; frames inside a cooldown show a countdown instead.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard keys synthesize canonical
//!   hand poses, so the full classifier path runs without hardware.
//! * `leap` — **Hardware mode**: polls a LeapMotion controller via LeapC
//!   and maps its digit joints onto the 21-landmark skeleton.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Pose |
//! |---|---|
//! | `F` (hold) | Fist — binary `0` |
//! | `O` (hold) | One — index finger up, binary `1` |
//! | `P` (hold) | Open palm — convert |
//! | `Q` | Quit |

pub mod source;
pub mod panel;
pub mod visualizer;
pub mod app;
