//! Top-level application state.
//!
//! `AppState` owns the `Recognizer` and the panel state.  Each frame
//! with a detected hand flows through `handle_pose`, which classifies
//! the pose, feeds the recognizer, and applies the outcome to the
//! on-screen state.  `run` drives the poll/drain/tick/render loop.

use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use hand_gesture::{classify, extended_fingers, Gesture, HandPose, Outcome, Recognizer,
    RecognizerConfig};

use crate::panel::{BitStrip, ConvertFlash, ResultBanner};
use crate::source::{spawn_pose_source, FrameEvent, SimPoseSource};
use crate::visualizer::{Visualizer, PATCH_W, WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub recognizer: RecognizerConfig,
    /// Number of bit-patches kept in the strip's visible window.
    pub strip_capacity: usize,
    /// How long a conversion result stays on screen.
    pub result_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            recognizer: RecognizerConfig::default(),
            strip_capacity: (WIN_W - 32) / PATCH_W,
            result_ttl: Duration::from_secs(5),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── session state ────────────────────────────────────────────────────
    recognizer: Recognizer,

    // ── panel state ──────────────────────────────────────────────────────
    strip: BitStrip,
    flash: Option<ConvertFlash>,
    banner: ResultBanner,

    // ── latest classification, for the header ────────────────────────────
    gesture: Gesture,
    fingers: [bool; 5],

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        AppState {
            recognizer: Recognizer::new(cfg.recognizer),
            strip: BitStrip::new(cfg.strip_capacity),
            flash: None,
            banner: ResultBanner::new(cfg.result_ttl.as_secs_f32()),
            gesture: Gesture::Unknown,
            fingers: [false; 5],
            status: "Show fist (0) or one finger (1), open palm to convert".to_string(),
        }
    }

    // ── process one detected hand ────────────────────────────────────────

    /// Classify a pose and feed the recognizer; `now` is time since
    /// session start.  Returns the recognizer outcome (also applied to
    /// the panel state) so callers can log it.
    pub fn handle_pose(&mut self, pose: &HandPose, now: Duration) -> Option<Outcome> {
        self.gesture = classify(pose);
        self.fingers = extended_fingers(pose);

        let outcome = self.recognizer.observe(self.gesture, now);
        if let Some(ref oc) = outcome {
            self.apply(oc);
        }
        outcome
    }

    fn apply(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::DigitAdded { digit, sequence } => {
                self.strip.push(*digit, sequence.len() - 1);
                self.strip.kick(0.6);
                self.status = format!("Added: {} | Sequence: {}", digit, sequence);
            }

            Outcome::SequenceReset { sequence } => {
                self.strip.clear();
                self.strip.push('0', 0);
                self.banner.dismiss();
                self.status = format!("New sequence started. Added: 0 | Sequence: {}", sequence);
            }

            Outcome::Wait { remaining } => {
                self.status = format!("Wait {:.1}s before next gesture", remaining);
            }

            Outcome::Converted { binary, value } => {
                let text = format!("Binary: {} -> Decimal: {}", binary, value);
                self.banner.show(text.clone());
                self.flash = Some(ConvertFlash::new(self.strip.patches.len()));
                self.status = text;
            }

            Outcome::Failed(err) => {
                self.status = err.to_string();
            }
        }
    }

    // ── Per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.strip.tick(PATCH_W as f32);
        if let Some(ref mut fl) = self.flash {
            fl.tick();
            if fl.done() {
                self.flash = None;
            }
        }
        self.banner.tick();
    }

    // ── Accessors for the render loop ────────────────────────────────────

    pub fn strip(&self) -> &BitStrip {
        &self.strip
    }
    pub fn flash(&self) -> &Option<ConvertFlash> {
        &self.flash
    }
    pub fn banner(&self) -> &ResultBanner {
        &self.banner
    }
    pub fn sequence(&self) -> &str {
        self.recognizer.sequence()
    }
    pub fn is_converted(&self) -> bool {
        self.recognizer.is_converted()
    }
    pub fn gesture_name(&self) -> &'static str {
        self.gesture.name()
    }

    /// The per-finger breakdown line, e.g. `Fingers: [0 1 0 0 0]`.
    pub fn finger_line(&self) -> String {
        let flags: Vec<&str> = self
            .fingers
            .iter()
            .map(|&f| if f { "1" } else { "0" })
            .collect();
        format!("Fingers: [{}]", flags.join(" "))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the
/// visualizer, the pose source (keyboard simulation by default,
/// LeapMotion with `--features leap` in addition), and drives the
/// event/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Sim pose channel ──────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();
    let (frame_tx, frame_rx) = mpsc::channel::<FrameEvent>();
    spawn_pose_source(SimPoseSource { rx: sim_rx }, frame_tx.clone());

    #[cfg(feature = "leap")]
    spawn_pose_source(crate::source::LeapPoseSource, frame_tx.clone());
    drop(frame_tx);

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg);
    let started = Instant::now();

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → translate to SimInput
        if !vis.poll_input() {
            break;
        }

        // 2. Drain pose frames
        loop {
            match frame_rx.try_recv() {
                Ok(FrameEvent::Quit) => return Ok(()),
                Ok(FrameEvent::Pose(pose)) => {
                    app.handle_pose(&pose, started.elapsed());
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 3. Per-frame animation
        app.tick();

        // 4. Render
        vis.render(
            app.strip(),
            app.flash(),
            app.banner(),
            app.gesture_name(),
            &app.finger_line(),
            app.sequence(),
            &app.status,
            app.is_converted(),
        );
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{fist_pose, one_pose, palm_pose};

    fn make_app() -> AppState {
        AppState::new(AppConfig::default())
    }

    fn at(secs: f64) -> Duration {
        Duration::from_secs_f64(secs)
    }

    #[test]
    fn fist_pose_appends_zero() {
        let mut app = make_app();
        app.handle_pose(&fist_pose(), at(0.0));
        assert_eq!(app.sequence(), "0");
        assert_eq!(app.strip().patches.len(), 1);
        assert_eq!(app.strip().patches[0].bit, '0');
    }

    #[test]
    fn one_pose_appends_one() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        assert_eq!(app.sequence(), "1");
        assert_eq!(app.gesture_name(), "one");
    }

    #[test]
    fn rapid_second_digit_shows_wait() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        app.handle_pose(&one_pose(), at(0.4));
        assert!(app.status.starts_with("Wait"));
        // The rejected frame did not land on the strip.
        assert_eq!(app.strip().patches.len(), 1);
    }

    #[test]
    fn palm_converts_and_posts_banner() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        app.handle_pose(&one_pose(), at(1.2));
        app.handle_pose(&fist_pose(), at(2.5));
        app.handle_pose(&palm_pose(), at(4.0));
        assert!(app.banner().visible());
        assert_eq!(app.banner().text(), "Binary: 110 -> Decimal: 6");
        assert!(app.flash().is_some());
        assert!(app.is_converted());
    }

    #[test]
    fn palm_on_fresh_session_reports_error() {
        let mut app = make_app();
        app.handle_pose(&palm_pose(), at(0.0));
        assert!(app.status.contains("no sequence"));
        assert!(!app.banner().visible());
        assert_eq!(app.sequence(), "");
    }

    #[test]
    fn fist_after_conversion_resets_strip() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        app.handle_pose(&palm_pose(), at(1.5));
        app.handle_pose(&fist_pose(), at(3.0));
        assert_eq!(app.sequence(), "0");
        assert_eq!(app.strip().patches.len(), 1);
        assert_eq!(app.strip().patches[0].bit, '0');
        assert!(!app.banner().visible());
    }

    #[test]
    fn strip_window_tracks_long_sequences() {
        let mut app = make_app();
        let cap = app.strip().capacity;
        let mut t = 0.0;
        for _ in 0..cap + 5 {
            app.handle_pose(&one_pose(), at(t));
            t += 1.1;
        }
        assert_eq!(app.strip().patches.len(), cap);
        // The full sequence is longer than the visible window.
        assert_eq!(app.sequence().len(), cap + 5);
    }

    #[test]
    fn flash_clears_after_ticks() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        app.handle_pose(&palm_pose(), at(1.5));
        assert!(app.flash().is_some());
        for _ in 0..100 {
            app.tick();
        }
        assert!(app.flash().is_none());
    }

    #[test]
    fn finger_line_reflects_last_pose() {
        let mut app = make_app();
        app.handle_pose(&one_pose(), at(0.0));
        assert_eq!(app.finger_line(), "Fingers: [0 1 0 0 0]");
    }
}
