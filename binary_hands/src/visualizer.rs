//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Gesture: one        Fingers: [0 1 0 0 0]                │
//! │  Sequence: 1101                                          │
//! │  ┌──┬──┬──┬──┐                                           │
//! │  │ 1│ 1│ 0│ 1│   [bit strip, gold sweep on convert]      │
//! │  └──┴──┴──┴──┘                                           │
//! │                      ┌──────────────────────────┐        │
//! │                      │ RESULT: Binary … Decimal │ ← banner│
//! │                      └──────────────────────────┘        │
//! │  status bar                                              │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::panel::{BitStrip, ConvertFlash, ResultBanner};
use crate::source::{SimInput, SimKey};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 900;
pub const WIN_H: usize = 420;
const MARGIN: usize = 16;
const STRIP_X: usize = MARGIN;
const STRIP_Y: usize = 120;
const STRIP_W: usize = WIN_W - 2 * MARGIN;
pub const PATCH_W: usize = 48;
const PATCH_H: usize = 90;
const BANNER_Y: usize = 250;
const BANNER_H: usize = 40;
const STATUS_Y: usize = WIN_H - 36;
const BG_COLOR: u32 = 0xFF1A1A2E;
const TEXT_BG: u32 = 0xFF0F3460;
const FLASH_COLOR: u32 = 0xFFFFD700; // gold
const BANNER_BG: u32 = 0xFF16213E;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Binary Hands — Gesture Binary Converter",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard input and translate to SimInput events.
    ///
    /// Holding F/O/P plays the part of holding a gesture in front of the
    /// camera: one synthetic pose per polled frame, so the recognizer's
    /// cooldowns are exercised exactly as they would be on live video.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }

        // One pose per frame: first held gesture key wins.
        let pose_key = if self.window.is_key_down(Key::F) {
            Some(SimKey::Fist)
        } else if self.window.is_key_down(Key::O) {
            Some(SimKey::One)
        } else if self.window.is_key_down(Key::P) {
            Some(SimKey::Palm)
        } else {
            None
        };
        if let Some(key) = pose_key {
            let _ = self.sim_tx.send(SimInput::KeyDown(key));
        }

        true
    }

    /// Render one frame.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        strip: &BitStrip,
        flash: &Option<ConvertFlash>,
        banner: &ResultBanner,
        gesture_name: &str,
        finger_line: &str,
        sequence: &str,
        status: &str,
        converted: bool,
    ) {
        // Clear
        self.buf.fill(BG_COLOR);

        // ── Header ────────────────────────────────────────────────────────
        let header = format!("Gesture: {}", gesture_name);
        self.draw_label(&header, MARGIN, 14, 0xFF66FF99);
        self.draw_label(finger_line, MARGIN + 200, 14, 0xFFCC88FF);

        let seq_line = if sequence.is_empty() {
            "Sequence: (empty)".to_string()
        } else {
            format!("Sequence: {}", sequence)
        };
        self.draw_label(&seq_line, MARGIN, 36, 0xFFFFFF66);
        if converted {
            self.draw_label("converted - fist starts a new sequence", MARGIN, 52, 0xFF888888);
        }

        // ── Bit strip ─────────────────────────────────────────────────────
        self.draw_strip(strip);

        // ── Conversion flash sweep ────────────────────────────────────────
        if let Some(fl) = flash {
            self.draw_flash(fl);
        }

        // ── Result banner ─────────────────────────────────────────────────
        if banner.visible() {
            self.draw_banner(banner);
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(status, 10, STATUS_Y + 8, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "hold F=fist:0  O=one:1  P=palm:convert   Q=quit",
            10,
            WIN_H - 14,
            0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Bit strip ─────────────────────────────────────────────────────────

    fn draw_strip(&mut self, strip: &BitStrip) {
        let scroll = strip.scroll_px as isize;

        for (i, patch) in strip.patches.iter().enumerate() {
            let px = STRIP_X as isize + (i * PATCH_W) as isize - scroll;
            if px + PATCH_W as isize <= STRIP_X as isize {
                continue;
            }
            if px >= (STRIP_X + STRIP_W) as isize {
                break;
            }

            let x0 = px.max(STRIP_X as isize) as usize;
            let x1 = (px + PATCH_W as isize).min((STRIP_X + STRIP_W) as isize) as usize;

            self.fill_rect(x0, STRIP_Y, x1 - x0, PATCH_H, patch.color);

            // Bit glyph in the centre of the patch
            let lx = x0 + (x1 - x0).saturating_sub(4) / 2;
            let ly = STRIP_Y + PATCH_H / 2 - 3;
            let bit_str = patch.bit.to_string();
            self.draw_label(&bit_str, lx, ly, 0xFF000000);

            self.draw_border(x0, STRIP_Y, x1 - x0, PATCH_H, 0xFF000000);
        }
    }

    // ── Conversion flash ──────────────────────────────────────────────────

    fn draw_flash(&mut self, fl: &ConvertFlash) {
        let end = ((fl.count as f32 * fl.progress) as usize).min(fl.count);
        for i in 0..end {
            let x0 = STRIP_X + i * PATCH_W;
            if x0 >= STRIP_X + STRIP_W {
                break;
            }
            let w = PATCH_W.min(STRIP_X + STRIP_W - x0);
            self.draw_border(x0, STRIP_Y, w, PATCH_H, FLASH_COLOR);
            if w > 2 {
                self.draw_border(x0 + 1, STRIP_Y + 1, w - 2, PATCH_H - 2, FLASH_COLOR);
            }
        }
    }

    // ── Result banner ─────────────────────────────────────────────────────

    fn draw_banner(&mut self, banner: &ResultBanner) {
        let w = WIN_W - 2 * MARGIN;
        // Slide in from the right edge.
        let bx = MARGIN + ((w as f32) * (1.0 - banner.slide_in)) as usize;
        if bx >= WIN_W {
            return;
        }
        self.fill_rect(bx, BANNER_Y, WIN_W - MARGIN - bx, BANNER_H, BANNER_BG);
        self.draw_border(bx, BANNER_Y, WIN_W - MARGIN - bx, BANNER_H, FLASH_COLOR);
        let text = format!("RESULT: {}", banner.text());
        self.draw_label(&text, bx + 10, BANNER_Y + BANNER_H / 2 - 3, FLASH_COLOR);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Minimal bitmap font — 3×5 characters for label rendering.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '[' => [0b011, 0b010, 0b010, 0b010, 0b011],
        ']' => [0b110, 0b010, 0b010, 0b010, 0b110],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
