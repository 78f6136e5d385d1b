//! binary_hands — interactive entry point.

use binary_hands::app::{run, AppConfig};
use hand_gesture::RecognizerConfig;
use std::io::{self, Write};
use std::time::Duration;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Binary Hands — Gesture Binary→Decimal Converter       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Fist (all fingers down)  = 0");
    println!("  One finger up (index)    = 1");
    println!("  Open palm                = convert to decimal");
    println!("  Show FIST after a conversion to start a new sequence");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hand tracking + keyboard simulation");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 1.0s digit cooldown, 2.0s palm cooldown\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let digit_secs: f64 = {
        let s: f64 = read_line("  Digit cooldown seconds (default 1.0): ")
            .trim()
            .parse()
            .unwrap_or(1.0);
        s.clamp(0.1, 10.0)
    };
    let palm_secs: f64 = {
        let s: f64 = read_line("  Palm cooldown seconds (default 2.0): ")
            .trim()
            .parse()
            .unwrap_or(2.0);
        s.clamp(0.1, 10.0)
    };
    let ttl_secs: f64 = {
        let s: f64 = read_line("  Result display seconds (default 5.0): ")
            .trim()
            .parse()
            .unwrap_or(5.0);
        s.clamp(1.0, 60.0)
    };

    AppConfig {
        recognizer: RecognizerConfig {
            digit_cooldown: Duration::from_secs_f64(digit_secs),
            palm_cooldown: Duration::from_secs_f64(palm_secs),
        },
        result_ttl: Duration::from_secs_f64(ttl_secs),
        ..AppConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
