//! Smoke test for the speech pipeline
//!
//! Run with: cargo run --example speak_demo

use saycmd::compile::compile;
use saycmd::instruction::{FadeMode, Instruction, LoopCount};
use saycmd::speech::{deliver_all, EngineBaseline, TtsEngine};

fn main() {
    env_logger::init();

    println!("Compiling a demo program...");
    let program = vec![
        Instruction::Text("Hello from saycmd".to_string()),
        Instruction::Loop {
            count: LoopCount::new(2).unwrap(),
            fade: FadeMode::FadeOut,
        },
    ];

    let segments = match compile(program, &mut rand::thread_rng()) {
        Ok(segments) => {
            println!("✓ Compiled {} segment(s)", segments.len());
            segments
        }
        Err(e) => {
            eprintln!("✗ Compilation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nDelivering through the platform engine...");
    let mut engine = TtsEngine::new(EngineBaseline::default());
    let mut lines = std::iter::empty::<std::io::Result<String>>();
    match deliver_all(&mut engine, &segments, &mut lines) {
        Ok(()) => println!("✓ Speech delivered, fading out across two repeats"),
        Err(e) => {
            eprintln!("✗ Speech failed: {}", e);
            std::process::exit(1);
        }
    }
}
