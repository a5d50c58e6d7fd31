//! Speech delivery integration tests
//!
//! The delivery order tests run against a recording sink. The engine
//! tests talk to the platform TTS and degrade gracefully where no engine
//! is available.

use rand::rngs::StdRng;
use rand::SeedableRng;
use saycmd::compile::compile;
use saycmd::instruction::{FadeMode, Instruction, LoopCount, OutputVolume};
use saycmd::prompt::{AmbientContext, PromptEvent};
use saycmd::speech::{
    deliver_all, EngineBaseline, PromptDelivery, TtsCatalog, TtsEngine, VoiceCatalog,
};
use std::io;

struct CountingDelivery {
    spoken: Vec<(String, u8)>,
    interactive_lines: Vec<String>,
}

impl CountingDelivery {
    fn new() -> Self {
        Self {
            spoken: Vec::new(),
            interactive_lines: Vec::new(),
        }
    }
}

impl PromptDelivery for CountingDelivery {
    fn deliver(&mut self, events: &[PromptEvent], volume: OutputVolume) -> saycmd::Result<()> {
        let mut text = String::new();
        for event in events {
            if let PromptEvent::Text(chunk) = event {
                text.push_str(chunk);
            }
        }
        self.spoken.push((text, volume.get()));
        Ok(())
    }

    fn deliver_interactive(
        &mut self,
        _context: &AmbientContext,
        lines: &mut dyn Iterator<Item = io::Result<String>>,
    ) -> saycmd::Result<()> {
        for line in lines {
            self.interactive_lines.push(line?);
        }
        Ok(())
    }
}

fn compile_args(instructions: Vec<Instruction>) -> Vec<saycmd::prompt::PromptSegment> {
    let mut rng = StdRng::seed_from_u64(3);
    compile(instructions, &mut rng).unwrap()
}

#[test]
fn test_segments_deliver_in_order() {
    let segments = compile_args(vec![
        Instruction::Text("beep".to_string()),
        Instruction::Loop {
            count: LoopCount::new(3).unwrap(),
            fade: FadeMode::FadeOut,
        },
    ]);

    let mut delivery = CountingDelivery::new();
    let mut lines = std::iter::empty::<io::Result<String>>();
    deliver_all(&mut delivery, &segments, &mut lines).unwrap();

    assert_eq!(
        delivery.spoken,
        vec![
            ("beep".to_string(), 100),
            ("beep".to_string(), 67),
            ("beep".to_string(), 33),
        ]
    );
}

#[test]
fn test_interactive_consumes_remaining_input() {
    let segments = compile_args(vec![
        Instruction::Text("before".to_string()),
        Instruction::Interactive,
        Instruction::Text("after".to_string()),
    ]);

    let mut delivery = CountingDelivery::new();
    let mut lines = vec![
        Ok("line one".to_string()),
        Ok("line two".to_string()),
    ]
    .into_iter();
    deliver_all(&mut delivery, &segments, &mut lines).unwrap();

    assert_eq!(delivery.spoken.len(), 2);
    assert_eq!(delivery.spoken[0].0, "before");
    assert_eq!(delivery.spoken[1].0, "after");
    assert_eq!(
        delivery.interactive_lines,
        vec!["line one".to_string(), "line two".to_string()]
    );
}

#[test]
fn test_input_errors_propagate() {
    let segments = compile_args(vec![Instruction::Interactive]);

    let mut delivery = CountingDelivery::new();
    let mut lines = vec![
        Ok("fine".to_string()),
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone")),
    ]
    .into_iter();

    let result = deliver_all(&mut delivery, &segments, &mut lines);
    assert!(result.is_err());
    assert_eq!(delivery.interactive_lines, vec!["fine".to_string()]);
}

#[test]
fn test_voice_catalog_creation() {
    // Snapshotting the installed voices needs a working TTS engine
    match TtsCatalog::new() {
        Ok(catalog) => {
            println!("✓ Successfully created voice catalog");
            let voices = catalog.list();
            println!("  {} voice(s) installed", voices.len());

            // A nonsense query resolves to nothing
            assert!(catalog
                .resolve("no voice could possibly be called this")
                .is_none());
        }
        Err(e) => {
            // This may fail in CI or environments without speech support
            println!("⚠ Voice catalog creation failed (may be expected): {}", e);
        }
    }
}

#[test]
fn test_engine_delivery() {
    let segments = compile_args(vec![Instruction::Text("Integration test".to_string())]);

    let mut engine = TtsEngine::new(EngineBaseline::default());
    let mut lines = std::iter::empty::<io::Result<String>>();

    match deliver_all(&mut engine, &segments, &mut lines) {
        Ok(()) => println!("✓ Delivered a segment through the platform engine"),
        Err(e) => {
            // Acceptable in headless environments
            println!("⚠ TTS delivery failed (may be expected): {}", e);
        }
    }
}

#[test]
fn test_engine_respects_baseline() {
    // Construction never touches the platform engine, so this works
    // everywhere.
    let baseline = EngineBaseline {
        voice: Some("Zira".to_string()),
        rate: Some(50),
        volume: Some(80),
    };
    let _engine = TtsEngine::new(baseline);
}
