//! The instruction-to-prompt compiler
//!
//! Three passes over the instruction list, strictly left to right: the
//! control-suffix normalizer, the loop expander, and markup assembly. Each
//! pass consumes its input and produces the next stage's input; nothing
//! feeds back into an earlier stage. Compilation finishes before anything
//! is spoken, so an ordering error aborts the run with no partial output.

pub mod expand;
pub mod markup;
pub mod normalize;

pub use expand::expand;
pub use markup::assemble;
pub use normalize::normalize;

use crate::instruction::Instruction;
use crate::prompt::PromptSegment;
use crate::Result;
use rand::Rng;

/// Compile an ordered instruction list into deliverable prompt segments.
pub fn compile<R: Rng>(instructions: Vec<Instruction>, rng: &mut R) -> Result<Vec<PromptSegment>> {
    let normalized = normalize(instructions);
    let expanded = expand(normalized);
    assemble(expanded, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{FadeMode, LoopCount, OutputVolume, Rate};
    use crate::prompt::PromptEvent;
    use crate::speech::{VoiceRef, VoiceSelection};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(instructions: Vec<Instruction>) -> crate::Result<Vec<PromptSegment>> {
        let mut rng = StdRng::seed_from_u64(1);
        compile(instructions, &mut rng)
    }

    fn text(s: &str) -> Instruction {
        Instruction::Text(s.to_string())
    }

    fn spoken_volumes(segments: &[PromptSegment]) -> Vec<u8> {
        segments
            .iter()
            .filter_map(|segment| match segment {
                PromptSegment::Spoken { volume, .. } => Some(volume.get()),
                PromptSegment::Interactive { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_trailing_controls_affect_whole_line() {
        // The rate arrives last but, once normalized, styles the text.
        let segments = run(vec![text("hello"), Instruction::Rate(Rate::new(1).unwrap())]).unwrap();
        assert_eq!(segments.len(), 1);
        let events = match &segments[0] {
            PromptSegment::Spoken { events, .. } => events,
            other => panic!("expected spoken segment, got {:?}", other),
        };
        assert!(matches!(
            events[0],
            PromptEvent::Begin(crate::prompt::Scope::Style(style)) if style.rate.get() == 1
        ));
    }

    #[test]
    fn test_fade_out_produces_descending_segments() {
        let segments = run(vec![
            text("beep"),
            Instruction::Loop {
                count: LoopCount::new(3).unwrap(),
                fade: FadeMode::FadeOut,
            },
        ])
        .unwrap();

        assert_eq!(spoken_volumes(&segments), vec![100, 67, 33]);
        for segment in &segments {
            assert_eq!(segment.text(), "beep");
        }
    }

    #[test]
    fn test_fade_in_produces_ascending_segments() {
        let segments = run(vec![
            text("beep"),
            Instruction::Loop {
                count: LoopCount::new(3).unwrap(),
                fade: FadeMode::FadeIn,
            },
        ])
        .unwrap();

        assert_eq!(spoken_volumes(&segments), vec![33, 67, 100]);
    }

    #[test]
    fn test_single_iteration_loop_is_identity() {
        let plain = run(vec![text("hello")]).unwrap();
        let looped = run(vec![
            text("hello"),
            Instruction::Loop {
                count: LoopCount::new(1).unwrap(),
                fade: FadeMode::Level,
            },
        ])
        .unwrap();
        assert_eq!(plain, looped);
    }

    #[test]
    fn test_voice_scope_survives_volume_split() {
        let voice = VoiceSelection::Resolved(VoiceRef::new("id", "Zira"));
        let segments = run(vec![
            Instruction::Voice(voice),
            text("hello"),
            Instruction::OutputVolume(OutputVolume::new(50).unwrap()),
            text("world"),
        ])
        .unwrap();

        assert_eq!(spoken_volumes(&segments), vec![100, 50]);
        for segment in &segments {
            let events = match segment {
                PromptSegment::Spoken { events, .. } => events,
                other => panic!("expected spoken segment, got {:?}", other),
            };
            assert!(matches!(
                events[0],
                PromptEvent::Begin(crate::prompt::Scope::Voice(_))
            ));
        }
    }

    #[test]
    fn test_ordering_error_aborts_compilation() {
        let err = run(vec![text("hello"), Instruction::EndSentence]).unwrap_err();
        assert!(matches!(err, crate::SaycmdError::Ordering(_)));
    }

    #[test]
    fn test_looped_reset_still_balances_markup() {
        // A reset inside a faded loop gets the scaled volume re-applied,
        // which splits segments; all of them must stay well formed.
        let segments = run(vec![
            Instruction::Voice(VoiceSelection::Resolved(VoiceRef::new("id", "A"))),
            text("tick"),
            Instruction::Loop {
                count: LoopCount::new(2).unwrap(),
                fade: FadeMode::FadeOut,
            },
        ])
        .unwrap();

        assert_eq!(spoken_volumes(&segments), vec![100, 50]);
        for segment in &segments {
            let events = match segment {
                PromptSegment::Spoken { events, .. } => events,
                other => panic!("expected spoken segment, got {:?}", other),
            };
            let mut depth = 0i32;
            for event in events {
                match event {
                    PromptEvent::Begin(_) => depth += 1,
                    PromptEvent::End(_) => depth -= 1,
                    PromptEvent::Text(_) => {}
                }
                assert!(depth >= 0);
            }
            assert_eq!(depth, 0);
        }
    }
}
