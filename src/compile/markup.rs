//! Markup assembly
//!
//! Walks the fully expanded instruction list and emits prompt segments
//! whose markup regions are well formed: every begin has a matching end,
//! regions close innermost-first. The assembler carries the open scope
//! stack, the accumulated style, the active voice, and the volume of the
//! segment under construction. Output-volume changes and interactive
//! instructions finalize the current segment and reopen the ambient voice
//! and style into the next one.

use crate::instruction::{Instruction, OutputVolume};
use crate::prompt::{AmbientContext, PromptEvent, PromptSegment, Scope, ScopeKind, StyleRecord};
use crate::speech::VoiceSelection;
use crate::template;
use crate::{Result, SaycmdError};
use log::debug;
use rand::Rng;

/// Assemble prompt segments from an expanded instruction list.
///
/// The list must not contain loop instructions any more.
pub fn assemble<R: Rng>(
    instructions: Vec<Instruction>,
    rng: &mut R,
) -> Result<Vec<PromptSegment>> {
    let mut assembler = PromptAssembler::new();
    for instruction in instructions {
        assembler.apply(instruction, rng)?;
    }
    Ok(assembler.finish())
}

/// State threaded through the per-instruction transitions
struct PromptAssembler {
    /// Open scopes, innermost last
    scopes: Vec<ScopeKind>,
    /// Accumulated style settings
    style: StyleRecord,
    /// Voice selected by the most recent voice instruction
    voice: Option<VoiceSelection>,
    /// Output volume of the segment under construction
    volume: OutputVolume,
    /// Events of the segment under construction
    events: Vec<PromptEvent>,
    /// Whether the segment under construction carries literal text
    has_text: bool,
    /// Finalized segments
    segments: Vec<PromptSegment>,
}

impl PromptAssembler {
    fn new() -> Self {
        Self {
            scopes: Vec::new(),
            style: StyleRecord::default(),
            voice: None,
            volume: OutputVolume::default(),
            events: Vec::new(),
            has_text: false,
            segments: Vec::new(),
        }
    }

    fn apply<R: Rng>(&mut self, instruction: Instruction, rng: &mut R) -> Result<()> {
        match instruction {
            Instruction::Text(text) => self.append_text(text),
            Instruction::JsonTemplate(raw) => {
                let rendered = template::expand(&raw, rng)?;
                self.append_text(rendered);
            }
            Instruction::Voice(selection) => {
                self.close_through(ScopeKind::Voice);
                self.open(Scope::Voice(selection.clone()));
                self.voice = Some(selection);
            }
            Instruction::Rate(rate) => {
                self.style.rate = rate;
                self.restyle();
            }
            Instruction::Emphasis(emphasis) => {
                self.style.emphasis = emphasis;
                self.restyle();
            }
            Instruction::VoiceVolume(volume) => {
                self.style.voice_volume = volume;
                self.restyle();
            }
            Instruction::BeginSentence => {
                self.close_through(ScopeKind::Sentence);
                self.open(Scope::Sentence);
            }
            Instruction::BeginParagraph => {
                self.close_through(ScopeKind::Paragraph);
                self.open(Scope::Paragraph);
            }
            Instruction::EndSentence => self.end_region(ScopeKind::Sentence, "sentence")?,
            Instruction::EndParagraph => self.end_region(ScopeKind::Paragraph, "paragraph")?,
            Instruction::OutputVolume(volume) => {
                self.finish_segment();
                self.volume = volume;
                self.reopen_ambient();
            }
            Instruction::Interactive => {
                self.finish_segment();
                let context = AmbientContext {
                    voice: self.voice.clone(),
                    style: self.style,
                };
                debug!("Captured interactive segment");
                self.segments.push(PromptSegment::Interactive { context });
                self.reopen_ambient();
            }
            Instruction::Reset => {
                self.close_all();
                self.style = StyleRecord::default();
                self.voice = None;
                if !self.has_text {
                    // The pending volume is not yet bound to any spoken
                    // text, so it resets along with the voice options.
                    self.volume = OutputVolume::default();
                }
            }
            Instruction::Loop { .. } => {
                return Err(SaycmdError::Other(
                    "unexpected loop instruction during markup assembly".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn append_text(&mut self, text: String) {
        self.events.push(PromptEvent::Text(text));
        self.has_text = true;
    }

    fn open(&mut self, scope: Scope) {
        self.scopes.push(scope.kind());
        self.events.push(PromptEvent::Begin(scope));
    }

    /// Close open scopes innermost-first until one of `kind` has been
    /// closed. Does nothing when no scope of that kind is open.
    fn close_through(&mut self, kind: ScopeKind) {
        if !self.scopes.contains(&kind) {
            return;
        }
        while let Some(top) = self.scopes.pop() {
            self.events.push(PromptEvent::End(top));
            if top == kind {
                break;
            }
        }
    }

    fn end_region(&mut self, kind: ScopeKind, name: &str) -> Result<()> {
        if !self.scopes.contains(&kind) {
            return Err(SaycmdError::Ordering(format!(
                "end of {} without a matching start of {}",
                name, name
            )));
        }
        self.close_through(kind);
        Ok(())
    }

    /// Replace the style scope after a style field changed.
    fn restyle(&mut self) {
        self.close_through(ScopeKind::Style);
        self.open(Scope::Style(self.style));
    }

    fn close_all(&mut self) {
        while let Some(top) = self.scopes.pop() {
            self.events.push(PromptEvent::End(top));
        }
    }

    /// Close everything and hand off the segment under construction,
    /// keeping it only when it has literal text to deliver.
    fn finish_segment(&mut self) {
        self.close_all();
        let events = std::mem::take(&mut self.events);
        if self.has_text {
            debug!(
                "Finalized segment of {} event(s) at volume {}",
                events.len(),
                self.volume.get()
            );
            self.segments.push(PromptSegment::Spoken {
                events,
                volume: self.volume,
            });
        }
        self.has_text = false;
    }

    /// Reopen the ambient voice and style for a fresh segment.
    fn reopen_ambient(&mut self) {
        if let Some(voice) = self.voice.clone() {
            self.open(Scope::Voice(voice));
        }
        if !self.style.is_default() {
            self.open(Scope::Style(self.style));
        }
    }

    fn finish(mut self) -> Vec<PromptSegment> {
        self.finish_segment();
        self.segments
    }
}
