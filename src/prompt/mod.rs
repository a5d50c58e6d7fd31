//! Prompt data model
//!
//! A compiled prompt is an ordered list of segments. A spoken segment is a
//! flat list of markup events (balanced begin/end pairs around literal
//! text) plus the output volume to deliver it at. An interactive segment
//! carries the ambient voice and style captured when it was created; its
//! prompts are built per input line at delivery time.

pub mod ssml;

use crate::instruction::{Emphasis, OutputVolume, Rate, VoiceVolume};
use crate::speech::VoiceSelection;

/// The kind of a markup region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Voice,
    Style,
    Sentence,
    Paragraph,
}

/// Payload carried by a scope-open event
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    Voice(VoiceSelection),
    Style(StyleRecord),
    Sentence,
    Paragraph,
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Voice(_) => ScopeKind::Voice,
            Scope::Style(_) => ScopeKind::Style,
            Scope::Sentence => ScopeKind::Sentence,
            Scope::Paragraph => ScopeKind::Paragraph,
        }
    }
}

/// Accumulated style settings
///
/// Fields accumulate independently: setting the rate does not reset the
/// emphasis. A zero field means the engine default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleRecord {
    pub rate: Rate,
    pub emphasis: Emphasis,
    pub voice_volume: VoiceVolume,
}

impl StyleRecord {
    /// True while every field still holds the engine default.
    pub fn is_default(&self) -> bool {
        *self == StyleRecord::default()
    }
}

/// One markup event within a spoken segment
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// Open a markup region
    Begin(Scope),
    /// Close the innermost open region, which is of this kind
    End(ScopeKind),
    /// Literal text
    Text(String),
}

/// Voice and style in effect when an interactive segment was created
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmbientContext {
    pub voice: Option<VoiceSelection>,
    pub style: StyleRecord,
}

/// One independently deliverable unit of compiled output
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSegment {
    /// Marked-up text delivered at a fixed output volume
    Spoken {
        events: Vec<PromptEvent>,
        volume: OutputVolume,
    },
    /// Live-input segment: one prompt per input line, spoken under the
    /// captured ambient context
    Interactive { context: AmbientContext },
}

impl PromptSegment {
    /// Concatenated literal text of a spoken segment.
    pub fn text(&self) -> String {
        match self {
            PromptSegment::Spoken { events, .. } => {
                let mut text = String::new();
                for event in events {
                    if let PromptEvent::Text(chunk) = event {
                        text.push_str(chunk);
                    }
                }
                text
            }
            PromptSegment::Interactive { .. } => String::new(),
        }
    }
}
