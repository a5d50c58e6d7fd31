//! Prompt delivery
//!
//! Speaks compiled segments through the platform TTS engine. Output volume
//! is a property of an engine instance, so every segment gets a fresh
//! instance configured for its volume; within a segment the event walk
//! tracks the open scopes and reconfigures the instance before each text
//! chunk. Emphasis has no engine-level control in the `tts` crate and only
//! shows in the rendered markup.

use crate::instruction::OutputVolume;
use crate::prompt::{ssml, AmbientContext, PromptEvent, PromptSegment, Scope, StyleRecord};
use crate::speech::{name_matches, VoiceSelection};
use crate::{Result, SaycmdError};
use log::{debug, warn};
use std::io;
use std::thread;
use std::time::Duration;
use tts::Tts as TtsCrate;

/// Poll interval while waiting for an utterance to finish
const SPEECH_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Engine-level defaults from the user's configuration
#[derive(Debug, Clone, Default)]
pub struct EngineBaseline {
    /// Voice applied when no voice scope is active
    pub voice: Option<String>,

    /// Rate (0-100) applied to fresh engine instances
    pub rate: Option<u8>,

    /// Volume ceiling (0-100); segment volumes scale within it
    pub volume: Option<u8>,
}

/// Sink for compiled prompt segments
pub trait PromptDelivery {
    /// Deliver one spoken segment at the given output volume.
    fn deliver(&mut self, events: &[PromptEvent], volume: OutputVolume) -> Result<()>;

    /// Deliver an interactive segment: speak one prompt per input line,
    /// each under the captured ambient context, until input ends.
    fn deliver_interactive(
        &mut self,
        context: &AmbientContext,
        lines: &mut dyn Iterator<Item = io::Result<String>>,
    ) -> Result<()>;
}

/// Deliver compiled segments strictly in list order.
pub fn deliver_all(
    delivery: &mut dyn PromptDelivery,
    segments: &[PromptSegment],
    lines: &mut dyn Iterator<Item = io::Result<String>>,
) -> Result<()> {
    for segment in segments {
        match segment {
            PromptSegment::Spoken { events, volume } => delivery.deliver(events, *volume)?,
            PromptSegment::Interactive { context } => {
                delivery.deliver_interactive(context, lines)?;
            }
        }
    }
    Ok(())
}

/// Delivery through the platform TTS engine
pub struct TtsEngine {
    baseline: EngineBaseline,
}

impl TtsEngine {
    pub fn new(baseline: EngineBaseline) -> Self {
        Self { baseline }
    }

    /// Create a fresh engine instance configured for one segment's volume.
    fn instance(&self, volume: OutputVolume) -> Result<TtsCrate> {
        debug!("Creating TTS instance at output volume {}", volume.get());

        let mut tts = TtsCrate::default()
            .map_err(|e| SaycmdError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let features = tts.supported_features();
        if features.volume {
            tts.set_volume(self.base_volume(volume))
                .map_err(|e| SaycmdError::Speech(format!("Failed to set volume: {}", e)))?;
        } else {
            warn!("Volume control not supported on this platform");
        }

        if features.rate {
            tts.set_rate(self.baseline_rate(&tts))
                .map_err(|e| SaycmdError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            warn!("Rate control not supported on this platform");
        }

        Ok(tts)
    }

    /// Segment volume scaled into the configured ceiling, as 0.0-1.0.
    fn base_volume(&self, volume: OutputVolume) -> f32 {
        let ceiling = self.baseline.volume.unwrap_or(100) as f32 / 100.0;
        volume.get() as f32 / 100.0 * ceiling
    }

    /// Configured rate (0-100) interpolated onto the platform's rate range.
    fn baseline_rate(&self, tts: &TtsCrate) -> f32 {
        match self.baseline.rate {
            Some(rate) => {
                let min = tts.min_rate();
                let max = tts.max_rate();
                min + (max - min) * rate as f32 / 100.0
            }
            None => tts.normal_rate(),
        }
    }

    /// Rate step (1 fastest .. 5 slowest) on the platform's rate range.
    fn step_rate(tts: &TtsCrate, step: u8) -> Option<f32> {
        let normal = tts.normal_rate();
        match step {
            1 => Some(tts.max_rate()),
            2 => Some((tts.max_rate() + normal) / 2.0),
            3 => Some(normal),
            4 => Some((normal + tts.min_rate()) / 2.0),
            5 => Some(tts.min_rate()),
            _ => None,
        }
    }

    /// Scale factor for a voice-volume step (1 silent .. 7 default).
    fn step_volume(step: u8) -> Option<f32> {
        match step {
            1 => Some(0.0),
            2 => Some(0.2),
            3 => Some(0.4),
            4 => Some(0.6),
            5 => Some(0.8),
            6 | 7 => Some(1.0),
            _ => None,
        }
    }

    /// Point the instance at the voice, rate, and volume the open scopes
    /// call for before a text chunk is spoken.
    fn configure_chunk(
        &self,
        tts: &mut TtsCrate,
        voices: &[tts::Voice],
        open: &[Scope],
        base: f32,
    ) -> Result<()> {
        let features = tts.supported_features();
        let style = active_style(open);

        let target = match active_voice(open) {
            Some(VoiceSelection::Resolved(voice)) => {
                voices.iter().find(|candidate| candidate.id() == voice.id())
            }
            Some(VoiceSelection::NotFound) | None => {
                self.baseline.voice.as_deref().and_then(|name| {
                    voices
                        .iter()
                        .find(|candidate| name_matches(&candidate.id(), &candidate.name(), name))
                })
            }
        };
        if let Some(voice) = target {
            if features.voice {
                debug!("Selecting voice: {}", voice.name());
                tts.set_voice(voice)
                    .map_err(|e| SaycmdError::Speech(format!("Failed to set voice: {}", e)))?;
            } else {
                warn!("Voice selection not supported on this platform");
            }
        }

        if features.rate {
            let rate = Self::step_rate(tts, style.rate.get()).unwrap_or(self.baseline_rate(tts));
            tts.set_rate(rate)
                .map_err(|e| SaycmdError::Speech(format!("Failed to set rate: {}", e)))?;
        }

        if features.volume {
            let factor = Self::step_volume(style.voice_volume.get()).unwrap_or(1.0);
            tts.set_volume(base * factor)
                .map_err(|e| SaycmdError::Speech(format!("Failed to set volume: {}", e)))?;
        }

        Ok(())
    }

    fn speak_chunk(tts: &mut TtsCrate, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking: {}", text);
        tts.speak(text, false)
            .map_err(|e| SaycmdError::Speech(format!("Speak failed: {}", e)))?;
        Self::await_completion(tts)
    }

    /// Block until the queued utterance has been spoken.
    fn await_completion(tts: &TtsCrate) -> Result<()> {
        let features = tts.supported_features();
        if !features.is_speaking {
            warn!("Cannot poll speech progress on this platform; not waiting");
            return Ok(());
        }

        while tts
            .is_speaking()
            .map_err(|e| SaycmdError::Speech(format!("Failed to poll speech state: {}", e)))?
        {
            thread::sleep(SPEECH_POLL_INTERVAL);
        }
        Ok(())
    }

    fn installed_voices(tts: &TtsCrate) -> Vec<tts::Voice> {
        match tts.voices() {
            Ok(voices) => voices,
            Err(e) => {
                warn!("Failed to enumerate voices: {}", e);
                Vec::new()
            }
        }
    }
}

impl PromptDelivery for TtsEngine {
    fn deliver(&mut self, events: &[PromptEvent], volume: OutputVolume) -> Result<()> {
        debug!("Delivering segment: {}", ssml::render(events));

        let mut tts = self.instance(volume)?;
        let voices = Self::installed_voices(&tts);
        let base = self.base_volume(volume);

        let mut open: Vec<Scope> = Vec::new();
        for event in events {
            match event {
                PromptEvent::Begin(scope) => open.push(scope.clone()),
                PromptEvent::End(_) => {
                    open.pop();
                }
                PromptEvent::Text(text) => {
                    self.configure_chunk(&mut tts, &voices, &open, base)?;
                    Self::speak_chunk(&mut tts, text)?;
                }
            }
        }
        Ok(())
    }

    fn deliver_interactive(
        &mut self,
        context: &AmbientContext,
        lines: &mut dyn Iterator<Item = io::Result<String>>,
    ) -> Result<()> {
        debug!("Entering interactive delivery");

        let mut tts = self.instance(OutputVolume::default())?;
        let voices = Self::installed_voices(&tts);
        let base = self.base_volume(OutputVolume::default());

        let mut open: Vec<Scope> = Vec::new();
        if let Some(voice) = &context.voice {
            open.push(Scope::Voice(voice.clone()));
        }
        if !context.style.is_default() {
            open.push(Scope::Style(context.style));
        }
        self.configure_chunk(&mut tts, &voices, &open, base)?;

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            Self::speak_chunk(&mut tts, &line)?;
        }

        debug!("Interactive input ended");
        Ok(())
    }
}

/// Selection of the innermost open voice scope, if any.
fn active_voice(open: &[Scope]) -> Option<&VoiceSelection> {
    open.iter().rev().find_map(|scope| match scope {
        Scope::Voice(selection) => Some(selection),
        _ => None,
    })
}

/// Style of the innermost open style scope, or the default.
fn active_style(open: &[Scope]) -> StyleRecord {
    open.iter()
        .rev()
        .find_map(|scope| match scope {
            Scope::Style(style) => Some(*style),
            _ => None,
        })
        .unwrap_or_default()
}
