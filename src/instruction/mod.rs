//! The instruction model
//!
//! Each parsed command-line argument becomes one immutable, self-describing
//! `Instruction`. Instructions are consumed in order by the compiler
//! pipeline; none of them depends on another's value except during loop
//! expansion and markup assembly.

use crate::speech::VoiceSelection;
use crate::{Result, SaycmdError};

/// Speech rate, 0 to 5
///
/// 0 is the engine default, 1 is the fastest, 5 is the slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rate(u8);

impl Rate {
    pub fn new(value: u8) -> Result<Self> {
        if value > 5 {
            return Err(SaycmdError::Config(format!(
                "rate must be a number from 0 to 5, got {}",
                value
            )));
        }
        Ok(Rate(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Speech emphasis, 0 to 4
///
/// 0 is the engine default, 1 is the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emphasis(u8);

impl Emphasis {
    pub fn new(value: u8) -> Result<Self> {
        if value > 4 {
            return Err(SaycmdError::Config(format!(
                "emphasis must be a number from 0 to 4, got {}",
                value
            )));
        }
        Ok(Emphasis(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Voice volume, 0 to 7
///
/// A markup-level volume step (silent through extra loud), distinct from the
/// output-device volume. 0 is the engine default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoiceVolume(u8);

impl VoiceVolume {
    pub fn new(value: u8) -> Result<Self> {
        if value > 7 {
            return Err(SaycmdError::Config(format!(
                "volume must be a number from 0 to 7, got {}",
                value
            )));
        }
        Ok(VoiceVolume(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Output-device volume, 0 to 100
///
/// Applies to a whole prompt segment; changing it mid-stream splits the
/// output into a new segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputVolume(u8);

impl OutputVolume {
    pub fn new(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(SaycmdError::Config(format!(
                "output volume must be a number from 0 to 100, got {}",
                value
            )));
        }
        Ok(OutputVolume(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Full volume scaled by a fade multiplier.
    pub fn from_multiplier(multiplier: f64) -> Self {
        OutputVolume((100.0 * multiplier).round() as u8)
    }

    /// This volume rescaled by a fade multiplier.
    pub fn rescaled(self, multiplier: f64) -> Self {
        OutputVolume((f64::from(self.0) * multiplier).round() as u8)
    }
}

impl Default for OutputVolume {
    /// Full volume.
    fn default() -> Self {
        OutputVolume(100)
    }
}

/// Number of times a loop repeats, at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopCount(u32);

impl LoopCount {
    pub fn new(value: u32) -> Result<Self> {
        if value < 1 {
            return Err(SaycmdError::Config(format!(
                "loop count must be at least 1, got {}",
                value
            )));
        }
        Ok(LoopCount(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Volume multiplier schedule applied across loop iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeMode {
    /// Every iteration at full volume
    Level,
    /// Volume ramps up, reaching full on the last iteration
    FadeIn,
    /// Volume ramps down from full on the first iteration
    FadeOut,
}

impl FadeMode {
    /// The volume multiplier for iteration `iteration` (zero-based) of a
    /// loop repeating `count` times.
    pub fn multiplier(self, iteration: u32, count: u32) -> f64 {
        match self {
            FadeMode::Level => 1.0,
            FadeMode::FadeIn => f64::from(iteration + 1) / f64::from(count),
            FadeMode::FadeOut => f64::from(count - iteration) / f64::from(count),
        }
    }
}

/// One unit of compilation input
///
/// Closed set of instruction kinds; every consumption site matches
/// exhaustively so a new kind shows up as a compile error there.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Literal text to read
    Text(String),
    /// Switch to a voice (or to the not-found marker, which falls back to
    /// the engine default)
    Voice(VoiceSelection),
    /// Change the speech rate
    Rate(Rate),
    /// Change the speech emphasis
    Emphasis(Emphasis),
    /// Change the markup-level voice volume
    VoiceVolume(VoiceVolume),
    /// Change the output-device volume (starts a new prompt segment)
    OutputVolume(OutputVolume),
    /// Return all voice options to their defaults
    Reset,
    /// Open a sentence region
    BeginSentence,
    /// Close the open sentence region
    EndSentence,
    /// Open a paragraph region
    BeginParagraph,
    /// Close the open paragraph region
    EndParagraph,
    /// Repeat everything before this point `count` times
    Loop { count: LoopCount, fade: FadeMode },
    /// Read lines from live input, one prompt per line
    Interactive,
    /// Expand a randomized JSON template and read the result
    JsonTemplate(String),
}

impl Instruction {
    /// Whether this instruction only configures state for instructions that
    /// follow it. A control instruction with nothing to read after it has no
    /// audible effect.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Instruction::Voice(_)
                | Instruction::Reset
                | Instruction::Rate(_)
                | Instruction::Emphasis(_)
                | Instruction::VoiceVolume(_)
                | Instruction::OutputVolume(_)
        )
    }
}
