//! Command-line argument parsing
//!
//! The arguments form an ordered instruction program. Flags match
//! case-insensitively; anything that does not start with a dash reads as
//! literal text. Voice names resolve against the catalog and file or URL
//! arguments are fetched while parsing, so side effects happen in the
//! order the user wrote them.

use crate::content;
use crate::instruction::{
    Emphasis, FadeMode, Instruction, LoopCount, OutputVolume, Rate, VoiceVolume,
};
use crate::speech::{VoiceCatalog, VoiceSelection};
use crate::{Result, SaycmdError};
use log::warn;

/// What the command line asked for
#[derive(Debug)]
pub enum CliCommand {
    /// Compile and read an instruction program
    Speak(Vec<Instruction>),
    /// Print the installed voices and exit
    ListVoices,
    /// Print the usage text and exit
    Help,
}

/// Parse the argument list into a command.
pub fn parse_args(args: &[String], catalog: &dyn VoiceCatalog) -> Result<CliCommand> {
    let mut instructions = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        let lower = arg.to_lowercase();

        if !arg.starts_with('-') {
            // Just read this as text
            instructions.push(Instruction::Text(arg.clone()));
        } else {
            match lower.as_str() {
                "-text" => {
                    i += 1;
                    let text = value(args, i, "Missing text to read after -text")?;
                    instructions.push(Instruction::Text(text.clone()));
                }
                "-textfile" => {
                    i += 1;
                    let source = value(args, i, "Missing filename or url after -textFile")?;
                    instructions.push(Instruction::Text(content::fetch(source)?));
                }
                "-jsonfile" => {
                    i += 1;
                    let source = value(args, i, "Missing filename or url after -jsonFile")?;
                    instructions.push(Instruction::JsonTemplate(content::fetch(source)?));
                }
                "-voice" => {
                    i += 1;
                    let name = value(args, i, "Missing voice name after -voice")?;
                    instructions.push(Instruction::Voice(resolve_voice(catalog, name)?));
                }
                "-rate" => {
                    i += 1;
                    let raw = value(args, i, "Missing number after -rate")?;
                    let rate = raw
                        .parse::<u8>()
                        .ok()
                        .and_then(|n| Rate::new(n).ok())
                        .ok_or_else(|| {
                            SaycmdError::Config(
                                "-rate must be followed by a number from 0 to 5".to_string(),
                            )
                        })?;
                    instructions.push(Instruction::Rate(rate));
                }
                "-emphasis" => {
                    i += 1;
                    let raw = value(args, i, "Missing number after -emphasis")?;
                    let emphasis = raw
                        .parse::<u8>()
                        .ok()
                        .and_then(|n| Emphasis::new(n).ok())
                        .ok_or_else(|| {
                            SaycmdError::Config(
                                "-emphasis must be followed by a number from 0 to 4".to_string(),
                            )
                        })?;
                    instructions.push(Instruction::Emphasis(emphasis));
                }
                "-volume" => {
                    i += 1;
                    let raw = value(args, i, "Missing number after -volume")?;
                    let volume = raw
                        .parse::<u8>()
                        .ok()
                        .and_then(|n| VoiceVolume::new(n).ok())
                        .ok_or_else(|| {
                            SaycmdError::Config(
                                "-volume must be followed by a number from 0 to 7".to_string(),
                            )
                        })?;
                    instructions.push(Instruction::VoiceVolume(volume));
                }
                "-outputvolume" => {
                    i += 1;
                    let raw = value(args, i, "Missing number after -outputVolume")?;
                    let volume = raw
                        .parse::<u8>()
                        .ok()
                        .and_then(|n| OutputVolume::new(n).ok())
                        .ok_or_else(|| {
                            SaycmdError::Config(
                                "-outputVolume must be followed by a number from 0 to 100"
                                    .to_string(),
                            )
                        })?;
                    instructions.push(Instruction::OutputVolume(volume));
                }
                "-loop" => {
                    i += 1;
                    instructions.push(Instruction::Loop {
                        count: repeat_count(args, i, "-loop")?,
                        fade: FadeMode::Level,
                    });
                }
                "-fadein" => {
                    i += 1;
                    instructions.push(Instruction::Loop {
                        count: repeat_count(args, i, "-fadeIn")?,
                        fade: FadeMode::FadeIn,
                    });
                }
                "-fadeout" => {
                    i += 1;
                    instructions.push(Instruction::Loop {
                        count: repeat_count(args, i, "-fadeOut")?,
                        fade: FadeMode::FadeOut,
                    });
                }
                "-reset" => instructions.push(Instruction::Reset),
                "-sentence" => instructions.push(Instruction::BeginSentence),
                "-endsentence" => instructions.push(Instruction::EndSentence),
                "-paragraph" => instructions.push(Instruction::BeginParagraph),
                "-endparagraph" => instructions.push(Instruction::EndParagraph),
                "-interactive" => instructions.push(Instruction::Interactive),
                "-listvoices" => return Ok(CliCommand::ListVoices),
                "-help" | "-h" => return Ok(CliCommand::Help),
                _ => {
                    return Err(SaycmdError::Config(format!(
                        "Unrecognized argument: {}",
                        arg
                    )));
                }
            }
        }
        i += 1;
    }

    Ok(CliCommand::Speak(instructions))
}

fn value<'a>(args: &'a [String], index: usize, message: &str) -> Result<&'a String> {
    args.get(index)
        .ok_or_else(|| SaycmdError::Config(message.to_string()))
}

fn repeat_count(args: &[String], index: usize, flag: &str) -> Result<LoopCount> {
    let raw = value(args, index, &format!("Missing number after {}", flag))?;
    raw.parse::<u32>()
        .ok()
        .and_then(|n| LoopCount::new(n).ok())
        .ok_or_else(|| {
            SaycmdError::Config(format!(
                "{} must be followed by a number greater than 0",
                flag
            ))
        })
}

/// Resolve a requested voice name. A missing voice is a warning, not an
/// error: the marker keeps the scope structure and the engine default is
/// heard. A disabled voice is fatal.
fn resolve_voice(catalog: &dyn VoiceCatalog, name: &str) -> Result<VoiceSelection> {
    match catalog.resolve(name) {
        Some(voice) => {
            if !catalog.is_enabled(&voice) {
                return Err(SaycmdError::Config(format!(
                    "The selected voice, {}, is disabled",
                    voice.name()
                )));
            }
            Ok(VoiceSelection::Resolved(voice))
        }
        None => {
            warn!("No voice with the name '{}' was found", name);
            Ok(VoiceSelection::NotFound)
        }
    }
}

/// The help text.
pub fn usage() -> &'static str {
    "\
Usage: saycmd [INSTRUCTION [INSTRUCTION ...]]

Instructions may be any of the following:

-text TEXT
    Read the given text.
    Text can also be given without the -text switch as long as it does not start with '-'.
-textFile FILENAME
-textFile URL
    Read the contents of the given file as text.
-voice NAME
    Switch to a specific voice.
    EXAMPLE: saycmd -voice Zira -text \"Spoken as Zira\" -voice David -text \"Spoken as David\"
-listVoices
    Print a list of installed voices and exit.
-rate RATE
    Change the rate of speech. RATE must be a number from 0 to 5.
    0 sets the rate to the default.
    1 is the fastest, and 5 is the slowest.
-emphasis EMPHASIS
    Change the emphasis of speech. EMPHASIS must be a number from 0 to 4.
    Note that emphasis support depends on the selected voice and may have no audible effect.
    0 sets emphasis to the default.
    1 is the strongest.
-volume VOLUME
    Change the voice volume. VOLUME must be a number from 0 to 7.
    0 sets the volume to the default.
    1 is silent, and 6 is the loudest; 7 selects the voice's own default.
-outputVolume VOLUME
    Change the output device volume. VOLUME must be a number from 0 to 100.
    Changing it mid-line splits the speech into separately delivered parts.
-reset
    Change all voice options back to the defaults.
-sentence
    Start a new sentence.
-endSentence
    End the current sentence.
-paragraph
    Start a new paragraph.
-endParagraph
    End the current paragraph.
-loop COUNT
    Repeat all of the instructions before this point COUNT times.
-fadeIn COUNT
    Like -loop, but the volume ramps up across the repetitions.
-fadeOut COUNT
    Like -loop, but the volume ramps down across the repetitions.
-interactive
    Read lines from standard input and speak each one, until end of input.
-jsonFile FILENAME
-jsonFile URL
    Expand the randomized JSON template in the given file and read the result.
-help
    Print this help text and exit.
"
}
