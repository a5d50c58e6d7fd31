//! Speech subsystem
//!
//! The catalog knows which voices are installed; the engine turns compiled
//! prompt segments into audible speech through the `tts` crate.

pub mod catalog;
pub mod engine;

pub use catalog::{name_matches, TtsCatalog, VoiceCatalog, VoiceListing, VoiceRef, VoiceSelection};
pub use engine::{deliver_all, EngineBaseline, PromptDelivery, TtsEngine};
