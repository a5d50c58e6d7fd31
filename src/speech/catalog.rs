//! Voice catalog
//!
//! Resolves user-supplied voice names against the voices installed on the
//! platform engine, and lists them for `-listvoices`.

use crate::{Result, SaycmdError};
use log::debug;
use tts::Tts;

/// Opaque handle to an installed voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRef {
    id: String,
    name: String,
}

impl VoiceRef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a voice instruction's name lookup
///
/// A name that matches nothing is not fatal: the selection is carried as
/// `NotFound` so later stages keep their scope structure, and the engine
/// default voice is heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelection {
    Resolved(VoiceRef),
    NotFound,
}

/// One row of `-listvoices` output
#[derive(Debug, Clone)]
pub struct VoiceListing {
    pub id: String,
    pub name: String,
    pub language: String,
    pub gender: Option<String>,
    pub enabled: bool,
}

/// Access to the installed voices
pub trait VoiceCatalog {
    /// Resolve a name to a voice; `None` when nothing matches.
    fn resolve(&self, name: &str) -> Option<VoiceRef>;

    /// Whether a resolved voice may be spoken with.
    fn is_enabled(&self, voice: &VoiceRef) -> bool;

    /// Every installed voice, in engine order.
    fn list(&self) -> Vec<VoiceListing>;
}

/// How a requested name matches a voice: the exact id, or a
/// case-insensitive substring of the display name.
pub fn name_matches(id: &str, name: &str, query: &str) -> bool {
    id == query || name.to_lowercase().contains(&query.to_lowercase())
}

/// Catalog backed by the platform TTS engine's installed voices
pub struct TtsCatalog {
    voices: Vec<tts::Voice>,
}

impl TtsCatalog {
    /// Snapshot the installed voices. The engine instance used for the
    /// enumeration is released immediately; speaking uses fresh instances.
    pub fn new() -> Result<Self> {
        let tts = Tts::default()
            .map_err(|e| SaycmdError::Speech(format!("Failed to initialize TTS engine: {}", e)))?;
        let voices = tts
            .voices()
            .map_err(|e| SaycmdError::Speech(format!("Failed to enumerate voices: {}", e)))?;
        debug!("Voice catalog loaded with {} voices", voices.len());
        Ok(Self { voices })
    }
}

impl VoiceCatalog for TtsCatalog {
    fn resolve(&self, name: &str) -> Option<VoiceRef> {
        self.voices
            .iter()
            .find(|voice| name_matches(&voice.id(), &voice.name(), name))
            .map(|voice| VoiceRef::new(&voice.id(), &voice.name()))
    }

    fn is_enabled(&self, _voice: &VoiceRef) -> bool {
        // The platform engine only reports voices that are ready to use.
        true
    }

    fn list(&self) -> Vec<VoiceListing> {
        self.voices
            .iter()
            .map(|voice| VoiceListing {
                id: voice.id(),
                name: voice.name(),
                language: voice.language().to_string(),
                gender: voice.gender().map(|gender| format!("{:?}", gender)),
                enabled: true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_exact_id() {
        assert!(name_matches("urn:voice:zira", "Microsoft Zira", "urn:voice:zira"));
        assert!(!name_matches("urn:voice:zira", "Microsoft Zira", "urn:voice:david"));
    }

    #[test]
    fn test_name_matches_substring_case_insensitive() {
        assert!(name_matches("urn:voice:zira", "Microsoft Zira", "zira"));
        assert!(name_matches("urn:voice:zira", "Microsoft Zira", "MICROSOFT"));
        assert!(name_matches("urn:voice:zira", "Microsoft Zira", "soft Zi"));
        assert!(!name_matches("urn:voice:zira", "Microsoft Zira", "david"));
    }

    #[test]
    fn test_voice_ref_accessors() {
        let voice = VoiceRef::new("id-1", "Test Voice");
        assert_eq!(voice.id(), "id-1");
        assert_eq!(voice.name(), "Test Voice");
    }
}
