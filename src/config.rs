//! Configuration management

use crate::{Result, SaycmdError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Persistent user settings
///
/// Holds the engine-level defaults applied before any instruction takes
/// effect: preferred voice, rate, and volume ceiling.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.saycmd.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location or create it.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path or create it there.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| SaycmdError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| SaycmdError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: path.to_path_buf(),
        })
    }

    /// Get config file path (~/.saycmd.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".saycmd.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    ///
    /// Every setting is optional; the default file sketches the keys with
    /// empty values for the user to fill in. Empty and out-of-range
    /// values read back as unset.
    fn default_config() -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("speech"))
            .set("voice", "")
            .set("rate", "")
            .set("volume", "");
        ini
    }

    /// Get a string value from config
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get_from(Some(section), key)
            .map(|value| value.to_string())
    }

    /// Get an integer value from config
    fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    /// Preferred voice name, matched like a voice instruction's argument
    pub fn voice(&self) -> Option<String> {
        self.get_string("speech", "voice").filter(|v| !v.is_empty())
    }

    /// Default speech rate (0-100)
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Volume ceiling (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }
}
