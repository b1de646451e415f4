//! TOML-based configuration system for Homeroom.

use crate::error::{HomeroomError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Homeroom configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeroomConfig {
    pub homeroom: HomeroomSection,
    pub roster: RosterConfig,
    pub mdm: MdmConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Core Homeroom instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeroomSection {
    pub instance_name: String,
    pub data_dir: String,
}

/// Roster provider (school information system) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Days subtracted from the last-run watermark when computing the
    /// `updated_after` bound, to tolerate clock skew and late edits.
    #[serde(default = "default_overlap_days")]
    pub overlap_days: i64,
}

fn default_overlap_days() -> i64 {
    3
}

/// MDM directory service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdmConfig {
    pub server_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Class scope rules for the sync engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// School levels whose classes are excluded from sync.
    #[serde(default)]
    pub skip_school_levels: Vec<String>,
    /// Course types whose classes are excluded from sync.
    #[serde(default)]
    pub skip_course_types: Vec<String>,
}

impl HomeroomConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| HomeroomError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.homeroom.instance_name.is_empty() {
            return Err(HomeroomError::Config(
                "homeroom.instance_name must not be empty".into(),
            ));
        }

        if self.homeroom.data_dir.is_empty() {
            return Err(HomeroomError::Config(
                "homeroom.data_dir must not be empty".into(),
            ));
        }

        if self.roster.base_url.is_empty() {
            return Err(HomeroomError::Config(
                "roster.base_url must not be empty".into(),
            ));
        }

        if self.mdm.server_url.is_empty() {
            return Err(HomeroomError::Config(
                "mdm.server_url must not be empty".into(),
            ));
        }

        if self.roster.overlap_days < 0 {
            return Err(HomeroomError::Config(
                "roster.overlap_days must not be negative".into(),
            ));
        }

        if self.mdm.timeout_secs == 0 {
            return Err(HomeroomError::Config(
                "mdm.timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Path of the watermark file recording the last successful sync.
    pub fn state_path(&self) -> PathBuf {
        Path::new(&self.homeroom.data_dir).join("last_sync")
    }

    /// Generate a sensible default configuration.
    pub fn generate_default() -> Self {
        Self {
            homeroom: HomeroomSection {
                instance_name: "My School".into(),
                data_dir: "/var/lib/homeroom".into(),
            },
            roster: RosterConfig {
                base_url: "https://api.sis.example.com/v2".into(),
                username: String::new(),
                password: String::new(),
                overlap_days: default_overlap_days(),
            },
            mdm: MdmConfig {
                server_url: "https://mdm.example.com/JSSResource".into(),
                username: String::new(),
                password: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            sync: SyncConfig::default(),
        }
    }
}
