// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use super::error::ConfigError;
use crate::sound::{SoundCategory, TuningOverride, DEFAULT_FONT_DIR_NAME_BASE};

const DEFAULT_ENGINE: &str = "mock";
const DEFAULT_MASTER_VOLUME: u8 = 100;

/// A YAML representation of the prop's sound configuration.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct SaberConfig {
    /// The directory the removable media is mounted at. Relative paths are
    /// resolved against the directory holding the config file.
    storage_root: Option<String>,

    /// The playback engine to use.
    engine: Option<String>,

    /// Prefix of font directory names.
    font_dir_name_base: Option<String>,

    /// The font selected at startup.
    font: Option<u8>,

    /// Master volume in percent.
    master_volume: Option<u8>,

    /// Per-category tuning applied after the startup font is selected.
    #[serde(default)]
    tuning: HashMap<SoundCategory, TuningOverride>,

    /// Where the config was loaded from.
    #[serde(skip)]
    config_dir: Option<PathBuf>,
}

impl SaberConfig {
    /// Parse the sound configuration from a YAML file.
    pub fn deserialize(path: &Path) -> Result<SaberConfig, ConfigError> {
        let mut config = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<SaberConfig>()?;
        config.config_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    /// Font directory names end up in asset paths, so the base must be a
    /// single non-empty path component.
    fn validate(&self) -> Result<(), ConfigError> {
        let base = self.font_dir_name_base();
        if base.is_empty() || base.contains('/') {
            return Err(ConfigError::Invalid {
                key: "font_dir_name_base",
                reason: format!("'{}' is not a directory name", base),
            });
        }
        Ok(())
    }

    /// Returns the storage root, resolved against the config file's directory.
    pub fn storage_root(&self) -> PathBuf {
        let root = PathBuf::from(self.storage_root.as_deref().unwrap_or("."));
        match &self.config_dir {
            Some(dir) if root.is_relative() => dir.join(root),
            _ => root,
        }
    }

    /// Returns the playback engine name (default: "mock").
    pub fn engine(&self) -> &str {
        self.engine.as_deref().unwrap_or(DEFAULT_ENGINE)
    }

    /// Returns the font directory name base (default: "necfont").
    pub fn font_dir_name_base(&self) -> &str {
        self.font_dir_name_base
            .as_deref()
            .unwrap_or(DEFAULT_FONT_DIR_NAME_BASE)
    }

    /// Returns the startup font (default: 0).
    pub fn font(&self) -> u8 {
        self.font.unwrap_or(0)
    }

    /// Returns the master volume percentage, at most 100 (default: 100).
    pub fn master_volume(&self) -> u8 {
        self.master_volume.unwrap_or(DEFAULT_MASTER_VOLUME).min(100)
    }

    /// Returns the configured tuning overrides, ordered by category.
    pub fn tuning(&self) -> Vec<(SoundCategory, TuningOverride)> {
        let mut tuning: Vec<(SoundCategory, TuningOverride)> =
            self.tuning.iter().map(|(c, t)| (*c, *t)).collect();
        tuning.sort_by_key(|(category, _)| *category);
        tuning
    }
}
