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
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::playback;
use crate::sound::{DynamicSoundManager, SoundFontManager, SoundManager, TuningLayer};
use crate::storage::{FsStorage, Storage};

mod error;
mod saber;

pub use error::ConfigError;
pub use saber::SaberConfig;

/// Builds a sound manager from the given config file, selects the startup
/// font and applies the configured tuning.
pub fn init_sound_manager(path: &Path) -> Result<TuningLayer, Box<dyn Error>> {
    let config = SaberConfig::deserialize(path)?;
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.storage_root()));
    let engine = playback::get_engine(config.engine(), storage.clone())?;
    info!(storage = %storage, engine = %engine, "Initializing sound manager");

    let mut manager = TuningLayer::new(SoundFontManager::new(storage, engine));
    manager.init();
    manager.set_font_dir_name_base(config.font_dir_name_base());
    manager.set_master_volume(config.master_volume());
    manager.set_font(config.font())?;
    for (category, tuning) in config.tuning() {
        manager.set_sound_volume(category, tuning.volume);
        manager.set_sound_pitch(category, tuning.pitch);
    }

    Ok(manager)
}
