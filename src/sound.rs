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
//! Sound font playback and management.
//!
//! This module provides:
//! - Asset path generation under the legacy font naming convention
//! - Font discovery (per-category clip inventory)
//! - The sustain and effect playback slots
//! - The sound font manager and its live tuning layer

mod category;
mod discovery;
mod error;
mod manager;
mod naming;
mod slot;
mod tuning;

#[cfg(test)]
mod tests;

pub use category::{SoundCategory, CATEGORY_COUNT};
pub use discovery::{count, CountConfig, DiscoveryRule, SoundFont, DISCOVERY_RULES};
pub use error::SoundError;
pub use manager::SoundFontManager;
pub use naming::{asset_path, font_base_dir, ASSET_EXTENSION, DEFAULT_FONT_DIR_NAME_BASE};
pub use slot::{ClipHandle, PlaybackSlot, SlotState};
pub use tuning::{TuningLayer, TuningOverride, DEFAULT_PITCH, DEFAULT_VOLUME};

/// The control surface the motion layer drives.
pub trait SoundManager {
    /// Prepares the manager. Calling it again has no effect.
    fn init(&mut self);

    /// Plays the zero-based `index`th clip of a category.
    fn play_sound(&mut self, category: SoundCategory, index: u16) -> Result<(), SoundError>;

    /// Plays a clip of a category chosen uniformly from the current font's inventory.
    fn play_random_sound(&mut self, category: SoundCategory) -> Result<(), SoundError>;

    /// Selects a font, rediscovers its inventory and starts its hum and
    /// identification sound.
    fn set_font(&mut self, font_index: u8) -> Result<(), SoundError>;

    /// Polled once per control cycle. Returns true when nothing is playing.
    fn continue_play(&mut self, fill_mixing_buffer: bool) -> bool;

    /// Sets the master volume in percent, 0 to 100.
    fn set_master_volume(&mut self, percent: u8);

    /// Sets the prefix of font directory names. Takes effect on the next font selection.
    fn set_font_dir_name_base(&mut self, base: &str);
}

/// Per-category live tuning.
pub trait DynamicSoundManager: SoundManager {
    /// Sets a category's volume, 0.0 to 1.0. Applied at once if the category
    /// is playing, otherwise on its next trigger.
    fn set_sound_volume(&mut self, category: SoundCategory, volume: f32);

    /// Sets a category's pitch offset. Applied at once if the category is
    /// playing, otherwise on its next trigger.
    fn set_sound_pitch(&mut self, category: SoundCategory, pitch: f32);
}
