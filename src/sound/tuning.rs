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
//! Live per-category volume and pitch tuning layered over a [`SoundFontManager`].

use serde::Deserialize;
use tracing::{debug, warn};

use super::category::{SoundCategory, CATEGORY_COUNT};
use super::error::SoundError;
use super::manager::SoundFontManager;
use super::{DynamicSoundManager, SoundManager};

/// Default clip volume.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Default pitch offset, normal speed and pitch.
pub const DEFAULT_PITCH: f32 = 0.0;

/// Volume and pitch applied to every clip of one category.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TuningOverride {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub pitch: f32,
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl Default for TuningOverride {
    fn default() -> Self {
        TuningOverride {
            volume: DEFAULT_VOLUME,
            pitch: DEFAULT_PITCH,
        }
    }
}

/// Wraps a [`SoundFontManager`] and applies a [`TuningOverride`] to every clip
/// it starts. Selecting a font resets all overrides.
#[derive(Debug)]
pub struct TuningLayer {
    manager: SoundFontManager,
    overrides: [TuningOverride; CATEGORY_COUNT],
}

impl TuningLayer {
    /// Wraps a manager with every override at its default.
    pub fn new(manager: SoundFontManager) -> TuningLayer {
        TuningLayer {
            manager,
            overrides: [TuningOverride::default(); CATEGORY_COUNT],
        }
    }

    /// The wrapped manager.
    pub fn manager(&self) -> &SoundFontManager {
        &self.manager
    }

    /// The override stored for a category.
    pub fn tuning(&self, category: SoundCategory) -> TuningOverride {
        self.overrides[category.index()]
    }

    fn load_defaults(&mut self) {
        self.overrides = [TuningOverride::default(); CATEGORY_COUNT];
    }

    /// Applies the stored override to the clip now playing `category`.
    fn apply(&mut self, category: SoundCategory) {
        let tuning = self.overrides[category.index()];
        if let Some(clip) = self.manager.live_clip_mut(category) {
            clip.set_volume(tuning.volume);
            clip.set_rate(tuning.pitch);
        }
    }
}

impl SoundManager for TuningLayer {
    fn init(&mut self) {
        self.manager.init();
    }

    fn play_sound(&mut self, category: SoundCategory, index: u16) -> Result<(), SoundError> {
        self.manager.play_sound(category, index)?;
        self.apply(category);
        Ok(())
    }

    fn play_random_sound(&mut self, category: SoundCategory) -> Result<(), SoundError> {
        self.manager.play_random_sound(category)?;
        self.apply(category);
        Ok(())
    }

    fn set_font(&mut self, font_index: u8) -> Result<(), SoundError> {
        self.load_defaults();
        self.manager.set_font(font_index)
    }

    fn continue_play(&mut self, fill_mixing_buffer: bool) -> bool {
        self.manager.continue_play(fill_mixing_buffer)
    }

    fn set_master_volume(&mut self, percent: u8) {
        self.manager.set_master_volume(percent);
    }

    fn set_font_dir_name_base(&mut self, base: &str) {
        self.manager.set_font_dir_name_base(base);
    }
}

impl DynamicSoundManager for TuningLayer {
    fn set_sound_volume(&mut self, category: SoundCategory, volume: f32) {
        if !volume.is_finite() {
            warn!(%category, volume, "Ignoring invalid volume");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.overrides[category.index()].volume = volume;

        match self.manager.live_clip_mut(category) {
            Some(clip) => {
                clip.set_volume(volume);
                debug!(%category, volume, "Volume applied");
            }
            None => debug!(%category, volume, "Volume latched"),
        }
    }

    fn set_sound_pitch(&mut self, category: SoundCategory, pitch: f32) {
        if !pitch.is_finite() {
            warn!(%category, pitch, "Ignoring invalid pitch");
            return;
        }
        self.overrides[category.index()].pitch = pitch;

        match self.manager.live_clip_mut(category) {
            Some(clip) => {
                clip.set_rate(pitch);
                debug!(%category, pitch, "Pitch applied");
            }
            None => debug!(%category, pitch, "Pitch latched"),
        }
    }
}
