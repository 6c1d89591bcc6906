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
//! The sound font manager: font selection, clip resolution and slot management.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::category::SoundCategory;
use super::discovery::SoundFont;
use super::error::SoundError;
use super::naming::{self, DEFAULT_FONT_DIR_NAME_BASE};
use super::slot::{ClipHandle, PlaybackSlot, SlotState};
use super::SoundManager;
use crate::playback::{Channel, Clip, PlaybackEngine};
use crate::storage::Storage;

/// Plays a sound font through a playback engine.
///
/// Hum plays on the sustain slot and always loops. Every other category
/// shares the effect slot, where a new trigger replaces whatever was playing.
pub struct SoundFontManager {
    /// Media the fonts are discovered on.
    storage: Arc<dyn Storage>,
    /// The engine clips are opened and played through.
    engine: Box<dyn PlaybackEngine>,
    /// Prefix of font directory names.
    font_dir_name_base: String,
    /// The selected font, if any.
    font: Option<SoundFont>,
    sustain: PlaybackSlot,
    effect: PlaybackSlot,
    /// The category occupying the effect slot.
    effect_category: Option<SoundCategory>,
    /// Source for random clip selection.
    rng: StdRng,
    initialized: bool,
}

impl SoundFontManager {
    /// Creates a new sound font manager. No font is selected until
    /// [`SoundManager::set_font`] is called.
    pub fn new(storage: Arc<dyn Storage>, engine: Box<dyn PlaybackEngine>) -> SoundFontManager {
        SoundFontManager::with_rng(storage, engine, StdRng::from_entropy())
    }

    /// Creates a sound font manager whose random selections are reproducible.
    pub fn with_seed(
        storage: Arc<dyn Storage>,
        engine: Box<dyn PlaybackEngine>,
        seed: u64,
    ) -> SoundFontManager {
        SoundFontManager::with_rng(storage, engine, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        storage: Arc<dyn Storage>,
        engine: Box<dyn PlaybackEngine>,
        rng: StdRng,
    ) -> SoundFontManager {
        SoundFontManager {
            storage,
            engine,
            font_dir_name_base: DEFAULT_FONT_DIR_NAME_BASE.to_string(),
            font: None,
            sustain: PlaybackSlot::new(Channel::Sustain),
            effect: PlaybackSlot::new(Channel::Effect),
            effect_category: None,
            rng,
            initialized: false,
        }
    }

    /// The selected font and its inventory.
    pub fn inventory(&self) -> Option<&SoundFont> {
        self.font.as_ref()
    }

    /// The selected font index.
    pub fn active_font(&self) -> Option<u8> {
        self.font.as_ref().map(SoundFont::index)
    }

    /// The prefix font directories are named with.
    pub fn font_dir_name_base(&self) -> &str {
        &self.font_dir_name_base
    }

    /// The category currently occupying the effect slot.
    pub fn effect_category(&self) -> Option<SoundCategory> {
        self.effect_category
    }

    /// The state of the sustain slot.
    pub fn sustain_state(&self) -> SlotState {
        self.sustain.state()
    }

    /// The state of the effect slot.
    pub fn effect_state(&self) -> SlotState {
        self.effect.state()
    }

    /// Returns true if `category` is the clip presently held by its slot.
    pub fn is_live(&self, category: SoundCategory) -> bool {
        if category.is_sustained() {
            self.sustain.active().is_some()
        } else {
            self.effect_category == Some(category) && self.effect.active().is_some()
        }
    }

    /// The controls of the clip that plays `category`, if it is live.
    pub fn live_clip_mut(&mut self, category: SoundCategory) -> Option<&mut dyn Clip> {
        if !self.is_live(category) {
            return None;
        }
        if category.is_sustained() {
            self.sustain.clip_mut()
        } else {
            self.effect.clip_mut()
        }
    }

    /// The directory clips are resolved against. Before a font is selected
    /// this is the first font's directory.
    fn base_dir(&self) -> String {
        match &self.font {
            Some(font) => font.base_dir().to_string(),
            None => naming::font_base_dir(&self.font_dir_name_base, 0),
        }
    }

    fn open(&mut self, path: &str) -> Result<ClipHandle, SoundError> {
        match self.engine.open(path) {
            Ok(clip) => Ok(ClipHandle::new(clip)),
            Err(e) => {
                let err = SoundError::from(e);
                warn!(path, err = %err, "Unable to open clip");
                Err(err)
            }
        }
    }

    /// Rapid re-triggers of the same fast effect rewind the open clip instead
    /// of reopening it from storage.
    fn can_reuse_effect(&self, category: SoundCategory) -> bool {
        self.effect_category == Some(category)
            && category.is_high_performance()
            && self.effect.active().is_some_and(|clip| !clip.is_ended())
    }
}

impl SoundManager for SoundFontManager {
    fn init(&mut self) {
        if !self.initialized {
            info!(storage = %self.storage, engine = %self.engine, "Sound manager ready");
            self.initialized = true;
        }
    }

    fn play_sound(&mut self, category: SoundCategory, index: u16) -> Result<(), SoundError> {
        let path = match naming::asset_path(&self.base_dir(), category, index) {
            Ok(path) => path,
            Err(e) => {
                warn!(%category, index, "Unsupported sound category");
                return Err(e);
            }
        };

        if category.is_sustained() {
            let mut clip = self.open(&path)?;
            clip.clip_mut().set_looping(true);
            self.sustain.replace(clip, &mut *self.engine);
            debug!(%category, path, "Sustain sound started");
            return Ok(());
        }

        if self.can_reuse_effect(category) {
            self.effect.restart();
            debug!(%category, "Effect sound restarted");
            return Ok(());
        }

        // Open first so a failure leaves the current effect untouched.
        let mut clip = self.open(&path)?;
        self.effect.pause();
        clip.clip_mut().set_looping(category.loops_on_effect());
        self.effect.replace(clip, &mut *self.engine);
        self.effect_category = Some(category);
        debug!(%category, path, "Effect sound started");

        Ok(())
    }

    fn play_random_sound(&mut self, category: SoundCategory) -> Result<(), SoundError> {
        let count = self
            .font
            .as_ref()
            .map_or(0, |font| font.count(category));
        if count == 0 {
            warn!(%category, "No sounds to choose from");
            return Err(SoundError::EmptyCategory(category));
        }

        let index = self.rng.gen_range(0..count);
        self.play_sound(category, index as u16)
    }

    fn set_font(&mut self, font_index: u8) -> Result<(), SoundError> {
        let font = SoundFont::discover(self.storage.as_ref(), &self.font_dir_name_base, font_index);
        info!(
            font = font_index,
            base_dir = font.base_dir(),
            "Font selected"
        );
        self.font = Some(font);

        // Both are attempted even if the first fails. A slot whose load fails
        // must not keep playing the previous font.
        let hum = self.play_sound(SoundCategory::Hum, 0);
        if hum.is_err() {
            self.sustain.clear(&mut *self.engine);
        }
        let font_id = self.play_sound(SoundCategory::FontId, 0);
        if font_id.is_err() {
            self.effect.clear(&mut *self.engine);
            self.effect_category = None;
        }
        hum.and(font_id)
    }

    fn continue_play(&mut self, _fill_mixing_buffer: bool) -> bool {
        self.engine.is_ended()
    }

    fn set_master_volume(&mut self, percent: u8) {
        let gain = f32::from(percent.min(100)) / 100.0;
        debug!(percent, gain, "Master volume set");
        self.engine.set_volume(gain);
    }

    fn set_font_dir_name_base(&mut self, base: &str) {
        info!(base, "Font directory name base set");
        self.font_dir_name_base = base.to_string();
    }
}

impl Drop for SoundFontManager {
    fn drop(&mut self) {
        self.effect.detach(&mut *self.engine);
        self.sustain.detach(&mut *self.engine);
        self.effect.clear(&mut *self.engine);
        self.sustain.clear(&mut *self.engine);
    }
}

impl fmt::Debug for SoundFontManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundFontManager")
            .field("font", &self.active_font())
            .field("font_dir_name_base", &self.font_dir_name_base)
            .field("sustain", &self.sustain.state())
            .field("effect", &self.effect.state())
            .field("effect_category", &self.effect_category)
            .finish()
    }
}
