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
//! Font discovery: counting the contiguous run of numbered assets per category.

use std::fmt;

use tracing::{debug, info};

use super::category::{SoundCategory, CATEGORY_COUNT};
use super::naming::{self, ASSET_EXTENSION};
use crate::storage::Storage;

/// Counting policy for a single discovery pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountConfig {
    /// Count an unnumbered file first (`font.wav` vs. `font1.wav`). When that
    /// file is missing nothing else is counted.
    pub count_if_no_index: bool,
    /// Pad numbers below ten with a leading zero (`swng01.wav` vs. `swng1.wav`).
    pub leading_zero: bool,
    /// Skip number 1 (`{out.wav, out2.wav}` vs. `{out1.wav, out2.wav}`).
    pub skip_1: bool,
}

/// Counts `<base_dir>/<begins_with><n><ends_with>` files for `n` in
/// `start_idx..=end_idx`, stopping at the first number that is missing.
pub fn count(
    storage: &dyn Storage,
    begins_with: &str,
    ends_with: &str,
    base_dir: &str,
    start_idx: u32,
    end_idx: u32,
    config: CountConfig,
) -> usize {
    let mut count = 0;

    if config.count_if_no_index {
        let path = format!("{}/{}{}", base_dir, begins_with, ends_with);
        if !storage.exists(&path) {
            debug!(path, "Unnumbered asset missing, nothing counted");
            return 0;
        }
        count += 1;
    }

    let mut idx = start_idx;
    while idx <= end_idx {
        if idx == 1 && config.skip_1 {
            idx = 2;
            if idx > end_idx {
                break;
            }
        }

        let path = if config.leading_zero && idx < 10 {
            format!("{}/{}0{}{}", base_dir, begins_with, idx, ends_with)
        } else {
            format!("{}/{}{}{}", base_dir, begins_with, idx, ends_with)
        };

        if !storage.exists(&path) {
            // Gaps end the run; anything past one is never counted.
            break;
        }
        count += 1;
        idx += 1;
    }

    count
}

/// Where discovery looks for one category's assets.
#[derive(Clone, Copy, Debug)]
pub struct DiscoveryRule {
    pub category: SoundCategory,
    pub start_idx: u32,
    pub end_idx: u32,
    pub config: CountConfig,
}

const NUMBERED: CountConfig = CountConfig {
    count_if_no_index: false,
    leading_zero: true,
    skip_1: false,
};

const UNNUMBERED: CountConfig = CountConfig {
    count_if_no_index: true,
    leading_zero: false,
    skip_1: false,
};

const fn rule(
    category: SoundCategory,
    start_idx: u32,
    end_idx: u32,
    config: CountConfig,
) -> DiscoveryRule {
    DiscoveryRule {
        category,
        start_idx,
        end_idx,
        config,
    }
}

/// Discovery parameters applied on every font switch. Categories absent here
/// always count zero.
pub const DISCOVERY_RULES: [DiscoveryRule; 10] = [
    rule(SoundCategory::Blaster, 1, 4, NUMBERED),
    rule(SoundCategory::Boot, 1, 4, NUMBERED),
    rule(SoundCategory::Force, 1, 4, NUMBERED),
    rule(SoundCategory::Hum, 1, 4, NUMBERED),
    rule(SoundCategory::Lockup, 1, 1, NUMBERED),
    rule(SoundCategory::PowerDown, 1, 4, NUMBERED),
    rule(SoundCategory::PowerUp, 1, 4, NUMBERED),
    rule(SoundCategory::Clash, 1, 16, NUMBERED),
    rule(SoundCategory::Swing, 1, 16, NUMBERED),
    rule(SoundCategory::FontId, 0, 1, UNNUMBERED),
];

/// A selected font and the inventory discovered for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundFont {
    index: u8,
    base_dir: String,
    counts: [usize; CATEGORY_COUNT],
}

impl SoundFont {
    /// Probes storage for every category of the font at `index`.
    pub fn discover(storage: &dyn Storage, font_dir_name_base: &str, index: u8) -> SoundFont {
        let base_dir = naming::font_base_dir(font_dir_name_base, index);
        let mut counts = [0; CATEGORY_COUNT];

        for rule in DISCOVERY_RULES.iter() {
            let Some(token) = naming::token(rule.category) else {
                continue;
            };
            counts[rule.category.index()] = count(
                storage,
                token,
                ASSET_EXTENSION,
                &base_dir,
                rule.start_idx,
                rule.end_idx,
                rule.config,
            );
        }

        let font = SoundFont {
            index,
            base_dir,
            counts,
        };
        info!(
            font = index,
            base_dir = font.base_dir(),
            total = font.total(),
            "Sound font discovered"
        );
        font
    }

    /// The zero-based font index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The font directory, e.g. `necfont1`.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// Number of contiguous clips found for a category.
    pub fn count(&self, category: SoundCategory) -> usize {
        self.counts[category.index()]
    }

    /// Total clips found across all categories.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for SoundFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (font {}):", self.base_dir, self.index)?;
        for category in SoundCategory::ALL {
            writeln!(f, "  {:<10} {}", category.as_str(), self.count(category))?;
        }
        Ok(())
    }
}
