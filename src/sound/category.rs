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
use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The fixed set of sound roles a font provides clips for.
///
/// `Menu`, `LowSwing` and `HighSwing` are recognised everywhere a category is
/// accepted, but the legacy naming convention has no file names for them.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    FontId,
    Boot,
    PowerUp,
    Swing,
    Clash,
    Blaster,
    Lockup,
    Force,
    PowerDown,
    Hum,
    Menu,
    LowSwing,
    HighSwing,
}

/// Number of sound categories.
pub const CATEGORY_COUNT: usize = 13;

impl SoundCategory {
    /// Every category, in declaration order.
    pub const ALL: [SoundCategory; CATEGORY_COUNT] = [
        SoundCategory::FontId,
        SoundCategory::Boot,
        SoundCategory::PowerUp,
        SoundCategory::Swing,
        SoundCategory::Clash,
        SoundCategory::Blaster,
        SoundCategory::Lockup,
        SoundCategory::Force,
        SoundCategory::PowerDown,
        SoundCategory::Hum,
        SoundCategory::Menu,
        SoundCategory::LowSwing,
        SoundCategory::HighSwing,
    ];

    /// Position of this category in [`SoundCategory::ALL`], for per-category tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Categories that are re-triggered by seeking an already open clip
    /// instead of reopening it from storage.
    pub fn is_high_performance(self) -> bool {
        matches!(
            self,
            SoundCategory::Clash | SoundCategory::Swing | SoundCategory::Blaster
        )
    }

    /// Hum plays on the sustain channel; everything else on the effect channel.
    pub fn is_sustained(self) -> bool {
        self == SoundCategory::Hum
    }

    /// Only lockup loops on the effect channel.
    pub fn loops_on_effect(self) -> bool {
        self == SoundCategory::Lockup
    }

    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCategory::FontId => "font_id",
            SoundCategory::Boot => "boot",
            SoundCategory::PowerUp => "power_up",
            SoundCategory::Swing => "swing",
            SoundCategory::Clash => "clash",
            SoundCategory::Blaster => "blaster",
            SoundCategory::Lockup => "lockup",
            SoundCategory::Force => "force",
            SoundCategory::PowerDown => "power_down",
            SoundCategory::Hum => "hum",
            SoundCategory::Menu => "menu",
            SoundCategory::LowSwing => "low_swing",
            SoundCategory::HighSwing => "high_swing",
        }
    }
}

impl FromStr for SoundCategory {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown sound category: {}", s).into())
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
