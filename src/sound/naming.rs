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
//! Asset path generation for the legacy font naming convention.
//!
//! Paths have the shape `<font base dir>/<token><suffix>.wav`. Callers number
//! clips from zero while file names number them from one.

use super::category::SoundCategory;
use super::error::SoundError;

/// File extension of every sound asset.
pub const ASSET_EXTENSION: &str = ".wav";

/// Default prefix of font directories (`necfont1`, `necfont2`, ...).
pub const DEFAULT_FONT_DIR_NAME_BASE: &str = "necfont";

/// How the one-based clip number is appended to a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Suffix {
    /// No number at all (`font.wav`).
    None,
    /// A "0" is always prepended to the number (`hum03.wav`, `hum010.wav`).
    ZeroPrefixed,
    /// Two digits, zero padded only below ten (`swng09.wav`, `swng10.wav`).
    TwoDigit,
}

/// The file name token for a category, if the convention names it.
pub fn token(category: SoundCategory) -> Option<&'static str> {
    naming(category).map(|(token, _)| token)
}

fn naming(category: SoundCategory) -> Option<(&'static str, Suffix)> {
    let naming = match category {
        SoundCategory::FontId => ("font", Suffix::None),
        SoundCategory::Boot => ("boot", Suffix::None),
        SoundCategory::PowerUp => ("out", Suffix::ZeroPrefixed),
        SoundCategory::Swing => ("swng", Suffix::TwoDigit),
        SoundCategory::Clash => ("clsh", Suffix::TwoDigit),
        SoundCategory::Blaster => ("blst", Suffix::ZeroPrefixed),
        SoundCategory::Lockup => ("lock", Suffix::ZeroPrefixed),
        SoundCategory::Force => ("force", Suffix::ZeroPrefixed),
        SoundCategory::PowerDown => ("in", Suffix::ZeroPrefixed),
        SoundCategory::Hum => ("hum", Suffix::ZeroPrefixed),
        SoundCategory::Menu | SoundCategory::LowSwing | SoundCategory::HighSwing => return None,
    };
    Some(naming)
}

/// Builds the directory name of a font: `<base><font_index + 1>`.
pub fn font_base_dir(font_dir_name_base: &str, font_index: u8) -> String {
    format!("{}{}", font_dir_name_base, u16::from(font_index) + 1)
}

/// Builds the asset path of the zero-based `index`th clip of `category` in `base_dir`.
pub fn asset_path(
    base_dir: &str,
    category: SoundCategory,
    index: u16,
) -> Result<String, SoundError> {
    let (token, suffix) = naming(category).ok_or(SoundError::UnsupportedCategory(category))?;
    let number = u32::from(index) + 1;

    let mut path = String::with_capacity(base_dir.len() + token.len() + 10);
    path.push_str(base_dir);
    path.push('/');
    path.push_str(token);
    match suffix {
        Suffix::None => {}
        Suffix::ZeroPrefixed => {
            path.push('0');
            path.push_str(&number.to_string());
        }
        Suffix::TwoDigit => path.push_str(&format!("{:02}", number)),
    }
    path.push_str(ASSET_EXTENSION);

    Ok(path)
}
