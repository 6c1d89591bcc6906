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
use super::category::SoundCategory;
use crate::playback::PlaybackError;

/// Errors reported by sound font playback and management.
#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("No file naming convention for sound category {0}")]
    UnsupportedCategory(SoundCategory),

    #[error("Sound asset {path} does not exist")]
    MissingAsset { path: String },

    #[error("The current font has no {0} sounds")]
    EmptyCategory(SoundCategory),

    #[error("Playback engine error: {0}")]
    Playback(#[source] PlaybackError),
}

impl From<PlaybackError> for SoundError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::NotFound(path) => SoundError::MissingAsset { path },
            other => SoundError::Playback(other),
        }
    }
}
