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
//! The capability surface of the external playback engine.
//!
//! Decoding and mixing happen outside this crate. The sound manager only
//! opens clips, routes them to one of two channels and adjusts them.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::storage::Storage;

pub mod mock;

/// Identifies a clip within the engine that opened it.
pub type ClipId = u64;

/// The two playback channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Continuous sound (hum), always looping.
    Sustain,
    /// Triggered sound, one-shot or looping.
    Effect,
}

impl Channel {
    /// The engine channel number.
    pub fn number(self) -> usize {
        match self {
            Channel::Sustain => 0,
            Channel::Effect => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Sustain => write!(f, "sustain"),
            Channel::Effect => write!(f, "effect"),
        }
    }
}

/// Errors raised at the engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unable to open {path}: {reason}")]
    Open { path: String, reason: String },
}

/// An open clip. Every clip must be closed exactly once.
pub trait Clip {
    /// The engine's identifier for this clip.
    fn id(&self) -> ClipId;

    /// The asset path the clip was opened from.
    fn path(&self) -> &str;

    /// Sets the clip gain, 0.0 to 1.0.
    fn set_volume(&mut self, volume: f32);

    /// Sets the pitch offset. 0.0 plays at normal speed and pitch.
    fn set_rate(&mut self, pitch: f32);

    /// Enables or disables looping.
    fn set_looping(&mut self, looping: bool);

    /// Returns true once a non-looping clip has played through.
    fn is_ended(&self) -> bool;

    /// Pauses the clip in place.
    fn pause(&mut self);

    /// Rewinds to the first audio frame and resumes.
    fn seek_start_of_data(&mut self);

    /// Stops the clip and frees its engine resources.
    fn close(&mut self);
}

/// The playback engine that owns the output channels.
pub trait PlaybackEngine: fmt::Display {
    /// Opens the clip at the given asset path. A missing file is reported as
    /// [`PlaybackError::NotFound`].
    fn open(&mut self, path: &str) -> Result<Box<dyn Clip>, PlaybackError>;

    /// Routes a clip to a channel and starts it, or silences the channel.
    fn route(&mut self, channel: Channel, clip: Option<ClipId>);

    /// Sets the master output gain, 0.0 to 1.0.
    fn set_volume(&mut self, gain: f32);

    /// Returns true when nothing is playing on any channel.
    fn is_ended(&self) -> bool;
}

/// Gets the playback engine with the given name. Engines named `mock*` play
/// nothing and refuse clips the storage doesn't hold.
pub fn get_engine(
    name: &str,
    storage: Arc<dyn Storage>,
) -> Result<Box<dyn PlaybackEngine>, Box<dyn Error>> {
    if name.starts_with("mock") {
        return Ok(Box::new(mock::MockEngine::new(name).with_storage(storage)));
    }

    Err(format!("Unknown playback engine: {}", name).into())
}
