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
//! The two single-owner playback slots.

use std::fmt;

use tracing::debug;

use crate::playback::{Channel, Clip, ClipId, PlaybackEngine};

/// Owns an open clip and closes it when dropped.
pub struct ClipHandle {
    clip: Box<dyn Clip>,
}

impl ClipHandle {
    /// Takes ownership of an open clip.
    pub fn new(clip: Box<dyn Clip>) -> ClipHandle {
        ClipHandle { clip }
    }

    /// The engine's identifier for the clip.
    pub fn id(&self) -> ClipId {
        self.clip.id()
    }

    /// The asset path of the clip.
    pub fn path(&self) -> &str {
        self.clip.path()
    }

    /// Returns true once the clip has played through.
    pub fn is_ended(&self) -> bool {
        self.clip.is_ended()
    }

    /// Gives access to the clip controls.
    pub fn clip_mut(&mut self) -> &mut dyn Clip {
        &mut *self.clip
    }
}

impl Drop for ClipHandle {
    fn drop(&mut self) {
        debug!(clip = self.clip.id(), path = self.clip.path(), "Releasing clip");
        self.clip.close();
    }
}

impl fmt::Debug for ClipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipHandle")
            .field("id", &self.id())
            .field("path", &self.path())
            .finish()
    }
}

/// What a slot is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// No clip.
    Empty,
    /// A clip is held but not playing: not yet routed, or played through.
    Loaded,
    /// A clip is routed and producing sound.
    Playing,
    /// A clip is held and paused.
    Paused,
}

/// A playback channel owning at most one clip.
#[derive(Debug)]
pub struct PlaybackSlot {
    channel: Channel,
    active: Option<ClipHandle>,
    routed: bool,
    paused: bool,
}

impl PlaybackSlot {
    /// Creates an empty slot for a channel.
    pub fn new(channel: Channel) -> PlaybackSlot {
        PlaybackSlot {
            channel,
            active: None,
            routed: false,
            paused: false,
        }
    }

    /// The channel this slot plays on.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Installs a clip, routes it to this slot's channel and only then
    /// releases the clip it replaced.
    pub fn replace(&mut self, clip: ClipHandle, engine: &mut dyn PlaybackEngine) {
        let id = clip.id();
        let previous = self.active.replace(clip);
        self.routed = false;
        self.paused = false;

        engine.route(self.channel, Some(id));
        self.routed = true;
        debug!(channel = %self.channel, clip = id, "Clip installed");

        drop(previous);
    }

    /// Pauses the held clip, if any.
    pub fn pause(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.clip_mut().pause();
            self.paused = true;
        }
    }

    /// Rewinds the held clip to its first frame. Returns false when the slot is empty.
    pub fn restart(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.clip_mut().seek_start_of_data();
                self.paused = false;
                true
            }
            None => false,
        }
    }

    /// Silences the channel without releasing the held clip.
    pub fn detach(&mut self, engine: &mut dyn PlaybackEngine) {
        if self.routed {
            engine.route(self.channel, None);
            self.routed = false;
        }
    }

    /// Silences the channel and releases the held clip.
    pub fn clear(&mut self, engine: &mut dyn PlaybackEngine) {
        self.detach(engine);
        self.paused = false;
        self.active = None;
    }

    /// The held clip.
    pub fn active(&self) -> Option<&ClipHandle> {
        self.active.as_ref()
    }

    /// The held clip's controls.
    pub fn clip_mut(&mut self) -> Option<&mut dyn Clip> {
        self.active.as_mut().map(ClipHandle::clip_mut)
    }

    /// Returns the slot's current state.
    pub fn state(&self) -> SlotState {
        match &self.active {
            None => SlotState::Empty,
            Some(_) if self.paused => SlotState::Paused,
            Some(active) if self.routed && !active.is_ended() => SlotState::Playing,
            Some(_) => SlotState::Loaded,
        }
    }
}
