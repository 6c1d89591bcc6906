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
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::{Channel, Clip, ClipId, PlaybackEngine, PlaybackError};
use crate::storage::Storage;

/// Something the mock engine was asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Open { clip: ClipId, path: String },
    Volume { clip: ClipId, volume: f32 },
    Rate { clip: ClipId, pitch: f32 },
    Looping { clip: ClipId, looping: bool },
    Pause { clip: ClipId },
    Seek { clip: ClipId },
    Close { clip: ClipId },
    Route { channel: Channel, clip: Option<ClipId> },
    MasterVolume { gain: f32 },
}

/// The observable state of a mock clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipState {
    pub path: String,
    pub volume: f32,
    pub pitch: f32,
    pub looping: bool,
    pub paused: bool,
    pub ended: bool,
    pub closed: bool,
}

#[derive(Default)]
struct MockState {
    next_clip: ClipId,
    clips: HashMap<ClipId, ClipState>,
    routes: [Option<ClipId>; 2],
    gain: f32,
    events: Vec<EngineEvent>,
}

impl MockState {
    fn record(&mut self, event: EngineEvent) {
        debug!(event = ?event, "Mock engine event");
        self.events.push(event);
    }

    fn clip_mut(&mut self, clip: ClipId) -> Option<&mut ClipState> {
        self.clips.get_mut(&clip)
    }
}

/// A mock engine. Doesn't actually play anything, but records every request
/// so the order of operations can be inspected.
#[derive(Clone)]
pub struct MockEngine {
    name: String,
    storage: Option<Arc<dyn Storage>>,
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    /// Creates a mock engine that can open any path.
    pub fn new(name: &str) -> MockEngine {
        MockEngine {
            name: name.to_string(),
            storage: None,
            state: Arc::new(Mutex::new(MockState {
                next_clip: 1,
                gain: 1.0,
                ..Default::default()
            })),
        }
    }

    /// Refuse to open paths the given storage doesn't hold.
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> MockEngine {
        self.storage = Some(storage);
        self
    }

    /// Returns every recorded event, in order.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.state.lock().events.clone()
    }

    /// Forgets recorded events.
    pub fn clear_events(&self) {
        self.state.lock().events.clear();
    }

    /// Returns the state of a clip this engine opened.
    pub fn clip(&self, clip: ClipId) -> Option<ClipState> {
        self.state.lock().clips.get(&clip).cloned()
    }

    /// Returns the clip routed to a channel.
    pub fn routed(&self, channel: Channel) -> Option<ClipId> {
        self.state.lock().routes[channel.number()]
    }

    /// Returns the master gain.
    pub fn gain(&self) -> f32 {
        self.state.lock().gain
    }

    /// Number of clips opened and not yet closed.
    pub fn open_clips(&self) -> usize {
        self.state
            .lock()
            .clips
            .values()
            .filter(|clip| !clip.closed)
            .count()
    }

    /// Plays a clip through to its end, as if the audio had run out.
    pub fn finish(&self, clip: ClipId) {
        if let Some(state) = self.state.lock().clip_mut(clip) {
            if !state.looping {
                state.ended = true;
            }
        }
    }
}

impl PlaybackEngine for MockEngine {
    fn open(&mut self, path: &str) -> Result<Box<dyn Clip>, PlaybackError> {
        if let Some(storage) = &self.storage {
            if !storage.exists(path) {
                return Err(PlaybackError::NotFound(path.to_string()));
            }
        }

        let mut state = self.state.lock();
        let id = state.next_clip;
        state.next_clip += 1;
        state.clips.insert(
            id,
            ClipState {
                path: path.to_string(),
                volume: 1.0,
                pitch: 0.0,
                looping: false,
                paused: false,
                ended: false,
                closed: false,
            },
        );
        state.record(EngineEvent::Open {
            clip: id,
            path: path.to_string(),
        });
        info!(engine = %self.name, clip = id, path, "Opened clip (mock).");

        Ok(Box::new(MockClip {
            id,
            path: path.to_string(),
            state: self.state.clone(),
        }))
    }

    fn route(&mut self, channel: Channel, clip: Option<ClipId>) {
        let mut state = self.state.lock();
        state.routes[channel.number()] = clip;
        if let Some(routed) = clip.and_then(|clip| state.clip_mut(clip)) {
            routed.paused = false;
        }
        state.record(EngineEvent::Route { channel, clip });
    }

    fn set_volume(&mut self, gain: f32) {
        let mut state = self.state.lock();
        state.gain = gain;
        state.record(EngineEvent::MasterVolume { gain });
    }

    fn is_ended(&self) -> bool {
        let state = self.state.lock();
        state
            .routes
            .iter()
            .flatten()
            .filter_map(|clip| state.clips.get(clip))
            .all(|clip| clip.ended || clip.paused || clip.closed)
    }
}

impl fmt::Display for MockEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}

/// A clip opened by [`MockEngine`].
struct MockClip {
    id: ClipId,
    path: String,
    state: Arc<Mutex<MockState>>,
}

impl MockClip {
    fn update(&self, event: EngineEvent, apply: impl FnOnce(&mut ClipState)) {
        let mut state = self.state.lock();
        if let Some(clip) = state.clip_mut(self.id) {
            apply(clip);
        }
        state.record(event);
    }
}

impl Clip for MockClip {
    fn id(&self) -> ClipId {
        self.id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn set_volume(&mut self, volume: f32) {
        self.update(
            EngineEvent::Volume {
                clip: self.id,
                volume,
            },
            |clip| clip.volume = volume,
        );
    }

    fn set_rate(&mut self, pitch: f32) {
        self.update(
            EngineEvent::Rate {
                clip: self.id,
                pitch,
            },
            |clip| clip.pitch = pitch,
        );
    }

    fn set_looping(&mut self, looping: bool) {
        self.update(
            EngineEvent::Looping {
                clip: self.id,
                looping,
            },
            |clip| clip.looping = looping,
        );
    }

    fn is_ended(&self) -> bool {
        self.state
            .lock()
            .clips
            .get(&self.id)
            .map_or(true, |clip| clip.ended || clip.closed)
    }

    fn pause(&mut self) {
        self.update(EngineEvent::Pause { clip: self.id }, |clip| {
            clip.paused = true
        });
    }

    fn seek_start_of_data(&mut self) {
        self.update(EngineEvent::Seek { clip: self.id }, |clip| {
            clip.ended = false;
            clip.paused = false;
        });
    }

    fn close(&mut self) {
        self.update(EngineEvent::Close { clip: self.id }, |clip| {
            clip.closed = true
        });
    }
}
