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
//! Sound font playback and management for motion-reactive props.
//!
//! Gesture events arrive as category and index triggers. The [`sound`]
//! module resolves them to clips on removable media and plays them through
//! a [`playback::PlaybackEngine`].

pub mod config;
pub mod playback;
pub mod sound;
pub mod storage;
pub mod trigger;
