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
//! Text trigger commands, standing in for the motion layer when simulating.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::sound::{DynamicSoundManager, SoundCategory, SoundError};

/// A single trigger, as the motion layer would issue it.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerCommand {
    /// `play <category> [index]`
    Play { category: SoundCategory, index: u16 },
    /// `random <category>`
    Random(SoundCategory),
    /// `font <index>`
    Font(u8),
    /// `volume <category> <0.0-1.0>`
    Volume(SoundCategory, f32),
    /// `pitch <category> <offset>`
    Pitch(SoundCategory, f32),
    /// `master <percent>`
    Master(u8),
    /// `poll`
    Poll,
}

impl FromStr for TriggerCommand {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let command = match parts.as_slice() {
            ["play", category] => TriggerCommand::Play {
                category: category.parse()?,
                index: 0,
            },
            ["play", category, index] => TriggerCommand::Play {
                category: category.parse()?,
                index: index.parse()?,
            },
            ["random", category] => TriggerCommand::Random(category.parse()?),
            ["font", index] => TriggerCommand::Font(index.parse()?),
            ["volume", category, volume] => {
                TriggerCommand::Volume(category.parse()?, volume.parse()?)
            }
            ["pitch", category, pitch] => TriggerCommand::Pitch(category.parse()?, pitch.parse()?),
            ["master", percent] => TriggerCommand::Master(percent.parse()?),
            ["poll"] => TriggerCommand::Poll,
            _ => return Err(format!("Malformed trigger command '{}'", s).into()),
        };
        Ok(command)
    }
}

impl TriggerCommand {
    /// Runs the command against a manager and describes the outcome.
    pub fn execute<M: DynamicSoundManager>(&self, manager: &mut M) -> Result<String, SoundError> {
        match *self {
            TriggerCommand::Play { category, index } => {
                manager.play_sound(category, index)?;
                Ok(format!("playing {} {}", category, index))
            }
            TriggerCommand::Random(category) => {
                manager.play_random_sound(category)?;
                Ok(format!("playing random {}", category))
            }
            TriggerCommand::Font(index) => {
                manager.set_font(index)?;
                Ok(format!("font {} selected", index))
            }
            TriggerCommand::Volume(category, volume) => {
                manager.set_sound_volume(category, volume);
                Ok(format!("{} volume {}", category, volume))
            }
            TriggerCommand::Pitch(category, pitch) => {
                manager.set_sound_pitch(category, pitch);
                Ok(format!("{} pitch {}", category, pitch))
            }
            TriggerCommand::Master(percent) => {
                manager.set_master_volume(percent);
                Ok(format!("master volume {}%", percent))
            }
            TriggerCommand::Poll => Ok(if manager.continue_play(false) {
                "idle".to_string()
            } else {
                "playing".to_string()
            }),
        }
    }
}

impl fmt::Display for TriggerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerCommand::Play { category, index } => write!(f, "play {} {}", category, index),
            TriggerCommand::Random(category) => write!(f, "random {}", category),
            TriggerCommand::Font(index) => write!(f, "font {}", index),
            TriggerCommand::Volume(category, volume) => write!(f, "volume {} {}", category, volume),
            TriggerCommand::Pitch(category, pitch) => write!(f, "pitch {} {}", category, pitch),
            TriggerCommand::Master(percent) => write!(f, "master {}", percent),
            TriggerCommand::Poll => write!(f, "poll"),
        }
    }
}
