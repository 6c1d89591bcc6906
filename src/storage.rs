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
//! Existence checks against the removable media holding the sound fonts.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

pub mod mock;

/// The only filesystem primitive font discovery depends on.
///
/// Paths are relative to the media root and use `/` separators, exactly as
/// the naming convention writes them.
pub trait Storage: fmt::Display {
    /// Returns true if a file exists at the given path.
    fn exists(&self, path: &str) -> bool;
}

/// Storage backed by a mounted directory.
#[derive(Clone, Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates a storage rooted at the given mount point.
    pub fn new(root: impl Into<PathBuf>) -> FsStorage {
        FsStorage { root: root.into() }
    }

    /// Returns the mount point.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        let full_path = path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |full, part| full.join(part));
        let exists = full_path.is_file();
        debug!(path = ?full_path, exists, "Probed storage");
        exists
    }
}

impl fmt::Display for FsStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}
