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
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// An in-memory storage. Records every probe so callers can check what was asked.
#[derive(Clone, Default)]
pub struct MockStorage {
    files: HashSet<String>,
    probes: Arc<Mutex<Vec<String>>>,
}

impl MockStorage {
    /// Creates a storage holding the given files.
    pub fn new<I, S>(files: I) -> MockStorage
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockStorage {
            files: files.into_iter().map(Into::into).collect(),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a file.
    pub fn insert(&mut self, path: &str) {
        self.files.insert(path.to_string());
    }

    /// Returns every path probed so far, in order.
    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().clone()
    }

    /// Forgets recorded probes.
    pub fn clear_probes(&self) {
        self.probes.lock().clear();
    }
}

impl super::Storage for MockStorage {
    fn exists(&self, path: &str) -> bool {
        self.probes.lock().push(path.to_string());
        self.files.contains(path)
    }
}

impl fmt::Display for MockStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} files (Mock)", self.files.len())
    }
}
