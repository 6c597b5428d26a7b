//! Output file system seam.
//!
//! Generation never touches the disk; units are handed to a [`Vfs`]. The
//! driver supplies a local-filesystem one, tests use [`MemoryVfs`].

use std::collections::BTreeMap;
use std::io;

pub trait Vfs {
    /// Write `text` to `path` (relative, `/`-separated), replacing any
    /// previous content.
    fn write(&mut self, path: &str, text: &str) -> io::Result<()>;
}

/// In-memory output, ordered by path.
#[derive(Default, Debug)]
pub struct MemoryVfs {
    files: BTreeMap<String, String>,
}

impl MemoryVfs {
    pub fn new() -> Self {
        MemoryVfs::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Vfs for MemoryVfs {
    fn write(&mut self, path: &str, text: &str) -> io::Result<()> {
        self.files.insert(path.to_string(), text.to_string());
        Ok(())
    }
}
