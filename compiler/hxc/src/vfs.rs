//! Writes generated units under a directory on the local file system.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hx_codegen::Vfs;

#[derive(Debug)]
pub struct LocalVfs {
    root: PathBuf,
}

impl LocalVfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalVfs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut full = self.root.clone();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if part == ".." || part == "." {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("relative component in `{path}`"),
                ));
            }
            full.push(part);
        }
        Ok(full)
    }
}

impl Vfs for LocalVfs {
    fn write(&mut self, path: &str, text: &str) -> io::Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, text)
    }
}
