//! Destinations for generated sources.
//!
//! The generator itself never touches the filesystem; callers register
//! output into a [`SourceSink`]. [`MemorySink`] backs tests and in-process
//! consumers, [`DirectorySink`] writes files for build integration.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Receives generated files keyed by hint name.
pub trait SourceSink {
    fn add_source(&mut self, filename: &str, text: &str);
}

/// Collects generated files in memory, in registration order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub sources: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, text)| text.as_str())
    }
}

impl SourceSink for MemorySink {
    fn add_source(&mut self, filename: &str, text: &str) {
        self.sources.push((filename.to_string(), text.to_string()));
    }
}

/// Writes each generated file under an output directory.
#[derive(Debug)]
pub struct DirectorySink {
    output_dir: PathBuf,
    /// First write failure, if any; later writes are skipped once set.
    error: Option<io::Error>,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            error: None,
        }
    }

    /// Consume the sink, surfacing the first write failure.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn try_write(&self, filename: &str, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.output_dir.join(filename), text)
    }
}

impl SourceSink for DirectorySink {
    fn add_source(&mut self, filename: &str, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.try_write(filename, text) {
            self.error = Some(err);
        }
    }
}
