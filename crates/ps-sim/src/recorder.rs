//! Append-only sample recording.
//!
//! Each test segment starts a new line, `\n<name>,`, followed by that
//! test's samples separated by commas.

use crate::error::SimResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug)]
pub struct Recorder<W: Write> {
    sink: W,
    samples_in_segment: usize,
}

impl Recorder<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            samples_in_segment: 0,
        }
    }

    pub fn begin_segment(&mut self, name: &str) -> SimResult<()> {
        write!(self.sink, "\n{name},")?;
        self.samples_in_segment = 0;
        Ok(())
    }

    pub fn record(&mut self, value: f64) -> SimResult<()> {
        if self.samples_in_segment > 0 {
            self.sink.write_all(b",")?;
        }
        write!(self.sink, "{value}")?;
        self.samples_in_segment += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> SimResult<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
