//! Line-oriented output: one URL per line to a created file, or to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Where the URL list goes. A file is closed when the target is dropped; stdout never is.
#[derive(Debug)]
pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(Stdout),
}

impl OutputTarget {
    /// Create `path` for writing, falling back to stdout when no path is given or creation fails.
    /// The fallback is silent.
    pub fn open(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return OutputTarget::Stdout(io::stdout());
        };
        match File::create(path) {
            Ok(f) => OutputTarget::File(BufWriter::new(f)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot create output file, using stdout");
                OutputTarget::Stdout(io::stdout())
            }
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputTarget::Stdout(_))
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(writer) => writer.write(buf),
            OutputTarget::Stdout(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(writer) => writer.flush(),
            OutputTarget::Stdout(out) => out.flush(),
        }
    }
}

/// Write each URL followed by `\n`, in order, then flush.
pub fn write_lines<W: Write + ?Sized>(writer: &mut W, urls: &[String]) -> Result<(), OutputError> {
    for url in urls {
        writer.write_all(url.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
