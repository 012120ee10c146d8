use crate::error::{ProcessingError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;
use tracing::debug;

/// Whole input file held in memory, either read into a heap buffer or
/// mapped from disk.
pub enum InputBuffer {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for InputBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBuffer::Owned(bytes) => bytes.as_slice(),
            InputBuffer::Mapped(mmap) => &mmap[..],
        }
    }
}

impl std::fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            InputBuffer::Owned(_) => "Owned",
            InputBuffer::Mapped(_) => "Mapped",
        };
        f.debug_struct("InputBuffer")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

pub struct InputReader {
    use_mmap: bool,
}

impl InputReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load the complete file. A missing or unreadable file, or fewer bytes
    /// than the file's reported size, is an error.
    pub fn read_all(&self, path: &Path) -> Result<InputBuffer> {
        if self.use_mmap {
            self.read_mmap(path)
        } else {
            self.read_buffered(path)
        }
    }

    fn read_buffered(&self, path: &Path) -> Result<InputBuffer> {
        let mut file = File::open(path)?;
        let expected = file.metadata()?.len();

        let mut data = Vec::with_capacity(expected as usize);
        let actual = file.read_to_end(&mut data)? as u64;

        if actual != expected {
            return Err(ProcessingError::ShortRead {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }

        debug!(path = %path.display(), bytes = actual, "read input into memory");
        Ok(InputBuffer::Owned(data))
    }

    fn read_mmap(&self, path: &Path) -> Result<InputBuffer> {
        let file = File::open(path)?;
        let expected = file.metadata()?.len();

        // Empty files cannot be mapped on every platform.
        if expected == 0 {
            return Ok(InputBuffer::Owned(Vec::new()));
        }

        // SAFETY: the mapping is read-only and the file is not modified while
        // the run holds it.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() as u64 != expected {
            return Err(ProcessingError::ShortRead {
                path: path.to_path_buf(),
                expected,
                actual: mmap.len() as u64,
            });
        }

        debug!(path = %path.display(), bytes = mmap.len(), "mapped input");
        Ok(InputBuffer::Mapped(mmap))
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new()
    }
}
