//! Append-only byte arrays that spill to unlinked temp files.
//!
//! A [`FileArray`] starts in the *writing* state: appends land in an
//! in-memory buffer that is drained to an anonymous temp file once it grows
//! past the spill threshold. Freezing flushes and maps the file read-only for
//! random access; thawing returns to writing. The file is unlinked on
//! creation, so working data vanishes with the process.
//!
//! The array also tracks *runs*: caller-marked contiguous byte ranges,
//! appended in order and never overlapping. The search driver uses one run
//! per BFS depth.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

use memmap2::Mmap;

/// A contiguous byte range inside a [`FileArray`].
#[derive(Debug, Clone, Copy)]
pub struct Run {
    pub begin: u64,
    pub end: u64,
}

/// A read-only view of an array's flushed contents. Holds the mapping, so it
/// stays valid while the owning array keeps appending behind it.
pub struct Snapshot {
    map: Option<Mmap>,
}

impl Snapshot {
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn run_slice(&self, run: Run) -> &[u8] {
        &self.as_slice()[run.begin as usize..run.end as usize]
    }
}

pub struct FileArray {
    buf: Vec<u8>,
    spill_threshold: usize,
    file: Option<File>,
    file_len: u64,
    frozen: Option<Mmap>,
    runs: Vec<Run>,
    open_run: Option<u64>,
}

impl FileArray {
    pub fn new(spill_threshold: usize) -> FileArray {
        FileArray {
            buf: Vec::new(),
            spill_threshold: spill_threshold.max(1),
            file: None,
            file_len: 0,
            frozen: None,
            runs: Vec::new(),
            open_run: None,
        }
    }

    /// Total bytes appended so far (flushed plus buffered).
    #[inline]
    pub fn len(&self) -> u64 {
        self.file_len + self.buf.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> io::Result<()> {
        debug_assert!(self.frozen.is_none(), "append to a frozen array");
        self.buf.extend_from_slice(bytes);
        if self.buf.len() > self.spill_threshold {
            self.flush()?;
        }
        Ok(())
    }

    pub fn push(&mut self, byte: u8) -> io::Result<()> {
        self.extend_from_slice(&[byte])
    }

    /// Drain the in-memory buffer to the backing file, creating the unlinked
    /// temp file on first use.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        if self.file.is_none() {
            self.file = Some(tempfile::tempfile()?);
        }
        let file = self.file.as_mut().expect("just created");
        file.write_all(&self.buf)?;
        self.file_len += self.buf.len() as u64;
        self.buf.clear();
        Ok(())
    }

    /// Flush and map the whole array read-only. [`as_slice`](Self::as_slice)
    /// and [`run_slice`](Self::run_slice) require the frozen state.
    pub fn freeze(&mut self) -> io::Result<()> {
        self.flush()?;
        self.frozen = self.map_file()?;
        Ok(())
    }

    /// Release the mapping and return to the writing state.
    pub fn thaw(&mut self) {
        self.frozen = None;
    }

    /// Thaw, truncate, and forget all runs.
    pub fn reset(&mut self) -> io::Result<()> {
        self.thaw();
        self.buf.clear();
        if let Some(file) = self.file.as_mut() {
            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
        }
        self.file_len = 0;
        self.runs.clear();
        self.open_run = None;
        Ok(())
    }

    /// Map everything flushed so far while the array stays writable. Later
    /// appends are not visible through the snapshot.
    pub fn snapshot(&mut self) -> io::Result<Snapshot> {
        self.flush()?;
        Ok(Snapshot {
            map: self.map_file()?,
        })
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.frozen.as_deref().unwrap_or(&[])
    }

    pub fn start_run(&mut self) {
        debug_assert!(self.open_run.is_none(), "run already open");
        self.open_run = Some(self.len());
    }

    pub fn end_run(&mut self) {
        let begin = self.open_run.take().expect("no open run");
        let end = self.len();
        self.runs.push(Run { begin, end });
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    #[inline]
    pub fn run_slice(&self, index: usize) -> &[u8] {
        let run = self.runs[index];
        &self.as_slice()[run.begin as usize..run.end as usize]
    }

    fn map_file(&self) -> io::Result<Option<Mmap>> {
        debug_assert!(self.buf.is_empty());
        match (&self.file, self.file_len) {
            (Some(file), len) if len > 0 => {
                // SAFETY: the file is anonymous and owned by this array; it
                // is never truncated or rewritten while a mapping is live
                // (reset thaws first, and snapshots only outlive appends).
                let map = unsafe { Mmap::map(file)? };
                Ok(Some(map))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spills_freezes_and_reads_back() {
        let mut arr = FileArray::new(16);
        arr.start_run();
        for i in 0..100u8 {
            arr.push(i).unwrap();
        }
        arr.end_run();
        arr.start_run();
        arr.extend_from_slice(&[200, 201, 202]).unwrap();
        arr.end_run();

        arr.freeze().unwrap();
        assert_eq!(arr.len(), 103);
        assert_eq!(arr.runs().len(), 2);
        let first = arr.run_slice(0);
        assert_eq!(first.len(), 100);
        assert_eq!(first[42], 42);
        assert_eq!(arr.run_slice(1), &[200, 201, 202]);
    }

    #[test]
    fn snapshot_sees_flushed_prefix_while_writing_continues() {
        let mut arr = FileArray::new(4);
        arr.extend_from_slice(b"abcdef").unwrap();
        let snap = arr.snapshot().unwrap();
        arr.extend_from_slice(b"ghijkl").unwrap();
        assert_eq!(snap.as_slice(), b"abcdef");
        assert_eq!(arr.len(), 12);
    }

    #[test]
    fn reset_returns_to_an_empty_writable_array() {
        let mut arr = FileArray::new(4);
        arr.start_run();
        arr.extend_from_slice(b"xyzzy").unwrap();
        arr.end_run();
        arr.freeze().unwrap();
        arr.reset().unwrap();
        assert!(arr.is_empty());
        assert!(arr.runs().is_empty());
        arr.extend_from_slice(b"ab").unwrap();
        arr.freeze().unwrap();
        assert_eq!(arr.as_slice(), b"ab");
    }
}
