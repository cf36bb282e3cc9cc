//! Disk side of a save: temp file, preallocation, fsync, atomic rename.
//!
//! The blob is written to `<final>.part` first and only renamed to the final
//! name once fully synced, so a reader never sees a half-written file under
//! the final name.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `video.mp4` → `video.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Temp file that becomes the final file on `persist`.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the temp file belonging to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self { file, temp_path })
    }

    /// Reserve `size` bytes. On Unix tries `posix_fallocate`; falls back to `set_len`.
    pub fn preallocate(&mut self, size: u64) -> io::Result<()> {
        if size == 0 {
            return Ok(());
        }
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file.set_len(size)
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// fsync, close, and rename onto `final_path` (replacing it if present).
    /// If either step fails the temp file is deleted before the error is returned.
    pub fn persist(self, final_path: &Path) -> io::Result<()> {
        if let Err(e) = self.file.sync_all() {
            self.discard();
            return Err(e);
        }
        let PartFile { file, temp_path } = self;
        drop(file);
        std::fs::rename(&temp_path, final_path).map_err(|e| {
            remove_temp(&temp_path);
            e
        })
    }

    /// Close and delete the temp file.
    pub fn discard(self) {
        let PartFile { file, temp_path } = self;
        drop(file);
        remove_temp(&temp_path);
    }
}

fn remove_temp(temp_path: &Path) {
    if let Err(e) = std::fs::remove_file(temp_path) {
        tracing::warn!("could not remove {}: {}", temp_path.display(), e);
    }
}

/// Writes `data` to `final_path` through a `.part` temp file.
/// On any failure the temp file is removed and the final path is left untouched.
pub fn write_atomically(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut part = PartFile::create(final_path)?;
    let written = part
        .preallocate(data.len() as u64)
        .and_then(|()| part.write_all(data));
    match written {
        Ok(()) => part.persist(final_path),
        Err(e) => {
            part.discard();
            Err(e)
        }
    }
}
