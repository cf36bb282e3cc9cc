//! Browser-style collision naming: `video.mp4`, `video (1).mp4`, ...

use std::path::{Path, PathBuf};

const MAX_SUFFIX: u32 = 9999;

/// Name for the `n`-th collision of `filename` (n = 0 is the name itself).
pub fn numbered_name(filename: &str, n: u32) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rfind('.') {
        Some(dot) if dot > 0 => {
            let (stem, ext) = filename.split_at(dot);
            format!("{} ({}){}", stem, n, ext)
        }
        _ => format!("{} ({})", filename, n),
    }
}

/// First path in `dir` for `filename` that does not exist yet (neither final nor `.part`).
pub fn next_free_path(dir: &Path, filename: &str) -> Option<PathBuf> {
    (0..=MAX_SUFFIX)
        .map(|n| dir.join(numbered_name(filename, n)))
        .find(|p| !p.exists() && !crate::storage::temp_path(p).exists())
}
