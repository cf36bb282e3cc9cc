//! `blobdrop get <url>` – download one URL and save it as video.mp4.

use anyhow::{Context, Result};
use blobdrop_core::config::{self, BlobdropConfig, ConflictPolicy};
use blobdrop_core::downloader::SUCCESS_MESSAGE;
use blobdrop_core::fetch::CurlFetcher;
use blobdrop_core::save::DirectorySaveHost;
use blobdrop_core::Downloader;
use std::path::PathBuf;

#[derive(Debug)]
pub struct GetArgs {
    pub url: String,
    pub download_dir: Option<PathBuf>,
    pub overwrite: bool,
}

/// Target directory and conflict policy: `--download-dir` over config over cwd,
/// `--overwrite` over the configured policy.
pub fn resolve_target(
    cfg: &BlobdropConfig,
    download_dir: Option<PathBuf>,
    overwrite: bool,
) -> Result<(PathBuf, ConflictPolicy)> {
    let dir = match download_dir.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("current directory")?,
    };
    let conflict = if overwrite {
        ConflictPolicy::Overwrite
    } else {
        cfg.on_conflict
    };
    Ok((dir, conflict))
}

pub async fn run_get(args: GetArgs) -> Result<()> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let (dir, conflict) = resolve_target(&cfg, args.download_dir, args.overwrite)?;
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let host = DirectorySaveHost::new(dir, conflict);
    let url = args.url;

    let result = tokio::task::spawn_blocking(move || {
        Downloader::new(fetcher, host).download_and_log(&url)
    })
    .await
    .context("download task join")?;

    let saved = result.context("Download failed")?;
    println!("{}", SUCCESS_MESSAGE);
    println!("saved {} ({} bytes)", saved.path.display(), saved.bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn flag_dir_wins_over_config() {
        let cfg = BlobdropConfig {
            download_dir: Some(PathBuf::from("/from/config")),
            ..BlobdropConfig::default()
        };
        let (dir, conflict) = resolve_target(&cfg, Some(PathBuf::from("/from/flag")), false).unwrap();
        assert_eq!(dir, Path::new("/from/flag"));
        assert_eq!(conflict, ConflictPolicy::Rename);
    }

    #[test]
    fn config_dir_used_without_flag() {
        let cfg = BlobdropConfig {
            download_dir: Some(PathBuf::from("/from/config")),
            on_conflict: ConflictPolicy::Fail,
            ..BlobdropConfig::default()
        };
        let (dir, conflict) = resolve_target(&cfg, None, false).unwrap();
        assert_eq!(dir, Path::new("/from/config"));
        assert_eq!(conflict, ConflictPolicy::Fail);
    }

    #[test]
    fn falls_back_to_cwd_and_overwrite_flag() {
        let cfg = BlobdropConfig::default();
        let (dir, conflict) = resolve_target(&cfg, None, true).unwrap();
        assert_eq!(dir, std::env::current_dir().unwrap());
        assert_eq!(conflict, ConflictPolicy::Overwrite);
    }
}
