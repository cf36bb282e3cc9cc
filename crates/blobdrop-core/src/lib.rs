pub mod config;
pub mod logging;

pub mod blob;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod save;
pub mod storage;
pub mod url_model;

pub use downloader::{Downloader, SAVE_FILENAME};
pub use error::{DownloadError, ErrorKind};
