//! Asset loading
//!
//! The game owns exactly one asset: the background image, read once at
//! startup from a fixed relative path. Decoding and scaling belong to the
//! presentation layer; here it is just bytes with a name. A missing or
//! unreadable file is logged and the game runs with no background.

use std::fs;
use std::path::{Path, PathBuf};

/// Raw background image bytes plus where they came from
#[derive(Debug, Clone)]
pub struct Background {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Background {
    /// Fixed relative path the game looks for
    pub const FILE_PATH: &'static str = "Background.jpg";

    /// Read the image file. Failure is non-fatal by design: log and return
    /// None, the scene just carries no background.
    pub fn load(path: &Path) -> Option<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                log::info!("loaded background {} ({} bytes)", path.display(), bytes.len());
                Some(Self {
                    path: path.to_path_buf(),
                    bytes,
                })
            }
            Err(e) => {
                log::error!("error loading background image {}: {e}", path.display());
                None
            }
        }
    }
}
