//! The one piece of state the editor persists across sessions: the
//! last-used content root. Stored as a small JSON file in the platform
//! config directory; failures are logged and otherwise ignored.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct EditorConfig {
    content_root: Option<PathBuf>,
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mapgen-ed").map(|dirs| dirs.config_dir().join("config.json"))
}

/// The content root remembered from a previous session, if it still exists.
pub fn last_content_root() -> Option<PathBuf> {
    let path = config_path()?;
    let bytes = std::fs::read(&path).ok()?;
    let config: EditorConfig = serde_json::from_slice(&bytes).ok()?;
    config.content_root.filter(|root| root.is_dir())
}

/// Remembers `root` for the next session.
pub fn remember_content_root(root: &Path) {
    let Some(path) = config_path() else {
        return;
    };
    let config = EditorConfig {
        content_root: Some(root.to_path_buf()),
    };
    let write = || -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, serde_json::to_vec_pretty(&config)?)
    };
    if let Err(e) = write() {
        warn!("could not persist content root: {}", e);
    }
}
