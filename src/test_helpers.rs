//! Shared test utilities.
//!
//! Builds small source trees in temp directories, with control over file
//! modification times so ordering tests are deterministic.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = site_fixture();
//! write_file_at(&tmp.path().join("articles/travel/new.md"), "# New", hours_ago(1));
//! ```

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

// =========================================================================
// Files
// =========================================================================

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("create {}: {e}", parent.display()));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}

/// Write `content` to `path` and set its modification time.
pub fn write_file_at(path: &Path, content: &str, modified: SystemTime) {
    write_file(path, content);
    File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(modified))
        .unwrap_or_else(|e| panic!("set mtime on {}: {e}", path.display()));
}

/// A point in time `hours` before now.
pub fn hours_ago(hours: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(hours * 3600)
}

// =========================================================================
// Fixture setup
// =========================================================================

/// A small but complete site source tree.
///
/// ```text
/// articles/travel/{kyoto,lisbon}.md   (lisbon is newer)
/// articles/buddhism/heart.md
/// articles/tap/                       (empty)
///                                     (misc missing)
/// images/light/{cover,a,b}.jpg
/// images/bw/c.png
/// sutra_images/{heart,diamond}.jpg
/// banner/{1,2}.jpg
/// ```
pub fn site_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_file_at(
        &root.join("articles/travel/kyoto.md"),
        "# Kyoto\n\nTemples in the rain.\n\n![gate](gate.jpg)\n",
        hours_ago(48),
    );
    write_file_at(
        &root.join("articles/travel/lisbon.md"),
        "# Lisbon\n\nTrams & tiles.\n",
        hours_ago(24),
    );
    write_file_at(
        &root.join("articles/buddhism/heart.md"),
        "# 心经\n\n色不异空，空不异色。\n",
        hours_ago(12),
    );
    fs::create_dir_all(root.join("articles/tap")).unwrap();

    for name in ["cover.jpg", "a.jpg", "b.jpg"] {
        write_file(&root.join("images/light").join(name), "img");
    }
    write_file(&root.join("images/bw/c.png"), "img");
    for name in ["heart.jpg", "diamond.jpg"] {
        write_file(&root.join("sutra_images").join(name), "img");
    }
    for name in ["1.jpg", "2.jpg"] {
        write_file(&root.join("banner").join(name), "img");
    }
    tmp
}
