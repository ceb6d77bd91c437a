use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::config::ScraperConfig;

/// Whether any component of `relative` equals `segment`
pub fn has_segment(relative: &Path, segment: &str) -> bool {
    relative.components().any(|c| c.as_os_str() == segment)
}

/// Discover all source files that may define parameters
///
/// Directories whose path relative to the root contains the excluded segment
/// are not descended into. Files are returned grouped by extension in the
/// configured order, and in walk order (sorted by file name) within a group.
/// Unreadable directory entries are logged and skipped.
pub fn discover_sources(config: &ScraperConfig) -> Vec<PathBuf> {
    let root = &config.repo_path;
    let mut sources: Vec<(usize, PathBuf)> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !has_segment(relative, &config.excluded_segment)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(rank) = config.extension_rank(entry.path()) {
            sources.push((rank, entry.into_path()));
        }
    }

    // Stable sort keeps walk order within an extension
    sources.sort_by_key(|(rank, _)| *rank);
    sources.into_iter().map(|(_, path)| path).collect()
}

/// Path recorded in `source_file`, relative to the repository root
pub fn relative_source_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
