use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::ListingError;
use crate::listing::entry::{EntryCollection, FileEntry, MAX_IDENT_LEN, MAX_NAME_LEN, MAX_PATH_LEN, bounded};
use crate::listing::mode;
use crate::listing::platform::{Platform, RawStat};

pub const HIDDEN_MARKER: char = '.';
pub const CURRENT_DIR: &str = ".";
pub const PARENT_DIR: &str = "..";

/// Result of collecting one path operand.
#[derive(Debug)]
pub struct Listing {
    /// The operand as given.
    pub root: PathBuf,
    /// False when the operand named a single non-directory file.
    pub is_directory: bool,
    pub entries: EntryCollection,
    /// Sum of `ceil(size / block_size)` over entries owning storage blocks.
    pub block_total: u64,
    /// Block size reported for the operand itself.
    pub block_size: u64,
}

impl Listing {
    /// Allocated storage in KiB, as shown on the `total` line.
    pub fn total_kib(&self) -> u64 {
        self.block_total.saturating_mul(self.block_size) / 1024
    }

    /// Where an entry lives on disk.
    pub fn entry_path(&self, entry: &FileEntry) -> PathBuf {
        if self.is_directory {
            entry_path(&self.root, &entry.name)
        } else {
            self.root.clone()
        }
    }
}

/// Joins a directory and an entry name. `Path::join` never doubles a
/// trailing separator and lets an absolute name replace the parent.
pub fn entry_path(parent: &Path, name: &str) -> PathBuf {
    parent.join(name)
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

pub fn collect(path: &Path, include_hidden: bool, platform: &dyn Platform) -> Result<Listing, ListingError> {
    let stat = platform
        .stat_no_follow(path)
        .map_err(|source| ListingError::PathInaccessible { path: path.to_path_buf(), source })?;

    if mode::is_dir(stat.mode) {
        collect_directory(path, &stat, include_hidden, platform)
    } else {
        Ok(collect_single(path, &stat, platform))
    }
}

/// Per-directory accumulator. Every entry, real or `.`/`..`, goes through
/// `add` so skips and block accounting are applied the same way.
struct DirectoryScan<'p> {
    platform: &'p dyn Platform,
    entries: EntryCollection,
    block_total: u64,
    block_size: u64,
}

impl DirectoryScan<'_> {
    fn add(&mut self, name: String, full_path: &Path) {
        let Some(name) = bounded(name, MAX_NAME_LEN) else {
            debug!("Skipping {}: name too long", full_path.display());
            return;
        };

        let stat = match self.platform.stat_no_follow(full_path) {
            Ok(stat) => stat,
            Err(e) => {
                debug!("Skipping {}: {}", full_path.display(), e);
                return;
            }
        };

        let Some(entry) = build_entry(name, &stat, self.platform) else {
            debug!("Skipping {}: owner or group unresolved (uid {}, gid {})", full_path.display(), stat.uid, stat.gid);
            return;
        };

        // Zero allocated blocks: symlinks stored inline (and sparse files).
        if stat.blocks > 0 {
            self.block_total += stat.size.div_ceil(self.block_size);
        }
        self.entries.push(entry);
    }
}

fn collect_directory(
    path: &Path,
    dir_stat: &RawStat,
    include_hidden: bool,
    platform: &dyn Platform,
) -> Result<Listing, ListingError> {
    // Dropping `ReadDir` closes the stream on every exit path.
    let stream = fs::read_dir(path)
        .map_err(|source| ListingError::DirectoryUnreadable { path: path.to_path_buf(), source })?;

    let mut scan = DirectoryScan {
        platform,
        entries: EntryCollection::new(),
        block_total: 0,
        block_size: dir_stat.blksize.max(1),
    };

    // `ReadDir` never yields these two.
    if include_hidden {
        for name in [CURRENT_DIR, PARENT_DIR] {
            scan.add(name.to_string(), &entry_path(path, name));
        }
    }

    for item in stream {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };

        let name = item.file_name().to_string_lossy().into_owned();
        if !include_hidden && is_hidden(&name) {
            continue;
        }

        let full_path = entry_path(path, &name);
        scan.add(name, &full_path);
    }

    debug!(
        "Collected {} entries from {} ({} growths)",
        scan.entries.len(),
        path.display(),
        scan.entries.growths()
    );

    Ok(Listing {
        root: path.to_path_buf(),
        is_directory: true,
        entries: scan.entries,
        block_total: scan.block_total,
        block_size: scan.block_size,
    })
}

fn collect_single(path: &Path, stat: &RawStat, platform: &dyn Platform) -> Listing {
    let mut entries = EntryCollection::new();
    let name = path.to_string_lossy().into_owned();

    match bounded(name, MAX_PATH_LEN).and_then(|name| build_entry(name, stat, platform)) {
        Some(entry) => entries.push(entry),
        None => debug!("Skipping {}: name too long or owner/group unresolved", path.display()),
    }

    Listing {
        root: path.to_path_buf(),
        is_directory: false,
        entries,
        block_total: 0,
        block_size: stat.blksize.max(1),
    }
}

fn build_entry(name: String, stat: &RawStat, platform: &dyn Platform) -> Option<FileEntry> {
    let owner = platform.owner_name(stat.uid).and_then(|n| bounded(n, MAX_IDENT_LEN))?;
    let group = platform.group_name(stat.gid).and_then(|n| bounded(n, MAX_IDENT_LEN))?;

    Some(FileEntry {
        name,
        owner,
        group,
        link_count: stat.nlink,
        size: stat.size,
        modified: stat.mtime,
        mode: stat.mode,
    })
}
