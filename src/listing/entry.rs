use std::time::SystemTime;
use crate::listing::mode;

/// Longest directory entry name accepted (NAME_MAX).
pub const MAX_NAME_LEN: usize = 255;
/// Longest single-file operand accepted (PATH_MAX).
pub const MAX_PATH_LEN: usize = 4096;
/// Longest owner or group name accepted.
pub const MAX_IDENT_LEN: usize = 256;

/// Returns `text` if it fits in `max` bytes. Over-long text is rejected,
/// never truncated, so an entry is either complete or absent.
pub fn bounded(text: String, max: usize) -> Option<String> {
    if text.len() <= max { Some(text) } else { None }
}

/// One filesystem object as seen at collection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub owner: String,
    pub group: String,
    pub link_count: u64,
    /// For symlinks: length of the target text.
    pub size: u64,
    pub modified: SystemTime,
    pub mode: u32,
}

impl FileEntry {
    pub fn is_symlink(&self) -> bool {
        mode::is_symlink(self.mode)
    }
}

/// Growable entry storage. Starts at `INITIAL_CAPACITY` and doubles
/// whenever it is full; the growth policy is ours, not `Vec`'s.
#[derive(Debug, Default)]
pub struct EntryCollection {
    entries: Vec<FileEntry>,
    growths: usize,
}

impl EntryCollection {
    pub const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(Self::INITIAL_CAPACITY),
            growths: 0,
        }
    }

    pub fn push(&mut self, entry: FileEntry) {
        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(Self::INITIAL_CAPACITY);
            self.entries.reserve_exact(additional);
            self.growths += 1;
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of times the storage had to grow.
    pub fn growths(&self) -> usize {
        self.growths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Byte-wise ascending by name.
    pub fn sort_by_name(&mut self) {
        self.entries.sort_unstable_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    }
}

impl FromIterator<FileEntry> for EntryCollection {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.push(entry);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(name: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        owner: "root".to_string(),
        group: "root".to_string(),
        link_count: 1,
        size: 0,
        modified: SystemTime::UNIX_EPOCH,
        mode: mode::S_IFREG | 0o644,
    }
}
