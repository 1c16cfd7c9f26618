//! OS collaborators used by the collector and the renderer.

use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use users::{Groups, Users, UsersCache};

/// The subset of `lstat(2)` the listing needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStat {
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub mtime: SystemTime,
    pub blksize: u64,
    pub blocks: u64,
}

impl RawStat {
    pub fn from_metadata(meta: &fs::Metadata) -> io::Result<Self> {
        Ok(Self {
            mode: meta.mode(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            mtime: meta.modified()?,
            blksize: meta.blksize(),
            blocks: meta.blocks(),
        })
    }
}

pub trait Platform {
    /// Status of `path` itself, never resolving a trailing symlink.
    fn stat_no_follow(&self, path: &Path) -> io::Result<RawStat>;
    fn owner_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The real filesystem plus the passwd/group databases.
/// The name cache lives as long as this value, i.e. one `lsl` run.
pub struct LocalPlatform {
    names: UsersCache,
}

impl LocalPlatform {
    pub fn new() -> Self {
        Self {
            names: UsersCache::new(),
        }
    }
}

impl Default for LocalPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for LocalPlatform {
    fn stat_no_follow(&self, path: &Path) -> io::Result<RawStat> {
        fs::symlink_metadata(path).and_then(|m| RawStat::from_metadata(&m))
    }

    fn owner_name(&self, uid: u32) -> Option<String> {
        self.names
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.names
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().into_owned())
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }
}
