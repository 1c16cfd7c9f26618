//! Type-and-permission string for the long format (`drwxr-xr-x`).

pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

const TYPE_CHARS: [(u32, char); 7] = [
    (S_IFREG, '-'),
    (S_IFDIR, 'd'),
    (S_IFLNK, 'l'),
    (S_IFBLK, 'b'),
    (S_IFCHR, 'c'),
    (S_IFIFO, 'p'),
    (S_IFSOCK, 's'),
];

// Owner triple first, execute bit last in each triple.
const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

pub const MODE_STRING_LEN: usize = 10;

pub fn type_char(mode: u32) -> char {
    let kind = mode & S_IFMT;
    TYPE_CHARS
        .iter()
        .find(|(bits, _)| *bits == kind)
        .map(|(_, c)| *c)
        .unwrap_or('?')
}

/// Renders raw `st_mode` bits as a 10 character string.
/// Pure: setuid/setgid/sticky bits are ignored.
pub fn mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(MODE_STRING_LEN);
    out.push(type_char(mode));
    for (bit, c) in PERMISSION_BITS {
        out.push(if mode & bit != 0 { c } else { '-' });
    }
    out
}

pub fn is_dir(mode: u32) -> bool {
    mode & S_IFMT == S_IFDIR
}

pub fn is_symlink(mode: u32) -> bool {
    mode & S_IFMT == S_IFLNK
}
