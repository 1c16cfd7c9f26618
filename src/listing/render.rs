use chrono::{DateTime, Datelike, Local, TimeZone};
use log::debug;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::listing::Format;
use crate::listing::collector::Listing;
use crate::listing::entry::FileEntry;
use crate::listing::mode::mode_string;
use crate::listing::platform::Platform;

/// Same year as "now": month, day, time of day.
pub const RECENT_DATE_FORMAT: &str = "%b %e %H:%M";
/// Any other year: month, day, year.
pub const OLD_DATE_FORMAT: &str = "%b %e  %Y";
pub const NAME_SEPARATOR: &str = "  ";
pub const LINK_ARROW: &str = " -> ";
/// Link targets are cut to this many bytes.
pub const MAX_LINK_TARGET_LEN: usize = 4096;

/// Minimum widths shared by every row of one long listing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub links: usize,
    pub owner: usize,
    pub group: usize,
    pub size: usize,
}

impl ColumnWidths {
    pub fn measure<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |w, e| Self {
            links: w.links.max(decimal_width(e.link_count)),
            owner: w.owner.max(e.owner.chars().count()),
            group: w.group.max(e.group.chars().count()),
            size: w.size.max(decimal_width(e.size)),
        })
    }
}

pub fn decimal_width(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Shown when an mtime lies outside what the calendar can represent.
pub const UNKNOWN_DATE: &str = "??? ?? ?????";

/// Local time for `modified`, or `None` if it does not fit in a `DateTime`.
pub fn local_time(modified: SystemTime) -> Option<DateTime<Local>> {
    let (secs, nanos) = match modified.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (secs.checked_neg()?, 0),
                n => (secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - n),
            }
        }
    };
    Local.timestamp_opt(secs, nanos).single()
}

pub fn format_date(modified: SystemTime, now: &DateTime<Local>) -> String {
    let Some(when) = local_time(modified) else {
        debug!("Modification time {:?} is out of range", modified);
        return UNKNOWN_DATE.to_string();
    };
    let pattern = if when.year() == now.year() { RECENT_DATE_FORMAT } else { OLD_DATE_FORMAT };
    when.format(pattern).to_string()
}

/// Best effort: an unreadable target renders as empty text.
fn link_target(path: &Path, platform: &dyn Platform) -> String {
    match platform.read_link(path) {
        Ok(target) => {
            let mut text = target.to_string_lossy().into_owned();
            if text.len() > MAX_LINK_TARGET_LEN {
                let mut cut = MAX_LINK_TARGET_LEN;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            text
        }
        Err(e) => {
            debug!("Cannot read link target of {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Sorts the listing by name and writes it. `now` decides the date style
/// for every row of this call.
pub fn render<W: Write>(
    out: &mut W,
    mut listing: Listing,
    format: Format,
    platform: &dyn Platform,
    now: DateTime<Local>,
) -> io::Result<()> {
    listing.entries.sort_by_name();

    if !format.long {
        if listing.entries.is_empty() {
            return Ok(());
        }
        for entry in listing.entries.iter() {
            write!(out, "{}{}", entry.name, NAME_SEPARATOR)?;
        }
        return writeln!(out);
    }

    // 1. Width discovery
    let widths = ColumnWidths::measure(listing.entries.iter());

    // 2. Emission
    if listing.is_directory {
        writeln!(out, "total {}", listing.total_kib())?;
    }
    for entry in listing.entries.iter() {
        write!(
            out,
            "{} {:>lw$} {:>ow$} {:>gw$} {:>sw$} {} {}",
            mode_string(entry.mode),
            entry.link_count,
            entry.owner,
            entry.group,
            entry.size,
            format_date(entry.modified, &now),
            entry.name,
            lw = widths.links,
            ow = widths.owner,
            gw = widths.group,
            sw = widths.size,
        )?;
        if entry.is_symlink() {
            let target = link_target(&listing.entry_path(entry), platform);
            write!(out, "{}{}", LINK_ARROW, target)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
