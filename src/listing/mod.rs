pub mod collector;
pub mod entry;
pub mod mode;
pub mod platform;
pub mod render;

/// What `-a` and `-l` select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    pub include_hidden: bool,
    pub long: bool,
}
