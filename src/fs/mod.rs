//! # File System Module
//!
//! Everything above the raw FAT12/boot-sector byte codecs in `bios`: the
//! directory-entry model, the name/date/time packing helpers, the linear
//! cluster allocator, and the `Disk` struct that ties them together into
//! `info`/`ls`/`get`/`put`/`cat`/`rm`/`create`.
//!
//! Grounded on `a2kit::fs::fat` (same module split across `directory`,
//! `pack`, and a top-level `Disk`), collapsed to the single on-disk format
//! this crate supports (see DESIGN.md's Open Question resolution on the
//! `DiskFS`/`DiskImage` trait split).

pub mod alloc;
pub mod directory;
pub mod image;
pub mod pack;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("disk image is not 737280 bytes")]
    SizeMismatch,
    #[error("file name or extension is invalid")]
    InvalidName,
    #[error("file not found on disk")]
    FileNotFound,
    #[error("not enough free clusters to hold this file")]
    DiskFull,
}

/// Runtime-tunable knobs. The only one this crate needs is how many
/// malformed directory entries to tolerate before giving up on a listing,
/// modeled on `a2kit::lang::applesoft::settings::Settings`'s plain-struct
/// shape rather than introducing a config file.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Directory entries with an invalid attribute/name are skipped and
    /// logged up to this many times before `ls`/`info` abort outright.
    pub max_bad_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { max_bad_entries: 16 }
    }
}
