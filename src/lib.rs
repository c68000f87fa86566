//! # `msxdsk`
//!
//! A library and CLI for manipulating MSX-DOS 720 KB floppy disk images:
//! parsing and synthesizing the boot sector, FAT12 table, and root
//! directory, and converting MSX-BASIC source text to and from its
//! tokenized on-disk form.
//!
//! ## Architecture
//!
//! * `bios` — byte-level codecs below the file system: the boot sector /
//!   BIOS Parameter Block, and the packed FAT12 cluster-chain table.
//! * `fs` — the file system proper: directory entries, name/date/time
//!   packing, the linear cluster allocator, and `fs::image::Disk`, which
//!   ties the above into `info`/`ls`/`get`/`put`/`cat`/`rm`/`create`.
//! * `basic` — MSX-BASIC tokenizer and detokenizer, the keyword table, and
//!   BCD floating point encode/decode.
//! * `commands` — one module per CLI subcommand, thin adapters from
//!   `clap::ArgMatches` onto the `fs`/`basic` APIs above.
//!
//! This crate supports exactly one disk geometry (720 KB, 9 sectors/track,
//! 2 sides, 80 tracks) and exactly one file system (MSX-DOS 1 FAT12,
//! root directory only); other geometries and FAT16/32 are out of scope.

pub mod basic;
pub mod bios;
pub mod commands;
pub mod fs;

/// Reads a 720 KB image file and parses it into a `Disk`.
pub fn open_image(path: &str) -> Result<fs::image::Disk, commands::CommandError> {
    let raw = std::fs::read(path).map_err(commands::CommandError::ImageRead)?;
    Ok(fs::image::Disk::from_bytes(raw, &fs::Config::default())?)
}

/// Serializes a `Disk` back to its image file, overwriting it in one write.
pub fn save_image(path: &str, disk: &fs::image::Disk) -> Result<(), commands::CommandError> {
    std::fs::write(path, disk.to_bytes()).map_err(commands::CommandError::ImageWrite)
}
