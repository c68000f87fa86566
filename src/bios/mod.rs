//! # BIOS module
//!
//! Byte-level codecs for the parts of a disk image that sit below the
//! filesystem proper: the boot sector / BIOS Parameter Block and the FAT12
//! cluster-chain table. Nothing in this module knows about files or
//! directories, only about fixed byte offsets and packed bit fields.

pub mod bpb;
pub mod fat12;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("boot sector fields failed sanity check")]
    InvalidBootSector,
}
