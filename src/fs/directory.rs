//! 32-byte directory entry model and the 80-slot root directory.
//!
//! Grounded on `a2kit::fs::fat::directory` (`Entry`, `Directory`, attribute
//! bit constants, `FileInfo`) and on spec.md §3's field layout.

use chrono::NaiveDateTime;

use crate::fs::pack;
use crate::fs::Config;

pub const ENTRY_LEN: usize = 32;

/// Reserved directory area is 5 sectors (`BootSector::data_position`'s
/// Open Question resolution, DESIGN.md), which holds 80 entries of 32 bytes
/// each — not the BPB's nominal `directoryEntry = 112` field, which is a
/// synthesized invariant value independent of this engine's actual reserved
/// space.
pub const DIR_SECTORS: usize = 5;
pub const MAX_ENTRIES: usize = DIR_SECTORS * 512 / ENTRY_LEN;

pub const ATTR_READ_ONLY: u8 = 0x01;
pub const ATTR_HIDDEN: u8 = 0x02;
pub const ATTR_SYSTEM: u8 = 0x04;
pub const ATTR_VOLUME_ID: u8 = 0x08;
pub const ATTR_DIRENT: u8 = 0x10;

const DELETED_MARK: u8 = 0xE5;

/// One 32-byte root directory entry, spec.md §3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: [u8; 8],
    pub ext: [u8; 3],
    pub attr: u8,
    pub time: u16,
    pub date: u16,
    pub cluster1: u16,
    pub file_size: u32,
}

impl Entry {
    pub const LEN: usize = ENTRY_LEN;

    pub fn new(
        name: [u8; 8],
        ext: [u8; 3],
        attr: u8,
        timestamp: NaiveDateTime,
        cluster1: u16,
        file_size: u32,
    ) -> Self {
        let (date, time) = pack::pack_datetime(timestamp);
        Entry { name, ext, attr, time, date, cluster1, file_size }
    }

    pub fn is_deleted(&self) -> bool {
        self.name[0] == DELETED_MARK
    }

    pub fn is_end_marker(&self) -> bool {
        self.name[0] == 0
    }

    pub fn display_name(&self) -> String {
        pack::file_name_to_string(&self.name, &self.ext)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        pack::unpack_datetime(self.date, self.time)
    }

    pub fn attr_chars(&self) -> String {
        format!(
            "{}{}{}{}",
            if self.attr & ATTR_DIRENT != 0 { 'd' } else { '-' },
            if self.attr & ATTR_VOLUME_ID != 0 { 'v' } else { '-' },
            if self.attr & ATTR_SYSTEM != 0 { 's' } else { '-' },
            if self.attr & ATTR_HIDDEN != 0 { 'h' } else { '-' },
        ) + if self.attr & ATTR_READ_ONLY != 0 { "w" } else { "-" }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), ENTRY_LEN);
        let mut name = [0u8; 8];
        name.copy_from_slice(&bytes[0..8]);
        let mut ext = [0u8; 3];
        ext.copy_from_slice(&bytes[8..11]);
        Entry {
            name,
            ext,
            attr: bytes[11],
            time: u16::from_le_bytes([bytes[22], bytes[23]]),
            date: u16::from_le_bytes([bytes[24], bytes[25]]),
            cluster1: u16::from_le_bytes([bytes[26], bytes[27]]),
            file_size: u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; ENTRY_LEN] {
        let mut out = [0u8; ENTRY_LEN];
        out[0..8].copy_from_slice(&self.name);
        out[8..11].copy_from_slice(&self.ext);
        out[11] = self.attr;
        // bytes 12..22 (reserved) stay zeroed.
        out[22..24].copy_from_slice(&self.time.to_le_bytes());
        out[24..26].copy_from_slice(&self.date.to_le_bytes());
        out[26..28].copy_from_slice(&self.cluster1.to_le_bytes());
        out[28..32].copy_from_slice(&self.file_size.to_le_bytes());
        out
    }
}

/// The root directory: up to `MAX_ENTRIES` live entries, in on-disk order.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    pub entries: Vec<Entry>,
}

impl Directory {
    /// Parses directory sectors, stopping at the first zero first-byte
    /// (end-of-directory) and skipping `0xE5`-marked removed entries
    /// (spec.md §4.3, §7). Filenames are MSX-DOS 8.3 bytes, not ASCII text,
    /// so no further byte-range check is applied here.
    pub fn from_bytes(bytes: &[u8], _cfg: &Config) -> Self {
        let mut entries = Vec::new();
        for chunk in bytes.chunks_exact(ENTRY_LEN).take(MAX_ENTRIES) {
            let entry = Entry::from_bytes(chunk);
            if entry.is_end_marker() {
                break;
            }
            if entry.is_deleted() {
                continue;
            }
            entries.push(entry);
        }
        Directory { entries }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_ENTRIES * ENTRY_LEN);
        for entry in &self.entries {
            out.extend_from_slice(&entry.to_bytes());
        }
        out.resize(MAX_ENTRIES * ENTRY_LEN, 0);
        out
    }

    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.attr & ATTR_VOLUME_ID == 0)
    }

    pub fn find(&self, display_name: &str) -> Option<&Entry> {
        self.files().find(|e| e.display_name().eq_ignore_ascii_case(display_name))
    }
}

#[cfg(test)]
mod directory_test {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn entry_round_trip() {
        let e = Entry::new(*b"HELLO   ", *b"TXT", 0, stamp(), 2, 100);
        let back = Entry::from_bytes(&e.to_bytes());
        assert_eq!(e, back);
    }

    #[test]
    fn end_marker_stops_scan() {
        let mut bytes = vec![0u8; ENTRY_LEN * 3];
        let e = Entry::new(*b"A       ", *b"B  ", 0, stamp(), 2, 1);
        bytes[0..ENTRY_LEN].copy_from_slice(&e.to_bytes());
        let dir = Directory::from_bytes(&bytes, &Config::default());
        assert_eq!(dir.entries.len(), 1);
    }

    #[test]
    fn deleted_entry_filtered() {
        let mut bytes = vec![0u8; ENTRY_LEN * 2];
        let mut e = Entry::new(*b"A       ", *b"B  ", 0, stamp(), 2, 1).to_bytes();
        e[0] = 0xE5;
        bytes[0..ENTRY_LEN].copy_from_slice(&e);
        let dir = Directory::from_bytes(&bytes, &Config::default());
        assert!(dir.entries.is_empty());
    }
}
