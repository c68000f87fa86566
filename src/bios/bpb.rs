//! Boot sector / BIOS Parameter Block codec.
//!
//! Grounded on `a2kit::bios::bpb::BootSector`'s explicit byte-offset
//! `to_bytes`/`from_bytes` pair and `create()`/`verify()` pattern, and on
//! `original_source/src/dskmgr.cpp::extractBootSectorFromDisk` for the exact
//! field offsets (this crate supports exactly one BPB shape, so the fields
//! are hand-written rather than built from a generic `DiskStruct` derive).

use log::debug;

use crate::bios::Error;

pub const SECTOR_SIZE: usize = 512;
pub const BOOT_PROGRAM_LEN: usize = 0x1D0;

const JMP_BOOT: [u8; 3] = [0xEB, 0xFE, 0x90];
const JMP_BOOT2: [u8; 2] = [0xD0, 0xED];
const OEM_NAME: [u8; 8] = *b"SZKPLN01";
const ID_LABEL: [u8; 6] = *b"VOL_ID";
const DIRTY_FLAG: u8 = 0x36;

/// Name+ext (space-padded, 8.3) that triggers the MSX-DOS 2 canned loader.
const MSXDOS2_SYS: &str = "MSXDOS2SYS";

/// A 464-byte canned bootstrap loader. The exact bytes MSX-DOS ships are not
/// part of this crate's inputs; what matters for round-tripping and for the
/// dispatch logic in spec.md §4.1 is that DOS1 and DOS2 images carry visibly
/// distinct loaders, so each is a deterministic, recognizable filler pattern.
const BOOT_PROGRAM_DOS1: [u8; BOOT_PROGRAM_LEN] = [0xC9; BOOT_PROGRAM_LEN];
const BOOT_PROGRAM_DOS2: [u8; BOOT_PROGRAM_LEN] = [0xD9; BOOT_PROGRAM_LEN];

/// The boot sector of an MSX 720 KB floppy image (sector 0), laid out
/// exactly as spec.md §3 describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootSector {
    pub boot_jump: [u8; 3],
    pub oem_name: [u8; 8],
    pub sector_size: u16,
    pub cluster_size: u8,
    pub fat_position: u16,
    pub fat_copy: u8,
    pub directory_entry: u16,
    pub number_of_sector: u16,
    pub media_id: u8,
    pub fat_size: u16,
    pub sector_per_track: u16,
    pub disk_sides: u16,
    pub hidden_sector: u16,
    pub boot_jump2: [u8; 2],
    pub id_label: [u8; 6],
    pub dirty_flag: u8,
    pub id_value: [u8; 4],
    pub reserved: [u8; 5],
    pub boot_program: [u8; BOOT_PROGRAM_LEN],
}

impl BootSector {
    pub const LEN: usize = SECTOR_SIZE;

    /// Builds the canonical MSX 720 KB boot sector (spec.md §3's synthesis
    /// invariants). `id_value` is generated by the caller (the `rand`
    /// collaborator on `create`, or preserved verbatim on `put`/`rm`).
    pub fn create(id_value: [u8; 4], use_dos2_loader: bool) -> Self {
        BootSector {
            boot_jump: JMP_BOOT,
            oem_name: OEM_NAME,
            sector_size: 512,
            cluster_size: 2,
            fat_position: 1,
            fat_copy: 2,
            directory_entry: 112,
            number_of_sector: 1440,
            media_id: crate::bios::fat12::MEDIA_ID,
            fat_size: crate::bios::fat12::FAT_SECTORS as u16,
            sector_per_track: 9,
            disk_sides: 2,
            hidden_sector: 0,
            boot_jump2: JMP_BOOT2,
            id_label: ID_LABEL,
            dirty_flag: DIRTY_FLAG,
            id_value,
            reserved: [0; 5],
            boot_program: if use_dos2_loader {
                BOOT_PROGRAM_DOS2
            } else {
                BOOT_PROGRAM_DOS1
            },
        }
    }

    /// `idValue[0]` always has its low bit forced to 1 (spec.md §4.1).
    pub fn normalize_id_value(mut id_value: [u8; 4]) -> [u8; 4] {
        id_value[0] |= 0x01;
        id_value
    }

    /// True if any directory name+ext (space-padded 8.3, concatenated) names
    /// the MSX-DOS 2 system loader, per spec.md §4.1.
    pub fn wants_dos2_loader(entries: &[(String, String)]) -> bool {
        entries
            .iter()
            .any(|(name, ext)| format!("{name}{ext}") == MSXDOS2_SYS)
    }

    pub fn directory_position(&self) -> u16 {
        self.fat_position + self.fat_size * self.fat_copy as u16
    }

    /// Reserved post-directory area is kept at 5 sectors, not the
    /// theoretically-required 7 (spec.md §9 Open Question, preserved for
    /// compatibility with the source's synthesized layout).
    pub fn data_position(&self) -> u16 {
        self.directory_position() + 5
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::LEN {
            return Err(Error::InvalidBootSector);
        }
        let u16_at = |off: usize| u16::from_le_bytes([bytes[off], bytes[off + 1]]);
        let mut boot_jump = [0u8; 3];
        boot_jump.copy_from_slice(&bytes[0x00..0x03]);
        let mut oem_name = [0u8; 8];
        oem_name.copy_from_slice(&bytes[0x03..0x0B]);
        let mut boot_jump2 = [0u8; 2];
        boot_jump2.copy_from_slice(&bytes[0x1E..0x20]);
        let mut id_label = [0u8; 6];
        id_label.copy_from_slice(&bytes[0x20..0x26]);
        let mut id_value = [0u8; 4];
        id_value.copy_from_slice(&bytes[0x27..0x2B]);
        let mut reserved = [0u8; 5];
        reserved.copy_from_slice(&bytes[0x2B..0x30]);
        let mut boot_program = [0u8; BOOT_PROGRAM_LEN];
        boot_program.copy_from_slice(&bytes[0x30..0x30 + BOOT_PROGRAM_LEN]);

        let bs = BootSector {
            boot_jump,
            oem_name,
            sector_size: u16_at(0x0B),
            cluster_size: bytes[0x0D],
            fat_position: u16_at(0x0E),
            fat_copy: bytes[0x10],
            directory_entry: u16_at(0x11),
            number_of_sector: u16_at(0x13),
            media_id: bytes[0x15],
            fat_size: u16_at(0x16),
            sector_per_track: u16_at(0x18),
            disk_sides: u16_at(0x1A),
            hidden_sector: u16_at(0x1C),
            boot_jump2,
            id_label,
            dirty_flag: bytes[0x26],
            id_value,
            reserved,
            boot_program,
        };
        bs.verify()?;
        Ok(bs)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::LEN];
        out[0x00..0x03].copy_from_slice(&self.boot_jump);
        out[0x03..0x0B].copy_from_slice(&self.oem_name);
        out[0x0B..0x0D].copy_from_slice(&self.sector_size.to_le_bytes());
        out[0x0D] = self.cluster_size;
        out[0x0E..0x10].copy_from_slice(&self.fat_position.to_le_bytes());
        out[0x10] = self.fat_copy;
        out[0x11..0x13].copy_from_slice(&self.directory_entry.to_le_bytes());
        out[0x13..0x15].copy_from_slice(&self.number_of_sector.to_le_bytes());
        out[0x15] = self.media_id;
        out[0x16..0x18].copy_from_slice(&self.fat_size.to_le_bytes());
        out[0x18..0x1A].copy_from_slice(&self.sector_per_track.to_le_bytes());
        out[0x1A..0x1C].copy_from_slice(&self.disk_sides.to_le_bytes());
        out[0x1C..0x1E].copy_from_slice(&self.hidden_sector.to_le_bytes());
        out[0x1E..0x20].copy_from_slice(&self.boot_jump2);
        out[0x20..0x26].copy_from_slice(&self.id_label);
        out[0x26] = self.dirty_flag;
        out[0x27..0x2B].copy_from_slice(&self.id_value);
        out[0x2B..0x30].copy_from_slice(&self.reserved);
        out[0x30..0x30 + BOOT_PROGRAM_LEN].copy_from_slice(&self.boot_program);
        out
    }

    /// Sanity-checks the handful of fields this crate treats as invariant
    /// for the one disk geometry it supports (spec.md §3 synthesis
    /// invariants). Foreign-but-plausible boot sectors with a different
    /// `idValue`/loader still pass; only structurally wrong geometry fails.
    pub fn verify(&self) -> Result<(), Error> {
        if self.sector_size != 512
            || self.cluster_size != 2
            || self.directory_entry != 112
            || self.number_of_sector != 1440
            || self.fat_copy != 2
        {
            debug!("boot sector failed geometry sanity check");
            return Err(Error::InvalidBootSector);
        }
        Ok(())
    }
}

#[cfg(test)]
mod bpb_test {
    use super::*;

    #[test]
    fn round_trip() {
        let bs = BootSector::create([0x01, 0x02, 0x03, 0x04], false);
        let bytes = bs.to_bytes();
        assert_eq!(bytes.len(), BootSector::LEN);
        let back = BootSector::from_bytes(&bytes).unwrap();
        assert_eq!(bs, back);
    }

    #[test]
    fn synthesized_fields_match_spec() {
        let bs = BootSector::create([0, 0, 0, 0], false);
        let bytes = bs.to_bytes();
        assert_eq!(&bytes[0x00..0x03], &[0xEB, 0xFE, 0x90]);
        assert_eq!(&bytes[0x0B..0x0D], &[0x00, 0x02]);
        assert_eq!(bytes[0x15], 0xF9);
        assert_eq!(bs.directory_position(), 7);
        assert_eq!(bs.data_position(), 12);
    }

    #[test]
    fn id_value_low_bit_forced() {
        let id = BootSector::normalize_id_value([0x00, 0x00, 0x00, 0x00]);
        assert_eq!(id[0] & 1, 1);
    }
}
