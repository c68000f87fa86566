//! The `Disk` model: boot sector + both FAT copies + root directory + data
//! area, tied together into `info`/`ls`/`get`/`cat`/`put`/`rm`/`create`
//! (spec.md §4.1, §4.4-§4.6).
//!
//! Grounded structurally on `a2kit::fs::fat`'s top-level `Disk` (one struct
//! owning the whole image), collapsed from its `DiskFS`/`DiskImage` trait
//! split since this crate supports exactly one on-disk format (DESIGN.md's
//! Open Question resolution). The read engine's cluster-to-sector mapping
//! and the `put`/`rm` whole-image rebuild are grounded on
//! `original_source/src/dskmgr.cpp`'s `wr()` and the absence, there, of any
//! write path at all (write-side behavior is built from spec.md directly).

use chrono::NaiveDateTime;
use log::{debug, warn};

use crate::bios::bpb::BootSector;
use crate::bios::fat12;
use crate::fs::alloc;
use crate::fs::directory::{Directory, Entry};
use crate::fs::pack;
use crate::fs::{Config, Error};

pub const IMAGE_BYTES: usize = 1440 * 512;
const SECTOR_SIZE: usize = 512;

/// A staged file, used both to describe the contents a fresh image should
/// hold and as the in-memory form `put`/`rm` mutate before rebuilding
/// (spec.md §3's `CreateFileInfo`, §4.6).
#[derive(Clone, Debug)]
pub struct StagedFile {
    pub name: String,
    pub ext: String,
    pub timestamp: NaiveDateTime,
    pub payload: Vec<u8>,
}

/// A parsed (or freshly built) MSX 720 KB disk image.
pub struct Disk {
    pub boot: BootSector,
    pub directory: Directory,
    /// Continuation-only cluster chains, one per entry in
    /// `directory.files()` order, empty when the FAT was absent/corrupt.
    fat_chains: Vec<Vec<u16>>,
    raw: Vec<u8>,
}

fn sector_range(sector: usize, count: usize) -> std::ops::Range<usize> {
    sector * SECTOR_SIZE..(sector + count) * SECTOR_SIZE
}

/// Cluster 2 is the first data cluster and sits at `dataPosition` with no
/// offset (spec.md §3's 714-cluster budget is only exact under this
/// mapping; `original_source`'s own `wr()` uses an off-by-one `cluster - 1`
/// that its `ls()` debug output doesn't, so this crate follows the
/// numerically-consistent convention instead of the read path's literal
/// text — see DESIGN.md).
fn cluster_sector(data_position: u16, cluster_size: u8, cluster: u16) -> usize {
    data_position as usize + (cluster as usize - 2) * cluster_size as usize
}

impl Disk {
    /// Parses a raw 737,280-byte image into boot sector, directory, and
    /// (best-effort) FAT chains.
    pub fn from_bytes(raw: Vec<u8>, cfg: &Config) -> Result<Self, Error> {
        if raw.len() != IMAGE_BYTES {
            return Err(Error::SizeMismatch);
        }
        let boot = BootSector::from_bytes(&raw[sector_range(0, 1)]).map_err(|_| Error::SizeMismatch)?;
        let fat_bytes = &raw[sector_range(boot.fat_position as usize, boot.fat_size as usize)];
        let chains = fat12::decode_chains(fat_bytes);
        if chains.is_empty() {
            warn!("FAT copy 0 absent or corrupt, falling back to sequential read for file content");
        }
        let dir_start = boot.directory_position() as usize;
        let dir_bytes = &raw[sector_range(dir_start, 5)];
        let directory = Directory::from_bytes(dir_bytes, cfg);
        Ok(Disk { boot, directory, fat_chains: chains, raw })
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Builds a fresh image from scratch out of staged files (spec.md §4.1,
    /// §4.4, §4.6): wipes the grid, assigns clusters linearly, picks the
    /// MSX-DOS 1 or 2 loader, and writes boot sector, both FAT copies,
    /// directory, and file contents.
    pub fn create(files: &[StagedFile], id_value: [u8; 4]) -> Result<Self, Error> {
        let sizes: Vec<usize> = files.iter().map(|f| f.payload.len()).collect();
        let chains = alloc::assign(&sizes)?;

        let entry_pairs: Vec<(String, String)> =
            files.iter().map(|f| (f.name.clone(), f.ext.clone())).collect();
        let use_dos2 = BootSector::wants_dos2_loader(&entry_pairs);
        let boot = BootSector::create(BootSector::normalize_id_value(id_value), use_dos2);

        let mut directory = Directory::default();
        for (file, chain) in files.iter().zip(chains.iter()) {
            let display =
                if file.ext.is_empty() { file.name.clone() } else { format!("{}.{}", file.name, file.ext) };
            let (name, ext) = pack::string_to_file_name(&display)?;
            directory.entries.push(Entry::new(
                name,
                ext,
                0,
                file.timestamp,
                chain[0],
                file.payload.len() as u32,
            ));
        }

        let fat_len = boot.fat_size as usize * SECTOR_SIZE;
        let fat_bytes = fat12::encode_chains(&chains, fat_len);
        let continuation: Vec<Vec<u16>> = chains.iter().map(|c| c[1..].to_vec()).collect();

        let mut raw = vec![0u8; IMAGE_BYTES];
        raw[sector_range(0, 1)].copy_from_slice(&boot.to_bytes());
        for copy in 0..boot.fat_copy as usize {
            let start = boot.fat_position as usize + copy * boot.fat_size as usize;
            raw[sector_range(start, boot.fat_size as usize)].copy_from_slice(&fat_bytes);
        }
        let dir_bytes = directory.to_bytes();
        raw[sector_range(boot.directory_position() as usize, 5)].copy_from_slice(&dir_bytes);

        for (file, chain) in files.iter().zip(chains.iter()) {
            write_file_data(&mut raw, &boot, chain, &file.payload);
        }

        debug!("built fresh image with {} files, dos2 loader = {}", files.len(), use_dos2);
        Ok(Disk { boot, directory, fat_chains: continuation, raw })
    }

    /// Looks up a live file entry by display name and its index within
    /// `directory.files()` order, the index `read_file` needs to find the
    /// matching FAT chain.
    pub fn find_file(&self, display_name: &str) -> Option<(usize, &Entry)> {
        self.directory.files().enumerate().find(|(_, e)| e.display_name().eq_ignore_ascii_case(display_name))
    }

    /// The continuation-only cluster chain decoded for a file, if the FAT
    /// was present and well-formed when this image was parsed (`info`/`ls`
    /// use this for the per-file cluster summary, spec.md §6).
    pub fn chain_for(&self, index: usize) -> Option<&[u16]> {
        self.fat_chains.get(index).map(|c| c.as_slice())
    }

    /// The data-area sector holding a given cluster, per this crate's
    /// `(cluster - 2)` convention (see `cluster_sector` above).
    pub fn data_sector_of(&self, cluster: u16) -> usize {
        cluster_sector(self.boot.data_position(), self.boot.cluster_size, cluster)
    }

    /// Reconstructs one file's content (spec.md §4.5): walk the decoded FAT
    /// chain cluster by cluster, or fall back to sequential sectors from the
    /// first cluster when the FAT was absent/corrupt for this file.
    pub fn read_file(&self, index: usize, entry: &Entry) -> Vec<u8> {
        let cluster_size = self.boot.cluster_size;
        let data_position = self.boot.data_position();
        let mut out = Vec::with_capacity(entry.file_size as usize);

        if let Some(chain) = self.fat_chains.get(index) {
            let clusters: Vec<u16> = std::iter::once(entry.cluster1).chain(chain.iter().copied()).collect();
            'clusters: for &cluster in &clusters {
                let base = cluster_sector(data_position, cluster_size, cluster);
                for s in 0..cluster_size as usize {
                    let remaining = entry.file_size as usize - out.len();
                    if remaining == 0 {
                        break 'clusters;
                    }
                    let n = remaining.min(SECTOR_SIZE);
                    let range = sector_range(base + s, 1);
                    out.extend_from_slice(&self.raw[range.start..range.start + n]);
                }
            }
        } else {
            let mut sector = data_position as usize + (entry.cluster1 as usize - 2) * cluster_size as usize;
            while out.len() < entry.file_size as usize && sector < self.boot.number_of_sector as usize {
                let remaining = entry.file_size as usize - out.len();
                let n = remaining.min(SECTOR_SIZE);
                let range = sector_range(sector, 1);
                out.extend_from_slice(&self.raw[range.start..range.start + n]);
                sector += 1;
            }
        }
        out
    }

    /// Decodes every live entry into a staged-file list, for `put`/`rm`'s
    /// decode-mutate-reencode rebuild (spec.md §4.6).
    pub fn to_staged_files(&self) -> Vec<StagedFile> {
        self.directory
            .files()
            .enumerate()
            .map(|(i, e)| StagedFile {
                name: String::from_utf8_lossy(&e.name).trim_end().to_string(),
                ext: String::from_utf8_lossy(&e.ext).trim_end().to_string(),
                timestamp: e.timestamp(),
                payload: self.read_file(i, e),
            })
            .collect()
    }
}

fn write_file_data(raw: &mut [u8], boot: &BootSector, chain: &[u16], payload: &[u8]) {
    let mut written = 0usize;
    'clusters: for &cluster in chain {
        let base = cluster_sector(boot.data_position(), boot.cluster_size, cluster);
        for s in 0..boot.cluster_size as usize {
            if written >= payload.len() {
                break 'clusters;
            }
            let n = (payload.len() - written).min(SECTOR_SIZE);
            let range = sector_range(base + s, 1);
            raw[range.start..range.start + n].copy_from_slice(&payload[written..written + n]);
            written += n;
        }
    }
}

#[cfg(test)]
mod image_test {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn create_then_read_round_trips_small_file() {
        let files = vec![StagedFile {
            name: "HELLO".into(),
            ext: "TXT".into(),
            timestamp: stamp(),
            payload: b"hello msx".to_vec(),
        }];
        let disk = Disk::create(&files, [0, 0, 0, 0]).unwrap();
        assert_eq!(disk.to_bytes().len(), IMAGE_BYTES);
        let (index, entry) = disk.find_file("HELLO.TXT").unwrap();
        assert_eq!(disk.read_file(index, entry), b"hello msx");
    }

    #[test]
    fn create_then_read_round_trips_multi_cluster_file() {
        let payload = vec![0xABu8; 1024 * 3 + 17];
        let files = vec![StagedFile { name: "BIG".into(), ext: "DAT".into(), timestamp: stamp(), payload: payload.clone() }];
        let disk = Disk::create(&files, [0, 0, 0, 0]).unwrap();
        let (index, entry) = disk.find_file("BIG.DAT").unwrap();
        assert_eq!(disk.read_file(index, entry), payload);
    }

    #[test]
    fn reparsed_image_matches_original() {
        let files = vec![StagedFile { name: "A".into(), ext: "B".into(), timestamp: stamp(), payload: vec![1, 2, 3] }];
        let disk = Disk::create(&files, [9, 9, 9, 9]).unwrap();
        let bytes = disk.to_bytes().to_vec();
        let reparsed = Disk::from_bytes(bytes, &Config::default()).unwrap();
        let (index, entry) = reparsed.find_file("A.B").unwrap();
        assert_eq!(reparsed.read_file(index, entry), vec![1, 2, 3]);
    }
}
