//! `info`: boot-sector fields and a per-file cluster summary.
//!
//! Grounded on `original_source/src/dskmgr.cpp::info`'s field list and the
//! FAT-entry-to-filename cross reference it prints below it.

use crate::commands::CommandError;

pub fn run(image_path: &str) -> Result<(), CommandError> {
    let disk = crate::open_image(image_path)?;
    let boot = &disk.boot;

    println!("[Boot Sector]");
    println!("            OEM: {}", String::from_utf8_lossy(&boot.oem_name));
    println!("       Media ID: {:#04X}", boot.media_id);
    println!("    Sector Size: {} bytes", boot.sector_size);
    println!("  Total Sectors: {}", boot.number_of_sector);
    println!("   Cluster Size: {} bytes ({} sectors)", boot.cluster_size as u16 * boot.sector_size, boot.cluster_size);
    println!("   FAT Position: {}", boot.fat_position);
    println!("       FAT Size: {} bytes ({} sectors)", boot.fat_size * boot.sector_size, boot.fat_size);
    println!("       FAT Copy: {}", boot.fat_copy);
    println!("Creatable Files: {}", boot.directory_entry);
    println!("        Sectors: {} per track", boot.sector_per_track);
    println!("     Disk Sides: {}", boot.disk_sides);
    println!(" Hidden Sectors: {}", boot.hidden_sector);
    println!("  Directory Pos: {}", boot.directory_position());
    println!("       Data Pos: {}", boot.data_position());

    println!("\n[Files]");
    let mut shown = 0usize;
    for (i, entry) in disk.directory.files().enumerate() {
        let clusters = entry.file_size as usize / (boot.cluster_size as usize * boot.sector_size) + 1;
        let chain = disk.chain_for(i);
        match chain {
            Some(tail) => {
                println!(
                    "- {} = {} bytes ({} cluster) ... {}: {:?}",
                    entry.display_name(),
                    entry.file_size,
                    clusters,
                    entry.cluster1,
                    tail
                );
            }
            None => {
                println!(
                    "- {} = {} bytes ({} cluster) ... {}: ??? (no FAT, sequential read fallback)",
                    entry.display_name(),
                    entry.file_size,
                    clusters,
                    entry.cluster1
                );
            }
        }
        shown += 1;
    }
    println!("Available Entries: {}/{}", shown, crate::fs::directory::MAX_ENTRIES);
    Ok(())
}
