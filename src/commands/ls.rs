//! `ls` / `dir`: directory listing with attribute chars, size, timestamp,
//! first cluster, and first data sector (spec.md §6).
//!
//! Grounded on `original_source/src/dskmgr.cpp::ls`'s column layout.

use chrono::{Datelike, Timelike};

use crate::commands::CommandError;

pub fn run(image_path: &str) -> Result<(), CommandError> {
    let disk = crate::open_image(image_path)?;
    for entry in disk.directory.files() {
        let ts = entry.timestamp();
        println!(
            "{}  {:<12}  {:>8} bytes  {:04}.{:02}.{:02} {:02}:{:02}:{:02}  (C:{}, S:{})",
            entry.attr_chars(),
            entry.display_name(),
            entry.file_size,
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
            entry.cluster1,
            disk.data_sector_of(entry.cluster1),
        );
    }
    Ok(())
}
