//! `get` / `cp`: extract one file from the image to the local filesystem.
//!
//! Grounded on `original_source/src/dskmgr.cpp::cp`; the `as FILE2` rename
//! clause is an addition this crate supports alongside it (spec.md §6).

use crate::commands::{parse_file_as, CommandError};

pub fn run(image_path: &str, args: &[String]) -> Result<(), CommandError> {
    let (name, rename) = parse_file_as(args)?;
    let disk = crate::open_image(image_path)?;
    let (index, entry) = disk.find_file(name).ok_or(crate::fs::Error::FileNotFound)?;
    let bytes = disk.read_file(index, entry);
    let local_name = rename.unwrap_or(name);
    std::fs::write(local_name, bytes).map_err(CommandError::ImageWrite)?;
    Ok(())
}
