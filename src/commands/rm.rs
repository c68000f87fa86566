//! `rm` / `del` / `delete`: remove one file and rewrite the image
//! (spec.md §6, §4.6).

use crate::commands::{rebuild, CommandError};

pub fn run(image_path: &str, name: &str) -> Result<(), CommandError> {
    let disk = crate::open_image(image_path)?;
    disk.find_file(name).ok_or(crate::fs::Error::FileNotFound)?;

    let mut files = disk.to_staged_files();
    files.retain(|f| {
        let display = if f.ext.is_empty() { f.name.clone() } else { format!("{}.{}", f.name, f.ext) };
        !display.eq_ignore_ascii_case(name)
    });

    let new_disk = rebuild(&disk, files)?;
    crate::save_image(image_path, &new_disk)
}
