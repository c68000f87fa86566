//! `cat`: stream file contents to stdout, detokenizing `.BAS` files first
//! (spec.md §6).

use std::io::Write;

use crate::commands::{split_display_name, CommandError};

pub fn run(image_path: &str, name: &str) -> Result<(), CommandError> {
    let disk = crate::open_image(image_path)?;
    let (index, entry) = disk.find_file(name).ok_or(crate::fs::Error::FileNotFound)?;
    let bytes = disk.read_file(index, entry);
    let (_, ext) = split_display_name(name);

    if ext.eq_ignore_ascii_case("BAS") {
        let text = crate::basic::detokenizer::detokenize(&bytes)?;
        print!("{}", text);
    } else {
        std::io::stdout().write_all(&bytes).map_err(CommandError::ImageWrite)?;
    }
    Ok(())
}
