//! `create`: build a fresh image from a list of local files in order
//! (spec.md §6, §4.1, §4.4). Tokenizes `.BAS` sources the same way `put`
//! does, so a freshly created image round-trips through `cat` immediately.

use chrono::Local;

use crate::commands::{split_display_name, CommandError};
use crate::fs::image::{Disk, StagedFile};

pub fn run(image_path: &str, local_paths: &[String]) -> Result<(), CommandError> {
    let mut files = Vec::with_capacity(local_paths.len());
    for path in local_paths {
        let display_name = std::path::Path::new(path)
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CommandError::Usage(format!("not a valid file name: {path}")))?;
        let (name, ext) = split_display_name(display_name);
        let raw = std::fs::read(path).map_err(CommandError::ImageRead)?;
        let payload = if ext.eq_ignore_ascii_case("BAS") {
            let src = String::from_utf8(raw)
                .map_err(|_| CommandError::Usage(format!("{path} is not valid UTF-8")))?;
            crate::basic::tokenizer::tokenize(&src)?
        } else {
            raw
        };
        files.push(StagedFile { name, ext, timestamp: Local::now().naive_local(), payload });
    }

    let id_value: [u8; 4] = rand::random();
    let disk = Disk::create(&files, id_value)?;
    crate::save_image(image_path, &disk)
}
