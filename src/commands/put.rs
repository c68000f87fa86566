//! `put` / `wt`: insert or replace one file, tokenizing `.BAS` sources
//! before storing (spec.md §6, §4.6).

use chrono::Local;

use crate::commands::{parse_file_as, rebuild, split_display_name, CommandError};
use crate::fs::image::StagedFile;

pub fn run(image_path: &str, args: &[String]) -> Result<(), CommandError> {
    let (local_path, rename) = parse_file_as(args)?;
    let display_name = rename.unwrap_or_else(|| {
        std::path::Path::new(local_path).file_name().and_then(|s| s.to_str()).unwrap_or(local_path)
    });
    let (name, ext) = split_display_name(display_name);

    let raw = std::fs::read(local_path).map_err(CommandError::ImageRead)?;
    let payload = if ext.eq_ignore_ascii_case("BAS") {
        let src = String::from_utf8(raw)
            .map_err(|_| CommandError::Usage("BAS source is not valid UTF-8".to_string()))?;
        crate::basic::tokenizer::tokenize(&src)?
    } else {
        raw
    };

    let disk = crate::open_image(image_path)?;
    let mut files = disk.to_staged_files();
    files.retain(|f| !(f.name.eq_ignore_ascii_case(&name) && f.ext.eq_ignore_ascii_case(&ext)));
    files.push(StagedFile { name, ext, timestamp: Local::now().naive_local(), payload });

    let new_disk = rebuild(&disk, files)?;
    crate::save_image(image_path, &new_disk)
}
