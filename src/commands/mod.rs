//! # CLI Subcommands
//!
//! One module per subcommand, each a thin adapter from `clap::ArgMatches`
//! onto the `fs`/`basic` APIs.

pub mod cat;
pub mod completions;
pub mod create;
pub mod get;
pub mod info;
pub mod ls;
pub mod put;
pub mod rm;

use crate::fs::image::{Disk, StagedFile};

/// Errors surfaced at the command layer, each carrying the exit code
/// spec.md §6 assigns it.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error("could not read input: {0}")]
    ImageRead(std::io::Error),
    #[error("could not write output: {0}")]
    ImageWrite(std::io::Error),
    #[error(transparent)]
    Fs(#[from] crate::fs::Error),
    #[error(transparent)]
    Basic(#[from] crate::basic::Error),
    #[error("this host is big-endian; rebuild for a little-endian target")]
    UnsupportedEndian,
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Usage(_) => 1,
            CommandError::ImageRead(_) => 2,
            CommandError::Fs(crate::fs::Error::SizeMismatch) => 2,
            CommandError::Fs(crate::fs::Error::FileNotFound) => 4,
            CommandError::Fs(crate::fs::Error::InvalidName) => 4,
            CommandError::Fs(crate::fs::Error::DiskFull) => 5,
            CommandError::ImageWrite(_) => 6,
            CommandError::Basic(_) => 1,
            CommandError::UnsupportedEndian => 255,
        }
    }
}

/// Splits the `FILE [as FILE2]` argument group `get`/`put` share: one to
/// three tokens, the middle one (if present) must be the literal `as`.
pub fn parse_file_as(values: &[String]) -> Result<(&str, Option<&str>), CommandError> {
    match values {
        [file] => Ok((file, None)),
        [file, kw, file2] if kw == "as" => Ok((file, Some(file2))),
        _ => Err(CommandError::Usage("expected `FILE` or `FILE as FILE2`".to_string())),
    }
}

/// Splits a display name like `HELLO.TXT` into the `(name, ext)` pair
/// `StagedFile` carries, for `put`'s add-or-replace path.
pub fn split_display_name(display: &str) -> (String, String) {
    match display.rsplit_once('.') {
        Some((name, ext)) => (name.to_string(), ext.to_string()),
        None => (display.to_string(), String::new()),
    }
}

/// Rebuilds a `Disk` from its current staged files plus a mutation
/// (replace-or-insert for `put`, drop for `rm`), matching spec.md §4.6's
/// decode-mutate-reencode cycle for any whole-image rewrite.
pub fn rebuild(disk: &Disk, files: Vec<StagedFile>) -> Result<Disk, CommandError> {
    Ok(Disk::create(&files, disk.boot.id_value)?)
}
