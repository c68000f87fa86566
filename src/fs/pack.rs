//! Name / date / time packing helpers for 32-byte directory entries.
//!
//! Grounded on `a2kit::fs::fat::pack` (`string_to_file_name`,
//! `file_name_to_string`, `pack_date`/`unpack_date`, `pack_time`/
//! `unpack_time`); the display-name rule is grounded on
//! `original_source/src/dskmgr.cpp`'s directory-parsing loop, matching
//! spec.md §4.3's condition literally rather than reproducing the source's
//! extension-copy bug (see DESIGN.md).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::fs::Error;

/// Splits a display name like `HELLO.TXT` into space-padded, uppercase
/// 8.3 `name`/`ext` fields. Rejects names or extensions that don't fit.
pub fn string_to_file_name(display: &str) -> Result<([u8; 8], [u8; 3]), Error> {
    let upper = display.to_ascii_uppercase();
    let (stem, ext) = match upper.rsplit_once('.') {
        Some((s, e)) => (s, e),
        None => (upper.as_str(), ""),
    };
    if stem.is_empty() || stem.len() > 8 || ext.len() > 3 || !stem.is_ascii() || !ext.is_ascii() {
        return Err(Error::InvalidName);
    }
    let mut name = [b' '; 8];
    name[..stem.len()].copy_from_slice(stem.as_bytes());
    let mut ext_bytes = [b' '; 3];
    ext_bytes[..ext.len()].copy_from_slice(ext.as_bytes());
    Ok((name, ext_bytes))
}

/// Builds the human-readable display name from raw 8.3 fields: right-strip
/// spaces from `name`, then append `"." + ext` when `ext[0] != 0` and
/// `ext[1] != ' '` (spec.md §4.3, taken literally).
pub fn file_name_to_string(name: &[u8; 8], ext: &[u8; 3]) -> String {
    let mut stem = String::from_utf8_lossy(name).to_string();
    while stem.ends_with(' ') {
        stem.pop();
    }
    if ext[0] != 0 && ext[1] != b' ' {
        let mut ext_str = String::from_utf8_lossy(ext).to_string();
        while ext_str.ends_with(' ') {
            ext_str.pop();
        }
        stem.push('.');
        stem.push_str(&ext_str);
    }
    stem
}

/// Packs a date into the directory entry's 2-byte field: bits 15-9 are
/// `year - 1980`, bits 8-5 the month, bits 4-0 the day.
pub fn pack_date(date: NaiveDate) -> u16 {
    use chrono::Datelike;
    let year_offset = (date.year() - 1980).max(0) as u16;
    ((year_offset & 0x7F) << 9) | (((date.month() as u16) & 0x0F) << 5) | (date.day() as u16 & 0x1F)
}

pub fn unpack_date(bits: u16) -> NaiveDate {
    let year = 1980 + ((bits >> 9) & 0x7F) as i32;
    let month = ((bits >> 5) & 0x0F).max(1) as u32;
    let day = (bits & 0x1F).max(1) as u32;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
}

/// Packs a time into the directory entry's 2-byte field: bits 15-11 hour,
/// 10-5 minute, 4-0 second/2 (2-second resolution).
pub fn pack_time(time: NaiveTime) -> u16 {
    use chrono::Timelike;
    ((time.hour() as u16 & 0x1F) << 11) | ((time.minute() as u16 & 0x3F) << 5) | ((time.second() as u16 / 2) & 0x1F)
}

pub fn unpack_time(bits: u16) -> NaiveTime {
    let hour = ((bits >> 11) & 0x1F) as u32;
    let minute = ((bits >> 5) & 0x3F) as u32;
    let second = (bits & 0x1F) as u32 * 2;
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
}

pub fn pack_datetime(dt: NaiveDateTime) -> (u16, u16) {
    (pack_date(dt.date()), pack_time(dt.time()))
}

pub fn unpack_datetime(date_bits: u16, time_bits: u16) -> NaiveDateTime {
    NaiveDateTime::new(unpack_date(date_bits), unpack_time(time_bits))
}

#[cfg(test)]
mod pack_test {
    use super::*;

    #[test]
    fn file_name_round_trip() {
        let (name, ext) = string_to_file_name("HELLO.TXT").unwrap();
        assert_eq!(&name, b"HELLO   ");
        assert_eq!(&ext, b"TXT");
        assert_eq!(file_name_to_string(&name, &ext), "HELLO.TXT");
    }

    #[test]
    fn no_extension() {
        let (name, ext) = string_to_file_name("README").unwrap();
        assert_eq!(file_name_to_string(&name, &ext), "README");
    }

    #[test]
    fn rejects_oversize_stem() {
        assert!(string_to_file_name("TOOLONGNAME.TXT").is_err());
    }

    #[test]
    fn date_time_round_trip() {
        use chrono::Timelike;
        let d = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let t = NaiveTime::from_hms_opt(13, 45, 30).unwrap();
        assert_eq!(unpack_date(pack_date(d)), d);
        let back = unpack_time(pack_time(t));
        assert_eq!(back.hour(), 13);
        assert_eq!(back.minute(), 45);
        assert_eq!(back.second(), 30);
    }
}
