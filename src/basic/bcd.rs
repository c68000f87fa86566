//! MSX BCD (binary-coded decimal) floating point: the wire format `0x1D`
//! (single, 4 bytes) and `0x1F` (double, 8 bytes) operands decode to and
//! encode from (spec.md §4.7). Built directly from spec.md's bit layout;
//! `original_source` only ever reads these values for display (never writes
//! them), so there is no tokenizer-direction source to ground against.
//!
//! Values are carried as a normalized decimal-digit string plus an exponent
//! rather than as `f64`, so round trips through `to_string`/`from_str` stay
//! exact instead of picking up binary-float rounding.

pub const SINGLE_MANTISSA_BYTES: usize = 3;
pub const SINGLE_DIGITS: usize = 6;
pub const DOUBLE_MANTISSA_BYTES: usize = 7;
pub const DOUBLE_DIGITS: usize = 14;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("magnitude out of representable BCD exponent range")]
    ExponentOverflow,
    #[error("not a decimal number")]
    NotANumber,
}

/// Decoded BCD value: `0.{digits} * 10^exponent`, or exactly zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bcd {
    pub digits: Vec<u8>,
    pub exponent: i32,
    pub zero: bool,
}

fn digits_from_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(b >> 4);
        out.push(b & 0x0F);
    }
    out
}

fn bytes_from_digits(digits: &[u8]) -> Vec<u8> {
    digits.chunks(2).map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0)).collect()
}

fn exponent_from_byte(exp: u8) -> i32 {
    if exp & 0x40 != 0 {
        (exp & 0x3F) as i32
    } else {
        -((((exp & 0x3F) ^ 0x3F) as i32) + 1)
    }
}

fn byte_from_exponent(e: i32) -> Result<u8, Error> {
    if e >= 0 {
        if e > 0x3F {
            return Err(Error::ExponentOverflow);
        }
        Ok(0x40 | (e as u8))
    } else {
        let e_dec = -e;
        if !(1..=64).contains(&e_dec) {
            return Err(Error::ExponentOverflow);
        }
        Ok(((e_dec - 1) as u8) ^ 0x3F)
    }
}

fn decode(exp_byte: u8, mantissa: &[u8]) -> Bcd {
    if exp_byte == 0 {
        return Bcd { digits: vec![0; mantissa.len() * 2], exponent: 0, zero: true };
    }
    Bcd { digits: digits_from_bytes(mantissa), exponent: exponent_from_byte(exp_byte), zero: false }
}

pub fn decode_single(bytes: &[u8; 4]) -> Bcd {
    decode(bytes[0], &bytes[1..4])
}

pub fn decode_double(bytes: &[u8; 8]) -> Bcd {
    decode(bytes[0], &bytes[1..8])
}

fn encode(digits: &[u8], exponent: i32, zero: bool, width_bytes: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(width_bytes);
    if zero {
        out.push(0);
        out.resize(width_bytes, 0);
        return Ok(out);
    }
    out.push(byte_from_exponent(exponent)?);
    out.extend(bytes_from_digits(digits));
    Ok(out)
}

pub fn encode_single(bcd: &Bcd) -> Result<[u8; 4], Error> {
    let bytes = encode(&bcd.digits, bcd.exponent, bcd.zero, 4)?;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

pub fn encode_double(bcd: &Bcd) -> Result<[u8; 8], Error> {
    let bytes = encode(&bcd.digits, bcd.exponent, bcd.zero, 8)?;
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Fixed-point text for a decoded BCD value (spec.md §4.7: no scientific
/// notation, leading zeros of the integer part stripped, a wholly-zero
/// fractional part (and its point) dropped, but trailing zeros an exponent
/// past the mantissa width implies are kept).
pub fn to_string(bcd: &Bcd) -> String {
    if bcd.zero {
        return "0".to_string();
    }
    let digit_chars: String = bcd.digits.iter().map(|d| (b'0' + d) as char).collect();
    let e = bcd.exponent;
    let (int_part, frac_part) = if e <= 0 {
        ("0".to_string(), "0".repeat((-e) as usize) + &digit_chars)
    } else if (e as usize) <= digit_chars.len() {
        (digit_chars[..e as usize].to_string(), digit_chars[e as usize..].to_string())
    } else {
        (digit_chars.clone() + &"0".repeat(e as usize - digit_chars.len()), String::new())
    };
    let int_trimmed = int_part.trim_start_matches('0');
    let int_final = if int_trimmed.is_empty() { "0" } else { int_trimmed };
    let frac_trimmed = frac_part.trim_end_matches('0');
    if frac_trimmed.is_empty() {
        int_final.to_string()
    } else {
        format!("{}.{}", int_final, frac_trimmed)
    }
}

/// Parses a plain decimal string (e.g. `"3.14"`, `"0"`, `"120000"`) into a
/// normalized BCD value with exactly `width` significant digits, padding
/// with trailing zeros or truncating low-order digits as needed. Signs are
/// not supported: MSX BCD's sign bit is carried in the exponent byte but
/// spec.md §4.7 marks it "ignored here", so this crate only round-trips
/// non-negative literals.
pub fn from_str(s: &str, width: usize) -> Result<Bcd, Error> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(Error::NotANumber);
    }
    let (int_str, frac_str) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let mut full: Vec<u8> = int_str.bytes().chain(frac_str.bytes()).map(|b| b - b'0').collect();
    if full.is_empty() {
        return Err(Error::NotANumber);
    }
    let mut point_pos = int_str.len() as i32;
    let leading_zeros = full.iter().take_while(|&&d| d == 0).count();
    if leading_zeros == full.len() {
        return Ok(Bcd { digits: vec![0; width], exponent: 0, zero: true });
    }
    full.drain(0..leading_zeros);
    point_pos -= leading_zeros as i32;
    full.resize(width, 0);
    Ok(Bcd { digits: full, exponent: point_pos, zero: false })
}

#[cfg(test)]
mod bcd_test {
    use super::*;

    #[test]
    fn zero_round_trips() {
        let bytes = [0x00u8, 0x00, 0x00, 0x00];
        let decoded = decode(bytes[0], &bytes[1..4]);
        assert_eq!(to_string(&decoded), "0");
    }

    #[test]
    fn simple_integer_round_trip() {
        let bcd = from_str("123", SINGLE_DIGITS).unwrap();
        let bytes = encode_single(&bcd).unwrap();
        let decoded = decode_single(&bytes);
        assert_eq!(to_string(&decoded), "123");
    }

    #[test]
    fn fraction_round_trip() {
        let bcd = from_str("3.14", SINGLE_DIGITS).unwrap();
        let bytes = encode_single(&bcd).unwrap();
        let decoded = decode_single(&bytes);
        assert_eq!(to_string(&decoded), "3.14");
    }

    #[test]
    fn small_fraction_round_trip() {
        let bcd = from_str("0.0025", DOUBLE_DIGITS).unwrap();
        let bytes = encode_double(&bcd).unwrap();
        let decoded = decode_double(&bytes);
        assert_eq!(to_string(&decoded), "0.0025");
    }

    #[test]
    fn large_integer_keeps_trailing_zeros() {
        let bcd = from_str("1200", SINGLE_DIGITS).unwrap();
        let bytes = encode_single(&bcd).unwrap();
        let decoded = decode_single(&bytes);
        assert_eq!(to_string(&decoded), "1200");
    }
}
