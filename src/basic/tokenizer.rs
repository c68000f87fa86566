//! MSX-BASIC source text -> tokenized byte stream (spec.md §4.8, §4.9).
//!
//! `original_source` only ever reads tokenized programs (there is no
//! tokenizer in the C++ source at all), so this direction is built straight
//! from spec.md, mirroring the envelope and opcode choices the detokenizer
//! already uses from the source.

use crate::basic::{bcd, keywords, Error, HEADER_BYTE, MEMORY_ORIGIN};

const CODE_REM: u32 = 0x3A8F;
const CODE_GOTO: u32 = 0x89;
const CODE_GOSUB: u32 = 0x8D;

/// Tokenizes LF-separated MSX-BASIC source into the byte-stream envelope of
/// spec.md §3. Each line's `nextLinePtr` is backpatched once the following
/// line's start offset (or, for the last line, the trailing terminator's
/// offset) is known.
pub fn tokenize(src: &str) -> Result<Vec<u8>, Error> {
    let mut out = vec![HEADER_BYTE];
    let mut pending_ptr_offset: Option<usize> = None;

    for raw_line in src.split('\n') {
        let line = raw_line.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        if let Some(ptr_offset) = pending_ptr_offset {
            backpatch(&mut out, ptr_offset, out.len());
        }
        let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(Error::InvalidLineNumber);
        }
        let line_num: u32 = digits.parse().map_err(|_| Error::InvalidLineNumber)?;
        if line_num == 0 || line_num > 65535 {
            return Err(Error::InvalidLineNumber);
        }
        let rest = line[digits.len()..].trim_start();

        pending_ptr_offset = Some(out.len());
        out.extend([0u8, 0]); // placeholder nextLinePtr
        out.extend((line_num as u16).to_le_bytes());
        encode_body(rest, &mut out)?;
        out.push(0x00);
    }

    if let Some(ptr_offset) = pending_ptr_offset {
        backpatch(&mut out, ptr_offset, out.len());
    }
    out.extend([0u8, 0]);
    Ok(out)
}

fn backpatch(out: &mut [u8], ptr_offset: usize, target_index: usize) {
    let addr = (MEMORY_ORIGIN as usize + target_index) as u16;
    out[ptr_offset..ptr_offset + 2].copy_from_slice(&addr.to_le_bytes());
}

fn encode_body(body: &str, out: &mut Vec<u8>) -> Result<(), Error> {
    let bytes = body.as_bytes();
    let mut i = 0usize;
    let mut in_string = false;
    let mut last_code: Option<u32> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            out.push(b);
            i += 1;
            if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if b == b'"' {
            in_string = true;
            out.push(b);
            i += 1;
            continue;
        }
        if b == b'&' && matches!(bytes.get(i + 1), Some(b'O') | Some(b'o')) {
            let (value, len) = parse_radix(&bytes[i + 2..], 8);
            out.push(0x0B);
            out.extend((value as u16).to_le_bytes());
            i += 2 + len;
            last_code = None;
            continue;
        }
        if b == b'&' && matches!(bytes.get(i + 1), Some(b'H') | Some(b'h')) {
            let (value, len) = parse_radix(&bytes[i + 2..], 16);
            out.push(0x0C);
            out.extend((value as u16).to_le_bytes());
            i += 2 + len;
            last_code = None;
            continue;
        }
        if b == b'&' && matches!(bytes.get(i + 1), Some(b'B') | Some(b'b')) {
            out.push(b'&');
            out.push(bytes[i + 1]);
            i += 2;
            let start = i;
            while bytes.get(i).is_some_and(|c| *c == b'0' || *c == b'1') {
                i += 1;
            }
            out.extend_from_slice(&bytes[start..i]);
            last_code = None;
            continue;
        }
        if let Some((kw, word_len)) = keywords::longest_match(&body[i..]) {
            emit_keyword_code(kw.code, out);
            i += word_len;
            if kw.code == CODE_REM {
                out.extend_from_slice(&bytes[i..]);
                i = bytes.len();
            } else if kw.code == CODE_GOTO || kw.code == CODE_GOSUB {
                while bytes.get(i) == Some(&b' ') {
                    i += 1;
                }
                out.push(b' ');
                let start = i;
                while bytes.get(i).is_some_and(|c| c.is_ascii_digit()) {
                    i += 1;
                }
                let line_num: u16 = std::str::from_utf8(&bytes[start..i])
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(Error::InvalidLineNumber)?;
                out.push(0x0E);
                out.extend(line_num.to_le_bytes());
            }
            last_code = Some(kw.code);
            continue;
        }
        if b.is_ascii_digit() || (b == b'.' && bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit())) {
            let start = i;
            let mut has_dot = false;
            while i < bytes.len() {
                let c = bytes[i];
                if c.is_ascii_digit() {
                    i += 1;
                } else if c == b'.' && !has_dot {
                    has_dot = true;
                    i += 1;
                } else {
                    break;
                }
            }
            let suffix = bytes.get(i).copied();
            let is_double = suffix == Some(b'#');
            let is_single_suffix = suffix == Some(b'!');
            if is_double || is_single_suffix {
                i += 1;
            }
            let literal = std::str::from_utf8(&bytes[start..i - (is_double as usize + is_single_suffix as usize)])
                .map_err(|_| Error::InvalidLineNumber)?;
            let forces_real = has_dot || is_double || is_single_suffix || last_code.is_some_and(|c| c >= 0x80);
            if forces_real {
                let width = if is_double { bcd::DOUBLE_DIGITS } else { bcd::SINGLE_DIGITS };
                let value = bcd::from_str(literal, width).map_err(|_| Error::InvalidLineNumber)?;
                if is_double {
                    out.push(0x1F);
                    out.extend(bcd::encode_double(&value).map_err(|_| Error::InvalidLineNumber)?);
                } else {
                    out.push(0x1D);
                    out.extend(bcd::encode_single(&value).map_err(|_| Error::InvalidLineNumber)?);
                }
            } else {
                let n: u32 = literal.parse().map_err(|_| Error::InvalidLineNumber)?;
                if n < 10 {
                    out.push(0x11 + n as u8);
                } else if n < 256 {
                    out.push(0x0F);
                    out.push(n as u8);
                } else {
                    out.push(0x1C);
                    out.extend((n as u16).to_le_bytes());
                }
            }
            last_code = None;
            continue;
        }
        out.push(b);
        i += 1;
        last_code = None;
    }
    Ok(())
}

fn emit_keyword_code(code: u32, out: &mut Vec<u8>) {
    match code {
        c if c == 0x3A8F || c == 0x3AA1 => {
            out.push(0x3A);
            out.push((c & 0xFF) as u8);
        }
        c if c < 0x100 => out.push(c as u8),
        c if c <= 0xFFFF => {
            out.push(((c >> 8) & 0xFF) as u8);
            out.push((c & 0xFF) as u8);
        }
        c => {
            out.push(((c >> 16) & 0xFF) as u8);
            out.push(((c >> 8) & 0xFF) as u8);
            out.push((c & 0xFF) as u8);
        }
    }
}

fn parse_radix(bytes: &[u8], radix: u32) -> (u32, usize) {
    let mut value = 0u32;
    let mut len = 0usize;
    for &b in bytes {
        match (b as char).to_digit(radix) {
            Some(d) => {
                value = value.wrapping_mul(radix).wrapping_add(d);
                len += 1;
            }
            None => break,
        }
    }
    (value, len)
}

#[cfg(test)]
mod tokenizer_test {
    use super::*;
    use crate::basic::detokenizer::detokenize;

    #[test]
    fn goto_operand_uses_line_number_opcode() {
        let program = tokenize("10 GOTO 20").unwrap();
        assert!(program.windows(3).any(|w| w == [0x0E, 20, 0]));
    }

    #[test]
    fn rejects_out_of_range_line_number() {
        assert!(matches!(tokenize("99999 PRINT 1"), Err(Error::InvalidLineNumber)));
    }

    #[test]
    fn small_integer_round_trips_through_detokenizer() {
        let program = tokenize("10 PRINT 7").unwrap();
        let text = detokenize(&program).unwrap();
        assert_eq!(text, "10 PRINT 7\n");
    }

    #[test]
    fn string_literal_copied_verbatim() {
        let program = tokenize("10 PRINT \"HI\"").unwrap();
        let text = detokenize(&program).unwrap();
        assert_eq!(text, "10 PRINT \"HI\"\n");
    }

    #[test]
    fn ampersand_b_literal_left_untokenized() {
        let program = tokenize("10 A=&B101").unwrap();
        let text = detokenize(&program).unwrap();
        assert_eq!(text, "10 A=&B101\n");
    }

    #[test]
    fn rem_comment_containing_keyword_word_is_copied_verbatim() {
        let program = tokenize("10 REM GOTO HERE").unwrap();
        let text = detokenize(&program).unwrap();
        assert_eq!(text, "10 REM GOTO HERE\n");
    }
}
