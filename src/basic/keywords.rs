//! Shared word<->code keyword table (spec.md §4.8, §9).
//!
//! Grounded on `original_source/src/basic.hpp`'s `stbl` table: same words,
//! same codes. Codes fall into the four size classes spec.md §9 describes;
//! [`Keyword::byte_len`] reports how many bytes the opcode actually occupies
//! on the wire (1 for single-byte codes and the two `0x3A`-prefixed two-byte
//! specials `REM`/`ELSE`, 2 for `0xFFxx` codes, 3 for the `0x3A8FE6` comment
//! apostrophe, which has no entry here since it is not a keyword).

/// One keyword: its source-text spelling and its tokenized opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub word: &'static str,
    pub code: u32,
}

impl Keyword {
    /// Number of bytes this code occupies when written to the token stream.
    pub fn byte_len(&self) -> usize {
        match self.code {
            0x3A8F | 0x3AA1 => 2,
            c if c < 0x100 => 1,
            c if c <= 0xFFFF => 2,
            _ => 3,
        }
    }
}

pub static KEYWORDS: &[Keyword] = &[
    Keyword { word: ">", code: 0xEE },
    Keyword { word: "CMD", code: 0xD7 },
    Keyword { word: "ERR", code: 0xE2 },
    Keyword { word: "LIST", code: 0x93 },
    Keyword { word: "PAINT", code: 0xBF },
    Keyword { word: "SPRITE", code: 0xC7 },
    Keyword { word: "=", code: 0xEF },
    Keyword { word: "COLOR", code: 0xBD },
    Keyword { word: "ERROR", code: 0xA6 },
    Keyword { word: "LLIST", code: 0x9E },
    Keyword { word: "PDL", code: 0xFFA4 },
    Keyword { word: "SQR", code: 0xFF87 },
    Keyword { word: "<", code: 0xF0 },
    Keyword { word: "CONT", code: 0x99 },
    Keyword { word: "EXP", code: 0xFF8B },
    Keyword { word: "LOAD", code: 0xB5 },
    Keyword { word: "PEEK", code: 0xFF97 },
    Keyword { word: "STEP", code: 0xDC },
    Keyword { word: "+", code: 0xF1 },
    Keyword { word: "COPY", code: 0xD6 },
    Keyword { word: "FIELD", code: 0xB1 },
    Keyword { word: "LOC", code: 0xFFAC },
    Keyword { word: "PLAY", code: 0xC1 },
    Keyword { word: "STICK", code: 0xFFA2 },
    Keyword { word: "-", code: 0xF2 },
    Keyword { word: "COS", code: 0xFF8C },
    Keyword { word: "FILES", code: 0xB7 },
    Keyword { word: "LOCATE", code: 0xD8 },
    Keyword { word: "POINT", code: 0xED },
    Keyword { word: "STOP", code: 0x90 },
    Keyword { word: "*", code: 0xF3 },
    Keyword { word: "CSAVE", code: 0x9A },
    Keyword { word: "FIX", code: 0xFFA1 },
    Keyword { word: "LOF", code: 0xFFAD },
    Keyword { word: "POKE", code: 0x98 },
    Keyword { word: "STR$", code: 0xFF93 },
    Keyword { word: "/", code: 0xF4 },
    Keyword { word: "CSNG", code: 0xFF9F },
    Keyword { word: "FN", code: 0xDE },
    Keyword { word: "LOG", code: 0xFF8A },
    Keyword { word: "POS", code: 0xFF91 },
    Keyword { word: "STRIG", code: 0xFFA3 },
    Keyword { word: "^", code: 0xF5 },
    Keyword { word: "CSRLIN", code: 0xE8 },
    Keyword { word: "FOR", code: 0x82 },
    Keyword { word: "LPOS", code: 0xFF9C },
    Keyword { word: "PRESET", code: 0xC3 },
    Keyword { word: "STRING$", code: 0xE3 },
    Keyword { word: "\\", code: 0xFC },
    Keyword { word: "CVD", code: 0xFFAA },
    Keyword { word: "FPOS", code: 0xFFA7 },
    Keyword { word: "LPRINT", code: 0x9D },
    Keyword { word: "PRINT", code: 0x91 },
    Keyword { word: "SWAP", code: 0xA4 },
    Keyword { word: "ABS", code: 0xFF86 },
    Keyword { word: "CVI", code: 0xFFA8 },
    Keyword { word: "FRE", code: 0xFF8F },
    Keyword { word: "LSET", code: 0xB8 },
    Keyword { word: "PSET", code: 0xC2 },
    Keyword { word: "TAB(", code: 0xDB },
    Keyword { word: "AND", code: 0xF6 },
    Keyword { word: "CVS", code: 0xFFA9 },
    Keyword { word: "GET", code: 0xB2 },
    Keyword { word: "MAX", code: 0xCD },
    Keyword { word: "PUT", code: 0xB3 },
    Keyword { word: "TAN", code: 0xFF8D },
    Keyword { word: "ASC", code: 0xFF95 },
    Keyword { word: "DATA", code: 0x84 },
    Keyword { word: "GOSUB", code: 0x8D },
    Keyword { word: "MERGE", code: 0xB6 },
    Keyword { word: "READ", code: 0x87 },
    Keyword { word: "THEN", code: 0xDA },
    Keyword { word: "ATN", code: 0xFF8E },
    Keyword { word: "DEF", code: 0x97 },
    Keyword { word: "GOTO", code: 0x89 },
    Keyword { word: "MID$", code: 0xFF83 },
    Keyword { word: "REM", code: 0x3A8F },
    Keyword { word: "TIME", code: 0xCB },
    Keyword { word: "ATTR$", code: 0xE9 },
    Keyword { word: "DEFDBL", code: 0xAE },
    Keyword { word: "HEX$", code: 0xFF9B },
    Keyword { word: "MKD$", code: 0xFFB0 },
    Keyword { word: "RENUM", code: 0xAA },
    Keyword { word: "TO", code: 0xD9 },
    Keyword { word: "AUTO", code: 0xA9 },
    Keyword { word: "DEFINT", code: 0xAC },
    Keyword { word: "IF", code: 0x8B },
    Keyword { word: "MKI$", code: 0xFFAE },
    Keyword { word: "RESTORE", code: 0x8C },
    Keyword { word: "TROFF", code: 0xA3 },
    Keyword { word: "BASE", code: 0xC9 },
    Keyword { word: "DEFSNG", code: 0xAD },
    Keyword { word: "IMP", code: 0xFA },
    Keyword { word: "MKS$", code: 0xFFAF },
    Keyword { word: "RESUME", code: 0xA7 },
    Keyword { word: "TRON", code: 0xA2 },
    Keyword { word: "BEEP", code: 0xC0 },
    Keyword { word: "DEFSTR", code: 0xAB },
    Keyword { word: "INKEY$", code: 0xEC },
    Keyword { word: "MOD", code: 0xFB },
    Keyword { word: "RETURN", code: 0x8E },
    Keyword { word: "USING", code: 0xE4 },
    Keyword { word: "BIN$", code: 0xFF9D },
    Keyword { word: "DELETE", code: 0xA8 },
    Keyword { word: "INP", code: 0xFF90 },
    Keyword { word: "MOTOR", code: 0xCE },
    Keyword { word: "RIGHT$", code: 0xFF82 },
    Keyword { word: "USR", code: 0xDD },
    Keyword { word: "BLOAD", code: 0xCF },
    Keyword { word: "DIM", code: 0x86 },
    Keyword { word: "INPUT", code: 0x85 },
    Keyword { word: "NAME", code: 0xD3 },
    Keyword { word: "RND", code: 0xFF88 },
    Keyword { word: "VAL", code: 0xFF94 },
    Keyword { word: "BSAVE", code: 0xD0 },
    Keyword { word: "DRAW", code: 0xBE },
    Keyword { word: "INSTR", code: 0xE5 },
    Keyword { word: "NEW", code: 0x94 },
    Keyword { word: "RSET", code: 0xB9 },
    Keyword { word: "VARPTR", code: 0xE7 },
    Keyword { word: "CALL", code: 0xCA },
    Keyword { word: "DSKF", code: 0xFFA6 },
    Keyword { word: "INT", code: 0xFF85 },
    Keyword { word: "NEXT", code: 0x83 },
    Keyword { word: "RUN", code: 0x8A },
    Keyword { word: "VDP", code: 0xC8 },
    Keyword { word: "CDBL", code: 0xFFA0 },
    Keyword { word: "DSKI$", code: 0xEA },
    Keyword { word: "IPL", code: 0xD5 },
    Keyword { word: "NOT", code: 0xE0 },
    Keyword { word: "SAVE", code: 0xBA },
    Keyword { word: "VPEEK", code: 0xFF98 },
    Keyword { word: "CHR$", code: 0xFF96 },
    Keyword { word: "DSKO$", code: 0xD1 },
    Keyword { word: "KEY", code: 0xCC },
    Keyword { word: "OCT$", code: 0xFF9A },
    Keyword { word: "SCREEN", code: 0xC5 },
    Keyword { word: "VPOKE", code: 0xC6 },
    Keyword { word: "CINT", code: 0xFF9E },
    Keyword { word: "ELSE", code: 0x3AA1 },
    Keyword { word: "KILL", code: 0xD4 },
    Keyword { word: "OFF", code: 0xEB },
    Keyword { word: "SET", code: 0xD2 },
    Keyword { word: "WAIT", code: 0x96 },
    Keyword { word: "CIRCLE", code: 0xBC },
    Keyword { word: "END", code: 0x81 },
    Keyword { word: "LEFT$", code: 0xFF81 },
    Keyword { word: "ON", code: 0x95 },
    Keyword { word: "SGN", code: 0xFF84 },
    Keyword { word: "WIDTH", code: 0xA0 },
    Keyword { word: "CLEAR", code: 0x92 },
    Keyword { word: "EOF", code: 0xFFAB },
    Keyword { word: "LEN", code: 0xFF92 },
    Keyword { word: "OPEN", code: 0xB0 },
    Keyword { word: "SIN", code: 0xFF89 },
    Keyword { word: "XOR", code: 0xF8 },
    Keyword { word: "CLOAD", code: 0x9B },
    Keyword { word: "EQV", code: 0xF9 },
    Keyword { word: "LET", code: 0x88 },
    Keyword { word: "OR", code: 0xF7 },
    Keyword { word: "SOUND", code: 0xC4 },
    Keyword { word: "CLOSE", code: 0xB4 },
    Keyword { word: "ERASE", code: 0xA5 },
    Keyword { word: "LFILES", code: 0xBB },
    Keyword { word: "OUT", code: 0x9C },
    Keyword { word: "SPACE$", code: 0xFF99 },
    Keyword { word: "CLS", code: 0x9F },
    Keyword { word: "ERL", code: 0xE1 },
    Keyword { word: "LINE", code: 0xAF },
    Keyword { word: "PAD", code: 0xFFA5 },
    Keyword { word: "SPC(", code: 0xDF },
];

/// Longest-prefix, case-insensitive keyword match against `src` starting at
/// byte 0. Returns the matched keyword and its length in source characters.
pub fn longest_match(src: &str) -> Option<(&'static Keyword, usize)> {
    let upper = src.to_ascii_uppercase();
    let mut best: Option<(&'static Keyword, usize)> = None;
    for kw in KEYWORDS {
        if upper.starts_with(kw.word) {
            let len = kw.word.len();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((kw, len));
            }
        }
    }
    best
}

/// Looks up the keyword whose code matches exactly (detokenizer direction).
/// Returns `""` for an unknown code, matching `original_source`'s
/// `getWordFromCode` sentinel-return behavior (spec.md §4.10).
pub fn word_for_code(code: u32) -> &'static str {
    KEYWORDS.iter().find(|kw| kw.code == code).map(|kw| kw.word).unwrap_or("")
}

#[cfg(test)]
mod keywords_test {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        let (kw, len) = longest_match("INPUT").unwrap();
        assert_eq!(kw.word, "INPUT");
        assert_eq!(len, 5);
    }

    #[test]
    fn shorter_keyword_not_shadowed_by_unrelated_longer_one() {
        let (kw, _) = longest_match("OR ").unwrap();
        assert_eq!(kw.word, "OR");
    }

    #[test]
    fn case_insensitive() {
        let (kw, _) = longest_match("print \"hi\"").unwrap();
        assert_eq!(kw.word, "PRINT");
    }

    #[test]
    fn unknown_code_is_empty_string() {
        assert_eq!(word_for_code(0xFFFF), "");
    }

    #[test]
    fn round_trip_every_keyword() {
        for kw in KEYWORDS {
            assert_eq!(word_for_code(kw.code), kw.word);
        }
    }
}
