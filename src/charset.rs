// Copyright (c) 2026 rezky_nightky

use std::char;

/// The classic rain alphabet: hiragana, katakana and a few kanji.
/// Repeated glyphs are intentional; they weight the draw.
const CLASSIC_GLYPHS: &str = "ツテぱびぷのねぬとなゟゑをゐわれるむぬマヤカ阿加多";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charset(u32);

impl Charset {
    pub const CLASSIC: Charset = Charset(0x1);
    pub const LETTERS: Charset = Charset(0x2);
    pub const DIGITS: Charset = Charset(0x4);
    pub const PUNCTUATION: Charset = Charset(0x8);
    pub const KATAKANA: Charset = Charset(0x10);
    pub const BINARY: Charset = Charset(0x20);
    pub const HEX: Charset = Charset(0x40);

    pub const ASCII: Charset = Charset(0xE);
    pub const MATRIX: Charset = Charset(0x16);

    pub fn contains(self, other: Charset) -> bool {
        (self.0 & other.0) != 0
    }
}

pub fn charset_from_str(spec: &str) -> Result<Charset, String> {
    let spec = spec.trim().to_ascii_lowercase();
    match spec.as_str() {
        "classic" => Ok(Charset::CLASSIC),
        "katakana" => Ok(Charset::KATAKANA),
        "matrix" => Ok(Charset::MATRIX),
        "ascii" => Ok(Charset::ASCII),
        "english" => Ok(Charset::LETTERS),
        "digits" | "dec" | "decimal" => Ok(Charset::DIGITS),
        "punc" => Ok(Charset::PUNCTUATION),
        "bin" | "binary" | "01" => Ok(Charset::BINARY),
        "hex" | "hexadecimal" => Ok(Charset::HEX),
        _ => Err(format!(
            "unsupported charset: {} (see --list-charsets)",
            spec
        )),
    }
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

/// The fixed alphabet cells draw their glyph from, once, at construction.
pub fn build_glyphs(charset: Charset) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    if charset.contains(Charset::CLASSIC) {
        out.extend(CLASSIC_GLYPHS.chars());
    }
    if charset.contains(Charset::BINARY) {
        push_range(&mut out, 0x30, 0x31);
    }
    if charset.contains(Charset::HEX) {
        push_range(&mut out, 0x30, 0x39);
        push_range(&mut out, 0x41, 0x46);
    }
    if charset.contains(Charset::LETTERS) {
        push_range(&mut out, 0x41, 0x5A);
        push_range(&mut out, 0x61, 0x7A);
    }
    if charset.contains(Charset::DIGITS) {
        push_range(&mut out, 0x30, 0x39);
    }
    if charset.contains(Charset::PUNCTUATION) {
        push_range(&mut out, 0x21, 0x2F);
        push_range(&mut out, 0x3A, 0x40);
        push_range(&mut out, 0x5B, 0x60);
        push_range(&mut out, 0x7B, 0x7E);
    }
    if charset.contains(Charset::KATAKANA) {
        push_range(&mut out, 0xFF66, 0xFF9D);
    }

    if out.is_empty() {
        out.push('0');
        out.push('1');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_preset_keeps_its_glyph_order() {
        let glyphs = build_glyphs(Charset::CLASSIC);
        assert_eq!(glyphs, CLASSIC_GLYPHS.chars().collect::<Vec<_>>());
    }

    #[test]
    fn binary_has_only_0_and_1() {
        assert_eq!(build_glyphs(Charset::BINARY), vec!['0', '1']);
    }

    #[test]
    fn matrix_combines_letters_digits_and_katakana() {
        let cs = charset_from_str("matrix").unwrap();
        assert!(cs.contains(Charset::LETTERS));
        assert!(cs.contains(Charset::DIGITS));
        assert!(cs.contains(Charset::KATAKANA));
        assert!(!cs.contains(Charset::PUNCTUATION));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(charset_from_str("klingon").is_err());
    }

    #[test]
    fn empty_set_falls_back_to_binary() {
        assert_eq!(build_glyphs(Charset(0)), vec!['0', '1']);
    }
}
