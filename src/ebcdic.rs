//! EBCDIC (code page 037) to ASCII translation for textual headers.
//!
//! Only the printable repertoire that appears in SEG-Y card images is
//! mapped. Anything else decodes to `?` so that a view never panics; the
//! stored bytes are never rewritten.

/// Translate one EBCDIC byte to an ASCII character.
pub fn to_ascii(byte: u8) -> char {
    match byte {
        0x40 => ' ',
        0x4B => '.',
        0x4C => '<',
        0x4D => '(',
        0x4E => '+',
        0x4F => '|',
        0x50 => '&',
        0x5A => '!',
        0x5B => '$',
        0x5C => '*',
        0x5D => ')',
        0x5E => ';',
        0x60 => '-',
        0x61 => '/',
        0x6B => ',',
        0x6C => '%',
        0x6D => '_',
        0x6E => '>',
        0x6F => '?',
        0x79 => '`',
        0x7A => ':',
        0x7B => '#',
        0x7C => '@',
        0x7D => '\'',
        0x7E => '=',
        0x7F => '"',
        0x81..=0x89 => (b'a' + (byte - 0x81)) as char,
        0x91..=0x99 => (b'j' + (byte - 0x91)) as char,
        0xA1 => '~',
        0xA2..=0xA9 => (b's' + (byte - 0xA2)) as char,
        0xB0 => '^',
        0xBA => '[',
        0xBB => ']',
        0xC0 => '{',
        0xC1..=0xC9 => (b'A' + (byte - 0xC1)) as char,
        0xD0 => '}',
        0xD1..=0xD9 => (b'J' + (byte - 0xD1)) as char,
        0xE0 => '\\',
        0xE2..=0xE9 => (b'S' + (byte - 0xE2)) as char,
        0xF0..=0xF9 => (b'0' + (byte - 0xF0)) as char,
        _ => '?',
    }
}

/// Translate one ASCII character to EBCDIC, or `None` if it has no mapping.
pub fn from_ascii(ch: char) -> Option<u8> {
    if ch == '?' {
        return Some(0x6F);
    }
    // The forward table is small; search it rather than keep a second copy.
    (0u8..=0xFF).find(|&b| to_ascii(b) == ch)
}

/// Heuristic: does this block look like EBCDIC rather than ASCII?
///
/// Card images are mostly spaces, which are `0x40` in EBCDIC and `0x20` in
/// ASCII. The more common of the two wins.
pub fn looks_like_ebcdic(bytes: &[u8]) -> bool {
    let ebcdic_spaces = bytes.iter().filter(|&&b| b == 0x40).count();
    let ascii_spaces = bytes.iter().filter(|&&b| b == 0x20).count();
    ebcdic_spaces > ascii_spaces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        let ebcdic = [0xC3, 0xF0, 0xF1, 0x40, 0x81, 0xA9];
        let text: String = ebcdic.iter().map(|&b| to_ascii(b)).collect();
        assert_eq!(text, "C01 az");
    }

    #[test]
    fn test_round_trip_printable_ascii() {
        let sample = "C 1 CLIENT: ACME  LINE 42 (2D) x=1.5, y=-2; #7 @ 10% [ok]";
        for ch in sample.chars() {
            assert_eq!(from_ascii(ch).map(to_ascii), Some(ch), "{ch:?}");
        }
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(to_ascii(0x00), '?');
        assert_eq!(from_ascii('é'), None);
        assert_eq!(from_ascii('\n'), None);
        assert_eq!(from_ascii('\0'), None);
        assert_eq!(from_ascii('?'), Some(0x6F));
    }

    #[test]
    fn test_detection() {
        assert!(looks_like_ebcdic(&[0x40; 80]));
        assert!(!looks_like_ebcdic(&[0x20; 80]));
    }
}
