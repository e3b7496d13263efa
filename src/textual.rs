//! The 3200-byte textual file header.
//!
//! The codec never interprets these bytes. [`TextualHeader::to_text`] and
//! [`TextualHeader::lines`] are read-only views for display.

use std::fmt;

use crate::ebcdic;
use crate::types::TEXTUAL_HEADER_BYTES;
use crate::{Result, SegyError};

/// Card width of one textual header line.
pub const CARD_COLUMNS: usize = 80;

/// Character encoding of a textual header, as guessed from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Ascii,
    Ebcdic,
}

/// Opaque 3200-byte textual header, kept verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct TextualHeader {
    bytes: Box<[u8; TEXTUAL_HEADER_BYTES]>,
}

impl TextualHeader {
    /// All ASCII spaces.
    pub fn blank() -> Self {
        Self {
            bytes: Box::new([b' '; TEXTUAL_HEADER_BYTES]),
        }
    }

    /// Take the first 3200 bytes of `bytes` verbatim.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < TEXTUAL_HEADER_BYTES {
            return Err(SegyError::TruncatedHeader {
                region: "textual header",
                expected: TEXTUAL_HEADER_BYTES,
                actual: bytes.len(),
            });
        }
        let mut block = Box::new([0u8; TEXTUAL_HEADER_BYTES]);
        block.copy_from_slice(&bytes[..TEXTUAL_HEADER_BYTES]);
        Ok(Self { bytes: block })
    }

    /// Build an ASCII header from text, padded with spaces.
    ///
    /// Text longer than 3200 bytes or containing non-ASCII characters is
    /// rejected rather than cut or replaced.
    pub fn from_text(text: &str) -> Result<Self> {
        check_text(text)?;
        let mut header = Self::blank();
        header.bytes[..text.len()].copy_from_slice(text.as_bytes());
        Ok(header)
    }

    /// Build an EBCDIC header from ASCII text, padded with EBCDIC spaces.
    ///
    /// Characters outside the printable code page 037 set, such as control
    /// characters, are rejected.
    pub fn from_text_ebcdic(text: &str) -> Result<Self> {
        check_text(text)?;
        let mut block = Box::new([0x40u8; TEXTUAL_HEADER_BYTES]);
        for (i, (slot, ch)) in block.iter_mut().zip(text.chars()).enumerate() {
            *slot = ebcdic::from_ascii(ch).ok_or_else(|| {
                SegyError::FormatError(format!(
                    "textual header character {ch:?} at byte {i} has no EBCDIC mapping"
                ))
            })?;
        }
        Ok(Self { bytes: block })
    }

    /// The stored 3200 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Guess the encoding from which space byte dominates.
    pub fn encoding(&self) -> TextEncoding {
        if ebcdic::looks_like_ebcdic(self.as_bytes()) {
            TextEncoding::Ebcdic
        } else {
            TextEncoding::Ascii
        }
    }

    /// Decode for display. Non-printable bytes become `?`.
    pub fn to_text(&self) -> String {
        match self.encoding() {
            TextEncoding::Ebcdic => self.bytes.iter().map(|&b| ebcdic::to_ascii(b)).collect(),
            TextEncoding::Ascii => self
                .bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii_graphic() || b == b' ' {
                        b as char
                    } else {
                        '?'
                    }
                })
                .collect(),
        }
    }

    /// The 40 card images of 80 columns, trailing spaces trimmed.
    pub fn lines(&self) -> Vec<String> {
        let text: Vec<char> = self.to_text().chars().collect();
        text.chunks(CARD_COLUMNS)
            .map(|card| card.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

fn check_text(text: &str) -> Result<()> {
    if !text.is_ascii() {
        return Err(SegyError::FormatError(
            "textual header text must be ASCII".into(),
        ));
    }
    if text.len() > TEXTUAL_HEADER_BYTES {
        return Err(SegyError::FormatError(format!(
            "textual header text is {} bytes, limit is {TEXTUAL_HEADER_BYTES}",
            text.len()
        )));
    }
    Ok(())
}

impl Default for TextualHeader {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Debug for TextualHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.lines().into_iter().next().unwrap_or_default();
        f.debug_struct("TextualHeader")
            .field("encoding", &self.encoding())
            .field("first_line", &first)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_is_verbatim() {
        let raw: Vec<u8> = (0..3300).map(|i| (i % 256) as u8).collect();
        let h = TextualHeader::from_bytes(&raw).unwrap();
        assert_eq!(h.as_bytes(), &raw[..3200]);
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(
            TextualHeader::from_bytes(&[0u8; 100]),
            Err(SegyError::TruncatedHeader {
                expected: 3200,
                actual: 100,
                ..
            })
        ));
    }

    #[test]
    fn test_ascii_lines() {
        let mut text = format!("{:<80}", "C 1 CLIENT: TEST");
        text.push_str("C 2 LINE 7");
        let h = TextualHeader::from_text(&text).unwrap();
        assert_eq!(h.encoding(), TextEncoding::Ascii);

        let lines = h.lines();
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[0], "C 1 CLIENT: TEST");
        assert_eq!(lines[1], "C 2 LINE 7");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_ebcdic_view() {
        let h = TextualHeader::from_text_ebcdic("C 1 SURVEY 2025").unwrap();
        assert_eq!(h.encoding(), TextEncoding::Ebcdic);
        assert_eq!(h.as_bytes()[0], 0xC3);
        assert_eq!(h.lines()[0], "C 1 SURVEY 2025");
    }

    #[test]
    fn test_ebcdic_rejects_unmapped_characters() {
        for text in ["LINE 1\nLINE 2", "TAB\tHERE", "NUL\0"] {
            assert!(
                matches!(
                    TextualHeader::from_text_ebcdic(text),
                    Err(SegyError::FormatError(_))
                ),
                "{text:?}"
            );
        }
        let h = TextualHeader::from_text_ebcdic("WHAT?").unwrap();
        assert_eq!(h.as_bytes()[4], 0x6F);
    }

    #[test]
    fn test_rejects_oversized_and_non_ascii() {
        assert!(matches!(
            TextualHeader::from_text(&"x".repeat(3201)),
            Err(SegyError::FormatError(_))
        ));
        assert!(matches!(
            TextualHeader::from_text("résumé"),
            Err(SegyError::FormatError(_))
        ));
    }
}
