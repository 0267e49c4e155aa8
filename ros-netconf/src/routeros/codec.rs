//! RouterOS API word framing.
//!
//! A word is a variable-length length prefix followed by that many bytes. A
//! sentence is a run of words closed by an empty word.

use std::io::{self, Read, Write};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Largest word accepted from a peer.
pub const MAX_WORD_LEN: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("api i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("word of {0} bytes exceeds the api length limit")]
    WordTooLong(usize),
    #[error("invalid length prefix byte {0:#04x}")]
    InvalidLengthPrefix(u8),
    #[error("word is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Append the length prefix for a word of `len` bytes.
pub fn encode_length(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let n = u32::try_from(len).map_err(|_| CodecError::WordTooLong(len))?;
    match n {
        0..=0x7F => out.push(n as u8),
        0x80..=0x3FFF => out.extend_from_slice(&(n | 0x8000).to_be_bytes()[2..]),
        0x4000..=0x1F_FFFF => out.extend_from_slice(&(n | 0xC0_0000).to_be_bytes()[1..]),
        0x20_0000..=0x0FFF_FFFF => out.extend_from_slice(&(n | 0xE000_0000).to_be_bytes()),
        _ => {
            out.push(0xF0);
            out.extend_from_slice(&n.to_be_bytes());
        }
    }
    Ok(())
}

pub fn read_length<R: Read>(reader: &mut R) -> Result<usize, CodecError> {
    let first = read_byte(reader)?;
    let (extra, initial) = match first {
        b if b & 0x80 == 0x00 => (0, u32::from(b)),
        b if b & 0xC0 == 0x80 => (1, u32::from(b & 0x3F)),
        b if b & 0xE0 == 0xC0 => (2, u32::from(b & 0x1F)),
        b if b & 0xF0 == 0xE0 => (3, u32::from(b & 0x0F)),
        0xF0 => (4, 0),
        b => return Err(CodecError::InvalidLengthPrefix(b)),
    };
    let mut len = initial;
    for _ in 0..extra {
        len = (len << 8) | u32::from(read_byte(reader)?);
    }
    Ok(len as usize)
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8, CodecError> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

pub fn encode_word(word: &str, out: &mut Vec<u8>) -> Result<(), CodecError> {
    encode_length(word.len(), out)?;
    out.extend_from_slice(word.as_bytes());
    Ok(())
}

/// Write `words` plus the closing empty word, then flush.
pub fn write_sentence<W: Write, S: AsRef<str>>(
    writer: &mut W,
    words: &[S],
) -> Result<(), CodecError> {
    let mut buf = Vec::new();
    for word in words {
        encode_word(word.as_ref(), &mut buf)?;
    }
    buf.push(0);
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

pub fn read_word<R: Read>(reader: &mut R) -> Result<String, CodecError> {
    let len = read_length(reader)?;
    if len > MAX_WORD_LEN {
        return Err(CodecError::WordTooLong(len));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Read words up to, not including, the closing empty word.
pub fn read_sentence<R: Read>(reader: &mut R) -> Result<Vec<String>, CodecError> {
    let mut words = Vec::new();
    loop {
        let word = read_word(reader)?;
        if word.is_empty() {
            return Ok(words);
        }
        words.push(word);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{
        encode_length, read_length, read_sentence, read_word, write_sentence, CodecError,
        MAX_WORD_LEN,
    };

    fn encoded(len: usize) -> Vec<u8> {
        let mut out = Vec::new();
        encode_length(len, &mut out).expect("encode");
        out
    }

    #[test]
    fn length_prefix_widths() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(0x7F), vec![0x7F]);
        assert_eq!(encoded(0x80), vec![0x80, 0x80]);
        assert_eq!(encoded(0x3FFF), vec![0xBF, 0xFF]);
        assert_eq!(encoded(0x4000), vec![0xC0, 0x40, 0x00]);
        assert_eq!(encoded(0x1F_FFFF), vec![0xDF, 0xFF, 0xFF]);
        assert_eq!(encoded(0x20_0000), vec![0xE0, 0x20, 0x00, 0x00]);
        assert_eq!(encoded(0x1000_0000), vec![0xF0, 0x10, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn lengths_decode_back() {
        for len in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x1000_0000] {
            let mut cursor = Cursor::new(encoded(len));
            assert_eq!(read_length(&mut cursor).expect("decode"), len, "len {len:#x}");
        }
    }

    #[test]
    fn reserved_prefix_is_rejected() {
        let err = read_length(&mut Cursor::new(vec![0xF8])).expect_err("reserved");
        assert!(matches!(err, CodecError::InvalidLengthPrefix(0xF8)));
    }

    #[test]
    fn sentence_is_closed_by_empty_word() {
        let mut wire = Vec::new();
        write_sentence(&mut wire, &["/system/identity/print", "=.proplist=name"]).expect("write");
        assert_eq!(wire[0], 22);
        assert_eq!(wire.last(), Some(&0));

        let words = read_sentence(&mut Cursor::new(wire)).expect("read");
        assert_eq!(words, vec!["/system/identity/print", "=.proplist=name"]);
    }

    #[test]
    fn oversized_word_is_rejected_before_reading() {
        let mut wire = encoded(MAX_WORD_LEN + 1);
        wire.extend_from_slice(b"abc");
        let err = read_word(&mut Cursor::new(wire)).expect_err("too long");
        assert!(matches!(err, CodecError::WordTooLong(len) if len == MAX_WORD_LEN + 1));
    }

    #[test]
    fn truncated_word_is_an_io_error() {
        let err = read_sentence(&mut Cursor::new(vec![0x05, b'!', b'd'])).expect_err("short");
        assert!(matches!(err, CodecError::Io(_)));
    }
}
