//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use encoding_rs::Encoding;
use std::io::BufRead;

/// DXF ASCII tag reader
///
/// Reads alternating code and value lines. Leading and trailing whitespace
/// is stripped from both, so indented fixtures read the same as files.
pub struct DxfTextReader<R: BufRead> {
    reader: R,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    /// Non-UTF8 fallback encoding.  `None` means use Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: BufRead> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            peeked_pair: None,
            encoding: None,
        }
    }

    /// Decode non-UTF8 lines with `encoding` instead of Latin-1
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Current line number (1-based, 0 before the first read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read a single line, handling non-UTF8 bytes gracefully.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = match std::str::from_utf8(&bytes) {
            Ok(s) => s.to_string(),
            Err(_) => match self.encoding {
                Some(enc) => enc.decode(&bytes).0.into_owned(),
                // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                None => bytes.iter().map(|&b| b as char).collect(),
            },
        };

        Ok(Some(line.trim().to_string()))
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        // Blank lines between pairs are not part of the tag structure
        let code_line = loop {
            match self.read_line()? {
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let line = self.line_number;

        let code = code_line.parse::<i32>().map_err(|_| {
            DxfError::Parse(format!("Invalid DXF code at line {}: '{}'", line, code_line))
        })?;

        let value_line = self.read_line()?.ok_or_else(|| {
            DxfError::Parse(format!("Unexpected EOF after code {} at line {}", code, line))
        })?;

        Ok(Some(DxfCodePair {
            code,
            value_string: process_string_value(&value_line),
            line,
        }))
    }
}

/// Expand caret escapes used in DXF strings
fn process_string_value(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}

impl<R: BufRead> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn peek_code(&mut self) -> Result<Option<i32>> {
        if let Some(ref pair) = self.peeked_pair {
            return Ok(Some(pair.code));
        }
        match self.read_pair_internal()? {
            Some(pair) => {
                let code = pair.code;
                self.peeked_pair = Some(pair);
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }
}

impl<R: BufRead> Iterator for DxfTextReader<R> {
    type Item = Result<DxfCodePair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_pair().transpose()
    }
}
