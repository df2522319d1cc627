//! Character encodings and line endings of subtitle files.

use serde::{Deserialize, Serialize};

const BOM: char = '\u{feff}';

/// Character encoding of a subtitle file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 written with a byte order mark.
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    #[serde(rename = "utf-16-le")]
    Utf16Le,
    #[serde(rename = "utf-16-be")]
    Utf16Be,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl Encoding {
    /// Name used in messages and the config file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf16Le => "utf-16-le",
            Self::Utf16Be => "utf-16-be",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes`, dropping a leading byte order mark.
    ///
    /// Returns `None` if the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let text = match self {
            Self::Utf8 | Self::Utf8Sig => String::from_utf8(bytes.to_vec()).ok()?,
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes)?,
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes)?,
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        };
        Some(match text.strip_prefix(BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    /// Encode `text`.
    ///
    /// Fails with the first character this encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, char> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf8Sig => {
                let mut bytes = Vec::with_capacity(text.len() + 3);
                bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
                bytes.extend_from_slice(text.as_bytes());
                Ok(bytes)
            }
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| c))
                .collect(),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Line ending written to subtitle files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    #[default]
    Unix,
    Windows,
    Mac,
}

impl Newline {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Unix => "\n",
            Self::Windows => "\r\n",
            Self::Mac => "\r",
        }
    }
}

/// Split text into lines, accepting any of the three line endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}
