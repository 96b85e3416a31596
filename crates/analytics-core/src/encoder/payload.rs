//! Encoded payload envelope: `v<format>:<encoding>:<body>`.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AnalyticsError, Result};

/// Format version written by this encoder.
pub const FORMAT_VERSION: u32 = 2;

/// Body encoding of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Body is the grouped plaintext itself.
    Plaintext,
    /// Body is base64(gzip(plaintext)).
    DeflateBase64,
}

impl Encoding {
    pub fn tag(self) -> &'static str {
        match self {
            Encoding::Plaintext => "plaintext",
            Encoding::DeflateBase64 => "deflate64",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "plaintext" => Some(Encoding::Plaintext),
            "deflate64" => Some(Encoding::DeflateBase64),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Analytics payload as attached to the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub format_version: u32,
    pub encoding: Encoding,
    pub body: String,
}

impl EncodedPayload {
    /// Recover the grouped plaintext, decompressing when needed.
    pub fn plaintext_body(&self) -> Result<String> {
        match self.encoding {
            Encoding::Plaintext => Ok(self.body.clone()),
            Encoding::DeflateBase64 => gunzip_base64(&self.body),
        }
    }

    /// SHA256 hex of the serialized payload.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}:{}:{}", self.format_version, self.encoding, self.body)
    }
}

impl FromStr for EncodedPayload {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let (Some(version), Some(tag), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(AnalyticsError::MalformedPayload(format!(
                "expected v<format>:<encoding>:<body>, got '{s}'"
            )));
        };

        let format_version = version
            .strip_prefix('v')
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| {
                AnalyticsError::MalformedPayload(format!("invalid format version '{version}'"))
            })?;
        let encoding = Encoding::from_tag(tag).ok_or_else(|| {
            AnalyticsError::MalformedPayload(format!("unknown encoding tag '{tag}'"))
        })?;

        Ok(EncodedPayload {
            format_version,
            encoding,
            body: body.to_string(),
        })
    }
}

/// base64(gzip(plaintext)) with a fixed gzip header, so equal input gives
/// equal output.
pub(crate) fn gzip_base64(plaintext: &str) -> Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(plaintext.as_bytes())
        .map_err(AnalyticsError::Compression)?;
    let compressed = encoder.finish().map_err(AnalyticsError::Compression)?;
    Ok(STANDARD.encode(compressed))
}

fn gunzip_base64(body: &str) -> Result<String> {
    let compressed = STANDARD.decode(body)?;
    let mut plaintext = String::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_string(&mut plaintext)
        .map_err(|e| AnalyticsError::MalformedPayload(format!("invalid gzip body: {e}")))?;
    Ok(plaintext)
}
