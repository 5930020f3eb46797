//! Avatar image intake.
//!
//! # Responsibility
//! - Turn a selected image into a self-contained `data:` URI payload.
//! - Enforce size and MIME limits from `AvatarPolicy` before embedding.
//!
//! # Invariants
//! - A payload is only produced for non-empty, allowed, size-capped images.
//! - Failures never touch the draft; the caller decides what to surface.

use crate::config::AvatarPolicy;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::path::{Path, PathBuf};

const DATA_URI_PREFIX: &str = "data:";
const SVG_MIME: &str = "image/svg+xml";

/// Avatar intake failure.
#[derive(Debug)]
pub enum AvatarError {
    /// Selected file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Image is larger than `AvatarPolicy::max_bytes`.
    TooLarge { size: u64, max_bytes: usize },
    /// MIME type is unknown or not allowed.
    UnsupportedType(String),
    /// Selected file holds no bytes.
    Empty,
}

impl Display for AvatarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read image `{}`: {source}", path.display())
            }
            Self::TooLarge { size, max_bytes } => {
                write!(f, "image is {size} bytes; limit is {max_bytes} bytes")
            }
            Self::UnsupportedType(mime) => write!(f, "unsupported image type `{mime}`"),
            Self::Empty => write!(f, "image file is empty"),
        }
    }
}

impl Error for AvatarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Embedded avatar image ready to store in `avatar_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarPayload {
    mime: String,
    byte_len: usize,
    data_uri: String,
}

impl AvatarPayload {
    /// Encodes in-memory image bytes.
    ///
    /// The type is taken from magic bytes. A `declared_mime` must agree with
    /// them; only SVG, which has no binary signature, may rely on the
    /// declared type alone.
    ///
    /// # Errors
    /// - `Empty`, `TooLarge` or `UnsupportedType` per `policy`.
    /// - `UnsupportedType` when content and declared type disagree.
    pub fn from_bytes(
        bytes: &[u8],
        declared_mime: Option<&str>,
        policy: &AvatarPolicy,
    ) -> Result<Self, AvatarError> {
        if bytes.is_empty() {
            return Err(AvatarError::Empty);
        }
        check_size(bytes.len() as u64, policy)?;

        let mime = resolve_mime(bytes, declared_mime)?;
        if !policy.allows(&mime) {
            return Err(AvatarError::UnsupportedType(mime));
        }

        let data_uri = format!("{DATA_URI_PREFIX}{mime};base64,{}", STANDARD.encode(bytes));
        Ok(Self {
            mime,
            byte_len: bytes.len(),
            data_uri,
        })
    }

    /// Reads an image file from disk.
    ///
    /// The extension acts as the declared type and must match the content.
    /// Reads at most `max_bytes + 1` bytes so oversized files fail fast.
    pub fn read_file(path: impl AsRef<Path>, policy: &AvatarPolicy) -> Result<Self, AvatarError> {
        let path = path.as_ref();
        let io_error = |source| AvatarError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = std::fs::File::open(path).map_err(io_error)?;
        let size = file.metadata().map_err(io_error)?.len();
        check_size(size, policy)?;

        let mut bytes = Vec::with_capacity(size as usize);
        file.take(policy.max_bytes as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(io_error)?;

        Self::from_bytes(&bytes, mime_from_extension(path), policy)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the decoded image in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn into_data_uri(self) -> String {
        self.data_uri
    }
}

/// Returns whether `value` is an embedded `data:` URI rather than a URL.
pub fn is_embedded_image(value: &str) -> bool {
    value.trim_start().starts_with(DATA_URI_PREFIX)
}

fn check_size(size: u64, policy: &AvatarPolicy) -> Result<(), AvatarError> {
    if size > policy.max_bytes as u64 {
        return Err(AvatarError::TooLarge {
            size,
            max_bytes: policy.max_bytes,
        });
    }
    Ok(())
}

fn resolve_mime(bytes: &[u8], declared_mime: Option<&str>) -> Result<String, AvatarError> {
    let declared = declared_mime
        .map(mime_essence)
        .filter(|mime| !mime.is_empty());

    match (sniff_mime(bytes), declared) {
        (Some(sniffed), None) => Ok(sniffed.to_string()),
        (Some(sniffed), Some(declared)) if declared == sniffed => Ok(declared),
        (None, Some(declared)) if declared == SVG_MIME => Ok(declared),
        (_, Some(declared)) => Err(AvatarError::UnsupportedType(declared)),
        (None, None) => Err(AvatarError::UnsupportedType("unknown".to_string())),
    }
}

fn mime_essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]).to_ascii_lowercase();
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return Some(SVG_MIME);
    }
    None
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some(SVG_MIME),
        _ => None,
    }
}
