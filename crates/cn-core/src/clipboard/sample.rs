use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentHash;
use crate::ids::ClipId;

/// Payload of a captured clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClipContent {
    Text { text: String },
    /// PNG bytes, base64 on the wire
    Image {
        #[serde(with = "super::base64_bytes")]
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Text,
    Image,
}

impl ClipContent {
    pub fn kind(&self) -> ClipKind {
        match self {
            ClipContent::Text { .. } => ClipKind::Text,
            ClipContent::Image { .. } => ClipKind::Image,
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        match self {
            ClipContent::Text { text } => ContentHash::of(text.as_bytes()),
            ClipContent::Image { bytes } => ContentHash::of(bytes),
        }
    }

    /// Content-kind-specific equality: text compares by value, images by
    /// content hash.
    pub fn same_as(&self, other: &ClipContent) -> bool {
        match (self, other) {
            (ClipContent::Text { text: a }, ClipContent::Text { text: b }) => a == b,
            (ClipContent::Image { .. }, ClipContent::Image { .. }) => {
                self.content_hash() == other.content_hash()
            }
            _ => false,
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            ClipContent::Text { text } => text.len(),
            ClipContent::Image { bytes } => bytes.len(),
        }
    }
}

/// One captured clipboard sample. Immutable once stored.
///
/// 一条已捕获的剪贴板记录，入库后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSample {
    pub id: ClipId,
    pub content: ClipContent,
    pub captured_at: DateTime<Utc>,
}

impl ClipSample {
    pub fn new(content: ClipContent, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: ClipId::new(),
            content,
            captured_at,
        }
    }

    /// Short single-line preview for lists and logs.
    pub fn preview(&self, max_chars: usize) -> String {
        match &self.content {
            ClipContent::Text { text } => {
                let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
                truncate_chars(&line, max_chars)
            }
            ClipContent::Image { bytes } => format!("Image ({} bytes)", bytes.len()),
        }
    }
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
