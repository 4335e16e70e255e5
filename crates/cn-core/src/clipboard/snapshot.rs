use serde::{Deserialize, Serialize};

use super::ContentHash;

/// Raw clipboard state as read from the OS in one poll.
///
/// 从系统剪切板中获取到原始数据的快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemClipboardSnapshot {
    pub ts_ms: i64,
    /// Plain text representation, if any.
    pub text: Option<String>,
    /// PNG-encoded image representation, if any.
    pub image: Option<Vec<u8>>,
}

impl SystemClipboardSnapshot {
    pub fn empty(ts_ms: i64) -> Self {
        Self {
            ts_ms,
            text: None,
            image: None,
        }
    }

    pub fn with_text(ts_ms: i64, text: impl Into<String>) -> Self {
        Self {
            ts_ms,
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn with_image(ts_ms: i64, png: Vec<u8>) -> Self {
        Self {
            ts_ms,
            text: None,
            image: Some(png),
        }
    }

    /// Hash of the text representation. Empty text counts as absent.
    pub fn text_hash(&self) -> Option<ContentHash> {
        self.non_empty_text().map(|t| ContentHash::of(t.as_bytes()))
    }

    pub fn image_hash(&self) -> Option<ContentHash> {
        self.image
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(ContentHash::of)
    }

    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty_text().is_none() && self.image_hash().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_hash() {
        let snapshot = SystemClipboardSnapshot::with_text(0, "");
        assert!(snapshot.text_hash().is_none());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn image_hash_ignores_text() {
        let mut a = SystemClipboardSnapshot::with_image(0, vec![1, 2, 3]);
        let b = a.clone();
        a.text = Some("placeholder".into());
        assert_eq!(a.image_hash(), b.image_hash());
    }
}
