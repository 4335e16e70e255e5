//! Serde adapter storing byte payloads as standard base64 strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use crate::clipboard::ClipContent;

    #[test]
    fn image_bytes_are_base64_in_json() {
        let content = ClipContent::Image {
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "image", "bytes": "iVBORw=="}));

        let back: ClipContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }
}
