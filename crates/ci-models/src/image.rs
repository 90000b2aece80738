//! Image model
//!
//! Table: images

use chrono::{DateTime, Utc};
use ci_core::encoding;
use ci_core::traits::Id;
use serde::{Deserialize, Serialize};

/// A persisted image attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Id,
    /// Owning customer (foreign key, not a reference)
    pub customer_id: Id,
    /// Base64 text of the original file bytes
    pub data: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Decode the stored text back into the uploaded bytes
    pub fn decode(&self) -> Result<Vec<u8>, encoding::DecodeError> {
        encoding::decode(&self.data)
    }
}

/// An image that has been encoded but not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub data: String,
    pub content_type: String,
}

impl NewImage {
    pub fn from_bytes(bytes: &[u8], content_type: impl Into<String>) -> Self {
        Self {
            data: encoding::encode(bytes),
            content_type: content_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_round_trip() {
        let bytes = b"\x89PNG\r\n\x1a\nrest";
        let new_image = NewImage::from_bytes(bytes, "image/png");

        let image = Image {
            id: 1,
            customer_id: 1,
            data: new_image.data,
            content_type: new_image.content_type,
            created_at: Utc::now(),
        };

        assert_eq!(image.decode().unwrap(), bytes);
    }

    #[test]
    fn test_corrupt_data_fails_to_decode() {
        let image = Image {
            id: 1,
            customer_id: 1,
            data: "%%%".into(),
            content_type: "image/png".into(),
            created_at: Utc::now(),
        };

        assert!(image.decode().is_err());
    }
}
