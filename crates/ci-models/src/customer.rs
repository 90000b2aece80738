//! Customer model
//!
//! Table: customers

use chrono::{DateTime, Utc};
use ci_core::traits::Id;
use serde::{Deserialize, Serialize};

use crate::image::Image;

/// Maximum length of a customer name, in characters
pub const NAME_MAX_LENGTH: usize = 200;

/// Customer entity together with the images it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Id,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Owned images, ascending by id (insertion order)
    pub images: Vec<Image>,
}

impl Customer {
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn image(&self, image_id: Id) -> Option<&Image> {
        self.images.iter().find(|image| image.id == image_id)
    }

    pub fn image_ids(&self) -> Vec<Id> {
        self.images.iter().map(|image| image.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: Id, customer_id: Id) -> Image {
        Image {
            id,
            customer_id,
            data: "aGk=".into(),
            content_type: "image/png".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_image_lookup() {
        let customer = Customer {
            id: 3,
            name: "Ada".into(),
            created_at: Utc::now(),
            images: vec![image(10, 3), image(11, 3)],
        };

        assert_eq!(customer.image_count(), 2);
        assert_eq!(customer.image_ids(), vec![10, 11]);
        assert!(customer.image(11).is_some());
        assert!(customer.image(12).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let customer = Customer {
            id: 1,
            name: "Ada".into(),
            created_at: Utc::now(),
            images: vec![image(5, 1)],
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["images"][0]["customerId"], 1);
        assert_eq!(json["images"][0]["contentType"], "image/png");
    }
}
