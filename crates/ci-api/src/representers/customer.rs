//! Customer payloads

use ci_core::traits::Id;
use serde::Serialize;

/// Payload of the image count endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCountRepresenter {
    pub customer_id: Id,
    pub image_count: usize,
}

impl ImageCountRepresenter {
    pub fn new(customer_id: Id, image_count: usize) -> Self {
        Self {
            customer_id,
            image_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_count_representer() {
        let value = serde_json::to_value(ImageCountRepresenter::new(3, 7)).unwrap();
        assert_eq!(value, json!({"customerId": 3, "imageCount": 7}));
    }
}
