//! Per-customer image quota
//!
//! Every mutation of a customer's image collection is described as an
//! [`ImageMutation`] and checked with [`check_quota`] against the size the
//! collection will have after the mutation. Stores run the check inside the
//! same transaction that applies the mutation.

use thiserror::Error;

use crate::image::NewImage;

/// Maximum number of images one customer may own
pub const MAX_IMAGES_PER_CUSTOMER: usize = 10;

/// A change to a customer's image collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMutation {
    /// Drop every existing image and store these instead
    Replace(Vec<NewImage>),
    /// Keep existing images and store these after them
    Append(Vec<NewImage>),
    /// Drop every existing image
    Clear,
}

impl ImageMutation {
    /// Collection size once the mutation is applied to `current` images
    pub fn resulting_count(&self, current: usize) -> usize {
        match self {
            ImageMutation::Replace(images) => images.len(),
            ImageMutation::Append(images) => current + images.len(),
            ImageMutation::Clear => 0,
        }
    }

    /// Images the mutation inserts
    pub fn new_images(&self) -> &[NewImage] {
        match self {
            ImageMutation::Replace(images) | ImageMutation::Append(images) => images,
            ImageMutation::Clear => &[],
        }
    }

    /// Whether existing images are deleted first
    pub fn clears_existing(&self) -> bool {
        matches!(self, ImageMutation::Replace(_) | ImageMutation::Clear)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageMutation::Replace(_) => "replace",
            ImageMutation::Append(_) => "append",
            ImageMutation::Clear => "clear",
        }
    }
}

/// Why a mutation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuotaViolation {
    /// The batch alone is larger than the quota
    #[error("quota exceeded")]
    BatchTooLarge { requested: usize },
    /// The batch does not fit next to the images already stored
    #[error("only {remaining} more allowed")]
    InsufficientRoom { remaining: usize },
}

/// Check a batch that will become the whole collection (create, replace)
pub fn check_batch(len: usize) -> Result<(), QuotaViolation> {
    if len > MAX_IMAGES_PER_CUSTOMER {
        Err(QuotaViolation::BatchTooLarge { requested: len })
    } else {
        Ok(())
    }
}

/// Check `mutation` against a collection currently holding `current` images
pub fn check_quota(current: usize, mutation: &ImageMutation) -> Result<(), QuotaViolation> {
    match mutation {
        ImageMutation::Replace(images) => check_batch(images.len()),
        ImageMutation::Append(_) => {
            if mutation.resulting_count(current) > MAX_IMAGES_PER_CUSTOMER {
                Err(QuotaViolation::InsufficientRoom {
                    remaining: MAX_IMAGES_PER_CUSTOMER.saturating_sub(current),
                })
            } else {
                Ok(())
            }
        }
        ImageMutation::Clear => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize) -> Vec<NewImage> {
        (0..n)
            .map(|i| NewImage::from_bytes(&[i as u8], "image/png"))
            .collect()
    }

    #[test]
    fn test_append_within_quota() {
        assert!(check_quota(7, &ImageMutation::Append(batch(3))).is_ok());
        assert!(check_quota(0, &ImageMutation::Append(batch(10))).is_ok());
    }

    #[test]
    fn test_append_over_quota_reports_room_left() {
        let result = check_quota(8, &ImageMutation::Append(batch(3)));
        assert_eq!(result, Err(QuotaViolation::InsufficientRoom { remaining: 2 }));
        assert_eq!(result.unwrap_err().to_string(), "only 2 more allowed");
    }

    #[test]
    fn test_append_to_full_collection() {
        let result = check_quota(10, &ImageMutation::Append(batch(1)));
        assert_eq!(result, Err(QuotaViolation::InsufficientRoom { remaining: 0 }));
    }

    #[test]
    fn test_empty_append_always_fits() {
        assert!(check_quota(10, &ImageMutation::Append(vec![])).is_ok());
    }

    #[test]
    fn test_replace_ignores_current_count() {
        assert!(check_quota(10, &ImageMutation::Replace(batch(10))).is_ok());
        let result = check_quota(0, &ImageMutation::Replace(batch(11)));
        assert_eq!(result, Err(QuotaViolation::BatchTooLarge { requested: 11 }));
        assert_eq!(result.unwrap_err().to_string(), "quota exceeded");
    }

    #[test]
    fn test_clear_always_allowed() {
        assert!(check_quota(10, &ImageMutation::Clear).is_ok());
        assert_eq!(ImageMutation::Clear.resulting_count(10), 0);
    }

    #[test]
    fn test_accepted_mutations_never_exceed_quota() {
        for current in 0..=MAX_IMAGES_PER_CUSTOMER {
            for n in 0..=12 {
                for mutation in [
                    ImageMutation::Replace(batch(n)),
                    ImageMutation::Append(batch(n)),
                    ImageMutation::Clear,
                ] {
                    if check_quota(current, &mutation).is_ok() {
                        assert!(mutation.resulting_count(current) <= MAX_IMAGES_PER_CUSTOMER);
                    }
                }
            }
        }
    }
}
