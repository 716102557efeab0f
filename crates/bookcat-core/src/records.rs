use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One catalog item, extracted from its detail page and normalized.
///
/// Records are produced once per crawl and never updated in place; a re-run
/// regenerates the whole dataset. `source_url` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: String,
    /// Non-negative amount in pounds sterling, serialized as a decimal string.
    pub price: Decimal,
    /// Star rating in `MIN_RATING..=MAX_RATING`; `None` when the page carried
    /// no recognizable rating token.
    pub rating: Option<u8>,
    /// Stock status exactly as the page words it, e.g. `"In stock (22 available)"`.
    pub availability: String,
    /// Most specific breadcrumb category, e.g. `"Poetry"`.
    pub category: String,
    pub image_url: String,
    pub source_url: String,
}

impl ItemRecord {
    /// Checks the invariants every extracted record satisfies: non-negative
    /// price, rating within `MIN_RATING..=MAX_RATING` when known, and
    /// non-blank title, category, and source URL.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason naming the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(format!("negative price {}", self.price));
        }
        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(format!(
                    "rating {rating} outside {MIN_RATING}..={MAX_RATING}"
                ));
            }
        }
        for (name, value) in [
            ("title", &self.title),
            ("category", &self.category),
            ("source_url", &self.source_url),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{name} is blank"));
            }
        }
        Ok(())
    }
}
