//! Intermediate shapes produced while walking the catalog.

use url::Url;

/// One fetched listing page. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute detail-page URLs in the order they appear on the page.
    pub item_urls: Vec<String>,
    /// Absolute URL of the following page, `None` on the last page.
    pub next_page: Option<Url>,
}

/// A piece of markup the scraper reads, used to attribute parse and
/// normalization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ItemLink,
    NextPage,
    Title,
    Price,
    Rating,
    Availability,
    Category,
    ImageUrl,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ItemLink => "item_link",
            Field::NextPage => "next_page",
            Field::Title => "title",
            Field::Price => "price",
            Field::Rating => "rating",
            Field::Availability => "availability",
            Field::Category => "category",
            Field::ImageUrl => "image_url",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
