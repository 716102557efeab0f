//! Detail-page parsing into an [`ItemRecord`].
//!
//! Field locations on a detail page:
//!
//! | Field | Markup |
//! |-------|--------|
//! | title | `h1` |
//! | price | `p.price_color` |
//! | rating | second class token of `p.star-rating`, e.g. `star-rating Three` |
//! | availability | `p.availability` |
//! | category | last `ul.breadcrumb li a` |
//! | image | `src` of `div.item.active img` |
//!
//! Title and category are trimmed only; availability also has its inner
//! whitespace runs collapsed. A missing rating is the only tolerated gap;
//! every other field is required.

use std::sync::LazyLock;

use bookcat_core::ItemRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ScraperError;
use crate::normalize::{clean_text, parse_price, rating_from_word, resolve_against_root};
use crate::types::Field;

const RATING_TOKEN_POSITION: usize = 1;

struct DetailSelectors {
    title: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
    breadcrumb: Selector,
    image: Selector,
}

static SELECTORS: LazyLock<DetailSelectors> = LazyLock::new(|| DetailSelectors {
    title: selector("h1"),
    price: selector("p.price_color"),
    rating: selector("p.star-rating"),
    availability: selector("p.availability"),
    breadcrumb: selector("ul.breadcrumb li a"),
    image: selector("div.item.active img"),
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Parses a fetched detail page.
///
/// `item_url` is stored verbatim as the record's `source_url`; `site_root`
/// is what the image path is resolved against.
///
/// # Errors
///
/// - [`ScraperError::MissingMarkup`] when the title, price, availability,
///   breadcrumb trail, or image element is absent.
/// - [`ScraperError::Normalization`] when a present value is blank or the
///   price does not parse.
/// - [`ScraperError::InvalidUrl`] when the image path cannot be resolved.
pub fn parse_item_page(
    html: &str,
    item_url: &str,
    site_root: &Url,
) -> Result<ItemRecord, ScraperError> {
    let document = Html::parse_document(html);
    let page = DetailPage {
        document: &document,
        url: item_url,
    };

    let title = page.required_text(&SELECTORS.title, Field::Title)?;

    let raw_price = page.required_text(&SELECTORS.price, Field::Price)?;
    let price = parse_price(&raw_price)
        .map_err(|reason| page.malformed(Field::Price, &raw_price, reason))?;

    let rating = page.rating();
    let availability =
        clean_text(&page.required_text(&SELECTORS.availability, Field::Availability)?);

    let category = document
        .select(&SELECTORS.breadcrumb)
        .last()
        .map(|crumb| element_text(crumb).trim().to_owned())
        .ok_or_else(|| page.missing(Field::Category))?;
    if category.is_empty() {
        return Err(page.malformed(
            Field::Category,
            &category,
            "breadcrumb entry is blank".to_owned(),
        ));
    }

    let image_src = document
        .select(&SELECTORS.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .ok_or_else(|| page.missing(Field::ImageUrl))?;
    let image_url = resolve_against_root(site_root, image_src)
        .map_err(|reason| ScraperError::InvalidUrl {
            url: image_src.to_owned(),
            reason,
        })?
        .to_string();

    Ok(ItemRecord {
        title,
        price,
        rating,
        availability,
        category,
        image_url,
        source_url: item_url.to_owned(),
    })
}

struct DetailPage<'a> {
    document: &'a Html,
    url: &'a str,
}

impl DetailPage<'_> {
    /// Text of the first match with surrounding whitespace trimmed; inner
    /// whitespace is kept as-is. Blank text counts as malformed.
    fn required_text(&self, selector: &Selector, field: Field) -> Result<String, ScraperError> {
        let element = self
            .document
            .select(selector)
            .next()
            .ok_or_else(|| self.missing(field))?;
        let text = element_text(element).trim().to_owned();
        if text.is_empty() {
            return Err(self.malformed(field, "", "element has no text".to_owned()));
        }
        Ok(text)
    }

    fn rating(&self) -> Option<u8> {
        let Some(element) = self.document.select(&SELECTORS.rating).next() else {
            tracing::debug!(url = self.url, "no star-rating element; rating unknown");
            return None;
        };

        // The ordinal word is the second class token, as in `star-rating Three`.
        let token = element
            .value()
            .attr("class")
            .and_then(|classes| classes.split_whitespace().nth(RATING_TOKEN_POSITION));
        let rating = token.and_then(rating_from_word);
        if rating.is_none() {
            tracing::debug!(
                url = self.url,
                token = token.unwrap_or_default(),
                "unrecognized star-rating token; rating unknown"
            );
        }
        rating
    }

    fn missing(&self, field: Field) -> ScraperError {
        ScraperError::MissingMarkup {
            url: self.url.to_owned(),
            field,
        }
    }

    fn malformed(&self, field: Field, raw: &str, reason: String) -> ScraperError {
        ScraperError::Normalization {
            url: self.url.to_owned(),
            field,
            raw: raw.to_owned(),
            reason,
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
