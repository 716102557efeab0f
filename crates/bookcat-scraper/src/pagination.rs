//! Listing-page parsing for the "next"-link paginated catalog.
//!
//! Each listing page carries a grid of `article.product_pod` summaries whose
//! heading anchors point at detail pages, plus an `li.next` control on every
//! page but the last:
//!
//! ```text
//! <article class="product_pod">
//!   <h3><a href="a-light-in-the-attic_1000/index.html">A Light in the ...</a></h3>
//! </article>
//! ...
//! <li class="next"><a href="page-2.html">next</a></li>
//! ```
//!
//! Hrefs are relative to the catalog directory, not to the page URL, and may
//! carry leading `../` segments; both kinds are resolved against the catalog
//! root.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::ScraperError;
use crate::normalize::resolve_against_root;
use crate::types::{Field, ListingPage};

static ITEM_LINK: LazyLock<Selector> = LazyLock::new(|| selector("article.product_pod h3 a"));
static NEXT_LINK: LazyLock<Selector> = LazyLock::new(|| selector("li.next a"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Extracts item links and the next-page link from one listing page.
///
/// `page_url` is only used to attribute errors; links are resolved against
/// `catalog_root`.
///
/// # Errors
///
/// - [`ScraperError::MissingMarkup`] if an item anchor or the next control
///   has no `href`.
/// - [`ScraperError::InvalidUrl`] if an `href` cannot be joined onto the root.
pub fn parse_listing_page(
    html: &str,
    page_url: &str,
    catalog_root: &Url,
) -> Result<ListingPage, ScraperError> {
    let document = Html::parse_document(html);

    let item_urls = document
        .select(&ITEM_LINK)
        .map(|anchor| {
            let href = anchor
                .value()
                .attr("href")
                .ok_or_else(|| ScraperError::MissingMarkup {
                    url: page_url.to_owned(),
                    field: Field::ItemLink,
                })?;
            resolve_href(catalog_root, href).map(String::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let next_page = document
        .select(&NEXT_LINK)
        .next()
        .map(|anchor| {
            let href = anchor
                .value()
                .attr("href")
                .ok_or_else(|| ScraperError::MissingMarkup {
                    url: page_url.to_owned(),
                    field: Field::NextPage,
                })?;
            resolve_href(catalog_root, href)
        })
        .transpose()?;

    Ok(ListingPage {
        item_urls,
        next_page,
    })
}

fn resolve_href(root: &Url, href: &str) -> Result<Url, ScraperError> {
    resolve_against_root(root, href).map_err(|reason| ScraperError::InvalidUrl {
        url: href.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://example.test/catalogue/page-1.html";

    fn catalog_root() -> Url {
        Url::parse("https://example.test/catalogue/").unwrap()
    }

    fn listing_html(hrefs: &[&str], next: Option<&str>) -> String {
        let articles: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<li><article class="product_pod"><h3><a href="{href}" title="t">t</a></h3></article></li>"#
                )
            })
            .collect();
        let pager = next.map_or_else(String::new, |href| {
            format!(r#"<ul class="pager"><li class="current">Page 1</li><li class="next"><a href="{href}">next</a></li></ul>"#)
        });
        format!("<html><body><ol class=\"row\">{articles}</ol>{pager}</body></html>")
    }

    #[test]
    fn collects_item_links_in_page_order() {
        let html = listing_html(&["b_2/index.html", "a_1/index.html", "c_3/index.html"], None);
        let page = parse_listing_page(&html, PAGE_URL, &catalog_root()).unwrap();
        assert_eq!(
            page.item_urls,
            vec![
                "https://example.test/catalogue/b_2/index.html",
                "https://example.test/catalogue/a_1/index.html",
                "https://example.test/catalogue/c_3/index.html",
            ]
        );
        assert!(page.next_page.is_none());
    }

    #[test]
    fn strips_parent_segments_from_item_links() {
        let html = listing_html(&["../../../x_9/index.html"], None);
        let page = parse_listing_page(&html, PAGE_URL, &catalog_root()).unwrap();
        assert_eq!(
            page.item_urls,
            vec!["https://example.test/catalogue/x_9/index.html"]
        );
    }

    #[test]
    fn resolves_next_link_against_catalog_root() {
        let html = listing_html(&["a_1/index.html"], Some("page-2.html"));
        let page = parse_listing_page(&html, PAGE_URL, &catalog_root()).unwrap();
        assert_eq!(
            page.next_page.map(String::from).as_deref(),
            Some("https://example.test/catalogue/page-2.html")
        );
    }

    #[test]
    fn empty_page_yields_no_items_but_keeps_next() {
        let html = listing_html(&[], Some("page-3.html"));
        let page = parse_listing_page(&html, PAGE_URL, &catalog_root()).unwrap();
        assert!(page.item_urls.is_empty());
        assert!(page.next_page.is_some());
    }

    #[test]
    fn anchor_without_href_is_a_markup_error() {
        let html = r#"<article class="product_pod"><h3><a title="no link">x</a></h3></article>"#;
        let err = parse_listing_page(html, PAGE_URL, &catalog_root()).unwrap_err();
        assert!(
            matches!(err, ScraperError::MissingMarkup { field: Field::ItemLink, ref url } if url == PAGE_URL),
            "expected MissingMarkup(ItemLink), got: {err:?}"
        );
    }

    #[test]
    fn ignores_links_outside_product_pods() {
        let html = r#"<div><h3><a href="not-an-item.html">x</a></h3></div>
            <article class="product_pod"><h3><a href="real_1/index.html">y</a></h3></article>"#;
        let page = parse_listing_page(html, PAGE_URL, &catalog_root()).unwrap();
        assert_eq!(page.item_urls.len(), 1);
    }
}
