use super::*;

fn client_for(base: &str) -> CatalogClient {
    CatalogClient::new(&Url::parse(base).unwrap(), 5, "bookcat-test/0.1").unwrap()
}

#[test]
fn catalog_root_is_beneath_base() {
    let client = client_for("https://books.toscrape.com/");
    assert_eq!(
        client.catalog_root.as_str(),
        "https://books.toscrape.com/catalogue/"
    );
}

#[test]
fn base_without_trailing_slash_keeps_its_path() {
    let client = client_for("https://example.test/mirror");
    assert_eq!(client.base_url().as_str(), "https://example.test/mirror/");
    assert_eq!(
        client.catalog_root.as_str(),
        "https://example.test/mirror/catalogue/"
    );
}

#[test]
fn first_page_is_page_one_of_catalog() {
    let client = client_for("https://books.toscrape.com");
    let first = first_page_url(&client.catalog_root).unwrap();
    assert_eq!(
        first.as_str(),
        "https://books.toscrape.com/catalogue/page-1.html"
    );
}

#[test]
fn catalog_root_rejects_cannot_be_a_base_urls() {
    let url = Url::parse("data:text/plain,hello").unwrap();
    let err = catalog_root(&url).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(
        extract_domain("https://books.toscrape.com/catalogue/page-2.html"),
        "books.toscrape.com"
    );
    assert_eq!(extract_domain("not a url"), "not a url");
}
