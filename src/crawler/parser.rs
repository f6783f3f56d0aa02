//! HTML parsers for listing and detail pages
//!
//! Listing pages yield [`ItemStub`]s, one per product block. Detail pages
//! yield an [`ItemDetail`]. Every field is extracted independently: a missing
//! element produces that field's default instead of failing the page.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

const ITEM_BLOCK: &str = "article.product_pod";
const ITEM_ANCHOR: &str = "h3 a";
const ITEM_PRICE: &str = "p.price_color";
const ITEM_AVAILABILITY: &str = "p.instock.availability";
const ITEM_RATING: &str = "p.star-rating";
const RATING_MARKER: &str = "star-rating";

const DETAIL_DESCRIPTION: &str = "#product_description ~ p";
const DETAIL_TABLE_ROW: &str = "table.table.table-striped tr";
const BREADCRUMB_ENTRY: &str = "ul.breadcrumb li";
const BREADCRUMB_LINK: &str = "ul.breadcrumb li a";

/// Minimum breadcrumb entries (Home, a category, the item) for a category to exist
const MIN_BREADCRUMB_ENTRIES: usize = 3;

/// Summary fields of one item as shown on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStub {
    pub title: String,
    pub price_text: String,
    pub availability_text: String,
    /// Rating level token (e.g. "Three"), empty when the page shows no rating
    pub rating_token: String,
    /// Absolute URL of the item's detail page
    pub detail_url: Url,
}

/// Extra fields scraped from an item's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDetail {
    pub description: String,
    /// The "UPC" attribute
    pub identifier: String,
    pub product_type: String,
    pub category: String,
}

/// Parses one listing page into item stubs, in document order
///
/// Relative detail links are resolved against `page_url`, the URL the page
/// was fetched from. An item block without a usable title or link is skipped
/// without affecting its neighbours. A page with no item blocks yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use catalog_harvest::crawler::parse_listing_page;
/// use url::Url;
///
/// let html = r#"<article class="product_pod">
///   <p class="star-rating Two"></p>
///   <h3><a href="a-book_1/index.html" title="A Book">A Book</a></h3>
///   <p class="price_color">£10.00</p>
///   <p class="instock availability">In stock</p>
/// </article>"#;
/// let page = Url::parse("http://books.toscrape.com/catalogue/page-2.html").unwrap();
/// let stubs = parse_listing_page(html, &page);
/// assert_eq!(stubs[0].rating_token, "Two");
/// assert_eq!(
///     stubs[0].detail_url.as_str(),
///     "http://books.toscrape.com/catalogue/a-book_1/index.html"
/// );
/// ```
pub fn parse_listing_page(html: &str, page_url: &Url) -> Vec<ItemStub> {
    let document = Html::parse_document(html);
    let Ok(item_selector) = Selector::parse(ITEM_BLOCK) else {
        return Vec::new();
    };

    let mut stubs = Vec::new();
    for (index, item) in document.select(&item_selector).enumerate() {
        match parse_item(item, page_url) {
            Some(stub) => stubs.push(stub),
            None => tracing::debug!("Skipping item {} on {}: no title or link", index, page_url),
        }
    }

    stubs
}

/// Extracts one stub from a product block
fn parse_item(item: ElementRef<'_>, page_url: &Url) -> Option<ItemStub> {
    let anchor = select_first(item, ITEM_ANCHOR)?;

    let title = anchor
        .value()
        .attr("title")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| Some(element_text(anchor)).filter(|t| !t.is_empty()))?;

    let detail_url = anchor
        .value()
        .attr("href")
        .and_then(|href| resolve_link(href, page_url))?;

    Some(ItemStub {
        title,
        price_text: select_text(item, ITEM_PRICE).unwrap_or_default(),
        availability_text: select_text(item, ITEM_AVAILABILITY).unwrap_or_default(),
        rating_token: select_first(item, ITEM_RATING)
            .map(|rating| rating_from_classes(rating.value().classes()))
            .unwrap_or_default(),
        detail_url,
    })
}

/// Picks the rating level out of a rating element's class list
///
/// The list holds the fixed marker class plus one level class; whichever
/// token is not the marker is the rating. With several candidates the last
/// one wins. With none the rating is empty.
pub fn rating_from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    classes
        .into_iter()
        .filter(|class| *class != RATING_MARKER)
        .last()
        .unwrap_or_default()
        .to_string()
}

/// Parses a detail page into its supplementary fields
pub fn parse_detail_page(html: &str) -> ItemDetail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let description = select_text(root, DETAIL_DESCRIPTION).unwrap_or_default();
    let mut attributes = extract_attribute_table(root);

    ItemDetail {
        description,
        identifier: attributes.remove("UPC").unwrap_or_default(),
        product_type: attributes.remove("Product Type").unwrap_or_default(),
        category: extract_category(root),
    }
}

/// Collects `th` -> `td` pairs from the product information table
fn extract_attribute_table(root: ElementRef<'_>) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    let Ok(row_selector) = Selector::parse(DETAIL_TABLE_ROW) else {
        return attributes;
    };

    for row in root.select(&row_selector) {
        if let (Some(label), Some(value)) = (select_text(row, "th"), select_text(row, "td")) {
            attributes.insert(label, value);
        }
    }

    attributes
}

/// Category is the last breadcrumb link, but only on a trail of at least
/// three entries: Home, one or more categories, then the item itself.
fn extract_category(root: ElementRef<'_>) -> String {
    let (Ok(entry_selector), Ok(link_selector)) = (
        Selector::parse(BREADCRUMB_ENTRY),
        Selector::parse(BREADCRUMB_LINK),
    ) else {
        return String::new();
    };

    if root.select(&entry_selector).count() < MIN_BREADCRUMB_ENTRIES {
        return String::new();
    }

    root.select(&link_selector)
        .last()
        .map(element_text)
        .unwrap_or_default()
}

/// Resolves an href against the page it appeared on
///
/// Returns None for empty, fragment-only and non-HTTP links.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(absolute)
    } else {
        None
    }
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn select_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
