//! Category extraction from the catalog root page.
//!
//! The root page lists categories as menu anchors:
//! `<a href="javascript:void(0);" data-menuid="ID">NAME</a>`.
//! Matches come back in document order with identifier and name taken
//! verbatim from the page source, entities untouched. Markup changes yield
//! fewer or zero matches, never an error.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use scraper::{Html, Selector};
use shared::ScrapeMode;

/// Anchor pattern used by [`ScrapeMode::Pattern`]
pub const CATEGORY_PATTERN: &str =
    r#"<a\shref="javascript:void\(0\);".*?data-menuid="(.*?)".*?>(.*?)</a>"#;

static CATEGORY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(CATEGORY_PATTERN).expect("category pattern is valid"));

static MENU_ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href="javascript:void(0);"][data-menuid]"#)
        .expect("menu anchor selector is valid")
});

/// Any anchor in the source: raw start tag and raw content up to `</a>`
static SOURCE_ANCHOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(<a\b[^>]*>)(.*?)</a\s*>").expect("source anchor pattern is valid")
});

/// Raw `data-menuid` value inside a start tag, in any quoting style
static MENU_ID_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sdata-menuid\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("menu id attribute pattern is valid")
});

/// One scraped `(identifier, name)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub id: String,
    pub name: String,
}

/// Extract category links with the given strategy
pub fn extract_categories(html: &[u8], mode: ScrapeMode) -> Vec<CategoryLink> {
    let links = match mode {
        ScrapeMode::Dom => extract_with_dom(html),
        ScrapeMode::Pattern => extract_with_pattern(html),
    };

    tracing::debug!(mode = mode.as_str(), found = links.len(), "Extracted category links");
    links
}

/// A menu anchor as written in the page source
struct SourceAnchor {
    /// Attribute value after the parser's entity decoding, for matching
    decoded_id: String,
    link: CategoryLink,
}

/// Parse the page and select menu anchors by attribute.
///
/// The parsed document decides which anchors count and in what order. The
/// identifier and name of each one are then read from the page source, so
/// entities and inner markup come back exactly as written. An anchor whose
/// source text cannot be located falls back to the parsed values.
pub fn extract_with_dom(html: &[u8]) -> Vec<CategoryLink> {
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);
    let sources = source_anchors(html);
    let mut cursor = 0;

    document
        .select(&MENU_ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let id = anchor.value().attr("data-menuid")?;

            let found = sources[cursor..]
                .iter()
                .position(|source| source.decoded_id == id);
            match found {
                Some(offset) => {
                    let source = &sources[cursor + offset];
                    cursor += offset + 1;
                    Some(source.link.clone())
                }
                None => {
                    tracing::debug!(id = id, "Menu anchor not found in page source, using parsed text");
                    Some(CategoryLink {
                        id: id.to_string(),
                        name: anchor.inner_html(),
                    })
                }
            }
        })
        .collect()
}

/// Menu anchors found by scanning the raw source, in document order
fn source_anchors(html: &[u8]) -> Vec<SourceAnchor> {
    SOURCE_ANCHOR_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let start_tag = &caps[1];
            let raw_id = MENU_ID_ATTR_REGEX.captures(start_tag)?;
            let raw_id = raw_id.get(1).or(raw_id.get(2)).or(raw_id.get(3))?;

            // Let the parser judge the start tag so matching follows the selector
            let fragment = Html::parse_fragment(&String::from_utf8_lossy(start_tag));
            let decoded_id = fragment
                .select(&MENU_ANCHOR_SELECTOR)
                .next()?
                .value()
                .attr("data-menuid")?
                .to_string();

            Some(SourceAnchor {
                decoded_id,
                link: CategoryLink {
                    id: String::from_utf8_lossy(raw_id.as_bytes()).into_owned(),
                    name: String::from_utf8_lossy(&caps[2]).into_owned(),
                },
            })
        })
        .collect()
}

/// Match the raw page bytes against [`CATEGORY_PATTERN`]
pub fn extract_with_pattern(html: &[u8]) -> Vec<CategoryLink> {
    CATEGORY_REGEX
        .captures_iter(html)
        .map(|caps| CategoryLink {
            id: String::from_utf8_lossy(&caps[1]).into_owned(),
            name: String::from_utf8_lossy(&caps[2]).into_owned(),
        })
        .collect()
}
