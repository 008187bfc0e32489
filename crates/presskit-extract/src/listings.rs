use crate::error::{ExtractError, Result};
use crate::html::resolve;
use once_cell::sync::Lazy;
use presskit_core::{ListingId, ListingStub};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.search_result_row").expect("valid row selector"));
static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#search_resultsRows, #search_result_container, .search_results_count")
        .expect("valid container selector")
});
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".title").expect("valid title selector"));
static RELEASED_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".search_released").expect("valid release selector"));
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("valid image selector"));

static APP_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/app/(\d+)").expect("App path regex is hardcoded and valid"));

const NO_RESULTS_MARKER: &str = "No results were returned";

/// Parse storefront search result rows into listing stubs.
///
/// An empty vector means the page was a valid results page with no rows
/// (end of results). A page with neither rows nor a results container is
/// reported as [`ExtractError::UnrecognizedPage`].
pub fn parse_listing_rows(html: &str, page_url: &str) -> Result<Vec<ListingStub>> {
    if html.trim().is_empty() {
        return Err(ExtractError::UnrecognizedPage {
            url: page_url.to_string(),
            reason: "empty body".to_string(),
        });
    }

    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let stubs: Vec<ListingStub> = document
        .select(&ROW_SELECTOR)
        .filter_map(|row| parse_row(&row, base.as_ref()))
        .collect();

    if stubs.is_empty()
        && document.select(&ROW_SELECTOR).next().is_none()
        && document.select(&CONTAINER_SELECTOR).next().is_none()
        && !html.contains(NO_RESULTS_MARKER)
    {
        return Err(ExtractError::UnrecognizedPage {
            url: page_url.to_string(),
            reason: "no result rows or results container".to_string(),
        });
    }

    Ok(stubs)
}

fn parse_row(row: &ElementRef, base: Option<&Url>) -> Option<ListingStub> {
    let href = row.value().attr("href").unwrap_or_default();

    let raw_id = row
        .value()
        .attr("data-ds-appid")
        .and_then(|ids| ids.split(',').next())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| APP_PATH.captures(href).map(|c| c[1].to_string()));

    let Some(id) = raw_id.and_then(|id| ListingId::new(id).ok()) else {
        tracing::debug!(href, "skipping result row without listing id");
        return None;
    };

    let detail_url = resolve(base, href).map_or_else(
        || href.to_string(),
        |mut url| {
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        },
    );

    let title = text_of(row, &TITLE_SELECTOR).unwrap_or_else(|| id.to_string());
    let release_date = text_of(row, &RELEASED_SELECTOR).unwrap_or_default();
    let thumbnail_url = row
        .select(&IMAGE_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    Some(ListingStub {
        id,
        title,
        release_date,
        detail_url,
        thumbnail_url,
    })
}

fn text_of(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}
