use crate::acquire::selector;
use crate::{Error, Result};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

/// CSS selectors locating the featured article on the news page.
///
/// `featured` is matched against the whole document and only its first
/// match is used. The other selectors are matched inside that element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSchema {
    #[serde(default = "FeedSchema::default_featured")]
    pub featured: String,
    #[serde(default = "FeedSchema::default_link")]
    pub link: String,
    #[serde(default = "FeedSchema::default_title")]
    pub title: String,
    #[serde(default = "FeedSchema::default_summary")]
    pub summary: String,
    #[serde(default = "FeedSchema::default_image")]
    pub image: String,
}

impl FeedSchema {
    fn default_featured() -> String {
        ".featured".to_string()
    }

    fn default_link() -> String {
        "a[href]".to_string()
    }

    fn default_title() -> String {
        "h1, h2, h3, .title".to_string()
    }

    fn default_summary() -> String {
        "p".to_string()
    }

    fn default_image() -> String {
        "img[src]".to_string()
    }
}

impl Default for FeedSchema {
    fn default() -> Self {
        Self {
            featured: Self::default_featured(),
            link: Self::default_link(),
            title: Self::default_title(),
            summary: Self::default_summary(),
            image: Self::default_image(),
        }
    }
}

/// The featured article, with site-relative links made absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    /// Canonical identity used for deduplication.
    pub url: String,
    pub summary: String,
    pub image_url: Option<String>,
}

/// Find the featured item. `Ok(None)` means the page has nothing featured.
pub fn extract_featured(html: &str, schema: &FeedSchema, site_root: &str) -> Result<Option<NewsItem>> {
    let document = Html::parse_document(html);
    let featured_sel = selector(&schema.featured)?;
    let link_sel = selector(&schema.link)?;
    let title_sel = selector(&schema.title)?;
    let summary_sel = selector(&schema.summary)?;
    let image_sel = selector(&schema.image)?;

    let Some(featured) = document.select(&featured_sel).next() else {
        return Ok(None);
    };

    let link = featured
        .select(&link_sel)
        .next()
        .ok_or_else(|| Error::parse("featured item has no link"))?;
    let href = link
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| Error::parse("featured item link has no href"))?;

    let title = featured
        .select(&title_sel)
        .next()
        .map_or_else(|| squash(link), squash);
    let summary = featured
        .select(&summary_sel)
        .next()
        .map(squash)
        .unwrap_or_default();
    let image_url = featured
        .select(&image_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(|src| canonical_url(site_root, src));

    Ok(Some(NewsItem {
        title,
        url: canonical_url(site_root, href),
        summary,
        image_url,
    }))
}

/// Join a site root and a relative link with exactly one `/` between them.
/// Links that are already absolute are returned unchanged.
#[must_use]
pub fn canonical_url(site_root: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        site_root.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

fn squash(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
