//! Paged race index walker
//!
//! The index for one year is split over pages joined by a "next" control.
//! [`Paginator`] fetches those pages on demand and hands out the detail
//! links one at a time, so records are harvested while the index is still
//! being walked.

use super::{Fetcher, Throttle};
use crate::extract::dom::{children_named, selector};
use crate::HarvestError;
use regex::Regex;
use scraper::Html;
use std::collections::VecDeque;
use std::time::Duration;
use url::Url;

/// Links that are themselves date sub-indexes, e.g. `.../2022/12/25/`
const DATE_LINK_PATTERN: &str = r"\d{4}/\d{1,2}/\d{1,2}";

/// What one index page contributes to the sequence
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexPage {
    /// Absolute detail URLs, in page order
    pub links: Vec<String>,
    /// Rejected hrefs (date sub-indexes, unresolvable links)
    pub skipped: Vec<String>,
    /// Absolute URL of the following page
    pub next: Option<String>,
}

/// Lazy, finite sequence of detail URLs for one year
///
/// Pull items with [`next`](Paginator::next); `Ok(None)` marks the end.
/// Index pages are fetched only when the buffered links run out, at most
/// one per throttle delay. A failed index fetch is returned once and ends
/// the sequence. There is no resume cursor: a new walk starts from page 1.
pub struct Paginator {
    fetcher: Fetcher,
    base_url: Url,
    throttle: Throttle,
    date_link: Regex,
    next_page: Option<String>,
    pending: VecDeque<String>,
    pages_fetched: usize,
    skipped: usize,
}

impl Paginator {
    pub fn new(
        fetcher: Fetcher,
        base_url: &str,
        year: i32,
        delay: Duration,
    ) -> Result<Self, HarvestError> {
        let base_url = Url::parse(base_url)?;
        let first_page = index_url(&base_url, year);

        Ok(Self {
            fetcher,
            base_url,
            throttle: Throttle::new(delay),
            date_link: Regex::new(DATE_LINK_PATTERN)?,
            next_page: Some(first_page),
            pending: VecDeque::new(),
            pages_fetched: 0,
            skipped: 0,
        })
    }

    /// Returns the next detail URL, fetching index pages as needed
    pub async fn next(&mut self) -> Result<Option<String>, HarvestError> {
        loop {
            if let Some(link) = self.pending.pop_front() {
                return Ok(Some(link));
            }

            // Taking the page first leaves the walk finished if the fetch fails
            let Some(page_url) = self.next_page.take() else {
                return Ok(None);
            };

            self.throttle.wait().await;
            tracing::debug!("Fetching index page {}", page_url);
            let html = self.fetcher.fetch(&page_url).await?;
            let page = parse_index_page(&html, &self.base_url, &self.date_link)?;
            self.pages_fetched += 1;

            for href in &page.skipped {
                tracing::warn!("wrong url: {}", href);
            }
            tracing::info!(
                "Index page {}: {} links, {} skipped",
                self.pages_fetched,
                page.links.len(),
                page.skipped.len()
            );

            self.skipped += page.skipped.len();
            self.pending.extend(page.links);
            self.next_page = page.next;
        }
    }

    /// Number of index pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of index links rejected so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// URL of the first index page listing the races of `year`
pub fn index_url(base_url: &Url, year: i32) -> String {
    let root = base_url.as_str().trim_end_matches('/');
    format!(
        "{root}/?pid=race_list&word=&start_year={year}&start_mon=none&end_year={year}&end_mon=none&kyori_min=&kyori_max=&sort=date&submit=&page=1"
    )
}

/// Reads detail links and the next-page link from one index page
///
/// Each list entry contributes the href of its last anchor. The next page
/// is the single anchor in the last item of the first pager list; when
/// that item holds no anchor the walk is over.
pub fn parse_index_page(
    html: &str,
    base_url: &Url,
    date_link: &Regex,
) -> Result<IndexPage, HarvestError> {
    let document = Html::parse_document(html);
    let mut page = IndexPage::default();

    for entry in document.select(&selector(".CommonList_01 > li > div")?) {
        let Some(href) = children_named(entry, "a")
            .last()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            continue;
        };

        if date_link.find_iter(href).count() == 1 {
            page.skipped.push(href.to_string());
            continue;
        }

        match base_url.join(href) {
            Ok(url) => page.links.push(url.to_string()),
            Err(_) => page.skipped.push(href.to_string()),
        }
    }

    page.next = document
        .select(&selector(".Icon_SNS_S")?)
        .next()
        .and_then(|pager| children_named(pager, "li").last())
        .and_then(|last_item| {
            let anchors: Vec<_> = children_named(last_item, "a").collect();
            match anchors.as_slice() {
                [anchor] => anchor.value().attr("href"),
                _ => None,
            }
        })
        .and_then(|href| base_url.join(href).ok())
        .map(|url| url.to_string());

    Ok(page)
}
