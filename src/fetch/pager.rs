//! Lazy follow-the-link pagination over one list resource.

use log::debug;
use std::iter::FusedIterator;

use crate::error::FetchError;
use crate::types::{Item, Page};

use super::transport::{Transport, fetch_json};

/// Iterator over every item of a paginated resource.
///
/// A page is fetched only when the items of the previous one are used up. The cursor is the
/// page's `next` link; an empty link ends iteration. A failed fetch yields that error once and
/// then the iterator is exhausted.
pub struct Pager<'a> {
    transport: &'a dyn Transport,
    cursor: Option<String>,
    buffered: std::vec::IntoIter<Item>,
    pages_fetched: u64,
}

/// Start paging at `start_url`. Nothing is fetched until the first `next()`.
pub fn fetch_all<'a>(transport: &'a dyn Transport, start_url: &str) -> Pager<'a> {
    Pager {
        transport,
        cursor: Some(start_url.to_string()),
        buffered: Vec::new().into_iter(),
        pages_fetched: 0,
    }
}

impl Pager<'_> {
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    fn fetch_next_page(&mut self) -> Option<Result<(), FetchError>> {
        let url = self.cursor.take().filter(|u| !u.is_empty())?;
        let page: Page = match fetch_json(self.transport, &url) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };
        self.pages_fetched += 1;
        debug!(
            "page {} of {}: {} items (total {}) from {}",
            self.pages_fetched,
            page.page_count,
            page.items.len(),
            page.total_count,
            url
        );
        self.cursor = page.next_link().map(str::to_string);
        self.buffered = page.items.into_iter();
        Some(Ok(()))
    }
}

impl Iterator for Pager<'_> {
    type Item = Result<Item, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }
            // Empty pages are skipped; the loop keeps following the link.
            if let Err(e) = self.fetch_next_page()? {
                return Some(Err(e));
            }
        }
    }
}

impl FusedIterator for Pager<'_> {}
