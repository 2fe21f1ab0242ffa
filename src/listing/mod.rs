//! Subreddit listing pagination. Page source trait, shared client, and the fetch loop.

mod client;
mod error;

pub use client::{ListingClient, ListingClientBuilder, DEFAULT_BASE_URL, USER_AGENT};
pub use error::ListingError;

use crate::model::{Cursor, Page};

/// Items requested per page, independent of the caller's limit.
pub const PAGE_SIZE: u32 = 100;

/// Build the listing URL for one page. `subreddit` is embedded as-is, without escaping.
pub fn listing_url(base_url: &str, subreddit: &str, cursor: &Cursor) -> String {
    format!(
        "{}/r/{}/.json?limit={}&after={}",
        base_url,
        subreddit,
        PAGE_SIZE,
        cursor.as_query()
    )
}

/// Progress events reported by [fetch_all].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// About to request this URL.
    Request { url: &'a str },
    /// A page was fetched with this many URLs.
    Batch { count: usize },
    /// The loop finished with this many URLs after truncation.
    Finished { total: usize },
}

/// Options for a fetch run: URL limit (0 = unbounded) and progress callback.
#[derive(Default)]
pub struct FetchOptions<'a> {
    pub limit: usize,
    pub progress: Option<&'a dyn Fn(Progress<'_>)>,
}

impl FetchOptions<'_> {
    fn report(&self, event: Progress<'_>) {
        if let Some(cb) = self.progress {
            cb(event);
        }
    }
}

/// Something that can fetch one listing page. Implemented by [ListingClient]; tests use fakes.
pub trait PageSource {
    /// Scheme and host, without a trailing slash.
    fn base_url(&self) -> &str;

    fn fetch_page(&mut self, url: &str) -> Result<Page, ListingError>;
}

/// Fetch every post URL of `subreddit`, page by page, until the listing ends or the limit is passed.
///
/// The limit is checked after each page is appended, so only a page that pushes the total past
/// `limit` stops the loop; the result is then truncated to exactly `limit`. The first error aborts
/// the run.
pub fn fetch_all<S: PageSource + ?Sized>(
    source: &mut S,
    subreddit: &str,
    options: &FetchOptions<'_>,
) -> Result<Vec<String>, ListingError> {
    let mut results: Vec<String> = Vec::with_capacity(PAGE_SIZE as usize);
    let mut cursor = Cursor::Start;
    while !cursor.is_end() {
        let url = listing_url(source.base_url(), subreddit, &cursor);
        options.report(Progress::Request { url: &url });
        let page = source.fetch_page(&url)?;
        options.report(Progress::Batch {
            count: page.urls.len(),
        });

        results.extend(page.urls);
        cursor = page.next;

        if options.limit > 0 && results.len() > options.limit {
            results.truncate(options.limit);
            break;
        }
    }
    options.report(Progress::Finished {
        total: results.len(),
    });
    Ok(results)
}
