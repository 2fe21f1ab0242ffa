//! Listing data model: the typed shape of one listing response and the page it reduces to.

use serde::Deserialize;

/// Position in a subreddit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Start of the listing; sent as an empty `after` parameter.
    Start,
    /// Opaque token returned by the API, echoed back verbatim.
    After(String),
    /// The API returned no `after` token: there are no more pages.
    End,
}

impl Cursor {
    /// Value for the `after` query parameter.
    pub fn as_query(&self) -> &str {
        match self {
            Cursor::After(token) => token,
            Cursor::Start | Cursor::End => "",
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Cursor::End)
    }
}

impl From<Option<String>> for Cursor {
    /// `null` and empty tokens both end the listing; an empty token would restart it.
    fn from(after: Option<String>) -> Self {
        match after {
            Some(token) if !token.is_empty() => Cursor::After(token),
            _ => Cursor::End,
        }
    }
}

/// One fetched page: post URLs in listing order and the cursor for the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub urls: Vec<String>,
    pub next: Cursor,
}

/// Root of a `/r/<sub>/.json` response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    /// Absent and `null` both decode to `None`.
    #[serde(default)]
    pub after: Option<String>,
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: Post,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub url: String,
}

impl From<Listing> for Page {
    fn from(listing: Listing) -> Self {
        let ListingData { after, children } = listing.data;
        Page {
            urls: children.into_iter().map(|c| c.data.url).collect(),
            next: Cursor::from(after),
        }
    }
}
