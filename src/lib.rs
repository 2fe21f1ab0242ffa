//! redditurls: CLI that lists the post urls of a subreddit by walking its paginated JSON listing.

pub mod cli;
pub mod config;
pub mod listing;
pub mod model;
pub mod output;

// Re-exports for CLI and consumers.
pub use listing::{
    fetch_all, listing_url, FetchOptions, ListingClient, ListingClientBuilder, ListingError,
    PageSource, Progress,
};
pub use model::{Cursor, Page};
pub use output::{write_lines, OutputError, OutputTarget};
