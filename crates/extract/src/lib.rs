//! HTML parsing and talk extraction for General Conference pages.
//!
//! Scraping is inherently coupled to the source site's markup and will break
//! on a redesign. This crate keeps all of that coupling behind two narrow
//! interfaces:
//! - [`index`] turns index/conference pages into lists of links and
//!   [`index::SessionListing`]s, and
//! - [`TalkPage`] turns one talk page into a [`models::TalkRecord`].
//!
//! Everything downstream (entity resolution, model building, export) only
//! ever sees those types.

mod clean;
mod consts;
pub mod error;
pub mod index;
pub mod models;
mod talk;

pub use crate::clean::{clean, clean_line};
pub use crate::talk::TalkPage;

use crate::error::Result;
use crate::models::TalkRecord;

/// Top-level entrypoint: parse one talk page's HTML into a [`TalkRecord`].
///
/// Returns `Ok(None)` for pages that share the talk URL scheme but are not
/// talks (session recordings, sustainings, administrative reports).
pub fn parse_talk(html: &str, page_url: &str) -> Result<Option<TalkRecord>> {
    TalkPage::from_html(html).record(page_url)
}
