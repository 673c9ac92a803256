//! Client-side core of the catalog browser: the HTTP page source, the
//! cross-page selection and the table view-controller that ties them to a
//! paginator.

pub mod browser;
pub mod error;
pub mod paginator;
pub mod selection;
pub mod source;

pub use browser::{
    BulkSelectForm, BulkSelectOutcome, CatalogBrowser, PageLoadOutcome, PageRequest, RowCount,
};
pub use error::BrowseError;
pub use paginator::Paginator;
pub use selection::{is_page_fully_selected, SelectionSet};
pub use source::{ArtworkSource, HttpArtworkSource};

#[cfg(test)]
#[path = "tests/test_support.rs"]
pub(crate) mod test_support;
