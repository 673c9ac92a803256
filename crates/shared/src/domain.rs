use serde::{Deserialize, Serialize};

/// Rows served per page by the catalog endpoint. Not negotiable with the source.
pub const PAGE_SIZE: usize = 12;

/// Record count the paginator assumes when nothing else is configured.
pub const DEFAULT_TOTAL_RECORDS: usize = 120;

pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(ArtworkId);

/// One catalog record. Display attributes are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Artwork {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: ArtworkId(id),
            title: title.into(),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}

/// Number of pages needed to show `total_records` rows.
pub fn page_count(total_records: usize) -> usize {
    total_records.div_ceil(PAGE_SIZE)
}
