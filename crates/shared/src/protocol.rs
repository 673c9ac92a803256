use serde::{Deserialize, Serialize};

use crate::domain::Artwork;

/// Body of `GET <endpoint>?page=<n>`. Only `data` drives the browser; the
/// rest of the envelope is ignored apart from `pagination`, which is kept for
/// diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkPageResponse {
    pub data: Vec<Artwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default)]
    pub total: Option<u64>,
}

/// Query string sent with every page request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageQuery {
    pub page: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtworkId;

    #[test]
    fn decodes_catalog_envelope_with_nulls_and_extra_fields() {
        let raw = r#"{
            "pagination": {"total": 128000, "limit": 12, "offset": 0, "total_pages": 10667,
                           "current_page": 1, "next_url": "https://example.test?page=2"},
            "data": [
                {"id": 27992, "title": "A Sunday on La Grande Jatte", "place_of_origin": "France",
                 "artist_display": "Georges Seurat", "inscriptions": null,
                 "date_start": 1884, "date_end": 1886, "image_id": "abc"},
                {"id": 4, "title": "Priest and Boy"}
            ],
            "info": {"license_text": "..."},
            "config": {"iiif_url": "https://example.test"}
        }"#;

        let page: ArtworkPageResponse = serde_json::from_str(raw).expect("decode page");
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, ArtworkId(27992));
        assert_eq!(page.data[0].date_end, Some(1886));
        assert_eq!(page.data[0].inscriptions, None);
        assert_eq!(page.data[1].artist_display, None);
        assert_eq!(
            page.pagination.and_then(|pagination| pagination.total),
            Some(128000)
        );
    }

    #[test]
    fn missing_pagination_block_is_accepted() {
        let page: ArtworkPageResponse =
            serde_json::from_str(r#"{"data": []}"#).expect("decode empty page");
        assert!(page.data.is_empty());
        assert!(page.pagination.is_none());
    }

    #[test]
    fn page_query_serializes_single_page_parameter() {
        let value = serde_json::to_value(PageQuery { page: 3 }).expect("encode query");
        assert_eq!(value, serde_json::json!({"page": 3}));
    }
}
