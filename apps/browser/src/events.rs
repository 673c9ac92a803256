//! Page fetches run off the command loop and report back as events.

use std::sync::Arc;

use client_core::{ArtworkSource, BrowseError, PageRequest};
use shared::protocol::ArtworkPageResponse;
use tokio::sync::mpsc::Sender;

pub enum BrowserEvent {
    PageLoaded {
        request: PageRequest,
        result: Result<ArtworkPageResponse, BrowseError>,
    },
}

pub fn spawn_page_fetch(
    source: Arc<dyn ArtworkSource>,
    request: PageRequest,
    events: Sender<BrowserEvent>,
) {
    tokio::spawn(async move {
        let result = source.fetch_page(request.page_number()).await;
        if events
            .send(BrowserEvent::PageLoaded { request, result })
            .await
            .is_err()
        {
            tracing::debug!(
                page_number = request.page_number(),
                "browser loop gone; dropping page response"
            );
        }
    });
}
