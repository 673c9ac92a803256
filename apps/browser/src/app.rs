//! Command loop: owns the browser state, reads commands from stdin and applies
//! page responses delivered by spawned fetches.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_core::{
    ArtworkSource, CatalogBrowser, HttpArtworkSource, PageLoadOutcome, Paginator,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::{self, Sender},
};
use tracing::{debug, error, info, warn};

use crate::{
    commands::{BrowserCommand, HELP},
    config::Settings,
    events::{spawn_page_fetch, BrowserEvent},
    render::{render_screen, render_selection},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    browser: CatalogBrowser,
    source: Arc<dyn ArtworkSource>,
    events: Sender<BrowserEvent>,
    status: String,
}

impl Session {
    pub fn new(
        browser: CatalogBrowser,
        source: Arc<dyn ArtworkSource>,
        events: Sender<BrowserEvent>,
    ) -> Self {
        Self {
            browser,
            source,
            events,
            status: String::new(),
        }
    }

    pub fn browser(&self) -> &CatalogBrowser {
        &self.browser
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn request_page(&mut self, index: usize) {
        match self.browser.begin_page_load(index) {
            Ok(request) => {
                self.status.clear();
                spawn_page_fetch(Arc::clone(&self.source), request, self.events.clone());
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn request_reload(&mut self) {
        self.request_page(self.browser.page_index());
    }

    pub fn apply_event(&mut self, event: BrowserEvent) {
        match event {
            BrowserEvent::PageLoaded { request, result } => {
                match self.browser.finish_page_load(request, result) {
                    Ok(PageLoadOutcome::Applied { rows }) => {
                        debug!(page_number = request.page_number(), rows, "page applied");
                    }
                    Ok(PageLoadOutcome::Discarded) => {}
                    Err(err) => {
                        error!(page_number = request.page_number(), error = %err, "page load failed");
                        self.status = format!("page {} failed to load", request.page_number());
                    }
                }
            }
        }
    }

    pub async fn handle(&mut self, command: BrowserCommand) -> Flow {
        match command {
            BrowserCommand::Next => match self.browser.paginator().next_index() {
                Some(index) => self.request_page(index),
                None => self.status = "already on the last page".into(),
            },
            BrowserCommand::Prev => match self.browser.paginator().prev_index() {
                Some(index) => self.request_page(index),
                None => self.status = "already on the first page".into(),
            },
            BrowserCommand::Page(number) => self.request_page(number - 1),
            BrowserCommand::Reload => self.request_reload(),
            BrowserCommand::Toggle(id) => {
                self.status = match self.browser.toggle_item(id) {
                    Some(true) => format!("selected {id}"),
                    Some(false) => format!("deselected {id}"),
                    None => format!("no row with id {id} on this page"),
                };
            }
            BrowserCommand::SelectPage => {
                let added = self.browser.set_page_selected(true);
                self.status = format!("selected {added} rows on this page");
            }
            BrowserCommand::ClearPage => {
                let removed = self.browser.set_page_selected(false);
                self.status = format!("deselected {removed} rows on this page");
            }
            BrowserCommand::ToggleRowsOverlay => {
                self.browser.form_mut().toggle();
                self.status.clear();
            }
            BrowserCommand::Input(value) => {
                if self.browser.form().is_open() {
                    self.browser.form_mut().set_value(value);
                    self.status.clear();
                } else {
                    self.status = "the select-rows box is closed; type `rows` first".into();
                }
            }
            BrowserCommand::Submit => {
                if self.browser.form().is_open() {
                    self.submit_rows().await;
                } else {
                    self.status = "the select-rows box is closed; type `rows` first".into();
                }
            }
            BrowserCommand::SelectRows(value) => {
                let form = self.browser.form_mut();
                form.open();
                form.set_value(value);
                self.submit_rows().await;
            }
            BrowserCommand::ShowSelected => self.status = render_selection(&self.browser),
            BrowserCommand::Help => self.status = HELP.to_string(),
            BrowserCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn submit_rows(&mut self) {
        match self.browser.submit_bulk_select(self.source.as_ref()).await {
            Ok(outcome) => {
                self.status = format!(
                    "added {} of the first {} rows ({} pages fetched)",
                    outcome.added,
                    outcome.requested,
                    outcome.fetched_pages.len()
                );
            }
            Err(err) => {
                warn!(error = %err, "select rows failed");
                self.status = format!("select rows failed: {}", err.to_api_error());
            }
        }
    }
}

pub async fn run(settings: &Settings, start_index: usize) -> Result<()> {
    let source = HttpArtworkSource::new(&settings.endpoint)
        .with_context(|| format!("invalid endpoint '{}'", settings.endpoint))?;
    info!(endpoint = %source.endpoint(), total_records = settings.total_records, "starting browser");

    let (event_tx, mut event_rx) = mpsc::channel::<BrowserEvent>(32);
    let browser = CatalogBrowser::new(Paginator::new(settings.total_records));
    let mut session = Session::new(browser, Arc::new(source), event_tx);
    session.request_page(start_index);
    print!("{}", render_screen(session.browser(), session.status()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => {
                session.apply_event(event);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                let flow = match BrowserCommand::parse(&line) {
                    Ok(command) => session.handle(command).await,
                    Err(message) => {
                        session.status = message;
                        Flow::Continue
                    }
                };
                if flow == Flow::Quit {
                    break;
                }
            }
        }
        print!("{}", render_screen(session.browser(), session.status()));
    }

    info!(selected = session.browser().selection().len(), "browser closed");
    Ok(())
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
