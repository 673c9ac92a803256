use std::fmt::Write as _;

use client_core::CatalogBrowser;
use shared::domain::{Artwork, PAGE_SIZE};

const TITLE_WIDTH: usize = 32;
const ORIGIN_WIDTH: usize = 14;
const ARTIST_WIDTH: usize = 28;
const INSCRIPTION_WIDTH: usize = 20;

/// Shortens `text` to `width` characters on one line.
pub fn fit(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn marker(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn year(value: Option<i64>) -> String {
    value.map(|year| year.to_string()).unwrap_or_default()
}

fn row(out: &mut String, checked: bool, item: &Artwork) {
    let _ = writeln!(
        out,
        "{} {:>8}  {:<tw$}  {:<ow$}  {:<aw$}  {:<iw$}  {:>6}  {:>6}",
        marker(checked),
        item.id,
        fit(&item.title, TITLE_WIDTH),
        fit(item.place_of_origin.as_deref().unwrap_or(""), ORIGIN_WIDTH),
        fit(item.artist_display.as_deref().unwrap_or(""), ARTIST_WIDTH),
        fit(item.inscriptions.as_deref().unwrap_or(""), INSCRIPTION_WIDTH),
        year(item.date_start),
        year(item.date_end),
        tw = TITLE_WIDTH,
        ow = ORIGIN_WIDTH,
        aw = ARTIST_WIDTH,
        iw = INSCRIPTION_WIDTH,
    );
}

pub fn render_screen(browser: &CatalogBrowser, status: &str) -> String {
    let paginator = browser.paginator();
    let mut out = String::new();

    let last_record = (paginator.first() + PAGE_SIZE).min(paginator.total_records());
    let records = if paginator.first() < last_record {
        format!("{}-{}", paginator.first() + 1, last_record)
    } else {
        "none".to_string()
    };
    let _ = write!(
        out,
        "page {}/{}  records {} of {}  selected {}",
        paginator.page_number(),
        paginator.page_count(),
        records,
        paginator.total_records(),
        browser.selection().len(),
    );
    if browser.is_loading() {
        out.push_str("  (loading…)");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "{} {:>8}  {:<tw$}  {:<ow$}  {:<aw$}  {:<iw$}  {:>6}  {:>6}",
        marker(browser.is_select_all()),
        "id",
        "Title",
        "Place of Origin",
        "Artist",
        "Inscriptions",
        "Start",
        "End",
        tw = TITLE_WIDTH,
        ow = ORIGIN_WIDTH,
        aw = ARTIST_WIDTH,
        iw = INSCRIPTION_WIDTH,
    );

    if browser.items().is_empty() {
        out.push_str("    (no rows)\n");
    }
    for item in browser.items() {
        row(&mut out, browser.selection().contains(item.id), item);
    }

    if browser.form().is_open() {
        let _ = writeln!(out, "select rows… > {}", browser.form().value());
    }
    if let Some(error) = browser.last_error() {
        let _ = writeln!(out, "error: {error} (type `reload` to retry)");
    }
    if !status.is_empty() {
        let _ = writeln!(out, "{status}");
    }
    out
}

pub fn render_selection(browser: &CatalogBrowser) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} selected", browser.selection().len());
    for item in browser.selection().items() {
        row(&mut out, true, item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_flattens_and_truncates() {
        assert_eq!(fit("Georges Seurat\nFrench, 1859-1891", 40), "Georges Seurat French, 1859-1891");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 3), "abc");
    }

    #[test]
    fn empty_browser_renders_checked_header_and_placeholder() {
        let screen = render_screen(&CatalogBrowser::default(), "ready");
        assert!(screen.starts_with("page 1/10  records 1-12 of 120  selected 0"));
        assert!(screen.contains("[x]       id"));
        assert!(screen.contains("(no rows)"));
        assert!(screen.ends_with("ready\n"));
    }

    #[test]
    fn empty_catalog_renders_no_record_range() {
        let browser = CatalogBrowser::new(client_core::Paginator::new(0));
        let screen = render_screen(&browser, "");
        assert!(screen.starts_with("page 1/0  records none of 0  selected 0"));
    }
}
