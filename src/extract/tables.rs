//! Table extraction.

use scraper::{ElementRef, Selector};

use super::text::element_text;
use crate::models::ContentItem;

/// Extract a `<table>` element. Returns `None` for tables with no data rows.
pub fn extract_table(table: ElementRef, preserve_styles: bool) -> Option<ContentItem> {
    let caption_sel = Selector::parse("caption").unwrap();
    let thead_tr_sel = Selector::parse("thead tr").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    let caption = table
        .select(&caption_sel)
        .next()
        .map(|c| element_text(c, preserve_styles))
        .filter(|c| !c.is_empty());

    // Headers: thead row first, else a leading all-<th> row.
    let mut headers: Option<Vec<String>> = None;
    let mut header_from_first_row = false;

    if let Some(header_row) = table.select(&thead_tr_sel).next() {
        let cells: Vec<String> = header_row
            .select(&cell_sel)
            .map(|c| element_text(c, preserve_styles))
            .collect();
        if !cells.is_empty() {
            headers = Some(cells);
        }
    }

    let body_rows: Vec<ElementRef> = table
        .select(&tr_sel)
        .filter(|row| !in_thead(*row))
        .collect();

    if headers.is_none() {
        if let Some(first_row) = body_rows.first() {
            let has_th = first_row.select(&th_sel).next().is_some();
            let has_td = first_row.select(&td_sel).next().is_some();
            if has_th && !has_td {
                headers = Some(
                    first_row
                        .select(&th_sel)
                        .map(|c| element_text(c, preserve_styles))
                        .collect(),
                );
                header_from_first_row = true;
            }
        }
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in body_rows.iter().skip(if header_from_first_row { 1 } else { 0 }) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|c| element_text(c, preserve_styles))
            .collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        return None;
    }

    Some(ContentItem::Table {
        caption,
        headers,
        rows,
    })
}

fn in_thead(row: ElementRef) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "thead")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn table_of(html: &str) -> (Option<String>, Option<Vec<String>>, Vec<Vec<String>>) {
        let doc = Html::parse_document(html);
        let sel = Selector::parse("table").unwrap();
        let table = doc.select(&sel).next().expect("fixture table");
        match extract_table(table, false) {
            Some(ContentItem::Table {
                caption,
                headers,
                rows,
            }) => (caption, headers, rows),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_table_with_thead() {
        let (caption, headers, rows) = table_of(
            "<table><caption>Stats</caption>\
             <thead><tr><th>Name</th><th>Count</th></tr></thead>\
             <tbody><tr><td>a</td><td>1</td></tr><tr><td>b</td><td>2</td></tr></tbody></table>",
        );
        assert_eq!(caption.as_deref(), Some("Stats"));
        assert_eq!(headers, Some(vec!["Name".to_string(), "Count".to_string()]));
        assert_eq!(rows, vec![vec!["a", "1"], vec!["b", "2"]]);
    }

    #[test]
    fn test_headers_from_leading_th_row() {
        let (_, headers, rows) = table_of(
            "<table><tr><th>X</th><th>Y</th></tr><tr><td>1</td><td>2</td></tr></table>",
        );
        assert_eq!(headers, Some(vec!["X".to_string(), "Y".to_string()]));
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_headerless_table() {
        let (_, headers, rows) =
            table_of("<table><tr><td>1</td><td>2</td></tr></table>");
        assert!(headers.is_none());
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_empty_table_skipped() {
        let doc = Html::parse_document("<table><thead><tr><th>only headers</th></tr></thead></table>");
        let sel = Selector::parse("table").unwrap();
        let table = doc.select(&sel).next().unwrap();
        assert!(extract_table(table, false).is_none());
    }
}
