// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use pagefill_client::{Record, display_value};
use pagefill_dom::{Document, NodeId};
use tracing::debug;

pub fn render_by_id(doc: &mut Document, table_id: &str, records: &[Record]) -> Result<()> {
    let Some(table) = doc.element_by_id(table_id) else {
        bail!("no element with id {table_id:?}");
    };
    render(doc, table, records)
}

// Precondition: records are homogeneous -- the header comes from the first
// record's field order. A record missing a header field renders an empty
// cell; fields absent from the first record are ignored.
pub fn render(doc: &mut Document, table: NodeId, records: &[Record]) -> Result<()> {
    match doc.tag(table) {
        Some("table") => {}
        Some(tag) => bail!("target element is a <{tag}>, not a <table>"),
        None => bail!("target node is not an element"),
    }
    let Some(thead) = doc.first_by_tag(table, "thead") else {
        bail!("table has no thead element");
    };
    let Some(tbody) = doc.first_by_tag(table, "tbody") else {
        bail!("table has no tbody element");
    };

    // every bail above precedes mutation: a failed render leaves the table as-is
    doc.clear_children(thead);
    doc.clear_children(tbody);

    let Some(first) = records.first() else {
        return Ok(());
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    let header_row = doc.create_element("tr");
    for column in &columns {
        let cell = doc.create_element("th");
        let text = doc.create_text(column);
        doc.append_child(cell, text);
        doc.append_child(header_row, cell);
    }
    doc.append_child(thead, header_row);

    for record in records {
        let row = doc.create_element("tr");
        for column in &columns {
            let cell = doc.create_element("td");
            let value = record.get(column).map(display_value).unwrap_or_default();
            let text = doc.create_text(&value);
            doc.append_child(cell, text);
            doc.append_child(row, cell);
        }
        doc.append_child(tbody, row);
    }

    debug!(
        "rendered {} rows over {} columns",
        records.len(),
        columns.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render, render_by_id};
    use anyhow::Result;
    use pagefill_client::Record;
    use pagefill_dom::{Document, NodeId};
    use serde_json::{Value, json};

    const TABLE: &str = "<table id=\"t\"><thead></thead><tbody></tbody></table>";

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn row_texts(doc: &Document, row: NodeId) -> Vec<String> {
        doc.children(row)
            .iter()
            .map(|cell| doc.text_content(*cell))
            .collect()
    }

    #[test]
    fn renders_header_from_first_record_and_one_row_per_record() -> Result<()> {
        let mut doc = Document::from_body_fragment(TABLE);
        let records = vec![
            record(json!({"type": "repair", "submitter": "Avery", "cost": 120})),
            record(json!({"type": "install", "submitter": "Jordan", "cost": null})),
        ];
        render_by_id(&mut doc, "t", &records)?;

        let table = doc.element_by_id("t").expect("table exists");
        let thead = doc.first_by_tag(table, "thead").expect("thead exists");
        let tbody = doc.first_by_tag(table, "tbody").expect("tbody exists");

        let header_rows = doc.children(thead);
        assert_eq!(header_rows.len(), 1);
        assert_eq!(
            row_texts(&doc, header_rows[0]),
            vec!["type", "submitter", "cost"]
        );

        let body_rows = doc.children(tbody);
        assert_eq!(body_rows.len(), 2);
        assert_eq!(row_texts(&doc, body_rows[0]), vec!["repair", "Avery", "120"]);
        assert_eq!(row_texts(&doc, body_rows[1]), vec!["install", "Jordan", ""]);
        Ok(())
    }

    #[test]
    fn empty_records_clear_previous_content() -> Result<()> {
        let mut doc = Document::from_body_fragment(TABLE);
        let records = vec![record(json!({"a": 1}))];
        render_by_id(&mut doc, "t", &records)?;
        render_by_id(&mut doc, "t", &[])?;

        let table = doc.element_by_id("t").expect("table exists");
        let thead = doc.first_by_tag(table, "thead").expect("thead exists");
        let tbody = doc.first_by_tag(table, "tbody").expect("tbody exists");
        assert!(doc.children(thead).is_empty());
        assert!(doc.children(tbody).is_empty());
        Ok(())
    }

    #[test]
    fn second_render_fully_replaces_first() -> Result<()> {
        let mut doc = Document::from_body_fragment(TABLE);
        render_by_id(&mut doc, "t", &[record(json!({"a": 1, "b": 2}))])?;
        render_by_id(
            &mut doc,
            "t",
            &[
                record(json!({"name": "x"})),
                record(json!({"name": "y"})),
            ],
        )?;

        let table = doc.element_by_id("t").expect("table exists");
        let thead = doc.first_by_tag(table, "thead").expect("thead exists");
        let tbody = doc.first_by_tag(table, "tbody").expect("tbody exists");
        assert_eq!(row_texts(&doc, doc.children(thead)[0]), vec!["name"]);
        assert_eq!(doc.children(tbody).len(), 2);
        Ok(())
    }

    #[test]
    fn missing_keys_render_empty_cells_and_extra_keys_are_ignored() -> Result<()> {
        let mut doc = Document::from_body_fragment(TABLE);
        let records = vec![
            record(json!({"a": 1, "b": 2})),
            record(json!({"a": 3, "c": 9})),
        ];
        render_by_id(&mut doc, "t", &records)?;

        let table = doc.element_by_id("t").expect("table exists");
        let tbody = doc.first_by_tag(table, "tbody").expect("tbody exists");
        let rows = doc.children(tbody);
        assert_eq!(row_texts(&doc, rows[0]), vec!["1", "2"]);
        assert_eq!(row_texts(&doc, rows[1]), vec!["3", ""]);
        Ok(())
    }

    #[test]
    fn unknown_table_id_fails_fast() {
        let mut doc = Document::from_body_fragment(TABLE);
        let error = render_by_id(&mut doc, "nope", &[]).expect_err("missing id should fail");
        assert!(error.to_string().contains("no element with id"));
    }

    #[test]
    fn table_without_thead_or_tbody_fails_fast() {
        let mut doc = Document::from_body_fragment("<table id=\"bare\"></table>");
        let error = render_by_id(&mut doc, "bare", &[]).expect_err("bare table should fail");
        assert!(error.to_string().contains("no thead"));

        let mut doc = Document::from_body_fragment("<table id=\"h\"><thead></thead></table>");
        let error = render_by_id(&mut doc, "h", &[]).expect_err("missing tbody should fail");
        assert!(error.to_string().contains("no tbody"));
    }

    #[test]
    fn non_table_element_fails_fast() {
        let mut doc = Document::from_body_fragment("<div id=\"d\"></div>");
        let target = doc.element_by_id("d").expect("div exists");
        let error = render(&mut doc, target, &[]).expect_err("div target should fail");
        assert!(error.to_string().contains("not a <table>"));
    }
}
