// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use pagefill_client::{Client, Record};
use pagefill_dom::Document;
use tracing::{debug, error};

use crate::table;

// Typed seam for hosts that want to react to failures themselves.
pub fn try_load(
    doc: &mut Document,
    table_id: &str,
    client: &Client,
    url: &str,
    query: Option<&str>,
) -> Result<Vec<Record>> {
    // fetch before touching the document: a failed request leaves the table as-is
    let records = client.fetch_records(url, query)?;
    table::render_by_id(doc, table_id, &records)?;
    Ok(records)
}

// Never raises: any failure is logged and yields None with the table
// untouched. On success the parsed records come back for further use.
pub fn load(
    doc: &mut Document,
    table_id: &str,
    client: &Client,
    url: &str,
    query: Option<&str>,
) -> Option<Vec<Record>> {
    match try_load(doc, table_id, client, url, query) {
        Ok(records) => {
            debug!("loaded {} records into table {table_id:?}", records.len());
            Some(records)
        }
        Err(error) => {
            error!("loading table {table_id:?} from {url} failed: {error:#}");
            None
        }
    }
}
