// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use pagefill_client::Client;
use pagefill_dom::{Document, NodeId};
use tracing::{debug, warn};

use crate::SOURCE_ATTRIBUTE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub filled: usize,
    pub failed: usize,
}

// Additive: pre-existing options are kept. Dropdowns are processed one at
// a time in document order, and one endpoint failing never stops the rest.
pub fn populate(doc: &mut Document, container: NodeId, client: &Client) -> PopulateReport {
    let sourced: Vec<(NodeId, String)> = doc
        .descendants(container)
        .filter(|&node| doc.tag(node) == Some("select"))
        .filter_map(|node| {
            doc.attribute(node, SOURCE_ATTRIBUTE)
                .map(|link| (node, link.to_owned()))
        })
        .collect();

    let mut report = PopulateReport::default();
    for (select, link) in sourced {
        match client.fetch_values(&link) {
            Ok(values) => {
                append_options(doc, select, &values);
                debug!("appended {} options from {link}", values.len());
                report.filled += 1;
            }
            Err(error) => {
                warn!("populating dropdown from {link} failed: {error:#}");
                report.failed += 1;
            }
        }
    }
    report
}

fn append_options(doc: &mut Document, select: NodeId, values: &[String]) {
    for value in values {
        let option = doc.create_element("option");
        doc.set_attribute(option, "value", value);
        let text = doc.create_text(value);
        doc.append_child(option, text);
        doc.append_child(select, option);
    }
}
