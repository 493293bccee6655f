// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use pagefill_dom::Document;
use serde::Serialize;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server};

pub const TICKET_TABLE_ID: &str = "tickets-table";
pub const TYPE_SELECT_ID: &str = "ticket-type";
pub const ASSIGNEE_SELECT_ID: &str = "ticket-assignee";
pub const POPUP_TRIGGER_ID: &str = "new-ticket-button";

// The landing page the utilities operate on in tests: an empty ticket
// table, two dropdowns awaiting a data-link, and a popup trigger.
pub fn ticket_page() -> Document {
    Document::from_body_fragment(concat!(
        "<h1>Open requests</h1>",
        "<table id=\"tickets-table\"><thead></thead><tbody></tbody></table>",
        "<div id=\"filters\">",
        "<select id=\"ticket-type\"></select>",
        "<select id=\"ticket-assignee\"></select>",
        "</div>",
        "<a id=\"new-ticket-button\">New ticket</a>",
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    #[serde(rename = "type")]
    pub kind: String,
    pub submitter: String,
    pub submitted: String,
    pub due_date: String,
    pub due_date_reason: Option<String>,
}

pub fn sample_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            kind: "repair".to_owned(),
            submitter: "Avery Walker".to_owned(),
            submitted: "2026-07-28".to_owned(),
            due_date: "2026-08-04".to_owned(),
            due_date_reason: Some("tenant move-in".to_owned()),
        },
        Ticket {
            kind: "install".to_owned(),
            submitter: "Jordan Hill".to_owned(),
            submitted: "2026-07-30".to_owned(),
            due_date: "2026-08-15".to_owned(),
            due_date_reason: None,
        },
        Ticket {
            kind: "inspection".to_owned(),
            submitter: "Riley Evans".to_owned(),
            submitted: "2026-08-01".to_owned(),
            due_date: "2026-08-08".to_owned(),
            due_date_reason: Some("insurance renewal".to_owned()),
        },
    ]
}

pub fn tickets_json(tickets: &[Ticket]) -> Result<String> {
    serde_json::to_string(tickets).map_err(|error| anyhow!("encode tickets: {error}"))
}

pub struct MockEndpoint {
    pub url: String,
    handle: JoinHandle<()>,
}

impl MockEndpoint {
    pub fn finish(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| anyhow!("mock endpoint thread panicked"))
    }
}

pub fn serve_json(status: u16, body: &str) -> Result<MockEndpoint> {
    serve(status, "application/json", body)
}

pub fn serve_html(body: &str) -> Result<MockEndpoint> {
    serve(200, "text/html", body)
}

// One-shot endpoint on an ephemeral port; gives up quietly if the test
// never connects so finish() cannot hang.
pub fn serve(status: u16, content_type: &str, body: &str) -> Result<MockEndpoint> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock endpoint: {error}"))?;
    let url = format!("http://{}/", server.server_addr());
    let content_type = Header::from_bytes("Content-Type", content_type)
        .map_err(|()| anyhow!("invalid content type header"))?;
    let body = body.to_owned();

    let handle = thread::spawn(move || {
        if let Ok(Some(request)) = server.recv_timeout(Duration::from_secs(5)) {
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(content_type);
            let _ = request.respond(response);
        }
    });
    Ok(MockEndpoint { url, handle })
}

// An address that actively refuses connections.
pub fn refused_url() -> String {
    "http://127.0.0.1:1/".to_owned()
}
