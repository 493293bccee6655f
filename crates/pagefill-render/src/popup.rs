// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use pagefill_client::Client;
use pagefill_dom::{Document, NodeId};
use tracing::{debug, warn};

use crate::SOURCE_ATTRIBUTE;

pub const WRAPPER_CLASS: &str = "popup-wrapper";
pub const CONTENT_CLASS: &str = "popup-content";

pub type InitCallback<'a> = &'a mut dyn FnMut(&mut Document, NodeId);

#[derive(Debug)]
pub struct Popup {
    wrapper: NodeId,
    content: NodeId,
    dismissed: bool,
}

impl Popup {
    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    // Dismisses only when the click target is the backdrop wrapper itself;
    // clicks inside the content keep the popup open. Detaches at most once.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if self.dismissed || target != self.wrapper {
            return false;
        }
        doc.detach(self.wrapper);
        self.dismissed = true;
        true
    }
}

// Fetches the trigger's fragment, mounts it under a fresh overlay on the
// document body, then hands the content node to each callback in order so
// nested widgets can be wired once they exist in the document.
pub fn open(
    doc: &mut Document,
    trigger: NodeId,
    client: &Client,
    callbacks: &mut [InitCallback<'_>],
) -> Option<Popup> {
    let Some(link) = doc.attribute(trigger, SOURCE_ATTRIBUTE) else {
        warn!("popup trigger has no {SOURCE_ATTRIBUTE} attribute");
        return None;
    };
    let link = link.to_owned();

    let html = match client.fetch_fragment(&link) {
        Ok(html) => html,
        Err(error) => {
            warn!("fetching popup fragment from {link} failed: {error:#}");
            return None;
        }
    };

    let content = doc.create_element("div");
    doc.set_attribute(content, "class", CONTENT_CLASS);
    doc.set_inner_html(content, &html);

    let wrapper = doc.create_element("div");
    doc.set_attribute(wrapper, "class", WRAPPER_CLASS);
    doc.append_child(wrapper, content);
    let body = doc.body();
    doc.append_child(body, wrapper);
    debug!("opened popup from {link}");

    for callback in callbacks.iter_mut() {
        callback(doc, content);
    }

    Some(Popup {
        wrapper,
        content,
        dismissed: false,
    })
}
