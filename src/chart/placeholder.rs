//! Chart containers and the loading/error markup shown in them
//!
//! A [`Document`] is the set of named containers charts are drawn into. The
//! placeholder functions write into it and quietly do nothing when a container
//! is missing.

use crate::consts::dashboard_consts::DEFAULT_ERROR_MESSAGE;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Named containers holding chart markup.
pub trait Document: Send + Sync {
    fn contains(&self, container_id: &str) -> bool;

    /// Replaces the container's contents. Returns false if it does not exist.
    fn set_inner_html(&self, container_id: &str, html: String) -> bool;

    #[cfg(test)]
    fn inner_html(&self, container_id: &str) -> Option<String>;
}

/// In-memory document with a fixed set of containers.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    title: String,
    containers: Mutex<BTreeMap<String, String>>,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            containers: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn with_containers<I, S>(title: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let document = Self::new(title);
        for id in ids {
            document.add_container(id);
        }
        document
    }

    pub fn add_container(&self, container_id: impl Into<String>) {
        if let Ok(mut containers) = self.containers.lock() {
            containers.entry(container_id.into()).or_default();
        }
    }

    pub fn container_count(&self) -> usize {
        self.containers.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Renders the whole page, one `<div>` per container.
    pub fn to_html(&self) -> String {
        let mut body = String::new();
        if let Ok(containers) = self.containers.lock() {
            for (id, html) in containers.iter() {
                body.push_str(&format!(
                    "    <section class=\"chart-card\">\n      <div id=\"{}\">{}</div>\n    </section>\n",
                    escape_html(id),
                    html
                ));
            }
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"pt\">\n  <head>\n    <meta charset=\"utf-8\">\n    <title>{}</title>\n  </head>\n  <body>\n{}  </body>\n</html>\n",
            escape_html(&self.title),
            body
        )
    }
}

impl Document for MemoryDocument {
    fn contains(&self, container_id: &str) -> bool {
        self.containers
            .lock()
            .map(|c| c.contains_key(container_id))
            .unwrap_or(false)
    }

    fn set_inner_html(&self, container_id: &str, html: String) -> bool {
        let Ok(mut containers) = self.containers.lock() else {
            return false;
        };
        match containers.get_mut(container_id) {
            Some(slot) => {
                *slot = html;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn inner_html(&self, container_id: &str) -> Option<String> {
        self.containers
            .lock()
            .ok()
            .and_then(|c| c.get(container_id).cloned())
    }
}

pub fn show_loading(document: &dyn Document, container_id: &str) {
    let html = r#"
<div class="d-flex justify-content-center align-items-center" style="height: 100%;">
    <div class="spinner-border text-primary" role="status">
        <span class="visually-hidden">A carregar...</span>
    </div>
</div>
"#;
    if !document.set_inner_html(container_id, html.to_string()) {
        debug!("No container '{}' for loading placeholder", container_id);
    }
}

pub fn show_error(document: &dyn Document, container_id: &str, message: Option<&str>) {
    let message = escape_html(message.unwrap_or(DEFAULT_ERROR_MESSAGE));
    let html = format!(
        r#"
<div class="d-flex justify-content-center align-items-center" style="height: 100%;">
    <div class="text-muted">
        <i class="fas fa-exclamation-triangle me-2"></i>
        {}
    </div>
</div>
"#,
        message
    );
    if !document.set_inner_html(container_id, html) {
        debug!("No container '{}' for error placeholder", container_id);
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
