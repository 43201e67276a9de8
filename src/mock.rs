//! Scripted transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use tracing::Level;

use crate::observer::SearchObserver;
use crate::transport::{Transport, TransportResponse};
use crate::{Result, SearchError};

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Timeout,
    Broken,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Status(200, body.into())
    }
}

/// Replies are consumed per URL in order; the last one repeats.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, url: &str, replies: Vec<Reply>) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into());
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(u, _)| u == url).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        _method: Method,
        url: &str,
        form: &[(String, String)],
    ) -> Result<TransportResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), form.to_vec()));

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let queue = replies
                .get_mut(url)
                .ok_or_else(|| SearchError::transport(format!("{} unreachable", url)))?;
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(TransportResponse::new(status, body)),
            Some(Reply::Timeout) => Err(SearchError::Timeout(format!("{} request timed out", url))),
            Some(Reply::Broken) | None => Err(SearchError::transport(format!(
                "{} request failed: connection reset",
                url
            ))),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Level, String)>>,
}

impl RecordingObserver {
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl SearchObserver for RecordingObserver {
    fn on_event(&self, level: Level, message: &str, _fields: &[(&str, String)]) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn html_page(results: &[(&str, &str, &str)], next_offset: Option<u32>) -> String {
    let mut page = String::from("<html><body><div id=\"links\">");
    for (href, title, snippet) in results {
        page.push_str(&format!(
            "<div class=\"result\"><div class=\"result__body\"><h2 class=\"result__title\">\
             <a class=\"result__a\" href=\"{}\">{}</a></h2>\
             <a class=\"result__snippet\" href=\"{}\">{}</a></div></div>",
            href, title, href, snippet
        ));
    }
    page.push_str("</div>");
    if let Some(offset) = next_offset {
        page.push_str(&format!(
            "<div class=\"nav-link\"><form action=\"/html/\" method=\"post\">\
             <input type=\"submit\" class=\"btn btn--alt\" value=\"Next\">\
             <input type=\"hidden\" name=\"q\" value=\"rust\">\
             <input type=\"hidden\" name=\"s\" value=\"{}\">\
             <input type=\"hidden\" name=\"vqd\" value=\"4-123\">\
             </form></div>",
            offset
        ));
    }
    page.push_str("</body></html>");
    page
}

pub fn lite_page(results: &[(&str, &str, &str)], next_offset: Option<u32>) -> String {
    let mut page = String::from("<html><body><table><tr><td>filters</td></tr></table><table>");
    for (href, title, snippet) in results {
        page.push_str(&format!(
            "<tr><td><a class=\"result-link\" href=\"{}\">{}</a></td></tr>\
             <tr><td class=\"result-snippet\">{}</td></tr>\
             <tr><td><span class=\"link-text\">{}</span></td></tr>\
             <tr><td>&nbsp;</td></tr>",
            href, title, snippet, href
        ));
    }
    page.push_str("</table>");
    if let Some(offset) = next_offset {
        page.push_str(&format!(
            "<form action=\"/lite/\" method=\"post\">\
             <input type=\"submit\" class=\"navbutton\" value=\"Next Page &gt;\">\
             <input type=\"hidden\" name=\"s\" value=\"{}\"></form>",
            offset
        ));
    }
    page.push_str("</body></html>");
    page
}
