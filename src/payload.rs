//! Form payload carried across result pages.

use crate::SearchQuery;

/// Ordered form fields for one page request.
///
/// The first page is built from the query; later pages take the fields
/// exposed by the previous page's continuation control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    /// Builds the first-page payload for a query.
    pub fn initial(query: &SearchQuery) -> Self {
        let mut payload = Self::default();
        payload.set("q", query.keywords.as_str());
        payload.set("s", "0");
        payload.set("o", "json");
        payload.set("api", "d.js");
        payload.set("vqd", "");
        payload.set("kl", query.region.as_str());
        payload.set("bing_market", query.region.as_str());
        if let Some(limit) = query.time_limit {
            payload.set("df", limit.code());
        }
        payload
    }

    /// Builds a payload from name/value pairs; a repeated name keeps the last value.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut payload = Self::default();
        for (name, value) in fields {
            payload.set(name, value);
        }
        payload
    }

    /// Sets a field, replacing its value in place if already present.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}
