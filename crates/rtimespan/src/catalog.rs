//! Named collections of spans loaded from configuration documents.
//!
//! ## Summary
//! A catalog document maps names to span payloads:
//!
//! ```json
//! { "spans": { "backup": { "start": "2006-01-02T15:04:05-04:00",
//!   "active": 3600000000000, "total": 86400000000000, "times": 10,
//!   "infinite": false, "allTime": false } } }
//! ```
//!
//! TOML and YAML documents with the same shape are read through `config`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use config::{Config, File, FileSourceFile, FileSourceString};
use rtimespan_core::config::Settings;
use serde::Deserialize;

use crate::error::SpanResult;
use crate::span::RecurringSpan;

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    spans: BTreeMap<String, RecurringSpan>,
}

/// Spans keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanCatalog {
    spans: BTreeMap<String, RecurringSpan>,
}

impl SpanCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Parses a JSON catalog document.
    ///
    /// ## Errors
    /// Returns `SpanError::Json` if the document is malformed or any span is invalid.
    pub fn from_json_str(document: &str) -> SpanResult<Self> {
        let document: CatalogDocument = serde_json::from_str(document)?;
        tracing::debug!(count = document.spans.len(), "Loaded span catalog from JSON");
        Ok(Self {
            spans: document.spans,
        })
    }

    /// ## Summary
    /// Reads a catalog from an in-memory `config` source.
    ///
    /// ## Errors
    /// Returns `SpanError::Config` if the source cannot be read or any span is invalid.
    pub fn from_source(source: File<FileSourceString, config::FileFormat>) -> SpanResult<Self> {
        Self::from_config(Config::builder().add_source(source).build()?)
    }

    /// ## Summary
    /// Reads a catalog file. The format follows the file extension.
    ///
    /// ## Errors
    /// Returns `SpanError::Config` if the file is missing, unreadable or invalid.
    pub fn load(path: impl AsRef<Path>) -> SpanResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading span catalog");
        let source: File<FileSourceFile, config::FileFormat> = File::from(path);
        Self::from_config(Config::builder().add_source(source.required(true)).build()?)
    }

    /// ## Summary
    /// Reads the catalog file named by `catalog.path`.
    ///
    /// ## Errors
    /// Returns `SpanError::Core` if no path is configured, otherwise as [`SpanCatalog::load`].
    pub fn from_settings(settings: &Settings) -> SpanResult<Self> {
        Self::load(settings.catalog.path()?)
    }

    fn from_config(config: Config) -> SpanResult<Self> {
        let document: CatalogDocument = config.try_deserialize()?;
        tracing::debug!(count = document.spans.len(), "Loaded span catalog");
        Ok(Self {
            spans: document.spans,
        })
    }

    /// Adds or replaces a span, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        span: RecurringSpan,
    ) -> Option<RecurringSpan> {
        self.spans.insert(name.into(), span)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecurringSpan> {
        self.spans.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecurringSpan)> {
        self.spans.iter().map(|(name, span)| (name.as_str(), span))
    }

    /// Names of the spans containing `x`, in name order.
    pub fn active_at<'a, Tz: TimeZone>(
        &'a self,
        x: &'a DateTime<Tz>,
    ) -> impl Iterator<Item = &'a str> {
        self.iter()
            .filter(move |(_, span)| span.contains_time(x))
            .map(|(name, _)| name)
    }
}
