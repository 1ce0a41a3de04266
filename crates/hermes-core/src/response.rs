//! The response value object.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;

/// A response as seen by middleware and handlers.
///
/// The core never writes bytes to a wire. It records three things for the
/// transport adapter to flush afterwards: a content-type/format marker, a
/// header map, and the status code it was told to emit. Everything else
/// about response construction is the transport's business.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: Option<StatusCode>,
    format: Option<String>,
    headers: HeaderMap,
}

impl Response {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content-type/format marker.
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = Some(format.into());
    }

    /// Returns the content-type/format marker, if set.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Inserts a header, replacing any previous value under the same name.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Returns the headers accumulated so far.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Records the status code to emit and marks the response as sent.
    ///
    /// Calling this again replaces the recorded status; the transport
    /// flushes whatever is recorded when dispatch returns.
    pub fn send(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// Returns the status code recorded by [`send`](Self::send), if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns true once a status code has been emitted.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.status.is_some()
    }
}
