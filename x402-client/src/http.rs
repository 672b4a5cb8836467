//! The HTTP collaborator contract (§6).
//!
//! Headers travel as a single CRLF-joined blob rather than a typed map, so
//! the same trait can be backed by a `reqwest`-based transport, a firmware
//! HTTP stack with no concept of a header map, or a test double.

use async_trait::async_trait;

/// A single HTTP exchange result.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, one `Name: value` pair per line, CRLF-separated.
    pub headers: String,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// The HTTP primitive the driver consumes, per §6.
#[async_trait]
pub trait HttpCollaborator: Send + Sync {
    /// Issues a single HTTP request.
    ///
    /// `headers` is a CRLF-joined `Name: value` blob; the implementation
    /// must preserve unknown response headers verbatim so the driver can
    /// locate `X-PAYMENT-RESPONSE`.
    ///
    /// # Errors
    ///
    /// Returns a boxed error on any transport-level failure.
    async fn request(
        &self,
        url: &str,
        method: &str,
        headers: &str,
        body: &[u8],
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>>;
}

/// Finds the value of `name` in a CRLF-joined header blob, case-insensitively.
#[must_use]
pub fn find_header<'a>(blob: &'a str, name: &str) -> Option<&'a str> {
    blob.split("\r\n").find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

/// Appends a `Name: value` line to a CRLF-joined header blob.
#[must_use]
pub fn append_header(blob: &str, name: &str, value: &str) -> String {
    if blob.is_empty() {
        format!("{name}: {value}")
    } else {
        format!("{blob}\r\n{name}: {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_header_case_insensitively() {
        let blob = "Content-Type: application/json\r\nX-Payment-Response: abc123";
        assert_eq!(find_header(blob, "x-payment-response"), Some("abc123"));
    }

    #[test]
    fn returns_none_for_absent_header() {
        let blob = "Content-Type: application/json";
        assert_eq!(find_header(blob, "X-Payment-Response"), None);
    }

    #[test]
    fn appends_to_empty_blob_without_leading_crlf() {
        assert_eq!(append_header("", "X-Payment", "abc"), "X-Payment: abc");
    }

    #[test]
    fn appends_to_nonempty_blob_with_crlf() {
        let blob = "Accept: */*";
        assert_eq!(
            append_header(blob, "X-Payment", "abc"),
            "Accept: */*\r\nX-Payment: abc"
        );
    }
}
