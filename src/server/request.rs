use crate::dispatcher::{HandlerRequest, HeaderVec};
use crate::ids::RequestId;
use http::Method;
use may_minihttp::Request;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};

/// Split a request target into path and optional raw query string.
#[must_use]
pub fn split_path(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    }
}

/// Collect `(name, value)` header pairs with lower-case names.
///
/// Values that are not valid UTF-8 are decoded lossily.
pub fn parse_headers<'h, I>(headers: I) -> HeaderVec
where
    I: IntoIterator<Item = (&'h str, &'h [u8])>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            (
                Arc::from(name.to_ascii_lowercase()),
                String::from_utf8_lossy(value).into_owned(),
            )
        })
        .collect()
}

/// Turn a raw `may_minihttp` request into a [`HandlerRequest`].
///
/// Returns `None` if the method token is not a valid HTTP method.
pub fn parse_request(req: Request) -> Option<HandlerRequest> {
    let raw_method = req.method().to_owned();
    let Ok(method) = Method::from_bytes(raw_method.as_bytes()) else {
        warn!(method = %raw_method, "Invalid HTTP method token");
        return None;
    };

    let (path, query) = split_path(req.path());
    let path = path.to_owned();
    let query = query.map(str::to_owned);

    let headers = parse_headers(req.headers().iter().map(|h| (h.name, h.value)));
    let request_id = RequestId::from_header_or_new(
        headers
            .iter()
            .find(|(k, _)| k.as_ref() == "x-request-id")
            .map(|(_, v)| v.as_str()),
    );

    // Consumes the request, so it has to come last
    let mut body = Vec::new();
    if let Err(e) = req.body().read_to_end(&mut body) {
        warn!(request_id = %request_id, error = %e, "Failed to read request body");
        body.clear();
    }

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        headers_count = headers.len(),
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    Some(HandlerRequest {
        request_id,
        method,
        path,
        query,
        headers,
        body,
    })
}
