use crate::dispatcher::HandlerResponse;
use may_minihttp::Response;
use tracing::debug;

/// Reason phrase for the status codes the service produces
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// `may_minihttp` only accepts `'static` header lines, so only a fixed set of
/// header values can be emitted.
fn static_header_line(name: &str, value: &str) -> Option<&'static str> {
    if !name.eq_ignore_ascii_case("content-type") {
        return None;
    }
    match value {
        "application/json" => Some("Content-Type: application/json"),
        "text/plain" => Some("Content-Type: text/plain"),
        "text/plain; charset=utf-8" => Some("Content-Type: text/plain; charset=utf-8"),
        "text/html" => Some("Content-Type: text/html"),
        _ => None,
    }
}

/// Write a handler response onto the wire response
pub fn write_handler_response(res: &mut Response, hr: HandlerResponse) {
    res.status_code(usize::from(hr.status), status_reason(hr.status));
    for (name, value) in &hr.headers {
        match static_header_line(name, value) {
            Some(line) => {
                res.header(line);
            }
            None => debug!(header = %name, value = %value, "Dropping unsupported response header"),
        }
    }
    if !hr.body.is_empty() {
        res.body_vec(hr.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(204), "No Content");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
        // never produced: a method mismatch is a 404
        assert_eq!(status_reason(405), "Unknown");
    }

    #[test]
    fn test_static_header_line() {
        assert_eq!(
            static_header_line("content-type", "application/json"),
            Some("Content-Type: application/json")
        );
        assert_eq!(static_header_line("x-custom", "1"), None);
        assert_eq!(static_header_line("Content-Type", "image/png"), None);
    }
}
