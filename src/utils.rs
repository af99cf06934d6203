use actix_web::HttpRequest;

/// Log an unmatched request, including its body when it is printable.
#[allow(dead_code)]
pub fn dump_request_and_body(req: &HttpRequest, body: &[u8]) {
    match std::str::from_utf8(body) {
        Ok(body) if !body.is_empty() => {
            log::debug!("Unhandled {} {}\n{}", req.method(), req.uri(), body)
        }
        _ => log::debug!("Unhandled {} {}", req.method(), req.uri()),
    }
}
