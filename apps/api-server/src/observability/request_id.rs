//! Request ID propagation.
//!
//! `TracingLogger` assigns every request an id and records it on the root
//! span; this middleware echoes the same id back to the client so that a
//! response can be matched with its log lines.

use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing_actix_web::RequestId;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// Copy the tracing request id into the `X-Request-ID` response header.
///
/// Must be wrapped inside `TracingLogger`, which populates the id.
pub async fn propagate_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = req.extensions().get::<RequestId>().cloned();

    let mut res = next.call(req).await?;

    if let Some(id) = request_id
        && let Ok(value) = HeaderValue::from_str(&id.to_string())
    {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(res)
}
