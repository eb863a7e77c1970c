use axum::{body::Body, http::Request, middleware::Next, response::Response};
use nanoid::nanoid;
use tracing::{info_span, Instrument};

use crate::state::RequestId;

/// Tags each request with a `req_` id, available to handlers as an extension, attached to the
/// request's tracing span, and echoed back in `X-Request-Id`.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = format!("req_{}", nanoid!(16));
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = info_span!("request", request_id = %request_id);
    let mut resp = next.run(req).instrument(span).await;
    if let Ok(value) = request_id.parse() {
        resp.headers_mut().insert("X-Request-Id", value);
    }
    resp
}
