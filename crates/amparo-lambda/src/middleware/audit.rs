use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Request logging middleware.
///
/// Logs method, path and status for every API request. Bodies are never
/// logged: they may contain what a user wrote in crisis.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    if response.status().is_server_error() {
        tracing::error!(method = %method, path = %uri, status = status, "api_request");
    } else {
        tracing::info!(method = %method, path = %uri, status = status, "api_request");
    }

    response
}
