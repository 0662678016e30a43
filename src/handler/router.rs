//! Request dispatch
//!
//! Entry point for HTTP request processing: server-level guards first,
//! then health endpoints, then the user route table. Anything the table
//! does not claim gets the default 404.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteTable;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();

    // Preflight is answered at the server level when CORS is on;
    // otherwise OPTIONS falls through to the table like any other method
    if *method == Method::OPTIONS && state.config.http.enable_cors {
        return Ok(http::build_options_response(true));
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let health = &state.config.health;
    let response = if health.enabled
        && (path == health.liveness_path || path == health.readiness_path)
    {
        http::build_health_response("ok")
    } else {
        dispatch(&state.routes, method, path)
    };

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        let entry = access_entry(&req, peer_addr, &response);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Match the request against the route table; unmatched requests get
/// the default 404.
pub fn dispatch(table: &RouteTable, method: &Method, path: &str) -> Response<Full<Bytes>> {
    match table.find(method, path) {
        Some((handler, params)) => handler(&params),
        None => http::build_404_response(),
    }
}

/// Reject requests whose declared body exceeds the configured limit.
/// Handlers never read the body, but the connection still has to carry it.
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let declared = req
        .headers()
        .get("content-length")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    if declared > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {declared} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response());
    }
    None
}

/// Assemble an access log entry from the request and the response
fn access_entry(
    req: &Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0".to_string(),
        hyper::Version::HTTP_2 => "2".to_string(),
        _ => "1.1".to_string(),
    };
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::users;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response<Full<Bytes>>) -> (u16, String) {
        let status = resp.status().as_u16();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_all_users() {
        let table = users::routes();
        let (status, body) = body_of(dispatch(&table, &Method::GET, "/")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "Get All Users");
    }

    #[tokio::test]
    async fn test_create_user() {
        let table = users::routes();
        let (status, body) = body_of(dispatch(&table, &Method::POST, "/")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "User created");
    }

    #[tokio::test]
    async fn test_update_user() {
        let table = users::routes();
        let (status, body) = body_of(dispatch(&table, &Method::PUT, "/42")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "User updated");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let table = users::routes();
        let (status, body) = body_of(dispatch(&table, &Method::DELETE, "/42")).await;
        assert_eq!(status, 200);
        assert_eq!(body, "User deleted");
    }

    #[tokio::test]
    async fn test_undeclared_combinations_fall_to_404() {
        let table = users::routes();

        // Path exists under another method
        let (status, _) = body_of(dispatch(&table, &Method::GET, "/42")).await;
        assert_eq!(status, 404);

        // Method exists under another path
        let (status, _) = body_of(dispatch(&table, &Method::PUT, "/")).await;
        assert_eq!(status, 404);

        // Method not in the table at all
        let (status, _) = body_of(dispatch(&table, &Method::PATCH, "/")).await;
        assert_eq!(status, 404);

        // Deeper paths never match the one-segment param
        let (status, _) = body_of(dispatch(&table, &Method::DELETE, "/a/b")).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_handlers_are_idempotent() {
        let table = users::routes();

        // A create never affects a later read
        let first = body_of(dispatch(&table, &Method::GET, "/")).await;
        let _ = body_of(dispatch(&table, &Method::POST, "/")).await;
        let second = body_of(dispatch(&table, &Method::GET, "/")).await;
        assert_eq!(first, second);

        // Repeated invocations return the identical literal
        for _ in 0..3 {
            let (status, body) = body_of(dispatch(&table, &Method::PUT, "/7")).await;
            assert_eq!(status, 200);
            assert_eq!(body, "User updated");
        }
    }
}
