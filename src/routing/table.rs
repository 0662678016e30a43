//! Route table
//!
//! Maps (HTTP method, path pattern) pairs to handler functions.
//! Routes are scanned in declaration order and the first match wins.

use super::matcher::{match_pattern, PathParams};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

/// A handler produces the full response for a matched route
pub type HandlerFn = fn(&PathParams) -> Response<Full<Bytes>>;

/// A single method + pattern binding
pub struct Route {
    pub method: Method,
    pub pattern: &'static str,
    pub handler: HandlerFn,
}

/// Ordered collection of routes
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(self, pattern: &'static str, handler: HandlerFn) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(self, pattern: &'static str, handler: HandlerFn) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put(self, pattern: &'static str, handler: HandlerFn) -> Self {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete(self, pattern: &'static str, handler: HandlerFn) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    pub fn route(mut self, method: Method, pattern: &'static str, handler: HandlerFn) -> Self {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        self
    }

    /// Find the first route whose method and pattern both match.
    ///
    /// A path that matches a pattern under a different method does not
    /// count as a match; the request falls through to the caller's
    /// default handling.
    pub fn find(&self, method: &Method, path: &str) -> Option<(HandlerFn, PathParams)> {
        self.routes.iter().find_map(|route| {
            if route.method == *method {
                match_pattern(route.pattern, path).map(|params| (route.handler, params))
            } else {
                None
            }
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_handler(_params: &PathParams) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from("ok")))
    }

    fn other_handler(_params: &PathParams) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from("other")))
    }

    fn make_table() -> RouteTable {
        RouteTable::new()
            .get("/", ok_handler)
            .post("/", other_handler)
            .put("/:userID", ok_handler)
            .delete("/:userID", other_handler)
    }

    #[test]
    fn test_find_respects_method() {
        let table = make_table();
        assert!(table.find(&Method::GET, "/").is_some());
        assert!(table.find(&Method::PATCH, "/").is_none());
        assert!(table.find(&Method::GET, "/42").is_none());
    }

    #[test]
    fn test_find_captures_params() {
        let table = make_table();
        let (_, params) = table.find(&Method::PUT, "/42").expect("should match");
        assert_eq!(params.get("userID"), Some("42"));
    }

    #[tokio::test]
    async fn test_declaration_order_wins() {
        use http_body_util::BodyExt;

        fn exact(_params: &PathParams) -> Response<Full<Bytes>> {
            Response::new(Full::new(Bytes::from("exact")))
        }

        let table = RouteTable::new()
            .get("/users", exact)
            .get("/:userID", ok_handler);

        // "/users" also matches "/:userID"; the earlier route wins
        let (handler, params) = table.find(&Method::GET, "/users").expect("should match");
        assert!(params.is_empty());
        let body = handler(&params)
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"exact");
    }

    #[test]
    fn test_table_len() {
        assert_eq!(make_table().len(), 4);
        assert!(RouteTable::new().is_empty());
    }
}
