//! User resource handlers
//!
//! Four CRUD endpoints. Each handler unconditionally answers 200 with a
//! fixed body; the bound `userID` parameter is accepted but not consumed.

use crate::http;
use crate::routing::{PathParams, RouteTable};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the user route table
pub fn routes() -> RouteTable {
    RouteTable::new()
        .get("/", get_all_users)
        .post("/", create_user)
        .put("/:userID", update_user)
        .delete("/:userID", delete_user)
}

pub fn get_all_users(_params: &PathParams) -> Response<Full<Bytes>> {
    http::build_text_response("Get All Users")
}

pub fn create_user(_params: &PathParams) -> Response<Full<Bytes>> {
    http::build_text_response("User created")
}

pub fn update_user(_params: &PathParams) -> Response<Full<Bytes>> {
    http::build_text_response("User updated")
}

pub fn delete_user(_params: &PathParams) -> Response<Full<Bytes>> {
    http::build_text_response("User deleted")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_shape() {
        let table = routes();
        assert_eq!(table.len(), 4);
        assert!(table.find(&hyper::Method::GET, "/").is_some());
        assert!(table.find(&hyper::Method::POST, "/").is_some());
        assert!(table.find(&hyper::Method::PUT, "/9").is_some());
        assert!(table.find(&hyper::Method::DELETE, "/9").is_some());
    }
}
