// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// The `{message, status: "error"}` envelope used by the upload endpoints.
pub fn json_error_response(err: &ServerError) -> Response {
    let envelope = json!({
        "message": err.client_message(),
        "status": "error",
    });

    json_response(err.status_code(), &envelope).unwrap_or_else(|_| {
        ResponseBuilder::new()
            .status(500)
            .body(Body::from("Internal Server Error"))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    })
}
