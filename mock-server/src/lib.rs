use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Echo of the parameters a request carried, as the fixture routes report
/// them back to the client under test.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub fields: HashMap<String, String>,
}

pub const SESSION_COOKIE: &str = "session=abc123";

pub fn app() -> Router {
    Router::new()
        .route("/v1/ping", get(ping))
        .route("/v1/params", get(echo_params))
        .route("/v1/echo", post(echo_form))
        .route("/v1/status/{code}", get(fixed_status))
        .route("/v1/cookie/set", get(set_cookie))
        .route("/v1/cookie/require", get(require_cookie))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "pong"
}

async fn echo_params(Query(fields): Query<HashMap<String, String>>) -> Json<Echo> {
    Json(Echo { fields })
}

async fn echo_form(Form(fields): Form<HashMap<String, String>>) -> Json<Echo> {
    Json(Echo { fields })
}

async fn fixed_status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn set_cookie() -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            "session=abc123; Max-Age=3600; Path=/",
        )],
        "ok",
    )
}

async fn require_cookie(headers: HeaderMap) -> Result<&'static str, StatusCode> {
    let sent = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if sent.split(';').any(|cookie| cookie.trim() == SESSION_COOKIE) {
        Ok("authorized")
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_serializes_fields_under_one_key() {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), "7".to_string());
        let json = serde_json::to_value(&Echo { fields }).unwrap();
        assert_eq!(json["fields"]["id"], "7");
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let mut fields = HashMap::new();
        fields.insert("user".to_string(), "ada".to_string());
        let json = serde_json::to_string(&Echo { fields }).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fields.get("user").map(String::as_str), Some("ada"));
    }
}
