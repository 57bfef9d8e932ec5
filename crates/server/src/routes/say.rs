use axum::{
    extract::{Query, State},
    Json,
};
use common::say::SayClient;
use serde::Deserialize;
use tracing::info;

use crate::errors::ApiError;

#[derive(Clone, Debug)]
pub struct SayState {
    pub client: SayClient,
    pub default_keyword: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SayQuery {
    /// Text forwarded to the function; `nothing` when absent or empty.
    pub keyword: Option<String>,
}

#[utoipa::path(
    get, path = "/say", tag = "say",
    params(SayQuery),
    responses(
        (status = 200, description = "Upstream JSON body, relayed verbatim"),
        (status = 500, description = "Upstream call failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn say(
    State(state): State<SayState>,
    Query(q): Query<SayQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let keyword = q
        .keyword
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| state.default_keyword.clone());
    info!(%keyword, "relaying to say function");
    let json = state.client.say(&keyword).await?;
    Ok(Json(json))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        extract::Query,
        http::{Request, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{build_cors, build_say_router};

    async fn spawn_echo_function() -> String {
        let stub = Router::new().route(
            "/",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({ "message": format!("You said: {}", q.get("keyword").cloned().unwrap_or_default()) }))
            }),
        );
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, stub).await;
        });
        format!("http://{}", addr)
    }

    fn app(function_url: &str) -> Router {
        let client = SayClient::new(function_url, Duration::from_secs(5)).expect("client");
        build_say_router(SayState { client, default_keyword: "nothing".into() }, build_cors())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).expect("request");
        let res = app.clone().oneshot(req).await.expect("infallible");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn relays_keyword_and_body() {
        let app = app(&spawn_echo_function().await);
        let (status, body) = get_json(&app, "/say?keyword=hello%20there").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "You said: hello there"}));
    }

    #[tokio::test]
    async fn missing_or_empty_keyword_defaults() {
        let app = app(&spawn_echo_function().await);
        let (_, body) = get_json(&app, "/say").await;
        assert_eq!(body, json!({"message": "You said: nothing"}));
        let (_, body) = get_json(&app, "/say?keyword=").await;
        assert_eq!(body, json!({"message": "You said: nothing"}));
    }

    #[tokio::test]
    async fn unreachable_function_is_internal_error() {
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let app = app(&format!("http://{}", addr));
        let (status, body) = get_json(&app, "/say?keyword=x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal Server Error"}));
    }
}
