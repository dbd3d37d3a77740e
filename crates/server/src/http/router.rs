use super::handlers::{admin, comments, interactions, leads};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods(METHODS)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods(METHODS)
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods(METHODS)
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/api/comments", post(comments::post_comment))
        // GET 的路径参数是 slug，DELETE 的是评论 id
        .route(
            "/api/comments/:id",
            get(comments::list_comments).delete(comments::delete_comment),
        )
        .route(
            "/api/comments/:id/like",
            put(interactions::like_comment).delete(interactions::delete_like),
        )
        .route("/api/comments/:id/like-count", put(comments::count_likes))
        .route(
            "/api/slugs/:slug/like",
            put(interactions::like_slug).delete(interactions::delete_like_slug),
        )
        .route(
            "/api/slugs/:slug/bookmark",
            put(interactions::bookmark_slug).delete(interactions::delete_bookmark_slug),
        )
        .route(
            "/api/newsletter",
            post(leads::post_newsletter).get(leads::list_newsletter),
        )
        .route(
            "/api/demo-requests",
            post(leads::post_demo).get(leads::list_demos),
        )
        .route(
            "/api/contact",
            post(leads::post_contact).get(leads::list_contacts),
        )
        .route("/api/admin/sessions", post(admin::create_session))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use storage::Db;
    use tower::ServiceExt;

    const ADMIN: &str = "test-admin";

    async fn app() -> Router {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let state = AppState {
            db,
            admin_token: ADMIN.to_string(),
            session_ttl: chrono::Duration::hours(1),
        };
        build_router(state, "*")
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn sign_in(app: &Router, user_id: &str) -> String {
        let payload = json!({
            "user_id": user_id,
            "email": format!("{}@example.com", user_id),
            "name": "Alice",
        });
        let uri = "/api/admin/sessions";
        let (status, body) = call(app, "POST", uri, Some(ADMIN), Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn post_comment(
        app: &Router,
        token: &str,
        slug: &str,
        body: &str,
        parent_id: Option<i64>,
    ) -> (StatusCode, Value) {
        let payload = json!({ "comment": body, "slug": slug, "parent_id": parent_id });
        call(app, "POST", "/api/comments", Some(token), Some(payload)).await
    }

    #[tokio::test]
    async fn session_requires_admin_token() {
        let app = app().await;
        let payload = json!({ "user_id": "alice", "email": "alice@example.com" });
        let uri = "/api/admin/sessions";

        let (status, _) = call(&app, "POST", uri, None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = call(&app, "POST", uri, Some("wrong"), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn post_and_list_comment_thread() {
        let app = app().await;
        let token = sign_in(&app, "alice").await;

        let (status, root) = post_comment(&app, &token, "intro", "<p>first</p>", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let root_id = root["id"].as_i64().unwrap();

        let (status, _) = post_comment(&app, &token, "intro", "<p>reply</p>", Some(root_id)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = call(&app, "GET", "/api/comments/intro", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["author"]["name"], "Alice");
    }

    #[tokio::test]
    async fn filename_style_slug_is_accepted_percent_encoded() {
        let app = app().await;
        let token = sign_in(&app, "alice").await;

        let (status, _) = post_comment(&app, &token, "Café-Notes", "<p>bonjour</p>", None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = call(&app, "GET", "/api/comments/Caf%C3%A9-Notes", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let uri = "/api/slugs/Caf%C3%A9-Notes/like";
        let payload = json!({ "like": true });
        let (status, like) = call(&app, "PUT", uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(like["slug"], "Café-Notes");

        let (status, _) = call(&app, "GET", "/api/comments/two%20words", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn posting_requires_session() {
        let app = app().await;
        let payload = json!({ "comment": "hi", "slug": "intro", "parent_id": null });
        let (status, _) = call(&app, "POST", "/api/comments", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_comment_and_unknown_parent_are_rejected() {
        let app = app().await;
        let token = sign_in(&app, "alice").await;

        let (status, _) = post_comment(&app, &token, "intro", "<p><br></p>", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_comment(&app, &token, "intro", "orphan", Some(999)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn like_comment_and_sync_count() {
        let app = app().await;
        let token = sign_in(&app, "alice").await;
        let (_, root) = post_comment(&app, &token, "intro", "likeable", None).await;
        let id = root["id"].as_i64().unwrap();

        let uri = format!("/api/comments/{}/like", id);
        let payload = json!({ "like": true });
        let (status, like) = call(&app, "PUT", &uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(like["like"], true);

        let uri = format!("/api/comments/{}/like-count", id);
        let payload = json!({ "like_count": 1 });
        let (status, _) = call(&app, "PUT", &uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = call(&app, "GET", "/api/comments/intro", None, None).await;
        assert_eq!(list[0]["comment"]["like_count"], 1);

        let payload = json!({ "like": true });
        let uri = "/api/comments/999/like";
        let (status, _) = call(&app, "PUT", uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_author_can_delete() {
        let app = app().await;
        let alice = sign_in(&app, "alice").await;
        let bob = sign_in(&app, "bob").await;
        let (_, root) = post_comment(&app, &alice, "intro", "mine", None).await;
        let uri = format!("/api/comments/{}", root["id"].as_i64().unwrap());

        let (status, _) = call(&app, "DELETE", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, "DELETE", &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = call(&app, "GET", "/api/comments/intro", None, None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn slug_bookmark_round_trip() {
        let app = app().await;
        let token = sign_in(&app, "alice").await;
        let uri = "/api/slugs/intro/bookmark";

        let payload = json!({ "bookmark": true });
        let (status, bm) = call(&app, "PUT", uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bm["slug"], "intro");
        let (status, _) = call(&app, "DELETE", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn newsletter_is_public_but_listing_is_admin_only() {
        let app = app().await;
        let uri = "/api/newsletter";

        let payload = json!({ "email": "not-an-email" });
        let (status, _) = call(&app, "POST", uri, None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let payload = json!({ "email": "reader@example.com" });
        let (status, _) = call(&app, "POST", uri, None, Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = call(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, list) = call(&app, "GET", uri, Some(ADMIN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["email"], "reader@example.com");
    }
}
