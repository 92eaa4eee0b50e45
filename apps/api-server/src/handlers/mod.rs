//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Largest accepted request body, 2.5 MiB.
pub const MAX_BODY_BYTES: usize = 2_621_440;

/// Configure all application routes.
///
/// Item ids must be all digits; anything else falls through to the default
/// 404. Both the bare and the trailing-slash form of every path resolve to
/// the same handlers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        // Digits that overflow an i64 cannot name a stored post.
        .app_data(web::PathConfig::default().error_handler(|_, _| AppError::NotFound.into()));

    cfg.route("/health", web::get().to(health::health_check));

    for path in ["/posts", "/posts/"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(posts::list_posts))
                .route(web::post().to(posts::create_post))
                .default_service(web::to(posts::collection_method_not_allowed)),
        );
    }

    for path in [r"/posts/{id:\d+}", r"/posts/{id:\d+}/"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(posts::get_post))
                .route(web::put().to(posts::update_post))
                .route(web::delete().to(posts::delete_post))
                .default_service(web::to(posts::item_method_not_allowed)),
        );
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use chrono::DateTime;
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::state::AppState;

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn payload(title: &str, category: &str) -> Value {
        json!({
            "title": title,
            "content": "Some content",
            "category": category,
            "tags": ["a", "b"]
        })
    }

    fn timestamp(value: &Value) -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(value.as_str().expect("timestamp string"))
            .expect("RFC 3339 timestamp")
    }

    #[actix_rt::test]
    async fn test_create_post() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title":"Hi","content":"World","category":"Tech","tags":["a","b"]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Hi");
        assert_eq!(body["content"], "World");
        assert_eq!(body["category"], "Tech");
        assert_eq!(body["tags"], json!(["a", "b"]));
        assert!(body["id"].as_i64().is_some());
        assert_eq!(body["createdAt"], body["updatedAt"]);
        assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[actix_rt::test]
    async fn test_create_then_read_is_identical() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(payload("  Padded  ", "Tech"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["title"], "Padded");

        for uri in [
            format!("/posts/{}", created["id"]),
            format!("/posts/{}/", created["id"]),
        ] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            let fetched: Value = test::read_body_json(res).await;
            assert_eq!(fetched, created);
        }
    }

    #[actix_rt::test]
    async fn test_blank_title_is_rejected() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title":"","content":"x","category":"y","tags":[]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"errors": {"title": ["Must be a non-empty string."]}}));
    }

    #[actix_rt::test]
    async fn test_body_level_errors() {
        let app = test_app!();

        let cases = [
            ("", "Request body is empty."),
            ("{oops", "Invalid JSON payload."),
            ("[\"a\"]", "JSON payload must be an object."),
        ];
        for (raw, message) in cases {
            let req = test::TestRequest::post()
                .uri("/posts")
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .set_payload(raw)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body, json!({"errors": {"body": [message]}}));
        }
    }

    #[actix_rt::test]
    async fn test_all_field_errors_reported_together() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": 5, "tags": [1]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"errors": {
                "title": ["Must be a non-empty string."],
                "content": ["This field is required."],
                "category": ["This field is required."],
                "tags": ["Tags must be an array of strings."]
            }})
        );
    }

    #[actix_rt::test]
    async fn test_list_and_search() {
        let app = test_app!();

        for (title, category) in [("One", "Tech"), ("Two", "Cooking"), ("Three", "tech news")] {
            let req = test::TestRequest::post()
                .uri("/posts/")
                .set_json(payload(title, category))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/posts").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<_> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Three", "Two", "One"]);

        let req = test::TestRequest::get().uri("/posts?term=TECH").to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<_> = found
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Three", "One"]);

        let req = test::TestRequest::get().uri("/posts?term=zzz").to_request();
        let none: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(none, json!([]));

        let req = test::TestRequest::get().uri("/posts?term=").to_request();
        let empty_term: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(empty_term.as_array().unwrap().len(), 3);
    }

    #[actix_rt::test]
    async fn test_repeated_term_uses_last_value() {
        let app = test_app!();

        for (title, category) in [("Rust tips", "Tech"), ("Bread", "Cooking")] {
            let req = test::TestRequest::post()
                .uri("/posts")
                .set_json(payload(title, category))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/posts?term=rust&term=bread")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let found: Value = test::read_body_json(res).await;
        let found = found.as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["title"], "Bread");
    }

    #[actix_rt::test]
    async fn test_large_content_is_accepted() {
        let app = test_app!();

        let content = "x".repeat(300_000);
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title":"Long","content":content,"category":"Tech","tags":[]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["content"].as_str().unwrap().len(), 300_000);

        let req = test::TestRequest::put()
            .uri(&format!("/posts/{}", created["id"]))
            .set_json(json!({"title":"Longer","content":"y".repeat(400_000),"category":"Tech","tags":[]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_update_post() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(payload("Old", "Tech"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/posts/{}", created["id"]);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"title":"New","content":"Changed","category":"Life","tags":[]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let updated: Value = test::read_body_json(res).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["title"], "New");
        assert_eq!(updated["tags"], json!([]));
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert!(timestamp(&updated["updatedAt"]) > timestamp(&updated["createdAt"]));

        let req = test::TestRequest::put()
            .uri(&format!("{uri}/"))
            .set_json(json!({"title":"   "}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_update_unknown_post() {
        let app = test_app!();

        let req = test::TestRequest::put()
            .uri("/posts/9999")
            .set_json(payload("Hi", "Tech"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "Post not found."}));

        // Unknown id wins over an invalid body.
        let req = test::TestRequest::put().uri("/posts/9999").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_delete_post() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(payload("Doomed", "Tech"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/posts/{}", created["id"]);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(res).await.is_empty());

        for _ in 0..2 {
            let req = test::TestRequest::get().uri(&uri).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

            let req = test::TestRequest::put()
                .uri(&uri)
                .set_json(payload("Back", "Tech"))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

            let req = test::TestRequest::delete().uri(&format!("{uri}/")).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body, json!({"error": "Post not found."}));
        }
    }

    #[actix_rt::test]
    async fn test_method_not_allowed() {
        let app = test_app!();

        let req = test::TestRequest::delete().uri("/posts").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers().get(header::ALLOW).unwrap(), "GET, POST");

        let req = test::TestRequest::patch().uri("/posts/1/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers().get(header::ALLOW).unwrap(), "GET, PUT, DELETE");
    }

    #[actix_rt::test]
    async fn test_non_numeric_id_does_not_match() {
        let app = test_app!();

        for uri in ["/posts/abc", "/posts/-1", "/posts/1.5/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_rt::test]
    async fn test_overflowing_id_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/posts/99999999999999999999")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "Post not found."}));
    }

    #[actix_rt::test]
    async fn test_health_check() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }
}
