//! Unit tests for the posts crate

mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::{PostId, UserId};

    use crate::application::*;
    use crate::domain::value_objects::{ListScope, PostChanges};
    use crate::error::PostError;
    use crate::infra::InMemoryPostRepository;

    async fn create(repo: &Arc<InMemoryPostRepository>, author: UserId, title: &str) -> crate::Post {
        CreatePostUseCase::new(repo.clone())
            .execute(CreatePostInput {
                title: title.to_string(),
                content: format!("{title} body"),
                author_id: author,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_sets_author() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();

        let post = create(&repo, alice, "a").await;
        assert_eq!(post.author_id, alice);
        assert_eq!(post.title, "a");
    }

    #[tokio::test]
    async fn test_list_scopes() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();
        let bob = UserId::new();

        create(&repo, alice, "first").await;
        create(&repo, bob, "second").await;
        create(&repo, alice, "third").await;

        let list = ListPostsUseCase::new(repo.clone());

        let all = list.execute(ListScope::All).await.unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);

        let own = list.execute(ListScope::Author(alice)).await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|p| p.author_id == alice));

        let nobody = list.execute(ListScope::Author(UserId::new())).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_author() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();
        let post = create(&repo, alice, "a").await;

        let updated = UpdatePostUseCase::new(repo.clone())
            .execute(UpdatePostInput {
                post_id: post.id,
                author_id: alice,
                changes: PostChanges {
                    title: None,
                    content: Some("edited".into()),
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "a");
        assert_eq!(updated.content, "edited");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_empty_update_returns_unchanged_post() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();
        let post = create(&repo, alice, "a").await;

        let updated = UpdatePostUseCase::new(repo.clone())
            .execute(UpdatePostInput {
                post_id: post.id,
                author_id: alice,
                changes: PostChanges::default(),
            })
            .await
            .unwrap();

        assert_eq!(updated, post);
    }

    #[tokio::test]
    async fn test_other_user_cannot_update_or_delete() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();
        let bob = UserId::new();
        let post = create(&repo, alice, "a").await;

        let err = UpdatePostUseCase::new(repo.clone())
            .execute(UpdatePostInput {
                post_id: post.id,
                author_id: bob,
                changes: PostChanges {
                    title: Some("hijacked".into()),
                    content: None,
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::NotFound));

        let err = DeletePostUseCase::new(repo.clone())
            .execute(post.id, bob)
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::NotFound));

        // Untouched
        let all = ListPostsUseCase::new(repo.clone())
            .execute(ListScope::All)
            .await
            .unwrap();
        assert_eq!(all, vec![post]);
    }

    #[tokio::test]
    async fn test_delete_returns_post_once() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let alice = UserId::new();
        let post = create(&repo, alice, "a").await;

        let delete = DeletePostUseCase::new(repo.clone());
        let deleted = delete.execute(post.id, alice).await.unwrap();
        assert_eq!(deleted, post);

        let err = delete.execute(post.id, alice).await.unwrap_err();
        assert!(matches!(err, PostError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_post_id() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let err = DeletePostUseCase::new(repo)
            .execute(PostId::new(), UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::NotFound));
    }
}

mod http_tests {
    use std::sync::Arc;

    use auth::AuthConfig;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::InMemoryPostRepository;
    use crate::presentation::dto::PostResponse;
    use crate::presentation::router::posts_router_generic;

    struct Fixture {
        app: Router,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Arc::new(AuthConfig::new(b"posts-test-secret"));
            let app = posts_router_generic(InMemoryPostRepository::new(), config.clone());
            Self { app, config }
        }

        fn token(&self, user_id: UserId, name: &str) -> String {
            self.config.tokens.issue(user_id, name).unwrap().token
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, token);
            }
            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
        }
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let fx = Fixture::new();
        let response = fx
            .send("POST", "/blog-posts", None, Some(json!({"title": "a", "content": "b"})))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = json_body(response).await;
        assert_eq!(body["message"], "Unauthorized User");
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let fx = Fixture::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let alice_token = fx.token(alice, "alice");
        let bob_token = fx.token(bob, "bob");

        let response = fx
            .send("POST", "/blog-posts", Some(&alice_token), Some(json!({"title": "a", "content": "b"})))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: PostResponse = json_body(response).await;
        assert_eq!(created.author_id, alice);

        fx.send("POST", "/blog-posts", Some(&bob_token), Some(json!({"title": "c", "content": "d"})))
            .await;

        let all: Vec<PostResponse> = json_body(fx.send("GET", "/blog-posts", None, None).await).await;
        assert_eq!(all.len(), 2);

        let own: Vec<PostResponse> =
            json_body(fx.send("GET", "/blog-posts", Some(&alice_token), None).await).await;
        assert_eq!(own, vec![created]);
    }

    #[tokio::test]
    async fn test_list_with_invalid_token_is_rejected() {
        let fx = Fixture::new();
        let response = fx.send("GET", "/blog-posts", Some("not-a-token"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let fx = Fixture::new();
        let token = fx.token(UserId::new(), "alice");

        let response = fx
            .send("POST", "/blog-posts", Some(&token), Some(json!({"title": "only"})))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_ownership() {
        let fx = Fixture::new();
        let alice = UserId::new();
        let alice_token = fx.token(alice, "alice");
        let bob_token = fx.token(UserId::new(), "bob");

        let created: PostResponse = json_body(
            fx.send("POST", "/blog-posts", Some(&alice_token), Some(json!({"title": "a", "content": "b"})))
                .await,
        )
        .await;
        let uri = format!("/blog-posts/{}", created.id);

        let response = fx
            .send("PUT", &uri, Some(&bob_token), Some(json!({"title": "x", "content": "y"})))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = json_body(response).await;
        assert_eq!(body["message"], "Blog post not found");

        let response = fx
            .send("PUT", &uri, Some(&alice_token), Some(json!({"title": "x"})))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: PostResponse = json_body(response).await;
        assert_eq!(updated.title, "x");
        assert_eq!(updated.content, "b");

        let response = fx.send("DELETE", &uri, Some(&bob_token), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = fx.send("DELETE", &uri, Some(&alice_token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let deleted: PostResponse = json_body(response).await;
        assert_eq!(deleted.id, created.id);
    }

    #[tokio::test]
    async fn test_malformed_post_id_is_not_found() {
        let fx = Fixture::new();
        let token = fx.token(UserId::new(), "alice");

        let response = fx.send("DELETE", "/blog-posts/not-a-uuid", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
