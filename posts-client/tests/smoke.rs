use posts_client::{PostsClient, PostsClientError};

fn base_url() -> String {
    std::env::var("POSTS_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_smoke_flow() {
    let client = PostsClient::new(base_url()).expect("client must build");

    let created = client
        .create_post("http title", "http content")
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title.as_deref(), Some("http title"));
    assert_eq!(created.user_id, 1);

    let fetched = client
        .get_post(&created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched, created);

    let listed = client.list_posts().await.expect("list_posts must succeed");
    assert!(listed.iter().any(|post| post.id == created.id));
    assert!(
        listed
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );

    let bounded = client
        .list_posts_by_number("1")
        .await
        .expect("list_posts_by_number must succeed");
    assert!(bounded.len() <= 1);

    let updated = client
        .update_post(&created.id, Some("http title updated"), Some("http content updated"))
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title.as_deref(), Some("http title updated"));

    let message = client
        .delete_post(&created.id)
        .await
        .expect("delete_post must succeed");
    assert_eq!(message, "Post Deleted successfully");

    let after_delete = client.get_post(&created.id).await;
    assert!(matches!(after_delete, Err(PostsClientError::NotFound)));
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_rejects_blank_post() {
    let client = PostsClient::new(base_url()).expect("client must build");

    let result = client.create_post("   ", "content").await;
    match result {
        Err(PostsClientError::InvalidRequest(message)) => {
            assert_eq!(message, "Post must have title and body")
        }
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires running HTTP server"]
async fn http_update_of_missing_post_fails() {
    let client = PostsClient::new(base_url()).expect("client must build");

    let result = client
        .update_post("00000000-0000-0000-0000-000000000000", Some("t"), Some("b"))
        .await;
    assert!(matches!(result, Err(PostsClientError::InvalidRequest(_))));
}
