mod common;

use serde_json::json;
use social_shared::{
    ApiError, ComposeError, ComposeVariant, ComposeWindow, Method, NodeState, Post, PostNode, PostStore, RawResponse,
    SharedCell,
};

use common::*;

fn target() -> PostNode {
    PostNode::from(serde_json::from_value::<Post>(post_json(8, None, vec![])).unwrap())
}

/// Backend that creates post 9, accepts uploads except those listed, and
/// answers feed fetches with `feed_status`.
fn backend(failing_uploads: &'static [&'static str], feed_status: u16) -> std::sync::Arc<FakeBackend> {
    FakeBackend::new(move |req| match (req.method, req.endpoint.as_str()) {
        (Method::Post, "/post/") => ok_json(post_json(9, Some(8), vec![])),
        (Method::Put, "/post/8") => Ok(RawResponse::no_content()),
        (Method::Delete, _) => Ok(RawResponse::no_content()),
        (Method::Post, endpoint) if endpoint.ends_with("/image/") => {
            let name = match &req.body {
                social_shared::RequestBody::Multipart { file, .. } => file.file_name.clone(),
                _ => String::new(),
            };
            if failing_uploads.contains(&name.as_str()) {
                status(413, "Image too large")
            } else {
                ok_json(json!(null))
            }
        }
        (Method::Get, _) if feed_status == 200 => ok_json(json!([])),
        (Method::Get, _) => status(feed_status, "Service Unavailable"),
        _ => status(404, "Not Found"),
    })
}

#[tokio::test]
async fn comment_uploads_in_order_then_refreshes_then_counts_once() {
    let h = harness(backend(&[], 200), Some("t0k"));
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));
    let node = target();
    let mut state = NodeState::seed(&node);
    let before = state.comment_count;

    let mut window = ComposeWindow::open(ComposeVariant::CreateComment { parent: node.clone() }, 4);
    window.body = "great shots".into();
    window
        .add_images(vec![pending("a.png"), pending("b.png"), pending("c.png")])
        .unwrap();

    let submitted = window.submit(&h.client, &store).await.unwrap();
    state.record_new_comment();

    assert_eq!(
        h.backend.routes(),
        vec![
            "POST /post/",
            "POST /post/9/image/",
            "POST /post/9/image/",
            "POST /post/9/image/",
            "GET /post/",
        ]
    );
    let calls = h.backend.calls();
    let created = calls[0].json_body();
    assert_eq!(created["parent_id"], 8);
    assert_eq!(created["title"], "Commenting on Post 8 by ada");
    assert_eq!(created["body"], "great shots");

    let order: Vec<_> = calls.iter().filter_map(|c| c.uploaded_file_name()).collect();
    assert_eq!(order, vec!["a.png", "b.png", "c.png"]);

    assert_eq!(
        submitted,
        social_shared::Submitted {
            post_id: 9,
            uploaded: 3,
            refreshed: true
        }
    );
    assert_eq!(state.comment_count, before + 1);
}

#[tokio::test]
async fn counter_moves_even_when_the_refresh_fails() {
    let h = harness(backend(&[], 503), Some("t0k"));
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));
    let node = target();
    let mut state = NodeState::seed(&node);

    let mut window = ComposeWindow::open(ComposeVariant::CreateComment { parent: node }, 4);
    window.body = "hi".into();
    let submitted = window.submit(&h.client, &store).await.unwrap();
    state.record_new_comment();

    assert!(!submitted.refreshed);
    assert_eq!(state.comment_count, 1);
    assert_eq!(h.backend.routes().last().map(String::as_str), Some("GET /post/"));
}

#[tokio::test]
async fn first_failed_upload_stops_the_rest() {
    let h = harness(backend(&["b.png"], 200), Some("t0k"));
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));

    let mut window = ComposeWindow::open(ComposeVariant::CreatePost, 4);
    window.title = "Trip".into();
    window.body = "photos".into();
    window
        .add_images(vec![pending("a.png"), pending("b.png"), pending("c.png")])
        .unwrap();

    let submitted = window.submit(&h.client, &store).await.unwrap();

    assert_eq!(submitted.uploaded, 1);
    let uploads: Vec<_> = h
        .backend
        .calls()
        .iter()
        .filter_map(|c| c.uploaded_file_name().map(str::to_string))
        .collect();
    assert_eq!(uploads, vec!["a.png", "b.png"]);
    assert_eq!(h.backend.routes().last().map(String::as_str), Some("GET /post/"));
    assert_eq!(h.notices.notices()[0].message, "Image too large");
}

#[tokio::test]
async fn failed_creation_stops_everything() {
    let h = harness(FakeBackend::new(|_| status(401, "Not authenticated")), None);
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));

    let mut window = ComposeWindow::open(ComposeVariant::CreatePost, 4);
    window.title = "Trip".into();
    window.body = "photos".into();
    window.add_images(vec![pending("a.png")]).unwrap();

    let err = window.submit(&h.client, &store).await.unwrap_err();

    assert_eq!(
        err,
        ComposeError::Api(ApiError::Status {
            status: 401,
            message: "Not authenticated".into()
        })
    );
    assert_eq!(h.backend.routes(), vec!["POST /post/"]);
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let h = harness(FakeBackend::new(|_| panic!("no request expected")), None);
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));

    let window = ComposeWindow::open(ComposeVariant::CreatePost, 4);
    let err = window.submit(&h.client, &store).await.unwrap_err();

    assert_eq!(err, ComposeError::MissingTitle);
}

#[tokio::test]
async fn edit_updates_deletes_removed_images_and_uploads_new_ones() {
    let h = harness(backend(&[], 200), Some("t0k"));
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));
    let mut node = target();
    node.images = vec![social_shared::ImageRef {
        id: 4,
        url: "static/old.png".into(),
    }];

    let mut window = ComposeWindow::open(ComposeVariant::EditPost { post: node }, 4);
    assert_eq!(window.title, "Post 8");
    window.remove_current_image();
    window.title = "Post 8, revised".into();
    window.add_images(vec![pending("new.png")]).unwrap();

    let submitted = window.submit(&h.client, &store).await.unwrap();

    assert_eq!(submitted.post_id, 8);
    assert_eq!(
        h.backend.routes(),
        vec![
            "PUT /post/8",
            "DELETE /post/8/image/static/old.png",
            "POST /post/8/image/",
            "GET /post/",
        ]
    );
    assert_eq!(h.backend.calls()[0].json_body()["title"], "Post 8, revised");
}

#[tokio::test]
async fn failed_image_delete_still_reloads_the_saved_edit() {
    let backend = FakeBackend::new(|req| match req.method {
        Method::Put => Ok(RawResponse::no_content()),
        Method::Delete => status(500, "Internal Server Error"),
        Method::Get => ok_json(json!([])),
        Method::Post => status(404, "Not Found"),
    });
    let h = harness(backend, Some("t0k"));
    let store = PostStore::new(h.client.clone(), SharedCell::new(Vec::new()));
    let mut node = target();
    node.images = vec![social_shared::ImageRef {
        id: 4,
        url: "static/old.png".into(),
    }];

    let mut window = ComposeWindow::open(ComposeVariant::EditPost { post: node }, 4);
    window.remove_current_image();
    window.body = "revised".into();

    let submitted = window.submit(&h.client, &store).await.unwrap();

    assert!(submitted.refreshed);
    assert_eq!(
        h.backend.routes(),
        vec!["PUT /post/8", "DELETE /post/8/image/static/old.png", "GET /post/"]
    );
}
