#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use social_shared::{
    ApiClient, ApiError, ApiRequest, ClientConfig, MemoryTokens, Method, Notice, Notifier, RawResponse, RequestBody,
    Transport,
};

/// A request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub endpoint: String,
    pub authorization: Option<String>,
    pub body: RequestBody,
}

impl Call {
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }

    pub fn uploaded_file_name(&self) -> Option<&str> {
        match &self.body {
            RequestBody::Multipart { file, .. } => Some(file.file_name.as_str()),
            _ => None,
        }
    }

    pub fn json_body(&self) -> serde_json::Value {
        match &self.body {
            RequestBody::Json(s) => serde_json::from_str(s).expect("json body"),
            other => panic!("expected a JSON body, got {:?}", other),
        }
    }
}

type Handler = Box<dyn Fn(&ApiRequest) -> Result<RawResponse, ApiError> + Send + Sync>;

pub struct FakeBackend {
    handler: Handler,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new(handler: impl Fn(&ApiRequest) -> Result<RawResponse, ApiError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls().iter().map(Call::route).collect()
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.calls.lock().unwrap().push(Call {
            method: request.method,
            url: url.to_string(),
            endpoint: request.endpoint.clone(),
            authorization: request.header_value("Authorization").map(str::to_string),
            body: request.body.clone(),
        });
        (self.handler)(request)
    }
}

#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<Notice>>);

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.key).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub backend: Arc<FakeBackend>,
    pub tokens: Arc<MemoryTokens>,
    pub notices: Arc<RecordingNotifier>,
}

pub fn harness(backend: Arc<FakeBackend>, token: Option<&str>) -> Harness {
    let tokens = Arc::new(match token {
        Some(t) => MemoryTokens::with_token(t),
        None => MemoryTokens::default(),
    });
    let notices = Arc::new(RecordingNotifier::default());
    let config = ClientConfig::default().with_api_base("http://api.test");
    let client = ApiClient::new(config, backend.clone(), tokens.clone(), notices.clone());
    Harness {
        client,
        backend,
        tokens,
        notices,
    }
}

pub fn ok_json(value: serde_json::Value) -> Result<RawResponse, ApiError> {
    Ok(RawResponse::json(200, value.to_string()))
}

pub fn status(code: u16, detail: &str) -> Result<RawResponse, ApiError> {
    Ok(RawResponse::json(code, serde_json::json!({ "detail": detail }).to_string()))
}

pub fn user_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name),
        "profile_image": null,
    })
}

pub fn post_json(id: i64, parent_id: Option<i64>, comments: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": if parent_id.is_some() { serde_json::Value::Null } else { serde_json::json!(format!("Post {}", id)) },
        "body": format!("body {}", id),
        "author": user_json(1, "ada"),
        "created_at": "2024-05-01T12:00:00",
        "images": [],
        "upvote_count": 1,
        "downvote_count": 0,
        "current_user_vote": null,
        "comment_count": comments.len(),
        "parent_id": parent_id,
        "comments": comments,
    })
}

pub fn pending(name: &str) -> social_shared::PendingImage {
    social_shared::PendingImage {
        file: social_shared::FilePart {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: name.as_bytes().to_vec(),
        },
        preview_url: format!("blob:{}", name),
    }
}
