use async_trait::async_trait;
use gloo_net::http::Request;
use social_shared::{ApiError, ApiRequest, ClientConfig, FilePart, Method, PendingImage, RawResponse, RequestBody, TokenStore, Transport};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Array, Uint8Array};
use web_sys::{window, Blob, BlobPropertyBag, File, FormData, Url};

fn meta_content(name: &str) -> Option<String> {
    let document = window()?.document()?;
    let el = document
        .query_selector(&format!("meta[name='{}']", name))
        .ok()
        .flatten()?;
    el.get_attribute("content").filter(|c| !c.is_empty())
}

/// Read settings from `<meta>` tags set by the host page, falling back to
/// the local dev backend.
pub fn load_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(base) = meta_content("social-api") {
        config = config.with_api_base(&base);
    }
    if let Some(level) = meta_content("social-log") {
        config = config.with_log_level(&level);
    }
    config
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

// ── Token storage ──

/// Bearer token kept in `localStorage` under a configurable key.
pub struct LocalStorageTokens {
    key: String,
}

impl LocalStorageTokens {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

fn storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl TokenStore for LocalStorageTokens {
    fn get(&self) -> Option<String> {
        storage()?.get_item(&self.key).ok()?
    }

    fn set(&self, token: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(&self.key, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

// ── Transport ──

/// `fetch` through gloo-net.
pub struct BrowserTransport;

fn form_data(field: &str, file: &FilePart) -> Result<FormData, ApiError> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| ApiError::Encode(js_error(e)))?;
    let form = FormData::new().map_err(|e| ApiError::Encode(js_error(e)))?;
    form.append_with_blob_and_filename(field, &blob, &file.file_name)
        .map_err(|e| ApiError::Encode(js_error(e)))?;
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let req = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(body) | RequestBody::Form(body) => builder.body(body.as_str()),
            RequestBody::Multipart { field, file } => builder.body(form_data(field, file)?),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let content_type = resp.headers().get("content-type");
        let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(RawResponse {
            status: resp.status(),
            status_text: resp.status_text(),
            content_type,
            body,
        })
    }
}

// ── Files ──

/// Load a picked file into memory and give it a preview URL.
pub async fn read_file(file: &File) -> Result<PendingImage, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let preview_url = Url::create_object_url_with_blob(file).map_err(js_error)?;
    Ok(PendingImage {
        file: FilePart {
            file_name: file.name(),
            content_type: file.type_(),
            bytes,
        },
        preview_url,
    })
}

pub fn release_preview(image: &PendingImage) {
    let _ = Url::revoke_object_url(&image.preview_url);
}
