//! One method per backend route.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::filter::FilterCriteria;
use crate::{
    CreatePost, CreateUser, FilePart, ImageRef, Post, TokenResponse, UpdatePost, UpdateUser, User, VoteResponse,
    VoteType,
};

impl ApiClient {
    // ── Auth ──

    /// Exchange credentials for a bearer token and keep it.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let req = ApiRequest::post("/auth/token").form(&[("username", email), ("password", password)]);
        let token: TokenResponse = self.send_json(req).await?;
        self.tokens().set(&token.access_token);
        Ok(token)
    }

    pub fn logout(&self) {
        self.tokens().clear();
    }

    // ── Users ──

    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let payload = CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(ApiRequest::post("/user/").json(&payload)?).await
    }

    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.send_json(ApiRequest::get("/user/")).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.send_json(ApiRequest::get(format!("/user/{}", user_id))).await
    }

    pub async fn update_user(&self, name: &str, email: &str) -> Result<(), ApiError> {
        let payload = UpdateUser {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.send_unit(ApiRequest::put("/user/").json(&payload)?).await
    }

    pub async fn create_profile_image(&self, image: FilePart) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::post("/user/profile").multipart("image", image))
            .await
    }

    /// `None` when the user has no profile image.
    pub async fn get_profile_image(&self, user_id: i64) -> Result<Option<ImageRef>, ApiError> {
        self.send_optional(ApiRequest::get(format!("/user/{}/profile", user_id)))
            .await
    }

    pub async fn delete_profile_image(&self) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::delete("/user/profile")).await
    }

    // ── Posts ──

    pub async fn create_post(&self, post: &CreatePost) -> Result<Post, ApiError> {
        self.send_json(ApiRequest::post("/post/").json(post)?).await
    }

    pub async fn update_post(&self, post_id: i64, post: &UpdatePost) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::put(format!("/post/{}", post_id)).json(post)?)
            .await
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Post, ApiError> {
        self.send_json(ApiRequest::get(format!("/post/{}", post_id))).await
    }

    /// Root posts matching `criteria`, each with its comments nested.
    pub async fn get_posts(&self, criteria: &FilterCriteria) -> Result<Vec<Post>, ApiError> {
        let query = criteria.query_string();
        let endpoint = if query.is_empty() {
            "/post/".to_string()
        } else {
            format!("/post/?{}", query)
        };
        let req = ApiRequest::get(endpoint);
        Ok(self.send_optional(req).await?.unwrap_or_default())
    }

    pub async fn vote(&self, post_id: i64, vote: VoteType) -> Result<VoteResponse, ApiError> {
        let endpoint = format!("/post/{}/vote/?vote_type={}", post_id, vote.as_str());
        self.send_json(ApiRequest::post(endpoint)).await
    }

    // ── Post images ──

    pub async fn create_post_image(&self, post_id: i64, image: FilePart) -> Result<(), ApiError> {
        let req = ApiRequest::post(format!("/post/{}/image/", post_id)).multipart("image", image);
        self.send_unit(req).await
    }

    pub async fn get_post_images(&self, post_id: i64) -> Result<Vec<ImageRef>, ApiError> {
        let req = ApiRequest::get(format!("/post/{}/images", post_id));
        Ok(self.send_optional(req).await?.unwrap_or_default())
    }

    pub async fn delete_post_image(&self, post_id: i64, image: &ImageRef) -> Result<(), ApiError> {
        let path = image.url.trim_start_matches('/');
        self.send_unit(ApiRequest::delete(format!("/post/{}/image/{}", post_id, path)))
            .await
    }
}
