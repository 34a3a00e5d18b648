use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ComposeError;
use crate::feed::FeedRefresher;
use crate::images::{check_limit, is_allowed_type, ImageStrip, PendingImage};
use crate::tree::PostNode;
use crate::{CreatePost, ImageRef, UpdatePost};

/// What the compose window is for. Comment and edit variants carry the node
/// they act on.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeVariant {
    CreatePost,
    EditPost { post: PostNode },
    CreateComment { parent: PostNode },
    EditComment { post: PostNode },
}

impl ComposeVariant {
    pub fn is_edit(&self) -> bool {
        matches!(self, ComposeVariant::EditPost { .. } | ComposeVariant::EditComment { .. })
    }

    pub fn is_post(&self) -> bool {
        matches!(self, ComposeVariant::CreatePost | ComposeVariant::EditPost { .. })
    }

    pub fn heading(&self) -> String {
        format!(
            "{} {}",
            if self.is_edit() { "Edit" } else { "Create" },
            if self.is_post() { "Post" } else { "Comment" }
        )
    }

    pub fn body_label(&self) -> &'static str {
        if self.is_post() {
            "Body"
        } else {
            "Your Comment"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeImage {
    Persisted(ImageRef),
    Pending(PendingImage),
}

impl ComposeImage {
    pub fn preview_url(&self, config: &ClientConfig) -> String {
        match self {
            ComposeImage::Persisted(image) => config.resolve_url(&image.url),
            ComposeImage::Pending(image) => image.preview_url.clone(),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub post_id: i64,
    /// Pending images that made it to the server, in selection order.
    pub uploaded: usize,
    pub refreshed: bool,
}

/// Form state for creating or editing a post or comment.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeWindow {
    variant: ComposeVariant,
    pub title: String,
    pub body: String,
    pub images: ImageStrip<ComposeImage>,
    removed: Vec<ImageRef>,
    max_images: usize,
}

impl ComposeWindow {
    /// Fresh form; edit variants start from the node's current content.
    pub fn open(variant: ComposeVariant, max_images: usize) -> Self {
        let (title, body, images) = match &variant {
            ComposeVariant::EditPost { post } | ComposeVariant::EditComment { post } => (
                post.title().unwrap_or_default().to_string(),
                post.body.clone(),
                post.images.iter().cloned().map(ComposeImage::Persisted).collect(),
            ),
            _ => (String::new(), String::new(), Vec::new()),
        };
        Self {
            variant,
            title,
            body,
            images: ImageStrip::new(images),
            removed: Vec::new(),
            max_images,
        }
    }

    pub fn variant(&self) -> &ComposeVariant {
        &self.variant
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    pub fn can_add_images(&self) -> bool {
        self.images.len() < self.max_images
    }

    /// Queue picked files. Either all of them are accepted or none.
    pub fn add_images(&mut self, picked: Vec<PendingImage>) -> Result<(), ComposeError> {
        check_limit(self.images.len(), picked.len(), self.max_images, false)?;
        if let Some(bad) = picked.iter().find(|p| !is_allowed_type(&p.file.content_type)) {
            return Err(ComposeError::UnsupportedType(bad.file.content_type.clone()));
        }
        self.images
            .push_many(picked.into_iter().map(ComposeImage::Pending).collect());
        Ok(())
    }

    /// Drop the displayed image. Removing a stored image deletes it on
    /// submit.
    pub fn remove_current_image(&mut self) -> Option<ComposeImage> {
        let removed = self.images.remove_current()?;
        if let ComposeImage::Persisted(image) = &removed {
            self.removed.push(image.clone());
        }
        Some(removed)
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.variant.is_post() && self.title.trim().is_empty() {
            return Err(ComposeError::MissingTitle);
        }
        if self.body.trim().is_empty() {
            return Err(ComposeError::EmptyBody);
        }
        Ok(())
    }

    /// Save the form, upload new images one at a time in the order they
    /// were picked, then reload the feed.
    ///
    /// An upload failure stops the remaining uploads but the submission
    /// still counts; a failed reload is only logged. If the post itself
    /// cannot be saved nothing else happens.
    pub async fn submit(self, client: &ApiClient, feed: &dyn FeedRefresher) -> Result<Submitted, ComposeError> {
        self.validate()?;

        let pending: Vec<PendingImage> = self
            .images
            .items()
            .iter()
            .filter_map(|img| match img {
                ComposeImage::Pending(p) => Some(p.clone()),
                ComposeImage::Persisted(_) => None,
            })
            .collect();

        let post_id = match &self.variant {
            ComposeVariant::CreatePost => {
                let created = client
                    .create_post(&CreatePost {
                        title: Some(self.title.clone()),
                        body: self.body.clone(),
                        parent_id: None,
                    })
                    .await?;
                created.id
            }
            ComposeVariant::CreateComment { parent } => {
                let created = client
                    .create_post(&CreatePost {
                        title: Some(parent.comment_title()),
                        body: self.body.clone(),
                        parent_id: Some(parent.id),
                    })
                    .await?;
                created.id
            }
            ComposeVariant::EditPost { post } | ComposeVariant::EditComment { post } => {
                let title = self.variant.is_post().then(|| self.title.clone());
                client
                    .update_post(
                        post.id,
                        &UpdatePost {
                            title,
                            body: self.body.clone(),
                        },
                    )
                    .await?;
                // The update is saved already, so a failed delete must not
                // skip the reload below.
                for image in &self.removed {
                    if let Err(err) = client.delete_post_image(post.id, image).await {
                        tracing::warn!(post_id = post.id, url = %image.url, "image delete failed: {}", err);
                    }
                }
                post.id
            }
        };

        let uploaded = upload_in_order(client, post_id, pending).await;

        let refreshed = match feed.reload().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(post_id, "feed reload after submit failed: {}", err);
                false
            }
        };

        tracing::info!(post_id, uploaded, kind = %self.variant.heading(), "submitted");
        Ok(Submitted {
            post_id,
            uploaded,
            refreshed,
        })
    }
}

async fn upload_in_order(client: &ApiClient, post_id: i64, images: Vec<PendingImage>) -> usize {
    let total = images.len();
    let mut uploaded = 0;
    for image in images {
        if let Err(err) = client.create_post_image(post_id, image.file).await {
            tracing::warn!(post_id, uploaded, total, "image upload stopped: {}", err);
            break;
        }
        uploaded += 1;
    }
    uploaded
}
