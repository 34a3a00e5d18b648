use thiserror::Error;

/// Fallback shown when the server gives neither a detail nor a status text.
pub const GENERIC_ERROR_MESSAGE: &str = "An error has occurred, please try again later.";

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("{0}")]
    Network(String),

    /// Non-2xx response. `message` is the server detail when there is one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),

    /// A typed call got an empty (204 or non-JSON) body.
    #[error("the server returned no content")]
    Empty,

    #[error("you need to log in first")]
    NotLoggedIn,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Failure of the compose window, before or during submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("a title is required")]
    MissingTitle,

    #[error("the body cannot be empty")]
    EmptyBody,

    #[error("You can upload a maximum of {0} images.")]
    ImageLimit(usize),

    #[error("{0} is not a supported image type")]
    UnsupportedType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accessors() {
        let err = ApiError::Status {
            status: 401,
            message: "Could not validate credentials".into(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Could not validate credentials");
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }

    #[test]
    fn image_limit_message_matches_the_notice_text() {
        assert_eq!(
            ComposeError::ImageLimit(4).to_string(),
            "You can upload a maximum of 4 images."
        );
    }
}
