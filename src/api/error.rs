// src/api/error.rs

/// Shown when the backend gave no usable message.
pub const GENERIC_FAILURE: &str = "Запрос не выполнен. Попробуйте ещё раз.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No bearer token available; raised before any request is sent.
    #[error("not authenticated")]
    NotAuthenticated,
    /// The backend rejected the token (401).
    #[error("session rejected by backend")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Network failures and 5xx responses may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Text safe to put in front of a user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotAuthenticated | ApiError::Unauthorized => {
                "Сессия истекла. Войдите снова.".to_string()
            }
            ApiError::NotFound => "Не найдено".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(_) | ApiError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
pub fn extract_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"].into_iter().find_map(|key| {
                json.get(key)
                    .and_then(|value| value.as_str())
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
