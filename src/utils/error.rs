use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Remote request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("User store error: {message}")]
    StoreError { message: String },

    #[error("Invalid categories provided")]
    InvalidCategories,

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },
}

/// 錯誤分類，對應 HTTP 回應的四種情況加上啟動時的設定錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authorization,
    NotFound,
    Infrastructure,
    Configuration,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::InvalidCategories | AppError::MalformedPayload { .. } => {
                ErrorCategory::Validation
            }
            AppError::Unauthorized => ErrorCategory::Authorization,
            AppError::UserNotFound { .. } => ErrorCategory::NotFound,
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AppError::HttpError(_)
            | AppError::CsvError(_)
            | AppError::IoError(_)
            | AppError::SerializationError(_)
            | AppError::CatalogError { .. }
            | AppError::StoreError { .. } => ErrorCategory::Infrastructure,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Authorization => StatusCode::UNAUTHORIZED,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Infrastructure | ErrorCategory::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 給呼叫端看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::InvalidCategories => "Invalid categories provided".to_string(),
            AppError::MalformedPayload { .. } => "Malformed request body".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::UserNotFound { .. } => "User not found".to_string(),
            _ => match self.category() {
                ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
                _ => "Something went wrong!".to_string(),
            },
        }
    }

    /// 回應主體；5xx 的 `error` 只放狀態文字，細節只寫進日誌
    pub fn response_body(&self) -> Value {
        let status = self.status_code();
        let error = if status.is_server_error() {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.to_string()
        };

        json!({
            "message": self.user_friendly_message(),
            "error": error,
        })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Send a JSON body of the form {\"categories\": [\"name\", ...]}",
            ErrorCategory::Authorization => "Provide a valid 'Authorization: Bearer <token>' header",
            ErrorCategory::NotFound => "Check that the user record exists in the user store",
            ErrorCategory::Infrastructure => "Check the user store and catalog snapshot, then retry",
            ErrorCategory::Configuration => "Fix the configuration file or CLI flags and restart",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(self.response_body())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
