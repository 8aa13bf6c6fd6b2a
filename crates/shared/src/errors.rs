use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アプリケーション全体で使用されるエラー型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    // ドメインエラー（入力検証の段階で発生し、副作用を持たない）
    #[error("Domain error: {0}")]
    Domain(#[from] domain::DomainError),

    // インフラストラクチャエラー
    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("Connection unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // システムエラー
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 呼び出し側が分岐に使える安定したエラーコード
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(domain::DomainError::MalformedNotification(_)) => {
                "MALFORMED_NOTIFICATION"
            }
            AppError::Domain(domain::DomainError::UnrecognizedCommand(_)) => "UNRECOGNIZED_COMMAND",
            AppError::Domain(domain::DomainError::Validation(_)) => "VALIDATION_FAILURE",
            AppError::Domain(domain::DomainError::InvalidRecordId(_)) => "VALIDATION_FAILURE",
            AppError::WriteFailure(_) => "WRITE_FAILURE",
            AppError::ConnectionUnavailable(_) => "CONNECTION_UNAVAILABLE",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// 標準化されたエラーレスポンス
///
/// エントリポイントは未処理の例外を外に出さず、必ずこの形に変換して返す。
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// エラーコード
    pub code: String,
    /// メッセージ
    pub message: String,
    /// 詳細情報（開発環境のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// リクエストID
    pub request_id: String,
    /// タイムスタンプ
    pub timestamp: String,
}

impl ErrorResponse {
    /// AppErrorからErrorResponseを作成
    pub fn from_app_error(error: &AppError, request_id: String, include_details: bool) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            details: if include_details {
                Some(format!("{error:?}"))
            } else {
                None
            },
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::Serialization(e.to_string()))
    }
}
