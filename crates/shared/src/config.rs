use std::env;

use crate::errors::AppError;

/// 実行環境から読み込む設定
///
/// AUDIT_TABLE_NAME と RDS_SECRET_ARN はそれぞれ監査パス・ディスパッチパス
/// でのみ必須のため、読み込み時点では欠落を許容する。
#[derive(Debug, Clone)]
pub struct Config {
    pub audit_table_name: Option<String>,
    pub rds_secret_arn: Option<String>,
    pub environment: String,
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            audit_table_name: env::var("AUDIT_TABLE_NAME").ok(),
            rds_secret_arn: env::var("RDS_SECRET_ARN").ok(),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
        })
    }

    /// 監査パスで必須のテーブル名
    pub fn require_audit_table(&self) -> Result<&str, AppError> {
        self.audit_table_name.as_deref().ok_or_else(|| {
            AppError::Configuration("AUDIT_TABLE_NAME が設定されていません".to_string())
        })
    }

    /// ディスパッチパスで必須のシークレットARN
    pub fn require_secret_arn(&self) -> Result<&str, AppError> {
        self.rds_secret_arn.as_deref().ok_or_else(|| {
            AppError::Configuration("RDS_SECRET_ARN が設定されていません".to_string())
        })
    }
}
