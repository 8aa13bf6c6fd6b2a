use aws_sdk_secretsmanager::Client;
use serde::Deserialize;
use shared::AppError;

/// Secrets Managerに格納されたDB接続情報
#[derive(Debug, Clone, Deserialize)]
pub struct DbSecret {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub username: String,
    pub password: String,
}

/// DB接続情報を取得するSecrets Managerクライアント
pub struct SecretsClient {
    client: Client,
}

impl SecretsClient {
    pub async fn new() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&aws_config),
        }
    }

    /// シークレットを取得してDB接続情報として解釈する
    ///
    /// 取得・解釈に失敗した場合は接続自体が確立できないため
    /// ConnectionUnavailable として返す。
    pub async fn fetch_db_secret(&self, secret_arn: &str) -> Result<DbSecret, AppError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_arn)
            .send()
            .await
            .map_err(|e| {
                AppError::ConnectionUnavailable(format!("シークレット取得失敗: {e}"))
            })?;

        let secret_string = output.secret_string().ok_or_else(|| {
            AppError::ConnectionUnavailable("シークレット文字列が空です".to_string())
        })?;

        serde_json::from_str(secret_string).map_err(|e| {
            AppError::ConnectionUnavailable(format!("シークレット形式が不正です: {e}"))
        })
    }
}
