mod audit;
mod dispatch;
mod responses;

use domain::{CommandRequest, NotificationBatch};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use shared::{tracing::init_tracing, AppError, Config, ErrorResponse};
use tracing::{error, info};

/// 受理するペイロード形状
///
/// 通知コレクション（Records）を持つものは監査パス、state判別子を持つものは
/// ディスパッチパスへルーティングする。どちらにも当てはまらないペイロードは
/// 検証エラーとしてエラーレスポンスになる。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventPayload {
    Notifications(NotificationBatch),
    Command(CommandRequest),
}

/// Lambda関数のエントリーポイント（ペイロード形状によるルーティングのみ行う）
///
/// 失敗はすべて構造化されたエラーレスポンスへ変換して返し、
/// 未処理の例外を呼び出し元へ伝播させない。
async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    let request_id = context.request_id.clone();

    let (result, include_details) = match Config::from_env() {
        Ok(config) => (
            route_event(&config, payload, &request_id).await,
            config.environment != "prod",
        ),
        Err(e) => (Err(AppError::Configuration(e.to_string())), false),
    };

    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            error!(request_id = %request_id, error = %e, code = e.code(), "ハンドラ処理失敗");
            let response = ErrorResponse::from_app_error(&e, request_id, include_details);
            serde_json::to_value(&response).map_err(Error::from)
        }
    }
}

async fn route_event(config: &Config, payload: Value, request_id: &str) -> Result<Value, AppError> {
    match serde_json::from_value::<EventPayload>(payload) {
        Ok(EventPayload::Notifications(batch)) => {
            info!(
                request_id = %request_id,
                record_count = batch.records.len(),
                "通知バッチを受理"
            );
            let acks = audit::process_batch(config, batch).await?;
            serde_json::to_value(&acks).map_err(|e| AppError::Serialization(e.to_string()))
        }
        Ok(EventPayload::Command(request)) => {
            info!(request_id = %request_id, state = %request.state, "コマンドを受理");
            let response = dispatch::execute(config, request).await?;
            serde_json::to_value(&response).map_err(|e| AppError::Serialization(e.to_string()))
        }
        Err(_) => Err(AppError::Domain(domain::DomainError::Validation(
            "ペイロード形状を解釈できません (Records も state もありません)".to_string(),
        ))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if let Err(e) = init_tracing() {
        eprintln!("トレーシング初期化エラー: {e}");
    }

    run(service_fn(function_handler)).await
}
