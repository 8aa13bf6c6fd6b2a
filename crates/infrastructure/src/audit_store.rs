use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use domain::{AuditRecord, BatchReport, RecordId, RecordOutcome, WriteOutcome};
use shared::{AppError, Config};
use tracing::{info, warn};

/// 監査レコード用のDynamoDBストア
///
/// クライアントは呼び出しごとに構築する。モジュールロード時の
/// 共有クライアントは持たない。
#[derive(Clone)]
pub struct AuditStore {
    client: Client,
    table_name: String,
}

impl AuditStore {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let table_name = config.require_audit_table()?.to_string();
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        // ローカル実行時のみエンドポイントを差し替える
        let client = match &config.dynamodb_endpoint {
            Some(endpoint) => {
                let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&aws_config)
                    .endpoint_url(endpoint)
                    .build();
                Client::from_conf(dynamo_config)
            }
            None => Client::new(&aws_config),
        };

        Ok(Self { client, table_name })
    }

    /// 監査レコードを1件書き込む
    pub async fn put_record(&self, record: &AuditRecord) -> Result<(), AppError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| AppError::WriteFailure(e.to_string()))?;

        Ok(())
    }

    /// IDで監査レコードを読み出す
    pub async fn get_record(&self, id: &RecordId) -> Result<Option<AuditRecord>, AppError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(result.item().and_then(item_to_record))
    }

    /// バッチ内の全レコードを並行に書き込み、全件の結果を収集する
    ///
    /// 書き込み同士は独立で順序保証はない。最初の失敗で打ち切らず、
    /// 全書き込みの完了を待ってからレポートを返す。
    pub async fn write_batch(&self, records: &[AuditRecord]) -> BatchReport {
        let writes = records.iter().map(|record| async move {
            let outcome = match self.put_record(record).await {
                Ok(()) => WriteOutcome::Success,
                Err(e) => {
                    warn!(
                        record_id = %record.id,
                        object_key = %record.object_key,
                        error = %e,
                        "監査レコード書き込み失敗"
                    );
                    WriteOutcome::Failure(e.to_string())
                }
            };
            RecordOutcome {
                record_id: record.id.clone(),
                object_key: record.object_key.clone(),
                outcome,
            }
        });

        let report = BatchReport::new(futures::future::join_all(writes).await);

        info!(
            total = report.len(),
            failed = report.failure_count(),
            "監査バッチ書き込み完了"
        );
        report
    }
}

/// AuditRecordをDynamoDB属性マップへ変換
fn record_to_item(record: &AuditRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "id".to_string(),
            AttributeValue::S(record.id.as_str().to_string()),
        ),
        (
            "eventName".to_string(),
            AttributeValue::S(record.event_name.clone()),
        ),
        (
            "timestamp".to_string(),
            AttributeValue::N(record.timestamp.to_string()),
        ),
        (
            "object_key".to_string(),
            AttributeValue::S(record.object_key.clone()),
        ),
        (
            "object_etag".to_string(),
            AttributeValue::S(record.object_etag.clone()),
        ),
    ])
}

/// DynamoDB属性マップからAuditRecordを復元
fn item_to_record(item: &HashMap<String, AttributeValue>) -> Option<AuditRecord> {
    Some(AuditRecord {
        id: RecordId::from_string(item.get("id")?.as_s().ok()?.clone()).ok()?,
        event_name: item.get("eventName")?.as_s().ok()?.clone(),
        timestamp: item.get("timestamp")?.as_n().ok()?.parse().ok()?,
        object_key: item.get("object_key")?.as_s().ok()?.clone(),
        object_etag: item.get("object_etag")?.as_s().ok()?.clone(),
    })
}
