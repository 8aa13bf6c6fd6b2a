use domain::{AuditRecord, BatchReport, DomainError, Notification, NotificationBatch};
use infrastructure::AuditStore;
use shared::{AppError, Config};
use tracing::{info, warn};

use crate::responses::WriteAck;

/// 通知バッチを監査レコード化して書き込み、入力順の応答を組み立てる
///
/// 不正な通知はその1件だけを失敗させ、残りのレコードは書き込みを試行する。
/// 全書き込みの完了を待ってから応答を返す。
pub async fn process_batch(
    config: &Config,
    batch: NotificationBatch,
) -> Result<Vec<WriteAck>, AppError> {
    let built: Vec<Result<AuditRecord, DomainError>> = batch
        .records
        .iter()
        .map(AuditRecord::from_notification)
        .collect();

    for error in built.iter().filter_map(|r| r.as_ref().err()) {
        warn!(error = %error, "不正な通知をスキップ");
    }

    let valid: Vec<AuditRecord> = built
        .iter()
        .filter_map(|r| r.as_ref().ok().cloned())
        .collect();

    // 有効なレコードが無ければストアに触らない
    let report = if valid.is_empty() {
        BatchReport::default()
    } else {
        let store = AuditStore::new(config).await?;
        store.write_batch(&valid).await
    };

    info!(
        received = batch.records.len(),
        written = report.len() - report.failure_count(),
        failed = built.len() - valid.len() + report.failure_count(),
        "監査バッチ処理完了"
    );

    Ok(merge_acks(&batch.records, &built, &report))
}

/// ビルド結果と書き込みレポートを入力順の応答へ合成する
///
/// レポートの並びは有効レコードの書き込み順（= 入力順）なので、
/// 入力を走査しながら有効レコード1件につき結果を1件ずつ消費する。
fn merge_acks(
    records: &[Notification],
    built: &[Result<AuditRecord, DomainError>],
    report: &BatchReport,
) -> Vec<WriteAck> {
    let mut outcomes = report.outcomes().iter();

    records
        .iter()
        .zip(built)
        .map(|(notification, result)| match result {
            Ok(_) => match outcomes.next() {
                Some(outcome) => WriteAck::from_outcome(outcome),
                None => WriteAck::malformed(
                    notification.object_key().map(str::to_string),
                    "書き込み結果がありません".to_string(),
                ),
            },
            Err(e) => WriteAck::malformed(
                notification.object_key().map(str::to_string),
                e.to_string(),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::AckStatus;
    use domain::{RecordId, RecordOutcome, WriteOutcome};
    use serde_json::json;

    fn batch(value: serde_json::Value) -> NotificationBatch {
        serde_json::from_value(value).unwrap()
    }

    fn build_all(batch: &NotificationBatch) -> Vec<Result<AuditRecord, DomainError>> {
        batch
            .records
            .iter()
            .map(AuditRecord::from_notification)
            .collect()
    }

    fn outcome_for(record: &AuditRecord, outcome: WriteOutcome) -> RecordOutcome {
        RecordOutcome {
            record_id: record.id.clone(),
            object_key: record.object_key.clone(),
            outcome,
        }
    }

    #[test]
    fn test_merge_acks_one_per_input_in_order() {
        let batch = batch(json!({
            "Records": [
                { "eventName": "ObjectCreated:Put",
                  "s3": { "object": { "key": "a.txt", "eTag": "e1" } } },
                { "s3": { "object": { "key": "broken.txt", "eTag": "e2" } } },
                { "eventName": "ObjectCreated:Put",
                  "s3": { "object": { "key": "c.txt", "eTag": "e3" } } }
            ]
        }));

        let built = build_all(&batch);
        assert!(built[0].is_ok());
        assert!(built[1].is_err());
        assert!(built[2].is_ok());

        let first = built[0].as_ref().unwrap();
        let third = built[2].as_ref().unwrap();
        let report = BatchReport::new(vec![
            outcome_for(first, WriteOutcome::Success),
            outcome_for(third, WriteOutcome::Failure("throttled".to_string())),
        ]);

        let acks = merge_acks(&batch.records, &built, &report);
        assert_eq!(acks.len(), 3);

        // 1件目: 書き込み成功
        assert_eq!(acks[0].status, AckStatus::Stored);
        assert_eq!(acks[0].record_id, Some(first.id.to_string()));
        assert_eq!(acks[0].object_key.as_deref(), Some("a.txt"));

        // 2件目: 不正な通知（書き込み自体が行われない）
        assert_eq!(acks[1].status, AckStatus::Failed);
        assert!(acks[1].record_id.is_none());
        assert_eq!(acks[1].object_key.as_deref(), Some("broken.txt"));
        assert!(acks[1].error.as_deref().unwrap().contains("eventName"));

        // 3件目: 書き込み失敗（不正な2件目の影響を受けず試行される）
        assert_eq!(acks[2].status, AckStatus::Failed);
        assert_eq!(acks[2].record_id, Some(third.id.to_string()));
        assert_eq!(acks[2].error.as_deref(), Some("throttled"));
    }

    #[test]
    fn test_merge_acks_all_malformed() {
        let batch = batch(json!({ "Records": [ {}, {} ] }));
        let built = build_all(&batch);

        let acks = merge_acks(&batch.records, &built, &BatchReport::default());
        assert_eq!(acks.len(), 2);
        assert!(acks.iter().all(|a| a.status == AckStatus::Failed));
        assert!(acks.iter().all(|a| a.record_id.is_none()));
    }

    #[test]
    fn test_merge_acks_empty_batch() {
        let batch = batch(json!({ "Records": [] }));
        let built = build_all(&batch);

        let acks = merge_acks(&batch.records, &built, &BatchReport::default());
        assert!(acks.is_empty());
    }
}
