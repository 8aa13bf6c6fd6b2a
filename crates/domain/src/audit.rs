use crate::errors::{DomainError, DomainResult};
use crate::identifiers::RecordId;
use crate::notification::Notification;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 監査レコード（通知1件から導出される）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: RecordId,
    pub event_name: String,
    /// エポックミリ秒。通知の発生時刻ではなく処理時刻を記録する
    pub timestamp: i64,
    pub object_key: String,
    pub object_etag: String,
}

impl AuditRecord {
    /// 通知から監査レコードを構築する
    ///
    /// 必須フィールドが欠けている場合はレコードを作らず
    /// MalformedNotification で失敗させる。
    /// 同一通知が再配信された場合は新しいIDで別レコードになる（重複排除はしない）。
    pub fn from_notification(notification: &Notification) -> DomainResult<Self> {
        let event_name = notification.event_name.as_deref().ok_or_else(|| {
            DomainError::MalformedNotification("eventName がありません".to_string())
        })?;
        let object_key = notification.object_key().ok_or_else(|| {
            DomainError::MalformedNotification("s3.object.key がありません".to_string())
        })?;
        let object_etag = notification.object_etag().ok_or_else(|| {
            DomainError::MalformedNotification("s3.object.eTag がありません".to_string())
        })?;

        Ok(Self {
            id: RecordId::new(),
            event_name: event_name.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            object_key: object_key.to_string(),
            object_etag: object_etag.to_string(),
        })
    }
}

/// 書き込み1件の終端結果
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Success,
    Failure(String),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }
}

/// レコード識別子と書き込み結果の対応
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub record_id: RecordId,
    pub object_key: String,
    pub outcome: WriteOutcome,
}

/// バッチ書き込みの全件レポート
///
/// 最初の失敗だけでなく全レコードの結果を保持する。
/// 書き込み順（= 入力順）で並ぶ。
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<RecordOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.outcome.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.outcome.is_success())
            .count()
    }

    /// 最初の失敗（全件の粒度が不要な呼び出し側向けのビュー）
    pub fn first_failure(&self) -> Option<&RecordOutcome> {
        self.outcomes.iter().find(|o| !o.outcome.is_success())
    }
}
