use domain::{RecordOutcome, WriteOutcome};
use serde::{Deserialize, Serialize};

/// 書き込み結果の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Stored,
    Failed,
}

/// 監査パスの応答（入力レコード1件につき1件、入力順）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
    pub status: AckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteAck {
    /// 書き込み結果からの応答
    pub fn from_outcome(outcome: &RecordOutcome) -> Self {
        let (status, error) = match &outcome.outcome {
            WriteOutcome::Success => (AckStatus::Stored, None),
            WriteOutcome::Failure(cause) => (AckStatus::Failed, Some(cause.clone())),
        };

        Self {
            record_id: Some(outcome.record_id.to_string()),
            object_key: Some(outcome.object_key.clone()),
            status,
            error,
        }
    }

    /// レコードを構築できなかった通知への応答（書き込みは試行されない）
    pub fn malformed(object_key: Option<String>, error: String) -> Self {
        Self {
            record_id: None,
            object_key,
            status: AckStatus::Failed,
            error: Some(error),
        }
    }
}
