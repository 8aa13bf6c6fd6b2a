use serde::{Deserialize, Serialize};

/// ストレージイベント通知のバッチ（監査パスの最上位入力）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationBatch {
    #[serde(rename = "Records")]
    pub records: Vec<Notification>,
}

/// オブジェクト作成通知1件
///
/// ワイヤ上では `{ eventName, s3: { object: { key, eTag } } }` の形で届く。
/// どのフィールドも欠落しうるため全てOptionで受け、必須性の検証は
/// 監査レコードのビルダー側で行う。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub event_name: Option<String>,
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub object: Option<S3Object>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    pub key: Option<String>,
    pub e_tag: Option<String>,
}

impl Notification {
    pub fn object_key(&self) -> Option<&str> {
        self.s3
            .as_ref()
            .and_then(|s3| s3.object.as_ref())
            .and_then(|object| object.key.as_deref())
    }

    pub fn object_etag(&self) -> Option<&str> {
        self.s3
            .as_ref()
            .and_then(|s3| s3.object.as_ref())
            .and_then(|object| object.e_tag.as_deref())
    }
}
