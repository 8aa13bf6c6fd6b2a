use serde::{Deserialize, Serialize};

/// リレーショナルストアで管理される動物レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    /// ストア側で採番されるID
    pub id: i32,
    pub name: String,
    pub color: String,
}

/// insert コマンドの入力ペイロード
///
/// フィールドの欠落はデシリアライズでは弾かず、コマンド検証で
/// ValidationFailure として扱う。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalInput {
    pub name: Option<String>,
    pub color: Option<String>,
}
