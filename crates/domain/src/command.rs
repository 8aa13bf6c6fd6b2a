use crate::animal::{AnimalInput, AnimalRecord};
use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// ディスパッチ要求のワイヤ形状（state判別子と任意のdata）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnimalInput>,
}

/// 検証済みコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Insert { name: String, color: String },
    All,
}

impl Command {
    /// ワイヤ形状を検証済みコマンドへ変換する
    ///
    /// 未知のstateは空結果への読み替えをせず UnrecognizedCommand で失敗させる。
    /// insert の name / color は空白のみの値も欠落として扱う。
    pub fn parse(request: &CommandRequest) -> DomainResult<Self> {
        match request.state.as_str() {
            "reset" => Ok(Command::Reset),
            "insert" => {
                let data = request.data.as_ref().ok_or_else(|| {
                    DomainError::Validation("insert には data が必要です".to_string())
                })?;
                let name = required_field(&data.name, "name")?;
                let color = required_field(&data.color, "color")?;
                Ok(Command::Insert { name, color })
            }
            "all" => Ok(Command::All),
            other => Err(DomainError::UnrecognizedCommand(other.to_string())),
        }
    }
}

fn required_field(value: &Option<String>, field: &str) -> DomainResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::Validation(format!("{field} は必須です")))
}

/// ディスパッチ応答のエンベロープ
///
/// 外部タグ付きで `{"reset": "OK"}` / `{"insert": {...}}` / `{"all": [...]}`
/// の形にシリアライズされる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandResponse {
    #[serde(rename = "reset")]
    Reset(String),
    #[serde(rename = "insert")]
    Insert(AnimalRecord),
    #[serde(rename = "all")]
    All(Vec<AnimalRecord>),
}

impl CommandResponse {
    pub fn reset_ok() -> Self {
        CommandResponse::Reset("OK".to_string())
    }
}
