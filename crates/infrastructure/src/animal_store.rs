use domain::AnimalRecord;
use shared::AppError;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{Connection, PgConnection, Row};
use tracing::info;

use crate::secrets::DbSecret;

const CREATE_ANIMALS_SQL: &str = include_str!("../sql/create_animals.sql");

/// animals テーブルに対するPostgresストア
///
/// 接続は呼び出しごとに確立し、プールは持たない。使い終わったら
/// close で明示的に閉じる。
pub struct AnimalStore {
    conn: PgConnection,
}

impl AnimalStore {
    /// 接続情報から新しい接続を確立する
    ///
    /// 確立できない場合は ConnectionUnavailable とし、以降の操作へ進まない。
    pub async fn connect(secret: &DbSecret) -> Result<Self, AppError> {
        let options = PgConnectOptions::new()
            .host(&secret.host)
            .port(secret.port)
            .database(&secret.dbname)
            .username(&secret.username)
            .password(&secret.password);

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| AppError::ConnectionUnavailable(format!("DB接続失敗: {e}")))?;

        info!(host = %secret.host, dbname = %secret.dbname, "DB接続確立");
        Ok(Self { conn })
    }

    /// animals テーブルを破棄して再作成する
    pub async fn reset(&mut self) -> Result<(), AppError> {
        sqlx::query("DROP TABLE IF EXISTS animals;")
            .execute(&mut self.conn)
            .await
            .map_err(|e| AppError::WriteFailure(format!("テーブル破棄失敗: {e}")))?;

        sqlx::query(CREATE_ANIMALS_SQL)
            .execute(&mut self.conn)
            .await
            .map_err(|e| AppError::WriteFailure(format!("テーブル作成失敗: {e}")))?;

        Ok(())
    }

    /// 動物レコードを1件挿入し、採番済みのレコードを返す
    pub async fn insert(&mut self, name: &str, color: &str) -> Result<AnimalRecord, AppError> {
        let row =
            sqlx::query("INSERT INTO animals (name, color) VALUES ($1, $2) RETURNING id, name, color;")
                .bind(name)
                .bind(color)
                .fetch_one(&mut self.conn)
                .await
                .map_err(|e| AppError::WriteFailure(format!("挿入失敗: {e}")))?;

        row_to_animal(&row)
    }

    /// 全レコードを作成順（ID昇順）に列挙する
    pub async fn all(&mut self) -> Result<Vec<AnimalRecord>, AppError> {
        let rows = sqlx::query("SELECT id, name, color FROM animals ORDER BY id;")
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| AppError::Internal(format!("一覧取得失敗: {e}")))?;

        rows.iter().map(row_to_animal).collect()
    }

    /// 接続を明示的に閉じる
    pub async fn close(self) -> Result<(), AppError> {
        self.conn
            .close()
            .await
            .map_err(|e| AppError::Internal(format!("接続クローズ失敗: {e}")))
    }
}

fn row_to_animal(row: &PgRow) -> Result<AnimalRecord, AppError> {
    Ok(AnimalRecord {
        id: row
            .try_get("id")
            .map_err(|e| AppError::Internal(format!("id列の読み出し失敗: {e}")))?,
        name: row
            .try_get("name")
            .map_err(|e| AppError::Internal(format!("name列の読み出し失敗: {e}")))?,
        color: row
            .try_get("color")
            .map_err(|e| AppError::Internal(format!("color列の読み出し失敗: {e}")))?,
    })
}
