use domain::{Command, CommandRequest, CommandResponse};
use infrastructure::{AnimalStore, SecretsClient};
use shared::{AppError, Config};
use tracing::{info, warn};

/// コマンドを検証してからリレーショナル操作を1回実行する
///
/// 検証エラー（UnrecognizedCommand / ValidationFailure）はシークレット取得や
/// 接続より前に返すため、一切の副作用を持たない。接続は呼び出しごとに確立し、
/// 操作の成否によらず明示的に閉じる。
pub async fn execute(
    config: &Config,
    request: CommandRequest,
) -> Result<CommandResponse, AppError> {
    let command = Command::parse(&request)?;

    let secret_arn = config.require_secret_arn()?;
    let secrets = SecretsClient::new().await;
    let secret = secrets.fetch_db_secret(secret_arn).await?;

    let mut store = AnimalStore::connect(&secret).await?;

    let result = run_command(&mut store, &command).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "DB接続クローズ失敗");
    }

    result
}

async fn run_command(
    store: &mut AnimalStore,
    command: &Command,
) -> Result<CommandResponse, AppError> {
    match command {
        Command::Reset => {
            store.reset().await?;
            info!("animals テーブルを再作成");
            Ok(CommandResponse::reset_ok())
        }
        Command::Insert { name, color } => {
            let record = store.insert(name, color).await?;
            info!(id = record.id, "動物レコードを挿入");
            Ok(CommandResponse::Insert(record))
        }
        Command::All => {
            let records = store.all().await?;
            info!(count = records.len(), "動物レコードを列挙");
            Ok(CommandResponse::All(records))
        }
    }
}
