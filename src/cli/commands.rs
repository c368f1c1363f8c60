//! CLI command implementations
//!
//! `serve` runs the HTTP server on a multi-threaded runtime. The one-shot
//! commands open the same store, run one operation on a current-thread
//! runtime and print a JSON envelope.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::config::Config;
use crate::http_server::HttpServer;
use crate::observability::{Logger, Severity};
use crate::validation::{sanitize_and_validate, sanitize_patch};

use super::args::{Cli, Command, DEFAULT_CONFIG_PATH};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.config.as_deref(), cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: Option<&Path>, cmd: Command) -> CliResult<()> {
    let config = load_config(config_path)?;

    match cmd {
        Command::Serve { port } => serve(config, port),
        Command::List { limit } => one_shot(&config, |c| list(c, limit)),
        Command::Append => one_shot(&config, |c| append(c, read_request()?)),
        Command::Update { id } => one_shot(&config, |c| update(c, &id, read_request()?)),
        Command::Delete { id } => one_shot(&config, |c| delete(c, &id)),
    }
}

/// Run one store operation and print its envelope
fn one_shot<F>(config: &Config, op: F) -> CliResult<()>
where
    F: FnOnce(&Config) -> CliResult<Value>,
{
    // keep stdout parseable: only warnings and errors
    Logger::set_min_severity(config.severity()?.max(Severity::Warn));

    match op(config) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Explicit `--config` must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    let config = config.apply_env()?;
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

fn one_shot_runtime() -> CliResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server
pub fn serve(mut config: Config, port: Option<u16>) -> CliResult<()> {
    if let Some(port) = port {
        config.http.port = port;
    }

    let store = Arc::new(config.open_store());
    Logger::info(
        "STORE_OPENED",
        &[
            ("atomic_writes", if config.atomic_writes { "true" } else { "false" }),
            ("path", &store.path().display().to_string()),
        ],
    );
    let server = HttpServer::new(config.http.clone(), store);

    let rt = Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print up to `limit` records
pub fn list(config: &Config, limit: i64) -> CliResult<Value> {
    let store = config.open_store();
    let records = one_shot_runtime()?.block_on(store.list_all(limit))?;
    Ok(serde_json::to_value(records)?)
}

/// Validate `body` and append it
pub fn append(config: &Config, body: Value) -> CliResult<Value> {
    let input = sanitize_and_validate(&body)?;
    let store = config.open_store();
    let record = one_shot_runtime()?.block_on(store.append(input))?;
    Ok(serde_json::to_value(record)?)
}

/// Validate `body` as a partial update and apply it
pub fn update(config: &Config, id: &str, body: Value) -> CliResult<Value> {
    let patch = sanitize_patch(&body)?;
    let store = config.open_store();
    let record = one_shot_runtime()?.block_on(store.update_by_id(id, patch))?;
    Ok(serde_json::to_value(record)?)
}

/// Delete by id and return the removed record
pub fn delete(config: &Config, id: &str) -> CliResult<Value> {
    let store = config.open_store();
    let record = one_shot_runtime()?.block_on(store.delete_by_id(id))?;
    Ok(serde_json::to_value(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn config_in(temp: &TempDir) -> Config {
        Config {
            store_path: temp.path().join("usuarios.json"),
            ..Config::default()
        }
    }

    #[test]
    fn test_append_list_update_delete() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        let created = append(&config, json!({ "nome": "Ana", "idade": 30, "email": "a@x.com" })).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let listed = list(&config, 0).unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let updated = update(&config, &id, json!({ "idade": 31 })).unwrap();
        assert_eq!(updated["idade"], 31);
        assert_eq!(updated["criadoEm"], created["criadoEm"]);

        let removed = delete(&config, &id).unwrap();
        assert_eq!(removed["id"], created["id"]);
        assert!(list(&config, 0).unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn test_append_rejects_invalid_body() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        let err = append(&config, json!({ "idade": 30 })).unwrap_err();
        assert_eq!(err.code_str(), "USERSTORE_CLI_INVALID_INPUT");
        assert!(!config.store_path.exists());
    }

    #[test]
    fn test_delete_unknown_id() {
        let temp = TempDir::new().unwrap();
        let err = delete(&config_in(&temp), "nope").unwrap_err();
        assert_eq!(err.code_str(), "USERSTORE_NOT_FOUND");
    }
}
