//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `crudkit_core` linkage and configuration loading.
//! - Open the configured database and report its schema version.
//! - Print the error translation table as one JSON object per line.

use crudkit_core::db::migrations::current_user_version;
use crudkit_core::db::{open_db, DbResult};
use crudkit_core::{
    core_version, init_logging_from_config, CoreConfig, CoreError, HandlerTable, RequestInfo,
};
use http::{Method, Uri};
use serde_json::json;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("crudkit config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("crudkit logging disabled: {err}");
    }

    println!("crudkit_core version={}", core_version());

    match schema_version(&config) {
        Ok(version) => println!(
            "crudkit db path={} schema_version={version}",
            config.db_path.display()
        ),
        Err(err) => {
            eprintln!("crudkit db error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let table = HandlerTable::standard();
    let request = RequestInfo::new(Method::GET, Uri::from_static("/"));
    for (kind, handler) in table.iter() {
        let response = handler(&request, &CoreError::from_kind(*kind, ""));
        let message = response
            .body
            .error()
            .map(|error| error.message.as_str())
            .unwrap_or_default();
        println!(
            "{}",
            json!({
                "kind": format!("{kind:?}"),
                "status": response.status.as_u16(),
                "type": kind.label(),
                "message": message,
            })
        );
    }

    ExitCode::SUCCESS
}

/// Opens `config.db_path` without migrations and reads its `user_version`.
fn schema_version(config: &CoreConfig) -> DbResult<u32> {
    let conn = open_db(&config.db_path, &[])?;
    current_user_version(&conn)
}
