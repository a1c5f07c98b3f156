use crate::commands::CommandResult;
use maxibot_core::config::{AppConfig, LoadOptions};
use maxibot_db::{connect, migrations, DbPool};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "migrate",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "migrate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let before = applied_count(&pool).await;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        let after = applied_count(&pool).await;

        pool.close().await;
        Ok::<String, (&'static str, String, u8)>(migration_summary(before, after))
    });

    match result {
        Ok(summary) => CommandResult::success("migrate", summary),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("migrate", error_class, message, exit_code)
        }
    }
}

/// Rows in sqlx's migration ledger; zero before the first migration creates it.
async fn applied_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0)
}

fn migration_summary(before: i64, after: i64) -> String {
    let applied = (after - before).max(0);
    if applied == 0 {
        format!("no pending migrations ({after} already applied)")
    } else {
        format!("applied {applied} pending migrations ({after} applied in total)")
    }
}
