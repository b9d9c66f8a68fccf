// src/main.rs
//
// Console entry point

use std::io;
use std::sync::Arc;

use battle_manager::application::Console;
use battle_manager::config::AppConfig;
use battle_manager::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};
use battle_manager::repositories::{BattleRepository, SqliteBattleRepository};
use battle_manager::services::BattleService;

fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION & LOGGING
    let config = AppConfig::load()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    // 2. INFRASTRUCTURE
    log::info!("Opening battle store at {}", config.database_path.display());
    let pool = Arc::new(create_connection_pool(&config.database_path)?);

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        log::debug!(
            "Database ready: {} battles, {} bytes",
            stats.battle_count,
            stats.size_bytes
        );
    }

    // 3. REPOSITORIES & SERVICES
    let battle_repo: Arc<dyn BattleRepository> = Arc::new(SqliteBattleRepository::new(pool));
    let service = BattleService::load(battle_repo)?;

    // 4. CONSOLE
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(service, stdin.lock(), stdout.lock());
    console.run()?;

    Ok(())
}
