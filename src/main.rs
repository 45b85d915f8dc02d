use gatehouse::application_impl::{FakeUserStore, RealIdentifierResolver, fake_record};
use gatehouse::application_port::IdentifierResolver;
use gatehouse::domain_port::UserStore;
use gatehouse::infra_mysql::MySqlUserStore;
use gatehouse::logger::*;
use gatehouse::settings::*;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let settings = parse_settings(cli.settings.as_deref())?;
    info!(?settings);
    let logger_config = LogConfig {
        filter: settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let user_store: Arc<dyn UserStore> = match settings.store.backend.as_str() {
        "fake" => {
            let mut store = FakeUserStore::new();
            store.insert(fake_record("demo", "demo@example.com"));
            Arc::new(store)
        }
        "mysql" => {
            let pool = MySqlPoolOptions::new()
                .max_connections(settings.mysql.max_connections)
                .connect(&settings.mysql.url)
                .await?;
            Arc::new(MySqlUserStore::new(pool))
        }
        other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
    };

    let resolver = RealIdentifierResolver::new(user_store);

    let record = resolver.resolve(&cli.identifier).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
