use anyhow::Context;

use teller_cli::{Session, TellerConfig};

fn main() -> anyhow::Result<()> {
    let config = TellerConfig::from_env().context("failed to load teller configuration")?;
    teller_observability::init(&config.log);

    let registry = config.build_registry();
    tracing::info!(accounts = registry.len(), "registry seeded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session =
        Session::new(registry, stdin.lock(), stdout.lock()).with_menu_pause(config.menu_pause);
    session.run()?;

    tracing::info!("session finished");
    Ok(())
}
