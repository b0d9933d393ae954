mod application;

use application::ApplicationEnv;
use notifier_sync::{
    command::{self, Command},
    service::notifications_sync_service::NotificationsSyncService,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing(&env)?;

    let state = application::create_state(&env).await?;

    tokio::select! {
        _ = application::shutdown_signal() => {},
        result = read_commands(&state.notifications_sync_service) => result?,
    }

    application::close(state).await;

    Ok(())
}

async fn read_commands(service: &dyn NotificationsSyncService) -> anyhow::Result<()> {
    println!("{}", command::render(&service.subscribe().borrow()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => println!("{}", command::execute(service, command).await),
            Err(err) => eprintln!("{err}"),
        }
    }

    tracing::info!("stdin closed");

    Ok(())
}
