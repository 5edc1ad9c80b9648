use std::{io, process, sync::Arc};

use placeholder_admin::{
    application::{error::AppError, repos::ResourceApi},
    config::{self, Command, ConsoleArgs},
    console::{self, list},
    infra::{http::ResourceClient, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let api: Arc<dyn ResourceApi> = Arc::new(ResourceClient::new(&settings.api)?);
    info!(base_url = %settings.api.base_url, "api client ready");

    let command = cli_args
        .command
        .unwrap_or(Command::Console(ConsoleArgs::default()));

    match command {
        Command::Console(args) => console::run_stdio(api, args.route).await?,
        Command::Users(args) => list::list_users(api, &args, &mut io::stdout().lock()).await?,
        Command::Posts(args) => list::list_posts(api, &args, &mut io::stdout().lock()).await?,
    }
    Ok(())
}
