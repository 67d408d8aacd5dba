use actix_web::web;
use log::{error, info};
use memo_auth_service::config::{mask_sensitive_url, Settings};
use memo_auth_service::server::Server;
use memo_auth_service::{logging, Database, StartupError, VERSION};
use std::process::ExitCode;

#[actix_web::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = logging::init(&settings) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(settings: Settings) -> Result<(), StartupError> {
    info!(
        "starting {} v{}: environment={}, database={}",
        settings.service.name,
        VERSION,
        settings.environment,
        mask_sensitive_url(&settings.database.uri)
    );

    let database = web::Data::new(Database::new(&settings.database).await?);

    let result = match Server::bind(&settings, database.clone()) {
        Ok(server) => server.run().await,
        Err(e) => Err(e),
    };

    database.close();
    info!("server stopped");
    result
}
