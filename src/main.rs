use std::sync::Arc;

use tokio::net::TcpListener;

use suppression_service::config::Settings;
use suppression_service::fields;
use suppression_service::http::HttpServer;
use suppression_service::logging::{configure_logging, Logger};
use suppression_service::suppression::{EmailDeliveryClient, SuppressionService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Arc::new(Settings::from_env());

    // Logging comes up first so everything after is captured.
    configure_logging(&settings.logging);

    let log = Logger::new("main");
    log.info_with(
        "Service starting",
        fields! {
            "service" => &settings.service.title,
            "version" => &settings.service.version,
            "region" => &settings.provider.region,
            "bind_address" => &settings.server.bind_address,
        },
    );

    let client = EmailDeliveryClient::new(&settings.provider)?;
    let suppression = Arc::new(SuppressionService::new(
        Arc::new(client),
        settings.provider.tenancy_ocid.clone(),
    ));

    let listener = TcpListener::bind(&settings.server.bind_address).await?;
    let server = HttpServer::new(settings, suppression);
    server.run(listener).await?;

    log.info("Shutdown complete");
    Ok(())
}
