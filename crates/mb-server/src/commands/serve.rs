use anyhow::Context;
use mb_config::BridgeConfig;

use crate::cli::ServeArgs;
use crate::pipeline::Bridge;
use crate::server::WebhookServer;

pub async fn handle(args: ServeArgs, mut config: BridgeConfig) -> anyhow::Result<()> {
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    let bridge = Bridge::from_config(&config).context("refusing to start")?;
    let server = WebhookServer::bind(&config.server, bridge)?;
    tracing::info!(
        addr = ?server.local_addr(),
        path = %config.server.path,
        "listening for teamwork webhooks"
    );

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            shutdown.shutdown();
        }
    });

    server.run().await
}
