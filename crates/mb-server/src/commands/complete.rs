use anyhow::Context;
use mb_config::BridgeConfig;
use mb_core::WebhookEvent;

use crate::cli::CompleteArgs;
use crate::pipeline::Bridge;

/// Re-drive one milestone completion by hand, as if Teamwork had delivered it.
pub async fn handle(args: CompleteArgs, config: &BridgeConfig) -> anyhow::Result<()> {
    let bridge = Bridge::from_config(config)?;
    let event = WebhookEvent::milestone_completed(args.milestone_id);
    let outcome = bridge
        .handle_milestone_completed(&event)
        .await
        .with_context(|| format!("milestone {} was not processed", event.object_id))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
