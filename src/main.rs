use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use healthcheck::AppError;
use healthcheck::config::Config;
use healthcheck::dashboard::{Dashboard, Report};
use healthcheck::fetcher::RiotMatchFetcher;
use healthcheck::logging;
use healthcheck::riot::RiotClient;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    logging::init()?;

    info!("🐙 Starting...");

    let config = Config::from_env()?;
    info!(
        region = %config.region,
        timezone = %config.timezone,
        account = config.player.account_id.as_deref(),
        "⚙️ Configuration loaded"
    );

    let client = RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_second,
    );
    let fetcher = RiotMatchFetcher::new(client, config.region, config.player.puuid.clone());
    let dashboard = Dashboard::new(
        fetcher,
        config.player.clone(),
        config.timezone,
        config.rotation.clone(),
        config.thresholds,
    );

    let report = dashboard.render().await?;
    publish(&report, config.html_output.as_deref())?;

    let Some(secs) = config.refresh_interval_secs else {
        return Ok(());
    };

    info!(interval_secs = secs, "🔄 Refreshing periodically");

    let mut ticker = interval(Duration::from_secs(secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately, the initial render already ran.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match dashboard.refresh().await {
            Ok(report) => {
                if let Err(e) = publish(&report, config.html_output.as_deref()) {
                    error!(error = ?e, "🔄 ❌ Failed to publish report");
                }
            }
            Err(e) => error!(error = ?e, "🔄 ❌ Refresh failed"),
        }
    }
}

fn publish(report: &Report, html_output: Option<&Path>) -> Result<(), AppError> {
    println!("{}", report.to_text_table(std::io::stdout().is_terminal()));

    if let Some(path) = html_output {
        std::fs::write(path, report.to_html())?;
        info!(path = %path.display(), "📝 HTML report written");
    }

    Ok(())
}
