//! delphi-feeder: pushes exchange quotes to delphioracle on a fixed interval

use anyhow::Result;
use delphi_feeder::config::AppConfig;
use delphi_feeder::feeder::{FeederContext, IntervalScheduler};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::load()?;
    init_tracing(cfg.feeder.log_json);

    cfg.validate()?;
    info!(config = %cfg, "Starting delphi-feeder");

    let ctx = FeederContext::from_config(&cfg)?;
    let mut scheduler = IntervalScheduler::new(cfg.interval());

    tokio::select! {
        _ = ctx.run(&mut scheduler) => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
