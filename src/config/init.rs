use super::env::Settings;
use super::state::AppState;
use crate::dao::rate_limit::RateLimiter;
use crate::utils::judger::{HyperJudge, JudgeBackend};
use crate::utils::poller::CancelSignal;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

/// Loads `.env` and settings, builds the judge client and returns the shared
/// state plus the sender that cancels in-flight poll loops on shutdown.
pub async fn init() -> anyhow::Result<(Settings, AppState, watch::Sender<bool>)> {
    if dotenv::dotenv().is_err() {
        info!("no .env file, using process environment");
    }
    let settings = Settings::load();

    let judge = match settings.judge.api_key.clone() {
        Some(key) => {
            let judge = Arc::new(HyperJudge::new(&settings.judge, key));
            judge.ping().await;
            Some(judge as Arc<dyn JudgeBackend>)
        }
        None => None,
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let state = AppState::new(
        RateLimiter::new(settings.rate_limit, settings.rate_window),
        judge,
        settings.poll,
        CancelSignal::new(cancel_rx),
    );
    Ok((settings, state, cancel_tx))
}
