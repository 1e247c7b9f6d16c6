use crate::constants;
use crate::utils::poller::PollPolicy;
use hyper::Uri;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub fn addr() -> String {
    get_key_or("ADDR", constants::DEFAULT_ADDR)
}

pub fn get_key(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_key_or(key: &str, default: &str) -> String {
    get_key(key).unwrap_or_else(|| default.to_string())
}

/// Parses `key`, falling back to `default` when unset or malformed.
pub fn parse_key_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match get_key(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default");
            default
        }),
    }
}

#[derive(Debug, Clone)]
pub struct JudgeSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_host: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl JudgeSettings {
    pub fn load() -> Self {
        let base_url = get_key_or("JUDGE0_API_URL", constants::DEFAULT_JUDGE_URL);
        let api_host = get_key("JUDGE0_API_HOST").unwrap_or_else(|| host_of(&base_url));
        let api_key = get_key("JUDGE0_API_KEY");
        if api_key.is_none() {
            warn!("JUDGE0_API_KEY not configured, code execution will answer 503");
        }
        Self {
            base_url,
            api_key,
            api_host,
            connect_timeout: Duration::from_millis(parse_key_or(
                "JUDGE_CONNECT_TIMEOUT_MS",
                constants::JUDGE_CONNECT_TIMEOUT.as_millis() as u64,
            )),
            request_timeout: Duration::from_millis(parse_key_or(
                "JUDGE_REQUEST_TIMEOUT_MS",
                constants::JUDGE_REQUEST_TIMEOUT.as_millis() as u64,
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: String,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub poll: PollPolicy,
    pub judge: JudgeSettings,
}

impl Settings {
    pub fn load() -> Self {
        let s = Self {
            addr: addr(),
            rate_limit: parse_key_or("RATE_LIMIT", constants::RATE_LIMIT),
            rate_window: Duration::from_secs(parse_key_or(
                "RATE_WINDOW_SECS",
                constants::RATE_WINDOW.as_secs(),
            )),
            poll: PollPolicy {
                max_attempts: parse_key_or("POLL_MAX_ATTEMPTS", constants::POLL_MAX_ATTEMPTS),
                interval: Duration::from_millis(parse_key_or(
                    "POLL_INTERVAL_MS",
                    constants::POLL_INTERVAL.as_millis() as u64,
                )),
            },
            judge: JudgeSettings::load(),
        };
        info!(
            addr = %s.addr,
            judge = %s.judge.base_url,
            rate_limit = s.rate_limit,
            window_secs = s.rate_window.as_secs(),
            poll_attempts = s.poll.max_attempts,
            "settings loaded"
        );
        s
    }
}

fn host_of(url: &str) -> String {
    url.parse::<Uri>()
        .ok()
        .and_then(|u| u.host().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
