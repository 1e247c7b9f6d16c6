use std::time::Duration;

// Headers
pub const FORWARDED_FOR: &str = "x-forwarded-for";
pub const RAPID_API_KEY: &str = "X-RapidAPI-Key";
pub const RAPID_API_HOST: &str = "X-RapidAPI-Host";
pub const UNKNOWN_IDENTITY: &str = "unknown";

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_JUDGE_URL: &str = "https://judge0-ce.p.rapidapi.com";

// whole request body; source and stdin are each capped lower in the form
pub const MAX_BODY_BYTES: u64 = 256 * 1024;

// admission
pub const RATE_LIMIT: u32 = 30;
pub const RATE_WINDOW: Duration = Duration::from_secs(60);
pub const MAX_RATE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

// resource ceilings sent with every submission, never client controlled
pub const CPU_TIME_LIMIT_SECS: u32 = 5;
pub const MEMORY_LIMIT_KB: u32 = 128_000;

// polling budget, roughly 10s worst case
pub const POLL_MAX_ATTEMPTS: u32 = 10;
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

pub const JUDGE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const JUDGE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Judge0 status ids: 1 In Queue, 2 Processing, 3 Accepted, 4+ failures
pub const STATUS_IN_QUEUE: u32 = 1;
pub const STATUS_PROCESSING: u32 = 2;
pub const STATUS_ACCEPTED: u32 = 3;
