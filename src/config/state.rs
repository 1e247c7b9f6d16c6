use crate::dao::rate_limit::RateLimiter;
use crate::utils::judger::JudgeBackend;
use crate::utils::poller::{CancelSignal, PollPolicy};
use std::sync::Arc;

/// Everything a request handler needs, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    /// `None` while no judge credential is configured.
    pub judge: Option<Arc<dyn JudgeBackend>>,
    pub poll: PollPolicy,
    pub cancel: CancelSignal,
}

impl AppState {
    pub fn new(
        limiter: RateLimiter,
        judge: Option<Arc<dyn JudgeBackend>>,
        poll: PollPolicy,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            limiter: Arc::new(limiter),
            judge,
            poll,
            cancel,
        }
    }
}
