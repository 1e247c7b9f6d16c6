use super::judger::JudgeBackend;
use crate::constants;
use crate::model::submission::{SubmissionPayload, Ticket};
use crate::model::verdict::Verdict;
use crate::types::error::GatewayError;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: constants::POLL_MAX_ATTEMPTS,
            interval: constants::POLL_INTERVAL,
        }
    }
}

/// Fires once the paired sender publishes `true`. A dropped sender never fires.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal(Option<watch::Receiver<bool>>);

impl CancelSignal {
    pub fn never() -> Self {
        Self(None)
    }

    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self(Some(rx))
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    pub async fn cancelled(&mut self) {
        if let Some(rx) = self.0.as_mut() {
            loop {
                if *rx.borrow() {
                    return;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
        std::future::pending::<()>().await
    }
}

#[derive(Debug)]
pub enum PollState {
    Submitting,
    /// `attempt` polls have been made so far.
    Polling { attempt: u32 },
    Completed(Verdict),
    TimedOut,
    Failed(GatewayError),
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Submitting | PollState::Polling { .. })
    }
}

/// One submission's trip through the judge: submit once, then poll the ticket
/// until a terminal status, the attempt budget runs out, or cancellation.
pub struct PollLoop<'a> {
    backend: &'a dyn JudgeBackend,
    policy: PollPolicy,
    payload: SubmissionPayload,
    cancel: CancelSignal,
    ticket: Option<Ticket>,
    state: PollState,
}

impl<'a> PollLoop<'a> {
    pub fn new(
        backend: &'a dyn JudgeBackend,
        policy: PollPolicy,
        payload: SubmissionPayload,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            backend,
            policy,
            payload,
            cancel,
            ticket: None,
            state: PollState::Submitting,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// Performs one transition. Terminal states are absorbing.
    pub async fn advance(&mut self) -> &PollState {
        let attempt = match self.state {
            PollState::Submitting => None,
            PollState::Polling { attempt } => Some(attempt),
            _ => return &self.state,
        };
        self.state = match attempt {
            None => self.submit().await,
            Some(n) if n >= self.policy.max_attempts => PollState::TimedOut,
            Some(n) => self.poll(n).await,
        };
        &self.state
    }

    pub async fn run(mut self) -> Result<Verdict, GatewayError> {
        while !self.state.is_terminal() {
            self.advance().await;
        }
        match self.state {
            PollState::Completed(verdict) => {
                info!(status = verdict.status_id(), description = verdict.status_description(), "execution finished");
                Ok(verdict)
            }
            PollState::TimedOut => Err(GatewayError::ExecutionTimeout {
                attempts: self.policy.max_attempts,
            }),
            PollState::Failed(e) => Err(e),
            PollState::Submitting | PollState::Polling { .. } => {
                Err(GatewayError::system_error("poll loop stopped early"))
            }
        }
    }

    async fn submit(&mut self) -> PollState {
        if self.cancel.is_cancelled() {
            return PollState::Failed(GatewayError::Cancelled);
        }
        match self.backend.submit(&self.payload).await {
            Ok(ticket) => {
                self.ticket = Some(ticket);
                PollState::Polling { attempt: 0 }
            }
            Err(e) => PollState::Failed(e),
        }
    }

    async fn poll(&mut self, attempt: u32) -> PollState {
        let ticket = match &self.ticket {
            Some(t) => t.clone(),
            None => return PollState::Failed(GatewayError::system_error("polling without a ticket")),
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!(ticket = ticket.as_str(), attempt, "poll loop cancelled");
                return PollState::Failed(GatewayError::Cancelled);
            }
            _ = tokio::time::sleep(self.policy.interval) => {}
        }

        let next = PollState::Polling { attempt: attempt + 1 };
        let mut raw = match self.backend.fetch(&ticket).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(ticket = ticket.as_str(), attempt = attempt + 1, error = %e, "poll attempt failed");
                return next;
            }
        };
        match raw.status.take() {
            Some(status) if status.is_pending() => {
                debug!(ticket = ticket.as_str(), attempt = attempt + 1, status = status.id, "still running");
                next
            }
            Some(status) => PollState::Completed(Verdict::normalize(status, raw)),
            None => {
                warn!(ticket = ticket.as_str(), attempt = attempt + 1, "judge result has no status");
                next
            }
        }
    }
}
