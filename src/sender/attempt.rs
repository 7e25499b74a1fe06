use std::time::Duration;

use crate::config::SendingConfig;

/// Delivery policy for one batch: attempt budget, backoff between attempts,
/// inter-lead delay (the global rate limit) and live-mode failure odds.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub lead_delay: Duration,
    pub failure_rate: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(1000),
            lead_delay: Duration::from_millis(500),
            failure_rate: 0.1,
        }
    }
}

impl From<&SendingConfig> for RetryPolicy {
    fn from(config: &SendingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff: config.retry_backoff(),
            lead_delay: config.lead_delay(),
            failure_rate: config.failure_rate,
        }
    }
}

/// Per-message delivery state machine:
/// Pending -> Attempting(1) -> ... -> Attempting(max) -> Sent | Failed.
/// Transitions are pure so attempt/backoff policy is testable without time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Pending,
    Attempting(u32),
    Sent { attempts: u32 },
    Failed { attempts: u32 },
}

impl DeliveryState {
    /// Begins the next attempt. Terminal states are absorbing.
    pub fn start_attempt(self) -> Self {
        match self {
            DeliveryState::Pending => DeliveryState::Attempting(1),
            DeliveryState::Attempting(n) => DeliveryState::Attempting(n + 1),
            terminal => terminal,
        }
    }

    /// Folds an attempt outcome into the state. A failed attempt with budget
    /// remaining stays in Attempting(n); the caller backs off and calls
    /// start_attempt again.
    pub fn record(self, delivered: bool, max_attempts: u32) -> Self {
        match self {
            DeliveryState::Attempting(n) if delivered => DeliveryState::Sent { attempts: n },
            DeliveryState::Attempting(n) if n >= max_attempts => {
                DeliveryState::Failed { attempts: n }
            }
            other => other,
        }
    }

    pub fn attempt(&self) -> u32 {
        match self {
            DeliveryState::Pending => 0,
            DeliveryState::Attempting(n) => *n,
            DeliveryState::Sent { attempts } | DeliveryState::Failed { attempts } => *attempts,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliveryState::Sent { .. } | DeliveryState::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_success() {
        let state = DeliveryState::Pending.start_attempt();
        assert_eq!(state, DeliveryState::Attempting(1));

        let state = state.record(true, 3);
        assert_eq!(state, DeliveryState::Sent { attempts: 1 });
        assert!(state.is_terminal());
    }

    #[test]
    fn success_after_retries() {
        let mut state = DeliveryState::Pending;

        state = state.start_attempt().record(false, 3);
        assert_eq!(state, DeliveryState::Attempting(1));

        state = state.start_attempt().record(false, 3);
        assert_eq!(state, DeliveryState::Attempting(2));

        state = state.start_attempt().record(true, 3);
        assert_eq!(state, DeliveryState::Sent { attempts: 3 });
    }

    #[test]
    fn budget_exhaustion_fails_after_exactly_max_attempts() {
        let mut state = DeliveryState::Pending;
        let mut attempts = 0;

        while !state.is_terminal() {
            state = state.start_attempt();
            attempts += 1;
            state = state.record(false, 3);
        }

        assert_eq!(attempts, 3);
        assert_eq!(state, DeliveryState::Failed { attempts: 3 });
    }

    #[test]
    fn terminal_states_are_absorbing() {
        let sent = DeliveryState::Sent { attempts: 2 };
        assert_eq!(sent.start_attempt(), sent);
        assert_eq!(sent.record(false, 3), sent);

        let failed = DeliveryState::Failed { attempts: 3 };
        assert_eq!(failed.start_attempt(), failed);
        assert_eq!(failed.record(true, 3), failed);
    }

    #[test]
    fn policy_from_config() {
        let config = SendingConfig {
            max_attempts: 5,
            retry_backoff_ms: 250,
            lead_delay_ms: 100,
            failure_rate: 0.5,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff, Duration::from_millis(250));
        assert_eq!(policy.lead_delay, Duration::from_millis(100));
    }
}
