use failsafe::{backoff, failure_policy, CircuitBreaker, Config, StateMachine};
use std::future::Future;
use std::time::Duration;

/// Circuit breaker guarding one enrichment provider.
pub type ProviderBreaker =
    StateMachine<failure_policy::ConsecutiveFailures<backoff::Exponential>, ()>;

/// Creates a circuit breaker for a third-party enrichment provider.
///
/// # Configuration
///
/// - **Failure threshold**: 3 consecutive failures triggers OPEN state.
/// - **Backoff**: Exponential backoff from 30s to 5min before attempting recovery.
///
/// While OPEN, provider calls are rejected immediately and the enrichment
/// adapter serves mock data instead of waiting on a dead endpoint.
pub fn create_provider_circuit_breaker() -> ProviderBreaker {
    let backoff_strategy = backoff::exponential(
        Duration::from_secs(30),  // Initial delay
        Duration::from_secs(300), // Maximum delay
    );

    let failure_policy = failure_policy::consecutive_failures(3, backoff_strategy);

    Config::new().failure_policy(failure_policy).build()
}

/// One breaker per provider so a failing service does not trip the others.
pub struct ProviderBreakers {
    pub clearbit: ProviderBreaker,
    pub hunter: ProviderBreaker,
    pub builtwith: ProviderBreaker,
}

impl ProviderBreakers {
    pub fn new() -> Self {
        Self {
            clearbit: create_provider_circuit_breaker(),
            hunter: create_provider_circuit_breaker(),
            builtwith: create_provider_circuit_breaker(),
        }
    }
}

impl Default for ProviderBreakers {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs an async provider call through a breaker.
///
/// The outcome is recorded against the breaker; when the circuit is open the
/// future is never polled and `failsafe::Error::Rejected` is returned.
pub async fn call_guarded<T, E, Fut>(
    breaker: &ProviderBreaker,
    call: Fut,
) -> Result<T, failsafe::Error<E>>
where
    Fut: Future<Output = Result<T, E>>,
{
    if !breaker.is_call_permitted() {
        return Err(failsafe::Error::Rejected);
    }

    let outcome = call.await;
    breaker.call(|| outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use failsafe::Error;

    #[test]
    fn test_circuit_breaker_opens_after_failures() {
        let cb = create_provider_circuit_breaker();

        for _ in 0..3 {
            let result: Result<(), Error<&str>> = cb.call(|| Err::<(), &str>("simulated error"));
            assert!(result.is_err());
        }

        let result: Result<(), Error<&str>> = cb.call(|| Ok::<(), &str>(()));
        match result {
            Err(Error::Rejected) => {}
            _ => panic!("Expected circuit to be open and reject requests"),
        }
    }

    #[tokio::test]
    async fn test_call_guarded_passes_through_success() {
        let cb = create_provider_circuit_breaker();
        let result = call_guarded(&cb, async { Ok::<i32, &str>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_call_guarded_rejects_when_open() {
        let cb = create_provider_circuit_breaker();
        for _ in 0..3 {
            let _ = call_guarded(&cb, async { Err::<(), &str>("down") }).await;
        }

        let polled = std::sync::atomic::AtomicBool::new(false);
        let result = call_guarded(&cb, async {
            polled.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok::<(), &str>(())
        })
        .await;

        assert!(matches!(result, Err(Error::Rejected)));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }
}
