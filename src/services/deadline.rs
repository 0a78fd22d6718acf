use futures::future::{Either, select};
use std::future::Future;

/// Races `fut` against `deadline`.
///
/// Returns `None` if the deadline future completes first. The deadline is any
/// future, so callers pick the timer: `gloo_timers::future::TimeoutFuture` in
/// the browser, a ready or pending future in tests.
pub async fn with_deadline<F, D>(fut: F, deadline: D) -> Option<F::Output>
where
    F: Future,
    D: Future<Output = ()>,
{
    let fut = std::pin::pin!(fut);
    let deadline = std::pin::pin!(deadline);

    match select(fut, deadline).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}

/// Browser timer deadline of `ms` milliseconds.
pub fn timeout_ms(ms: u32) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn test_future_wins_before_deadline() {
        let result = block_on(with_deadline(ready(7), pending::<()>()));
        assert_eq!(result, Some(7));
    }

    #[test]
    fn test_deadline_wins_over_pending_future() {
        let result = block_on(with_deadline(pending::<u32>(), ready(())));
        assert_eq!(result, None);
    }
}
