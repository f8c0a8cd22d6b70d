//! Deferred actions
//!
//! `schedule` runs an action once after a delay on the tokio runtime. There
//! is no cancellation: actions that mutate shared state must re-check the
//! precondition that justified scheduling them and do nothing when it no
//! longer holds.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Run `action` once, `delay` from now
pub fn schedule<F, Fut>(delay: Duration, action: F) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action().await;
    })
}
