// ── Status convergence poller ──
//
// The one piece of genuine timing logic in the engine. Every lifecycle
// operation that has to wait for the control plane funnels through
// `await_status`: fetch, compare against the target, sleep, repeat
// until the deadline. The sleep races against the caller's
// `CancellationToken`, so cancellation latency is bounded by one HTTP
// round trip plus the poll interval.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::CoreError;

/// Fixed interval between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Overall convergence deadline for create/update/delete waits.
pub const DEFAULT_CONVERGENCE_DEADLINE: Duration = Duration::from_secs(300);

/// Tuning for a convergence wait. Callers override these mainly in tests.
#[derive(Debug, Clone)]
pub struct PollOptions {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: DEFAULT_CONVERGENCE_DEADLINE,
        }
    }
}

/// One convergence wait: which resource, which target status, and the
/// bounded scope it runs under.
pub(crate) struct Wait<'a, S> {
    pub kind: &'static str,
    pub id: &'a str,
    pub target: S,
    pub options: &'a PollOptions,
    pub cancel: &'a CancellationToken,
}

/// Poll `fetch` until the object reports the wait's target.
///
/// `deletion` marks a wait whose target means "gone": a `NotFound` from
/// the control plane then counts as success (`Ok(None)`), because
/// disappearance and `deleted` are equivalent. For any other target a
/// `NotFound` means the resource vanished unexpectedly and is surfaced
/// as an error.
///
/// A resource stuck in a terminal failure status keeps being polled
/// until the deadline; only the target status short-circuits the loop.
async fn await_status<T, S, F, Fut>(
    wait: Wait<'_, S>,
    deletion: bool,
    fetch: F,
    status_of: impl Fn(&T) -> S,
) -> Result<Option<T>, CoreError>
where
    S: PartialEq + Copy + std::fmt::Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, driftcloud_api::Error>>,
{
    let Wait {
        kind,
        id,
        target,
        options,
        cancel,
    } = wait;
    let started = tokio::time::Instant::now();

    loop {
        match fetch().await {
            Ok(obj) => {
                let status = status_of(&obj);
                if status == target {
                    debug!("{kind} {id} reached {target:?}");
                    return Ok(Some(obj));
                }
                debug!("{kind} {id} at {status:?}, awaiting {target:?}");
            }
            Err(e) if deletion && e.is_not_found() => {
                debug!("{kind} {id} no longer exists, treating as {target:?}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        if started.elapsed() >= options.deadline {
            return Err(CoreError::ConvergenceTimeout {
                kind,
                id: id.to_owned(),
                target: format!("{target:?}").to_lowercase(),
                waited_secs: options.deadline.as_secs(),
            });
        }

        tokio::select! {
            () = cancel.cancelled() => {
                return Err(CoreError::Cancelled {
                    kind,
                    id: id.to_owned(),
                });
            }
            () = tokio::time::sleep(options.interval) => {}
        }
    }
}

/// Wait for a non-delete target and return the settled object.
pub(crate) async fn await_settled<T, S, F, Fut>(
    wait: Wait<'_, S>,
    fetch: F,
    status_of: impl Fn(&T) -> S,
) -> Result<T, CoreError>
where
    S: PartialEq + Copy + std::fmt::Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, driftcloud_api::Error>>,
{
    let kind = wait.kind;
    let id = wait.id.to_owned();
    match await_status(wait, false, fetch, status_of).await? {
        Some(obj) => Ok(obj),
        // Unreachable: non-delete waits surface NotFound as an error.
        None => Err(CoreError::NotFound {
            message: format!("{kind} {id} vanished while settling"),
        }),
    }
}

/// Wait until the resource reports the deleted status or disappears.
pub(crate) async fn await_gone<T, S, F, Fut>(
    wait: Wait<'_, S>,
    fetch: F,
    status_of: impl Fn(&T) -> S,
) -> Result<(), CoreError>
where
    S: PartialEq + Copy + std::fmt::Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, driftcloud_api::Error>>,
{
    await_status(wait, true, fetch, status_of).await.map(|_| ())
}
