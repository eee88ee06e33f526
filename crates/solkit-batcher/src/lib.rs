/*!
# solkit-batcher

A bounded worker pool over a pre-populated queue: run one callback per
entity across a fixed number of OS threads, with a per-error-class policy
deciding whether a failure is ignored, logged, or terminates the worker.

Built for batch operations over a known, finite set of accounts or wallets,
where one entity's transient RPC hiccup must not abort the whole batch.

```rust
use solkit_batcher::{Batcher, ErrorAction};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

let processed = Arc::new(AtomicUsize::new(0));
let counter = Arc::clone(&processed);

let mut batcher = Batcher::new((0..100u64).collect(), 10, move |_wallet| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(())
});
batcher.start(Duration::from_millis(10), ErrorAction::Log, ErrorAction::Log);
assert_eq!(processed.load(Ordering::SeqCst), 100);
```
*/

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Failure raised by a batch callback, split into the two classes the
/// dispatch policy distinguishes: RPC transport trouble versus everything
/// else.
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("RPC transport error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CallbackError {
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }
}

/// What a worker does with a failed callback. `Raise` terminates that
/// worker only; the rest of the pool keeps draining the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    Ignore,
    Log,
    Raise,
}

/// Fixed-size worker pool draining a FIFO queue seeded once at construction.
///
/// Workers claim one entity at a time under a mutex, so no entity is ever
/// processed twice, and exit permanently once the queue runs dry — the
/// entity list is fixed up front, this is not a long-lived producer/consumer
/// queue. Failed entities are never re-queued; retrying is the callback's
/// own business.
pub struct Batcher<T> {
    queue: Arc<Mutex<VecDeque<T>>>,
    callback: Arc<dyn Fn(T) -> Result<(), CallbackError> + Send + Sync>,
    num_threads: usize,
    workers: Vec<JoinHandle<()>>,
    raised: Arc<Mutex<Vec<CallbackError>>>,
}

impl<T: Send + 'static> Batcher<T> {
    /// `callback` runs once per entity. Whatever state it needs must be
    /// captured (cloned/`Arc`ed) into the closure at construction time —
    /// that captured snapshot is what keeps workers from trampling each
    /// other's arguments.
    pub fn new(
        entities: Vec<T>,
        num_threads: usize,
        callback: impl Fn(T) -> Result<(), CallbackError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            queue: Arc::new(Mutex::new(entities.into())),
            callback: Arc::new(callback),
            num_threads,
            workers: Vec::new(),
            raised: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Spawn the workers and block until all of them have exited, polling
    /// at `poll_interval`. RPC-class callback failures follow
    /// `rpc_error_action`, all others follow `other_error_action`.
    pub fn start(
        &mut self,
        poll_interval: Duration,
        rpc_error_action: ErrorAction,
        other_error_action: ErrorAction,
    ) {
        for _ in 0..self.num_threads {
            let queue = Arc::clone(&self.queue);
            let callback = Arc::clone(&self.callback);
            let raised = Arc::clone(&self.raised);

            self.workers.push(std::thread::spawn(move || loop {
                let Some(entity) = lock_ignoring_poison(&queue).pop_front() else {
                    return;
                };

                if let Err(err) = callback(entity) {
                    let action = match &err {
                        CallbackError::Rpc(_) => rpc_error_action,
                        CallbackError::Other(_) => other_error_action,
                    };
                    match action {
                        ErrorAction::Ignore => {}
                        ErrorAction::Log => error!(error = %err, "batch callback failed"),
                        ErrorAction::Raise => {
                            error!(error = %err, "batch callback failed; stopping worker");
                            lock_ignoring_poison(&raised).push(err);
                            return;
                        }
                    }
                }
            }));
        }

        while !self.is_done() {
            std::thread::sleep(poll_interval);
        }
    }

    /// True iff every spawned worker has exited. Pollable externally when a
    /// caller drives the pool without blocking on `start`.
    pub fn is_done(&self) -> bool {
        self.workers.iter().all(|worker| worker.is_finished())
    }

    /// Errors that terminated workers under [`ErrorAction::Raise`], drained.
    pub fn take_raised_errors(&self) -> Vec<CallbackError> {
        std::mem::take(&mut *lock_ignoring_poison(&self.raised))
    }
}

/// A worker that panicked mid-callback poisons nothing we cannot recover:
/// queue operations are single calls, so the data is always consistent.
fn lock_ignoring_poison<U>(mutex: &Mutex<U>) -> MutexGuard<'_, U> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
