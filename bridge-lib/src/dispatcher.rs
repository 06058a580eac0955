//! Request/response dispatcher
//!
//! Managed callbacks that must produce a reply run on a dedicated runtime,
//! never on the engine thread that asked for the reply. The engine thread
//! blocks on a [`PendingReply`] until the reply arrives. There is no timeout:
//! a callback that never returns keeps its caller waiting forever.

use crate::config::DispatcherConfig;
use crate::error::{BridgeError, Result};
use crate::guard::describe_panic;
use log::{debug, trace};
use std::panic::{self, AssertUnwindSafe};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

/// Reply to a request that may not have been answered yet.
pub struct PendingReply<T> {
    state: ReplyState<T>,
}

enum ReplyState<T> {
    Ready(Result<T>),
    Waiting(oneshot::Receiver<Result<T>>),
}

impl<T> PendingReply<T> {
    pub fn ready(value: T) -> Self {
        Self {
            state: ReplyState::Ready(Ok(value)),
        }
    }

    pub fn failed(error: BridgeError) -> Self {
        Self {
            state: ReplyState::Ready(Err(error)),
        }
    }

    /// Blocks the calling thread until the reply is available.
    ///
    /// Must not be called from inside an async context.
    pub fn wait(self) -> Result<T> {
        match self.state {
            ReplyState::Ready(result) => result,
            ReplyState::Waiting(receiver) => receiver
                .blocking_recv()
                .unwrap_or(Err(BridgeError::DispatcherClosed)),
        }
    }
}

pub struct Dispatcher {
    runtime: Option<Runtime>,
}

impl Dispatcher {
    pub fn new(config: &DispatcherConfig) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .max_blocking_threads(config.max_blocking_threads.max(1))
            .thread_name(config.thread_name.clone())
            .build()
            .map_err(BridgeError::initialization)?;
        debug!(
            "Callback dispatcher started on \"{}\" threads",
            config.thread_name
        );
        Ok(Self {
            runtime: Some(runtime),
        })
    }

    /// Runs `job` on a dispatcher thread and returns its eventual result.
    pub fn submit<T, F>(&self, job: F) -> PendingReply<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let runtime = match &self.runtime {
            Some(runtime) => runtime,
            None => return PendingReply::failed(BridgeError::DispatcherClosed),
        };

        let (sender, receiver) = oneshot::channel();
        runtime.spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
                Err(BridgeError::managed(describe_panic(payload.as_ref())))
            });
            if sender.send(result).is_err() {
                trace!("reply dropped, requester went away");
            }
        });

        PendingReply {
            state: ReplyState::Waiting(receiver),
        }
    }

    /// Stops accepting work. Requests still queued resolve to `DispatcherClosed`.
    pub fn shutdown(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            debug!("Callback dispatcher stopped");
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&DispatcherConfig::default()).unwrap()
    }

    #[test]
    fn test_reply_is_delivered() {
        let dispatcher = dispatcher();
        let reply = dispatcher.submit(|| Ok("abc123".to_string()));
        assert_eq!(reply.wait().unwrap(), "abc123");
    }

    #[test]
    fn test_job_runs_on_dispatcher_thread() {
        let dispatcher = dispatcher();
        let caller = thread::current().id();
        let reply = dispatcher.submit(move || Ok(thread::current().id() != caller));
        assert!(reply.wait().unwrap());
    }

    #[test]
    fn test_wait_blocks_until_job_completes() {
        let dispatcher = dispatcher();
        let (release, gate) = mpsc::channel::<()>();
        let reply = dispatcher.submit(move || {
            gate.recv().map_err(BridgeError::managed)?;
            Ok(7)
        });

        let waiter = thread::spawn(move || reply.wait());
        thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());

        release.send(()).unwrap();
        assert_eq!(waiter.join().unwrap().unwrap(), 7);
    }

    #[test]
    fn test_job_panic_becomes_error() {
        let dispatcher = dispatcher();
        let reply: PendingReply<()> = dispatcher.submit(|| panic!("listener threw"));
        assert_eq!(
            reply.wait().unwrap_err(),
            BridgeError::managed("listener threw")
        );
    }

    #[test]
    fn test_submit_after_shutdown() {
        let mut dispatcher = dispatcher();
        dispatcher.shutdown();
        let reply = dispatcher.submit(|| Ok(()));
        assert_eq!(reply.wait().unwrap_err(), BridgeError::DispatcherClosed);
    }

    #[test]
    fn test_ready_reply() {
        assert_eq!(PendingReply::ready(3).wait().unwrap(), 3);
        assert_eq!(
            PendingReply::<()>::failed(BridgeError::NotInitialized)
                .wait()
                .unwrap_err(),
            BridgeError::NotInitialized
        );
    }
}
