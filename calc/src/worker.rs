//! Isolated evaluation worker
//!
//! Operations run on a single dedicated thread. The caller blocks until the
//! job's result comes back. A panicking operation is caught on the worker,
//! turned into `CalcError::Internal` with the panic message, and the worker
//! keeps serving later jobs. Panic reports from the worker go to the log,
//! not the terminal.

use calc_core::CalcError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Once};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

const WORKER_THREAD: &str = "calc-worker";

static PANIC_HOOK: Once = Once::new();

type Job = Box<dyn FnOnce() -> Result<f64, CalcError> + Send + 'static>;

struct Request {
    job: Job,
    reply: mpsc::Sender<Result<f64, CalcError>>,
}

/// Worker pool of size one
pub struct Worker {
    sender: Option<mpsc::SyncSender<Request>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn() -> Result<Self, CalcError> {
        install_panic_hook();

        // Capacity 1: at most one job is ever waiting
        let (sender, receiver) = mpsc::sync_channel::<Request>(1);
        let handle = thread::Builder::new()
            .name(WORKER_THREAD.to_string())
            .spawn(move || {
                for Request { job, reply } in receiver {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(job))
                        .unwrap_or_else(|payload| Err(CalcError::internal(panic_message(payload.as_ref()))));
                    // Caller may have gone away; nothing to do then
                    let _ = reply.send(outcome);
                }
                debug!("worker stopped");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Run `job` on the worker and wait for its result
    pub fn run<F>(&self, job: F) -> Result<f64, CalcError>
    where
        F: FnOnce() -> Result<f64, CalcError> + Send + 'static,
    {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| CalcError::internal("worker is shut down"))?;
        let (reply, result) = mpsc::channel();
        sender
            .send(Request { job: Box::new(job), reply })
            .map_err(|_| CalcError::internal("worker is unavailable"))?;
        result
            .recv()
            .map_err(|_| CalcError::internal("worker exited before replying"))?
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Route worker panics to the log; other threads keep the previous hook
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if is_worker_thread() {
                let location = info.location().map(|l| l.to_string()).unwrap_or_default();
                error!(message = %panic_message(info.payload()), %location, "operation panicked");
            } else {
                previous(info);
            }
        }));
    });
}

fn is_worker_thread() -> bool {
    thread::current().name() == Some(WORKER_THREAD)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "operation panicked".to_string()
    }
}
