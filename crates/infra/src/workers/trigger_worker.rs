use std::io;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{info, warn};

use partnerlink_events::{Event, EventBus, Subscription, Trigger};

use crate::lifecycle::{Lifecycle, LifecycleOutcome, TimerOutcome};

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Worker loop feeding bus triggers into the lifecycle.
///
/// - Subscribes to the trigger bus at spawn time
/// - Runs each trigger to completion on `runtime`, one at a time
/// - Failed triggers are logged and dropped
/// - Stops on [`WorkerHandle::shutdown`] or when the handle is dropped
#[derive(Debug)]
pub struct TriggerWorker;

impl TriggerWorker {
    pub fn spawn<B>(
        name: &'static str,
        bus: &B,
        lifecycle: Arc<Lifecycle>,
        runtime: Handle,
    ) -> io::Result<WorkerHandle>
    where
        B: EventBus<Trigger> + ?Sized,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let sub: Subscription<Trigger> = bus.subscribe();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(name, sub, shutdown_rx, &lifecycle, &runtime))?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

fn worker_loop(
    name: &'static str,
    sub: Subscription<Trigger>,
    shutdown_rx: mpsc::Receiver<()>,
    lifecycle: &Lifecycle,
    runtime: &Handle,
) {
    let tick = Duration::from_millis(100);

    loop {
        // Explicit shutdown, or the handle was dropped.
        match shutdown_rx.try_recv() {
            Ok(()) | Err(mpsc::TryRecvError::Disconnected) => break,
            Err(mpsc::TryRecvError::Empty) => {}
        }

        match sub.recv_timeout(tick) {
            Ok(trigger) => {
                let event_type = trigger.event_type();
                let company_id = trigger.company_id();

                match runtime.block_on(lifecycle.handle(trigger)) {
                    Ok(outcome) => {
                        info!(worker = name, event_type, company_id = ?company_id, outcome = describe(&outcome), "trigger handled")
                    }
                    Err(err) => warn!(
                        worker = name,
                        event_type,
                        company_id = ?company_id,
                        error_class = err.class().as_str(),
                        error = %err,
                        "trigger worker handler failed"
                    ),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn describe(outcome: &LifecycleOutcome) -> &'static str {
    match outcome {
        LifecycleOutcome::Onboarded(_) => "onboarded",
        LifecycleOutcome::Timer(TimerOutcome::NothingPending) => "nothing_pending",
        LifecycleOutcome::Timer(TimerOutcome::Sent { .. }) => "sent",
        LifecycleOutcome::SuggestionResolved(_) => "resolved",
    }
}
