pub mod trigger_worker;

pub use trigger_worker::{TriggerWorker, WorkerHandle};
