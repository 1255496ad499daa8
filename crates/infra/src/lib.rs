//! Infrastructure layer: lifecycle coordinators, dev adapters for every
//! collaborator, and the worker that feeds bus triggers into the lifecycle.

pub mod adapters;
pub mod lifecycle;
pub mod workers;
