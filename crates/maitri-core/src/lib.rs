//! maitri-core: Pure dashboard logic, no UI.
//!
//! This crate contains the scripted chat responder, the stress alert state
//! machine, cosmetic telemetry and the virtual-time scheduler that drives
//! them. It is completely UI-agnostic; frontends subscribe to events via
//! tokio::broadcast and send commands through a `DashboardHandle`.

pub mod alert;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod responder;
pub mod runner;
pub mod scheduler;
pub mod telemetry;
pub mod types;
