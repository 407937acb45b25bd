//! Core library for the `fleetview` CLI.
//!
//! A terminal viewer for a vehicle-tracking backend: it replays a vehicle's
//! recorded GPS trace on a map one sample per tick, shows fleet status, and
//! draws past rides. The tracking engine ([`tracking`]) is independent of the
//! terminal; it talks to the backend through [`api::FleetApi`] and draws
//! through [`render::StepRenderer`].
pub mod api;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod tracking;
pub mod ui;

mod app;
mod entry;
mod logger;
pub mod shutdown;
mod shutdown_handlers;

pub use entry::run;
