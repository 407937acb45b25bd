//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;


pub use cli::{
    Command, FleetArgs, HistoryArgs, HistoryCommand, RouteArgs, TrackArgs, ViewerArgs,
};
