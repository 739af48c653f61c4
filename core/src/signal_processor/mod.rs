//! Match lifecycle detection.
//!
//! The poller turns a stream of telemetry fetches into two signals,
//! `MatchStarted` and `MatchEnded`, and keeps the shared snapshot cache
//! current in between.

mod handler;
mod poller;
mod signal;

#[cfg(test)]
mod poller_tests;

pub use handler::SignalHandler;
pub use poller::MatchPoller;
pub use signal::MatchSignal;
