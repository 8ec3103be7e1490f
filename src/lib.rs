//! Service-facing entry point: an [`Engine`] built from an
//! [`EngineConfig`] answers id-based routing and analysis queries over
//! the graph engine in [`accessroute_core`].

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::Engine;

pub use accessroute_core::prelude;
