// Library exports for the Snake Battle client
// This allows the replay tool and the integration tests to use the core decision logic

pub mod board;
pub mod bot;
pub mod client;
pub mod config;
pub mod debug_logger;
pub mod handler;
pub mod replay;
pub mod rng;
pub mod trap;
pub mod types;
