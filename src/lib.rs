pub mod config;
pub mod logging;
pub mod models;
pub mod util;

#[cfg(feature = "gui")]
pub mod components;
