pub mod app;
pub mod cli;
pub mod config;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod output;
pub mod session;
pub mod signal;
pub mod view;

#[cfg(test)]
mod tests;
