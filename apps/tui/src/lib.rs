// Export our modules for use in binaries and tests
pub mod cli;
pub mod config;
pub mod logging;
pub mod transport;
