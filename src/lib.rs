pub mod apis;
pub mod config;
pub mod constants;
pub mod csv_io;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;
