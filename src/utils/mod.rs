pub mod config;
pub mod date;
pub mod http_client;
pub mod logging;
pub mod middleware;
