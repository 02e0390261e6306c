pub mod api;
pub mod config;
pub mod controller_client;
pub mod http_client;
pub mod services;
