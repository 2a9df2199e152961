pub mod config;
pub mod credentials;
pub mod fetch;
pub mod github;
pub mod logging;
pub mod output;
