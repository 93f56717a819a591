pub mod config_io;
pub mod fetcher;
pub mod http;
pub mod log;
pub mod markup;
pub mod store;
