pub mod config;
pub mod connection;
pub mod exception;
pub mod header;
pub mod param;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod store;

pub use config::Config;
pub use connection::{handle_connection, Context, Stage};
pub use exception::Exception;
pub use header::Headers;
pub use request::Request;
pub use response::Response;
pub use router::Route;
pub use server::Server;
pub use store::FileStore;
