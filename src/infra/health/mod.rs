pub mod health_server;

pub use health_server::serve;
