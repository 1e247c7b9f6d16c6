pub mod env;
pub mod init;
pub mod routes;
pub mod state;
