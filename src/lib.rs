//! Transaction domain model with structural validation, and the HTTP shell
//! that hosts it.

pub mod models;
pub mod server;
pub mod types;
