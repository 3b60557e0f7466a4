mod base;
pub use base::*;

mod error;
pub use error::*;

mod client;
pub use client::*;

mod server;
pub use server::*;
