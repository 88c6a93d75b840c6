#[macro_use]
extern crate serde;

pub mod config;
pub mod constant;
pub mod credentials;
pub mod error;
pub mod golfbert;
pub mod server;
pub mod signer;
pub mod string_to_sign;

pub use config::*;
pub use credentials::*;
pub use error::*;
pub use golfbert::*;
pub use signer::*;
pub use string_to_sign::*;
