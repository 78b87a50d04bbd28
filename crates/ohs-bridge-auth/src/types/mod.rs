//! Auth-flow entity types.

pub mod client;
pub mod code;
pub mod token;

pub use client::AuthClient;
pub use code::AuthorizationCode;
pub use token::AccessToken;
