//! Authentication types and session exchange.
//!
//! All authenticated operations flow through a [`Session`], obtained by
//! exchanging [`Credentials`] with the PDS.

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::Session;
