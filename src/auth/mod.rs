//! Authentication module
//!
//! Password hashing and stateless bearer-token issuance/verification.
//! A validly-signed, unexpired token is the sole authorization mechanism;
//! there is no session store and no revocation.

pub mod password;
pub mod token;

pub use token::Claims;
