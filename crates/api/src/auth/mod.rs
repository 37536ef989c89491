//! Token handling. Tokens are issued by the identity provider; this service
//! only verifies them.

pub mod jwt;
