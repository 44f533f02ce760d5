//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with a tunable work factor
//! - Bearer token extraction from HTTP headers
//! - Secure random bytes

pub mod bearer;
pub mod crypto;
pub mod password;
