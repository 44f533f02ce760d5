//! Entity Module

pub mod audit_log;
pub mod principal;
pub mod user;
