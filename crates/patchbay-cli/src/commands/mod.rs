//! CLI command implementations.

pub mod catalog;
pub mod check;
pub mod common;
pub mod compat;
pub mod edit;
pub mod examples;
pub mod info;
pub mod recent;
