//! Shared filesystem and naming helpers

pub mod naming;
