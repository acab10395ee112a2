//! Cycle Quiz: onboarding quiz wizard core.

pub mod config;
pub mod error;
pub mod quiz;
