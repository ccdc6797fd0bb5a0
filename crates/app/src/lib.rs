//! SkillOrbit command-line application: Firebase adapter, configuration and
//! app context for the storefront.

pub mod config;
pub mod context;
pub mod firebase;
pub mod listing;
