//! Shared test utilities for the Custom Components workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`catalog`]: a [`cc_core::Session`] preloaded with a small component
//!   catalog (jump jets, engines, cockpit, weapons)
//! - [`mechs`]: mech definition builders
//! - [`settings`]: settings files in a temporary directory

pub mod catalog;
pub mod mechs;
pub mod settings;
