//! `ep-domain` — shared types for the EdgePlane SDK.
//!
//! This crate holds everything the other EdgePlane crates agree on:
//! - The layered error taxonomy ([`error::Error`], [`error::TransportError`]).
//! - Capability kinds and discovery descriptors ([`capability`]).
//! - Domain records exchanged with remote plugins ([`records`]).
//! - SDK configuration ([`config::SdkConfig`]).
//!
//! It deliberately has no I/O and no async code.

pub mod capability;
pub mod config;
pub mod error;
pub mod records;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use capability::{CapabilityDescriptor, CapabilityKind, AGENT_TAG, NETWORK_TAG, OS_TAG};
pub use config::SdkConfig;
pub use error::{Error, Result, TransportError};
pub use records::{
    ConnectionPointDescriptor, ConnectionPointRecord, ImageInfo, InterfaceInfo, NamespaceInfo,
    NodeConfiguration, PluginInfo, STATUS_DESTROY,
};
