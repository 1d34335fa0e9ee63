//! `ep-plugin-sdk` — client SDK for EdgePlane node plugins.
//!
//! A *plugin* is a process that serves one capability class on a fog node
//! (OS operations, network virtualization, agent queries) and consumes the
//! capabilities its peers serve.  Plugins never talk to each other
//! directly: every call is a named remote evaluation routed through the
//! shared distributed key-value store, and every record they exchange
//! lives under the node's key-space in that store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Your plugin process                                     │
//! │                                                          │
//! │   let session = PluginSession::new(store, node, 1, None);│
//! │   session.register("my-runtime", kind).await?;           │
//! │                                                          │
//! │   let os = session.os().await?.expect("os plugin");      │
//! │   os.download_file(url, "/tmp/img.qcow2").await?;        │
//! │   os.checksum("/tmp/img.qcow2").await?;                  │
//! └──────────────────────────────────────────────────────────┘
//!          │  facade op = params + one evaluation + decode
//!          ▼
//!   EvalInvoker ── ConnectorStore::evaluate ──▶ remote plugin
//! ```
//!
//! # Layers
//!
//! - [`eval::EvalInvoker`]: one call, one envelope, one payload; the
//!   layered error taxonomy lives in `ep_domain::error`.
//! - [`discovery::PluginDiscovery`]: resolves which instance serves a
//!   capability; runs once per facade construction.
//! - [`os::OsPlugin`], [`network::NetworkPlugin`], [`agent::AgentClient`]:
//!   typed facades; each operation is a parameter map, one invocation,
//!   and a declared decode rule (boolean / opaque / structured).
//! - [`content`]: the two-layer codec for moving raw bytes through the
//!   string-only parameter channel.
//! - [`state::StateStore`]: the plugin's own persisted state blob.
//!
//! No call retries, caches, or depends on another call; ordering between
//! operations (create a namespace before moving interfaces into it) is the
//! caller's responsibility.

pub mod agent;
pub mod content;
pub mod decode;
pub mod discovery;
pub mod eval;
pub mod network;
pub mod os;
pub mod params;
pub mod session;
pub mod state;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use agent::AgentClient;
pub use discovery::PluginDiscovery;
pub use eval::EvalInvoker;
pub use network::NetworkPlugin;
pub use os::OsPlugin;
pub use params::{namespace_or_default, Params, DEFAULT_NETNS};
pub use session::PluginSession;
pub use state::StateStore;

// Re-export the shared crates so plugins need only this one dependency.
pub use ep_connector::{CallEnvelope, ConnectorStore, MemoryStore, ParamMap};
pub use ep_domain::capability::{CapabilityDescriptor, CapabilityKind};
pub use ep_domain::config::SdkConfig;
pub use ep_domain::error::{Error, Result, TransportError};
pub use ep_domain::records;
