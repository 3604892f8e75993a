//! Mount Pipeline
//!
//! Connects component definitions to tree instances.
//!
//! ```text
//! mount(config, build) → Tree (fresh TreeId) → root Scope → build → MountHandle
//! ```
//!
//! Every mount produces an independent tree; the handle owns it and tears it
//! down on `unmount` or drop.

pub mod mount;

pub use mount::{MountHandle, mount, mount_component};
