//! # partykit-registry
//!
//! Versioned interface registry for the Party Protocol.
//!
//! Every contract family has been redeployed several times with incompatible
//! interfaces. The registry maps `(network, implementation address)` to the
//! [`InterfaceDescriptor`] valid for that deployment.
//!
//! ## Levels
//! 1. **Bundled**: deployment tables compiled in from `data/*.yaml`
//! 2. **Extended**: bundled tables plus operator-supplied YAML files, appended

pub mod bundled;
pub mod descriptor;
pub mod loader;
pub mod registry;

pub use descriptor::InterfaceDescriptor;
pub use loader::DeploymentParser;
pub use registry::{FamilyRegistry, RegistryEntry, RegistrySet};
