//! # tether-portals
//!
//! The fragment engine: marker parsing, cross-file collection with conflict
//! detection, and in-place target updates that leave everything outside the
//! marked regions byte-for-byte untouched.
//!
//! Call [`sync_portals_at`] to run every portal entry of a config, or
//! [`discover_fragments_at`] to list the fragments a config declares.

pub mod collect;
pub mod error;
pub mod marker;
pub mod sync;
pub mod update;

pub use collect::{collect_fragments_at, CollectedFragments, DiscoveredFragment};
pub use error::PortalError;
pub use marker::{parse_fragments, FragmentRange};
pub use sync::{discover_fragments, discover_fragments_at, sync_portals, sync_portals_at};
pub use update::update_target;
