//! Controller-eigener Abgleich-Zustand.

pub mod sync_state;

pub use sync_state::{LevelReset, MapPhase, MapSyncState, OpenOverlay, OverlayOrigin};
