//! Application-Layer: Controller, Zustand, Events und Handler.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod overlay_content;
pub mod scheduler;
pub mod state;

pub use command_log::CommandLog;
pub use controller::MapController;
pub use events::{MapCommand, MapIntent, MapNotification};
pub use scheduler::{TimerHandle, TimerQueue};
pub use state::{MapPhase, MapSyncState, OpenOverlay, OverlayOrigin};
