//! Geteilte Konfiguration und visuelle Marker-Darstellung.

pub mod marker_style;
pub mod options;

pub use marker_style::{style_for, MarkerStyle};
pub use options::MapOptions;
