//! PlaceMap Kakao-Map-Synchronisations-Engine.
//!
//! Gleicht deklarativen Anwendungs-Zustand (Suchtreffer, Route,
//! Selektion) gegen den imperativen Objektgraphen einer Kakao-Karte ab
//! — wahlweise direkt im selben Prozess (Web) oder ueber eine
//! Script-Injektion/Message-Bridge in eine isolierte WebView (Mobile).

pub mod adapter;
pub mod app;
pub mod core;
pub mod shared;

pub use adapter::{
    AdapterCommand, AdapterError, BridgeMapAdapter, BridgeMessage, KakaoMapSdk, MapAdapter,
    MarkerDraw, PolylineStyle, RecordingAdapter, ScriptHost, SimulatedSdk, WebMapAdapter,
};
pub use app::{
    MapCommand, MapController, MapIntent, MapNotification, MapPhase, MapSyncState,
};
pub use core::{
    parking_lots_to_markers, search_results_to_markers, LatLng, LatLngBounds, Marker, MarkerKind,
    MarkerLabel, MarkerSource, ParkingLot, ParkingLotDetail, RoutePoint, RouteResult, RouteStep,
    SearchResult,
};
pub use shared::{MapOptions, MarkerStyle};
