//! Domaenen-Schicht: Geo-Primitiven, Provider-Typen, Marker-Konvertierung.

pub mod geo;
pub mod marker;
pub mod place;
pub mod route;

pub use geo::{LatLng, LatLngBounds};
pub use marker::{
    parking_lots_to_markers, search_results_to_markers, Marker, MarkerKind, MarkerLabel,
    MarkerSource, PARKING_MARKER_PREFIX, ROUTE_END_MARKER_ID, ROUTE_START_MARKER_ID,
    USER_LOCATION_MARKER_ID, USER_LOCATION_TITLE,
};
pub use place::{ParkingLot, ParkingLotDetail, SearchResult};
pub use route::{RoutePoint, RouteResult, RouteStep};
