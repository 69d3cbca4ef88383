use indexmap::IndexMap;

use crate::app::command_log::CommandLog;
use crate::app::events::MapNotification;
use crate::app::scheduler::TimerHandle;
use crate::core::{LatLng, Marker, RouteResult};
use crate::shared::MapOptions;

/// Lebenszyklus-Phase der Karte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    /// Karte noch nicht erstellt bzw. Bereitschaft noch nicht gemeldet
    Uninitialized,
    /// Karte benutzbar, Befehle gehen direkt an den Adapter
    Ready,
}

/// Herkunft des offenen Overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOrigin {
    /// Per Klick geoeffnet — bleibt bis zum expliziten Schliessen
    Click,
    /// Per Hover geoeffnet — schliesst bei Mouse-out
    Hover,
}

/// Das eine aktuell offene Overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOverlay {
    /// Marker-ID, an der das Overlay haengt
    pub id: String,
    /// Klick oder Hover
    pub origin: OverlayOrigin,
}

/// Aktiver stufenweiser Level-Reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReset {
    /// Ziel-Level
    pub target: i32,
    /// Generation des Requests — ein neuerer Reset bricht den alten ab
    pub generation: u64,
}

/// Zuletzt angewendeter Karten-Zustand des Controllers.
///
/// Exklusiv vom Controller gehalten, eine Instanz pro Karten-Lebenszeit.
/// Dient ausschliesslich dem Abgleich mit dem naechsten Soll-Zustand
/// und wird nie nach aussen zur Mutation herausgegeben.
pub struct MapSyncState {
    /// Lebenszyklus-Phase
    pub phase: MapPhase,
    /// Zuletzt gerenderter Marker-Satz (Einfuege-Reihenfolge = Render-Reihenfolge)
    pub applied_markers: IndexMap<String, Marker>,
    /// Vor Ready aufgelaufener Marker-Satz — nur der neueste ueberlebt
    pub pending_markers: Option<Vec<Marker>>,
    /// Vor Ready aufgelaufene Route (aeusseres Option = "steht etwas aus")
    pub pending_route: Option<Option<RouteResult>>,
    /// Vor Ready aufgelaufener Mittelpunkt — nur der neueste ueberlebt
    pub pending_center: Option<LatLng>,
    /// Zuletzt gezeichnete Route
    pub route: Option<RouteResult>,
    /// Das hoechstens eine offene Overlay
    pub open_overlay: Option<OpenOverlay>,
    /// Gespiegelter Kartenmittelpunkt
    pub center: LatLng,
    /// Gespiegeltes Karten-Level (Fallback, wenn der Adapter keines kennt)
    pub level: i32,
    /// Aktiver Level-Reset
    pub level_reset: Option<LevelReset>,
    /// Monoton wachsende Reset-Generation
    pub level_reset_generation: u64,
    /// Ausstehende debounced Idle-Meldung
    pub idle_timer: Option<TimerHandle>,
    /// Verlauf ausgefuehrter Commands
    pub command_log: CommandLog,
    notifications: Vec<MapNotification>,
}

impl MapSyncState {
    /// Standard-Mittelpunkt vor dem ersten `Initialize` (Seoul Rathaus).
    pub const DEFAULT_CENTER: LatLng = LatLng {
        lat: 37.5665,
        lng: 126.978,
    };

    /// Erstellt den Ausgangszustand fuer eine frische Karte.
    pub fn new(options: &MapOptions) -> Self {
        Self {
            phase: MapPhase::Uninitialized,
            applied_markers: IndexMap::new(),
            pending_markers: None,
            pending_route: None,
            pending_center: None,
            route: None,
            open_overlay: None,
            center: Self::DEFAULT_CENTER,
            level: options.initial_level,
            level_reset: None,
            level_reset_generation: 0,
            idle_timer: None,
            command_log: CommandLog::new(),
            notifications: Vec::new(),
        }
    }

    /// Gibt `true` zurueck, wenn die Karte benutzbar ist.
    pub fn is_ready(&self) -> bool {
        self.phase == MapPhase::Ready
    }

    /// Stellt eine Meldung fuer den Host ein.
    ///
    /// Direkt aufeinander folgende identische `MapUnavailable`-Meldungen
    /// werden zusammengefasst — ein Marker-Abgleich besteht aus mehreren
    /// Adapter-Befehlen und soll den Host nicht fluten.
    pub fn push_notification(&mut self, notification: MapNotification) {
        if matches!(notification, MapNotification::MapUnavailable { .. })
            && self.notifications.last() == Some(&notification)
        {
            return;
        }
        self.notifications.push(notification);
    }

    /// Entnimmt alle aufgelaufenen Meldungen in Reihenfolge.
    pub fn drain_notifications(&mut self) -> Vec<MapNotification> {
        std::mem::take(&mut self.notifications)
    }
}
