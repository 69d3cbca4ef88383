//! Map-Controller fuer zentrale Event-Verarbeitung.

use std::time::Instant;

use crate::adapter::MapAdapter;
use crate::shared::MapOptions;

use super::events::{MapCommand, MapIntent, MapNotification};
use super::handlers;
use super::scheduler::TimerQueue;
use super::state::MapSyncState;

/// Orchestriert Host-Intents und Karten-Events auf den Sync-Zustand.
///
/// Haelt exklusiv die eine Karten-Instanz seiner View — kein anderer
/// Teil der Anwendung gibt Adapter-Befehle aus. Die Karten-Variante
/// (Web direkt oder Bridge) wird beim Konstruieren gewaehlt; der
/// Controller selbst verzweigt nie nach Plattform.
pub struct MapController<A: MapAdapter> {
    adapter: A,
    state: MapSyncState,
    options: MapOptions,
    timers: TimerQueue<MapCommand>,
}

impl<A: MapAdapter> MapController<A> {
    /// Erstellt einen Controller ueber der gewaehlten Karten-Variante.
    pub fn new(adapter: A, options: MapOptions) -> Self {
        let state = MapSyncState::new(&options);
        Self {
            adapter,
            state,
            options,
            timers: TimerQueue::new(),
        }
    }

    /// Verarbeitet einen Intent ueber Intent->Command Mapping.
    pub fn handle_intent(&mut self, now: Instant, intent: MapIntent) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(
            &self.state,
            &self.options,
            intent,
        );
        for command in commands {
            self.handle_command(now, command)?;
        }
        Ok(())
    }

    /// Fuehrt mutierende Commands auf dem Sync-Zustand aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(&mut self, now: Instant, command: MapCommand) -> anyhow::Result<()> {
        self.state.command_log.record(&command);

        match command {
            // === Lebenszyklus ===
            MapCommand::Initialize { center } => handlers::lifecycle::initialize(
                &mut self.state,
                &mut self.adapter,
                &self.options,
                now,
                center,
            ),
            MapCommand::MarkReady => handlers::lifecycle::mark_ready(
                &mut self.state,
                &mut self.adapter,
                &self.options,
                now,
            ),
            MapCommand::Teardown => handlers::lifecycle::teardown(
                &mut self.state,
                &mut self.adapter,
                &mut self.timers,
            ),

            // === Viewport ===
            MapCommand::ApplyCenter { center } => {
                handlers::view::apply_center(&mut self.state, &mut self.adapter, now, center)
            }
            MapCommand::BeginLevelReset { target } => handlers::view::begin_level_reset(
                &mut self.state,
                &mut self.adapter,
                &mut self.timers,
                &self.options,
                now,
                target,
            ),
            MapCommand::LevelStep { target, generation } => handlers::view::level_step(
                &mut self.state,
                &mut self.adapter,
                &mut self.timers,
                &self.options,
                now,
                target,
                generation,
            ),
            MapCommand::RecordIdle { center, level } => handlers::view::record_idle(
                &mut self.state,
                &mut self.timers,
                &self.options,
                now,
                center,
                level,
            ),
            MapCommand::NotifyMapIdle { center } => {
                handlers::view::notify_idle(&mut self.state, center)
            }

            // === Marker ===
            MapCommand::ApplyMarkers { markers } => {
                handlers::markers::apply(&mut self.state, &mut self.adapter, now, markers)
            }
            MapCommand::ResyncMarkers => {
                handlers::markers::resync(&mut self.state, &mut self.adapter, now)
            }

            // === Route ===
            MapCommand::ApplyRoute { route } => handlers::route::apply(
                &mut self.state,
                &mut self.adapter,
                now,
                &self.options,
                route,
            ),

            // === Overlays ===
            MapCommand::ShowInfoOverlay { place_id, position } => handlers::overlay::show_info(
                &mut self.state,
                &mut self.adapter,
                now,
                place_id,
                position,
            ),
            MapCommand::HideInfoOverlay => {
                handlers::overlay::hide_info(&mut self.state, &mut self.adapter, now)
            }
            MapCommand::ShowHoverOverlay { id } => {
                handlers::overlay::show_hover(&mut self.state, &mut self.adapter, now, id)
            }
            MapCommand::HideHoverOverlay { id } => {
                handlers::overlay::hide_hover(&mut self.state, &mut self.adapter, now, &id)
            }
            MapCommand::PromoteHoverOverlay { id } => {
                handlers::overlay::promote_hover(&mut self.state, &id)
            }

            // === Host-Meldungen ===
            MapCommand::NotifyMarkerPressed { id, position } => self
                .state
                .push_notification(MapNotification::MarkerPressed { id, position }),
            MapCommand::NotifyRouteSelected { place } => self
                .state
                .push_notification(MapNotification::RouteSelected { place }),
        }

        Ok(())
    }

    /// Treibt Timer und Adapter voran; faellige Commands laufen sofort.
    pub fn pump(&mut self, now: Instant) -> anyhow::Result<()> {
        if let Err(e) = self.adapter.pump(now) {
            log::warn!("Adapter-Pump fehlgeschlagen: {}", e);
        }
        for command in self.timers.pump(now) {
            self.handle_command(now, command)?;
        }
        Ok(())
    }

    /// Entnimmt alle aufgelaufenen Meldungen fuer den Host.
    pub fn drain_notifications(&mut self) -> Vec<MapNotification> {
        self.state.drain_notifications()
    }

    /// Read-only Sicht auf den Sync-Zustand (Diagnose, Tests).
    pub fn state(&self) -> &MapSyncState {
        &self.state
    }

    /// Zugriff auf die Karten-Variante (Tests, Demo, Host-Verdrahtung).
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutierender Zugriff auf die Karten-Variante (Host-Verdrahtung,
    /// z. B. `BridgeMapAdapter::note_idle`).
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Naechster Timer-Faelligkeitszeitpunkt (Host kann gezielt warten).
    pub fn next_due(&self) -> Option<Instant> {
        self.timers.next_due()
    }
}
