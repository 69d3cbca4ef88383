//! Aufzeichnender Adapter fuer Tests und die Demo-Binary.
//!
//! Fuehrt nichts aus, sondern protokolliert die Befehlsfolge an der
//! Adapter-Naht — Tests pruefen damit die minimale Befehlssequenz des
//! Controllers, die Demo macht sie sichtbar.

use std::time::Instant;

use crate::core::LatLng;
use crate::shared::MapOptions;

use super::{AdapterCommand, AdapterError, MapAdapter};

/// Adapter, der alle Befehle mitschreibt.
pub struct RecordingAdapter {
    commands: Vec<AdapterCommand>,
    /// `true`: wie die Web-Variante sofort bereit; `false`: wie die
    /// Bridge erst nach `notify_ready`
    ready_immediately: bool,
    initialized: bool,
    level: i32,
    /// Naechster `apply`-Aufruf schlaegt mit diesem Grund fehl
    fail_next: Option<String>,
}

impl RecordingAdapter {
    /// Adapter, der sich wie die Web-Variante verhaelt (sofort bereit).
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            ready_immediately: true,
            initialized: false,
            level: 0,
            fail_next: None,
        }
    }

    /// Adapter, der Bereitschaft erst nach `notify_ready` meldet.
    pub fn deferred_ready() -> Self {
        Self {
            ready_immediately: false,
            ..Self::new()
        }
    }

    /// Laesst den naechsten Befehl fehlschlagen (Fehler-Pfad-Tests).
    pub fn fail_next_command(&mut self, reason: &str) {
        self.fail_next = Some(reason.to_string());
    }

    /// Setzt das gemeldete Level, als haette der Nutzer gezoomt.
    pub fn override_level(&mut self, level: i32) {
        self.level = level;
    }

    /// Bisher aufgezeichnete Befehle.
    pub fn commands(&self) -> &[AdapterCommand] {
        &self.commands
    }

    /// Entnimmt alle aufgezeichneten Befehle.
    pub fn take_commands(&mut self) -> Vec<AdapterCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for RecordingAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MapAdapter for RecordingAdapter {
    fn initialize(&mut self, _center: LatLng, options: &MapOptions) -> Result<bool, AdapterError> {
        self.initialized = true;
        self.level = options.initial_level;
        Ok(self.ready_immediately)
    }

    fn notify_ready(&mut self) {}

    fn apply(&mut self, _now: Instant, command: &AdapterCommand) -> Result<(), AdapterError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(AdapterError::MapUnavailable(reason));
        }
        if let AdapterCommand::SetLevel { level } = command {
            self.level = *level;
        }
        self.commands.push(command.clone());
        Ok(())
    }

    fn pump(&mut self, _now: Instant) -> Result<(), AdapterError> {
        Ok(())
    }

    fn level(&self) -> Option<i32> {
        self.initialized.then_some(self.level)
    }

    fn dispose(&mut self) {
        self.initialized = false;
    }
}
