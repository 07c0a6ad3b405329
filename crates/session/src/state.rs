//! Gemeinsamer Server-Zustand der Session-Schicht
//!
//! Haelt das geteilte Event-Log und das Sitzungs-Register. Wird als Arc an
//! jede Session-Task gereicht; der Lebenszyklus ist an die laufende
//! Server-Instanz gebunden und wird bei jedem Start frisch aufgebaut.

use std::sync::Arc;

use crate::queue::{EventLog, OutboundEvent};
use crate::registry::SitzungsRegister;

/// Geteilter Zustand aller Verbindungs-Sessions
pub struct SessionState {
    /// Geteiltes Event-Log (jede Session hat ihren eigenen Cursor)
    pub ereignisse: EventLog,
    /// Register der aktiven Sessions
    pub register: SitzungsRegister,
}

impl SessionState {
    /// Erstellt einen neuen SessionState
    pub fn neu(max_log_laenge: usize) -> Arc<Self> {
        Arc::new(Self {
            ereignisse: EventLog::neu(max_log_laenge),
            register: SitzungsRegister::neu(),
        })
    }

    /// Reiht ein Ausgangs-Event fuer alle Verbindungen ein
    pub fn ereignis_einreihen(
        &self,
        payload: impl Into<String>,
        verzoegerung_ms: Option<u64>,
        label: Option<String>,
        beschreibung: Option<String>,
    ) -> u64 {
        let event = OutboundEvent::neu(payload, verzoegerung_ms, label, beschreibung);
        let sequenz = self.ereignisse.anhaengen(event);
        tracing::debug!(sequenz, "Event eingereiht");
        sequenz
    }
}
