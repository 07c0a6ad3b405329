//! Sitzungs-Register – Wer ist gerade verbunden?
//!
//! Der Verbindungs-Datensatz selbst gehoert der jeweiligen Session-Task;
//! dieses Register haelt nur die Handles fuer externe Nachschlaege
//! (Konsolen-Ausgabe, Zaehler). Thread-safe via Arc + DashMap.

use dashmap::DashMap;
use echocast_core::{ClientId, ClientKind};
use std::sync::Arc;

/// Nachschlagbare Eckdaten einer verbundenen Session
#[derive(Debug, Clone)]
pub struct SitzungsInfo {
    pub client_id: ClientId,
    pub name: String,
    pub typ: ClientKind,
}

/// Register aller aktiven Sessions
#[derive(Clone, Default)]
pub struct SitzungsRegister {
    innen: Arc<DashMap<ClientId, SitzungsInfo>>,
}

impl SitzungsRegister {
    /// Erstellt ein leeres Register
    pub fn neu() -> Self {
        Self::default()
    }

    /// Meldet eine neue Session an
    pub fn anmelden(&self, info: SitzungsInfo) {
        tracing::debug!(client = %info.client_id, "Session im Register angemeldet");
        self.innen.insert(info.client_id, info);
    }

    /// Meldet eine Session ab
    pub fn abmelden(&self, client_id: &ClientId) {
        if self.innen.remove(client_id).is_some() {
            tracing::debug!(client = %client_id, "Session aus Register abgemeldet");
        }
    }

    /// Aktualisiert Name und Typ nach dem Hello des Clients
    pub fn aktualisieren(&self, client_id: &ClientId, name: Option<&str>, typ: ClientKind) {
        if let Some(mut eintrag) = self.innen.get_mut(client_id) {
            if let Some(name) = name {
                eintrag.name = name.to_string();
            }
            eintrag.typ = typ;
        }
    }

    /// Eckdaten einer Session
    pub fn info(&self, client_id: &ClientId) -> Option<SitzungsInfo> {
        self.innen.get(client_id).map(|e| e.clone())
    }

    /// Anzahl der aktiven Sessions
    pub fn anzahl(&self) -> usize {
        self.innen.len()
    }
}
