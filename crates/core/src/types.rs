//! Gemeinsame Identifikationstypen fuer Echocast
//!
//! Client-IDs verwenden das Newtype-Pattern um Verwechslungen mit anderen
//! Zaehlern zur Compilezeit auszuschliessen. Die IDs sind fortlaufende
//! Ordinalzahlen (erste Verbindung = 1), keine UUIDs – der Operator soll
//! Clients in der Konsole anhand kurzer Nummern wiedererkennen.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Eindeutige, fortlaufende Client-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

/// Zaehler fuer die naechste zu vergebende ClientId
static NAECHSTE_ID: AtomicU64 = AtomicU64::new(1);

impl ClientId {
    /// Vergibt die naechste fortlaufende ClientId
    pub fn naechste() -> Self {
        Self(NAECHSTE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Gibt die innere Ordinalzahl zurueck
    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client:{}", self.0)
    }
}

/// Art eines verbundenen Clients
///
/// Wird aus dem `from.type`-Feld der Hello-Nachricht uebernommen.
/// Unbekannte Werte degradieren zu `Unknown` statt die Verbindung
/// abzulehnen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Anzeige-Client (Untertitel-Overlay)
    Live,
    /// Verlaufs-Browser
    History,
    /// Editor/Steuerungs-Client
    Server,
    /// Typ nicht gemeldet oder nicht erkannt
    #[default]
    #[serde(other)]
    Unknown,
}

impl ClientKind {
    /// Parst den Typ aus dem Wire-String, unbekannte Werte werden `Unknown`
    pub fn aus_str(wert: &str) -> Self {
        match wert {
            "live" => Self::Live,
            "history" => Self::History,
            "server" => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Wire-Darstellung des Typs
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::History => "history",
            Self::Server => "server",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ids_fortlaufend() {
        let a = ClientId::naechste();
        let b = ClientId::naechste();
        assert!(b.inner() > a.inner(), "IDs muessen monoton steigen");
    }

    #[test]
    fn client_id_display() {
        let id = ClientId(7);
        assert_eq!(id.to_string(), "client:7");
    }

    #[test]
    fn client_kind_aus_str() {
        assert_eq!(ClientKind::aus_str("live"), ClientKind::Live);
        assert_eq!(ClientKind::aus_str("history"), ClientKind::History);
        assert_eq!(ClientKind::aus_str("server"), ClientKind::Server);
        assert_eq!(ClientKind::aus_str("irgendwas"), ClientKind::Unknown);
    }

    #[test]
    fn client_kind_serde_unbekannt_toleriert() {
        let kind: ClientKind = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(kind, ClientKind::Live);
        let kind: ClientKind = serde_json::from_str("\"sonstwas\"").unwrap();
        assert_eq!(kind, ClientKind::Unknown);
    }
}
