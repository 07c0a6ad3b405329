//! Event-Log – geordneter, nur-anfuegender Puffer der Ausgangs-Events
//!
//! Alle Verbindungen teilen sich EIN Log; jede Session haelt ihren eigenen
//! Cursor (absolute Sequenznummer). Neue Verbindungen beginnen am aktuellen
//! Ende und bekommen nur spaetere Events.
//!
//! ## Begrenzung
//! Das Log ist auf `max_laenge` Eintraege begrenzt (drop-oldest): beim
//! Ueberlauf wird der aelteste Eintrag verworfen und die Basis-Sequenz rueckt
//! vor. Ein Cursor der hinter die Basis gefallen ist (sehr langsamer Client)
//! springt beim naechsten Zugriff auf die Basis – verworfene Events werden
//! uebersprungen, niemals umgeordnet.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

/// Standard-Obergrenze des Event-Logs
pub const STANDARD_MAX_LAENGE: usize = 1024;

// ---------------------------------------------------------------------------
// OutboundEvent
// ---------------------------------------------------------------------------

/// Ein zustellbares Ereignis
///
/// Wird genau einmal beim Einreihen erzeugt und danach nie veraendert.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    /// Fertig serialisierter Wire-Payload
    pub payload: String,
    /// Anzeige-Label (Aktionsname), fuer das Konsolen-Log
    pub label: Option<String>,
    /// Menschenlesbare Beschreibung fuer das Konsolen-Log
    pub beschreibung: Option<String>,
    /// Wartezeit nach der Zustellung, bevor das naechste Event folgt
    pub verzoegerung_ms: Option<u64>,
}

impl OutboundEvent {
    /// Erstellt ein Event; ein fehlendes Label wird aus dem `action`-Feld
    /// des Payloads abgeleitet
    pub fn neu(
        payload: impl Into<String>,
        verzoegerung_ms: Option<u64>,
        label: Option<String>,
        beschreibung: Option<String>,
    ) -> Self {
        let payload = payload.into();
        let label = label.or_else(|| {
            serde_json::from_str::<serde_json::Value>(&payload)
                .ok()
                .and_then(|wert| wert.get("action")?.as_str().map(str::to_string))
                .filter(|aktion| !aktion.is_empty())
        });
        Self {
            payload,
            label,
            beschreibung,
            verzoegerung_ms: verzoegerung_ms.filter(|&v| v > 0),
        }
    }
}

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

struct EventLogInnen {
    eintraege: VecDeque<Arc<OutboundEvent>>,
    /// Sequenznummer des vordersten Eintrags
    basis: u64,
}

/// Geteiltes, nur-anfuegendes Event-Log
///
/// Thread-safe via Arc + RwLock. Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct EventLog {
    innen: Arc<RwLock<EventLogInnen>>,
    max_laenge: usize,
}

impl EventLog {
    /// Erstellt ein neues Log mit der gegebenen Obergrenze
    pub fn neu(max_laenge: usize) -> Self {
        Self {
            innen: Arc::new(RwLock::new(EventLogInnen {
                eintraege: VecDeque::new(),
                basis: 0,
            })),
            max_laenge: max_laenge.max(1),
        }
    }

    /// Haengt ein Event an und gibt seine Sequenznummer zurueck
    pub fn anhaengen(&self, event: OutboundEvent) -> u64 {
        let mut innen = self.innen.write();
        while innen.eintraege.len() >= self.max_laenge {
            innen.eintraege.pop_front();
            innen.basis += 1;
            tracing::warn!(basis = innen.basis, "Event-Log voll – aeltestes Event verworfen");
        }
        let sequenz = innen.basis + innen.eintraege.len() as u64;
        innen.eintraege.push_back(Arc::new(event));
        sequenz
    }

    /// Sequenznummer hinter dem letzten Eintrag (Start-Cursor neuer Sessions)
    pub fn ende(&self) -> u64 {
        let innen = self.innen.read();
        innen.basis + innen.eintraege.len() as u64
    }

    /// Naechstes Event ab `cursor`, mitsamt dem fortgeschriebenen Cursor
    ///
    /// Ein Cursor hinter der Basis wird auf die Basis angehoben
    /// (drop-oldest: verworfene Events werden uebersprungen).
    pub fn naechstes(&self, cursor: u64) -> Option<(Arc<OutboundEvent>, u64)> {
        let innen = self.innen.read();
        let wirksam = cursor.max(innen.basis);
        let index = (wirksam - innen.basis) as usize;
        let event = innen.eintraege.get(index)?.clone();
        Some((event, wirksam + 1))
    }

    /// Anzahl der aktuell gehaltenen Eintraege
    pub fn laenge(&self) -> usize {
        self.innen.read().eintraege.len()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::neu(STANDARD_MAX_LAENGE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
