//! Kanal-Hub – gruppiert WebUI-Verbindungen und verteilt Nachrichten
//!
//! Der Hub verwaltet die Sende-Queues aller Kanal-Mitglieder und stellt
//! selektives Broadcasting bereit: Nachrichten eines Kanals erreichen nur
//! dessen Mitglieder, Nachrichten auf `"global"` erreichen jede Verbindung –
//! der Absender ist immer ausgenommen.
//!
//! Kanaele entstehen beim ersten Beitritt und verschwinden mit dem letzten
//! Mitglied. Beim Herunterfahren werden alle Mitglieder mit Statuscode 1001
//! geschlossen; danach findet kein Fan-out mehr statt.

use dashmap::DashMap;
use echocast_core::ClientId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Reservierter Kanalname mit kanaluebergreifendem Fan-out
pub const KANAL_GLOBAL: &str = "global";

/// Groesse der Sende-Queue pro Mitglied
const SENDE_QUEUE_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// MitgliedSender
// ---------------------------------------------------------------------------

/// Befehl an die Socket-Task eines Kanal-Mitglieds
#[derive(Debug, Clone, PartialEq)]
pub enum HubBefehl {
    /// Textframe zustellen
    Text(String),
    /// Verbindung mit Statuscode schliessen
    Schliessen { code: u16, grund: String },
}

/// Handle auf die Sende-Queue eines Kanal-Mitglieds
#[derive(Clone, Debug)]
struct MitgliedSender {
    client_id: ClientId,
    tx: mpsc::Sender<HubBefehl>,
}

impl MitgliedSender {
    /// Reiht einen Befehl nicht-blockierend ein
    ///
    /// Gibt `false` zurueck wenn die Queue voll oder geschlossen ist –
    /// ein voller Puffer verwirft die Nachricht (drop-newest), ein einzelnes
    /// langsames Mitglied darf den Fan-out nicht aufhalten.
    fn senden(&self, befehl: HubBefehl) -> bool {
        match self.tx.try_send(befehl) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(client = %self.client_id, "Sende-Queue voll – Nachricht verworfen");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(client = %self.client_id, "Sende-Queue geschlossen (Mitglied getrennt)");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// KanalHub
// ---------------------------------------------------------------------------

/// Zentraler Kanal-Hub fuer alle WebUI-Verbindungen
///
/// Thread-safe via Arc + DashMap. Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct KanalHub {
    innen: Arc<KanalHubInnen>,
}

struct KanalHubInnen {
    /// Mitglieds-Sender, indiziert nach ClientId
    mitglieder: DashMap<ClientId, MitgliedSender>,
    /// Kanal-Mitgliedschaft: Kanalname -> ClientIds
    kanal_mitglieder: DashMap<String, Vec<ClientId>>,
    /// Nach Beginn des Herunterfahrens findet kein Fan-out mehr statt
    heruntergefahren: AtomicBool,
}

impl KanalHub {
    /// Erstellt einen neuen KanalHub
    pub fn neu() -> Self {
        Self {
            innen: Arc::new(KanalHubInnen {
                mitglieder: DashMap::new(),
                kanal_mitglieder: DashMap::new(),
                heruntergefahren: AtomicBool::new(false),
            }),
        }
    }

    /// Fuegt ein Mitglied seinem Kanal hinzu und gibt seine Empfangs-Queue zurueck
    ///
    /// Der Kanal wird beim ersten Beitritt angelegt.
    pub fn beitreten(&self, client_id: ClientId, kanal: &str) -> mpsc::Receiver<HubBefehl> {
        let (tx, rx) = mpsc::channel(SENDE_QUEUE_GROESSE);
        self.innen
            .mitglieder
            .insert(client_id, MitgliedSender { client_id, tx });
        self.innen
            .kanal_mitglieder
            .entry(kanal.to_string())
            .or_default()
            .push(client_id);
        tracing::info!(client = %client_id, kanal = %kanal, "Kanal beigetreten");
        rx
    }

    /// Entfernt ein Mitglied; leere Kanaele werden geloescht
    pub fn verlassen(&self, client_id: &ClientId) {
        self.innen.mitglieder.remove(client_id);
        self.innen.kanal_mitglieder.iter_mut().for_each(|mut eintrag| {
            eintrag.value_mut().retain(|id| id != client_id);
        });
        self.innen
            .kanal_mitglieder
            .retain(|_, mitglieder| !mitglieder.is_empty());
        tracing::debug!(client = %client_id, "Kanal verlassen");
    }

    /// Verteilt eine Nachricht gemaess der Kanal-Zugehoerigkeit
    ///
    /// `"global"` erreicht jedes Mitglied jedes Kanals, andere Kanaele nur
    /// ihre eigenen Mitglieder; der Absender ist immer ausgenommen.
    /// Zustellfehler einzelner Mitglieder stoppen den Fan-out nicht.
    /// Gibt die Anzahl der erfolgreichen Zustellungen zurueck.
    pub fn rundsenden(&self, kanal: &str, absender: &ClientId, payload: &str) -> usize {
        if self.innen.heruntergefahren.load(Ordering::SeqCst) {
            tracing::debug!(kanal = %kanal, "Fan-out unterdrueckt – Hub faehrt herunter");
            return 0;
        }

        let empfaenger: Vec<ClientId> = if kanal == KANAL_GLOBAL {
            self.innen
                .kanal_mitglieder
                .iter()
                .flat_map(|eintrag| eintrag.value().clone())
                .collect()
        } else {
            self.innen
                .kanal_mitglieder
                .get(kanal)
                .map(|mitglieder| mitglieder.clone())
                .unwrap_or_default()
        };

        let mut gesendet = 0;
        for client_id in &empfaenger {
            if client_id == absender {
                continue;
            }
            if let Some(sender) = self.innen.mitglieder.get(client_id) {
                if sender.senden(HubBefehl::Text(payload.to_string())) {
                    gesendet += 1;
                }
            }
        }
        gesendet
    }

    /// Schliesst alle Mitglieder und loescht den Kanal-Zustand
    ///
    /// Nach dem Aufruf findet kein Fan-out mehr statt.
    pub fn herunterfahren(&self) {
        self.innen.heruntergefahren.store(true, Ordering::SeqCst);

        let mut geschlossen = 0;
        self.innen.mitglieder.iter().for_each(|eintrag| {
            if eintrag.value().senden(HubBefehl::Schliessen {
                code: 1001,
                grund: "Server shutting down".into(),
            }) {
                geschlossen += 1;
            }
        });
        self.innen.mitglieder.clear();
        self.innen.kanal_mitglieder.clear();

        tracing::info!(geschlossen, "Kanal-Hub heruntergefahren");
    }

    /// Anzahl der Mitglieder ueber alle Kanaele
    pub fn mitglied_anzahl(&self) -> usize {
        self.innen.mitglieder.len()
    }

    /// Anzahl der existierenden Kanaele
    pub fn kanal_anzahl(&self) -> usize {
        self.innen.kanal_mitglieder.len()
    }
}

impl Default for KanalHub {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn kanal_fan_out_ohne_absender() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let b = ClientId::naechste();
        let c = ClientId::naechste();

        let mut rx_a = hub.beitreten(a, "x");
        let mut rx_b = hub.beitreten(b, "x");
        let mut rx_c = hub.beitreten(c, "anderer");

        let gesendet = hub.rundsenden("x", &a, "hallo");
        assert_eq!(gesendet, 1);

        assert!(rx_a.try_recv().is_err(), "Absender darf nichts empfangen");
        assert_eq!(rx_b.try_recv().unwrap(), HubBefehl::Text("hallo".into()));
        assert!(
            rx_c.try_recv().is_err(),
            "fremde Kanaele duerfen nichts empfangen"
        );
    }

    #[tokio::test]
    async fn global_erreicht_alle_kanaele() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let b = ClientId::naechste();
        let c = ClientId::naechste();

        let mut rx_a = hub.beitreten(a, KANAL_GLOBAL);
        let mut rx_b = hub.beitreten(b, "x");
        let mut rx_c = hub.beitreten(c, "y");

        let gesendet = hub.rundsenden(KANAL_GLOBAL, &a, "an alle");
        assert_eq!(gesendet, 2);

        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_c.try_recv().is_ok());
    }

    #[tokio::test]
    async fn unbekannter_kanal_erreicht_niemanden() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let _rx = hub.beitreten(a, "x");
        assert_eq!(hub.rundsenden("gibtsnicht", &ClientId::naechste(), "?"), 0);
    }

    #[tokio::test]
    async fn leere_kanaele_werden_geloescht() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let b = ClientId::naechste();

        let _rx_a = hub.beitreten(a, "x");
        let _rx_b = hub.beitreten(b, "x");
        assert_eq!(hub.kanal_anzahl(), 1);

        hub.verlassen(&a);
        assert_eq!(hub.kanal_anzahl(), 1, "Kanal hat noch ein Mitglied");

        hub.verlassen(&b);
        assert_eq!(hub.kanal_anzahl(), 0, "leerer Kanal muss verschwinden");
        assert_eq!(hub.mitglied_anzahl(), 0);
    }

    #[tokio::test]
    async fn getrenntes_mitglied_blockiert_fanout_nicht() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let b = ClientId::naechste();
        let c = ClientId::naechste();

        let rx_b = hub.beitreten(b, "x");
        let mut rx_c = hub.beitreten(c, "x");
        drop(rx_b); // b ist weg, aber noch nicht ausgetragen

        let gesendet = hub.rundsenden("x", &a, "hallo");
        assert_eq!(gesendet, 1);
        assert!(rx_c.try_recv().is_ok());
    }

    #[tokio::test]
    async fn herunterfahren_schliesst_und_leert() {
        let hub = KanalHub::neu();
        let a = ClientId::naechste();
        let b = ClientId::naechste();

        let mut rx_a = hub.beitreten(a, "x");
        let mut rx_b = hub.beitreten(b, "y");

        hub.herunterfahren();

        for rx in [&mut rx_a, &mut rx_b] {
            let befehl = rx.try_recv().unwrap();
            assert!(matches!(befehl, HubBefehl::Schliessen { code: 1001, .. }));
        }
        assert_eq!(hub.mitglied_anzahl(), 0);
        assert_eq!(hub.kanal_anzahl(), 0);

        // Kein Fan-out mehr nach Beginn des Herunterfahrens
        assert_eq!(hub.rundsenden(KANAL_GLOBAL, &a, "zu spaet"), 0);
    }
}
