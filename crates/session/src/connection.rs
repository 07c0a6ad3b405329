//! Client-Session – Zustandsmaschine einer einzelnen Verbindung
//!
//! Jede Verbindung bekommt eine `ClientSession` in einer eigenen tokio-Task.
//! Die Session kennt den Socket nicht direkt; die Transportschicht reicht
//! eingehende Textframes ueber einen Kanal herein und nimmt Ausgangsbefehle
//! ueber einen Kanal entgegen. Das haelt die Session testbar und die
//! Socket-Bibliothek austauschbar.
//!
//! ## Zustandsmaschine
//! ```text
//! Verbindet -> Aktiv -> Schliessend -> Geschlossen
//! ```
//! - `Verbindet -> Aktiv`: initialer Ping gesendet (Handshake)
//! - `Aktiv -> Schliessend`: Close-Aktion des Clients, Sendefehler durch
//!   geschlossene Gegenstelle oder Operator-Shutdown
//! - `Schliessend/Geschlossen`: die Zustellschleife endet fehlerfrei
//!
//! ## Zustellung
//! Die Zustellschleife prueft in einem festen kurzen Intervall auf neue
//! Events und stellt sie strikt in FIFO-Reihenfolge zu; nach jedem Event
//! wartet ein Taktgatter dessen `verzoegerung_ms` ab, ohne die
//! Empfangsschleife zu blockieren.

use echocast_core::{ClientId, ClientKind};
use echocast_protocol::wire::{self, Envelope, InboundAction, PING_PAYLOAD};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};

use crate::registry::SitzungsInfo;
use crate::state::SessionState;

/// Abstand der Zustell-Pruefungen
const POLL_INTERVALL: Duration = Duration::from_millis(100);

/// Groesse der Socket-Kanaele pro Verbindung
const KANAL_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// Transport-Kanaele
// ---------------------------------------------------------------------------

/// Befehl an die Transportschicht
#[derive(Debug, Clone, PartialEq)]
pub enum SocketBefehl {
    /// Textframe senden
    Text(String),
    /// Verbindung mit Statuscode schliessen
    Schliessen { code: u16, grund: String },
}

/// Kanalpaar zwischen Session und Transportschicht
pub struct SessionKanaele {
    /// Eingehende Textframes (None = Transport geschlossen)
    pub eingang: mpsc::Receiver<String>,
    /// Ausgangsbefehle an den Socket
    pub ausgang: mpsc::Sender<SocketBefehl>,
}

impl SessionKanaele {
    /// Erstellt das Kanalpaar und gibt die Gegenstuecke der Transportschicht zurueck
    pub fn paar() -> (Self, mpsc::Sender<String>, mpsc::Receiver<SocketBefehl>) {
        let (eingang_tx, eingang_rx) = mpsc::channel(KANAL_GROESSE);
        let (ausgang_tx, ausgang_rx) = mpsc::channel(KANAL_GROESSE);
        (
            Self {
                eingang: eingang_rx,
                ausgang: ausgang_tx,
            },
            eingang_tx,
            ausgang_rx,
        )
    }
}

// ---------------------------------------------------------------------------
// Zustand und Bericht
// ---------------------------------------------------------------------------

/// Zustand der Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbindungsZustand {
    /// Verbunden, Handshake steht aus
    Verbindet,
    /// Handshake abgeschlossen, Events werden zugestellt
    Aktiv,
    /// Trennung laeuft (Close-Aktion, Sendefehler oder Shutdown)
    Schliessend,
    /// Transport hat die Verbindung geschlossen
    Geschlossen,
}

/// Abschlussbericht einer beendeten Session
#[derive(Debug, Clone)]
pub struct Trennungsbericht {
    pub client_id: ClientId,
    pub name: String,
    pub typ: ClientKind,
    pub herzschlaege: u64,
    pub sauber_getrennt: bool,
    pub zustand: VerbindungsZustand,
}

/// Steuerung der Verarbeitungsschleife
enum Weiter {
    Fortfahren,
    Beenden,
}

// ---------------------------------------------------------------------------
// ClientSession
// ---------------------------------------------------------------------------

/// Verarbeitet eine einzelne Client-Verbindung
///
/// Besitzt den Verbindungs-Datensatz; das Register haelt nur ein Handle
/// fuer externe Nachschlaege.
pub struct ClientSession {
    state: Arc<SessionState>,
    client_id: ClientId,
    zustand: VerbindungsZustand,
    name: String,
    typ: ClientKind,
    herzschlaege: u64,
    live_anzeige_sichtbar: bool,
    sauber_getrennt: bool,
    cursor: u64,
}

impl ClientSession {
    /// Erstellt eine neue Session; der Cursor beginnt am aktuellen Log-Ende
    pub fn neu(client_id: ClientId, state: Arc<SessionState>) -> Self {
        let cursor = state.ereignisse.ende();
        Self {
            state,
            client_id,
            zustand: VerbindungsZustand::Verbindet,
            name: format!("Client {}", client_id.inner()),
            typ: ClientKind::Unknown,
            herzschlaege: 0,
            live_anzeige_sichtbar: false,
            sauber_getrennt: false,
            cursor,
        }
    }

    /// Startet die Verarbeitungsschleife und laeuft bis zum Verbindungsende
    pub async fn verarbeiten(
        mut self,
        mut kanaele: SessionKanaele,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Trennungsbericht {
        tracing::info!(client = %self.client_id, "Neue Verbindung");
        self.state.register.anmelden(SitzungsInfo {
            client_id: self.client_id,
            name: self.name.clone(),
            typ: self.typ,
        });

        // Handshake: initialer Ping
        if kanaele
            .ausgang
            .send(SocketBefehl::Text(PING_PAYLOAD.to_string()))
            .await
            .is_err()
        {
            tracing::debug!(client = %self.client_id, "Transport vor dem Handshake geschlossen");
            self.zustand = VerbindungsZustand::Geschlossen;
            return self.abschliessen();
        }
        self.zustand = VerbindungsZustand::Aktiv;

        // Taktgatter der Zustellung
        let mut naechste_sendung = Instant::now();

        loop {
            let schlaf = self.zustell_wartezeit(naechste_sendung);

            tokio::select! {
                // Eingehender Textframe vom Client
                nachricht = kanaele.eingang.recv() => {
                    match nachricht {
                        Some(text) => {
                            if let Weiter::Beenden =
                                self.nachricht_verarbeiten(&text, &kanaele.ausgang).await
                            {
                                break;
                            }
                        }
                        None => {
                            tracing::info!(client = %self.client_id, "Verbindung vom Client getrennt");
                            self.zustand = VerbindungsZustand::Geschlossen;
                            break;
                        }
                    }
                }

                // Zustell-Takt
                _ = tokio::time::sleep(schlaf) => {
                    if let Weiter::Beenden =
                        self.event_zustellen(&mut naechste_sendung, &kanaele.ausgang).await
                    {
                        break;
                    }
                }

                // Operator-Shutdown
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!(client = %self.client_id, "Shutdown-Signal – Verbindung wird getrennt");
                        let _ = kanaele
                            .ausgang
                            .send(SocketBefehl::Schliessen {
                                code: 1001,
                                grund: "Server shutting down".into(),
                            })
                            .await;
                        self.zustand = VerbindungsZustand::Schliessend;
                        break;
                    }
                }
            }
        }

        self.abschliessen()
    }

    /// Wartezeit bis zur naechsten Zustell-Pruefung
    ///
    /// Faellige Events sofort, getaktete Events zum Gatter-Zeitpunkt,
    /// sonst das Poll-Intervall.
    fn zustell_wartezeit(&self, naechste_sendung: Instant) -> Duration {
        if self.state.ereignisse.naechstes(self.cursor).is_some() {
            naechste_sendung.saturating_duration_since(Instant::now())
        } else {
            POLL_INTERVALL
        }
    }

    /// Stellt hoechstens ein faelliges Event zu und setzt das Taktgatter neu
    async fn event_zustellen(
        &mut self,
        naechste_sendung: &mut Instant,
        ausgang: &mpsc::Sender<SocketBefehl>,
    ) -> Weiter {
        if self.zustand != VerbindungsZustand::Aktiv {
            return Weiter::Beenden;
        }
        let jetzt = Instant::now();
        if jetzt < *naechste_sendung {
            return Weiter::Fortfahren;
        }
        let Some((event, neuer_cursor)) = self.state.ereignisse.naechstes(self.cursor) else {
            return Weiter::Fortfahren;
        };

        match &event.label {
            Some(label) => {
                tracing::info!(client = %self.client_id, label = %label, "Event wird ausgefuehrt")
            }
            None => tracing::info!(client = %self.client_id, "Benutzerdefinierter Payload wird ausgefuehrt"),
        }
        if let Some(beschreibung) = &event.beschreibung {
            tracing::info!(client = %self.client_id, "{beschreibung}");
        }

        if ausgang
            .send(SocketBefehl::Text(event.payload.clone()))
            .await
            .is_err()
        {
            // Gegenstelle hat geschlossen: erwartet, kein Fehler
            tracing::info!(client = %self.client_id, "Senden nicht moeglich – Verbindung bereits geschlossen");
            self.zustand = VerbindungsZustand::Schliessend;
            return Weiter::Beenden;
        }

        self.cursor = neuer_cursor;
        *naechste_sendung = jetzt + Duration::from_millis(event.verzoegerung_ms.unwrap_or(0));
        Weiter::Fortfahren
    }

    /// Klassifiziert und verarbeitet einen eingehenden Textframe
    async fn nachricht_verarbeiten(
        &mut self,
        text: &str,
        ausgang: &mpsc::Sender<SocketBefehl>,
    ) -> Weiter {
        let envelope = match Envelope::aus_json(text) {
            Ok(envelope) => envelope,
            Err(_) => {
                tracing::warn!(client = %self.client_id, roh = %text, "Nicht parsebare Nachricht verworfen");
                return Weiter::Fortfahren;
            }
        };

        match InboundAction::aus_action(&envelope.action) {
            InboundAction::Hello => self.hello_verarbeiten(&envelope),
            InboundAction::Close => {
                tracing::info!(client = %self.client_id, "Client bittet um Trennung");
                self.sauber_getrennt = true;
                let _ = ausgang
                    .send(SocketBefehl::Schliessen {
                        code: 1000,
                        grund: "Client requested shutdown".into(),
                    })
                    .await;
                self.zustand = VerbindungsZustand::Schliessend;
                return Weiter::Beenden;
            }
            InboundAction::PageHidden => {
                tracing::info!(client = %self.client_id, "Seite wurde verborgen");
            }
            InboundAction::PageVisible => {
                tracing::info!(client = %self.client_id, "Seite wieder sichtbar");
            }
            InboundAction::EchoPrinting => self.echo_printing_verarbeiten(&envelope.data),
            InboundAction::EchoStateUpdate => self.state_update_verarbeiten(&envelope.data),
            InboundAction::Error => {
                let name = envelope
                    .data
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                tracing::error!(client = %self.client_id, fehler = %name, details = %envelope.data, "Client meldet Fehler");
            }
            InboundAction::WebsocketHeartbeat => {
                // Zaehlen, keine Antwort
                self.herzschlaege += 1;
            }
            InboundAction::LiveDisplayUpdate => {
                let sichtbar = envelope
                    .data
                    .get("display")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let unveraendert = sichtbar == self.live_anzeige_sichtbar;
                self.live_anzeige_sichtbar = sichtbar;
                tracing::info!(
                    client = %self.client_id,
                    sichtbar,
                    unveraendert,
                    "Live-Anzeige aktualisiert"
                );
            }
            InboundAction::Unbekannt => self.unbekannte_aktion_verarbeiten(&envelope, text),
        }

        Weiter::Fortfahren
    }

    /// Verarbeitet die Hello-Anmeldung des Clients
    fn hello_verarbeiten(&mut self, envelope: &Envelope) {
        if let Some(origin) = &envelope.from {
            if let Some(label) = origin.label() {
                self.name = label.to_string();
            }
            if let Some(typ) = origin.typ.as_deref() {
                self.typ = ClientKind::aus_str(typ);
            }
        }
        self.state
            .register
            .aktualisieren(&self.client_id, Some(&self.name), self.typ);

        let verborgen = envelope.data.get("hidden").and_then(Value::as_bool);
        let gezielt = envelope
            .data
            .get("targeted")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        tracing::info!(
            client = %self.client_id,
            name = %self.name,
            typ = %self.typ,
            verborgen = ?verborgen,
            gezielt,
            "Client angemeldet"
        );
    }

    /// Druckfortschritts-Meldung des Clients
    fn echo_printing_verarbeiten(&self, data: &Value) {
        let benutzername = data.get("username").and_then(Value::as_str).unwrap_or("?");
        let inhalt = data.get("message").and_then(Value::as_str).unwrap_or("");
        // Clientseitiges "undefined" ist Rauschen
        if inhalt == "undefined" {
            return;
        }
        let inhalt = if inhalt.is_empty() { "(leer)" } else { inhalt };
        tracing::info!(client = %self.client_id, benutzername = %benutzername, inhalt = %inhalt, "Client druckt");
    }

    /// Statusmeldung des Abspiel-Automaten
    fn state_update_verarbeiten(&self, data: &Value) {
        let status = data.get("state").and_then(Value::as_str).unwrap_or("unknown");
        let verbleibend = data.get("messagesCount").and_then(Value::as_u64);
        // Leerlauf-Meldungen nicht protokollieren
        if status == "ready" && verbleibend.unwrap_or(0) == 0 {
            return;
        }
        tracing::info!(
            client = %self.client_id,
            status = %status,
            verbleibend = ?verbleibend,
            "Statusmeldung"
        );
    }

    /// Unbekannte Aktionen: Relay fuer Steuerungs-Clients, sonst Protokoll-Log
    fn unbekannte_aktion_verarbeiten(&self, envelope: &Envelope, roh: &str) {
        let vom_server = envelope
            .from
            .as_ref()
            .and_then(|origin| origin.typ.as_deref())
            == Some("server");

        if vom_server {
            if envelope.action == wire::AKTION_PING {
                return;
            }
            if let Some(beschreibung) = wire::relay_beschreibung(&envelope.action) {
                let absender = envelope
                    .from
                    .as_ref()
                    .and_then(|origin| origin.label())
                    .unwrap_or(&self.name);
                tracing::info!(client = %self.client_id, absender = %absender, "{beschreibung}");
                self.state.ereignis_einreihen(
                    roh,
                    None,
                    Some(envelope.action.clone()),
                    Some(format!("Aus dem WebUI: {beschreibung}")),
                );
                return;
            }
        }

        tracing::warn!(
            client = %self.client_id,
            aktion = %envelope.action,
            "Unbekannte Aktion empfangen"
        );
    }

    /// Trennungs-Buchfuehrung: Register bereinigen, Bericht erstellen
    fn abschliessen(mut self) -> Trennungsbericht {
        if self.zustand == VerbindungsZustand::Schliessend {
            self.zustand = VerbindungsZustand::Geschlossen;
        }
        self.state.register.abmelden(&self.client_id);

        tracing::info!(
            client = %self.client_id,
            name = %self.name,
            typ = %self.typ,
            herzschlaege = self.herzschlaege,
            "Verbindung beendet"
        );
        if !self.sauber_getrennt {
            tracing::warn!(
                client = %self.client_id,
                "Kein Abmelde-Request erhalten – unsaubere Trennung"
            );
        }

        Trennungsbericht {
            client_id: self.client_id,
            name: self.name,
            typ: self.typ,
            herzschlaege: self.herzschlaege,
            sauber_getrennt: self.sauber_getrennt,
            zustand: self.zustand,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const TEST_TIMEOUT: Duration = Duration::from_secs(2);

    struct TestAufbau {
        state: Arc<SessionState>,
        eingang_tx: mpsc::Sender<String>,
        ausgang_rx: mpsc::Receiver<SocketBefehl>,
        _shutdown_tx: watch::Sender<bool>,
        session: tokio::task::JoinHandle<Trennungsbericht>,
    }

    fn starten() -> TestAufbau {
        let state = SessionState::neu(64);
        let (kanaele, eingang_tx, ausgang_rx) = SessionKanaele::paar();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let session = tokio::spawn(
            ClientSession::neu(ClientId::naechste(), Arc::clone(&state))
                .verarbeiten(kanaele, shutdown_rx),
        );
        TestAufbau {
            state,
            eingang_tx,
            ausgang_rx,
            _shutdown_tx: shutdown_tx,
            session,
        }
    }

    async fn naechster_befehl(rx: &mut mpsc::Receiver<SocketBefehl>) -> SocketBefehl {
        timeout(TEST_TIMEOUT, rx.recv())
            .await
            .expect("Timeout beim Warten auf Socket-Befehl")
            .expect("Befehls-Kanal geschlossen")
    }

    #[tokio::test]
    async fn handshake_ping_kommt_zuerst() {
        let mut aufbau = starten();
        let befehl = naechster_befehl(&mut aufbau.ausgang_rx).await;
        assert_eq!(befehl, SocketBefehl::Text(PING_PAYLOAD.to_string()));
    }

    #[tokio::test]
    async fn close_aktion_trennt_sauber() {
        let mut aufbau = starten();
        naechster_befehl(&mut aufbau.ausgang_rx).await; // Ping

        aufbau
            .eingang_tx
            .send(r#"{"action":"close","data":{}}"#.into())
            .await
            .unwrap();

        let befehl = naechster_befehl(&mut aufbau.ausgang_rx).await;
        assert!(matches!(befehl, SocketBefehl::Schliessen { code: 1000, .. }));

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert!(bericht.sauber_getrennt);
        assert_eq!(bericht.zustand, VerbindungsZustand::Geschlossen);
    }

    #[tokio::test]
    async fn herzschlaege_werden_gezaehlt() {
        let aufbau = starten();
        for _ in 0..3 {
            aufbau
                .eingang_tx
                .send(r#"{"action":"websocket_heartbeat","data":{}}"#.into())
                .await
                .unwrap();
        }
        drop(aufbau.eingang_tx); // Transport geschlossen

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert_eq!(bericht.herzschlaege, 3);
        assert_eq!(bericht.zustand, VerbindungsZustand::Geschlossen);
        assert!(!bericht.sauber_getrennt);
    }

    #[tokio::test]
    async fn events_kommen_in_fifo_reihenfolge() {
        let mut aufbau = starten();
        naechster_befehl(&mut aufbau.ausgang_rx).await; // Ping

        aufbau
            .state
            .ereignis_einreihen(r#"{"action":"a","data":{}}"#, None, None, None);
        aufbau
            .state
            .ereignis_einreihen(r#"{"action":"b","data":{}}"#, None, None, None);

        let erster = naechster_befehl(&mut aufbau.ausgang_rx).await;
        let zweiter = naechster_befehl(&mut aufbau.ausgang_rx).await;
        assert_eq!(erster, SocketBefehl::Text(r#"{"action":"a","data":{}}"#.into()));
        assert_eq!(zweiter, SocketBefehl::Text(r#"{"action":"b","data":{}}"#.into()));
    }

    #[tokio::test]
    async fn aeltere_events_werden_uebersprungen() {
        let state = SessionState::neu(64);
        state.ereignis_einreihen(r#"{"action":"alt","data":{}}"#, None, None, None);

        let (kanaele, _eingang_tx, mut ausgang_rx) = SessionKanaele::paar();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let _session = tokio::spawn(
            ClientSession::neu(ClientId::naechste(), Arc::clone(&state))
                .verarbeiten(kanaele, shutdown_rx),
        );

        naechster_befehl(&mut ausgang_rx).await; // Ping
        state.ereignis_einreihen(r#"{"action":"neu","data":{}}"#, None, None, None);

        let befehl = naechster_befehl(&mut ausgang_rx).await;
        assert_eq!(befehl, SocketBefehl::Text(r#"{"action":"neu","data":{}}"#.into()));
    }

    #[tokio::test]
    async fn sendefehler_beendet_ohne_panik() {
        let mut aufbau = starten();
        naechster_befehl(&mut aufbau.ausgang_rx).await; // Ping
        drop(aufbau.ausgang_rx); // Gegenstelle weg

        aufbau
            .state
            .ereignis_einreihen(r#"{"action":"x","data":{}}"#, None, None, None);

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert_eq!(bericht.zustand, VerbindungsZustand::Geschlossen);
    }

    #[tokio::test]
    async fn shutdown_signal_schliesst_mit_1001() {
        let mut aufbau = starten();
        naechster_befehl(&mut aufbau.ausgang_rx).await; // Ping

        aufbau._shutdown_tx.send(true).unwrap();

        let befehl = naechster_befehl(&mut aufbau.ausgang_rx).await;
        assert!(matches!(befehl, SocketBefehl::Schliessen { code: 1001, .. }));

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert!(!bericht.sauber_getrennt);
    }

    #[tokio::test]
    async fn kaputtes_json_wird_toleriert() {
        let aufbau = starten();
        aufbau.eingang_tx.send("kein json".into()).await.unwrap();
        aufbau
            .eingang_tx
            .send(r#"{"action":"websocket_heartbeat","data":{}}"#.into())
            .await
            .unwrap();
        drop(aufbau.eingang_tx);

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert_eq!(bericht.herzschlaege, 1);
    }

    #[tokio::test]
    async fn hello_setzt_name_und_typ() {
        let aufbau = starten();
        aufbau
            .eingang_tx
            .send(
                r#"{"action":"hello","data":{"hidden":false},"from":{"type":"live","uuid":"u-1","name":"Dialog"}}"#
                    .into(),
            )
            .await
            .unwrap();
        drop(aufbau.eingang_tx);

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert_eq!(bericht.name, "Dialog");
        assert_eq!(bericht.typ, ClientKind::Live);
    }

    #[tokio::test]
    async fn server_relay_wird_eingereiht() {
        let aufbau = starten();
        let relay = r#"{"action":"set_theme","data":{"name":"dunkel"},"from":{"type":"server","uuid":"e-1"}}"#;
        aufbau.eingang_tx.send(relay.into()).await.unwrap();

        // Einreihung abwarten, dann beenden
        timeout(TEST_TIMEOUT, async {
            while aufbau.state.ereignisse.laenge() == 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Relay-Event wurde nicht eingereiht");

        let (event, _) = aufbau.state.ereignisse.naechstes(0).unwrap();
        assert_eq!(event.payload, relay);
        assert_eq!(event.label.as_deref(), Some("set_theme"));
        drop(aufbau.eingang_tx);
        let _ = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap();
    }

    #[tokio::test]
    async fn unbekannte_aktion_wird_toleriert() {
        let aufbau = starten();
        aufbau
            .eingang_tx
            .send(r#"{"action":"voellig_neu","data":{}}"#.into())
            .await
            .unwrap();
        drop(aufbau.eingang_tx);

        let bericht = timeout(TEST_TIMEOUT, aufbau.session).await.unwrap().unwrap();
        assert_eq!(bericht.zustand, VerbindungsZustand::Geschlossen);
        // Nichts eingereiht: kein Relay ohne Server-Ursprung
        assert_eq!(aufbau.state.ereignisse.laenge(), 0);
    }

    #[tokio::test]
    async fn getaktete_events_halten_reihenfolge() {
        let mut aufbau = starten();
        naechster_befehl(&mut aufbau.ausgang_rx).await; // Ping

        aufbau
            .state
            .ereignis_einreihen(r#"{"action":"a","data":{}}"#, Some(50), None, None);
        aufbau
            .state
            .ereignis_einreihen(r#"{"action":"b","data":{}}"#, None, None, None);

        let start = std::time::Instant::now();
        let erster = naechster_befehl(&mut aufbau.ausgang_rx).await;
        let zweiter = naechster_befehl(&mut aufbau.ausgang_rx).await;
        assert_eq!(erster, SocketBefehl::Text(r#"{"action":"a","data":{}}"#.into()));
        assert_eq!(zweiter, SocketBefehl::Text(r#"{"action":"b","data":{}}"#.into()));
        // Das zweite Event wartet die Verzoegerung des ersten ab
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
