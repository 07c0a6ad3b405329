//! Router und WebSocket-Handler der HTTP-Oberflaeche
//!
//! `GET /` bedient Anzeige-Clients (WebSocket-Upgrade) oder liefert den
//! WebUI-Editor aus. Die Kanal-Routen (`{ws_pfad}` und `{ws_pfad}/*`)
//! verbinden WebUI-Clients mit dem `KanalHub`; statische Dateien kommen als
//! Fallback aus dem WebUI-Wurzelverzeichnis.

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower_http::services::ServeDir;

use echocast_core::{ClientId, Result};
use echocast_session::{ClientSession, SessionKanaele, SessionState, SocketBefehl};

use crate::hub::{HubBefehl, KanalHub, KANAL_GLOBAL};
use crate::save;

/// Abstand der Keepalive-Pings an Kanal-Mitglieder
const PING_INTERVALL: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Konfiguration der WebUI-Oberflaeche
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebUiKonfig {
    /// Aktiviert Editor, Kanaele und statische Dateien
    pub aktiviert: bool,
    /// Wurzelverzeichnis der statischen WebUI-Dateien
    pub root: String,
    /// Pfad des Speicher-Endpunkts
    pub save_endpoint: String,
    /// Pfad-Praefix der Kanal-WebSockets
    pub websocket_pfad: String,
}

impl Default for WebUiKonfig {
    fn default() -> Self {
        Self {
            aktiviert: false,
            root: "echoliveui".into(),
            save_endpoint: "/api/save".into(),
            websocket_pfad: "/ws".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// WebUiServer
// ---------------------------------------------------------------------------

/// Geteilter Zustand aller HTTP-Handler
#[derive(Clone)]
pub(crate) struct AppZustand {
    pub(crate) session_state: Arc<SessionState>,
    pub(crate) hub: KanalHub,
    pub(crate) konfig: Arc<WebUiKonfig>,
    pub(crate) shutdown_rx: watch::Receiver<bool>,
}

/// HTTP/WebSocket-Server fuer Anzeige-Clients und WebUI
pub struct WebUiServer {
    konfig: Arc<WebUiKonfig>,
    session_state: Arc<SessionState>,
    hub: KanalHub,
    shutdown_rx: watch::Receiver<bool>,
}

impl WebUiServer {
    /// Erstellt einen neuen WebUiServer
    pub fn neu(
        konfig: WebUiKonfig,
        session_state: Arc<SessionState>,
        hub: KanalHub,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            konfig: Arc::new(konfig),
            session_state,
            hub,
            shutdown_rx,
        }
    }

    /// Baut den Router gemaess Konfiguration
    ///
    /// Ohne aktiviertes WebUI existiert nur der Anzeige-Client-Endpunkt.
    pub fn router(&self) -> Router {
        let app = AppZustand {
            session_state: Arc::clone(&self.session_state),
            hub: self.hub.clone(),
            konfig: Arc::clone(&self.konfig),
            shutdown_rx: self.shutdown_rx.clone(),
        };

        let mut router = Router::new().route("/", get(wurzel_handler));
        if self.konfig.aktiviert {
            router = router
                .route(&self.konfig.save_endpoint, post(save::speichern_handler))
                .route(&self.konfig.websocket_pfad, get(kanal_wurzel_handler))
                .route(
                    &format!("{}/*tail", self.konfig.websocket_pfad),
                    get(kanal_handler),
                )
                .fallback_service(ServeDir::new(&self.konfig.root));
        }
        router.with_state(app)
    }

    /// Bindet die Adresse und bedient Verbindungen bis zum Shutdown-Signal
    pub async fn starten(self, adresse: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(adresse).await?;
        tracing::info!(
            adresse = %listener.local_addr()?,
            webui = self.konfig.aktiviert,
            "HTTP/WebSocket-Server gestartet"
        );

        let mut shutdown_rx = self.shutdown_rx.clone();
        let router = self.router();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        tracing::info!("HTTP/WebSocket-Server gestoppt");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Anzeige-Clients (GET /)
// ---------------------------------------------------------------------------

/// Upgrade zu einer Anzeige-Client-Session oder Auslieferung des Editors
async fn wurzel_handler(
    State(app): State<AppZustand>,
    ws: Option<WebSocketUpgrade>,
) -> Response {
    if let Some(ws) = ws {
        let state = Arc::clone(&app.session_state);
        let shutdown_rx = app.shutdown_rx.clone();
        return ws.on_upgrade(move |socket| klient_verbindung(socket, state, shutdown_rx));
    }

    if !app.konfig.aktiviert {
        return (StatusCode::NOT_FOUND, "WebUI not found").into_response();
    }
    editor_ausliefern(&app.konfig).await
}

/// Liefert die Editor-Seite aus dem WebUI-Wurzelverzeichnis
async fn editor_ausliefern(konfig: &WebUiKonfig) -> Response {
    let pfad = std::path::Path::new(&konfig.root).join("editor.html");
    match tokio::fs::read(&pfad).await {
        Ok(inhalt) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            inhalt,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "WebUI not found").into_response(),
    }
}

/// Brueckt einen WebSocket auf die Kanalpaare einer `ClientSession`
///
/// Zwei Pump-Tasks uebersetzen zwischen Socket-Frames und Session-Kanaelen;
/// die Session selbst bleibt frei von Socket-Details.
async fn klient_verbindung(
    socket: WebSocket,
    state: Arc<SessionState>,
    shutdown_rx: watch::Receiver<bool>,
) {
    let (kanaele, eingang_tx, mut ausgang_rx) = SessionKanaele::paar();
    let (mut sink, mut strom) = socket.split();

    // Socket -> Session
    let lese_task = tokio::spawn(async move {
        while let Some(nachricht) = strom.next().await {
            match nachricht {
                Ok(Message::Text(text)) => {
                    if eingang_tx.send(text).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {} // Ping/Pong/Binary transparent ueberspringen
            }
        }
    });

    // Session -> Socket
    let schreib_task = tokio::spawn(async move {
        while let Some(befehl) = ausgang_rx.recv().await {
            match befehl {
                SocketBefehl::Text(text) => {
                    if sink.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                SocketBefehl::Schliessen { code, grund } => {
                    let _ = sink
                        .send(Message::Close(Some(CloseFrame {
                            code,
                            reason: grund.into(),
                        })))
                        .await;
                    break;
                }
            }
        }
    });

    let client_id = ClientId::naechste();
    let _bericht = ClientSession::neu(client_id, state)
        .verarbeiten(kanaele, shutdown_rx)
        .await;

    lese_task.abort();
    schreib_task.abort();
}

// ---------------------------------------------------------------------------
// Kanal-WebSockets
// ---------------------------------------------------------------------------

/// Kanal-WebSocket ohne Pfadrest: globaler Kanal
async fn kanal_wurzel_handler(State(app): State<AppZustand>, ws: WebSocketUpgrade) -> Response {
    let hub = app.hub.clone();
    ws.on_upgrade(move |socket| kanal_verbindung(socket, KANAL_GLOBAL.to_string(), hub))
}

/// Kanal-WebSocket mit Pfadrest: erste Komponente benennt den Kanal
async fn kanal_handler(
    State(app): State<AppZustand>,
    Path(tail): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    let kanal = kanal_name(&tail);
    let hub = app.hub.clone();
    ws.on_upgrade(move |socket| kanal_verbindung(socket, kanal, hub))
}

/// Extrahiert den Kanalnamen aus dem Pfadrest
fn kanal_name(tail: &str) -> String {
    let normalisiert = tail.trim_matches('/');
    let erster = normalisiert.split('/').next().unwrap_or("");
    if erster.is_empty() {
        KANAL_GLOBAL.to_string()
    } else {
        erster.to_string()
    }
}

/// Treibt eine Kanal-Mitgliedschaft bis zum Verbindungsende
async fn kanal_verbindung(socket: WebSocket, kanal: String, hub: KanalHub) {
    let client_id = ClientId::naechste();
    let mut hub_rx = hub.beitreten(client_id, &kanal);
    let (mut sink, mut strom) = socket.split();

    let mut ping = tokio::time::interval_at(
        tokio::time::Instant::now() + PING_INTERVALL,
        PING_INTERVALL,
    );

    loop {
        tokio::select! {
            // Eingehende Kanal-Nachricht
            nachricht = strom.next() => {
                match nachricht {
                    Some(Ok(Message::Text(text))) => {
                        kanal_nachricht_verarbeiten(&text, client_id, &kanal, &hub);
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // Ping/Pong/Binary
                    Some(Err(e)) => {
                        tracing::warn!(client = %client_id, kanal = %kanal, fehler = %e, "WebSocket-Fehler");
                        break;
                    }
                }
            }

            // Fan-out-Zustellung vom Hub
            befehl = hub_rx.recv() => {
                match befehl {
                    Some(HubBefehl::Text(text)) => {
                        if sink.send(Message::Text(text)).await.is_err() {
                            tracing::warn!(client = %client_id, kanal = %kanal, "Zustellung an Mitglied fehlgeschlagen");
                            break;
                        }
                    }
                    Some(HubBefehl::Schliessen { code, grund }) => {
                        let _ = sink
                            .send(Message::Close(Some(CloseFrame { code, reason: grund.into() })))
                            .await;
                        break;
                    }
                    None => break,
                }
            }

            // Keepalive-Ping; Fehler fuehren nicht zum Rauswurf
            _ = ping.tick() => {
                if let Err(e) = sink.send(Message::Ping(Vec::new())).await {
                    tracing::warn!(client = %client_id, kanal = %kanal, fehler = %e, "Keepalive-Ping fehlgeschlagen");
                }
            }
        }
    }

    hub.verlassen(&client_id);
    tracing::info!(client = %client_id, kanal = %kanal, "Kanal-Verbindung getrennt");
}

/// Prueft, protokolliert und verteilt eine eingehende Kanal-Nachricht
fn kanal_nachricht_verarbeiten(text: &str, client_id: ClientId, kanal: &str, hub: &KanalHub) {
    let wert: Value = match serde_json::from_str(text) {
        Ok(wert) => wert,
        Err(_) => {
            tracing::warn!(client = %client_id, kanal = %kanal, "Nicht parsebare Kanal-Nachricht verworfen");
            return;
        }
    };
    let Some(objekt) = wert.as_object() else {
        tracing::warn!(client = %client_id, kanal = %kanal, "Kanal-Nachricht ist kein Objekt");
        return;
    };
    if !objekt.contains_key("from") || !objekt.contains_key("data") {
        tracing::warn!(client = %client_id, kanal = %kanal, "Kanal-Nachricht ohne from/data verworfen");
        return;
    }

    kanal_kontrolle_protokollieren(objekt, kanal);

    // Roh weiterreichen: kein Umkodieren zwischen Mitgliedern
    hub.rundsenden(kanal, &client_id, text);
}

/// Protokolliert Kontroll-Nachrichten (Join/Leave der Client-Arten)
fn kanal_kontrolle_protokollieren(objekt: &serde_json::Map<String, Value>, kanal: &str) {
    let aktion = objekt.get("action").and_then(Value::as_str).unwrap_or("");
    if aktion == "websocket_heartbeat" {
        return;
    }
    // Gezielte Nachrichten werden nur weitergereicht, nicht protokolliert
    if objekt.get("target").is_some_and(|t| !t.is_null()) {
        return;
    }

    let absender = objekt.get("from").and_then(Value::as_object);
    let typ = absender
        .and_then(|f| f.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let uuid = absender
        .and_then(|f| f.get("uuid"))
        .and_then(Value::as_str)
        .unwrap_or("-");

    match (typ, aktion) {
        ("live", "hello") => {
            tracing::info!(kanal = %kanal, uuid = %uuid, "Dialog beigetreten");
        }
        ("live", "close") => {
            tracing::info!(kanal = %kanal, uuid = %uuid, "Dialog verlassen");
        }
        ("history", "hello") => {
            tracing::info!(kanal = %kanal, uuid = %uuid, "Verlaufs-Browser beigetreten");
        }
        ("history", "close") => {
            tracing::info!(kanal = %kanal, uuid = %uuid, "Verlaufs-Browser verlassen");
        }
        ("server", "ping") => {
            tracing::info!(kanal = %kanal, uuid = %uuid, "Editor beigetreten");
        }
        ("", _) => {
            tracing::warn!(kanal = %kanal, aktion = %aktion, "Kanal-Nachricht ohne Absender-Typ");
        }
        _ => {
            tracing::debug!(kanal = %kanal, typ = %typ, aktion = %aktion, "Kanal-Nachricht");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
