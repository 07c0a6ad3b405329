//! echocast-webui – HTTP/WebSocket-Oberflaeche
//!
//! Bedient drei Arten von Verkehr auf einem Port:
//! - `GET /` mit Upgrade: Anzeige-Clients (laufen als `ClientSession`)
//! - `GET {ws_pfad}[/kanal]`: WebUI-Kanaele mit Broadcast-Fan-out
//! - `POST {save_endpoint}` + statische Dateien: WebUI-Editor
//!
//! Der `KanalHub` gruppiert WebUI-Verbindungen in benannte Kanaele;
//! `"global"` ist reserviert und erreicht alle Kanaele.

pub mod hub;
pub mod routes;
pub mod save;

// Re-Exporte fuer bequemen Zugriff
pub use hub::{HubBefehl, KanalHub, KANAL_GLOBAL};
pub use routes::{WebUiKonfig, WebUiServer};
