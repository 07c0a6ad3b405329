//! Wire-Umschlag und Aktions-Klassifikation
//!
//! Alle Nachrichten zwischen Server und Clients reisen als JSON-Umschlag
//! `{action, data, from?}`. Das `data`-Feld bleibt bewusst lose typisiert
//! (`serde_json::Value`) – die Clients erweitern ihre Payloads unabhaengig
//! vom Server, und unbekannte Felder duerfen niemals zum Verbindungsabbruch
//! fuehren.

use echocast_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::segment::Segment;

// ---------------------------------------------------------------------------
// Aktions-Konstanten
// ---------------------------------------------------------------------------

/// Aktion des Keepalive-/Handshake-Pings
pub const AKTION_PING: &str = "ping";
/// Fertig serialisierter Handshake-Ping (wird bei jedem Verbindungsaufbau gesendet)
pub const PING_PAYLOAD: &str = r#"{"action":"ping","data":{}}"#;
/// Aktion der gerenderten Text-Nachricht
pub const AKTION_MESSAGE_DATA: &str = "message_data";
/// Aktion zum Ueberspringen der aktuellen Nachricht
pub const AKTION_ECHO_NEXT: &str = "echo_next";

// ---------------------------------------------------------------------------
// Umschlag
// ---------------------------------------------------------------------------

/// Absender-Information eines Umschlags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Client-Typ ("live", "history", "server")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Vom Client selbst vergebene UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Anzeigename des Clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Origin {
    /// Bestmoegliches Anzeige-Label: Name, sonst UUID
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.uuid.as_deref().filter(|u| !u.is_empty()))
    }
}

/// Wire-Umschlag fuer alle Nachrichten (bidirektional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Aktionsname
    pub action: String,
    /// Aktionsspezifische Nutzdaten
    #[serde(default)]
    pub data: Value,
    /// Absender (nur bei Client- und Relay-Nachrichten vorhanden)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Origin>,
}

impl Envelope {
    /// Erstellt einen neuen Umschlag
    pub fn neu(action: impl Into<String>, data: Value) -> Self {
        Self {
            action: action.into(),
            data,
            from: None,
        }
    }

    /// Erstellt den Handshake-/Keepalive-Ping
    pub fn ping() -> Self {
        Self::neu(AKTION_PING, serde_json::json!({}))
    }

    /// Serialisiert den Umschlag als JSON (UTF-8 bleibt erhalten)
    pub fn zu_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialisiert einen Umschlag aus JSON
    pub fn aus_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// Gerenderte Text-Nachricht (message_data)
// ---------------------------------------------------------------------------

/// Ein Nachrichtenblock: die geordnete Segmentfolge einer Nachricht
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBlock {
    pub message: Vec<Segment>,
}

/// Nutzdaten der `message_data`-Aktion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    pub username: String,
    pub messages: Vec<MessageBlock>,
}

impl MessageData {
    /// Baut die Nutzdaten fuer eine einzelne Nachricht
    pub fn einzeln(username: impl Into<String>, segmente: Vec<Segment>) -> Self {
        Self {
            username: username.into(),
            messages: vec![MessageBlock { message: segmente }],
        }
    }

    /// Verpackt die Nutzdaten in einen Umschlag
    pub fn als_envelope(&self) -> Result<Envelope> {
        Ok(Envelope::neu(AKTION_MESSAGE_DATA, serde_json::to_value(self)?))
    }
}

// ---------------------------------------------------------------------------
// Eingehende Aktionen
// ---------------------------------------------------------------------------

/// Klassifikation der vom Server verstandenen Client-Aktionen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundAction {
    /// Client meldet sich an
    Hello,
    /// Client bittet um saubere Trennung
    Close,
    /// Seite wurde verborgen
    PageHidden,
    /// Seite ist wieder sichtbar
    PageVisible,
    /// Client druckt gerade eine Nachricht
    EchoPrinting,
    /// Statusmeldung des Abspiel-Automaten
    EchoStateUpdate,
    /// Client meldet einen Fehler
    Error,
    /// Heartbeat (zaehlen, keine Antwort)
    WebsocketHeartbeat,
    /// Sichtbarkeit der Live-Anzeige hat sich geaendert
    LiveDisplayUpdate,
    /// Nicht erkannte Aktion
    Unbekannt,
}

impl InboundAction {
    /// Klassifiziert einen Aktionsnamen
    pub fn aus_action(action: &str) -> Self {
        match action {
            "hello" => Self::Hello,
            "close" => Self::Close,
            "page_hidden" => Self::PageHidden,
            "page_visible" => Self::PageVisible,
            "echo_printing" => Self::EchoPrinting,
            "echo_state_update" => Self::EchoStateUpdate,
            "error" => Self::Error,
            "websocket_heartbeat" => Self::WebsocketHeartbeat,
            "live_display_update" => Self::LiveDisplayUpdate,
            _ => Self::Unbekannt,
        }
    }
}

// ---------------------------------------------------------------------------
// Relay-Aktionen (Server-Ursprung, z.B. aus dem WebUI-Editor)
// ---------------------------------------------------------------------------

/// Aktionen die ein Steuerungs-Client (`from.type == "server"`) ausloesen
/// darf; sie werden unveraendert an die Anzeige-Clients weitergereicht.
const RELAY_AKTIONEN: &[(&str, &str)] = &[
    (AKTION_MESSAGE_DATA, "Nachricht weiterleiten"),
    (AKTION_ECHO_NEXT, "Naechste Nachricht ausloesen"),
    ("set_live_display", "Live-Anzeige aktualisieren"),
    ("history_clear", "Verlauf leeren"),
    ("set_theme", "Theme setzen"),
    ("set_theme_style_url", "Theme-Stylesheet setzen"),
    ("set_avatar", "Avatar setzen"),
    ("broadcast_close", "Broadcast beenden"),
    ("websocket_close", "WebSocket-Verbindung schliessen"),
    ("shutdown", "Shutdown ausloesen"),
];

/// Gibt die Beschreibung einer Relay-Aktion zurueck, falls bekannt
pub fn relay_beschreibung(action: &str) -> Option<&'static str> {
    RELAY_AKTIONEN
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, beschreibung)| *beschreibung)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::TextStyle;

    #[test]
    fn ping_serialisierung() {
        let json = Envelope::ping().zu_json().unwrap();
        assert_eq!(json, PING_PAYLOAD);
    }

    #[test]
    fn umschlag_ohne_data_parsebar() {
        let envelope = Envelope::aus_json(r#"{"action":"close"}"#).unwrap();
        assert_eq!(envelope.action, "close");
        assert!(envelope.data.is_null());
        assert!(envelope.from.is_none());
    }

    #[test]
    fn origin_label_bevorzugt_namen() {
        let origin = Origin {
            typ: Some("live".into()),
            uuid: Some("abc-123".into()),
            name: Some("Dialog".into()),
        };
        assert_eq!(origin.label(), Some("Dialog"));

        let nur_uuid = Origin {
            uuid: Some("abc-123".into()),
            ..Origin::default()
        };
        assert_eq!(nur_uuid.label(), Some("abc-123"));
    }

    #[test]
    fn message_data_umschlag_form() {
        let data = MessageData::einzeln("【Someone】", vec![Segment::text("hi", TextStyle::default())]);
        let envelope = data.als_envelope().unwrap();
        let json = envelope.zu_json().unwrap();
        assert_eq!(
            json,
            r#"{"action":"message_data","data":{"username":"【Someone】","messages":[{"message":[{"text":"hi","style":{}}]}]}}"#
        );
    }

    #[test]
    fn utf8_bleibt_unverschluesselt() {
        let data = MessageData::einzeln("喵", vec![]);
        let json = data.als_envelope().unwrap().zu_json().unwrap();
        assert!(json.contains('喵'), "UTF-8 darf nicht ASCII-escaped werden");
    }

    #[test]
    fn eingehende_aktionen_klassifiziert() {
        assert_eq!(InboundAction::aus_action("hello"), InboundAction::Hello);
        assert_eq!(
            InboundAction::aus_action("websocket_heartbeat"),
            InboundAction::WebsocketHeartbeat
        );
        assert_eq!(InboundAction::aus_action("sonstwas"), InboundAction::Unbekannt);
    }

    #[test]
    fn relay_aktionen_bekannt() {
        assert!(relay_beschreibung("message_data").is_some());
        assert!(relay_beschreibung("shutdown").is_some());
        assert!(relay_beschreibung("hello").is_none());
    }
}
