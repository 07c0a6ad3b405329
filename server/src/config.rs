//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Konsolen-Kommandos die Einstellungen aendern schreiben
//! die Konfiguration sofort zurueck.

use echocast_message::KompositionsOptionen;
use echocast_webui::WebUiKonfig;
use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Kompositions-Optionen der Nachrichten-Pipeline
    pub nachricht: KompositionsOptionen,
    /// WebUI-Einstellungen
    pub webui: WebUiKonfig,
    /// Event-Log-Einstellungen
    pub ereignisse: EreignisEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Praefix der Konsolen-Kommandos
    pub command_prefix: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            command_prefix: "/".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse des HTTP/WebSocket-Servers
    pub host: String,
    /// Port des HTTP/WebSocket-Servers
    pub port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Event-Log-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EreignisEinstellungen {
    /// Obergrenze des Event-Logs (drop-oldest beim Ueberlauf)
    pub max_log_laenge: usize,
}

impl Default for EreignisEinstellungen {
    fn default() -> Self {
        Self {
            max_log_laenge: 1024,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Schreibt die aktuelle Konfiguration zurueck auf die Platte
    pub fn speichern(&self, pfad: &str) -> anyhow::Result<()> {
        let inhalt = toml::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Konfiguration nicht serialisierbar: {e}"))?;
        std::fs::write(pfad, inhalt)
            .map_err(|e| anyhow::anyhow!("Konfigurationsdatei '{pfad}' nicht schreibbar: {e}"))?;
        tracing::info!(pfad = pfad, "Konfiguration gespeichert");
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse zurueck
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.host, self.netzwerk.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.command_prefix, "/");
        assert_eq!(cfg.netzwerk.port, 3000);
        assert_eq!(cfg.nachricht.benutzername, "Someone");
        assert_eq!(cfg.ereignisse.max_log_laenge, 1024);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.webui.aktiviert);
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_adresse(), "127.0.0.1:3000");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [netzwerk]
            port = 4000

            [nachricht]
            typewriting = false
            druckgeschwindigkeit = 25

            [webui]
            aktiviert = true
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.netzwerk.port, 4000);
        assert!(!cfg.nachricht.typewriting);
        assert_eq!(cfg.nachricht.druckgeschwindigkeit, 25);
        assert!(cfg.webui.aktiviert);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.netzwerk.host, "127.0.0.1");
        assert_eq!(cfg.server.command_prefix, "/");
    }

    #[test]
    fn laden_und_speichern_roundtrip() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis.path().join("config.toml");
        let pfad_str = pfad.to_str().unwrap();

        let mut cfg = ServerConfig::default();
        cfg.nachricht.benutzername = "Erzaehler".into();
        cfg.speichern(pfad_str).unwrap();

        let geladen = ServerConfig::laden(pfad_str).unwrap();
        assert_eq!(geladen.nachricht.benutzername, "Erzaehler");
    }

    #[test]
    fn fehlende_datei_ergibt_standardwerte() {
        let cfg = ServerConfig::laden("/gibt/es/nicht/config.toml").unwrap();
        assert_eq!(cfg.netzwerk.port, 3000);
    }
}
