//! echocast-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und verdrahtet die Subsysteme:
//! Session-Schicht, Kanal-Hub, HTTP/WebSocket-Server und Konsole.

pub mod config;
pub mod console;

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

use echocast_session::SessionState;
use echocast_webui::{KanalHub, WebUiServer};

use config::ServerConfig;
use console::Konsole;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
    pub config_pfad: String,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig, config_pfad: String) -> Self {
        Self {
            config,
            config_pfad,
        }
    }

    /// Startet alle Subsysteme und laeuft bis zum Shutdown
    ///
    /// Reihenfolge:
    /// 1. Session-Schicht und Kanal-Hub aufbauen
    /// 2. HTTP/WebSocket-Server binden
    /// 3. Konsolen-Eingabeschleife starten
    /// 4. Auf Quit-Kommando oder Ctrl-C warten, dann kooperativ herunterfahren
    pub async fn starten(self) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let session_state = SessionState::neu(self.config.ereignisse.max_log_laenge);
        let hub = KanalHub::neu();

        let adresse = self.config.bind_adresse();
        let webui_server = WebUiServer::neu(
            self.config.webui.clone(),
            Arc::clone(&session_state),
            hub.clone(),
            shutdown_rx.clone(),
        );
        let http_task = tokio::spawn(async move {
            if let Err(e) = webui_server.starten(&adresse).await {
                tracing::error!(fehler = %e, "HTTP/WebSocket-Server abgebrochen");
            }
        });

        tracing::info!(
            adresse = %self.config.bind_adresse(),
            "Warte auf Anzeige-Clients – bei fehlender Verbindung den Client neu laden"
        );
        tracing::info!("Konsole bereit: Nachricht eintippen oder /help fuer Kommandos");

        let konsole = Konsole::neu(
            self.config,
            self.config_pfad,
            Arc::clone(&session_state),
        );
        let mut konsole_task = tokio::spawn(konsole.eingabe_schleife(shutdown_rx.clone()));

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl-C empfangen – Server wird beendet");
            }
            _ = &mut konsole_task => {
                tracing::info!("Konsole beendet – Server wird beendet");
            }
        }

        // Kooperatives Herunterfahren: Hub schliesst Kanal-Mitglieder,
        // das Watch-Signal beendet Sessions und HTTP-Server
        hub.herunterfahren();
        let _ = shutdown_tx.send(true);
        konsole_task.abort();
        let _ = http_task.await;

        tracing::info!("Server beendet");
        Ok(())
    }
}
