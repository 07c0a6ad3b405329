//! Fehlertypen fuer Echocast
//!
//! Zentraler Fehler-Enum der alle moeglichen Fehlerzustaende abdeckt.
//! Untermodule koennen eigene Fehler definieren und via `#[from]` konvertieren.

use thiserror::Error;

/// Globaler Result-Alias fuer Echocast
pub type Result<T> = std::result::Result<T, EchocastError>;

/// Alle moeglichen Fehler im Echocast-System
#[derive(Debug, Error)]
pub enum EchocastError {
    // --- Verbindung & Netzwerk ---
    #[error("Verbindung fehlgeschlagen: {0}")]
    Verbindung(String),

    #[error("Verbindung getrennt: {0}")]
    Getrennt(String),

    // --- Protokoll ---
    #[error("Ungueltige Nachricht: {0}")]
    UngueltigeNachricht(String),

    #[error("Serialisierung fehlgeschlagen: {0}")]
    Serialisierung(#[from] serde_json::Error),

    // --- Kanaele ---
    #[error("Kanal nicht gefunden: {0}")]
    KanalNichtGefunden(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Dateisystem ---
    #[error("Ungueltiger Dateipfad: {0}")]
    UngueltigerPfad(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl EchocastError {
    /// Erstellt einen internen Fehler aus einer beliebigen Nachricht
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn der Fehler eine erwartete Trennung ist
    ///
    /// Sendefehler an bereits geschlossene Gegenstellen sind Betriebsalltag
    /// und duerfen nicht als Systemfehler eskaliert werden.
    pub fn ist_getrennt(&self) -> bool {
        matches!(self, Self::Getrennt(_))
    }
}
