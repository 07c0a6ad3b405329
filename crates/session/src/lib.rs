//! echocast-session – Event-Log und Verbindungs-Sessions
//!
//! Das Herz der Zustellung: ein geteiltes, nur-anfuegendes Event-Log mit
//! Cursor pro Verbindung, und pro Verbindung eine Session-Zustandsmaschine
//! mit Empfangs- und Zustellschleife.

pub mod connection;
pub mod queue;
pub mod registry;
pub mod state;

// Re-Exporte fuer bequemen Zugriff
pub use connection::{ClientSession, SessionKanaele, SocketBefehl, Trennungsbericht, VerbindungsZustand};
pub use queue::{EventLog, OutboundEvent};
pub use registry::SitzungsRegister;
pub use state::SessionState;
