//! echocast-protocol – Wire-Format und Nachrichten-Datenmodell
//!
//! Definiert die Segment-Struktur (atomare gestylte/getaktete Untertitel-
//! Einheit), den Wire-Umschlag `{action, data, from}` sowie die Klassifikation
//! eingehender und weiterzuleitender Aktionen.

pub mod segment;
pub mod wire;

// Re-Exporte fuer bequemen Zugriff
pub use segment::{Segment, SegmentData, SizeStep, TextStyle};
pub use wire::{Envelope, InboundAction, MessageBlock, MessageData, Origin};
