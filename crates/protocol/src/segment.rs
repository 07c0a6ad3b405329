//! Segment-Datenmodell – atomare Einheiten des Untertitel-Streams
//!
//! Ein `Segment` ist die kleinste Einheit die der Anzeige-Client abspielt:
//! ein Textlauf mit Stil-Schnappschuss, ein alleinstehendes Emoji oder eine
//! reine Pause. Die Feld-Praesenz auf dem Draht ist Teil des Protokolls:
//! abwesende Felder werden nicht serialisiert, ein leerer Stil erscheint
//! als `{}`.
//!
//! ## Invarianten
//! - Ein Segment mit nicht-leerem `text` oder gesetztem `emoji` traegt immer
//!   einen Stil-Schnappschuss (ggf. leer).
//! - Ein reines Pausen-Segment hat leeren Text, kein Emoji und keine
//!   Druckgeschwindigkeit.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Groessenstufen
// ---------------------------------------------------------------------------

/// Schriftgroesse in fuenf festen Stufen
///
/// `Middle` ist die Standardstufe und wird auf dem Draht weggelassen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeStep {
    ExtraSmall,
    Small,
    Middle,
    Large,
    ExtraLarge,
}

impl SizeStep {
    /// Ordinalwert der Standardstufe
    pub const STANDARD_ORDINAL: i8 = 2;

    /// Gibt den Ordinalwert der Stufe zurueck (0..=4)
    pub fn ordinal(&self) -> i8 {
        match self {
            Self::ExtraSmall => 0,
            Self::Small => 1,
            Self::Middle => 2,
            Self::Large => 3,
            Self::ExtraLarge => 4,
        }
    }

    /// Erstellt eine Stufe aus einem Ordinalwert, geklemmt auf [0, 4]
    pub fn aus_ordinal(ordinal: i8) -> Self {
        match ordinal.clamp(0, 4) {
            0 => Self::ExtraSmall,
            1 => Self::Small,
            2 => Self::Middle,
            3 => Self::Large,
            _ => Self::ExtraLarge,
        }
    }

    /// true wenn dies die Standardstufe ist
    pub fn ist_standard(&self) -> bool {
        *self == Self::Middle
    }
}

impl Default for SizeStep {
    fn default() -> Self {
        Self::Middle
    }
}

// ---------------------------------------------------------------------------
// TextStyle
// ---------------------------------------------------------------------------

/// Stil-Schnappschuss eines Segments
///
/// Fester Struct statt offener Map: die boolschen Flags erscheinen auf dem
/// Draht nur wenn gesetzt, `size` nur abseits der Standardstufe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyle {
    /// true wenn kein einziges Stilmerkmal gesetzt ist
    pub fn ist_leer(&self) -> bool {
        *self == Self::default()
    }

    /// Aktueller Groessen-Ordinalwert (Standardstufe wenn nicht gesetzt)
    pub fn groessen_ordinal(&self) -> i8 {
        self.size.map(|s| s.ordinal()).unwrap_or(SizeStep::STANDARD_ORDINAL)
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// Zusatzdaten eines Segments (derzeit nur die Druckgeschwindigkeit)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentData {
    /// Abspielgeschwindigkeit in Millisekunden pro Zeichen-Tick
    #[serde(rename = "printSpeed", default, skip_serializing_if = "Option::is_none")]
    pub print_speed: Option<u32>,
}

/// Atomare gestylte/getaktete Einheit des Untertitel-Streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Textinhalt; bei Emoji- und Pausen-Segmenten leer, aber immer praesent
    #[serde(default)]
    pub text: String,
    /// Stil-Schnappschuss zum Zeitpunkt der Erzeugung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
    /// Geordnete CSS-Klassen-Tags
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub klassen: Option<Vec<String>>,
    /// Emoji-Bezeichner fuer alleinstehende Emoji-Segmente
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Pausendauer in Ticks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<u32>,
    /// Phonetische Umschrift fuer den Typewriting-Effekt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typewrite: Option<String>,
    /// Zusatzdaten (Druckgeschwindigkeit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SegmentData>,
}

impl Segment {
    /// Erstellt ein Text-Segment mit Stil-Schnappschuss
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
            ..Self::default()
        }
    }

    /// Erstellt ein reines Pausen-Segment
    pub fn pause(dauer: u32) -> Self {
        Self {
            pause: Some(dauer),
            ..Self::default()
        }
    }

    /// true wenn das Segment sichtbaren Text traegt
    pub fn hat_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// true wenn das Segment Text oder ein Emoji traegt
    ///
    /// Nur solche Segmente bekommen eine Druckgeschwindigkeit.
    pub fn ist_abspielbar(&self) -> bool {
        self.hat_text() || self.emoji.is_some()
    }

    /// Explizit gesetzte Druckgeschwindigkeit (Override), falls positiv
    pub fn geschwindigkeit(&self) -> Option<u32> {
        self.data
            .as_ref()
            .and_then(|d| d.print_speed)
            .filter(|&s| s > 0)
    }

    /// Setzt die Druckgeschwindigkeit, ohne einen bestehenden Override
    /// zu ueberschreiben
    pub fn geschwindigkeit_sicherstellen(&mut self, geschwindigkeit: u32) {
        if !self.ist_abspielbar() || self.geschwindigkeit().is_some() {
            return;
        }
        self.data.get_or_insert_with(SegmentData::default).print_speed = Some(geschwindigkeit);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leerer_stil_erscheint_als_leeres_objekt() {
        let segment = Segment::text("hi", TextStyle::default());
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"text":"hi","style":{}}"#);
    }

    #[test]
    fn gesetzte_flags_werden_serialisiert() {
        let stil = TextStyle {
            bold: true,
            color: Some("red".into()),
            ..TextStyle::default()
        };
        let json = serde_json::to_value(&stil).unwrap();
        assert_eq!(json, serde_json::json!({"bold": true, "color": "red"}));
    }

    #[test]
    fn groessenstufen_kebab_case() {
        let json = serde_json::to_string(&SizeStep::ExtraSmall).unwrap();
        assert_eq!(json, "\"extra-small\"");
        let stufe: SizeStep = serde_json::from_str("\"extra-large\"").unwrap();
        assert_eq!(stufe, SizeStep::ExtraLarge);
    }

    #[test]
    fn ordinal_klemmt_auf_gueltigen_bereich() {
        assert_eq!(SizeStep::aus_ordinal(-3), SizeStep::ExtraSmall);
        assert_eq!(SizeStep::aus_ordinal(9), SizeStep::ExtraLarge);
        assert_eq!(SizeStep::aus_ordinal(2), SizeStep::Middle);
    }

    #[test]
    fn print_speed_camel_case() {
        let mut segment = Segment::text("x", TextStyle::default());
        segment.geschwindigkeit_sicherstellen(30);
        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains(r#""printSpeed":30"#), "json war: {json}");
    }

    #[test]
    fn geschwindigkeit_ueberschreibt_keinen_override() {
        let mut segment = Segment::text("x", TextStyle::default());
        segment.data = Some(SegmentData { print_speed: Some(99) });
        segment.geschwindigkeit_sicherstellen(30);
        assert_eq!(segment.geschwindigkeit(), Some(99));
    }

    #[test]
    fn pausen_segment_bekommt_keine_geschwindigkeit() {
        let mut segment = Segment::pause(10);
        segment.geschwindigkeit_sicherstellen(30);
        assert!(segment.data.is_none());
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"text":"","pause":10}"#);
    }

    #[test]
    fn segment_roundtrip() {
        let segment = Segment {
            text: "hallo".into(),
            style: Some(TextStyle {
                italic: true,
                size: Some(SizeStep::Large),
                ..TextStyle::default()
            }),
            klassen: Some(vec!["echo-text-glow".into()]),
            ..Segment::default()
        };
        let json = serde_json::to_string(&segment).unwrap();
        let zurueck: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, zurueck);
        assert!(json.contains(r#""class":["echo-text-glow"]"#));
    }
}
