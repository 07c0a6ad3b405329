//! Kompositions-Optionen
//!
//! Alle Stellschrauben der Pipeline in einem Struct. Wird unveraendert als
//! `[nachricht]`-Abschnitt in die Server-Konfiguration eingebettet; jedes
//! Feld hat einen Standardwert damit Teil-Konfigurationen gueltig bleiben.

use serde::{Deserialize, Serialize};

/// Eingebaute Standard-Druckgeschwindigkeit in Millisekunden pro Tick
///
/// Greift nur wenn weder ein Segment-Override noch eine konfigurierte
/// Geschwindigkeit vorliegt.
pub const STANDARD_DRUCKGESCHWINDIGKEIT: u32 = 30;

/// Auswaehlbares Umschrift-Schema fuer den Typewriting-Effekt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewriteSchema {
    /// Silben-Romanisierung (Pinyin)
    #[default]
    Pinyin,
    /// Phonetische Symbolschrift (Zhuyin/Bopomofo)
    Zhuyin,
}

impl TypewriteSchema {
    /// Normalisiert einen Konfigurationswert; Unbekanntes faellt auf Pinyin
    pub fn aus_str(wert: &str) -> Self {
        match wert.trim().to_lowercase().as_str() {
            "zhuyin" => Self::Zhuyin,
            _ => Self::Pinyin,
        }
    }

    /// Konfigurations-Darstellung des Schemas
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Pinyin => "pinyin",
            Self::Zhuyin => "zhuyin",
        }
    }

    /// Wechselt zyklisch zum jeweils anderen Schema
    pub fn umschalten(&self) -> Self {
        match self {
            Self::Pinyin => Self::Zhuyin,
            Self::Zhuyin => Self::Pinyin,
        }
    }
}

impl std::fmt::Display for TypewriteSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

/// Alle Stellschrauben der Kompositions-Pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KompositionsOptionen {
    /// Anzeigename des Operators
    pub benutzername: String,
    /// Anzeigename in 【】-Klammern einfassen
    pub benutzername_klammern: bool,
    /// Typewriting-Effekt (wortweise Aufdeckung mit Umschrift)
    pub typewriting: bool,
    /// Umschrift-Schema fuer Typewriting
    pub typewriting_schema: TypewriteSchema,
    /// Pausenmarker an Satzzeichen einfuegen
    pub autopause: bool,
    /// Satzzeichen die eine Pause ausloesen
    pub autopause_zeichen: String,
    /// Pausendauer in Ticks
    pub autopause_dauer: u32,
    /// Konfigurierte Druckgeschwindigkeit in ms pro Tick (0 = eingebauter Standard)
    pub druckgeschwindigkeit: u32,
    /// Ausgehenden Text automatisch in Anfuehrungszeichen einfassen
    pub auto_quotes: bool,
    /// Ausgehenden Text automatisch in runde Klammern einfassen
    pub auto_parentheses: bool,
    /// Automatisches Suffix anhaengen
    pub auto_suffix: bool,
    /// Suffix-Zeichenkette
    pub auto_suffix_wert: String,
}

impl Default for KompositionsOptionen {
    fn default() -> Self {
        Self {
            benutzername: "Someone".into(),
            benutzername_klammern: true,
            typewriting: true,
            typewriting_schema: TypewriteSchema::Pinyin,
            autopause: false,
            autopause_zeichen: ",，.。;；:：!！".into(),
            autopause_dauer: 10,
            druckgeschwindigkeit: 10,
            auto_quotes: true,
            auto_parentheses: false,
            auto_suffix: false,
            auto_suffix_wert: "喵".into(),
        }
    }
}

impl KompositionsOptionen {
    /// Konfigurierte Geschwindigkeit, mit Rueckfall auf den eingebauten Standard
    pub fn wirksame_geschwindigkeit(&self) -> u32 {
        if self.druckgeschwindigkeit > 0 {
            self.druckgeschwindigkeit
        } else {
            STANDARD_DRUCKGESCHWINDIGKEIT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_normalisierung() {
        assert_eq!(TypewriteSchema::aus_str("zhuyin"), TypewriteSchema::Zhuyin);
        assert_eq!(TypewriteSchema::aus_str(" ZHUYIN "), TypewriteSchema::Zhuyin);
        assert_eq!(TypewriteSchema::aus_str("pinyin"), TypewriteSchema::Pinyin);
        assert_eq!(TypewriteSchema::aus_str("quatsch"), TypewriteSchema::Pinyin);
    }

    #[test]
    fn schema_umschalten_zyklisch() {
        let schema = TypewriteSchema::Pinyin;
        assert_eq!(schema.umschalten(), TypewriteSchema::Zhuyin);
        assert_eq!(schema.umschalten().umschalten(), TypewriteSchema::Pinyin);
    }

    #[test]
    fn geschwindigkeit_rueckfall() {
        let mut optionen = KompositionsOptionen::default();
        optionen.druckgeschwindigkeit = 0;
        assert_eq!(optionen.wirksame_geschwindigkeit(), STANDARD_DRUCKGESCHWINDIGKEIT);
        optionen.druckgeschwindigkeit = 15;
        assert_eq!(optionen.wirksame_geschwindigkeit(), 15);
    }

    #[test]
    fn optionen_aus_teil_toml() {
        let optionen: KompositionsOptionen =
            toml::from_str("typewriting = false\nautopause_dauer = 3").unwrap();
        assert!(!optionen.typewriting);
        assert_eq!(optionen.autopause_dauer, 3);
        // Nicht angegebene Felder behalten Standardwerte
        assert!(optionen.auto_quotes);
        assert_eq!(optionen.benutzername, "Someone");
    }
}
