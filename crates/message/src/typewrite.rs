//! Typewrite-Stufe – Wort-Token, phonetische Umschrift, Druckgeschwindigkeit
//!
//! Bei aktiviertem Typewriting wird jedes texttragende Segment an
//! Wortgrenzen zerlegt (verlustfrei: die Token ergeben aneinandergereiht
//! exakt den Quelltext) und pro Token eine phonetische Umschrift angehaengt.
//! Die Druckgeschwindigkeit wird unabhaengig vom Typewriting-Schalter
//! aufgeloest, damit die finale Folge immer getaktet ist.
//!
//! ## Geschwindigkeits-Aufloesung
//! Segment-Override (`data.printSpeed`) > konfigurierte Geschwindigkeit >
//! eingebauter Standard. Reine Pausen-Segmente bleiben ohne Geschwindigkeit.

use echocast_protocol::Segment;
use unicode_segmentation::UnicodeSegmentation;

use crate::options::{KompositionsOptionen, TypewriteSchema};
use crate::zhuyin::silbe_zu_zhuyin;

use pinyin::ToPinyin;

// ---------------------------------------------------------------------------
// Umschrift
// ---------------------------------------------------------------------------

/// Silben-Romanisierung eines Textes
///
/// ASCII-Buchstaben passieren unveraendert. Vor einer Silbe deren
/// Vorgaenger-Quellzeichen kein ASCII-Buchstabe war wird ein `'` eingefuegt,
/// damit Silben nicht ineinanderlaufen. Zeichen ohne Lesung bleiben erhalten.
pub fn pinyin_umschrift(text: &str) -> String {
    let mut ergebnis = String::new();
    let mut vorher_ascii = false;

    for (i, c) in text.chars().enumerate() {
        if c.is_ascii_alphabetic() {
            ergebnis.push(c);
            vorher_ascii = true;
            continue;
        }
        if i != 0 && !vorher_ascii {
            ergebnis.push('\'');
        }
        match c.to_pinyin() {
            Some(lesung) => ergebnis.push_str(lesung.plain()),
            None => ergebnis.push(c),
        }
        vorher_ascii = false;
    }

    ergebnis
}

/// Phonetische Symbolschrift (Zhuyin) eines Textes
///
/// ASCII-Buchstaben passieren unveraendert; Zeichen ohne Lesung bleiben
/// erhalten.
pub fn zhuyin_umschrift(text: &str) -> String {
    let mut ergebnis = String::new();

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            ergebnis.push(c);
            continue;
        }
        match c.to_pinyin() {
            Some(lesung) => ergebnis.push_str(&silbe_zu_zhuyin(lesung.plain())),
            None => ergebnis.push(c),
        }
    }

    ergebnis
}

/// Umschrift gemaess dem gewaehlten Schema
pub fn umschrift(text: &str, schema: TypewriteSchema) -> String {
    match schema {
        TypewriteSchema::Pinyin => pinyin_umschrift(text),
        TypewriteSchema::Zhuyin => zhuyin_umschrift(text),
    }
}

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// Zerlegt Segmente in Wort-Token und loest die Druckgeschwindigkeit auf
pub fn typewrite_anwenden(
    optionen: &KompositionsOptionen,
    segmente: Vec<Segment>,
) -> Vec<Segment> {
    let geschwindigkeit = optionen.wirksame_geschwindigkeit();
    let mut ergebnis = Vec::new();

    for mut segment in segmente {
        if optionen.typewriting && segment.hat_text() {
            let token: Vec<&str> = segment.text.split_word_bounds().collect();

            if token.len() > 1 {
                // Schablone ohne Text: jedes Token erbt alle uebrigen Attribute
                let schablone = {
                    let mut s = segment.clone();
                    s.text = String::new();
                    s.typewrite = None;
                    s
                };
                for wort in token {
                    let mut teil = schablone.clone();
                    teil.text = wort.to_string();
                    let lesung = umschrift(wort, optionen.typewriting_schema);
                    if !lesung.is_empty() {
                        teil.typewrite = Some(lesung);
                    }
                    teil.geschwindigkeit_sicherstellen(geschwindigkeit);
                    ergebnis.push(teil);
                }
                continue;
            }

            let lesung = umschrift(&segment.text, optionen.typewriting_schema);
            if !lesung.is_empty() {
                segment.typewrite = Some(lesung);
            }
        }

        segment.geschwindigkeit_sicherstellen(geschwindigkeit);
        ergebnis.push(segment);
    }

    ergebnis
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
