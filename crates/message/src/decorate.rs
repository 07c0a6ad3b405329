//! Ausgangs-Dekoration – Suffix, Anfuehrungszeichen, runde Klammern
//!
//! Laeuft VOR der Pipeline auf dem rohen Konsolentext. Jede Dekoration ist
//! ein eigener Schalter; bereits eingefasster Text wird nicht doppelt
//! eingefasst.

use crate::options::KompositionsOptionen;

/// true wenn der Text bereits von `links`/`rechts` eingefasst ist
fn ist_umschlossen(text: &str, links: &str, rechts: &str) -> bool {
    text.chars().count() >= links.chars().count() + rechts.chars().count()
        && text.starts_with(links)
        && text.ends_with(rechts)
}

/// true wenn das Zeichen Bedeutung traegt (Buchstabe oder Ziffer)
fn ist_semantisches_zeichen(zeichen: char) -> bool {
    zeichen.is_alphanumeric()
}

/// Haengt das konfigurierte Suffix an, falls sinnvoll
///
/// Kein Anhaengen bei leerem Text, bereits vorhandenem Suffix oder Text
/// ohne semantische Zeichen; abschliessender Leerraum bleibt hinter dem
/// Suffix erhalten.
pub fn suffix_anwenden(optionen: &KompositionsOptionen, text: &str) -> String {
    if text.is_empty() || !optionen.auto_suffix {
        return text.to_string();
    }
    let suffix = optionen.auto_suffix_wert.as_str();
    if suffix.is_empty() {
        return text.to_string();
    }

    let getrimmt = text.trim_end();
    if getrimmt.is_empty() || getrimmt.ends_with(suffix) {
        return text.to_string();
    }
    if !getrimmt.chars().any(ist_semantisches_zeichen) {
        return text.to_string();
    }

    let nachlauf = &text[getrimmt.len()..];
    format!("{getrimmt}{suffix}{nachlauf}")
}

/// Fasst den Text gemaess Konfiguration in Anfuehrungszeichen und Klammern
///
/// `klammern_einmalig` ist das vom `/parens once`-Kommando gesetzte
/// Einmal-Flag; der Aufrufer setzt es nach dem Senden zurueck.
pub fn text_dekorieren(
    optionen: &KompositionsOptionen,
    text: &str,
    klammern_einmalig: bool,
) -> String {
    let mut ergebnis = text.to_string();

    if optionen.auto_quotes && !ist_umschlossen(&ergebnis, "\"", "\"") {
        ergebnis = format!("\"{ergebnis}\"");
    }

    let klammern = optionen.auto_parentheses || klammern_einmalig;
    if klammern && !ist_umschlossen(&ergebnis, "(", ")") {
        ergebnis = format!("({ergebnis})");
    }

    ergebnis
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
