//! Direktiven-Scanner – erste Stufe der Pipeline
//!
//! Liest Operator-Text von links nach rechts und zerlegt ihn an den
//! `@`-Direktiven in gestylte Segmente. Die Grammatik ist ein explizites
//! Varianten-Enum das ein kleiner handgeschriebener Scanner auswertet.
//!
//! ## Fehlverhalten
//! Eine Direktive ohne Terminator oder mit unbekanntem Buchstaben ist KEINE
//! Direktive: das `@` und die Folgezeichen landen woertlich im Text.
//! Der Scanner schlaegt niemals fehl.

use echocast_protocol::{Segment, SizeStep, TextStyle};

use crate::markdown::markdown_anwenden;

/// Praefix fuer Klassen-Tags ohne `@<:`-Unterdrueckung
const KLASSEN_PRAEFIX: &str = "echo-text-";

// ---------------------------------------------------------------------------
// Direktiven-Grammatik
// ---------------------------------------------------------------------------

/// Alle erkannten Inline-Direktiven
#[derive(Debug, Clone, PartialEq)]
enum Direktive {
    /// `@b` – Fettdruck einschalten
    Fett,
    /// `@i` – Kursivschrift einschalten
    Kursiv,
    /// `@u` – Unterstreichung einschalten
    Unterstrichen,
    /// `@s` – Durchstreichung einschalten
    Durchgestrichen,
    /// `@+` – Schriftgroesse eine Stufe groesser
    Groesser,
    /// `@-` – Schriftgroesse eine Stufe kleiner
    Kleiner,
    /// `@r` – Stil und Klassen-Tags auf den Grundzustand zuruecksetzen
    Zuruecksetzen,
    /// `@[farbe]` – Farbe setzen, `@[]` loescht sie
    Farbe(Option<String>),
    /// `@{bezeichner}` – alleinstehendes Emoji-Segment, `@{}` konsumiert leer
    Emoji(Option<String>),
    /// `@<name>` bzw. `@<:name>` – Klassen-Tag anfuegen
    KlassenTag { name: String, ohne_praefix: bool },
}

/// Liest die Direktive ab `zeichen[pos] == '@'`
///
/// Gibt die Direktive und die Position hinter ihrem letzten Zeichen zurueck,
/// oder `None` wenn an dieser Stelle keine gueltige Direktive steht.
fn direktive_lesen(zeichen: &[char], pos: usize) -> Option<(Direktive, usize)> {
    let code = *zeichen.get(pos + 1)?;
    match code {
        'b' => Some((Direktive::Fett, pos + 2)),
        'i' => Some((Direktive::Kursiv, pos + 2)),
        'u' => Some((Direktive::Unterstrichen, pos + 2)),
        's' => Some((Direktive::Durchgestrichen, pos + 2)),
        '+' => Some((Direktive::Groesser, pos + 2)),
        '-' => Some((Direktive::Kleiner, pos + 2)),
        'r' => Some((Direktive::Zuruecksetzen, pos + 2)),
        '[' => {
            let schliessend = zeichen[pos + 2..].iter().position(|&c| c == ']')? + pos + 2;
            let farbe: String = zeichen[pos + 2..schliessend].iter().collect();
            let farbe = farbe.trim().to_string();
            let wert = if farbe.is_empty() { None } else { Some(farbe) };
            Some((Direktive::Farbe(wert), schliessend + 1))
        }
        '{' => {
            let schliessend = zeichen[pos + 2..].iter().position(|&c| c == '}')? + pos + 2;
            let bezeichner: String = zeichen[pos + 2..schliessend].iter().collect();
            let bezeichner = bezeichner.trim().to_string();
            let wert = if bezeichner.is_empty() { None } else { Some(bezeichner) };
            Some((Direktive::Emoji(wert), schliessend + 1))
        }
        '<' => {
            let mut p = pos + 2;
            let ohne_praefix = if zeichen.get(p) == Some(&':') {
                p += 1;
                true
            } else {
                false
            };
            let start = p;
            while p < zeichen.len() && !zeichen[p].is_whitespace() && zeichen[p] != '@' {
                p += 1;
            }
            if p == start {
                return None;
            }
            let name: String = zeichen[start..p].iter().collect();
            Some((Direktive::KlassenTag { name, ohne_praefix }, p))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Schliesst den Textpuffer als Segment mit dem aktuellen Stil-Schnappschuss ab
fn puffer_leeren(
    puffer: &mut String,
    segmente: &mut Vec<Segment>,
    stil: &TextStyle,
    klassen: &[String],
) {
    if puffer.is_empty() {
        return;
    }
    let mut segment = Segment::text(std::mem::take(puffer), stil.clone());
    if !klassen.is_empty() {
        segment.klassen = Some(klassen.to_vec());
    }
    segmente.push(segment);
}

/// Zerlegt den Text an den Direktiven in gestylte Segmente (vor Markdown)
pub fn schnell_formatierung(text: &str) -> Vec<Segment> {
    let zeichen: Vec<char> = text.chars().collect();
    let mut stil = TextStyle::default();
    let mut groesse = SizeStep::STANDARD_ORDINAL;
    let mut klassen: Vec<String> = Vec::new();
    let mut puffer = String::new();
    let mut segmente: Vec<Segment> = Vec::new();

    let mut pos = 0;
    while pos < zeichen.len() {
        let c = zeichen[pos];

        // `\@` ist immer ein woertliches `@`
        if c == '\\' && zeichen.get(pos + 1) == Some(&'@') {
            puffer.push('@');
            pos += 2;
            continue;
        }
        if c != '@' {
            puffer.push(c);
            pos += 1;
            continue;
        }

        let Some((direktive, neue_pos)) = direktive_lesen(&zeichen, pos) else {
            // Keine gueltige Direktive: `@` woertlich uebernehmen
            puffer.push('@');
            pos += 1;
            continue;
        };
        pos = neue_pos;

        match direktive {
            Direktive::Fett => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil.bold = true;
            }
            Direktive::Kursiv => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil.italic = true;
            }
            Direktive::Unterstrichen => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil.underline = true;
            }
            Direktive::Durchgestrichen => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil.strikethrough = true;
            }
            Direktive::Groesser | Direktive::Kleiner => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                let delta: i8 = if direktive == Direktive::Groesser { 1 } else { -1 };
                groesse = (groesse + delta).clamp(0, 4);
                stil.size = if groesse == SizeStep::STANDARD_ORDINAL {
                    None
                } else {
                    Some(SizeStep::aus_ordinal(groesse))
                };
            }
            Direktive::Zuruecksetzen => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil = TextStyle::default();
                groesse = SizeStep::STANDARD_ORDINAL;
                klassen.clear();
            }
            Direktive::Farbe(wert) => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                stil.color = wert;
            }
            Direktive::Emoji(wert) => {
                puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);
                if let Some(bezeichner) = wert {
                    let mut segment = Segment::text("", stil.clone());
                    segment.emoji = Some(bezeichner);
                    if !klassen.is_empty() {
                        segment.klassen = Some(klassen.clone());
                    }
                    segmente.push(segment);
                }
            }
            Direktive::KlassenTag { name, ohne_praefix } => {
                // Kein Puffer-Abschluss: der Tag gilt fuer den gesamten Lauf
                let aufgeloest = if ohne_praefix {
                    name
                } else {
                    format!("{KLASSEN_PRAEFIX}{name}")
                };
                if !klassen.contains(&aufgeloest) {
                    klassen.push(aufgeloest);
                }
            }
        }
    }

    puffer_leeren(&mut puffer, &mut segmente, &stil, &klassen);

    // Bestand die Eingabe nur aus Direktiven, bleibt trotzdem genau ein
    // (ggf. leeres) Segment mit dem aktuellen Stil uebrig.
    if segmente.is_empty() {
        let mut segment = Segment::text("", stil);
        if !klassen.is_empty() {
            segment.klassen = Some(klassen);
        }
        segmente.push(segment);
    }

    segmente
}

/// Vollstaendiges Parsen: Direktiven-Scanner plus Markdown-Aufteilung
pub fn nachricht_parsen(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    markdown_anwenden(schnell_formatierung(text))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
