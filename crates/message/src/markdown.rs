//! Markdown-Stufe – Inline-Emphase und Code-Spans aufteilen
//!
//! Jedes texttragende Segment laeuft unabhaengig durch einen Inline-
//! Tokenizer (pulldown-cmark): `**stark**` wird fett, `*betont*` kursiv,
//! `` `code` `` als Code markiert, Zeilenumbrueche werden eigene
//! `"\n"`-Laeufe. Verschachtelte Spans stapeln Stil-Kopien, der innerste
//! Treffer gewinnt.
//!
//! Block-Konstrukte (Ueberschriften, Listen, Zitate, Code-Bloecke) werden
//! NICHT uminterpretiert: ein solches Segment bleibt woertlich erhalten.

use echocast_protocol::{Segment, TextStyle};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Zerlegt den Text eines Segments in Stil-Laeufe
///
/// Gibt `None` zurueck wenn der Text Block-Syntax enthaelt – dann bleibt
/// das Segment unveraendert (der Scanner arbeitet nur auf Inline-Ebene).
fn inline_laeufe(text: &str, basis: &TextStyle) -> Option<Vec<(String, TextStyle)>> {
    let mut stapel: Vec<TextStyle> = vec![basis.clone()];
    let mut laeufe: Vec<(String, TextStyle)> = Vec::new();

    for ereignis in Parser::new(text) {
        match ereignis {
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {}
            // Link- und Bild-Tags sind transparent: nur ihr Text zaehlt
            Event::Start(Tag::Link { .. }) | Event::End(TagEnd::Link) => {}
            Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => {}
            Event::Start(Tag::Strong) => {
                let mut stil = stapel.last().cloned().unwrap_or_default();
                stil.bold = true;
                stapel.push(stil);
            }
            Event::Start(Tag::Emphasis) => {
                let mut stil = stapel.last().cloned().unwrap_or_default();
                stil.italic = true;
                stapel.push(stil);
            }
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => {
                if stapel.len() > 1 {
                    stapel.pop();
                }
            }
            Event::Text(inhalt) => {
                if !inhalt.is_empty() {
                    let stil = stapel.last().cloned().unwrap_or_default();
                    laeufe.push((inhalt.into_string(), stil));
                }
            }
            Event::Code(inhalt) => {
                let mut stil = stapel.last().cloned().unwrap_or_default();
                stil.code = true;
                laeufe.push((inhalt.into_string(), stil));
            }
            Event::SoftBreak | Event::HardBreak => {
                let stil = stapel.last().cloned().unwrap_or_default();
                laeufe.push(("\n".into(), stil));
            }
            // Inline-HTML kennt der Tokenizer nicht: verwerfen
            Event::InlineHtml(_) | Event::Html(_) => {}
            // Alles andere ist Block-Syntax
            _ => return None,
        }
    }

    Some(laeufe)
}

/// Abschliessende Leerzeichen/Tabs eines Textes abtrennen
///
/// Der CommonMark-Parser streift Randleerraum von Absatzzeilen. Fuehrender
/// Leerraum eines Laufs faellt weg (sonst ergeben Direktiven wie
/// `a @b b` doppelte Leerzeichen im Schriftbild), abschliessender bleibt
/// erhalten und wird nach dem Parsen wieder angehaengt.
fn rand_leerraum(text: &str) -> (&str, &str) {
    let kern = text.trim_start_matches([' ', '\t']);
    let kern_ende = kern.trim_end_matches([' ', '\t']).len();
    (&kern[..kern_ende], &kern[kern_ende..])
}

/// Teilt jedes texttragende Segment nach Inline-Markdown-Regeln auf
///
/// Alle Attribute ausser `text`/`style` werden auf jeden erzeugten Lauf
/// kopiert; Segmente ohne Text (Emoji, Pause) passieren unveraendert.
pub fn markdown_anwenden(segmente: Vec<Segment>) -> Vec<Segment> {
    let mut ergebnis = Vec::new();

    for segment in segmente {
        if !segment.hat_text() {
            ergebnis.push(segment);
            continue;
        }

        let vorlage = segment.style.clone().unwrap_or_default();
        let (kern, suffix) = rand_leerraum(&segment.text);

        let laeufe = match inline_laeufe(kern, &vorlage) {
            Some(laeufe) if !laeufe.is_empty() => laeufe,
            // Block-Syntax oder nichts erzeugt: Segment bleibt woertlich
            _ => {
                ergebnis.push(segment);
                continue;
            }
        };

        let letzter = laeufe.len() - 1;
        for (i, (mut text, stil)) in laeufe.into_iter().enumerate() {
            if i == letzter {
                text.push_str(suffix);
            }
            let mut lauf = segment.clone();
            lauf.text = text;
            lauf.style = Some(stil);
            ergebnis.push(lauf);
        }
    }

    ergebnis
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
