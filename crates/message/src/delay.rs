//! Verzoegerungs-Schaetzung – Abspieldauer der finalen Segmentfolge
//!
//! Jedes Zeichen kostet einen Tick seiner Segment-Geschwindigkeit,
//! Nicht-ASCII-Glyphen (breite/CJK-Zeichen) den doppelten Tick. Ein
//! Pausen-Segment kostet zusaetzlich `geschwindigkeit * pause * 2`.
//! Die Schaetzung ist pro Segment additiv und reihenfolgeunabhaengig.

use echocast_protocol::Segment;

use crate::options::KompositionsOptionen;

/// Schaetzt die Abspieldauer der Folge in Millisekunden
///
/// Muss ueber die echte finale Folge laufen (nach Typewrite-Zerlegung),
/// damit Segment-Overrides der Geschwindigkeit korrekt eingehen.
pub fn verzoegerung_schaetzen(optionen: &KompositionsOptionen, segmente: &[Segment]) -> u64 {
    let mut gesamt: u64 = 0;

    for segment in segmente {
        let geschwindigkeit = segment
            .geschwindigkeit()
            .unwrap_or_else(|| optionen.wirksame_geschwindigkeit()) as u64;

        for zeichen in segment.text.chars() {
            gesamt += if zeichen.is_ascii_alphabetic() {
                geschwindigkeit
            } else {
                geschwindigkeit * 2
            };
        }

        if let Some(pause) = segment.pause {
            gesamt += geschwindigkeit * u64::from(pause) * 2;
        }
    }

    gesamt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
