//! echocast-message – Nachrichten-Kompositions-Pipeline
//!
//! Verwandelt rohen Operator-Text in die strukturierte, gestylte und
//! getaktete Segmentfolge die der Anzeige-Client abspielt.
//!
//! ## Pipeline-Stufen
//! 1. `markup` – Direktiven-Scanner (`@b`, `@[farbe]`, `@{emoji}`, ...)
//! 2. `markdown` – Inline-Emphase/Code-Spans aufteilen
//! 3. `autopause` – Pausenmarker an Satzzeichen einfuegen
//! 4. `typewrite` – Wort-Token, phonetische Umschrift, Druckgeschwindigkeit
//! 5. `delay` / `render` – Abspieldauer schaetzen, Wire-Payload erzeugen
//!
//! Die Stufen sind reine Funktionen ueber `Vec<Segment>`; die Reihenfolge
//! ist tragend und wird von `komponieren` festgeschrieben.

pub mod autopause;
pub mod decorate;
pub mod delay;
pub mod markdown;
pub mod markup;
pub mod options;
pub mod render;
pub mod typewrite;

mod zhuyin;

use echocast_core::Result;
use echocast_protocol::Segment;

pub use options::{KompositionsOptionen, TypewriteSchema, STANDARD_DRUCKGESCHWINDIGKEIT};

/// Ergebnis eines vollstaendigen Pipeline-Durchlaufs
#[derive(Debug, Clone)]
pub struct Komposition {
    /// Die finale Segmentfolge (nach allen Stufen)
    pub segmente: Vec<Segment>,
    /// Der serialisierte Wire-Payload (`message_data`-Umschlag)
    pub payload: String,
    /// Geschaetzte Abspieldauer in Millisekunden
    pub verzoegerung_ms: u64,
}

/// Laesst einen Operator-Text durch die komplette Pipeline laufen
///
/// Die Verzoegerung wird ueber die echte finale Segmentfolge berechnet,
/// nicht ueber eine Zwischenstufe – nur so ist sie deterministisch.
pub fn komponieren(optionen: &KompositionsOptionen, text: &str) -> Result<Komposition> {
    let segmente = markup::nachricht_parsen(text);
    let segmente = autopause::autopause_anwenden(optionen, segmente);
    let segmente = typewrite::typewrite_anwenden(optionen, segmente);

    let verzoegerung_ms = delay::verzoegerung_schaetzen(optionen, &segmente);
    let payload = render::payload_rendern(optionen, &segmente)?;

    Ok(Komposition {
        segmente,
        payload,
        verzoegerung_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use echocast_protocol::TextStyle;

    fn standard_optionen() -> KompositionsOptionen {
        KompositionsOptionen {
            typewriting: false,
            autopause: false,
            ..KompositionsOptionen::default()
        }
    }

    #[test]
    fn ende_zu_ende_fett_direktive() {
        let optionen = standard_optionen();
        let ergebnis = komponieren(&optionen, "Hello @b world@r!").unwrap();

        let texte: Vec<&str> = ergebnis.segmente.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texte, vec!["Hello ", "world", "!"]);

        assert_eq!(ergebnis.segmente[0].style, Some(TextStyle::default()));
        assert!(ergebnis.segmente[1].style.as_ref().unwrap().bold);
        assert_eq!(ergebnis.segmente[2].style, Some(TextStyle::default()));

        let wert: serde_json::Value = serde_json::from_str(&ergebnis.payload).unwrap();
        assert_eq!(wert["action"], "message_data");
        assert_eq!(wert["data"]["messages"][0]["message"][1]["text"], "world");
        assert_eq!(wert["data"]["messages"][0]["message"][1]["style"]["bold"], true);
    }

    #[test]
    fn ende_zu_ende_autopause() {
        let mut optionen = standard_optionen();
        optionen.autopause = true;
        optionen.autopause_zeichen = ",".into();
        optionen.autopause_dauer = 5;

        let ergebnis = komponieren(&optionen, "a,b").unwrap();
        let kurzform: Vec<(String, Option<u32>)> = ergebnis
            .segmente
            .iter()
            .map(|s| (s.text.clone(), s.pause))
            .collect();
        assert_eq!(
            kurzform,
            vec![
                ("a,".to_string(), None),
                (String::new(), Some(5)),
                ("b".to_string(), None),
                (String::new(), Some(5)),
            ]
        );
    }

    #[test]
    fn verzoegerung_aus_finaler_folge() {
        let mut optionen = standard_optionen();
        optionen.druckgeschwindigkeit = 10;
        let ergebnis = komponieren(&optionen, "ab!").unwrap();
        // 'a' + 'b' je 10, '!' doppelt
        assert_eq!(ergebnis.verzoegerung_ms, 40);
    }

    #[test]
    fn leere_eingabe_ergibt_leere_folge() {
        let optionen = standard_optionen();
        let ergebnis = komponieren(&optionen, "").unwrap();
        assert!(ergebnis.segmente.is_empty());
    }
}
