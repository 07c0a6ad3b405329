//! Autopause-Stufe – Pausenmarker an Satzzeichen
//!
//! Schliesst den laufenden Textabschnitt hinter dem letzten Satzzeichen
//! einer Satzzeichen-Folge ab und fuegt ein synthetisches Pausen-Segment
//! ein. Am Nachrichtenende folgt immer ein weiterer Pausenmarker als
//! Setzpause.

use echocast_protocol::Segment;

use crate::options::KompositionsOptionen;

/// Fuegt Pausenmarker gemaess der Autopause-Konfiguration ein
///
/// Ohne aktivierte Autopause oder mit Dauer 0 passiert nichts; die Folge
/// wird unveraendert zurueckgegeben.
pub fn autopause_anwenden(
    optionen: &KompositionsOptionen,
    segmente: Vec<Segment>,
) -> Vec<Segment> {
    if !optionen.autopause || optionen.autopause_dauer == 0 {
        return segmente;
    }

    let dauer = optionen.autopause_dauer;
    let pausenzeichen: Vec<char> = optionen.autopause_zeichen.chars().collect();
    let mut ergebnis = Vec::new();

    for segment in segmente {
        if !segment.hat_text() {
            ergebnis.push(segment);
            continue;
        }

        let zeichen: Vec<char> = segment.text.chars().collect();
        let mut puffer = String::new();

        for (i, &c) in zeichen.iter().enumerate() {
            puffer.push(c);

            // Pause erst hinter dem LETZTEN Zeichen einer Satzzeichen-Folge
            let naechstes = zeichen.get(i + 1);
            let pausieren = pausenzeichen.contains(&c)
                && naechstes.map_or(true, |n| !pausenzeichen.contains(n));

            if pausieren {
                let mut abschnitt = segment.clone();
                abschnitt.text = std::mem::take(&mut puffer);
                ergebnis.push(abschnitt);
                ergebnis.push(Segment::pause(dauer));
            }
        }

        if !puffer.is_empty() {
            let mut rest = segment.clone();
            rest.text = puffer;
            ergebnis.push(rest);
        }
    }

    // Setzpause am Nachrichtenende, auch ohne abschliessendes Satzzeichen
    ergebnis.push(Segment::pause(dauer));

    ergebnis
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use echocast_protocol::TextStyle;

    fn optionen(zeichen: &str, dauer: u32) -> KompositionsOptionen {
        KompositionsOptionen {
            autopause: true,
            autopause_zeichen: zeichen.into(),
            autopause_dauer: dauer,
            ..KompositionsOptionen::default()
        }
    }

    fn nur_text(text: &str) -> Vec<Segment> {
        vec![Segment::text(text, TextStyle::default())]
    }

    #[test]
    fn deaktiviert_gibt_folge_unveraendert_zurueck() {
        let mut opts = optionen(",.", 10);
        opts.autopause = false;
        let eingabe = nur_text("a,b.");
        assert_eq!(autopause_anwenden(&opts, eingabe.clone()), eingabe);
    }

    #[test]
    fn dauer_null_gibt_folge_unveraendert_zurueck() {
        let opts = optionen(",.", 0);
        let eingabe = nur_text("a,b.");
        assert_eq!(autopause_anwenden(&opts, eingabe.clone()), eingabe);
    }

    #[test]
    fn zwei_satzzeichen_ergeben_drei_marker() {
        let opts = optionen(",.!", 10);
        let ergebnis = autopause_anwenden(&opts, nur_text("a,b."));

        let pausen: Vec<&Segment> = ergebnis.iter().filter(|s| s.pause.is_some()).collect();
        assert_eq!(pausen.len(), 3, "zwei Marker plus Setzpause");
        assert!(pausen.iter().all(|s| s.pause == Some(10) && s.text.is_empty()));
    }

    #[test]
    fn abschnitt_enthaelt_das_satzzeichen() {
        let opts = optionen(",", 5);
        let ergebnis = autopause_anwenden(&opts, nur_text("a,b"));
        let kurzform: Vec<(String, Option<u32>)> = ergebnis
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
    fn satzzeichen_folge_pausiert_nur_einmal() {
        let opts = optionen(",.", 10);
        let ergebnis = autopause_anwenden(&opts, nur_text("a,.b"));
        let pausen = ergebnis.iter().filter(|s| s.pause.is_some()).count();
        // Eine Pause hinter ",." plus Setzpause
        assert_eq!(pausen, 2);
        assert_eq!(ergebnis[0].text, "a,.");
    }

    #[test]
    fn setzpause_auch_ohne_satzzeichen() {
        let opts = optionen(",", 7);
        let ergebnis = autopause_anwenden(&opts, nur_text("abc"));
        assert_eq!(ergebnis.len(), 2);
        assert_eq!(ergebnis[0].text, "abc");
        assert_eq!(ergebnis[1], Segment::pause(7));
    }

    #[test]
    fn abschnitte_erben_stil_und_meta() {
        let stil = TextStyle {
            bold: true,
            ..TextStyle::default()
        };
        let mut segment = Segment::text("a,b", stil.clone());
        segment.klassen = Some(vec!["echo-text-x".into()]);

        let opts = optionen(",", 5);
        let ergebnis = autopause_anwenden(&opts, vec![segment]);

        for abschnitt in ergebnis.iter().filter(|s| s.hat_text()) {
            assert_eq!(abschnitt.style, Some(stil.clone()));
            assert_eq!(abschnitt.klassen, Some(vec!["echo-text-x".to_string()]));
        }
    }

    #[test]
    fn pausen_segmente_passieren_unveraendert() {
        let opts = optionen(",", 5);
        let ergebnis = autopause_anwenden(&opts, vec![Segment::pause(3)]);
        assert_eq!(ergebnis[0], Segment::pause(3));
        // Plus Setzpause am Ende
        assert_eq!(ergebnis[1], Segment::pause(5));
    }
}
