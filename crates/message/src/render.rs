//! Payload-Renderer – finale Segmentfolge in den Wire-Umschlag
//!
//! Baut den `message_data`-Umschlag mit dem aufgeloesten Anzeigenamen und
//! der geordneten Segmentfolge. UTF-8 bleibt unverschluesselt; Feld-Praesenz
//! folgt dem Segment-Datenmodell.

use echocast_core::Result;
use echocast_protocol::{MessageData, Segment};

use crate::options::KompositionsOptionen;

/// Loest den Anzeigenamen auf, optional in 【】-Klammern
///
/// Ein bereits eingeklammerter Name wird nicht doppelt eingefasst;
/// ein leerer Name ergibt `【】`.
pub fn benutzername_formatieren(optionen: &KompositionsOptionen) -> String {
    let benutzername = optionen.benutzername.clone();
    if !optionen.benutzername_klammern {
        return benutzername;
    }

    let innen = benutzername.trim();
    if innen.starts_with('【') && innen.ends_with('】') && innen.chars().count() >= 2 {
        return innen.to_string();
    }
    if innen.is_empty() {
        return "【】".to_string();
    }
    format!("【{innen}】")
}

/// Serialisiert die finale Segmentfolge als `message_data`-Payload
pub fn payload_rendern(optionen: &KompositionsOptionen, segmente: &[Segment]) -> Result<String> {
    let data = MessageData::einzeln(benutzername_formatieren(optionen), segmente.to_vec());
    data.als_envelope()?.zu_json()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use echocast_protocol::TextStyle;

    fn optionen(benutzername: &str, klammern: bool) -> KompositionsOptionen {
        KompositionsOptionen {
            benutzername: benutzername.into(),
            benutzername_klammern: klammern,
            ..KompositionsOptionen::default()
        }
    }

    #[test]
    fn name_ohne_klammern_bleibt_roh() {
        assert_eq!(benutzername_formatieren(&optionen("Someone", false)), "Someone");
    }

    #[test]
    fn name_wird_eingeklammert() {
        assert_eq!(benutzername_formatieren(&optionen("Someone", true)), "【Someone】");
    }

    #[test]
    fn eingeklammerter_name_nicht_doppelt() {
        assert_eq!(benutzername_formatieren(&optionen("【Someone】", true)), "【Someone】");
    }

    #[test]
    fn leerer_name_ergibt_leere_klammern() {
        assert_eq!(benutzername_formatieren(&optionen("", true)), "【】");
        assert_eq!(benutzername_formatieren(&optionen("   ", true)), "【】");
    }

    #[test]
    fn payload_traegt_segmentfolge() {
        let opts = optionen("Someone", true);
        let segmente = vec![Segment::text("hi", TextStyle::default())];
        let payload = payload_rendern(&opts, &segmente).unwrap();

        let wert: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(wert["action"], "message_data");
        assert_eq!(wert["data"]["username"], "【Someone】");
        assert_eq!(wert["data"]["messages"][0]["message"][0]["text"], "hi");
    }
}
