//! Pinyin-Silbe → Zhuyin (Bopomofo)
//!
//! Zerlegt eine tonlose Pinyin-Silbe in Anlaut und Auslaut und bildet beide
//! auf die phonetischen Symbole ab. Ganzsilben (yi, wu, zhi, ...) werden
//! vorab behandelt, die y-/w-Schreibungen auf ihre i-/u-Auslaute
//! zurueckgefuehrt. Unbekannte Silben bleiben unveraendert – die Umschrift
//! darf niemals fehlschlagen.

/// Ganzsilben die sich nicht regulaer in Anlaut + Auslaut zerlegen lassen
fn ganzsilbe(silbe: &str) -> Option<&'static str> {
    Some(match silbe {
        "zhi" => "ㄓ",
        "chi" => "ㄔ",
        "shi" => "ㄕ",
        "ri" => "ㄖ",
        "zi" => "ㄗ",
        "ci" => "ㄘ",
        "si" => "ㄙ",
        "yi" => "ㄧ",
        "wu" => "ㄨ",
        "yu" => "ㄩ",
        "ye" => "ㄧㄝ",
        "yue" => "ㄩㄝ",
        "yuan" => "ㄩㄢ",
        "yin" => "ㄧㄣ",
        "yun" => "ㄩㄣ",
        "ying" => "ㄧㄥ",
        "er" => "ㄦ",
        _ => return None,
    })
}

/// Anlaut-Symbol
fn anlaut_zu_zhuyin(anlaut: &str) -> &'static str {
    match anlaut {
        "b" => "ㄅ",
        "p" => "ㄆ",
        "m" => "ㄇ",
        "f" => "ㄈ",
        "d" => "ㄉ",
        "t" => "ㄊ",
        "n" => "ㄋ",
        "l" => "ㄌ",
        "g" => "ㄍ",
        "k" => "ㄎ",
        "h" => "ㄏ",
        "j" => "ㄐ",
        "q" => "ㄑ",
        "x" => "ㄒ",
        "zh" => "ㄓ",
        "ch" => "ㄔ",
        "sh" => "ㄕ",
        "r" => "ㄖ",
        "z" => "ㄗ",
        "c" => "ㄘ",
        "s" => "ㄙ",
        _ => "",
    }
}

/// Auslaut-Symbol(e); `v` steht fuer ü
fn auslaut_zu_zhuyin(auslaut: &str) -> Option<&'static str> {
    Some(match auslaut {
        "a" => "ㄚ",
        "o" => "ㄛ",
        "e" => "ㄜ",
        "i" => "ㄧ",
        "u" => "ㄨ",
        "v" => "ㄩ",
        "ai" => "ㄞ",
        "ei" => "ㄟ",
        "ao" => "ㄠ",
        "ou" => "ㄡ",
        "an" => "ㄢ",
        "en" => "ㄣ",
        "ang" => "ㄤ",
        "eng" => "ㄥ",
        "ong" => "ㄨㄥ",
        "er" => "ㄦ",
        "ia" => "ㄧㄚ",
        "ie" => "ㄧㄝ",
        "iao" => "ㄧㄠ",
        "iu" | "iou" => "ㄧㄡ",
        "ian" => "ㄧㄢ",
        "in" => "ㄧㄣ",
        "iang" => "ㄧㄤ",
        "ing" => "ㄧㄥ",
        "iong" => "ㄩㄥ",
        "ua" => "ㄨㄚ",
        "uo" => "ㄨㄛ",
        "uai" => "ㄨㄞ",
        "ui" | "uei" => "ㄨㄟ",
        "uan" => "ㄨㄢ",
        "un" | "uen" => "ㄨㄣ",
        "uang" => "ㄨㄤ",
        "ueng" => "ㄨㄥ",
        "ve" | "ue" => "ㄩㄝ",
        "van" => "ㄩㄢ",
        "vn" => "ㄩㄣ",
        _ => return None,
    })
}

/// Trennt den Anlaut ab (zh/ch/sh vor Einzelkonsonanten)
fn anlaut_trennen(silbe: &str) -> (Option<&str>, &str) {
    for zweifach in ["zh", "ch", "sh"] {
        if let Some(rest) = silbe.strip_prefix(zweifach) {
            return (Some(zweifach), rest);
        }
    }
    let erster = match silbe.chars().next() {
        Some(c) => c,
        None => return (None, silbe),
    };
    if "bpmfdtnlgkhjqxrzcs".contains(erster) {
        return (Some(&silbe[..1]), &silbe[1..]);
    }
    (None, silbe)
}

/// Bildet eine tonlose Pinyin-Silbe auf Zhuyin ab
///
/// Unbekannte Eingaben werden unveraendert zurueckgegeben.
pub(crate) fn silbe_zu_zhuyin(silbe: &str) -> String {
    let normalisiert = silbe.to_lowercase().replace('ü', "v");

    if let Some(zhuyin) = ganzsilbe(&normalisiert) {
        return zhuyin.to_string();
    }

    // y-/w-Schreibungen auf ihre Auslaute zurueckfuehren
    let umgeschrieben;
    let kern: &str = if let Some(rest) = normalisiert.strip_prefix('y') {
        umgeschrieben = if let Some(ue_rest) = rest.strip_prefix('u') {
            format!("v{ue_rest}")
        } else if rest.starts_with('i') {
            rest.to_string()
        } else {
            format!("i{rest}")
        };
        &umgeschrieben
    } else if let Some(rest) = normalisiert.strip_prefix('w') {
        umgeschrieben = if rest.starts_with('u') {
            rest.to_string()
        } else {
            format!("u{rest}")
        };
        &umgeschrieben
    } else {
        &normalisiert
    };

    let (anlaut, mut auslaut) = anlaut_trennen(kern);

    // Nach j/q/x steht geschriebenes u fuer ü
    let ue_form;
    if matches!(anlaut, Some("j") | Some("q") | Some("x")) && auslaut.starts_with('u') {
        ue_form = format!("v{}", &auslaut[1..]);
        auslaut = &ue_form;
    }

    let mut ergebnis = String::new();
    if let Some(a) = anlaut {
        ergebnis.push_str(anlaut_zu_zhuyin(a));
    }
    if auslaut.is_empty() {
        return ergebnis;
    }
    match auslaut_zu_zhuyin(auslaut) {
        Some(z) => ergebnis.push_str(z),
        None => return silbe.to_string(),
    }

    ergebnis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn einfache_silben() {
        assert_eq!(silbe_zu_zhuyin("ma"), "ㄇㄚ");
        assert_eq!(silbe_zu_zhuyin("hao"), "ㄏㄠ");
        assert_eq!(silbe_zu_zhuyin("ni"), "ㄋㄧ");
    }

    #[test]
    fn zweifach_anlaute() {
        assert_eq!(silbe_zu_zhuyin("zhong"), "ㄓㄨㄥ");
        assert_eq!(silbe_zu_zhuyin("shang"), "ㄕㄤ");
        assert_eq!(silbe_zu_zhuyin("chi"), "ㄔ");
    }

    #[test]
    fn ue_nach_jqx() {
        assert_eq!(silbe_zu_zhuyin("xue"), "ㄒㄩㄝ");
        assert_eq!(silbe_zu_zhuyin("ju"), "ㄐㄩ");
        assert_eq!(silbe_zu_zhuyin("quan"), "ㄑㄩㄢ");
    }

    #[test]
    fn y_und_w_schreibungen() {
        assert_eq!(silbe_zu_zhuyin("yao"), "ㄧㄠ");
        assert_eq!(silbe_zu_zhuyin("wen"), "ㄨㄣ");
        assert_eq!(silbe_zu_zhuyin("wang"), "ㄨㄤ");
        assert_eq!(silbe_zu_zhuyin("you"), "ㄧㄡ");
    }

    #[test]
    fn ganzsilben() {
        assert_eq!(silbe_zu_zhuyin("zhi"), "ㄓ");
        assert_eq!(silbe_zu_zhuyin("yi"), "ㄧ");
        assert_eq!(silbe_zu_zhuyin("er"), "ㄦ");
    }

    #[test]
    fn unbekanntes_bleibt_unveraendert() {
        assert_eq!(silbe_zu_zhuyin("xyz"), "xyz");
        assert_eq!(silbe_zu_zhuyin("?"), "?");
    }
}
