//! Konsolen-Schnittstelle – Kommandos und Nachrichteneingabe
//!
//! Liest Zeilen von stdin: Zeilen mit Kommando-Praefix sind Kommandos,
//! ein verdoppeltes Praefix schaltet auf eine woertliche Nachricht um,
//! alles andere wird dekoriert, komponiert und als Event eingereiht.
//! Kommandos die Einstellungen aendern schreiben die Konfiguration sofort
//! zurueck.

use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;

use echocast_message::{decorate, komponieren};
use echocast_protocol::wire::{self, Envelope};
use echocast_session::SessionState;

use crate::config::ServerConfig;

// ---------------------------------------------------------------------------
// Kommando-Katalog
// ---------------------------------------------------------------------------

/// Alle Konsolen-Kommandos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kommando {
    Umbenennen,
    Beenden,
    Geschwindigkeit,
    Typewriting,
    Schema,
    Autopause,
    Anfuehrungszeichen,
    Suffix,
    Klammern,
    NamensKlammern,
    Ueberspringen,
    Quelle,
    Webui,
    Hilfe,
}

/// Beschreibung eines Konsolen-Kommandos
pub struct KommandoSpec {
    pub kommando: Kommando,
    pub name: &'static str,
    pub aliase: &'static [&'static str],
    pub min_args: usize,
    /// None = beliebig viele Argumente
    pub max_args: Option<usize>,
    pub beschreibung: &'static str,
}

/// Der vollstaendige Kommando-Katalog
pub const KATALOG: &[KommandoSpec] = &[
    KommandoSpec {
        kommando: Kommando::Umbenennen,
        name: "rename",
        aliase: &["name", "nick"],
        min_args: 1,
        max_args: Some(1),
        beschreibung: "Anzeigenamen aendern",
    },
    KommandoSpec {
        kommando: Kommando::Beenden,
        name: "quit",
        aliase: &["exit", "stop"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Server beenden",
    },
    KommandoSpec {
        kommando: Kommando::Geschwindigkeit,
        name: "speed",
        aliase: &["ps", "printspeed"],
        min_args: 1,
        max_args: Some(1),
        beschreibung: "Druckgeschwindigkeit in ms setzen",
    },
    KommandoSpec {
        kommando: Kommando::Typewriting,
        name: "typewrite",
        aliase: &["tw"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Typewriting umschalten",
    },
    KommandoSpec {
        kommando: Kommando::Schema,
        name: "scheme",
        aliase: &["tws"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Umschrift-Schema wechseln (pinyin/zhuyin)",
    },
    KommandoSpec {
        kommando: Kommando::Autopause,
        name: "autopause",
        aliase: &["ap"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Autopause umschalten",
    },
    KommandoSpec {
        kommando: Kommando::Anfuehrungszeichen,
        name: "quotes",
        aliase: &["qu"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Auto-Anfuehrungszeichen umschalten",
    },
    KommandoSpec {
        kommando: Kommando::Suffix,
        name: "suffix",
        aliase: &["sf"],
        min_args: 0,
        max_args: None,
        beschreibung: "Auto-Suffix umschalten (on/off) oder Wert setzen",
    },
    KommandoSpec {
        kommando: Kommando::Klammern,
        name: "parens",
        aliase: &["pa"],
        min_args: 0,
        max_args: Some(1),
        beschreibung: "Auto-Klammern schalten (on/off/once)",
    },
    KommandoSpec {
        kommando: Kommando::NamensKlammern,
        name: "brackets",
        aliase: &["br"],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Namens-Klammern umschalten",
    },
    KommandoSpec {
        kommando: Kommando::Ueberspringen,
        name: "skip",
        aliase: &[],
        min_args: 0,
        max_args: Some(0),
        beschreibung: "Aktuelle Nachricht ueberspringen (echo_next)",
    },
    KommandoSpec {
        kommando: Kommando::Quelle,
        name: "source",
        aliase: &["run"],
        min_args: 1,
        max_args: Some(1),
        beschreibung: "Kommandos aus Datei ausfuehren",
    },
    KommandoSpec {
        kommando: Kommando::Webui,
        name: "webui",
        aliase: &[],
        min_args: 0,
        max_args: Some(1),
        beschreibung: "WebUI schalten (wirkt nach Neustart)",
    },
    KommandoSpec {
        kommando: Kommando::Hilfe,
        name: "help",
        aliase: &["h", "?"],
        min_args: 0,
        max_args: Some(1),
        beschreibung: "Kommandos anzeigen",
    },
];

/// Sucht ein Kommando ueber Name oder Alias
pub fn kommando_suchen(token: &str) -> Option<&'static KommandoSpec> {
    KATALOG.iter().find(|spec| {
        spec.name.eq_ignore_ascii_case(token)
            || spec.aliase.iter().any(|alias| alias.eq_ignore_ascii_case(token))
    })
}

/// Woertliche Nachricht aus einer Zeile mit verdoppeltem Praefix
///
/// `//text` wird zu `/text`, `///text` zu `//text` usw.
fn literal_nachricht(zeile: &str, praefix: &str) -> Option<String> {
    if praefix.is_empty() {
        return None;
    }
    let doppelt = format!("{praefix}{praefix}");
    if !zeile.starts_with(&doppelt) {
        return None;
    }

    let mut wiederholungen = 0;
    let mut index = 0;
    while zeile[index..].starts_with(praefix) {
        wiederholungen += 1;
        index += praefix.len();
    }
    Some(format!(
        "{}{}",
        praefix.repeat(wiederholungen - 1),
        &zeile[index..]
    ))
}

// ---------------------------------------------------------------------------
// Konsole
// ---------------------------------------------------------------------------

/// Konsolen-Zustand: Konfiguration, Event-Log-Zugriff, Einmal-Flags
pub struct Konsole {
    config: ServerConfig,
    config_pfad: String,
    state: Arc<SessionState>,
    /// Vom `/parens once`-Kommando gesetzt, gilt fuer die naechste Nachricht
    klammern_einmalig: bool,
}

impl Konsole {
    /// Erstellt eine neue Konsole
    pub fn neu(config: ServerConfig, config_pfad: String, state: Arc<SessionState>) -> Self {
        Self {
            config,
            config_pfad,
            state,
            klammern_einmalig: false,
        }
    }

    /// Liest stdin-Zeilen bis zum Quit-Kommando oder Shutdown-Signal
    pub async fn eingabe_schleife(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut zeilen = tokio::io::BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                zeile = zeilen.next_line() => {
                    match zeile {
                        Ok(Some(zeile)) => {
                            if !self.zeile_verarbeiten(zeile.trim()) {
                                break;
                            }
                        }
                        Ok(None) => {
                            tracing::info!("Eingabe-Ende (EOF) – Konsole beendet");
                            break;
                        }
                        Err(e) => {
                            tracing::error!(fehler = %e, "Konsolen-Eingabe fehlgeschlagen");
                            break;
                        }
                    }
                }
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    }

    /// Verarbeitet eine Eingabezeile; `false` beendet die Konsole
    pub fn zeile_verarbeiten(&mut self, zeile: &str) -> bool {
        let praefix = self.config.server.command_prefix.clone();

        if zeile.is_empty() {
            tracing::warn!("Leere Eingabe – erst tippen, dann Enter");
            return true;
        }

        if let Some(literal) = literal_nachricht(zeile, &praefix) {
            self.nachricht_senden(&literal);
            return true;
        }
        if !zeile.starts_with(&praefix) {
            self.nachricht_senden(zeile);
            return true;
        }

        let mut teile = zeile.split_whitespace();
        let erster = teile.next().unwrap_or("");
        let aktion = erster[praefix.len()..].to_lowercase();
        let args: Vec<&str> = teile.collect();

        let Some(spec) = kommando_suchen(&aktion) else {
            tracing::warn!(
                kommando = %aktion,
                hilfe = %format!("{praefix}help"),
                "Unbekanntes Kommando"
            );
            return true;
        };

        if args.len() < spec.min_args {
            tracing::warn!(
                kommando = %spec.name,
                erwartet = spec.min_args,
                "Zu wenige Argumente"
            );
            return true;
        }
        if let Some(max) = spec.max_args {
            if args.len() > max {
                tracing::warn!(kommando = %spec.name, maximal = max, "Zu viele Argumente");
                return true;
            }
        }

        self.kommando_ausfuehren(spec, &args)
    }

    /// Fuehrt ein nachgeschlagenes Kommando aus
    fn kommando_ausfuehren(&mut self, spec: &KommandoSpec, args: &[&str]) -> bool {
        match spec.kommando {
            Kommando::Umbenennen => {
                self.config.nachricht.benutzername = args[0].to_string();
                self.persistieren();
                tracing::info!(name = %args[0], "Anzeigename geaendert");
            }
            Kommando::Beenden => {
                tracing::info!("Bis bald!");
                return false;
            }
            Kommando::Geschwindigkeit => {
                match args[0].parse::<u32>() {
                    Ok(wert) if wert > 0 => {
                        self.config.nachricht.druckgeschwindigkeit = wert;
                        self.persistieren();
                        tracing::info!(ms = wert, "Druckgeschwindigkeit gesetzt");
                    }
                    _ => tracing::warn!("Druckgeschwindigkeit braucht eine positive Ganzzahl in ms"),
                }
            }
            Kommando::Typewriting => {
                self.config.nachricht.typewriting = !self.config.nachricht.typewriting;
                self.persistieren();
                tracing::info!(aktiv = self.config.nachricht.typewriting, "Typewriting umgeschaltet");
            }
            Kommando::Schema => {
                let neues = self.config.nachricht.typewriting_schema.umschalten();
                self.config.nachricht.typewriting_schema = neues;
                self.persistieren();
                tracing::info!(schema = %neues, "Umschrift-Schema gewechselt");
            }
            Kommando::Autopause => {
                self.config.nachricht.autopause = !self.config.nachricht.autopause;
                self.persistieren();
                tracing::info!(aktiv = self.config.nachricht.autopause, "Autopause umgeschaltet");
            }
            Kommando::Anfuehrungszeichen => {
                self.config.nachricht.auto_quotes = !self.config.nachricht.auto_quotes;
                self.persistieren();
                tracing::info!(aktiv = self.config.nachricht.auto_quotes, "Auto-Anfuehrungszeichen umgeschaltet");
            }
            Kommando::Suffix => self.suffix_kommando(args),
            Kommando::Klammern => self.klammern_kommando(args),
            Kommando::NamensKlammern => {
                self.config.nachricht.benutzername_klammern =
                    !self.config.nachricht.benutzername_klammern;
                self.persistieren();
                tracing::info!(
                    aktiv = self.config.nachricht.benutzername_klammern,
                    "Namens-Klammern umgeschaltet"
                );
            }
            Kommando::Ueberspringen => self.echo_next_einreihen(),
            Kommando::Quelle => return self.quelle_ausfuehren(args[0]),
            Kommando::Webui => self.webui_kommando(args),
            Kommando::Hilfe => self.hilfe_anzeigen(args),
        }
        true
    }

    /// `/suffix` – Schalter oder Wert
    fn suffix_kommando(&mut self, args: &[&str]) {
        if args.is_empty() {
            self.config.nachricht.auto_suffix = !self.config.nachricht.auto_suffix;
            self.persistieren();
            tracing::info!(aktiv = self.config.nachricht.auto_suffix, "Auto-Suffix umgeschaltet");
            return;
        }

        let wert = args.join(" ");
        match wert.to_lowercase().as_str() {
            "on" => {
                self.config.nachricht.auto_suffix = true;
                self.persistieren();
                tracing::info!("Auto-Suffix eingeschaltet");
            }
            "off" => {
                self.config.nachricht.auto_suffix = false;
                self.persistieren();
                tracing::info!("Auto-Suffix ausgeschaltet");
            }
            _ => {
                self.config.nachricht.auto_suffix_wert = wert.clone();
                self.persistieren();
                tracing::info!(suffix = %wert, "Auto-Suffix gesetzt");
            }
        }
    }

    /// `/parens` – Schalter oder Einmal-Flag
    fn klammern_kommando(&mut self, args: &[&str]) {
        let Some(option) = args.first() else {
            self.config.nachricht.auto_parentheses = !self.config.nachricht.auto_parentheses;
            self.persistieren();
            tracing::info!(aktiv = self.config.nachricht.auto_parentheses, "Auto-Klammern umgeschaltet");
            return;
        };

        match option.to_lowercase().as_str() {
            "once" | "one" | "next" => {
                self.klammern_einmalig = true;
                tracing::info!("Naechste Nachricht bekommt Klammern");
            }
            "on" => {
                self.config.nachricht.auto_parentheses = true;
                self.persistieren();
                tracing::info!("Auto-Klammern eingeschaltet");
            }
            "off" => {
                self.config.nachricht.auto_parentheses = false;
                self.persistieren();
                tracing::info!("Auto-Klammern ausgeschaltet");
            }
            _ => tracing::warn!("Ungueltige Option – erlaubt sind on/off/once"),
        }
    }

    /// `/webui` – Schalter, wirkt erst nach Neustart
    fn webui_kommando(&mut self, args: &[&str]) {
        let neu = match args.first().map(|o| o.to_lowercase()) {
            None => !self.config.webui.aktiviert,
            Some(option) if option == "on" => true,
            Some(option) if option == "off" => false,
            Some(_) => {
                tracing::warn!("Ungueltige Option – erlaubt sind on/off");
                return;
            }
        };
        self.config.webui.aktiviert = neu;
        self.persistieren();
        tracing::info!(aktiv = neu, "WebUI umgeschaltet – wirkt nach Neustart");
    }

    /// `/skip` – echo_next an alle Anzeige-Clients
    fn echo_next_einreihen(&self) {
        match Envelope::neu(wire::AKTION_ECHO_NEXT, serde_json::json!({})).zu_json() {
            Ok(payload) => {
                self.state.ereignis_einreihen(
                    payload,
                    None,
                    Some(wire::AKTION_ECHO_NEXT.to_string()),
                    Some("echo_next ausgeloest".into()),
                );
                tracing::info!("echo_next eingereiht");
            }
            Err(e) => tracing::error!(fehler = %e, "echo_next nicht serialisierbar"),
        }
    }

    /// `/source` – Kommandos zeilenweise aus einer Datei
    fn quelle_ausfuehren(&mut self, pfad: &str) -> bool {
        let inhalt = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => inhalt,
            Err(e) => {
                tracing::error!(pfad = %pfad, fehler = %e, "Quelldatei nicht lesbar");
                return true;
            }
        };

        tracing::info!(pfad = %pfad, "Fuehre Kommandos aus Datei aus");
        for zeile in inhalt.lines() {
            let zeile = zeile.trim();
            if zeile.is_empty() || zeile.starts_with('#') {
                continue;
            }
            tracing::info!(zeile = %zeile, "(automatisch)");
            if !self.zeile_verarbeiten(zeile) {
                return false;
            }
        }
        true
    }

    /// `/help` – Katalog oder Detail eines Kommandos
    fn hilfe_anzeigen(&self, args: &[&str]) {
        let praefix = &self.config.server.command_prefix;

        if let Some(gesucht) = args.first() {
            match kommando_suchen(&gesucht.to_lowercase()) {
                Some(spec) => self.kommando_details(spec),
                None => tracing::warn!(kommando = %gesucht, "Kommando nicht gefunden"),
            }
            return;
        }

        for spec in KATALOG {
            let aliase = if spec.aliase.is_empty() {
                String::from("-")
            } else {
                spec.aliase
                    .iter()
                    .map(|alias| format!("{praefix}{alias}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let status = self
                .kommando_status(spec.kommando)
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            tracing::info!(
                "{praefix}{} ({aliase}) – {}{status}",
                spec.name,
                spec.beschreibung
            );
        }
    }

    /// Detailzeilen eines einzelnen Kommandos
    fn kommando_details(&self, spec: &KommandoSpec) {
        let praefix = &self.config.server.command_prefix;
        let argumente = match (spec.min_args, spec.max_args) {
            (0, Some(0)) => "keine".to_string(),
            (min, None) => format!(">={min}"),
            (min, Some(max)) if min == max => format!("{min}"),
            (min, Some(max)) => format!("{min}-{max}"),
        };
        tracing::info!("{praefix}{} – {}", spec.name, spec.beschreibung);
        tracing::info!(argumente = %argumente, "Argumente");
        if let Some(status) = self.kommando_status(spec.kommando) {
            tracing::info!(wert = %status, "Aktueller Wert");
        }
    }

    /// Aktueller Einstellungswert eines Kommandos, falls vorhanden
    fn kommando_status(&self, kommando: Kommando) -> Option<String> {
        let nachricht = &self.config.nachricht;
        let an_aus = |wert: bool| if wert { "an" } else { "aus" }.to_string();
        match kommando {
            Kommando::Umbenennen => Some(nachricht.benutzername.clone()),
            Kommando::Geschwindigkeit => Some(format!("{} ms", nachricht.druckgeschwindigkeit)),
            Kommando::Typewriting => Some(an_aus(nachricht.typewriting)),
            Kommando::Schema => Some(nachricht.typewriting_schema.to_string()),
            Kommando::Autopause => Some(an_aus(nachricht.autopause)),
            Kommando::Anfuehrungszeichen => Some(an_aus(nachricht.auto_quotes)),
            Kommando::Suffix => Some(format!(
                "{} ({})",
                an_aus(nachricht.auto_suffix),
                nachricht.auto_suffix_wert
            )),
            Kommando::Klammern => Some(an_aus(nachricht.auto_parentheses)),
            Kommando::NamensKlammern => Some(an_aus(nachricht.benutzername_klammern)),
            Kommando::Webui => Some(an_aus(self.config.webui.aktiviert)),
            _ => None,
        }
    }

    /// Dekoriert, komponiert und reiht eine Textnachricht ein
    fn nachricht_senden(&mut self, text: &str) {
        let optionen = &self.config.nachricht;
        let mit_suffix = decorate::suffix_anwenden(optionen, text);
        let dekoriert = decorate::text_dekorieren(optionen, &mit_suffix, self.klammern_einmalig);
        self.klammern_einmalig = false;

        tracing::info!(nachricht = %dekoriert, "Textnachricht wird gesendet");
        match komponieren(optionen, &dekoriert) {
            Ok(komposition) => {
                self.state.ereignis_einreihen(
                    komposition.payload,
                    Some(komposition.verzoegerung_ms),
                    Some(wire::AKTION_MESSAGE_DATA.to_string()),
                    Some("Textnachricht senden".into()),
                );
            }
            Err(e) => tracing::error!(fehler = %e, "Nachricht konnte nicht komponiert werden"),
        }
    }

    /// Schreibt die Konfiguration zurueck; Fehler sind nicht fatal
    fn persistieren(&self) {
        if let Err(e) = self.config.speichern(&self.config_pfad) {
            tracing::error!(fehler = %e, "Konfiguration nicht gespeichert");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_konsole() -> (Konsole, Arc<SessionState>, tempfile::TempDir) {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis
            .path()
            .join("config.toml")
            .to_str()
            .unwrap()
            .to_string();
        let state = SessionState::neu(64);
        let mut config = ServerConfig::default();
        // Dekoration fuer vorhersagbare Payloads abschalten
        config.nachricht.auto_quotes = false;
        config.nachricht.typewriting = false;
        let konsole = Konsole::neu(config, pfad, Arc::clone(&state));
        (konsole, state, verzeichnis)
    }

    #[test]
    fn doppeltes_praefix_ergibt_woertliche_nachricht() {
        assert_eq!(literal_nachricht("//hallo", "/"), Some("/hallo".into()));
        assert_eq!(literal_nachricht("///hallo", "/"), Some("//hallo".into()));
        assert_eq!(literal_nachricht("/hallo", "/"), None);
        assert_eq!(literal_nachricht("hallo", "/"), None);
    }

    #[test]
    fn nachricht_wird_eingereiht() {
        let (mut konsole, state, _verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("hallo welt"));
        assert_eq!(state.ereignisse.laenge(), 1);

        let (event, _) = state.ereignisse.naechstes(0).unwrap();
        assert_eq!(event.label.as_deref(), Some("message_data"));
        assert!(event.verzoegerung_ms.is_some());
        assert!(event.payload.contains("hallo welt"));
    }

    #[test]
    fn quit_beendet_die_konsole() {
        let (mut konsole, _, _verzeichnis) = test_konsole();
        assert!(!konsole.zeile_verarbeiten("/quit"));
        assert!(!konsole.zeile_verarbeiten("/exit"));
    }

    #[test]
    fn unbekanntes_kommando_wird_toleriert() {
        let (mut konsole, state, _verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("/gibtsnicht"));
        assert_eq!(state.ereignisse.laenge(), 0);
    }

    #[test]
    fn typewriting_umschalten_persistiert() {
        let (mut konsole, _, verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("/tw"));
        assert!(konsole.config.nachricht.typewriting);

        let geladen =
            ServerConfig::laden(verzeichnis.path().join("config.toml").to_str().unwrap()).unwrap();
        assert!(geladen.nachricht.typewriting);
    }

    #[test]
    fn geschwindigkeit_braucht_positive_zahl() {
        let (mut konsole, _, _verzeichnis) = test_konsole();
        let vorher = konsole.config.nachricht.druckgeschwindigkeit;
        assert!(konsole.zeile_verarbeiten("/speed quatsch"));
        assert!(konsole.zeile_verarbeiten("/speed 0"));
        assert_eq!(konsole.config.nachricht.druckgeschwindigkeit, vorher);

        assert!(konsole.zeile_verarbeiten("/speed 25"));
        assert_eq!(konsole.config.nachricht.druckgeschwindigkeit, 25);
    }

    #[test]
    fn klammern_einmal_gilt_fuer_eine_nachricht() {
        let (mut konsole, state, _verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("/parens once"));
        assert!(konsole.zeile_verarbeiten("erste"));
        assert!(konsole.zeile_verarbeiten("zweite"));

        let (erste, cursor) = state.ereignisse.naechstes(0).unwrap();
        let (zweite, _) = state.ereignisse.naechstes(cursor).unwrap();
        assert!(erste.payload.contains("(erste)"));
        assert!(!zweite.payload.contains("(zweite)"));
    }

    #[test]
    fn skip_reiht_echo_next_ein() {
        let (mut konsole, state, _verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("/skip"));

        let (event, _) = state.ereignisse.naechstes(0).unwrap();
        assert_eq!(event.label.as_deref(), Some("echo_next"));
        assert!(event.verzoegerung_ms.is_none());
    }

    #[test]
    fn zu_wenige_argumente_werden_abgefangen() {
        let (mut konsole, _, _verzeichnis) = test_konsole();
        let vorher = konsole.config.nachricht.benutzername.clone();
        assert!(konsole.zeile_verarbeiten("/rename"));
        assert_eq!(konsole.config.nachricht.benutzername, vorher);

        assert!(konsole.zeile_verarbeiten("/rename Erzaehler"));
        assert_eq!(konsole.config.nachricht.benutzername, "Erzaehler");
    }

    #[test]
    fn suffix_kommando_schaltet_und_setzt() {
        let (mut konsole, _, _verzeichnis) = test_konsole();
        assert!(konsole.zeile_verarbeiten("/suffix"));
        assert!(konsole.config.nachricht.auto_suffix);
        assert!(konsole.zeile_verarbeiten("/suffix off"));
        assert!(!konsole.config.nachricht.auto_suffix);
        assert!(konsole.zeile_verarbeiten("/suffix ~"));
        assert_eq!(konsole.config.nachricht.auto_suffix_wert, "~");
    }
}
