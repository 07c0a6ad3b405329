//! Speicher-Endpunkt – schreibt WebUI-Konfigurationsdateien
//!
//! Nimmt `{name, root, data}` entgegen und schreibt `data` als JSON nach
//! `root/name`. Pfadtrenner und Elternverzeichnis-Segmente im Namen werden
//! abgelehnt, ebenso jeder aufgeloeste Pfad ausserhalb der Wurzel – ein
//! Traversal-Versuch fuehrt niemals zu einem Schreibzugriff.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use crate::routes::AppZustand;

/// Prueft den Dateinamen auf Traversal-Bausteine
pub fn name_pruefen(name: &str) -> Result<(), &'static str> {
    if name.contains('/') || name.contains('\\') {
        return Err("Speichern fehlgeschlagen: Dateiname enthaelt Pfadtrenner");
    }
    if name.contains("..") {
        return Err("Speichern fehlgeschlagen: Dateiname enthaelt Elternverzeichnis");
    }
    Ok(())
}

/// Fehler-Antwort im Format `{"error": ...}`
fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "error": nachricht }))).into_response()
}

/// POST-Handler des Speicher-Endpunkts
pub async fn speichern_handler(
    State(_app): State<AppZustand>,
    Json(anfrage): Json<Value>,
) -> Response {
    let name = anfrage.get("name").and_then(Value::as_str).unwrap_or("");
    let root = anfrage.get("root").and_then(Value::as_str).unwrap_or("");
    let Some(data) = anfrage.get("data").filter(|d| !d.is_null()) else {
        return fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Speichern fehlgeschlagen: Pflichtfelder fehlen",
        );
    };
    if name.is_empty() || root.is_empty() {
        return fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Speichern fehlgeschlagen: Pflichtfelder fehlen",
        );
    }

    if let Err(grund) = name_pruefen(name) {
        tracing::warn!(name = %name, "Traversal-Versuch abgewehrt");
        return fehler_antwort(StatusCode::BAD_REQUEST, grund);
    }

    if let Err(e) = tokio::fs::create_dir_all(root).await {
        tracing::error!(root = %root, fehler = %e, "Wurzelverzeichnis nicht anlegbar");
        return fehler_antwort(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Speichern fehlgeschlagen: Wurzelverzeichnis nicht anlegbar",
        );
    }
    let wurzel = match tokio::fs::canonicalize(root).await {
        Ok(wurzel) => wurzel,
        Err(e) => {
            tracing::error!(root = %root, fehler = %e, "Wurzelverzeichnis nicht aufloesbar");
            return fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Speichern fehlgeschlagen: Wurzelverzeichnis nicht aufloesbar",
            );
        }
    };

    let ziel = wurzel.join(name);
    if !ziel.starts_with(&wurzel) {
        tracing::warn!(ziel = %ziel.display(), "Pfad ausserhalb der Wurzel abgewehrt");
        return fehler_antwort(
            StatusCode::BAD_REQUEST,
            "Speichern fehlgeschlagen: Ungueltiger Dateipfad",
        );
    }

    let inhalt = match serde_json::to_string_pretty(data) {
        Ok(inhalt) => inhalt,
        Err(e) => {
            tracing::error!(fehler = %e, "Konfigurationsdaten nicht serialisierbar");
            return fehler_antwort(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Speichern fehlgeschlagen: Daten nicht serialisierbar",
            );
        }
    };
    if let Err(e) = tokio::fs::write(&ziel, inhalt).await {
        tracing::error!(ziel = %ziel.display(), fehler = %e, "Schreiben fehlgeschlagen");
        return fehler_antwort(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Speichern fehlgeschlagen: Datei nicht schreibbar",
        );
    }

    tracing::info!(ziel = %ziel.display(), "Konfigurationsdatei gespeichert");
    Json(json!({
        "success": true,
        "message": "Konfigurationsdatei gespeichert",
        "path": ziel.display().to_string(),
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
