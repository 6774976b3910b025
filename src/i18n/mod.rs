//! Internationalization (i18n) module.
//!
//! Provides localized strings for CLI output and for the display forms the
//! parser produces (hop dates, delay units). English is the default
//! language; Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `LANG` / `LC_MESSAGES` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("MAILTRACE_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(
    app_about,
    "mailtrace \u{2014} Analyze email transport headers: decoded values, the Received relay trace with per-hop delays, and Microsoft antispam reports.",
    "mailtrace \u{2014} Analiza cabeceras de transporte de correo: valores decodificados, la traza Received con retardos por salto e informes antispam de Microsoft."
);

// ── Display formats ──────────────────────────────────────────────

// chrono pattern for hop and summary timestamps.
msg!(date_pattern, "%-m/%-d/%Y %-I:%M:%S %p", "%-d/%-m/%Y %-H:%M:%S");

msg!(unit_minute, "minute", "minuto");
msg!(unit_minutes, "minutes", "minutos");
msg!(unit_second, "second", "segundo");
msg!(unit_seconds, "seconds", "segundos");

/// Singular or plural minute word for a count.
pub fn unit_minutes_for(n: i64) -> &'static str {
    if n == 1 {
        unit_minute()
    } else {
        unit_minutes()
    }
}

/// Singular or plural second word for a count.
pub fn unit_seconds_for(n: i64) -> &'static str {
    if n == 1 {
        unit_second()
    } else {
        unit_seconds()
    }
}

// ── CLI output ───────────────────────────────────────────────────

msg!(caption_summary, "Summary", "Resumen");
msg!(caption_trace, "Relay trace", "Traza de reenv\u{ed}o");
msg!(
    caption_antispam,
    "Antispam reports",
    "Informes antispam"
);
msg!(caption_other, "Other headers", "Otras cabeceras");
msg!(msg_total_delay, "Total elapsed", "Tiempo total");
msg!(msg_no_timing, "no timing data", "sin datos de tiempo");
