//! Localized (Hungarian) user-facing messages and the server error-code
//! lookup tables.

use std::collections::HashMap;

pub const EMAIL_REQUIRED: &str = "Az email mező kitöltése kötelező.";
pub const EMAIL_FORMAT: &str = "Az email nem megfelelő formátumú.";
pub const CODE_REQUIRED: &str = "A kód mező kitöltése kötelező.";
pub const CODE_LENGTH: &str = "A kódnak 8 karakter hosszúnak kell lennie.";
pub const CODE_CHARACTERS: &str = "A kód csak betűket és számokat tartalmazhat.";
pub const DAY_REQUIRED: &str = "A nap mező kitöltése kötelező.";
pub const DAY_TOO_EARLY: &str = "A napnak 2022.07.01 utáni dátumnak kell lennie.";
pub const DAY_TOO_LATE: &str = "A napnak 2022.09.01 elötti dátumnak kell lennie.";
pub const DAY_IN_FUTURE: &str = "Nem lehet jövőbeli napot választani.";
pub const HOUR_REQUIRED: &str = "Az óra mező kitöltése kötelező.";
pub const HOUR_RANGE: &str = "Az óra 0 és 23 között lehet.";
pub const MINUTE_REQUIRED: &str = "A perc mező kitöltése kötelező.";
pub const MINUTE_RANGE: &str = "A perc 0 és 59 között lehet.";
pub const NAME_REQUIRED: &str = "A név megadása kötelező.";
pub const AGREEMENT_REQUIRED: &str = "A játékszabályzat elfogadása kötelező.";

pub const NOT_REGISTERED: &str = "Ön még nem regisztrált, a regisztráció kötelező.";
pub const WON: &str = "Nyertél.";
pub const NOT_WON: &str = "Nem nyertél.";
pub const REGISTERED: &str = "Sikeresen regisztrált.";
pub const GENERIC_ERROR: &str = "Hiba történt.";
pub const UNKNOWN_SERVER_ERROR: &str = "Ismeretlen hiba";

/// Server error code that routes the user into registration.
pub const EMAIL_NOT_FOUND: &str = "email:not_found";

/// Immutable server error-code → message lookup, built once at startup.
///
/// # Examples
///
/// ```
/// use promo_upload::domain::MessageCatalog;
///
/// let catalog = MessageCatalog::new();
/// assert_eq!(catalog.upload_error("code:invalid"), Some("Hibás kód."));
/// assert_eq!(catalog.registration_error("code:invalid"), None);
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    upload: HashMap<&'static str, &'static str>,
    registration: HashMap<&'static str, &'static str>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        let upload = HashMap::from([
            ("email:invalid", "Hibás emailt adott meg."),
            ("email:required", "Az email mező kitöltése kötelező."),
            ("code:invalid", "Hibás kód."),
            ("code:required", "A kód megadása kötelező."),
            ("purchase_time:required", "A dátum megadása kötlező."),
            ("purchase_time:invalid", "Hibás dátum."),
            ("purchase_time:too_early", "A megadott dátum túl korai."),
            ("purchase_time:too_late", "A megadott dátum túl késő."),
        ]);
        let registration = HashMap::from([
            ("email:invalid", "Hibás emailt adott meg."),
            ("email:required", "Az email mező kitöltése kötelező."),
            ("name:invalid", "Hibás nevet adott meg."),
            ("name:required", "A név megadása kötelező."),
        ]);

        Self { upload, registration }
    }

    /// Message for an error code returned by the code upload endpoint.
    pub fn upload_error(&self, code: &str) -> Option<&'static str> {
        self.upload.get(code).copied()
    }

    /// Message for an error code returned by the registration endpoint.
    pub fn registration_error(&self, code: &str) -> Option<&'static str> {
        self.registration.get(code).copied()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback shown for server codes missing from the lookup tables.
pub fn unknown_server_error(code: &str) -> String {
    format!("{} ({}).", UNKNOWN_SERVER_ERROR, code)
}
