//! Validation and canonicalization of raw register fields.
//!
//! Every function returns `None` for a value that cannot be used and logs a
//! warning; the caller then leaves the corresponding statement out.

use crate::constants::COUNTRY_CALLING_PREFIX;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use oxrdf::NamedNode;
use regex::Regex;
use tracing::warn;

static NON_DIALABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9+]+").unwrap());
static TRUNK_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-0]+").unwrap());

/// Languages of the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Fr,
    Nl,
    De,
    En,
}

impl Lang {
    pub fn tag(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::Nl => "nl",
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    /// Language column of the denomination file
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "1" => Some(Lang::Fr),
            "2" => Some(Lang::Nl),
            "3" => Some(Lang::De),
            "4" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "1",
            Lang::Nl => "2",
            Lang::De => "3",
            Lang::En => "4",
        }
    }
}

/// Parses a `DD-MM-YYYY` date.
pub fn as_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%d-%m-%Y") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Incorrect date {}", raw);
            None
        }
    }
}

/// Cleans up a phone number into a `tel:` IRI; the Belgian calling code
/// replaces the leading trunk zero.
pub fn as_phone(raw: &str) -> Option<NamedNode> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 9 {
        warn!("Incorrect phone {}", raw);
        return None;
    }
    let separated = trimmed.replace("(0)", "-");
    let collapsed = NON_DIALABLE.replace_all(&separated, "-");
    let number = TRUNK_PREFIX.replace(&collapsed, COUNTRY_CALLING_PREFIX);

    match NamedNode::new(format!("tel:{}", number)) {
        Ok(iri) => Some(iri),
        Err(e) => {
            warn!("Incorrect phone {}: {}", raw, e);
            None
        }
    }
}

/// Cleans up a web page into an `http(s):` IRI. Only the first of several
/// space separated pages is kept.
pub fn as_page(raw: &str) -> Option<NamedNode> {
    if raw.trim().chars().count() < 5 {
        warn!("Incorrect URL {}", raw);
        return None;
    }
    let lowered = raw.trim().to_lowercase();
    let page = lowered.split_whitespace().next().unwrap_or_default();
    if page.chars().count() < 5 {
        warn!("Incorrect URL {}", page);
        return None;
    }

    if page.starts_with("http") {
        if !(page.starts_with("http://") || page.starts_with("https://")) {
            warn!("Incorrect URL {}", page);
            return None;
        }
    } else if page.starts_with("www:") {
        warn!("Incorrect URL {}", page);
        return None;
    }

    let candidate = if page.starts_with("http") {
        page.to_string()
    } else {
        format!("http://{}", page)
    };
    match NamedNode::new(candidate) {
        Ok(iri) => Some(iri),
        Err(e) => {
            warn!("Incorrect URL {}: {}", page, e);
            None
        }
    }
}

/// Cleans up an email address into a `mailto:` IRI.
pub fn as_mail(raw: &str) -> Option<NamedNode> {
    if raw.trim().chars().count() < 5 {
        warn!("Incorrect email {}", raw);
        return None;
    }
    let lowered = raw.trim().to_lowercase();
    let mail = lowered.split_whitespace().next().unwrap_or_default();
    if mail.chars().count() < 7 || !mail.contains('@') {
        warn!("Incorrect email {}", raw);
        return None;
    }
    let mail: String = mail.chars().filter(|c| *c != '<' && *c != '>').collect();

    match NamedNode::new(format!("mailto:{}", mail)) {
        Ok(iri) => Some(iri),
        Err(e) => {
            warn!("Incorrect email {}: {}", raw, e);
            None
        }
    }
}

/// Dominant language of a Belgian postal code, if the code lies in a
/// monolingual region.
pub fn guess_lang(zip: &str) -> Option<Lang> {
    let code: i32 = zip.trim().parse().unwrap_or_else(|_| {
        warn!("Could not convert zip code {}", zip);
        0
    });

    match code {
        1300..=1499 | 4000..=7999 => Some(Lang::Fr),
        1500..=3999 | 8000..=9999 => Some(Lang::Nl),
        _ => None,
    }
}

/// Parent of a NACE-BEL code: two digits less for 3 to 5 digit codes,
/// three less for the 7 digit national subdivisions.
pub fn broader_nace(code: &str) -> Option<&str> {
    let len = code.len();
    if !code.is_ascii() {
        return None;
    }
    match len {
        3..=5 => Some(&code[..len - 2]),
        7 => Some(&code[..len - 3]),
        _ => None,
    }
}
