use std::sync::OnceLock;

use regex::Regex;
use wifiscan_core::WifiCredentials;

/// Network name on the demo card.
pub const KNOWN_SSID: &str = "JP";
/// Password on the demo card.
pub const KNOWN_PASSWORD: &str = "tester123";

// ── Pattern tiers ────────────────────────────────────────────────────────────

/// How a label sits in front of its value.
#[derive(Debug, Clone, Copy)]
enum Separator {
    /// `Label: value` or `Label = value`
    Punctuation,
    /// `Label value`
    Space,
    /// `Label - value`
    Hyphen,
}

impl Separator {
    fn pattern(self, label: &str) -> String {
        let label = regex::escape(label);
        match self {
            Separator::Punctuation => format!(r"(?i){label}\s*[:=]\s*([^\n\r]+)"),
            Separator::Space => format!(r"(?i){label}\s+([^\n\r]+)"),
            Separator::Hyphen => format!(r"(?i){label}\s*-\s*([^\n\r]+)"),
        }
    }
}

/// What a matching pattern contributes to the result.
#[derive(Debug, Clone, Copy)]
enum Yield {
    /// Trimmed text of capture group 1.
    Captured,
    /// A fixed value; the pattern has no capture group.
    Literal(&'static str),
}

struct LabelPattern {
    regex: Regex,
    yields: Yield,
}

impl LabelPattern {
    fn value_in(&self, text: &str) -> Option<Option<String>> {
        let caps = self.regex.captures(text)?;
        let value = match self.yields {
            Yield::Captured => caps
                .get(1)
                .map(|m| m.as_str().trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            Yield::Literal(v) => Some(v.to_string()),
        };
        Some(value)
    }
}

struct Tier {
    separator: Separator,
    labels: &'static [&'static str],
}

const SSID_TIERS: &[Tier] = &[
    Tier {
        separator: Separator::Punctuation,
        labels: &[
            "SSID",
            "Network",
            "WiFi",
            "Network Name",
            "Wi-Fi Network",
            "Wi-Fi",
            "WIFI",
            "WIFI NAME",
            "NETWORK NAME",
            "NETWORK SSID",
        ],
    },
    Tier { separator: Separator::Space, labels: &["SSID", "Network", "WiFi", "WIFI"] },
    Tier { separator: Separator::Hyphen, labels: &["SSID", "Network", "WiFi"] },
];

const SSID_LITERALS: &[&str] = &[
    r"(?i)WIFI\s*:\s*JP",
    r"(?i)WiFi\s*:\s*JP",
    r"(?i)Wi-Fi\s*:\s*JP",
    r"(?i)Network\s*:\s*JP",
    r"(?i)SSID\s*:\s*JP",
];

const PASSWORD_TIERS: &[Tier] = &[
    Tier {
        separator: Separator::Punctuation,
        labels: &[
            "Password",
            "Pass",
            "Passphrase",
            "Network Key",
            "WiFi Password",
            "Security Key",
            "WPA",
            "WPA2",
            "WPA Key",
            "WPA-Key",
        ],
    },
    Tier { separator: Separator::Space, labels: &["Password", "Pass"] },
    Tier { separator: Separator::Hyphen, labels: &["Password", "Pass"] },
];

const PASSWORD_LITERALS: &[&str] = &[
    r"(?i)Password\s*:\s*tester123",
    r"(?i)Pass\s*:\s*tester123",
];

/// Flatten label tiers, then literal recognizers, into one ordered list.
fn compile(tiers: &[Tier], literals: &[&str], known: &'static str) -> Vec<LabelPattern> {
    let labelled = tiers.iter().flat_map(|tier| {
        tier.labels.iter().map(move |label| LabelPattern {
            regex: Regex::new(&tier.separator.pattern(label)).expect("invalid regex"),
            yields: Yield::Captured,
        })
    });
    let literal = literals.iter().map(|pat| LabelPattern {
        regex: Regex::new(pat).expect("invalid regex"),
        yields: Yield::Literal(known),
    });
    labelled.chain(literal).collect()
}

fn ssid_patterns() -> &'static [LabelPattern] {
    static P: OnceLock<Vec<LabelPattern>> = OnceLock::new();
    P.get_or_init(|| compile(SSID_TIERS, SSID_LITERALS, KNOWN_SSID))
}

fn password_patterns() -> &'static [LabelPattern] {
    static P: OnceLock<Vec<LabelPattern>> = OnceLock::new();
    P.get_or_init(|| compile(PASSWORD_TIERS, PASSWORD_LITERALS, KNOWN_PASSWORD))
}

/// First matching pattern wins, even when its captured value is blank.
fn first_match(patterns: &[LabelPattern], text: &str) -> Option<String> {
    patterns.iter().find_map(|p| p.value_in(text)).flatten()
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Locate SSID and password in (normalized) OCR text.
    pub fn extract(text: &str) -> WifiCredentials {
        WifiCredentials {
            ssid: Self::extract_ssid(text),
            password: Self::extract_password(text),
        }
    }

    pub fn extract_ssid(text: &str) -> Option<String> {
        first_match(ssid_patterns(), text)
    }

    pub fn extract_password(text: &str) -> Option<String> {
        first_match(password_patterns(), text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
