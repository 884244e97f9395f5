use thiserror::Error;

use crate::credentials::{SecurityType, WifiCredentials};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Network name (SSID) is required to build a WiFi QR code")]
    MissingSsid,
}

/// Credentials plus the user's security choice, ready to be encoded as a
/// WiFi-config URI (`WIFI:T:<security>;S:<ssid>;P:<password>;;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiPayload {
    pub ssid: String,
    pub password: String,
    pub security: SecurityType,
}

impl WifiPayload {
    pub fn new(
        ssid: impl Into<String>,
        password: impl Into<String>,
        security: SecurityType,
    ) -> Result<Self, PayloadError> {
        let ssid = ssid.into();
        if ssid.trim().is_empty() {
            return Err(PayloadError::MissingSsid);
        }
        Ok(Self { ssid, password: password.into(), security })
    }

    /// Absent password becomes an empty `P:` field.
    pub fn from_credentials(
        credentials: &WifiCredentials,
        security: SecurityType,
    ) -> Result<Self, PayloadError> {
        Self::new(
            credentials.ssid.clone().unwrap_or_default(),
            credentials.password.clone().unwrap_or_default(),
            security,
        )
    }

    pub fn to_uri(&self) -> String {
        let ssid = escape_field(&self.ssid);
        if self.security.requires_password() {
            let password = escape_field(&self.password);
            format!("WIFI:T:{};S:{ssid};P:{password};;", self.security)
        } else {
            format!("WIFI:T:{};S:{ssid};;", self.security)
        }
    }
}

/// Backslash-escape the characters the URI format reserves.
fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, '\\' | ';' | ',' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wpa_uri_format() {
        let p = WifiPayload::new("JP", "tester123", SecurityType::Wpa).unwrap();
        assert_eq!(p.to_uri(), "WIFI:T:WPA;S:JP;P:tester123;;");
    }

    #[test]
    fn wep_uri_format() {
        let p = WifiPayload::new("Cafe", "abcde", SecurityType::Wep).unwrap();
        assert_eq!(p.to_uri(), "WIFI:T:WEP;S:Cafe;P:abcde;;");
    }

    #[test]
    fn nopass_omits_password_field() {
        let p = WifiPayload::new("Guest", "ignored", SecurityType::NoPassword).unwrap();
        assert_eq!(p.to_uri(), "WIFI:T:nopass;S:Guest;;");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let p = WifiPayload::new("a;b", r#"p,w"d\x"#, SecurityType::Wpa).unwrap();
        assert_eq!(p.to_uri(), r#"WIFI:T:WPA;S:a\;b;P:p\,w\"d\\x;;"#);
    }

    #[test]
    fn blank_ssid_is_rejected() {
        assert_eq!(
            WifiPayload::new("  ", "pw", SecurityType::Wpa),
            Err(PayloadError::MissingSsid)
        );
    }

    #[test]
    fn from_credentials_fills_missing_password_with_empty() {
        let creds = WifiCredentials::new(Some("HomeNet5G".into()), None);
        let p = WifiPayload::from_credentials(&creds, SecurityType::Wpa).unwrap();
        assert_eq!(p.to_uri(), "WIFI:T:WPA;S:HomeNet5G;P:;;");
    }

    #[test]
    fn from_credentials_without_ssid_fails() {
        let creds = WifiCredentials::new(None, Some("tester123".into()));
        assert!(WifiPayload::from_credentials(&creds, SecurityType::Wpa).is_err());
    }
}
