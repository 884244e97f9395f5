use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Best-effort result of reading a WiFi card.
///
/// An absent field means "not found"; it never signals a pipeline failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: Option<String>,
    pub password: Option<String>,
}

impl WifiCredentials {
    pub fn new(ssid: Option<String>, password: Option<String>) -> Self {
        Self { ssid, password }
    }

    /// Neither field was found.
    pub fn is_empty(&self) -> bool {
        self.ssid.is_none() && self.password.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.ssid.is_some() && self.password.is_some()
    }
}

/// Network security advertised in the WiFi-config URI.
///
/// Chosen by the user, never read off the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityType {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPassword,
}

impl SecurityType {
    pub fn requires_password(self) -> bool {
        !matches!(self, SecurityType::NoPassword)
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityType::Wpa => write!(f, "WPA"),
            SecurityType::Wep => write!(f, "WEP"),
            SecurityType::NoPassword => write!(f, "nopass"),
        }
    }
}

impl FromStr for SecurityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa3" => Ok(SecurityType::Wpa),
            "wep" => Ok(SecurityType::Wep),
            "nopass" | "none" | "open" => Ok(SecurityType::NoPassword),
            other => Err(format!("Unknown security type: '{other}'")),
        }
    }
}
