pub mod credentials;
pub mod payload;

pub use credentials::{SecurityType, WifiCredentials};
pub use payload::{PayloadError, WifiPayload};
