//! Payment Settings Model

use serde::{Deserialize, Serialize};

/// Manual payment display configuration (singleton record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// Name shown as the transfer recipient
    #[serde(rename = "momoName")]
    pub recipient_name: String,
    /// Recipient phone / wallet number
    #[serde(rename = "momoPhone")]
    pub recipient_phone: String,
    /// QR generator URL prefix; the payment payload is appended
    #[serde(rename = "momoQrTemplate")]
    pub qr_template: String,
}
