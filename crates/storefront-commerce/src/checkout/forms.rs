//! Shipping and payment form data.
//!
//! Forms are checked for presence only: a value that is empty after trimming
//! counts as missing. No format validation is performed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Country pre-filled on a fresh shipping form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Shipping details entered at step 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Default for ShippingForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingForm {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("country", &self.country),
        ])
    }

    /// Check if every required field is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Single-line postal address.
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            self.zip.trim(),
            self.country.trim()
        )
    }
}

/// Payment details entered at step 2.
///
/// Card data is never validated or charged. `Debug` output masks the card
/// number and CVV so forms can be logged.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentForm {
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    pub cvv: String,
    pub save_info: bool,
}

impl PaymentForm {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("cardNumber", &self.card_number),
            ("cardName", &self.card_name),
            ("expiry", &self.expiry),
            ("cvv", &self.cvv),
        ])
    }

    /// Check if every required field is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Last four characters of the card number, for receipts.
    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = format!("****{}", self.card_last_four());
        f.debug_struct("PaymentForm")
            .field("card_number", &masked)
            .field("card_name", &self.card_name)
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("save_info", &self.save_info)
            .finish()
    }
}

fn blank_fields(fields: &[(&'static str, &String)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
