//! Customer-entered order details.

use serde::{Deserialize, Serialize};

/// Minimum number of digits accepted in a phone number.
const MIN_PHONE_DIGITS: usize = 10;

/// Contact and delivery information collected on the order-details step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub customer_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub city: String,
    /// Carrier branch or parcel locker the order ships to.
    pub delivery_office: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl OrderDetails {
    pub fn new(
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
        delivery_office: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            phone: phone.into(),
            email: None,
            city: city.into(),
            delivery_office: delivery_office.into(),
            comment: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Fields that are missing or malformed, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("name");
        }
        let digits = self.phone.chars().filter(char::is_ascii_digit).count();
        if digits < MIN_PHONE_DIGITS {
            missing.push("phone");
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                missing.push("email");
            }
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.delivery_office.trim().is_empty() {
            missing.push("delivery office");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_details() {
        let details = OrderDetails::new("Олена", "+38 (067) 123-45-67", "Київ", "Відділення 12");
        assert!(details.is_complete());
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let details = OrderDetails::new(" ", "123", "Львів", "");
        assert_eq!(details.missing_fields(), vec!["name", "phone", "delivery office"]);
    }

    #[test]
    fn test_optional_email_is_checked_when_present() {
        let details = OrderDetails::new("Олена", "0671234567", "Київ", "1").with_email("nope");
        assert_eq!(details.missing_fields(), vec!["email"]);
    }
}
