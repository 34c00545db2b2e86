//! Transaction submission types and the closed categorical domains

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Kind of transaction being screened.
///
/// Codes match the label encoder used when the classifier was trained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Withdrawal,
    Deposit,
    Transfer,
    Payment,
}

impl TransactionType {
    pub const ALL: [Self; 4] = [
        Self::Withdrawal,
        Self::Deposit,
        Self::Transfer,
        Self::Payment,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Withdrawal => 0,
            Self::Deposit => 1,
            Self::Transfer => 2,
            Self::Payment => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Withdrawal => "withdrawal",
            Self::Deposit => "deposit",
            Self::Transfer => "transfer",
            Self::Payment => "payment",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: "transaction_type",
                value: value.to_string(),
            })
    }
}

/// Merchant category of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantCategory {
    Utilities,
    Online,
    Other,
    Entertainment,
    Travel,
    Grocery,
    Retail,
    Restaurant,
}

impl MerchantCategory {
    pub const ALL: [Self; 8] = [
        Self::Utilities,
        Self::Online,
        Self::Other,
        Self::Entertainment,
        Self::Travel,
        Self::Grocery,
        Self::Retail,
        Self::Restaurant,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Utilities => 0,
            Self::Online => 1,
            Self::Other => 2,
            Self::Entertainment => 3,
            Self::Travel => 4,
            Self::Grocery => 5,
            Self::Retail => 6,
            Self::Restaurant => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utilities => "utilities",
            Self::Online => "online",
            Self::Other => "other",
            Self::Entertainment => "entertainment",
            Self::Travel => "travel",
            Self::Grocery => "grocery",
            Self::Retail => "retail",
            Self::Restaurant => "restaurant",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: "merchant_category",
                value: value.to_string(),
            })
    }
}

/// City the transaction originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Tokyo,
    Toronto,
    London,
    Sydney,
    Berlin,
    Dubai,
    #[serde(rename = "New York")]
    NewYork,
    Singapore,
}

impl Location {
    pub const ALL: [Self; 8] = [
        Self::Tokyo,
        Self::Toronto,
        Self::London,
        Self::Sydney,
        Self::Berlin,
        Self::Dubai,
        Self::NewYork,
        Self::Singapore,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Tokyo => 0,
            Self::Toronto => 1,
            Self::London => 2,
            Self::Sydney => 3,
            Self::Berlin => 4,
            Self::Dubai => 5,
            Self::NewYork => 6,
            Self::Singapore => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tokyo => "Tokyo",
            Self::Toronto => "Toronto",
            Self::London => "London",
            Self::Sydney => "Sydney",
            Self::Berlin => "Berlin",
            Self::Dubai => "Dubai",
            Self::NewYork => "New York",
            Self::Singapore => "Singapore",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: "location",
                value: value.to_string(),
            })
    }
}

/// Device used to initiate the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceUsed {
    Mobile,
    Atm,
    Pos,
    Web,
}

impl DeviceUsed {
    pub const ALL: [Self; 4] = [Self::Mobile, Self::Atm, Self::Pos, Self::Web];

    pub fn code(&self) -> u8 {
        match self {
            Self::Mobile => 0,
            Self::Atm => 1,
            Self::Pos => 2,
            Self::Web => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Atm => "atm",
            Self::Pos => "pos",
            Self::Web => "web",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: "device_used",
                value: value.to_string(),
            })
    }
}

/// Day of week, encoded 0 (Monday) through 6 (Sunday) as during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == value)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: "day_of_week",
                value: value.to_string(),
            })
    }
}

/// Raw submission as received from the form or the JSON endpoint.
///
/// Categorical fields arrive as strings and are validated against the
/// closed domains during encoding; out-of-domain values never reach the
/// classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Transaction amount in USD
    pub amount: f64,

    /// One of the `TransactionType` labels
    pub transaction_type: String,

    /// One of the `MerchantCategory` labels
    pub merchant_category: String,

    /// One of the `Location` labels
    pub location: String,

    /// One of the `DeviceUsed` labels
    pub device_used: String,

    /// Hour the transaction occurred, 0..=23
    pub hour_of_day: u8,

    /// One of the `DayOfWeek` labels
    pub day_of_week: String,
}

/// A submission with every categorical field resolved against its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub merchant_category: MerchantCategory,
    pub location: Location,
    pub device_used: DeviceUsed,
    pub hour_of_day: u8,
    pub day_of_week: DayOfWeek,
}

impl Transaction {
    /// Parse a raw submission, rejecting out-of-domain values.
    pub fn parse(form: &TransactionForm) -> Result<Self, EncodeError> {
        if !form.amount.is_finite() || form.amount < 0.0 {
            return Err(EncodeError::InvalidAmount(form.amount));
        }
        if form.hour_of_day > 23 {
            return Err(EncodeError::HourOutOfRange(form.hour_of_day));
        }

        Ok(Self {
            amount: form.amount,
            transaction_type: TransactionType::from_label(&form.transaction_type)?,
            merchant_category: MerchantCategory::from_label(&form.merchant_category)?,
            location: Location::from_label(&form.location)?,
            device_used: DeviceUsed::from_label(&form.device_used)?,
            hour_of_day: form.hour_of_day,
            day_of_week: DayOfWeek::from_label(&form.day_of_week)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> TransactionForm {
        TransactionForm {
            amount: 100.0,
            transaction_type: "payment".to_string(),
            merchant_category: "online".to_string(),
            location: "Tokyo".to_string(),
            device_used: "mobile".to_string(),
            hour_of_day: 14,
            day_of_week: "monday".to_string(),
        }
    }

    #[test]
    fn test_category_codes_match_training_tables() {
        assert_eq!(TransactionType::Withdrawal.code(), 0);
        assert_eq!(TransactionType::Payment.code(), 3);
        assert_eq!(MerchantCategory::Utilities.code(), 0);
        assert_eq!(MerchantCategory::Restaurant.code(), 7);
        assert_eq!(Location::Tokyo.code(), 0);
        assert_eq!(Location::NewYork.code(), 6);
        assert_eq!(DeviceUsed::Mobile.code(), 0);
        assert_eq!(DeviceUsed::Web.code(), 3);
        assert_eq!(DayOfWeek::Monday.code(), 0);
        assert_eq!(DayOfWeek::Sunday.code(), 6);
    }

    #[test]
    fn test_from_label_round_trips() {
        for ty in TransactionType::ALL {
            assert_eq!(TransactionType::from_label(ty.label()).unwrap(), ty);
        }
        for loc in Location::ALL {
            assert_eq!(Location::from_label(loc.label()).unwrap(), loc);
        }
        for day in DayOfWeek::ALL {
            assert_eq!(DayOfWeek::from_label(day.label()).unwrap(), day);
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = TransactionType::from_label("loan").unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                field: "transaction_type",
                value: "loan".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_valid_form() {
        let tx = Transaction::parse(&sample_form()).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Payment);
        assert_eq!(tx.location, Location::Tokyo);
        assert_eq!(tx.hour_of_day, 14);
    }

    #[test]
    fn test_parse_rejects_out_of_range_hour() {
        let mut form = sample_form();
        form.hour_of_day = 24;
        assert_eq!(
            Transaction::parse(&form).unwrap_err(),
            EncodeError::HourOutOfRange(24)
        );
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let mut form = sample_form();
        form.amount = -5.0;
        assert!(matches!(
            Transaction::parse(&form).unwrap_err(),
            EncodeError::InvalidAmount(_)
        ));
    }

    #[test]
    fn test_form_deserialization() {
        let json = r#"{
            "amount": 250.0,
            "transaction_type": "transfer",
            "merchant_category": "travel",
            "location": "New York",
            "device_used": "web",
            "hour_of_day": 2,
            "day_of_week": "saturday"
        }"#;

        let form: TransactionForm = serde_json::from_str(json).unwrap();
        let tx = Transaction::parse(&form).unwrap();

        assert_eq!(tx.location, Location::NewYork);
        assert_eq!(tx.day_of_week, DayOfWeek::Saturday);
    }
}
