use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::lenient::{deserialize_amount, deserialize_datetime_opt, deserialize_id};
use crate::domain::common::AggregateId;
use crate::shared::masking::mask_account_number;

/// Заявка дистрибьютора/сотрудника на выплату комиссии
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: AggregateId,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentRequest {
    /// Номер счёта для показа в списке
    pub fn masked_account(&self) -> String {
        mask_account_number(self.account_number.as_deref().unwrap_or_default())
    }

    pub fn is_pending(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("pending"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_account_from_json() {
        let p: PaymentRequest = serde_json::from_str(
            r#"{"id": 1, "account_number": "0012 3456 7890", "amount": 1500.5, "status": "Pending"}"#,
        )
        .unwrap();
        assert_eq!(p.masked_account(), "********7890");
        assert!(p.is_pending());
    }

    #[test]
    fn test_decimal_strings_and_sql_dates() {
        let list: Vec<PaymentRequest> = serde_json::from_value(serde_json::json!([
            {"id": 1, "amount": "1500.00", "created_at": "2024-03-15 14:02:26"},
            {"id": 2, "amount": 250},
            {"id": 3, "amount": "pending review"}
        ]))
        .unwrap();
        assert_eq!(list[0].amount, 1500.0);
        assert!(list[0].created_at.is_some());
        assert_eq!(list[1].amount, 250.0);
        assert_eq!(list[2].amount, 0.0);
    }

    #[test]
    fn test_missing_account() {
        let p: PaymentRequest = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(p.masked_account(), "-");
        assert!(!p.is_pending());
    }
}
