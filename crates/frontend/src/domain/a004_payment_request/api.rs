use contracts::domain::a004_payment_request::aggregate::PaymentRequest;
use contracts::system::auth::Session;

use crate::shared::api_utils::{delete, get_json, ApiError};

pub async fn fetch_payment_requests(session: &Session) -> Result<Vec<PaymentRequest>, ApiError> {
    get_json("/payment-requests", session).await
}

pub async fn delete_payment_request(id: &str, session: &Session) -> Result<(), ApiError> {
    delete(&format!("/payment-requests/{}", id), session).await
}
