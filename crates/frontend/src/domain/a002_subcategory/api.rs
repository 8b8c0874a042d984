use contracts::domain::a002_subcategory::aggregate::Subcategory;
use contracts::system::auth::Session;

use crate::shared::api_utils::{get_json, ApiError};

pub async fn fetch_subcategories(session: &Session) -> Result<Vec<Subcategory>, ApiError> {
    get_json("/subcategories", session).await
}
