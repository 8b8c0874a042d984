use contracts::domain::a001_category::aggregate::Category;
use contracts::system::auth::Session;

use crate::shared::api_utils::{get_json, ApiError};

pub async fn fetch_categories(session: &Session) -> Result<Vec<Category>, ApiError> {
    get_json("/categories", session).await
}
