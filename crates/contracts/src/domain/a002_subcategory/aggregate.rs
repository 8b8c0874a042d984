use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, EntityRef};

/// Подкатегория внутри категории
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: AggregateId,
    pub category_id: AggregateId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Subcategory {
    pub fn to_entity_ref(&self) -> EntityRef {
        EntityRef {
            id: self.id.clone(),
            name: Some(self.name.clone()),
        }
    }
}
