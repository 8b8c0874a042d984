use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, EntityRef};

/// Категория услуг (верхний уровень группировки заявок)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: AggregateId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    pub fn to_entity_ref(&self) -> EntityRef {
        EntityRef {
            id: self.id.clone(),
            name: Some(self.name.clone()),
        }
    }
}
