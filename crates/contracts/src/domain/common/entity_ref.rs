use serde::{Deserialize, Serialize};

use super::AggregateId;

/// Ссылка на категорию или подкатегорию в ответе API: id и, если есть, название
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: AggregateId,
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn bare(id: AggregateId) -> Self {
        Self { id, name: None }
    }

    /// Название для заголовка секции; без названия показываем id
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id),
        }
    }

    /// Собрать ссылку из прямого `*_id` и вложенного объекта.
    ///
    /// Прямой id задаёт ключ, название берётся из вложенного объекта.
    pub fn resolve(direct: Option<&AggregateId>, nested: Option<&EntityRef>) -> Option<EntityRef> {
        let resolved = match (direct, nested) {
            (Some(id), Some(n)) => EntityRef {
                id: id.clone(),
                name: n.name.clone(),
            },
            (Some(id), None) => EntityRef::bare(id.clone()),
            (None, Some(n)) => n.clone(),
            (None, None) => return None,
        };
        if resolved.id.is_blank() {
            None
        } else {
            Some(resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_id_wins_nested_name_kept() {
        let nested = EntityRef {
            id: AggregateId::from(99),
            name: Some("Education".into()),
        };
        let r = EntityRef::resolve(Some(&AggregateId::from(1)), Some(&nested)).unwrap();
        assert_eq!(r.id, AggregateId::from(1));
        assert_eq!(r.display_name(), "Education");
    }

    #[test]
    fn test_unresolvable() {
        assert!(EntityRef::resolve(None, None).is_none());
        assert!(EntityRef::resolve(Some(&AggregateId::from("")), None).is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(EntityRef::bare(AggregateId::from(5)).display_name(), "#5");
    }
}
