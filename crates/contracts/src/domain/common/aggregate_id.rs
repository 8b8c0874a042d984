use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор сущности на стороне бэкенда.
///
/// Разные эндпоинты отдают id то числом, то строкой, поэтому принимаются оба варианта.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateId {
    Number(i64),
    Text(String),
}

impl AggregateId {
    /// Каноническая строковая форма: `1` и `"1"` дают один и тот же ключ
    pub fn as_string(&self) -> String {
        match self {
            AggregateId::Number(n) => n.to_string(),
            AggregateId::Text(s) => s.trim().to_string(),
        }
    }

    /// Пустой строковый id считается неразрешимым
    pub fn is_blank(&self) -> bool {
        match self {
            AggregateId::Number(_) => false,
            AggregateId::Text(s) => s.trim().is_empty(),
        }
    }
}

/// Пустой id: строка ответа без пригодного идентификатора
impl Default for AggregateId {
    fn default() -> Self {
        AggregateId::Text(String::new())
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<i64> for AggregateId {
    fn from(value: i64) -> Self {
        AggregateId::Number(value)
    }
}

impl From<&str> for AggregateId {
    fn from(value: &str) -> Self {
        AggregateId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_text_share_canonical_form() {
        assert_eq!(AggregateId::from(7).as_string(), AggregateId::from(" 7 ").as_string());
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let ids: Vec<AggregateId> = serde_json::from_str(r#"[3, "abc"]"#).unwrap();
        assert_eq!(ids, vec![AggregateId::Number(3), AggregateId::Text("abc".into())]);
    }

    #[test]
    fn test_blank() {
        assert!(AggregateId::from("  ").is_blank());
        assert!(!AggregateId::from(0).is_blank());
        assert!(AggregateId::default().is_blank());
    }
}
