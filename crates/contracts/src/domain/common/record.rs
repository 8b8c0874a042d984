//! Record — свободный набор полей заявки.
//!
//! Бэкенд отдаёт поля в двух формах: массив пар `{field_name, field_value}`
//! или объект `имя -> значение`. Обе формы приводятся к одному упорядоченному
//! списку на границе, дальше по коду форма не проверяется.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Одна пара из формы `NameValuePairs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPair {
    pub field_name: String,
    #[serde(default)]
    pub field_value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    NameValuePairs(Vec<FieldPair>),
    KeyedFields(Map<String, Value>),
}

/// Поле после нормализации: имя и значение в виде строки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField {
    pub name: String,
    pub value: String,
}

impl Record {
    /// Разобрать произвольное JSON-значение. Всё, что не является одной из двух
    /// форм, даёт `None`.
    pub fn from_value(value: &Value) -> Option<Record> {
        match value {
            Value::Object(map) => Some(Record::KeyedFields(map.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| serde_json::from_value::<FieldPair>(item.clone()).ok())
                .collect::<Option<Vec<_>>>()
                .map(Record::NameValuePairs),
            _ => None,
        }
    }

    /// Упорядоченный список полей; для объекта сохраняется порядок документа
    pub fn normalized(&self) -> Vec<NormalizedField> {
        match self {
            Record::NameValuePairs(pairs) => pairs
                .iter()
                .map(|p| NormalizedField {
                    name: p.field_name.clone(),
                    value: value_to_text(&p.field_value),
                })
                .collect(),
            Record::KeyedFields(map) => map
                .iter()
                .map(|(name, value)| NormalizedField {
                    name: name.clone(),
                    value: value_to_text(value),
                })
                .collect(),
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Десериализатор для полей DTO: битая форма превращается в `None`,
/// а не в ошибку разбора всего ответа
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Record::from_value))
}
