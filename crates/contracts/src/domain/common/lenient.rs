//! Нестрогие десериализаторы для полей DTO.
//!
//! Одна строка с неожиданной формой поля не должна ронять разбор всего списка:
//! непригодное значение превращается в `None` (или значение по умолчанию).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{AggregateId, EntityRef};

/// id из произвольного JSON: целое число, целое число с плавающей точкой
/// (`1.0`) или непустая строка
pub fn id_from_value(value: &Value) -> Option<AggregateId> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(AggregateId::Number(i));
            }
            let f = n.as_f64()?;
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Some(AggregateId::Number(f as i64))
            } else {
                None
            }
        }
        Value::String(s) if !s.trim().is_empty() => Some(AggregateId::Text(s.clone())),
        _ => None,
    }
}

/// Вложенный объект `{id, name}`; без пригодного id ссылки нет
pub fn entity_ref_from_value(value: &Value) -> Option<EntityRef> {
    let obj = value.as_object()?;
    let id = obj.get("id").and_then(id_from_value)?;
    let name = obj.get("name").and_then(Value::as_str).map(str::to_string);
    Some(EntityRef { id, name })
}

/// Дата из строки: RFC 3339, затем SQL-формат без зоны (считается UTC), затем просто дата
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(DateTime::from_naive_utc_and_offset(
        date.and_hms_opt(0, 0, 0)?,
        Utc,
    ))
}

/// Сумма: число или числовая строка (`"1500.00"`, `"1,500.00"`); иначе 0
pub fn amount_from_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<AggregateId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(id_from_value).unwrap_or_default())
}

pub fn deserialize_id_opt<'de, D>(deserializer: D) -> Result<Option<AggregateId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(id_from_value))
}

pub fn deserialize_entity_ref_opt<'de, D>(deserializer: D) -> Result<Option<EntityRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(entity_ref_from_value))
}

pub fn deserialize_datetime_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_datetime))
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(amount_from_value).unwrap_or(0.0))
}
