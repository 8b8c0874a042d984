//! Определение поля с именем заявителя.
//!
//! Разные категории и разные источники данных называют это поле по-своему:
//! `Name`, `Full Name`, `applicant_name`, `अर्जदाराचे नाव`, `आवेदक का नाम`...
//! Здесь собрана единая эвристика, которой пользуются все таблицы.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::common::{NormalizedField, Record};

/// Значение-заглушка, когда имя определить не удалось
pub const UNKNOWN_NAME: &str = "-";

/// Подстроки, по которым поле считается кандидатом (английский, хинди, маратхи)
const NAME_SYNONYMS: &[&str] = &[
    "name",
    "applicant name",
    "full name",
    "customer name",
    "person name",
    "नाम",
    "आवेदक का नाम",
    "पूरा नाम",
    "ग्राहक का नाम",
    "नाव",
    "अर्जदाराचे नाव",
    "पूर्ण नाव",
    "ग्राहकाचे नाव",
];

static EN_LEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:name|full|first|last|applicant)\b").expect("valid regex")
});
static EN_TRAILING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:name|full|first|last|applicant)\s*$").expect("valid regex")
});
// \b не подходит для деванагари: огласовки считаются символами слова
static DEVANAGARI_LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:नाव|नाम)").expect("valid regex"));
static DEVANAGARI_TRAILING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:नाव|नाम)\s*$").expect("valid regex"));

static FULL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)full[\s_\-]*name").expect("valid regex"));
static APPLICANT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)applicant(?:'s)?[\s_\-]*name").expect("valid regex"));

/// Ранги от высшего к низшему; внутри ранга побеждает первое поле по порядку
const PRIORITY: [fn(&str) -> bool; 5] = [
    |n| FULL_NAME.is_match(n),
    |n| APPLICANT_NAME.is_match(n),
    |n| n.trim().eq_ignore_ascii_case("name"),
    |n| n.to_lowercase().contains("name"),
    |n| n.contains("नाव") || n.contains("नाम"),
];

pub fn is_name_candidate(field_name: &str) -> bool {
    let lower = field_name.to_lowercase();
    NAME_SYNONYMS.iter().any(|s| lower.contains(s))
        || EN_LEADING.is_match(field_name)
        || EN_TRAILING.is_match(field_name)
        || DEVANAGARI_LEADING.is_match(field_name)
        || DEVANAGARI_TRAILING.is_match(field_name)
}

/// Выбрать поле имени среди нормализованных полей
pub fn pick_name_field(fields: &[NormalizedField]) -> Option<&NormalizedField> {
    let candidates: Vec<&NormalizedField> =
        fields.iter().filter(|f| is_name_candidate(&f.name)).collect();

    PRIORITY
        .iter()
        .find_map(|matches| candidates.iter().copied().find(|f| matches(&f.name)))
        .or_else(|| candidates.first().copied())
}

/// Имя заявителя или [`UNKNOWN_NAME`]. Никогда не паникует.
pub fn resolve_applicant_name(record: Option<&Record>) -> String {
    let fields = record.map(Record::normalized).unwrap_or_default();

    match pick_name_field(&fields) {
        Some(field) if !field.value.trim().is_empty() => field.value.trim().to_string(),
        _ => UNKNOWN_NAME.to_string(),
    }
}

/// То же для сырого JSON (поля в любой из двух форм)
pub fn resolve_applicant_name_value(value: &Value) -> String {
    resolve_applicant_name(Record::from_value(value).as_ref())
}
