use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::Category;
use crate::domain::a002_subcategory::aggregate::Subcategory;
use crate::domain::common::lenient::{
    deserialize_datetime_opt, deserialize_entity_ref_opt, deserialize_id, deserialize_id_opt,
};
use crate::domain::common::record::deserialize_lenient;
use crate::domain::common::{AggregateId, EntityRef, Record};
use crate::shared::applicant_name::resolve_applicant_name;
use crate::shared::grouping::Categorized;

// ============================================================================
// Aggregate
// ============================================================================

/// Заявка на документ/сертификат, поданная клиентом
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSubmission {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: AggregateId,

    #[serde(default, deserialize_with = "deserialize_id_opt")]
    pub category_id: Option<AggregateId>,
    #[serde(default, deserialize_with = "deserialize_id_opt")]
    pub subcategory_id: Option<AggregateId>,

    // Некоторые эндпоинты вкладывают объекты вместо (или вместе с) id
    #[serde(default, deserialize_with = "deserialize_entity_ref_opt")]
    pub category: Option<EntityRef>,
    #[serde(default, deserialize_with = "deserialize_entity_ref_opt")]
    pub subcategory: Option<EntityRef>,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub fields: Option<Record>,

    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DocumentSubmission {
    /// Имя заявителя для таблиц, `"-"` если определить не удалось
    pub fn applicant_name(&self) -> String {
        resolve_applicant_name(self.fields.as_ref())
    }

    pub fn status_label(&self) -> String {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("-")
            .to_string()
    }

    /// Подставить названия из справочников, если ответ содержит только id
    pub fn with_names(mut self, categories: &[Category], subcategories: &[Subcategory]) -> Self {
        if self.category.is_none() {
            if let Some(id) = &self.category_id {
                self.category = categories
                    .iter()
                    .find(|c| c.id.as_string() == id.as_string())
                    .map(Category::to_entity_ref);
            }
        }
        if self.subcategory.is_none() {
            if let Some(id) = &self.subcategory_id {
                self.subcategory = subcategories
                    .iter()
                    .find(|s| s.id.as_string() == id.as_string())
                    .map(Subcategory::to_entity_ref);
            }
        }
        self
    }
}

impl Categorized for DocumentSubmission {
    fn category_ref(&self) -> Option<EntityRef> {
        EntityRef::resolve(self.category_id.as_ref(), self.category.as_ref())
    }

    fn subcategory_ref(&self) -> Option<EntityRef> {
        EntityRef::resolve(self.subcategory_id.as_ref(), self.subcategory.as_ref())
    }
}

// ============================================================================
// Upload
// ============================================================================

/// Загрузка файла документа к заявке.
///
/// Текстовые части multipart-формы; сам файл добавляет UI под именем [`UPLOAD_FILE_FIELD`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub submission_id: String,
    pub document_id: String,
    pub remarks: Option<String>,
}

pub const UPLOAD_FILE_FIELD: &str = "file";

impl DocumentUpload {
    pub fn text_parts(&self) -> Vec<(&'static str, String)> {
        let mut parts = vec![
            ("submission_id", self.submission_id.clone()),
            ("document_id", self.document_id.clone()),
        ];
        if let Some(remarks) = self.remarks.as_deref().map(str::trim) {
            if !remarks.is_empty() {
                parts.push(("remarks", remarks.to_string()));
            }
        }
        parts
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.submission_id.trim().is_empty() {
            return Err("Submission is not selected".into());
        }
        if self.document_id.trim().is_empty() {
            return Err("Document ID is required".into());
        }
        Ok(())
    }
}

// ============================================================================
// Query
// ============================================================================

/// Фильтр списка заявок (сериализуется в query string)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSubmissionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grouping::partition_by_category;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_nested_refs_and_pairs() {
        let s: DocumentSubmission = serde_json::from_value(json!({
            "id": 10,
            "category": {"id": 1, "name": "Certificates"},
            "subcategory_id": "3",
            "fields": [{"field_name": "Applicant Name", "field_value": "Lee"}],
            "status": "pending",
            "created_at": "2024-03-15T14:02:26Z"
        }))
        .unwrap();

        assert_eq!(s.applicant_name(), "Lee");
        assert_eq!(s.category_ref().unwrap().display_name(), "Certificates");
        assert_eq!(s.subcategory_ref().unwrap().id.as_string(), "3");
    }

    #[test]
    fn test_malformed_fields_do_not_fail_the_row() {
        let s: DocumentSubmission =
            serde_json::from_value(json!({"id": "a1", "fields": "oops"})).unwrap();
        assert!(s.fields.is_none());
        assert_eq!(s.applicant_name(), "-");
        assert_eq!(s.status_label(), "-");
        assert!(s.category_ref().is_none());
    }

    #[test]
    fn test_odd_reference_shapes_do_not_fail_the_list() {
        let list: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "category_id": 1, "subcategory_id": 1, "fields": {"Name": "Asha"}},
            {"id": 2, "category": {"name": "Certificates"}, "subcategory_id": 1},
            {"id": 3, "category": "Certificates", "subcategory_id": 1},
            {"id": 4.0, "category_id": 1.0, "subcategory": {"id": "1", "name": "Income"}},
            {"category_id": [1], "subcategory_id": {"x": 1}}
        ]))
        .unwrap();
        assert_eq!(list.len(), 5);

        assert_eq!(list[3].id, AggregateId::Number(4));
        assert!(list[4].id.is_blank());

        let grouping = partition_by_category(&list);
        assert_eq!(grouping.groups.len(), 1);
        let members: Vec<String> = grouping.groups[0]
            .members
            .iter()
            .map(|s| s.id.as_string())
            .collect();
        assert_eq!(members, vec!["1", "4"]);
        assert_eq!(grouping.ungrouped.len(), 3);
        assert_eq!(grouping.groups[0].members[0].applicant_name(), "Asha");
    }

    #[test]
    fn test_sql_style_timestamp() {
        let list: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "created_at": "2024-03-15 14:02:26"},
            {"id": 2, "created_at": "not a date"},
            {"id": 3, "created_at": 1710511346}
        ]))
        .unwrap();
        let expected: DateTime<Utc> = "2024-03-15T14:02:26Z".parse().unwrap();
        assert_eq!(list[0].created_at, Some(expected));
        assert!(list[1].created_at.is_none());
        assert!(list[2].created_at.is_none());
    }

    #[test]
    fn test_with_names_fills_missing_refs_only() {
        let categories: Vec<Category> =
            serde_json::from_value(json!([{"id": 1, "name": "Certificates"}])).unwrap();
        let subcategories: Vec<Subcategory> =
            serde_json::from_value(json!([{"id": "5", "category_id": 1, "name": "Income"}])).unwrap();

        let s: DocumentSubmission = serde_json::from_value(json!({
            "id": 1,
            "category_id": "1",
            "subcategory_id": 5,
            "subcategory": {"id": 5, "name": "Caste"}
        }))
        .unwrap();
        let s = s.with_names(&categories, &subcategories);

        assert_eq!(s.category_ref().unwrap().display_name(), "Certificates");
        assert_eq!(s.subcategory_ref().unwrap().display_name(), "Caste");
    }

    #[test]
    fn test_upload_parts_skip_blank_remarks() {
        let upload = DocumentUpload {
            submission_id: "10".into(),
            document_id: "4".into(),
            remarks: Some("   ".into()),
        };
        let names: Vec<&str> = upload.text_parts().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["submission_id", "document_id"]);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_upload_validation() {
        let upload = DocumentUpload::default();
        assert!(upload.validate().is_err());
    }
}
