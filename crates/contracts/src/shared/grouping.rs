//! Группировка записей по паре (категория, подкатегория) для сворачиваемых секций.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::common::EntityRef;

/// Запись, у которой можно получить категорию и подкатегорию
/// (напрямую по id, через вложенный объект или оба варианта)
pub trait Categorized {
    fn category_ref(&self) -> Option<EntityRef>;
    fn subcategory_ref(&self) -> Option<EntityRef>;
}

impl<T: Categorized> Categorized for &T {
    fn category_ref(&self) -> Option<EntityRef> {
        (**self).category_ref()
    }

    fn subcategory_ref(&self) -> Option<EntityRef> {
        (**self).subcategory_ref()
    }
}

/// Ключ группы: канонические id категории и подкатегории
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    pub category_id: String,
    pub subcategory_id: String,
}

impl GroupKey {
    pub fn new(category: &EntityRef, subcategory: &EntityRef) -> Self {
        Self {
            category_id: category.id.as_string(),
            subcategory_id: subcategory.id.as_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Group<T> {
    pub category: EntityRef,
    pub subcategory: EntityRef,
    pub members: Vec<T>,
}

impl<T> Group<T> {
    pub fn key(&self) -> GroupKey {
        GroupKey::new(&self.category, &self.subcategory)
    }

    pub fn title(&self) -> String {
        format!(
            "{} / {}",
            self.category.display_name(),
            self.subcategory.display_name()
        )
    }
}

/// Результат разбиения: группы и записи без категории/подкатегории
#[derive(Debug, Clone, Serialize)]
pub struct Grouping<T> {
    pub groups: Vec<Group<T>>,
    pub ungrouped: Vec<T>,
}

impl<T> Default for Grouping<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            ungrouped: Vec::new(),
        }
    }
}

/// Разбить записи на группы за один проход.
///
/// Порядок групп совпадает с первым появлением ключа. Категория и подкатегория
/// группы берутся из первой записи; у последующих записей они игнорируются.
/// Записи без категории или подкатегории попадают в `ungrouped`.
pub fn partition_by_category<T, I>(records: I) -> Grouping<T>
where
    T: Categorized,
    I: IntoIterator<Item = T>,
{
    let mut grouping = Grouping::default();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for record in records {
        let (category, subcategory) = match (record.category_ref(), record.subcategory_ref()) {
            (Some(c), Some(s)) => (c, s),
            _ => {
                grouping.ungrouped.push(record);
                continue;
            }
        };

        let key = GroupKey::new(&category, &subcategory);
        match index.get(&key) {
            Some(&pos) => grouping.groups[pos].members.push(record),
            None => {
                index.insert(key, grouping.groups.len());
                grouping.groups.push(Group {
                    category,
                    subcategory,
                    members: vec![record],
                });
            }
        }
    }

    if !grouping.ungrouped.is_empty() {
        log::debug!(
            "{} record(s) without category/subcategory left ungrouped",
            grouping.ungrouped.len()
        );
    }

    grouping
}

/// Только группы; записи без категории/подкатегории отбрасываются
pub fn group_by_category<T, I>(records: I) -> Vec<Group<T>>
where
    T: Categorized,
    I: IntoIterator<Item = T>,
{
    partition_by_category(records).groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_document_submission::aggregate::DocumentSubmission;
    use crate::domain::common::AggregateId;
    use serde_json::json;

    #[derive(Debug, Clone)]
    struct Row {
        tag: &'static str,
        category: Option<i64>,
        subcategory: Option<i64>,
    }

    impl Categorized for Row {
        fn category_ref(&self) -> Option<EntityRef> {
            self.category
                .map(|id| EntityRef::bare(AggregateId::from(id)))
        }

        fn subcategory_ref(&self) -> Option<EntityRef> {
            self.subcategory
                .map(|id| EntityRef::bare(AggregateId::from(id)))
        }
    }

    fn row(tag: &'static str, c: Option<i64>, s: Option<i64>) -> Row {
        Row {
            tag,
            category: c,
            subcategory: s,
        }
    }

    fn keys<T>(groups: &[Group<T>]) -> Vec<(String, String)> {
        groups
            .iter()
            .map(|g| {
                let key = g.key();
                (key.category_id, key.subcategory_id)
            })
            .collect()
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(c, s)| (c.to_string(), s.to_string())).collect()
    }

    #[test]
    fn test_first_occurrence_order() {
        let rows = vec![
            row("a", Some(1), Some(1)),
            row("b", Some(2), Some(2)),
            row("c", Some(1), Some(1)),
            row("d", Some(3), Some(3)),
        ];
        let groups = group_by_category(&rows);
        assert_eq!(keys(&groups), pairs(&[("1", "1"), ("2", "2"), ("3", "3")]));
        let first: Vec<&str> = groups[0].members.iter().map(|r| r.tag).collect();
        assert_eq!(first, vec!["a", "c"]);
    }

    #[test]
    fn test_records_are_conserved() {
        let rows = vec![
            row("a", Some(1), Some(1)),
            row("b", None, Some(2)),
            row("c", Some(1), None),
            row("d", Some(1), Some(2)),
            row("e", Some(1), Some(1)),
        ];
        let grouping = partition_by_category(rows.clone());
        let grouped: usize = grouping.groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouped, 3);
        assert_eq!(grouping.ungrouped.len(), 2);
        assert_eq!(grouped + grouping.ungrouped.len(), rows.len());

        let dropped = group_by_category(rows);
        assert_eq!(dropped.iter().map(|g| g.members.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_empty_input() {
        let grouping = partition_by_category(Vec::<Row>::new());
        assert!(grouping.groups.is_empty());
        assert!(grouping.ungrouped.is_empty());
    }

    #[test]
    fn test_first_seen_refs_kept() {
        let records: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "category": {"id": 1, "name": "First"}, "subcategory_id": 1},
            {"id": 2, "category": {"id": 1, "name": "Renamed"}, "subcategory_id": 1}
        ]))
        .unwrap();
        let groups = group_by_category(records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category.display_name(), "First");
        assert_eq!(groups[0].members.len(), 2);
    }

    #[test]
    fn test_numeric_and_string_ids_merge() {
        let records: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "category_id": 4, "subcategory_id": 9},
            {"id": 2, "category_id": "4", "subcategory_id": "9"}
        ]))
        .unwrap();
        assert_eq!(group_by_category(records).len(), 1);
    }

    #[test]
    fn test_end_to_end_with_applicant_names() {
        let records: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "category_id": 1, "subcategory_id": 1, "fields": {"Name": "Asha"}},
            {"id": 2, "category_id": 1, "subcategory_id": 1, "fields": {"Name": "Ravi"}},
            {"id": 3, "category_id": 2, "subcategory_id": 5, "fields": {"Applicant Name": "Lee"}}
        ]))
        .unwrap();

        let groups = group_by_category(&records);
        assert_eq!(keys(&groups), pairs(&[("1", "1"), ("2", "5")]));

        let names: Vec<Vec<String>> = groups
            .iter()
            .map(|g| g.members.iter().map(|r| r.applicant_name()).collect())
            .collect();
        assert_eq!(names, vec![vec!["Asha", "Ravi"], vec!["Lee"]]);
    }

    #[test]
    fn test_ids_containing_separators_stay_distinct() {
        let records: Vec<DocumentSubmission> = serde_json::from_value(json!([
            {"id": 1, "category_id": "1:2", "subcategory_id": "3"},
            {"id": 2, "category_id": "1", "subcategory_id": "2:3"}
        ]))
        .unwrap();
        let groups = group_by_category(&records);
        assert_eq!(groups.len(), 2);
        assert_ne!(groups[0].key(), groups[1].key());

        let open: std::collections::HashSet<GroupKey> = groups.iter().map(Group::key).collect();
        assert_eq!(open.len(), 2);
    }

    #[test]
    fn test_title_uses_names_or_ids() {
        let group: Group<()> = Group {
            category: EntityRef {
                id: AggregateId::from(1),
                name: Some("Certificates".into()),
            },
            subcategory: EntityRef::bare(AggregateId::from(5)),
            members: vec![],
        };
        assert_eq!(group.title(), "Certificates / #5");
    }
}
