use std::collections::BTreeMap;

use annot_core::domain::WorkCitation;

pub const DEFAULT_GROUP_DELIMITER: &str = "|||";

/// Group `items` by the values `keys` extract, joined with `delimiter`.
/// Items keep their relative order inside each group.
pub fn group_by_keys<T, K>(items: &[T], keys: &[K], delimiter: &str) -> BTreeMap<String, Vec<T>>
where
    T: Clone,
    K: Fn(&T) -> String,
{
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        let group_key = keys
            .iter()
            .map(|key| key(item))
            .collect::<Vec<_>>()
            .join(delimiter);
        groups.entry(group_key).or_default().push(item.clone());
    }
    groups
}

/// Work citations grouped by the folder they were retrieved from. Citations
/// without a label land under the empty key.
pub fn group_work_citations_by_label(
    citations: &[WorkCitation],
) -> BTreeMap<String, Vec<WorkCitation>> {
    let by_label = |c: &WorkCitation| c.label.clone().unwrap_or_default();
    group_by_keys(citations, &[by_label], DEFAULT_GROUP_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(index: usize, label: Option<&str>, short_name: &str) -> WorkCitation {
        WorkCitation {
            content: short_name.to_string(),
            label: label.map(str::to_string),
            index,
            short_name: short_name.to_string(),
            page_number: Some(1.0),
        }
    }

    #[test]
    fn groups_by_label_preserving_order() {
        let citations = vec![
            citation(1, Some("hr"), "hr/a.pdf"),
            citation(2, Some("legal"), "legal/b.pdf"),
            citation(3, Some("hr"), "hr/c.pdf"),
            citation(4, None, "d.pdf"),
        ];
        let groups = group_work_citations_by_label(&citations);
        assert_eq!(groups.len(), 3);
        let hr: Vec<usize> = groups["hr"].iter().map(|c| c.index).collect();
        assert_eq!(hr, vec![1, 3]);
        assert_eq!(groups[""][0].short_name, "d.pdf");
    }

    #[test]
    fn composite_keys_use_delimiter() {
        let items: Vec<(String, i32)> = vec![("a".into(), 1), ("a".into(), 2), ("b".into(), 1)];
        let first = |t: &(String, i32)| t.0.clone();
        let second = |t: &(String, i32)| t.1.to_string();
        let keys: [&dyn Fn(&(String, i32)) -> String; 2] = [&first, &second];
        let groups = group_by_keys(&items, &keys, DEFAULT_GROUP_DELIMITER);
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a|||1", "a|||2", "b|||1"]);
    }
}
