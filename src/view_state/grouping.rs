//! Grouping of DNS records by group key for display.
//!
//! The grouped view borrows from the fetched record list and is rebuilt on
//! every render; it is never stored.

use crate::model::RawRecord;
use std::collections::HashMap;

/// Records sharing one group key, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup<'a> {
    /// Shared group key.
    pub key: &'a str,
    /// Records with at least one response.
    pub records: Vec<&'a RawRecord>,
}

/// Insertion-ordered map from group key to its records.
///
/// Keys appear in first-seen order. Records without responses are left out,
/// and a key whose records are all empty is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedView<'a> {
    groups: Vec<RecordGroup<'a>>,
}

impl<'a> GroupedView<'a> {
    /// Groups in first-seen key order.
    pub fn groups(&self) -> &[RecordGroup<'a>] {
        &self.groups
    }

    /// Records for `key`, if the key is present.
    pub fn get(&self, key: &str) -> Option<&[&'a RawRecord]> {
        self.groups
            .iter()
            .find(|group| group.key == key)
            .map(|group| group.records.as_slice())
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|group| group.key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// No key has a record with responses.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group `records` by key in a single pass.
///
/// Relative order is preserved; nothing is sorted or deduplicated.
pub fn group(records: &[RawRecord]) -> GroupedView<'_> {
    let mut groups: Vec<RecordGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|record| record.has_responses()) {
        let key = record.group_key.as_str();
        match index.get(key) {
            Some(&slot) => groups[slot].records.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(RecordGroup {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    GroupedView { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoAnnotation, ResponseEntry};

    fn record(key: &str, record_type: &str, data: &[&str]) -> RawRecord {
        RawRecord {
            group_key: key.to_string(),
            record_type: record_type.to_string(),
            responses: data
                .iter()
                .map(|d| ResponseEntry {
                    record_data: d.to_string(),
                    geo_annotations: vec![],
                })
                .collect(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn empty_input_is_empty_view() {
        let view = group(&[]);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn all_empty_records_give_empty_view() {
        let records = vec![record("@", "A", &[]), record("www", "AAAA", &[])];
        assert!(group(&records).is_empty());
    }

    #[test]
    fn keys_follow_first_appearance() {
        let records = vec![
            record("www", "A", &["1.1.1.1"]),
            record("@", "MX", &["10 mx"]),
            record("www", "AAAA", &["::1"]),
        ];

        let view = group(&records);

        assert_eq!(view.keys().collect::<Vec<_>>(), vec!["www", "@"]);
        let www = view.get("www").unwrap();
        assert_eq!(www.len(), 2);
        assert_eq!(www[0].record_type, "A");
        assert_eq!(www[1].record_type, "AAAA");
    }

    #[test]
    fn empty_record_does_not_create_or_reorder_key() {
        let records = vec![
            record("mail", "MX", &[]),
            record("@", "A", &["1.2.3.4"]),
            record("mail", "TXT", &["v=spf1"]),
        ];

        let view = group(&records);

        assert_eq!(view.keys().collect::<Vec<_>>(), vec!["@", "mail"]);
        assert_eq!(view.get("mail").unwrap().len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let records = vec![
            record("@", "NS", &["ns1"]),
            record("@", "NS", &["ns1"]),
        ];
        assert_eq!(group(&records).get("@").unwrap().len(), 2);
    }

    #[test]
    fn records_without_geo_are_kept() {
        let records = vec![record("@", "A", &["1.2.3.4"])];
        assert_eq!(group(&records).len(), 1);
    }

    #[test]
    fn a_record_with_geo_groups_unchanged() {
        let mut with_geo = record("A", "A", &["1.2.3.4"]);
        with_geo.responses[0].geo_annotations.push(GeoAnnotation {
            ip: "1.2.3.4".to_string(),
            country: "NL".to_string(),
            ..GeoAnnotation::default()
        });
        let records = vec![with_geo, record("A", "A", &[])];

        let view = group(&records);

        let group_a = view.get("A").unwrap();
        assert_eq!(group_a.len(), 1);
        assert!(!group_a[0].shows_record_data());
        assert_eq!(group_a[0].responses[0].record_data, "1.2.3.4");
    }

    #[test]
    fn view_borrows_input_records() {
        let records = vec![record("@", "A", &["1.2.3.4"])];
        let view = group(&records);
        assert!(std::ptr::eq(view.get("@").unwrap()[0], &records[0]));
    }
}
