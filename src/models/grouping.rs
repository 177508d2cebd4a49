use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::{DEFAULT_DATE_FORMAT, Labels, is_valid_date_format};
use crate::models::{Clock, Note};

/// Formats `date` with `format`, falling back to the default pattern when
/// chrono cannot use `format`.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    if is_valid_date_format(format) {
        date.format(format).to_string()
    } else {
        warn!("Unusable date format {:?}, using {:?}", format, DEFAULT_DATE_FORMAT);
        date.format(DEFAULT_DATE_FORMAT).to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketLabel {
    Today,
    Yesterday,
    Date(NaiveDate),
}

impl BucketLabel {
    pub fn render(&self, labels: &Labels, date_format: &str) -> String {
        match self {
            BucketLabel::Today => labels.today.clone(),
            BucketLabel::Yesterday => labels.yesterday.clone(),
            BucketLabel::Date(date) => format_date(*date, date_format),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub label: BucketLabel,
    pub notes: Vec<&'a Note>,
}

/// Display-ordered projection of a note collection.
#[derive(Debug, PartialEq, Eq)]
pub struct NoteGroups<'a> {
    pub buckets: Vec<Bucket<'a>>,
    pub total: usize,
}

impl<'a> NoteGroups<'a> {
    pub fn for_clock<C: Clock>(notes: &'a [Note], clock: &C) -> Self {
        group_notes(notes, clock.today(), clock.yesterday())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Buckets `notes` into Today, Yesterday, then one bucket per remaining
/// date, most recent date first. Empty buckets are never emitted and each
/// bucket keeps the source order of its notes.
pub fn group_notes(notes: &[Note], today: NaiveDate, yesterday: NaiveDate) -> NoteGroups<'_> {
    let mut todays = Vec::new();
    let mut yesterdays = Vec::new();
    let mut by_date: BTreeMap<Reverse<NaiveDate>, Vec<&Note>> = BTreeMap::new();

    for note in notes {
        if note.date == today {
            todays.push(note);
        } else if note.date == yesterday {
            yesterdays.push(note);
        } else {
            by_date.entry(Reverse(note.date)).or_default().push(note);
        }
    }

    let mut buckets = Vec::with_capacity(by_date.len() + 2);
    if !todays.is_empty() {
        buckets.push(Bucket {
            label: BucketLabel::Today,
            notes: todays,
        });
    }
    if !yesterdays.is_empty() {
        buckets.push(Bucket {
            label: BucketLabel::Yesterday,
            notes: yesterdays,
        });
    }
    buckets.extend(by_date.into_iter().map(|(Reverse(date), notes)| Bucket {
        label: BucketLabel::Date(date),
        notes,
    }));

    NoteGroups {
        buckets,
        total: notes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedClock;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn note(id: u64, date: NaiveDate) -> Note {
        Note::new(id, format!("note {id}"), String::new(), date)
    }

    fn ids(bucket: &Bucket<'_>) -> Vec<u64> {
        bucket.notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn empty_collection_has_no_buckets() {
        let groups = group_notes(&[], day(20), day(19));
        assert!(groups.is_empty());
        assert_eq!(groups.total, 0);
    }

    #[test]
    fn single_note_today() {
        let notes = vec![note(1, day(20))];
        let groups = NoteGroups::for_clock(&notes, &FixedClock(day(20)));

        assert_eq!(groups.buckets.len(), 1);
        assert_eq!(groups.buckets[0].label, BucketLabel::Today);
        assert_eq!(ids(&groups.buckets[0]), vec![1]);
        assert_eq!(groups.total, 1);
    }

    #[test]
    fn fixed_bucket_order_and_descending_other_dates() {
        let notes = vec![
            note(1, day(3)),
            note(2, day(19)),
            note(3, day(17)),
            note(4, day(20)),
            note(5, day(3)),
            note(6, day(10)),
        ];
        let groups = group_notes(&notes, day(20), day(19));

        let labels: Vec<_> = groups.buckets.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec![
                BucketLabel::Today,
                BucketLabel::Yesterday,
                BucketLabel::Date(day(17)),
                BucketLabel::Date(day(10)),
                BucketLabel::Date(day(3)),
            ]
        );
        assert_eq!(ids(&groups.buckets[4]), vec![1, 5]);
        assert_eq!(groups.total, 6);
    }

    #[test]
    fn yesterday_bucket_skipped_when_empty() {
        let notes = vec![note(1, day(20)), note(2, day(12))];
        let groups = group_notes(&notes, day(20), day(19));

        let labels: Vec<_> = groups.buckets.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec![BucketLabel::Today, BucketLabel::Date(day(12))]);
    }

    #[test]
    fn different_old_dates_are_not_merged() {
        let notes = vec![note(1, day(17)), note(2, day(16))];
        let groups = group_notes(&notes, day(20), day(19));

        assert_eq!(groups.buckets.len(), 2);
        assert_eq!(ids(&groups.buckets[0]), vec![1]);
        assert_eq!(ids(&groups.buckets[1]), vec![2]);
    }

    #[test]
    fn every_note_appears_exactly_once() {
        let notes: Vec<_> = (1..=30)
            .map(|id| note(id, day(1 + (id as u32 * 7) % 20)))
            .collect();
        let groups = group_notes(&notes, day(20), day(19));

        let mut seen: Vec<u64> = groups.buckets.iter().flat_map(ids).collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=30).collect::<Vec<_>>());
        assert_eq!(groups.total, notes.len());
    }

    #[test]
    fn grouping_is_deterministic() {
        let notes = vec![note(1, day(5)), note(2, day(20)), note(3, day(5))];
        assert_eq!(
            group_notes(&notes, day(20), day(19)),
            group_notes(&notes, day(20), day(19))
        );
    }

    #[test]
    fn labels_render_with_configured_text() {
        let labels = Labels::default();
        assert_eq!(BucketLabel::Today.render(&labels, "%d/%m/%Y"), "Today");
        assert_eq!(
            BucketLabel::Yesterday.render(&labels, "%d/%m/%Y"),
            "Yesterday"
        );
        assert_eq!(
            BucketLabel::Date(day(3)).render(&labels, "%d/%m/%Y"),
            "03/05/2024"
        );
    }

    #[test]
    fn unusable_date_format_falls_back_to_default() {
        let labels = Labels::default();
        assert_eq!(
            BucketLabel::Date(day(3)).render(&labels, "%Q"),
            "03/05/2024"
        );
        assert_eq!(format_date(day(3), "%Y-%m-%d"), "2024-05-03");
    }
}
