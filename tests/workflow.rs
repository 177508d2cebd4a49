use chrono::NaiveDate;
use daynotes::config::AppConfig;
use daynotes::models::{
    BucketLabel, Clock, FixedClock, Mode, NoteGroups, NoteStore, NoteStoreError, group_notes,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn new_store() -> NoteStore<FixedClock> {
    NoteStore::with_clock(FixedClock(today()))
}

fn add(store: &mut NoteStore<FixedClock>, title: &str, content: &str) -> u64 {
    store.start_create();
    store.update_draft_title(title);
    store.update_draft_content(content);
    store.save().unwrap()
}

fn regroup(store: &NoteStore<FixedClock>) -> NoteGroups<'_> {
    let clock = store.clock();
    group_notes(store.all_notes(), clock.today(), clock.yesterday())
}

#[test]
fn empty_store_renders_nothing() {
    let store = new_store();
    let groups = regroup(&store);

    assert!(store.all_notes().is_empty());
    assert!(groups.buckets.is_empty());
    assert_eq!(groups.total, 0);
}

#[test]
fn created_note_lands_in_today() {
    let mut store = new_store();
    add(&mut store, "A", "B");

    let note = &store.all_notes()[0];
    assert_eq!(
        (note.id, note.title.as_str(), note.content.as_str(), note.date),
        (1, "A", "B", today())
    );

    let groups = regroup(&store);
    assert_eq!(groups.buckets.len(), 1);
    assert_eq!(groups.buckets[0].label, BucketLabel::Today);
    assert_eq!(groups.buckets[0].notes[0].id, 1);
    assert_eq!(groups.total, 1);
}

#[test]
fn deleted_ids_are_not_handed_out_again() {
    let mut store = new_store();
    add(&mut store, "first", "");
    add(&mut store, "second", "");

    store.delete(1);
    let remaining: Vec<_> = store.all_notes().iter().map(|n| n.id).collect();
    assert_eq!(remaining, vec![2]);

    assert_eq!(add(&mut store, "third", ""), 3);
}

#[test]
fn editing_missing_note_reports_not_found() {
    let mut store = new_store();
    add(&mut store, "only", "");

    assert_eq!(store.start_edit(2), Err(NoteStoreError::NotFound(2)));
    assert_eq!(store.mode(), Mode::Browsing);
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_round_trip_updates_card_in_place() {
    let mut store = new_store();
    let id = add(&mut store, "draft", "todo");
    add(&mut store, "other", "");

    store.start_edit(id).unwrap();
    store.update_draft_content("done");
    store.save().unwrap();

    let groups = regroup(&store);
    let cards: Vec<_> = groups.buckets[0]
        .notes
        .iter()
        .map(|n| (n.id, n.content.as_str()))
        .collect();
    assert_eq!(cards, vec![(1, "done"), (2, "")]);
}

#[test]
fn older_note_gets_its_own_dated_bucket() {
    let three_days_ago = today() - chrono::Days::new(3);
    let four_days_ago = today() - chrono::Days::new(4);

    let mut store = NoteStore::with_clock(FixedClock(three_days_ago));
    store.start_create();
    store.save().unwrap();

    let mut notes = store.all_notes().to_vec();
    let mut older = notes[0].clone();
    older.id = 2;
    older.date = four_days_ago;
    notes.push(older);

    let groups = NoteGroups::for_clock(&notes, &FixedClock(today()));
    let labels: Vec<_> = groups.buckets.iter().map(|b| b.label).collect();
    assert_eq!(
        labels,
        vec![
            BucketLabel::Date(three_days_ago),
            BucketLabel::Date(four_days_ago)
        ]
    );

    let config = AppConfig::default();
    assert_eq!(
        groups.buckets[0]
            .label
            .render(&config.labels, &config.date_format),
        "12/10/2026"
    );
}
