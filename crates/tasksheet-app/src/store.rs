// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::OffsetDateTime;

use crate::ids::RecordId;
use crate::model::{Field, Priority, PriorityField, Record, Status, StatusField, ValueField};

/// The authoritative in-memory row collection. Rows are ordered by
/// insertion; ids are unique and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetStore {
    rows: Vec<Record>,
}

impl SheetStore {
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// The fixed startup sample set.
    pub fn seeded() -> Self {
        Self {
            rows: sample_rows(),
        }
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn record_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    /// Writes edited text into one field of the row matched by identity.
    /// Returns false when no row has the id. Text is accepted verbatim.
    pub fn update_field(&mut self, id: RecordId, field: Field, text: &str) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.set_field(field, text);
                true
            }
            None => false,
        }
    }

    /// Appends a new row with an id strictly greater than every existing
    /// id. Existing rows are untouched.
    pub fn add_row(&mut self) -> RecordId {
        let next = self
            .rows
            .iter()
            .map(|row| row.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let id = RecordId::new(next);
        self.rows.push(Record {
            id,
            task: "New Task".to_owned(),
            date: OffsetDateTime::now_utc().date().to_string(),
            status: StatusField::Known(Status::NeedToStart),
            submitter: String::new(),
            url: String::new(),
            assignee: String::new(),
            priority: PriorityField::Known(Priority::Medium),
            due_date: String::new(),
            value: ValueField::Amount(0),
        });
        id
    }

    /// Replaces the whole store, e.g. from a seed-rows file. Ids must be
    /// unique.
    pub fn replace_rows(&mut self, rows: Vec<Record>) -> Result<()> {
        let mut seen = Vec::with_capacity(rows.len());
        for row in &rows {
            if seen.contains(&row.id) {
                bail!("duplicate record id {}", row.id.get());
            }
            seen.push(row.id);
        }
        self.rows = rows;
        Ok(())
    }
}

/// The original five sample rows, ids 1-5.
pub fn sample_rows() -> Vec<Record> {
    vec![
        Record {
            id: RecordId::new(1),
            task: "Launch social media campaign for product launch".to_owned(),
            date: "2024-11-15".to_owned(),
            status: StatusField::Known(Status::InProcess),
            submitter: "Asha Patel".to_owned(),
            url: "https://www.ashapatel.com".to_owned(),
            assignee: "Sophie Choudhury".to_owned(),
            priority: PriorityField::Known(Priority::Medium),
            due_date: "2024-11-20".to_owned(),
            value: ValueField::Amount(6_200_000),
        },
        Record {
            id: RecordId::new(2),
            task: "Update press kit for company redesign".to_owned(),
            date: "2024-10-28".to_owned(),
            status: StatusField::Known(Status::NeedToStart),
            submitter: "Irfan Khan".to_owned(),
            url: "https://www.irfankhan.com".to_owned(),
            assignee: "Rachel Thompson".to_owned(),
            priority: PriorityField::Known(Priority::High),
            due_date: "2024-10-30".to_owned(),
            value: ValueField::Amount(3_500_000),
        },
        Record {
            id: RecordId::new(3),
            task: "Finalize user testing feedback for app update".to_owned(),
            date: "2024-12-05".to_owned(),
            status: StatusField::Known(Status::InProcess),
            submitter: "Mark Johnson".to_owned(),
            url: "https://www.markjohnson.co".to_owned(),
            assignee: "Rachel Lee".to_owned(),
            priority: PriorityField::Known(Priority::Medium),
            due_date: "2024-12-10".to_owned(),
            value: ValueField::Amount(4_750_000),
        },
        Record {
            id: RecordId::new(4),
            task: "Design new features for the website".to_owned(),
            date: "2025-01-10".to_owned(),
            status: StatusField::Known(Status::Complete),
            submitter: "Emily Green".to_owned(),
            url: "https://www.emilygreen.dev".to_owned(),
            assignee: "Tom Wright".to_owned(),
            priority: PriorityField::Known(Priority::Low),
            due_date: "2025-01-15".to_owned(),
            value: ValueField::Amount(5_800_000),
        },
        Record {
            id: RecordId::new(5),
            task: "Prepare financial report for Q4".to_owned(),
            date: "2025-01-25".to_owned(),
            status: StatusField::Known(Status::Blocked),
            submitter: "Jessica Brown".to_owned(),
            url: "https://www.jessicabrown.finance".to_owned(),
            assignee: "Kevin Smith".to_owned(),
            priority: PriorityField::Known(Priority::Low),
            due_date: "2025-01-30".to_owned(),
            value: ValueField::Amount(2_800_000),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{SheetStore, sample_rows};
    use crate::ids::RecordId;
    use crate::model::{Field, Status, StatusField, ValueField};

    #[test]
    fn seeded_store_matches_sample_set() {
        let store = SheetStore::seeded();
        assert_eq!(store.len(), 5);
        assert_eq!(store.rows()[1].submitter, "Irfan Khan");
        assert_eq!(store.rows()[4].status, StatusField::Known(Status::Blocked));
    }

    #[test]
    fn seeded_ids_are_unique() {
        let store = SheetStore::seeded();
        let mut ids = store.record_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn update_field_touches_exactly_one_row_and_field() {
        let mut store = SheetStore::seeded();
        let before = store.clone();

        assert!(store.update_field(RecordId::new(3), Field::Task, "Ship feedback summary"));

        for (row, old) in store.rows().iter().zip(before.rows()) {
            if row.id == RecordId::new(3) {
                assert_eq!(row.task, "Ship feedback summary");
                for field in Field::ALL {
                    if field != Field::Task {
                        assert_eq!(row.field_text(field), old.field_text(field));
                    }
                }
            } else {
                assert_eq!(row, old);
            }
        }
    }

    #[test]
    fn update_field_with_unknown_id_is_a_no_op() {
        let mut store = SheetStore::seeded();
        let before = store.clone();
        assert!(!store.update_field(RecordId::new(99), Field::Task, "nope"));
        assert_eq!(store, before);
    }

    #[test]
    fn update_field_accepts_out_of_domain_status_text() {
        let mut store = SheetStore::seeded();
        assert!(store.update_field(RecordId::new(1), Field::Status, "Waiting on legal"));
        assert_eq!(
            store.record(RecordId::new(1)).map(|row| row.status.as_str()),
            Some("Waiting on legal")
        );
    }

    #[test]
    fn add_row_appends_with_strictly_greater_id() {
        let mut store = SheetStore::seeded();
        let before = store.rows().to_vec();

        let id = store.add_row();
        assert_eq!(id, RecordId::new(6));
        assert_eq!(store.len(), 6);
        assert_eq!(&store.rows()[..5], &before[..]);

        let row = store.record(id).expect("appended row");
        assert_eq!(row.task, "New Task");
        assert_eq!(row.status, StatusField::Known(Status::NeedToStart));
        assert_eq!(row.value, ValueField::Amount(0));
        assert!(row.due_date.is_empty());
    }

    #[test]
    fn add_row_after_gaps_still_exceeds_every_existing_id() {
        let mut store = SheetStore::new();
        let mut rows = sample_rows();
        rows.remove(0);
        store.replace_rows(rows).expect("unique ids");

        let id = store.add_row();
        assert_eq!(id, RecordId::new(6));
    }

    #[test]
    fn add_row_on_empty_store_starts_at_one() {
        let mut store = SheetStore::new();
        assert_eq!(store.add_row(), RecordId::new(1));
    }

    #[test]
    fn replace_rows_rejects_duplicate_ids() {
        let mut store = SheetStore::new();
        let mut rows = sample_rows();
        rows[1].id = rows[0].id;
        let error = store.replace_rows(rows).expect_err("duplicate ids");
        assert!(error.to_string().contains("duplicate record id"));
    }
}
