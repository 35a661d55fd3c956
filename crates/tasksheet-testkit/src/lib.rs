// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixtures shared by the other crates' tests: row builders and canned
//! rows-file JSON in the on-disk schema.

use tasksheet_app::{
    Priority, PriorityField, Record, RecordId, Status, StatusField, ValueField,
};

/// A well-formed row with every field populated; tweak fields as needed.
pub fn record(id: i64, task: &str) -> Record {
    Record {
        id: RecordId::new(id),
        task: task.to_owned(),
        date: "2025-03-01".to_owned(),
        status: StatusField::Known(Status::InProcess),
        submitter: "Dana Cole".to_owned(),
        url: "https://www.example.com".to_owned(),
        assignee: "Sam Ortiz".to_owned(),
        priority: PriorityField::Known(Priority::Medium),
        due_date: "2025-03-15".to_owned(),
        value: ValueField::Amount(1_000),
    }
}

/// Two distinct rows, ids 10 and 11, in the rows-file wire format.
pub fn sample_rows_json() -> String {
    serde_json::to_string_pretty(&vec![
        Record {
            status: StatusField::Known(Status::InProcess),
            ..record(10, "Migrate billing report")
        },
        Record {
            priority: PriorityField::Known(Priority::High),
            value: ValueField::Amount(125_000),
            ..record(11, "Renew vendor contract")
        },
    ])
    .expect("serialize fixture rows")
}

/// Two rows that share an id; loading this file must fail.
pub fn duplicate_id_rows_json() -> String {
    serde_json::to_string_pretty(&vec![
        record(10, "First"),
        record(10, "Second"),
    ])
    .expect("serialize fixture rows")
}
