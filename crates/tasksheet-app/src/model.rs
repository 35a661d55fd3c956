// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProcess,
    NeedToStart,
    Complete,
    Blocked,
}

impl Status {
    pub const ALL: [Self; 4] = [
        Self::InProcess,
        Self::NeedToStart,
        Self::Complete,
        Self::Blocked,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProcess => "In-process",
            Self::NeedToStart => "Need to start",
            Self::Complete => "Complete",
            Self::Blocked => "Blocked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In-process" => Some(Self::InProcess),
            "Need to start" => Some(Self::NeedToStart),
            "Complete" => Some(Self::Complete),
            "Blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A status cell. Edits are accepted verbatim, so values outside the
/// enumerated domain are carried as raw text and rendered unstyled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusField {
    Known(Status),
    Raw(String),
}

impl StatusField {
    pub fn parse(value: &str) -> Self {
        match Status::parse(value) {
            Some(status) => Self::Known(status),
            None => Self::Raw(value.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Raw(value) => value,
        }
    }

    pub const fn known(&self) -> Option<Status> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Raw(_) => None,
        }
    }
}

impl From<String> for StatusField {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<StatusField> for String {
    fn from(value: StatusField) -> Self {
        value.as_str().to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriorityField {
    Known(Priority),
    Raw(String),
}

impl PriorityField {
    pub fn parse(value: &str) -> Self {
        match Priority::parse(value) {
            Some(priority) => Self::Known(priority),
            None => Self::Raw(value.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(priority) => priority.as_str(),
            Self::Raw(value) => value,
        }
    }

    pub const fn known(&self) -> Option<Priority> {
        match self {
            Self::Known(priority) => Some(*priority),
            Self::Raw(_) => None,
        }
    }
}

impl From<String> for PriorityField {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PriorityField> for String {
    fn from(value: PriorityField) -> Self {
        value.as_str().to_owned()
    }
}

/// A monetary cell in whole dollars. Non-numeric edits are kept as raw
/// text and skip currency formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueField {
    Amount(i64),
    Raw(String),
}

impl ValueField {
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(amount) => Self::Amount(amount),
            Err(_) => Self::Raw(value.to_owned()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Amount(amount) => amount.to_string(),
            Self::Raw(value) => value.clone(),
        }
    }

    pub const fn amount(&self) -> Option<i64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Raw(_) => None,
        }
    }
}

/// The nine data columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Task,
    Date,
    Status,
    Submitter,
    Url,
    Assignee,
    Priority,
    DueDate,
    Value,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::Task,
        Self::Date,
        Self::Status,
        Self::Submitter,
        Self::Url,
        Self::Assignee,
        Self::Priority,
        Self::DueDate,
        Self::Value,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Date => "Date",
            Self::Status => "Status",
            Self::Submitter => "Submitter",
            Self::Url => "URL",
            Self::Assignee => "Assignee",
            Self::Priority => "Priority",
            Self::DueDate => "Due Date",
            Self::Value => "Value",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Date => "date",
            Self::Status => "status",
            Self::Submitter => "submitter",
            Self::Url => "url",
            Self::Assignee => "assignee",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Value => "value",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "task" => Some(Self::Task),
            "date" => Some(Self::Date),
            "status" => Some(Self::Status),
            "submitter" => Some(Self::Submitter),
            "url" => Some(Self::Url),
            "assignee" => Some(Self::Assignee),
            "priority" => Some(Self::Priority),
            "due_date" => Some(Self::DueDate),
            "value" => Some(Self::Value),
            _ => None,
        }
    }
}

/// One work-tracking row. `date` and `due_date` hold ISO `YYYY-MM-DD`
/// text; the edit path does not reject malformed dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub task: String,
    pub date: String,
    pub status: StatusField,
    pub submitter: String,
    pub url: String,
    pub assignee: String,
    pub priority: PriorityField,
    pub due_date: String,
    pub value: ValueField,
}

impl Record {
    /// Textual form of a field, as used by search and editor prefill.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Task => self.task.clone(),
            Field::Date => self.date.clone(),
            Field::Status => self.status.as_str().to_owned(),
            Field::Submitter => self.submitter.clone(),
            Field::Url => self.url.clone(),
            Field::Assignee => self.assignee.clone(),
            Field::Priority => self.priority.as_str().to_owned(),
            Field::DueDate => self.due_date.clone(),
            Field::Value => self.value.display(),
        }
    }

    /// Writes edited text into one field. Any string is accepted;
    /// enumerated and numeric fields fall back to their raw variants.
    pub fn set_field(&mut self, field: Field, text: &str) {
        match field {
            Field::Task => self.task = text.to_owned(),
            Field::Date => self.date = text.to_owned(),
            Field::Status => self.status = StatusField::parse(text),
            Field::Submitter => self.submitter = text.to_owned(),
            Field::Url => self.url = text.to_owned(),
            Field::Assignee => self.assignee = text.to_owned(),
            Field::Priority => self.priority = PriorityField::parse(text),
            Field::DueDate => self.due_date = text.to_owned(),
            Field::Value => self.value = ValueField::parse(text),
        }
    }
}
