// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::ids::RecordId;
use crate::model::{Field, Record, ValueField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

/// Per-field allowed-value sets. An empty set imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub status: BTreeSet<String>,
    pub priority: BTreeSet<String>,
    pub assignee: BTreeSet<String>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.priority.is_empty() && self.assignee.is_empty()
    }

    pub fn allows(&self, record: &Record) -> bool {
        (self.status.is_empty() || self.status.contains(record.status.as_str()))
            && (self.priority.is_empty() || self.priority.contains(record.priority.as_str()))
            && (self.assignee.is_empty() || self.assignee.contains(record.assignee.as_str()))
    }

    pub fn set_for(&mut self, field: Field) -> Option<&mut BTreeSet<String>> {
        match field {
            Field::Status => Some(&mut self.status),
            Field::Priority => Some(&mut self.priority),
            Field::Assignee => Some(&mut self.assignee),
            _ => None,
        }
    }

    pub fn get(&self, field: Field) -> Option<&BTreeSet<String>> {
        match field {
            Field::Status => Some(&self.status),
            Field::Priority => Some(&self.priority),
            Field::Assignee => Some(&self.assignee),
            _ => None,
        }
    }

    pub fn toggle(&mut self, field: Field, value: &str) -> bool {
        let Some(set) = self.set_for(field) else {
            return false;
        };
        if !set.remove(value) {
            set.insert(value.to_owned());
        }
        true
    }
}

/// Ephemeral view state; every piece resets independently of the others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search: String,
    pub filters: FilterConfig,
    pub sort: Option<SortSpec>,
    pub hidden_fields: BTreeSet<Field>,
    pub selected: BTreeSet<RecordId>,
}

impl ViewState {
    /// Columns currently shown, in display order.
    pub fn visible_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.hidden_fields.contains(field))
            .collect()
    }

    pub fn hide_field(&mut self, field: Field) -> bool {
        if self.hidden_fields.len() + 1 >= Field::ALL.len() {
            return false;
        }
        self.hidden_fields.insert(field)
    }

    pub fn show_all_fields(&mut self) {
        self.hidden_fields.clear();
    }

    /// First click on a column sorts ascending; clicking the sorted
    /// column again flips the direction.
    pub fn cycle_sort(&mut self, field: Field) -> SortDirection {
        let direction = match self.sort {
            Some(SortSpec {
                field: current,
                direction: SortDirection::Asc,
            }) if current == field => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortSpec { field, direction });
        direction
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn toggle_selected(&mut self, id: RecordId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select-all covers the full store, not the filtered view; a second
    /// invocation with everything selected clears the set.
    pub fn toggle_select_all(&mut self, all_ids: &[RecordId]) {
        if self.selected.len() == all_ids.len() && !all_ids.is_empty() {
            self.selected.clear();
        } else {
            self.selected = all_ids.iter().copied().collect();
        }
    }
}

/// The derived view: filter, then stable sort. Pure function of the row
/// slice and view state; recomputed on every use.
pub fn derived_rows<'a>(rows: &'a [Record], view: &ViewState) -> Vec<&'a Record> {
    let term = view.search.to_lowercase();
    let mut out: Vec<&Record> = rows
        .iter()
        .filter(|row| matches_search(row, &term) && view.filters.allows(row))
        .collect();

    if let Some(sort) = view.sort {
        out.sort_by(|left, right| {
            let order = compare_field(left, right, sort.field);
            match sort.direction {
                SortDirection::Asc => order,
                SortDirection::Desc => order.reverse(),
            }
        });
    }

    out
}

fn matches_search(record: &Record, lowered_term: &str) -> bool {
    if lowered_term.is_empty() {
        return true;
    }
    if record.id.get().to_string().contains(lowered_term) {
        return true;
    }
    Field::ALL
        .into_iter()
        .any(|field| record.field_text(field).to_lowercase().contains(lowered_term))
}

fn compare_field(left: &Record, right: &Record, field: Field) -> Ordering {
    if field == Field::Value {
        return match (&left.value, &right.value) {
            (ValueField::Amount(left), ValueField::Amount(right)) => left.cmp(right),
            (ValueField::Amount(_), ValueField::Raw(_)) => Ordering::Less,
            (ValueField::Raw(_), ValueField::Amount(_)) => Ordering::Greater,
            (ValueField::Raw(left), ValueField::Raw(right)) => left.cmp(right),
        };
    }
    left.field_text(field).cmp(&right.field_text(field))
}
