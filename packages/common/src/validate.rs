//! Structural validation of loaded documents.

use crate::visitor::{walk_column, walk_row, walk_template, Visitor};
use mailblocks_model::{check_invariants, Column, Content, InvariantViolation, Row, Template};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityKind {
    Body,
    Row,
    Column,
    Content,
}

/// Tally of every id in a template.
#[derive(Debug, Default)]
pub struct IdCensus {
    ids: BTreeMap<String, Vec<EntityKind>>,
    pub rows: usize,
    pub columns: usize,
    pub contents: usize,
}

impl IdCensus {
    pub fn of(template: &Template) -> Self {
        let mut census = Self::default();
        census.visit_template(template);
        census
    }

    fn record(&mut self, id: &str, kind: EntityKind) {
        self.ids.entry(id.to_string()).or_default().push(kind);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Every distinct id, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Ids that occur more than once, with their occurrence count.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ids
            .iter()
            .filter(|(_, kinds)| kinds.len() > 1)
            .map(|(id, kinds)| (id.as_str(), kinds.len()))
    }
}

impl Visitor for IdCensus {
    fn visit_template(&mut self, template: &Template) {
        self.record(&template.body.id, EntityKind::Body);
        walk_template(self, template);
    }

    fn visit_row(&mut self, row: &Row) {
        self.rows += 1;
        self.record(&row.id, EntityKind::Row);
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        self.columns += 1;
        self.record(&column.id, EntityKind::Column);
        walk_column(self, column);
    }

    fn visit_content(&mut self, content: &Content) {
        self.contents += 1;
        self.record(&content.id, EntityKind::Content);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error(transparent)]
    Layout(#[from] InvariantViolation),

    #[error("id `{id}` is used {count} times")]
    DuplicateId { id: String, count: usize },
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub rows: usize,
    pub columns: usize,
    pub contents: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check layout invariants and id uniqueness.
pub fn validate(template: &Template) -> ValidationReport {
    let census = IdCensus::of(template);

    let mut issues: Vec<ValidationIssue> = check_invariants(template)
        .into_iter()
        .map(ValidationIssue::from)
        .collect();
    issues.extend(census.duplicates().map(|(id, count)| ValidationIssue::DuplicateId {
        id: id.to_string(),
        count,
    }));

    ValidationReport {
        issues,
        rows: census.rows,
        columns: census.columns,
        contents: census.contents,
    }
}
