//! Query sessions.
//!
//! A [`QuerySession`] owns a dataset plus the filter text and sort column a
//! user is working with, and keeps the visible rows in sync with them.

use logsieve_lang::{
    append_clauses, clauses_for_value, diagnose, parse_strict, render, LangError, ParseError,
    ParseOutcome,
};
use logsieve_proto::{CompareOp, FieldPath, JoinOp, Predicate, Record, SortConfig, Value};
use tracing::debug;

use crate::error::CoreError;
use crate::facet::FacetCatalogue;
use crate::query::{sort_indices, FilterEvaluator};
use crate::schema::Schema;

/// A change to one parsed clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateEdit {
    /// Replace the field path.
    Field(String),
    /// Replace the comparison operator.
    Operator(CompareOp),
    /// Replace the literal.
    Value(String),
    /// Replace the join keyword in front of the clause.
    Join(JoinOp),
}

/// Counters describing the session's work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of times the view was recomputed.
    pub recomputes: u64,
    /// Number of changes that left the inputs unchanged.
    pub skipped: u64,
    /// Records in the dataset.
    pub total: usize,
    /// Records passing the filter.
    pub visible: usize,
    /// Accepted clauses.
    pub predicates: usize,
    /// Dropped clauses.
    pub rejected: usize,
}

/// Inputs the visible rows were computed from.
#[derive(Debug, Clone, PartialEq)]
struct ViewKey {
    generation: u64,
    filter_text: String,
    sort: SortConfig,
}

/// Dataset plus filter and sort state.
#[derive(Debug, Default)]
pub struct QuerySession {
    records: Vec<Record>,
    generation: u64,
    schema: Schema,
    facets: FacetCatalogue,
    filter_text: String,
    sort: SortConfig,
    parsed: ParseOutcome,
    visible: Vec<usize>,
    computed: Option<ViewKey>,
    stats: SessionStats,
}

impl QuerySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over a dataset.
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut session = Self::new();
        session.load(records);
        session
    }

    /// Install a dataset, keeping the filter and sort.
    pub fn load(&mut self, records: Vec<Record>) {
        self.schema = Schema::infer(&records);
        self.facets = FacetCatalogue::extract(&records);
        self.records = records;
        self.generation += 1;
        debug!(
            generation = self.generation,
            records = self.records.len(),
            columns = self.schema.len(),
            facets = self.facets.len(),
            "Dataset loaded"
        );
        self.recompute();
    }

    /// Replace the filter text.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.recompute();
    }

    /// Replace the filter text only if every clause parses.
    ///
    /// On error the session is left untouched.
    pub fn try_set_filter_text(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        let text = text.into();
        parse_strict(&text).map_err(LangError::from)?;
        self.set_filter_text(text);
        Ok(())
    }

    /// Remove every clause.
    pub fn clear_filters(&mut self) {
        self.set_filter_text(String::new());
    }

    /// Sort by `column`, flipping the direction when it is already the
    /// ascending sort column.
    pub fn set_sort(&mut self, column: impl Into<FieldPath>) {
        self.sort = self.sort.toggled(column);
        self.recompute();
    }

    /// Replace the sort configuration.
    pub fn set_sort_config(&mut self, config: SortConfig) {
        self.sort = config;
        self.recompute();
    }

    /// Add equality clauses selecting `value` at `field`.
    ///
    /// Object values add one clause per leaf.
    pub fn append_filter_from_value(&mut self, field: &str, value: &Value) {
        let clauses = clauses_for_value(field, value);
        let text = append_clauses(&self.filter_text, &clauses);
        self.set_filter_text(text);
    }

    /// Edit one accepted clause and rewrite the filter text from the result.
    ///
    /// Rewriting drops clauses the parser had rejected.
    pub fn update_predicate(&mut self, index: usize, edit: PredicateEdit) -> Result<(), CoreError> {
        let mut predicates = self.parsed.predicates();
        let len = predicates.len();
        let predicate = predicates
            .get_mut(index)
            .ok_or(CoreError::PredicateIndex { index, len })?;

        match edit {
            PredicateEdit::Field(field) => predicate.field = FieldPath::new(field),
            PredicateEdit::Operator(op) => predicate.operator = op,
            PredicateEdit::Value(literal) => predicate.literal = literal,
            PredicateEdit::Join(join) => {
                if index == 0 {
                    return Err(CoreError::LeadingJoin);
                }
                predicate.join = join;
            }
        }

        self.set_filter_text(render(&predicates));
        Ok(())
    }

    /// Remove one accepted clause and rewrite the filter text.
    pub fn remove_predicate(&mut self, index: usize) -> Result<(), CoreError> {
        let mut predicates = self.parsed.predicates();
        if index >= predicates.len() {
            return Err(CoreError::PredicateIndex {
                index,
                len: predicates.len(),
            });
        }
        predicates.remove(index);
        self.set_filter_text(render(&predicates));
        Ok(())
    }

    /// Rows passing the filter, in sort order.
    pub fn rows(&self) -> impl Iterator<Item = &Record> {
        self.visible.iter().map(|&i| &self.records[i])
    }

    /// Dataset positions of the visible rows.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Number of records in the dataset.
    pub fn total_len(&self) -> usize {
        self.records.len()
    }

    /// Every record, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    /// Inferred schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Facet catalogue of the dataset.
    pub fn facets(&self) -> &FacetCatalogue {
        &self.facets
    }

    /// Accepted clauses of the current filter.
    pub fn predicates(&self) -> Vec<Predicate> {
        self.parsed.predicates()
    }

    /// Clauses the parser dropped from the current filter.
    pub fn rejected_clauses(&self) -> &[ParseError] {
        &self.parsed.rejected
    }

    /// Current filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Current sort configuration.
    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    /// Dataset generation, bumped by every [`QuerySession::load`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Work counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    fn recompute(&mut self) {
        let key = ViewKey {
            generation: self.generation,
            filter_text: self.filter_text.clone(),
            sort: self.sort.clone(),
        };
        if self.computed.as_ref() == Some(&key) {
            self.stats.skipped += 1;
            return;
        }

        let text_changed = self
            .computed
            .as_ref()
            .map_or(true, |prev| prev.filter_text != key.filter_text);
        if text_changed {
            self.parsed = diagnose(&self.filter_text);
        }

        let predicates = self.parsed.predicates();
        let mut visible = FilterEvaluator::filter_indices(&self.records, &predicates);
        sort_indices(&self.records, &mut visible, &self.sort);
        self.visible = visible;
        self.computed = Some(key);

        self.stats.recomputes += 1;
        self.stats.total = self.records.len();
        self.stats.visible = self.visible.len();
        self.stats.predicates = predicates.len();
        self.stats.rejected = self.parsed.rejected.len();
        debug!(
            total = self.stats.total,
            visible = self.stats.visible,
            predicates = self.stats.predicates,
            rejected = self.stats.rejected,
            sort = ?self.sort.key,
            direction = %self.sort.direction,
            "View recomputed"
        );
    }
}
