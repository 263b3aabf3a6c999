use super::escape::quote_literal;
use super::item::{Condition, ConditionValue, Group, LogicalOp, Operator, WhereItem};
use crate::config::ConditionConfig;
use crate::error::ValidationError;
use itertools::Itertools;

/// Outcome of [`WhereCompiler::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The errors as user-facing strings, in discovery order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Compiles condition trees into SQL fragments usable after `WHERE`.
///
/// All three operations are pure and independent: `compile` never consults
/// `validate`, so an invalid tree still gets a best-effort preview.
#[derive(Debug, Clone)]
pub struct WhereCompiler {
    max_depth: usize,
    allow_valueless_null_checks: bool,
    default_connective: LogicalOp,
}

pub struct WhereCompilerBuilder {
    max_depth: usize,
    allow_valueless_null_checks: bool,
    default_connective: LogicalOp,
}

impl Default for WhereCompilerBuilder {
    fn default() -> Self {
        let config = ConditionConfig::default();
        Self {
            max_depth: config.max_depth,
            allow_valueless_null_checks: config.allow_valueless_null_checks,
            default_connective: LogicalOp::And,
        }
    }
}

impl WhereCompilerBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
    pub fn allow_valueless_null_checks(mut self, allow: bool) -> Self {
        self.allow_valueless_null_checks = allow;
        self
    }
    /// Connective used for a non-first sibling that has none of its own.
    pub fn with_default_connective(mut self, op: LogicalOp) -> Self {
        self.default_connective = op;
        self
    }
    pub fn build(self) -> WhereCompiler {
        WhereCompiler {
            max_depth: self.max_depth,
            allow_valueless_null_checks: self.allow_valueless_null_checks,
            default_connective: self.default_connective,
        }
    }
}

impl Default for WhereCompiler {
    fn default() -> Self {
        WhereCompilerBuilder::default().build()
    }
}

impl WhereCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> WhereCompilerBuilder {
        WhereCompilerBuilder::new()
    }

    pub fn from_config(config: &ConditionConfig) -> Self {
        Self::builder()
            .with_max_depth(config.max_depth)
            .allow_valueless_null_checks(config.allow_valueless_null_checks)
            .build()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Renders `items` as a SQL fragment.
    ///
    /// Items that render to nothing (empty groups, conditions without a field
    /// or operator) are skipped entirely, connective included, so the output
    /// never starts or ends with `AND`/`OR`.
    pub fn compile(&self, items: &[WhereItem]) -> String {
        let mut sql = String::new();
        for item in items {
            let fragment = match item {
                WhereItem::Condition(condition) => self.compile_condition(condition),
                WhereItem::Group(group) => self.compile_group(group),
            };
            if fragment.is_empty() {
                continue;
            }
            if !sql.is_empty() {
                let op = item.logical_op().unwrap_or(self.default_connective);
                sql.push(' ');
                sql.push_str(op.as_sql());
                sql.push(' ');
            }
            sql.push_str(&fragment);
        }
        sql
    }

    fn compile_group(&self, group: &Group) -> String {
        let inner = self.compile(&group.children);
        if inner.is_empty() {
            inner
        } else {
            format!("({})", inner)
        }
    }

    fn compile_condition(&self, condition: &Condition) -> String {
        let field = condition.field.trim();
        let Some(operator) = condition.operator else {
            return String::new();
        };
        if field.is_empty() {
            return String::new();
        }
        let value = condition.value.as_ref();

        match operator {
            Operator::Eq
            | Operator::NotEq
            | Operator::Gt
            | Operator::Lt
            | Operator::GtEq
            | Operator::LtEq
            | Operator::Like
            | Operator::NotLike => {
                format!("{} {} {}", field, operator, quote_literal(&value_text(value)))
            }
            Operator::In | Operator::NotIn => {
                let list = value
                    .map(|v| v.scalars().iter().map(|s| quote_literal(&s.to_string())).join(", "))
                    .unwrap_or_default();
                format!("{} {} ({})", field, operator, list)
            }
            Operator::Between | Operator::NotBetween => {
                let bound = |index: usize| {
                    let raw = value
                        .and_then(|v| v.scalars().get(index))
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    quote_literal(&raw)
                };
                format!("{} {} {} AND {}", field, operator, bound(0), bound(1))
            }
            Operator::IsNull | Operator::IsNotNull => format!("{} {}", field, operator),
        }
    }

    /// Scores how hard a tree is to read: every item adds its depth, with
    /// root items at depth 1.
    pub fn complexity(&self, items: &[WhereItem]) -> usize {
        Self::complexity_at(items, 1)
    }

    fn complexity_at(items: &[WhereItem], depth: usize) -> usize {
        items
            .iter()
            .map(|item| match item {
                WhereItem::Condition(_) => depth,
                WhereItem::Group(group) => depth + Self::complexity_at(&group.children, depth + 1),
            })
            .sum()
    }

    /// Checks a tree for incomplete conditions, empty groups, and excessive nesting.
    pub fn validate(&self, items: &[WhereItem]) -> ValidationReport {
        let mut errors = Vec::new();
        self.validate_at(items, 0, &mut errors);
        ValidationReport::from_errors(errors)
    }

    fn validate_at(&self, items: &[WhereItem], depth: usize, errors: &mut Vec<ValidationError>) {
        for item in items {
            match item {
                WhereItem::Condition(condition) => self.validate_condition(condition, errors),
                WhereItem::Group(group) => {
                    if group.children.is_empty() {
                        errors.push(ValidationError::EmptyGroup(group.id.clone()));
                    } else if depth + 1 > self.max_depth {
                        errors.push(ValidationError::TooDeep {
                            group_id: group.id.clone(),
                            max_depth: self.max_depth,
                        });
                    } else {
                        self.validate_at(&group.children, depth + 1, errors);
                    }
                }
            }
        }
    }

    fn validate_condition(&self, condition: &Condition, errors: &mut Vec<ValidationError>) {
        if condition.field.trim().is_empty() {
            errors.push(ValidationError::MissingField(condition.id.clone()));
        }
        if condition.operator.is_none() {
            errors.push(ValidationError::MissingOperator(condition.id.clone()));
        }

        let exempt = self.allow_valueless_null_checks
            && condition.operator.is_some_and(Operator::is_null_check);
        match &condition.value {
            None => {
                if !exempt {
                    errors.push(ValidationError::MissingValue(condition.id.clone()));
                }
            }
            Some(value) if value.is_empty() => {
                if !exempt {
                    errors.push(ValidationError::MissingValue(condition.id.clone()));
                }
            }
            Some(value) => {
                if let Some(op) = condition.operator.filter(|op| op.is_range()) {
                    if value.len() != 2 {
                        errors.push(ValidationError::RangeArity {
                            id: condition.id.clone(),
                            operator: op.to_string(),
                            found: value.len(),
                        });
                    }
                }
            }
        }
    }
}

/// Text of a value for single-literal operators. Lists are joined with commas.
fn value_text(value: Option<&ConditionValue>) -> String {
    match value {
        None => String::new(),
        Some(ConditionValue::Single(scalar)) => scalar.to_string(),
        Some(ConditionValue::List(items)) => items.iter().join(","),
    }
}
