use serde::{Deserialize, Serialize};
use std::fmt;

/// Connective placed between a condition or group and its preceding sibling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The closed set of predicate operators the condition editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=", alias = "<>")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "NOT BETWEEN")]
    NotBetween,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// `IS NULL` and `IS NOT NULL` carry no value.
    pub fn is_null_check(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    pub fn is_range(self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single literal in a condition value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Scalar::Number)
            .unwrap_or_else(|| Scalar::Text(value.to_string()))
    }
}

/// The right-hand side of a condition: one literal or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    List(Vec<Scalar>),
    Single(Scalar),
}

impl ConditionValue {
    /// True for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            ConditionValue::List(items) => items.is_empty(),
            ConditionValue::Single(scalar) => scalar.is_empty(),
        }
    }

    /// Number of literals carried by the value.
    pub fn len(&self) -> usize {
        match self {
            ConditionValue::List(items) => items.len(),
            ConditionValue::Single(_) => 1,
        }
    }

    pub fn scalars(&self) -> &[Scalar] {
        match self {
            ConditionValue::List(items) => items,
            ConditionValue::Single(scalar) => std::slice::from_ref(scalar),
        }
    }
}

macro_rules! condition_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ConditionValue {
                fn from(value: $ty) -> Self {
                    ConditionValue::Single(value.into())
                }
            }
        )*
    };
}

condition_value_from!(&str, String, bool, i64, f64, Scalar);

impl<T: Into<Scalar>> From<Vec<T>> for ConditionValue {
    fn from(values: Vec<T>) -> Self {
        ConditionValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// A leaf predicate `field OP value`.
///
/// Every part is optional while the user is still editing; `validate`
/// reports what is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: Option<Operator>,
    #[serde(default)]
    pub value: Option<ConditionValue>,
    #[serde(default, rename = "logicalOp", alias = "logical_op")]
    pub logical_op: Option<LogicalOp>,
}

impl Condition {
    pub fn new(
        id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator: Some(operator),
            value: Some(value.into()),
            logical_op: None,
        }
    }

    /// A condition without a value, for `IS NULL` style operators.
    pub fn unary(id: impl Into<String>, field: impl Into<String>, operator: Operator) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator: Some(operator),
            value: None,
            logical_op: None,
        }
    }

    pub fn with_logical_op(mut self, op: LogicalOp) -> Self {
        self.logical_op = Some(op);
        self
    }
}

/// A parenthesised sequence of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub children: Vec<WhereItem>,
    #[serde(default, rename = "logicalOp", alias = "logical_op")]
    pub logical_op: Option<LogicalOp>,
}

impl Group {
    pub fn new(id: impl Into<String>, children: Vec<WhereItem>) -> Self {
        Self {
            id: id.into(),
            children,
            logical_op: None,
        }
    }

    pub fn with_logical_op(mut self, op: LogicalOp) -> Self {
        self.logical_op = Some(op);
        self
    }
}

/// One entry of a condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WhereItem {
    Condition(Condition),
    Group(Group),
}

impl WhereItem {
    pub fn id(&self) -> &str {
        match self {
            WhereItem::Condition(c) => &c.id,
            WhereItem::Group(g) => &g.id,
        }
    }

    pub fn logical_op(&self) -> Option<LogicalOp> {
        match self {
            WhereItem::Condition(c) => c.logical_op,
            WhereItem::Group(g) => g.logical_op,
        }
    }
}

impl From<Condition> for WhereItem {
    fn from(condition: Condition) -> Self {
        WhereItem::Condition(condition)
    }
}

impl From<Group> for WhereItem {
    fn from(group: Group) -> Self {
        WhereItem::Group(group)
    }
}
