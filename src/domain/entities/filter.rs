use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Select,
    MultiSelect,
    Date,
    DateRange,
    Number,
    NumberRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FilterOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Static, author-supplied description of one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: FilterKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FilterOption>,
}

impl FilterDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            kind,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOperator {
    #[default]
    Include,
    Exclude,
    Equal,
}

impl TextOperator {
    pub const ALL: [TextOperator; 3] = [
        TextOperator::Include,
        TextOperator::Exclude,
        TextOperator::Equal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextOperator::Include => "include",
            TextOperator::Exclude => "exclude",
            TextOperator::Equal => "equal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberOperator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl NumberOperator {
    pub const ALL: [NumberOperator; 6] = [
        NumberOperator::Eq,
        NumberOperator::Ne,
        NumberOperator::Gt,
        NumberOperator::Ge,
        NumberOperator::Lt,
        NumberOperator::Le,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NumberOperator::Eq => "=",
            NumberOperator::Ne => "!=",
            NumberOperator::Gt => ">",
            NumberOperator::Ge => ">=",
            NumberOperator::Lt => "<",
            NumberOperator::Le => "<=",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == value)
    }

    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            NumberOperator::Eq => left == right,
            NumberOperator::Ne => left != right,
            NumberOperator::Gt => left > right,
            NumberOperator::Ge => left >= right,
            NumberOperator::Lt => left < right,
            NumberOperator::Le => left <= right,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilter {
    pub operator: TextOperator,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFilter {
    pub operator: NumberOperator,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRangeFilter {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Committed filter value in wire shape.
///
/// Serialized untagged so the JSON matches what a query endpoint expects:
/// text is `{operator, text}`, select a bare string, multi-select a list,
/// dates `YYYY-MM-DD`. Variant order matters for deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(TextFilter),
    Number(NumberFilter),
    NumberRange(NumberRangeFilter),
    DateRange(DateRange),
    MultiSelect(Vec<String>),
    Date(Option<NaiveDate>),
    Select(String),
}

impl FilterValue {
    /// An empty value filters nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(filter) => filter.text.trim().is_empty(),
            FilterValue::Number(filter) => filter.value.trim().is_empty(),
            FilterValue::NumberRange(range) => {
                range.min.trim().is_empty() && range.max.trim().is_empty()
            }
            FilterValue::DateRange(range) => range.from.is_none() && range.to.is_none(),
            FilterValue::MultiSelect(values) => values.is_empty(),
            FilterValue::Date(date) => date.is_none(),
            FilterValue::Select(value) => value.is_empty(),
        }
    }
}

/// In-sheet editing state. Dates carry a time component the way a picker
/// does; they are truncated to calendar dates on submit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValue {
    Text(TextFilter),
    Number(NumberFilter),
    NumberRange(NumberRangeFilter),
    Select(String),
    MultiSelect(Vec<String>),
    Date(Option<NaiveDateTime>),
    DateRange {
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    },
}
