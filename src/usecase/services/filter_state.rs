use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::filter::{
    DateRange, EditValue, FilterDef, FilterKind, FilterValue, NumberFilter, NumberRangeFilter,
    TextFilter, TextOperator,
};
use crate::domain::entities::query::ColumnFilter;

pub fn initial_value_for(kind: FilterKind) -> EditValue {
    match kind {
        FilterKind::Text => EditValue::Text(TextFilter::default()),
        FilterKind::Select => EditValue::Select(String::new()),
        FilterKind::MultiSelect => EditValue::MultiSelect(Vec::new()),
        FilterKind::Date => EditValue::Date(None),
        FilterKind::DateRange => EditValue::DateRange {
            from: None,
            to: None,
        },
        FilterKind::Number => EditValue::Number(NumberFilter::default()),
        FilterKind::NumberRange => EditValue::NumberRange(NumberRangeFilter::default()),
    }
}

/// Cleared sheet state. An absent schema is an empty slice.
pub fn build_initial_values(schema: &[FilterDef]) -> BTreeMap<String, EditValue> {
    schema
        .iter()
        .map(|def| (def.id.clone(), initial_value_for(def.kind)))
        .collect()
}

/// Sheet state seeded from the table's committed filters, so opening the
/// sheet starts from what is applied rather than from stale edits.
pub fn seed_from_live_state(
    schema: &[FilterDef],
    live: &[ColumnFilter],
) -> BTreeMap<String, EditValue> {
    schema
        .iter()
        .map(|def| {
            let value = live
                .iter()
                .find(|filter| filter.id == def.id)
                .map(|filter| to_editable(def.kind, &filter.value))
                .unwrap_or_else(|| initial_value_for(def.kind));
            (def.id.clone(), value)
        })
        .collect()
}

pub fn to_wire_shape(value: &EditValue) -> FilterValue {
    match value {
        EditValue::Text(filter) => FilterValue::Text(filter.clone()),
        EditValue::Number(filter) => FilterValue::Number(filter.clone()),
        EditValue::NumberRange(range) => FilterValue::NumberRange(range.clone()),
        EditValue::Select(value) => FilterValue::Select(value.clone()),
        EditValue::MultiSelect(values) => FilterValue::MultiSelect(values.clone()),
        EditValue::Date(date) => FilterValue::Date(date.map(|dt| dt.date())),
        EditValue::DateRange { from, to } => FilterValue::DateRange(DateRange {
            from: from.map(|dt| dt.date()),
            to: to.map(|dt| dt.date()),
        }),
    }
}

pub fn to_wire_shape_all(filters: &[(String, EditValue)]) -> Vec<ColumnFilter> {
    filters
        .iter()
        .map(|(id, value)| ColumnFilter {
            id: id.clone(),
            value: to_wire_shape(value),
        })
        .collect()
}

/// Filters to commit on "apply": schema order, wire shape, empty values dropped.
pub fn collect_active_filters(
    schema: &[FilterDef],
    values: &BTreeMap<String, EditValue>,
) -> Vec<ColumnFilter> {
    let ordered = schema
        .iter()
        .filter_map(|def| values.get(&def.id).map(|value| (def.id.clone(), value.clone())))
        .collect::<Vec<_>>();
    to_wire_shape_all(&ordered)
        .into_iter()
        .filter(|filter| !filter.value.is_empty())
        .collect()
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let head = value.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Wire value back to editable shape. A value of the wrong shape for the
/// declared kind degrades to that kind's initial value.
fn to_editable(kind: FilterKind, value: &FilterValue) -> EditValue {
    match (kind, value) {
        (FilterKind::Text, FilterValue::Text(filter)) => EditValue::Text(filter.clone()),
        (FilterKind::Text, FilterValue::Select(text)) => EditValue::Text(TextFilter {
            operator: TextOperator::Include,
            text: text.clone(),
        }),
        (FilterKind::Number, FilterValue::Number(filter)) => EditValue::Number(filter.clone()),
        (FilterKind::NumberRange, FilterValue::NumberRange(range)) => {
            EditValue::NumberRange(range.clone())
        }
        (FilterKind::Select, FilterValue::Select(value)) => EditValue::Select(value.clone()),
        (FilterKind::Select, FilterValue::Date(Some(date))) => EditValue::Select(date.to_string()),
        (FilterKind::MultiSelect, FilterValue::MultiSelect(values)) => {
            EditValue::MultiSelect(values.clone())
        }
        (FilterKind::MultiSelect, FilterValue::Select(value)) if !value.is_empty() => {
            EditValue::MultiSelect(vec![value.clone()])
        }
        (FilterKind::Date, FilterValue::Date(date)) => EditValue::Date(date.map(midnight)),
        (FilterKind::Date, FilterValue::Select(text)) => {
            EditValue::Date(parse_day(text).map(midnight))
        }
        (FilterKind::DateRange, FilterValue::DateRange(range)) => EditValue::DateRange {
            from: range.from.map(midnight),
            to: range.to.map(midnight),
        },
        _ => initial_value_for(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::filter::{FilterOption, NumberOperator};

    const ALL_KINDS: [FilterKind; 7] = [
        FilterKind::Text,
        FilterKind::Select,
        FilterKind::MultiSelect,
        FilterKind::Date,
        FilterKind::DateRange,
        FilterKind::Number,
        FilterKind::NumberRange,
    ];

    fn schema() -> Vec<FilterDef> {
        vec![
            FilterDef::new("difficulty", "Difficulty", FilterKind::Select).with_options(vec![
                FilterOption::labeled("easy", "Easy"),
                FilterOption::labeled("hard", "Hard"),
            ]),
            FilterDef::new("tags", "Tags", FilterKind::MultiSelect),
            FilterDef::new("createdAt", "Added On", FilterKind::Date),
            FilterDef::new("meaning", "Meaning", FilterKind::Text),
            FilterDef::new("period", "Period", FilterKind::DateRange),
        ]
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 30, 0))
            .expect("valid datetime")
    }

    #[test]
    fn initial_values_round_trip_through_wire_shape() {
        for kind in ALL_KINDS {
            let def = FilterDef::new("f", "F", kind);
            let initial = initial_value_for(kind);
            let live = vec![ColumnFilter {
                id: "f".to_string(),
                value: to_wire_shape(&initial),
            }];

            let seeded = seed_from_live_state(&[def], &live);

            assert_eq!(seeded.get("f"), Some(&initial), "kind {kind:?} should round-trip");
        }
    }

    #[test]
    fn initial_text_value_is_include_with_empty_text() {
        assert_eq!(
            initial_value_for(FilterKind::Text),
            EditValue::Text(TextFilter {
                operator: TextOperator::Include,
                text: String::new(),
            })
        );
        assert_eq!(
            initial_value_for(FilterKind::Number),
            EditValue::Number(NumberFilter {
                operator: NumberOperator::Eq,
                value: String::new(),
            })
        );
    }

    #[test]
    fn build_initial_values_covers_every_descriptor() {
        let values = build_initial_values(&schema());
        assert_eq!(values.len(), 5);
        assert_eq!(values.get("tags"), Some(&EditValue::MultiSelect(Vec::new())));
        assert!(build_initial_values(&[]).is_empty());
    }

    #[test]
    fn dates_are_truncated_to_calendar_days() {
        let wire = to_wire_shape(&EditValue::DateRange {
            from: Some(at(2024, 2, 1, 13)),
            to: None,
        });
        assert_eq!(
            wire,
            FilterValue::DateRange(DateRange {
                from: NaiveDate::from_ymd_opt(2024, 2, 1),
                to: None,
            })
        );
        assert_eq!(
            serde_json::to_string(&to_wire_shape(&EditValue::Date(Some(at(2023, 12, 31, 23)))))
                .expect("serialize"),
            r#""2023-12-31""#
        );
    }

    #[test]
    fn seeding_uses_live_values_and_falls_back_per_descriptor() {
        let live = vec![
            ColumnFilter {
                id: "createdAt".to_string(),
                value: FilterValue::Date(NaiveDate::from_ymd_opt(2024, 4, 1)),
            },
            ColumnFilter {
                id: "difficulty".to_string(),
                value: FilterValue::Select("hard".to_string()),
            },
        ];

        let seeded = seed_from_live_state(&schema(), &live);

        assert_eq!(
            seeded.get("createdAt"),
            Some(&EditValue::Date(NaiveDate::from_ymd_opt(2024, 4, 1).map(midnight)))
        );
        assert_eq!(seeded.get("difficulty"), Some(&EditValue::Select("hard".to_string())));
        assert_eq!(seeded.get("tags"), Some(&EditValue::MultiSelect(Vec::new())));
    }

    #[test]
    fn malformed_live_values_degrade_to_initial() {
        let live = vec![
            ColumnFilter {
                id: "tags".to_string(),
                value: FilterValue::Date(None),
            },
            ColumnFilter {
                id: "createdAt".to_string(),
                value: FilterValue::Select("not a date".to_string()),
            },
            ColumnFilter {
                id: "period".to_string(),
                value: FilterValue::MultiSelect(vec!["x".to_string()]),
            },
        ];

        let seeded = seed_from_live_state(&schema(), &live);

        assert_eq!(seeded.get("tags"), Some(&EditValue::MultiSelect(Vec::new())));
        assert_eq!(seeded.get("createdAt"), Some(&EditValue::Date(None)));
        assert_eq!(
            seeded.get("period"),
            Some(&EditValue::DateRange {
                from: None,
                to: None
            })
        );
    }

    #[test]
    fn wire_shape_all_preserves_order_and_ids() {
        let filters = vec![
            ("b".to_string(), EditValue::Select("x".to_string())),
            ("a".to_string(), EditValue::MultiSelect(vec!["y".to_string()])),
        ];

        let wire = to_wire_shape_all(&filters);

        assert_eq!(
            wire.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert_eq!(wire[1].value, FilterValue::MultiSelect(vec!["y".to_string()]));
    }

    #[test]
    fn active_filters_skip_untouched_fields() {
        let mut values = build_initial_values(&schema());
        values.insert("difficulty".to_string(), EditValue::Select("easy".to_string()));

        let active = collect_active_filters(&schema(), &values);

        assert_eq!(
            active,
            vec![ColumnFilter {
                id: "difficulty".to_string(),
                value: FilterValue::Select("easy".to_string()),
            }]
        );
    }
}
