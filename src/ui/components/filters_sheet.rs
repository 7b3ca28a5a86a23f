use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dioxus::prelude::*;

use crate::domain::entities::filter::{
    EditValue, FilterDef, NumberFilter, NumberOperator, NumberRangeFilter, TextFilter,
    TextOperator,
};
use crate::domain::entities::query::ColumnFilter;
use crate::usecase::services::filter_state::{
    build_initial_values, collect_active_filters, seed_from_live_state,
};

const FIELD_STYLE: &str = "padding: 4px 6px; border: 1px solid #bbb; border-radius: 6px;";

fn date_input_value(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.date().format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date_input(value: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

#[component]
fn FilterField(def: FilterDef, value: EditValue, on_change: EventHandler<EditValue>) -> Element {
    match value {
        EditValue::Text(filter) => {
            let text_for_op = filter.text.clone();
            let operator = filter.operator;
            rsx! {
                div { style: "display: flex; gap: 6px;",
                    select {
                        style: FIELD_STYLE,
                        value: operator.as_str(),
                        onchange: move |event| {
                            let operator = TextOperator::parse(&event.value()).unwrap_or_default();
                            on_change.call(EditValue::Text(TextFilter {
                                operator,
                                text: text_for_op.clone(),
                            }));
                        },
                        for op in TextOperator::ALL {
                            option { value: op.as_str(), selected: op == operator, {op.as_str()} }
                        }
                    }
                    input {
                        style: FIELD_STYLE,
                        value: filter.text.clone(),
                        oninput: move |event| {
                            on_change.call(EditValue::Text(TextFilter {
                                operator,
                                text: event.value(),
                            }));
                        },
                    }
                }
            }
        }
        EditValue::Number(filter) => {
            let value_for_op = filter.value.clone();
            let operator = filter.operator;
            rsx! {
                div { style: "display: flex; gap: 6px;",
                    select {
                        style: FIELD_STYLE,
                        onchange: move |event| {
                            let operator = NumberOperator::parse(&event.value()).unwrap_or_default();
                            on_change.call(EditValue::Number(NumberFilter {
                                operator,
                                value: value_for_op.clone(),
                            }));
                        },
                        for op in NumberOperator::ALL {
                            option { value: op.as_str(), selected: op == operator, {op.as_str()} }
                        }
                    }
                    input {
                        r#type: "number",
                        style: FIELD_STYLE,
                        value: filter.value.clone(),
                        oninput: move |event| {
                            on_change.call(EditValue::Number(NumberFilter {
                                operator,
                                value: event.value(),
                            }));
                        },
                    }
                }
            }
        }
        EditValue::NumberRange(range) => {
            let max_for_min = range.max.clone();
            let min_for_max = range.min.clone();
            rsx! {
                div { style: "display: flex; gap: 6px;",
                    input {
                        r#type: "number",
                        placeholder: "min",
                        style: FIELD_STYLE,
                        value: range.min.clone(),
                        oninput: move |event| {
                            on_change.call(EditValue::NumberRange(NumberRangeFilter {
                                min: event.value(),
                                max: max_for_min.clone(),
                            }));
                        },
                    }
                    input {
                        r#type: "number",
                        placeholder: "max",
                        style: FIELD_STYLE,
                        value: range.max.clone(),
                        oninput: move |event| {
                            on_change.call(EditValue::NumberRange(NumberRangeFilter {
                                min: min_for_max.clone(),
                                max: event.value(),
                            }));
                        },
                    }
                }
            }
        }
        EditValue::Select(selected) => {
            let has_blank = def.options.iter().any(|opt| opt.value.is_empty());
            rsx! {
                select {
                    style: FIELD_STYLE,
                    onchange: move |event| on_change.call(EditValue::Select(event.value())),
                    if !has_blank {
                        option { value: "", selected: selected.is_empty(), "All" }
                    }
                    for opt in def.options.iter() {
                        option {
                            value: opt.value.clone(),
                            selected: opt.value == selected,
                            {opt.display_label()}
                        }
                    }
                }
            }
        }
        EditValue::MultiSelect(selected) => rsx! {
            div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                for opt in def.options.iter() {
                    {
                        let value = opt.value.clone();
                        let checked = selected.contains(&value);
                        let current = selected.clone();
                        rsx! {
                            label { style: "display: inline-flex; gap: 4px; align-items: center;",
                                input {
                                    r#type: "checkbox",
                                    checked: checked,
                                    onclick: move |_| {
                                        let mut next = current.clone();
                                        if checked {
                                            next.retain(|item| item != &value);
                                        } else {
                                            next.push(value.clone());
                                        }
                                        on_change.call(EditValue::MultiSelect(next));
                                    }
                                }
                                span { {opt.display_label()} }
                            }
                        }
                    }
                }
            }
        },
        EditValue::Date(date) => {
            let shown = date_input_value(date);
            rsx! {
                input {
                    r#type: "date",
                    style: FIELD_STYLE,
                    value: "{shown}",
                    onchange: move |event| on_change.call(EditValue::Date(parse_date_input(&event.value()))),
                }
            }
        }
        EditValue::DateRange { from, to } => {
            let shown_from = date_input_value(from);
            let shown_to = date_input_value(to);
            rsx! {
                div { style: "display: flex; gap: 6px;",
                    input {
                        r#type: "date",
                        style: FIELD_STYLE,
                        value: "{shown_from}",
                        onchange: move |event| on_change.call(EditValue::DateRange {
                            from: parse_date_input(&event.value()),
                            to,
                        }),
                    }
                    input {
                        r#type: "date",
                        style: FIELD_STYLE,
                        value: "{shown_to}",
                        onchange: move |event| on_change.call(EditValue::DateRange {
                            from,
                            to: parse_date_input(&event.value()),
                        }),
                    }
                }
            }
        }
    }
}

/// Side sheet editing a draft of the column filters. The draft is seeded from
/// the committed filters when the sheet mounts and only reaches the table on
/// "Apply".
#[component]
pub fn FiltersSheet(
    defs: Vec<FilterDef>,
    live: Vec<ColumnFilter>,
    on_apply: EventHandler<Vec<ColumnFilter>>,
    on_clear: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let defs_for_seed = defs.clone();
    let mut values = use_signal(move || seed_from_live_state(&defs_for_seed, &live));

    let defs_for_apply = defs.clone();
    let defs_for_clear = defs.clone();
    let snapshot = values();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.25); z-index: 1300;",
            onclick: move |_| on_close.call(()),
            div {
                style: "position: absolute; top: 0; right: 0; bottom: 0; width: 360px; background: #fff; box-shadow: -8px 0 24px rgba(0,0,0,0.15); padding: 16px; overflow-y: auto; display: flex; flex-direction: column; gap: 12px;",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin: 0;", "Filters" }
                p { style: "margin: 0; color: #666;", "Apply filters to columns" }

                for def in defs.iter() {
                    div { key: "{def.id}", style: "display: flex; flex-direction: column; gap: 4px;",
                        label { style: "font-size: 13px;", {def.display_label()} }
                        if let Some(value) = snapshot.get(&def.id).cloned() {
                            FilterField {
                                def: def.clone(),
                                value: value,
                                on_change: {
                                    let id = def.id.clone();
                                    move |next: EditValue| {
                                        values.write().insert(id.clone(), next);
                                    }
                                },
                            }
                        }
                    }
                }

                div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: auto;",
                    button {
                        style: "border: none; background: transparent; padding: 4px 10px; cursor: pointer;",
                        onclick: move |_| {
                            values.set(build_initial_values(&defs_for_clear));
                            on_clear.call(());
                        },
                        "Clear"
                    }
                    button {
                        style: "border: 1px solid #4c6ef5; background: #4c6ef5; color: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            on_apply.call(collect_active_filters(&defs_for_apply, &values()));
                        },
                        "Apply"
                    }
                }
            }
        }
    }
}
