use dioxus::prelude::*;

use crate::ui::pages::words::{LocalWordsPage, MockWordsPage, StoreWordsPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Local,
    Mock,
    Store,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Local, Tab::Mock, Tab::Store];

    fn label(self) -> &'static str {
        match self {
            Tab::Local => "Local demo",
            Tab::Mock => "Mock remote",
            Tab::Store => "Word store",
        }
    }
}

const TAB_STYLE: &str = "border: none; border-bottom: 2px solid transparent; background: transparent; padding: 6px 12px; cursor: pointer;";
const ACTIVE_TAB_STYLE: &str = "border: none; border-bottom: 2px solid #4c6ef5; background: transparent; padding: 6px 12px; cursor: pointer; font-weight: 600;";

#[component]
pub fn App() -> Element {
    let mut tab = use_signal(|| Tab::Local);
    let mut mock_failing = use_signal(|| false);

    let current = tab();
    let failing = mock_failing();

    rsx! {
        div { style: "font-family: sans-serif; padding: 16px; display: flex; flex-direction: column; gap: 12px;",
            div { style: "display: flex; gap: 4px; border-bottom: 1px solid #ddd; align-items: center;",
                for item in Tab::ALL {
                    button {
                        style: if item == current { ACTIVE_TAB_STYLE } else { TAB_STYLE },
                        onclick: move |_| tab.set(item),
                        {item.label()}
                    }
                }
                if current == Tab::Mock {
                    label { style: "margin-left: auto; display: inline-flex; gap: 4px; align-items: center; font-size: 13px;",
                        input {
                            r#type: "checkbox",
                            checked: failing,
                            onclick: move |_| mock_failing.set(!failing),
                        }
                        "Simulate failures"
                    }
                }
            }
            match current {
                Tab::Local => rsx! { LocalWordsPage {} },
                // Keyed so toggling failures remounts the table with a new source.
                Tab::Mock => rsx! { MockWordsPage { key: "{failing}", failing: failing } },
                Tab::Store => rsx! { StoreWordsPage {} },
            }
        }
    }
}
