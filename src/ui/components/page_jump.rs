use dioxus::prelude::*;

use crate::usecase::services::pagination::PageJump;

#[component]
pub fn PageJumpControl(page_index: usize, page_count: usize, on_jump: EventHandler<usize>) -> Element {
    let mut jump = use_signal(|| PageJump::new(page_index));

    use_effect(use_reactive!(|page_index| {
        jump.write().sync(page_index);
    }));

    let mut go = move || {
        if let Some(target) = jump.write().commit(page_count) {
            on_jump.call(target);
        }
    };

    let input = jump.read().input().to_string();

    rsx! {
        div {
            style: "display: inline-flex; gap: 6px; align-items: center;",
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |_| go(),
                "Go to"
            }
            input {
                r#type: "number",
                min: "1",
                max: "{page_count}",
                style: "width: 64px; padding: 4px 6px; border: 1px solid #bbb; border-radius: 6px;",
                aria_label: "Page number",
                value: "{input}",
                oninput: move |event| jump.write().set_input(event.value()),
                onkeydown: move |event| {
                    if event.key() == Key::Enter {
                        go();
                    }
                },
            }
        }
    }
}
