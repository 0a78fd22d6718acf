use crate::hooks::use_wake_server::use_wake_server;
use yew::prelude::*;

/// Warms up a backend that may be asleep between uses
#[function_component(WakePanel)]
pub fn wake_panel() -> Html {
    let handle = use_wake_server();
    let polling = handle.state.is_polling();

    let onclick = {
        let wake = handle.wake.clone();
        Callback::from(move |_| wake.emit(()))
    };
    let oncancel = {
        let cancel = handle.cancel.clone();
        Callback::from(move |_| cancel.emit(()))
    };

    html! {
        <div class="wake-panel">
            <button class="wake-btn" {onclick} disabled={polling}>
                {handle.state.button_label()}
            </button>
            if polling {
                <button class="wake-cancel" onclick={oncancel}>{"CANCEL"}</button>
            }
            <span class={handle.state.css_class()}>{handle.state.status_text()}</span>
        </div>
    }
}
