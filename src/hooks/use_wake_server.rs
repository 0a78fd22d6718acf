use crate::services::api::BackendClient;
use crate::services::wake::{CancelToken, WakePolicy, WakeState, poll_until_awake};
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Handle returned by `use_wake_server`
#[derive(Clone, PartialEq)]
pub struct WakeHandle {
    pub state: WakeState,
    pub wake: Callback<()>,
    pub cancel: Callback<()>,
}

#[hook]
pub fn use_wake_server() -> WakeHandle {
    let state = use_state(WakeState::default);
    let active: Rc<RefCell<Option<CancelToken>>> = use_mut_ref(|| None);

    // Effect: stop polling on unmount
    {
        let active = active.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(token) = active.borrow_mut().take() {
                    token.cancel();
                }
            }
        });
    }

    let wake = {
        let state = state.clone();
        let active = active.clone();
        Callback::from(move |()| {
            // A second trigger while polling is ignored
            if active.borrow().is_some() {
                return;
            }

            let token = CancelToken::new();
            *active.borrow_mut() = Some(token.clone());

            let policy = WakePolicy::default();
            state.set(WakeState::Polling {
                attempt: 0,
                max_attempts: policy.max_attempts,
            });

            let state = state.clone();
            let active = active.clone();
            spawn_local(async move {
                let client = match BackendClient::new() {
                    Ok(client) => client,
                    Err(e) => {
                        gloo::console::error!(&format!("Cannot create wake client: {e}"));
                        state.set(WakeState::Failed);
                        release(&active, &token);
                        return;
                    }
                };

                let client = &client;
                let progress = state.clone();
                let outcome = poll_until_awake(
                    policy,
                    &token,
                    move |attempt| async move {
                        let result = client.probe(policy.probe_timeout_ms).await;
                        if let Err(e) = &result {
                            gloo::console::log!(&format!(
                                "Wake attempt {attempt}/{} failed: {}",
                                policy.max_attempts,
                                e.log_detail()
                            ));
                        }
                        result
                    },
                    TimeoutFuture::new,
                    move |attempt| {
                        progress.set(WakeState::Polling {
                            attempt,
                            max_attempts: policy.max_attempts,
                        });
                    },
                )
                .await;

                // A cancelled poll belongs to an unmounted or reset component
                if !token.is_cancelled() {
                    state.set(WakeState::from_outcome(outcome));
                }
                release(&active, &token);
            });
        })
    };

    let cancel = {
        let state = state.clone();
        let active = active.clone();
        Callback::from(move |()| {
            if let Some(token) = active.borrow_mut().take() {
                token.cancel();
                state.set(WakeState::Idle);
            }
        })
    };

    WakeHandle {
        state: *state,
        wake,
        cancel,
    }
}

/// Clears the active slot if it still holds `token`.
fn release(active: &RefCell<Option<CancelToken>>, token: &CancelToken) {
    let mut slot = active.borrow_mut();
    if slot.as_ref().is_some_and(|current| current.same_as(token)) {
        *slot = None;
    }
}
