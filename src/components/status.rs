use crate::hooks::use_dashboard::PredictPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub phase: PredictPhase,
}

/// In-flight status bar and error panel for the predict request
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.phase {
        PredictPhase::InFlight(message) => html! {
            <div class="status-bar">
                <div class="spinner"></div>
                <p class="status-text">{*message}</p>
            </div>
        },
        PredictPhase::Failed(msg) => html! {
            <div class="error-box" role="alert">
                <span class="error-icon">{"⚠"}</span>
                <p class="error-text">{msg}</p>
            </div>
        },
        PredictPhase::Idle | PredictPhase::Done => html! {},
    }
}
