use crate::models::view::SummaryView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub summary: SummaryView,
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="summary-strip">
            <div class="summary-item">
                <h3>{"Latest Price"}</h3>
                <p class="summary-value">{&summary.latest_price}</p>
                <p class="summary-note">{summary.note}</p>
            </div>
            <div class="summary-item">
                <h3>{"Data Date"}</h3>
                <p class="summary-value">{&summary.data_date}</p>
            </div>
            <div class="summary-item">
                <h3>{"Model"}</h3>
                <p class="summary-value">{&summary.model_label}</p>
            </div>
            <div class="summary-item">
                <h3>{"Predicted At"}</h3>
                <p class="summary-value">{&summary.predicted_at}</p>
            </div>
        </div>
    }
}
