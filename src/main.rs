use aurum_dashboard::components::{
    CurrencyToggle, ForecastCards, PriceChart, Status, Summary, WakePanel,
};
use aurum_dashboard::hooks::use_dashboard::use_dashboard;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let dashboard = use_dashboard();
    let state = dashboard.state.clone();
    let results_ref = use_node_ref();
    let in_flight = state.phase.is_in_flight();

    // Effect: bring fresh results into view after each render pass
    {
        let results_ref = results_ref.clone();
        use_effect_with(state.render_pass, move |pass| {
            if *pass > 0 {
                if let Some(results) = results_ref.cast::<Element>() {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    results.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
            || ()
        });
    }

    let onpredict = {
        let predict = dashboard.predict.clone();
        Callback::from(move |_| predict.emit(()))
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <div class="brand">
                    <h1>{"AURUM"}</h1>
                    <p class="tagline">{"Gold Price Intelligence"}</p>
                </div>
                <span class="model-badge">{&dashboard.badge}</span>
                <CurrencyToggle active={state.currency} on_change={dashboard.set_currency.clone()} />
            </header>

            <main class="app-main">
                <section class="controls-section">
                    <button class="predict-btn" onclick={onpredict} disabled={in_flight}>
                        <span class={classes!("btn-loader", in_flight.then_some("active"))}></span>
                        {"GENERATE FORECAST"}
                    </button>
                    <WakePanel />
                    <Status phase={state.phase.clone()} />
                </section>

                <section class="results-section" ref={results_ref}>
                    if let Some(view) = state.view.as_ref().filter(|_| state.results_visible) {
                        <Summary summary={view.summary.clone()} />
                        <ForecastCards cards={view.cards.clone()} pass={state.render_pass} />
                        <div class="chart-section">
                            <h2>{view.chart.currency.series_label()}</h2>
                            <PriceChart series={view.chart.clone()} />
                        </div>
                        <a class="mlflow-link" href={view.mlflow_url.clone()} target="_blank" rel="noopener noreferrer">
                            {"View experiment in MLflow ↗"}
                        </a>
                    }
                </section>
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
