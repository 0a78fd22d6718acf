use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use crate::config::Config;
use crate::models::{
    currency::{Currency, ExchangeRate},
    forecast::ForecastResponse,
    view::ForecastView,
};
use crate::services::{api::BackendClient, exchange::refresh_usd_inr_rate};
use crate::utils::ticker::StatusTicker;
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, PartialEq, Debug, Default)]
pub enum PredictPhase {
    #[default]
    Idle,
    /// Request in flight, with the current status message
    InFlight(&'static str),
    Failed(String),
    Done,
}

impl PredictPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, PredictPhase::InFlight(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// All mutable dashboard state, owned by one reducer.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DashboardState {
    pub currency: Currency,
    pub rate: ExchangeRate,
    /// Last forecast received, kept for currency re-renders
    pub last_data: Option<Rc<ForecastResponse>>,
    pub view: Option<Rc<ForecastView>>,
    pub phase: PredictPhase,
    pub results_visible: bool,
    /// Bumped on every render pass
    pub render_pass: u32,
}

#[derive(Debug, Clone)]
pub enum DashboardAction {
    PredictStarted,
    StatusStep(&'static str),
    PredictFailed(String),
    /// Fresh forecast; `rate` is `None` when the rate refresh failed
    PredictSucceeded {
        data: Rc<ForecastResponse>,
        rate: Option<ExchangeRate>,
    },
    /// Re-render of whatever forecast is cached when the action is reduced
    Rerender { rate: Option<ExchangeRate> },
    RateRefreshed(ExchangeRate),
    SetCurrency(Currency),
}

impl DashboardState {
    /// One render pass: adopt the rate if fresh, cache the data, rebuild the view.
    fn render(
        &self,
        data: Rc<ForecastResponse>,
        rate: Option<ExchangeRate>,
    ) -> Result<Self, String> {
        let rate = rate.unwrap_or(self.rate);
        let view = ForecastView::build(&data, self.currency, rate).map_err(|e| e.to_string())?;

        Ok(Self {
            rate,
            last_data: Some(data),
            view: Some(Rc::new(view)),
            results_visible: true,
            render_pass: self.render_pass.wrapping_add(1),
            ..self.clone()
        })
    }

    fn failed(&self, message: String) -> Self {
        Self {
            phase: PredictPhase::Failed(message),
            results_visible: false,
            ..self.clone()
        }
    }
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            DashboardAction::PredictStarted => Self {
                phase: PredictPhase::InFlight(StatusTicker::default().current()),
                results_visible: false,
                ..(*self).clone()
            },
            DashboardAction::StatusStep(message) => {
                // Late ticks after completion are dropped
                if !self.phase.is_in_flight() {
                    return self;
                }
                Self {
                    phase: PredictPhase::InFlight(message),
                    ..(*self).clone()
                }
            }
            DashboardAction::PredictFailed(message) => self.failed(message),
            DashboardAction::PredictSucceeded { data, rate } => match self.render(data, rate) {
                Ok(rendered) => Self {
                    phase: PredictPhase::Done,
                    ..rendered
                },
                Err(message) => self.failed(message),
            },
            DashboardAction::Rerender { rate } => {
                let Some(data) = self.last_data.clone() else {
                    return self;
                };
                self.render(data, rate).unwrap_or_else(|message| self.failed(message))
            }
            DashboardAction::RateRefreshed(rate) => Self {
                rate,
                ..(*self).clone()
            },
            DashboardAction::SetCurrency(currency) => {
                if self.currency == currency {
                    return self;
                }
                Self {
                    currency,
                    ..(*self).clone()
                }
            }
        };

        Rc::new(next)
    }
}

/// Handle returned by `use_dashboard`
#[derive(Clone, PartialEq)]
pub struct DashboardHandle {
    pub state: Rc<DashboardState>,
    /// Text for the model badge in the header
    pub badge: String,
    pub predict: Callback<()>,
    pub set_currency: Callback<Currency>,
}

#[hook]
pub fn use_dashboard() -> DashboardHandle {
    let state = use_reducer(DashboardState::default);
    let badge = use_state(|| "Connecting…".to_string());
    let busy = use_mut_ref(|| false);

    // Effect: initial rate and model badge
    {
        let dispatcher = state.dispatcher();
        let badge = badge.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(rate) = refresh_usd_inr_rate().await {
                    dispatcher.dispatch(DashboardAction::RateRefreshed(rate));
                }

                let info = match BackendClient::new() {
                    Ok(client) => client.fetch_service_info().await,
                    Err(e) => Err(e),
                };
                match info {
                    Ok(info) => badge.set(info.badge()),
                    Err(e) => {
                        gloo::console::warn!(&format!("Model info unavailable: {}", e.log_detail()));
                        badge.set("API offline".to_string());
                    }
                }
            });
            || ()
        });
    }

    let predict = {
        let dispatcher = state.dispatcher();
        let busy = busy.clone();
        Callback::from(move |()| start_prediction(dispatcher.clone(), busy.clone()))
    };

    let set_currency = {
        let state = state.clone();
        Callback::from(move |currency: Currency| {
            if state.currency == currency {
                return;
            }
            state.dispatch(DashboardAction::SetCurrency(currency));

            // Only the rate is refreshed; predictions come from the cache
            if state.last_data.is_some() {
                let dispatcher = state.dispatcher();
                spawn_local(async move {
                    let rate = refresh_usd_inr_rate().await;
                    dispatcher.dispatch(DashboardAction::Rerender { rate });
                });
            }
        })
    };

    DashboardHandle {
        state: Rc::new((*state).clone()),
        badge: (*badge).clone(),
        predict,
        set_currency,
    }
}

fn start_prediction(dispatcher: UseReducerDispatcher<DashboardState>, busy: Rc<RefCell<bool>>) {
    if *busy.borrow() {
        return;
    }
    *busy.borrow_mut() = true;
    dispatcher.dispatch(DashboardAction::PredictStarted);

    spawn_local(async move {
        let mut ticker = StatusTicker::default();
        let ticker_dispatcher = dispatcher.clone();
        let interval = Interval::new(Config::STATUS_STEP_INTERVAL_MS, move || {
            ticker_dispatcher.dispatch(DashboardAction::StatusStep(ticker.advance()));
        });

        let result = match BackendClient::new() {
            Ok(client) => client.fetch_predictions().await,
            Err(e) => Err(e),
        };
        drop(interval);

        match result {
            Ok(data) => {
                let rate = refresh_usd_inr_rate().await;
                dispatcher.dispatch(DashboardAction::PredictSucceeded {
                    data: Rc::new(data),
                    rate,
                });
            }
            Err(e) => {
                gloo::console::error!(&format!("Prediction failed: {}", e.log_detail()));
                dispatcher.dispatch(DashboardAction::PredictFailed(e.to_string()));
            }
        }

        *busy.borrow_mut() = false;
    });
}
