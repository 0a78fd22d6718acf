use crate::config::Config;
use crate::models::view::CardView;
use crate::utils::ticker::card_reveal_delay_ms;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ForecastCardsProps {
    pub cards: Vec<CardView>,
    /// Render pass the cards belong to; a new pass replays the entrance
    pub pass: u32,
}

#[function_component(ForecastCards)]
pub fn forecast_cards(props: &ForecastCardsProps) -> Html {
    html! {
        <div class="cards-grid">
            { for props.cards.iter().enumerate().map(|(index, card)| html! {
                <ForecastCard key={format!("{}-{index}", props.pass)} card={card.clone()} {index} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ForecastCardProps {
    pub card: CardView,
    pub index: usize,
}

/// Card entrance is staggered by index; the confidence bar fills shortly after.
#[function_component(ForecastCard)]
pub fn forecast_card(props: &ForecastCardProps) -> Html {
    let visible = use_state(|| false);
    let filled = use_state(|| false);

    {
        let visible = visible.clone();
        let filled = filled.clone();
        use_effect_with(props.index, move |index| {
            let delay = card_reveal_delay_ms(*index);
            let reveal = Timeout::new(delay, move || visible.set(true));
            let fill = Timeout::new(delay + Config::CONFIDENCE_FILL_DELAY_MS, move || {
                filled.set(true)
            });

            // Dropping the handles cancels pending timers
            move || {
                drop(reveal);
                drop(fill);
            }
        });
    }

    let card = &props.card;
    let class = classes!("card", card.css_class, (*visible).then_some("visible"));
    let width = if *filled {
        format!("width: {}%;", card.confidence_fill)
    } else {
        "width: 0%;".to_string()
    };

    html! {
        <div {class}>
            <div class="card-day">{&card.day_label}</div>
            <div class="card-date">{&card.date}</div>
            <div class="card-price">{&card.price}</div>
            <div class="card-arrow">{card.arrow}</div>
            <div class="card-direction">{card.direction}</div>
            <div class="card-conf-bar">
                <div class="card-conf-fill" data-width={card.confidence_fill.clone()} style={width}></div>
            </div>
            <div class="card-conf-text">{&card.confidence_label}</div>
        </div>
    }
}
