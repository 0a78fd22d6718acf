use crate::models::currency::Currency;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CurrencyToggleProps {
    pub active: Currency,
    pub on_change: Callback<Currency>,
}

#[function_component(CurrencyToggle)]
pub fn currency_toggle(props: &CurrencyToggleProps) -> Html {
    let button = |currency: Currency| {
        let on_change = props.on_change.clone();
        let onclick = Callback::from(move |_| on_change.emit(currency));
        let class = classes!("currency-btn", (props.active == currency).then_some("active"));

        html! {
            <button {class} {onclick}>{currency.code()}</button>
        }
    };

    html! {
        <div class="currency-toggle" role="group" aria-label="Display currency">
            {button(Currency::Inr)}
            {button(Currency::Usd)}
        </div>
    }
}
