use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid},
    datatype::DataPointItem,
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Formatter, ItemStyle,
        JsFunction, LineStyle, LineStyleType, SplitLine, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Line,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::view::ChartSeries;
use crate::utils::debounce::debounced_window_listener;

const CHART_ID: &str = "price-chart";
const LINE_COLOR: &str = "#C9A84C";
const AXIS_COLOR: &str = "#9A9080";
const GRID_COLOR: &str = "rgba(255,255,255,0.04)";

#[wasm_bindgen]
extern "C" {
    /// `echarts.dispose(element)`; a no-op for elements without an instance
    #[wasm_bindgen(js_namespace = echarts, js_name = dispose)]
    fn dispose_echarts(target: &HtmlElement);
}

#[derive(Properties, PartialEq)]
pub struct PriceChartProps {
    pub series: ChartSeries,
}

#[function_component(PriceChart)]
pub fn price_chart(props: &PriceChartProps) -> Html {
    let container_ref = use_node_ref();
    let target_ref = use_node_ref();

    {
        use_effect_with(
            (props.series.clone(), container_ref.clone(), target_ref.clone()),
            |(series, container_ref, target_ref)| {
                let target = target_ref.cast::<HtmlElement>();

                let listener = container_ref
                    .cast::<HtmlElement>()
                    .zip(target.clone())
                    .and_then(|(container, target)| {
                        render_chart(&container, &target, series);

                        let series = series.clone();
                        debounced_window_listener(
                            "resize",
                            Config::CHART_RESIZE_DEBOUNCE_MS,
                            move || render_chart(&container, &target, &series),
                        )
                    });

                move || {
                    drop(listener);
                    if let Some(target) = target {
                        dispose_echarts(&target);
                    }
                }
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} class="chart-target" ref={target_ref} />
        </div>
    }
}

/// Replaces whatever chart instance the target holds.
fn render_chart(container: &HtmlElement, target: &HtmlElement, series: &ChartSeries) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 || series.is_empty() {
        return;
    }

    dispose_echarts(target);

    let chart = build_chart(series);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

/// Tooltip text comes from the precomputed point labels so it matches the cards.
fn tooltip_formatter(series: &ChartSeries) -> Formatter {
    let labels = serde_json::to_string(&series.point_labels).unwrap_or_else(|_| "[]".to_string());
    let body = format!(
        "var labels = {labels}; \
         var p = Array.isArray(params) ? params[0] : params; \
         return p.name + '<br/>' + labels[p.dataIndex];"
    );
    Formatter::Function(JsFunction::new_with_args("params", &body))
}

fn axis_formatter(series: &ChartSeries) -> Formatter {
    Formatter::Function(JsFunction::new_with_args(
        "value",
        series.currency.axis_formatter_js(),
    ))
}

pub fn build_chart(series: &ChartSeries) -> CharmingChart {
    let points: Vec<DataPointItem> = series
        .values
        .iter()
        .zip(&series.colors)
        .map(|(value, color)| {
            DataPointItem::new(*value)
                .item_style(ItemStyle::new().color(*color).border_color(*color))
        })
        .collect();

    CharmingChart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line))
                .formatter(tooltip_formatter(series)),
        )
        .grid(
            Grid::new()
                .left("4%")
                .right("4%")
                .bottom("8%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .boundary_gap(false)
                .data(series.labels.clone())
                .axis_label(AxisLabel::new().color(AXIS_COLOR)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .scale(true)
                .axis_label(
                    AxisLabel::new()
                        .color(AXIS_COLOR)
                        .formatter(axis_formatter(series)),
                )
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(GRID_COLOR)
                            .type_(LineStyleType::Solid),
                    ),
                ),
        )
        .series(
            Line::new()
                .name(series.currency.series_label())
                .data(points)
                .smooth(0.35)
                .symbol_size(12)
                .line_style(LineStyle::new().color(LINE_COLOR).width(1.5))
                .area_style(AreaStyle::new().color(LINE_COLOR).opacity(0.12)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::{Currency, ExchangeRate};
    use crate::models::forecast::{Direction, ForecastDay};

    fn day(n: u32, price: f64, prediction: Direction) -> ForecastDay {
        ForecastDay {
            day: n,
            date: format!("2026-10-{:02}", 14 + n),
            gold_price_usd: price,
            prediction,
            probability: 0.6,
            confidence: "Medium".to_string(),
        }
    }

    #[test]
    fn test_chart_carries_series_label_and_point_colors() {
        let days = vec![
            day(1, 2650.0, Direction::Up),
            day(2, 2600.0, Direction::Down),
        ];
        let series = ChartSeries::build(&days, Currency::Usd, ExchangeRate::default());
        let json = build_chart(&series).to_string();

        assert!(json.contains("Gold Price (USD/oz)"));
        assert!(json.contains("#4CAF82"));
        assert!(json.contains("#E05252"));
        assert!(json.contains("15 Oct"));
    }

    #[test]
    fn test_axis_formatter_follows_currency() {
        let days = vec![day(1, 2000.0, Direction::Up)];

        let inr = ChartSeries::build(&days, Currency::Inr, ExchangeRate::default());
        let inr_json = build_chart(&inr).to_string();
        assert!(inr_json.contains("return '₹' + (value / 1000).toFixed(0) + 'k';"));
        assert!(inr_json.contains("Gold Price (INR/10g)"));

        let usd = ChartSeries::build(&days, Currency::Usd, ExchangeRate::default());
        let usd_json = build_chart(&usd).to_string();
        assert!(usd_json.contains("return '$' + value.toFixed(0);"));
        assert!(!usd_json.contains("toFixed(0) + 'k'"));
    }

    #[test]
    fn test_tooltip_embeds_point_labels() {
        let days = vec![day(1, 2000.0, Direction::Up)];
        let series = ChartSeries::build(&days, Currency::Inr, ExchangeRate::default());
        let json = build_chart(&series).to_string();

        assert!(json.contains(r#"var labels = [" ₹57,289.37"];"#));
    }
}
