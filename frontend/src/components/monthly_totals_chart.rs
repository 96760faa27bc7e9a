use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::MonthSummary;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartSeries {
    Total,
    Fixed,
    Variable,
}

impl ChartSeries {
    const ALL: [ChartSeries; 3] = [ChartSeries::Total, ChartSeries::Fixed, ChartSeries::Variable];

    fn label(&self) -> &'static str {
        match self {
            ChartSeries::Total => "Общо",
            ChartSeries::Fixed => "Фиксирани",
            ChartSeries::Variable => "Допълнителни",
        }
    }

    fn value(&self, month: &MonthSummary) -> f64 {
        match self {
            ChartSeries::Total => month.total,
            ChartSeries::Fixed => month.total_fixed,
            ChartSeries::Variable => month.total_variable,
        }
    }

    fn color(&self) -> RGBColor {
        match self {
            ChartSeries::Total => RGBColor(102, 126, 234),
            ChartSeries::Fixed => RGBColor(59, 130, 246),
            ChartSeries::Variable => RGBColor(16, 185, 129),
        }
    }
}

/// Axis label for a month: first three letters plus the year, e.g. "Окт 2026"
fn short_label(month: &str) -> String {
    let mut parts = month.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), Some(year)) => format!("{} {}", name.chars().take(3).collect::<String>(), year),
        _ => month.chars().take(8).collect(),
    }
}

/// Upper bound of the value axis with 10% headroom
fn y_axis_max(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

#[derive(Properties, PartialEq)]
pub struct MonthlyTotalsChartProps {
    /// Months in chronological order
    pub months: Vec<MonthSummary>,
    pub currency_symbol: String,
}

pub enum Msg {
    SetSeries(ChartSeries),
}

pub struct MonthlyTotalsChart {
    canvas_ref: NodeRef,
    selected_series: ChartSeries,
}

impl Component for MonthlyTotalsChart {
    type Message = Msg;
    type Properties = MonthlyTotalsChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            selected_series: ChartSeries::Total,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetSeries(series) => {
                self.selected_series = series;
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(ctx.props());
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="chart-container">
                <div class="chart-title-header">
                    <h3 class="chart-title">{"Разходи по месеци"}</h3>
                    <div class="chart-range-selector">
                        {for ChartSeries::ALL.iter().map(|series| {
                            let series = *series;
                            let is_active = series == self.selected_series;
                            html! {
                                <button
                                    class={classes!("range-button", is_active.then_some("active"))}
                                    onclick={link.callback(move |_| Msg::SetSeries(series))}
                                >
                                    {series.label()}
                                </button>
                            }
                        })}
                    </div>
                </div>

                {if ctx.props().months.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"Няма данни за графиката"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas ref={self.canvas_ref.clone()} class="chart-canvas" width="800" height="320"></canvas>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl MonthlyTotalsChart {
    fn draw_chart(&self, props: &MonthlyTotalsChartProps) {
        if props.months.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let series = self.selected_series;
        let values: Vec<f64> = props.months.iter().map(|m| series.value(m)).collect();
        let labels: Vec<String> = props.months.iter().map(|m| short_label(&m.month)).collect();
        let currency = props.currency_symbol.clone();

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..values.len() as u32).into_segmented(), 0.0..y_axis_max(&values))
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .y_label_formatter(&|v| format!("{}{:.0}", currency, v))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .label_style(("sans-serif", 12, &RGBColor(100, 116, 139)))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(241, 245, 249))
            .y_labels(6)
            .draw()
            .is_err()
        {
            return;
        }

        if chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(series.color().filled())
                    .margin(12)
                    .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
            )
            .is_err()
        {
            return;
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(month: &str, fixed: f64, variable: f64) -> MonthSummary {
        MonthSummary {
            month: month.to_string(),
            total_fixed: fixed,
            total_variable: variable,
            total: fixed + variable,
            item_count: 0,
        }
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Октомври 2026"), "Окт 2026");
        assert_eq!(short_label("Май 2025"), "Май 2025");
        assert_eq!(short_label("Архивни данни за дълго"), "Арх данни");
        assert_eq!(short_label("Архив"), "Архив");
    }

    #[test]
    fn test_series_values() {
        let month = summary("Март 2026", 400.0, 120.5);
        assert_eq!(ChartSeries::Total.value(&month), 520.5);
        assert_eq!(ChartSeries::Fixed.value(&month), 400.0);
        assert_eq!(ChartSeries::Variable.value(&month), 120.5);
    }

    #[test]
    fn test_y_axis_max_has_headroom() {
        assert!((y_axis_max(&[100.0, 250.0]) - 275.0).abs() < 1e-9);
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(y_axis_max(&[0.0]), 1.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_draw_without_canvas_is_a_no_op() {
        let chart = MonthlyTotalsChart {
            canvas_ref: NodeRef::default(),
            selected_series: ChartSeries::Fixed,
        };
        let props = MonthlyTotalsChartProps {
            months: vec![MonthSummary {
                month: "Март 2026".to_string(),
                total_fixed: 400.0,
                total_variable: 20.0,
                total: 420.0,
                item_count: 2,
            }],
            currency_symbol: "€".to_string(),
        };
        chart.draw_chart(&props);
    }
}
