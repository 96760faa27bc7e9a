use yew::prelude::*;

use home_budget_backend::formatting::format_money;

/// The four views of the app
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Monthly,
    Electricity,
    Reports,
    Savings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Monthly, Tab::Electricity, Tab::Reports, Tab::Savings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Monthly => "Месечни разходи",
            Tab::Electricity => "Ток",
            Tab::Reports => "Отчети",
            Tab::Savings => "Спестявания",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Tab::Monthly => "📅",
            Tab::Electricity => "⚡",
            Tab::Reports => "📊",
            Tab::Savings => "🐷",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_month: String,
    /// Fixed plus variable expenses of the current month
    pub month_total: f64,
    pub currency_symbol: String,
    pub active_tab: Tab,
    pub on_select_tab: Callback<Tab>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Домашен бюджет"}</h1>
                <div class="header-right">
                    <div class="balance-display">
                        <span class="balance-label">{format!("{}:", props.current_month)}</span>
                        <span class="balance-amount">{format_money(props.month_total, &props.currency_symbol)}</span>
                    </div>
                </div>
            </div>
            <nav class="tab-bar">
                {for Tab::ALL.iter().map(|tab| {
                    let tab = *tab;
                    let is_active = tab == props.active_tab;
                    let onclick = {
                        let on_select_tab = props.on_select_tab.clone();
                        Callback::from(move |_: MouseEvent| on_select_tab.emit(tab))
                    };
                    html! {
                        <button
                            class={classes!("tab-button", is_active.then_some("active"))}
                            {onclick}
                        >
                            <span class="tab-icon">{tab.icon()}</span>
                            {tab.label()}
                        </button>
                    }
                })}
            </nav>
        </header>
    }
}
