use shared::{CategoryIcon, ExpenseCategory};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Glyph drawn for a category icon
pub fn icon_glyph(icon: CategoryIcon) -> &'static str {
    match icon {
        CategoryIcon::Droplets => "💧",
        CategoryIcon::Zap => "⚡",
        CategoryIcon::Fuel => "⛽",
        CategoryIcon::Car => "🚗",
        CategoryIcon::Utensils => "🛒",
        CategoryIcon::UtensilsCrossed => "🍽️",
        CategoryIcon::Scissors => "✂️",
        CategoryIcon::Film => "🎬",
        CategoryIcon::Pill => "💊",
        CategoryIcon::PawPrint => "🐾",
        CategoryIcon::Sparkles => "✨",
        CategoryIcon::Shirt => "👕",
        CategoryIcon::Heart => "❤️",
        CategoryIcon::Gift => "🎁",
        CategoryIcon::GraduationCap => "🎓",
        CategoryIcon::Bus => "🚌",
        CategoryIcon::CarTaxiFront => "🚕",
        CategoryIcon::ShoppingBag => "🛍️",
        CategoryIcon::CreditCard => "💳",
        CategoryIcon::Phone => "📱",
        CategoryIcon::Wifi => "📶",
        CategoryIcon::Home => "🏠",
        CategoryIcon::RefreshCw => "🔄",
        CategoryIcon::Shield => "🛡️",
        CategoryIcon::CircleHelp => "❔",
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryPickerProps {
    pub categories: Vec<ExpenseCategory>,
    pub selected: Option<ExpenseCategory>,
    pub on_select: Callback<ExpenseCategory>,
    /// Called with the trimmed name of a new custom category
    pub on_create: Callback<String>,
}

#[function_component(CategoryPicker)]
pub fn category_picker(props: &CategoryPickerProps) -> Html {
    let is_open = use_state(|| false);
    let new_name = use_state(String::new);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let on_name_input = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let on_create = {
        let new_name = new_name.clone();
        let is_open = is_open.clone();
        let on_create = props.on_create.clone();
        Callback::from(move |_: MouseEvent| {
            let name = new_name.trim().to_string();
            if name.is_empty() {
                return;
            }
            on_create.emit(name);
            new_name.set(String::new());
            is_open.set(false);
        })
    };

    html! {
        <div class="category-picker">
            <button type="button" class="category-picker-toggle" onclick={toggle}>
                {match &props.selected {
                    Some(category) => html! {
                        <>
                            <span class={classes!("category-icon", category.color_class.clone())}>
                                {icon_glyph(category.icon_name)}
                            </span>
                            {&category.name}
                        </>
                    },
                    None => html! { {"Избери категория"} },
                }}
            </button>

            {if *is_open {
                html! {
                    <div class="category-picker-menu">
                        <div class="category-grid">
                            {for props.categories.iter().map(|category| {
                                let onclick = {
                                    let category = category.clone();
                                    let on_select = props.on_select.clone();
                                    let is_open = is_open.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        on_select.emit(category.clone());
                                        is_open.set(false);
                                    })
                                };
                                let is_selected = props.selected.as_ref().map(|s| s.id == category.id).unwrap_or(false);
                                html! {
                                    <button
                                        type="button"
                                        class={classes!("category-option", is_selected.then_some("selected"))}
                                        {onclick}
                                    >
                                        <span class={classes!("category-icon", category.color_class.clone())}>
                                            {icon_glyph(category.icon_name)}
                                        </span>
                                        <span class="category-name">{&category.name}</span>
                                    </button>
                                }
                            })}
                        </div>
                        <div class="category-create">
                            <input
                                type="text"
                                placeholder="Нова категория..."
                                value={(*new_name).clone()}
                                oninput={on_name_input}
                            />
                            <button
                                type="button"
                                onclick={on_create}
                                disabled={new_name.trim().is_empty()}
                            >
                                {"Добави"}
                            </button>
                        </div>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use home_budget_backend::category_catalog::{fixed_categories, variable_categories};

    #[test]
    fn test_every_catalog_icon_has_a_glyph() {
        for category in variable_categories().into_iter().chain(fixed_categories()) {
            assert!(!icon_glyph(category.icon_name).is_empty());
        }
        assert_eq!(icon_glyph(CategoryIcon::CircleHelp), "❔");
    }
}
