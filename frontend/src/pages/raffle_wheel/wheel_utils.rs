use yew::prelude::*;
use web_sys::window;
use shared::Inventory;

use crate::styles;

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub winner: Option<String>,
    pub notice: Option<String>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    if let Some(winner) = &props.winner {
        return html! {
            <div class="mt-8 mb-4 flex flex-col items-center justify-center">
                <div class={classes!(
                    "flex",
                    "items-center",
                    "justify-center",
                    "px-6",
                    "py-4",
                    "rounded-xl",
                    "bg-gradient-to-r",
                    "from-orange-400",
                    "to-orange-600",
                    "border-orange-300",
                    "text-white",
                    "font-bold",
                    "text-xl",
                    "shadow-lg",
                    "border-2",
                    "animate-bounce",
                )}>
                    <span>{format!("You won: {}!", winner)}</span>
                </div>
            </div>
        };
    }

    if let Some(notice) = &props.notice {
        return html! {
            <div class="mt-8 mb-4 text-center">
                <p class={styles::ALERT_WARNING}>{notice}</p>
            </div>
        };
    }

    html! {}
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub in_stock: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning {
        "Spinning..."
    } else if !props.in_stock {
        "All prizes claimed"
    } else {
        "Spin"
    };

    let is_disabled = props.is_spinning || !props.in_stock;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let animation_class = if is_disabled { "" } else { "animate-pulse-subtle" };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class, animation_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 border-2 border-transparent hover:border-white focus:outline-none focus:ring-4 focus:ring-yellow-300 focus:ring-opacity-50 bg-transparent"
            >
                <div class="flex items-center justify-center relative z-10">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StockListProps {
    pub labels: Vec<String>,
    pub inventory: Inventory,
}

/// Remaining count per prize, in wheel order.
#[function_component(StockList)]
pub fn stock_list(props: &StockListProps) -> Html {
    html! {
        <div class="grid grid-cols-2 md:grid-cols-3 gap-3 mt-6">
            { for props.labels.iter().map(|label| {
                let count = props.inventory.count(label);
                html! {
                    <div class={classes!(
                        "bg-white", "dark:bg-gray-800", "p-3", "rounded-lg", "shadow-sm",
                        "flex", "items-center", "justify-between", "border-l-4",
                        if count > 0 { "border-orange-500" } else { "border-gray-300 opacity-60" }
                    )}>
                        <span class="font-medium text-gray-900 dark:text-white">{label}</span>
                        <span class={styles::TEXT_SMALL}>{count}</span>
                    </div>
                }
            })}
        </div>
    }
}

fn toggle_fullscreen() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(root) = document.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("Fullscreen request refused: {:?}", e);
        }
    }
}

#[function_component(FullscreenButton)]
pub fn fullscreen_button() -> Html {
    let onclick = Callback::from(|_: MouseEvent| toggle_fullscreen());

    html! {
        <button {onclick} class={styles::BUTTON_ICON} title="Toggle fullscreen">
            <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2">
                <path stroke-linecap="round" stroke-linejoin="round" d="M4 8V4h4M20 8V4h-4M4 16v4h4M20 16v4h-4" />
            </svg>
        </button>
    }
}
