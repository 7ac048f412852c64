use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::{AdminError, Inventory, InventoryDraft};
use shared::constants::{STOCK_RESET_MESSAGE, STOCK_SAVED_MESSAGE};

use crate::hooks::use_form_state;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct AdminPanelProps {
    pub unlocked: bool,
    pub inventory: Inventory,
    pub on_unlock: Callback<String, Result<(), AdminError>>,
    pub on_save: Callback<InventoryDraft, Result<(), AdminError>>,
    pub on_reset: Callback<(), Result<Inventory, AdminError>>,
    pub on_close: Callback<()>,
}

/// Password prompt, then one text field per prize. Whatever is typed is
/// coerced to a count when saved.
#[function_component(AdminPanel)]
pub fn admin_panel(props: &AdminPanelProps) -> Html {
    let form = use_form_state();
    let password = use_state(String::new);
    let draft = use_state(|| props.inventory.to_draft());

    // Start every editing session from the live counts.
    {
        let draft = draft.clone();
        let inventory = props.inventory.clone();
        use_effect_with(props.unlocked, move |unlocked| {
            if *unlocked {
                draft.set(inventory.to_draft());
            }
            || ()
        });
    }

    if !props.unlocked {
        let on_password = {
            let password = password.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                password.set(input.value());
            })
        };

        let on_submit = {
            let password = password.clone();
            let on_unlock = props.on_unlock.clone();
            let form = form.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                match on_unlock.emit((*password).clone()) {
                    Ok(()) => form.clear.emit(()),
                    Err(err) => form.handle_error.emit(err.to_string()),
                }
                password.set(String::new());
            })
        };

        let on_cancel = {
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| on_close.emit(()))
        };

        return html! {
            <div class={classes!(styles::CARD, "max-w-md", "mx-auto", "mt-8")}>
                <h3 class={styles::TEXT_H3}>{"Stock admin"}</h3>
                <form onsubmit={on_submit} class="mt-4 space-y-4">
                    <label class={styles::TEXT_LABEL}>{"Password"}</label>
                    <input
                        type="password"
                        class={styles::INPUT}
                        value={(*password).clone()}
                        oninput={on_password}
                    />
                    if !form.error.is_empty() {
                        <div class={styles::ALERT_ERROR}>{&form.error}</div>
                    }
                    <div class="flex gap-3">
                        <button type="submit" class={styles::BUTTON_PRIMARY}>{"Unlock"}</button>
                        <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_cancel}>{"Cancel"}</button>
                    </div>
                </form>
            </div>
        };
    }

    let on_save = {
        let draft = draft.clone();
        let on_save = props.on_save.clone();
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match on_save.emit((*draft).clone()) {
                Ok(()) => {
                    // Show the coerced values, not what was typed.
                    draft.set(draft.resolve().to_draft());
                    form.handle_success.emit(STOCK_SAVED_MESSAGE.to_string());
                }
                Err(err) => form.handle_error.emit(err.to_string()),
            }
        })
    };

    let on_reset = {
        let on_reset = props.on_reset.clone();
        let form = form.clone();
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| match on_reset.emit(()) {
            Ok(restored) => {
                draft.set(restored.to_draft());
                form.handle_success.emit(STOCK_RESET_MESSAGE.to_string());
            }
            Err(err) => form.handle_error.emit(err.to_string()),
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        let clear = form.clear.clone();
        Callback::from(move |_: MouseEvent| {
            clear.emit(());
            on_close.emit(());
        })
    };

    html! {
        <div class={classes!(styles::CARD, "max-w-md", "mx-auto", "mt-8")}>
            <h3 class={styles::TEXT_H3}>{"Stock admin"}</h3>
            <form onsubmit={on_save} class="mt-4 space-y-3">
                { for draft.iter().map(|(label, raw)| {
                    let oninput = {
                        let draft = draft.clone();
                        let label = label.to_string();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = (*draft).clone();
                            next.set(label.clone(), input.value());
                            draft.set(next);
                        })
                    };
                    html! {
                        <div class="flex items-center justify-between" key={label.to_string()}>
                            <span class={styles::TEXT_LABEL}>{label}</span>
                            <input
                                type="text"
                                inputmode="numeric"
                                class={styles::INPUT_STOCK}
                                value={raw.to_string()}
                                {oninput}
                            />
                        </div>
                    }
                })}
                if !form.error.is_empty() {
                    <div class={styles::ALERT_ERROR}>{&form.error}</div>
                }
                if !form.success.is_empty() {
                    <div class={styles::ALERT_SUCCESS}>{&form.success}</div>
                }
                <div class="flex flex-wrap gap-3 pt-2">
                    <button type="submit" class={styles::BUTTON_PRIMARY}>{"Save"}</button>
                    <button type="button" class={styles::BUTTON_DANGER} onclick={on_reset}>{"Restore defaults"}</button>
                    <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_close}>{"Close"}</button>
                </div>
            </form>
        </div>
    }
}
