mod admin_panel;
mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use web_sys::window;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use shared::{AdminError, AdminGate, Inventory, InventoryDraft, RaffleWheel, SpinOutcome};

use crate::config::raffle_config;
use crate::storage::BrowserStorage;
use crate::styles;

use admin_panel::AdminPanel;
use wheel_canvas::{WheelCanvas, ease_out_cubic};
use wheel_utils::{FullscreenButton, ResultDisplay, SpinButton, StockList};

type SharedWheel = Rc<RefCell<RaffleWheel<BrowserStorage>>>;
type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

// Add custom CSS for animations
const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0.4);
    }
    70% {
        transform: scale(1.02);
        box-shadow: 0 0 0 10px rgba(255, 215, 0, 0);
    }
    100% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0);
    }
}

.animate-pulse-subtle {
    animation: pulse-subtle 2s infinite;
}
"#;

/// Drives the displayed angle from `from` to `to` with an ease-out, one
/// animation frame at a time. Storing a new frame in `slot` drops the old one.
fn animate_spin(slot: FrameSlot, display: UseStateHandle<f64>, from: f64, to: f64, duration_ms: u32, started_at: f64) {
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |_| {
        let elapsed = js_sys::Date::now() - started_at;
        let progress = if duration_ms == 0 { 1.0 } else { (elapsed / duration_ms as f64).min(1.0) };
        display.set(from + (to - from) * ease_out_cubic(progress));
        if progress < 1.0 {
            animate_spin(next_slot, display, from, to, duration_ms, started_at);
        }
    });
    *slot.borrow_mut() = Some(frame);
}

#[function_component(RaffleWheelPage)]
pub fn raffle_wheel_page() -> Html {
    // Apply custom CSS
    {
        use_effect_with((), move |_| {
            let style_element = window()
                .and_then(|w| w.document())
                .and_then(|document| {
                    let head = document.head()?;
                    let style = document.create_element("style").ok()?;
                    style.set_text_content(Some(CUSTOM_CSS));
                    head.append_child(&style).ok()?;
                    Some(style)
                });

            move || {
                if let Some(style) = style_element {
                    style.remove();
                }
            }
        });
    }

    let wheel: SharedWheel = use_mut_ref(|| RaffleWheel::booth(BrowserStorage, raffle_config()));
    let gate = {
        let wheel = wheel.clone();
        use_mut_ref(move || AdminGate::new(wheel.borrow().config().admin_password.clone()))
    };
    let display_rotation = {
        let wheel = wheel.clone();
        use_state(move || wheel.borrow().rotation())
    };
    let settle_timer = use_mut_ref(|| None::<Timeout>);
    let frame: FrameSlot = use_mut_ref(|| None::<AnimationFrame>);
    let show_admin = use_state(|| false);
    let refresh = use_force_update();

    // Tearing the page down is the only way to stop a spin mid-flight.
    {
        let settle_timer = settle_timer.clone();
        let frame = frame.clone();
        use_effect_with((), move |_| {
            move || {
                frame.borrow_mut().take();
                settle_timer.borrow_mut().take();
            }
        });
    }

    let start_spin = {
        let wheel = wheel.clone();
        let display_rotation = display_rotation.clone();
        let settle_timer = settle_timer.clone();
        let frame = frame.clone();
        let refresh = refresh.clone();

        Callback::from(move |_: MouseEvent| {
            let outcome = wheel.borrow_mut().spin(&mut rand::thread_rng());
            match outcome {
                SpinOutcome::Started(plan) => {
                    animate_spin(
                        frame.clone(),
                        display_rotation.clone(),
                        plan.from_rotation,
                        plan.target_rotation,
                        plan.duration_ms,
                        js_sys::Date::now(),
                    );

                    let wheel = wheel.clone();
                    let display_rotation = display_rotation.clone();
                    let settle_refresh = refresh.clone();
                    let target = plan.target_rotation;
                    // Replacing the slot cancels whatever handle was left from before.
                    *settle_timer.borrow_mut() = Some(Timeout::new(plan.duration_ms, move || {
                        if let Some(label) = wheel.borrow_mut().settle() {
                            log::info!("Winner: {}", label);
                        }
                        display_rotation.set(target);
                        settle_refresh.force_update();
                    }));
                    refresh.force_update();
                }
                SpinOutcome::OutOfStock => {
                    log::warn!("Spin found nothing eligible to draw");
                    refresh.force_update();
                }
                other @ (SpinOutcome::Busy | SpinOutcome::NothingInStock) => {
                    log::debug!("Ignoring spin request: {:?}", other);
                }
            }
        })
    };

    let on_unlock = {
        let gate = gate.clone();
        let refresh = refresh.clone();
        Callback::from(move |password: String| -> Result<(), AdminError> {
            let result = gate.borrow_mut().try_unlock(&password);
            if result.is_err() {
                log::warn!("Admin unlock failed");
            }
            refresh.force_update();
            result
        })
    };

    let on_save = {
        let wheel = wheel.clone();
        let gate = gate.clone();
        let refresh = refresh.clone();
        Callback::from(move |draft: InventoryDraft| -> Result<(), AdminError> {
            let result = wheel.borrow_mut().commit_draft(&gate.borrow(), &draft);
            refresh.force_update();
            result
        })
    };

    let on_reset = {
        let wheel = wheel.clone();
        let gate = gate.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| -> Result<Inventory, AdminError> {
            let result = wheel.borrow_mut().restore_defaults(&gate.borrow());
            refresh.force_update();
            result
        })
    };

    let on_close = {
        let gate = gate.clone();
        let show_admin = show_admin.clone();
        Callback::from(move |_: ()| {
            gate.borrow_mut().lock();
            show_admin.set(false);
        })
    };

    let toggle_admin = {
        let gate = gate.clone();
        let show_admin = show_admin.clone();
        Callback::from(move |_: MouseEvent| {
            if *show_admin {
                gate.borrow_mut().lock();
            }
            show_admin.set(!*show_admin);
        })
    };

    let unlocked = gate.borrow().is_unlocked();
    let state = wheel.borrow();
    let labels: Vec<String> = state.catalog().iter().map(|prize| prize.label.clone()).collect();
    let distinct: Vec<String> = state.catalog().distinct_labels().into_iter().map(String::from).collect();

    html! {
        <div class="container mx-auto px-4 py-8">
            <div class="flex items-center justify-between mb-6">
                <h1 class={classes!(styles::TEXT_H1, "text-center", "flex-1")}>
                    <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"Spin to Win"}</span>
                </h1>
                <div class="flex gap-2">
                    <FullscreenButton />
                    <button onclick={toggle_admin} class={styles::BUTTON_ICON} title="Stock admin">
                        <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2">
                            <path stroke-linecap="round" stroke-linejoin="round" d="M12 15v2m-6 4h12a2 2 0 002-2v-6a2 2 0 00-2-2H6a2 2 0 00-2 2v6a2 2 0 002 2zm10-10V7a4 4 0 00-8 0v4h8z" />
                        </svg>
                    </button>
                </div>
            </div>

            <div class={styles::WHEEL_CARD}>
                <div class="relative mx-auto mb-8 flex justify-center items-center">
                    <div class="w-full max-w-[450px] mx-auto">
                        <WheelCanvas
                            rotation={*display_rotation}
                            is_spinning={state.is_spinning()}
                            labels={labels}
                            pointer_angle={state.config().pointer_angle}
                        />
                    </div>
                </div>

                <div class="flex justify-center mt-4">
                    <div class="w-full max-w-[300px]">
                        <SpinButton
                            is_spinning={state.is_spinning()}
                            in_stock={state.inventory().any_in_stock()}
                            onclick={start_spin}
                        />
                    </div>
                </div>

                <ResultDisplay
                    winner={state.winner().map(String::from)}
                    notice={state.notice().map(String::from)}
                />

                <StockList labels={distinct} inventory={state.inventory().clone()} />
            </div>

            if *show_admin {
                <AdminPanel
                    {unlocked}
                    inventory={state.inventory().clone()}
                    {on_unlock}
                    {on_save}
                    {on_reset}
                    {on_close}
                />
            }
        </div>
    }
}
