pub mod styles;
pub mod hooks;
pub mod pages;
pub mod config;
pub mod storage;

use yew::prelude::*;
use crate::pages::raffle_wheel::RaffleWheelPage;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class={styles::CONTAINER}>
            <div class="mx-auto">
                <RaffleWheelPage />
            </div>
        </div>
    }
}
