use shared::RaffleConfig;
use web_sys::{window, UrlSearchParams};

/// Pulls the `booth` query parameter out of a location search string.
pub fn booth_from_search(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "booth")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn current_booth() -> Option<String> {
    let search = window()?.location().search().ok()?;
    // Prefer the browser's own decoder; fall back to the plain split.
    UrlSearchParams::new_with_str(&search)
        .ok()
        .and_then(|params| params.get("booth"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| booth_from_search(&search))
}

/// Config for the page we're running on. A `?booth=<name>` query keeps
/// each booth's stock under its own storage key.
pub fn raffle_config() -> RaffleConfig {
    match current_booth() {
        Some(booth) => {
            log::info!("Using stock for booth {}", booth);
            RaffleConfig::for_booth(&booth)
        }
        None => RaffleConfig::default(),
    }
}
