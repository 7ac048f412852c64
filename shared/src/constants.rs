pub const STORAGE_KEY: &str = "raffle_inventory";
pub const ADMIN_PASSWORD: &str = "booth2024";

pub const SPIN_DURATION_MS: u32 = 3500;
pub const MIN_TURNS: u32 = 4;
pub const MAX_TURNS: u32 = 6;
pub const JITTER_DEGREES: f64 = 5.0;
pub const POINTER_ANGLE: f64 = 0.0; // clockwise from 12 o'clock

pub const OUT_OF_STOCK_MESSAGE: &str = "Out of stock";
pub const WRONG_PASSWORD_ERROR: &str = "Incorrect password";
pub const ADMIN_LOCKED_ERROR: &str = "Unlock the admin panel first";
pub const STOCK_SAVED_MESSAGE: &str = "Stock saved";
pub const STOCK_RESET_MESSAGE: &str = "Stock restored to defaults";
