pub mod raffle_wheel;
