pub mod achievement;
pub mod actions;
pub mod affiliate;
pub mod catalog;
pub mod gifting;
pub mod models;
pub mod notify;
pub mod referral_code;
pub mod screens;
pub mod store;
pub mod view;

pub use actions::{Action, StartPayload};
pub use view::{Button, Keyboard, Screen};
