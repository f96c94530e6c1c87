// Discord commands module.

pub mod countdown;

pub mod presence;

use crate::discord::{Data, Error};

/// Every slash command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        countdown::countdown_setup(),
        countdown::countdown_time(),
        countdown::countdown_status(),
        countdown::countdown_test(),
        countdown::countdown_love(),
    ]
}
