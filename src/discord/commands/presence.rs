// Bot presence.
//
// Discord-layer glue only: pick the activity text and hand it to serenity.

use poise::serenity_prelude as serenity;

pub fn activity_text(game_name: &str) -> String {
    format!("Counting down to {game_name}")
}

/// Called once the bot is ready.
pub fn on_ready(ctx: &serenity::Context, game_name: &str) {
    let activity = serenity::ActivityData::playing(activity_text(game_name));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_names_the_game() {
        assert_eq!(activity_text("Arc Raiders"), "Counting down to Arc Raiders");
    }
}
