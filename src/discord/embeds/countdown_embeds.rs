use crate::core::delivery::AdminNotice;
use crate::core::message::CountdownMessage;
use poise::serenity_prelude as serenity;

const COLOR_WELCOME: u32 = 0x5294E2;
const COLOR_LOVE: u32 = 0x2AA198;

/// Render a composed countdown as a Discord embed.
pub fn countdown_embed(message: &CountdownMessage) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&message.title)
        .description(&message.description)
        .color(message.color)
        .timestamp(serenity::Timestamp::now());

    if let Some(thumbnail) = &message.thumbnail_url {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(image) = &message.image_url {
        embed = embed.image(image);
    }
    for field in &message.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &message.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }

    embed
}

pub fn notice_embed(notice: &AdminNotice) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(&notice.title)
        .description(&notice.description)
        .color(notice.color)
        .footer(serenity::CreateEmbedFooter::new(&notice.footer))
        .timestamp(serenity::Timestamp::now())
}

pub fn welcome_embed(game_name: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("⚙️ {game_name} Countdown Bot"))
        .description("Thanks for adding me :)\nRun `/countdown-setup` to get started.")
        .color(COLOR_WELCOME)
        .timestamp(serenity::Timestamp::now())
}

/// Donation addresses shown by `/countdown-love`.
const DONATION_ADDRESSES: [(&str, &str); 3] = [
    ("₿ Bitcoin (BTC)", "bc1q3wksadftgyn5f6y36pvprpmd54ny5jj8x8pxeu"),
    ("Ξ Ethereum (ETH)", "0x9c0d097ef971674D9133e88Eff5a256187d2C09d"),
    (
        "ɱ Monero (XMR)",
        "88tVVqExo9EPmRB4CwLV7qFgDHrbfLyXrLFsYcFb6KCS1T8RiimThkBgMQzRewTTAKcfKzMs1rJ3qFC2Mm3HTNVcVi2wSVT",
    ),
];

pub fn love_embed() -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title("🩵 Help cover server costs")
        .description(
            "Working on some cool new features for when the game is out <a:NODDERS:1081963012405071953>",
        )
        .color(COLOR_LOVE);

    for (name, address) in DONATION_ADDRESSES {
        embed = embed.field(name, format!("```\n{address}\n```"), true);
    }

    embed
        .footer(serenity::CreateEmbedFooter::new("Much appreciated :)"))
        .timestamp(serenity::Timestamp::now())
}
