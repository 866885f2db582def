//! Sample game saved into the store at start-up.

use validator::ValidationErrors;

use crate::state::game::{Choice, Game, VoteItem};

/// Key of the Eurovision 2024 sample game.
pub const EUROVISION24_KEY: &str = "eurovision24";

const IMAGE_BASE_URL: &str =
    "https://eurovision.tv/sites/default/files/styles/banner/public/media/image/2024-05/";

/// Country, entry, flag, image file.
const EUROVISION24_ENTRIES: [(&str, &str, &str, &str); 16] = [
    (
        "Croatia",
        "Baby Lasagna - Rim Tim Tagi Dim",
        "🇭🇷",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207966.jpg",
    ),
    (
        "Cyprus",
        "Silia Kapsis - Liar",
        "🇨🇾",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207686.jpg",
    ),
    (
        "Finland",
        "Windows95man - No Rules!",
        "🇫🇮",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%208116.jpg",
    ),
    (
        "France",
        "Slimane - Mon amour",
        "🇫🇷",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2013134.jpg",
    ),
    (
        "Germany",
        "ISAAK - Always On The Run",
        "🇩🇪",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2012893_0.jpg",
    ),
    (
        "Ireland",
        "Bambie Thug - Doomsday Blue",
        "🇮🇪",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207880.jpg",
    ),
    (
        "Italy",
        "Angelina Mango - La noia",
        "🇮🇹",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2013287.jpg",
    ),
    (
        "Lithuania",
        "Silvester Belt - Luktelk",
        "🇱🇹",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207747.jpg",
    ),
    (
        "Luxembourg",
        "TALI - Fighter",
        "🇱🇺",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%208493.jpg",
    ),
    (
        "Portugal",
        "iolanda - Grito",
        "🇵🇹",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%208458.jpg",
    ),
    (
        "Serbia",
        "TEYA DORA - RAMONDA",
        "🇷🇸",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207704.jpg",
    ),
    (
        "Slovenia",
        "Raiven - Veronika",
        "🇸🇮",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%208104.jpg",
    ),
    (
        "Spain",
        "Nebulossa - ZORRA",
        "🇪🇸",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2013155.jpg",
    ),
    (
        "Sweden",
        "Marcus & Martinus - Unforgettable",
        "🇸🇪",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2013077.jpg",
    ),
    (
        "Ukraine",
        "alyona alyona & Jerry Heil - Teresa & Maria",
        "🇺🇦",
        "01-05.24%20Corinne%20Cumming%20-%20EBU%207792.jpg",
    ),
    (
        "United Kingdom",
        "Olly Alexander - Dizzy",
        "🇬🇧",
        "04.05.24%20Corinne%20Cumming%20-%20EBU%2012840.jpg",
    ),
];

/// Five-step scale from "I hate it" (-2) to "I love it" (+2).
pub fn default_choices() -> Result<Vec<Choice>, ValidationErrors> {
    Ok(vec![
        Choice::new("hateit", "I hate it", -2)?,
        Choice::new("dislikeit", "I dislike it", -1)?,
        Choice::new("neutral", "I don't know", 0)?,
        Choice::new("likeit", "I like it", 1)?,
        Choice::new("loveit", "I love it", 2)?,
    ])
}

/// The Eurovision 2024 final entries, without players.
pub fn eurovision24_game() -> Result<Game, ValidationErrors> {
    let choices = default_choices()?;
    let items = EUROVISION24_ENTRIES
        .iter()
        .map(|(country, entry, flag, image)| {
            Ok(VoteItem::new(*country, *entry, choices.clone())?
                .with_icon(*flag)?
                .with_image_url(format!("{IMAGE_BASE_URL}{image}")))
        })
        .collect::<Result<Vec<_>, ValidationErrors>>()?;

    Game::new("Eurovision 2024", Some(EUROVISION24_KEY))?.with_items(items)
}
