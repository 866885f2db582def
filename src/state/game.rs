use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::validation::{
    Keyed, slugify, validate_icon, validate_key, validate_name, validate_unique_keys,
};
use crate::dao::models::{ChoiceEntity, GameEntity, PlayerEntity, VoteItemEntity};

/// Integrity violations raised when mutating a [`Game`].
#[derive(Debug, Error)]
pub enum GameError {
    /// A player with the same name already joined and re-joining was not requested.
    #[error("player `{player_name}` already exists in game `{game_name}`")]
    PlayerAlreadyExists {
        /// Name of the game.
        game_name: String,
        /// Name that is already taken.
        player_name: String,
    },
    /// No player with that name joined the game.
    #[error("player `{player_name}` not found in game `{game_name}`")]
    PlayerNotFound {
        /// Unknown player name.
        player_name: String,
        /// Name of the game.
        game_name: String,
    },
    /// The game has no vote item with that key.
    #[error("vote item `{item_key}` not found in game `{game_name}`")]
    VoteItemNotFound {
        /// Unknown vote item key.
        item_key: String,
        /// Name of the game.
        game_name: String,
    },
    /// The vote item has no choice with that key.
    #[error("choice `{choice_key}` not found for item `{item_key}` in game `{game_name}`")]
    ChoiceNotFound {
        /// Unknown choice key.
        choice_key: String,
        /// Vote item the choice was looked up in.
        item_key: String,
        /// Name of the game.
        game_name: String,
    },
    /// An entity could not be built from the provided fields.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// One selectable option of a vote item.
#[derive(Debug, Clone, Validate)]
pub struct Choice {
    #[validate(custom(function = "validate_key"))]
    key: String,
    text: String,
    /// Signed number of points this choice contributes.
    value: i32,
}

impl Choice {
    /// Build a choice, validating its key.
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        value: i32,
    ) -> Result<Self, ValidationErrors> {
        let choice = Self {
            key: key.into(),
            text: text.into(),
            value,
        };
        choice.validate()?;
        Ok(choice)
    }

    /// Stable key of the choice.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Label shown to players.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Points this choice is worth.
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Keyed for Choice {
    fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Choice {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Choice {}

impl Hash for Choice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// Something players vote on, with its fixed set of choices.
#[derive(Debug, Clone)]
pub struct VoteItem {
    key: String,
    icon: Option<String>,
    title: String,
    text: String,
    image_url: Option<String>,
    options: Vec<Choice>,
}

impl VoteItem {
    /// Build a vote item whose key is derived from its title.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        options: Vec<Choice>,
    ) -> Result<Self, ValidationErrors> {
        let title = title.into();
        let key = slugify(&title);
        Self::with_key(key, title, text, options)
    }

    /// Build a vote item with an explicit key.
    pub fn with_key(
        key: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        options: Vec<Choice>,
    ) -> Result<Self, ValidationErrors> {
        let item = Self {
            key: key.into(),
            icon: None,
            title: title.into(),
            text: text.into(),
            image_url: None,
            options,
        };
        item.validate()?;
        Ok(item)
    }

    /// Attach a short icon (usually an emoji flag).
    pub fn with_icon(mut self, icon: impl Into<String>) -> Result<Self, ValidationErrors> {
        self.icon = Some(icon.into());
        self.validate()?;
        Ok(self)
    }

    /// Attach an illustration URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Replace the options, rejecting lists with duplicate keys.
    ///
    /// The item is left untouched when validation fails.
    pub fn set_options(&mut self, options: Vec<Choice>) -> Result<(), ValidationErrors> {
        check_unique("options", &options)?;
        self.options = options;
        Ok(())
    }

    /// Key unique within the game.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Short icon, if any.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description, possibly empty.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Illustration URL, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Choices in declaration order.
    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    /// Look up one of the item's choices by key.
    pub fn option(&self, key: &str) -> Option<&Choice> {
        self.options.iter().find(|choice| choice.key == key)
    }
}

impl Validate for VoteItem {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_key(&self.key) {
            errors.add("key", e);
        }

        if let Some(ref icon) = self.icon {
            if let Err(e) = validate_icon(icon) {
                errors.add("icon", e);
            }
        }

        if let Err(e) = validate_unique_keys(&self.options) {
            errors.add("options", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Keyed for VoteItem {
    fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for VoteItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for VoteItem {}

impl Hash for VoteItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// A named participant and the choice they picked for each item.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Player {
    #[validate(custom(function = "validate_name"))]
    name: String,
    /// Choice key keyed by vote item key.
    votes: IndexMap<String, String>,
}

impl Player {
    /// Build a player who has not voted yet.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationErrors> {
        Self::with_votes(name, IndexMap::new())
    }

    /// Build a player with previously recorded votes.
    pub fn with_votes(
        name: impl Into<String>,
        votes: IndexMap<String, String>,
    ) -> Result<Self, ValidationErrors> {
        let player = Self {
            name: name.into(),
            votes,
        };
        player.validate()?;
        Ok(player)
    }

    /// Name the player joined with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recorded choices keyed by vote item key.
    pub fn votes(&self) -> &IndexMap<String, String> {
        &self.votes
    }

    /// Choice key recorded for `item_key`, if any.
    pub fn vote_for(&self, item_key: &str) -> Option<&str> {
        self.votes.get(item_key).map(String::as_str)
    }

    /// Record a vote, overwriting any previous choice for the item.
    pub(crate) fn record_vote(&mut self, item_key: &str, choice_key: &str) {
        self.votes
            .insert(item_key.to_string(), choice_key.to_string());
    }
}

/// A voting session: ordered vote items, joined players and an optional stylesheet.
#[derive(Debug, Clone)]
pub struct Game {
    key: String,
    name: String,
    css: Option<String>,
    items: Vec<VoteItem>,
    players: Vec<Player>,
}

impl Game {
    /// Build an empty game.
    ///
    /// When `key` is omitted it is derived from `name`, e.g.
    /// `"Is this correct?   Not really."` becomes `"is-this-correct-not-really"`.
    pub fn new(name: impl Into<String>, key: Option<&str>) -> Result<Self, ValidationErrors> {
        let name = name.into();
        let key = key.map_or_else(|| slugify(&name), str::to_string);
        let game = Self {
            key,
            name,
            css: None,
            items: Vec::new(),
            players: Vec::new(),
        };
        game.validate()?;
        Ok(game)
    }

    /// Builder variant of [`Game::set_items`].
    pub fn with_items(mut self, items: Vec<VoteItem>) -> Result<Self, ValidationErrors> {
        self.set_items(items)?;
        Ok(self)
    }

    /// Builder variant of [`Game::set_css`].
    pub fn with_css(mut self, css: Option<String>) -> Self {
        self.css = css;
        self
    }

    /// Replace the roster, e.g. with players loaded from storage.
    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    /// Replace the vote items, rejecting lists with duplicate keys.
    ///
    /// The game is left untouched when validation fails.
    pub fn set_items(&mut self, items: Vec<VoteItem>) -> Result<(), ValidationErrors> {
        check_unique("items", &items)?;
        self.items = items;
        Ok(())
    }

    /// Replace the stylesheet served for the game.
    pub fn set_css(&mut self, css: Option<String>) {
        self.css = css;
    }

    /// Key used in URLs and storage paths.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-text game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Custom stylesheet, if any.
    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    /// Vote items in declaration order.
    pub fn items(&self) -> &[VoteItem] {
        &self.items
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a vote item by key.
    pub fn item(&self, key: &str) -> Option<&VoteItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// First player registered under `name`.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    /// Total points per item, in item order.
    ///
    /// Each player contributes the value of the choice they recorded for the
    /// item. Missing votes and choice keys that no longer match an option
    /// contribute nothing.
    pub fn points(&self) -> IndexMap<&VoteItem, i64> {
        self.items
            .iter()
            .map(|item| {
                let total = self
                    .players
                    .iter()
                    .filter_map(|player| player.vote_for(&item.key))
                    .filter_map(|choice_key| item.option(choice_key))
                    .map(|choice| i64::from(choice.value))
                    .sum();
                (item, total)
            })
            .collect()
    }

    /// Players who voted on each item, whatever their choice, in player order.
    pub fn votes(&self) -> IndexMap<&VoteItem, Vec<&Player>> {
        self.items
            .iter()
            .map(|item| {
                let voters = self
                    .players
                    .iter()
                    .filter(|player| player.votes.contains_key(&item.key))
                    .collect();
                (item, voters)
            })
            .collect()
    }

    /// Key of the first item `player_name` has not voted on yet.
    ///
    /// An unknown player has voted on nothing, so the first item is returned.
    pub fn next_unvoted_item(&self, player_name: &str) -> Option<&str> {
        let player = self.player(player_name);
        self.items
            .iter()
            .find(|item| player.is_none_or(|player| !player.votes.contains_key(&item.key)))
            .map(|item| item.key.as_str())
    }

    /// Item declared right before `item_key`.
    pub fn previous_item(&self, item_key: &str) -> Option<&VoteItem> {
        let index = self.position(item_key)?;
        index.checked_sub(1).and_then(|prev| self.items.get(prev))
    }

    /// Item declared right after `item_key`.
    pub fn next_item(&self, item_key: &str) -> Option<&VoteItem> {
        let index = self.position(item_key)?;
        self.items.get(index + 1)
    }

    fn position(&self, item_key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == item_key)
    }

    /// Register a fresh player.
    ///
    /// Unless `join_as_existing` is set, joining under a name already present
    /// fails and leaves the roster untouched. With the flag set a second
    /// player with the same name is appended.
    pub fn join(&mut self, player_name: &str, join_as_existing: bool) -> Result<Player, GameError> {
        if !join_as_existing && self.player(player_name).is_some() {
            return Err(GameError::PlayerAlreadyExists {
                game_name: self.name.clone(),
                player_name: player_name.to_string(),
            });
        }

        let player = Player::new(player_name)?;
        self.players.push(player.clone());
        Ok(player)
    }

    /// Record `choice_key` as the vote of `player_name` for `item_key`.
    ///
    /// Checks run in order: item, choice, player. The first failure wins and
    /// nothing is recorded.
    pub fn cast_vote(
        &mut self,
        player_name: &str,
        item_key: &str,
        choice_key: &str,
    ) -> Result<&Player, GameError> {
        let Some(item) = self.item(item_key) else {
            return Err(GameError::VoteItemNotFound {
                item_key: item_key.to_string(),
                game_name: self.name.clone(),
            });
        };

        if item.option(choice_key).is_none() {
            return Err(GameError::ChoiceNotFound {
                choice_key: choice_key.to_string(),
                item_key: item_key.to_string(),
                game_name: self.name.clone(),
            });
        }

        let Some(player) = self
            .players
            .iter_mut()
            .find(|player| player.name == player_name)
        else {
            return Err(GameError::PlayerNotFound {
                player_name: player_name.to_string(),
                game_name: self.name.clone(),
            });
        };

        player.record_vote(item_key, choice_key);
        Ok(&*player)
    }
}

impl Validate for Game {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_key(&self.key) {
            errors.add("key", e);
        }

        if let Err(e) = validate_unique_keys(&self.items) {
            errors.add("items", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_unique<T: Keyed>(field: &'static str, entries: &[T]) -> Result<(), ValidationErrors> {
    validate_unique_keys(entries).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add(field, e);
        errors
    })
}

impl TryFrom<ChoiceEntity> for Choice {
    type Error = ValidationErrors;

    fn try_from(value: ChoiceEntity) -> Result<Self, Self::Error> {
        Self::new(value.key, value.text, value.value)
    }
}

impl From<&Choice> for ChoiceEntity {
    fn from(value: &Choice) -> Self {
        Self {
            key: value.key.clone(),
            text: value.text.clone(),
            value: value.value,
        }
    }
}

impl TryFrom<VoteItemEntity> for VoteItem {
    type Error = ValidationErrors;

    fn try_from(value: VoteItemEntity) -> Result<Self, Self::Error> {
        let options = value
            .options
            .into_iter()
            .map(Choice::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let item = Self {
            key: value.key,
            icon: value.icon,
            title: value.title,
            text: value.text,
            image_url: value.image_url,
            options,
        };
        item.validate()?;
        Ok(item)
    }
}

impl From<&VoteItem> for VoteItemEntity {
    fn from(value: &VoteItem) -> Self {
        Self {
            key: value.key.clone(),
            icon: value.icon.clone(),
            title: value.title.clone(),
            text: value.text.clone(),
            image_url: value.image_url.clone(),
            options: value.options.iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<PlayerEntity> for Player {
    type Error = ValidationErrors;

    fn try_from(value: PlayerEntity) -> Result<Self, Self::Error> {
        Self::with_votes(value.name, value.votes)
    }
}

impl From<&Player> for PlayerEntity {
    fn from(value: &Player) -> Self {
        Self {
            name: value.name.clone(),
            votes: value.votes.clone(),
        }
    }
}

impl TryFrom<GameEntity> for Game {
    type Error = ValidationErrors;

    fn try_from(value: GameEntity) -> Result<Self, Self::Error> {
        let items = value
            .items
            .into_iter()
            .map(VoteItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let players = value
            .players
            .into_iter()
            .map(Player::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(value.name, Some(&value.key))?
            .with_items(items)?
            .with_css(value.css)
            .with_players(players))
    }
}

impl From<&Game> for GameEntity {
    fn from(value: &Game) -> Self {
        Self {
            key: value.key.clone(),
            name: value.name.clone(),
            css: value.css.clone(),
            items: value.items.iter().map(Into::into).collect(),
            players: value.players.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(values: &[(&str, i32)]) -> Vec<Choice> {
        values
            .iter()
            .map(|(key, value)| Choice::new(*key, format!("Choice {key}"), *value).unwrap())
            .collect()
    }

    fn item(key: &str, options: Vec<Choice>) -> VoteItem {
        VoteItem::with_key(key, format!("Item {key}"), "text", options).unwrap()
    }

    fn player(name: &str, votes: &[(&str, &str)]) -> Player {
        let votes = votes
            .iter()
            .map(|(item, choice)| (item.to_string(), choice.to_string()))
            .collect();
        Player::with_votes(name, votes).unwrap()
    }

    fn single_item_game(players: Vec<Player>) -> Game {
        Game::new("name", Some("key"))
            .unwrap()
            .with_items(vec![item(
                "itemkey",
                choices(&[("choicekey1", 1), ("choicekey2", 2), ("choicekey3", 3)]),
            )])
            .unwrap()
            .with_players(players)
    }

    fn three_item_game() -> Game {
        let options = choices(&[("a", 1), ("b", 2)]);
        Game::new("Three items", None)
            .unwrap()
            .with_items(vec![
                item("first", options.clone()),
                item("second", options.clone()),
                item("third", options),
            ])
            .unwrap()
    }

    #[test]
    fn game_key_is_derived_from_name() {
        let game = Game::new("Is this correct?   Not really.", None).unwrap();
        assert_eq!(game.key(), "is-this-correct-not-really");
        assert!(game.items().is_empty());
        assert!(game.players().is_empty());
    }

    #[test]
    fn explicit_invalid_key_is_rejected() {
        let err = Game::new("x", Some("This should fail")).unwrap_err();
        assert!(err.field_errors().contains_key("key"));
    }

    #[test]
    fn name_without_key_characters_is_rejected() {
        assert!(Game::new("???", None).is_err());
    }

    #[test]
    fn vote_item_key_is_derived_from_title() {
        let item = VoteItem::new("United Kingdom", "Olly Alexander - Dizzy", vec![]).unwrap();
        assert_eq!(item.key(), "united-kingdom");
        assert_eq!(item.icon(), None);
    }

    #[test]
    fn vote_item_icon_is_validated() {
        let base = VoteItem::new("Croatia", "text", vec![]).unwrap();
        assert_eq!(base.clone().with_icon("🇭🇷").unwrap().icon(), Some("🇭🇷"));
        assert!(base.with_icon("too long").is_err());
    }

    #[test]
    fn duplicate_options_are_rejected_on_construction() {
        let err = VoteItem::new("Dup", "text", choices(&[("a", 1), ("a", 2)])).unwrap_err();
        assert!(err.field_errors().contains_key("options"));
    }

    #[test]
    fn duplicate_options_are_rejected_on_reassignment() {
        let mut item = item("k", choices(&[("a", 1), ("b", 2)]));
        assert!(item.set_options(choices(&[("c", 1), ("c", 2)])).is_err());
        assert_eq!(item.options().len(), 2);
        assert_eq!(item.options()[0].key(), "a");

        item.set_options(choices(&[("c", 1)])).unwrap();
        assert_eq!(item.options().len(), 1);
    }

    #[test]
    fn duplicate_items_are_rejected_on_construction_and_reassignment() {
        let options = choices(&[("a", 1)]);
        let duplicated = vec![item("same", options.clone()), item("same", options.clone())];
        assert!(Game::new("g", None).unwrap().with_items(duplicated.clone()).is_err());

        let mut game = Game::new("g", None)
            .unwrap()
            .with_items(vec![item("one", options)])
            .unwrap();
        let err = game.set_items(duplicated).unwrap_err();
        assert!(err.field_errors().contains_key("items"));
        assert_eq!(game.items().len(), 1);
        assert_eq!(game.items()[0].key(), "one");
    }

    #[test]
    fn choice_and_item_equality_is_by_key() {
        let a = Choice::new("k", "one", 1).unwrap();
        let b = Choice::new("k", "two", 2).unwrap();
        assert_eq!(a, b);

        let first = item("k", vec![]);
        let second = VoteItem::with_key("k", "Other", "other", choices(&[("x", 1)])).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn player_name_is_validated() {
        assert!(Player::new("My Name").is_ok());
        assert!(Player::new("").is_err());
        assert!(Player::new("bad/name").is_err());
    }

    #[test]
    fn empty_game_points_and_votes_are_empty() {
        let game = Game::new("name", Some("key")).unwrap();
        assert!(game.points().is_empty());
        assert!(game.votes().is_empty());
        assert_eq!(game.next_unvoted_item("anyone"), None);
    }

    #[test]
    fn points_sum_every_player_vote() {
        let game = single_item_game(vec![
            player("a", &[("itemkey", "choicekey1")]),
            player("b", &[("itemkey", "choicekey2")]),
        ]);
        let points = game.points();
        assert_eq!(points.len(), 1);
        assert_eq!(points.get(&game.items()[0]), Some(&3));
    }

    #[test]
    fn points_count_identical_choices_once_per_player() {
        let game = single_item_game(vec![
            player("a", &[("itemkey", "choicekey3")]),
            player("b", &[("itemkey", "choicekey3")]),
        ]);
        assert_eq!(game.points().get(&game.items()[0]), Some(&6));
    }

    #[test]
    fn points_ignore_players_who_did_not_vote() {
        let game = single_item_game(vec![
            player("a", &[("itemkey", "choicekey1")]),
            player("b", &[]),
        ]);
        assert_eq!(game.points().get(&game.items()[0]), Some(&1));
    }

    #[test]
    fn points_ignore_stale_choice_keys() {
        let game = single_item_game(vec![
            player("a", &[("itemkey", "removed")]),
            player("b", &[("itemkey", "choicekey2")]),
        ]);
        assert_eq!(game.points().get(&game.items()[0]), Some(&2));
    }

    #[test]
    fn points_cover_items_without_votes() {
        let options = choices(&[("choicekey1", 1), ("choicekey2", 2)]);
        let game = Game::new("name", Some("key"))
            .unwrap()
            .with_items(vec![item("itemkey", options.clone()), item("itemkey2", options)])
            .unwrap()
            .with_players(vec![
                player("a", &[("itemkey2", "choicekey2")]),
                player("b", &[]),
            ]);

        let points = game.points();
        let values = points.values().copied().collect::<Vec<_>>();
        assert_eq!(values, vec![0, 2]);
    }

    #[test]
    fn points_total_matches_player_sum() {
        let options = choices(&[("neg", -2), ("zero", 0), ("pos", 5)]);
        let game = Game::new("sum", None)
            .unwrap()
            .with_items(vec![item("x", options.clone()), item("y", options)])
            .unwrap()
            .with_players(vec![
                player("a", &[("x", "neg"), ("y", "pos")]),
                player("b", &[("x", "pos")]),
                player("c", &[("y", "stale")]),
            ]);

        let expected: i64 = game
            .players()
            .iter()
            .flat_map(|p| {
                game.items().iter().filter_map(move |item| {
                    p.vote_for(item.key())
                        .and_then(|key| item.option(key))
                        .map(|choice| i64::from(choice.value()))
                })
            })
            .sum();
        assert_eq!(game.points().values().sum::<i64>(), expected);
        assert_eq!(expected, 8);
    }

    #[test]
    fn votes_list_voters_in_player_order() {
        let game = three_item_game().with_players(vec![
            player("a", &[("second", "a")]),
            player("b", &[("first", "b"), ("second", "b")]),
            player("c", &[("first", "a")]),
        ]);

        let votes = game.votes();
        let names = votes
            .values()
            .map(|players| players.iter().map(|p| p.name()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(names[0], vec!["b", "c"]);
        assert_eq!(names[1], vec!["a", "b"]);
        assert!(names[2].is_empty());
        assert_eq!(votes[game.item("first").unwrap()].len(), 2);
    }

    #[test]
    fn next_unvoted_item_for_player_without_votes_is_first_item() {
        let game = three_item_game().with_players(vec![player("a", &[])]);
        assert_eq!(game.next_unvoted_item("a"), Some("first"));
    }

    #[test]
    fn next_unvoted_item_for_unknown_player_is_first_item() {
        let game = three_item_game();
        assert_eq!(game.next_unvoted_item("ghost"), Some("first"));
    }

    #[test]
    fn next_unvoted_item_skips_voted_items() {
        let game = three_item_game().with_players(vec![
            player("a", &[("first", "a"), ("third", "b")]),
            player("b", &[("first", "a"), ("second", "a"), ("third", "a")]),
        ]);
        assert_eq!(game.next_unvoted_item("a"), Some("second"));
        assert_eq!(game.next_unvoted_item("b"), None);
    }

    #[test]
    fn neighbours_are_inverse() {
        let game = three_item_game();
        let keys = game.items().iter().map(VoteItem::key).collect::<Vec<_>>();

        for pair in keys.windows(2) {
            assert_eq!(game.next_item(pair[0]).map(VoteItem::key), Some(pair[1]));
            assert_eq!(game.previous_item(pair[1]).map(VoteItem::key), Some(pair[0]));
        }
        assert!(game.previous_item("first").is_none());
        assert!(game.next_item("third").is_none());
        assert!(game.next_item("unknown").is_none());
        assert!(game.previous_item("unknown").is_none());
    }

    #[test]
    fn player_lookup_returns_first_match() {
        let game = three_item_game().with_players(vec![
            player("dup", &[("first", "a")]),
            player("dup", &[]),
        ]);
        assert_eq!(game.player("dup").unwrap().votes().len(), 1);
        assert!(game.player("none").is_none());
    }

    #[test]
    fn join_rejects_existing_name() {
        let mut game = three_item_game();
        game.join("A", false).unwrap();
        let err = game.join("A", false).unwrap_err();
        assert!(matches!(
            err,
            GameError::PlayerAlreadyExists { ref player_name, .. } if player_name == "A"
        ));
        assert_eq!(game.players().len(), 1);
    }

    #[test]
    fn join_as_existing_appends_duplicate() {
        let mut game = three_item_game();
        game.join("A", false).unwrap();
        game.cast_vote("A", "first", "a").unwrap();

        let rejoined = game.join("A", true).unwrap();
        assert!(rejoined.votes().is_empty());
        assert_eq!(game.players().len(), 2);
        assert_eq!(game.next_unvoted_item("A"), Some("second"));
    }

    #[test]
    fn join_validates_player_name() {
        let mut game = three_item_game();
        assert!(matches!(
            game.join("../etc", false),
            Err(GameError::Validation(_))
        ));
        assert!(game.players().is_empty());
    }

    #[test]
    fn cast_vote_checks_run_in_order() {
        let mut game = three_item_game();

        assert!(matches!(
            game.cast_vote("ghost", "missing", "missing"),
            Err(GameError::VoteItemNotFound { .. })
        ));
        assert!(matches!(
            game.cast_vote("ghost", "first", "missing"),
            Err(GameError::ChoiceNotFound { .. })
        ));
        assert!(matches!(
            game.cast_vote("ghost", "first", "a"),
            Err(GameError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn cast_vote_overwrites_previous_choice() {
        let mut game = three_item_game();
        game.join("A", false).unwrap();
        game.cast_vote("A", "first", "a").unwrap();
        let player = game.cast_vote("A", "first", "b").unwrap();
        assert_eq!(player.vote_for("first"), Some("b"));
        assert_eq!(player.votes().len(), 1);
    }

    #[test]
    fn failed_vote_leaves_votes_untouched() {
        let mut game = three_item_game();
        game.join("A", false).unwrap();
        game.cast_vote("A", "first", "a").unwrap();
        assert!(game.cast_vote("A", "first", "bogus").is_err());
        assert_eq!(game.player("A").unwrap().vote_for("first"), Some("a"));
    }

    #[test]
    fn entity_conversion_keeps_shape() {
        let mut game = three_item_game().with_css(Some("body {}".into()));
        game.join("A", false).unwrap();
        game.cast_vote("A", "second", "b").unwrap();

        let restored = Game::try_from(GameEntity::from(&game)).unwrap();
        assert_eq!(restored.key(), game.key());
        assert_eq!(restored.css(), Some("body {}"));
        assert_eq!(restored.items().len(), 3);
        assert_eq!(restored.players(), game.players());
    }

    #[test]
    fn entity_with_duplicate_items_is_rejected() {
        let mut entity = GameEntity::from(&three_item_game());
        let first = entity.items[0].clone();
        entity.items.push(first);
        assert!(Game::try_from(entity).is_err());
    }
}
