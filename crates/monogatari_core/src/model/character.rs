//! Character roster model.
//!
//! # Responsibility
//! - Describe one character profile as grouped plain-value records.
//! - Own the closed enumerations, their wire tokens and the color type.
//!
//! # Invariants
//! - Slider values live in `0..=100`; codecs clamp on decode and write
//!   model values verbatim on encode.
//! - Fixed-length scale arrays hold exactly [`APPROACH_LEN`],
//!   [`PERSONALITY_LEN`], [`LIFE_SKILL_LEN`] and [`SOCIAL_LEN`] entries after
//!   decode.
//! - Every enumeration has a default that unknown wire tokens fall back to.
//!
//! # See also
//! - docs: `crate::codec::characters`

use crate::model::{new_node_id, NodeId};

pub const APPROACH_LEN: usize = 12;
pub const PERSONALITY_LEN: usize = 15;
pub const LIFE_SKILL_LEN: usize = 16;
pub const SOCIAL_LEN: usize = 10;

/// Neutral slider position.
pub const SCALE_DEFAULT: i32 = 50;
pub const SCALE_MAX: i32 = 100;

/// Clamps one slider value into `0..=100`.
pub fn clamp_scale(value: i32) -> i32 {
    value.clamp(0, SCALE_MAX)
}

fn neutral_scales(len: usize) -> Vec<i32> {
    vec![SCALE_DEFAULT; len]
}

/// Stable lowercase token used for an enumeration on the wire.
pub trait WireToken: Sized + Copy + Default + 'static {
    const ALL: &'static [Self];

    fn token(self) -> &'static str;

    fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL.iter().copied().find(|value| value.token() == token)
    }

    /// Parses `token`, falling back to the default for unknown text.
    fn from_token_or_default(token: &str) -> Self {
        Self::from_token(token).unwrap_or_default()
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl WireToken for $name {
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn token(self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }
        }
    };
}

wire_enum! {
    /// Romantic orientation.
    pub enum Orientation {
        Same => "same",
        #[default]
        Opposite => "opposite",
        Other => "other",
    }
}

wire_enum! {
    pub enum LoveStatus {
        #[default]
        Single => "single",
        Married => "married",
        Dating => "dating",
        Widowed => "widowed",
        Other => "other",
    }
}

wire_enum! {
    pub enum Handedness {
        Left => "left",
        #[default]
        Right => "right",
        Other => "other",
    }
}

wire_enum! {
    pub enum Eyesight {
        Great => "great",
        #[default]
        Normal => "normal",
        Amblyopia => "amblyopia",
        Impaired => "impaired",
        /// Blind in one eye, the other healthy.
        OneBlindOtherNormal => "one_blind_other_normal",
        /// Blind in one eye, the other impaired.
        OneBlindOtherImpaired => "one_blind_other_impaired",
        TotalBlind => "total_blind",
        Other => "other",
    }
}

wire_enum! {
    /// Nine-cell moral alignment grid.
    pub enum Alignment {
        LawfulGood => "lawful_good",
        #[default]
        NeutralGood => "neutral_good",
        ChaoticGood => "chaotic_good",
        LawfulNeutral => "lawful_neutral",
        TrueNeutral => "true_neutral",
        ChaoticNeutral => "chaotic_neutral",
        LawfulEvil => "lawful_evil",
        NeutralEvil => "neutral_evil",
        ChaoticEvil => "chaotic_evil",
    }
}

/// 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const ACCENT: Rgba = Rgba::opaque(0x00, 0x7A, 0xFF);
    pub const SECONDARY: Rgba = Rgba::opaque(0x8E, 0x8E, 0x93);
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const GRAY: Rgba = Rgba::opaque(0x8E, 0x8E, 0x93);
    pub const BROWN: Rgba = Rgba::opaque(0xA2, 0x84, 0x5E);
    pub const BLUE: Rgba = Rgba::opaque(0x00, 0x7A, 0xFF);
    pub const SKIN_LIGHT: Rgba = Rgba::opaque(0xFF, 0xE0, 0xBF);
    pub const SKIN_TAN: Rgba = Rgba::opaque(0xF2, 0xCC, 0xA6);
    pub const PURPLE: Rgba = Rgba::opaque(0xAF, 0x52, 0xDE);
    pub const PINK: Rgba = Rgba::opaque(0xFF, 0x2D, 0x55);
    pub const MINT: Rgba = Rgba::opaque(0x00, 0xC7, 0xBE);
    pub const TEAL: Rgba = Rgba::opaque(0x30, 0xB0, 0xC7);

    /// `#RRGGBBAA`, uppercase, always eight digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    ///
    /// Six-digit input is opaque.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::opaque(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            8 => Some(Self {
                r: (value >> 24) as u8,
                g: (value >> 16) as u8,
                b: (value >> 8) as u8,
                a: value as u8,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    /// How this character relates to `name`.
    pub role: String,
}

/// An obstacle the character faces and how it gets resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hinder {
    pub event: String,
    pub solve: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub surname: String,
    pub first_name: String,
    pub gender: String,
    pub age: String,
    pub birth_month: String,
    pub birth_day: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Biography {
    pub ethnicity: String,
    pub nation: String,
    pub home: String,
    pub occupation: String,
    pub education: String,
    pub economic: String,
    pub mantra: String,
    pub motto: String,
    pub nicknames: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Romance {
    pub orientation: Orientation,
    pub orientation_other: String,
    pub love_status: LoveStatus,
    pub love_other: String,
    pub seeking_new_love: bool,
    pub harem: bool,
    pub relations: Vec<Relation>,
}

/// Signature item and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emblem {
    pub item: String,
    pub primary: Rgba,
    pub secondary: Rgba,
}

impl Default for Emblem {
    fn default() -> Self {
        Self {
            item: String::new(),
            primary: Rgba::ACCENT,
            secondary: Rgba::SECONDARY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// Free text, e.g. "143.5cm".
    pub height: String,
    pub weight: String,
    pub figure: i32,
    pub looks: i32,
    pub temperature: i32,
    pub power: i32,
    pub voice_volume: i32,
    pub voice_pitch: i32,
    pub hand: Handedness,
    pub hand_other: String,
    pub eyesight: Eyesight,
    pub eyesight_other: String,
    pub complement: String,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            height: String::new(),
            weight: String::new(),
            figure: SCALE_DEFAULT,
            looks: SCALE_DEFAULT,
            temperature: SCALE_DEFAULT,
            power: SCALE_DEFAULT,
            voice_volume: SCALE_DEFAULT,
            voice_pitch: SCALE_DEFAULT,
            hand: Handedness::default(),
            hand_other: String::new(),
            eyesight: Eyesight::default(),
            eyesight_other: String::new(),
            complement: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Health {
    pub good: bool,
    pub weak: bool,
    pub old: bool,
    pub special_disease: bool,
    pub special_disease_text: String,
    pub mental_issue: bool,
    pub mental_issue_text: String,
    pub other: bool,
    pub other_text: String,
}

/// Four-letter type sliders plus the assertive/turbulent axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mbti {
    pub ei: i32,
    pub ns: i32,
    pub tf: i32,
    pub jp: i32,
    pub at: i32,
}

impl Default for Mbti {
    fn default() -> Self {
        Self {
            ei: SCALE_DEFAULT,
            ns: SCALE_DEFAULT,
            tf: SCALE_DEFAULT,
            jp: SCALE_DEFAULT,
            at: SCALE_DEFAULT,
        }
    }
}

impl Mbti {
    /// Type code such as `ESTJ-A`. A slider above 50 picks the second
    /// letter of its axis.
    pub fn code(&self) -> String {
        let pick =
            |value: i32, low: char, high: char| if value > SCALE_DEFAULT { high } else { low };
        format!(
            "{}{}{}{}-{}",
            pick(self.ei, 'E', 'I'),
            pick(self.ns, 'S', 'N'),
            pick(self.tf, 'T', 'F'),
            pick(self.jp, 'J', 'P'),
            pick(self.at, 'A', 'T'),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Personality {
    pub description: String,
    pub experiences: String,
    pub mbti: Mbti,
    pub approach: Vec<i32>,
    pub traits: Vec<i32>,
    pub other: String,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            description: String::new(),
            experiences: String::new(),
            mbti: Mbti::default(),
            approach: neutral_scales(APPROACH_LEN),
            traits: neutral_scales(PERSONALITY_LEN),
            other: String::new(),
        }
    }
}

/// Morals and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    /// Selfish (0) to altruistic (100).
    pub tendency: i32,
    pub alignment: Alignment,
    pub belief: String,
    pub limit: String,
    pub in_future: String,
    pub most_cherish: String,
    pub most_disgust: String,
    pub most_fear: String,
    pub most_curious: String,
    pub most_expect: String,
    pub hinders: Vec<Hinder>,
    pub other: String,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            tendency: SCALE_DEFAULT,
            alignment: Alignment::default(),
            belief: String::new(),
            limit: String::new(),
            in_future: String::new(),
            most_cherish: String::new(),
            most_disgust: String::new(),
            most_fear: String::new(),
            most_curious: String::new(),
            most_expect: String::new(),
            hinders: Vec::new(),
            other: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abilities {
    pub love_to_do: Vec<String>,
    pub hate_to_do: Vec<String>,
    pub proficient: Vec<String>,
    pub unproficient: Vec<String>,
    /// Everyday life skills.
    pub life_skills: Vec<i32>,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            love_to_do: Vec::new(),
            hate_to_do: Vec::new(),
            proficient: Vec::new(),
            unproficient: Vec::new(),
            life_skills: neutral_scales(LIFE_SKILL_LEN),
        }
    }
}

/// User-named pair of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub name: String,
    pub primary: Rgba,
    pub secondary: Rgba,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub hair: (Rgba, Rgba),
    pub eyes: (Rgba, Rgba),
    pub skin: (Rgba, Rgba),
    pub custom_one: Swatch,
    pub custom_two: Swatch,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hair: (Rgba::BLACK, Rgba::GRAY),
            eyes: (Rgba::BROWN, Rgba::BLUE),
            skin: (Rgba::SKIN_LIGHT, Rgba::SKIN_TAN),
            custom_one: Swatch {
                name: "Custom 1".to_string(),
                primary: Rgba::PURPLE,
                secondary: Rgba::PINK,
            },
            custom_two: Swatch {
                name: "Custom 2".to_string(),
                primary: Rgba::MINT,
                secondary: Rgba::TEAL,
            },
        }
    }
}

/// Ways of showing romantic interest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowLove {
    pub words: bool,
    pub company: bool,
    pub gifts: bool,
    pub service: bool,
    pub touch: bool,
    pub teasing: bool,
    pub self_display: bool,
    pub avoidance: bool,
    pub other: bool,
    pub other_text: String,
}

/// Ways of showing goodwill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goodwill {
    pub words: bool,
    pub company: bool,
    pub gifts: bool,
    pub service: bool,
    pub touch: bool,
    pub other: bool,
    pub other_text: String,
}

/// Reactions towards disliked people.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleHate {
    pub bad_words: bool,
    pub violence: bool,
    pub trickery: bool,
    pub sneaky: bool,
    pub avoidance: bool,
    pub indifference: bool,
    pub repay_kindness: bool,
    pub no_difference: bool,
    pub other: bool,
    pub other_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Social {
    pub impression: String,
    pub most_likable: String,
    pub native_family: String,
    pub show_love: ShowLove,
    pub goodwill: Goodwill,
    pub handle_hate: HandleHate,
    pub scales: Vec<i32>,
}

impl Default for Social {
    fn default() -> Self {
        Self {
            impression: String::new(),
            most_likable: String::new(),
            native_family: String::new(),
            show_love: ShowLove::default(),
            goodwill: Goodwill::default(),
            handle_hate: HandleHate::default(),
            scales: neutral_scales(SOCIAL_LEN),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Misc {
    pub original_name: String,
    pub like_items: Vec<String>,
    pub hate_items: Vec<String>,
    pub familiar_items: Vec<String>,
    pub other_text: String,
}

/// One character card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterProfile {
    pub id: NodeId,
    pub identity: Identity,
    pub biography: Biography,
    pub romance: Romance,
    pub emblem: Emblem,
    pub body: Body,
    pub health: Health,
    pub personality: Personality,
    pub values: Values,
    pub abilities: Abilities,
    pub palette: Palette,
    pub social: Social,
    pub misc: Misc,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self::with_id(new_node_id())
    }
}

/// Shown when a character has neither surname nor first name.
pub const UNNAMED_CHARACTER: &str = "Unnamed character";

impl CharacterProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: NodeId) -> Self {
        Self {
            id,
            identity: Identity::default(),
            biography: Biography::default(),
            romance: Romance::default(),
            emblem: Emblem::default(),
            body: Body::default(),
            health: Health::default(),
            personality: Personality::default(),
            values: Values::default(),
            abilities: Abilities::default(),
            palette: Palette::default(),
            social: Social::default(),
            misc: Misc::default(),
        }
    }

    /// Surname followed by first name, without separator.
    ///
    /// Empty when both are blank.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.identity.surname, self.identity.first_name)
            .trim()
            .to_string()
    }

    /// Name for pickers and lists.
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            UNNAMED_CHARACTER.to_string()
        } else {
            full
        }
    }

    pub fn mbti_code(&self) -> String {
        self.personality.mbti.code()
    }
}

/// Ordered list of character cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterRoster {
    pub characters: Vec<CharacterProfile>,
}

impl CharacterRoster {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterProfile> {
        self.characters.iter()
    }

    /// Appends a profile and returns its id.
    pub fn add_character(&mut self, profile: CharacterProfile) -> NodeId {
        let id = profile.id;
        self.characters.push(profile);
        id
    }

    /// Removes and returns the profile with `id`.
    pub fn remove_character(&mut self, id: NodeId) -> Option<CharacterProfile> {
        let position = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(position))
    }

    pub fn get(&self, id: NodeId) -> Option<&CharacterProfile> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CharacterProfile> {
        self.characters.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Alignment, Eyesight, Mbti, Rgba, WireToken};

    #[test]
    fn mbti_code_picks_second_letter_above_midpoint() {
        assert_eq!(Mbti::default().code(), "ESTJ-A");
        let mbti = Mbti {
            ei: 51,
            ns: 80,
            tf: 50,
            jp: 99,
            at: 100,
        };
        assert_eq!(mbti.code(), "INTP-T");
    }

    #[test]
    fn hex_accepts_short_and_long_forms() {
        assert_eq!(Rgba::parse_hex("#ff0000"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(
            Rgba::parse_hex("11223344"),
            Some(Rgba {
                r: 0x11,
                g: 0x22,
                b: 0x33,
                a: 0x44
            })
        );
        assert_eq!(Rgba::parse_hex("#12345"), None);
        assert_eq!(Rgba::parse_hex("#+12345"), None);
        assert_eq!(Rgba::TEAL.to_hex(), "#30B0C7FF");
    }

    #[test]
    fn unknown_tokens_fall_back_to_default() {
        assert_eq!(Eyesight::from_token_or_default("x-ray"), Eyesight::Normal);
        assert_eq!(
            Alignment::from_token(" chaotic_evil "),
            Some(Alignment::ChaoticEvil)
        );
        assert!(Alignment::ALL.iter().all(|a| Alignment::from_token(a.token()) == Some(*a)));
    }
}
