//! `Characters` block: the roster of character cards.
//!
//! # Responsibility
//! - Write every profile group as a flat run of elements under one
//!   `<Character Name UUID>` node, with small wrapper groups for MBTI, color
//!   chips and the social checklists.
//! - Read profiles back with per-field defaults.
//!
//! # Invariants
//! - `Name` on `<Character>` is informational; identity is `UUID`.
//! - Slider arrays are written as held and normalized to their fixed length on
//!   decode.
//! - String lists keep blank entries and order.

use crate::codec::markup::{ElementView, IdLedger, MarkupWriter};
use crate::codec::{decode_named, BlockCodec};
use crate::model::character::{
    Abilities, Biography, Body, CharacterProfile, CharacterRoster, Emblem, Goodwill, HandleHate,
    Health, Hinder, Identity, Mbti, Misc, Palette, Personality, Relation, Romance, ShowLove,
    Social, Swatch, Values, APPROACH_LEN, LIFE_SKILL_LEN, PERSONALITY_LEN, SCALE_DEFAULT,
    SOCIAL_LEN,
};
use crate::model::NodeId;

pub struct CharactersCodec;

impl BlockCodec for CharactersCodec {
    type Model = CharacterRoster;
    const NAME: &'static str = "Characters";

    fn encode(model: &CharacterRoster) -> Option<String> {
        if model.is_empty() {
            return None;
        }

        let mut w = MarkupWriter::block(Self::NAME);
        for profile in model.iter() {
            w.open_node("Character", &profile.full_name(), profile.id);
            write_identity(&mut w, &profile.identity);
            write_biography(&mut w, &profile.biography);
            write_romance(&mut w, &profile.romance);
            write_emblem(&mut w, &profile.emblem);
            write_body(&mut w, &profile.body, &profile.health);
            write_personality(&mut w, &profile.personality);
            write_values(&mut w, &profile.values);
            write_abilities(&mut w, &profile.abilities);
            write_palette(&mut w, &profile.palette);
            write_social(&mut w, &profile.social);
            write_misc(&mut w, &profile.misc);
            w.close("Character");
        }
        Some(w.finish())
    }

    fn decode(block: &str) -> Option<CharacterRoster> {
        decode_named(block, Self::NAME, read)
    }
}

fn write_identity(w: &mut MarkupWriter, identity: &Identity) {
    w.text_element("Surname", &identity.surname);
    w.text_element("FirstName", &identity.first_name);
    w.text_element("Gender", &identity.gender);
    w.text_element("Age", &identity.age);
    w.text_element("BirthMonth", &identity.birth_month);
    w.text_element("BirthDay", &identity.birth_day);
    w.text_element("Role", &identity.role);
}

fn write_biography(w: &mut MarkupWriter, bio: &Biography) {
    w.text_element("Ethnicity", &bio.ethnicity);
    w.text_element("Nation", &bio.nation);
    w.text_element("Home", &bio.home);
    w.text_element("Occupation", &bio.occupation);
    w.text_element("Education", &bio.education);
    w.text_element("Economic", &bio.economic);
    w.text_element("Mantra", &bio.mantra);
    w.text_element("Motto", &bio.motto);
    w.list("Nicknames", "Item", &bio.nicknames);
    w.list("Tags", "Item", &bio.tags);
}

fn write_romance(w: &mut MarkupWriter, romance: &Romance) {
    w.token("Sexual", romance.orientation);
    w.text_element("SexualOther", &romance.orientation_other);
    w.token("LoveStatus", romance.love_status);
    w.text_element("LoveOther", &romance.love_other);
    w.flag("IsFindNewLove", romance.seeking_new_love);
    w.flag("IsHarem", romance.harem);
    w.open("Relations");
    for relation in &romance.relations {
        w.open("Relation");
        w.text_element("Name", &relation.name);
        w.text_element("Role", &relation.role);
        w.close("Relation");
    }
    w.close("Relations");
}

fn write_emblem(w: &mut MarkupWriter, emblem: &Emblem) {
    w.text_element("RepresentItem", &emblem.item);
    w.color("RepresentColor1Hex", emblem.primary);
    w.color("RepresentColor2Hex", emblem.secondary);
}

fn write_body(w: &mut MarkupWriter, body: &Body, health: &Health) {
    w.text_element("HeightText", &body.height);
    w.text_element("WeightText", &body.weight);
    w.raw_element("Figure", body.figure);
    w.raw_element("Looks", body.looks);
    w.raw_element("Temperature", body.temperature);
    w.raw_element("BodyPower", body.power);
    w.raw_element("SoundVolume", body.voice_volume);
    w.raw_element("VoicePitch", body.voice_pitch);
    w.token("PreferredHand", body.hand);
    w.text_element("PreferredHandOther", &body.hand_other);
    w.token("Eyesight", body.eyesight);
    w.text_element("EyesightOther", &body.eyesight_other);
    w.flag("HealthGood", health.good);
    w.flag("HealthWeak", health.weak);
    w.flag("HealthOld", health.old);
    w.flag("HealthSpecialDisease", health.special_disease);
    w.text_element("HealthSpecialDiseaseText", &health.special_disease_text);
    w.flag("HealthMentalIssue", health.mental_issue);
    w.text_element("HealthMentalIssueText", &health.mental_issue_text);
    w.flag("HealthOtherChecked", health.other);
    w.text_element("HealthOtherText", &health.other_text);
    w.text_element("BodyComplement", &body.complement);
}

fn write_personality(w: &mut MarkupWriter, personality: &Personality) {
    w.text_element("PersonalityDesc", &personality.description);
    w.text_element("ExperiencesDesc", &personality.experiences);
    let mbti = personality.mbti;
    w.open("MBTI");
    w.raw_element("EI", mbti.ei);
    w.raw_element("NS", mbti.ns);
    w.raw_element("TF", mbti.tf);
    w.raw_element("JP", mbti.jp);
    w.raw_element("AT", mbti.at);
    w.close("MBTI");
    w.int_list("Approach", &personality.approach);
    w.int_list("Traits", &personality.traits);
    w.text_element("PersonalityOther", &personality.other);
}

fn write_values(w: &mut MarkupWriter, values: &Values) {
    w.raw_element("Tendency", values.tendency);
    w.token("Alignment9", values.alignment);
    w.text_element("Belief", &values.belief);
    w.text_element("CharacterLimit", &values.limit);
    w.text_element("InFuture", &values.in_future);
    w.text_element("MostCherish", &values.most_cherish);
    w.text_element("MostDisgust", &values.most_disgust);
    w.text_element("MostFear", &values.most_fear);
    w.text_element("MostCurious", &values.most_curious);
    w.text_element("MostExpect", &values.most_expect);
    w.open("Hinders");
    for hinder in &values.hinders {
        w.open("Hinder");
        w.text_element("Event", &hinder.event);
        w.text_element("Solve", &hinder.solve);
        w.close("Hinder");
    }
    w.close("Hinders");
    w.text_element("ValuesOther", &values.other);
}

fn write_abilities(w: &mut MarkupWriter, abilities: &Abilities) {
    w.list("LoveToDo", "Item", &abilities.love_to_do);
    w.list("HateToDo", "Item", &abilities.hate_to_do);
    w.list("ProficientToDo", "Item", &abilities.proficient);
    w.list("UnProficientToDo", "Item", &abilities.unproficient);
    w.int_list("CommonAbilities", &abilities.life_skills);
}

fn write_palette(w: &mut MarkupWriter, palette: &Palette) {
    w.open("ColorChips");
    w.color("HairColor1Hex", palette.hair.0);
    w.color("HairColor2Hex", palette.hair.1);
    w.color("EyeColor1Hex", palette.eyes.0);
    w.color("EyeColor2Hex", palette.eyes.1);
    w.color("SkinColor1Hex", palette.skin.0);
    w.color("SkinColor2Hex", palette.skin.1);
    for (index, swatch) in [(1, &palette.custom_one), (2, &palette.custom_two)] {
        w.text_element(&format!("CustomColor{index}Name"), &swatch.name);
        w.color(&format!("CustomColor{index}AHex"), swatch.primary);
        w.color(&format!("CustomColor{index}BHex"), swatch.secondary);
    }
    w.close("ColorChips");
}

fn write_social(w: &mut MarkupWriter, social: &Social) {
    w.text_element("Impression", &social.impression);
    w.text_element("MostLikable", &social.most_likable);
    w.text_element("NativeFamily", &social.native_family);

    let love = &social.show_love;
    w.open("ShowLove");
    w.flag("Language", love.words);
    w.flag("Accompany", love.company);
    w.flag("Gift", love.gifts);
    w.flag("Service", love.service);
    w.flag("Touch", love.touch);
    w.flag("Tease", love.teasing);
    w.flag("Self", love.self_display);
    w.flag("Avoid", love.avoidance);
    w.flag("Other", love.other);
    w.text_element("OtherText", &love.other_text);
    w.close("ShowLove");

    let goodwill = &social.goodwill;
    w.open("Goodwill");
    w.flag("Language", goodwill.words);
    w.flag("Accompany", goodwill.company);
    w.flag("Gift", goodwill.gifts);
    w.flag("Service", goodwill.service);
    w.flag("Touch", goodwill.touch);
    w.flag("Other", goodwill.other);
    w.text_element("OtherText", &goodwill.other_text);
    w.close("Goodwill");

    let hate = &social.handle_hate;
    w.open("HandleHate");
    w.flag("BadWords", hate.bad_words);
    w.flag("Violence", hate.violence);
    w.flag("Trick", hate.trickery);
    w.flag("Sneaky", hate.sneaky);
    w.flag("Avoid", hate.avoidance);
    w.flag("Indifferent", hate.indifference);
    w.flag("RepayKindness", hate.repay_kindness);
    w.flag("NoDifference", hate.no_difference);
    w.flag("Other", hate.other);
    w.text_element("OtherText", &hate.other_text);
    w.close("HandleHate");

    w.int_list("SocialScales", &social.scales);
}

fn write_misc(w: &mut MarkupWriter, misc: &Misc) {
    w.text_element("OriginalName", &misc.original_name);
    w.list("LikeItems", "Item", &misc.like_items);
    w.list("HateItems", "Item", &misc.hate_items);
    w.list("FamiliarItems", "Item", &misc.familiar_items);
    w.text_element("OtherText", &misc.other_text);
}

pub(crate) fn read(root: ElementView<'_, '_>) -> CharacterRoster {
    let mut ids = IdLedger::default();
    let characters = root
        .children("Character")
        .iter()
        .map(|element| read_profile(element, ids.claim(element)))
        .collect();
    CharacterRoster { characters }
}

fn read_profile(c: &ElementView<'_, '_>, id: NodeId) -> CharacterProfile {
    let defaults = CharacterProfile::with_id(id);
    CharacterProfile {
        id,
        identity: Identity {
            surname: c.text("Surname"),
            first_name: c.text("FirstName"),
            gender: c.text("Gender"),
            age: c.text("Age"),
            birth_month: c.text("BirthMonth"),
            birth_day: c.text("BirthDay"),
            role: c.text("Role"),
        },
        biography: Biography {
            ethnicity: c.text("Ethnicity"),
            nation: c.text("Nation"),
            home: c.text("Home"),
            occupation: c.text("Occupation"),
            education: c.text("Education"),
            economic: c.text("Economic"),
            mantra: c.text("Mantra"),
            motto: c.text("Motto"),
            nicknames: c.list("Nicknames", "Item"),
            tags: c.list("Tags", "Item"),
        },
        romance: Romance {
            orientation: c.token("Sexual"),
            orientation_other: c.text("SexualOther"),
            love_status: c.token("LoveStatus"),
            love_other: c.text("LoveOther"),
            seeking_new_love: c.flag("IsFindNewLove"),
            harem: c.flag("IsHarem"),
            relations: c
                .child("Relations")
                .children("Relation")
                .iter()
                .map(|r| Relation {
                    name: r.text("Name"),
                    role: r.text("Role"),
                })
                .collect(),
        },
        emblem: Emblem {
            item: c.text("RepresentItem"),
            primary: c.color_or("RepresentColor1Hex", defaults.emblem.primary),
            secondary: c.color_or("RepresentColor2Hex", defaults.emblem.secondary),
        },
        body: Body {
            height: c.text("HeightText"),
            weight: c.text("WeightText"),
            figure: c.scale_or("Figure", SCALE_DEFAULT),
            looks: c.scale_or("Looks", SCALE_DEFAULT),
            temperature: c.scale_or("Temperature", SCALE_DEFAULT),
            power: c.scale_or("BodyPower", SCALE_DEFAULT),
            voice_volume: c.scale_or("SoundVolume", SCALE_DEFAULT),
            voice_pitch: c.scale_or("VoicePitch", SCALE_DEFAULT),
            hand: c.token("PreferredHand"),
            hand_other: c.text("PreferredHandOther"),
            eyesight: c.token("Eyesight"),
            eyesight_other: c.text("EyesightOther"),
            complement: c.text("BodyComplement"),
        },
        health: Health {
            good: c.flag("HealthGood"),
            weak: c.flag("HealthWeak"),
            old: c.flag("HealthOld"),
            special_disease: c.flag("HealthSpecialDisease"),
            special_disease_text: c.text("HealthSpecialDiseaseText"),
            mental_issue: c.flag("HealthMentalIssue"),
            mental_issue_text: c.text("HealthMentalIssueText"),
            other: c.flag("HealthOtherChecked"),
            other_text: c.text("HealthOtherText"),
        },
        personality: read_personality(c),
        values: read_values(c),
        abilities: Abilities {
            love_to_do: c.list("LoveToDo", "Item"),
            hate_to_do: c.list("HateToDo", "Item"),
            proficient: c.list("ProficientToDo", "Item"),
            unproficient: c.list("UnProficientToDo", "Item"),
            life_skills: c.scales("CommonAbilities", LIFE_SKILL_LEN),
        },
        palette: read_palette(&c.child("ColorChips"), &defaults.palette),
        social: read_social(c),
        misc: Misc {
            original_name: c.text("OriginalName"),
            like_items: c.list("LikeItems", "Item"),
            hate_items: c.list("HateItems", "Item"),
            familiar_items: c.list("FamiliarItems", "Item"),
            other_text: c.text("OtherText"),
        },
    }
}

fn read_personality(c: &ElementView<'_, '_>) -> Personality {
    let mbti = c.child("MBTI");
    Personality {
        description: c.text("PersonalityDesc"),
        experiences: c.text("ExperiencesDesc"),
        mbti: Mbti {
            ei: mbti.scale_or("EI", SCALE_DEFAULT),
            ns: mbti.scale_or("NS", SCALE_DEFAULT),
            tf: mbti.scale_or("TF", SCALE_DEFAULT),
            jp: mbti.scale_or("JP", SCALE_DEFAULT),
            at: mbti.scale_or("AT", SCALE_DEFAULT),
        },
        approach: c.scales("Approach", APPROACH_LEN),
        traits: c.scales("Traits", PERSONALITY_LEN),
        other: c.text("PersonalityOther"),
    }
}

fn read_values(c: &ElementView<'_, '_>) -> Values {
    Values {
        tendency: c.scale_or("Tendency", SCALE_DEFAULT),
        alignment: c.token("Alignment9"),
        belief: c.text("Belief"),
        limit: c.text("CharacterLimit"),
        in_future: c.text("InFuture"),
        most_cherish: c.text("MostCherish"),
        most_disgust: c.text("MostDisgust"),
        most_fear: c.text("MostFear"),
        most_curious: c.text("MostCurious"),
        most_expect: c.text("MostExpect"),
        hinders: c
            .child("Hinders")
            .children("Hinder")
            .iter()
            .map(|h| Hinder {
                event: h.text("Event"),
                solve: h.text("Solve"),
            })
            .collect(),
        other: c.text("ValuesOther"),
    }
}

fn read_palette(chips: &ElementView<'_, '_>, defaults: &Palette) -> Palette {
    let swatch = |index: u8, fallback: &Swatch| {
        let name_tag = format!("CustomColor{index}Name");
        let name = if chips.child(&name_tag).is_present() {
            chips.text(&name_tag)
        } else {
            fallback.name.clone()
        };
        Swatch {
            name,
            primary: chips.color_or(&format!("CustomColor{index}AHex"), fallback.primary),
            secondary: chips.color_or(&format!("CustomColor{index}BHex"), fallback.secondary),
        }
    };
    Palette {
        hair: (
            chips.color_or("HairColor1Hex", defaults.hair.0),
            chips.color_or("HairColor2Hex", defaults.hair.1),
        ),
        eyes: (
            chips.color_or("EyeColor1Hex", defaults.eyes.0),
            chips.color_or("EyeColor2Hex", defaults.eyes.1),
        ),
        skin: (
            chips.color_or("SkinColor1Hex", defaults.skin.0),
            chips.color_or("SkinColor2Hex", defaults.skin.1),
        ),
        custom_one: swatch(1, &defaults.custom_one),
        custom_two: swatch(2, &defaults.custom_two),
    }
}

fn read_social(c: &ElementView<'_, '_>) -> Social {
    let love = c.child("ShowLove");
    let goodwill = c.child("Goodwill");
    let hate = c.child("HandleHate");
    Social {
        impression: c.text("Impression"),
        most_likable: c.text("MostLikable"),
        native_family: c.text("NativeFamily"),
        show_love: ShowLove {
            words: love.flag("Language"),
            company: love.flag("Accompany"),
            gifts: love.flag("Gift"),
            service: love.flag("Service"),
            touch: love.flag("Touch"),
            teasing: love.flag("Tease"),
            self_display: love.flag("Self"),
            avoidance: love.flag("Avoid"),
            other: love.flag("Other"),
            other_text: love.text("OtherText"),
        },
        goodwill: Goodwill {
            words: goodwill.flag("Language"),
            company: goodwill.flag("Accompany"),
            gifts: goodwill.flag("Gift"),
            service: goodwill.flag("Service"),
            touch: goodwill.flag("Touch"),
            other: goodwill.flag("Other"),
            other_text: goodwill.text("OtherText"),
        },
        handle_hate: HandleHate {
            bad_words: hate.flag("BadWords"),
            violence: hate.flag("Violence"),
            trickery: hate.flag("Trick"),
            sneaky: hate.flag("Sneaky"),
            avoidance: hate.flag("Avoid"),
            indifference: hate.flag("Indifferent"),
            repay_kindness: hate.flag("RepayKindness"),
            no_difference: hate.flag("NoDifference"),
            other: hate.flag("Other"),
            other_text: hate.text("OtherText"),
        },
        scales: c.scales("SocialScales", SOCIAL_LEN),
    }
}
