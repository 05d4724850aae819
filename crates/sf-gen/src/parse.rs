//! Parsing of labeled-field card text.
//!
//! The proxy answers in a plain-text convention: one `Label: value` line per
//! mechanical field, with `Description`, `Effect` and `Combo` allowed to run
//! over several lines until the next recognized label. Lair batches repeat
//! the same layout per card, separated by `Name:` lines. Parsing is total:
//! unrecognized or missing labels degrade to defaults, never to an error.

use sf_core::ability::FIELD_PLACEHOLDER;

/// The fields of one parsed ability or lair action card.
///
/// Mechanical fields default to [`FIELD_PLACEHOLDER`] when the text never
/// mentions them; prose fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityCardFields {
    /// Card name, empty when absent.
    pub name: String,
    /// Power level, when the text carried a parseable number.
    pub power: Option<u32>,
    /// Action economy line.
    pub action: String,
    /// Range line.
    pub range: String,
    /// Target line.
    pub target: String,
    /// Save or DC line.
    pub save_or_dc: String,
    /// Damage line.
    pub damage: String,
    /// One-line table summary.
    pub description: String,
    /// Full effect prose.
    pub effect_text: String,
    /// Combo or synergy notes.
    pub combo_notes: String,
}

impl Default for AbilityCardFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            power: None,
            action: FIELD_PLACEHOLDER.to_string(),
            range: FIELD_PLACEHOLDER.to_string(),
            target: FIELD_PLACEHOLDER.to_string(),
            save_or_dc: FIELD_PLACEHOLDER.to_string(),
            damage: FIELD_PLACEHOLDER.to_string(),
            description: String::new(),
            effect_text: String::new(),
            combo_notes: String::new(),
        }
    }
}

/// A label recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Name,
    Power,
    Action,
    Range,
    Target,
    SaveOrDc,
    Save,
    Dc,
    Damage,
    Description,
    Effect,
    Combo,
}

impl Label {
    /// Sections keep accumulating lines until the next label; everything
    /// else is single-line.
    fn is_section(self) -> bool {
        matches!(self, Self::Description | Self::Effect | Self::Combo)
    }
}

/// Match `Label: rest` at the start of a line, case-insensitively.
fn split_label(line: &str) -> Option<(Label, &str)> {
    let (head, rest) = line.split_once(':')?;
    let label = match head.trim().to_ascii_lowercase().as_str() {
        "name" => Label::Name,
        "power" => Label::Power,
        "action" => Label::Action,
        "range" => Label::Range,
        "target" => Label::Target,
        "save/dc" | "save or dc" | "savedc" => Label::SaveOrDc,
        "save" => Label::Save,
        "dc" => Label::Dc,
        "damage" => Label::Damage,
        "description" => Label::Description,
        "effect" => Label::Effect,
        "combo" | "combo notes" => Label::Combo,
        _ => return None,
    };
    Some((label, rest.trim()))
}

fn join_fragment(field: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(fragment);
}

/// Parse one card's worth of labeled text.
///
/// Text with no recognized labels at all is treated as pure effect prose:
/// the whole input lands in `effect_text` and every mechanical field keeps
/// its default.
pub fn parse_ability_response(raw: &str) -> AbilityCardFields {
    let mut fields = AbilityCardFields::default();
    let mut save_part = String::new();
    let mut dc_part = String::new();
    let mut section: Option<Label> = None;
    let mut saw_label = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if let Some((label, value)) = split_label(trimmed) {
            saw_label = true;
            section = label.is_section().then_some(label);
            match label {
                Label::Name => fields.name = value.to_string(),
                Label::Power => fields.power = value.parse().ok(),
                Label::Action => fields.action = value.to_string(),
                Label::Range => fields.range = value.to_string(),
                Label::Target => fields.target = value.to_string(),
                Label::SaveOrDc => fields.save_or_dc = value.to_string(),
                Label::Save => save_part = value.to_string(),
                Label::Dc => dc_part = value.to_string(),
                Label::Damage => fields.damage = value.to_string(),
                Label::Description => fields.description = value.to_string(),
                Label::Effect => fields.effect_text = value.to_string(),
                Label::Combo => fields.combo_notes = value.to_string(),
            }
        } else if !trimmed.is_empty() {
            match section {
                Some(Label::Description) => join_fragment(&mut fields.description, trimmed),
                Some(Label::Effect) => join_fragment(&mut fields.effect_text, trimmed),
                Some(Label::Combo) => join_fragment(&mut fields.combo_notes, trimmed),
                _ => {}
            }
        }
    }

    // Separate Save and DC lines fold into the combined field, but an
    // explicit Save/DC line wins.
    if fields.save_or_dc == FIELD_PLACEHOLDER && !(save_part.is_empty() && dc_part.is_empty()) {
        fields.save_or_dc = [save_part, dc_part]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    if !saw_label {
        fields.effect_text = raw.trim().to_string();
    }

    fields
}

/// Parse a multi-card lair batch: one card per `Name:` line.
///
/// Text before the first `Name:` line, or with no `Name:` lines at all, is
/// parsed as a single card.
pub fn parse_lair_batch(raw: &str) -> Vec<AbilityCardFields> {
    let mut blocks: Vec<String> = Vec::new();
    for line in raw.lines() {
        let starts_card = matches!(split_label(line.trim()), Some((Label::Name, _)));
        if starts_card || blocks.is_empty() {
            blocks.push(String::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }
    blocks
        .iter()
        .filter(|block| !block.trim().is_empty())
        .map(|block| parse_ability_response(block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHERRY_BOMB: &str = "Name: Cherry Bomb\n\
        Action: Action\n\
        Range: 30 ft\n\
        Target: One creature\n\
        Save/DC: DEX 15\n\
        Damage: 4d6 fire\n\
        Effect: The target is set ablaze for 1 minute.\n\
        Combo: Detonates linked Domains for bonus damage.";

    #[test]
    fn parses_fully_labeled_card() {
        let fields = parse_ability_response(CHERRY_BOMB);
        assert_eq!(fields.name, "Cherry Bomb");
        assert_eq!(fields.action, "Action");
        assert_eq!(fields.range, "30 ft");
        assert_eq!(fields.target, "One creature");
        assert_eq!(fields.save_or_dc, "DEX 15");
        assert_eq!(fields.damage, "4d6 fire");
        assert_eq!(fields.effect_text, "The target is set ablaze for 1 minute.");
        assert_eq!(
            fields.combo_notes,
            "Detonates linked Domains for bonus damage."
        );
        assert_eq!(fields.power, None);
    }

    #[test]
    fn unlabeled_text_becomes_effect_prose() {
        let raw = "A swirling vortex of candied souls erupts around the caster.";
        let fields = parse_ability_response(raw);
        assert_eq!(fields.effect_text, raw);
        assert_eq!(fields.name, "");
        assert_eq!(fields.action, FIELD_PLACEHOLDER);
        assert_eq!(fields.range, FIELD_PLACEHOLDER);
        assert_eq!(fields.save_or_dc, FIELD_PLACEHOLDER);
        assert_eq!(fields.damage, FIELD_PLACEHOLDER);
    }

    #[test]
    fn labels_are_case_insensitive() {
        let fields = parse_ability_response("NAME: Soul Pocket\npower: 4\neffect: Hides an ally.");
        assert_eq!(fields.name, "Soul Pocket");
        assert_eq!(fields.power, Some(4));
        assert_eq!(fields.effect_text, "Hides an ally.");
    }

    #[test]
    fn sections_span_multiple_lines() {
        let raw = "Name: Lullaby\n\
            Effect: All creatures in range\n\
            must resist sleep.\n\
            Combo: Louder near Territory Homies.";
        let fields = parse_ability_response(raw);
        assert_eq!(fields.effect_text, "All creatures in range must resist sleep.");
        assert_eq!(fields.combo_notes, "Louder near Territory Homies.");
    }

    #[test]
    fn separate_save_and_dc_lines_join() {
        let fields = parse_ability_response("Name: Gaze\nSave: WIS\nDC: 14");
        assert_eq!(fields.save_or_dc, "WIS 14");
    }

    #[test]
    fn explicit_save_or_dc_line_wins() {
        let fields = parse_ability_response("Save/DC: CON 12\nSave: WIS\nDC: 14");
        assert_eq!(fields.save_or_dc, "CON 12");
    }

    #[test]
    fn unparseable_power_is_none() {
        let fields = parse_ability_response("Name: Flicker\nPower: very high");
        assert_eq!(fields.power, None);
    }

    #[test]
    fn lair_batch_splits_on_name_lines() {
        let raw = "Name: Candy Flood\n\
            Power: 6\n\
            Effect: Sticky syrup fills the lair.\n\
            \n\
            Name: Gingerbread Sentries\n\
            Power: 4\n\
            Effect: Two sentries animate and attack.";
        let cards = parse_lair_batch(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Candy Flood");
        assert_eq!(cards[0].power, Some(6));
        assert_eq!(cards[1].name, "Gingerbread Sentries");
        assert_eq!(cards[1].effect_text, "Two sentries animate and attack.");
    }

    #[test]
    fn lair_batch_without_name_lines_is_one_card() {
        let cards = parse_lair_batch("The walls themselves begin to chew.");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].effect_text, "The walls themselves begin to chew.");
    }

    #[test]
    fn lair_batch_of_blank_text_is_empty() {
        assert!(parse_lair_batch("\n  \n").is_empty());
    }
}
