//! Generation workflows: turn a request into stored entities.
//!
//! Each function here is the unit of failure isolation. Generation and
//! parsing both happen before the store is touched, so a failed call never
//! leaves a half-written ability or a half-replaced lair list behind.

use sf_core::{
    Ability, AbilityDraft, AbilityId, Assignment, DomainId, LairAction, Provenance, SfError,
    SoulStore,
};

use crate::client::TextGenerator;
use crate::error::GenResult;
use crate::parse::{parse_ability_response, parse_lair_batch, AbilityCardFields};
use crate::request::{ContextSummary, GenerationMode, GenerationRequest, MAX_LAIR_ACTIONS};

/// Fallback name for a lair action whose text never named itself.
const UNNAMED_LAIR_ACTION: &str = "Lair Action";

/// What to ask for when drafting one ability card.
#[derive(Debug, Clone)]
pub struct AbilityRequest {
    /// The ability concept, in the user's words.
    pub concept: String,
    /// Desired power level (1-10).
    pub power: u32,
    /// Intended role (offense, defense, control, ...).
    pub role: String,
    /// Where the finished card should be assigned.
    pub assignment: Assignment,
    /// Optional SPU activation cost to record on the card.
    pub soul_cost: Option<u64>,
}

/// What to ask for when drafting a lair action batch.
#[derive(Debug, Clone)]
pub struct LairRequest {
    /// The domain the batch belongs to.
    pub domain_id: DomainId,
    /// Desired power level (1-10).
    pub power: u32,
    /// How many actions to draft.
    pub count: u32,
    /// Extra notes or requested themes.
    pub extra: String,
}

fn ability_card_request(store: &SoulStore, request: &AbilityRequest) -> GenerationRequest {
    GenerationRequest {
        mode: GenerationMode::AbilityCard {
            concept: request.concept.clone(),
            power: request.power,
            role: request.role.clone(),
        },
        context: ContextSummary::from_store(store),
    }
}

/// Draft one ability card and store it.
///
/// The stored ability carries [`Provenance::Ai`]. On any failure the store
/// is left untouched.
pub fn generate_ability(
    generator: &dyn TextGenerator,
    store: &mut SoulStore,
    request: &AbilityRequest,
) -> GenResult<AbilityId> {
    let wire = ability_card_request(store, request);
    let raw = generator.generate(&wire)?;
    let fields = parse_ability_response(&raw);
    tracing::debug!(name = %fields.name, "generated ability card");

    let id = store.create_ability(AbilityDraft {
        name: fields.name,
        power: fields.power.unwrap_or(request.power),
        assignment: request.assignment,
        action: fields.action,
        range: fields.range,
        target: fields.target,
        save_or_dc: fields.save_or_dc,
        damage: fields.damage,
        effect_text: fields.effect_text,
        combo_notes: fields.combo_notes,
        soul_cost: request.soul_cost,
        provenance: Provenance::Ai,
    });
    Ok(id)
}

/// Redraft an existing ability in place.
///
/// Assignment, soul cost, and id survive the reroll; the card text is
/// replaced wholesale. If the new text never names the card, the old name
/// is kept. Fails without touching the store when the ability does not
/// exist or the generator fails.
pub fn reroll_ability(
    generator: &dyn TextGenerator,
    store: &mut SoulStore,
    id: AbilityId,
    request: &AbilityRequest,
) -> GenResult<()> {
    // Existence check up front so a transport round trip is never wasted on
    // a deleted card.
    if store.get_ability(id).is_none() {
        return Err(SfError::AbilityNotFound(id).into());
    }

    let wire = ability_card_request(store, request);
    let raw = generator.generate(&wire)?;
    let fields = parse_ability_response(&raw);

    let ability = store.get_ability_mut(id)?;
    apply_card_fields(ability, fields, request.power);
    Ok(())
}

fn apply_card_fields(ability: &mut Ability, fields: AbilityCardFields, fallback_power: u32) {
    if !fields.name.trim().is_empty() {
        ability.name = fields.name;
    }
    ability.power = fields.power.unwrap_or(fallback_power);
    ability.action = fields.action;
    ability.range = fields.range;
    ability.target = fields.target;
    ability.save_or_dc = fields.save_or_dc;
    ability.damage = fields.damage;
    ability.effect_text = fields.effect_text;
    ability.combo_notes = fields.combo_notes;
    ability.provenance = Provenance::Ai;
}

/// Draft a lair action batch for a domain and replace its current list.
///
/// Returns the number of actions stored. The previous list survives any
/// failure; it is only replaced once the whole batch has parsed.
pub fn generate_lair_actions(
    generator: &dyn TextGenerator,
    store: &mut SoulStore,
    request: &LairRequest,
) -> GenResult<usize> {
    let domain = store
        .get_domain(request.domain_id)
        .ok_or(SfError::DomainNotFound(request.domain_id))?;
    let wire = GenerationRequest {
        mode: GenerationMode::DomainLairs {
            domain: domain.into(),
            power: request.power,
            count: request.count.clamp(1, MAX_LAIR_ACTIONS),
            extra: request.extra.clone(),
        },
        context: ContextSummary::from_store(store),
    };

    let raw = generator.generate(&wire)?;
    let actions: Vec<LairAction> = parse_lair_batch(&raw)
        .into_iter()
        .map(|fields| lair_action_from_fields(fields, request.power))
        .collect();
    let stored = actions.len();
    tracing::debug!(domain = %request.domain_id, count = stored, "generated lair actions");

    store.set_lair_actions(request.domain_id, actions)?;
    Ok(stored)
}

fn lair_action_from_fields(fields: AbilityCardFields, fallback_power: u32) -> LairAction {
    let name = if fields.name.trim().is_empty() {
        UNNAMED_LAIR_ACTION.to_string()
    } else {
        fields.name
    };
    let mut action = LairAction::new(name);
    action.power = fields.power.unwrap_or(fallback_power);
    action.action = fields.action;
    action.range = fields.range;
    action.target = fields.target;
    action.save_or_dc = fields.save_or_dc;
    action.damage = fields.damage;
    action.effect_text = fields.effect_text;
    action.notes = fields.description;
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use sf_core::{DomainDraft, SoulStore, StatPolicy};

    struct FixedGenerator(String);

    impl TextGenerator for FixedGenerator {
        fn generate(&self, _request: &GenerationRequest) -> GenResult<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _request: &GenerationRequest) -> GenResult<String> {
            Err(GenError::Api {
                status: 200,
                message: "model refused".to_string(),
            })
        }
    }

    fn test_store() -> SoulStore {
        SoulStore::new(StatPolicy::standard())
    }

    fn ability_request() -> AbilityRequest {
        AbilityRequest {
            concept: "exploding candy".to_string(),
            power: 5,
            role: "offense".to_string(),
            assignment: Assignment::General,
            soul_cost: Some(3),
        }
    }

    #[test]
    fn generate_ability_stores_parsed_card() {
        let generator = FixedGenerator(
            "Name: Cherry Bomb\nPower: 7\nDamage: 4d6 fire\nEffect: Boom.".to_string(),
        );
        let mut store = test_store();

        let id = generate_ability(&generator, &mut store, &ability_request()).unwrap();

        let ability = store.get_ability(id).unwrap();
        assert_eq!(ability.name, "Cherry Bomb");
        assert_eq!(ability.power, 7);
        assert_eq!(ability.damage, "4d6 fire");
        assert_eq!(ability.effect_text, "Boom.");
        assert_eq!(ability.soul_cost, Some(3));
        assert_eq!(ability.provenance, Provenance::Ai);
    }

    #[test]
    fn generate_ability_falls_back_to_requested_power() {
        let generator = FixedGenerator("Name: Mystery\nEffect: Unknowable.".to_string());
        let mut store = test_store();

        let id = generate_ability(&generator, &mut store, &ability_request()).unwrap();
        assert_eq!(store.get_ability(id).unwrap().power, 5);
    }

    #[test]
    fn failed_generation_leaves_abilities_unchanged() {
        let mut store = test_store();
        let result = generate_ability(&FailingGenerator, &mut store, &ability_request());
        assert!(matches!(result, Err(GenError::Api { .. })));
        assert!(store.abilities().is_empty());
    }

    #[test]
    fn reroll_replaces_text_in_place() {
        let mut store = test_store();
        let generator = FixedGenerator("Name: Old Card\nEffect: First draft.".to_string());
        let id = generate_ability(&generator, &mut store, &ability_request()).unwrap();

        let redraft = FixedGenerator("Name: New Card\nPower: 9\nEffect: Second draft.".to_string());
        reroll_ability(&redraft, &mut store, id, &ability_request()).unwrap();

        let ability = store.get_ability(id).unwrap();
        assert_eq!(ability.id, id);
        assert_eq!(ability.name, "New Card");
        assert_eq!(ability.power, 9);
        assert_eq!(ability.effect_text, "Second draft.");
        assert_eq!(store.abilities().len(), 1);
    }

    #[test]
    fn reroll_keeps_old_name_when_text_is_nameless() {
        let mut store = test_store();
        let generator = FixedGenerator("Name: Keeper\nEffect: Original.".to_string());
        let id = generate_ability(&generator, &mut store, &ability_request()).unwrap();

        let redraft = FixedGenerator("Pure prose with no labels at all.".to_string());
        reroll_ability(&redraft, &mut store, id, &ability_request()).unwrap();

        let ability = store.get_ability(id).unwrap();
        assert_eq!(ability.name, "Keeper");
        assert_eq!(ability.effect_text, "Pure prose with no labels at all.");
    }

    #[test]
    fn reroll_of_missing_ability_fails_before_generating() {
        let mut store = test_store();
        let result = reroll_ability(
            &FixedGenerator("Name: Ghost".to_string()),
            &mut store,
            AbilityId::new(),
            &ability_request(),
        );
        assert!(matches!(result, Err(GenError::Store(_))));
        assert!(store.abilities().is_empty());
    }

    #[test]
    fn lair_batch_replaces_previous_actions() {
        let mut store = test_store();
        let domain_id = store
            .create_domain(DomainDraft {
                name: "Whole Cake".to_string(),
                ..DomainDraft::default()
            })
            .unwrap();

        let first = FixedGenerator("Name: Candy Flood\nEffect: Syrup everywhere.".to_string());
        let request = LairRequest {
            domain_id,
            power: 6,
            count: 3,
            extra: String::new(),
        };
        assert_eq!(generate_lair_actions(&first, &mut store, &request).unwrap(), 1);

        let second = FixedGenerator(
            "Name: Gingerbread Sentries\nEffect: They march.\n\n\
             Name: Licorice Snare\nEffect: It grips."
                .to_string(),
        );
        assert_eq!(
            generate_lair_actions(&second, &mut store, &request).unwrap(),
            2
        );

        let domain = store.get_domain(domain_id).unwrap();
        assert_eq!(domain.lair_actions.len(), 2);
        assert_eq!(domain.lair_actions[0].name, "Gingerbread Sentries");
        assert_eq!(domain.lair_actions[1].name, "Licorice Snare");
    }

    #[test]
    fn failed_lair_batch_keeps_previous_actions() {
        let mut store = test_store();
        let domain_id = store
            .create_domain(DomainDraft {
                name: "Whole Cake".to_string(),
                ..DomainDraft::default()
            })
            .unwrap();
        let request = LairRequest {
            domain_id,
            power: 6,
            count: 2,
            extra: String::new(),
        };
        let seed = FixedGenerator("Name: Candy Flood\nEffect: Syrup everywhere.".to_string());
        generate_lair_actions(&seed, &mut store, &request).unwrap();

        let result = generate_lair_actions(&FailingGenerator, &mut store, &request);
        assert!(result.is_err());
        assert_eq!(store.get_domain(domain_id).unwrap().lair_actions.len(), 1);
    }

    #[test]
    fn nameless_lair_card_gets_fallback_name() {
        let mut store = test_store();
        let domain_id = store
            .create_domain(DomainDraft {
                name: "Whole Cake".to_string(),
                ..DomainDraft::default()
            })
            .unwrap();
        let request = LairRequest {
            domain_id,
            power: 4,
            count: 1,
            extra: String::new(),
        };
        let generator = FixedGenerator("The walls begin to chew.".to_string());
        generate_lair_actions(&generator, &mut store, &request).unwrap();

        let domain = store.get_domain(domain_id).unwrap();
        assert_eq!(domain.lair_actions[0].name, UNNAMED_LAIR_ACTION);
        assert_eq!(domain.lair_actions[0].effect_text, "The walls begin to chew.");
    }
}
