//! CLI frontend for the Soulforge content builder.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate-soul-abilities";

#[derive(Parser)]
#[command(
    name = "sf",
    about = "Soulforge — a content builder for the Soul-Soul Fruit",
    version,
    propagate_version = true
)]
struct Cli {
    /// Snapshot file holding all collections
    #[arg(short, long, global = true, default_value = "soulforge.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage harvested souls
    Soul {
        #[command(subcommand)]
        command: SoulCommands,
    },

    /// Manage homies
    Homie {
        #[command(subcommand)]
        command: HomieCommands,
    },

    /// Manage domains and their lair actions
    Domain {
        #[command(subcommand)]
        command: DomainCommands,
    },

    /// Manage ability cards
    Ability {
        #[command(subcommand)]
        command: AbilityCommands,
    },

    /// Show the SPU budget (total, spent, available)
    Budget,
}

#[derive(Subcommand)]
enum SoulCommands {
    /// Harvest a new soul
    Add {
        /// Creature name
        name: String,

        /// Might score (1-10)
        #[arg(short, long, default_value = "1")]
        might: i64,

        /// Threat tier (0-9)
        #[arg(short, long, default_value = "0")]
        tier: i64,

        /// Will score (1-10)
        #[arg(short, long, default_value = "1")]
        will: i64,

        /// Free-text tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List all souls
    List,

    /// Show one soul in detail
    Show {
        /// Soul name or id prefix
        soul: String,
    },

    /// Toggle whether a soul may be consumed when crafting
    ToggleCrafting {
        /// Soul name or id prefix
        soul: String,
    },

    /// Toggle soul-rip immunity
    ToggleImmunity {
        /// Soul name or id prefix
        soul: String,
    },

    /// Replace a soul's tags
    Tag {
        /// Soul name or id prefix
        soul: String,

        /// New tags
        tags: String,
    },

    /// Replace a soul's notes
    Note {
        /// Soul name or id prefix
        soul: String,

        /// New notes
        notes: String,
    },

    /// Delete a soul (linked homies survive, unlinked)
    Remove {
        /// Soul name or id prefix
        soul: String,
    },
}

#[derive(Subcommand)]
enum HomieCommands {
    /// Create a new homie
    Create {
        /// Homie name
        name: String,

        /// Category: signature, territory, minor, or custom text
        #[arg(short, long, default_value = "minor")]
        kind: String,

        /// Free-text role
        #[arg(long, default_value = "")]
        role: String,

        /// Hit points
        #[arg(long, default_value = "0")]
        hp: i64,

        /// Armor class
        #[arg(long, default_value = "0")]
        ac: i64,

        /// Movement speed
        #[arg(long, default_value = "0")]
        move_speed: i64,

        /// Free-text attack description
        #[arg(long, default_value = "")]
        attack: String,

        /// Free-text personality
        #[arg(long, default_value = "")]
        personality: String,

        /// Free-text location or bound object
        #[arg(long, default_value = "")]
        location: String,

        /// Soul to link (name or id prefix); must exist
        #[arg(long)]
        soul: Option<String>,

        /// Domain to join (name or id prefix); must exist
        #[arg(long)]
        domain: Option<String>,

        /// Initial SPU investment
        #[arg(long, default_value = "0")]
        spu: i64,
    },

    /// List all homies
    List,

    /// Show one homie in detail
    Show {
        /// Homie name or id prefix
        homie: String,
    },

    /// Buy the next tier of a stat upgrade
    Upgrade {
        /// Homie name or id prefix
        homie: String,

        /// Stat to upgrade: hp, ac, damage, utility
        stat: String,
    },

    /// Mark a homie destroyed
    Destroy {
        /// Homie name or id prefix
        homie: String,
    },

    /// Clear the destroyed flag without paying SPU
    Restore {
        /// Homie name or id prefix
        homie: String,
    },

    /// Revive a destroyed homie for half its invested SPU
    Revive {
        /// Homie name or id prefix
        homie: String,
    },

    /// Delete a homie (its abilities revert to general)
    Remove {
        /// Homie name or id prefix
        homie: String,
    },
}

#[derive(Subcommand)]
enum DomainCommands {
    /// Create a new domain
    Create {
        /// Domain name
        name: String,

        /// Domain tier
        #[arg(short, long, default_value = "0")]
        tier: i64,

        /// Initial SPU investment
        #[arg(long, default_value = "0")]
        spu: i64,

        /// Free-text range or size
        #[arg(long, default_value = "")]
        range: String,

        /// Fear DC
        #[arg(long, default_value = "0")]
        dc: i64,

        /// Free-text personality
        #[arg(long, default_value = "")]
        personality: String,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List all domains
    List,

    /// Show one domain in detail
    Show {
        /// Domain name or id prefix
        domain: String,
    },

    /// Bind a homie to a domain's territory
    AddHomie {
        /// Domain name or id prefix
        domain: String,

        /// Homie name or id prefix
        homie: String,
    },

    /// Release a homie from a domain's territory
    RemoveHomie {
        /// Domain name or id prefix
        domain: String,

        /// Homie name or id prefix
        homie: String,
    },

    /// Generate a fresh lair action batch (replaces the current list)
    Generate {
        /// Domain name or id prefix
        domain: String,

        /// Desired power level (1-10)
        #[arg(short, long, default_value = "5")]
        power: u32,

        /// Number of actions to draft (1-5)
        #[arg(short, long, default_value = "3")]
        count: u32,

        /// Extra notes or requested themes
        #[arg(long, default_value = "")]
        extra: String,

        /// Generation proxy endpoint
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Delete a domain (its homies and abilities revert to unbound)
    Remove {
        /// Domain name or id prefix
        domain: String,
    },
}

#[derive(Subcommand)]
enum AbilityCommands {
    /// Add a hand-written ability card
    Add {
        /// Ability name
        name: String,

        /// Suggested power level (1-10)
        #[arg(short, long, default_value = "1")]
        power: u32,

        /// Assign to a homie (name or id prefix)
        #[arg(long, conflicts_with = "domain")]
        homie: Option<String>,

        /// Assign to a domain (name or id prefix)
        #[arg(long)]
        domain: Option<String>,

        /// Action economy
        #[arg(long, default_value = "")]
        action: String,

        /// Range or area
        #[arg(long, default_value = "")]
        range: String,

        /// Target shape
        #[arg(long, default_value = "")]
        target: String,

        /// Save type and DC
        #[arg(long, default_value = "")]
        save: String,

        /// Damage dice and types
        #[arg(long, default_value = "")]
        damage: String,

        /// Full effect text
        #[arg(long, default_value = "")]
        effect: String,

        /// Combo notes
        #[arg(long, default_value = "")]
        combo: String,

        /// SPU cost to use the ability
        #[arg(long)]
        cost: Option<u64>,
    },

    /// List all abilities
    List,

    /// Show one ability in detail
    Show {
        /// Ability name or id prefix
        ability: String,
    },

    /// Draft a new ability card with the generator
    Generate {
        /// The ability concept, in your own words
        concept: String,

        /// Desired power level (1-10)
        #[arg(short, long, default_value = "5")]
        power: u32,

        /// Intended role (offense, defense, control, ...)
        #[arg(short, long, default_value = "offense")]
        role: String,

        /// Assign to a homie (name or id prefix)
        #[arg(long, conflicts_with = "domain")]
        homie: Option<String>,

        /// Assign to a domain (name or id prefix)
        #[arg(long)]
        domain: Option<String>,

        /// SPU cost to use the ability
        #[arg(long)]
        cost: Option<u64>,

        /// Generation proxy endpoint
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Redraft an existing ability in place
    Reroll {
        /// Ability name or id prefix
        ability: String,

        /// New concept; defaults to the current effect text
        #[arg(long)]
        concept: Option<String>,

        /// Desired power level (1-10)
        #[arg(short, long, default_value = "5")]
        power: u32,

        /// Intended role
        #[arg(short, long, default_value = "offense")]
        role: String,

        /// Generation proxy endpoint
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Delete an ability
    Remove {
        /// Ability name or id prefix
        ability: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let file = cli.file;

    let result = match cli.command {
        Commands::Soul { command } => match command {
            SoulCommands::Add {
                name,
                might,
                tier,
                will,
                tags,
                notes,
            } => commands::soul::add(&file, &name, might, tier, will, &tags, &notes),
            SoulCommands::List => commands::soul::list(&file),
            SoulCommands::Show { soul } => commands::soul::show(&file, &soul),
            SoulCommands::ToggleCrafting { soul } => {
                commands::soul::toggle_crafting(&file, &soul)
            }
            SoulCommands::ToggleImmunity { soul } => {
                commands::soul::toggle_immunity(&file, &soul)
            }
            SoulCommands::Tag { soul, tags } => commands::soul::tag(&file, &soul, &tags),
            SoulCommands::Note { soul, notes } => commands::soul::note(&file, &soul, &notes),
            SoulCommands::Remove { soul } => commands::soul::remove(&file, &soul),
        },
        Commands::Homie { command } => match command {
            HomieCommands::Create {
                name,
                kind,
                role,
                hp,
                ac,
                move_speed,
                attack,
                personality,
                location,
                soul,
                domain,
                spu,
            } => commands::homie::create(
                &file,
                commands::homie::CreateArgs {
                    name,
                    kind,
                    role,
                    hp,
                    ac,
                    move_speed,
                    attack,
                    personality,
                    location,
                    soul,
                    domain,
                    spu,
                },
            ),
            HomieCommands::List => commands::homie::list(&file),
            HomieCommands::Show { homie } => commands::homie::show(&file, &homie),
            HomieCommands::Upgrade { homie, stat } => {
                commands::homie::upgrade(&file, &homie, &stat)
            }
            HomieCommands::Destroy { homie } => commands::homie::destroy(&file, &homie),
            HomieCommands::Restore { homie } => commands::homie::restore(&file, &homie),
            HomieCommands::Revive { homie } => commands::homie::revive(&file, &homie),
            HomieCommands::Remove { homie } => commands::homie::remove(&file, &homie),
        },
        Commands::Domain { command } => match command {
            DomainCommands::Create {
                name,
                tier,
                spu,
                range,
                dc,
                personality,
                notes,
            } => commands::domain::create(
                &file,
                commands::domain::CreateArgs {
                    name,
                    tier,
                    spu,
                    range,
                    dc,
                    personality,
                    notes,
                },
            ),
            DomainCommands::List => commands::domain::list(&file),
            DomainCommands::Show { domain } => commands::domain::show(&file, &domain),
            DomainCommands::AddHomie { domain, homie } => {
                commands::domain::add_homie(&file, &domain, &homie)
            }
            DomainCommands::RemoveHomie { domain, homie } => {
                commands::domain::remove_homie(&file, &domain, &homie)
            }
            DomainCommands::Generate {
                domain,
                power,
                count,
                extra,
                endpoint,
            } => commands::domain::generate(&file, &domain, power, count, &extra, &endpoint),
            DomainCommands::Remove { domain } => commands::domain::remove(&file, &domain),
        },
        Commands::Ability { command } => match command {
            AbilityCommands::Add {
                name,
                power,
                homie,
                domain,
                action,
                range,
                target,
                save,
                damage,
                effect,
                combo,
                cost,
            } => commands::ability::add(
                &file,
                commands::ability::AddArgs {
                    name,
                    power,
                    homie,
                    domain,
                    action,
                    range,
                    target,
                    save,
                    damage,
                    effect,
                    combo,
                    cost,
                },
            ),
            AbilityCommands::List => commands::ability::list(&file),
            AbilityCommands::Show { ability } => commands::ability::show(&file, &ability),
            AbilityCommands::Generate {
                concept,
                power,
                role,
                homie,
                domain,
                cost,
                endpoint,
            } => commands::ability::generate(
                &file,
                commands::ability::GenerateArgs {
                    concept,
                    power,
                    role,
                    homie,
                    domain,
                    cost,
                    endpoint,
                },
            ),
            AbilityCommands::Reroll {
                ability,
                concept,
                power,
                role,
                endpoint,
            } => commands::ability::reroll(&file, &ability, concept.as_deref(), power, &role, &endpoint),
            AbilityCommands::Remove { ability } => commands::ability::remove(&file, &ability),
        },
        Commands::Budget => commands::budget::report(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
