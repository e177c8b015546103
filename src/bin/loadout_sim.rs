//! Headless loadout simulator
//!
//! Equips a batch of characters from a TOML catalog and prints each set,
//! with its formation category, as JSON.

use clap::{Parser, ValueEnum};
use loadout_forge::catalog::{BuildStatus, ItemCatalog, TomlCatalogSource};
use loadout_forge::character::{CharacterProfile, Skill};
use loadout_forge::core::types::Gender;
use loadout_forge::{formation_category, EquipConfig, EquipRequest, EquipmentAssembler, FormationCategory, WeaponMask};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

/// Loadout Simulator - equip characters from a catalog file
#[derive(Parser, Debug)]
#[command(name = "loadout_sim")]
#[command(about = "Assemble equipment sets for generated characters and print them as JSON")]
struct Args {
    /// Catalog file with [[item]] and [[template]] tables
    #[arg(long, default_value = "data/catalog.toml")]
    catalog: PathBuf,

    /// Optional rules config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "empire")]
    culture: String,

    #[arg(long, default_value_t = 12)]
    level: u32,

    #[arg(long, value_enum, default_value = "male")]
    gender: GenderArg,

    /// Allowed weapon categories, comma separated (e.g. "one_handed_sword,shield,bow")
    #[arg(long, default_value = "one_handed_sword,shield")]
    weapons: String,

    /// Skill values as name=value, repeatable (e.g. --skill bow=120)
    #[arg(long = "skill", value_parser = parse_skill)]
    skills: Vec<(Skill, u32)>,

    /// Number of characters to equip
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Force mounted; otherwise derived from riding skill
    #[arg(long)]
    mounted: bool,

    #[arg(long)]
    banner: bool,

    /// Build the civilian wardrobe instead of battle gear
    #[arg(long)]
    civilian: bool,

    /// Member of the ruling clan (eligible for crowns)
    #[arg(long)]
    ruling: bool,

    #[arg(long)]
    noble: bool,

    /// Print catalog statistics instead of equipping
    #[arg(long)]
    stats: bool,
}

fn parse_skill(s: &str) -> Result<(Skill, u32), String> {
    let (name, value) = s.split_once('=').ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let skill = Skill::from_str(name.trim()).map_err(|_| format!("unknown skill '{}'", name))?;
    let value = value.trim().parse().map_err(|e| format!("bad skill value '{}': {}", value, e))?;
    Ok((skill, value))
}

#[derive(Serialize)]
struct CharacterReport {
    name: String,
    level: u32,
    culture: String,
    formation: FormationCategory,
    slots: BTreeMap<String, String>,
    diagnostics: Vec<String>,
}

#[derive(Serialize)]
struct CatalogReport {
    items: usize,
    tier_floor: u8,
    tier_ceiling: u8,
    cultures: Vec<String>,
    rejected: usize,
    crowns: usize,
    civilian_templates: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loadout_forge=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> loadout_forge::Result<()> {
    let config = match &args.config {
        Some(path) => EquipConfig::load(path)?,
        None => EquipConfig::default(),
    };

    let catalog = ItemCatalog::new(TomlCatalogSource::new(args.catalog.clone()), &config);
    match catalog.initialize() {
        BuildStatus::Built(stats) => tracing::info!(
            "Catalog ready: {} items, {} rejected",
            stats.indexed,
            stats.rejected_total()
        ),
        BuildStatus::AlreadyInitialized => {}
        other => tracing::warn!("Catalog unusable ({:?}), sets will be empty", other),
    }

    if args.stats {
        let index = catalog.index();
        let (tier_floor, tier_ceiling) = index.tier_bounds();
        let report = CatalogReport {
            items: index.len(),
            tier_floor,
            tier_ceiling,
            cultures: index.cultures().iter().map(|c| c.to_string()).collect(),
            rejected: index.stats().rejected_total(),
            crowns: index.stats().crowns,
            civilian_templates: index.stats().civilian_templates,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mask = WeaponMask::from_str(&args.weapons)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Seed {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let assembler = EquipmentAssembler::new(&catalog, &config);

    let mut reports = Vec::with_capacity(args.count as usize);
    for n in 0..args.count {
        let profile = generate_profile(args, n, &mut rng);
        let request = if args.civilian {
            EquipRequest::civilian()
        } else {
            let request = EquipRequest::for_profile(mask, &profile, &config);
            let request = if args.mounted { request.mounted(true) } else { request };
            if args.banner {
                request.with_banner()
            } else {
                request
            }
        };

        let set = assembler.build_equipment_set(&profile, &request, &mut rng)?;
        reports.push(CharacterReport {
            name: profile.name.clone(),
            level: profile.level,
            culture: profile.culture.to_string(),
            formation: formation_category(&set, &profile),
            slots: set
                .summary()
                .into_iter()
                .map(|(slot, id)| (slot.to_string(), id.to_string()))
                .collect(),
            diagnostics: set.diagnostics().iter().map(|d| d.to_string()).collect(),
        });
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

/// Explicit skills are kept; unset weapon skills get a little jitter so a
/// batch does not produce identical characters.
fn generate_profile(args: &Args, n: u32, rng: &mut impl Rng) -> CharacterProfile {
    let mut profile = CharacterProfile::new(format!("Character {}", n + 1), args.level, &args.culture, args.gender.into());
    for skill in Skill::WEAPON_SKILLS {
        profile = profile.with_skill(skill, rng.gen_range(0..=args.level * 5));
    }
    for (skill, value) in &args.skills {
        profile = profile.with_skill(*skill, *value);
    }
    if args.ruling {
        profile = profile.ruling();
    }
    if args.noble {
        profile = profile.noble();
    }
    profile
}
