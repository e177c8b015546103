//! Assembly throughput benchmarks
//!
//! Measures catalog index builds and full equipment-set assembly against the
//! integration fixture catalog.
//!
//! ```bash
//! cargo bench --bench assembly_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loadout_forge::assembly::{EquipRequest, EquipmentAssembler};
use loadout_forge::catalog::{CatalogIndex, ItemCatalog, TomlCatalogSource};
use loadout_forge::character::{CharacterProfile, Skill};
use loadout_forge::core::types::Gender;
use loadout_forge::items::load_catalog_file;
use loadout_forge::rules::ItemRules;
use loadout_forge::{formation_category, EquipConfig, WeaponMask};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.toml");

fn bench_index_build(c: &mut Criterion) {
    let config = EquipConfig::default();
    let rules = ItemRules::new(&config);
    let file = load_catalog_file(Path::new(FIXTURE)).expect("fixture catalog");

    c.bench_function("index_build", |b| {
        b.iter(|| {
            let index = CatalogIndex::build(
                black_box(file.items.clone()),
                &file.templates,
                &rules,
                &config.civilian,
            );
            black_box(index.len())
        })
    });
}

fn bench_assembly(c: &mut Criterion) {
    let config = EquipConfig::default();
    let catalog = ItemCatalog::new(TomlCatalogSource::new(FIXTURE), &config);
    catalog.initialize();
    let assembler = EquipmentAssembler::new(&catalog, &config);

    let infantry = CharacterProfile::new("Infantry", 14, "sturgia", Gender::Male).with_skill(Skill::OneHanded, 90);
    let knight = CharacterProfile::new("Knight", 26, "sturgia", Gender::Male)
        .with_skill(Skill::Polearm, 160)
        .with_skill(Skill::Riding, 140)
        .ruling();

    let mut group = c.benchmark_group("assembly");

    group.bench_function("infantry_battle_set", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let request = EquipRequest::battle(WeaponMask::ONE_HANDED_SWORD | WeaponMask::SHIELD | WeaponMask::JAVELIN);
        b.iter(|| assembler.build_equipment_set(black_box(&infantry), &request, &mut rng))
    });

    group.bench_function("mounted_knight_with_banner", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let request = EquipRequest::for_profile(WeaponMask::POLEARM | WeaponMask::SHIELD, &knight, &config).with_banner();
        b.iter(|| {
            let set = assembler.build_equipment_set(black_box(&knight), &request, &mut rng);
            set.map(|set| formation_category(&set, &knight))
        })
    });

    group.bench_function("civilian_set", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let noble = infantry.clone().noble();
        b.iter(|| assembler.build_equipment_set(black_box(&noble), &EquipRequest::civilian(), &mut rng))
    });

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_assembly);
criterion_main!(benches);
