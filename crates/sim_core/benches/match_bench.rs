//! Full-match and snapshot recompute timings

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_core::engine::{AttributeCalculator, EngineConfig, MatchEngine, Team};
use sim_core::models::{LineupEntry, MatchSetup, Player, PlayerAttributes, Position, TeamSheet};

const FORMATION: [Position; 11] = [
    Position::GK,
    Position::LB,
    Position::CBL,
    Position::CBR,
    Position::RB,
    Position::LM,
    Position::CML,
    Position::CMR,
    Position::RM,
    Position::CFL,
    Position::CFR,
];

fn sheet(team_id: u32, name: &str, value: u8) -> TeamSheet {
    let lineup = FORMATION
        .iter()
        .enumerate()
        .map(|(i, &position)| LineupEntry {
            player: Player::new(team_id * 100 + i as u32, format!("{} {}", name, i + 1), PlayerAttributes::uniform(value)),
            position,
        })
        .collect();
    TeamSheet::new(team_id, name, lineup)
}

fn setup(home: u8, away: u8) -> MatchSetup {
    MatchSetup::new(sheet(1, "Home", home), sheet(2, "Away", away))
}

fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_match");
    for (home, away) in [(12, 12), (16, 8)] {
        let fixture = setup(home, away);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}v{}", home, away)), &fixture, |b, fixture| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let engine = MatchEngine::new(fixture.clone(), EngineConfig::default(), seed).unwrap();
                black_box(engine.play(true))
            });
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let home = sheet(1, "Home", 12);
    let mut calc = AttributeCalculator::new();
    let mut team = Team::new(&home, &mut calc).unwrap();

    c.bench_function("snapshot_recompute_warm", |b| {
        b.iter(|| {
            team.update_snapshot(black_box(&mut calc));
        })
    });

    c.bench_function("snapshot_recompute_cold", |b| {
        b.iter(|| {
            calc.clear();
            team.update_snapshot(black_box(&mut calc));
        })
    });
}

criterion_group!(benches, bench_full_match, bench_snapshot);
criterion_main!(benches);
