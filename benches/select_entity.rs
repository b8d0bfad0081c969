use criterion::*;
use kindec::test_util::{CompN, Position, Velocity};
use kindec::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates `entities` entities, each carrying `Position` and `Velocity` with probability one half.
fn populate(entities: usize) -> World {
    let mut rng = StdRng::seed_from_u64(entities as u64);
    let mut world = World::new();

    for _ in 0..entities {
        let mut map = kindec::comps![CompN::<1>(0)];
        if rng.gen_bool(0.5) {
            map.insert(Position(0.0, 0.0));
        }
        if rng.gen_bool(0.5) {
            map.insert(Velocity(1.0, 1.0));
        }
        world.entity(map);
    }

    world
}

fn select_entity(c: &mut Criterion) {
    kindec::test_util::init();
    let mut group = c.benchmark_group("select entity");

    for log_entities in (8..=16).step_by(4) {
        let entities = 1 << log_entities;
        group.throughput(Throughput::Elements(entities as u64));

        let mut world = populate(entities);
        let position = world.register::<Position>();
        let velocity = world.register::<Velocity>();

        group.bench_function(BenchmarkId::new("linear scan", entities), |b| {
            b.iter(|| {
                world
                    .entities()
                    .filter(|&entity| world.has_kind(entity, position) && world.has_kind(entity, velocity))
                    .count()
            })
        });

        group.bench_function(BenchmarkId::new("storage scan", entities), |b| {
            b.iter(|| world.iter::<Velocity>().filter(|&(entity, _)| world.has::<Position>(entity)).count())
        });

        let query = world.query::<(Position, Velocity)>();
        group.bench_function(BenchmarkId::new("cached index", entities), |b| {
            b.iter(|| world.select(query).iter().count())
        });

        group.bench_function(BenchmarkId::new("bootstrap", entities), |b| {
            b.iter_batched(
                || populate(entities),
                |mut world| {
                    let query = world.query::<(Position, Velocity)>();
                    world.select(query).len()
                },
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, select_entity);
criterion_main!(benches);
