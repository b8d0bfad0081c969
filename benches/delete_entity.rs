use criterion::*;
use kindec::test_util::{CompN, Holder};
use kindec::{EntityRef, World};

/// Builds `roots` trees of the given depth, each node owning `fanout` children.
fn populate(world: &mut World, roots: usize, depth: u32, fanout: usize) -> Vec<kindec::Entity> {
    fn node(world: &mut World, depth: u32, fanout: usize) -> kindec::Entity {
        if depth == 0 {
            return world.entity((CompN::<1>(0),));
        }

        let refs = (0..fanout).map(|_| EntityRef::Owned(node(world, depth - 1, fanout))).collect();
        world.entity((CompN::<1>(0), Holder { refs }))
    }

    (0..roots).map(|_| node(world, depth, fanout)).collect()
}

fn delete_entity(c: &mut Criterion) {
    kindec::test_util::init();
    let mut group = c.benchmark_group("delete entity");

    for (depth, fanout) in [(0, 0), (1, 4), (3, 2), (6, 2)] {
        let roots = 64;
        group.bench_with_input(
            BenchmarkId::new("cascade", format!("depth {depth}, fanout {fanout}")),
            &(depth, fanout),
            |b, &(depth, fanout)| {
                b.iter_batched(
                    || {
                        let mut world = World::new();
                        let roots = populate(&mut world, roots, depth, fanout);
                        (world, roots)
                    },
                    |(mut world, roots)| {
                        for root in roots {
                            world.destroy(root);
                        }
                        world.flush_with(&kindec::tracer::Noop);
                        world
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(benches, delete_entity);
criterion_main!(benches);
