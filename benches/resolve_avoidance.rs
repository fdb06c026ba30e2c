//! Measure resolving avoidance for a dense crowd, single threaded and across
//! a task pool
//!

use bevy::prelude::*;
use bevy::tasks::TaskPool;
use bevy_hexflow_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A square block of agents spaced closer than the avoidance radius
fn crowd(side: usize) -> Vec<AgentSnapshot> {
	let settings = AgentSettings::default();
	let mut agents = Vec::with_capacity(side * side);
	for x in 0..side {
		for y in 0..side {
			let mut agent = Agent::new(Vec2::new(x as f32, y as f32) * 0.8, &settings);
			agent.steer(Vec2::X);
			agents.push(agent.snapshot(Vec2::X));
		}
	}
	agents
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(20);
	let agents = crowd(32);
	let obstacles: Vec<StaticObstacle> = (0..16)
		.map(|i| StaticObstacle::new(Vec2::new(i as f32 * 1.6, 12.0), 0.5))
		.collect();
	let params = AvoidanceParams::default();
	let pool = TaskPool::new();
	group.bench_function("resolve_avoidance_serial", |b| {
		b.iter(|| resolve_velocities_serial(black_box(&agents), black_box(&obstacles), &params))
	});
	group.bench_function("resolve_avoidance_parallel", |b| {
		b.iter(|| {
			resolve_velocities(
				black_box(&agents),
				black_box(&obstacles),
				&params,
				black_box(32),
				&pool,
			)
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
