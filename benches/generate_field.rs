//! Measure generating the cost and flow fields of a large hexagonal grid,
//! once open and once with rings of obstacles that force long detours
//!

use bevy_hexflow_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Radius 60 grid, roughly 11k cells
const RADIUS: u32 = 60;

/// Concentric walls every 8 rings, each with a single gap on alternating sides
fn maze(radius: u32) -> HexGrid {
	let layout = HexLayout::default();
	HexGrid::new(radius, layout, move |p| {
		let coord = layout.world_to_axial(p);
		let ring = coord.distance(&HexCoord::new(0, 0));
		if ring == 0 || ring % 8 != 0 {
			return false;
		}
		let gap = if (ring / 8) % 2 == 0 {
			HexCoord::new(ring as i32, 0)
		} else {
			HexCoord::new(-(ring as i32), 0)
		};
		coord != gap
	})
}

/// Build both fields toward `target`
fn generate(grid: &HexGrid, field: &mut HexFlowField, target: HexCoord) {
	let _ = field.generate(grid, target);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(50);
	let open = HexGrid::open(RADIUS, HexLayout::default());
	let mut open_field = HexFlowField::new(&open);
	group.bench_function("generate_field_open", |b| {
		b.iter(|| generate(black_box(&open), &mut open_field, black_box(HexCoord::new(0, 0))))
	});
	let walled = maze(RADIUS);
	let mut walled_field = HexFlowField::new(&walled);
	group.bench_function("generate_field_maze", |b| {
		b.iter(|| generate(black_box(&walled), &mut walled_field, black_box(HexCoord::new(0, 0))))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
