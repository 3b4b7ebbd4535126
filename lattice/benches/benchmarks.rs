use criterion::{criterion_group, criterion_main, Criterion};
use lattice::{constants::METERS_PER_DEGREE_LAT, Location, Sampler};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn square(lng: f64, lat: f64, side: f64) -> Vec<Location> {
    let dlat = side / METERS_PER_DEGREE_LAT;
    let dlng = side / (METERS_PER_DEGREE_LAT * lat.to_radians().cos());
    vec![
        Location::new(lng, lat),
        Location::new(lng + dlng, lat),
        Location::new(lng + dlng, lat + dlat),
        Location::new(lng, lat + dlat),
    ]
}

fn sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sampler");

    let route = square(14.5, 46.05, 200.0);

    for offset in [5, 15] {
        group.bench_with_input(
            format!("200m square, {offset}m offset"),
            &(offset, route.clone()),
            |b, (offset, route)| {
                b.iter(|| {
                    Sampler::builder()
                        .offset(*offset)
                        .route(route.clone())
                        .build()
                        .unwrap()
                })
            },
        );
    }
}

criterion_group!(benches, sampler);
criterion_main!(benches);
