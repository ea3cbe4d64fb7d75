use airport_weather::models::Reading;
use airport_weather::WeatherService;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Lay airports out on a grid around New York, roughly 11 km apart
fn create_service(airport_count: usize) -> WeatherService {
    let service = WeatherService::default();
    let side = (airport_count as f64).sqrt().ceil() as usize;

    for i in 0..airport_count {
        let latitude = 40.0 + (i / side) as f64 * 0.1;
        let longitude = -74.0 + (i % side) as f64 * 0.1;
        let code = format!("A{:05}", i);
        service.add_location(&code, latitude, longitude).unwrap();

        if i % 3 == 0 {
            let reading = Reading::builder().mean(20.0).count(10).build();
            service.ingest_reading(&code, "WIND", reading).unwrap();
        }
    }

    service
}

fn benchmark_radius_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_query");

    for airport_count in [100, 1_000, 10_000] {
        let service = create_service(airport_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(airport_count),
            &airport_count,
            |b, _| b.iter(|| service.query(black_box("A00000"), black_box(100.0)).unwrap()),
        );
    }

    group.finish();
}

fn benchmark_ingest(c: &mut Criterion) {
    let service = create_service(1_000);
    let reading = Reading::builder().mean(55.0).count(10).build();

    c.bench_function("ingest_reading", |b| {
        b.iter(|| {
            service
                .ingest_reading(black_box("A00500"), black_box("HUMIDITY"), reading)
                .unwrap()
        })
    });
}

fn benchmark_health(c: &mut Criterion) {
    let service = create_service(1_000);
    for i in 0..100 {
        service.query(&format!("A{:05}", i), f64::from(i)).unwrap();
    }

    c.bench_function("health_snapshot", |b| b.iter(|| black_box(service.health())));
}

criterion_group!(benches, benchmark_radius_query, benchmark_ingest, benchmark_health);
criterion_main!(benches);
