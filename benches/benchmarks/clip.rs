use std::f64::consts::PI;

use criterion::{BatchSize, Criterion, criterion_group};
use pathcrop::{Globe, Plane, Segment, clip, rectangle};
use rand::Rng;

type Sample = [[f64; 2]; 1000];

/// Returns a random polyline with every coordinate in the range [-1, 2).
fn random_polyline() -> Vec<Segment<f64>> {
    let mut rng = rand::rng();
    let sample = rng.random::<Sample>();

    sample
        .iter()
        .enumerate()
        .map(|(index, [s, t])| {
            let (s, t) = (3. * s - 1., 3. * t - 1.);
            if index == 0 {
                Segment::move_to(s, t)
            } else {
                Segment::line_to(s, t)
            }
        })
        .collect()
}

/// Returns a random polyline wandering around the globe in small steps.
fn random_track() -> Vec<Segment<f64>> {
    let mut rng = rand::rng();
    let sample = rng.random::<Sample>();

    let mut place = [0., 0.];
    sample
        .iter()
        .enumerate()
        .map(|(index, [ds, dt])| {
            if index == 0 {
                return Segment::move_to(place[0], place[1]);
            }

            place[0] = (place[0] + ds - 0.5).clamp(-1.5, 1.5);
            place[1] = pathcrop::geometry::localize_in_range(place[1] + dt - 0.5, -PI, PI);
            Segment::line_to(place[0], place[1])
        })
        .collect()
}

pub fn random_paths(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("random paths");

    group.bench_function("square", |b| {
        let boundary = rectangle(0., 0., 1., 1., false);
        b.iter_batched(
            random_polyline,
            |path| {
                let _ = clip(&path, &boundary, &Plane, false);
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("world", |b| {
        let boundary = rectangle(-PI / 2., -PI, PI / 2., PI, true);
        b.iter_batched(
            random_track,
            |path| {
                let _ = clip(&path, &boundary, &Globe, false);
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, random_paths);
