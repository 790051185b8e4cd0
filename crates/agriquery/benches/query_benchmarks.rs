//! Query pipeline performance benchmarks.
//!
//! Measures CSV normalization, name matching, routing and the top-N query.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use agriquery::input::Parser;
use agriquery::matching::NameMatcher;
use agriquery::query::{top_crops, YearFilter};
use agriquery::router::{route, CROPS, STATES};
use agriquery::schema::{CropTable, NormalizedTable};

/// Generate a crop production CSV in the source column layout.
fn generate_crop_csv(rows: usize) -> String {
    let mut data = String::from("State_Name,District_Name,Crop_Year,Season,Crop,Area_,Production_\n");
    for row in 0..rows {
        let state = STATES[row % STATES.len()];
        let crop = CROPS[(row / 3) % CROPS.len()];
        data.push_str(&format!(
            "{},District {},{},Kharif,{},{},{}\n",
            state,
            row % 17,
            1997 + (row % 20),
            crop,
            100 + row % 500,
            if row % 41 == 0 {
                "NA".to_string()
            } else {
                (1000 + row * 7 % 9000).to_string()
            }
        ));
    }
    data
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_crop_csv");

    for rows in [1_000, 10_000, 100_000].iter() {
        let data = generate_crop_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                let raw = Parser::new().parse_bytes(data.as_bytes()).unwrap();
                black_box(CropTable::from_raw(&raw).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_name_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_matching");
    let matcher = NameMatcher::new();

    for query in ["punjab", "tamilnadu", "west bengall", "atlantis"] {
        group.bench_with_input(BenchmarkId::new("states", query), &query, |b, query| {
            b.iter(|| black_box(matcher.resolve(query, STATES.iter().copied())))
        });
    }

    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let questions = [
        "Compare average rainfall between Karnataka and Maharashtra for the last 5 years",
        "Which district in Punjab has the highest wheat production?",
        "Should Rajasthan promote bajra over wheat?",
        "What is the weather like today?",
    ];

    c.bench_function("route_questions", |b| {
        b.iter(|| {
            for question in &questions {
                black_box(route(question));
            }
        })
    });
}

fn bench_top_crops(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_crops");
    let matcher = NameMatcher::new();

    for rows in [10_000, 100_000].iter() {
        let raw = Parser::new()
            .parse_bytes(generate_crop_csv(*rows).as_bytes())
            .unwrap();
        let table = CropTable::from_raw(&raw).unwrap();

        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| {
                black_box(top_crops(table, &matcher, "punjab", &YearFilter::LastN(5), 3).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_name_matching,
    bench_routing,
    bench_top_crops,
);
criterion_main!(benches);
