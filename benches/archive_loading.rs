use std::hint::black_box;
use std::io::Write;

use chat_archive_viewer::{load_archive, parse_archive_str};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Build an export document with `num_conversations` linear threads of `depth` messages
fn generate_archive(num_conversations: usize, depth: usize) -> String {
    let conversations: Vec<Value> = (0..num_conversations)
        .map(|i| {
            let mut mapping = serde_json::Map::new();
            mapping.insert("root".to_string(), json!({"message": null, "parent": null}));
            let mut parent = "root".to_string();
            for d in 0..depth {
                let id = format!("n{}", d);
                let role = if d % 2 == 0 { "user" } else { "assistant" };
                mapping.insert(
                    id.clone(),
                    json!({
                        "message": {
                            "author": {"role": role},
                            "content": {"parts": [format!("Message {} of conversation {}", d, i)]}
                        },
                        "parent": parent,
                    }),
                );
                parent = id;
            }
            json!({
                "title": format!("Conversation {}", i),
                "create_time": 1_700_000_000.0 + i as f64,
                "update_time": 1_700_000_100.0 + i as f64,
                "mapping": mapping,
                "current_node": parent,
            })
        })
        .collect();

    Value::Array(conversations).to_string()
}

fn bench_archive_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_parsing");

    for size in [100, 1_000, 5_000].iter() {
        let content = generate_archive(*size, 20);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_archive_str(black_box(&content)).unwrap());
        });
    }

    group.finish();
}

fn bench_archive_loading_from_disk(c: &mut Criterion) {
    let content = generate_archive(1_000, 20);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();

    c.bench_function("load_archive_1000x20", |b| {
        b.iter(|| load_archive(black_box(file.path())).unwrap());
    });
}

fn bench_deep_thread(c: &mut Criterion) {
    let content = generate_archive(1, 10_000);

    c.bench_function("reconstruct_10000_deep", |b| {
        b.iter(|| parse_archive_str(black_box(&content)).unwrap());
    });
}

criterion_group!(benches, bench_archive_parsing, bench_archive_loading_from_disk, bench_deep_thread);
criterion_main!(benches);
