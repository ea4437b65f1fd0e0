//! Query throughput benchmarks
//!
//! Measures pseudo-selector queries over generated documents with varying:
//! - Item counts (10, 100, 1000)
//! - Selector shapes (native only, one pseudo, chained pseudos, alternatives)
//!
//! Run benchmarks: `cargo bench --bench query_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sieve::{Context, XmlDocument};
use std::hint::black_box;

/// Generate a catalogue with `count` items, every third one on sale.
fn generate_catalogue(count: usize) -> String {
    let mut xml = String::from("<catalogue>");
    for i in 0..count {
        let class = if i % 3 == 0 { "item sale" } else { "item" };
        xml.push_str(&format!(
            r#"<item class="{class}" data-id="{i}"><name>Product {i}</name><price>Total: {} EUR</price></item>"#,
            i * 5
        ));
    }
    xml.push_str("</catalogue>");
    xml
}

/// Benchmark each selector shape against a growing document
fn benchmark_selector_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_shapes");

    let shapes = [
        ("native", vec!["item.sale price"]),
        ("one_pseudo", vec![r#"price advanced-selector-endsWith("5 eur")"#]),
        (
            "chained_pseudos",
            vec![
                r#"price advanced-selector-startsWith("total") advanced-selector-closest(".sale")"#,
            ],
        ),
        (
            "alternatives",
            vec![
                r#"name advanced-selector-exact("Product 7")"#,
                "item.sale name",
                r#"price advanced-selector-containsAny("10 EUR, 20 EUR")"#,
            ],
        ),
    ];

    for count in [10, 100, 1000] {
        let xml = generate_catalogue(count);
        let doc = XmlDocument::parse(&xml).expect("Failed to parse catalogue");
        let ctx = Context::new();
        group.throughput(Throughput::Elements(count as u64));

        for (name, selectors) in &shapes {
            group.bench_with_input(BenchmarkId::new(*name, count), &count, |b, _| {
                let session = ctx.session(doc.root());
                b.iter(|| {
                    let found = session
                        .query_all(selectors.as_slice())
                        .expect("Query failed");
                    black_box(found.len())
                });
            });
        }
    }

    group.finish();
}

/// Benchmark selector parsing on its own, which recompiles the patterns per call
fn benchmark_parse(c: &mut Criterion) {
    let ctx: Context<sieve::XmlNode<'_>> = Context::new();
    let engine = ctx.engine();
    let selector = r##"section article advanced-selector-contains("lamp") advanced-selector-self("[data-sku]") advanced-selector-closest("#products")"##;

    c.bench_function("parse_selector", |b| {
        b.iter(|| {
            let parsed = engine.parse(black_box(selector)).expect("Parse failed");
            black_box(parsed.pseudos.len())
        });
    });
}

criterion_group!(benches, benchmark_selector_shapes, benchmark_parse);
criterion_main!(benches);
