//! Benchmarks for document rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mikumark::{Renderer, parse_inline};

/// Generate a document with the given number of sections.
fn generate_document(headings: usize, paragraphs_per_section: usize) -> String {
    let mut doc = String::with_capacity(headings * 50 + headings * paragraphs_per_section * 200);
    doc.push_str("# Document Title\n\n");

    for i in 0..headings {
        doc.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            doc.push_str(&format!(
                "Paragraph {j} in section {i} has **bold**, %%italic%% and `code`.\n\n"
            ));
        }
        doc.push_str("+ first\n++ nested\n+ second\n\n");
        doc.push_str("> quoted\n\n>> deeper\n\n");
    }
    doc
}

fn bench_render_simple(c: &mut Criterion) {
    let renderer = Renderer::new();

    c.bench_function("render_simple", |b| {
        b.iter(|| renderer.render("# Hello\n\nSimple content."));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = Renderer::new();
    let mut group = c.benchmark_group("render_by_size");

    for (headings, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let doc = generate_document(headings, paragraphs);

        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("mikumark", format!("{headings}h_{paragraphs}p")),
            &doc,
            |b, doc| b.iter(|| renderer.render(doc)),
        );
    }

    group.finish();
}

fn bench_render_structures(c: &mut Criterion) {
    let doc = r"# Structures

|Name|Size|
|:---|---:|
|a.txt|12|
|b.txt|340|

@@tab
@Rust
```rust
fn main() {}
```
@Python
```python
print()
```
@@tab

- one
-- two
--- three
- four
";
    let renderer = Renderer::new();

    c.bench_function("render_structures", |b| {
        b.iter(|| renderer.render(doc));
    });
}

fn bench_inline(c: &mut Criterion) {
    let text = r"**bold** %%italic%% ~strike~ #(tag)# [[red:warm#]] [link](https://example.com) \*escaped\* `code`";

    c.bench_function("parse_inline_all_spans", |b| {
        b.iter(|| parse_inline(text));
    });
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_render_varying_sizes,
    bench_render_structures,
    bench_inline
);
criterion_main!(benches);
