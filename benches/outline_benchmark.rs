//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench
//!
//! Pages are generated in memory so the numbers cover profiling, scoring
//! and outline building without PDF parsing noise.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_outline::{
    extract_outline_from_pages, BBox, Block, Line, OutlineExtractor, Page, Span, StyleProfile,
};

const BODY: &str = "Benchmark body text that is long enough to never look like a heading line";

/// Creates `page_count` pages with a heading every tenth line.
fn create_test_pages(page_count: u32) -> Vec<Page> {
    (1..=page_count)
        .map(|number| {
            let mut page = Page::letter(number);
            let lines = (0..50)
                .map(|i| {
                    let top = 40.0 + i as f32 * 14.0;
                    let span = if i % 10 == 0 {
                        let text = format!("{}.{} Section heading", number, i / 10);
                        Span::new(text, "Helvetica-Bold", 16.0, true)
                    } else {
                        Span::new(BODY, "Helvetica", 11.0, false)
                    };
                    let bbox = BBox::new(72.0, top, 540.0, top + 12.0);
                    Line::from_spans(vec![span.with_bbox(bbox)])
                })
                .collect();
            page.add_block(Block::new(lines));
            page
        })
        .collect()
}

/// Benchmark the profile pass.
fn bench_style_profile(c: &mut Criterion) {
    let pages = create_test_pages(20);

    c.bench_function("style_profile_20_pages", |b| {
        b.iter(|| StyleProfile::from_pages(black_box(&pages)));
    });
}

/// Benchmark full extraction at various sizes.
fn bench_outline_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_extraction");

    for page_count in [1, 10, 100].iter() {
        let pages = create_test_pages(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extract_outline_from_pages(black_box(&pages)));
        });
    }

    group.finish();
}

/// Benchmark the scoring pass alone.
fn bench_candidates(c: &mut Criterion) {
    let pages = create_test_pages(20);
    let extractor = OutlineExtractor::default();
    let profile = extractor.profile(&pages);

    c.bench_function("candidates_20_pages", |b| {
        b.iter(|| extractor.candidates(black_box(&pages), &profile));
    });
}

criterion_group!(
    benches,
    bench_style_profile,
    bench_outline_extraction,
    bench_candidates,
);
criterion_main!(benches);
