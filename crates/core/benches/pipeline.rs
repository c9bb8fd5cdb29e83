use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use folio_core::{
    Document, NormalizedUrl, ReadabilityConfig, absolutize, extract, extract_readable, extract_structural, normalize,
    render_html, sanitize, strip_presentation,
};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for (name, input) in [
        ("plain", "https://example.com/news/2024/story?id=7"),
        ("bare_host", "example.com/news/2024/story"),
        ("double_encoded", "https%253A%252F%252Fexample.com%252Fstory"),
        ("base64", "aHR0cHM6Ly9leGFtcGxlLmNvbS9uZXdzLzIwMjQvc3Rvcnk="),
    ] {
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| normalize(black_box(input)))
        });
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let article = fixture("article.html");
    let navigation = fixture("navigation.html");
    let base = url::Url::parse("https://riverside.example/news/2024/tram").unwrap();

    let mut group = c.benchmark_group("extraction");

    group.bench_function("readability", |b| {
        let doc = Document::parse(&article);
        let config = ReadabilityConfig::default();
        b.iter(|| extract_readable(black_box(&doc), black_box(&config)))
    });

    group.bench_function("structural", |b| b.iter(|| extract_structural(black_box(&navigation))));

    group.bench_function("strategies", |b| b.iter(|| extract(black_box(&article), black_box(&base))));

    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    let article = fixture("article.html");
    let base = url::Url::parse("https://riverside.example/news/2024/tram").unwrap();
    let fragment = extract(&article, &base).html;
    let absolute = absolutize(&fragment, &base);
    let sanitized = sanitize(&absolute).html;

    c.bench_function("absolutize", |b| b.iter(|| absolutize(black_box(&fragment), black_box(&base))));
    c.bench_function("sanitize", |b| b.iter(|| sanitize(black_box(&absolute))));
    c.bench_function("strip_presentation", |b| b.iter(|| strip_presentation(black_box(&sanitized))));
}

fn bench_full_pipeline(c: &mut Criterion) {
    let html = fixture("article.html");
    let url = NormalizedUrl::parse("https://riverside.example/news/2024/tram").unwrap();

    c.bench_function("render_html", |b| b.iter(|| render_html(black_box(&html), black_box(&url))));
}

criterion_group!(benches, bench_normalize, bench_extraction, bench_cleanup, bench_full_pipeline);
criterion_main!(benches);
