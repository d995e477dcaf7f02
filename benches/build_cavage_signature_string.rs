use criterion::{criterion_group, criterion_main, Criterion};
use http::{Method, Request, Uri};
use http_signatures_verify::{cavage::signature_string, HeaderList};
use std::hint::black_box;

fn build_cavage_signature_string(c: &mut Criterion) {
    let header_list: HeaderList = "(request-target) host date content-type digest content-length"
        .parse()
        .unwrap();
    let request = Request::builder()
        .method(Method::GET)
        .uri(Uri::from_static("/foo?param=value&pet=dog"))
        .header("Host", "example.com")
        .header("Date", "Sun, 05 Jan 2014 21:31:40 GMT")
        .header("Content-Type", "application/json")
        .header(
            "Digest",
            "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
        )
        .header("Content-Length", "18")
        .body(())
        .unwrap();

    c.bench_function("build_cavage_signature_string", |b| {
        b.iter(|| signature_string::construct(black_box(&request), black_box(&header_list)));
    });
}

criterion_group!(build_signature_string, build_cavage_signature_string);
criterion_main!(build_signature_string);
