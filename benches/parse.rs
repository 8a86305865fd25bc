use criterion::{Criterion, criterion_group, criterion_main};
use fastq_utils::{FastqStream, StreamOptions, Validator, zip};
use std::io::BufReader;

fn fixture(n: usize, mate: u8) -> String {
    let mut data = String::new();
    for i in 0..n {
        data.push_str(&format!("@r{i}/{mate}\nACGTACGTACGTACGT\n+\n################\n"));
    }
    data
}

fn bench_parse(c: &mut Criterion) {
    let data = fixture(2000, 1);
    c.bench_function("parse_2000_strict", |b| {
        b.iter(|| {
            let rdr = BufReader::new(std::io::Cursor::new(data.clone()));
            let fq = FastqStream::from_bufread(rdr, StreamOptions::strict());
            let mut n = 0usize;
            for rec in fq {
                let r = rec.unwrap();
                n += r.len();
            }
            n
        })
    });

    let unchecked = StreamOptions {
        validate_alphabet: false,
        ..StreamOptions::strict()
    };
    c.bench_function("parse_2000_no_alphabet_check", |b| {
        b.iter(|| {
            let rdr = BufReader::new(std::io::Cursor::new(data.clone()));
            FastqStream::from_bufread(rdr, unchecked.clone()).count()
        })
    });

    let quality = Validator {
        validate_quality: true,
        ..Validator::default()
    };
    let cand = fastq_utils::RecordCandidate::new(
        1,
        "@r0 desc",
        "ACGTACGTACGTACGT",
        "+",
        "################",
    );
    c.bench_function("validate_candidate", |b| b.iter(|| quality.validate(&cand).is_ok()));
}

fn bench_pairs(c: &mut Criterion) {
    let left = fixture(2000, 1);
    let right = fixture(2000, 2);
    c.bench_function("zip_2000_pairs", |b| {
        b.iter(|| {
            let l = FastqStream::from_bufread(
                BufReader::new(std::io::Cursor::new(left.clone())),
                StreamOptions::strict(),
            );
            let r = FastqStream::from_bufread(
                BufReader::new(std::io::Cursor::new(right.clone())),
                StreamOptions::strict(),
            );
            zip(l, r).filter(Result::is_ok).count()
        })
    });
}

criterion_group!(benches, bench_parse, bench_pairs);
criterion_main!(benches);
