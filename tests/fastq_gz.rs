use fastq_utils::{FastqRecord, FastqStream, FastqWriter, StreamOptions, WriterOptions};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

#[cfg(feature = "gzip")]
#[test]
fn parse_gz_file_single_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.fastq.gz");
    {
        let f = File::create(&path).unwrap();
        let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::fast());
        writeln!(enc, "@x").unwrap();
        writeln!(enc, "ACGT").unwrap();
        writeln!(enc, "+").unwrap();
        writeln!(enc, "!!!!").unwrap();
        enc.finish().unwrap();
    }

    let mut fq = FastqStream::from_path(&path, StreamOptions::strict()).expect("open gz");

    let rec = fq.next().unwrap().unwrap();
    assert_eq!(rec.read_id(), "x");
    assert_eq!(rec.sequence(), b"ACGT");
    assert_eq!(rec.quality(), b"!!!!");
    assert!(fq.next().is_none());
}

#[cfg(feature = "gzip")]
#[test]
fn gz_detected_by_magic_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_extension.fq");
    {
        let f = File::create(&path).unwrap();
        let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::fast());
        enc.write_all(b"@y\nAC\n+\nII\n").unwrap();
        enc.finish().unwrap();
    }

    let recs: Vec<_> = FastqStream::from_path(&path, StreamOptions::strict())
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].read_id(), "y");
}

#[cfg(feature = "gzip")]
#[test]
fn writer_gz_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.fastq.gz");
    let recs = vec![
        FastqRecord::new("a/1", Some("lane 1".to_string()), "ACGT", "IIII").unwrap(),
        FastqRecord::new("b/1", None, "GG", "##").unwrap(),
    ];
    let mut w = FastqWriter::create(&path, WriterOptions::default()).unwrap();
    for rec in &recs {
        w.write_record(rec).unwrap();
    }
    w.close().unwrap();

    let parsed: Vec<_> = FastqStream::from_path(&path, StreamOptions::strict())
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(parsed, recs);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = FastqStream::from_path(dir.path().join("nope.fastq"), StreamOptions::strict())
        .err()
        .unwrap();
    assert!(matches!(err, fastq_utils::FastqError::Io { .. }));
}
