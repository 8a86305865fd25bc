#[cfg(feature = "async")]
mod t {
    use fastq_utils::{AsyncFastqStream, FastqDefect, StreamOptions};
    use tempfile::tempdir;
    use tokio::fs::File;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn async_parse_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.fastq");
        {
            let mut f = File::create(&path).await.unwrap();
            f.write_all(b"@id\nACGT\n+\n!!!!\n").await.unwrap();
        }
        let mut fq = AsyncFastqStream::from_path(&path, StreamOptions::strict())
            .await
            .unwrap();

        if let Some(Ok(rec)) = fq.next_record().await {
            assert_eq!(rec.read_id(), "id");
            assert_eq!(rec.sequence(), b"ACGT");
            assert_eq!(rec.quality(), b"!!!!");
        } else {
            panic!("no record");
        }
        assert!(fq.next_record().await.is_none());
        assert_eq!(fq.stats().records_yielded, 1);
    }

    #[tokio::test]
    async fn async_reads_every_gzip_member() {
        use std::io::Write;

        let dir = tempdir().unwrap();
        let path = dir.path().join("members.fastq.gz");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            for rec in ["@m1\nACGT\n+\nIIII\n", "@m2\nGG\n+\n##\n"] {
                let mut enc =
                    flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
                enc.write_all(rec.as_bytes()).unwrap();
                f.write_all(&enc.finish().unwrap()).unwrap();
            }
        }

        let mut fq = AsyncFastqStream::from_path(&path, StreamOptions::strict())
            .await
            .unwrap();
        let mut ids = Vec::new();
        while let Some(rec) = fq.next_record().await {
            ids.push(rec.unwrap().read_id().to_string());
        }
        assert_eq!(ids, ["m1", "m2"]);
    }

    #[tokio::test]
    async fn async_tolerant_reports_truncation() {
        let data: &'static [u8] = b"@a\nAC\n+\nI\n@b\nAC\n+\nII\n@c\nAC\n";
        let mut fq = AsyncFastqStream::from_async_bufread(data, StreamOptions::tolerant());

        let first = fq.next_record().await.unwrap().unwrap_err();
        assert_eq!(first.line(), 1);
        assert_eq!(fq.next_record().await.unwrap().unwrap().read_id(), "b");
        let last = fq.next_record().await.unwrap().unwrap_err();
        assert_eq!(
            last.defect(),
            Some(&FastqDefect::TruncatedRecord {
                line: 9,
                lines_present: 2
            })
        );
        assert!(fq.next_record().await.is_none());
        assert!(fq.is_finished());
    }

    #[tokio::test]
    async fn async_strict_stops_on_first_defect() {
        let data: &'static [u8] = b"@a\nAX\n+\nII\n@b\nAC\n+\nII\n";
        let mut fq = AsyncFastqStream::from_async_bufread(data, StreamOptions::strict());
        let err = fq.next_record().await.unwrap().unwrap_err();
        assert!(matches!(
            err.defect(),
            Some(FastqDefect::InvalidAlphabet { position: 1, .. })
        ));
        assert!(fq.next_record().await.is_none());
    }
}
