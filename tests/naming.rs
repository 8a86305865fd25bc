use fastq_utils::NamingError;
use fastq_utils::discover::{find_all_fastq_files, find_grouped_fastq_files, find_r1_fastq_files};
use fastq_utils::naming::{is_fastq, is_fastq_r1, rn_fastq, sample_id_from_r1};
use std::fs;
use std::path::{Path, PathBuf};

// (R1 file name, R4 file name, sample name)
const GROUPED: &[(&str, &str, &str)] = &[
    ("B001A001_1.fastq", "B001A001_4.fastq", "B001A001"),
    ("B001A001_1.fastq.gz", "B001A001_4.fastq.gz", "B001A001"),
    ("B001A001_1.fq", "B001A001_4.fq", "B001A001"),
    ("B001A001_1.fq.gz", "B001A001_4.fq.gz", "B001A001"),
    ("B001A001_R1.fastq", "B001A001_R4.fastq", "B001A001"),
    ("B001A001_R1.fastq.gz", "B001A001_R4.fastq.gz", "B001A001"),
    ("B001A001_R1.fq", "B001A001_R4.fq", "B001A001"),
    ("B001A001_R1.fq.gz", "B001A001_R4.fq.gz", "B001A001"),
    (
        "H4L1-4_S64_L001_R1_001.fastq.gz",
        "H4L1-4_S64_L001_R4_001.fastq.gz",
        "H4L1-4_S64_L001",
    ),
];

const NOT_R1: &[&str] = &["H4L1-4_S64_L001_R2_001.fastq.gz", "B001A001_2.fq.gz"];

fn base() -> PathBuf {
    PathBuf::from("path/to")
}

#[test]
fn r1_names_recognized() {
    for (r1, _, _) in GROUPED {
        assert!(is_fastq_r1(&base().join(r1)), "{r1}");
        assert!(is_fastq(&base().join(r1)), "{r1}");
    }
    for name in NOT_R1 {
        assert!(!is_fastq_r1(&base().join(name)), "{name}");
        assert!(is_fastq(&base().join(name)), "{name}");
    }
    assert!(!is_fastq(Path::new("reads.fastq.txt")));
    assert!(!is_fastq(Path::new("reads.bam")));
}

#[test]
fn sample_id_from_r1_name() {
    for (r1, _, sample) in GROUPED {
        assert_eq!(sample_id_from_r1(&base().join(r1)).unwrap(), *sample);
    }
    for name in NOT_R1 {
        assert!(matches!(
            sample_id_from_r1(&base().join(name)),
            Err(NamingError::NotR1(_))
        ));
    }
}

#[test]
fn rn_fastq_substitutes_read_number() {
    for (r1, r4, _) in GROUPED {
        assert_eq!(rn_fastq(&base().join(r1), 4).unwrap(), base().join(r4));
    }
    for name in NOT_R1 {
        assert!(rn_fastq(&base().join(name), 4).is_err());
    }
}

#[test]
fn discovers_complete_groups_only() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("run1/lane1");
    fs::create_dir_all(&nested).unwrap();
    for name in [
        "S1_R1_001.fastq.gz",
        "S1_R2_001.fastq.gz",
        "S2_R1_001.fastq.gz",
        "notes.txt",
    ] {
        fs::write(nested.join(name), b"").unwrap();
    }
    fs::write(dir.path().join("S3_1.fq"), b"").unwrap();
    fs::write(dir.path().join("S3_2.fq"), b"").unwrap();

    let r1s = find_r1_fastq_files(dir.path());
    assert_eq!(r1s.len(), 3);

    let all = find_all_fastq_files([dir.path()]);
    assert_eq!(all.len(), 5);

    // entries are visited in file-name order, so S3 (top level) precedes run1/
    let groups = find_grouped_fastq_files([dir.path()], 2).unwrap();
    assert_eq!(
        groups,
        vec![
            vec![dir.path().join("S3_1.fq"), dir.path().join("S3_2.fq")],
            vec![
                nested.join("S1_R1_001.fastq.gz"),
                nested.join("S1_R2_001.fastq.gz")
            ],
        ]
    );
}
