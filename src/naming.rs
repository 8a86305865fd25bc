//! Illumina-style FASTQ file naming: `<sample>_R1_001.fastq.gz`, `<sample>_1.fq`, ...

use crate::error::NamingError;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const FASTQ_EXTENSION: &str = r"(\.(fq|fastq)(\.gz)?)";

static FASTQ_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(.*){FASTQ_EXTENSION}$")).expect("FASTQ pattern is valid")
});

// groups: 1 sample, 2 optional `R`, 3 read number, 4 optional `_<digits>` chunk, 6 extension
static FASTQ_R1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(.*)_(R?)(1)(_(\d+))?{FASTQ_EXTENSION}$"))
        .expect("R1 FASTQ pattern is valid")
});

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Whether the file name looks like FASTQ (`.fq`, `.fastq`, optionally `.gz`).
pub fn is_fastq(path: &Path) -> bool {
    file_name(path).is_some_and(|n| FASTQ_PATTERN.is_match(n))
}

pub fn is_fastq_file(path: &Path) -> bool {
    is_fastq(path) && path.is_file()
}

/// Whether the file name looks like the R1 file of a read group.
pub fn is_fastq_r1(path: &Path) -> bool {
    file_name(path).is_some_and(|n| FASTQ_R1_PATTERN.is_match(n))
}

pub fn is_fastq_r1_file(path: &Path) -> bool {
    is_fastq_r1(path) && path.is_file()
}

/// Sample name of an R1 FASTQ file, e.g. `H4L1-4_S64_L001` for
/// `H4L1-4_S64_L001_R1_001.fastq.gz`.
pub fn sample_id_from_r1(path: &Path) -> Result<String, NamingError> {
    file_name(path)
        .and_then(|n| FASTQ_R1_PATTERN.captures(n))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| NamingError::NotR1(path.to_path_buf()))
}

/// Sibling of an R1 FASTQ file carrying read number `n` instead of 1.
pub fn rn_fastq(path: &Path, n: u32) -> Result<PathBuf, NamingError> {
    let caps = file_name(path)
        .and_then(|name| FASTQ_R1_PATTERN.captures(name))
        .ok_or_else(|| NamingError::NotR1(path.to_path_buf()))?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let new_name = format!("{}_{}{}{}{}", group(1), group(2), n, group(4), group(6));
    Ok(path.with_file_name(new_name))
}
