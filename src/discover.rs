//! Recursive search for FASTQ files and R1..Rn read groups.

use crate::error::NamingError;
use crate::naming::{is_fastq_file, is_fastq_r1_file, rn_fastq};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn walk_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(err) => {
                log::warn!("skipping unreadable entry under {}: {err}", dir.display());
                None
            }
        })
}

pub fn find_r1_fastq_files(dir: &Path) -> Vec<PathBuf> {
    walk_files(dir).filter(|p| is_fastq_r1_file(p)).collect()
}

pub fn find_all_fastq_files<I, P>(dirs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    dirs.into_iter()
        .flat_map(|d| walk_files(d.as_ref()).filter(|p| is_fastq_file(p)).collect::<Vec<_>>())
        .collect()
}

/// Groups of `n` FASTQ files (R1 through Rn) found under `dirs`.
///
/// An R1 file whose siblings are not all present is logged and left out.
pub fn find_grouped_fastq_files<I, P>(dirs: I, n: u32) -> Result<Vec<Vec<PathBuf>>, NamingError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut groups = Vec::new();
    for dir in dirs {
        for r1 in find_r1_fastq_files(dir.as_ref()) {
            let mut group = Vec::with_capacity(n as usize);
            for i in 2..=n {
                group.push(rn_fastq(&r1, i)?);
            }
            group.insert(0, r1);

            if group.iter().all(|p| p.is_file()) {
                log::info!("found group of {n} FASTQ files: {group:?}");
                groups.push(group);
            } else {
                let present: Vec<_> = group.iter().filter(|p| p.is_file()).collect();
                log::warn!("found ungrouped FASTQ file(s): {present:?}");
            }
        }
    }
    Ok(groups)
}
