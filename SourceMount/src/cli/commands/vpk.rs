//! CLI commands for VPK archives

use std::path::Path;
use std::time::Instant;

use crate::cli::output::{DISK, LOOKING_GLASS, PACKAGE, format_size, print_done, print_step};
use crate::formats::vpk::{
    self, DIR_ARCHIVE_INDEX, MAX_VERSION, MIN_VERSION, VpkArchive, VpkEntry, VpkWriter,
};

/// List archive contents
pub fn list(source: &Path, detailed: bool, count: bool) -> anyhow::Result<()> {
    let archive = VpkArchive::open(vpk::normalize_index_path(source))?;

    if count {
        println!("{}", archive.len());
        return Ok(());
    }

    if !detailed {
        for entry in archive.entries() {
            println!("{}", entry.path);
        }
        return Ok(());
    }

    println!("{:>10}  {:>8}  {:>7}  PATH", "SIZE", "CRC", "ARCHIVE");
    for entry in archive.entries() {
        let location = if entry.archive_index == DIR_ARCHIVE_INDEX {
            "dir".to_string()
        } else {
            format!("{:03}", entry.archive_index)
        };
        println!(
            "{:>10}  {:08x}  {:>7}  {}",
            format_size(entry.size()),
            entry.crc,
            location,
            entry.path
        );
    }

    let total: u64 = archive.entries().map(VpkEntry::size).sum();
    println!();
    println!(
        "{} files, {} total (VPK v{})",
        archive.len(),
        format_size(total),
        archive.header().version
    );

    Ok(())
}

/// Extract one file from an archive
pub fn extract(source: &Path, file: &str, destination: &Path, verify_crc: bool) -> anyhow::Result<()> {
    let archive = VpkArchive::open(vpk::normalize_index_path(source))?;
    let data = archive.read(file, verify_crc)?;

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(destination, &data)?;

    println!(
        "{DISK}Wrote {} to {}",
        format_size(data.len() as u64),
        destination.display()
    );
    Ok(())
}

/// Pack a directory into a single-file archive
pub fn create(source: &Path, destination: &Path, version: u32) -> anyhow::Result<()> {
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        anyhow::bail!("Unsupported VPK version {version} (expected {MIN_VERSION} or {MAX_VERSION})");
    }
    if !source.is_dir() {
        anyhow::bail!("Source is not a directory: {}", source.display());
    }

    let started = Instant::now();
    let destination = vpk::normalize_index_path(destination);

    print_step(1, 2, &LOOKING_GLASS, &format!("Collecting files from {}...", source.display()));
    let writer = VpkWriter::from_directory(source)?.with_version(version);
    let file_count = writer.len();

    print_step(2, 2, &PACKAGE, &format!("Writing {file_count} files to {}...", destination.display()));
    writer.write(&destination)?;

    print_done(started.elapsed());
    Ok(())
}
