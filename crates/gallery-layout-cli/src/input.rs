use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use gallery_layout_core::ImageBox;
use globset::{Glob, GlobSetBuilder};
use serde::Deserialize;
use tracing::{error, warn};
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Images in gallery order, either from a JSON manifest or from files on disk.
pub(crate) fn collect_images(
    input: &Path,
    include: &[String],
    exclude: &[String],
    progress: bool,
) -> anyhow::Result<Vec<ImageBox>> {
    if is_manifest(input) {
        return load_manifest(input);
    }
    let paths = gather_paths(input, include, exclude)?;
    read_sizes_with_progress(&paths, progress)
}

fn is_manifest(p: &Path) -> bool {
    p.is_file()
        && p.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    key: String,
    width: f64,
    height: f64,
}

fn load_manifest(path: &Path) -> anyhow::Result<Vec<ImageBox>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&text)
        .with_context(|| format!("parse manifest {}", path.display()))?;
    let mut seen = HashSet::new();
    let mut list = Vec::with_capacity(entries.len());
    for e in entries {
        if !seen.insert(e.key.clone()) {
            warn!(key = %e.key, "duplicate manifest entry skipped");
            continue;
        }
        list.push(ImageBox::new(e.key, e.width, e.height));
    }
    Ok(list)
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    // Build glob matchers
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        // sorted walk keeps gallery order stable across runs
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif" | "webp")
    )
}

/// Reads natural sizes from image headers; unreadable files are logged and dropped.
fn read_sizes_with_progress(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<ImageBox>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} reading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };

    let read_size = |p: &PathBuf| {
        let res = image::image_dimensions(p);
        if let Some(b) = &bar {
            b.set_message(
                p.file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string(),
            );
            b.inc(1);
        }
        res
    };

    #[cfg(feature = "parallel")]
    let sizes: Vec<_> = paths.par_iter().map(read_size).collect();
    #[cfg(not(feature = "parallel"))]
    let sizes: Vec<_> = paths.iter().map(read_size).collect();

    let mut list = Vec::with_capacity(paths.len());
    for (p, res) in paths.iter().zip(sizes) {
        match res {
            Ok((w, h)) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push(ImageBox::new(key, w as f64, h as f64));
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}
