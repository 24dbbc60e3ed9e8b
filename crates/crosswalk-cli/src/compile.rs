//! Mapping file to stylesheet compilation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use crosswalk_config::{discover_mapping_files, load_mapping};
use crosswalk_xsl::{XslOptions, XslWriter};

use crate::hash::sha256_hex;
use crate::types::{CompileResult, FileSummary};

const OUTPUT_EXTENSION: &str = "xsl";

/// Expand directory arguments into the mapping files they contain.
///
/// Files are kept in argument order; each directory contributes its mapping
/// files sorted by name.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = discover_mapping_files(input)
                .with_context(|| format!("list mappings in {}", input.display()))?;
            if found.is_empty() {
                warn!(dir = %input.display(), "no mapping files found");
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Where the stylesheet for `source` is written.
pub fn output_path(source: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .ok_or_else(|| anyhow!("mapping path {} has no file name", source.display()))?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    Ok(dir.join(name))
}

/// Compile one mapping file.
pub fn compile_file(source: &Path, output_dir: Option<&Path>, dry_run: bool) -> Result<FileSummary> {
    let span = info_span!("compile", file = %source.display());
    let _guard = span.enter();

    let resolved = load_mapping(source)
        .with_context(|| format!("load mapping {}", source.display()))?;
    let mut options = XslOptions::default();
    if let Some(container) = resolved.record_container {
        options = options.with_record_container(container);
    }
    let bytes = XslWriter::new(options)
        .write(&resolved.mappings)
        .with_context(|| format!("generate stylesheet for {}", source.display()))?;
    let sha256 = sha256_hex(&bytes);

    let output = if dry_run {
        None
    } else {
        let path = output_path(source, output_dir)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
        fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), bytes = bytes.len(), "wrote stylesheet");
        Some(path)
    };

    Ok(FileSummary {
        source: source.to_path_buf(),
        output,
        children: resolved.mappings.child_mappings().len(),
        bytes: bytes.len(),
        sha256,
    })
}

/// Compile every input, collecting per-file failures instead of stopping.
///
/// Inputs that map to an output path already claimed by an earlier input
/// are reported as failures and not compiled.
pub fn compile_all(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    dry_run: bool,
) -> Result<CompileResult> {
    let sources = expand_inputs(inputs)?;
    let mut files = Vec::new();
    let mut errors = Vec::new();
    let mut claimed: BTreeMap<PathBuf, &Path> = BTreeMap::new();
    for source in &sources {
        let target = match output_path(source, output_dir) {
            Ok(target) => target,
            Err(error) => {
                errors.push(format!("{error:#}"));
                continue;
            }
        };
        if let Some(owner) = claimed.get(&target) {
            warn!(file = %source.display(), output = %target.display(), "output already claimed");
            errors.push(format!(
                "{} would overwrite {}, already produced from {}",
                source.display(),
                target.display(),
                owner.display()
            ));
            continue;
        }
        claimed.insert(target, source.as_path());
        match compile_file(source, output_dir, dry_run) {
            Ok(summary) => files.push(summary),
            Err(error) => {
                warn!(file = %source.display(), "compilation failed: {error:#}");
                errors.push(format!("{error:#}"));
            }
        }
    }
    info!(
        compiled = files.len(),
        failed = errors.len(),
        dry_run,
        "compilation finished"
    );
    let has_errors = !errors.is_empty();
    Ok(CompileResult {
        files,
        errors,
        dry_run,
        has_errors,
    })
}
