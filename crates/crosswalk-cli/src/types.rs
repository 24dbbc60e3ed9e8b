use std::path::PathBuf;

#[derive(Debug)]
pub struct CompileResult {
    pub files: Vec<FileSummary>,
    pub errors: Vec<String>,
    pub dry_run: bool,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct FileSummary {
    pub source: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub children: usize,
    pub bytes: usize,
    pub sha256: String,
}
