//! Per-file pipeline: read → extract → render → write.
//!
//! Files are independent. A failure on one file is recorded in its [`Report`]
//! and never stops the rest of the run; only failing to walk the root is fatal.

use crate::discover::discover_sources;
use crate::emit::{header_path, render, write_header};
use crate::error::FsError;
use crate::extract::extract;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration, passed explicitly through every stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory name pruned from the walk at any depth
    pub exclude_dir: String,
    /// Source extension without the dot
    pub source_ext: String,
    /// Header extension without the dot
    pub header_ext: String,
    pub follow_links: bool,
    /// Worker threads; 1 processes files sequentially, 0 uses one per CPU
    pub jobs: usize,
    pub dry_run: bool,
    /// Leave headers whose content would not change untouched
    pub skip_unchanged: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_dir: "external".to_string(),
            source_ext: "c".to_string(),
            header_ext: "h".to_string(),
            follow_links: false,
            jobs: 1,
            dry_run: false,
            skip_unchanged: false,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Generated(PathBuf),
    /// Dry run: the header would have been written
    WouldGenerate(PathBuf),
    /// Existing header already has the rendered content
    Unchanged(PathBuf),
    /// No structs and no functions found
    Skipped,
    Failed(FsError),
}

#[derive(Debug)]
pub struct Report {
    pub source: PathBuf,
    pub outcome: Outcome,
}

/// Discover every source under `root` and process each one.
///
/// Every file is read and rendered first; header aliasing is resolved only among
/// files that would write something, then the writes happen. Reports come back
/// in discovery order regardless of `config.jobs`.
pub fn run(root: &Path, config: &Config) -> Result<Vec<Report>, FsError> {
    let sources = discover_sources(root, config)?;
    info!("found {} source file(s) under {}", sources.len(), root.display());

    let workers = Workers::new(config.jobs);
    let planned = workers.map(sources, |source| {
        let plan = plan_file(&source, config);
        (source, plan)
    });
    let planned = mark_collisions(planned);

    Ok(workers.map(planned, |(source, plan)| Report {
        outcome: finish(plan, config),
        source,
    }))
}

/// Process a single source file and describe what happened to it.
pub fn process_file(source: &Path, config: &Config) -> Outcome {
    finish(plan_file(source, config), config)
}

/// A file either already has its outcome, or has a header ready to write.
enum Plan {
    Done(Outcome),
    Write { header: PathBuf, content: Vec<u8> },
}

fn plan_file(source: &Path, config: &Config) -> Plan {
    let bytes = match fs::read(source) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Plan::Done(Outcome::Failed(FsError::Read {
                path: source.to_path_buf(),
                source: e,
            }))
        }
    };

    let ex = extract(&bytes);
    if ex.is_empty() {
        debug!("nothing to emit for {}", source.display());
        return Plan::Done(Outcome::Skipped);
    }
    debug!(
        "{}: {} struct(s), {} function(s)",
        source.display(),
        ex.structs.len(),
        ex.functions.len()
    );

    let header = header_path(source, &config.header_ext);
    let content = render(&ex);

    if config.skip_unchanged {
        if let Ok(existing) = fs::read(&header) {
            if existing == content {
                return Plan::Done(Outcome::Unchanged(header));
            }
        }
    }

    Plan::Write { header, content }
}

fn finish(plan: Plan, config: &Config) -> Outcome {
    match plan {
        Plan::Done(outcome) => outcome,
        Plan::Write { header, .. } if config.dry_run => Outcome::WouldGenerate(header),
        Plan::Write { header, content } => match write_header(&header, &content) {
            Ok(()) => Outcome::Generated(header),
            Err(e) => Outcome::Failed(e),
        },
    }
}

/// Turn every write whose header an earlier source already owns (once symlinked
/// directories are resolved) into a collision failure.
fn mark_collisions(planned: Vec<(PathBuf, Plan)>) -> Vec<(PathBuf, Plan)> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    planned
        .into_iter()
        .map(|(source, plan)| {
            let (header, content) = match plan {
                Plan::Write { header, content } => (header, content),
                done => return (source, done),
            };
            let key = canonical_header(&header);
            if let Some(first) = owners.get(&key) {
                let err = FsError::HeaderCollision {
                    header,
                    first: first.clone(),
                };
                return (source, Plan::Done(Outcome::Failed(err)));
            }
            owners.insert(key, source.clone());
            (source, Plan::Write { header, content })
        })
        .collect()
}

/// Sequential, or on a rayon pool when more than one job is requested.
struct Workers(Option<rayon::ThreadPool>);

impl Workers {
    fn new(jobs: usize) -> Self {
        if jobs == 1 {
            return Self(None);
        }
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => Self(Some(pool)),
            Err(e) => {
                warn!("failed to start {} workers, running sequentially: {}", jobs, e);
                Self(None)
            }
        }
    }

    /// Order-preserving map over `items`.
    fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        match &self.0 {
            Some(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            None => items.into_iter().map(f).collect(),
        }
    }
}

/// The header file may not exist yet, so only its parent is canonicalized.
fn canonical_header(header: &Path) -> PathBuf {
    let parent = header.parent().filter(|p| !p.as_os_str().is_empty());
    match (parent.map(fs::canonicalize), header.file_name()) {
        (Some(Ok(dir)), Some(name)) => dir.join(name),
        _ => header.to_path_buf(),
    }
}
