//! Locating and running Graphviz layout engines.
//!
//! A layout engine is an executable named after its algorithm (`dot`,
//! `neato`, ...) inside an installation's `bin` directory. The directory comes
//! from an explicit hint, then the `GRAPHVIZ_BIN` environment variable, then a
//! scan of the program-files roots (Windows only, by default). Successful
//! lookups are memoized for the lifetime of the [`Graphviz`] instance.

use crate::error::RenderError;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Environment variable naming the installation's `bin` directory.
pub const GRAPHVIZ_BIN_ENV: &str = "GRAPHVIZ_BIN";

const WINDOWS_PROGRAM_FILES: [&str; 2] = ["C:\\Program Files\\", "C:\\Program Files (x86)\\"];

lazy_static! {
    static ref LINE_NUMBER: Regex = Regex::new(r"line (\d+)").expect("line number pattern is valid");
}

/// A handle on the local Graphviz installation.
#[derive(Debug)]
pub struct Graphviz {
    env_var: String,
    /// Roots scanned for `graphviz*/bin` when no directory is given.
    program_files: Vec<PathBuf>,
    bins: Mutex<HashMap<Option<PathBuf>, Vec<PathBuf>>>,
    algorithms: Mutex<HashMap<(Option<PathBuf>, String), PathBuf>>,
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphviz {
    pub fn new() -> Self {
        let program_files = if cfg!(windows) {
            WINDOWS_PROGRAM_FILES.iter().map(PathBuf::from).collect()
        } else {
            Vec::new()
        };
        Self {
            env_var: GRAPHVIZ_BIN_ENV.to_string(),
            program_files,
            bins: Mutex::new(HashMap::new()),
            algorithms: Mutex::new(HashMap::new()),
        }
    }

    /// Read the installation directory from `name` instead of `GRAPHVIZ_BIN`.
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Scan `roots` for installations when no directory is given.
    pub fn with_program_files(mut self, roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.program_files = roots.into_iter().map(Into::into).collect();
        self
    }

    /// The candidate `bin` directories for `hint`.
    pub fn bin_dirs(&self, hint: Option<&Path>) -> Result<Vec<PathBuf>, RenderError> {
        let key = hint.map(Path::to_path_buf);
        if let Some(bins) = self.bins.lock().get(&key) {
            debug!(?hint, "using cached Graphviz bin directories");
            return Ok(bins.clone());
        }

        let bins = self.resolve_bin_dirs(hint)?;
        debug!(?hint, ?bins, "resolved Graphviz bin directories");
        self.bins.lock().insert(key, bins.clone());
        Ok(bins)
    }

    fn resolve_bin_dirs(&self, hint: Option<&Path>) -> Result<Vec<PathBuf>, RenderError> {
        if let Some(dir) = hint.filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.is_dir() {
                return Err(RenderError::InstallationNotFound(format!(
                    "No GraphViz installation was found at the location specified \
                     by the graphviz_bin parameter: {}",
                    dir.display()
                )));
            }
            return Ok(vec![dir.to_path_buf()]);
        }

        if let Some(dir) = std::env::var_os(&self.env_var).filter(|dir| !dir.is_empty()) {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return Err(RenderError::InstallationNotFound(format!(
                    "No GraphViz installation was found at the location specified \
                     by the {} environment variable: {}",
                    self.env_var,
                    dir.display()
                )));
            }
            return Ok(vec![dir]);
        }

        if self.program_files.is_empty() {
            return Err(RenderError::InstallationNotFound(format!(
                "No GraphViz installation was specified. \
                 Use either the graphviz_bin parameter or the {} environment variable.",
                self.env_var
            )));
        }

        let bins = self.scan_program_files();
        if bins.is_empty() {
            return Err(RenderError::InstallationNotFound(
                "No GraphViz installation was found at any of the standard Windows locations.".to_string(),
            ));
        }
        Ok(bins)
    }

    fn scan_program_files(&self) -> Vec<PathBuf> {
        let mut bins = Vec::new();
        for root in self.program_files.iter().filter(|root| root.is_dir()) {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            let mut found: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .filter(|entry| {
                    entry
                        .file_name()
                        .to_string_lossy()
                        .to_lowercase()
                        .starts_with("graphviz")
                })
                .map(|entry| entry.path().join("bin"))
                .filter(|bin| bin.is_dir())
                .collect();
            found.sort();
            bins.extend(found);
        }
        bins
    }

    /// The executable for `algorithm`, searched across the `bin` directories
    /// for `hint`.
    pub fn algorithm_path(&self, hint: Option<&Path>, algorithm: &str) -> Result<PathBuf, RenderError> {
        if algorithm.is_empty() || algorithm == "." || algorithm == ".." || algorithm.contains(['/', '\\']) {
            return Err(RenderError::Validation(format!(
                "Algorithm must be a bare executable name, got {algorithm:?}"
            )));
        }
        let key = (hint.map(Path::to_path_buf), algorithm.to_string());
        if let Some(path) = self.algorithms.lock().get(&key) {
            return Ok(path.clone());
        }

        let bins = self.bin_dirs(hint)?;
        let found = bins.iter().find_map(|bin| {
            [algorithm.to_string(), format!("{algorithm}.exe")]
                .into_iter()
                .map(|name| bin.join(name))
                .find(|path| path.is_file())
        });
        let Some(path) = found else {
            let tried: Vec<String> = bins.iter().map(|bin| bin.display().to_string()).collect();
            return Err(RenderError::AlgorithmNotFound(format!(
                "No GraphViz algorithm named {} was found in the GraphViz installation: {}",
                algorithm,
                tried.join(" OR ")
            )));
        };

        debug!(algorithm, path = %path.display(), "resolved Graphviz algorithm");
        self.algorithms.lock().insert(key, path.clone());
        Ok(path)
    }

    /// Lay out `text` with `algorithm` and return the engine's output in
    /// `format`.
    pub fn run(&self, text: &str, algorithm: &str, format: &str, hint: Option<&Path>) -> Result<Vec<u8>, RenderError> {
        let program = self.algorithm_path(hint, algorithm)?;
        debug!(program = %program.display(), format, bytes = text.len(), "running layout engine");

        let mut child = Command::new(&program)
            .arg(format!("-T{format}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RenderError::io(&program))?;

        // The engine may exit before reading all input; write on the side so
        // a full output pipe cannot deadlock us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.as_bytes().to_vec();
            thread::spawn(move || match stdin.write_all(&input) {
                Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(err),
                _ => Ok(()),
            })
        });

        let output = child.wait_with_output().map_err(RenderError::io(&program))?;
        let written = match writer.map(|handle| handle.join()) {
            Some(Ok(result)) => result,
            _ => Ok(()),
        };

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr);
            debug!(status = ?output.status, "layout engine failed");
            return Err(RenderError::Rendering(annotate_error(&message, text)));
        }
        written.map_err(RenderError::io(&program))?;
        Ok(output.stdout)
    }
}

/// Append the input lines around every `line N` mentioned in `message`.
///
/// Reported lines are marked with `>>>` and shown with two lines of context
/// on either side. Messages without line numbers are returned unchanged.
///
/// ```
/// use gvstyle_render::annotate_error;
///
/// let message = annotate_error("syntax error in line 2", "a\nb\nc");
/// assert_eq!(message, "syntax error in line 2\n   Line |\n      1 | a\n>>>   2 | b\n      3 | c");
/// ```
pub fn annotate_error(message: &str, source: &str) -> String {
    let reported: HashSet<usize> = LINE_NUMBER
        .captures_iter(message)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();
    if reported.is_empty() {
        return message.to_string();
    }
    let context: HashSet<usize> = reported
        .iter()
        .flat_map(|&n| n.saturating_sub(2)..=n.saturating_add(2))
        .collect();

    let mut lines = vec![message.to_string(), "   Line |".to_string()];
    for (i, line) in source.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        if context.contains(&i) {
            let marker = if reported.contains(&i) { ">>>" } else { "   " };
            lines.push(format!("{marker}{i:>4} | {line}"));
        }
    }
    lines.join("\n")
}
