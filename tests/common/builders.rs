//! Test data builders for creating input files and configs

use numclass_rs::PipelineConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Builder for a scratch workspace holding an input file and an output dir
pub struct WorkspaceBuilder {
    lines: Vec<String>,
    capacity: usize,
    shutdown_timeout: Option<Duration>,
    write_summary: bool,
}

/// A built workspace; files live as long as this value.
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: PipelineConfig,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            capacity: 50,
            shutdown_timeout: None,
            write_summary: false,
        }
    }

    /// One integer per line
    pub fn items(mut self, items: impl IntoIterator<Item = i64>) -> Self {
        self.lines.extend(items.into_iter().map(|i| i.to_string()));
        self
    }

    /// A raw input line, e.g. a malformed token
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = Some(timeout);
        self
    }

    pub fn write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    pub fn build(self) -> Workspace {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join("input.txt");
        let output = dir.path().join("out");

        let mut file = std::fs::File::create(&input).expect("create input");
        for line in &self.lines {
            writeln!(file, "{}", line).expect("write input");
        }

        let mut config = PipelineConfig::default()
            .with_capacity(self.capacity)
            .with_output_dir(&output);
        config.write_summary = self.write_summary;
        if let Some(timeout) = self.shutdown_timeout {
            config = config.with_shutdown_timeout(timeout);
        }

        Workspace {
            dir,
            input,
            output,
            config,
        }
    }
}

impl Workspace {
    /// Write the config as TOML and return its path
    pub fn write_config(&self) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        self.config.save(&path).expect("save config");
        path
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_builder() {
        let ws = WorkspaceBuilder::new().items([1, 2]).line("x").capacity(3).build();

        assert_eq!(std::fs::read_to_string(&ws.input).unwrap(), "1\n2\nx\n");
        assert_eq!(ws.config.capacity, 3);
        assert_eq!(ws.config.output_dir, ws.output);
    }
}
