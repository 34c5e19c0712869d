use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use chschema_catalog::{RawPage, RedactedSettings};
use chschema_core::PipelineMetrics;

use super::atomic::write_bytes_atomic;
use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub out: PathBuf,
    pub settings: RedactedSettings,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub tool_version: String,
    pub out: String,
    pub settings: RedactedSettings,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub definitions_path: PathBuf,
    pub schema_path: PathBuf,
    pub logs_path: PathBuf,
    pub metrics_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        out: ctx.out.display().to_string(),
        settings: ctx.settings.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        definitions_path: root.join("definitions.json"),
        schema_path: root.join("schema.txt"),
        metrics_path: root.join("metrics.json"),
        logs_path,
        root,
    })
}

/// Archive the raw catalog pages so the run can be re-rendered offline.
pub fn write_definitions(paths: &RunPaths, pages: &[RawPage]) -> RegistryResult<()> {
    write_json(&paths.definitions_path, pages)
}

pub fn write_report(paths: &RunPaths, report: &str) -> RegistryResult<()> {
    write_bytes_atomic(&paths.schema_path, report.as_bytes())
}

pub fn write_metrics(paths: &RunPaths, metrics: &PipelineMetrics) -> RegistryResult<()> {
    write_json(&paths.metrics_path, metrics)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chschema_catalog::{ApiSettings, redact_settings};

    fn context(run_dir: PathBuf) -> RunContext {
        let settings = ApiSettings {
            url: "https://tenant.stylelabs.cloud/".to_string(),
            client_id: "client".to_string(),
            client_secret: "top-secret".to_string(),
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            include_conditional_members: true,
            timeout_secs: 60,
        };
        RunContext {
            run_id: "test".to_string(),
            started_at: Utc::now(),
            run_dir,
            out: PathBuf::from("CHInheritanceTreeOutput.txt"),
            settings: redact_settings(&settings),
        }
    }

    #[test]
    fn run_config_never_contains_secrets() {
        let run_dir = std::env::temp_dir().join(format!("chschema-runs-{}", uuid::Uuid::new_v4()));
        let paths = start_run(&context(run_dir.clone())).expect("start run");

        let config = std::fs::read_to_string(paths.root.join("config.json")).expect("config");
        assert!(config.contains("\"client_id\": \"client\""));
        assert!(!config.contains("hunter2"));
        assert!(!config.contains("top-secret"));
        assert!(paths.logs_path.exists());

        write_report(&paths, "MAction\n\n").expect("write report");
        assert_eq!(
            std::fs::read_to_string(&paths.schema_path).expect("schema"),
            "MAction\n\n"
        );

        std::fs::remove_dir_all(&run_dir).expect("cleanup");
    }
}
