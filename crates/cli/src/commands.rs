//! Command execution against a JSON state file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use ummlink_core::config::Config;
use ummlink_core::context::{ExtensionContext, register_umm};
use ummlink_core::installer::{INSTALLER_ID, InstallResult, Installer, Instruction};
use ummlink_core::modtype::{MOD_TYPE_ID, ModType};
use ummlink_core::store::{ConfigStore, JsonFileStore};
use ummlink_core::tools::Reconciliation;
use ummlink_probe::{
    ExternalInstallProbe, ProbeOutcome, ProbeUnavailable, RealFileSystem, RegQueryRegistry,
    RegistryAccessor,
};

use crate::cli::{CliError, Commands, OkEnvelope};

/// Everything a command needs: settings, the state file and the registered
/// installer and mod type.
pub struct Session {
    config: Config,
    store: Arc<JsonFileStore>,
    context: ExtensionContext,
    accessor: Arc<dyn RegistryAccessor>,
}

impl Session {
    /// Load settings, open the state file and register the integration.
    ///
    /// Install roots from the settings are written to the state file for
    /// targets that have none yet.
    pub fn open(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = Config::discover(config_path)?;
        let store = Arc::new(JsonFileStore::new(config.state_file()?));
        debug!(state_file = %store.path().display(), "Opened state file");

        for (target_id, dir) in &config.install_paths {
            if store.install_path(target_id)?.is_none() {
                info!(target_id, dir = %dir.display(), "Seeding install path from settings");
                store.set_install_path(target_id, dir.clone())?;
            }
        }

        let mut context = ExtensionContext::new();
        register_umm(&mut context, store.clone());

        Ok(Self {
            config,
            store,
            context,
            accessor: Arc::new(RegQueryRegistry::new()),
        })
    }

    /// Read the install record from `accessor` instead of the OS registry.
    #[must_use]
    pub fn with_accessor(mut self, accessor: Arc<dyn RegistryAccessor>) -> Self {
        self.accessor = accessor;
        self
    }

    fn installer(&self) -> Result<&Arc<dyn Installer>, CliError> {
        self.context
            .installer(INSTALLER_ID)
            .ok_or_else(|| CliError::runtime(format!("Installer '{INSTALLER_ID}' is not registered")))
    }

    fn mod_type(&self) -> Result<&Arc<dyn ModType>, CliError> {
        self.context
            .mod_type(MOD_TYPE_ID)
            .ok_or_else(|| CliError::runtime(format!("Mod type '{MOD_TYPE_ID}' is not registered")))
    }

    /// Run `command` and return its pretty-printed JSON output.
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        let data = match command {
            Commands::Test { target, paths } => to_value(self.installer()?.test(paths, target))?,
            Commands::Install {
                target,
                destination,
                paths,
            } => to_value(self.installer()?.install(paths, destination, target)?)?,
            Commands::Classify { instructions } => self.classify(instructions)?,
            Commands::Probe { target } => self.probe(target)?,
            Commands::Tools { target } => {
                to_value(self.store.tools(target)?.unwrap_or_default())?
            }
            Commands::SetInstallPath { target, dir } => {
                self.store.set_install_path(target, dir.clone())?;
                serde_json::json!({ "target": target, "installPath": dir })
            }
        };

        serde_json::to_string_pretty(&OkEnvelope::new(data))
            .map_err(|e| CliError::runtime(format!("Failed to serialize output: {e}")))
    }

    fn classify(&self, file: &Path) -> Result<serde_json::Value, CliError> {
        let content = std::fs::read_to_string(file).map_err(|e| {
            CliError::config(format!("Failed to read {}: {e}", file.display()))
        })?;
        let instructions = match serde_json::from_str::<InstructionsFile>(&content)
            .map_err(|e| CliError::config(format!("Invalid instructions file: {e}")))?
        {
            InstructionsFile::List(list) => list,
            InstructionsFile::Result(result) => result.instructions,
        };

        let mod_type = self.mod_type()?;
        Ok(serde_json::json!({
            "modType": mod_type.id(),
            "matches": mod_type.classify(&instructions),
        }))
    }

    fn probe(&self, target_id: &str) -> Result<serde_json::Value, CliError> {
        let probe = ExternalInstallProbe::new(
            self.store.clone(),
            self.accessor.clone(),
            Arc::new(RealFileSystem),
        )
        .with_location(self.config.registry.clone());

        to_value(ProbeReport::new(target_id, probe.probe(target_id)?))
    }
}

/// Accepted layouts of a `classify` input file.
#[derive(Deserialize)]
#[serde(untagged)]
enum InstructionsFile {
    List(Vec<Instruction>),
    Result(InstallResult),
}

/// JSON form of a probe outcome.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ProbeReport {
    target: String,
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ProbeReport {
    fn new(target_id: &str, outcome: ProbeOutcome) -> Self {
        let mut report = Self {
            target: target_id.to_string(),
            action: "none",
            directory: None,
            tool_id: None,
            reason: None,
        };

        match outcome {
            ProbeOutcome::Reconciled {
                directory,
                reconciliation,
            } => {
                report.action = match reconciliation {
                    Reconciliation::Created { .. } => "created",
                    Reconciliation::Updated { .. } => "updated",
                    Reconciliation::Unchanged { .. } => "unchanged",
                };
                report.tool_id = Some(reconciliation.tool_id().to_string());
                report.directory = Some(directory);
            }
            ProbeOutcome::Unavailable(reason) => {
                report.reason = Some(match reason {
                    ProbeUnavailable::UnsupportedTarget => "unsupported target".to_string(),
                    ProbeUnavailable::RegistryValueMissing => {
                        "no install recorded in the registry".to_string()
                    }
                    ProbeUnavailable::AnchorMissing { path } => {
                        format!("{} does not exist", path.display())
                    }
                });
            }
        }

        report
    }
}

fn to_value(value: impl Serialize) -> Result<serde_json::Value, CliError> {
    serde_json::to_value(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use ummlink_core::config::{REGISTRY_HIVE, REGISTRY_KEY, REGISTRY_VALUE};
    use ummlink_probe::MemoryRegistry;

    fn session(temp: &TempDir, settings: &str) -> Session {
        let config = temp.path().join("config.toml");
        let state = temp.path().join("state.json");
        std::fs::write(
            &config,
            format!("stateFile = {:?}\n{settings}", state.to_string_lossy()),
        )
        .unwrap();
        Session::open(Some(&config)).unwrap()
    }

    fn data(output: &str) -> serde_json::Value {
        let value: serde_json::Value = serde_json::from_str(output).unwrap();
        assert_eq!(value["status"], "ok");
        value["data"].clone()
    }

    #[test]
    fn test_settings_seed_install_paths() {
        let temp = TempDir::new().unwrap();
        let session = session(
            &temp,
            "[installPaths]\ndawnofman = \"/games/mods/dawnofman\"\n",
        );

        assert_eq!(
            session.store.install_path("dawnofman").unwrap(),
            Some(PathBuf::from("/games/mods/dawnofman"))
        );
    }

    #[test]
    fn test_install_then_list_tools() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, "");

        session
            .execute(&Commands::SetInstallPath {
                target: "dawnofman".into(),
                dir: PathBuf::from("/games/mods"),
            })
            .unwrap();

        let paths = vec![
            "UMM/UnityModManager.exe".to_string(),
            "UMM/lib/harmony.dll".to_string(),
        ];
        let support = data(
            &session
                .execute(&Commands::Test {
                    target: "dawnofman".into(),
                    paths: paths.clone(),
                })
                .unwrap(),
        );
        assert_eq!(support["supported"], true);

        let plan = data(
            &session
                .execute(&Commands::Install {
                    target: "dawnofman".into(),
                    destination: PathBuf::from("/staging/UMM-0.25.installing"),
                    paths,
                })
                .unwrap(),
        );
        assert_eq!(plan["instructions"][1]["destination"], "lib/harmony.dll");

        let tools = data(
            &session
                .execute(&Commands::Tools {
                    target: "dawnofman".into(),
                })
                .unwrap(),
        );
        assert_eq!(tools["UnityModManager"]["workingDirectory"], "/games/mods/UMM-0.25");
    }

    #[test]
    fn test_install_without_root_is_config_error() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, "");

        let err = session
            .execute(&Commands::Install {
                target: "gardenpaws".into(),
                destination: PathBuf::from("/staging/x.installing"),
                paths: vec!["UnityModManager.exe".into()],
            })
            .unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_classify_accepts_both_layouts() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, "");

        let list = temp.path().join("list.json");
        std::fs::write(
            &list,
            r#"[{"type": "copy", "source": "a/UnityModManager.exe", "destination": "UnityModManager.exe"}]"#,
        )
        .unwrap();
        let result = data(
            &session
                .execute(&Commands::Classify { instructions: list })
                .unwrap(),
        );
        assert_eq!(result["modType"], "umm");
        assert_eq!(result["matches"], true);

        let wrapped = temp.path().join("result.json");
        std::fs::write(
            &wrapped,
            r#"{"instructions": [{"type": "copy", "source": "a/readme.txt", "destination": "readme.txt"}]}"#,
        )
        .unwrap();
        let result = data(
            &session
                .execute(&Commands::Classify {
                    instructions: wrapped,
                })
                .unwrap(),
        );
        assert_eq!(result["matches"], false);
    }

    #[test]
    fn test_probe_reports_created_record() {
        let temp = TempDir::new().unwrap();
        let umm_dir = temp.path().join("umm");
        std::fs::create_dir_all(&umm_dir).unwrap();
        std::fs::write(umm_dir.join("UnityModManager.exe"), b"").unwrap();

        let registry = MemoryRegistry::new().with_value(
            REGISTRY_HIVE,
            REGISTRY_KEY,
            REGISTRY_VALUE,
            umm_dir.to_string_lossy(),
        );
        let session = session(&temp, "").with_accessor(Arc::new(registry));

        let report = data(
            &session
                .execute(&Commands::Probe {
                    target: "dawnofman".into(),
                })
                .unwrap(),
        );
        assert_eq!(report["action"], "created");
        assert_eq!(report["toolId"], "UnityModManager");

        let report = data(
            &session
                .execute(&Commands::Probe {
                    target: "dawnofman".into(),
                })
                .unwrap(),
        );
        assert_eq!(report["action"], "unchanged");
    }

    #[test]
    fn test_probe_report_for_unavailable() {
        let report = ProbeReport::new(
            "skyrim",
            ProbeOutcome::Unavailable(ProbeUnavailable::UnsupportedTarget),
        );
        assert_eq!(report.action, "none");
        assert_eq!(report.reason.as_deref(), Some("unsupported target"));
        assert!(report.tool_id.is_none());
    }
}
