//! Build command implementation
//!
//! Implements `apprig build`: resolve the selected configuration's apps, run
//! each app's build command, then check each app's binary path.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::output::summary_line;
use crate::core::builder::{
    ArtifactProbe, BuildOrchestrator, BuildReport, CommandRunner, OrchestrationOptions,
};
use crate::core::resolver::{FileTargetResolver, ResolveOptions, TargetResolver};
use crate::error::ApprigError;
use crate::infra::filesystem::FsProbe;
use crate::infra::process::ShellRunner;

/// Build options
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Configuration to build
    pub configuration: Option<String>,
    /// Skip apps without a build command instead of failing
    pub silent: bool,
}

/// Execute the build command
pub fn execute(project_dir: &Path, options: BuildOptions, quiet: bool) -> Result<()> {
    let report = run_build(
        &FileTargetResolver,
        ShellRunner::new(),
        FsProbe,
        project_dir,
        options,
    )?;

    if !quiet {
        println!("{}", summary_line(&report));
    }

    Ok(())
}

/// Resolve targets with `resolver` and build them
pub fn run_build<T, R, P>(
    resolver: &T,
    runner: R,
    probe: P,
    project_dir: &Path,
    options: BuildOptions,
) -> Result<BuildReport, ApprigError>
where
    T: TargetResolver + ?Sized,
    R: CommandRunner,
    P: ArtifactProbe,
{
    let resolved = resolver.resolve(&ResolveOptions {
        config_path: options.config_path,
        configuration: options.configuration,
        cwd: project_dir.to_path_buf(),
    })?;

    let orchestrator = BuildOrchestrator::new(
        runner,
        probe,
        OrchestrationOptions {
            silent_on_missing_build_command: options.silent,
        },
    );

    Ok(orchestrator.run(&resolved)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::RunOutcome;
    use crate::core::resolver::{ErrorBuilder, ResolvedTargets, TargetDescriptor};
    use crate::error::{BuildError, CommandFailure, ConfigError};
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Hands back a fixed target list and remembers what it was asked for
    struct StaticResolver {
        targets: Vec<TargetDescriptor>,
        seen: RefCell<Option<ResolveOptions>>,
    }

    impl StaticResolver {
        fn new(targets: Vec<TargetDescriptor>) -> Self {
            Self {
                targets,
                seen: RefCell::new(None),
            }
        }
    }

    impl TargetResolver for StaticResolver {
        fn resolve(&self, options: &ResolveOptions) -> Result<ResolvedTargets, ConfigError> {
            *self.seen.borrow_mut() = Some(options.clone());
            Ok(ResolvedTargets {
                targets: self.targets.clone(),
                errors: ErrorBuilder::new("apprig.toml", "test"),
            })
        }
    }

    struct FailingResolver;

    impl TargetResolver for FailingResolver {
        fn resolve(&self, options: &ResolveOptions) -> Result<ResolvedTargets, ConfigError> {
            Err(ConfigError::NotFound {
                dir: options.cwd.clone(),
            })
        }
    }

    /// Succeeds on `exit 0` and `echo ok`, fails everything else
    #[derive(Default)]
    struct ScriptedRunner {
        calls: RefCell<Vec<String>>,
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, command: &str) -> Result<(), CommandFailure> {
            self.calls.borrow_mut().push(command.to_string());
            match command {
                "exit 0" | "echo ok" => Ok(()),
                _ => Err(CommandFailure::Exit {
                    command: command.to_string(),
                    code: 1,
                }),
            }
        }
    }

    fn absent(_: &Path) -> bool {
        false
    }

    fn silent(silent: bool) -> BuildOptions {
        BuildOptions {
            silent,
            ..BuildOptions::default()
        }
    }

    #[test]
    fn test_scenario_a_missing_artifact_only_warns() {
        let resolver = StaticResolver::new(vec![TargetDescriptor::new("ios")
            .with_build_command("echo ok")
            .with_artifact_path("/tmp/app.ipa")]);
        let runner = ScriptedRunner::default();

        let report =
            run_build(&resolver, &runner, absent, Path::new("."), silent(false)).unwrap();

        assert_eq!(report.built(), 1);
        assert_eq!(report.artifact_warnings(), 1);
        assert!(report.targets[0].artifact_warning);
    }

    #[test]
    fn test_scenario_b_failing_command() {
        let resolver =
            StaticResolver::new(vec![TargetDescriptor::new("ios").with_build_command("exit 1")]);
        let runner = ScriptedRunner::default();

        let result = run_build(&resolver, &runner, absent, Path::new("."), silent(false));

        assert!(matches!(
            result,
            Err(ApprigError::Build(BuildError::BuildFailed { .. }))
        ));
    }

    #[test]
    fn test_scenario_c_missing_command_not_silent() {
        let resolver = StaticResolver::new(vec![
            TargetDescriptor::new("a"),
            TargetDescriptor::new("b").with_build_command("exit 0"),
        ]);
        let runner = ScriptedRunner::default();

        let result = run_build(&resolver, &runner, absent, Path::new("."), silent(false));

        assert!(matches!(
            result,
            Err(ApprigError::Build(BuildError::MissingBuildCommand { ref target, .. })) if target == "a"
        ));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_scenario_d_missing_command_silent() {
        let resolver = StaticResolver::new(vec![
            TargetDescriptor::new("a"),
            TargetDescriptor::new("b").with_build_command("exit 0"),
        ]);
        let runner = ScriptedRunner::default();

        let report =
            run_build(&resolver, &runner, absent, Path::new("."), silent(true)).unwrap();

        assert_eq!(*runner.calls.borrow(), vec!["exit 0".to_string()]);
        assert_eq!(report.targets[0].outcome, RunOutcome::Skipped);
        assert_eq!(report.targets[1].outcome, RunOutcome::Succeeded);
    }

    #[test]
    fn test_options_passed_to_resolver() {
        let resolver = StaticResolver::new(Vec::new());
        let options = BuildOptions {
            config_path: Some(PathBuf::from("e2e/apprig.toml")),
            configuration: Some("ios.sim".to_string()),
            silent: false,
        };

        run_build(&resolver, ShellRunner::new(), FsProbe, Path::new("/work"), options).unwrap();

        let seen = resolver.seen.borrow().clone().unwrap();
        assert_eq!(seen.config_path, Some(PathBuf::from("e2e/apprig.toml")));
        assert_eq!(seen.configuration.as_deref(), Some("ios.sim"));
        assert_eq!(seen.cwd, PathBuf::from("/work"));
    }

    #[test]
    fn test_resolver_error_spawns_nothing() {
        let runner = ScriptedRunner::default();

        let result = run_build(&FailingResolver, &runner, absent, Path::new("."), silent(true));

        assert!(matches!(
            result,
            Err(ApprigError::Config(ConfigError::NotFound { .. }))
        ));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_file_resolver_end_to_end() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("apprig.toml"),
            r#"
[apps.web]
build = "echo ok"

[apps.docs]

[configurations.site]
apps = ["docs", "web"]
"#,
        )
        .unwrap();
        let runner = ScriptedRunner::default();

        let report =
            run_build(&FileTargetResolver, &runner, absent, dir.path(), silent(true)).unwrap();

        assert_eq!(*runner.calls.borrow(), vec!["echo ok".to_string()]);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.built(), 1);
    }
}
