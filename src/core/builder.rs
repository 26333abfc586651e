//! Build orchestration logic
//!
//! Runs each target's build command in order and checks for its artifact
//! afterwards. The run is fail-fast: the first failing or missing build
//! command stops it, and later targets are never started.
//!
//! Process execution and the filesystem check sit behind [`CommandRunner`]
//! and [`ArtifactProbe`] so the decision logic here stays free of I/O.

use std::path::Path;

use crate::core::resolver::{ErrorBuilder, ResolvedTargets, TargetDescriptor};
use crate::error::{BuildError, CommandFailure};

/// Logged when a build command fails, before the error propagates
pub const BUILD_FAILURE_ATTRIBUTION: &str = "\n\nImportant: 'apprig build' is a convenience shortcut for calling your own build command, as provided in the config file.\nFailures in this build command are not the responsibility of apprig. You are responsible for maintaining this command.\n";

/// Runs a shell command to completion
pub trait CommandRunner {
    /// Run `command`, returning once it exits
    fn run(&self, command: &str) -> Result<(), CommandFailure>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &str) -> Result<(), CommandFailure> {
        (**self).run(command)
    }
}

/// Answers whether a build artifact is present
pub trait ArtifactProbe {
    fn exists(&self, path: &Path) -> bool;
}

impl<F: Fn(&Path) -> bool> ArtifactProbe for F {
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Orchestration switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestrationOptions {
    /// Skip targets without a build command instead of failing
    pub silent_on_missing_build_command: bool,
}

/// Outcome of a target that did not abort the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No build command, silent mode on
    Skipped,
    /// Build command exited zero
    Succeeded,
}

/// Result of a single target step
#[derive(Debug)]
pub enum StepResult {
    Skipped,
    Succeeded,
    Error(BuildError),
}

/// Per-target entry in a [`BuildReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub name: String,
    pub outcome: RunOutcome,
    /// The declared artifact was missing after the build step
    pub artifact_warning: bool,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub targets: Vec<TargetReport>,
}

impl BuildReport {
    /// Number of targets whose build command ran and succeeded
    pub fn built(&self) -> usize {
        self.count(RunOutcome::Succeeded)
    }

    /// Number of targets skipped for lack of a build command
    pub fn skipped(&self) -> usize {
        self.count(RunOutcome::Skipped)
    }

    /// Number of artifact warnings emitted
    pub fn artifact_warnings(&self) -> usize {
        self.targets.iter().filter(|t| t.artifact_warning).count()
    }

    fn count(&self, outcome: RunOutcome) -> usize {
        self.targets.iter().filter(|t| t.outcome == outcome).count()
    }
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<R, P> {
    runner: R,
    probe: P,
    options: OrchestrationOptions,
}

impl<R: CommandRunner, P: ArtifactProbe> BuildOrchestrator<R, P> {
    pub fn new(runner: R, probe: P, options: OrchestrationOptions) -> Self {
        Self {
            runner,
            probe,
            options,
        }
    }

    /// Build every resolved target in order, stopping at the first error
    pub fn run(&self, resolved: &ResolvedTargets) -> Result<BuildReport, BuildError> {
        tracing::debug!(
            "Building {} app(s) from configuration '{}' in {}",
            resolved.targets.len(),
            resolved.errors.configuration(),
            resolved.errors.config_path().display()
        );

        let mut report = BuildReport::default();

        for target in &resolved.targets {
            let outcome = match self.step(target, &resolved.errors) {
                StepResult::Skipped => RunOutcome::Skipped,
                StepResult::Succeeded => RunOutcome::Succeeded,
                StepResult::Error(e) => return Err(e),
            };

            let artifact_warning = self.post_check(target);
            report.targets.push(TargetReport {
                name: target.name.clone(),
                outcome,
                artifact_warning,
            });
        }

        Ok(report)
    }

    /// Run the build step of one target
    pub fn step(&self, target: &TargetDescriptor, errors: &ErrorBuilder) -> StepResult {
        let Some(command) = target.build_command.as_deref() else {
            if self.options.silent_on_missing_build_command {
                tracing::debug!("App '{}' has no build command, skipping", target.name);
                return StepResult::Skipped;
            }
            return StepResult::Error(errors.missing_build_command(&target.name));
        };

        tracing::info!("{command}");

        match self.runner.run(command) {
            Ok(()) => StepResult::Succeeded,
            Err(source) => {
                tracing::warn!("{BUILD_FAILURE_ATTRIBUTION}");
                StepResult::Error(BuildError::BuildFailed {
                    target: target.name.clone(),
                    source,
                })
            }
        }
    }

    /// Warn if the target's declared artifact is missing.
    ///
    /// Returns whether a warning was emitted. Never affects the outcome.
    pub fn post_check(&self, target: &TargetDescriptor) -> bool {
        let Some(path) = target.artifact_path.as_deref() else {
            return false;
        };

        if self.probe.exists(path) {
            return false;
        }

        tracing::warn!(
            "\nImportant: after running the build command, apprig could not find app '{}' at the given binary path:\n\t{}\nMake sure it is correct, otherwise you'll get an error on an attempt to install your app.\n",
            target.name,
            path.display()
        );
        true
    }
}
