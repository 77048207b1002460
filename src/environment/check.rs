//! One-shot environment check.

use crate::error::Result;
use crate::shell::CommandRunner;
use crate::ui::{Reporter, Tone};

use super::factory::DetectorFactory;
use super::host::HostEnv;
use super::requirement::{Requirement, RequirementResult};

/// Produces the platform label and requirement list to evaluate.
pub type RequirementSource = Box<dyn Fn() -> Result<(String, Vec<Requirement>)>>;

/// Results of a completed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub platform: String,
    pub results: Vec<RequirementResult>,
}

impl EnvironmentReport {
    /// True when every requirement resolved to met.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Requirements that resolved to not met.
    pub fn failures(&self) -> impl Iterator<Item = &RequirementResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[derive(Debug)]
enum CheckState {
    NotChecked,
    Checked(EnvironmentReport),
}

/// Runs the toolchain check once per process and remembers the outcome.
pub struct EnvironmentCheck {
    source: RequirementSource,
    state: CheckState,
}

impl EnvironmentCheck {
    /// Check the toolchain of host `os` with environment `env`.
    pub fn for_host(os: impl Into<String>, env: HostEnv) -> Self {
        let os = os.into();
        Self::new(move || {
            let detector = DetectorFactory::create(&os, env.clone())?;
            let requirements = detector.requirements()?;
            Ok((detector.name().to_string(), requirements))
        })
    }

    /// Check requirements produced by `source`.
    pub fn new(source: impl Fn() -> Result<(String, Vec<Requirement>)> + 'static) -> Self {
        Self {
            source: Box::new(source),
            state: CheckState::NotChecked,
        }
    }

    /// Evaluate every requirement on the first call; return the cached
    /// outcome afterwards.
    ///
    /// All requirements are evaluated and reported even after one fails.
    /// Detection errors propagate and leave the check unperformed.
    pub fn check_once(
        &mut self,
        ui: &mut dyn Reporter,
        runner: &dyn CommandRunner,
    ) -> Result<bool> {
        if let CheckState::Checked(report) = &self.state {
            tracing::debug!("environment already checked, passed={}", report.passed());
            return Ok(report.passed());
        }

        let (platform, requirements) = (self.source)()?;

        let header = ui.styled(Tone::Info, &format!("Checking {} environment...", platform));
        ui.write(&header, true);

        let mut results = Vec::with_capacity(requirements.len());
        for requirement in &requirements {
            let prefix = format!("  - {}: ", ui.styled(Tone::Comment, requirement.name()));
            ui.write(&prefix, false);
            results.push(requirement.evaluate(ui, runner));
        }

        let report = EnvironmentReport { platform, results };
        let passed = report.passed();
        tracing::info!(
            "{} environment check {}",
            report.platform,
            if passed { "passed" } else { "failed" }
        );
        self.state = CheckState::Checked(report);
        Ok(passed)
    }

    /// Report of the completed check, if it has run.
    pub fn report(&self) -> Option<&EnvironmentReport> {
        match &self.state {
            CheckState::Checked(report) => Some(report),
            CheckState::NotChecked => None,
        }
    }
}

impl std::fmt::Debug for EnvironmentCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentCheck")
            .field("state", &self.state)
            .finish()
    }
}
