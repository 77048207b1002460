//! A single named capability check.

use std::fmt;

use crate::shell::CommandRunner;
use crate::ui::{Reporter, Tone};

/// Detection predicate of a requirement.
pub type Detect = Box<dyn Fn() -> bool>;

/// Corrective action run when detection fails. Returns whether the
/// requirement is now considered met.
pub type Remediate = Box<dyn Fn(&mut dyn Reporter, &dyn CommandRunner) -> bool>;

/// Outcome of evaluating one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementResult {
    /// Requirement name as reported (`gcc`, `re2c`, ...).
    pub name: String,
    /// Whether the detection predicate succeeded.
    pub detected: bool,
    /// Final outcome, after remediation if one ran.
    pub passed: bool,
}

impl RequirementResult {
    /// True when detection failed but remediation recovered it.
    pub fn remediated(&self) -> bool {
        !self.detected && self.passed
    }
}

/// A named capability with a detection predicate and optional remediation.
///
/// # Example
///
/// ```
/// use zephir_installer::environment::Requirement;
/// use zephir_installer::shell::MockRunner;
/// use zephir_installer::ui::MockUI;
///
/// let requirement = Requirement::new("re2c", || false).on_error(|ui, _runner| {
///     ui.write("installing re2c", true);
///     true
/// });
///
/// let mut ui = MockUI::new();
/// assert!(requirement.check(&mut ui, &MockRunner::new()));
/// ```
pub struct Requirement {
    name: String,
    detect: Detect,
    remediate: Option<Remediate>,
}

impl Requirement {
    /// Create a requirement without remediation.
    pub fn new(name: impl Into<String>, detect: impl Fn() -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            detect: Box::new(detect),
            remediate: None,
        }
    }

    /// Attach the action to run when detection fails.
    pub fn on_error(
        mut self,
        remediate: impl Fn(&mut dyn Reporter, &dyn CommandRunner) -> bool + 'static,
    ) -> Self {
        self.remediate = Some(Box::new(remediate));
        self
    }

    /// Requirement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a remediation is attached.
    pub fn has_remediation(&self) -> bool {
        self.remediate.is_some()
    }

    /// Evaluate and return only the final outcome.
    pub fn check(&self, ui: &mut dyn Reporter, runner: &dyn CommandRunner) -> bool {
        self.evaluate(ui, runner).passed
    }

    /// Evaluate the requirement, reporting its status.
    ///
    /// The current line is rewritten to `  - <name>: OK` or
    /// `  - <name>: Fail`. On failure the remediation runs and, if it ran,
    /// the resolved status is written once more below its output. A
    /// successful remediation is not re-verified.
    pub fn evaluate(&self, ui: &mut dyn Reporter, runner: &dyn CommandRunner) -> RequirementResult {
        let detected = (self.detect)();
        self.report_status(ui, detected);

        if detected {
            return RequirementResult {
                name: self.name.clone(),
                detected,
                passed: true,
            };
        }

        let passed = match &self.remediate {
            Some(remediate) => {
                tracing::debug!("'{}' not found, running remediation", self.name);
                let passed = remediate(ui, runner);
                let line = self.status_line(ui, passed);
                ui.write(&line, true);
                passed
            }
            None => false,
        };

        RequirementResult {
            name: self.name.clone(),
            detected,
            passed,
        }
    }

    fn report_status(&self, ui: &mut dyn Reporter, ok: bool) {
        let line = self.status_line(ui, ok);
        ui.overwrite(&line, true);
    }

    fn status_line(&self, ui: &dyn Reporter, ok: bool) -> String {
        let status = if ok {
            ui.styled(Tone::Ok, "OK")
        } else {
            ui.styled(Tone::Error, "Fail")
        };
        format!("  - {}: {}", ui.styled(Tone::Comment, &self.name), status)
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("name", &self.name)
            .field("has_remediation", &self.has_remediation())
            .finish()
    }
}
