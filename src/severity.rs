use std::fmt;

/// Display-only severity band for a maliciousness probability.
///
/// Carries no behavior beyond labeling the printed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Guarded,
    Elevated,
    High,
}

impl Severity {
    pub fn from_probability(probability: f32) -> Self {
        if probability < 0.25 {
            Severity::Low
        } else if probability < 0.50 {
            Severity::Guarded
        } else if probability < 0.70 {
            Severity::Elevated
        } else {
            Severity::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Guarded => "guarded",
            Severity::Elevated => "elevated",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
