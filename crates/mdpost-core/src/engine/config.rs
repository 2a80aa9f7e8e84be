use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// What normalization does when every grid cell has the same density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniformDensityPolicy {
    /// Every cell is scored 0.
    #[default]
    Zero,
    /// Every cell is scored 50, the middle of the output range.
    Midpoint,
    /// The run fails with [`EngineError::UniformDensity`](super::error::EngineError::UniformDensity).
    Error,
}

impl FromStr for UniformDensityPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "midpoint" | "mid" => Ok(Self::Midpoint),
            "error" | "fail" => Ok(Self::Error),
            other => Err(ConfigError::InvalidParameter {
                name: "uniform_policy",
                reason: format!("'{}' is not one of zero, midpoint, error", other),
            }),
        }
    }
}

impl fmt::Display for UniformDensityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::Midpoint => "midpoint",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityConfig {
    /// Edge length of a grid cell, in the structure's length unit.
    pub step: f64,
    pub uniform_policy: UniformDensityPolicy,
}

#[derive(Default)]
pub struct DensityConfigBuilder {
    step: Option<f64>,
    uniform_policy: Option<UniformDensityPolicy>,
}

impl DensityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
    pub fn uniform_policy(mut self, policy: UniformDensityPolicy) -> Self {
        self.uniform_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<DensityConfig, ConfigError> {
        let step = self.step.ok_or(ConfigError::MissingParameter("step"))?;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "step",
                reason: format!("must be a positive finite number, got {}", step),
            });
        }
        Ok(DensityConfig {
            step,
            uniform_policy: self
                .uniform_policy
                .ok_or(ConfigError::MissingParameter("uniform_policy"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComConfig {
    /// Factor applied to every centroid (10.0 converts nm to Angstrom).
    pub scale: f64,
    /// Frame every other frame is superposed onto; `None` skips alignment.
    pub reference_frame: Option<usize>,
}

#[derive(Default)]
pub struct ComConfigBuilder {
    scale: Option<f64>,
    reference_frame: Option<Option<usize>>,
}

impl ComConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
    pub fn align_to_frame(mut self, index: usize) -> Self {
        self.reference_frame = Some(Some(index));
        self
    }
    pub fn no_alignment(mut self) -> Self {
        self.reference_frame = Some(None);
        self
    }

    pub fn build(self) -> Result<ComConfig, ConfigError> {
        let scale = self.scale.ok_or(ConfigError::MissingParameter("scale"))?;
        if !scale.is_finite() || scale == 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "scale",
                reason: format!("must be a finite non-zero number, got {}", scale),
            });
        }
        Ok(ComConfig {
            scale,
            reference_frame: self
                .reference_frame
                .ok_or(ConfigError::MissingParameter("reference_frame"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_builder_builds_valid_config() {
        let config = DensityConfigBuilder::new()
            .step(2.0)
            .uniform_policy(UniformDensityPolicy::Midpoint)
            .build()
            .unwrap();
        assert_eq!(config.step, 2.0);
        assert_eq!(config.uniform_policy, UniformDensityPolicy::Midpoint);
    }

    #[test]
    fn density_builder_requires_step_and_policy() {
        assert_eq!(
            DensityConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("step"))
        );
        assert_eq!(
            DensityConfigBuilder::new().step(1.0).build(),
            Err(ConfigError::MissingParameter("uniform_policy"))
        );
    }

    #[test]
    fn density_builder_rejects_non_positive_steps() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = DensityConfigBuilder::new()
                .step(step)
                .uniform_policy(UniformDensityPolicy::Zero)
                .build();
            assert!(
                matches!(result, Err(ConfigError::InvalidParameter { name: "step", .. })),
                "step {} was accepted",
                step
            );
        }
    }

    #[test]
    fn com_builder_supports_alignment_toggle() {
        let aligned = ComConfigBuilder::new()
            .scale(10.0)
            .align_to_frame(3)
            .build()
            .unwrap();
        assert_eq!(aligned.reference_frame, Some(3));

        let unaligned = ComConfigBuilder::new()
            .scale(10.0)
            .no_alignment()
            .build()
            .unwrap();
        assert_eq!(unaligned.reference_frame, None);
    }

    #[test]
    fn com_builder_validates_scale() {
        assert_eq!(
            ComConfigBuilder::new().align_to_frame(0).build(),
            Err(ConfigError::MissingParameter("scale"))
        );
        assert!(matches!(
            ComConfigBuilder::new().scale(0.0).align_to_frame(0).build(),
            Err(ConfigError::InvalidParameter { name: "scale", .. })
        ));
        assert_eq!(
            ComConfigBuilder::new().scale(1.0).build(),
            Err(ConfigError::MissingParameter("reference_frame"))
        );
    }

    #[test]
    fn uniform_policy_parses_and_displays() {
        assert_eq!("zero".parse(), Ok(UniformDensityPolicy::Zero));
        assert_eq!("MIDPOINT".parse(), Ok(UniformDensityPolicy::Midpoint));
        assert_eq!("fail".parse(), Ok(UniformDensityPolicy::Error));
        assert!("half".parse::<UniformDensityPolicy>().is_err());

        for policy in [
            UniformDensityPolicy::Zero,
            UniformDensityPolicy::Midpoint,
            UniformDensityPolicy::Error,
        ] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }
}
