use crate::assembly::config::DEFAULT_SEED;
use crate::core::error::ConfigurationError;

pub const DEFAULT_TAU: f64 = 0.1;
pub const DEFAULT_DT: f64 = 0.001;
pub const DEFAULT_TRAJECTORY_PERIOD: u64 = 10_000;
pub const DEFAULT_LOG_PERIOD: u64 = 1_000;
pub const DEFAULT_NLIST_BUFFER: f64 = 0.4;

/// Gay-Berne well depth and length scales for the rigid centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GayBerneParams {
    pub epsilon: f64,
    pub lperp: f64,
    pub lpar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputConfig {
    /// Steps between trajectory frames.
    pub trajectory_period: u64,
    /// Steps between scalar log rows.
    pub log_period: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub gay_berne: GayBerneParams,
    pub bond_k: f64,
    pub r_cut: f64,
    pub nlist_buffer: f64,
    /// Thermostat coupling period.
    pub tau: f64,
    pub dt: f64,
    pub seed: u64,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    epsilon: Option<f64>,
    lperp: Option<f64>,
    lpar: Option<f64>,
    bond_k: Option<f64>,
    r_cut: Option<f64>,
    nlist_buffer: Option<f64>,
    tau: Option<f64>,
    dt: Option<f64>,
    seed: Option<u64>,
    trajectory_period: Option<u64>,
    log_period: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
    pub fn lperp(mut self, lperp: f64) -> Self {
        self.lperp = Some(lperp);
        self
    }
    pub fn lpar(mut self, lpar: f64) -> Self {
        self.lpar = Some(lpar);
        self
    }
    pub fn bond_k(mut self, k: f64) -> Self {
        self.bond_k = Some(k);
        self
    }
    pub fn r_cut(mut self, r_cut: f64) -> Self {
        self.r_cut = Some(r_cut);
        self
    }
    pub fn nlist_buffer(mut self, buffer: f64) -> Self {
        self.nlist_buffer = Some(buffer);
        self
    }
    pub fn tau(mut self, tau: f64) -> Self {
        self.tau = Some(tau);
        self
    }
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn trajectory_period(mut self, steps: u64) -> Self {
        self.trajectory_period = Some(steps);
        self
    }
    pub fn log_period(mut self, steps: u64) -> Self {
        self.log_period = Some(steps);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigurationError> {
        let config = SimulationConfig {
            gay_berne: GayBerneParams {
                epsilon: self
                    .epsilon
                    .ok_or(ConfigurationError::MissingParameter("epsilon"))?,
                lperp: self
                    .lperp
                    .ok_or(ConfigurationError::MissingParameter("lperp"))?,
                lpar: self
                    .lpar
                    .ok_or(ConfigurationError::MissingParameter("lpar"))?,
            },
            bond_k: self
                .bond_k
                .ok_or(ConfigurationError::MissingParameter("bond_k"))?,
            r_cut: self
                .r_cut
                .ok_or(ConfigurationError::MissingParameter("r_cut"))?,
            nlist_buffer: self.nlist_buffer.unwrap_or(DEFAULT_NLIST_BUFFER),
            tau: self.tau.unwrap_or(DEFAULT_TAU),
            dt: self.dt.unwrap_or(DEFAULT_DT),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            output: OutputConfig {
                trajectory_period: self.trajectory_period.unwrap_or(DEFAULT_TRAJECTORY_PERIOD),
                log_period: self.log_period.unwrap_or(DEFAULT_LOG_PERIOD),
            },
        };

        for (name, value) in [
            ("r_cut", config.r_cut),
            ("tau", config.tau),
            ("dt", config.dt),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigurationError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [
            ("epsilon", config.gay_berne.epsilon),
            ("lperp", config.gay_berne.lperp),
            ("lpar", config.gay_berne.lpar),
            ("bond_k", config.bond_k),
            ("nlist_buffer", config.nlist_buffer),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigurationError::InvalidParameter { name, value });
            }
        }
        for (name, steps) in [
            ("trajectory_period", config.output.trajectory_period),
            ("log_period", config.output.log_period),
        ] {
            if steps == 0 {
                return Err(ConfigurationError::InvalidParameter { name, value: 0.0 });
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
            .epsilon(1.0)
            .lperp(0.5)
            .lpar(1.0)
            .bond_k(500.0)
            .r_cut(2.5)
    }

    #[test]
    fn defaults_fill_optional_parameters() {
        let config = required().build().unwrap();
        assert_eq!(config.tau, DEFAULT_TAU);
        assert_eq!(config.dt, DEFAULT_DT);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.nlist_buffer, DEFAULT_NLIST_BUFFER);
        assert_eq!(config.output.trajectory_period, 10_000);
        assert_eq!(config.output.log_period, 1_000);
    }

    #[test]
    fn missing_force_parameters_are_reported() {
        let result = SimulationConfigBuilder::new().epsilon(1.0).build();
        assert_eq!(result, Err(ConfigurationError::MissingParameter("lperp")));
        let result = SimulationConfigBuilder::new()
            .epsilon(1.0)
            .lperp(0.5)
            .lpar(1.0)
            .bond_k(10.0)
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingParameter("r_cut")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            required().dt(0.0).build(),
            Err(ConfigurationError::InvalidParameter { name: "dt", .. })
        ));
        assert!(matches!(
            required().bond_k(-1.0).build(),
            Err(ConfigurationError::InvalidParameter { name: "bond_k", .. })
        ));
        assert!(matches!(
            required().log_period(0).build(),
            Err(ConfigurationError::InvalidParameter {
                name: "log_period",
                ..
            })
        ));
    }
}
