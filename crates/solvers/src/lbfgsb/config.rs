use thiserror::Error;

/// Configuration for the L-BFGS-B driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    history_size: usize,
    f_tolerance: f64,
    g_tolerance: f64,
    verbosity: u32,
}

/// Errors that can occur when validating a driver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("Bad parameter value: history_size: {0}. Expected integer >= 1.")]
    HistorySize(usize),

    #[error("Bad parameter value: f_tolerance: {0}. Expected finite float > 0.")]
    FTolerance(f64),

    #[error("Bad parameter value: g_tolerance: {0}. Expected finite float > 0.")]
    GTolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_size: 5,
            f_tolerance: 1e-6,
            g_tolerance: 1e-6,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Creates a new config with validated values.
    ///
    /// # Errors
    ///
    /// Returns an error if `history_size` is zero or either tolerance is not
    /// finite and positive.
    pub fn new(
        history_size: usize,
        f_tolerance: f64,
        g_tolerance: f64,
        verbosity: u32,
    ) -> Result<Self, ConfigError> {
        if history_size == 0 {
            return Err(ConfigError::HistorySize(history_size));
        }
        if !f_tolerance.is_finite() || f_tolerance <= 0.0 {
            return Err(ConfigError::FTolerance(f_tolerance));
        }
        if !g_tolerance.is_finite() || g_tolerance <= 0.0 {
            return Err(ConfigError::GTolerance(g_tolerance));
        }

        Ok(Self {
            history_size,
            f_tolerance,
            g_tolerance,
            verbosity,
        })
    }

    /// Returns a copy with `parameters` applied on top of this config.
    ///
    /// Unset parameters keep this config's values.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged values fail validation.
    pub fn apply(&self, parameters: &Parameters) -> Result<Self, ConfigError> {
        Self::new(
            parameters.history_size.unwrap_or(self.history_size),
            parameters.f_tolerance.unwrap_or(self.f_tolerance),
            parameters.g_tolerance.unwrap_or(self.g_tolerance),
            parameters.verbosity.unwrap_or(self.verbosity),
        )
    }

    /// Returns the number of correction pairs the stepper keeps.
    #[must_use]
    pub fn history_size(&self) -> usize {
        self.history_size
    }

    /// Returns the relative function-reduction tolerance.
    #[must_use]
    pub fn f_tolerance(&self) -> f64 {
        self.f_tolerance
    }

    /// Returns the projected-gradient infinity-norm tolerance.
    #[must_use]
    pub fn g_tolerance(&self) -> f64 {
        self.g_tolerance
    }

    /// Returns the stepper's diagnostic level.
    #[must_use]
    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }
}

/// Per-call overrides for a [`Config`].
///
/// With the `serde-derive` feature this deserializes from any
/// self-describing map. Unknown keys are ignored, and the camel-case names
/// `approximationSize`, `fTolerance`, `gTolerance`, and `debug` are accepted
/// as aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct Parameters {
    /// Overrides [`Config::history_size`].
    #[cfg_attr(feature = "serde-derive", serde(alias = "approximationSize"))]
    pub history_size: Option<usize>,

    /// Overrides [`Config::f_tolerance`].
    #[cfg_attr(feature = "serde-derive", serde(alias = "fTolerance"))]
    pub f_tolerance: Option<f64>,

    /// Overrides [`Config::g_tolerance`].
    #[cfg_attr(feature = "serde-derive", serde(alias = "gTolerance"))]
    pub g_tolerance: Option<f64>,

    /// Overrides [`Config::verbosity`].
    #[cfg_attr(feature = "serde-derive", serde(alias = "debug"))]
    pub verbosity: Option<u32>,
}

impl Parameters {
    /// Creates parameters that override nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of correction pairs to keep.
    #[must_use]
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = Some(history_size);
        self
    }

    /// Sets the relative function-reduction tolerance.
    #[must_use]
    pub fn with_f_tolerance(mut self, f_tolerance: f64) -> Self {
        self.f_tolerance = Some(f_tolerance);
        self
    }

    /// Sets the projected-gradient tolerance.
    #[must_use]
    pub fn with_g_tolerance(mut self, g_tolerance: f64) -> Self {
        self.g_tolerance = Some(g_tolerance);
        self
    }

    /// Sets the diagnostic output level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = Some(verbosity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.history_size(), 5);
        assert_eq!(config.f_tolerance(), 1e-6);
        assert_eq!(config.g_tolerance(), 1e-6);
        assert_eq!(config.verbosity(), 0);
        assert_eq!(Config::new(5, 1e-6, 1e-6, 0), Ok(config));
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(Config::new(0, 1e-6, 1e-6, 0), Err(ConfigError::HistorySize(0)));
        assert_eq!(Config::new(5, 0.0, 1e-6, 0), Err(ConfigError::FTolerance(0.0)));
        assert_eq!(Config::new(5, 1e-6, -1.0, 0), Err(ConfigError::GTolerance(-1.0)));
        assert!(matches!(
            Config::new(5, f64::NAN, 1e-6, 0),
            Err(ConfigError::FTolerance(_))
        ));
        assert!(matches!(
            Config::new(5, 1e-6, f64::INFINITY, 0),
            Err(ConfigError::GTolerance(_))
        ));
    }

    #[test]
    fn parameters_override_but_do_not_replace() {
        let base = Config::new(9, 1e-4, 1e-5, 1).unwrap();
        let parameters = Parameters::new().with_f_tolerance(1e-8).with_verbosity(2);

        let merged = base.apply(&parameters).unwrap();

        assert_eq!(merged.history_size(), 9);
        assert_eq!(merged.f_tolerance(), 1e-8);
        assert_eq!(merged.g_tolerance(), 1e-5);
        assert_eq!(merged.verbosity(), 2);

        // The base config is untouched.
        assert_eq!(base.f_tolerance(), 1e-4);
    }

    #[test]
    fn invalid_override_is_reported() {
        let error = Config::default()
            .apply(&Parameters::new().with_history_size(0))
            .unwrap_err();

        assert_eq!(error, ConfigError::HistorySize(0));
        assert_eq!(
            error.to_string(),
            "Bad parameter value: history_size: 0. Expected integer >= 1."
        );
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn parameters_deserialize_with_aliases_and_unknown_keys() {
        let parameters: Parameters = serde_json::from_str(
            r#"{ "approximationSize": 7, "fTolerance": 1e-8, "color": "blue" }"#,
        )
        .unwrap();

        assert_eq!(
            parameters,
            Parameters::new().with_history_size(7).with_f_tolerance(1e-8)
        );

        let parameters: Parameters =
            serde_json::from_str(r#"{ "g_tolerance": 1e-3, "debug": 1 }"#).unwrap();
        assert_eq!(parameters.g_tolerance, Some(1e-3));
        assert_eq!(parameters.verbosity, Some(1));
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn parameters_reject_wrong_types() {
        assert!(serde_json::from_str::<Parameters>(r#"{ "history_size": -3 }"#).is_err());
        assert!(serde_json::from_str::<Parameters>(r#"{ "fTolerance": "small" }"#).is_err());
    }
}
