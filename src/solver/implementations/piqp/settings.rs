use crate::algebra::*;
use crate::solver::core::options::settings_fields;
use crate::solver::core::{OptionValue, ParamError, SettingsTarget, SolverOptions, UnknownOptionPolicy};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// PIQP skips settings it does not define, with a warning.
pub const PIQP_UNKNOWN_OPTIONS: UnknownOptionPolicy = UnknownOptionPolicy::Warn;

/// Settings of the PIQP proximal interior point solver.
///
/// Defaults are those of the native library.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PiqpSettings<T: FloatT> {
    ///initial primal proximal penalty parameter
    #[builder(default = "float_const(1e-6)")]
    pub rho_init: T,

    ///initial augmented lagrangian penalty parameter
    #[builder(default = "float_const(1e-4)")]
    pub delta_init: T,

    ///absolute tolerance
    #[builder(default = "float_const(1e-8)")]
    pub eps_abs: T,

    ///relative tolerance
    #[builder(default = "float_const(1e-9)")]
    pub eps_rel: T,

    ///include the duality gap in the termination criterion
    #[builder(default = "true")]
    pub check_duality_gap: bool,

    ///absolute tolerance on the duality gap
    #[builder(default = "float_const(1e-8)")]
    pub eps_duality_gap_abs: T,

    ///relative tolerance on the duality gap
    #[builder(default = "float_const(1e-9)")]
    pub eps_duality_gap_rel: T,

    ///lower limit for regularization
    #[builder(default = "float_const(1e-10)")]
    pub reg_lower_limit: T,

    ///lower limit for regularization in fine tune mode
    #[builder(default = "float_const(1e-13)")]
    pub reg_finetune_lower_limit: T,

    ///iterations without primal update before fine tune mode
    #[builder(default = "7")]
    pub reg_finetune_primal_update_threshold: u32,

    ///iterations without dual update before fine tune mode
    #[builder(default = "5")]
    pub reg_finetune_dual_update_threshold: u32,

    ///maximum number of iterations
    #[builder(default = "250")]
    pub max_iter: u32,

    ///maximum number of factorization retries before failure
    #[builder(default = "10")]
    pub max_factor_retires: u32,

    ///scale the cost in the Ruiz preconditioner
    #[builder(default = "false")]
    pub preconditioner_scale_cost: bool,

    ///maximum number of preconditioner iterations
    #[builder(default = "10")]
    pub preconditioner_iter: u32,

    ///maximum interior point step length
    #[builder(default = "float_const(0.99)")]
    pub tau: T,

    ///always run iterative refinement, not only on factorization failure
    #[builder(default = "false")]
    pub iterative_refinement_always_enabled: bool,

    ///iterative refinement absolute tolerance
    #[builder(default = "float_const(1e-12)")]
    pub iterative_refinement_eps_abs: T,

    ///iterative refinement relative tolerance
    #[builder(default = "float_const(1e-12)")]
    pub iterative_refinement_eps_rel: T,

    ///maximum number of iterative refinement steps
    #[builder(default = "10")]
    pub iterative_refinement_max_iter: u32,

    ///minimum improvement rate for iterative refinement
    #[builder(default = "float_const(5.0)")]
    pub iterative_refinement_min_improvement_rate: T,

    ///static regularization of the KKT system for iterative refinement
    #[builder(default = "float_const(1e-7)")]
    pub iterative_refinement_static_regularization_eps: T,

    ///static regularization relative to the largest KKT diagonal entry
    #[builder(default = "T::epsilon() * T::epsilon()")]
    pub iterative_refinement_static_regularization_rel: T,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///measure timing information internally
    #[builder(default = "false")]
    pub compute_timings: bool,
}

impl<T> Default for PiqpSettings<T>
where
    T: FloatT,
{
    fn default() -> PiqpSettings<T> {
        PiqpSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> SettingsTarget for PiqpSettings<T>
where
    T: FloatT,
{
    const SOLVER: &'static str = "PIQP";

    fn set_field(&mut self, key: &str, value: &OptionValue) -> Result<bool, ParamError> {
        settings_fields!(self, key, value;
            rho_init => to_float,
            delta_init => to_float,
            eps_abs => to_float,
            eps_rel => to_float,
            check_duality_gap => to_bool,
            eps_duality_gap_abs => to_float,
            eps_duality_gap_rel => to_float,
            reg_lower_limit => to_float,
            reg_finetune_lower_limit => to_float,
            reg_finetune_primal_update_threshold => to_u32,
            reg_finetune_dual_update_threshold => to_u32,
            max_iter => to_u32,
            max_factor_retires => to_u32,
            preconditioner_scale_cost => to_bool,
            preconditioner_iter => to_u32,
            tau => to_float,
            iterative_refinement_always_enabled => to_bool,
            iterative_refinement_eps_abs => to_float,
            iterative_refinement_eps_rel => to_float,
            iterative_refinement_max_iter => to_u32,
            iterative_refinement_min_improvement_rate => to_float,
            iterative_refinement_static_regularization_eps => to_float,
            iterative_refinement_static_regularization_rel => to_float,
            verbose => to_bool,
            compute_timings => to_bool,
        )
    }
}

impl<T> PiqpSettings<T>
where
    T: FloatT,
{
    /// Checks the values that the native library would refuse
    pub fn validate(&self) -> Result<(), ParamError> {
        validate_tau(self.tau)?;
        validate_tolerance("eps_abs", self.eps_abs)?;
        validate_tolerance("eps_rel", self.eps_rel)?;
        if self.eps_abs == T::zero() && self.eps_rel == T::zero() {
            return Err(ParamError::BadOptionValue {
                key: "eps_abs".to_string(),
                expected: "eps_abs or eps_rel to be positive",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<ParamError> for PiqpSettingsBuilderError {
    fn from(e: ParamError) -> Self {
        PiqpSettingsBuilderError::ValidationError(e.to_string())
    }
}

impl<T> PiqpSettingsBuilder<T>
where
    T: FloatT,
{
    fn validate(&self) -> Result<(), ParamError> {
        if let Some(tau) = self.tau {
            validate_tau(tau)?;
        }
        if let Some(eps_abs) = self.eps_abs {
            validate_tolerance("eps_abs", eps_abs)?;
        }
        if let Some(eps_rel) = self.eps_rel {
            validate_tolerance("eps_rel", eps_rel)?;
        }
        Ok(())
    }
}

fn validate_tau<T: FloatT>(tau: T) -> Result<(), ParamError> {
    if tau > T::zero() && tau <= T::one() {
        Ok(())
    } else {
        Err(ParamError::BadOptionValue {
            key: "tau".to_string(),
            expected: "a value in (0, 1]",
            value: format!("{tau}"),
        })
    }
}

fn validate_tolerance<T: FloatT>(key: &str, eps: T) -> Result<(), ParamError> {
    if eps >= T::zero() {
        Ok(())
    } else {
        Err(ParamError::BadOptionValue {
            key: key.to_string(),
            expected: "a nonnegative tolerance",
            value: format!("{eps}"),
        })
    }
}

/// PIQP settings seeded with the verbosity flag, with every forwarded
/// option written over the defaults.  Unknown keys are skipped.
pub fn piqp_settings<T: FloatT>(
    verbose: bool,
    options: &SolverOptions,
) -> Result<PiqpSettings<T>, ParamError> {
    let mut settings = PiqpSettingsBuilder::<T>::default()
        .verbose(verbose)
        .build()
        .map_err(|e| ParamError::BadOptionValue {
            key: "verbose".to_string(),
            expected: "valid PIQP settings",
            value: e.to_string(),
        })?;

    options.apply_to(&mut settings, PIQP_UNKNOWN_OPTIONS)?;
    settings.validate()?;
    Ok(settings)
}

#[test]
fn test_piqp_settings_builder() {
    let settings = PiqpSettingsBuilder::<f64>::default()
        .max_iter(42)
        .tau(0.95)
        .build()
        .unwrap();
    assert_eq!(settings.max_iter, 42);
    assert_eq!(settings.tau, 0.95);
    assert!(settings.check_duality_gap);

    // bad step length is caught on build
    assert!(PiqpSettingsBuilder::<f64>::default().tau(1.5).build().is_err());
}

#[test]
fn test_piqp_settings_options() {
    let options = SolverOptions::new()
        .set("eps_abs", 1e-6)
        .set("preconditioner_iter", 3)
        .set("compute_timings", 1)
        .set("not_a_setting", "x");

    // unknown keys are skipped rather than rejected
    let settings = piqp_settings::<f64>(true, &options).unwrap();
    assert!(settings.verbose);
    assert!(settings.compute_timings);
    assert_eq!(settings.eps_abs, 1e-6);
    assert_eq!(settings.preconditioner_iter, 3);

    // ... unless the caller asks for strict handling
    let options = options.unknown_keys(UnknownOptionPolicy::Reject);
    assert!(piqp_settings::<f64>(true, &options).is_err());

    let options = SolverOptions::new().set("tau", 0.0);
    assert!(piqp_settings::<f64>(false, &options).is_err());
}
