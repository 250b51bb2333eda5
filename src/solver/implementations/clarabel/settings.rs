use crate::solver::core::options::settings_fields;
use crate::solver::core::{OptionValue, ParamError, SettingsTarget, SolverOptions, UnknownOptionPolicy};
use crate::algebra::FloatT;
use ::clarabel::solver::DefaultSettings;

/// Clarabel rejects assignments to settings it does not define.
pub const CLARABEL_UNKNOWN_OPTIONS: UnknownOptionPolicy = UnknownOptionPolicy::Reject;

impl<T> SettingsTarget for DefaultSettings<T>
where
    T: FloatT,
{
    const SOLVER: &'static str = "Clarabel";

    fn set_field(&mut self, key: &str, value: &OptionValue) -> Result<bool, ParamError> {
        settings_fields!(self, key, value;
            max_iter => to_u32,
            time_limit => to_f64,
            verbose => to_bool,
            max_step_fraction => to_float,
            tol_gap_abs => to_float,
            tol_gap_rel => to_float,
            tol_feas => to_float,
            tol_infeas_abs => to_float,
            tol_infeas_rel => to_float,
            tol_ktratio => to_float,
            reduced_tol_gap_abs => to_float,
            reduced_tol_gap_rel => to_float,
            reduced_tol_feas => to_float,
            reduced_tol_infeas_abs => to_float,
            reduced_tol_infeas_rel => to_float,
            reduced_tol_ktratio => to_float,
            equilibrate_enable => to_bool,
            equilibrate_max_iter => to_u32,
            equilibrate_min_scaling => to_float,
            equilibrate_max_scaling => to_float,
            linesearch_backtrack_step => to_float,
            min_switch_step_length => to_float,
            min_terminate_step_length => to_float,
            max_threads => to_u32,
            direct_kkt_solver => to_bool,
            direct_solve_method => to_text,
            static_regularization_enable => to_bool,
            static_regularization_constant => to_float,
            static_regularization_proportional => to_float,
            dynamic_regularization_enable => to_bool,
            dynamic_regularization_eps => to_float,
            dynamic_regularization_delta => to_float,
            iterative_refinement_enable => to_bool,
            iterative_refinement_reltol => to_float,
            iterative_refinement_abstol => to_float,
            iterative_refinement_max_iter => to_u32,
            iterative_refinement_stop_ratio => to_float,
            presolve_enable => to_bool,
            input_sparse_dropzeros => to_bool,
        )
    }
}

/// Clarabel settings seeded with the verbosity flag, with every
/// forwarded option written over the defaults.
pub fn clarabel_settings<T: FloatT>(
    verbose: bool,
    options: &SolverOptions,
) -> Result<DefaultSettings<T>, ParamError> {
    let mut settings = DefaultSettings::<T>::default();
    settings.verbose = verbose;

    options.apply_to(&mut settings, CLARABEL_UNKNOWN_OPTIONS)?;
    Ok(settings)
}

#[test]
fn test_clarabel_settings() {
    let options = SolverOptions::new()
        .set("max_iter", 7)
        .set("time_limit", 2)
        .set("direct_solve_method", "qdldl")
        .set("tol_feas", 1e-6);

    let settings = clarabel_settings::<f64>(false, &options).unwrap();
    assert!(!settings.verbose);
    assert_eq!(settings.max_iter, 7);
    assert_eq!(settings.time_limit, 2.0);
    assert_eq!(settings.direct_solve_method, "qdldl");
    assert_eq!(settings.tol_feas, 1e-6);

    // strict by default
    let options = SolverOptions::new().set("not_a_setting", 1);
    let err = clarabel_settings::<f64>(true, &options).unwrap_err();
    assert!(err.to_string().contains("not_a_setting"));

    // wrong value type
    let options = SolverOptions::new().set("verbose", 2.5);
    assert!(clarabel_settings::<f64>(true, &options).is_err());
}
