#![allow(non_snake_case)]
#![allow(non_camel_case_types)]
#![allow(dead_code)]

//! Declarations of the PIQP C interface (`piqpc`).

use super::{PiqpInfo, PiqpSettings, PiqpStatus};
use std::os::raw::c_int;

pub type piqp_float = f64;
pub type piqp_int = c_int;

/// FFI interface for [`PiqpSettings`]
#[repr(C)]
#[derive(Debug, Clone)]
pub struct piqp_settings {
    pub rho_init: piqp_float,
    pub delta_init: piqp_float,
    pub eps_abs: piqp_float,
    pub eps_rel: piqp_float,
    pub check_duality_gap: piqp_int,
    pub eps_duality_gap_abs: piqp_float,
    pub eps_duality_gap_rel: piqp_float,
    pub reg_lower_limit: piqp_float,
    pub reg_finetune_lower_limit: piqp_float,
    pub reg_finetune_primal_update_threshold: piqp_int,
    pub reg_finetune_dual_update_threshold: piqp_int,
    pub max_iter: piqp_int,
    pub max_factor_retires: piqp_int,
    pub preconditioner_scale_cost: piqp_int,
    pub preconditioner_iter: piqp_int,
    pub tau: piqp_float,
    pub iterative_refinement_always_enabled: piqp_int,
    pub iterative_refinement_eps_abs: piqp_float,
    pub iterative_refinement_eps_rel: piqp_float,
    pub iterative_refinement_max_iter: piqp_int,
    pub iterative_refinement_min_improvement_rate: piqp_float,
    pub iterative_refinement_static_regularization_eps: piqp_float,
    pub iterative_refinement_static_regularization_rel: piqp_float,
    pub verbose: piqp_int,
    pub compute_timings: piqp_int,
}

fn to_int(v: u32) -> piqp_int {
    piqp_int::try_from(v).unwrap_or(piqp_int::MAX)
}

impl From<&PiqpSettings<f64>> for piqp_settings {
    fn from(settings: &PiqpSettings<f64>) -> Self {
        Self {
            rho_init: settings.rho_init,
            delta_init: settings.delta_init,
            eps_abs: settings.eps_abs,
            eps_rel: settings.eps_rel,
            check_duality_gap: settings.check_duality_gap.into(),
            eps_duality_gap_abs: settings.eps_duality_gap_abs,
            eps_duality_gap_rel: settings.eps_duality_gap_rel,
            reg_lower_limit: settings.reg_lower_limit,
            reg_finetune_lower_limit: settings.reg_finetune_lower_limit,
            reg_finetune_primal_update_threshold: to_int(
                settings.reg_finetune_primal_update_threshold,
            ),
            reg_finetune_dual_update_threshold: to_int(settings.reg_finetune_dual_update_threshold),
            max_iter: to_int(settings.max_iter),
            max_factor_retires: to_int(settings.max_factor_retires),
            preconditioner_scale_cost: settings.preconditioner_scale_cost.into(),
            preconditioner_iter: to_int(settings.preconditioner_iter),
            tau: settings.tau,
            iterative_refinement_always_enabled: settings.iterative_refinement_always_enabled.into(),
            iterative_refinement_eps_abs: settings.iterative_refinement_eps_abs,
            iterative_refinement_eps_rel: settings.iterative_refinement_eps_rel,
            iterative_refinement_max_iter: to_int(settings.iterative_refinement_max_iter),
            iterative_refinement_min_improvement_rate: settings
                .iterative_refinement_min_improvement_rate,
            iterative_refinement_static_regularization_eps: settings
                .iterative_refinement_static_regularization_eps,
            iterative_refinement_static_regularization_rel: settings
                .iterative_refinement_static_regularization_rel,
            verbose: settings.verbose.into(),
            compute_timings: settings.compute_timings.into(),
        }
    }
}

/// Compressed sparse column matrix as seen by the C interface
#[repr(C)]
#[derive(Debug)]
pub struct piqp_csc {
    pub m: piqp_int,
    pub n: piqp_int,
    pub nnz: piqp_int,
    pub p: *mut piqp_int,
    pub i: *mut piqp_int,
    pub x: *mut piqp_float,
}

#[repr(C)]
#[derive(Debug)]
pub struct piqp_data_dense {
    pub n: piqp_int,
    pub p: piqp_int,
    pub m: piqp_int,
    pub P: *mut piqp_float,
    pub c: *mut piqp_float,
    pub A: *mut piqp_float,
    pub b: *mut piqp_float,
    pub G: *mut piqp_float,
    pub h: *mut piqp_float,
    pub x_lb: *mut piqp_float,
    pub x_ub: *mut piqp_float,
}

#[repr(C)]
#[derive(Debug)]
pub struct piqp_data_sparse {
    pub n: piqp_int,
    pub p: piqp_int,
    pub m: piqp_int,
    pub P: *mut piqp_csc,
    pub c: *mut piqp_float,
    pub A: *mut piqp_csc,
    pub b: *mut piqp_float,
    pub G: *mut piqp_csc,
    pub h: *mut piqp_float,
    pub x_lb: *mut piqp_float,
    pub x_ub: *mut piqp_float,
}

#[repr(C)]
#[derive(Debug, Clone)]
pub struct piqp_info {
    pub status: piqp_int,
    pub iter: piqp_int,
    pub rho: piqp_float,
    pub delta: piqp_float,
    pub mu: piqp_float,
    pub sigma: piqp_float,
    pub primal_step: piqp_float,
    pub dual_step: piqp_float,
    pub primal_inf: piqp_float,
    pub primal_rel_inf: piqp_float,
    pub dual_inf: piqp_float,
    pub dual_rel_inf: piqp_float,
    pub primal_obj: piqp_float,
    pub dual_obj: piqp_float,
    pub duality_gap: piqp_float,
    pub duality_gap_rel: piqp_float,
    pub factor_retires: piqp_int,
    pub reg_limit: piqp_float,
    pub no_primal_update: piqp_int,
    pub no_dual_update: piqp_int,
    pub setup_time: piqp_float,
    pub update_time: piqp_float,
    pub solve_time: piqp_float,
    pub run_time: piqp_float,
}

// No From<PiqpInfo> for piqp_info because solve
// information flows only one way

fn to_count(v: piqp_int) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

impl From<&piqp_info> for PiqpInfo<f64> {
    fn from(info: &piqp_info) -> Self {
        Self {
            status: PiqpStatus::from_code(info.status),
            iter: to_count(info.iter),
            rho: info.rho,
            delta: info.delta,
            mu: info.mu,
            sigma: info.sigma,
            primal_step: info.primal_step,
            dual_step: info.dual_step,
            primal_inf: info.primal_inf,
            primal_rel_inf: info.primal_rel_inf,
            dual_inf: info.dual_inf,
            dual_rel_inf: info.dual_rel_inf,
            primal_obj: info.primal_obj,
            dual_obj: info.dual_obj,
            duality_gap: info.duality_gap,
            duality_gap_rel: info.duality_gap_rel,
            factor_retires: to_count(info.factor_retires),
            reg_limit: info.reg_limit,
            no_primal_update: to_count(info.no_primal_update),
            no_dual_update: to_count(info.no_dual_update),
            setup_time: info.setup_time,
            update_time: info.update_time,
            solve_time: info.solve_time,
            run_time: info.run_time,
        }
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct piqp_results {
    pub x: *mut piqp_float,
    pub y: *mut piqp_float,
    pub z: *mut piqp_float,
    pub z_lb: *mut piqp_float,
    pub z_ub: *mut piqp_float,
    pub s: *mut piqp_float,
    pub s_lb: *mut piqp_float,
    pub s_ub: *mut piqp_float,
    pub info: piqp_info,
}

#[repr(C)]
#[derive(Debug)]
pub struct piqp_workspace {
    pub solver_handle: *mut std::os::raw::c_void,
    pub solver_is_dense: piqp_int,
    pub result: *mut piqp_results,
}

extern "C" {
    pub fn piqp_set_default_settings(settings: *mut piqp_settings);

    pub fn piqp_setup_dense(
        workspace: *mut *mut piqp_workspace,
        data: *const piqp_data_dense,
        settings: *const piqp_settings,
    );

    pub fn piqp_setup_sparse(
        workspace: *mut *mut piqp_workspace,
        data: *const piqp_data_sparse,
        settings: *const piqp_settings,
    );

    pub fn piqp_solve(workspace: *mut piqp_workspace) -> piqp_int;

    pub fn piqp_cleanup(workspace: *mut piqp_workspace);
}

#[test]
fn test_settings_ffi() {
    let settings = PiqpSettings::<f64> {
        max_iter: 17,
        verbose: true,
        ..Default::default()
    };
    let settings_ffi: piqp_settings = (&settings).into();
    assert_eq!(settings_ffi.max_iter, 17);
    assert_eq!(settings_ffi.verbose, 1);
    assert_eq!(settings_ffi.check_duality_gap, 1);
    assert_eq!(settings_ffi.tau, settings.tau);
}
