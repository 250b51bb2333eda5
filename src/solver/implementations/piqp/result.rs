use crate::algebra::*;
use crate::solver::core::{ExtraValue, Extras};
use std::fmt;

/// Termination status reported by PIQP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PiqpStatus {
    Solved,
    MaxIterReached,
    PrimalInfeasible,
    DualInfeasible,
    Numerics,
    #[default]
    Unsolved,
    InvalidSettings,
}

impl PiqpStatus {
    /// Status from the native integer code.  Unknown codes map to
    /// `Unsolved`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => PiqpStatus::Solved,
            -1 => PiqpStatus::MaxIterReached,
            -2 => PiqpStatus::PrimalInfeasible,
            -3 => PiqpStatus::DualInfeasible,
            -8 => PiqpStatus::Numerics,
            -10 => PiqpStatus::InvalidSettings,
            _ => PiqpStatus::Unsolved,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            PiqpStatus::Solved => 1,
            PiqpStatus::MaxIterReached => -1,
            PiqpStatus::PrimalInfeasible => -2,
            PiqpStatus::DualInfeasible => -3,
            PiqpStatus::Numerics => -8,
            PiqpStatus::Unsolved => -9,
            PiqpStatus::InvalidSettings => -10,
        }
    }
}

impl fmt::Display for PiqpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PiqpStatus::Solved => "PIQP_SOLVED",
            PiqpStatus::MaxIterReached => "PIQP_MAX_ITER_REACHED",
            PiqpStatus::PrimalInfeasible => "PIQP_PRIMAL_INFEASIBLE",
            PiqpStatus::DualInfeasible => "PIQP_DUAL_INFEASIBLE",
            PiqpStatus::Numerics => "PIQP_NUMERICS",
            PiqpStatus::Unsolved => "PIQP_UNSOLVED",
            PiqpStatus::InvalidSettings => "PIQP_INVALID_SETTINGS",
        };
        write!(f, "{name}")
    }
}

/// Solve information reported by PIQP
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct PiqpInfo<T> {
    pub status: PiqpStatus,
    pub iter: u32,
    pub rho: T,
    pub delta: T,
    pub mu: T,
    pub sigma: T,
    pub primal_step: T,
    pub dual_step: T,
    pub primal_inf: T,
    pub primal_rel_inf: T,
    pub dual_inf: T,
    pub dual_rel_inf: T,
    pub primal_obj: T,
    pub dual_obj: T,
    pub duality_gap: T,
    pub duality_gap_rel: T,
    pub factor_retires: u32,
    pub reg_limit: T,
    pub no_primal_update: u32,
    pub no_dual_update: u32,
    pub setup_time: T,
    pub update_time: T,
    pub solve_time: T,
    pub run_time: T,
}

impl<T> PiqpInfo<T>
where
    T: FloatT,
{
    /// Every info field as a solution extra, keyed by field name
    pub fn to_extras(&self) -> Extras {
        let mut extras = Extras::new();
        extras.insert("status".into(), self.status.to_string().into());
        extras.insert("iter".into(), self.iter.into());
        extras.insert("factor_retires".into(), self.factor_retires.into());
        extras.insert("no_primal_update".into(), self.no_primal_update.into());
        extras.insert("no_dual_update".into(), self.no_dual_update.into());

        let floats = [
            ("rho", self.rho),
            ("delta", self.delta),
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("primal_step", self.primal_step),
            ("dual_step", self.dual_step),
            ("primal_inf", self.primal_inf),
            ("primal_rel_inf", self.primal_rel_inf),
            ("dual_inf", self.dual_inf),
            ("dual_rel_inf", self.dual_rel_inf),
            ("primal_obj", self.primal_obj),
            ("dual_obj", self.dual_obj),
            ("duality_gap", self.duality_gap),
            ("duality_gap_rel", self.duality_gap_rel),
            ("reg_limit", self.reg_limit),
            ("setup_time", self.setup_time),
            ("update_time", self.update_time),
            ("solve_time", self.solve_time),
            ("run_time", self.run_time),
        ];
        for (key, value) in floats {
            extras.insert(key.into(), ExtraValue::from_float(value));
        }
        extras
    }
}

/// Primal and dual iterates returned by PIQP.
///
/// `z_lb` and `z_ub` are the multipliers of the lower and upper
/// variable bounds, both nonnegative and of length `n`.
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct PiqpResult<T> {
    pub x: Vec<T>,
    pub y: Vec<T>,
    pub z: Vec<T>,
    pub z_lb: Vec<T>,
    pub z_ub: Vec<T>,
    pub s: Vec<T>,
    pub s_lb: Vec<T>,
    pub s_ub: Vec<T>,
    pub info: PiqpInfo<T>,
}

#[test]
fn test_piqp_status_codes() {
    for status in [
        PiqpStatus::Solved,
        PiqpStatus::MaxIterReached,
        PiqpStatus::PrimalInfeasible,
        PiqpStatus::DualInfeasible,
        PiqpStatus::Numerics,
        PiqpStatus::Unsolved,
        PiqpStatus::InvalidSettings,
    ] {
        assert_eq!(PiqpStatus::from_code(status.code()), status);
    }
    assert_eq!(PiqpStatus::from_code(42), PiqpStatus::Unsolved);
    assert_eq!(PiqpStatus::Solved.to_string(), "PIQP_SOLVED");
}

#[test]
fn test_piqp_info_extras() {
    let info = PiqpInfo::<f64> {
        status: PiqpStatus::Solved,
        iter: 9,
        run_time: 0.5,
        ..Default::default()
    };
    let extras = info.to_extras();
    assert_eq!(extras["status"].as_str(), Some("PIQP_SOLVED"));
    assert_eq!(extras["iter"], ExtraValue::Int(9));
    assert_eq!(extras["run_time"].as_f64(), Some(0.5));
    assert_eq!(extras.len(), 24);
}
