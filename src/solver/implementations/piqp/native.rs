#![allow(non_snake_case)]

use super::ffi::{self, piqp_float, piqp_int};
use super::*;
use crate::algebra::*;
use crate::solver::core::SolverError;
use enum_dispatch::*;
use std::ptr::{self, NonNull};

/// The native PIQP library, linked as `piqpc`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePiqp;

fn to_int(v: usize) -> Result<piqp_int, SolverError> {
    piqp_int::try_from(v).map_err(|_| SolverError::Setup {
        solver: "PIQP",
        reason: format!("dimension {v} exceeds the native index range"),
    })
}

fn opt_ptr(v: &mut Option<Vec<piqp_float>>) -> *mut piqp_float {
    v.as_mut().map_or(ptr::null_mut(), |v| v.as_mut_ptr())
}

// Vectors shared by both data layouts
struct NativeVectors {
    n: piqp_int,
    p: piqp_int,
    m: piqp_int,
    c: Vec<piqp_float>,
    b: Vec<piqp_float>,
    h: Vec<piqp_float>,
    x_lb: Option<Vec<piqp_float>>,
    x_ub: Option<Vec<piqp_float>>,
}

impl NativeVectors {
    fn new(data: &PiqpData<f64>) -> Result<Self, SolverError> {
        Ok(Self {
            n: to_int(data.n)?,
            p: to_int(data.p())?,
            m: to_int(data.m())?,
            c: data.c.clone(),
            b: data.b.clone(),
            h: data.h.clone(),
            x_lb: data.x_lb.clone(),
            x_ub: data.x_ub.clone(),
        })
    }
}

struct NativeCsc {
    m: piqp_int,
    n: piqp_int,
    colptr: Vec<piqp_int>,
    rowval: Vec<piqp_int>,
    nzval: Vec<piqp_float>,
}

impl NativeCsc {
    fn new(M: &CscMatrix<f64>) -> Result<Self, SolverError> {
        Ok(Self {
            m: to_int(M.m)?,
            n: to_int(M.n)?,
            colptr: M.colptr.iter().map(|&i| to_int(i)).collect::<Result<_, _>>()?,
            rowval: M.rowval.iter().map(|&i| to_int(i)).collect::<Result<_, _>>()?,
            nzval: M.nzval.clone(),
        })
    }

    fn as_ffi(&mut self) -> ffi::piqp_csc {
        ffi::piqp_csc {
            m: self.m,
            n: self.n,
            nnz: self.nzval.len() as piqp_int,
            p: self.colptr.as_mut_ptr(),
            i: self.rowval.as_mut_ptr(),
            x: self.nzval.as_mut_ptr(),
        }
    }
}

#[enum_dispatch]
trait NativeSetup {
    /// Run the native setup on the owned data.  Returns null on failure.
    fn setup(&mut self, settings: &ffi::piqp_settings) -> *mut ffi::piqp_workspace;
}

#[enum_dispatch(NativeSetup)]
enum NativeData {
    DenseData,
    SparseData,
}

struct DenseData {
    P: Vec<piqp_float>,
    A: Vec<piqp_float>,
    G: Vec<piqp_float>,
    vectors: NativeVectors,
}

impl NativeSetup for DenseData {
    fn setup(&mut self, settings: &ffi::piqp_settings) -> *mut ffi::piqp_workspace {
        let v = &mut self.vectors;
        let data = ffi::piqp_data_dense {
            n: v.n,
            p: v.p,
            m: v.m,
            P: self.P.as_mut_ptr(),
            c: v.c.as_mut_ptr(),
            A: self.A.as_mut_ptr(),
            b: v.b.as_mut_ptr(),
            G: self.G.as_mut_ptr(),
            h: v.h.as_mut_ptr(),
            x_lb: opt_ptr(&mut v.x_lb),
            x_ub: opt_ptr(&mut v.x_ub),
        };
        let mut workspace = ptr::null_mut();
        // the native library copies the data during setup
        unsafe { ffi::piqp_setup_dense(&mut workspace, &data, settings) };
        workspace
    }
}

struct SparseData {
    P: NativeCsc,
    A: NativeCsc,
    G: NativeCsc,
    vectors: NativeVectors,
}

impl NativeSetup for SparseData {
    fn setup(&mut self, settings: &ffi::piqp_settings) -> *mut ffi::piqp_workspace {
        let mut P = self.P.as_ffi();
        let mut A = self.A.as_ffi();
        let mut G = self.G.as_ffi();
        let v = &mut self.vectors;
        let data = ffi::piqp_data_sparse {
            n: v.n,
            p: v.p,
            m: v.m,
            P: &mut P,
            c: v.c.as_mut_ptr(),
            A: &mut A,
            b: v.b.as_mut_ptr(),
            G: &mut G,
            h: v.h.as_mut_ptr(),
            x_lb: opt_ptr(&mut v.x_lb),
            x_ub: opt_ptr(&mut v.x_ub),
        };
        let mut workspace = ptr::null_mut();
        unsafe { ffi::piqp_setup_sparse(&mut workspace, &data, settings) };
        workspace
    }
}

impl NativeData {
    fn new(data: &PiqpData<f64>) -> Result<Self, SolverError> {
        let vectors = NativeVectors::new(data)?;
        let native = match &data.matrices {
            PiqpMatrices::Dense { P, A, G } => DenseData {
                P: P.data.clone(),
                A: A.data.clone(),
                G: G.data.clone(),
                vectors,
            }
            .into(),
            PiqpMatrices::Sparse { P, A, G } => SparseData {
                P: NativeCsc::new(P)?,
                A: NativeCsc::new(A)?,
                G: NativeCsc::new(G)?,
                vectors,
            }
            .into(),
        };
        Ok(native)
    }
}

/// Workspace allocated by the native library
pub struct NativeWorkspace {
    workspace: NonNull<ffi::piqp_workspace>,
    n: usize,
    p: usize,
    m: usize,
}

impl Drop for NativeWorkspace {
    fn drop(&mut self) {
        unsafe { ffi::piqp_cleanup(self.workspace.as_ptr()) };
    }
}

unsafe fn read_vec(v: *const piqp_float, len: usize) -> Vec<f64> {
    if v.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(v, len).to_vec()
    }
}

impl PiqpWorkspace<f64> for NativeWorkspace {
    fn solve(&mut self) -> PiqpStatus {
        let code = unsafe { ffi::piqp_solve(self.workspace.as_ptr()) };
        PiqpStatus::from_code(code)
    }

    fn result(&self) -> PiqpResult<f64> {
        let (n, p, m) = (self.n, self.p, self.m);
        unsafe {
            let result = self.workspace.as_ref().result;
            if result.is_null() {
                return PiqpResult::default();
            }
            let r = &*result;
            PiqpResult {
                x: read_vec(r.x, n),
                y: read_vec(r.y, p),
                z: read_vec(r.z, m),
                z_lb: read_vec(r.z_lb, n),
                z_ub: read_vec(r.z_ub, n),
                s: read_vec(r.s, m),
                s_lb: read_vec(r.s_lb, n),
                s_ub: read_vec(r.s_ub, n),
                info: (&r.info).into(),
            }
        }
    }
}

impl PiqpLibrary<f64> for NativePiqp {
    type Workspace = NativeWorkspace;

    fn setup(
        &self,
        data: &PiqpData<f64>,
        settings: &PiqpSettings<f64>,
    ) -> Result<NativeWorkspace, SolverError> {
        let settings: ffi::piqp_settings = settings.into();
        let mut native = NativeData::new(data)?;

        let workspace = NonNull::new(native.setup(&settings)).ok_or(SolverError::Setup {
            solver: "PIQP",
            reason: format!("native {} setup returned no workspace", data.backend()),
        })?;

        Ok(NativeWorkspace {
            workspace,
            n: data.n,
            p: data.p(),
            m: data.m(),
        })
    }
}
