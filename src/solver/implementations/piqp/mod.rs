//! Adapter for the PIQP proximal interior point solver.
//!
//! PIQP is reached through the [`PiqpLibrary`] trait.  A binding to the
//! native C library is provided with the `piqp` feature, which links
//! against `piqpc`.

mod backend;
mod data;
mod result;
mod settings;
mod solve;
mod traits;

pub use backend::*;
pub use data::*;
pub use result::*;
pub use settings::*;
pub use solve::*;
pub use traits::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "piqp")] {
        pub mod ffi;
        mod native;
        pub use native::*;
    }
}
