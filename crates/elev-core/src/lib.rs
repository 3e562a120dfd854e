//! Dashboard session for the school climate survey.
//!
//! [`Dashboard`] owns the loaded data, the current [`Selection`](elev_model::Selection)
//! and a memoized [`DashboardView`]. Loads and comparison fetches run as
//! detached requests guarded by generation tokens.

pub mod generation;
pub mod session;
pub mod versioned;
pub mod view;

pub use generation::{Generation, GenerationToken};
pub use session::{
    ComparisonOutcome, ComparisonRequest, Dashboard, LoadOutcome, LoadRequest, LoadState,
    LoadedData, SourceModes,
};
pub use versioned::Versioned;
pub use view::{DashboardView, Trends};
