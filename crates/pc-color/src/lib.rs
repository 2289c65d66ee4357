//! Frame-based path coloring of plane triangulations.
//!
//! Two algorithms live here, both built on the same LIFO frame stack in
//! [`frame`]: [`poh`] assigns a fixed 3-color palette ("P3-color"),
//! [`hartman`] assigns colors drawn from a per-vertex admissible list
//! ("P3-choose"). [`verify`] checks that a finished coloring actually has
//! the path property either algorithm promises.

pub mod frame;
pub mod hartman;
pub mod poh;
pub mod verify;

pub use frame::{BoundaryMark, CaseCoverage, Frame};
pub use poh::{p3_color, P3ColorError, P3ColorOutput, X_COLOR, Y_COLOR};
pub use hartman::{p3_choose, ChooseCoverage, P3ChooseError, P3ChooseOutput};
pub use verify::{verify_path_coloring, VerifyOutcome};
