pub mod attempt;
pub mod error;
pub mod model;
pub mod parser;
pub mod registry;
pub mod renderer;
pub mod verdict;

pub use error::ConvertError;
pub use model::{Contest, Problem, Submission, Team};
pub use verdict::{Verdict, VerdictFormat};
