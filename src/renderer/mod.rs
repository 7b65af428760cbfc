use std::io::Write;

use crate::error::ConvertError;
use crate::model::Contest;

pub mod ejudge;
pub mod testsys;

pub use ejudge::EjudgeRenderer;
pub use testsys::TestsysRenderer;

/// Serializes one canonical contest into a target wire format. Callers that
/// must not leave partial files behind render into a buffer first and write
/// it out only on success.
pub trait Render {
    fn render(&self, contest: &Contest, sink: &mut dyn Write) -> Result<(), ConvertError>;
}
