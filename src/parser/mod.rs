use std::path::Path;

use crate::error::ConvertError;
use crate::model::Contest;

pub mod codeforces;
pub mod ejudge;
pub mod pcms;
pub mod testsys;
pub mod yandex;

pub use codeforces::CodeforcesParser;
pub use ejudge::EjudgeParser;
pub use pcms::PcmsParser;
pub use testsys::TestsysParser;
pub use yandex::YandexParser;

/// Turns one raw source into a canonical contest. Implementations hold no
/// state of their own; id remapping and attempt counting live inside a
/// single `parse` call.
pub trait Parse {
    fn parse(&self, input: &Path) -> Result<Contest, ConvertError>;
}
