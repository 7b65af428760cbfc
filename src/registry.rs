use crate::parser::{
    CodeforcesParser, EjudgeParser, Parse, PcmsParser, TestsysParser, YandexParser,
};
use crate::renderer::{EjudgeRenderer, Render, TestsysRenderer};

pub const PARSER_NAMES: [&str; 5] = ["codeforces", "ejudge", "pcms", "testsys", "yandex"];
pub const RENDERER_NAMES: [&str; 2] = ["ejudge", "testsys"];

/// Resolves a parser by its format name, case-insensitively.
pub fn parser(name: &str) -> Option<Box<dyn Parse>> {
    match name.to_ascii_lowercase().as_str() {
        "codeforces" => Some(Box::new(CodeforcesParser)),
        "ejudge" => Some(Box::new(EjudgeParser)),
        "pcms" => Some(Box::new(PcmsParser)),
        "testsys" => Some(Box::new(TestsysParser)),
        "yandex" => Some(Box::new(YandexParser)),
        _ => None,
    }
}

/// Resolves a renderer by its format name, case-insensitively.
pub fn renderer(name: &str) -> Option<Box<dyn Render>> {
    match name.to_ascii_lowercase().as_str() {
        "ejudge" => Some(Box::new(EjudgeRenderer)),
        "testsys" => Some(Box::new(TestsysRenderer)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_advertised_name_resolves() {
        for name in &PARSER_NAMES {
            assert!(parser(name).is_some(), "parser {} missing", name);
        }
        for name in &RENDERER_NAMES {
            assert!(renderer(name).is_some(), "renderer {} missing", name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(parser("EjUdGe").is_some());
        assert!(renderer("TESTSYS").is_some());
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert!(parser("domjudge").is_none());
        assert!(renderer("pcms").is_none());
    }
}
