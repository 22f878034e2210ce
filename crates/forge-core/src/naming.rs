//! Timestamped names for staged artifacts.
//!
//! Format: `{base}_{YYYYMMDD}_{HHMMSS}.{extension}`, e.g.
//! `mortgage_model_20241215_143532.yaml`.
//!
//! Names have one-second resolution: [`generate_name`] called twice within the
//! same wall-clock second returns the same name. Callers that may stage more
//! than one artifact per second should use a [`NameGenerator`], which appends
//! a counter to same-second repeats.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};

/// `strftime` pattern for the timestamp portion of a name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name an artifact after the current local time.
#[must_use]
pub fn generate_name(base: &str, extension: &str) -> String {
    generate_name_at(base, extension, Local::now().naive_local())
}

/// Name an artifact after an explicit timestamp (sub-second part ignored).
#[must_use]
pub fn generate_name_at(base: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{base}_{}.{extension}", at.format(TIMESTAMP_FORMAT))
}

/// Issues names that are distinct for the lifetime of the generator.
///
/// The first name in a given second has the plain format. Later names with
/// the same base and second get `_2`, `_3`, ... before the extension.
#[derive(Debug, Default)]
pub struct NameGenerator {
    second: String,
    issued: HashMap<String, u32>,
}

impl NameGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, base: &str, extension: &str) -> String {
        self.issue_at(base, extension, Local::now().naive_local())
    }

    pub fn issue_at(&mut self, base: &str, extension: &str, at: NaiveDateTime) -> String {
        let second = at.format(TIMESTAMP_FORMAT).to_string();
        if second != self.second {
            self.issued.clear();
            self.second.clone_from(&second);
        }

        let stem = format!("{base}_{second}");
        let count = self.issued.entry(stem.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            format!("{stem}.{extension}")
        } else {
            format!("{stem}_{count}.{extension}")
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 15)
            .unwrap()
            .and_hms_milli_opt(h, m, s, 250)
            .unwrap()
    }

    fn is_well_formed(name: &str, base: &str, extension: &str) -> bool {
        let Some(rest) = name.strip_prefix(&format!("{base}_")) else {
            return false;
        };
        let Some(stamp) = rest.strip_suffix(&format!(".{extension}")) else {
            return false;
        };
        let bytes = stamp.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'_'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 8 || b.is_ascii_digit())
    }

    #[test]
    fn formats_base_timestamp_and_extension() {
        assert_eq!(
            generate_name_at("mortgage_model", "yaml", at(14, 35, 32)),
            "mortgage_model_20241215_143532.yaml"
        );
    }

    #[test]
    fn names_a_second_apart_differ() {
        let first = generate_name_at("semantic_model", "yaml", at(9, 0, 0));
        let second = generate_name_at(
            "semantic_model",
            "yaml",
            at(9, 0, 0) + Duration::seconds(1),
        );
        assert_ne!(first, second);
        assert!(is_well_formed(&first, "semantic_model", "yaml"));
        assert!(is_well_formed(&second, "semantic_model", "yaml"));
    }

    #[test]
    fn same_second_collides_without_generator() {
        let a = generate_name_at("m", "yaml", at(9, 0, 0));
        let b = generate_name_at("m", "yaml", at(9, 0, 0) + Duration::milliseconds(500));
        assert_eq!(a, b);
    }

    #[test]
    fn live_clock_names_are_well_formed() {
        let name = generate_name("semantic_model", "yaml");
        assert!(is_well_formed(&name, "semantic_model", "yaml"), "{name}");
    }

    #[test]
    fn generator_disambiguates_same_second() {
        let mut names = NameGenerator::new();
        let t = at(9, 0, 0);
        assert_eq!(names.issue_at("m", "yaml", t), "m_20241215_090000.yaml");
        assert_eq!(names.issue_at("m", "yaml", t), "m_20241215_090000_2.yaml");
        assert_eq!(names.issue_at("other", "yaml", t), "other_20241215_090000.yaml");
        assert_eq!(names.issue_at("m", "yaml", t), "m_20241215_090000_3.yaml");
    }

    #[test]
    fn generator_resets_on_new_second() {
        let mut names = NameGenerator::new();
        let t = at(9, 0, 0);
        names.issue_at("m", "yaml", t);
        names.issue_at("m", "yaml", t);
        assert_eq!(
            names.issue_at("m", "yaml", t + Duration::seconds(1)),
            "m_20241215_090001.yaml"
        );
    }
}
