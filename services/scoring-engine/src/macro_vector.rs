//! Macro-vector derivation
//!
//! Collapses a full selection into the six CVSS v4.0 equivalence classes.
//! All classes are computed from *effective* metric values: environmental
//! modified metrics override their Base counterparts, and unset threat and
//! security-requirement metrics assume the worst case.

use types::macro_vector::MacroVector;
use types::metric::NOT_DEFINED;
use types::selection::Selection;

/// Derives the macro vector used to index the scoring tables
pub trait MacroVectorDeriver: Send + Sync {
    fn derive(&self, selection: &Selection) -> MacroVector;
}

/// Effective value of a metric for scoring purposes.
///
/// - `E:X` counts as `A` (attacked)
/// - `CR/IR/AR:X` count as `H`
/// - a defined `M<metric>` replaces the selected Base value
pub fn effective_value<'s>(selection: &'s Selection, metric: &str) -> &'s str {
    let selected = selection.get(metric).unwrap_or(NOT_DEFINED);

    if selected == NOT_DEFINED {
        match metric {
            "E" => return "A",
            "CR" | "IR" | "AR" => return "H",
            _ => {}
        }
    }

    let modified = format!("M{}", metric);
    match selection.get(&modified) {
        Some(value) if value != NOT_DEFINED => value,
        _ => selected,
    }
}

/// Standard CVSS v4.0 EQ1..EQ6 derivation
#[derive(Debug, Clone, Copy, Default)]
pub struct Cvss4MacroVectorDeriver;

impl Cvss4MacroVectorDeriver {
    fn eq1(m: &impl Fn(&str) -> bool) -> u8 {
        let av_n = m("AV:N");
        let pr_n = m("PR:N");
        let ui_n = m("UI:N");

        if av_n && pr_n && ui_n {
            0
        } else if (av_n || pr_n || ui_n) && !m("AV:P") {
            1
        } else {
            2
        }
    }

    fn eq2(m: &impl Fn(&str) -> bool) -> u8 {
        if m("AC:L") && m("AT:N") {
            0
        } else {
            1
        }
    }

    fn eq3(m: &impl Fn(&str) -> bool) -> u8 {
        if m("VC:H") && m("VI:H") {
            0
        } else if m("VC:H") || m("VI:H") || m("VA:H") {
            1
        } else {
            2
        }
    }

    fn eq4(m: &impl Fn(&str) -> bool) -> u8 {
        if m("MSI:S") || m("MSA:S") {
            0
        } else if m("SC:H") || m("SI:H") || m("SA:H") {
            1
        } else {
            2
        }
    }

    fn eq5(m: &impl Fn(&str) -> bool) -> u8 {
        if m("E:A") {
            0
        } else if m("E:P") {
            1
        } else {
            2
        }
    }

    fn eq6(m: &impl Fn(&str) -> bool) -> u8 {
        let high = (m("CR:H") && m("VC:H")) || (m("IR:H") && m("VI:H")) || (m("AR:H") && m("VA:H"));
        if high {
            0
        } else {
            1
        }
    }
}

impl MacroVectorDeriver for Cvss4MacroVectorDeriver {
    fn derive(&self, selection: &Selection) -> MacroVector {
        // "AV:N" → effective AV is N
        let m = |pair: &str| match pair.split_once(':') {
            Some((metric, value)) => effective_value(selection, metric) == value,
            None => false,
        };

        MacroVector::new([
            Self::eq1(&m),
            Self::eq2(&m),
            Self::eq3(&m),
            Self::eq4(&m),
            Self::eq5(&m),
            Self::eq6(&m),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::catalog::MetricCatalog;

    fn selection(pairs: &[(&str, &str)]) -> Selection {
        let catalog = MetricCatalog::cvss_v4();
        let mut selection = Selection::from_defaults(&catalog);
        for (code, value) in pairs {
            selection.set(&catalog, code, value).unwrap();
        }
        selection
    }

    fn derive(pairs: &[(&str, &str)]) -> String {
        Cvss4MacroVectorDeriver.derive(&selection(pairs)).to_string()
    }

    #[test]
    fn test_defaults() {
        // AV/PR/UI all N, AC:L AT:N, no impact, E→A, CR/IR/AR→H but no VC/VI/VA:H
        assert_eq!(derive(&[]), "002201");
    }

    #[test]
    fn test_worst_case_vector() {
        let mv = derive(&[
            ("VC", "H"),
            ("VI", "H"),
            ("VA", "H"),
            ("SC", "H"),
            ("SI", "H"),
            ("SA", "H"),
        ]);
        assert_eq!(mv, "000100");
    }

    #[test]
    fn test_eq1_levels() {
        assert_eq!(&derive(&[("PR", "L")])[..1], "1");
        assert_eq!(&derive(&[("AV", "P")])[..1], "2");
        assert_eq!(&derive(&[("AV", "L"), ("PR", "L"), ("UI", "P")])[..1], "2");
        assert_eq!(&derive(&[("AV", "L"), ("PR", "L")])[..1], "1");
    }

    #[test]
    fn test_eq4_safety_overrides() {
        assert_eq!(&derive(&[("MSI", "S")])[3..4], "0");
        assert_eq!(&derive(&[("SA", "H")])[3..4], "1");
    }

    #[test]
    fn test_eq5_follows_exploit_maturity() {
        assert_eq!(&derive(&[("E", "A")])[4..5], "0");
        assert_eq!(&derive(&[("E", "P")])[4..5], "1");
        assert_eq!(&derive(&[("E", "U")])[4..5], "2");
    }

    #[test]
    fn test_eq6_security_requirements() {
        // CR defaults to H when unset
        assert_eq!(&derive(&[("VC", "H")])[5..], "0");
        assert_eq!(&derive(&[("VC", "H"), ("CR", "L"), ("IR", "L"), ("AR", "L")])[5..], "1");
    }

    #[test]
    fn test_modified_metric_overrides_base() {
        let sel = selection(&[("AV", "N"), ("MAV", "P")]);
        assert_eq!(effective_value(&sel, "AV"), "P");
        let sel = selection(&[("AV", "L"), ("MAV", "X")]);
        assert_eq!(effective_value(&sel, "AV"), "L");
    }

    #[test]
    fn test_unset_requirements_assume_worst_case() {
        let sel = selection(&[]);
        assert_eq!(effective_value(&sel, "E"), "A");
        assert_eq!(effective_value(&sel, "CR"), "H");
        assert_eq!(effective_value(&sel, "S"), "X");
    }
}
