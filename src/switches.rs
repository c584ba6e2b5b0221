//! Single-character switches
//!
//! Any argument starting with `-` is a bundle of switches, one per
//! character after the leading dash, so `-fv` and `-f -v` are the same.
//! Unknown characters are collected for reporting and never stop the run.
//!
//! Long options (`--dir <DIR>`) are separated out first by [`split_args`],
//! so they are recognized wherever they appear on the command line.

use std::ffi::OsString;

/// Parsed switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Switches {
    /// `f`: regenerate every golden file before comparing
    pub override_goldens: bool,
    /// `v`: show exit code and output of abnormally exiting cases
    pub verbose: bool,
    /// Unrecognized switch characters, in the order given
    pub unknown: Vec<char>,
}

impl Switches {
    /// Parse switch bundles. Arguments not starting with `-` are ignored.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut switches = Switches::default();
        for arg in args {
            let arg = arg.as_ref();
            let Some(bundle) = arg.strip_prefix('-') else {
                tracing::debug!(arg, "ignoring non-switch argument");
                continue;
            };
            for c in bundle.chars() {
                match c {
                    'f' => switches.override_goldens = true,
                    'v' => switches.verbose = true,
                    other => switches.unknown.push(other),
                }
            }
        }
        switches
    }

    /// Report lines for unknown switches, one per character
    pub fn unknown_lines(&self) -> Vec<String> {
        self.unknown
            .iter()
            .map(|c| format!("Unknown flag: `{}`", c))
            .collect()
    }
}

/// Split raw arguments into switch bundles and known long options.
///
/// `long_option` returns `None` for an unknown long name, otherwise whether
/// the option takes a value. Known long options are returned in order,
/// together with their separate value argument if they take one. Every
/// other argument starting with `-` is a switch bundle. Remaining
/// arguments are dropped.
pub fn split_args<I, F>(args: I, long_option: F) -> (Vec<String>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
    F: Fn(&str) -> Option<bool>,
{
    let mut bundles = Vec::new();
    let mut options = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();

        if let Some(long) = text.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            if let Some(takes_value) = long_option(name) {
                options.push(arg);
                if takes_value && !inline_value {
                    if let Some(value) = args.next() {
                        options.push(value);
                    }
                }
                continue;
            }
        }

        if text.starts_with('-') {
            bundles.push(text);
        } else {
            tracing::debug!(arg = %text, "ignoring non-switch argument");
        }
    }

    (bundles, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(name: &str) -> Option<bool> {
        match name {
            "dir" | "program" => Some(true),
            "help" => Some(false),
            _ => None,
        }
    }

    fn split(args: &[&str]) -> (Vec<String>, Vec<OsString>) {
        split_args(args.iter().map(OsString::from), known)
    }

    #[test]
    fn test_bundled_and_separate_are_equal() {
        assert_eq!(Switches::parse(["-fv"]), Switches::parse(["-f", "-v"]));
        let s = Switches::parse(["-vf"]);
        assert!(s.override_goldens);
        assert!(s.verbose);
        assert!(s.unknown.is_empty());
    }

    #[test]
    fn test_no_switches() {
        let s = Switches::parse(Vec::<String>::new());
        assert_eq!(s, Switches::default());
    }

    #[test]
    fn test_unknown_switch_is_reported_not_fatal() {
        let s = Switches::parse(["-zv", "-q"]);
        assert!(s.verbose);
        assert!(!s.override_goldens);
        assert_eq!(s.unknown, vec!['z', 'q']);
        assert_eq!(s.unknown_lines(), vec!["Unknown flag: `z`", "Unknown flag: `q`"]);
    }

    #[test]
    fn test_plain_arguments_ignored() {
        let s = Switches::parse(["tests", "fv"]);
        assert_eq!(s, Switches::default());
    }

    #[test]
    fn test_lone_dash_and_double_dash() {
        assert_eq!(Switches::parse(["-"]), Switches::default());
        // Every character after the first dash is a switch, dash included.
        assert_eq!(Switches::parse(["--f"]).unknown, vec!['-']);
        assert!(Switches::parse(["--f"]).override_goldens);
    }

    #[test]
    fn test_split_long_option_after_bundle() {
        let (bundles, options) = split(&["--program", "cat", "-z", "--dir", "/tmp/pd", "-v"]);
        assert_eq!(bundles, vec!["-z", "-v"]);
        assert_eq!(options, vec!["--program", "cat", "--dir", "/tmp/pd"]);
    }

    #[test]
    fn test_split_inline_value_and_flag_option() {
        let (bundles, options) = split(&["-f", "--dir=cases", "--help", "-v"]);
        assert_eq!(bundles, vec!["-f", "-v"]);
        assert_eq!(options, vec!["--dir=cases", "--help"]);
    }

    #[test]
    fn test_split_value_that_looks_like_a_switch() {
        let (bundles, options) = split(&["--program", "-weird", "-f"]);
        assert_eq!(bundles, vec!["-f"]);
        assert_eq!(options, vec!["--program", "-weird"]);
    }

    #[test]
    fn test_split_unknown_long_is_a_bundle() {
        let (bundles, options) = split(&["--zap", "--", "stray", "-"]);
        assert_eq!(bundles, vec!["--zap", "--", "-"]);
        assert!(options.is_empty());

        let switches = Switches::parse(&bundles);
        assert_eq!(switches.unknown, vec!['-', 'z', 'a', 'p', '-']);
    }
}
