use glob::{MatchOptions, glob_with};

/// Expands operands containing glob characters. A pattern without matches
/// (or an invalid one) is kept as-is. Wildcards never match a leading dot,
/// so hidden entries need an explicit `.` in the pattern.
pub fn expand_globs(args: &[String]) -> Vec<String> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let mut expanded_args = Vec::new();

    for arg in args {
        if !(arg.contains('*') || arg.contains('?') || arg.contains('[')) {
            expanded_args.push(arg.clone());
            continue;
        }

        match glob_with(arg, options) {
            Ok(paths) => {
                let mut matched: Vec<String> = paths
                    .flatten()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect();

                if matched.is_empty() {
                    expanded_args.push(arg.clone());
                } else {
                    matched.sort();
                    expanded_args.extend(matched);
                }
            }
            Err(_) => expanded_args.push(arg.clone()),
        }
    }
    expanded_args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_globs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.tmp"), b"").unwrap();
        fs::write(dir.path().join("a.tmp"), b"").unwrap();
        fs::write(dir.path().join("c.txt"), b"").unwrap();

        let pattern = dir.path().join("*.tmp").to_string_lossy().into_owned();
        let expanded = expand_globs(&[pattern]);

        let a = dir.path().join("a.tmp").to_string_lossy().into_owned();
        let b = dir.path().join("b.tmp").to_string_lossy().into_owned();
        assert_eq!(expanded, vec![a, b]);
    }

    #[test]
    fn test_wildcard_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".secret"), b"").unwrap();
        fs::write(dir.path().join("a"), b"").unwrap();

        let star = dir.path().join("*").to_string_lossy().into_owned();
        let a = dir.path().join("a").to_string_lossy().into_owned();
        assert_eq!(expand_globs(&[star]), vec![a]);

        let dotted = dir.path().join(".s*").to_string_lossy().into_owned();
        let secret = dir.path().join(".secret").to_string_lossy().into_owned();
        assert_eq!(expand_globs(&[dotted]), vec![secret]);
    }

    #[test]
    fn test_expand_globs_no_match() {
        let args = vec!["*.nomatch-lsl".to_string(), "plain".to_string()];
        assert_eq!(expand_globs(&args), args);
    }

    #[test]
    fn test_invalid_pattern_kept() {
        let args = vec!["[".to_string()];
        assert_eq!(expand_globs(&args), args);
    }
}
