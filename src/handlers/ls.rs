use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use log::warn;
use std::io::Write;
use std::path::Path;
use crate::listing::Format;
use crate::listing::collector::collect;
use crate::listing::platform::Platform;
use crate::listing::render::render;
use crate::utils::expand_globs;

pub const DEFAULT_OPERAND: &str = ".";

/// Lists every operand in turn. Returns `false` if any of them failed;
/// a failure never stops the remaining operands.
pub fn handle_ls<W: Write>(
    out: &mut W,
    args: &[String],
    format: Format,
    platform: &dyn Platform,
) -> Result<bool> {
    let mut operands = expand_globs(args);
    if operands.is_empty() {
        operands.push(DEFAULT_OPERAND.to_string());
    }

    let show_header = operands.len() > 1;
    let mut all_ok = true;

    for (i, operand) in operands.iter().enumerate() {
        if show_header {
            if i > 0 {
                writeln!(out).context("Failed to write listing")?;
            }
            writeln!(out, "{}:", operand).context("Failed to write listing")?;
        }

        match collect(Path::new(operand), format.include_hidden, platform) {
            Ok(listing) => {
                render(&mut *out, listing, format, platform, Local::now())
                    .context("Failed to write listing")?;
            }
            Err(e) => {
                warn!("Listing {} failed: {:?}", e.path().display(), e);
                // Keep stdout and stderr in order on a terminal.
                out.flush().context("Failed to write listing")?;
                eprintln!("{} {}", "lsl:".red().bold(), e);
                all_ok = false;
            }
        }
    }

    out.flush().context("Failed to write listing")?;
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::collector::tests::FakePlatform;
    use std::fs;

    fn run(args: &[String], format: Format) -> (String, bool) {
        let mut out = Vec::new();
        let ok = handle_ls(&mut out, args, format, &FakePlatform::new()).unwrap();
        (String::from_utf8(out).unwrap(), ok)
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_single_directory_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), vec![b'x'; 100]).unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::write(dir.path().join(".hidden"), b"").unwrap();

        let (text, ok) = run(&[arg(dir.path())], Format::default());
        assert!(ok);
        assert_eq!(text, "a.txt  b.txt  \n");

        let (text, ok) = run(&[arg(dir.path())], Format { include_hidden: true, long: false });
        assert!(ok);
        assert_eq!(text, ".  ..  .hidden  a.txt  b.txt  \n");
    }

    #[test]
    fn test_multiple_operands_labelled() {
        let one = tempfile::tempdir().unwrap();
        let two = tempfile::tempdir().unwrap();
        fs::write(one.path().join("x"), b"").unwrap();
        fs::write(two.path().join("y"), b"").unwrap();

        let args = [arg(one.path()), arg(two.path())];
        let (text, ok) = run(&args, Format::default());
        assert!(ok);
        assert_eq!(text, format!("{}:\nx  \n\n{}:\ny  \n", args[0], args[1]));
    }

    #[test]
    fn test_failure_does_not_stop_later_operands() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z"), b"").unwrap();
        let missing = dir.path().join("missing");

        let args = [arg(&missing), arg(dir.path())];
        let (text, ok) = run(&args, Format::default());
        assert!(!ok);
        assert!(text.ends_with(&format!("{}:\nz  \n", args[1])));
    }

    #[test]
    fn test_long_single_file_operand() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"hello").unwrap();

        let (text, ok) = run(&[arg(&file)], Format { include_hidden: false, long: true });
        assert!(ok);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with('-'));
        assert!(text.contains(" alice staff 5 "));
        assert!(text.trim_end().ends_with(&arg(&file)));
    }

    #[test]
    fn test_long_directory_scenario() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), vec![b'x'; 100]).unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::write(dir.path().join(".hidden"), b"").unwrap();
        for name in ["a.txt", "b.txt"] {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(dir.path().join(name), fs::Permissions::from_mode(0o644)).unwrap();
        }

        let (text, ok) = run(&[arg(dir.path())], Format { include_hidden: false, long: true });
        assert!(ok);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("total "));
        assert!(lines[1].starts_with("-rw-r--r-- ") && lines[1].ends_with(" a.txt"));
        assert!(lines[2].starts_with("-rw-r--r-- ") && lines[2].ends_with(" b.txt"));
        assert!(lines[2].contains(" 100 "));
    }

    #[test]
    fn test_glob_operand() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.log"), b"").unwrap();
        fs::write(dir.path().join("two.log"), b"").unwrap();
        let pattern = arg(&dir.path().join("*.log"));

        let (text, ok) = run(&[pattern], Format::default());
        assert!(ok);
        let one = arg(&dir.path().join("one.log"));
        let two = arg(&dir.path().join("two.log"));
        assert_eq!(text, format!("{one}:\n{one}  \n\n{two}:\n{two}  \n"));
    }
}
