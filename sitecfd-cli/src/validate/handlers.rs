use anyhow::{Result, bail};
use clap::ArgMatches;

use sitecfd_core::models::{ReadDensityTable, SiteTable};

/// Outcome of checking one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCheck {
    pub file: String,
    pub valid: bool,
    pub detail: String,
}

impl FileCheck {
    fn ok(file: &str, detail: String) -> Self {
        FileCheck {
            file: file.to_string(),
            valid: true,
            detail,
        }
    }

    fn invalid(file: &str, detail: String) -> Self {
        FileCheck {
            file: file.to_string(),
            valid: false,
            detail,
        }
    }
}

impl std::fmt::Display for FileCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.valid { "OK" } else { "INVALID" };
        write!(f, "{}\t{}\t{}", self.file, status, self.detail)
    }
}

pub fn check_sites(path: &str) -> FileCheck {
    match SiteTable::try_from(path) {
        Ok(table) if table.is_empty() => FileCheck::invalid(path, "no sites".to_string()),
        Ok(table) => {
            let counts = table.strand_counts();
            FileCheck::ok(
                path,
                format!(
                    "{} sites ({} forward, {} reverse, {} unrecognized strand)",
                    table.len(),
                    counts.forward,
                    counts.reverse,
                    counts.unrecognized
                ),
            )
        }
        Err(e) => FileCheck::invalid(path, e.to_string()),
    }
}

pub fn check_reads(path: &str) -> FileCheck {
    match ReadDensityTable::try_from(path) {
        Ok(table) if table.is_empty() => FileCheck::invalid(path, "no bins".to_string()),
        Ok(table) => FileCheck::ok(
            path,
            format!(
                "{} bins on {} chromosomes, {} reads",
                table.len(),
                table.chromosomes().len(),
                table.total_reads()
            ),
        ),
        Err(e) => FileCheck::invalid(path, e.to_string()),
    }
}

pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let sites_path = matches
        .get_one::<String>("sites")
        .expect("--sites is required");

    let read_paths: Vec<&String> = matches
        .get_many::<String>("reads")
        .expect("--reads is required")
        .collect();

    let mut checks = vec![check_sites(sites_path)];
    checks.extend(read_paths.iter().map(|p| check_reads(p)));

    for check in &checks {
        println!("{}", check);
    }

    let invalid = checks.iter().filter(|c| !c.valid).count();
    if invalid > 0 {
        bail!("{} of {} files are invalid", invalid, checks.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    use crate::validate::cli::create_validate_cli;

    #[fixture]
    fn workdir() -> TempDir {
        tempdir().unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[rstest]
    fn test_check_valid_sites(workdir: TempDir) {
        let path = write(
            workdir.path(),
            "sites.txt",
            "chr1\ta\t100\tF\nchr1\tb\t200\tR\nchr2\tc\t300\t+\n",
        );
        let check = check_sites(&path);
        assert!(check.valid);
        assert_eq!(
            check.detail,
            "3 sites (1 forward, 1 reverse, 1 unrecognized strand)"
        );
    }

    #[rstest]
    #[case("chr1\ta\t100\n")]
    #[case("chr1\ta\tnot_a_number\tF\n")]
    #[case("")]
    fn test_check_invalid_sites(workdir: TempDir, #[case] contents: &str) {
        let path = write(workdir.path(), "sites.txt", contents);
        assert!(!check_sites(&path).valid);
    }

    #[rstest]
    fn test_check_reads(workdir: TempDir) {
        let good = write(workdir.path(), "good.sgr", "chr1\t0\t1\nchr1\t10\t2\nchr2\t0\t3\n");
        let check = check_reads(&good);
        assert!(check.valid);
        assert_eq!(check.detail, "3 bins on 2 chromosomes, 6 reads");

        let bad = write(workdir.path(), "bad.sgr", "chr1\t0\t1\tx\n");
        let check = check_reads(&bad);
        assert!(!check.valid);
        assert!(check.to_string().contains("INVALID"));
    }

    #[rstest]
    fn test_run_validate_fails_on_any_invalid_file(workdir: TempDir) {
        let sites = write(workdir.path(), "sites.txt", "chr1\ta\t100\tF\n");
        let good = write(workdir.path(), "good.sgr", "chr1\t0\t1\n");
        let bad = write(workdir.path(), "bad.sgr", "chr1\tzero\t1\n");

        let ok = create_validate_cli()
            .try_get_matches_from(["validate", "--sites", sites.as_str(), "--reads", good.as_str()])
            .unwrap();
        assert!(run_validate(&ok).is_ok());

        let not_ok = create_validate_cli()
            .try_get_matches_from([
                "validate",
                "--sites",
                sites.as_str(),
                "--reads",
                good.as_str(),
                bad.as_str(),
            ])
            .unwrap();
        assert!(run_validate(&not_ok).is_err());
    }
}
