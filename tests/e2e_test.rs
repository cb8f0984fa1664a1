/// End-to-end tests for the CLI
///
/// Each test builds a throwaway project: a `pyproject.toml` plus a fake
/// virtual environment whose `site-packages` holds `*.dist-info/METADATA`
/// files, then runs the binary against it.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn write_pyproject_toml(dir: &Path, content: &str) {
    fs::write(dir.join("pyproject.toml"), content).unwrap();
}

fn site_packages(dir: &Path) -> PathBuf {
    let path = dir.join(".venv/lib/python3.12/site-packages");
    fs::create_dir_all(&path).unwrap();
    path
}

fn write_dist_info(site: &Path, name: &str, version: &str, requires: &[&str]) {
    let dist_info = site.join(format!("{}-{}.dist-info", name, version));
    fs::create_dir_all(&dist_info).unwrap();

    let mut metadata = format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n", name, version);
    for requirement in requires {
        metadata.push_str(&format!("Requires-Dist: {}\n", requirement));
    }
    fs::write(dist_info.join("METADATA"), metadata).unwrap();
}

/// mock 2.0 -> pbr>=0.11, pbr 1.0
fn create_simple_project(dir: &Path) {
    write_pyproject_toml(
        dir,
        r#"[project]
name = "demo"
version = "0.1.0"
dependencies = ["mock"]
"#,
    );
    let site = site_packages(dir);
    write_dist_info(&site, "mock", "2.0", &["pbr>=0.11"]);
    write_dist_info(&site, "pbr", "1.0", &[]);
}

/// mock 2.0 -> six, six 1.0 -> mock>=3.0
fn create_conflicting_project(dir: &Path) {
    write_pyproject_toml(
        dir,
        r#"[project]
name = "demo"
version = "0.1.0"
dependencies = ["mock"]
"#,
    );
    let site = site_packages(dir);
    write_dist_info(&site, "mock", "2.0", &["six"]);
    write_dist_info(&site, "six", "1.0", &["mock>=3.0"]);
}

fn path_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("pkgtree").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("pkgtree").arg("--version").assert().code(0);
    }

    /// Exit code 0: conflicts alone do not fail the run
    #[test]
    fn test_exit_code_conflicts_without_strict() {
        let dir = TempDir::new().unwrap();
        create_conflicting_project(dir.path());

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .assert()
            .code(0);
    }

    /// Exit code 1: --strict with version conflicts
    #[test]
    fn test_exit_code_strict_with_conflicts() {
        let dir = TempDir::new().unwrap();
        create_conflicting_project(dir.path());

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "--strict"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("1 conflicts: mock"));
    }

    /// Exit code 0: --strict without conflicts
    #[test]
    fn test_exit_code_strict_without_conflicts() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "--strict"])
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("pkgtree")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("pkgtree")
            .args(["-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent project path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("pkgtree")
            .args(["-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("pkgtree")
            .args(["-p", "Cargo.toml"])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - no virtual environment
    #[test]
    fn test_exit_code_missing_virtual_env() {
        let dir = TempDir::new().unwrap();
        write_pyproject_toml(dir.path(), "[project]\nname = \"demo\"\n");

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains(
                "Could not find virtual environment",
            ));
    }

    /// Exit code 3: Application error - no pyproject.toml
    #[test]
    fn test_exit_code_missing_pyproject() {
        let dir = TempDir::new().unwrap();
        let site = site_packages(dir.path());
        write_dist_info(&site, "mock", "2.0", &[]);

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("pyproject.toml not found"));
    }
}

mod output_tests {
    use super::*;

    #[test]
    fn test_text_report() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());

        let output = cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let expected = [
            "Dependency tree:",
            "install_requires:",
            "----------------",
            "  mock==2.0",
            "    pbr [required: >=0.11, installed: 1.0]",
            "",
        ]
        .join("\n");
        assert_eq!(stdout.trim_end(), expected.trim_end());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Detected 2 installed package(s)"));
    }

    #[test]
    fn test_text_report_conflict_markers() {
        let dir = TempDir::new().unwrap();
        create_conflicting_project(dir.path());

        let output = cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "--show-cycles"])
            .output()
            .unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("    six [required: Any, installed: 1.0]"));
        assert!(stdout.contains("      mock [required: >=3.0, installed: 2.0] CONFLICT!"));
        assert!(stdout.contains("        six [required: Any, installed: 1.0] (cyclic)"));
        assert!(stdout.contains("1 cycles found:\nsix -> mock -> six"));
    }

    #[test]
    fn test_unused_packages_listed_under_other() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());
        write_dist_info(&site_packages(dir.path()), "pip", "24.2", &[]);

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("other:\n-----\n  pip==24.2"));
    }

    #[test]
    fn test_absent_requirement_shown_on_request() {
        let dir = TempDir::new().unwrap();
        write_pyproject_toml(
            dir.path(),
            r#"[project]
name = "demo"
dependencies = ["mock"]
"#,
        );
        let site = site_packages(dir.path());
        write_dist_info(&site, "mock", "2.0", &["ghost>=1.0"]);

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "--show-absent"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "    ghost [required: >=1.0, installed: absent]",
            ));
    }

    #[test]
    fn test_json_report() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());

        let output = cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "-f", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["metadata"]["tool"]["name"], "pkgtree");
        assert_eq!(json["metadata"]["project"], "demo");
        assert_eq!(json["metadata"]["source"], "site-packages");

        let root = &json["sections"][0]["packages"][0];
        assert_eq!(json["sections"][0]["name"], "install_requires");
        assert_eq!(root["name"], "mock");
        assert_eq!(root["installed"], "2.0");
        assert_eq!(root["dependencies"][0]["name"], "pbr");
        assert_eq!(root["dependencies"][0]["required"], ">=0.11");
        assert!(json["conflicts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_explicit_venv() {
        let dir = TempDir::new().unwrap();
        write_pyproject_toml(
            dir.path(),
            "[project]\nname = \"demo\"\ndependencies = [\"pbr\"]\n",
        );
        let env_dir = TempDir::new().unwrap();
        let site = env_dir.path().join("lib/python3.11/site-packages");
        fs::create_dir_all(&site).unwrap();
        write_dist_info(&site, "pbr", "6.1.0", &[]);

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args([
                "-p",
                path_arg(&dir),
                "--venv",
                env_dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("  pbr==6.1.0"));
    }

    #[test]
    fn test_lockfile_source() {
        let dir = TempDir::new().unwrap();
        write_pyproject_toml(
            dir.path(),
            "[project]\nname = \"demo\"\ndependencies = [\"requests>=2.31\"]\n",
        );
        fs::write(
            dir.path().join("uv.lock"),
            r#"version = 1
requires-python = ">=3.12"

[[package]]
name = "demo"
version = "0.1.0"
source = { editable = "." }
dependencies = [
    { name = "requests" },
]

[package.metadata]
requires-dist = [{ name = "requests", specifier = ">=2.31" }]

[[package]]
name = "requests"
version = "2.32.3"
source = { registry = "https://pypi.org/simple" }
dependencies = [
    { name = "certifi" },
]

[[package]]
name = "certifi"
version = "2024.8.30"
source = { registry = "https://pypi.org/simple" }
"#,
        )
        .unwrap();

        let output = cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args(["-p", path_arg(&dir), "--lockfile"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("  requests==2.32.3\n    certifi [required: Any, installed: 2024.8.30]"));
        assert!(stdout.contains("other:\n-----\n  demo==0.1.0"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("uv.lock"));
    }

    #[test]
    fn test_output_file() {
        let dir = TempDir::new().unwrap();
        create_simple_project(dir.path());
        let output_path = dir.path().join("report.txt");

        cargo_bin_cmd!("pkgtree")
            .env_remove("VIRTUAL_ENV")
            .args([
                "-p",
                path_arg(&dir),
                "-o",
                output_path.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.starts_with("Dependency tree:\n"));
        assert!(content.contains("  mock==2.0"));
    }
}
