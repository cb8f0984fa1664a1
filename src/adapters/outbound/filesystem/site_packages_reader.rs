use crate::dependency_tree::domain::{InstalledPackage, PackageName, RequirementSpec, Version};
use crate::ports::outbound::InstalledPackageReader;
use crate::shared::error::DepTreeError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable set by `activate` scripts
const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

/// Folder names checked inside the project when no environment is active
const VENV_FOLDERS: [&str; 2] = [".venv", "venv"];

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// SitePackagesReader adapter reading installed distributions from a virtual environment
///
/// The environment is the explicit `--venv` path if given, else the active
/// `$VIRTUAL_ENV`, else a `.venv` or `venv` folder inside the project.
/// Each `*.dist-info/METADATA` and `*.egg-info` entry of its `site-packages`
/// folder becomes one [`InstalledPackage`].
pub struct SitePackagesReader {
    venv: Option<PathBuf>,
    active_env: Option<PathBuf>,
}

impl SitePackagesReader {
    pub fn new(venv: Option<PathBuf>) -> Self {
        Self {
            venv,
            active_env: std::env::var_os(VIRTUAL_ENV).map(PathBuf::from),
        }
    }

    /// Overrides the environment taken from `$VIRTUAL_ENV`
    pub fn with_active_env(mut self, active_env: Option<PathBuf>) -> Self {
        self.active_env = active_env;
        self
    }

    /// Locates the virtual environment for `project_path`
    pub fn find_venv(&self, project_path: &Path) -> Result<PathBuf> {
        if let Some(venv) = &self.venv {
            if venv.is_dir() {
                return Ok(venv.clone());
            }
            return Err(DepTreeError::VirtualEnvNotFound {
                project_path: venv.clone(),
            }
            .into());
        }

        if let Some(active) = self.active_env.as_ref().filter(|p| p.is_dir()) {
            return Ok(active.clone());
        }

        VENV_FOLDERS
            .iter()
            .map(|folder| project_path.join(folder))
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| {
                DepTreeError::VirtualEnvNotFound {
                    project_path: project_path.to_path_buf(),
                }
                .into()
            })
    }

    /// Locates `site-packages` inside `venv`
    ///
    /// POSIX layouts use `lib/pythonX.Y/site-packages`, Windows uses
    /// `Lib/site-packages`.
    pub fn find_site_packages(venv: &Path) -> Result<PathBuf> {
        let lib = venv.join("lib");
        if let Ok(entries) = fs::read_dir(&lib) {
            let mut candidates: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
                .map(|entry| entry.path().join("site-packages"))
                .filter(|path| path.is_dir())
                .collect();
            candidates.sort();
            if let Some(found) = candidates.into_iter().next() {
                return Ok(found);
            }
        }

        [venv.join("Lib").join("site-packages"), lib.join("site-packages")]
            .into_iter()
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| {
                DepTreeError::SitePackagesNotFound {
                    venv_path: venv.to_path_buf(),
                }
                .into()
            })
    }

    fn metadata_entries(site_packages: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(site_packages).map_err(|e| DepTreeError::FileReadError {
            path: site_packages.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                let name = path.file_name().map(|n| n.to_string_lossy().to_string());
                name.is_some_and(|n| n.ends_with(DIST_INFO_SUFFIX) || n.ends_with(EGG_INFO_SUFFIX))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn read_entry(entry: &Path) -> Result<InstalledPackage> {
        let is_dist_info = entry
            .extension()
            .is_some_and(|ext| ext == "dist-info");

        let (metadata_path, requires_txt) = if is_dist_info {
            (entry.join("METADATA"), None)
        } else if entry.is_dir() {
            (entry.join("PKG-INFO"), Some(entry.join("requires.txt")))
        } else {
            (entry.to_path_buf(), None)
        };

        let content = read_regular_file(&metadata_path, "package metadata")?;
        let headers = MetadataHeaders::parse(&content);

        let mut requirements = headers.requires_dist;
        if let Some(requires_txt) = requires_txt.filter(|p| p.is_file()) {
            let content = read_regular_file(&requires_txt, "requires.txt")?;
            requirements.extend(parse_requires_txt(&content));
        }

        Self::build_package(&metadata_path, headers.name, headers.version, &requirements)
    }

    fn build_package(
        path: &Path,
        name: Option<String>,
        version: Option<String>,
        requirements: &[String],
    ) -> Result<InstalledPackage> {
        let parse_error = |details: String| DepTreeError::MetadataParseError {
            path: path.to_path_buf(),
            details,
        };

        let name = name.ok_or_else(|| parse_error("missing 'Name' header".to_string()))?;
        let version =
            version.ok_or_else(|| parse_error("missing 'Version' header".to_string()))?;

        let name = PackageName::new(&name).map_err(|e| parse_error(e.to_string()))?;
        let version = Version::new(&version).map_err(|e| parse_error(e.to_string()))?;

        let mut requires = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let spec = RequirementSpec::parse(requirement).map_err(|e| parse_error(e.to_string()))?;
            if !spec.is_extra_only() {
                requires.push(spec);
            }
        }

        Ok(InstalledPackage::new(name, version, requires))
    }
}

impl InstalledPackageReader for SitePackagesReader {
    fn read_installed_packages(
        &self,
        project_path: &Path,
        on_progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<InstalledPackage>> {
        let venv = self.find_venv(project_path)?;
        let site_packages = Self::find_site_packages(&venv)?;
        let entries = Self::metadata_entries(&site_packages)?;

        let total = entries.len();
        let mut packages = Vec::with_capacity(total);
        for (index, entry) in entries.iter().enumerate() {
            packages.push(Self::read_entry(entry)?);
            on_progress(index + 1, total);
        }
        Ok(packages)
    }

    fn source_description(&self) -> &str {
        "site-packages"
    }
}

/// The headers of a core metadata file that matter for the tree
#[derive(Debug, Default)]
struct MetadataHeaders {
    name: Option<String>,
    version: Option<String>,
    requires_dist: Vec<String>,
}

impl MetadataHeaders {
    /// Parses RFC 822 style headers; the body after the first blank line is ignored
    fn parse(content: &str) -> Self {
        let mut headers = Self::default();

        for line in content.lines() {
            if line.trim().is_empty() {
                break;
            }
            // Folded continuation of the previous header
            if line.starts_with([' ', '\t']) {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "Name" => headers.name = Some(value),
                "Version" => headers.version = Some(value),
                "Requires-Dist" => headers.requires_dist.push(value),
                _ => {}
            }
        }

        headers
    }
}

/// Section of an egg-info `requires.txt`
enum RequiresSection<'a> {
    /// Lines before the first header
    Base,
    /// `[:marker]`, base requirements conditioned on the environment only
    Marker(&'a str),
    /// `[extra]` or `[extra:marker]`
    Extra,
}

/// Base requirements of an egg-info `requires.txt`
///
/// Requirements under a `[:marker]` header are returned with the marker
/// appended, the way `Requires-Dist` spells them. Sections named after an
/// extra are skipped.
fn parse_requires_txt(content: &str) -> Vec<String> {
    let mut requirements = Vec::new();
    let mut section = RequiresSection::Base;

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match header.split_once(':') {
                Some((extra, marker)) if extra.trim().is_empty() => {
                    RequiresSection::Marker(marker.trim())
                }
                _ => RequiresSection::Extra,
            };
            continue;
        }

        match section {
            RequiresSection::Base => requirements.push(line.to_string()),
            RequiresSection::Marker(marker) => {
                requirements.push(format!("{}; {}", line, marker))
            }
            RequiresSection::Extra => {}
        }
    }

    requirements
}
