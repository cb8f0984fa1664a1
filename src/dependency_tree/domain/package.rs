use super::RequirementSpec;
use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for a package name
///
/// Two forms are kept. The key is what reports print: lowercase, with runs
/// of characters other than letters, digits and `.` replaced by a single
/// `-` (`Flask_SQLAlchemy` becomes `flask-sqlalchemy`, `zope.interface` keeps
/// its dot). Equality, hashing and ordering use the PEP 503 form, which also
/// folds `.`, so `zope.interface` and `zope-interface` are the same package.
#[derive(Debug, Clone)]
pub struct PackageName {
    key: String,
    normalized: String,
}

impl PackageName {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only ASCII letters, digits, hyphens, underscores and dots are allowed.",
                name
            );
        }

        Ok(Self {
            key: Self::collapse(name, |c| matches!(c, '-' | '_')),
            normalized: Self::collapse(name, |c| matches!(c, '-' | '_' | '.')),
        })
    }

    /// Lowercases `name` and replaces each run of separators with one `-`
    fn collapse(name: &str, is_separator: impl Fn(char) -> bool) -> String {
        let mut collapsed = String::with_capacity(name.len());
        let mut in_separator = false;
        for c in name.chars() {
            if is_separator(c) {
                if !in_separator {
                    collapsed.push('-');
                }
                in_separator = true;
            } else {
                collapsed.push(c.to_ascii_lowercase());
                in_separator = false;
            }
        }
        collapsed
    }

    /// The printable key
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The PEP 503 form used for lookups
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl PartialEq for PackageName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for PackageName {}

impl std::hash::Hash for PackageName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for PackageName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// NewType wrapper for an installed version string
///
/// The text is kept verbatim: it is what the report prints, and the
/// [`VersionScheme`](super::VersionScheme) decides how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl AsRef<str>) -> Result<Self> {
        let version = version.as_ref().trim();

        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '!' | '*')
        }) {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, underscores, plus, bang and asterisks are allowed.",
                version
            );
        }

        Ok(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A package found in the environment, with its declared requirements
///
/// Equality is name based: two records for `mock` compare equal even if
/// their versions differ. Use [`InstalledPackage::is_same_record`] to compare
/// full contents.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    name: PackageName,
    version: Version,
    requires: Vec<RequirementSpec>,
}

impl InstalledPackage {
    pub fn new(name: PackageName, version: Version, requires: Vec<RequirementSpec>) -> Self {
        Self {
            name,
            version,
            requires,
        }
    }

    /// Builds a record from raw strings, parsing each requirement
    pub fn parse(name: &str, version: &str, requires: &[&str]) -> Result<Self> {
        let requires = requires
            .iter()
            .map(|r| RequirementSpec::parse(r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(PackageName::new(name)?, Version::new(version)?, requires))
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn requires(&self) -> &[RequirementSpec] {
        &self.requires
    }

    pub fn is_same_record(&self, other: &InstalledPackage) -> bool {
        self.name == other.name && self.version == other.version && self.requires == other.requires
    }
}

impl PartialEq for InstalledPackage {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for InstalledPackage {}

impl std::fmt::Display for InstalledPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
