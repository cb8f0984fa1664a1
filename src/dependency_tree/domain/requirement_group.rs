use super::PackageName;

/// Named origin of a set of top-level requirements
///
/// `name` is the section title of the report, e.g. `install_requires` or
/// `extras_require[docs]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementGroup {
    name: String,
    roots: Vec<PackageName>,
}

impl RequirementGroup {
    pub fn new(name: impl Into<String>, roots: Vec<PackageName>) -> Self {
        Self {
            name: name.into(),
            roots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roots(&self) -> &[PackageName] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Value of one project metadata field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionValue {
    /// A flat requirement list, e.g. `install_requires`
    List(Vec<String>),
    /// Named requirement lists, e.g. `extras_require = { docs = [...] }`
    Table(Vec<(String, Vec<String>)>),
}

/// One metadata field declared by the project, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefinition {
    pub name: String,
    pub value: DefinitionValue,
}

impl ProjectDefinition {
    pub fn list(name: impl Into<String>, requirements: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: DefinitionValue::List(requirements),
        }
    }

    pub fn table(name: impl Into<String>, entries: Vec<(String, Vec<String>)>) -> Self {
        Self {
            name: name.into(),
            value: DefinitionValue::Table(entries),
        }
    }
}
