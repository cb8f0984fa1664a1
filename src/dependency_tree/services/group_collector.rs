use crate::dependency_tree::domain::{
    DefinitionValue, PackageName, ProjectDefinition, RequirementGroup, RequirementSpec,
};
use crate::shared::Result;
use anyhow::Context;

/// Field name marker for setuptools style requirement fields
const REQUIRE_MARKER: &str = "_require";

/// PEP 735 dependency groups
const DEPENDENCY_GROUPS: &str = "dependency_groups";

/// Turns project metadata definitions into requirement groups
///
/// Keeps `*_require*` fields (`install_requires`, `tests_require`,
/// `extras_require`, ...) and `dependency_groups`, in declaration order.
/// Table valued fields yield one group per key, titled `field[key]`.
pub struct RequirementGroupCollector;

impl RequirementGroupCollector {
    pub fn collect(definitions: &[ProjectDefinition]) -> Result<Vec<RequirementGroup>> {
        let mut groups = Vec::new();

        for definition in definitions.iter().filter(|d| Self::is_requirement_field(&d.name)) {
            match &definition.value {
                DefinitionValue::List(requirements) => {
                    groups.push(Self::group(&definition.name, requirements)?);
                }
                DefinitionValue::Table(entries) => {
                    for (key, requirements) in entries {
                        let title = format!("{}[{}]", definition.name, key);
                        groups.push(Self::group(&title, requirements)?);
                    }
                }
            }
        }

        Ok(groups)
    }

    fn is_requirement_field(name: &str) -> bool {
        name.contains(REQUIRE_MARKER) || name == DEPENDENCY_GROUPS
    }

    fn group(title: &str, requirements: &[String]) -> Result<RequirementGroup> {
        let mut roots: Vec<PackageName> = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let spec = RequirementSpec::parse(requirement)
                .with_context(|| format!("Invalid requirement '{}' in {}", requirement, title))?;
            if !roots.contains(spec.name()) {
                roots.push(spec.name().clone());
            }
        }
        Ok(RequirementGroup::new(title, roots))
    }
}
