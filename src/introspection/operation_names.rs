//! Operation-name resolution
//!
//! Maps each fetch type to a function deriving the GraphQL query or
//! mutation name from a resource. The Prisma defaults are:
//!
//! | Fetch type           | Name                          | `UserProfile`       |
//! |----------------------|-------------------------------|---------------------|
//! | `GET_LIST`           | plural of camelCased name     | `userProfiles`      |
//! | `GET_ONE`            | camelCased name               | `userProfile`       |
//! | `GET_MANY`           | plural of camelCased name     | `userProfiles`      |
//! | `GET_MANY_REFERENCE` | plural of camelCased name     | `userProfiles`      |
//! | `CREATE`             | `create` + exact name         | `createUserProfile` |
//! | `UPDATE`             | `update` + exact name         | `updateUserProfile` |
//! | `DELETE`             | `delete` + exact name         | `deleteUserProfile` |
//!
//! `UPDATE_MANY` and `DELETE_MANY` have no native operation.

use crate::core::case::camel_case;
use crate::core::fetch::FetchType;
use crate::core::pluralize::Pluralizer;
use crate::core::resource::Resource;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Derives an operation name from a resource
pub type OperationNameFn = Arc<dyn Fn(&Resource) -> String + Send + Sync>;

/// Plural of the camelCased resource name (`UserProfile` → `userProfiles`)
pub fn plural_name(resource: &Resource) -> String {
    Pluralizer::pluralize(&camel_case(&resource.name))
}

/// CamelCased resource name (`UserProfile` → `userProfile`)
pub fn singular_name(resource: &Resource) -> String {
    camel_case(&resource.name)
}

/// Fetch type → operation-name function
#[derive(Clone, Default)]
pub struct OperationNames {
    names: IndexMap<FetchType, OperationNameFn>,
}

impl OperationNames {
    /// Naming conventions of a Prisma-generated schema
    pub fn prisma() -> Self {
        Self::default()
            .with(FetchType::GetList, plural_name)
            .with(FetchType::GetOne, singular_name)
            .with(FetchType::GetMany, plural_name)
            .with(FetchType::GetManyReference, plural_name)
            .with(FetchType::Create, |r: &Resource| format!("create{}", r.name))
            .with(FetchType::Update, |r: &Resource| format!("update{}", r.name))
            .with(FetchType::Delete, |r: &Resource| format!("delete{}", r.name))
    }

    /// Names built from templates such as `"all{plural}"`
    ///
    /// Placeholders: `{name}` is the exact resource name, `{camel}` its
    /// camelCased form and `{plural}` the plural of the camelCased form.
    pub fn from_templates(templates: &IndexMap<FetchType, String>) -> Self {
        templates
            .iter()
            .fold(Self::default(), |names, (fetch_type, template)| {
                let template = template.clone();
                names.with(*fetch_type, move |resource: &Resource| {
                    render_template(&template, resource)
                })
            })
    }

    /// Set the naming function for a fetch type
    pub fn with(
        mut self,
        fetch_type: FetchType,
        name: impl Fn(&Resource) -> String + Send + Sync + 'static,
    ) -> Self {
        self.names.insert(fetch_type, Arc::new(name));
        self
    }

    /// Overlay `overrides` on top of these names
    pub fn merge(mut self, overrides: &OperationNames) -> Self {
        for (fetch_type, name) in &overrides.names {
            self.names.insert(*fetch_type, Arc::clone(name));
        }
        self
    }

    /// Operation name for `fetch_type`, if the fetch type has one
    pub fn resolve(&self, fetch_type: FetchType, resource: &Resource) -> Option<String> {
        self.names.get(&fetch_type).map(|name| name(resource))
    }

    pub fn contains(&self, fetch_type: FetchType) -> bool {
        self.names.contains_key(&fetch_type)
    }

    pub fn fetch_types(&self) -> impl Iterator<Item = FetchType> + '_ {
        self.names.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for OperationNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names.keys()).finish()
    }
}

fn render_template(template: &str, resource: &Resource) -> String {
    template
        .replace("{name}", &resource.name)
        .replace("{camel}", &singular_name(resource))
        .replace("{plural}", &plural_name(resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_all(names: &OperationNames, resource: &str) -> Vec<(FetchType, Option<String>)> {
        let resource = Resource::new(resource);
        FetchType::ALL
            .into_iter()
            .map(|fetch_type| (fetch_type, names.resolve(fetch_type, &resource)))
            .collect()
    }

    #[test]
    fn test_prisma_names_for_simple_resource() {
        let names = OperationNames::prisma();
        let user = Resource::new("User");

        assert_eq!(names.resolve(FetchType::GetList, &user).unwrap(), "users");
        assert_eq!(names.resolve(FetchType::GetOne, &user).unwrap(), "user");
        assert_eq!(names.resolve(FetchType::GetMany, &user).unwrap(), "users");
        assert_eq!(
            names.resolve(FetchType::GetManyReference, &user).unwrap(),
            "users"
        );
        assert_eq!(names.resolve(FetchType::Create, &user).unwrap(), "createUser");
        assert_eq!(names.resolve(FetchType::Update, &user).unwrap(), "updateUser");
        assert_eq!(names.resolve(FetchType::Delete, &user).unwrap(), "deleteUser");
    }

    #[test]
    fn test_prisma_names_for_compound_resource() {
        let names = OperationNames::prisma();
        let profile = Resource::new("UserProfile");

        assert_eq!(
            names.resolve(FetchType::GetList, &profile).unwrap(),
            "userProfiles"
        );
        assert_eq!(
            names.resolve(FetchType::GetOne, &profile).unwrap(),
            "userProfile"
        );
        // Mutations keep the exact resource name
        assert_eq!(
            names.resolve(FetchType::Create, &profile).unwrap(),
            "createUserProfile"
        );
    }

    #[test]
    fn test_prisma_names_pluralize_irregular_resources() {
        let names = OperationNames::prisma();
        assert_eq!(
            names.resolve(FetchType::GetList, &Resource::new("Category")).unwrap(),
            "categories"
        );
        assert_eq!(
            names.resolve(FetchType::GetList, &Resource::new("Person")).unwrap(),
            "people"
        );
    }

    #[test]
    fn test_bulk_fetch_types_have_no_name() {
        let names = OperationNames::prisma();
        let user = Resource::new("User");
        assert!(names.resolve(FetchType::UpdateMany, &user).is_none());
        assert!(names.resolve(FetchType::DeleteMany, &user).is_none());
        assert!(!names.contains(FetchType::DeleteMany));
    }

    #[test]
    fn test_names_are_deterministic() {
        let names = OperationNames::prisma();
        for resource in ["User", "UserProfile", "Category", "BlogPost"] {
            assert_eq!(resolve_all(&names, resource), resolve_all(&names, resource));
        }
    }

    #[test]
    fn test_merge_overrides_only_given_entries() {
        let overrides = OperationNames::default()
            .with(FetchType::GetList, |r: &Resource| format!("all{}s", r.name));
        let names = OperationNames::prisma().merge(&overrides);
        let user = Resource::new("User");

        assert_eq!(names.resolve(FetchType::GetList, &user).unwrap(), "allUsers");
        assert_eq!(names.resolve(FetchType::GetOne, &user).unwrap(), "user");
    }

    #[test]
    fn test_templates() {
        let mut templates = IndexMap::new();
        templates.insert(FetchType::GetList, "all{plural}".to_string());
        templates.insert(FetchType::GetOne, "{camel}ById".to_string());
        templates.insert(FetchType::Create, "insert{name}".to_string());
        let names = OperationNames::from_templates(&templates);
        let profile = Resource::new("UserProfile");

        assert_eq!(
            names.resolve(FetchType::GetList, &profile).unwrap(),
            "alluserProfiles"
        );
        assert_eq!(
            names.resolve(FetchType::GetOne, &profile).unwrap(),
            "userProfileById"
        );
        assert_eq!(
            names.resolve(FetchType::Create, &profile).unwrap(),
            "insertUserProfile"
        );
        assert!(names.resolve(FetchType::Delete, &profile).is_none());
    }
}
