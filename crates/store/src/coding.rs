//! Per-project chart-of-accounts repository.

use dashmap::DashMap;
use tracing::info;

use daftar_core::coding::{
    AccountClass, AccountDetail, AccountGroup, AccountIndex, AccountNature, AccountSubClass,
    CodingTree, GroupView,
};
use daftar_shared::types::{ClassId, DetailId, GroupId, ProjectId, SubClassId};

use crate::error::StoreError;

/// Concurrent store of one [`CodingTree`] per project.
///
/// Every mutation locks a single project entry, so tree invariants hold
/// under concurrent access. Cross-project import clones the source tree
/// before touching the target entry, keeping at most one shard lock at
/// a time.
#[derive(Debug, Default)]
pub struct CodingStore {
    projects: DashMap<ProjectId, CodingTree>,
}

impl CodingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tree_mut<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&mut CodingTree) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut entry = self.projects.entry(project_id).or_default();
        f(entry.value_mut())
    }

    // Non-creating mutations run against a scratch tree when the project
    // is unknown, so the node lookup fails without registering an entry.
    fn with_existing_tree_mut<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&mut CodingTree) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        match self.projects.get_mut(&project_id) {
            Some(mut entry) => f(entry.value_mut()),
            None => f(&mut CodingTree::new()),
        }
    }

    fn with_tree<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&CodingTree) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        match self.projects.get(&project_id) {
            Some(tree) => f(tree.value()),
            None => f(&CodingTree::new()),
        }
    }

    // ========== Groups ==========

    /// Creates a group in the project's tree.
    pub fn create_group(
        &self,
        project_id: ProjectId,
        code: &str,
        name: &str,
    ) -> Result<AccountGroup, StoreError> {
        let group = self.with_tree_mut(project_id, |tree| {
            let id = tree.add_group(code, name)?;
            Ok(tree.group(id)?.clone())
        })?;
        info!(%project_id, code = %group.code, "created account group");
        Ok(group)
    }

    /// Renames a group.
    pub fn rename_group(
        &self,
        project_id: ProjectId,
        id: GroupId,
        name: &str,
    ) -> Result<AccountGroup, StoreError> {
        self.with_existing_tree_mut(project_id, |tree| {
            tree.rename_group(id, name)?;
            Ok(tree.group(id)?.clone())
        })
    }

    /// Deletes a group and all of its descendants.
    pub fn delete_group(&self, project_id: ProjectId, id: GroupId) -> Result<(), StoreError> {
        self.with_existing_tree_mut(project_id, |tree| Ok(tree.remove_group(id)?))?;
        info!(%project_id, group_id = %id, "deleted account group");
        Ok(())
    }

    // ========== Classes ==========

    /// Creates a class under a group.
    pub fn create_class(
        &self,
        project_id: ProjectId,
        group_id: GroupId,
        code: &str,
        name: &str,
        nature: AccountNature,
    ) -> Result<AccountClass, StoreError> {
        let class = self.with_tree_mut(project_id, |tree| {
            let id = tree.add_class(group_id, code, name, nature)?;
            Ok(tree.class(id)?.clone())
        })?;
        info!(%project_id, code = %class.code, "created account class");
        Ok(class)
    }

    /// Updates a class's name and, when given, its nature.
    pub fn update_class(
        &self,
        project_id: ProjectId,
        id: ClassId,
        name: &str,
        nature: Option<AccountNature>,
    ) -> Result<AccountClass, StoreError> {
        self.with_existing_tree_mut(project_id, |tree| {
            tree.update_class(id, name, nature)?;
            Ok(tree.class(id)?.clone())
        })
    }

    /// Deletes a class and all of its descendants.
    pub fn delete_class(&self, project_id: ProjectId, id: ClassId) -> Result<(), StoreError> {
        self.with_existing_tree_mut(project_id, |tree| Ok(tree.remove_class(id)?))?;
        info!(%project_id, class_id = %id, "deleted account class");
        Ok(())
    }

    // ========== Subclasses ==========

    /// Creates a subclass under a class.
    pub fn create_subclass(
        &self,
        project_id: ProjectId,
        class_id: ClassId,
        code: &str,
        name: &str,
        has_details: bool,
    ) -> Result<AccountSubClass, StoreError> {
        let subclass = self.with_tree_mut(project_id, |tree| {
            let id = tree.add_subclass(class_id, code, name, has_details)?;
            Ok(tree.subclass(id)?.clone())
        })?;
        info!(%project_id, code = %subclass.code, "created account subclass");
        Ok(subclass)
    }

    /// Updates a subclass's name and, when given, its `has_details` flag.
    pub fn update_subclass(
        &self,
        project_id: ProjectId,
        id: SubClassId,
        name: &str,
        has_details: Option<bool>,
    ) -> Result<AccountSubClass, StoreError> {
        self.with_existing_tree_mut(project_id, |tree| {
            tree.update_subclass(id, name, has_details)?;
            Ok(tree.subclass(id)?.clone())
        })
    }

    /// Deletes a subclass and its details.
    pub fn delete_subclass(&self, project_id: ProjectId, id: SubClassId) -> Result<(), StoreError> {
        self.with_existing_tree_mut(project_id, |tree| Ok(tree.remove_subclass(id)?))?;
        info!(%project_id, subclass_id = %id, "deleted account subclass");
        Ok(())
    }

    // ========== Details ==========

    /// Creates a detail under a subclass.
    pub fn create_detail(
        &self,
        project_id: ProjectId,
        subclass_id: SubClassId,
        code: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<AccountDetail, StoreError> {
        let detail = self.with_tree_mut(project_id, |tree| {
            let id = tree.add_detail(subclass_id, code, name, description)?;
            Ok(tree.detail(id)?.clone())
        })?;
        info!(%project_id, code = %detail.code, "created account detail");
        Ok(detail)
    }

    /// Updates a detail's name and description.
    pub fn update_detail(
        &self,
        project_id: ProjectId,
        id: DetailId,
        name: &str,
        description: Option<String>,
    ) -> Result<AccountDetail, StoreError> {
        self.with_existing_tree_mut(project_id, |tree| {
            tree.update_detail(id, name, description)?;
            Ok(tree.detail(id)?.clone())
        })
    }

    /// Deletes a detail.
    pub fn delete_detail(&self, project_id: ProjectId, id: DetailId) -> Result<(), StoreError> {
        self.with_existing_tree_mut(project_id, |tree| Ok(tree.remove_detail(id)?))
    }

    // ========== Projections ==========

    /// Returns the nested tree view for a project.
    #[must_use]
    pub fn tree_view(&self, project_id: ProjectId) -> Vec<GroupView> {
        self.projects
            .get(&project_id)
            .map(|tree| tree.to_view())
            .unwrap_or_default()
    }

    /// Returns the flat account lookup index for a project.
    #[must_use]
    pub fn account_index(&self, project_id: ProjectId) -> AccountIndex {
        self.projects
            .get(&project_id)
            .map(|tree| tree.account_index())
            .unwrap_or_default()
    }

    // ========== Next-code suggestions ==========

    /// Suggests the next free group code.
    #[must_use]
    pub fn next_group_code(&self, project_id: ProjectId) -> String {
        self.projects
            .get(&project_id)
            .map_or_else(|| "1".to_string(), |tree| tree.next_group_code())
    }

    /// Suggests the next class code under a group.
    pub fn next_class_code(
        &self,
        project_id: ProjectId,
        group_id: GroupId,
    ) -> Result<String, StoreError> {
        self.with_tree(project_id, |tree| Ok(tree.next_class_code(group_id)?))
    }

    /// Suggests the next subclass code under a class.
    pub fn next_subclass_code(
        &self,
        project_id: ProjectId,
        class_id: ClassId,
    ) -> Result<String, StoreError> {
        self.with_tree(project_id, |tree| Ok(tree.next_subclass_code(class_id)?))
    }

    /// Suggests the next detail code under a subclass.
    pub fn next_detail_code(
        &self,
        project_id: ProjectId,
        subclass_id: SubClassId,
    ) -> Result<String, StoreError> {
        self.with_tree(project_id, |tree| Ok(tree.next_detail_code(subclass_id)?))
    }

    // ========== Bulk operations ==========

    /// Drops the project's whole tree in one step.
    pub fn delete_all(&self, project_id: ProjectId) {
        self.projects.remove(&project_id);
        info!(%project_id, "deleted project coding");
    }

    /// Lists projects whose coding could seed another project.
    #[must_use]
    pub fn import_sources(&self) -> Vec<ProjectId> {
        let mut sources: Vec<ProjectId> = self
            .projects
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| *entry.key())
            .collect();
        sources.sort();
        sources
    }

    /// Copies a project's whole coding tree into an empty target project.
    ///
    /// The copy is rebuilt node by node with fresh ids, so the two trees
    /// share nothing afterwards. All-or-nothing: the target is only
    /// written once the whole rebuild has succeeded.
    ///
    /// # Errors
    ///
    /// Rejects importing into the source project itself, from a project
    /// without coding, and into a project that already has coding.
    pub fn import(&self, source: ProjectId, target: ProjectId) -> Result<usize, StoreError> {
        if source == target {
            return Err(StoreError::ImportSameProject);
        }

        // Clone the source and release its shard lock before touching the
        // target, which may hash to the same shard.
        let source_tree = {
            let entry = self
                .projects
                .get(&source)
                .ok_or(StoreError::ImportSourceEmpty(source))?;
            entry.value().clone()
        };
        if source_tree.is_empty() {
            return Err(StoreError::ImportSourceEmpty(source));
        }

        let rebuilt = Self::rebuild(&source_tree)?;
        let group_count = rebuilt.groups().len();

        let mut target_entry = self.projects.entry(target).or_default();
        if !target_entry.value().is_empty() {
            return Err(StoreError::ImportTargetNotEmpty(target));
        }
        *target_entry.value_mut() = rebuilt;

        info!(%source, %target, group_count, "imported project coding");
        Ok(group_count)
    }

    fn rebuild(source: &CodingTree) -> Result<CodingTree, StoreError> {
        let mut tree = CodingTree::new();
        for group in source.groups() {
            let group_id = tree.add_group(&group.code, &group.name)?;
            for class in source.classes_of(group.id) {
                let class_id = tree.add_class(group_id, &class.code, &class.name, class.nature)?;
                for subclass in source.subclasses_of(class.id) {
                    let subclass_id = tree.add_subclass(
                        class_id,
                        &subclass.code,
                        &subclass.name,
                        subclass.has_details,
                    )?;
                    for detail in source.details_of(subclass.id) {
                        tree.add_detail(
                            subclass_id,
                            &detail.code,
                            &detail.name,
                            detail.description.clone(),
                        )?;
                    }
                }
            }
        }
        Ok(tree)
    }
}
