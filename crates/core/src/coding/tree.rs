//! In-memory chart-of-accounts tree.
//!
//! Nodes live in one arena per level, indexed by typed id, with an
//! explicit parent-id back-reference on every node. Ancestor walks for
//! full-code composition are O(1) per hop and a broken chain is a hard
//! error, never a silent bare-code fallback.

use std::collections::HashMap;

use serde::Serialize;

use daftar_shared::types::{ClassId, DetailId, GroupId, SubClassId};

use super::error::CodingError;
use super::index::{AccountIndex, ResolvedAccount};
use super::types::{
    AccountClass, AccountDetail, AccountGroup, AccountNature, AccountSubClass, CodingLevel,
};
use super::validation::{next_segment, validate_segment};

/// Nested projection of a detail for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    /// The detail ID.
    pub id: DetailId,
    /// Bare two-digit segment.
    pub code: String,
    /// Canonical six-digit full code.
    pub full_code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Nested projection of a subclass for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubClassView {
    /// The subclass ID.
    pub id: SubClassId,
    /// Bare two-digit segment.
    pub code: String,
    /// Canonical four-digit full code.
    pub full_code: String,
    /// Display name.
    pub name: String,
    /// Whether detail accounts may attach.
    pub has_details: bool,
    /// Child details, sorted by code.
    pub children: Vec<DetailView>,
}

/// Nested projection of a class for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassView {
    /// The class ID.
    pub id: ClassId,
    /// Bare single-digit segment.
    pub code: String,
    /// Canonical two-digit full code.
    pub full_code: String,
    /// Display name.
    pub name: String,
    /// Nature constraint inherited by leaves.
    pub nature: AccountNature,
    /// Child subclasses, sorted by code.
    pub children: Vec<SubClassView>,
}

/// Nested projection of a group for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// The group ID.
    pub id: GroupId,
    /// Single-digit code, also the full code at this level.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Position in the user-defined ordering.
    pub sort_order: u32,
    /// Child classes, sorted by code.
    pub children: Vec<ClassView>,
}

/// The chart-of-accounts tree for one project.
#[derive(Debug, Clone, Default)]
pub struct CodingTree {
    groups: HashMap<GroupId, AccountGroup>,
    classes: HashMap<ClassId, AccountClass>,
    subclasses: HashMap<SubClassId, AccountSubClass>,
    details: HashMap<DetailId, AccountDetail>,
    next_sort_order: u32,
}

impl CodingTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tree has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // ========== Node creation ==========

    /// Adds a top-level group.
    ///
    /// # Errors
    ///
    /// Rejects malformed segments and codes already used by another group.
    pub fn add_group(&mut self, code: &str, name: &str) -> Result<GroupId, CodingError> {
        validate_segment(CodingLevel::Group, code)?;
        if self.groups.values().any(|g| g.code == code) {
            return Err(CodingError::DuplicateSiblingCode {
                level: CodingLevel::Group,
                code: code.to_string(),
            });
        }

        let id = GroupId::new();
        self.groups.insert(
            id,
            AccountGroup {
                id,
                code: code.to_string(),
                name: name.to_string(),
                sort_order: self.next_sort_order,
            },
        );
        self.next_sort_order += 1;
        Ok(id)
    }

    /// Adds a class under a group.
    ///
    /// # Errors
    ///
    /// Rejects unknown parents, malformed segments, and codes already used
    /// by a sibling class of the same group.
    pub fn add_class(
        &mut self,
        group_id: GroupId,
        code: &str,
        name: &str,
        nature: AccountNature,
    ) -> Result<ClassId, CodingError> {
        if !self.groups.contains_key(&group_id) {
            return Err(CodingError::GroupNotFound(group_id));
        }
        validate_segment(CodingLevel::Class, code)?;
        if self
            .classes
            .values()
            .any(|c| c.group_id == group_id && c.code == code)
        {
            return Err(CodingError::DuplicateSiblingCode {
                level: CodingLevel::Class,
                code: code.to_string(),
            });
        }

        let id = ClassId::new();
        self.classes.insert(
            id,
            AccountClass {
                id,
                group_id,
                code: code.to_string(),
                name: name.to_string(),
                nature,
            },
        );
        Ok(id)
    }

    /// Adds a subclass under a class.
    ///
    /// # Errors
    ///
    /// Rejects unknown parents, malformed segments, and codes already used
    /// by a sibling subclass of the same class.
    pub fn add_subclass(
        &mut self,
        class_id: ClassId,
        code: &str,
        name: &str,
        has_details: bool,
    ) -> Result<SubClassId, CodingError> {
        if !self.classes.contains_key(&class_id) {
            return Err(CodingError::ClassNotFound(class_id));
        }
        validate_segment(CodingLevel::SubClass, code)?;
        if self
            .subclasses
            .values()
            .any(|s| s.class_id == class_id && s.code == code)
        {
            return Err(CodingError::DuplicateSiblingCode {
                level: CodingLevel::SubClass,
                code: code.to_string(),
            });
        }

        let id = SubClassId::new();
        self.subclasses.insert(
            id,
            AccountSubClass {
                id,
                class_id,
                code: code.to_string(),
                name: name.to_string(),
                has_details,
            },
        );
        Ok(id)
    }

    /// Adds a detail under a subclass.
    ///
    /// # Errors
    ///
    /// Rejects unknown parents, parents with `has_details == false`,
    /// malformed segments, and codes already used by a sibling detail.
    pub fn add_detail(
        &mut self,
        subclass_id: SubClassId,
        code: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<DetailId, CodingError> {
        let Some(parent) = self.subclasses.get(&subclass_id) else {
            return Err(CodingError::SubClassNotFound(subclass_id));
        };
        if !parent.has_details {
            return Err(CodingError::DetailsNotAllowed(subclass_id));
        }
        validate_segment(CodingLevel::Detail, code)?;
        if self
            .details
            .values()
            .any(|d| d.subclass_id == subclass_id && d.code == code)
        {
            return Err(CodingError::DuplicateSiblingCode {
                level: CodingLevel::Detail,
                code: code.to_string(),
            });
        }

        let id = DetailId::new();
        self.details.insert(
            id,
            AccountDetail {
                id,
                subclass_id,
                code: code.to_string(),
                name: name.to_string(),
                description,
            },
        );
        Ok(id)
    }

    // ========== Node updates ==========

    /// Renames a group.
    pub fn rename_group(&mut self, id: GroupId, name: &str) -> Result<(), CodingError> {
        let group = self
            .groups
            .get_mut(&id)
            .ok_or(CodingError::GroupNotFound(id))?;
        group.name = name.to_string();
        Ok(())
    }

    /// Updates a class's name and, when given, its nature.
    pub fn update_class(
        &mut self,
        id: ClassId,
        name: &str,
        nature: Option<AccountNature>,
    ) -> Result<(), CodingError> {
        let class = self
            .classes
            .get_mut(&id)
            .ok_or(CodingError::ClassNotFound(id))?;
        class.name = name.to_string();
        if let Some(nature) = nature {
            class.nature = nature;
        }
        Ok(())
    }

    /// Updates a subclass's name and, when given, its `has_details` flag.
    ///
    /// # Errors
    ///
    /// Turning `has_details` off is rejected while details are attached.
    pub fn update_subclass(
        &mut self,
        id: SubClassId,
        name: &str,
        has_details: Option<bool>,
    ) -> Result<(), CodingError> {
        if !self.subclasses.contains_key(&id) {
            return Err(CodingError::SubClassNotFound(id));
        }
        if has_details == Some(false) && self.details.values().any(|d| d.subclass_id == id) {
            return Err(CodingError::SubClassHasDetails(id));
        }

        let subclass = self
            .subclasses
            .get_mut(&id)
            .ok_or(CodingError::SubClassNotFound(id))?;
        subclass.name = name.to_string();
        if let Some(flag) = has_details {
            subclass.has_details = flag;
        }
        Ok(())
    }

    /// Updates a detail's name and description.
    pub fn update_detail(
        &mut self,
        id: DetailId,
        name: &str,
        description: Option<String>,
    ) -> Result<(), CodingError> {
        let detail = self
            .details
            .get_mut(&id)
            .ok_or(CodingError::DetailNotFound(id))?;
        detail.name = name.to_string();
        detail.description = description;
        Ok(())
    }

    // ========== Node removal (cascading) ==========

    /// Removes a group and every descendant class, subclass, and detail.
    pub fn remove_group(&mut self, id: GroupId) -> Result<(), CodingError> {
        if self.groups.remove(&id).is_none() {
            return Err(CodingError::GroupNotFound(id));
        }
        let class_ids: Vec<ClassId> = self
            .classes
            .values()
            .filter(|c| c.group_id == id)
            .map(|c| c.id)
            .collect();
        for class_id in class_ids {
            // Already detached from the removed group; ignore the lookup result.
            let _ = self.remove_class(class_id);
        }
        Ok(())
    }

    /// Removes a class and every descendant subclass and detail.
    pub fn remove_class(&mut self, id: ClassId) -> Result<(), CodingError> {
        if self.classes.remove(&id).is_none() {
            return Err(CodingError::ClassNotFound(id));
        }
        let subclass_ids: Vec<SubClassId> = self
            .subclasses
            .values()
            .filter(|s| s.class_id == id)
            .map(|s| s.id)
            .collect();
        for subclass_id in subclass_ids {
            let _ = self.remove_subclass(subclass_id);
        }
        Ok(())
    }

    /// Removes a subclass and every detail attached to it.
    pub fn remove_subclass(&mut self, id: SubClassId) -> Result<(), CodingError> {
        if self.subclasses.remove(&id).is_none() {
            return Err(CodingError::SubClassNotFound(id));
        }
        self.details.retain(|_, d| d.subclass_id != id);
        Ok(())
    }

    /// Removes a single detail.
    pub fn remove_detail(&mut self, id: DetailId) -> Result<(), CodingError> {
        if self.details.remove(&id).is_none() {
            return Err(CodingError::DetailNotFound(id));
        }
        Ok(())
    }

    // ========== Lookups ==========

    /// Looks up a group.
    pub fn group(&self, id: GroupId) -> Result<&AccountGroup, CodingError> {
        self.groups.get(&id).ok_or(CodingError::GroupNotFound(id))
    }

    /// Looks up a class.
    pub fn class(&self, id: ClassId) -> Result<&AccountClass, CodingError> {
        self.classes.get(&id).ok_or(CodingError::ClassNotFound(id))
    }

    /// Looks up a subclass.
    pub fn subclass(&self, id: SubClassId) -> Result<&AccountSubClass, CodingError> {
        self.subclasses
            .get(&id)
            .ok_or(CodingError::SubClassNotFound(id))
    }

    /// Looks up a detail.
    pub fn detail(&self, id: DetailId) -> Result<&AccountDetail, CodingError> {
        self.details.get(&id).ok_or(CodingError::DetailNotFound(id))
    }

    /// Iterates all groups, sorted by code.
    #[must_use]
    pub fn groups(&self) -> Vec<&AccountGroup> {
        let mut groups: Vec<&AccountGroup> = self.groups.values().collect();
        groups.sort_by(|a, b| a.code.cmp(&b.code));
        groups
    }

    /// Iterates a group's classes, sorted by code.
    #[must_use]
    pub fn classes_of(&self, group_id: GroupId) -> Vec<&AccountClass> {
        let mut classes: Vec<&AccountClass> = self
            .classes
            .values()
            .filter(|c| c.group_id == group_id)
            .collect();
        classes.sort_by(|a, b| a.code.cmp(&b.code));
        classes
    }

    /// Iterates a class's subclasses, sorted by code.
    #[must_use]
    pub fn subclasses_of(&self, class_id: ClassId) -> Vec<&AccountSubClass> {
        let mut subclasses: Vec<&AccountSubClass> = self
            .subclasses
            .values()
            .filter(|s| s.class_id == class_id)
            .collect();
        subclasses.sort_by(|a, b| a.code.cmp(&b.code));
        subclasses
    }

    /// Iterates a subclass's details, sorted by code.
    #[must_use]
    pub fn details_of(&self, subclass_id: SubClassId) -> Vec<&AccountDetail> {
        let mut details: Vec<&AccountDetail> = self
            .details
            .values()
            .filter(|d| d.subclass_id == subclass_id)
            .collect();
        details.sort_by(|a, b| a.code.cmp(&b.code));
        details
    }

    // ========== Full-code composition ==========

    /// Full code of a group: the bare segment.
    pub fn group_full_code(&self, id: GroupId) -> Result<String, CodingError> {
        Ok(self.group(id)?.code.clone())
    }

    /// Full code of a class: group + class segments.
    pub fn class_full_code(&self, id: ClassId) -> Result<String, CodingError> {
        let class = self.class(id)?;
        let group = self.group(class.group_id)?;
        Ok(format!("{}{}", group.code, class.code))
    }

    /// Full code of a subclass: group + class + subclass segments.
    pub fn subclass_full_code(&self, id: SubClassId) -> Result<String, CodingError> {
        let subclass = self.subclass(id)?;
        let prefix = self.class_full_code(subclass.class_id)?;
        Ok(format!("{}{}", prefix, subclass.code))
    }

    /// Full code of a detail: group + class + subclass + detail segments.
    pub fn detail_full_code(&self, id: DetailId) -> Result<String, CodingError> {
        let detail = self.detail(id)?;
        let prefix = self.subclass_full_code(detail.subclass_id)?;
        Ok(format!("{}{}", prefix, detail.code))
    }

    // ========== Next-code suggestions ==========

    /// Suggests the next free group code.
    #[must_use]
    pub fn next_group_code(&self) -> String {
        next_segment(
            CodingLevel::Group,
            self.groups.values().map(|g| g.code.as_str()),
        )
    }

    /// Suggests the next class code under a group.
    pub fn next_class_code(&self, group_id: GroupId) -> Result<String, CodingError> {
        self.group(group_id)?;
        Ok(next_segment(
            CodingLevel::Class,
            self.classes
                .values()
                .filter(|c| c.group_id == group_id)
                .map(|c| c.code.as_str()),
        ))
    }

    /// Suggests the next subclass code under a class.
    pub fn next_subclass_code(&self, class_id: ClassId) -> Result<String, CodingError> {
        self.class(class_id)?;
        Ok(next_segment(
            CodingLevel::SubClass,
            self.subclasses
                .values()
                .filter(|s| s.class_id == class_id)
                .map(|s| s.code.as_str()),
        ))
    }

    /// Suggests the next detail code under a subclass.
    pub fn next_detail_code(&self, subclass_id: SubClassId) -> Result<String, CodingError> {
        self.subclass(subclass_id)?;
        Ok(next_segment(
            CodingLevel::Detail,
            self.details
                .values()
                .filter(|d| d.subclass_id == subclass_id)
                .map(|d| d.code.as_str()),
        ))
    }

    // ========== Projections ==========

    /// Builds the nested tree view, groups sorted by code.
    #[must_use]
    pub fn to_view(&self) -> Vec<GroupView> {
        self.groups()
            .into_iter()
            .map(|group| GroupView {
                id: group.id,
                code: group.code.clone(),
                name: group.name.clone(),
                sort_order: group.sort_order,
                children: self
                    .classes_of(group.id)
                    .into_iter()
                    .map(|class| {
                        let class_code = format!("{}{}", group.code, class.code);
                        ClassView {
                            id: class.id,
                            code: class.code.clone(),
                            full_code: class_code.clone(),
                            name: class.name.clone(),
                            nature: class.nature,
                            children: self
                                .subclasses_of(class.id)
                                .into_iter()
                                .map(|subclass| {
                                    let subclass_code =
                                        format!("{}{}", class_code, subclass.code);
                                    SubClassView {
                                        id: subclass.id,
                                        code: subclass.code.clone(),
                                        full_code: subclass_code.clone(),
                                        name: subclass.name.clone(),
                                        has_details: subclass.has_details,
                                        children: self
                                            .details_of(subclass.id)
                                            .into_iter()
                                            .map(|detail| DetailView {
                                                id: detail.id,
                                                code: detail.code.clone(),
                                                full_code: format!(
                                                    "{}{}",
                                                    subclass_code, detail.code
                                                ),
                                                name: detail.name.clone(),
                                                description: detail.description.clone(),
                                            })
                                            .collect(),
                                    }
                                })
                                .collect(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Flattens the tree into the account lookup index used for document
    /// entry resolution.
    ///
    /// Selectable leaves are every detail, plus every subclass without
    /// details; the nature comes from the owning class.
    #[must_use]
    pub fn account_index(&self) -> AccountIndex {
        let mut accounts = Vec::new();

        for group in self.groups() {
            for class in self.classes_of(group.id) {
                let class_code = format!("{}{}", group.code, class.code);
                for subclass in self.subclasses_of(class.id) {
                    let subclass_code = format!("{}{}", class_code, subclass.code);
                    if subclass.has_details {
                        for detail in self.details_of(subclass.id) {
                            accounts.push(ResolvedAccount {
                                code: format!("{}{}", subclass_code, detail.code),
                                name: detail.name.clone(),
                                nature: class.nature,
                                level: CodingLevel::Detail,
                            });
                        }
                    } else {
                        accounts.push(ResolvedAccount {
                            code: subclass_code,
                            name: subclass.name.clone(),
                            nature: class.nature,
                            level: CodingLevel::SubClass,
                        });
                    }
                }
            }
        }

        AccountIndex::new(accounts)
    }
}
