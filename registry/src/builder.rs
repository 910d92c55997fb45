//! RegistryBuilder for constructing an immutable Registry.

use crate::{PropertyDef, PropertyRef, Registry, SubpropertyIndex, SubtypeIndex, TypeDef};
use pax_core::{PropertyId, TypeId};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Duplicate property name: {0}")]
    DuplicatePropertyName(String),

    #[error("Unknown parent type: {0}")]
    UnknownParentType(String),

    #[error("Unknown type '{type_name}' in property '{property}'")]
    UnknownPropertyType { property: String, type_name: String },

    #[error("Unknown super-property '{parent}' of '{property}'")]
    UnknownSuperProperty { property: String, parent: String },
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Next property ID to allocate.
    next_property_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,

    /// Properties being built.
    properties: HashMap<PropertyId, PropertyDef>,
    /// Forward and inverse names.
    property_names: HashMap<String, PropertyRef>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            parent_names: Vec::new(),
            is_abstract: false,
        }
    }

    /// Add a property from `domain` to `range`.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        domain: impl Into<String>,
        range: impl Into<String>,
    ) -> PropertyBuilder<'_> {
        let name = name.into();
        let id = PropertyId::new(self.next_property_id);
        self.next_property_id += 1;

        PropertyBuilder {
            builder: self,
            id,
            name,
            domain: domain.into(),
            range: range.into(),
            inverse_name: None,
            parent_name: None,
        }
    }

    /// Look up a class already added to this builder.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let subtype_index = SubtypeIndex::build(
            self.types
                .iter()
                .map(|(id, def)| (*id, def.parent_ids.as_slice())),
        );

        let property_parents: Vec<(PropertyId, Vec<PropertyId>)> = self
            .properties
            .values()
            .map(|def| (def.id, def.parent.into_iter().collect()))
            .collect();
        let subproperty_index = SubpropertyIndex::build(
            property_parents
                .iter()
                .map(|(id, parents)| (*id, parents.as_slice())),
        );

        Ok(Registry::new(
            self.types,
            self.type_names,
            self.properties,
            self.property_names,
            subtype_index,
            subproperty_index,
        ))
    }

    fn claim_property_name(&mut self, name: &str, prop: PropertyRef) -> Result<(), RegistryError> {
        if self.property_names.contains_key(name) {
            return Err(RegistryError::DuplicatePropertyName(name.to_string()));
        }
        self.property_names.insert(name.to_string(), prop);
        Ok(())
    }
}

/// Builder for a class definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    parent_names: Vec<String>,
    is_abstract: bool,
}

impl<'a> TypeBuilder<'a> {
    /// Add a parent class by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Mark as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Finish building this class.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        let mut parent_ids = Vec::new();
        for parent_name in &self.parent_names {
            match self.builder.type_names.get(parent_name) {
                Some(&parent_id) => parent_ids.push(parent_id),
                None => return Err(RegistryError::UnknownParentType(parent_name.clone())),
            }
        }

        let type_def = TypeDef {
            id: self.id,
            name: self.name.clone(),
            parent_ids,
            is_abstract: self.is_abstract,
        };

        self.builder.type_names.insert(self.name, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}

/// Builder for a property definition.
pub struct PropertyBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: PropertyId,
    name: String,
    domain: String,
    range: String,
    inverse_name: Option<String>,
    parent_name: Option<String>,
}

impl<'a> PropertyBuilder<'a> {
    /// Make the property navigable backwards under `name`.
    pub fn inverse(mut self, name: impl Into<String>) -> Self {
        self.inverse_name = Some(name.into());
        self
    }

    /// Declare this property a sub-property of an existing one.
    pub fn sub_property_of(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    /// Finish building this property.
    pub fn done(self) -> Result<PropertyId, RegistryError> {
        let resolve = |type_name: &str| {
            self.builder
                .type_names
                .get(type_name)
                .copied()
                .ok_or_else(|| RegistryError::UnknownPropertyType {
                    property: self.name.clone(),
                    type_name: type_name.to_string(),
                })
        };
        let domain = resolve(&self.domain)?;
        let range = resolve(&self.range)?;

        let parent = match &self.parent_name {
            Some(parent) => match self.builder.property_names.get(parent) {
                Some(p) if !p.inverse => Some(p.id),
                _ => {
                    return Err(RegistryError::UnknownSuperProperty {
                        property: self.name,
                        parent: parent.clone(),
                    })
                }
            },
            None => None,
        };

        self.builder
            .claim_property_name(&self.name, PropertyRef::forward(self.id))?;
        if let Some(inverse) = &self.inverse_name {
            self.builder
                .claim_property_name(inverse, PropertyRef::inverse(self.id))?;
        }

        let def = PropertyDef {
            id: self.id,
            name: self.name,
            domain,
            range,
            inverse_name: self.inverse_name,
            parent,
        };
        self.builder.properties.insert(self.id, def);

        Ok(self.id)
    }
}
