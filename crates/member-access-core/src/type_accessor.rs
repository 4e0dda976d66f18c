// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-type member resolution with caching.
//!
//! A [`TypeAccessor`] resolves names against one [`TypeDescriptor`] and
//! remembers the answers. It is normally obtained from a
//! [`TypeAccessorRegistry`](crate::TypeAccessorRegistry), which keeps one
//! per type.
//!
//! # Name Resolution
//!
//! ```text
//! find("Name", flags)
//!   │
//!   ├─ cache hit ─────────────────────────────► accessor
//!   ├─ exact name:  properties, then fields ──► accessor (cached)
//!   ├─ any case:    properties, then fields ──► accessor (cached)
//!   └─ nothing ───────────────────────────────► None
//! ```
//!
//! Members that differ only by case resolve to the first one in
//! declaration order. Only successful lookups are cached.
//!
//! # Overload Resolution
//!
//! [`find_method`](TypeAccessor::find_method) picks, in order:
//!
//! 1. the method with exactly this name and parameter list;
//! 2. the only method with this name, whatever its parameters;
//! 3. the only method with this name and parameter count;
//! 4. among those with this name and count, the one with the most
//!    positions whose parameter type accepts the requested type. A later
//!    candidate replaces the current best only with a strictly higher
//!    score.
//!
//! # Sharing
//!
//! Each declared member has exactly one accessor per type accessor. Every
//! lookup path (by name, by column, listing, by reference) hands out the
//! same `Arc`, so a delegate compiled through one path is reused by all.

use std::{
    any::TypeId,
    fmt,
    sync::{Arc, OnceLock}
};

use dashmap::DashMap;
use tracing::debug;

use crate::{
    AccessError, BindingFlags, FieldAccessor, MemberAccessor, MemberDescriptor, MemberRef,
    MethodAccessor, MethodKey, ParameterDescriptor, PropertyAccessor, Result, TableInfo,
    TypeDescriptor, TypeRef, Value, ValueAccessor,
    factory::{self, Constructor}
};

type NameCache<V> = DashMap<(String, BindingFlags), V>;

/// Case-insensitive comparison using Unicode lowercase mapping.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AccessError::invalid_argument("member name must not be empty"));
    }
    Ok(())
}

fn slots<T>(len: usize) -> Box<[OnceLock<T>]> {
    (0..len).map(|_| OnceLock::new()).collect()
}

/// Resolves and caches member accessors of one type.
pub struct TypeAccessor {
    descriptor:          &'static TypeDescriptor,
    properties:          Box<[OnceLock<Arc<PropertyAccessor>>]>,
    fields:              Box<[OnceLock<Arc<FieldAccessor>>]>,
    methods:             Box<[OnceLock<Arc<MethodAccessor>>]>,
    constructors:        Box<[OnceLock<Constructor>]>,
    members_by_name:     NameCache<MemberAccessor>,
    properties_by_name:  NameCache<Arc<PropertyAccessor>>,
    fields_by_name:      NameCache<Arc<FieldAccessor>>,
    columns_by_name:     NameCache<Arc<PropertyAccessor>>,
    methods_by_key:      DashMap<(MethodKey, BindingFlags), Arc<MethodAccessor>>,
    property_lists:      DashMap<BindingFlags, Arc<[Arc<PropertyAccessor>]>>,
    field_lists:         DashMap<BindingFlags, Arc<[Arc<FieldAccessor>]>>,
    method_lists:        DashMap<BindingFlags, Arc<[Arc<MethodAccessor>]>>,
    default_constructor: OnceLock<Option<Constructor>>,
    table:               OnceLock<TableInfo>
}

impl TypeAccessor {
    /// Create an accessor for `descriptor`. Nothing is resolved yet.
    ///
    /// Prefer [`TypeAccessorRegistry::type_accessor`](crate::TypeAccessorRegistry::type_accessor),
    /// which shares one accessor per type.
    #[must_use]
    pub fn new(descriptor: &'static TypeDescriptor) -> Self {
        debug!(type_name = descriptor.name(), "creating type accessor");
        Self {
            descriptor,
            properties: slots(descriptor.properties().len()),
            fields: slots(descriptor.fields().len()),
            methods: slots(descriptor.methods().len()),
            constructors: slots(descriptor.constructors().len()),
            members_by_name: DashMap::new(),
            properties_by_name: DashMap::new(),
            fields_by_name: DashMap::new(),
            columns_by_name: DashMap::new(),
            methods_by_key: DashMap::new(),
            property_lists: DashMap::new(),
            field_lists: DashMap::new(),
            method_lists: DashMap::new(),
            default_constructor: OnceLock::new(),
            table: OnceLock::new()
        }
    }

    /// Descriptor of the accessed type.
    #[must_use]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Short type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// `TypeId` of the accessed type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    /// Reference to the accessed type.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        self.descriptor.type_ref()
    }

    fn property_at(&self, index: usize) -> Arc<PropertyAccessor> {
        let descriptor = &self.descriptor.properties()[index];
        self.properties[index]
            .get_or_init(|| Arc::new(PropertyAccessor::new(descriptor)))
            .clone()
    }

    fn field_at(&self, index: usize) -> Arc<FieldAccessor> {
        let descriptor = &self.descriptor.fields()[index];
        self.fields[index]
            .get_or_init(|| Arc::new(FieldAccessor::new(descriptor)))
            .clone()
    }

    fn method_at(&self, index: usize) -> Arc<MethodAccessor> {
        let descriptor = &self.descriptor.methods()[index];
        self.methods[index]
            .get_or_init(|| Arc::new(MethodAccessor::new(descriptor)))
            .clone()
    }

    fn position<D, F>(members: &[D], flags: BindingFlags, matches: F) -> Option<usize>
    where
        D: MemberDescriptor,
        F: Fn(&D) -> bool
    {
        members
            .iter()
            .position(|m| flags.matches(m.visibility(), m.is_static()) && matches(m))
    }

    fn resolve_property(&self, name: &str, flags: BindingFlags, ignore_case: bool) -> Option<usize> {
        Self::position(self.descriptor.properties(), flags, |p| {
            if ignore_case {
                eq_ignore_case(p.name(), name)
            } else {
                p.name() == name
            }
        })
    }

    fn resolve_field(&self, name: &str, flags: BindingFlags, ignore_case: bool) -> Option<usize> {
        Self::position(self.descriptor.fields(), flags, |f| {
            if ignore_case {
                eq_ignore_case(f.name(), name)
            } else {
                f.name() == name
            }
        })
    }

    fn cached<V, F>(&self, cache: &NameCache<V>, name: &str, flags: BindingFlags, resolve: F) -> Option<V>
    where
        V: Clone,
        F: FnOnce() -> Option<V>
    {
        let key = (name.to_owned(), flags);
        if let Some(hit) = cache.get(&key) {
            return Some(hit.clone());
        }
        let resolved = resolve()?;
        debug!(
            type_name = self.descriptor.name(),
            member = name,
            ?flags,
            "resolved member"
        );
        Some(cache.entry(key).or_insert(resolved).clone())
    }

    /// Find a public instance property or field by name.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find(&self, name: &str) -> Result<Option<MemberAccessor>> {
        self.find_with(name, BindingFlags::DEFAULT)
    }

    /// Find a property or field visible under `flags`.
    ///
    /// Exact names are tried before case-insensitive ones; properties are
    /// tried before fields.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_with(&self, name: &str, flags: BindingFlags) -> Result<Option<MemberAccessor>> {
        check_name(name)?;
        Ok(self.cached(&self.members_by_name, name, flags, || {
            [false, true].into_iter().find_map(|ignore_case| {
                if let Some(index) = self.resolve_property(name, flags, ignore_case) {
                    return Some(MemberAccessor::Property(self.property_at(index)));
                }
                self.resolve_field(name, flags, ignore_case)
                    .map(|index| MemberAccessor::Field(self.field_at(index)))
            })
        }))
    }

    /// Find a public instance property by name.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_property(&self, name: &str) -> Result<Option<Arc<PropertyAccessor>>> {
        self.find_property_with(name, BindingFlags::DEFAULT)
    }

    /// Find a property visible under `flags`, falling back to a
    /// case-insensitive match.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_property_with(
        &self,
        name: &str,
        flags: BindingFlags
    ) -> Result<Option<Arc<PropertyAccessor>>> {
        check_name(name)?;
        Ok(self.cached(&self.properties_by_name, name, flags, || {
            self.resolve_property(name, flags, false)
                .or_else(|| self.resolve_property(name, flags, true))
                .map(|index| self.property_at(index))
        }))
    }

    /// Find a public instance field by name.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_field(&self, name: &str) -> Result<Option<Arc<FieldAccessor>>> {
        self.find_field_with(name, BindingFlags::DEFAULT)
    }

    /// Find a field visible under `flags`, falling back to a
    /// case-insensitive match.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_field_with(&self, name: &str, flags: BindingFlags) -> Result<Option<Arc<FieldAccessor>>> {
        check_name(name)?;
        Ok(self.cached(&self.fields_by_name, name, flags, || {
            self.resolve_field(name, flags, false)
                .or_else(|| self.resolve_field(name, flags, true))
                .map(|index| self.field_at(index))
        }))
    }

    /// Find a public instance property by its column name.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_column(&self, name: &str) -> Result<Option<Arc<PropertyAccessor>>> {
        self.find_column_with(name, BindingFlags::DEFAULT)
    }

    /// Find a property whose column annotation names `name`, ignoring case.
    ///
    /// Every column annotation is checked before any property name, so an
    /// annotated property wins over an earlier one that only shares the
    /// name. Falls back to a case-insensitive property name match.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_column_with(
        &self,
        name: &str,
        flags: BindingFlags
    ) -> Result<Option<Arc<PropertyAccessor>>> {
        check_name(name)?;
        Ok(self.cached(&self.columns_by_name, name, flags, || {
            self.descriptor
                .properties()
                .iter()
                .enumerate()
                .filter(|(_, p)| flags.matches(p.visibility(), p.is_static()))
                .map(|(index, _)| self.property_at(index))
                .find(|p| {
                    p.metadata()
                        .mapped_column()
                        .is_some_and(|column| eq_ignore_case(column, name))
                })
                .or_else(|| {
                    self.resolve_property(name, flags, true)
                        .map(|index| self.property_at(index))
                })
        }))
    }

    /// Find a property from a [`member_ref!`](crate::member_ref) expression.
    ///
    /// Numeric conversions are looked through.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) when the expression
    /// is a method call or is rooted at another type.
    pub fn find_property_by_ref(&self, member: &MemberRef) -> Result<Option<Arc<PropertyAccessor>>> {
        match member {
            MemberRef::Convert {
                operand, ..
            } => self.find_property_by_ref(operand),
            MemberRef::Member {
                owner,
                name
            } => {
                if *owner != self.type_ref() {
                    return Err(AccessError::invalid_argument(format!(
                        "member `{name}` belongs to `{}`, not `{}`",
                        owner.name(),
                        self.descriptor.type_name()
                    )));
                }
                self.find_property(name)
            }
            MemberRef::Call {
                owner,
                name
            } => Err(AccessError::invalid_argument(format!(
                "`{}::{name}()` is a method call, not a property access",
                owner.short_name()
            )))
        }
    }

    /// Find a public instance method by name and parameter types.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_method(&self, name: &str, parameter_types: &[TypeRef]) -> Result<Option<Arc<MethodAccessor>>> {
        self.find_method_with(name, parameter_types, BindingFlags::DEFAULT)
    }

    /// Find a method visible under `flags`, applying overload resolution
    /// when no exact signature matches.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](AccessError::InvalidArgument) for an empty name.
    pub fn find_method_with(
        &self,
        name: &str,
        parameter_types: &[TypeRef],
        flags: BindingFlags
    ) -> Result<Option<Arc<MethodAccessor>>> {
        check_name(name)?;
        let key = (MethodKey::new(name, parameter_types), flags);
        if let Some(hit) = self.methods_by_key.get(&key) {
            return Ok(Some(hit.clone()));
        }
        let Some(index) = self.resolve_method(name, parameter_types, flags) else {
            return Ok(None);
        };
        debug!(
            type_name = self.descriptor.name(),
            method = name,
            parameters = parameter_types.len(),
            ?flags,
            "resolved method"
        );
        let method = self.method_at(index);
        Ok(Some(self.methods_by_key.entry(key).or_insert(method).clone()))
    }

    fn resolve_method(&self, name: &str, parameter_types: &[TypeRef], flags: BindingFlags) -> Option<usize> {
        let visible = || {
            self.descriptor
                .methods()
                .iter()
                .enumerate()
                .filter(move |(_, m)| flags.matches(m.visibility(), m.is_static()))
        };

        if let Some((index, _)) =
            visible().find(|(_, m)| m.name() == name && m.has_signature(parameter_types))
        {
            return Some(index);
        }

        let named: Vec<_> = visible().filter(|(_, m)| m.name() == name).collect();
        if let [(index, _)] = named.as_slice() {
            return Some(*index);
        }

        let same_arity: Vec<_> = named
            .into_iter()
            .filter(|(_, m)| m.parameters().len() == parameter_types.len())
            .collect();
        if let [(index, _)] = same_arity.as_slice() {
            return Some(*index);
        }

        let mut best: Option<(usize, usize)> = None;
        for (index, method) in same_arity {
            let score = method
                .parameter_types()
                .zip(parameter_types)
                .filter(|(parameter, requested)| parameter.is_assignable_from(requested))
                .count();
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Public instance properties.
    #[must_use]
    pub fn get_properties(&self) -> Arc<[Arc<PropertyAccessor>]> {
        self.get_properties_with(BindingFlags::DEFAULT)
    }

    /// Properties visible under `flags`, in declaration order.
    #[must_use]
    pub fn get_properties_with(&self, flags: BindingFlags) -> Arc<[Arc<PropertyAccessor>]> {
        self.property_lists
            .entry(flags)
            .or_insert_with(|| {
                self.descriptor
                    .properties()
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| flags.matches(p.visibility(), p.is_static()))
                    .map(|(index, _)| self.property_at(index))
                    .collect()
            })
            .clone()
    }

    /// Fields visible under `flags`, in declaration order.
    #[must_use]
    pub fn get_fields(&self, flags: BindingFlags) -> Arc<[Arc<FieldAccessor>]> {
        self.field_lists
            .entry(flags)
            .or_insert_with(|| {
                self.descriptor
                    .fields()
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| flags.matches(f.visibility(), f.is_static()))
                    .map(|(index, _)| self.field_at(index))
                    .collect()
            })
            .clone()
    }

    /// Methods visible under `flags`, in declaration order.
    #[must_use]
    pub fn get_methods(&self, flags: BindingFlags) -> Arc<[Arc<MethodAccessor>]> {
        self.method_lists
            .entry(flags)
            .or_insert_with(|| {
                self.descriptor
                    .methods()
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| flags.matches(m.visibility(), m.is_static()))
                    .map(|(index, _)| self.method_at(index))
                    .collect()
            })
            .clone()
    }

    /// Create an instance through the parameterless constructor.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation`](AccessError::InvalidOperation) when the type has
    /// no public parameterless constructor.
    pub fn create(&self) -> Result<Value> {
        let constructor = self
            .default_constructor
            .get_or_init(|| factory::create_default_constructor(self.descriptor));
        match constructor {
            Some(create) => create(Vec::new()),
            None => Err(AccessError::invalid_operation(format!(
                "type `{}` has no public parameterless constructor",
                self.descriptor.name()
            )))
        }
    }

    /// Create an instance through the constructor that accepts `args`.
    ///
    /// Only public constructors are considered. Among those with a matching
    /// parameter count, the first one whose parameters accept every argument
    /// type is used; otherwise the first with a matching count, which then
    /// reports the mismatch.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument`](AccessError::InvalidArgument) when no public
    ///   constructor takes `args.len()` parameters
    /// - [`InvalidCast`](AccessError::InvalidCast) when an argument does not
    ///   coerce to its parameter type
    /// - [`Invocation`](AccessError::Invocation) when construction fails
    pub fn create_with(&self, args: Vec<Value>) -> Result<Value> {
        let constructors = self.descriptor.constructors();
        let same_arity = || {
            constructors
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_public() && c.parameters().len() == args.len())
        };
        let accepts = |parameters: &[ParameterDescriptor]| {
            parameters
                .iter()
                .zip(&args)
                .all(|(p, a)| p.parameter_type().is_assignable_from(&a.type_ref()))
        };
        let index = same_arity()
            .find(|(_, c)| accepts(c.parameters()))
            .or_else(|| same_arity().next())
            .map(|(index, _)| index)
            .ok_or_else(|| {
                AccessError::invalid_argument(format!(
                    "type `{}` has no public constructor taking {} parameters",
                    self.descriptor.name(),
                    args.len()
                ))
            })?;
        let create = self.constructors[index]
            .get_or_init(|| factory::create_constructor(self.descriptor, &constructors[index]));
        create(args)
    }

    /// Table the type maps to.
    #[must_use]
    pub fn table(&self) -> TableInfo {
        *self
            .table
            .get_or_init(|| TableInfo::from_descriptor(self.descriptor))
    }

    /// Table name from the `Table` annotation, else the type name.
    #[must_use]
    pub fn table_name(&self) -> &'static str {
        self.table().name()
    }

    /// Table schema from the `Table` annotation.
    #[must_use]
    pub fn table_schema(&self) -> Option<&'static str> {
        self.table().schema()
    }
}

impl fmt::Debug for TypeAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAccessor")
            .field("type", &self.descriptor.type_ref())
            .field("cached_names", &self.members_by_name.len())
            .field("cached_methods", &self.methods_by_key.len())
            .finish()
    }
}
