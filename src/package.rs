//! Partition the classes of a schema into packages.
//!
//! A package is a class acting as a container for the classes below
//! it. Whether a class is a package is decided, in order of priority,
//! by:
//!
//! 1. a per-class override in the [`PackagesConfiguration`], which
//!    inference never changes;
//! 2. a forgotten namespace, which makes its classes non-packages;
//! 3. structure: a class with no defined super class and at least one
//!    sub class is a package. With `accept_sub_packages`, a class with
//!    sub classes directly below a package is a (nested) package too.
//!
//! Every other class then belongs to the nearest packages above it. A
//! class under exactly one package gets its `package_key`; a class
//! reachable from several keeps them all in its `package_list`.
//!
//! Extraction needs the sub class index, so it should run after
//! [`OwlSchema::finish_load`].
use crate::key::ElementKey;
use crate::model::{Named, OwlClass, PackageType};
use crate::schema::OwlSchema;
use crate::vocab::{thing_key, trim_separator};

use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PackageOverride {
    ForcePackage,
    ForgetPackage,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackagesConfiguration {
    pub overrides: BTreeMap<ElementKey, PackageOverride>,
    pub forgotten_namespaces: BTreeSet<String>,
    /// Apply structural inference to classes without an override.
    pub accept_defaults: bool,
    /// Allow packages nested inside another package.
    pub accept_sub_packages: bool,
}

impl Default for PackagesConfiguration {
    fn default() -> Self {
        PackagesConfiguration {
            overrides: BTreeMap::new(),
            forgotten_namespaces: BTreeSet::new(),
            accept_defaults: true,
            accept_sub_packages: false,
        }
    }
}

impl PackagesConfiguration {
    pub fn force_package(mut self, key: ElementKey) -> Self {
        self.overrides.insert(key, PackageOverride::ForcePackage);
        self
    }

    pub fn forget_package(mut self, key: ElementKey) -> Self {
        self.overrides.insert(key, PackageOverride::ForgetPackage);
        self
    }

    pub fn forget_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.forgotten_namespaces.insert(namespace.into());
        self
    }

    pub fn package_override(&self, key: &ElementKey) -> Option<PackageOverride> {
        self.overrides.get(key).copied()
    }

    /// Namespaces compare without their trailing separator.
    pub fn is_forgotten(&self, key: &ElementKey) -> bool {
        match key.namespace() {
            Some(ns) => {
                let ns = trim_separator(ns);
                self.forgotten_namespaces
                    .iter()
                    .any(|f| trim_separator(f) == ns)
            }
            None => false,
        }
    }
}

/// The classes owned by one package, and the classes outside it that
/// they refer to.
#[derive(Clone, Debug)]
pub struct PackageView<'a> {
    pub package: &'a OwlClass,
    pub owned: Vec<&'a OwlClass>,
    pub foreign: Vec<&'a OwlClass>,
}

fn package_types(
    schema: &OwlSchema,
    keys: &[ElementKey],
    config: &PackagesConfiguration,
) -> BTreeMap<ElementKey, PackageType> {
    let mut types = BTreeMap::new();
    let mut candidates = BTreeSet::new();

    for key in keys {
        let class = match schema.owl_class(key) {
            Some(class) => class,
            None => continue,
        };

        let package_type = match config.package_override(key) {
            Some(PackageOverride::ForcePackage) => PackageType::ForcedPackage,
            Some(PackageOverride::ForgetPackage) => PackageType::ForcedNotPackage,
            None if config.is_forgotten(key) => PackageType::IsNotPackage,
            None if !config.accept_defaults || class.sub_classes().is_empty() => {
                PackageType::IsNotPackage
            }
            None if !class.has_defined_super_class() => PackageType::IsPackage,
            None => {
                candidates.insert(key.clone());
                PackageType::IsNotPackage
            }
        };
        types.insert(key.clone(), package_type);
    }

    if config.accept_sub_packages {
        // Promote top down until nothing changes.
        loop {
            let promoted: Vec<ElementKey> = candidates
                .iter()
                .filter(|k| {
                    schema.owl_class(k).map_or(false, |c| {
                        c.super_classes()
                            .iter()
                            .any(|p| types.get(p).map_or(false, PackageType::is_package))
                    })
                })
                .cloned()
                .collect();

            if promoted.is_empty() {
                break;
            }
            for key in promoted {
                candidates.remove(&key);
                types.insert(key, PackageType::IsPackage);
            }
        }
    }

    types
}

/// The nearest packages above `key`: the search climbs super classes
/// and stops at each package it meets.
fn nearest_packages(
    schema: &OwlSchema,
    key: &ElementKey,
    types: &BTreeMap<ElementKey, PackageType>,
) -> BTreeSet<ElementKey> {
    let mut found = BTreeSet::new();
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(key);

    while let Some(current) = queue.pop_front() {
        let class = match schema.owl_class(current) {
            Some(class) => class,
            None => continue,
        };

        for parent in class.super_classes() {
            if parent == key {
                debug!("Super class cycle through {}", key);
                continue;
            }
            if parent == thing_key() || !seen.insert(parent) {
                continue;
            }
            if types.get(parent).map_or(false, PackageType::is_package) {
                found.insert(parent.clone());
            } else {
                queue.push_back(parent);
            }
        }
    }
    found
}

/// Assign a package type and package membership to every class of
/// `schema`. Returns the number of packages.
///
/// Previous results are discarded first, so running this twice on
/// an unchanged schema gives the same result.
pub fn extract_packages(schema: &mut OwlSchema, config: &PackagesConfiguration) -> usize {
    let mut keys: Vec<ElementKey> = schema
        .owl_classes()
        .keys()
        .filter(|k| *k != thing_key())
        .cloned()
        .collect();
    keys.sort();

    for class in schema.owl_classes_mut().values_mut() {
        class.clear_package();
    }

    let types = package_types(schema, &keys, config);

    let mut membership = Vec::new();
    for key in &keys {
        let is_package = types.get(key).map_or(false, PackageType::is_package);
        if is_package && !config.accept_sub_packages {
            continue;
        }
        let found = nearest_packages(schema, key, &types);
        if !found.is_empty() {
            membership.push((key.clone(), found));
        }
    }

    let classes = schema.owl_classes_mut();
    for (key, package_type) in &types {
        if let Some(class) = classes.get_mut(key) {
            class.set_package_type(*package_type);
        }
    }
    for (key, found) in membership {
        if let Some(class) = classes.get_mut(&key) {
            for package in found {
                class.add_package_candidate(package);
            }
        }
    }

    let packages: BTreeSet<ElementKey> = types
        .iter()
        .filter(|(_, t)| t.is_package())
        .map(|(k, _)| k.clone())
        .collect();
    let count = packages.len();
    schema.set_packages(Some(packages));

    info!("Extracted {} packages from {} classes", count, keys.len());
    count
}

impl OwlSchema {
    /// See [`extract_packages`].
    pub fn extract_packages(&mut self, config: &PackagesConfiguration) -> usize {
        extract_packages(self, config)
    }

    /// The classes owned by package `key`, together with the classes
    /// outside it that they link to through super class, property or
    /// alias edges.
    ///
    /// Returns `None` if `key` is not a package.
    pub fn package_view(&self, key: &ElementKey) -> Option<PackageView<'_>> {
        let package = self.owl_class(key).filter(|c| c.is_package())?;

        let mut owned: Vec<&OwlClass> = self
            .owl_classes()
            .values()
            .filter(|c| c.package_key() == Some(key))
            .collect();
        owned.sort_by(|a, b| a.key().cmp(b.key()));

        let owned_keys: BTreeSet<&ElementKey> = owned.iter().map(|c| c.key()).collect();
        let mut foreign = BTreeSet::new();
        for class in std::iter::once(package).chain(owned.iter().copied()) {
            let linked = class
                .super_classes()
                .iter()
                .chain(class.from_domain().keys())
                .chain(class.to_range().keys())
                .chain(class.alias_classes())
                .chain(class.aliased_from());
            for other in linked {
                if other != key && other != thing_key() && !owned_keys.contains(&other) {
                    foreign.insert(other);
                }
            }
        }

        Some(PackageView {
            package,
            owned,
            foreign: foreign
                .into_iter()
                .filter_map(|k| self.owl_class(k))
                .collect(),
        })
    }
}
