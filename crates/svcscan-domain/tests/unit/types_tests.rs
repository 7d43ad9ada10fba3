//! Unit tests for static type metadata

use std::collections::HashSet;

use svcscan_domain::value_objects::{
    AutoRegisterDescriptor, GenericShape, Lifetime, ModuleInfo, TypeInfo, TypeLoadError, TypeRef,
    well_known,
};

static T: TypeInfo = TypeInfo::generic_parameter("T");
static USER: TypeInfo = TypeInfo::class("User", "app::domain", "app-domain");

static IREPO: TypeInfo =
    TypeInfo::interface("IRepository", "app::data", "app-data").generic_definition(1);
static IREPO_USER: TypeInfo = TypeInfo {
    generic: GenericShape::Closed {
        definition: &IREPO,
        arguments: &[&USER],
    },
    ..TypeInfo::interface("IRepository", "app::data", "app-data")
};

static IREADER: TypeInfo = TypeInfo::interface("IReader", "app::data", "app-data");
static IWRITER: TypeInfo = TypeInfo {
    interfaces: &[&IREADER],
    ..TypeInfo::interface("IWriter", "app::data", "app-data")
};

static BASE_STORE: TypeInfo = TypeInfo {
    interfaces: &[&well_known::DISPOSABLE],
    ..TypeInfo::class("BaseStore", "app::data", "app-data").abstract_class()
};
static USER_STORE: TypeInfo = TypeInfo {
    interfaces: &[&IWRITER, &IREPO_USER],
    base: Some(&BASE_STORE),
    ..TypeInfo::class("UserStore", "app::data", "app-data")
};

static REGISTRATION: AutoRegisterDescriptor = AutoRegisterDescriptor {
    as_self: true,
    lifetime: Some(Lifetime::Singleton),
    ..AutoRegisterDescriptor::EMPTY
};
static CLOCK: TypeInfo =
    TypeInfo::class("Clock", "app::time", "app-time").auto_registered(&REGISTRATION);

static MODULE: ModuleInfo = ModuleInfo::new("app-data", || {
    vec![
        Ok(&USER_STORE),
        Err(TypeLoadError::new("app::data::Broken", "missing dependency")),
        Ok(&IWRITER),
    ]
});

#[test]
fn test_full_names() {
    assert_eq!(USER.full_name(), "app::domain::User");
    assert_eq!(IREPO_USER.full_name(), "app::data::IRepository<app::domain::User>");
    assert_eq!(T.full_name(), "T");
}

#[test]
fn test_structural_identity() {
    static USER_COPY: TypeInfo = TypeInfo::class("User", "app::domain", "elsewhere");
    let a: TypeRef = &USER;
    let b: TypeRef = &USER_COPY;
    assert_eq!(a, b);

    let set: HashSet<TypeRef> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_generic_key_matches_definition() {
    assert!(IREPO.is_generic_definition());
    assert!(!IREPO_USER.is_generic_definition());
    assert_eq!(IREPO_USER.generic_key(), IREPO.generic_key());
    assert_eq!(IREPO_USER.generic_definition_type(), Some(&IREPO));
    assert!(!IREPO_USER.is_closed_over_parameters());
}

#[test]
fn test_all_interfaces_walks_bases_and_extensions() {
    let all = USER_STORE.all_interfaces();
    let names: Vec<String> = all.iter().map(|t| t.full_name()).collect();
    assert_eq!(
        names,
        vec![
            "app::data::IWriter",
            "app::data::IReader",
            "app::data::IRepository<app::domain::User>",
            "svcscan::lifecycle::Disposable",
        ]
    );
}

#[test]
fn test_disposal_marker() {
    assert!(well_known::DISPOSABLE.is_disposal_marker());
    assert!(well_known::ASYNC_DISPOSABLE.is_disposal_marker());
    assert!(!IREADER.is_disposal_marker());
}

#[test]
fn test_ancestors() {
    let chain: Vec<TypeRef> = USER_STORE.ancestors().collect();
    assert_eq!(chain, vec![&BASE_STORE as TypeRef]);
}

#[test]
fn test_auto_register_descriptor() {
    let descriptor = CLOCK.auto_register.expect("descriptor attached");
    assert!(descriptor.as_self);
    assert!(!descriptor.is_empty());
    assert_eq!(descriptor.lifetime, Some(Lifetime::Singleton));
    assert!(AutoRegisterDescriptor::EMPTY.is_empty());
}

#[test]
fn test_module_loader_reports_partial_failures() {
    let loads = (MODULE.types)();
    assert_eq!(loads.len(), 3);
    assert_eq!(loads.iter().filter(|l| l.is_ok()).count(), 2);
    assert_eq!(MODULE.to_string(), "app-data");
}
