use ferrous_locator::{BoxError, Scope, Scopes, ServiceDescriptor, ServiceLocator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn noop(name: &str, scopes: &[Scope]) -> ServiceDescriptor {
    ServiceDescriptor::new(name, |_| Ok::<_, BoxError>(()), scopes.iter().copied())
}

#[test]
fn test_has_scope_requires_all_bits() {
    let descriptor = noop("svc", &[Scope::Singleton, Scope::Immediate]);

    assert!(descriptor.has_scope(Scope::Singleton));
    assert!(descriptor.has_scope(Scope::Immediate));
    assert!(descriptor.has_scope(Scope::Singleton | Scope::Immediate));
    assert!(!descriptor.has_scope(Scope::PerLookup));
    assert!(!descriptor.has_scope(Scope::Singleton | Scope::PerLookup));
    assert!(descriptor.has_scope(Scopes::empty()));
}

#[test]
fn test_no_scopes_equals_singleton() {
    let implicit = noop("a", &[]);
    let explicit = noop("b", &[Scope::Singleton]);

    assert_eq!(implicit.scopes(), explicit.scopes());
    assert_eq!(implicit.state(), explicit.state());
}

#[test]
fn test_only_unknown_flags_default_to_singleton() {
    let descriptor = ServiceDescriptor::from_flags("svc", |_| Ok::<_, BoxError>(0u8), &[0, 3, 8, 255]);
    assert_eq!(descriptor.scopes(), Scopes::from(Scope::Singleton));
}

#[test]
fn test_in_scope_is_idempotent() {
    let mut descriptor = noop("svc", &[Scope::PerLookup]);
    descriptor.in_scope(Scope::PerLookup);
    descriptor.in_scope(Scope::PerLookup);
    assert_eq!(descriptor.scopes().bits(), Scope::PerLookup.bits());

    descriptor.in_scope_flag(99);
    assert_eq!(descriptor.scopes().bits(), Scope::PerLookup.bits());
}

#[test]
fn test_in_scope_turns_lazy_singleton_immediate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut descriptor = ServiceDescriptor::singleton("svc", move |_| {
        Ok::<_, BoxError>(counter.fetch_add(1, Ordering::SeqCst))
    });
    descriptor.in_scope(Scope::Immediate);

    let locator = ServiceLocator::new();
    locator.register(descriptor).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_in_scope_singleton_makes_descriptor_registrable() {
    let mut descriptor = noop("svc", &[Scope::Immediate]);
    let locator = ServiceLocator::new();

    descriptor.in_scope(Scope::Singleton);
    locator.register(descriptor).unwrap();
    assert!(locator.get_any("svc").is_ok());
}

#[test]
fn test_scopes_display_and_iter() {
    let scopes = Scopes::from_flags([4, 1]);
    assert_eq!(scopes.iter().collect::<Vec<_>>(), vec![Scope::Singleton, Scope::Immediate]);
    assert_eq!(scopes.to_string(), "Singleton | Immediate");
    assert_eq!(format!("{:?}", scopes), "Scopes(Singleton | Immediate)");
}

#[test]
fn test_scope_try_from() {
    assert_eq!(Scope::try_from(1u8).unwrap(), Scope::Singleton);
    assert!(Scope::try_from(6u8).is_err());
}
