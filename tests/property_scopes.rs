/// Property-based tests for scope sets and resolution
///
/// These tests verify scope membership and registration outcomes for every
/// combination of raw flags, recognized or not.

use ferrous_locator::{BoxError, LocatorError, Scope, Scopes, ServiceDescriptor, ServiceLocator};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn scope_strategy() -> impl Strategy<Value = Scope> {
    prop_oneof![Just(Scope::Singleton), Just(Scope::PerLookup), Just(Scope::Immediate)]
}

proptest! {
    #[test]
    fn has_scope_matches_added_flags(
        added in proptest::collection::vec(scope_strategy(), 0..6),
        queried in proptest::collection::vec(scope_strategy(), 0..3),
    ) {
        let mut descriptor = ServiceDescriptor::new("svc", |_| Ok::<_, BoxError>(()), []);
        for scope in &added {
            descriptor.in_scope(*scope);
        }

        let query: Scopes = queried.iter().copied().collect();
        let expected = queried
            .iter()
            .all(|scope| *scope == Scope::Singleton || added.contains(scope));
        prop_assert_eq!(descriptor.has_scope(query), expected);
    }
}

proptest! {
    #[test]
    fn raw_flags_keep_only_recognized_values(flags in proptest::collection::vec(any::<u8>(), 0..8)) {
        let scopes = Scopes::from_flags(flags.iter().copied());
        for scope in Scope::ALL {
            prop_assert_eq!(scopes.contains(scope), flags.contains(&scope.bits()));
        }
        prop_assert_eq!(scopes.bits() & !0b111, 0);

        let strict = Scopes::try_from_flags(flags.iter().copied());
        let all_known = flags.iter().all(|flag| Scope::from_bits(*flag).is_some());
        prop_assert_eq!(strict.is_ok(), all_known);
    }
}

proptest! {
    #[test]
    fn registration_outcome_follows_scopes(flags in proptest::collection::vec(0u8..8, 0..4)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let descriptor = ServiceDescriptor::from_flags("svc", move |_| {
            Ok::<_, BoxError>(counter.fetch_add(1, Ordering::SeqCst))
        }, &flags);
        let scopes = descriptor.scopes();

        let locator = ServiceLocator::new();
        let result = locator.register(descriptor);

        let registrable = scopes.contains(Scope::Singleton) || scopes.contains(Scope::PerLookup);
        prop_assert_eq!(result.is_ok(), registrable);

        if !registrable {
            let is_invalid_scope = matches!(result, Err(LocatorError::InvalidScope { .. }));
            prop_assert!(is_invalid_scope);
            let not_registered = matches!(locator.get_any("svc"), Err(LocatorError::NotRegistered(_)));
            prop_assert!(not_registered);
            return Ok(());
        }

        let per_lookup = scopes.contains(Scope::PerLookup);
        let eager = !per_lookup && scopes.contains(Scope::Singleton | Scope::Immediate);
        prop_assert_eq!(calls.load(Ordering::SeqCst), usize::from(eager));

        for _ in 0..3 {
            locator.get_any("svc").unwrap();
        }
        let expected = if per_lookup { 3 } else { 1 };
        prop_assert_eq!(calls.load(Ordering::SeqCst), expected);
    }
}
