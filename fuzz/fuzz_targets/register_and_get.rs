#![no_main]

use ferrous_locator::{BoxError, LocatorError, ServiceDescriptor, ServiceLocator};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

// Each 3-byte chunk is one operation: [op, name, flags]
fuzz_target!(|data: &[u8]| {
    let locator = ServiceLocator::new();
    let mut registered = HashSet::new();

    for chunk in data.chunks_exact(3) {
        let name = format!("svc-{}", chunk[1] % 8);
        match chunk[0] % 3 {
            0 => {
                let fails = chunk[2] & 0x80 != 0;
                let flags = [chunk[2] & 0x07, (chunk[2] >> 3) & 0x07];
                let descriptor = ServiceDescriptor::from_flags(
                    name.clone(),
                    move |_| {
                        if fails {
                            return Err::<u32, BoxError>("fuzz failure".into());
                        }
                        Ok(7)
                    },
                    &flags,
                );
                match locator.register(descriptor) {
                    Ok(()) => {
                        registered.insert(name);
                    }
                    Err(LocatorError::InvalidScope { .. }) | Err(LocatorError::Construction { .. }) => {}
                    Err(other) => panic!("unexpected register error: {}", other),
                }
            }
            1 => match locator.get::<u32>(&name) {
                Ok(value) => assert_eq!(*value, 7),
                Err(LocatorError::NotRegistered(_)) => assert!(!registered.contains(&name)),
                Err(LocatorError::Construction { .. }) => assert!(registered.contains(&name)),
                Err(other) => panic!("unexpected get error: {}", other),
            },
            _ => {
                assert_eq!(locator.contains(&name), registered.contains(&name));
            }
        }
    }

    assert_eq!(locator.len(), registered.len());
});
