//! Property-based tests for URN minting and port decomposition.

use chrono::NaiveDate;
use nml_topology::vocab::{direction_to_port_type, reverse};
use nml_topology::{split_port, Direction, FixedClock, SequentialTokens, UrnAuthority};
use proptest::prelude::*;

fn authority() -> UrnAuthority {
    UrnAuthority::with_sources(
        "prop test",
        &[],
        Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())),
        Box::new(SequentialTokens::default()),
    )
}

fn segment() -> impl Strategy<Value = String> {
    // Anything printable, including the `:` delimiter and `%`, minus the
    // prefixes that mark a resolved identifier.
    "[ -~]{0,12}".prop_filter("raw names only", |s| {
        !s.starts_with("urn:") && !s.contains("://")
    })
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::In), Just(Direction::Out)]
}

proptest! {
    /// Distinct (name, extras) pairs never mint the same URN.
    #[test]
    fn prop_mint_injective(
        a in segment(),
        a_extras in prop::collection::vec(segment(), 0..5),
        b in segment(),
        b_extras in prop::collection::vec(segment(), 0..5),
    ) {
        let mut auth = authority();
        let a_refs: Vec<&str> = a_extras.iter().map(String::as_str).collect();
        let b_refs: Vec<&str> = b_extras.iter().map(String::as_str).collect();
        let urn_a = auth.mint(&a, &a_refs, false).unwrap();
        let urn_b = auth.mint(&b, &b_refs, false).unwrap();
        if (&a, &a_extras) != (&b, &b_extras) {
            prop_assert_ne!(urn_a, urn_b);
        } else {
            prop_assert_eq!(urn_a, urn_b);
        }
    }

    /// Splitting a port URN returns its direction and a base shared by the
    /// opposite direction of the same port.
    #[test]
    fn prop_split_port_roundtrip(device in segment(), port in segment(), d in direction()) {
        let mut auth = authority();
        let urn = auth.mint_port(&device.as_str().into(), &port, Some(d), &[]).unwrap();
        let other = auth.mint_port(&device.as_str().into(), &port, Some(d.reverse()), &[]).unwrap();
        let (base, dir) = split_port(&urn).unwrap();
        let (other_base, _) = split_port(&other).unwrap();
        prop_assert_eq!(dir, d.as_str());
        prop_assert_eq!(base, other_base);
    }

    /// Reversing before lookup equals looking up the reversed direction.
    #[test]
    fn prop_reverse_composition(d in direction()) {
        let key = d.as_str();
        let reversed = reverse(key).unwrap();
        prop_assert_eq!(
            direction_to_port_type(key, true).unwrap(),
            direction_to_port_type(reversed.as_str(), false).unwrap()
        );
    }
}
