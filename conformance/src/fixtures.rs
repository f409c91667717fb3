//! Sample topology descriptions exercised by the self-check and tests.
//!
//! Each fixture is a JSON [`nml_topology::TopologyDescription`] that builds
//! a document satisfying every validator.

/// Two switches joined by a single fiber link.
pub const RING: &str = r#"{
    "base_name": "example",
    "topology": "ring",
    "nodes": [
        { "name": "sw1",
          "ports": [ { "name": "1", "encoding": "fiber",
                       "labels": [ { "type": "vlan", "value": 100 } ] } ],
          "switching_service": "fabric" },
        { "name": "sw2",
          "ports": [ { "name": "1", "direction": "in",
                       "labels": [ { "type": "vlan", "value": 100 } ] } ],
          "adaptations": [ { "direction": "in", "function": "ethernet", "ports": ["1"] } ] }
    ],
    "links": [
        { "name": "sw1-sw2",
          "source": { "node": "sw1", "port": "1" },
          "sink": { "node": "sw2", "port": "1" } }
    ]
}"#;

/// A patch panel between two sites, with fiber numbering and names that
/// need escaping in every syntax.
pub const DEMARCATION: &str = r#"{
    "base_name": "campus north",
    "extras": ["dc 1"],
    "nodes": [
        { "name": "patch panel",
          "ports": [
            { "name": "a/1", "encoding": "duct", "display_name": "A <1> & co",
              "labels": [ { "type": "fibernumber", "value": 1 } ] },
            { "name": "a/2", "encoding": "duct",
              "labels": [ { "type": "fibernumber", "value": 2 } ] }
          ],
          "adaptations": [ { "direction": "out", "function": "fiber", "ports": ["a/1", "a/2"] } ] },
        { "name": "olt:1",
          "ports": [ { "name": "pon", "labels": [ { "type": "vlan", "value": "untagged" } ] } ] }
    ],
    "links": [
        { "source": { "node": "patch panel", "port": "a/1" },
          "sink": { "node": "olt:1", "port": "pon" } },
        { "source": { "node": "olt:1", "port": "pon" },
          "sink": { "node": "patch panel", "port": "a/2" } }
    ]
}"#;

/// Every fixture with its name.
pub const ALL: &[(&str, &str)] = &[("ring", RING), ("demarcation", DEMARCATION)];
