//! NML structural checks on an assembled graph.
//!
//! Runs without a SHACL engine:
//! - every entity another statement refers to is declared with the right class
//! - bidirectional ports group exactly two ports
//! - labels carry exactly one type and one value, and are never duplicated
//! - topologies carry a `YYYYMMDD` version

use std::collections::HashMap;

use nml_topology::graph::rdf_type;
use nml_topology::{EntityClass, Graph, Iri, Object, Relation};

use crate::report::{ConformanceReport, TestResult};

/// Runs every structural check against `graph`.
pub fn validate(graph: &Graph) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let classes = Classes::of(graph);

    check_references(graph, &classes, &mut report);
    check_bidirectional_ports(graph, &classes, &mut report);
    check_labels(graph, &mut report);
    check_topology_versions(graph, &mut report);

    report
}

/// `rdf:type` statements indexed by subject.
struct Classes<'a> {
    by_subject: HashMap<&'a Iri, Vec<&'a Iri>>,
}

impl<'a> Classes<'a> {
    fn of(graph: &'a Graph) -> Self {
        let rdf_type = rdf_type();
        let mut by_subject: HashMap<&Iri, Vec<&Iri>> = HashMap::new();
        for t in graph.triples_matching(None, Some(&rdf_type), None) {
            if let Some(class) = t.object.as_iri() {
                by_subject.entry(&t.subject).or_default().push(class);
            }
        }
        Classes { by_subject }
    }

    fn is_any(&self, subject: &Iri, classes: &[EntityClass]) -> bool {
        self.by_subject.get(subject).is_some_and(|declared| {
            classes
                .iter()
                .any(|c| declared.iter().any(|d| **d == c.term()))
        })
    }
}

/// Which end of a relation must be declared with which classes.
enum End {
    Subject,
    Object,
}

const REFERENCE_RULES: &[(Relation, End, &[EntityClass])] = &[
    (
        Relation::HasInboundPort,
        End::Object,
        &[EntityClass::Port, EntityClass::BidirectionalPort],
    ),
    (
        Relation::HasOutboundPort,
        End::Object,
        &[EntityClass::Port, EntityClass::BidirectionalPort],
    ),
    (
        Relation::HasPort,
        End::Object,
        &[EntityClass::Port, EntityClass::BidirectionalPort],
    ),
    (Relation::ProvidesPort, End::Object, &[EntityClass::Port]),
    (Relation::IsSource, End::Subject, &[EntityClass::Port]),
    (Relation::IsSource, End::Object, &[EntityClass::Link]),
    (Relation::IsSink, End::Subject, &[EntityClass::Port]),
    (Relation::IsSink, End::Object, &[EntityClass::Link]),
    (Relation::HasLabel, End::Object, &[EntityClass::Label]),
    (Relation::HasNode, End::Object, &[EntityClass::Node]),
    (
        Relation::HasService,
        End::Object,
        &[
            EntityClass::SwitchingService,
            EntityClass::AdaptationService,
            EntityClass::DeadaptationService,
        ],
    ),
];

fn check_references(graph: &Graph, classes: &Classes<'_>, report: &mut ConformanceReport) {
    let mut details = Vec::new();
    for (relation, end, expected) in REFERENCE_RULES {
        let predicate = relation.term();
        for t in graph.triples_matching(None, Some(&predicate), None) {
            let target = match end {
                End::Subject => Some(&t.subject),
                End::Object => t.object.as_iri(),
            };
            match target {
                Some(target) if classes.is_any(target, expected) => {}
                Some(target) => details.push(format!(
                    "{target} ({relation} {}) is not a {}",
                    match end {
                        End::Subject => "subject",
                        End::Object => "object",
                    },
                    expected
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(" or ")
                )),
                None => details.push(format!("{} {relation} points at a literal", t.subject)),
            }
        }
    }

    if details.is_empty() {
        report.push(TestResult::pass(
            "topology/references",
            "every referenced entity is declared with its class",
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "topology/references",
            format!("{} references to undeclared entities", details.len()),
            details,
        ));
    }
}

fn check_bidirectional_ports(
    graph: &Graph,
    classes: &Classes<'_>,
    report: &mut ConformanceReport,
) {
    let has_port = Relation::HasPort.term();
    let groups = graph.subjects_of_type(&EntityClass::BidirectionalPort.term());
    let mut details = Vec::new();

    for &group in &groups {
        let members: Vec<&Object> = graph.objects(group, &has_port).collect();
        if members.len() != 2 {
            details.push(format!("{group} groups {} ports", members.len()));
            continue;
        }
        for member in members {
            match member.as_iri() {
                Some(port) if classes.is_any(port, &[EntityClass::Port]) => {}
                _ => details.push(format!("{group} groups a non-Port member")),
            }
        }
    }

    if details.is_empty() {
        report.push(TestResult::pass(
            "topology/bidirectional",
            format!("{} bidirectional ports group two ports each", groups.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "topology/bidirectional",
            "malformed bidirectional ports",
            details,
        ));
    }
}

fn check_labels(graph: &Graph, report: &mut ConformanceReport) {
    let type_term = Relation::Type.term();
    let value_term = Relation::Value.term();
    let labels = graph.subjects_of_type(&EntityClass::Label.term());
    let mut details = Vec::new();
    let mut seen: HashMap<(&Object, &Object), &Iri> = HashMap::new();

    for &label in &labels {
        let types: Vec<&Object> = graph.objects(label, &type_term).collect();
        let values: Vec<&Object> = graph.objects(label, &value_term).collect();
        let (&[label_type], &[value]) = (types.as_slice(), values.as_slice()) else {
            details.push(format!(
                "{label} has {} types and {} values",
                types.len(),
                values.len()
            ));
            continue;
        };
        if let Some(first) = seen.insert((label_type, value), label) {
            details.push(format!("{label} duplicates {first}"));
        }
    }

    if details.is_empty() {
        report.push(TestResult::pass(
            "topology/labels",
            format!("{} labels are unique and complete", labels.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "topology/labels",
            "malformed or duplicated labels",
            details,
        ));
    }
}

fn check_topology_versions(graph: &Graph, report: &mut ConformanceReport) {
    let version = Relation::Version.term();
    let topologies = graph.subjects_of_type(&EntityClass::Topology.term());
    let mut details = Vec::new();

    for &topology in &topologies {
        let versions: Vec<&str> = graph
            .objects(topology, &version)
            .filter_map(Object::as_literal)
            .map(|lit| lit.lexical())
            .collect();
        let valid = matches!(
            versions.as_slice(),
            [v] if v.len() == 8 && v.bytes().all(|b| b.is_ascii_digit())
        );
        if !valid {
            details.push(format!("{topology} has versions {versions:?}"));
        }
    }

    if topologies.is_empty() {
        report.push(TestResult::warn(
            "topology/version",
            "document declares no Topology",
        ));
    } else if details.is_empty() {
        report.push(TestResult::pass(
            "topology/version",
            format!("{} topologies carry a YYYYMMDD version", topologies.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "topology/version",
            "topologies without a single YYYYMMDD version",
            details,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nml_topology::{Direction, FixedClock, LabelType, NmlBuilder};

    fn builder() -> NmlBuilder {
        NmlBuilder::new("example", &[]).with_clock(FixedClock(
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        ))
    }

    #[test]
    fn builder_output_passes() {
        let mut nml = builder();
        let topo = nml.add_topology(None).unwrap();
        let node = nml.add_node("sw").unwrap();
        nml.relate(&topo, &node, Relation::HasNode).unwrap();
        let a = nml.add_port(&node, "1", Some(Direction::In), None, None).unwrap();
        let b = nml.add_port(&node, "1", Some(Direction::Out), None, None).unwrap();
        nml.relate(&node, &a, Relation::HasInboundPort).unwrap();
        nml.add_bidirectional_port(&node, "1", &a, &b, &[]).unwrap();
        nml.add_label(&a, &LabelType::Vlan.term(), 100).unwrap();

        let report = validate(nml.graph());
        assert!(report.all_passed(), "{:#?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn undeclared_port_reference_fails() {
        let mut nml = builder();
        let node = nml.add_node("sw").unwrap();
        let ghost = nml.mint_port_urn(&node, "9", Some(Direction::In), &[]).unwrap();
        nml.relate(&node, &ghost, Relation::HasInboundPort).unwrap();

        let report = validate(nml.graph());
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.validator, "topology/references");
        assert!(failure.details[0].starts_with(ghost.as_str()));
    }

    #[test]
    fn bidirectional_port_with_one_member_fails() {
        let mut nml = builder();
        let node = nml.add_node("sw").unwrap();
        let a = nml.add_port(&node, "1", Some(Direction::In), None, None).unwrap();
        nml.add_bidirectional_port(&node, "1", &a, &a, &[]).unwrap();

        let report = validate(nml.graph());
        assert!(report
            .failures()
            .any(|r| r.validator == "topology/bidirectional"));
    }

    #[test]
    fn missing_topology_is_only_a_warning() {
        let mut nml = builder();
        nml.add_node("sw").unwrap();
        let report = validate(nml.graph());
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
    }
}
