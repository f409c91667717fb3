//! Builder output re-parsed and validated through every syntax.

use chrono::NaiveDate;
use nml_conformance::validators::rdf::{load_document, FORMATS};
use nml_conformance::{fixtures, run_all, run_document, self_check};
use nml_topology::{FixedClock, Format, NmlBuilder, SequentialTokens, TopologyDescription};

fn build(text: &str) -> NmlBuilder {
    let description = TopologyDescription::from_json(text).unwrap();
    let mut nml = description
        .builder()
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()))
        .with_tokens(SequentialTokens::default());
    description.build(&mut nml).unwrap();
    nml
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn self_check_passes() {
    let report = self_check().unwrap();
    assert!(
        report.all_passed(),
        "{}",
        report
            .failures()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn every_fixture_round_trips_in_every_format() {
    for (name, text) in fixtures::ALL {
        let nml = build(text);
        let report = run_all(nml.graph()).unwrap();
        assert!(report.all_passed(), "fixture {name}: {report:#?}");

        for format in FORMATS {
            let document = nml.serialize(format).unwrap();
            let loaded = load_document(&document, format).unwrap();
            assert_eq!(loaded.len(), nml.graph().len(), "fixture {name} as {format}");
            for t in nml.graph().iter() {
                assert!(
                    loaded.contains(&t.subject, &t.predicate, &t.object),
                    "fixture {name} as {format} lost {t:?}"
                );
            }
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn ntriples_document_passes() {
    let nml = build(fixtures::RING);
    let document = nml.serialize(Format::NTriples).unwrap();
    let report = run_document(&document, Format::NTriples).unwrap();
    assert!(report.all_passed());
}

#[test]
fn tampered_document_fails_structure_checks() {
    let nml = build(fixtures::RING);
    let document = nml.serialize(Format::NTriples).unwrap();
    // Drop every Label declaration, leaving hasLabel references dangling.
    let tampered: String = document
        .lines()
        .filter(|l| !l.ends_with("<http://schemas.ogf.org/nml/2013/05/base#Label> ."))
        .map(|l| format!("{l}\n"))
        .collect();
    let report = run_document(&tampered, Format::NTriples).unwrap();
    assert!(report
        .failures()
        .any(|r| r.validator == "topology/references"));
}

#[test]
fn unparsable_document_stops_after_parse_failure() {
    let report = run_document("<rdf:RDF", Format::RdfXml).unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.failure_count(), 1);
}
