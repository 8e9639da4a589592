use crate::resolve::{Diagnostics, Level, Resolution, ResolvedName, UnresolvedReason, resolve};
use crate::schema::{AnnotationEntry, SchemaFile, ServiceTarget};
use crate::testing::{entry, ping_file};

fn ping_target() -> ServiceTarget {
    ServiceTarget::new("api/ping/v1/ping.proto", "PingService")
}

fn run(files: &[SchemaFile]) -> (Resolution, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let resolution = resolve(files, &ping_target(), &mut diagnostics);
    (resolution, diagnostics)
}

fn convention(value: &str) -> AnnotationEntry {
    entry(
        50001,
        "ping_service_name",
        "api.ping.v1.PingService.ping_service_name",
        value,
    )
}

fn unwrap_resolved(resolution: Resolution) -> ResolvedName {
    match resolution {
        Resolution::Resolved(name) => name,
        Resolution::Unresolved(u) => panic!("unexpected unresolved: {u}"),
    }
}

fn unwrap_reason(resolution: Resolution) -> UnresolvedReason {
    match resolution {
        Resolution::Resolved(name) => panic!("unexpected resolved: {name:?}"),
        Resolution::Unresolved(u) => u.reason,
    }
}

#[test]
fn single_convention_match() {
    let (resolution, diagnostics) = run(&[ping_file(Some(vec![convention("ping")]))]);

    let name = unwrap_resolved(resolution);
    assert_eq!(name.value, "ping");
    assert_eq!(name.full_name, "api.ping.v1.PingService.ping_service_name");
    assert_eq!(name.tag, Some(50001));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.entries()[0].level, Level::Info);
    assert_eq!(
        diagnostics.entries()[0].to_string(),
        "[Service] Got gRPC service [api.ping.v1.PingService.ping_service_name] with name ping"
    );
}

#[test]
fn fallback_service_name() {
    let options = vec![entry(
        50000,
        "service_name",
        "api.options.service_name",
        "pong",
    )];
    let (resolution, diagnostics) = run(&[ping_file(Some(options))]);

    let name = unwrap_resolved(resolution);
    assert_eq!(name.value, "pong");
    assert_eq!(name.full_name, "api.ping.v1.PingService");
    assert_eq!(name.tag, None);
    assert_eq!(diagnostics.warnings().count(), 0);
}

#[test]
fn first_of_many_candidates_wins_with_one_warning() {
    let options = vec![
        convention("a"),
        entry(50002, "ping_service_alias", "api.ping.v1.ping_service_alias", "b"),
        entry(50000, "service_name", "api.options.service_name", "c"),
    ];
    let (resolution, diagnostics) = run(&[ping_file(Some(options))]);

    assert_eq!(unwrap_resolved(resolution).value, "a");

    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    let warning = warnings[0].to_string();
    assert!(warning.starts_with("[Service] [WARNING] Got multiple service names for PingService"));
    assert!(warning.contains(r#"[api.ping.v1.PingService.ping_service_name] = "a""#));
    assert!(warning.contains(r#"[api.ping.v1.ping_service_alias] = "b""#));
    assert!(warning.contains(r#"[api.ping.v1.PingService] = "c""#));

    // warning, then the selected candidate
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.entries()[1].level, Level::Info);
}

#[test]
fn order_decides_not_rule() {
    let options = vec![
        entry(50000, "service_name", "api.options.service_name", "generic"),
        convention("specific"),
    ];
    let (resolution, _) = run(&[ping_file(Some(options))]);
    assert_eq!(unwrap_resolved(resolution).value, "generic");
}

#[test]
fn unrelated_options_do_not_match() {
    let options = vec![
        entry(33, "deprecated", "google.protobuf.ServiceOptions.deprecated", "true"),
        entry(50009, "echo_service_name", "api.ping.v1.echo_service_name", "echo"),
    ];
    let (resolution, diagnostics) = run(&[ping_file(Some(options))]);

    assert_eq!(unwrap_reason(resolution), UnresolvedReason::NoMatchingOption);
    assert!(diagnostics.is_empty());
}

#[test]
fn empty_options_do_not_match() {
    let (resolution, _) = run(&[ping_file(Some(vec![]))]);
    assert_eq!(unwrap_reason(resolution), UnresolvedReason::NoMatchingOption);
}

#[test]
fn missing_options() {
    let (resolution, _) = run(&[ping_file(None)]);
    assert_eq!(unwrap_reason(resolution), UnresolvedReason::NoOptionsSet);
}

#[test]
fn missing_service() {
    let mut file = ping_file(Some(vec![convention("ping")]));
    file.services[0].name = "EchoService".into();

    let (resolution, _) = run(&[file]);
    assert_eq!(unwrap_reason(resolution), UnresolvedReason::ServiceNotFound);
}

#[test]
fn missing_source_file() {
    let mut file = ping_file(Some(vec![convention("ping")]));
    file.path = "api/ping/v2/ping.proto".into();

    let (resolution, diagnostics) = run(&[file]);
    assert_eq!(
        resolution.discovery_name(),
        "UNRESOLVED source file not found for PingService"
    );
    assert_eq!(unwrap_reason(resolution), UnresolvedReason::SourceFileNotFound);
    assert!(diagnostics.is_empty());
}

#[test]
fn looks_only_at_the_owning_file() {
    let mut other = ping_file(Some(vec![convention("wrong")]));
    other.path = "api/ping/v2/ping.proto".into();
    let owner = ping_file(Some(vec![convention("right")]));

    let (resolution, _) = run(&[other, owner]);
    assert_eq!(unwrap_resolved(resolution).value, "right");
}

#[test]
fn resolution_is_stateless() {
    let files = [ping_file(Some(vec![convention("ping")]))];
    let mut diagnostics = Diagnostics::new();

    let first = resolve(&files, &ping_target(), &mut diagnostics);
    let second = resolve(&files, &ping_target(), &mut diagnostics);
    assert_eq!(first, second);
}
