use std::path::PathBuf;

use hx_mesh::{ConnectionSnapshot, DomainExport, DomainSnapshot, MeshError};
use hx_project::schema::*;
use hx_project::{LATEST_VERSION, ProjectError, build_mesh, load_mesh};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn port(
    consumer: (&str, &str),
    producer: (&str, &str),
    domain_export: Option<DomainExport>,
    highlighted: bool,
) -> ConnectionSnapshot {
    ConnectionSnapshot::Port {
        consumer_component: consumer.0.to_string(),
        consumer_port: consumer.1.to_string(),
        producer_component: producer.0.to_string(),
        producer_port: producer.1.to_string(),
        highlighted,
        domain_export,
    }
}

fn resource(consumer: (&str, &str), resource: &str) -> ConnectionSnapshot {
    ConnectionSnapshot::Resource {
        consumer_component: consumer.0.to_string(),
        consumer_port: consumer.1.to_string(),
        resource: resource.to_string(),
        highlighted: false,
    }
}

fn component(name: &str, needs: &[&str], provides: &[&str]) -> ComponentDef {
    ComponentDef {
        name: name.to_string(),
        needs: needs.iter().map(|s| s.to_string()).collect(),
        provides: provides.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn shop_fixture_builds_expected_mesh() {
    let mesh = load_mesh(&fixture("shop.yaml")).unwrap();
    let snapshot = mesh.snapshot();

    let names: Vec<&str> = snapshot
        .components
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["web", "orders", "catalog", "payments"]);
    assert!(snapshot.components[2].highlighted);
    assert!(!snapshot.components[0].highlighted);

    assert_eq!(
        snapshot.domains,
        vec![DomainSnapshot {
            name: "Checkout".to_string(),
            needs_ports: vec!["payments".to_string()],
            provides_ports: vec!["orders".to_string()],
            children: vec!["orders".to_string()],
            label_for_needs: "Checkout__needs".to_string(),
            label_for_provides: "Checkout__provides".to_string(),
            highlighted: true,
        }]
    );

    assert_eq!(
        snapshot.connections,
        vec![
            port(
                ("orders", "payments"),
                ("Checkout__needs", "payments"),
                Some(DomainExport::Needs),
                false,
            ),
            port(
                ("Checkout__provides", "orders"),
                ("orders", "orders"),
                Some(DomainExport::Provides),
                false,
            ),
            port(("web", "orders"), ("Checkout__provides", "orders"), None, true),
            port(("web", "catalog"), ("catalog", "catalog"), None, false),
            port(
                ("Checkout__needs", "payments"),
                ("payments", "payments"),
                None,
                false,
            ),
            resource(("orders", "storage"), "postgres"),
            resource(("catalog", "storage"), "postgres"),
        ]
    );
    assert_eq!(snapshot.resources, ["postgres"]);
    assert_eq!(snapshot.highlighted_resources, ["postgres"]);
}

#[test]
fn empty_file_builds_empty_mesh() {
    let file = MeshFile {
        version: LATEST_VERSION,
        ..Default::default()
    };
    assert!(build_mesh(&file).unwrap().is_empty());
}

#[test]
fn domain_ports_can_be_authored_directly() {
    let file = MeshFile {
        version: LATEST_VERSION,
        domains: vec![DomainDef {
            name: "Edge".to_string(),
            needs: vec!["auth".to_string()],
            provides: vec!["http".to_string()],
            highlighted: false,
        }],
        components: vec![component("idp", &[], &["auth"])],
        connections: vec![ConnectionDef::to_port(
            PortRef::new("Edge", "auth"),
            PortRef::new("idp", "auth"),
        )],
        ..Default::default()
    };

    let snapshot = build_mesh(&file).unwrap().snapshot();
    assert_eq!(snapshot.domains[0].needs_ports, ["auth"]);
    assert_eq!(snapshot.domains[0].provides_ports, ["http"]);
    assert!(snapshot.domains[0].children.is_empty());
    assert_eq!(
        snapshot.connections,
        vec![port(("Edge__needs", "auth"), ("idp", "auth"), None, false)]
    );
}

#[test]
fn undeclared_port_surfaces_mesh_error() {
    let file = MeshFile {
        version: LATEST_VERSION,
        components: vec![component("A", &["n1"], &[]), component("B", &[], &["p1"])],
        connections: vec![ConnectionDef::to_port(
            PortRef::new("A", "n1"),
            PortRef::new("B", "p2"),
        )],
        ..Default::default()
    };

    let err = build_mesh(&file).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Mesh(MeshError::InvalidPort { .. })
    ));
}

#[test]
fn exposure_without_domain_is_rejected() {
    let mut lonely = component("A", &["n1"], &[]);
    lonely.expose_needs.push("n1".to_string());
    let file = MeshFile {
        version: LATEST_VERSION,
        components: vec![lonely],
        ..Default::default()
    };

    let err = build_mesh(&file).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Mesh(MeshError::InvalidDomain { .. })
    ));
}

#[test]
fn second_producer_for_a_needs_port_is_rejected() {
    let file = MeshFile {
        version: LATEST_VERSION,
        components: vec![
            component("A", &["n1"], &[]),
            component("B", &[], &["p1"]),
        ],
        resources: vec![ResourceDef {
            name: "R".to_string(),
            highlighted: false,
        }],
        connections: vec![
            ConnectionDef::to_port(PortRef::new("A", "n1"), PortRef::new("B", "p1")),
            ConnectionDef::to_resource(PortRef::new("A", "n1"), "R"),
        ],
        ..Default::default()
    };

    let err = build_mesh(&file).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Mesh(MeshError::InvalidConnection { .. })
    ));
}

#[test]
fn highlighted_resource_edge_is_marked() {
    let file = MeshFile {
        version: LATEST_VERSION,
        components: vec![component("A", &["db"], &[])],
        resources: vec![ResourceDef {
            name: "R".to_string(),
            highlighted: false,
        }],
        connections: vec![ConnectionDef::to_resource(PortRef::new("A", "db"), "R").highlighted()],
        ..Default::default()
    };

    let snapshot = build_mesh(&file).unwrap().snapshot();
    assert!(snapshot.connections[0].is_highlighted());
    assert!(snapshot.highlighted_resources.is_empty());
}
