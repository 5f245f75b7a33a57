//! Property tests for mesh invariants.

use std::collections::HashSet;

use hx_mesh::{ConnectionSnapshot, Mesh, MeshError};
use proptest::prelude::*;

fn port_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,6}", 0..max).prop_map(|set| set.into_iter().collect())
}

fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

/// Three consumers with needs ports n0..n3, two producers with p0..p2, two resources.
fn wired_mesh() -> Mesh {
    let mut mesh = Mesh::new();
    for name in ["C0", "C1", "C2"] {
        mesh.add_component(name, &["n0", "n1", "n2", "n3"], &[])
            .unwrap();
    }
    for name in ["P0", "P1"] {
        mesh.add_component(name, &[], &["p0", "p1", "p2"]).unwrap();
    }
    mesh.add_resource("R0").unwrap();
    mesh.add_resource("R1").unwrap();
    mesh
}

#[derive(Debug, Clone)]
enum Attempt {
    Port {
        consumer: usize,
        needs: usize,
        producer: usize,
        provides: usize,
    },
    Resource {
        consumer: usize,
        needs: usize,
        resource: usize,
    },
}

fn attempt() -> impl Strategy<Value = Attempt> {
    prop_oneof![
        (0..3_usize, 0..4_usize, 0..2_usize, 0..3_usize).prop_map(
            |(consumer, needs, producer, provides)| Attempt::Port {
                consumer,
                needs,
                producer,
                provides,
            }
        ),
        (0..3_usize, 0..4_usize, 0..2_usize).prop_map(|(consumer, needs, resource)| {
            Attempt::Resource {
                consumer,
                needs,
                resource,
            }
        }),
    ]
}

proptest! {
    #[test]
    fn ports_keep_insertion_order(needs in port_names(8), provides in port_names(8)) {
        let mut mesh = Mesh::new();
        let (first_needs, rest_needs) = needs.split_at(needs.len() / 2);
        mesh.add_component("A", &as_strs(first_needs), &[]).unwrap();
        for port in rest_needs {
            mesh.add_needs_port("A", port.as_str()).unwrap();
        }
        for port in &provides {
            mesh.add_provides_port("A", port.as_str()).unwrap();
        }

        let snapshot = mesh.snapshot();
        prop_assert_eq!(&snapshot.components[0].needs_ports, &needs);
        prop_assert_eq!(&snapshot.components[0].provides_ports, &provides);
    }

    #[test]
    fn reused_names_always_rejected(names in port_names(10)) {
        let mut mesh = Mesh::new();
        for name in &names {
            mesh.add_component(name.as_str(), &[], &[]).unwrap();
            mesh.add_resource(name.as_str()).unwrap();
        }
        let before = mesh.snapshot();

        for name in &names {
            let domain_rejected = matches!(
                mesh.add_domain(name.as_str()),
                Err(MeshError::DuplicateEntry { .. })
            );
            prop_assert!(domain_rejected, "domain reused name {}", name);
            let resource_rejected = matches!(
                mesh.add_resource(name.as_str()),
                Err(MeshError::DuplicateEntry { .. })
            );
            prop_assert!(resource_rejected, "resource reused name {}", name);
        }
        prop_assert_eq!(mesh.snapshot(), before);
    }

    #[test]
    fn needs_port_has_at_most_one_producer(attempts in prop::collection::vec(attempt(), 0..40)) {
        let mut mesh = wired_mesh();
        let mut taken: HashSet<(usize, usize)> = HashSet::new();

        for attempt in &attempts {
            let (anchor, result) = match *attempt {
                Attempt::Port { consumer, needs, producer, provides } => (
                    (consumer, needs),
                    mesh.add_connection(
                        &format!("C{consumer}"),
                        &format!("n{needs}"),
                        &format!("P{producer}"),
                        &format!("p{provides}"),
                    ),
                ),
                Attempt::Resource { consumer, needs, resource } => (
                    (consumer, needs),
                    mesh.add_connection_to_resource(
                        &format!("C{consumer}"),
                        &format!("n{needs}"),
                        &format!("R{resource}"),
                    ),
                ),
            };

            if taken.insert(anchor) {
                prop_assert!(result.is_ok());
            } else {
                let rejected = matches!(result, Err(MeshError::InvalidConnection { .. }));
                prop_assert!(rejected, "second producer accepted for {:?}", anchor);
            }
        }

        let consumers: Vec<(String, String)> = mesh
            .snapshot()
            .connections
            .into_iter()
            .map(|conn| match conn {
                ConnectionSnapshot::Port { consumer_component, consumer_port, .. }
                | ConnectionSnapshot::Resource { consumer_component, consumer_port, .. } => {
                    (consumer_component, consumer_port)
                }
            })
            .collect();
        let unique: HashSet<_> = consumers.iter().collect();
        prop_assert_eq!(unique.len(), consumers.len());
        prop_assert_eq!(consumers.len(), taken.len());
    }

    #[test]
    fn highlight_order_does_not_matter(
        order in Just((0..6_usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let build = |steps: &[usize]| {
            let mut mesh = wired_mesh();
            mesh.add_connection("C0", "n0", "P0", "p0").unwrap();
            mesh.add_connection_to_resource("C1", "n1", "R1").unwrap();
            for step in steps {
                match *step {
                    0 => mesh.highlight_component("C0").unwrap(),
                    1 => mesh.highlight_component("P1").unwrap(),
                    2 => mesh.highlight_resource("R1").unwrap(),
                    3 => mesh.highlight_resource("R0").unwrap(),
                    4 => mesh.highlight_connection("C0", "n0", "P0", "p0").unwrap(),
                    _ => mesh.highlight_connection_to_resource("C1", "n1", "R1").unwrap(),
                }
            }
            mesh.snapshot()
        };

        let reference: Vec<usize> = (0..6).collect();
        prop_assert_eq!(build(&order), build(&reference));
    }
}
