#[cfg(test)]
mod _tests_cluster_classification {
    use super::super::cluster_classification::{classify_clusters, FrameTransform, GroupIndex};
    use super::super::cluster_enumeration::enumerate_cluster_types;
    use crate::clusters::Cluster;
    use crate::interfaces::DecorationBasis;
    use crate::lattice::{a2_space_group, a2_tetrahedron, b2_tetrahedron};
    use nalgebra::{Matrix3, Vector3};

    const TOL: f64 = 1e-10;

    #[test]
    fn test_frame_transform_apply() {
        let transform = FrameTransform::new(Matrix3::identity() * 2.0, Vector3::new(1.0, 0.0, 0.0));
        let image = transform.apply(&Vector3::new(1.0, 1.0, 1.0));
        assert!((image - Vector3::new(3.0, 2.0, 2.0)).norm() < TOL);
        assert!(!transform.is_identity());
        assert!(FrameTransform::identity().is_identity());
    }

    #[test]
    fn test_to_reference_regroups_sublattices() {
        let a2 = a2_space_group().unwrap();
        let b2_pair = Cluster::from_positions(vec![
            vec![Vector3::zeros()],
            vec![Vector3::new(1.0, 1.0, 1.0)],
        ]);
        let mapped = FrameTransform::identity().to_reference(&b2_pair, &a2).unwrap();
        assert_eq!(mapped.site_counts(), vec![2]);

        let off_lattice = FrameTransform::new(Matrix3::identity(), Vector3::new(1.0, 0.0, 0.0));
        assert!(off_lattice.to_reference(&b2_pair, &a2).is_err());
    }

    #[test]
    fn test_disordered_classification_is_one_to_one() {
        let phase = a2_tetrahedron().unwrap();
        let set = enumerate_cluster_types(
            &phase.maximal_clusters,
            &phase.space_group,
            &DecorationBasis::Topology,
        )
        .unwrap();
        let classified =
            classify_clusters(&set, &FrameTransform::identity(), &set, &phase.space_group).unwrap();

        assert_eq!(classified.num_reference_types(), set.len());
        assert_eq!(classified.group_counts(), vec![1; set.len()]);
        for o in 0..set.len() {
            assert_eq!(
                classified.index_of(o),
                GroupIndex {
                    cluster_type: o,
                    group: 0
                }
            );
        }
    }

    #[test]
    fn test_b2_classification_under_a2() {
        let reference = a2_tetrahedron().unwrap();
        let ordered = b2_tetrahedron().unwrap();
        let topology = DecorationBasis::Topology;
        let reference_set =
            enumerate_cluster_types(&reference.maximal_clusters, &reference.space_group, &topology)
                .unwrap();
        let ordered_set =
            enumerate_cluster_types(&ordered.maximal_clusters, &ordered.space_group, &topology)
                .unwrap();
        let classified = classify_clusters(
            &ordered_set,
            &FrameTransform::identity(),
            &reference_set,
            &reference.space_group,
        )
        .unwrap();

        // tetrahedron, triangle (αβα / βαβ), 1NN pair, 2NN pair (αα / ββ), point (α / β), empty
        assert_eq!(classified.group_counts(), vec![1, 2, 1, 2, 2, 1]);

        // Ordered multiplicities add up to the reference multiplicity
        for (t, reference_type) in reference_set.types().iter().enumerate() {
            let total: f64 = classified.groups_of(t).iter().map(|g| g.multiplicity).sum();
            assert!((total - reference_type.multiplicity).abs() < TOL);
        }

        let flat: Vec<usize> = classified
            .indices()
            .map(|index| classified.flat_index(index))
            .collect();
        assert_eq!(flat, (0..ordered_set.len()).collect::<Vec<_>>());
    }
}
