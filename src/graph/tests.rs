use super::*;
use crate::error::Error;

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(n: usize) -> WeightedDigraph<u32, String> {
        WeightedDigraph::new(n).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_vertices() {
        let result = WeightedDigraph::<u32, ()>::new(0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_add_and_find() {
        let mut g = labelled(3);
        g.add_edge(0, 1, 10, "0->1".to_string()).unwrap();
        g.add_edge(1, 2, 20, "1->2".to_string()).unwrap();

        let (weight, payload) = g.find_edge(0, 1).unwrap();
        assert_eq!(weight, 10);
        assert_eq!(payload, "0->1");

        assert_eq!(g.weight(1, 2), Some(20));
        // Directed: the reverse edge was never added.
        assert_eq!(g.find_edge(1, 0), None);
        assert_eq!(g.find_edge(2, 0), None);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_last_insert_shadows() {
        let mut g = labelled(2);
        g.add_edge(0, 1, 5, "first".to_string()).unwrap();
        g.add_edge(0, 1, 9, "second".to_string()).unwrap();

        let (weight, payload) = g.find_edge(0, 1).unwrap();
        assert_eq!(weight, 9);
        assert_eq!(payload, "second");

        // Both edges are still stored, newest first.
        let weights: Vec<u32> = g.edges_from(0).map(|e| e.weight).collect();
        assert_eq!(weights, vec![9, 5]);
    }

    #[test]
    fn test_out_of_range_insert_leaves_graph_untouched() {
        let mut g = labelled(2);

        let err = g.add_edge(0, 2, 1, String::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange { vertex: 2, vertex_count: 2 }
        ));

        let err = g.add_edge(7, 0, 1, String::new()).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { vertex: 7, .. }));

        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges_from(0).count(), 0);
    }

    #[test]
    fn test_lookup_out_of_range_is_none() {
        let mut g = labelled(2);
        g.add_edge(0, 1, 1, String::new()).unwrap();

        assert_eq!(g.find_edge(5, 0), None);
        assert_eq!(g.find_edge(0, 5), None);
        assert_eq!(g.edges_from(9).count(), 0);
    }

    #[test]
    fn test_rejects_inadmissible_weights() {
        let mut signed = WeightedDigraph::<i32, ()>::new(2).unwrap();
        assert!(matches!(
            signed.add_edge(0, 1, -4, ()),
            Err(Error::InvalidWeight { source_vertex: 0, destination: 1, .. })
        ));

        let mut float = WeightedDigraph::<f64, ()>::new(2).unwrap();
        assert!(float.add_edge(0, 1, f64::NAN, ()).is_err());
        assert!(float.add_edge(0, 1, 1.25, ()).is_ok());
        assert_eq!(float.weight(0, 1), Some(1.25));
    }

    #[test]
    fn test_from_edges_and_display() {
        let g = WeightedDigraph::from_edges(
            2,
            vec![(0, 1, 3u32, ()), (1, 0, 4, ()), (0, 1, 7, ())],
        )
        .unwrap();

        let dump = g.to_string();
        assert_eq!(dump, "Vertex 0: -> 1 = 7 -> 1 = 3\nVertex 1: -> 0 = 4\n");
    }
}
