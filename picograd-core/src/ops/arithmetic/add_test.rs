use super::*;

#[test]
fn test_add_vecs_forward_backward() {
    let mut graph = Graph::new();
    let a: Vec<NodeId> = [1.0, 2.0, 3.0].iter().map(|&v| graph.constant(v)).collect();
    let b: Vec<NodeId> = [10.0, 20.0, 30.0].iter().map(|&v| graph.constant(v)).collect();
    let out = add_vecs(&mut graph, &a, &b);
    let values: Vec<f64> = out.iter().map(|&o| graph.value(o)).collect();
    assert_eq!(values, vec![11.0, 22.0, 33.0]);

    graph.backward(out[1]);
    assert_eq!(graph.grad(a[1]), 1.0);
    assert_eq!(graph.grad(b[1]), 1.0);
    assert_eq!(graph.grad(a[0]), 0.0);
}

#[test]
fn test_add_vecs_does_not_touch_inputs() {
    let mut graph = Graph::new();
    let a = vec![graph.constant(1.0)];
    let b = vec![graph.constant(2.0)];
    add_vecs(&mut graph, &a, &b);
    assert_eq!(graph.value(a[0]), 1.0);
    assert_eq!(graph.value(b[0]), 2.0);
    assert!(graph.node(a[0]).is_leaf());
}

#[test]
fn test_add_vecs_empty() {
    let mut graph = Graph::new();
    assert!(add_vecs(&mut graph, &[], &[]).is_empty());
}

#[test]
#[should_panic(expected = "add_vecs: length mismatch")]
fn test_add_vecs_length_mismatch_panics() {
    let mut graph = Graph::new();
    let a = vec![graph.constant(1.0)];
    add_vecs(&mut graph, &a, &[]);
}
