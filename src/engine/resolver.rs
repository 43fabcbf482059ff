use super::matcher::Evaluation;

/// Ordering key for single-match mode: earliest start, then earliest loaded
fn rank(evaluation: &Evaluation<'_>) -> Option<(usize, usize)> {
    evaluation
        .hit
        .as_ref()
        .map(|hit| (hit.start, evaluation.filter.load_order))
}

/// Reduce a document's matches to the single earliest one
///
/// Load orders are unique, so the key is a strict total order and the winner
/// does not depend on the order of `matched`. Evaluations that did not match
/// are ignored.
pub fn resolve<'r>(matched: Vec<Evaluation<'r>>) -> Option<Evaluation<'r>> {
    matched
        .into_iter()
        .filter_map(|evaluation| rank(&evaluation).map(|key| (key, evaluation)))
        .min_by_key(|(key, _)| *key)
        .map(|(_, evaluation)| evaluation)
}
