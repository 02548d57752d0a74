/// Prochain identifiant : strictement supérieur à tous les existants.
pub(super) fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().map_or(1, |max| max.saturating_add(1))
}
