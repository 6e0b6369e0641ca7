//! Greedy auto-builder used by `--auto`.

use tycoon_core::BuildingKind;
use tycoon_runtime::Game;

/// The buildable building whose next unit has the smallest summed cost.
/// Ties go to the earlier building in catalog order.
pub fn cheapest_buildable(game: &Game) -> Option<BuildingKind> {
    let rules = game.rules();
    let state = game.state();
    BuildingKind::ALL
        .into_iter()
        .filter(|kind| rules.can_build(state, *kind))
        .map(|kind| {
            let total: f64 = rules.next_building_cost(state, kind).values().sum();
            (kind, total)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(kind, _)| kind)
}
