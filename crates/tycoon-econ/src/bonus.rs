//! Folding purchased upgrades into effective multipliers.

use crate::Rules;
use std::collections::BTreeSet;
use tycoon_core::{BuildingKind, Catalog, UpgradeEffect, UpgradeId};

/// Multipliers implied by a set of purchased upgrades.
///
/// Building, global and research multipliers compose as products. Electricity
/// surcharges add up: each upgrade is a parallel power draw.
#[derive(Clone, Copy, Debug)]
pub struct Bonuses<'a> {
    catalog: &'a Catalog,
    purchased: &'a BTreeSet<UpgradeId>,
}

impl<'a> Bonuses<'a> {
    pub fn new(catalog: &'a Catalog, purchased: &'a BTreeSet<UpgradeId>) -> Self {
        Self { catalog, purchased }
    }

    /// Ids missing from the catalog contribute nothing.
    fn effects(&self) -> impl Iterator<Item = &'a UpgradeEffect> + 'a {
        let (catalog, purchased) = (self.catalog, self.purchased);
        purchased
            .iter()
            .filter_map(move |id| catalog.upgrade(id).map(|u| &u.effect))
    }

    pub fn building_multiplier(&self, kind: BuildingKind) -> f64 {
        self.effects()
            .filter_map(|e| e.building_multiplier.get(&kind))
            .product()
    }

    pub fn global_multiplier(&self) -> f64 {
        self.effects().filter_map(|e| e.global_multiplier).product()
    }

    pub fn research_multiplier(&self) -> f64 {
        self.effects().filter_map(|e| e.research_multiplier).product()
    }

    pub fn electricity_surcharge(&self, kind: BuildingKind) -> f64 {
        self.effects()
            .filter_map(|e| e.electricity_cost.get(&kind))
            .sum()
    }
}

impl<'a> Rules<'a> {
    pub fn bonuses<'s>(&self, purchased: &'s BTreeSet<UpgradeId>) -> Bonuses<'s>
    where
        'a: 's,
    {
        Bonuses::new(self.catalog, purchased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tycoon_core::{CatalogBuilder, UpgradeCategory, UpgradeDef};

    fn boost(mult: Option<f64>, surcharge: Option<f64>) -> UpgradeDef {
        let mut effect = UpgradeEffect::default();
        if let Some(m) = mult {
            effect.building_multiplier.insert(BuildingKind::StoneFurnace, m);
        }
        if let Some(s) = surcharge {
            effect.electricity_cost.insert(BuildingKind::StoneFurnace, s);
        }
        UpgradeDef {
            name: "boost".into(),
            description: String::new(),
            cost: Default::default(),
            effect,
            category: UpgradeCategory::Building,
            building: None,
            unlock_condition: Default::default(),
        }
    }

    fn catalog_with(upgrades: &[(&str, UpgradeDef)]) -> Catalog {
        let mut b: CatalogBuilder = Catalog::standard_builder();
        for (id, def) in upgrades {
            b.insert_upgrade(UpgradeId::new(*id), def.clone());
        }
        b.build().unwrap()
    }

    #[test]
    fn multipliers_multiply_surcharges_add() {
        let catalog = catalog_with(&[
            ("a", boost(Some(1.5), Some(1.0))),
            ("b", boost(Some(1.5), Some(1.0))),
        ]);
        let purchased: BTreeSet<_> = [UpgradeId::new("a"), UpgradeId::new("b")].into();
        let b = Bonuses::new(&catalog, &purchased);
        assert!((b.building_multiplier(BuildingKind::StoneFurnace) - 2.25).abs() < 1e-12);
        assert!((b.electricity_surcharge(BuildingKind::StoneFurnace) - 2.0).abs() < 1e-12);
        assert_eq!(b.building_multiplier(BuildingKind::IronMine), 1.0);
        assert_eq!(b.electricity_surcharge(BuildingKind::IronMine), 0.0);
    }

    #[test]
    fn empty_set_is_identity() {
        let catalog = Catalog::standard();
        let purchased = BTreeSet::new();
        let b = Bonuses::new(&catalog, &purchased);
        assert_eq!(b.global_multiplier(), 1.0);
        assert_eq!(b.research_multiplier(), 1.0);
        for kind in BuildingKind::ALL {
            assert_eq!(b.building_multiplier(kind), 1.0);
        }
    }

    #[test]
    fn standard_upgrades_resolve() {
        let catalog = Catalog::standard();
        let purchased: BTreeSet<_> = [
            UpgradeId::new("better_pickaxes"),
            UpgradeId::new("reinforced_mining"),
            UpgradeId::new("electric_iron_boost"),
            UpgradeId::new("factory_organization"),
            UpgradeId::new("research_efficiency"),
            UpgradeId::new("advanced_research"),
            UpgradeId::new("no_such_upgrade"),
        ]
        .into();
        let b = Bonuses::new(&catalog, &purchased);
        let iron = b.building_multiplier(BuildingKind::IronMine);
        assert!((iron - 1.5 * 1.25 * 1.5).abs() < 1e-12);
        assert!((b.global_multiplier() - 1.2).abs() < 1e-12);
        assert!((b.research_multiplier() - 3.0).abs() < 1e-12);
        assert_eq!(b.electricity_surcharge(BuildingKind::IronMine), 1.0);
        assert_eq!(b.electricity_surcharge(BuildingKind::ElectricIronDrill), 0.5);
    }

    proptest! {
        #[test]
        fn composition_is_product_and_sum(ms in proptest::collection::vec((0.1f64..4.0, 0.0f64..5.0), 1..6)) {
            let defs: Vec<(String, UpgradeDef)> = ms
                .iter()
                .enumerate()
                .map(|(i, (m, s))| (format!("u{i}"), boost(Some(*m), Some(*s))))
                .collect();
            let refs: Vec<(&str, UpgradeDef)> = defs.iter().map(|(id, d)| (id.as_str(), d.clone())).collect();
            let catalog = catalog_with(&refs);
            let purchased: BTreeSet<_> = defs.iter().map(|(id, _)| UpgradeId::new(id.clone())).collect();
            let b = Bonuses::new(&catalog, &purchased);
            let product: f64 = ms.iter().map(|(m, _)| m).product();
            let sum: f64 = ms.iter().map(|(_, s)| s).sum();
            prop_assert!((b.building_multiplier(BuildingKind::StoneFurnace) - product).abs() < 1e-9 * product.max(1.0));
            prop_assert!((b.electricity_surcharge(BuildingKind::StoneFurnace) - sum).abs() < 1e-9);
        }
    }
}
