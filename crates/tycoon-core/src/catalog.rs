//! Static recipe catalog: building and upgrade definitions.
//!
//! A [`Catalog`] is immutable once built and is usually shared behind an
//! `Arc`. Construction goes through [`CatalogBuilder`], which validates the
//! whole table on [`CatalogBuilder::build`], so rules code can trust the data
//! at tick time.

use crate::{check_amount, BuildingKind, LoadError, ResourceType, UpgradeId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource amounts, e.g. a cost bundle.
pub type CostMap = BTreeMap<ResourceType, f64>;

/// Per-unit rate ratios of a recipe.
pub type RateMap = BTreeMap<ResourceType, f64>;

/// "Own `count` units of `building`" predicate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnlockRequirement {
    pub building: BuildingKind,
    pub count: u32,
}

/// Definition of one building type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display tier, 1 = basic extraction.
    #[serde(default)]
    pub tier: u8,
    /// Rate scalar per owned unit.
    pub base_production: f64,
    /// Cost of the first unit; scales with count owned.
    pub base_cost: CostMap,
    /// Cost of the first efficiency upgrade; scales with upgrades bought.
    #[serde(default)]
    pub upgrade_cost: CostMap,
    pub produces: RateMap,
    #[serde(default)]
    pub consumes: RateMap,
    /// Unlocked in a fresh game.
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlock_requirement: Option<UnlockRequirement>,
    /// Alternative production route, scored by prestige diversity.
    #[serde(default)]
    pub is_alternative: bool,
    /// Workshop-style bonus added to the state global multiplier per unit.
    #[serde(default)]
    pub global_bonus: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeCategory {
    Building,
    Global,
    Research,
    Electricity,
}

/// Effect of a purchased upgrade. Any combination of parts may be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpgradeEffect {
    #[serde(default)]
    pub building_multiplier: BTreeMap<BuildingKind, f64>,
    #[serde(default)]
    pub global_multiplier: Option<f64>,
    #[serde(default)]
    pub research_multiplier: Option<f64>,
    /// Extra electricity draw per unit of rate; summed across upgrades.
    #[serde(default)]
    pub electricity_cost: BTreeMap<BuildingKind, f64>,
}

/// Conjunction of requirements; an empty condition is always met.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnlockCondition {
    #[serde(default)]
    pub upgrades: Vec<UpgradeId>,
    #[serde(default)]
    pub buildings: BTreeMap<BuildingKind, u32>,
    #[serde(default)]
    pub total_resets: u32,
    #[serde(default)]
    pub resources: BTreeMap<ResourceType, f64>,
}

/// Definition of one purchasable upgrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpgradeDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: CostMap,
    pub effect: UpgradeEffect,
    pub category: UpgradeCategory,
    /// Building this upgrade is listed under, if any.
    #[serde(default)]
    pub building: Option<BuildingKind>,
    #[serde(default)]
    pub unlock_condition: UnlockCondition,
}

/// Immutable building and upgrade tables. Thread-safe to share.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    buildings: BTreeMap<BuildingKind, BuildingDef>,
    upgrades: BTreeMap<UpgradeId, UpgradeDef>,
}

impl Catalog {
    /// The shipped building and upgrade tables.
    pub fn standard() -> Catalog {
        Catalog {
            buildings: crate::standard::buildings(),
            upgrades: crate::standard::upgrades(),
        }
    }

    /// Builder seeded with the standard tables.
    pub fn standard_builder() -> CatalogBuilder {
        CatalogBuilder {
            buildings: crate::standard::buildings(),
            upgrades: crate::standard::upgrades(),
        }
    }

    /// Load a complete catalog from YAML and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Catalog, LoadError> {
        let catalog: Catalog = serde_yaml::from_str(text)?;
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Definition of a building. Present for every kind in a validated catalog.
    pub fn building(&self, kind: BuildingKind) -> Option<&BuildingDef> {
        self.buildings.get(&kind)
    }

    pub fn buildings(&self) -> impl Iterator<Item = (BuildingKind, &BuildingDef)> {
        self.buildings.iter().map(|(k, d)| (*k, d))
    }

    pub fn upgrade(&self, id: &UpgradeId) -> Option<&UpgradeDef> {
        self.upgrades.get(id)
    }

    pub fn upgrades(&self) -> impl Iterator<Item = (&UpgradeId, &UpgradeDef)> {
        self.upgrades.iter()
    }

    pub fn upgrades_in(
        &self,
        category: UpgradeCategory,
    ) -> impl Iterator<Item = (&UpgradeId, &UpgradeDef)> {
        self.upgrades
            .iter()
            .filter(move |(_, u)| u.category == category)
    }

    /// Upgrades listed under a building.
    pub fn upgrades_for_building(
        &self,
        kind: BuildingKind,
    ) -> impl Iterator<Item = (&UpgradeId, &UpgradeDef)> {
        self.upgrades
            .iter()
            .filter(move |(_, u)| u.building == Some(kind))
    }

    pub fn buildings_in_tier(&self, tier: u8) -> Vec<BuildingKind> {
        self.buildings
            .iter()
            .filter(|(_, d)| d.tier == tier)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Buildings sorted by tier, ties broken by declaration order.
    pub fn unlock_order(&self) -> Vec<BuildingKind> {
        let mut order: Vec<_> = self.buildings.iter().map(|(k, d)| (d.tier, *k)).collect();
        order.sort();
        order.into_iter().map(|(_, k)| k).collect()
    }
}

/// Builder for a [`Catalog`]: register or mutate entries, then `build()`.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    buildings: BTreeMap<BuildingKind, BuildingDef>,
    upgrades: BTreeMap<UpgradeId, UpgradeDef>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_building(&mut self, kind: BuildingKind, def: BuildingDef) -> &mut Self {
        self.buildings.insert(kind, def);
        self
    }

    pub fn insert_upgrade(&mut self, id: UpgradeId, def: UpgradeDef) -> &mut Self {
        self.upgrades.insert(id, def);
        self
    }

    /// Mutate an already registered building. Unknown kinds are ignored.
    pub fn mutate_building<F>(&mut self, kind: BuildingKind, f: F) -> &mut Self
    where
        F: FnOnce(&mut BuildingDef),
    {
        if let Some(def) = self.buildings.get_mut(&kind) {
            f(def);
        }
        self
    }

    pub fn mutate_upgrade<F>(&mut self, id: &UpgradeId, f: F) -> &mut Self
    where
        F: FnOnce(&mut UpgradeDef),
    {
        if let Some(def) = self.upgrades.get_mut(id) {
            f(def);
        }
        self
    }

    pub fn remove_upgrade(&mut self, id: &UpgradeId) -> &mut Self {
        self.upgrades.remove(id);
        self
    }

    /// Finalize and validate.
    pub fn build(&self) -> Result<Catalog, ValidationError> {
        let catalog = Catalog {
            buildings: self.buildings.clone(),
            upgrades: self.upgrades.clone(),
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

fn check_map<K: std::fmt::Display>(
    owner: &str,
    field: &str,
    map: &BTreeMap<K, f64>,
) -> Result<(), ValidationError> {
    for (k, v) in map {
        check_amount(|| format!("{owner}.{field}.{k}"), *v)?;
    }
    Ok(())
}

fn check_multiplier(context: impl Fn() -> String, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(ValidationError::NonFinite(context()));
    }
    if v <= 0.0 {
        return Err(ValidationError::NonPositiveMultiplier(context()));
    }
    Ok(())
}

/// Validate a building definition.
pub fn validate_building(kind: BuildingKind, def: &BuildingDef) -> Result<(), ValidationError> {
    if !def.base_production.is_finite() {
        return Err(ValidationError::NonFinite(format!("{kind}.base_production")));
    }
    if def.base_production <= 0.0 {
        return Err(ValidationError::NonPositiveProduction(kind));
    }
    let owner = kind.key();
    check_map(owner, "base_cost", &def.base_cost)?;
    check_map(owner, "upgrade_cost", &def.upgrade_cost)?;
    check_map(owner, "produces", &def.produces)?;
    check_map(owner, "consumes", &def.consumes)?;
    if let Some(req) = def.unlock_requirement {
        if req.building == kind || req.count == 0 {
            return Err(ValidationError::InvalidUnlockRequirement(kind));
        }
    }
    if let Some(bonus) = def.global_bonus {
        check_amount(|| format!("{owner}.global_bonus"), bonus)?;
    }
    Ok(())
}

/// Validate an upgrade definition against the rest of the catalog.
pub fn validate_upgrade(
    id: &UpgradeId,
    def: &UpgradeDef,
    catalog: &Catalog,
) -> Result<(), ValidationError> {
    let owner = id.as_str();
    check_map(owner, "cost", &def.cost)?;
    for (kind, m) in &def.effect.building_multiplier {
        check_multiplier(|| format!("{owner}.building_multiplier.{kind}"), *m)?;
    }
    if let Some(m) = def.effect.global_multiplier {
        check_multiplier(|| format!("{owner}.global_multiplier"), m)?;
    }
    if let Some(m) = def.effect.research_multiplier {
        check_multiplier(|| format!("{owner}.research_multiplier"), m)?;
    }
    check_map(owner, "electricity_cost", &def.effect.electricity_cost)?;
    check_map(owner, "unlock_condition.resources", &def.unlock_condition.resources)?;
    for prereq in &def.unlock_condition.upgrades {
        if catalog.upgrade(prereq).is_none() {
            return Err(ValidationError::UnknownPrerequisite {
                upgrade: id.clone(),
                missing: prereq.clone(),
            });
        }
    }
    Ok(())
}

/// Validate the whole catalog, including exhaustiveness over building kinds.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    for kind in BuildingKind::ALL {
        let def = catalog
            .building(kind)
            .ok_or(ValidationError::MissingBuilding(kind))?;
        validate_building(kind, def)?;
    }
    for (id, def) in catalog.upgrades() {
        validate_upgrade(id, def, catalog)?;
    }
    Ok(())
}
