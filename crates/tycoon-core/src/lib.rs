#![deny(warnings)]

//! Core domain models and invariants for Factory Tycoon.
//!
//! This crate defines the closed identifier sets (resources, buildings), the
//! static recipe catalog, tuning configuration and the mutable `GameState`
//! aggregate. Everything here is plain serializable data with validation
//! helpers; the rules that operate on it live in `tycoon-econ`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod state;
mod standard;

pub use catalog::{
    BuildingDef, Catalog, CatalogBuilder, CostMap, RateMap, UnlockCondition, UnlockRequirement,
    UpgradeCategory, UpgradeDef, UpgradeEffect,
};
pub use config::{GameConfig, GAME_VERSION};
pub use state::{BuildingState, GameState, PrestigeState, ResourceLedger, Settings, Stats};

/// Broad grouping of resources, used for ordering and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceCategory {
    Raw,
    Processed,
    Component,
    Advanced,
    Power,
    Research,
}

/// The four prestige currencies earned by a research reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrestigeCurrency {
    Research,
    Production,
    Innovation,
    Automation,
}

/// Every resource the factory can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    // Raw materials
    IronOre,
    CopperOre,
    Coal,
    Stone,
    Oil,
    Water,
    // Processed materials
    IronPlates,
    CopperPlates,
    Steel,
    Plastic,
    // Intermediate components
    Gears,
    CopperCables,
    Circuits,
    Engines,
    // Advanced products
    Assemblers,
    Computers,
    Robots,
    // Power
    Electricity,
    // Research currencies
    ResearchPoints,
    ProductionTokens,
    InnovationPoints,
    AutomationCredits,
}

impl ResourceType {
    /// All resources in declaration order.
    pub const ALL: [ResourceType; 22] = [
        ResourceType::IronOre,
        ResourceType::CopperOre,
        ResourceType::Coal,
        ResourceType::Stone,
        ResourceType::Oil,
        ResourceType::Water,
        ResourceType::IronPlates,
        ResourceType::CopperPlates,
        ResourceType::Steel,
        ResourceType::Plastic,
        ResourceType::Gears,
        ResourceType::CopperCables,
        ResourceType::Circuits,
        ResourceType::Engines,
        ResourceType::Assemblers,
        ResourceType::Computers,
        ResourceType::Robots,
        ResourceType::Electricity,
        ResourceType::ResearchPoints,
        ResourceType::ProductionTokens,
        ResourceType::InnovationPoints,
        ResourceType::AutomationCredits,
    ];

    /// Stable camelCase key used in save files and data tables.
    pub fn key(self) -> &'static str {
        match self {
            ResourceType::IronOre => "ironOre",
            ResourceType::CopperOre => "copperOre",
            ResourceType::Coal => "coal",
            ResourceType::Stone => "stone",
            ResourceType::Oil => "oil",
            ResourceType::Water => "water",
            ResourceType::IronPlates => "ironPlates",
            ResourceType::CopperPlates => "copperPlates",
            ResourceType::Steel => "steel",
            ResourceType::Plastic => "plastic",
            ResourceType::Gears => "gears",
            ResourceType::CopperCables => "copperCables",
            ResourceType::Circuits => "circuits",
            ResourceType::Engines => "engines",
            ResourceType::Assemblers => "assemblers",
            ResourceType::Computers => "computers",
            ResourceType::Robots => "robots",
            ResourceType::Electricity => "electricity",
            ResourceType::ResearchPoints => "researchPoints",
            ResourceType::ProductionTokens => "productionTokens",
            ResourceType::InnovationPoints => "innovationPoints",
            ResourceType::AutomationCredits => "automationCredits",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::IronOre => "Iron Ore",
            ResourceType::CopperOre => "Copper Ore",
            ResourceType::Coal => "Coal",
            ResourceType::Stone => "Stone",
            ResourceType::Oil => "Crude Oil",
            ResourceType::Water => "Water",
            ResourceType::IronPlates => "Iron Plates",
            ResourceType::CopperPlates => "Copper Plates",
            ResourceType::Steel => "Steel",
            ResourceType::Plastic => "Plastic",
            ResourceType::Gears => "Iron Gears",
            ResourceType::CopperCables => "Copper Cables",
            ResourceType::Circuits => "Electronic Circuits",
            ResourceType::Engines => "Engines",
            ResourceType::Assemblers => "Assembling Machines",
            ResourceType::Computers => "Processing Units",
            ResourceType::Robots => "Construction Robots",
            ResourceType::Electricity => "Electricity",
            ResourceType::ResearchPoints => "Research Points",
            ResourceType::ProductionTokens => "Production Tokens",
            ResourceType::InnovationPoints => "Innovation Points",
            ResourceType::AutomationCredits => "Automation Credits",
        }
    }

    pub fn category(self) -> ResourceCategory {
        use ResourceType::*;
        match self {
            IronOre | CopperOre | Coal | Stone | Oil | Water => ResourceCategory::Raw,
            IronPlates | CopperPlates | Steel | Plastic => ResourceCategory::Processed,
            Gears | CopperCables | Circuits | Engines => ResourceCategory::Component,
            Assemblers | Computers | Robots => ResourceCategory::Advanced,
            Electricity => ResourceCategory::Power,
            ResearchPoints | ProductionTokens | InnovationPoints | AutomationCredits => {
                ResourceCategory::Research
            }
        }
    }

    /// Whether the resource is visible/spendable in a fresh game.
    pub fn unlocked_by_default(self) -> bool {
        matches!(
            self,
            ResourceType::IronOre | ResourceType::CopperOre | ResourceType::Coal | ResourceType::Stone
        )
    }

    /// Research-category resources double as prestige currencies. Costs naming
    /// them are paid from the prestige accumulators, not from the ledger.
    pub fn prestige_currency(self) -> Option<PrestigeCurrency> {
        match self {
            ResourceType::ResearchPoints => Some(PrestigeCurrency::Research),
            ResourceType::ProductionTokens => Some(PrestigeCurrency::Production),
            ResourceType::InnovationPoints => Some(PrestigeCurrency::Innovation),
            ResourceType::AutomationCredits => Some(PrestigeCurrency::Automation),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ResourceType {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .iter()
            .copied()
            .find(|r| r.key() == s)
            .ok_or_else(|| ParseKeyError::Resource(s.to_string()))
    }
}

/// Every building type in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildingKind {
    IronMine,
    CopperMine,
    CoalMine,
    StoneQuarry,
    StoneFurnace,
    CopperFurnace,
    ManualGearPress,
    WaterPump,
    SteamEngine,
    CoalGasifier,
    GearAssembler,
    CableAssembler,
    ScrapRecycler,
    CopperRecycler,
    ElectricIronDrill,
    ElectricCopperDrill,
    ElectricCoalDrill,
    ElectricStoneDrill,
    CircuitAssembler,
    SteelFurnace,
    ResearchLab,
    EngineAssembler,
    SolarPanel,
    WindTurbine,
    Pumpjack,
    AssemblingMachine,
    ChemicalPlant,
    ProcessingUnit,
    RobotFactory,
    AdvancedLab,
}

impl BuildingKind {
    /// All buildings in declaration order.
    pub const ALL: [BuildingKind; 30] = [
        BuildingKind::IronMine,
        BuildingKind::CopperMine,
        BuildingKind::CoalMine,
        BuildingKind::StoneQuarry,
        BuildingKind::StoneFurnace,
        BuildingKind::CopperFurnace,
        BuildingKind::ManualGearPress,
        BuildingKind::WaterPump,
        BuildingKind::SteamEngine,
        BuildingKind::CoalGasifier,
        BuildingKind::GearAssembler,
        BuildingKind::CableAssembler,
        BuildingKind::ScrapRecycler,
        BuildingKind::CopperRecycler,
        BuildingKind::ElectricIronDrill,
        BuildingKind::ElectricCopperDrill,
        BuildingKind::ElectricCoalDrill,
        BuildingKind::ElectricStoneDrill,
        BuildingKind::CircuitAssembler,
        BuildingKind::SteelFurnace,
        BuildingKind::ResearchLab,
        BuildingKind::EngineAssembler,
        BuildingKind::SolarPanel,
        BuildingKind::WindTurbine,
        BuildingKind::Pumpjack,
        BuildingKind::AssemblingMachine,
        BuildingKind::ChemicalPlant,
        BuildingKind::ProcessingUnit,
        BuildingKind::RobotFactory,
        BuildingKind::AdvancedLab,
    ];

    /// Stable camelCase key used in save files and data tables.
    pub fn key(self) -> &'static str {
        match self {
            BuildingKind::IronMine => "ironMine",
            BuildingKind::CopperMine => "copperMine",
            BuildingKind::CoalMine => "coalMine",
            BuildingKind::StoneQuarry => "stoneQuarry",
            BuildingKind::StoneFurnace => "stoneFurnace",
            BuildingKind::CopperFurnace => "copperFurnace",
            BuildingKind::ManualGearPress => "manualGearPress",
            BuildingKind::WaterPump => "waterPump",
            BuildingKind::SteamEngine => "steamEngine",
            BuildingKind::CoalGasifier => "coalGasifier",
            BuildingKind::GearAssembler => "gearAssembler",
            BuildingKind::CableAssembler => "cableAssembler",
            BuildingKind::ScrapRecycler => "scrapRecycler",
            BuildingKind::CopperRecycler => "copperRecycler",
            BuildingKind::ElectricIronDrill => "electricIronDrill",
            BuildingKind::ElectricCopperDrill => "electricCopperDrill",
            BuildingKind::ElectricCoalDrill => "electricCoalDrill",
            BuildingKind::ElectricStoneDrill => "electricStoneDrill",
            BuildingKind::CircuitAssembler => "circuitAssembler",
            BuildingKind::SteelFurnace => "steelFurnace",
            BuildingKind::ResearchLab => "researchLab",
            BuildingKind::EngineAssembler => "engineAssembler",
            BuildingKind::SolarPanel => "solarPanel",
            BuildingKind::WindTurbine => "windTurbine",
            BuildingKind::Pumpjack => "pumpjack",
            BuildingKind::AssemblingMachine => "assemblingMachine",
            BuildingKind::ChemicalPlant => "chemicalPlant",
            BuildingKind::ProcessingUnit => "processingUnit",
            BuildingKind::RobotFactory => "robotFactory",
            BuildingKind::AdvancedLab => "advancedLab",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingKind {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingKind::ALL
            .iter()
            .copied()
            .find(|b| b.key() == s)
            .ok_or_else(|| ParseKeyError::Building(s.to_string()))
    }
}

/// Identifier of an upgrade in the catalog, e.g. "better_pickaxes".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeId(pub String);

impl UpgradeId {
    pub fn new(id: impl Into<String>) -> Self {
        UpgradeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unknown textual key for a resource or building.
#[derive(Debug, Error, PartialEq)]
pub enum ParseKeyError {
    #[error("unknown resource: {0}")]
    Resource(String),
    #[error("unknown building: {0}")]
    Building(String),
}

/// Validation errors for catalog and configuration invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Every building kind must have a definition.
    #[error("no definition for building {0}")]
    MissingBuilding(BuildingKind),
    /// Numeric field must be finite.
    #[error("{0}: non-finite numeric value")]
    NonFinite(String),
    /// Ratios, costs and surcharges must be non-negative.
    #[error("{0}: negative value")]
    Negative(String),
    /// Base production must be strictly positive.
    #[error("{0}: base production must be > 0")]
    NonPositiveProduction(BuildingKind),
    /// Unlock requirement must name another building with a positive count.
    #[error("{0}: invalid unlock requirement")]
    InvalidUnlockRequirement(BuildingKind),
    /// Prerequisite upgrade missing from the catalog.
    #[error("upgrade {upgrade}: prerequisite not found: {missing}")]
    UnknownPrerequisite { upgrade: UpgradeId, missing: UpgradeId },
    /// Multipliers must be strictly positive.
    #[error("{0}: multiplier must be > 0")]
    NonPositiveMultiplier(String),
    /// Configuration value out of range.
    #[error("config: {0}")]
    InvalidConfig(String),
}

/// Errors from loading YAML data (catalog or configuration).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

pub(crate) fn check_amount(context: impl Fn() -> String, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(ValidationError::NonFinite(context()));
    }
    if v < 0.0 {
        return Err(ValidationError::Negative(context()));
    }
    Ok(())
}
