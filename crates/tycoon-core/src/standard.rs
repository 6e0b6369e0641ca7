//! The shipped building and upgrade tables.

use crate::catalog::{
    BuildingDef, CostMap, UnlockCondition, UnlockRequirement, UpgradeCategory, UpgradeDef,
    UpgradeEffect,
};
use crate::{BuildingKind, ResourceType, UpgradeId};
use std::collections::BTreeMap;

use BuildingKind as B;
use ResourceType as R;

fn res(entries: &[(ResourceType, f64)]) -> CostMap {
    entries.iter().copied().collect()
}

fn per_building(entries: &[(BuildingKind, f64)]) -> BTreeMap<BuildingKind, f64> {
    entries.iter().copied().collect()
}

fn requires(building: BuildingKind, count: u32) -> Option<UnlockRequirement> {
    Some(UnlockRequirement { building, count })
}

/// Shorthand for a non-alternative building definition.
#[allow(clippy::too_many_arguments)]
fn building(
    name: &str,
    description: &str,
    tier: u8,
    base_production: f64,
    base_cost: &[(ResourceType, f64)],
    upgrade_cost: &[(ResourceType, f64)],
    produces: &[(ResourceType, f64)],
    consumes: &[(ResourceType, f64)],
    unlock_requirement: Option<UnlockRequirement>,
) -> BuildingDef {
    BuildingDef {
        name: name.to_string(),
        description: description.to_string(),
        tier,
        base_production,
        base_cost: res(base_cost),
        upgrade_cost: res(upgrade_cost),
        produces: res(produces),
        consumes: res(consumes),
        unlocked: unlock_requirement.is_none(),
        unlock_requirement,
        is_alternative: false,
        global_bonus: None,
    }
}

fn alternative(def: BuildingDef) -> BuildingDef {
    BuildingDef {
        is_alternative: true,
        ..def
    }
}

pub(crate) fn buildings() -> BTreeMap<BuildingKind, BuildingDef> {
    let mut t = BTreeMap::new();

    // Mining & extraction
    t.insert(
        B::IronMine,
        building(
            "Iron Mine",
            "Your first step into industrial automation",
            1,
            2.0,
            &[(R::Stone, 5.0)],
            &[(R::IronPlates, 10.0), (R::Stone, 10.0)],
            &[(R::IronOre, 1.0)],
            &[],
            None,
        ),
    );
    t.insert(
        B::CopperMine,
        building(
            "Copper Mine",
            "Manual copper ore extraction site",
            1,
            2.0,
            &[(R::Stone, 5.0)],
            &[(R::IronPlates, 10.0), (R::Stone, 10.0)],
            &[(R::CopperOre, 1.0)],
            &[],
            None,
        ),
    );
    t.insert(
        B::CoalMine,
        building(
            "Coal Mine",
            "Manual coal extraction site",
            1,
            2.0,
            &[(R::Stone, 5.0)],
            &[(R::IronPlates, 10.0), (R::Stone, 10.0)],
            &[(R::Coal, 1.0)],
            &[],
            None,
        ),
    );
    t.insert(
        B::StoneQuarry,
        building(
            "Stone Quarry",
            "Manual stone extraction site",
            1,
            2.0,
            &[(R::IronOre, 10.0)],
            &[(R::IronPlates, 15.0)],
            &[(R::Stone, 1.0)],
            &[],
            None,
        ),
    );
    for (kind, name, ore, upgrade) in [
        (
            B::ElectricIronDrill,
            "Electric Iron Drill",
            R::IronOre,
            [(R::IronPlates, 50.0), (R::Circuits, 3.0)],
        ),
        (
            B::ElectricCopperDrill,
            "Electric Copper Drill",
            R::CopperOre,
            [(R::CopperPlates, 40.0), (R::Circuits, 3.0)],
        ),
        (
            B::ElectricCoalDrill,
            "Electric Coal Drill",
            R::Coal,
            [(R::Steel, 20.0), (R::Circuits, 3.0)],
        ),
        (
            B::ElectricStoneDrill,
            "Electric Stone Drill",
            R::Stone,
            [(R::Steel, 15.0), (R::Circuits, 3.0)],
        ),
    ] {
        t.insert(
            kind,
            building(
                name,
                "Automated drilling powered by electricity",
                7,
                5.0,
                &[(R::IronPlates, 30.0), (R::Gears, 8.0)],
                &upgrade,
                &[(ore, 1.0)],
                &[(R::Electricity, 2.0)],
                requires(B::GearAssembler, 1),
            ),
        );
    }
    t.insert(
        B::Pumpjack,
        building(
            "Pumpjack",
            "Extracts crude oil from underground deposits",
            10,
            1.0,
            &[(R::Steel, 20.0), (R::Gears, 15.0), (R::Circuits, 10.0)],
            &[(R::Steel, 50.0), (R::Engines, 5.0)],
            &[(R::Oil, 1.0)],
            &[(R::Electricity, 4.0)],
            requires(B::EngineAssembler, 1),
        ),
    );
    t.insert(
        B::WaterPump,
        building(
            "Manual Water Pump",
            "Hand-operated pump that extracts water",
            4,
            5.0,
            &[(R::IronPlates, 10.0), (R::Gears, 5.0)],
            &[(R::IronPlates, 20.0), (R::Gears, 10.0)],
            &[(R::Water, 1.0)],
            &[],
            requires(B::ManualGearPress, 1),
        ),
    );

    // Smelting & processing
    t.insert(
        B::StoneFurnace,
        building(
            "Stone Furnace",
            "Transforms raw ore into plates",
            2,
            2.0,
            &[(R::IronOre, 20.0)],
            &[(R::IronPlates, 15.0)],
            &[(R::IronPlates, 1.0)],
            &[(R::IronOre, 1.0), (R::Coal, 0.25)],
            requires(B::IronMine, 2),
        ),
    );
    t.insert(
        B::CopperFurnace,
        building(
            "Copper Furnace",
            "Smelts copper ore into copper plates",
            2,
            2.0,
            &[(R::IronOre, 15.0), (R::Stone, 10.0)],
            &[(R::IronPlates, 10.0), (R::CopperPlates, 5.0)],
            &[(R::CopperPlates, 1.0)],
            &[(R::CopperOre, 1.0), (R::Coal, 0.25)],
            requires(B::CopperMine, 1),
        ),
    );
    t.insert(
        B::SteelFurnace,
        building(
            "Steel Furnace",
            "Produces steel from iron plates",
            8,
            1.0,
            &[(R::IronPlates, 30.0), (R::Stone, 20.0)],
            &[(R::IronPlates, 50.0), (R::Coal, 20.0)],
            &[(R::Steel, 1.0)],
            &[(R::IronPlates, 5.0), (R::Coal, 1.0)],
            requires(B::CircuitAssembler, 1),
        ),
    );
    t.insert(
        B::ChemicalPlant,
        building(
            "Chemical Plant",
            "Processes oil into plastic",
            11,
            1.0,
            &[(R::Steel, 15.0), (R::Gears, 10.0), (R::Circuits, 5.0)],
            &[(R::Steel, 30.0), (R::Engines, 5.0)],
            &[(R::Plastic, 1.0)],
            &[(R::Oil, 3.0), (R::Water, 1.0), (R::Electricity, 3.0)],
            requires(B::Pumpjack, 1),
        ),
    );

    // Power generation
    t.insert(
        B::SteamEngine,
        building(
            "Steam Engine",
            "Burns coal to generate electricity via steam",
            5,
            10.0,
            &[(R::IronPlates, 30.0), (R::Gears, 15.0), (R::Stone, 10.0)],
            &[(R::Steel, 20.0), (R::Gears, 30.0)],
            &[(R::Electricity, 1.0)],
            &[(R::Coal, 1.0), (R::Water, 2.0)],
            requires(B::WaterPump, 1),
        ),
    );
    t.insert(
        B::SolarPanel,
        building(
            "Solar Panel",
            "Generates clean electricity from sunlight",
            9,
            2.0,
            &[(R::Steel, 15.0), (R::Circuits, 10.0), (R::CopperPlates, 20.0)],
            &[(R::Circuits, 20.0), (R::Steel, 30.0)],
            &[(R::Electricity, 1.0)],
            &[],
            requires(B::ResearchLab, 1),
        ),
    );

    // Manufacturing
    t.insert(
        B::ManualGearPress,
        building(
            "Manual Gear Press",
            "Hand-cranked press that makes gears from iron plates",
            3,
            1.0,
            &[(R::IronPlates, 15.0), (R::Stone, 5.0)],
            &[(R::IronPlates, 20.0), (R::Gears, 5.0)],
            &[(R::Gears, 1.0)],
            &[(R::IronPlates, 2.0)],
            requires(B::StoneFurnace, 1),
        ),
    );
    t.insert(
        B::GearAssembler,
        building(
            "Gear Assembly Machine",
            "Automated gear production powered by electricity",
            6,
            3.0,
            &[(R::IronPlates, 25.0), (R::Gears, 10.0)],
            &[(R::Gears, 20.0), (R::Circuits, 5.0)],
            &[(R::Gears, 1.0)],
            &[(R::IronPlates, 2.0), (R::Electricity, 1.0)],
            requires(B::SteamEngine, 1),
        ),
    );
    t.insert(
        B::CableAssembler,
        building(
            "Cable Assembly Machine",
            "Produces copper cables from copper plates",
            6,
            2.0,
            &[(R::IronPlates, 20.0), (R::Gears, 8.0)],
            &[(R::Gears, 15.0), (R::CopperPlates, 30.0)],
            &[(R::CopperCables, 2.0)],
            &[(R::CopperPlates, 1.0), (R::Electricity, 1.0)],
            requires(B::GearAssembler, 1),
        ),
    );
    t.insert(
        B::CircuitAssembler,
        building(
            "Circuit Assembly Machine",
            "Manufactures electronic circuits from plates and cables",
            7,
            1.0,
            &[(R::IronPlates, 40.0), (R::Gears, 15.0), (R::CopperCables, 20.0)],
            &[(R::Circuits, 10.0), (R::Gears, 25.0)],
            &[(R::Circuits, 1.0)],
            &[(R::IronPlates, 1.0), (R::CopperCables, 3.0), (R::Electricity, 2.0)],
            requires(B::CableAssembler, 1),
        ),
    );
    t.insert(
        B::EngineAssembler,
        building(
            "Engine Assembly Machine",
            "Builds engines from steel and gears",
            9,
            0.5,
            &[(R::Steel, 30.0), (R::Gears, 20.0), (R::Circuits, 10.0)],
            &[(R::Steel, 50.0), (R::Gears, 30.0)],
            &[(R::Engines, 1.0)],
            &[(R::Steel, 1.0), (R::Gears, 1.0), (R::Electricity, 3.0)],
            requires(B::SteelFurnace, 1),
        ),
    );
    t.insert(
        B::AssemblingMachine,
        building(
            "Assembling Machine Mk1",
            "Automated assembler for complex products",
            10,
            1.0,
            &[(R::IronPlates, 50.0), (R::Gears, 30.0), (R::Circuits, 15.0)],
            &[(R::Assemblers, 3.0), (R::Circuits, 25.0)],
            &[(R::Assemblers, 1.0)],
            &[
                (R::IronPlates, 10.0),
                (R::Gears, 5.0),
                (R::Circuits, 3.0),
                (R::Electricity, 4.0),
            ],
            requires(B::EngineAssembler, 2),
        ),
    );

    // Alternative production routes
    t.insert(
        B::ScrapRecycler,
        alternative(building(
            "Scrap Recycler",
            "Converts excess gears back into plates",
            6,
            2.0,
            &[(R::IronPlates, 30.0), (R::Gears, 15.0), (R::Circuits, 5.0)],
            &[(R::Circuits, 10.0), (R::Steel, 20.0)],
            &[(R::IronPlates, 1.0)],
            &[(R::Gears, 2.0), (R::Electricity, 2.0)],
            requires(B::CircuitAssembler, 1),
        )),
    );
    t.insert(
        B::CopperRecycler,
        alternative(building(
            "Copper Recycler",
            "Recycles copper cables back into plates",
            6,
            2.0,
            &[(R::CopperPlates, 25.0), (R::Gears, 10.0)],
            &[(R::Circuits, 8.0), (R::CopperPlates, 30.0)],
            &[(R::CopperPlates, 1.0)],
            &[(R::CopperCables, 3.0), (R::Electricity, 1.0)],
            requires(B::CableAssembler, 1),
        )),
    );
    t.insert(
        B::CoalGasifier,
        alternative(building(
            "Coal Gasifier",
            "Converts coal directly to electricity",
            5,
            8.0,
            &[(R::Steel, 20.0), (R::Gears, 15.0)],
            &[(R::Steel, 40.0), (R::Circuits, 10.0)],
            &[(R::Electricity, 1.0)],
            &[(R::Coal, 2.0)],
            requires(B::SteamEngine, 1),
        )),
    );
    t.insert(
        B::WindTurbine,
        alternative(building(
            "Wind Turbine",
            "Fuel-free electricity",
            9,
            3.0,
            &[(R::Steel, 40.0), (R::Gears, 25.0), (R::Circuits, 8.0)],
            &[(R::Steel, 60.0), (R::Circuits, 15.0)],
            &[(R::Electricity, 1.0)],
            &[],
            requires(B::SolarPanel, 1),
        )),
    );
    t.insert(
        B::ProcessingUnit,
        building(
            "Processing Unit Factory",
            "Manufactures advanced processing units",
            11,
            0.5,
            &[(R::Circuits, 50.0), (R::Plastic, 30.0), (R::Engines, 10.0)],
            &[(R::Computers, 5.0), (R::Circuits, 100.0)],
            &[(R::Computers, 1.0)],
            &[(R::Circuits, 20.0), (R::Plastic, 2.0), (R::Electricity, 5.0)],
            requires(B::ChemicalPlant, 2),
        ),
    );
    t.insert(
        B::RobotFactory,
        building(
            "Robot Assembly Facility",
            "Builds construction robots",
            12,
            0.3,
            &[(R::Engines, 15.0), (R::Computers, 10.0), (R::Circuits, 30.0)],
            &[(R::Robots, 3.0), (R::Computers, 20.0)],
            &[(R::Robots, 1.0)],
            &[
                (R::Engines, 1.0),
                (R::Computers, 1.0),
                (R::Circuits, 5.0),
                (R::Electricity, 8.0),
            ],
            requires(B::ProcessingUnit, 1),
        ),
    );

    // Research
    t.insert(
        B::ResearchLab,
        building(
            "Research Laboratory",
            "Conducts research to unlock new technologies",
            8,
            1.0,
            &[(R::IronPlates, 50.0), (R::Circuits, 30.0), (R::Gears, 25.0)],
            &[(R::Circuits, 50.0), (R::Steel, 20.0)],
            &[(R::ResearchPoints, 1.0)],
            &[(R::Circuits, 2.0), (R::Electricity, 6.0)],
            requires(B::CircuitAssembler, 2),
        ),
    );
    t.insert(
        B::AdvancedLab,
        building(
            "Advanced Research Lab",
            "High-tech research facility",
            12,
            3.0,
            &[(R::Steel, 100.0), (R::Computers, 20.0), (R::Engines, 15.0)],
            &[(R::Robots, 5.0), (R::Computers, 50.0)],
            &[(R::ResearchPoints, 1.0)],
            &[(R::Computers, 1.0), (R::Circuits, 5.0), (R::Electricity, 15.0)],
            requires(B::ProcessingUnit, 2),
        ),
    );

    t
}

fn upgrade(
    name: &str,
    description: &str,
    category: UpgradeCategory,
    cost: &[(ResourceType, f64)],
    effect: UpgradeEffect,
    unlock_condition: UnlockCondition,
) -> UpgradeDef {
    UpgradeDef {
        name: name.to_string(),
        description: description.to_string(),
        cost: res(cost),
        effect,
        category,
        building: None,
        unlock_condition,
    }
}

fn multiplies(entries: &[(BuildingKind, f64)]) -> UpgradeEffect {
    UpgradeEffect {
        building_multiplier: per_building(entries),
        ..UpgradeEffect::default()
    }
}

fn global(m: f64) -> UpgradeEffect {
    UpgradeEffect {
        global_multiplier: Some(m),
        ..UpgradeEffect::default()
    }
}

fn research(m: f64) -> UpgradeEffect {
    UpgradeEffect {
        research_multiplier: Some(m),
        ..UpgradeEffect::default()
    }
}

fn electric(multipliers: &[(BuildingKind, f64)], draw: &[(BuildingKind, f64)]) -> UpgradeEffect {
    UpgradeEffect {
        building_multiplier: per_building(multipliers),
        electricity_cost: per_building(draw),
        ..UpgradeEffect::default()
    }
}

fn owns(entries: &[(BuildingKind, u32)]) -> UnlockCondition {
    UnlockCondition {
        buildings: entries.iter().copied().collect(),
        ..UnlockCondition::default()
    }
}

fn resets(total_resets: u32) -> UnlockCondition {
    UnlockCondition {
        total_resets,
        ..UnlockCondition::default()
    }
}

fn listed_under(def: UpgradeDef, building: BuildingKind) -> UpgradeDef {
    UpgradeDef {
        building: Some(building),
        ..def
    }
}

pub(crate) fn upgrades() -> BTreeMap<UpgradeId, UpgradeDef> {
    use UpgradeCategory::{Building, Electricity, Global, Research};

    let mut t = BTreeMap::new();
    let mut add = |id: &str, def: UpgradeDef| {
        t.insert(UpgradeId::new(id), def);
    };

    // Mining
    add(
        "better_pickaxes",
        listed_under(
            upgrade(
                "Better Pickaxes",
                "Iron mines work 50% faster",
                Building,
                &[(R::IronPlates, 100.0), (R::Stone, 50.0)],
                multiplies(&[(B::IronMine, 1.5)]),
                owns(&[(B::IronMine, 3)]),
            ),
            B::IronMine,
        ),
    );
    add(
        "reinforced_mining",
        upgrade(
            "Reinforced Mining Equipment",
            "All mining operations work 25% faster",
            Building,
            &[(R::IronPlates, 300.0), (R::Gears, 50.0)],
            multiplies(&[
                (B::IronMine, 1.25),
                (B::CopperMine, 1.25),
                (B::CoalMine, 1.25),
                (B::StoneQuarry, 1.25),
            ]),
            owns(&[(B::IronMine, 5), (B::CopperMine, 2)]),
        ),
    );
    add(
        "electric_mining_boost",
        upgrade(
            "Electric Mining Optimization",
            "Electric drills work 75% faster",
            Building,
            &[(R::Steel, 100.0), (R::Circuits, 25.0), (R::Electricity, 200.0)],
            multiplies(&[
                (B::ElectricIronDrill, 1.75),
                (B::ElectricCopperDrill, 1.75),
                (B::ElectricCoalDrill, 1.75),
                (B::ElectricStoneDrill, 1.75),
            ]),
            owns(&[(B::ElectricIronDrill, 2)]),
        ),
    );

    // Smelting
    add(
        "improved_furnaces",
        upgrade(
            "Improved Furnaces",
            "Stone and copper furnaces work 50% faster",
            Building,
            &[(R::IronPlates, 200.0), (R::Coal, 100.0)],
            multiplies(&[(B::StoneFurnace, 1.5), (B::CopperFurnace, 1.5)]),
            owns(&[(B::StoneFurnace, 2), (B::CopperFurnace, 1)]),
        ),
    );
    add(
        "steel_production_mastery",
        listed_under(
            upgrade(
                "Steel Production Mastery",
                "Steel furnaces produce 100% more steel",
                Building,
                &[(R::Steel, 50.0), (R::Circuits, 15.0)],
                multiplies(&[(B::SteelFurnace, 2.0)]),
                owns(&[(B::SteelFurnace, 3)]),
            ),
            B::SteelFurnace,
        ),
    );

    // Manufacturing
    add(
        "gear_production_line",
        upgrade(
            "Gear Production Line",
            "Gear production buildings work 50% faster",
            Building,
            &[(R::Gears, 100.0), (R::IronPlates, 150.0)],
            multiplies(&[(B::ManualGearPress, 1.5), (B::GearAssembler, 1.5)]),
            owns(&[(B::GearAssembler, 2)]),
        ),
    );
    add(
        "circuit_assembly_line",
        upgrade(
            "Circuit Assembly Line",
            "Circuit and cable production 75% faster",
            Building,
            &[(R::Circuits, 50.0), (R::CopperCables, 200.0), (R::Steel, 100.0)],
            multiplies(&[(B::CableAssembler, 1.75), (B::CircuitAssembler, 1.75)]),
            owns(&[(B::CircuitAssembler, 2)]),
        ),
    );

    // Power
    add(
        "steam_efficiency",
        listed_under(
            upgrade(
                "Steam Engine Efficiency",
                "Steam engines produce 50% more electricity",
                Building,
                &[(R::Gears, 75.0), (R::Steel, 50.0)],
                multiplies(&[(B::SteamEngine, 1.5)]),
                owns(&[(B::SteamEngine, 2)]),
            ),
            B::SteamEngine,
        ),
    );
    add(
        "solar_optimization",
        listed_under(
            upgrade(
                "Solar Panel Optimization",
                "Solar panels produce 100% more electricity",
                Building,
                &[(R::Circuits, 100.0), (R::Steel, 200.0)],
                multiplies(&[(B::SolarPanel, 2.0)]),
                owns(&[(B::SolarPanel, 3)]),
            ),
            B::SolarPanel,
        ),
    );

    // Global
    add(
        "factory_organization",
        upgrade(
            "Factory Organization",
            "All buildings work 20% faster",
            Global,
            &[(R::Circuits, 100.0), (R::Gears, 200.0), (R::Steel, 100.0)],
            global(1.2),
            owns(&[(B::CircuitAssembler, 1)]),
        ),
    );
    add(
        "industrial_automation",
        upgrade(
            "Industrial Automation",
            "Factory-wide automation increases all production by 50%",
            Global,
            &[(R::Circuits, 500.0), (R::Engines, 50.0), (R::Steel, 300.0)],
            global(1.5),
            owns(&[(B::EngineAssembler, 2)]),
        ),
    );
    add(
        "mass_production",
        upgrade(
            "Mass Production",
            "All buildings 2x faster",
            Global,
            &[
                (R::Assemblers, 10.0),
                (R::Circuits, 1000.0),
                (R::Engines, 100.0),
                (R::Steel, 500.0),
            ],
            global(2.0),
            owns(&[(B::AssemblingMachine, 3)]),
        ),
    );

    // Research
    add(
        "research_efficiency",
        upgrade(
            "Research Efficiency",
            "Research points provide 50% more bonus",
            Research,
            &[(R::ResearchPoints, 10.0)],
            research(1.5),
            resets(1),
        ),
    );
    add(
        "advanced_research",
        upgrade(
            "Advanced Research Methods",
            "Research points provide double bonus",
            Research,
            &[(R::ResearchPoints, 50.0)],
            research(2.0),
            resets(3),
        ),
    );
    add(
        "research_mastery",
        upgrade(
            "Research Mastery",
            "Research bonus multiplied by 3",
            Research,
            &[(R::ResearchPoints, 200.0)],
            research(3.0),
            resets(8),
        ),
    );

    // Specialized
    add(
        "recycling_efficiency",
        upgrade(
            "Recycling Efficiency",
            "Recycling buildings work 100% faster",
            Building,
            &[(R::Circuits, 200.0), (R::Steel, 100.0)],
            multiplies(&[(B::ScrapRecycler, 2.0), (B::CopperRecycler, 2.0)]),
            owns(&[(B::ScrapRecycler, 1)]),
        ),
    );
    add(
        "alternative_energy",
        upgrade(
            "Alternative Energy Mastery",
            "Alternative power sources 75% more efficient",
            Building,
            &[(R::Steel, 300.0), (R::Circuits, 150.0)],
            multiplies(&[(B::CoalGasifier, 1.75), (B::WindTurbine, 1.75)]),
            owns(&[(B::WindTurbine, 1)]),
        ),
    );

    // Late game
    add(
        "robotic_assembly",
        upgrade(
            "Robotic Assembly",
            "Robot-assisted production doubles manufacturing",
            Building,
            &[(R::Robots, 25.0), (R::Computers, 50.0), (R::Circuits, 1000.0)],
            multiplies(&[
                (B::GearAssembler, 2.0),
                (B::CableAssembler, 2.0),
                (B::CircuitAssembler, 2.0),
                (B::EngineAssembler, 2.0),
                (B::AssemblingMachine, 2.0),
                (B::ProcessingUnit, 2.0),
            ]),
            owns(&[(B::RobotFactory, 2)]),
        ),
    );
    add(
        "quantum_efficiency",
        upgrade(
            "Quantum Efficiency",
            "Everything 3x faster",
            Global,
            &[
                (R::Robots, 100.0),
                (R::Computers, 200.0),
                (R::Circuits, 5000.0),
                (R::Steel, 2000.0),
            ],
            global(3.0),
            owns(&[(B::AdvancedLab, 3)]),
        ),
    );

    // Electricity-driven boosts
    let boosts = [
        (
            "electric_iron_boost",
            "Electric Iron Production",
            B::IronMine,
            B::ElectricIronDrill,
        ),
        (
            "electric_copper_boost",
            "Electric Copper Production",
            B::CopperMine,
            B::ElectricCopperDrill,
        ),
        (
            "electric_coal_boost",
            "Electric Coal Production",
            B::CoalMine,
            B::ElectricCoalDrill,
        ),
        (
            "electric_stone_boost",
            "Electric Stone Production",
            B::StoneQuarry,
            B::ElectricStoneDrill,
        ),
    ];
    for (id, name, mine, drill) in boosts {
        add(
            id,
            upgrade(
                name,
                "50% faster at an electricity cost",
                Electricity,
                &[(R::Electricity, 100.0), (R::Circuits, 15.0), (R::Steel, 50.0)],
                electric(&[(mine, 1.5), (drill, 1.5)], &[(mine, 1.0), (drill, 0.5)]),
                owns(&[(B::SteamEngine, 1)]),
            ),
        );
    }
    add(
        "electric_smelting_boost",
        upgrade(
            "Electric Smelting Enhancement",
            "Electric heating for furnaces, 75% faster smelting",
            Electricity,
            &[(R::Electricity, 200.0), (R::Circuits, 25.0), (R::Steel, 100.0)],
            electric(
                &[
                    (B::StoneFurnace, 1.75),
                    (B::CopperFurnace, 1.75),
                    (B::SteelFurnace, 1.75),
                ],
                &[
                    (B::StoneFurnace, 2.0),
                    (B::CopperFurnace, 2.0),
                    (B::SteelFurnace, 3.0),
                ],
            ),
            owns(&[(B::SteamEngine, 2)]),
        ),
    );
    add(
        "electric_manufacturing_boost",
        upgrade(
            "Electric Manufacturing Enhancement",
            "Electric-powered manufacturing, all assembly 100% faster",
            Electricity,
            &[(R::Electricity, 300.0), (R::Circuits, 50.0), (R::Steel, 200.0)],
            electric(
                &[
                    (B::ManualGearPress, 2.0),
                    (B::GearAssembler, 2.0),
                    (B::CableAssembler, 2.0),
                    (B::CircuitAssembler, 2.0),
                    (B::EngineAssembler, 2.0),
                ],
                &[
                    (B::ManualGearPress, 3.0),
                    (B::GearAssembler, 1.0),
                    (B::CableAssembler, 1.0),
                    (B::CircuitAssembler, 2.0),
                    (B::EngineAssembler, 3.0),
                ],
            ),
            owns(&[(B::CircuitAssembler, 2)]),
        ),
    );
    add(
        "electric_advanced_boost",
        upgrade(
            "Electric Advanced Production",
            "Advanced production 150% faster",
            Electricity,
            &[(R::Electricity, 500.0), (R::Circuits, 100.0), (R::Computers, 20.0)],
            electric(
                &[
                    (B::AssemblingMachine, 2.5),
                    (B::ProcessingUnit, 2.5),
                    (B::RobotFactory, 2.5),
                    (B::ChemicalPlant, 2.5),
                ],
                &[
                    (B::AssemblingMachine, 4.0),
                    (B::ProcessingUnit, 5.0),
                    (B::RobotFactory, 8.0),
                    (B::ChemicalPlant, 3.0),
                ],
            ),
            owns(&[(B::AssemblingMachine, 1)]),
        ),
    );
    add(
        "electric_research_boost",
        upgrade(
            "Electric Research Enhancement",
            "Research 200% faster",
            Electricity,
            &[(R::Electricity, 400.0), (R::Circuits, 75.0), (R::Computers, 15.0)],
            electric(
                &[(B::ResearchLab, 3.0), (B::AdvancedLab, 3.0)],
                &[(B::ResearchLab, 6.0), (B::AdvancedLab, 15.0)],
            ),
            owns(&[(B::ResearchLab, 1)]),
        ),
    );

    t
}
