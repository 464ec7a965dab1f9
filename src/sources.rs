// src/sources.rs

/// One energy source column of the substitution dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnergySource {
    /// Exact CSV header.
    pub column: &'static str,
    /// Short name used on axes and legends.
    pub label: &'static str,
}

pub const YEAR: &str = "Year";

pub const COAL: EnergySource = EnergySource {
    column: "Coal (TWh, substituted energy)",
    label: "Coal",
};
pub const OIL: EnergySource = EnergySource {
    column: "Oil (TWh, substituted energy)",
    label: "Oil",
};
pub const GAS: EnergySource = EnergySource {
    column: "Gas (TWh, substituted energy)",
    label: "Gas",
};
pub const SOLAR: EnergySource = EnergySource {
    column: "Solar (TWh, substituted energy)",
    label: "Solar",
};
pub const WIND: EnergySource = EnergySource {
    column: "Wind (TWh, substituted energy)",
    label: "Wind",
};
pub const HYDROPOWER: EnergySource = EnergySource {
    column: "Hydropower (TWh, substituted energy)",
    label: "Hydropower",
};
pub const TRADITIONAL_BIOMASS: EnergySource = EnergySource {
    column: "Traditional biomass (TWh, substituted energy)",
    label: "Traditional Biomass",
};
pub const BIOFUELS: EnergySource = EnergySource {
    column: "Biofuels (TWh, substituted energy)",
    label: "Biofuels",
};

/// The six sources shared by the trend, snapshot and heatmap charts.
pub const KEY_SOURCES: [EnergySource; 6] = [COAL, OIL, GAS, SOLAR, WIND, HYDROPOWER];

/// Addends of the "Total Renewables" series.
pub const RENEWABLES: [EnergySource; 4] = [SOLAR, WIND, HYDROPOWER, BIOFUELS];

pub const ALL_SOURCES: [EnergySource; 8] = [
    COAL,
    OIL,
    GAS,
    SOLAR,
    WIND,
    HYDROPOWER,
    TRADITIONAL_BIOMASS,
    BIOFUELS,
];

/// Look up the short label for a CSV header, falling back to the header itself.
pub fn label_for(column: &str) -> &str {
    ALL_SOURCES
        .iter()
        .find(|s| s.column == column)
        .map(|s| s.label)
        .unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_known_and_unknown_columns() {
        assert_eq!(label_for("Wind (TWh, substituted energy)"), "Wind");
        assert_eq!(label_for("Entity"), "Entity");
    }

    #[test]
    fn renewables_exclude_biomass() {
        assert!(!RENEWABLES.contains(&TRADITIONAL_BIOMASS));
        assert_eq!(KEY_SOURCES.len(), 6);
    }
}
