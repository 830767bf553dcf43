/// Column-name constants for the waste-stream tables.
/// Single source of truth - exported to Python via PyO3.

// ── Stream columns ──────────────────────────────────────────────────────────
pub mod stream {
    pub const STREAM_ID: &str = "Stream ID";
    pub const VOLUME: &str = "Volume";
    pub const MASS: &str = "Mass";
    pub const CONDITIONING_FACTOR: &str = "Conditioning factor";
    pub const CONDITIONING_MATERIAL: &str = "Conditioning material";
    pub const PACKAGE_TYPE: &str = "Package type";
    pub const PACKAGING_FACTOR: &str = "Packaging factor";
    pub const ROUTE_NUMBER: &str = "Route Number";
}

// ── Conditioning materials ──────────────────────────────────────────────────
pub mod material {
    pub const DENSITY: &str = "Density";

    pub const AIR: &str = "Air";
    pub const GROUT: &str = "Grout";
    pub const NO_CONDITIONING_MATERIAL: &str = "No Conditioning Material";

    /// Fixed density reference set, mass per unit volume.
    pub const DENSITIES: [(&str, f64); 3] = [
        (AIR, 0.0),
        (GROUT, 1.7),
        (NO_CONDITIONING_MATERIAL, 0.0),
    ];
}

// ── Conditioning delta columns ──────────────────────────────────────────────
pub mod conditioning {
    pub const VOLUME_DELTA: &str = "Volume Delta";
    pub const MASS_DELTA: &str = "Mass Delta";
}

// ── Package definition columns ──────────────────────────────────────────────
pub mod package {
    pub const PACKAGE_TYPE: &str = "Package type";
    pub const EXTERNAL_VOLUME: &str = "External volume";
    pub const CONTAINER_WEIGHT: &str = "Container weight";
    pub const DEFAULT_PACKING_FACTOR: &str = "Default packing factor";

    pub const SECONDARY_PREFIX: &str = "Secondary ";
    pub const SECONDARY_PACKAGE_TYPE: &str = "Secondary Package type";
    pub const SECONDARY_EXTERNAL_VOLUME: &str = "Secondary External volume";
    pub const SECONDARY_CONTAINER_WEIGHT: &str = "Secondary Container weight";
    pub const SECONDARY_DEFAULT_PACKING_FACTOR: &str = "Secondary Default packing factor";
}

// ── Packaging change columns ────────────────────────────────────────────────
pub mod packaging {
    pub const PRIMARY_PACKAGE: &str = "Primary Package";
    pub const PRIMARY_PACKAGED_VOLUME: &str = "Primary Packaged Volume";
    pub const PRIMARY_MASS_DELTA: &str = "Primary Mass Delta";
    pub const PRIMARY_CONTAINERS: &str = "No. of Primary Containers";
    pub const SECONDARY_PACKAGE: &str = "Secondary Package";
    pub const SECONDARY_PACKAGED_VOLUME: &str = "Secondary Packaged Volume";
    pub const SECONDARY_MASS_DELTA: &str = "Secondary Mass Delta";
    pub const SECONDARY_CONTAINERS: &str = "No. of Secondary Containers";
}

// ── Route factor columns ────────────────────────────────────────────────────
pub mod route {
    pub const ROUTE_NUMBER: &str = "Route number";
    pub const VOLUME_FACTOR: &str = "Volume Factor";
    pub const MASS_FACTOR: &str = "Mass Factor";
    pub const ACTIVITY: &str = "Activity";
}

// ── Activity limit columns ──────────────────────────────────────────────────
pub mod activity {
    pub const NORMALISED_ACTIVITY: &str = "Normalised Activity";
    pub const IS_WITHIN_LIMIT: &str = "Is Within Limit";
}
