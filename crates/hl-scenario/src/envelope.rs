//! Steady-state envelope heat loss, BTU/hr.

use crate::conditions::DesignConditions;
use crate::error::CalcResult;
use crate::geometry::SurfaceAreas;
use crate::scenario::Scenario;
use hl_catalog::MaterialLibrary;
use serde::Serialize;

/// Loss per element plus the sealing penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnvelopeLoss {
    pub wall: f64,
    pub roof: f64,
    pub windows: f64,
    pub doors: f64,
    pub floor: f64,
    pub infiltration: f64,
    pub total: f64,
    /// Above-grade conductance including the sealing penalty, BTU/hr·°F.
    pub ua: f64,
    /// Floor conductance to the ground, BTU/hr·°F.
    pub ua_floor: f64,
    pub net_wall_area: f64,
    pub net_roof_area: f64,
}

/// Opaque wall and roof area left once openings are cut out.
///
/// Openings come out of the walls first; any overflow comes out of the roof.
pub fn net_areas(areas: &SurfaceAreas, openings_ft2: f64) -> (f64, f64) {
    let mut net_wall = areas.wall - openings_ft2;
    let mut net_roof = areas.roof;
    if net_wall < 0.0 {
        net_roof += net_wall;
        net_wall = 0.0;
    }
    (net_wall, net_roof.max(0.0))
}

pub fn envelope_loss(
    areas: &SurfaceAreas,
    conditions: &DesignConditions,
    scenario: &Scenario,
    library: &MaterialLibrary,
) -> CalcResult<EnvelopeLoss> {
    conditions.validate()?;
    let (r_wall, r_roof, r_floor) = scenario.element_r_values(library)?;
    let dt_air = conditions.delta_t_air();
    let dt_ground = conditions.delta_t_ground();

    let (net_wall, net_roof) = net_areas(
        areas,
        scenario.windows.area_ft2 + scenario.doors.area_ft2,
    );

    let ua_wall = net_wall / r_wall;
    let ua_roof = net_roof / r_roof;
    let ua_windows = scenario.windows.conductance();
    let ua_doors = scenario.doors.conductance();
    let ua_floor = areas.floor / r_floor;

    let wall = ua_wall * dt_air;
    let roof = ua_roof * dt_air;
    let windows = ua_windows * dt_air;
    let doors = ua_doors * dt_air;
    let floor = ua_floor * dt_ground;

    let penalty = scenario.air_sealing.penalty();
    let conductive = wall + roof + windows + doors + floor;
    let infiltration = conductive * penalty;

    Ok(EnvelopeLoss {
        wall,
        roof,
        windows,
        doors,
        floor,
        infiltration,
        total: conductive + infiltration,
        ua: (ua_wall + ua_roof + ua_windows + ua_doors) * (1.0 + penalty),
        ua_floor,
        net_wall_area: net_wall,
        net_roof_area: net_roof,
    })
}
