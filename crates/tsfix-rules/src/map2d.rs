//! Rule set for `components/Map2D.tsx`

use tsfix_core::{Rule, RuleSet};

use crate::common::suppress_object_injection;

pub const TARGET: &str = "components/Map2D.tsx";

/// Build the rule set
pub fn rule_set() -> RuleSet {
    RuleSet::new(TARGET)
        .rule(Rule::literal(
            "void_observer_cleanup",
            "Give the ResizeObserver cleanup a block body",
            "return () => ro.disconnect();",
            "return () => { ro.disconnect(); };",
        ))
        .rule(Rule::literal(
            "void_wheel_listener",
            "Give the wheel listener a block body",
            "const listener = (event: WheelEvent) => handleWheel(event);",
            "const listener = (event: WheelEvent) => { handleWheel(event); };",
        ))
        .rule(Rule::literal(
            "void_listener_cleanup",
            "Give the wheel listener cleanup a block body",
            "return () => canvas.removeEventListener('wheel', listener);",
            "return () => { canvas.removeEventListener('wheel', listener); };",
        ))
        .rule(Rule::literal(
            "sphere_geo_object",
            "Cast the sphere outline to d3.GeoPermissibleObjects",
            "{ type: 'Sphere' } as any",
            "{ type: 'Sphere' } as d3.GeoPermissibleObjects",
        ))
        .rule(suppress_object_injection(
            "suppress_feature_lookup",
            "const feature = world.geoJson?.features?.[i];",
        ))
        .rule(suppress_object_injection(
            "suppress_cell_color",
            "const color = getCellColor(world.cells[i], viewMode, world.params.seaLevel);",
        ))
        .rule(suppress_object_injection(
            "suppress_pixel_copy",
            "outData[outIdx] = srcData[srcIdx];",
        ))
}
