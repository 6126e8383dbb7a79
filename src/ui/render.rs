//! Gizmo rendering of roads and cars

use bevy::prelude::*;

use crate::simulation::consts::WRECKED_CAR_COLOR;
use crate::simulation::RoadPath;

use super::WorldResource;

const LANE_COLOR: Color = Color::srgb(0.35, 0.35, 0.45);

/// Draw lane outlines and car footprints from the engine's placement
/// traversal. Read-only: rendering never mutates simulation state.
pub fn draw_world(mut gizmos: Gizmos, world: Res<WorldResource>) {
    for road in &world.0.roads {
        match &road.path {
            RoadPath::Circular {
                center,
                min_radius,
                lane_width,
            } => {
                for lane in 0..road.num_lanes() {
                    let radius = lane as f32 * lane_width + min_radius;
                    gizmos.circle_2d(
                        Isometry2d::from_translation(Vec2::new(center.x, center.y)),
                        radius,
                        LANE_COLOR,
                    );
                }
            }
            RoadPath::Polyline(points) => {
                gizmos.linestrip_2d(
                    points.iter().map(|point| Vec2::new(point.x, point.y)),
                    LANE_COLOR,
                );
            }
        }

        road.for_each_car(|road, car, _next| {
            let placement = match road.position_to_world(car.position, car.lane) {
                Ok(placement) => placement,
                Err(error) => {
                    warn!("skipping car outside road geometry: {error}");
                    return;
                }
            };
            let [r, g, b] = if car.wrecked {
                WRECKED_CAR_COLOR
            } else {
                car.color
            };
            let angle = placement.tangent.y.atan2(placement.tangent.x);
            gizmos.rect_2d(
                Isometry2d::new(
                    Vec2::new(placement.translate.x, placement.translate.y),
                    Rot2::radians(angle),
                ),
                Vec2::splat(car.length),
                Color::srgb_u8(r, g, b),
            );
        });
    }
}
