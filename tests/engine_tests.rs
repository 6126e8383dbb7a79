//! Engine behavior tests: ordering, the car-following rule, collisions,
//! and the road-position mapping.

use std::f32::consts::TAU;

use jam_sim::simulation::{point_at, polyline_length, Car, Road, Vec2, World};

const DT: f32 = 1.0 / 30.0;

fn test_car(length: f32, position: f32, speed: f32) -> Car {
    let mut car = Car::new(length, 100.0, 8.0, 0.1, [255, 0, 0]);
    car.position = position;
    car.speed = speed;
    car
}

fn straight_road_100() -> Road {
    Road::polyline(vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)], 1)
        .expect("valid polyline road")
}

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn sort_cars_orders_each_lane_by_position() {
    let mut road = straight_road_100();
    for position in [50.0, 10.0, 30.0] {
        road.add_car(test_car(5.0, position, 0.0), 0).unwrap();
    }
    road.sort_cars();

    let positions: Vec<f32> = road.lanes[0].iter().map(|car| car.position).collect();
    assert_eq!(positions, vec![10.0, 30.0, 50.0]);
}

#[test]
fn add_car_stamps_lane_index() {
    let mut road = Road::circular(Vec2::new(0.0, 0.0), 150.0, 10.0, 2).unwrap();
    road.add_car(test_car(5.0, 0.0, 0.0), 1).unwrap();
    assert_eq!(road.lanes[1][0].lane, 1);

    assert!(road.add_car(test_car(5.0, 0.0, 0.0), 2).is_err());
}

#[test]
fn successor_wraps_to_first_car() {
    let mut road = straight_road_100();
    for position in [10.0, 20.0, 30.0] {
        road.add_car(test_car(5.0, position, 0.0), 0).unwrap();
    }
    road.sort_cars();

    let mut successors = Vec::new();
    road.for_each_car(|_, car, next| {
        successors.push((car.position, next.map(|next| next.position)));
    });
    assert_eq!(
        successors,
        vec![
            (10.0, Some(20.0)),
            (20.0, Some(30.0)),
            (30.0, Some(10.0)),
        ]
    );
}

#[test]
fn lone_car_has_no_successor() {
    let mut road = straight_road_100();
    road.add_car(test_car(5.0, 42.0, 0.0), 0).unwrap();
    road.sort_cars();

    let mut saw = 0;
    road.for_each_car(|_, _, next| {
        saw += 1;
        assert!(next.is_none());
    });
    assert_eq!(saw, 1);
}

#[test]
fn lone_car_accelerates_freely() {
    let mut road = straight_road_100();
    road.add_car(test_car(5.0, 20.0, 10.0), 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    world.step(DT);

    let car = &world.roads[0].lanes[0][0];
    assert_eq!(car.acceleration, car.max_acceleration);

    // Plain kinematics with no braking terms.
    let expected_speed = (10.0 + 8.0 * DT).clamp(0.0, 100.0);
    let expected_position = 20.0 + expected_speed * DT + 0.5 * 8.0 * DT * DT;
    assert_close(car.speed, expected_speed, 1e-5);
    assert_close(car.position, expected_position, 1e-5);
}

#[test]
fn rear_end_collision_wrecks_both_cars() {
    // Lead car stationary at 50 (length 5), follower closing at speed 8.
    let mut road = straight_road_100();
    road.add_car(test_car(5.0, 44.0, 8.0), 0).unwrap();
    road.add_car(test_car(5.0, 50.0, 0.0), 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    world.step(DT);

    let lane = &world.roads[0].lanes[0];
    let follower = &lane[0];
    let leader = &lane[1];
    assert!(follower.wrecked);
    assert!(leader.wrecked);
    assert_eq!(follower.speed, 0.0);
    assert_eq!(leader.speed, 0.0);
    // Snapped to the leader's rear.
    assert_eq!(follower.position, 45.0);
    assert_eq!(leader.position, 50.0);
}

#[test]
fn wrecked_cars_stay_frozen() {
    let mut road = straight_road_100();
    road.add_car(test_car(5.0, 44.0, 8.0), 0).unwrap();
    road.add_car(test_car(5.0, 50.0, 0.0), 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    world.step(DT);

    for _ in 0..100 {
        world.step(DT);
    }
    let lane = &world.roads[0].lanes[0];
    assert_eq!(lane[0].position, 45.0);
    assert_eq!(lane[1].position, 50.0);
    assert_eq!(lane[0].speed, 0.0);
    assert_eq!(lane[1].speed, 0.0);
}

#[test]
fn gap_computation_wraps_across_the_seam() {
    // Follower near the end of the loop, leader just past position zero.
    // The raw position difference is negative; the gap must come out as 3.
    let mut road = straight_road_100();
    let mut follower = test_car(2.0, 98.0, 40.0);
    follower.min_keeping_time = 0.5;
    let mut leader = test_car(2.0, 1.0, 40.0);
    leader.min_keeping_time = 0.5;
    road.add_car(follower, 0).unwrap();
    road.add_car(leader, 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    world.step(DT);

    // With the wrapped gap of roughly 3 units at 40 units/s, the
    // keeping-time rule fires and the follower brakes instead of
    // accelerating off a bogus negative gap.
    let lane = &world.roads[0].lanes[0];
    let follower = lane.iter().find(|car| car.position > 50.0).unwrap();
    assert!(!follower.wrecked);
    assert_eq!(follower.acceleration, -follower.max_acceleration);
}

#[test]
fn positions_stay_wrapped_after_steps() {
    let mut road = straight_road_100();
    road.add_car(test_car(5.0, 98.0, 90.0), 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    for _ in 0..50 {
        world.step(DT);
        let car = &world.roads[0].lanes[0][0];
        assert!(
            (0.0..100.0).contains(&car.position),
            "position {} escaped the road",
            car.position
        );
    }
}

#[test]
fn stepping_is_deterministic() {
    let build = || {
        let mut road = straight_road_100();
        road.add_car(test_car(5.0, 10.0, 20.0), 0).unwrap();
        road.add_car(test_car(6.0, 40.0, 5.0), 0).unwrap();
        road.add_car(test_car(5.5, 70.0, 30.0), 0).unwrap();
        let mut world = World::new(800.0, 600.0);
        world.add_road(road);
        world
    };

    let mut first = build();
    let mut second = build();
    for _ in 0..200 {
        first.step(DT);
        second.step(DT);
    }

    let flatten = |world: &World| {
        let mut state = Vec::new();
        world.roads[0].for_each_car(|_, car, _| {
            state.push((car.position, car.speed, car.acceleration, car.wrecked));
        });
        state
    };
    assert_eq!(flatten(&first), flatten(&second));
}

#[test]
fn polyline_length_and_point_at() {
    let points = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
    ];
    assert_eq!(polyline_length(&points), 20.0);
    assert_eq!(polyline_length(&points[..1]), 0.0);

    let placement = point_at(&points, 15.0).unwrap();
    assert_close(placement.translate.x, 10.0, 1e-5);
    assert_close(placement.translate.y, 5.0, 1e-5);
    assert_close(placement.tangent.x, 0.0, 1e-5);
    assert_close(placement.tangent.y, 1.0, 1e-5);

    assert!(point_at(&points, -1.0).is_err());
    assert!(point_at(&points, 25.0).is_err());
}

#[test]
fn circular_road_length_and_seam_continuity() {
    let road = Road::circular(Vec2::new(400.0, 300.0), 150.0, 10.0, 2).unwrap();
    assert_close(road.length, TAU * 150.0, 1e-3);

    for lane in 0..road.num_lanes() {
        let start = road.position_to_world(0.0, lane).unwrap();
        let end = road.position_to_world(road.length, lane).unwrap();
        assert_close(start.translate.x, end.translate.x, 1e-2);
        assert_close(start.translate.y, end.translate.y, 1e-2);
    }

    // Outer lane sits one lane width further out.
    let inner = road.position_to_world(0.0, 0).unwrap();
    let outer = road.position_to_world(0.0, 1).unwrap();
    assert_close(outer.translate.x - inner.translate.x, 10.0, 1e-3);
}

#[test]
fn circular_tangent_points_in_travel_direction() {
    let road = Road::circular(Vec2::new(0.0, 0.0), 150.0, 10.0, 1).unwrap();
    // At angle zero the car sits at (radius, 0) moving counterclockwise.
    let placement = road.position_to_world(0.0, 0).unwrap();
    assert_close(placement.tangent.x, 0.0, 1e-5);
    assert_close(placement.tangent.y, 1.0, 1e-5);

    let quarter = road.position_to_world(road.length / 4.0, 0).unwrap();
    assert_close(quarter.tangent.x, -1.0, 1e-4);
    assert_close(quarter.tangent.y, 0.0, 1e-4);
}

#[test]
fn degenerate_geometry_is_rejected() {
    assert!(Road::polyline(vec![Vec2::new(1.0, 1.0)], 1).is_err());
    assert!(Road::polyline(
        vec![Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)],
        1
    )
    .is_err());
    assert!(Road::polyline(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], 0).is_err());
    assert!(Road::circular(Vec2::new(0.0, 0.0), 0.0, 10.0, 1).is_err());
    assert!(Road::circular(Vec2::new(0.0, 0.0), 150.0, -1.0, 1).is_err());
    assert!(Vec2::new(0.0, 0.0).unit().is_err());
    assert!(Vec2::new(0.0, 0.0).normal().is_err());
}

#[test]
fn matched_speeds_do_not_brake_at_safe_distance() {
    // Same speed, generous gap: neither the impact-time nor keeping rules
    // fire and the follower keeps accelerating.
    let mut road = straight_road_100();
    road.add_car(test_car(2.0, 10.0, 20.0), 0).unwrap();
    road.add_car(test_car(2.0, 60.0, 20.0), 0).unwrap();

    let mut world = World::new(800.0, 600.0);
    world.add_road(road);
    world.step(DT);

    let follower = &world.roads[0].lanes[0][0];
    assert!(!follower.wrecked);
    assert_eq!(follower.acceleration, follower.max_acceleration);
}
