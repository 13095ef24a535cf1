// Host-side tests for the galaxy point generator.

use approx::assert_relative_eq;
use demo_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn params(count: usize) -> GalaxyParams {
    GalaxyParams {
        count,
        ..GalaxyParams::default()
    }
}

/// Replays `values` in order, then panics if the generator asks for more.
fn scripted(values: Vec<f32>) -> impl FnMut() -> f32 {
    let mut it = values.into_iter();
    move || it.next().expect("generator drew more samples than scripted")
}

fn horizontal_radius(cloud: &PointCloud, i: usize) -> f32 {
    let [x, _, z] = cloud.position(i);
    (x * x + z * z).sqrt()
}

#[test]
fn buffers_hold_three_floats_per_point() {
    let mut rng = StdRng::seed_from_u64(1);
    for count in [0, 1, 2, 3, 100, 5_000] {
        let cloud = generate(&params(count), &mut rng);
        assert_eq!(cloud.positions.len(), 3 * count);
        assert_eq!(cloud.colors.len(), 3 * count);
        assert_eq!(cloud.len(), count);
    }
}

#[test]
fn zero_count_yields_empty_cloud() {
    let mut rng = StdRng::seed_from_u64(2);
    let cloud = generate(&params(0), &mut rng);
    assert!(cloud.is_empty());
}

#[test]
fn points_are_dealt_round_robin_over_arms() {
    for (count, branches) in [(3_000, 3), (10, 3), (7, 1), (41, 20)] {
        let mut per_arm = vec![0usize; branches as usize];
        for i in 0..count {
            per_arm[branch_index(i, branches) as usize] += 1;
        }
        let min = *per_arm.iter().min().unwrap();
        let max = *per_arm.iter().max().unwrap();
        assert!(max - min <= 1, "{count} points over {branches} arms: {per_arm:?}");
        assert_eq!(per_arm.iter().sum::<usize>(), count);
    }
}

#[test]
fn zero_branches_behaves_like_one_arm() {
    assert_eq!(branch_angle(5, 0), 0.0);
    let p = GalaxyParams {
        count: 16,
        branches: 0,
        ..GalaxyParams::default()
    };
    let cloud = generate(&p, &mut StdRng::seed_from_u64(3));
    assert!(cloud.positions.iter().all(|v| v.is_finite()));
}

#[test]
fn three_points_land_on_three_arms_with_scripted_randomness() {
    let p = GalaxyParams {
        count: 3,
        branches: 3,
        radius: 1.0,
        spin: 0.0,
        randomness_power: 3.0,
        ..GalaxyParams::default()
    };
    // radius draw 1.0, then magnitude 0 and coin 0 for each axis
    let mut draws = Vec::new();
    for _ in 0..3 {
        draws.extend_from_slice(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
    let cloud = generate_with(&p, scripted(draws));

    let third = std::f32::consts::TAU / 3.0;
    let expected = [
        [1.0, 0.0, 0.0],
        [third.cos(), 0.0, third.sin()],
        [(2.0 * third).cos(), 0.0, (2.0 * third).sin()],
    ];
    for (i, e) in expected.iter().enumerate() {
        let got = cloud.position(i);
        for c in 0..3 {
            assert_relative_eq!(got[c], e[c], epsilon = 1e-6);
        }
        let color = cloud.color(i);
        assert_relative_eq!(color[0], p.outside_color.r, epsilon = 1e-6);
        assert_relative_eq!(color[1], p.outside_color.g, epsilon = 1e-6);
        assert_relative_eq!(color[2], p.outside_color.b, epsilon = 1e-6);
    }
}

#[test]
fn each_point_sits_at_its_own_squared_draw() {
    let p = GalaxyParams {
        count: 3,
        branches: 3,
        radius: 1.0,
        spin: 0.0,
        randomness_power: 3.0,
        ..GalaxyParams::default()
    };
    let radius_draws = [0.2_f32, 0.9, 0.5];
    let mut draws = Vec::new();
    for r in radius_draws {
        draws.extend_from_slice(&[r, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
    let cloud = generate_with(&p, scripted(draws));

    let third = std::f32::consts::TAU / 3.0;
    for (i, r) in radius_draws.iter().enumerate() {
        let distance = r * r;
        let angle = i as f32 * third;
        let [x, y, z] = cloud.position(i);
        assert_relative_eq!(x, angle.cos() * distance, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0);
        assert_relative_eq!(z, angle.sin() * distance, epsilon = 1e-6);
        assert_relative_eq!(horizontal_radius(&cloud, i), distance, epsilon = 1e-6);
    }

    let inside = p.inside_color.to_array();
    let to_inside = |i: usize| {
        let c = cloud.color(i);
        (0..3).map(|k| (c[k] - inside[k]).powi(2)).sum::<f32>().sqrt()
    };
    assert!(to_inside(0) < to_inside(2), "{} vs {}", to_inside(0), to_inside(2));
    assert!(to_inside(2) < to_inside(1), "{} vs {}", to_inside(2), to_inside(1));
}

#[test]
fn generated_arms_hold_equal_shares_of_the_cloud() {
    let count = 3_000;
    for branches in [3_u32, 5] {
        let p = GalaxyParams {
            count,
            branches,
            radius: 5.0,
            spin: 0.0,
            randomness_power: 10.0,
            ..GalaxyParams::default()
        };
        let cloud = generate(&p, &mut StdRng::seed_from_u64(10 + branches as u64));
        let step = std::f32::consts::TAU / branches as f32;
        let mut per_arm = vec![0usize; branches as usize];
        for i in 0..cloud.len() {
            let [x, _, z] = cloud.position(i);
            let angle = z.atan2(x).rem_euclid(std::f32::consts::TAU);
            let arm = (angle / step).round() as usize % branches as usize;
            per_arm[arm] += 1;
        }
        let expected = count as f32 / branches as f32;
        for (arm, n) in per_arm.iter().enumerate() {
            assert!(
                (*n as f32 - expected).abs() < 0.15 * expected,
                "arm {arm} of {branches}: {per_arm:?}"
            );
        }
    }
}

#[test]
fn spin_twists_by_distance() {
    let p = GalaxyParams {
        count: 1,
        branches: 3,
        radius: 2.0,
        spin: 0.5,
        ..GalaxyParams::default()
    };
    // radius_i = 1.0^2 * 2.0 = 2.0, angle = 0 + 2.0 * 0.5 = 1.0
    let cloud = generate_with(&p, scripted(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
    let [x, y, z] = cloud.position(0);
    assert_relative_eq!(x, 2.0 * 1.0_f32.cos(), epsilon = 1e-6);
    assert_relative_eq!(y, 0.0);
    assert_relative_eq!(z, 2.0 * 1.0_f32.sin(), epsilon = 1e-6);
}

#[test]
fn coin_flip_picks_offset_sign() {
    let p = GalaxyParams {
        count: 1,
        radius: 0.0,
        randomness_power: 1.0,
        ..GalaxyParams::default()
    };
    // x: +0.25, y: -0.5, z: +0.75
    let cloud = generate_with(&p, scripted(vec![0.3, 0.25, 0.1, 0.5, 0.9, 0.75, 0.49]));
    assert_eq!(cloud.position(0), [0.25, -0.5, 0.75]);
}

#[test]
fn seven_samples_are_drawn_per_point() {
    let mut calls = 0usize;
    let cloud = generate_with(&params(250), || {
        calls += 1;
        0.5
    });
    assert_eq!(cloud.len(), 250);
    assert_eq!(calls, 250 * 7);
}

#[test]
fn zero_radius_paints_every_point_inside_color() {
    let p = GalaxyParams {
        count: 500,
        radius: 0.0,
        ..GalaxyParams::default()
    };
    let cloud = generate(&p, &mut StdRng::seed_from_u64(4));
    let inside = p.inside_color.to_array();
    for i in 0..cloud.len() {
        assert_eq!(cloud.color(i), inside);
    }
    assert!(cloud.colors.iter().all(|c| !c.is_nan()));
}

#[test]
fn colors_stay_between_inside_and_outside() {
    let p = params(2_000);
    let cloud = generate(&p, &mut StdRng::seed_from_u64(5));
    let (a, b) = (p.inside_color, p.outside_color);
    for i in 0..cloud.len() {
        let [r, _, bl] = cloud.color(i);
        assert!(r <= a.r.max(b.r) + 1e-6 && r >= a.r.min(b.r) - 1e-6);
        assert!(bl <= a.b.max(b.b) + 1e-6 && bl >= a.b.min(b.b) - 1e-6);
    }
}

#[test]
fn randomness_value_does_not_change_output() {
    let calm = GalaxyParams {
        count: 300,
        randomness: 0.0,
        ..GalaxyParams::default()
    };
    let wild = GalaxyParams {
        randomness: 2.0,
        ..calm.clone()
    };
    let a = generate(&calm, &mut StdRng::seed_from_u64(6));
    let b = generate(&wild, &mut StdRng::seed_from_u64(6));
    assert_eq!(a, b);
}

#[test]
fn same_parameters_give_statistically_similar_galaxies() {
    let p = params(20_000);
    let a = generate(&p, &mut StdRng::seed_from_u64(7));
    let b = generate(&p, &mut StdRng::seed_from_u64(8));
    assert_ne!(a, b);

    let mean = |c: &PointCloud| (0..c.len()).map(|i| horizontal_radius(c, i)).sum::<f32>() / c.len() as f32;
    let (ma, mb) = (mean(&a), mean(&b));
    assert!((ma - mb).abs() < 0.05 * ma, "mean radius {ma} vs {mb}");
    // squared uniform draw: E[r] = radius / 3
    assert!((ma - p.radius / 3.0).abs() < 0.3, "mean radius {ma}");
}

#[test]
fn same_seed_reproduces_the_same_cloud() {
    let p = params(1_000);
    let a = generate(&p, &mut StdRng::seed_from_u64(9));
    let b = generate(&p, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn panel_controls_cover_every_parameter() {
    let set = GalaxyParams::default().param_set();
    assert_eq!(set.len(), 9);
    assert!(set.iter().all(|c| c.trigger == Trigger::FinishChange));
    assert_eq!(set.number(PARAM_COUNT), Some(100_000.0));
    assert_eq!(
        set.control(PARAM_BRANCHES).map(|c| c.kind),
        Some(ControlKind::Range {
            min: 2.0,
            max: 20.0,
            step: 1.0
        })
    );
}

#[test]
fn applying_panel_values_updates_the_record() {
    let mut p = GalaxyParams::default();
    let mut set = p.param_set();

    let count = set.set(PARAM_COUNT, ParamValue::Number(150.0)).unwrap();
    assert!(p.apply(PARAM_COUNT, count));
    assert_eq!(p.count, 200);

    let color = set.set_text(PARAM_INSIDE_COLOR, "#00ff00").unwrap();
    assert!(p.apply(PARAM_INSIDE_COLOR, color));
    assert_eq!(p.inside_color, Color::from_hex(0x00ff00));

    assert!(!p.apply("wireframe", ParamValue::Toggle(true)));
    assert!(!p.apply(PARAM_SPIN, ParamValue::Toggle(true)));
}
