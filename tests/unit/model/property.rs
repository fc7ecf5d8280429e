use super::*;

fn key(time: f32, value: f64) -> Keyframe<f64> {
    Keyframe {
        time,
        value,
        hold: false,
    }
}

#[test]
fn keyframes_clamp_outside_range() {
    let a = Animated::Keyframes(vec![key(10.0, 0.0), key(20.0, 100.0)]);
    assert_eq!(a.sample(0.0), 0.0);
    assert_eq!(a.sample(10.0), 0.0);
    assert_eq!(a.sample(20.0), 100.0);
    assert_eq!(a.sample(99.0), 100.0);
}

#[test]
fn keyframes_interpolate_linearly_between_keys() {
    let a = Animated::Keyframes(vec![key(0.0, 0.0), key(10.0, 100.0), key(20.0, 50.0)]);
    assert_eq!(a.sample(5.0), 50.0);
    assert_eq!(a.sample(15.0), 75.0);
    assert_eq!(a.sample(2.5), 25.0);
}

#[test]
fn hold_keys_do_not_interpolate() {
    let a = Animated::Keyframes(vec![
        Keyframe {
            time: 0.0,
            value: 1.0,
            hold: true,
        },
        key(10.0, 2.0),
    ]);
    assert_eq!(a.sample(9.9), 1.0);
    assert_eq!(a.sample(10.0), 2.0);
}

#[test]
fn vectors_and_colors_lerp_componentwise() {
    let v = Animated::Keyframes(vec![
        Keyframe {
            time: 0.0,
            value: Vec2::new(0.0, 10.0),
            hold: false,
        },
        Keyframe {
            time: 4.0,
            value: Vec2::new(8.0, 30.0),
            hold: false,
        },
    ]);
    assert_eq!(v.sample(1.0), Vec2::new(2.0, 15.0));

    let c = Rgba::lerp(&Rgba::rgb(0.0, 0.0, 0.0), &Rgba::rgb(1.0, 0.5, 0.0), 0.5);
    assert_eq!(c, Rgba::rgb(0.5, 0.25, 0.0));
}

#[test]
fn text_switches_without_blending() {
    let a = "a".to_owned();
    let b = "b".to_owned();
    assert_eq!(String::lerp(&a, &b, 0.99), "a");
    assert_eq!(String::lerp(&a, &b, 1.0), "b");
}

#[test]
fn static_values_ignore_frame() {
    let p = Property::constant(7.0);
    assert!(!p.value.is_animated());
    assert_eq!(p.value.sample(123.0), 7.0);
}
