use std::sync::Arc;

use glam::IVec2;
use lib_asset::EffectType;
use lib_level::EffectInstance;

fn painted(size: IVec2) -> EffectInstance {
    let mut effect = EffectInstance::new(Arc::new(EffectType::placeholder("Slime")), size);
    for x in 0..size.x {
        for y in 0..size.y {
            effect.set_amount(IVec2::new(x, y), (x * size.y + y + 1) as f64 / 1000.0);
        }
    }
    effect
}

#[test]
fn resize_shifts_amounts() {
    let before = painted(IVec2::new(10, 10));
    let mut after = before.clone();
    after.resize(IVec2::new(12, 8), IVec2::new(1, 0));
    assert_eq!(after.size(), IVec2::new(12, 8));

    for x in 0..10 {
        for y in 0..8 {
            let pos = IVec2::new(x, y);
            assert_eq!(after.amount(pos + IVec2::X), before.amount(pos), "{pos}");
        }
    }
    for y in 0..8 {
        assert_eq!(after.amount(IVec2::new(0, y)), 0.0);
        assert_eq!(after.amount(IVec2::new(11, y)), 0.0);
    }
}

#[test]
fn amounts_are_bounded() {
    let mut effect = painted(IVec2::new(3, 3));
    effect.set_amount(IVec2::new(1, 1), 4.0);
    assert_eq!(effect.amount(IVec2::new(1, 1)), 1.0);
    effect.set_amount(IVec2::new(1, 1), -1.0);
    assert_eq!(effect.amount(IVec2::new(1, 1)), 0.0);

    effect.set_amount(IVec2::new(3, 0), 0.5);
    assert_eq!(effect.amount(IVec2::new(3, 0)), 0.0);
    assert_eq!(effect.amount(IVec2::new(-1, 2)), 0.0);
}

#[test]
fn shrinking_drops_cells() {
    let before = painted(IVec2::new(4, 4));
    let mut after = before.clone();
    after.resize(IVec2::new(2, 2), IVec2::new(-2, -1));
    assert_eq!(after.amount(IVec2::new(0, 0)), before.amount(IVec2::new(2, 1)));
    assert_eq!(after.amount(IVec2::new(1, 1)), before.amount(IVec2::new(3, 2)));
}
